//! Class model for the release-protocol generator.
//!
//! A front-end (outside this workspace) inspects source code and produces one
//! [`ClassModel`] per candidate class: its identity, the release capabilities
//! it and its nearest base declare, the members that may take part in
//! cascading release, and the hook methods its author marked. Every attribute
//! lookup has already happened by the time a model exists; the generator only
//! reads pre-resolved boolean facts and role tags.
//!
//! # Pipeline Position
//!
//! ```text
//!   front-end  →  ClassModel (this crate)
//!                     ↓
//!               rel_codegen: classify → plan → synthesize → emit
//!                     ↓
//!                 relc (driver)
//! ```
//!
//! Models are immutable once built. The generator derives new structures from
//! them and never writes back.

mod model;

pub use model::{
    Accessibility, ClassModel, HookMethod, HookRole, InclusionPolicy, MemberCandidate, MemberKind,
    MemberNames,
};
