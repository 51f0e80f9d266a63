//! Generator configuration.

/// Names of the target runtime's release surface.
///
/// The defaults describe .NET; the synthesizer never hard-codes any of
/// these, so the emitter can be pointed at a differently named surface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Vocabulary {
    pub sync_interface: String,
    pub async_interface: String,
    pub sync_method: String,
    pub async_method: String,
    pub async_core_method: String,
    /// Awaitable type returned by the async operations.
    pub awaitable: String,
    pub guard_field: String,
    /// Parameter of the overridable hook telling explicit release apart
    /// from the finalizer path.
    pub explicit_param: String,
    /// Statement that tells the runtime the finalizer no longer needs to run.
    pub suppress_finalizer: String,
    /// Namespace the marker definitions are emitted into.
    pub marker_namespace: String,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            sync_interface: "IDisposable".to_string(),
            async_interface: "IAsyncDisposable".to_string(),
            sync_method: "Dispose".to_string(),
            async_method: "DisposeAsync".to_string(),
            async_core_method: "DisposeAsyncCore".to_string(),
            awaitable: "ValueTask".to_string(),
            guard_field: "isDisposed".to_string(),
            explicit_param: "disposing".to_string(),
            suppress_finalizer: "GC.SuppressFinalize(this)".to_string(),
            marker_namespace: "DisposeGenerator".to_string(),
        }
    }
}

/// Options for one generation run. Shared read-only by every class.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct GeneratorConfig {
    /// Whether the target provides the async release interface at all.
    pub async_interface_available: bool,
    /// Let properties follow the class policy like fields do. Off by
    /// default: properties take part only when explicitly included.
    pub properties_follow_policy: bool,
    /// Emit `///` documentation on generated operations.
    pub emit_doc_comments: bool,
    /// Spaces per indentation level.
    pub indent_size: usize,
    pub vocabulary: Vocabulary,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            async_interface_available: true,
            properties_follow_policy: false,
            emit_doc_comments: true,
            indent_size: 4,
            vocabulary: Vocabulary::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_async_interface(mut self, available: bool) -> Self {
        self.async_interface_available = available;
        self
    }

    #[must_use]
    pub fn with_properties_follow_policy(mut self, follow: bool) -> Self {
        self.properties_follow_policy = follow;
        self
    }

    #[must_use]
    pub fn with_doc_comments(mut self, emit: bool) -> Self {
        self.emit_doc_comments = emit;
        self
    }

    #[must_use]
    pub fn with_indent_size(mut self, size: usize) -> Self {
        self.indent_size = size;
        self
    }

    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }
}
