use std::fmt;

/// Error codes for all generator diagnostics.
///
/// Format: E#### where first digit indicates phase:
/// - E1xxx: Model errors (the class description cannot be planned)
/// - E2xxx: Emission errors (the plan cannot be written as source)
/// - E9xxx: Internal errors
/// - W1xxx: Classification warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Model Errors (E1xxx)
    /// Async release claimed but the target has no async release interface
    E1001,
    /// Base implements async release without sync release
    E1002,
    /// Sealed class whose base owns the sync release surface
    E1003,

    // Emission Errors (E2xxx)
    /// Malformed identifier
    E2001,
    /// Unsupported member declaration kind
    E2002,
    /// Member declaration binds no names
    E2003,
    /// Accessibility only valid on nested types
    E2004,

    // Internal Errors (E9xxx)
    /// Internal generator error
    E9001,

    // Classification Warnings (W1xxx)
    /// Force-include marker on a member whose type cannot be released
    W1001,
    /// Member carries both include and exclude markers
    W1002,
}

impl ErrorCode {
    /// Every error code, in declaration order.
    ///
    /// Kept in sync with `as_str()`; the `all_codes_round_trip` test catches
    /// an omission.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E1001,
        ErrorCode::E1002,
        ErrorCode::E1003,
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E9001,
        ErrorCode::W1001,
        ErrorCode::W1002,
    ];

    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            // Model
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            // Emission
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            // Internal
            ErrorCode::E9001 => "E9001",
            // Warnings
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E1001"` or `"w1002"`.
///
/// Case-insensitive. Derived from [`ErrorCode::ALL`] and [`ErrorCode::as_str()`].
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
