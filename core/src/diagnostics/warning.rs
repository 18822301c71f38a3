//! Warning types and codes for naming diagnostics.

/// Severity levels for naming warnings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Name adjusted with no effect on the generated DDL's validity.
    Info,
    /// Name usable only when quoted, or a manifest entry was overridden.
    Lossy,
    /// The plan would produce invalid DDL (e.g., two tables with one name).
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Lossy => write!(f, "lossy"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A naming warning or diagnostic message.
#[derive(Debug, Clone)]
pub struct Warning {
    /// Warning code (e.g., "RESERVED_ESCAPED", "NAME_COLLISION").
    pub code: &'static str,
    /// Severity level.
    pub severity: Severity,
    /// Human-readable description.
    pub message: String,
    /// Optional object identifier (`Entity` or `Entity.property`).
    pub object: Option<String>,
}

impl Warning {
    pub fn new(code: &'static str, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            code,
            severity,
            message: message.into(),
            object: None,
        }
    }

    pub fn with_object(mut self, object: impl Into<String>) -> Self {
        self.object = Some(object.into());
        self
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(obj) = &self.object {
            write!(f, "[{}] {}: {}", self.code, obj, self.message)
        } else {
            write!(f, "[{}] {}", self.code, self.message)
        }
    }
}

// Warning code constants

// Reserved key words
pub const RESERVED_ESCAPED: &str = "RESERVED_ESCAPED";
pub const JOIN_NAME_RESERVED: &str = "JOIN_NAME_RESERVED";

// Name resolution
pub const NAME_COLLISION: &str = "NAME_COLLISION";

// Manifest references
pub const TARGET_MISSING: &str = "TARGET_MISSING";
pub const UNKNOWN_INDEX_PROPERTY: &str = "UNKNOWN_INDEX_PROPERTY";
pub const ENTITY_REDEFINED: &str = "ENTITY_REDEFINED";
