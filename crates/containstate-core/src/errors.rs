use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Containment mismatches are never errors; they are reported through
/// `ComparisonResult`. These kinds cover the faults that stop a comparison
/// from producing a result at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    /// A value could not be introspected into elements or attributes
    Introspection,
    /// Caller-supplied input (e.g. JSON text) could not be parsed
    InvalidInput,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::Introspection => "ERR_INTROSPECTION",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
        }
    }
}

/// Canonical structured error type
///
/// Carries a stable kind for programmatic handling plus the operation and
/// the operand (`actual` or `expected`) on which the fault surfaced.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<&'static str>,
    type_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            type_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the operand the fault belongs to
    pub fn with_side(mut self, side: &'static str) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the name of the type that failed introspection
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the operand context, if any
    pub fn side(&self) -> Option<&'static str> {
        self.side
    }

    /// Get the type name context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Faults raised by `Introspect` implementations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IntrospectError {
    /// A serde-backed value failed to serialize
    #[error("Failed to serialize {type_name}: {reason}")]
    Serialization { type_name: String, reason: String },

    /// Two keys of a keyed collection render to the same attribute name
    #[error("Keyed collection {type_name} has more than one key rendered as '{key}'")]
    DuplicateKey { type_name: String, key: String },

    /// A signed time delta cannot be represented as a duration
    #[error("Negative time delta cannot be introspected as a duration: {delta}")]
    NegativeDuration { delta: String },

    /// Raised by hand-written `Introspect` implementations
    #[error("{type_name} cannot be introspected: {reason}")]
    Custom { type_name: String, reason: String },
}

impl IntrospectError {
    /// Shorthand for a custom fault from a hand-written implementation
    pub fn custom(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        IntrospectError::Custom {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    fn type_name(&self) -> Option<&str> {
        match self {
            IntrospectError::Serialization { type_name, .. }
            | IntrospectError::DuplicateKey { type_name, .. }
            | IntrospectError::Custom { type_name, .. } => Some(type_name),
            IntrospectError::NegativeDuration { .. } => None,
        }
    }
}

impl From<IntrospectError> for ExError {
    fn from(err: IntrospectError) -> Self {
        let ex = ExError::new(ExErrorKind::Introspection).with_message(err.to_string());
        match err.type_name() {
            Some(type_name) => ex.with_type_name(type_name),
            None => ex,
        }
    }
}
