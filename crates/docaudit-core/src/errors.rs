use docaudit_core_types::RequestId;
use thiserror::Error;

/// Result type alias using AuditError
pub type Result<T> = std::result::Result<T, AuditError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting by the host's job runner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Schema loading
    InvalidInput,
    InvalidSchema,
    InvalidPolicyPath,

    // Recursion limits
    SchemaTooDeep,
    DocumentTooDeep,

    // Configuration
    InvalidConfig,

    // Integration/IO
    Io,
    Serialization,
    Persistence,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::InvalidSchema => "ERR_INVALID_SCHEMA",
            ExErrorKind::InvalidPolicyPath => "ERR_INVALID_POLICY_PATH",
            ExErrorKind::SchemaTooDeep => "ERR_SCHEMA_TOO_DEEP",
            ExErrorKind::DocumentTooDeep => "ERR_DOCUMENT_TOO_DEEP",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, dotted path, collection slug, request id).
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    slug: Option<String>,
    request_id: Option<RequestId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            slug: None,
            request_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add dotted field path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add collection or global slug context
    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
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

    /// Get the dotted path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the slug context, if any
    pub fn slug(&self) -> Option<&str> {
        self.slug.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(slug) = &self.slug {
            write!(f, " (slug: {})", slug)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for audit diff and event operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuditError {
    // ===== Schema Errors =====
    /// Schema document could not be interpreted as a field sequence
    #[error("Invalid schema: {reason}")]
    InvalidSchema { reason: String },

    /// A `path` override on an audit policy annotation is not a dotted path
    #[error("Invalid policy path '{path}': {reason}")]
    InvalidPolicyPath { path: String, reason: String },

    /// A document snapshot does not have the shape an operation requires
    #[error("Invalid document: {reason}")]
    InvalidDocument { reason: String },

    // ===== Depth Limits =====
    /// Schema nesting exceeds the configured maximum depth
    #[error("Schema too deep at '{path}': exceeds maximum depth {max_depth}")]
    SchemaTooDeep { path: String, max_depth: usize },

    /// Document nesting exceeds the configured maximum depth
    #[error("Document too deep at '{path}': exceeds maximum depth {max_depth}")]
    DocumentTooDeep { path: String, max_depth: usize },

    // ===== Configuration =====
    /// Plugin configuration could not be parsed
    #[error("Invalid config: {reason}")]
    InvalidConfig { reason: String },

    // ===== Integration =====
    /// The audit sink rejected a job
    #[error("Failed to enqueue audit job for '{slug}': {reason}")]
    EnqueueFailed { slug: String, reason: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Filesystem error
    #[error("IO error: {message}")]
    Io { message: String },

    /// Internal error (should never happen)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        AuditError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        AuditError::Io {
            message: err.to_string(),
        }
    }
}

impl From<AuditError> for ExError {
    fn from(err: AuditError) -> Self {
        let message = err.to_string();
        match err {
            AuditError::InvalidSchema { .. } => ExError::new(ExErrorKind::InvalidSchema),
            AuditError::InvalidDocument { .. } => ExError::new(ExErrorKind::InvalidInput),
            AuditError::InvalidPolicyPath { path, .. } => {
                ExError::new(ExErrorKind::InvalidPolicyPath).with_path(path)
            }
            AuditError::SchemaTooDeep { path, .. } => {
                ExError::new(ExErrorKind::SchemaTooDeep).with_path(path)
            }
            AuditError::DocumentTooDeep { path, .. } => {
                ExError::new(ExErrorKind::DocumentTooDeep).with_path(path)
            }
            AuditError::InvalidConfig { .. } => ExError::new(ExErrorKind::InvalidConfig),
            AuditError::EnqueueFailed { slug, .. } => {
                ExError::new(ExErrorKind::Persistence).with_slug(slug)
            }
            AuditError::Serialization { .. } => ExError::new(ExErrorKind::Serialization),
            AuditError::Io { .. } => ExError::new(ExErrorKind::Io),
            AuditError::Internal { .. } => ExError::new(ExErrorKind::Internal),
        }
        .with_message(message)
    }
}
