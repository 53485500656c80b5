//! Error types.
//!
//! The optimization core reports failures through [`CoreError`], a small
//! closed taxonomy. None of these are retryable: the pipeline is
//! deterministic, so retrying with unchanged inputs cannot change the
//! outcome. The binary layer converts a `CoreError` into an [`AppError`]
//! carrying a process exit code.

/// Failure taxonomy of the optimization core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// The request violates a documented precondition (empty food list,
    /// non-positive or non-finite energy target, non-finite percentages).
    InvalidRequest(String),
    /// A requested food identifier is not present in the catalog.
    UnknownFood(String),
    /// The synthesized meal has zero total mass or zero energy, so the
    /// derived percentages are undefined.
    DegenerateMeal(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::InvalidRequest(msg) => write!(f, "Invalid request: {msg}"),
            CoreError::UnknownFood(id) => write!(f, "Unknown food: '{id}' is not in the catalog."),
            CoreError::DegenerateMeal(msg) => write!(f, "Degenerate meal: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let exit_code = match &err {
            CoreError::InvalidRequest(_) => 2,
            CoreError::UnknownFood(_) => 3,
            CoreError::DegenerateMeal(_) => 4,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
