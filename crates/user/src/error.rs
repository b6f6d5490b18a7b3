use thiserror::Error;

/// Domain-specific errors for user operations
///
/// Conflict and credential variants are expected outcomes the HTTP layer
/// turns into client errors. The rest are infrastructure failures.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Password hashing failed")]
    HashingError(String),

    #[error("Token encoding failed")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    #[error("Database error")]
    DatabaseError(#[from] sqlx::Error),
}

/// Result type for user operations that may fail with UserError
pub type UserResult<T> = Result<T, UserError>;
