use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A referenced Food, AddOn, Outlet or outlet-scoped Food collection is absent
    #[error("{reason}")]
    NotFound { reason: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

impl ServiceError {
    pub fn not_found(reason: impl Into<String>) -> Self {
        ServiceError::NotFound {
            reason: reason.into(),
        }
    }

    /// HTTP-style status code carried by the error
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NotFound { .. } => 404,
            ServiceError::Repository { source } => source.status_code(),
        }
    }

    /// Human-readable reason, safe to expose to API callers
    pub fn reason(&self) -> String {
        match self {
            ServiceError::NotFound { reason } => reason.clone(),
            ServiceError::Repository { source } => match source {
                RepositoryError::NotFound => "Resource not found".to_string(),
                RepositoryError::ConnectionFailed => "Database connection failed".to_string(),
                RepositoryError::Timeout => "Request timeout".to_string(),
                RepositoryError::RateLimitExceeded => "Rate limit exceeded".to_string(),
                _ => "Internal server error".to_string(),
            },
        }
    }
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database connection failed")]
    ConnectionFailed,

    #[error("Item not found")]
    NotFound,

    #[error("AWS SDK error: {message}")]
    AwsSdk { message: String },

    #[error("DynamoDB table not found: {table_name}. Ensure the table exists and IAM permissions are correct.")]
    TableNotFound { table_name: String },

    #[error("Invalid item: {message}")]
    InvalidItem { message: String },

    #[error("Timeout occurred during operation")]
    Timeout,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

impl RepositoryError {
    fn status_code(&self) -> u16 {
        match self {
            RepositoryError::NotFound => 404,
            RepositoryError::ConnectionFailed => 503,
            RepositoryError::Timeout => 408,
            RepositoryError::RateLimitExceeded => 429,
            _ => 500,
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;
