use std::fmt;

// WorkflowError is Clone + Send so it can cross the task boundary of a
// cancellable submission and be handed back to the wizard unchanged
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowError {
    // Record failed a required-field or consent check, the user has to correct it
    ValidationError(String),
    // Simulated network failure, the caller may retry
    TransientError(String),
    // Lookup of a submission id that is not in the log
    NotFoundError(String),
    // Submission was aborted before it completed
    Cancelled,
    // Reading or writing the local store failed
    StorageError(String),
    // Error for JSON serialization
    JsonSerializationError(String),
    // Error for JSON deserialization
    JsonDeserializationError(String),
    // Spawned submission task panicked or was torn down by the runtime
    TaskError(String),
}

impl WorkflowError {
    // Only simulated network failures are worth another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, WorkflowError::TransientError(_))
    }
}

impl fmt::Display for WorkflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowError::ValidationError(err) => write!(f, "Validation error: {}", err),
            WorkflowError::TransientError(err) => write!(f, "Transient error: {}", err),
            WorkflowError::NotFoundError(id) => write!(f, "Submission not found: {}", id),
            WorkflowError::Cancelled => write!(f, "Submission cancelled"),
            WorkflowError::StorageError(err) => write!(f, "Storage error: {}", err),
            WorkflowError::JsonSerializationError(err) => write!(f, "JSON serialization error: {}", err),
            WorkflowError::JsonDeserializationError(err) => write!(f, "JSON deserialization error: {}", err),
            WorkflowError::TaskError(err) => write!(f, "Task error: {}", err),
        }
    }
}

impl std::error::Error for WorkflowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transient_errors_are_retryable() {
        assert!(WorkflowError::TransientError("Network error".to_string()).is_retryable());
        assert!(!WorkflowError::ValidationError("missing".to_string()).is_retryable());
        assert!(!WorkflowError::NotFoundError("abc".to_string()).is_retryable());
        assert!(!WorkflowError::Cancelled.is_retryable());
    }

    #[test]
    fn not_found_names_the_id() {
        let err = WorkflowError::NotFoundError("abc-123".to_string());
        assert_eq!(err.to_string(), "Submission not found: abc-123");
    }
}
