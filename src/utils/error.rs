use thiserror::Error;

/// Failure of a single supplier call. Recovered by the aggregator unless every supplier fails.
#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("Failed to fetch flights from supplier {supplier}: HTTP {status} ({reason})")]
    BadResponse {
        supplier: String,
        status: u16,
        reason: String,
    },

    #[error("Error calling supplier {supplier} API: {source}")]
    TransportFailure {
        supplier: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Search task for supplier {supplier} did not complete: {reason}")]
    Interrupted { supplier: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierErrorKind {
    BadResponse,
    TransportFailure,
    Interrupted,
}

impl SupplierError {
    pub fn bad_response(supplier: &str, status: u16, reason: impl Into<String>) -> Self {
        Self::BadResponse {
            supplier: supplier.to_string(),
            status,
            reason: reason.into(),
        }
    }

    pub fn transport<E>(supplier: &str, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::TransportFailure {
            supplier: supplier.to_string(),
            source: Box::new(source),
        }
    }

    pub fn kind(&self) -> SupplierErrorKind {
        match self {
            Self::BadResponse { .. } => SupplierErrorKind::BadResponse,
            Self::TransportFailure { .. } => SupplierErrorKind::TransportFailure,
            Self::Interrupted { .. } => SupplierErrorKind::Interrupted,
        }
    }

    pub fn supplier(&self) -> &str {
        match self {
            Self::BadResponse { supplier, .. }
            | Self::TransportFailure { supplier, .. }
            | Self::Interrupted { supplier, .. } => supplier,
        }
    }

    /// HTTP status reported by the supplier, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::BadResponse { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// The only errors that escape a search.
#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Failed to fetch flight search details from all {attempted} suppliers")]
    AllSuppliersFailed {
        attempted: usize,
        #[source]
        first_cause: SupplierError,
    },

    #[error("No flight suppliers are registered")]
    NoSuppliers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateErrorKind {
    AllSuppliersFailed,
    NoSuppliers,
}

impl AggregateError {
    pub fn kind(&self) -> AggregateErrorKind {
        match self {
            Self::AllSuppliersFailed { .. } => AggregateErrorKind::AllSuppliersFailed,
            Self::NoSuppliers => AggregateErrorKind::NoSuppliers,
        }
    }

    pub fn first_cause(&self) -> Option<&SupplierError> {
        match self {
            Self::AllSuppliersFailed { first_cause, .. } => Some(first_cause),
            Self::NoSuppliers => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum FlightSearchError {
    #[error(transparent)]
    SearchError(#[from] AggregateError),

    #[error("HTTP client error: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid search request, {field}: {reason}")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Input,
    Upstream,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl FlightSearchError {
    pub fn validation(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::ValidationError { .. } => ErrorCategory::Input,
            Self::SearchError(AggregateError::AllSuppliersFailed { .. }) => ErrorCategory::Upstream,
            Self::SearchError(AggregateError::NoSuppliers) => ErrorCategory::Configuration,
            Self::HttpClientError(_) | Self::IoError(_) | Self::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// Status an HTTP front end should answer with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::ValidationError { .. } => 400,
            Self::SearchError(AggregateError::AllSuppliersFailed { .. }) => 502,
            _ => 500,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ValidationError { field, reason, .. } => {
                format!("Invalid Input: {}: {}", field, reason)
            }
            Self::SearchError(AggregateError::AllSuppliersFailed { .. }) => {
                "Flight search failed due to supplier failure".to_string()
            }
            Self::SearchError(AggregateError::NoSuppliers) => {
                "No flight suppliers are enabled".to_string()
            }
            Self::ConfigError { .. }
            | Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => format!("Configuration problem: {}", self),
            _ => format!("Internal error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Use 3-letter airport codes, YYYY-MM-DD dates and between 1 and 4 passengers"
            }
            ErrorCategory::Configuration => {
                "Check the [[suppliers]] entries and base URLs in the configuration file"
            }
            ErrorCategory::Upstream => "Suppliers are currently unavailable, try again later",
            ErrorCategory::System => "Check network connectivity and local file permissions",
        }
    }
}

pub type Result<T> = std::result::Result<T, FlightSearchError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn all_failed() -> FlightSearchError {
        FlightSearchError::SearchError(AggregateError::AllSuppliersFailed {
            attempted: 2,
            first_cause: SupplierError::bad_response("CrazyAir", 500, "server error"),
        })
    }

    #[test]
    fn test_all_suppliers_failed_maps_to_bad_gateway() {
        let err = all_failed();
        assert_eq!(err.http_status(), 502);
        assert_eq!(err.category(), ErrorCategory::Upstream);
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err
            .user_friendly_message()
            .contains("supplier failure"));
    }

    #[test]
    fn test_validation_maps_to_bad_request() {
        let err = FlightSearchError::validation("origin", "LONDON", "must be exactly 3 characters");
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.category(), ErrorCategory::Input);
        assert!(err.user_friendly_message().starts_with("Invalid Input"));
    }

    #[test]
    fn test_first_cause_is_exposed_as_source() {
        use std::error::Error;

        let err = AggregateError::AllSuppliersFailed {
            attempted: 1,
            first_cause: SupplierError::transport(
                "ToughJet",
                std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused"),
            ),
        };
        let source = err.source().map(|s| s.to_string()).unwrap_or_default();
        assert!(source.contains("ToughJet"));
        assert_eq!(
            err.first_cause().map(SupplierError::kind),
            Some(SupplierErrorKind::TransportFailure)
        );
    }

    #[test]
    fn test_supplier_error_accessors() {
        let err = SupplierError::bad_response("CrazyAir", 503, "HTTP status not successful");
        assert_eq!(err.supplier(), "CrazyAir");
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.kind(), SupplierErrorKind::BadResponse);
        assert!(err.to_string().contains("Failed to fetch flights from supplier CrazyAir"));
    }
}
