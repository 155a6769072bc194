use rentbook_domain::{DateWindowError, FrequencyType, ParseFrequencyError};
use thiserror::Error;
use uuid::Uuid;

/// Raised when a fee template's frequency rule cannot produce a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("unknown frequency type `{0}`")]
    UnknownFrequency(String),
    #[error("frequency `{0}` requires a frequency value")]
    MissingFrequencyValue(FrequencyType),
    #[error("specific month must be between 1 and 12, got {0}")]
    MonthOutOfRange(i32),
    #[error("quarterly interval must be positive, got {0}")]
    NonPositiveInterval(i32),
}

impl From<ParseFrequencyError> for ConfigurationError {
    fn from(err: ParseFrequencyError) -> Self {
        ConfigurationError::UnknownFrequency(err.0)
    }
}

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Fee configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Owner not found: {0}")]
    OwnerNotFound(Uuid),
    #[error("Property not found: {0}")]
    PropertyNotFound(Uuid),
    #[error("Tenant not found: {0}")]
    TenantNotFound(Uuid),
    #[error("Rental not found: {0}")]
    RentalNotFound(Uuid),
    #[error("Fee template not found: {0}")]
    FeeTemplateNotFound(Uuid),
    #[error("Payment not found: {0}")]
    PaymentNotFound(Uuid),
    #[error("Meter not found: {0}")]
    MeterNotFound(Uuid),
    #[error("Attachment not found: {0}")]
    AttachmentNotFound(Uuid),
    #[error("Image not found: {0}")]
    ImageNotFound(Uuid),
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl From<DateWindowError> for CoreError {
    fn from(err: DateWindowError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
