use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown verification level '{value}' (expected Certified, Silver, Gold or Platinum)")]
    InvalidVerificationLevel { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
