// src/generators/mod.rs
use thiserror::Error;

use crate::models::{MAX_PASSWORD_LENGTH, MIN_PASSWORD_LENGTH};

pub mod charset;
pub mod password;
pub mod pronounceable;
pub mod strength;

pub use password::PasswordGenerator;
pub use pronounceable::{GeminiClient, PronounceableError, PronounceableRequest, PronounceableSource};
pub use strength::StrengthScorer;

// Rejections raised before any generation is attempted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select at least one character type")]
    NoCharacterClasses,

    #[error("Password length {length} is outside the allowed range {min}-{max}")]
    LengthOutOfRange { length: usize, min: usize, max: usize },
}

pub fn validate_length(length: usize) -> Result<(), ValidationError> {
    if (MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::LengthOutOfRange {
            length,
            min: MIN_PASSWORD_LENGTH,
            max: MAX_PASSWORD_LENGTH,
        })
    }
}
