//! Generation request submitted to the server

use crate::constants::MAX_NUM_IMAGES;
use thiserror::Error;

/// One submission: the prompt and how many reference images the server
/// should retrieve for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub num_images: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("prompt cannot be empty")]
    EmptyPrompt,

    #[error("number of images must be between 1 and {max}, got {value}")]
    NumImagesOutOfRange { value: u32, max: u32 },

    #[error("number of images must be a whole number, got '{input}'")]
    InvalidNumImages { input: String },
}

impl GenerateRequest {
    /// Build a validated request. The prompt is trimmed.
    pub fn new(prompt: impl Into<String>, num_images: u32) -> Result<Self, RequestError> {
        let prompt = prompt.into().trim().to_string();
        if prompt.is_empty() {
            return Err(RequestError::EmptyPrompt);
        }
        check_num_images(num_images)?;
        Ok(Self { prompt, num_images })
    }

    /// Build a request from raw form input, where the image count is still text.
    pub fn from_form(prompt: &str, num_images: &str) -> Result<Self, RequestError> {
        let count = parse_num_images(num_images)?;
        Self::new(prompt, count)
    }
}

/// Parse an image count typed by the user.
pub fn parse_num_images(input: &str) -> Result<u32, RequestError> {
    let trimmed = input.trim();
    let value = trimmed
        .parse::<u32>()
        .map_err(|_| RequestError::InvalidNumImages {
            input: trimmed.to_string(),
        })?;
    check_num_images(value)?;
    Ok(value)
}

pub(crate) fn check_num_images(value: u32) -> Result<(), RequestError> {
    if value == 0 || value > MAX_NUM_IMAGES {
        return Err(RequestError::NumImagesOutOfRange {
            value,
            max: MAX_NUM_IMAGES,
        });
    }
    Ok(())
}
