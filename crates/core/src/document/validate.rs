//! Document id validation.
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("record id is required")]
    MissingId,
    #[error("record id cannot be empty")]
    EmptyId,
    #[error("invalid path segment: {0:?}")]
    InvalidSegment(String),
}

/// Validate that a record carries a usable document id and return it.
pub fn validate_document_id(id: Option<&str>) -> Result<&str, ValidationError> {
    match id {
        None => Err(ValidationError::MissingId),
        Some(id) => {
            validate_segment(id)?;
            Ok(id)
        }
    }
}

pub(crate) fn validate_segment(segment: &str) -> Result<(), ValidationError> {
    if segment.is_empty() {
        return Err(ValidationError::EmptyId);
    }
    if segment.contains('/') {
        return Err(ValidationError::InvalidSegment(segment.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_and_empty_ids() {
        assert_eq!(validate_document_id(None), Err(ValidationError::MissingId));
        assert_eq!(validate_document_id(Some("")), Err(ValidationError::EmptyId));
    }

    #[test]
    fn accepts_plain_id() {
        assert_eq!(validate_document_id(Some("v1")), Ok("v1"));
    }
}
