//! Document addressing utilities.
//!
//! Documents are addressed as `{collection}/{id}`, e.g. `videos/abc123`.
//! Neither segment may be empty or contain a `/`.
use std::fmt;

use super::validate::{validate_segment, ValidationError};

const SEPARATOR: char = '/';

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    /// Build a path from its two segments, validating both.
    pub fn new(collection: &str, id: &str) -> Result<Self, ValidationError> {
        validate_segment(collection)?;
        validate_segment(id)?;
        Ok(Self {
            collection: collection.to_string(),
            id: id.to_string(),
        })
    }

    /// Parse a `{collection}/{id}` string.
    pub fn parse(path: &str) -> Result<Self, ValidationError> {
        match path.split_once(SEPARATOR) {
            Some((collection, id)) => Self::new(collection, id),
            None => Err(ValidationError::InvalidSegment(path.to_string())),
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{SEPARATOR}{}", self.collection, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_document_path() {
        let path = DocumentPath::parse("videos/abc123").unwrap();
        assert_eq!(path.collection(), "videos");
        assert_eq!(path.id(), "abc123");
        assert_eq!(path.to_string(), "videos/abc123");
    }

    #[test]
    fn reject_nested_path() {
        let result = DocumentPath::parse("videos/abc/def");
        assert!(matches!(result, Err(ValidationError::InvalidSegment(_))));
    }

    #[test]
    fn reject_missing_segments() {
        assert!(DocumentPath::parse("videos").is_err());
        assert!(matches!(
            DocumentPath::parse("videos/"),
            Err(ValidationError::EmptyId)
        ));
        assert!(DocumentPath::new("", "abc").is_err());
    }
}
