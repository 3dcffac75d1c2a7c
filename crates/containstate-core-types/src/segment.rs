//! Path segments of a comparison location

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step into a nested value: an attribute name or a sequence index
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Segment {
    Index(usize),
    Attribute(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Index(index) => write!(f, "{}", index),
            Segment::Attribute(name) => f.write_str(name),
        }
    }
}

impl From<usize> for Segment {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl From<&str> for Segment {
    fn from(name: &str) -> Self {
        Segment::Attribute(name.to_string())
    }
}

impl From<String> for Segment {
    fn from(name: String) -> Self {
        Segment::Attribute(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_renders_as_decimal() {
        assert_eq!(Segment::Index(12).to_string(), "12");
    }

    #[test]
    fn test_attribute_renders_verbatim() {
        assert_eq!(Segment::from("name").to_string(), "name");
    }

    #[test]
    fn test_serializes_untagged() {
        let segments = vec![Segment::from("items"), Segment::from(2usize), Segment::from("name")];
        let json = serde_json::to_value(&segments).unwrap();
        assert_eq!(json, serde_json::json!(["items", 2, "name"]));
    }
}
