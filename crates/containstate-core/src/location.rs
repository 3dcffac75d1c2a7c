//! Location tracking
//!
//! A location identifies where inside the compared values a step of the
//! comparison happens. It renders as a slash-delimited path such as
//! `/items/2/name`, where the root is `/`.

use containstate_core_types::Segment;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between path segments; also the canonical root path
pub const LOCATION_DELIMITER: &str = "/";

/// Append one segment to a rendered path
///
/// Inserts a single delimiter between `location` and `segment` unless
/// `location` already ends with one, so the root (`/`) and the empty path
/// both produce `/segment`.
///
/// # Example
///
/// ```
/// use containstate_core::location::append;
///
/// assert_eq!(append("/", "items"), "/items");
/// assert_eq!(append("/items", 2), "/items/2");
/// ```
pub fn append(location: &str, segment: impl fmt::Display) -> String {
    let delimiter = if location.ends_with(LOCATION_DELIMITER) {
        ""
    } else {
        LOCATION_DELIMITER
    };
    format!("{}{}{}", location, delimiter, segment)
}

/// Structured location: the ordered segments from the root
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Location {
    segments: Vec<Segment>,
}

impl Location {
    /// The root location
    pub fn root() -> Self {
        Self::default()
    }

    /// A new location one segment below this one
    pub fn child(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment.into());
        Self { segments }
    }

    /// Segments from the root, outermost first
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Whether this is the root location
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Nesting depth (0 at the root)
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Rendered path string
    pub fn path(&self) -> String {
        self.segments
            .iter()
            .fold(LOCATION_DELIMITER.to_string(), |path, segment| {
                append(&path, segment)
            })
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl FromIterator<Segment> for Location {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}
