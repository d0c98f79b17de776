use crate::error::{Error, Result};

use std::{fmt, str};

/// Separator for attribute path components.
const PATH_SEPARATOR: &str = ".";

/// A reference to a (possibly nested) item attribute, e.g. `profile.age`.
///
/// Construction validates the path eagerly: an empty string or an empty
/// dot-segment is rejected with an error rather than surfacing later as a
/// malformed expression.
///
/// ```rust
/// use dynamodb_expr::expression::path;
///
/// let path = path::AttributePath::new("profile.age")?;
/// assert_eq!(path.name_expression(), "#profile.#age");
/// # Ok::<(), dynamodb_expr::error::Error>(())
/// ```
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct AttributePath {
    segments: Vec<String>,
}

impl AttributePath {
    /// Parses a dot-separated attribute path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyPath`] for an empty input and
    /// [`Error::EmptySegment`] when any dot-segment is empty (e.g. `a..b`).
    pub fn new(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(Error::EmptyPath);
        }
        let segments: Vec<String> = path.split(PATH_SEPARATOR).map(ToString::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(Error::EmptySegment {
                path: path.to_string(),
            });
        }
        Ok(Self { segments })
    }

    /// The dot-segments of the path, in order. Always non-empty.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The path rendered with name placeholders: each segment prefixed with
    /// `#`, segments joined by `.` (e.g. `#profile.#age`).
    #[must_use]
    pub fn name_expression(&self) -> String {
        let placeholders: Vec<String> = self
            .segments
            .iter()
            .map(|segment| format!("#{segment}"))
            .collect();
        placeholders.join(PATH_SEPARATOR)
    }

    /// The `(placeholder, attribute name)` pairs backing
    /// [`name_expression`](Self::name_expression), one per segment, in order.
    ///
    /// Duplicates are allowed; consolidation into the final table dedupes
    /// identical entries, so referencing the same path twice is safe.
    #[must_use]
    pub fn name_table(&self) -> Vec<(String, String)> {
        self.segments
            .iter()
            .map(|segment| (format!("#{segment}"), segment.clone()))
            .collect()
    }

    /// A deterministic value-placeholder seed derived from the path.
    ///
    /// Two operands built over the same path receive the same seed, so this
    /// is NOT a uniqueness mechanism: expressions referencing one path with
    /// two different comparison values would silently collide. Literal
    /// operands therefore allocate opaque random tokens instead (see
    /// [`operand::Operand::value`](crate::expression::operand::Operand::value));
    /// the seed remains available for callers that need a stable placeholder
    /// name for a slot they know is referenced exactly once.
    #[must_use]
    pub fn value_token_seed(&self) -> String {
        format!(":{}", self.segments.join("_"))
    }
}

impl str::FromStr for AttributePath {
    type Err = Error;

    fn from_str(path: &str) -> Result<Self> {
        Self::new(path)
    }
}

impl fmt::Display for AttributePath {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.segments.join(PATH_SEPARATOR))
    }
}
