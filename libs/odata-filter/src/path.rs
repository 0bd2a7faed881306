use std::fmt;

use crate::error::{Error, FilterResult};

/// An immutable field chain relative to the current builder scope.
///
/// Rendered as the `/`-joined segment list. Segments are validated when the
/// path is rendered: an empty segment or one containing `/` is rejected with
/// [`Error::InvalidPathSegment`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    segments: Vec<String>,
}

impl PropertyPath {
    /// The empty chain (the root of an unprefixed scope).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-segment path.
    #[must_use]
    pub fn new(segment: impl Into<String>) -> Self {
        Self {
            segments: vec![segment.into()],
        }
    }

    /// Split a `/`-delimited path such as `customer/name`.
    ///
    /// An empty string yields the root path.
    #[must_use]
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self::root();
        }
        Self {
            segments: path.split('/').map(str::to_owned).collect(),
        }
    }

    /// Extend the chain by one segment.
    #[must_use]
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend(self.segments.iter().cloned());
        segments.push(segment.into());
        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Render the chain, validating every segment.
    ///
    /// # Errors
    /// Returns `Error::InvalidPathSegment` if a segment is empty or contains `/`.
    pub fn render(&self) -> FilterResult<String> {
        if let Some(bad) = self
            .segments
            .iter()
            .find(|s| s.is_empty() || s.contains('/'))
        {
            return Err(Error::InvalidPathSegment(bad.clone()));
        }
        Ok(self.segments.join("/"))
    }

    /// Render the chain where it names a property on its own: an operand or
    /// the collection of a lambda.
    ///
    /// # Errors
    /// Returns `Error::EmptyPath` for the root path, otherwise as
    /// [`render`](Self::render).
    pub fn render_operand(&self) -> FilterResult<String> {
        if self.is_root() {
            return Err(Error::EmptyPath);
        }
        self.render()
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}
