use std::fmt;

use crate::error::{Error, FilterResult};

/// An already-rendered filter fragment.
///
/// Produced by every builder operation and accepted as an argument by every
/// other one; its text is inserted verbatim and never re-escaped. A fragment
/// whose rendering failed carries the error instead of text, and the error is
/// reported when the fragment is read.
#[derive(Clone, PartialEq, Eq)]
#[must_use]
pub struct FilterExpr {
    rendered: FilterResult<String>,
}

impl FilterExpr {
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: Ok(rendered.into()),
        }
    }

    pub fn failed(error: Error) -> Self {
        Self {
            rendered: Err(error),
        }
    }

    pub(crate) fn from_result(rendered: FilterResult<String>) -> Self {
        Self { rendered }
    }

    /// The rendered fragment.
    ///
    /// # Errors
    /// Returns the error recorded while this fragment (or one of its
    /// arguments) was rendered.
    pub fn as_str(&self) -> Result<&str, Error> {
        self.rendered.as_deref().map_err(Clone::clone)
    }

    /// Consume the fragment and return its text.
    ///
    /// # Errors
    /// Returns the error recorded while this fragment was rendered.
    pub fn into_string(self) -> FilterResult<String> {
        self.rendered
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.rendered.is_ok()
    }
}

impl fmt::Debug for FilterExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rendered {
            Ok(s) => f.debug_tuple("FilterExpr").field(s).finish(),
            Err(e) => f.debug_tuple("FilterExpr").field(e).finish(),
        }
    }
}
