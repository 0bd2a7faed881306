/// Unified error type for filter rendering.
///
/// Rendering is a pure string transform, so every variant describes an input
/// that has no valid `OData` textual form. Errors raised inside a nested
/// expression travel with that expression and surface from `build`, so a
/// caller either receives a complete filter or an error, never a fragment.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A literal that has no `OData` representation (e.g. `NaN`).
    #[error("unsupported filter argument: {0}")]
    UnsupportedArgument(String),

    /// A path segment that is empty or contains `/`.
    #[error("invalid property path segment: '{0}'")]
    InvalidPathSegment(String),

    /// The root path used where a property is required.
    #[error("empty property path used as an operand")]
    EmptyPath,

    /// `in` with no values has no `OData` form.
    #[error("empty value list for 'in'")]
    EmptyInList,

    /// A caller-supplied loop variable that is not a plain identifier.
    #[error("invalid lambda variable name: '{0}'")]
    InvalidVarName(String),

    /// `all` requires a condition.
    #[error("missing condition for '{0}' lambda")]
    MissingCondition(&'static str),

    /// The name generator could not produce a fresh loop variable.
    #[error("could not generate a unique lambda variable name after {0} attempts")]
    VarNamesExhausted(usize),

    #[error("rendered $filter is {len} characters long, maximum is {max}")]
    FilterTooLong { len: usize, max: usize },
}

pub type FilterResult<T> = Result<T, Error>;
