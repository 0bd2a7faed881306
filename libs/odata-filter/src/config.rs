//! Rendering options.

use serde::Deserialize;

use crate::error::{Error, FilterResult};

/// How loop variables of `any`/`all` lambdas are named when the caller does
/// not supply a name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VarNameStrategy {
    /// `<prefix>` followed by four random hex digits, e.g. `i3f0a`.
    #[default]
    Random,
    /// `<prefix>` followed by a per-filter counter: `i0`, `i1`, ...
    Sequential,
}

/// Options applied to one `build` call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterOptions {
    /// Prefix of generated loop variable names.
    /// Default: `"i"`
    pub var_prefix: String,

    /// Naming strategy for generated loop variables.
    /// Default: `random`
    pub var_names: VarNameStrategy,

    /// Upper bound on the rendered filter length in characters.
    /// Default: no limit
    pub max_filter_length: Option<usize>,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            var_prefix: "i".to_owned(),
            var_names: VarNameStrategy::default(),
            max_filter_length: None,
        }
    }
}

impl FilterOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use sequential loop variable names.
    #[must_use]
    pub fn sequential(mut self) -> Self {
        self.var_names = VarNameStrategy::Sequential;
        self
    }

    #[must_use]
    pub fn with_var_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.var_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_max_filter_length(mut self, max: usize) -> Self {
        self.max_filter_length = Some(max);
        self
    }

    /// Validate a rendered filter against `max_filter_length`.
    ///
    /// # Errors
    /// Returns `Error::FilterTooLong` if the filter exceeds the configured maximum.
    pub fn validate_length(&self, filter: &str) -> FilterResult<()> {
        match self.max_filter_length {
            Some(max) if filter.chars().count() > max => Err(Error::FilterTooLong {
                len: filter.chars().count(),
                max,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let opts = FilterOptions::default();
        assert_eq!(opts.var_prefix, "i");
        assert_eq!(opts.var_names, VarNameStrategy::Random);
        assert_eq!(opts.max_filter_length, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let opts: FilterOptions =
            serde_json::from_str(r#"{"var_names": "sequential", "max_filter_length": 2000}"#)
                .unwrap();
        assert_eq!(opts.var_prefix, "i");
        assert_eq!(opts.var_names, VarNameStrategy::Sequential);
        assert_eq!(opts.max_filter_length, Some(2000));
    }

    #[test]
    fn test_deserialize_rejects_unknown_fields() {
        let res = serde_json::from_str::<FilterOptions>(r#"{"max_top": 10}"#);
        assert!(res.is_err());
    }

    #[test]
    fn test_validate_length() {
        let opts = FilterOptions::new().with_max_filter_length(10);
        assert!(opts.validate_length("name eq 1").is_ok());
        assert_eq!(
            opts.validate_length("name eq 'IPhone'"),
            Err(Error::FilterTooLong { len: 16, max: 10 })
        );
        assert!(FilterOptions::new().validate_length(&"x".repeat(10_000)).is_ok());
    }
}
