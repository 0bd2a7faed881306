//! Per-`build` render context and builder scopes.

use std::cell::{Cell, RefCell};
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use rand::Rng;

use crate::config::{FilterOptions, VarNameStrategy};
use crate::error::{Error, FilterResult};
use crate::path::PropertyPath;

const MAX_VAR_NAME_ATTEMPTS: usize = 64;

/// Source of loop variable names for `any`/`all` lambdas.
pub trait VarNameGenerator {
    /// Produce a candidate name starting with `prefix`.
    ///
    /// Candidates that collide with names already used in the current filter
    /// are discarded by the caller, so implementations need not track them.
    ///
    /// # Errors
    /// Implementations may fail if no further names can be produced.
    fn next_name(&self, prefix: &str) -> FilterResult<String>;
}

/// `i0`, `i1`, `i2`, ...
#[derive(Debug, Default)]
pub struct SequentialVarNames {
    next: Cell<usize>,
}

impl VarNameGenerator for SequentialVarNames {
    fn next_name(&self, prefix: &str) -> FilterResult<String> {
        let n = self.next.get();
        self.next.set(n + 1);
        Ok(format!("{prefix}{n}"))
    }
}

/// Prefix followed by four random hex digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomVarNames;

impl VarNameGenerator for RandomVarNames {
    fn next_name(&self, prefix: &str) -> FilterResult<String> {
        let token: u32 = rand::rng().random_range(0..0x1_0000);
        Ok(format!("{prefix}{token:04x}"))
    }
}

/// Options and loop variable bookkeeping shared by all builders of one
/// `build` call.
pub struct FilterContext {
    options: FilterOptions,
    var_names: Box<dyn VarNameGenerator>,
    used_vars: RefCell<HashSet<String>>,
}

impl FilterContext {
    /// Context with the generator selected by `options.var_names`.
    #[must_use]
    pub fn new(options: FilterOptions) -> Self {
        let var_names: Box<dyn VarNameGenerator> = match options.var_names {
            VarNameStrategy::Random => Box::new(RandomVarNames),
            VarNameStrategy::Sequential => Box::<SequentialVarNames>::default(),
        };
        Self {
            options,
            var_names,
            used_vars: RefCell::new(HashSet::new()),
        }
    }

    /// Context with a caller-supplied generator.
    #[must_use]
    pub fn with_generator(options: FilterOptions, generator: impl VarNameGenerator + 'static) -> Self {
        Self {
            options,
            var_names: Box::new(generator),
            used_vars: RefCell::new(HashSet::new()),
        }
    }

    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Resolve the loop variable for a lambda.
    ///
    /// A requested name is validated and used as is. Otherwise names are drawn
    /// from the generator until one is found that is unused in this filter.
    pub(crate) fn loop_var(&self, requested: Option<&str>) -> FilterResult<String> {
        if let Some(name) = requested {
            validate_var_name(name)?;
            self.used_vars.borrow_mut().insert(name.to_owned());
            return Ok(name.to_owned());
        }

        for _ in 0..MAX_VAR_NAME_ATTEMPTS {
            let name = self.var_names.next_name(&self.options.var_prefix)?;
            validate_var_name(&name)?;
            if self.used_vars.borrow_mut().insert(name.clone()) {
                return Ok(name);
            }
        }
        Err(Error::VarNamesExhausted(MAX_VAR_NAME_ATTEMPTS))
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new(FilterOptions::default())
    }
}

impl fmt::Debug for FilterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterContext")
            .field("options", &self.options)
            .field("used_vars", &self.used_vars.borrow().len())
            .finish_non_exhaustive()
    }
}

fn validate_var_name(name: &str) -> FilterResult<()> {
    let mut chars = name.chars();
    let valid = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidVarName(name.to_owned()))
    }
}

/// The rendering scope of one builder: the path every root handle starts
/// from, plus the context of the enclosing `build` call.
#[derive(Clone, Debug)]
pub struct Scope {
    prefix: PropertyPath,
    context: Rc<FilterContext>,
}

impl Scope {
    /// Unprefixed top-level scope.
    #[must_use]
    pub fn new(context: FilterContext) -> Self {
        Self {
            prefix: PropertyPath::root(),
            context: Rc::new(context),
        }
    }

    /// A scope rooted at `prefix` sharing this scope's context.
    #[must_use]
    pub fn rebased(&self, prefix: PropertyPath) -> Self {
        Self {
            prefix,
            context: Rc::clone(&self.context),
        }
    }

    /// The root path of this scope (empty for the top level).
    #[must_use]
    pub fn root_path(&self) -> PropertyPath {
        self.prefix.clone()
    }

    #[must_use]
    pub fn context(&self) -> &FilterContext {
        &self.context
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new(FilterContext::default())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_names() {
        let ctx = FilterContext::new(FilterOptions::new().sequential());
        assert_eq!(ctx.loop_var(None).unwrap(), "i0");
        assert_eq!(ctx.loop_var(None).unwrap(), "i1");
    }

    #[test]
    fn test_random_names_have_prefix_and_four_hex_digits() {
        let ctx = FilterContext::default();
        let name = ctx.loop_var(None).unwrap();
        assert_eq!(name.len(), 5);
        assert!(name.starts_with('i'));
        assert!(name[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_generated_names_are_unique_within_context() {
        let ctx = FilterContext::default();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            assert!(seen.insert(ctx.loop_var(None).unwrap()));
        }
    }

    #[test]
    fn test_generated_names_skip_requested_names() {
        let ctx = FilterContext::new(FilterOptions::new().sequential());
        assert_eq!(ctx.loop_var(Some("i0")).unwrap(), "i0");
        assert_eq!(ctx.loop_var(None).unwrap(), "i1");
    }

    #[test]
    fn test_invalid_requested_name() {
        let ctx = FilterContext::default();
        for bad in ["", "1x", "a/b", "a b", "x-y"] {
            assert_eq!(
                ctx.loop_var(Some(bad)),
                Err(Error::InvalidVarName(bad.to_owned()))
            );
        }
    }

    struct Constant;

    impl VarNameGenerator for Constant {
        fn next_name(&self, prefix: &str) -> FilterResult<String> {
            Ok(format!("{prefix}x"))
        }
    }

    #[test]
    fn test_exhausted_generator() {
        let ctx = FilterContext::with_generator(FilterOptions::default(), Constant);
        assert_eq!(ctx.loop_var(None).unwrap(), "ix");
        assert_eq!(
            ctx.loop_var(None),
            Err(Error::VarNamesExhausted(MAX_VAR_NAME_ATTEMPTS))
        );
    }

    #[test]
    fn test_invalid_prefix_is_rejected() {
        let ctx = FilterContext::new(FilterOptions::new().with_var_prefix("0"));
        assert!(matches!(ctx.loop_var(None), Err(Error::InvalidVarName(_))));
    }

    #[test]
    fn test_rebased_scope_shares_context() {
        let scope = Scope::new(FilterContext::new(FilterOptions::new().sequential()));
        let nested = scope.rebased(PropertyPath::new("parentOrder"));

        assert!(scope.root_path().is_root());
        assert_eq!(nested.root_path().render().unwrap(), "parentOrder");

        assert_eq!(scope.context().loop_var(None).unwrap(), "i0");
        assert_eq!(nested.context().loop_var(None).unwrap(), "i1");
    }
}
