//! Rendering core shared by the typed and dynamic builders.
//!
//! # Design
//!
//! - **`BasicFilterBuilder`**: argument normalization and the operator,
//!   function and logical primitives, implemented once as default methods
//! - **Factory**: `from_scope` builds a sibling builder for a nested entity or
//!   a lambda variable; the concrete builder chooses the sibling type
//! - **`build_with_builder`**: the entrypoint behind every `build` method

use crate::arg::{Arg, IntoArg};
use crate::collection::CollectionFilterBuilder;
use crate::context::Scope;
use crate::error::FilterResult;
use crate::expr::FilterExpr;
use crate::path::PropertyPath;

/// A builder rendering filter fragments relative to one scope.
///
/// Implementors supply the scope, a factory and the root handle type; every
/// rendering operation is provided.
pub trait BasicFilterBuilder: Sized {
    /// Handle given to predicates as the root of this builder's scope.
    type Root;

    /// Construct a builder for `scope`.
    fn from_scope(scope: Scope) -> Self;

    fn scope(&self) -> &Scope;

    /// Wrap a path into this builder's root handle type.
    fn root_at(path: PropertyPath) -> Self::Root;

    /// Root handle of this scope: empty at the top level, the nested entity
    /// path inside `nested`, the loop variable inside a lambda.
    fn prop(&self) -> Self::Root {
        Self::root_at(self.scope().root_path())
    }

    /// Normalize one argument into a single `OData` token.
    ///
    /// Deferred arguments are invoked with this builder and its root handle
    /// and the result is normalized in turn. Paths render verbatim (the root
    /// path is rejected), rendered
    /// fragments are inserted unchanged, literals use their `OData` form.
    ///
    /// # Errors
    /// Returns the first error found in the argument: an invalid path
    /// segment, an unsupported literal, or an error carried by a fragment.
    fn arg_string<'a>(&self, arg: impl IntoArg<'a, Self>) -> FilterResult<String> {
        match arg.into_arg() {
            Arg::Deferred(f) => {
                let resolved = f(self, self.prop());
                self.arg_string(resolved)
            }
            Arg::Path(path) => path.render_operand(),
            Arg::Expr(expr) => expr.into_string(),
            Arg::Literal(literal) => literal.render(),
        }
    }

    /// `left op right`
    fn binary_operator<'a>(
        &self,
        op: &str,
        left: impl IntoArg<'a, Self>,
        right: impl IntoArg<'a, Self>,
    ) -> FilterExpr {
        let rendered = self.arg_string(left).and_then(|left| {
            let right = self.arg_string(right)?;
            Ok(format!("{left} {op} {right}"))
        });
        FilterExpr::from_result(rendered)
    }

    /// `name(arg1, arg2, ...)`
    fn function<'a, I>(&self, name: &str, args: I) -> FilterExpr
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        let rendered = self
            .arg_strings(args)
            .map(|args| format!("{name}({})", args.join(", ")));
        FilterExpr::from_result(rendered)
    }

    /// `(a op b op c)`, or `true` without arguments.
    fn logical_operator<'a, I>(&self, op: &str, args: I) -> FilterExpr
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        let rendered = self.arg_strings(args).map(|args| {
            if args.is_empty() {
                "true".to_owned()
            } else {
                format!("({})", args.join(&format!(" {op} ")))
            }
        });
        FilterExpr::from_result(rendered)
    }

    /// Normalize a list of arguments, stopping at the first error.
    ///
    /// # Errors
    /// Returns the first error produced by [`BasicFilterBuilder::arg_string`].
    fn arg_strings<'a, I>(&self, args: I) -> FilterResult<Vec<String>>
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        args.into_iter().map(|a| self.arg_string(a)).collect()
    }

    /// Scope a collection-valued path for `any`/`all`/`count`.
    ///
    /// Lambda conditions are rendered by a fresh `N` rooted at the loop
    /// variable.
    fn collection_prop<N: BasicFilterBuilder>(
        &self,
        prop: &PropertyPath,
        var_name: Option<&str>,
    ) -> CollectionFilterBuilder<N> {
        CollectionFilterBuilder::new(
            prop.clone(),
            var_name.map(str::to_owned),
            self.scope().clone(),
        )
    }

    /// Render `condition` with a fresh `N` rooted at `prop`, so that every
    /// path in the condition is prefixed with `prop`.
    fn nested_condition<'a, N: BasicFilterBuilder>(
        &self,
        prop: &PropertyPath,
        condition: impl IntoArg<'a, N>,
    ) -> FilterExpr {
        tracing::trace!(prefix = %prop, "Opening nested filter scope");
        let rendered = prop.render().and_then(|_| {
            let nested = N::from_scope(self.scope().rebased(prop.clone()));
            nested.arg_string(condition)
        });
        FilterExpr::from_result(rendered)
    }
}

/// Run `predicate` against `builder` and render its result.
///
/// Without a predicate the filter is empty. The top-level result is not
/// parenthesized; grouping belongs to the logical operators.
///
/// # Errors
/// Returns any error raised while rendering the predicate, or
/// `Error::FilterTooLong` if the result exceeds the configured maximum.
pub fn build_with_builder<'a, B, F, R>(builder: &B, predicate: Option<F>) -> FilterResult<String>
where
    B: BasicFilterBuilder,
    F: FnOnce(&B, B::Root) -> R,
    R: IntoArg<'a, B>,
{
    let Some(predicate) = predicate else {
        return Ok(String::new());
    };

    let result = predicate(builder, builder.prop());
    let rendered = builder.arg_string(result).and_then(|filter| {
        builder
            .scope()
            .context()
            .options()
            .validate_length(&filter)?;
        Ok(filter)
    });

    match &rendered {
        Ok(filter) => tracing::debug!(len = filter.len(), "Rendered OData filter"),
        Err(e) => tracing::debug!(error = %e, "Failed to render OData filter"),
    }
    rendered
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use tracing_test::traced_test;

    use super::*;
    use crate::config::FilterOptions;
    use crate::context::FilterContext;
    use crate::dynamic::ODataDynamicFilterBuilder;
    use crate::error::Error;
    use crate::literal::Literal;
    use crate::odata::ODataOperators;

    type B = ODataDynamicFilterBuilder;

    #[test]
    fn test_arg_string_normalization() {
        let b = B::new();
        assert_eq!(b.arg_string(PropertyPath::new("name")).unwrap(), "name");
        assert_eq!(b.arg_string("O'Neil").unwrap(), "'O''Neil'");
        assert_eq!(b.arg_string(FilterExpr::new("x eq 1")).unwrap(), "x eq 1");
        assert_eq!(b.arg_string(Literal::Null).unwrap(), "null");
        assert_eq!(
            b.arg_string(|_: &B, root: PropertyPath| root.child("price"))
                .unwrap(),
            "price"
        );
    }

    #[test]
    fn test_deferred_arg_resolves_nested_deferred() {
        let b = B::new();
        let arg = |_: &B, _: PropertyPath| |b: &B, root: PropertyPath| b.eq(root.child("a"), 1);
        assert_eq!(b.arg_string(arg).unwrap(), "a eq 1");
    }

    #[test]
    fn test_fragment_errors_propagate() {
        let b = B::new();
        let failed = b.eq(PropertyPath::new("price"), f64::NAN);
        let combined = b.logical_operator("and", [failed, FilterExpr::new("true")]);
        assert!(matches!(
            combined.into_string(),
            Err(Error::UnsupportedArgument(_))
        ));
    }

    #[test]
    fn test_nested_condition_rejects_invalid_prefix() {
        let b = B::new();
        let expr = b.nested_condition::<B>(&PropertyPath::new(""), FilterExpr::new("true"));
        assert_eq!(
            expr.into_string(),
            Err(Error::InvalidPathSegment(String::new()))
        );
    }

    #[test]
    fn test_max_filter_length_is_enforced() {
        let ctx = FilterContext::new(FilterOptions::new().with_max_filter_length(8));
        let res = B::with_context(ctx).render(|b, p| b.binary_operator("eq", p.child("name"), "IPhone"));
        assert_eq!(res, Err(Error::FilterTooLong { len: 16, max: 8 }));
    }

    #[test]
    #[traced_test]
    fn test_build_logs_rendered_filter() {
        let filter = B::build(|b, p| b.binary_operator("eq", p.child("name"), "IPhone")).unwrap();
        assert_eq!(filter, "name eq 'IPhone'");
        assert!(logs_contain("Rendered OData filter"));
    }

    #[test]
    #[traced_test]
    fn test_build_logs_failures() {
        let res = B::build(|b, p| b.binary_operator("eq", p.child("price"), f64::INFINITY));
        assert!(res.is_err());
        assert!(logs_contain("Failed to render OData filter"));
    }
}
