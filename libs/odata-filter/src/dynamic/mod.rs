//! Filter builder for entities described at runtime.
//!
//! Paths are plain [`PropertyPath`] values, so no compile-time entity shape is
//! needed; rendering follows exactly the same rules as the typed builder.

pub mod schema;

use std::fmt;

use crate::arg::{Arg, IntoArg};
use crate::basic::{BasicFilterBuilder, build_with_builder};
use crate::collection::CollectionFilterBuilder;
use crate::context::{FilterContext, Scope};
use crate::error::FilterResult;
use crate::expr::FilterExpr;
use crate::path::PropertyPath;

pub use schema::{ODataEntityType, ODataProperty, ODataType};

/// Renders predicates over [`PropertyPath`] handles.
///
/// # Example
///
/// ```rust,ignore
/// let filter = ODataDynamicFilterBuilder::build(|b, p| {
///     b.eq(p.child("customer").child("name"), "John")
/// })?;
/// assert_eq!(filter, "customer/name eq 'John'");
/// ```
pub struct ODataDynamicFilterBuilder {
    scope: Scope,
}

impl ODataDynamicFilterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(FilterContext::default())
    }

    #[must_use]
    pub fn with_context(context: FilterContext) -> Self {
        Self::from_scope(Scope::new(context))
    }

    /// Render `predicate` with a fresh root builder.
    ///
    /// # Errors
    /// Returns the first error raised while rendering the predicate.
    pub fn build<'a, F, R>(predicate: F) -> FilterResult<String>
    where
        F: FnOnce(&Self, PropertyPath) -> R,
        R: IntoArg<'a, Self>,
    {
        Self::new().render(predicate)
    }

    /// Like [`build`](Self::build); `None` renders the empty filter.
    ///
    /// # Errors
    /// Returns the first error raised while rendering the predicate.
    pub fn build_opt<'a, F, R>(predicate: Option<F>) -> FilterResult<String>
    where
        F: FnOnce(&Self, PropertyPath) -> R,
        R: IntoArg<'a, Self>,
    {
        build_with_builder(&Self::new(), predicate)
    }

    /// Render `predicate` with this builder as the root.
    ///
    /// # Errors
    /// Returns the first error raised while rendering the predicate.
    pub fn render<'a, F, R>(self, predicate: F) -> FilterResult<String>
    where
        F: FnOnce(&Self, PropertyPath) -> R,
        R: IntoArg<'a, Self>,
    {
        build_with_builder(&self, Some(predicate))
    }

    /// Scope a collection for `any`/`all`/`$count`.
    pub fn collection<'v>(
        &self,
        prop: &PropertyPath,
        var_name: impl Into<Option<&'v str>>,
    ) -> CollectionFilterBuilder<ODataDynamicFilterBuilder> {
        self.collection_prop(prop, var_name.into())
    }

    /// Render `condition` with every path prefixed by `prop`.
    pub fn nested<'a, F, R>(&self, prop: &PropertyPath, condition: F) -> FilterExpr
    where
        F: FnOnce(&Self, PropertyPath) -> R + 'a,
        R: IntoArg<'a, Self>,
    {
        self.nested_condition::<Self>(prop, Arg::deferred(condition))
    }
}

impl BasicFilterBuilder for ODataDynamicFilterBuilder {
    type Root = PropertyPath;

    fn from_scope(scope: Scope) -> Self {
        Self { scope }
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn root_at(path: PropertyPath) -> Self::Root {
        path
    }
}

impl Default for ODataDynamicFilterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ODataDynamicFilterBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ODataDynamicFilterBuilder")
            .field("scope", &self.scope)
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::FilterOptions;
    use crate::error::Error;
    use crate::odata::ODataOperators;

    type B = ODataDynamicFilterBuilder;

    #[test]
    fn test_root_prop_is_empty() {
        let b = B::new();
        assert!(b.prop().is_root());
    }

    #[test]
    fn test_child_paths() {
        let filter = B::build(|b, p| b.eq(p.child("customer").child("name"), "John")).unwrap();
        assert_eq!(filter, "customer/name eq 'John'");
    }

    #[test]
    fn test_parsed_paths() {
        let filter = B::build(|b, _| b.eq(PropertyPath::parse("customer/name"), "John")).unwrap();
        assert_eq!(filter, "customer/name eq 'John'");
    }

    #[test]
    fn test_empty_filter() {
        let filter = B::build_opt(None::<fn(&B, PropertyPath) -> FilterExpr>).unwrap();
        assert_eq!(filter, "");
    }

    #[test]
    fn test_binary_operator_is_not_parenthesized() {
        let filter = B::build(|b, p| b.binary_operator("eq", p.child("price"), 5)).unwrap();
        assert_eq!(filter, "price eq 5");
    }

    #[test]
    fn test_logical_operator_without_args_is_true() {
        let b = B::new();
        for op in ["and", "or", "xor"] {
            let expr = b.logical_operator(op, std::iter::empty::<FilterExpr>());
            assert_eq!(expr.as_str().unwrap(), "true");
        }
    }

    #[test]
    fn test_function_without_args() {
        let b = B::new();
        let expr = b.function("now", std::iter::empty::<FilterExpr>());
        assert_eq!(expr.as_str().unwrap(), "now()");
    }

    #[test]
    fn test_nested_prefixes_paths() {
        let filter = B::build(|b, p| {
            b.nested(&p.child("parentOrder"), |b, p| {
                b.contains(p.child("customer").child("name"), "John")
            })
        })
        .unwrap();
        assert_eq!(filter, "contains(parentOrder/customer/name, 'John')");
    }

    #[test]
    fn test_collection_any_with_var() {
        let filter = B::build(|b, p| {
            b.collection(&p.child("orderItems"), "i")
                .any(|i, item| i.lt(item.child("price"), 100))
        })
        .unwrap();
        assert_eq!(filter, "orderItems/any(i: i/price lt 100)");
    }

    #[test]
    fn test_collection_count_and_exists() {
        let filter = B::build(|b, p| {
            let items = b.collection(&p.child("orderItems"), None);
            b.and([b.eq(items.count(), 5), items.exists()])
        })
        .unwrap();
        assert_eq!(filter, "(orderItems/$count eq 5 and orderItems/any())");
    }

    #[test]
    fn test_generated_var_names_are_distinct_in_nested_lambdas() {
        let ctx = FilterContext::new(FilterOptions::new().sequential());
        let filter = B::with_context(ctx)
            .render(|b, p| {
                b.collection(&p.child("orders"), None).any(|b, order| {
                    b.collection(&order.child("items"), None)
                        .all(|b, item| b.gt(item.child("quantity"), 0))
                })
            })
            .unwrap();
        assert_eq!(filter, "orders/any(i0: i0/items/all(i1: i1/quantity gt 0))");
    }

    #[test]
    fn test_all_without_condition_is_rejected() {
        let res = B::build(|b, p| {
            b.collection(&p.child("orderItems"), None)
                .lambda(crate::collection::LambdaOperator::All, None::<FilterExpr>)
        });
        assert_eq!(res, Err(Error::MissingCondition("all")));
    }

    #[test]
    fn test_invalid_segment_fails_whole_filter() {
        let res = B::build(|b, p| b.and([b.eq(p.child("a/b"), 1), b.eq(p.child("c"), 2)]));
        assert_eq!(res, Err(Error::InvalidPathSegment("a/b".to_owned())));
    }
}
