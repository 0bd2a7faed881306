//! Filter builder for statically typed entities.

use std::fmt;
use std::marker::PhantomData;

use crate::arg::{Arg, IntoArg};
use crate::basic::{BasicFilterBuilder, build_with_builder};
use crate::collection::CollectionFilterBuilder;
use crate::context::{FilterContext, Scope};
use crate::entity::{CollectionPath, Entity, EntityPaths};
use crate::error::FilterResult;
use crate::expr::FilterExpr;
use crate::path::PropertyPath;

/// Predicate over entity `E`.
pub type BuilderFn<E, R> = fn(&ODataFilterBuilder<E>, <E as Entity>::Paths) -> R;

/// Renders predicates over an [`Entity`] whose fields are reached through its
/// generated accessor.
///
/// # Example
///
/// ```rust,ignore
/// use odata_filter::prelude::*;
///
/// let filter = ODataFilterBuilder::<Product>::build(|b, p| b.eq(p.name(), "IPhone"))?;
/// assert_eq!(filter, "name eq 'IPhone'");
/// ```
pub struct ODataFilterBuilder<E: Entity> {
    scope: Scope,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> ODataFilterBuilder<E> {
    /// Root builder with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::with_context(FilterContext::default())
    }

    /// Root builder with a caller-configured context.
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
        F: FnOnce(&Self, E::Paths) -> R,
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
        F: FnOnce(&Self, E::Paths) -> R,
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
        F: FnOnce(&Self, E::Paths) -> R,
        R: IntoArg<'a, Self>,
    {
        build_with_builder(&self, Some(predicate))
    }

    /// Scope a collection for `any`/`all`/`$count`.
    ///
    /// `var_name` fixes the loop variable; `None` lets the context generate one.
    pub fn collection<'v, I: Entity>(
        &self,
        prop: CollectionPath<I>,
        var_name: impl Into<Option<&'v str>>,
    ) -> CollectionFilterBuilder<ODataFilterBuilder<I>> {
        self.collection_prop(prop.path(), var_name.into())
    }

    /// Render a predicate written for the entity behind `prop` with every
    /// path prefixed by `prop`.
    pub fn nested<'a, P, F, R>(&self, prop: P, condition: F) -> FilterExpr
    where
        P: EntityPaths,
        F: FnOnce(&ODataFilterBuilder<P::Entity>, P) -> R + 'a,
        R: IntoArg<'a, ODataFilterBuilder<P::Entity>>,
    {
        self.nested_condition::<ODataFilterBuilder<P::Entity>>(
            EntityPaths::path(&prop),
            Arg::deferred(condition),
        )
    }
}

impl<E: Entity> BasicFilterBuilder for ODataFilterBuilder<E> {
    type Root = E::Paths;

    fn from_scope(scope: Scope) -> Self {
        Self {
            scope,
            _entity: PhantomData,
        }
    }

    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn root_at(path: PropertyPath) -> Self::Root {
        E::Paths::from_path(path)
    }
}

impl<E: Entity> Default for ODataFilterBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> fmt::Debug for ODataFilterBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ODataFilterBuilder")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}
