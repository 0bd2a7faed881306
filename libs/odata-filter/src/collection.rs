use std::fmt;
use std::marker::PhantomData;

use crate::arg::{Arg, IntoArg};
use crate::basic::BasicFilterBuilder;
use crate::context::Scope;
use crate::error::Error;
use crate::expr::FilterExpr;
use crate::path::PropertyPath;

/// Lambda operators over collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LambdaOperator {
    Any,
    All,
}

impl LambdaOperator {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LambdaOperator::Any => "any",
            LambdaOperator::All => "all",
        }
    }
}

impl fmt::Display for LambdaOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `any`/`all`/`$count` over one collection-valued path.
///
/// Conditions are rendered by a new `N` whose root is the loop variable, so
/// inside a condition `root.price()` renders as `i/price`.
#[must_use]
pub struct CollectionFilterBuilder<N> {
    path: PropertyPath,
    var_name: Option<String>,
    scope: Scope,
    _item_builder: PhantomData<fn() -> N>,
}

impl<N: BasicFilterBuilder> CollectionFilterBuilder<N> {
    pub(crate) fn new(path: PropertyPath, var_name: Option<String>, scope: Scope) -> Self {
        Self {
            path,
            var_name,
            scope,
            _item_builder: PhantomData,
        }
    }

    /// `<collection>/$count`
    pub fn count(&self) -> FilterExpr {
        FilterExpr::from_result(self.path.render_operand().map(|path| format!("{path}/$count")))
    }

    /// `<collection>/any()`: the collection has at least one element.
    pub fn exists(&self) -> FilterExpr {
        self.render_lambda(LambdaOperator::Any, None)
    }

    /// `<collection>/any(<var>: <condition>)`
    pub fn any<'a, F, R>(&self, condition: F) -> FilterExpr
    where
        F: FnOnce(&N, N::Root) -> R + 'a,
        R: IntoArg<'a, N>,
    {
        self.render_lambda(LambdaOperator::Any, Some(Arg::deferred(condition)))
    }

    /// `<collection>/all(<var>: <condition>)`
    pub fn all<'a, F, R>(&self, condition: F) -> FilterExpr
    where
        F: FnOnce(&N, N::Root) -> R + 'a,
        R: IntoArg<'a, N>,
    {
        self.render_lambda(LambdaOperator::All, Some(Arg::deferred(condition)))
    }

    /// General form of [`any`](Self::any) and [`all`](Self::all) with an
    /// optional condition. `all` without a condition renders an error
    /// fragment carrying `Error::MissingCondition`.
    pub fn lambda<'a, C>(&self, op: LambdaOperator, condition: Option<C>) -> FilterExpr
    where
        C: IntoArg<'a, N>,
    {
        self.render_lambda(op, condition.map(IntoArg::into_arg))
    }

    fn render_lambda<'a>(&self, op: LambdaOperator, condition: Option<Arg<'a, N>>) -> FilterExpr {
        let rendered = self.path.render_operand().and_then(|path| {
            let Some(condition) = condition else {
                return match op {
                    LambdaOperator::Any => Ok(format!("{path}/{op}()")),
                    LambdaOperator::All => Err(Error::MissingCondition(op.as_str())),
                };
            };

            let var = self.scope.context().loop_var(self.var_name.as_deref())?;
            tracing::trace!(collection = %path, var = %var, "Opening lambda scope");

            let item_builder = N::from_scope(self.scope.rebased(PropertyPath::new(var.clone())));
            let body = item_builder.arg_string(condition)?;
            Ok(format!("{path}/{op}({var}: {body})"))
        });
        FilterExpr::from_result(rendered)
    }
}

impl<N> fmt::Debug for CollectionFilterBuilder<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionFilterBuilder")
            .field("path", &self.path)
            .field("var_name", &self.var_name)
            .finish_non_exhaustive()
    }
}
