use std::fmt;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::basic::BasicFilterBuilder;
use crate::expr::FilterExpr;
use crate::literal::{IntoLiteral, Literal};
use crate::path::PropertyPath;

/// A function evaluated against the builder that renders it.
pub type Deferred<'a, B> =
    Box<dyn FnOnce(&B, <B as BasicFilterBuilder>::Root) -> Arg<'a, B> + 'a>;

/// Every operand accepted by builder operations.
///
/// The deferred case receives the rendering builder and its root handle, so a
/// predicate written for one scope renders correctly in any scope it is
/// handed to (see `nested` and collection lambdas).
pub enum Arg<'a, B: BasicFilterBuilder> {
    Literal(Literal),
    Path(PropertyPath),
    Expr(FilterExpr),
    Deferred(Deferred<'a, B>),
}

impl<'a, B: BasicFilterBuilder> Arg<'a, B> {
    /// Wrap a predicate `(builder, root) -> argument`.
    #[must_use]
    pub fn deferred<F, R>(f: F) -> Self
    where
        F: FnOnce(&B, B::Root) -> R + 'a,
        R: IntoArg<'a, B>,
    {
        Arg::Deferred(Box::new(move |builder, root| f(builder, root).into_arg()))
    }

    #[must_use]
    pub fn literal(value: impl IntoLiteral) -> Self {
        Arg::Literal(value.into_literal())
    }

    #[must_use]
    pub fn null() -> Self {
        Arg::Literal(Literal::Null)
    }
}

impl<B: BasicFilterBuilder> fmt::Debug for Arg<'_, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Literal(l) => f.debug_tuple("Literal").field(l).finish(),
            Arg::Path(p) => f.debug_tuple("Path").field(p).finish(),
            Arg::Expr(e) => f.debug_tuple("Expr").field(e).finish(),
            Arg::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}

/// Conversion into a builder argument.
pub trait IntoArg<'a, B: BasicFilterBuilder> {
    fn into_arg(self) -> Arg<'a, B>;
}

impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for Arg<'a, B> {
    fn into_arg(self) -> Arg<'a, B> {
        self
    }
}

impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for FilterExpr {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Expr(self)
    }
}

impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for &FilterExpr {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Expr(self.clone())
    }
}

impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for PropertyPath {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Path(self)
    }
}

impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for &PropertyPath {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Path(self.clone())
    }
}

impl<'a, B, F, R> IntoArg<'a, B> for F
where
    B: BasicFilterBuilder,
    F: FnOnce(&B, B::Root) -> R + 'a,
    R: IntoArg<'a, B>,
{
    fn into_arg(self) -> Arg<'a, B> {
        Arg::deferred(self)
    }
}

macro_rules! impl_literal_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl<'a, B: BasicFilterBuilder> IntoArg<'a, B> for $ty {
                fn into_arg(self) -> Arg<'a, B> {
                    Arg::Literal(self.into_literal())
                }
            }
        )*
    };
}

impl_literal_arg!(
    Literal,
    bool,
    i8,
    i16,
    i32,
    i64,
    u8,
    u16,
    u32,
    u64,
    i128,
    isize,
    u128,
    usize,
    f32,
    f64,
    BigDecimal,
    String,
    &str,
    &String,
    DateTime<Utc>,
    NaiveDate,
    NaiveTime,
    Uuid,
);

impl<'a, B: BasicFilterBuilder, T: IntoLiteral> IntoArg<'a, B> for Option<T> {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Literal(self.into_literal())
    }
}
