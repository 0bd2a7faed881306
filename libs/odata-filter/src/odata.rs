//! `OData` operator and function catalog.
//!
//! Every entry is a named call into the primitives of
//! [`BasicFilterBuilder`]; entries can be added without touching the core.
//! See <https://docs.oasis-open.org/odata/odata/v4.01/odata-v4.01-part2-url-conventions.html>.

use crate::arg::{Arg, IntoArg};
use crate::basic::BasicFilterBuilder;
use crate::error::Error;
use crate::expr::FilterExpr;

/// Operators and canonical functions available on every builder.
pub trait ODataOperators: BasicFilterBuilder {
    // logical

    /// `(a and b and ...)`, `true` when empty.
    fn and<'a, I>(&self, args: I) -> FilterExpr
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        self.logical_operator("and", args)
    }

    /// `(a or b or ...)`, `true` when empty.
    fn or<'a, I>(&self, args: I) -> FilterExpr
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        self.logical_operator("or", args)
    }

    /// `not(a)`
    fn not<'a>(&self, arg: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("not", [arg])
    }

    // comparison

    fn eq<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("eq", l, r)
    }

    fn ne<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("ne", l, r)
    }

    fn lt<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("lt", l, r)
    }

    fn gt<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("gt", l, r)
    }

    fn le<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("le", l, r)
    }

    fn ge<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("ge", l, r)
    }

    /// `a eq null`
    fn is_null<'a>(&self, arg: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("eq", arg, Arg::null())
    }

    /// `a ne null`
    fn is_not_null<'a>(&self, arg: impl IntoArg<'a, Self>) -> FilterExpr {
        self.binary_operator("ne", arg, Arg::null())
    }

    /// `a in (v1, v2, ...)`, an error when `values` is empty.
    fn in_list<'a, I>(&self, arg: impl IntoArg<'a, Self>, values: I) -> FilterExpr
    where
        I: IntoIterator,
        I::Item: IntoArg<'a, Self>,
    {
        let list = FilterExpr::from_result(self.arg_strings(values).and_then(|values| {
            if values.is_empty() {
                return Err(Error::EmptyInList);
            }
            Ok(format!("({})", values.join(", ")))
        }));
        self.binary_operator("in", arg, list)
    }

    // string functions

    fn endswith<'a>(&self, s: impl IntoArg<'a, Self>, suffix: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("endswith", [s.into_arg(), suffix.into_arg()])
    }

    fn startswith<'a>(&self, s: impl IntoArg<'a, Self>, prefix: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("startswith", [s.into_arg(), prefix.into_arg()])
    }

    fn substringof<'a>(&self, s: impl IntoArg<'a, Self>, search: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("substringof", [s.into_arg(), search.into_arg()])
    }

    fn length<'a>(&self, s: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("length", [s])
    }

    fn indexof<'a>(&self, s: impl IntoArg<'a, Self>, search: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("indexof", [s.into_arg(), search.into_arg()])
    }

    fn replace<'a>(
        &self,
        s: impl IntoArg<'a, Self>,
        remove: impl IntoArg<'a, Self>,
        add: impl IntoArg<'a, Self>,
    ) -> FilterExpr {
        self.function("replace", [s.into_arg(), remove.into_arg(), add.into_arg()])
    }

    fn substring<'a>(&self, s: impl IntoArg<'a, Self>, index: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("substring", [s.into_arg(), index.into_arg()])
    }

    fn tolower<'a>(&self, s: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("tolower", [s])
    }

    fn toupper<'a>(&self, s: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("toupper", [s])
    }

    fn trim<'a>(&self, s: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("trim", [s])
    }

    fn concat<'a>(&self, l: impl IntoArg<'a, Self>, r: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("concat", [l.into_arg(), r.into_arg()])
    }

    fn contains<'a>(&self, s: impl IntoArg<'a, Self>, search: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("contains", [s.into_arg(), search.into_arg()])
    }

    // date functions

    fn day<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("day", [d])
    }

    fn month<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("month", [d])
    }

    fn year<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("year", [d])
    }

    fn hour<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("hour", [d])
    }

    fn minute<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("minute", [d])
    }

    fn second<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("second", [d])
    }

    fn date<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("date", [d])
    }

    fn time<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("time", [d])
    }

    fn totaloffsetminutes<'a>(&self, d: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("totaloffsetminutes", [d])
    }

    fn now(&self) -> FilterExpr {
        self.function("now", std::iter::empty::<FilterExpr>())
    }

    fn mindatetime(&self) -> FilterExpr {
        self.function("mindatetime", std::iter::empty::<FilterExpr>())
    }

    fn maxdatetime(&self) -> FilterExpr {
        self.function("maxdatetime", std::iter::empty::<FilterExpr>())
    }

    // number functions

    fn round<'a>(&self, n: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("round", [n])
    }

    fn floor<'a>(&self, n: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("floor", [n])
    }

    fn ceiling<'a>(&self, n: impl IntoArg<'a, Self>) -> FilterExpr {
        self.function("ceiling", [n])
    }
}

impl<B: BasicFilterBuilder> ODataOperators for B {}
