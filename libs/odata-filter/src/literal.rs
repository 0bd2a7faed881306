use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::BigInt;
use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use uuid::Uuid;

use crate::error::{Error, FilterResult};

/// A primitive literal that can appear as an operand.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Float32(f32),
    Decimal(BigDecimal),
    String(String),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Time(NaiveTime),
    Uuid(Uuid),
}

impl Literal {
    /// Render the literal as an `OData` token.
    ///
    /// Strings are single-quoted with embedded quotes doubled; date-times use
    /// the ISO-8601 instant form with millisecond precision and times of day
    /// render as `HH:MM:SS` with fractional seconds only when present.
    /// Everything else uses its JSON-style form.
    ///
    /// # Errors
    /// Returns `Error::UnsupportedArgument` for non-finite floats.
    pub fn render(&self) -> FilterResult<String> {
        Ok(match self {
            Literal::Null => "null".to_owned(),
            Literal::Bool(b) => b.to_string(),
            Literal::Int(n) => n.to_string(),
            Literal::UInt(n) => n.to_string(),
            Literal::Float(f) => {
                if !f.is_finite() {
                    return Err(Error::UnsupportedArgument(format!(
                        "non-finite number {f}"
                    )));
                }
                f.to_string()
            }
            Literal::Float32(f) => {
                if !f.is_finite() {
                    return Err(Error::UnsupportedArgument(format!(
                        "non-finite number {f}"
                    )));
                }
                f.to_string()
            }
            Literal::Decimal(d) => d.to_string(),
            Literal::String(s) => quote_string(s),
            Literal::DateTime(dt) => dt.to_rfc3339_opts(SecondsFormat::Millis, true),
            Literal::Date(d) => d.format("%Y-%m-%d").to_string(),
            Literal::Time(t) => t.format("%H:%M:%S%.f").to_string(),
            Literal::Uuid(u) => u.hyphenated().to_string(),
        })
    }
}

/// Quote a string literal, doubling embedded single quotes.
#[must_use]
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// Conversion into a [`Literal`].
pub trait IntoLiteral {
    fn into_literal(self) -> Literal;
}

/// Narrowest lossless literal for an integer wider than 64 bits (or of
/// platform width): `Int`, then `UInt`, then an integral `Decimal`.
fn wide_int<T>(v: T) -> Literal
where
    T: Copy + TryInto<i64> + TryInto<u64> + Into<BigInt>,
{
    if let Ok(n) = TryInto::<i64>::try_into(v) {
        Literal::Int(n)
    } else if let Ok(n) = TryInto::<u64>::try_into(v) {
        Literal::UInt(n)
    } else {
        Literal::Decimal(BigDecimal::from(Into::<BigInt>::into(v)))
    }
}

macro_rules! impl_into_literal {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl IntoLiteral for $ty {
                fn into_literal(self) -> Literal {
                    let $v = self;
                    $body
                }
            }
        )*
    };
}

impl_into_literal! {
    bool => |v| Literal::Bool(v),
    i8 => |v| Literal::Int(v.into()),
    i16 => |v| Literal::Int(v.into()),
    i32 => |v| Literal::Int(v.into()),
    i64 => |v| Literal::Int(v),
    u8 => |v| Literal::UInt(v.into()),
    u16 => |v| Literal::UInt(v.into()),
    u32 => |v| Literal::UInt(v.into()),
    u64 => |v| Literal::UInt(v),
    i128 => |v| wide_int(v),
    isize => |v| wide_int(v),
    u128 => |v| wide_int(v),
    usize => |v| wide_int(v),
    f32 => |v| Literal::Float32(v),
    f64 => |v| Literal::Float(v),
    BigDecimal => |v| Literal::Decimal(v),
    String => |v| Literal::String(v),
    &str => |v| Literal::String(v.to_owned()),
    &String => |v| Literal::String(v.clone()),
    DateTime<Utc> => |v| Literal::DateTime(v),
    NaiveDate => |v| Literal::Date(v),
    NaiveTime => |v| Literal::Time(v),
    Uuid => |v| Literal::Uuid(v),
}

impl IntoLiteral for Literal {
    fn into_literal(self) -> Literal {
        self
    }
}

impl<T: IntoLiteral> IntoLiteral for Option<T> {
    fn into_literal(self) -> Literal {
        self.map_or(Literal::Null, IntoLiteral::into_literal)
    }
}
