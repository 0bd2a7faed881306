//! Typed path handles.
//!
//! An [`Entity`] names the accessor type used to navigate it. Accessors are
//! usually generated with `#[derive(ODataEntity)]`, which produces one method
//! per field returning the field type's own accessor rooted one segment
//! deeper:
//!
//! - scalar fields yield [`Prop<T>`], a leaf usable as an operand
//! - `Vec<I>` fields yield [`CollectionPath<I>`], the input of `collection`
//! - fields of other entity types yield that entity's accessor, the input of
//!   `nested`
//!
//! # Example
//!
//! ```rust,ignore
//! #[derive(ODataEntity)]
//! #[odata(rename_all = "camelCase")]
//! struct OrderItem {
//!     price: f64,
//!     parent_order: Order,
//! }
//!
//! let filter = ODataFilterBuilder::<OrderItem>::build(|b, p| {
//!     b.and([b.gt(p.price(), 10), b.nested(p.parent_order(), order_filter)])
//! })?;
//! ```

use std::fmt;
use std::marker::PhantomData;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

use crate::arg::{Arg, IntoArg};
use crate::basic::BasicFilterBuilder;
use crate::path::PropertyPath;

/// A type that can be navigated in filter predicates.
pub trait Entity {
    /// Accessor handed to predicates for this type.
    type Paths: EntityPaths;
}

/// Accessor over a [`PropertyPath`].
pub trait EntityPaths: Sized {
    /// Entity whose builder renders predicates written against this accessor.
    type Entity: Entity<Paths = Self>;

    fn from_path(path: PropertyPath) -> Self;

    fn path(&self) -> &PropertyPath;
}

/// Leaf handle of a field holding a `T`.
pub struct Prop<T> {
    path: PropertyPath,
    _value: PhantomData<fn() -> T>,
}

impl<T> Prop<T> {
    #[must_use]
    pub fn new(path: PropertyPath) -> Self {
        Self {
            path,
            _value: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }
}

impl<T> Clone for Prop<T> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<T> fmt::Debug for Prop<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Prop").field(&self.path).finish()
    }
}

impl<T> EntityPaths for Prop<T>
where
    T: Entity<Paths = Prop<T>>,
{
    type Entity = T;

    fn from_path(path: PropertyPath) -> Self {
        Self::new(path)
    }

    fn path(&self) -> &PropertyPath {
        &self.path
    }
}

impl<'a, B: BasicFilterBuilder, T> IntoArg<'a, B> for Prop<T> {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Path(self.path)
    }
}

impl<'a, B: BasicFilterBuilder, T> IntoArg<'a, B> for &Prop<T> {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Path(self.path.clone())
    }
}

/// Handle of a collection-valued field whose elements are `I`.
pub struct CollectionPath<I> {
    path: PropertyPath,
    _item: PhantomData<fn() -> I>,
}

impl<I> CollectionPath<I> {
    #[must_use]
    pub fn new(path: PropertyPath) -> Self {
        Self {
            path,
            _item: PhantomData,
        }
    }

    #[must_use]
    pub fn path(&self) -> &PropertyPath {
        &self.path
    }
}

impl<I> Clone for CollectionPath<I> {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl<I> fmt::Debug for CollectionPath<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollectionPath").field(&self.path).finish()
    }
}

impl<I: Entity> EntityPaths for CollectionPath<I> {
    type Entity = Vec<I>;

    fn from_path(path: PropertyPath) -> Self {
        Self::new(path)
    }

    fn path(&self) -> &PropertyPath {
        &self.path
    }
}

impl<'a, B: BasicFilterBuilder, I> IntoArg<'a, B> for CollectionPath<I> {
    fn into_arg(self) -> Arg<'a, B> {
        Arg::Path(self.path)
    }
}

impl<I: Entity> Entity for Vec<I> {
    type Paths = CollectionPath<I>;
}

impl<T: Entity> Entity for Option<T> {
    type Paths = T::Paths;
}

impl<T: Entity> Entity for Box<T> {
    type Paths = T::Paths;
}

macro_rules! scalar_entities {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Entity for $ty {
                type Paths = Prop<$ty>;
            }
        )*
    };
}

scalar_entities!(
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
    String,
    BigDecimal,
    Uuid,
    DateTime<Utc>,
    NaiveDate,
    NaiveTime,
);
