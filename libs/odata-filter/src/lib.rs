#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! # odata-filter
//!
//! Builds `OData` v4 `$filter` strings from ordinary Rust closures.
//!
//! Two builders share one rendering core:
//! - [`ODataFilterBuilder`]: typed, predicates navigate entities through the
//!   accessor generated by `#[derive(ODataEntity)]`
//! - [`ODataDynamicFilterBuilder`]: untyped, predicates use [`PropertyPath`]
//!
//! Every builder renders fragments relative to its scope. Nested entities and
//! collection lambdas hand the same predicate shape to a new builder rooted at
//! the nested path or the loop variable, so predicates compose freely.
//!
//! # Example
//!
//! ```rust,ignore
//! use odata_filter::prelude::*;
//!
//! #[derive(ODataEntity)]
//! #[odata(rename_all = "camelCase")]
//! struct OrderItem {
//!     price: f64,
//! }
//!
//! #[derive(ODataEntity)]
//! #[odata(rename_all = "camelCase")]
//! struct Order {
//!     order_items: Vec<OrderItem>,
//! }
//!
//! let filter = ODataFilterBuilder::<Order>::build(|b, order| {
//!     b.collection(order.order_items(), "i").any(|i, item| i.lt(item.price(), 100))
//! })?;
//! assert_eq!(filter, "orderItems/any(i: i/price lt 100)");
//! ```

pub mod arg;
pub mod basic;
pub mod collection;
pub mod config;
pub mod context;
pub mod dynamic;
pub mod entity;
pub mod error;
pub mod expr;
pub mod literal;
pub mod odata;
pub mod path;
pub mod typed;

pub use arg::{Arg, IntoArg};
pub use basic::{BasicFilterBuilder, build_with_builder};
pub use collection::{CollectionFilterBuilder, LambdaOperator};
pub use config::{FilterOptions, VarNameStrategy};
pub use context::{FilterContext, RandomVarNames, Scope, SequentialVarNames, VarNameGenerator};
pub use dynamic::{ODataDynamicFilterBuilder, ODataEntityType, ODataProperty, ODataType};
pub use entity::{CollectionPath, Entity, EntityPaths, Prop};
pub use error::{Error, FilterResult};
pub use expr::FilterExpr;
pub use literal::{IntoLiteral, Literal};
pub use odata::ODataOperators;
pub use path::PropertyPath;
pub use typed::{BuilderFn, ODataFilterBuilder};

pub use odata_filter_macros::ODataEntity;

/// Everything needed to write predicates.
pub mod prelude {
    pub use crate::ODataEntity;
    pub use crate::arg::IntoArg;
    pub use crate::basic::BasicFilterBuilder;
    pub use crate::dynamic::ODataDynamicFilterBuilder;
    pub use crate::entity::{CollectionPath, Entity, EntityPaths, Prop};
    pub use crate::expr::FilterExpr;
    pub use crate::odata::ODataOperators;
    pub use crate::path::PropertyPath;
    pub use crate::typed::ODataFilterBuilder;
}
