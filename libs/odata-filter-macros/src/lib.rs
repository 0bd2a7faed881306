//! # odata-filter-macros
//!
//! Derive macro generating typed path accessors for `odata-filter`.
//!
//! The generated code references `odata_filter` types; use it through the
//! re-export `odata_filter::ODataEntity`.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use proc_macro::TokenStream;
use proc_macro_error2::proc_macro_error;
use syn::{DeriveInput, parse_macro_input};

mod odata_entity;

/// Derive macro making a struct navigable in typed filter predicates.
///
/// Generates `<Name>Paths`, an accessor with one method per field. Each method
/// returns the field type's own accessor rooted one segment deeper, so
/// scalars become operands, `Vec<T>` fields become collections and entity
/// fields can be passed to `nested`.
///
/// # Attributes
///
/// - `#[odata(rename_all = "camelCase")]` on the struct: wire-name casing of
///   every field (`camelCase`, `PascalCase`, `snake_case`)
/// - `#[odata(name = "...")]` on a field: explicit wire name
/// - `#[odata(skip)]` on a field: no accessor
///
/// # Example
///
/// ```ignore
/// use odata_filter::ODataEntity;
///
/// #[derive(ODataEntity)]
/// #[odata(rename_all = "camelCase")]
/// pub struct Order {
///     pub order_items: Vec<OrderItem>,
///     #[odata(name = "Customer")]
///     pub customer: Customer,
/// }
/// ```
#[proc_macro_derive(ODataEntity, attributes(odata))]
#[proc_macro_error]
pub fn derive_odata_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    odata_entity::expand_derive_odata_entity(&input).into()
}
