use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use proc_macro2::TokenStream;
use proc_macro_error2::{abort, emit_error};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, LitStr, spanned::Spanned};

/// Casing applied to field names without an explicit `name`.
#[derive(Clone, Copy)]
enum RenameRule {
    None,
    CamelCase,
    PascalCase,
    SnakeCase,
}

impl RenameRule {
    fn parse(value: &LitStr) -> Self {
        match value.value().as_str() {
            "camelCase" => RenameRule::CamelCase,
            "PascalCase" => RenameRule::PascalCase,
            "snake_case" => RenameRule::SnakeCase,
            other => abort!(
                value,
                "unsupported rename_all value '{}', expected camelCase, PascalCase or snake_case",
                other
            ),
        }
    }

    fn apply(self, name: &str) -> String {
        match self {
            RenameRule::None => name.to_owned(),
            RenameRule::CamelCase => name.to_lower_camel_case(),
            RenameRule::PascalCase => name.to_upper_camel_case(),
            RenameRule::SnakeCase => name.to_snake_case(),
        }
    }
}

/// Parse `#[odata(rename_all = "...")]` on the struct.
fn parse_container_attrs(input: &DeriveInput) -> RenameRule {
    let mut rule = RenameRule::None;

    for attr in &input.attrs {
        if !attr.path().is_ident("odata") {
            continue;
        }

        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                let value: LitStr = meta.value()?.parse()?;
                rule = RenameRule::parse(&value);
                Ok(())
            } else {
                Err(meta.error("unknown #[odata] struct attribute, expected rename_all"))
            }
        });

        if let Err(e) = result {
            emit_error!(attr.span(), "Failed to parse #[odata] attribute: {}", e);
        }
    }

    rule
}

struct FieldAttrs {
    name: Option<String>,
    skip: bool,
}

/// Parse `#[odata(name = "...")]` and `#[odata(skip)]` on a field.
fn parse_field_attrs(field: &syn::Field) -> FieldAttrs {
    let mut attrs = FieldAttrs {
        name: None,
        skip: false,
    };

    for attr in &field.attrs {
        if !attr.path().is_ident("odata") {
            continue;
        }

        let result = attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value: LitStr = meta.value()?.parse()?;
                if value.value().is_empty() || value.value().contains('/') {
                    emit_error!(value, "OData property name must be non-empty and contain no '/'");
                }
                attrs.name = Some(value.value());
                Ok(())
            } else if meta.path.is_ident("skip") {
                attrs.skip = true;
                Ok(())
            } else {
                Err(meta.error("unknown #[odata] field attribute, expected name or skip"))
            }
        });

        if let Err(e) = result {
            emit_error!(attr.span(), "Failed to parse #[odata] attribute: {}", e);
        }
    }

    attrs
}

pub fn expand_derive_odata_entity(input: &DeriveInput) -> TokenStream {
    let struct_name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        abort!(input.generics, "ODataEntity does not support generic structs");
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => abort!(input, "ODataEntity only supports structs with named fields"),
        },
        _ => abort!(input, "ODataEntity can only be derived for structs"),
    };

    let rename_rule = parse_container_attrs(input);
    let paths_name = format_ident!("{}Paths", struct_name);

    let accessors = fields.iter().filter_map(|field| {
        let Some(field_ident) = field.ident.as_ref() else {
            abort!(field, "ODataEntity requires named fields");
        };
        let attrs = parse_field_attrs(field);
        if attrs.skip {
            return None;
        }

        // raw identifiers (`r#type`) map to their plain name
        let rust_name = field_ident.to_string();
        let rust_name = rust_name.strip_prefix("r#").unwrap_or(&rust_name);
        let odata_name = attrs
            .name
            .unwrap_or_else(|| rename_rule.apply(rust_name));
        let field_type = &field.ty;
        let doc = format!("Path of `{odata_name}`.");

        Some(quote! {
            #[doc = #doc]
            #[must_use]
            pub fn #field_ident(&self) -> <#field_type as ::odata_filter::entity::Entity>::Paths {
                <<#field_type as ::odata_filter::entity::Entity>::Paths as ::odata_filter::entity::EntityPaths>::from_path(
                    self.path.child(#odata_name),
                )
            }
        })
    });
    let accessors: Vec<TokenStream> = accessors.collect();

    let paths_doc = format!("Typed paths of [`{struct_name}`].");

    quote! {
        #[doc = #paths_doc]
        #[derive(Clone, Debug)]
        #vis struct #paths_name {
            path: ::odata_filter::path::PropertyPath,
        }

        impl #paths_name {
            #(#accessors)*
        }

        impl ::odata_filter::entity::EntityPaths for #paths_name {
            type Entity = #struct_name;

            fn from_path(path: ::odata_filter::path::PropertyPath) -> Self {
                Self { path }
            }

            fn path(&self) -> &::odata_filter::path::PropertyPath {
                &self.path
            }
        }

        impl ::odata_filter::entity::Entity for #struct_name {
            type Paths = #paths_name;
        }

        impl<'a, B: ::odata_filter::basic::BasicFilterBuilder> ::odata_filter::arg::IntoArg<'a, B> for #paths_name {
            fn into_arg(self) -> ::odata_filter::arg::Arg<'a, B> {
                ::odata_filter::arg::Arg::Path(self.path)
            }
        }
    }
}
