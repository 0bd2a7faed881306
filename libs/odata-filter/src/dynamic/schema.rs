//! Runtime entity descriptions for the dynamic builder.
//!
//! These types describe an entity to callers (e.g. when the shape comes from
//! service metadata). The renderer never reads them.

use serde::{Deserialize, Serialize};

use crate::path::PropertyPath;

/// Primitive property types.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ODataType {
    #[default]
    Number,
    String,
    Date,
    Bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ODataProperty {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ODataType,
    #[serde(default)]
    pub is_nullable: bool,
}

impl ODataProperty {
    #[must_use]
    pub fn new(name: impl Into<String>, ty: ODataType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_nullable: false,
        }
    }

    #[must_use]
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ODataEntityType {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<ODataProperty>,
}

impl ODataEntityType {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            properties: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_property(mut self, property: ODataProperty) -> Self {
        self.properties.push(property);
        self
    }

    /// Look up a declared property by name.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<&ODataProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Path of a declared property relative to `base`.
    #[must_use]
    pub fn path(&self, base: &PropertyPath, name: &str) -> Option<PropertyPath> {
        self.property(name).map(|p| base.child(p.name.as_str()))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn product() -> ODataEntityType {
        ODataEntityType::new("Product")
            .with_property(ODataProperty::new("name", ODataType::String))
            .with_property(ODataProperty::new("price", ODataType::Number))
            .with_property(ODataProperty::new("discontinuedAt", ODataType::Date).nullable())
    }

    #[test]
    fn test_property_lookup() {
        let entity = product();
        let price = entity.property("price").unwrap();
        assert_eq!(price.ty, ODataType::Number);
        assert!(!price.is_nullable);
        assert!(entity.property("discontinuedAt").unwrap().is_nullable);
        assert!(entity.property("missing").is_none());
    }

    #[test]
    fn test_path_lookup() {
        let entity = product();
        let base = PropertyPath::new("product");
        assert_eq!(
            entity.path(&base, "name").unwrap().render().unwrap(),
            "product/name"
        );
        assert!(entity.path(&base, "missing").is_none());
    }

    #[test]
    fn test_deserialize_metadata() {
        let json = r#"{
            "name": "Customer",
            "properties": [
                {"name": "name", "type": "string"},
                {"name": "birthday", "type": "date", "isNullable": true}
            ]
        }"#;
        let entity: ODataEntityType = serde_json::from_str(json).unwrap();
        assert_eq!(entity.name, "Customer");
        assert_eq!(entity.properties.len(), 2);
        assert_eq!(entity.properties[1].ty, ODataType::Date);
        assert!(entity.properties[1].is_nullable);
    }

    #[test]
    fn test_serialize_round_trip_shape() {
        let value = serde_json::to_value(ODataProperty::new("active", ODataType::Bool)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"name": "active", "type": "bool", "isNullable": false})
        );
    }
}
