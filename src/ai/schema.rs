//! Structured output schemas.
//!
//! Serializes to the OpenAPI subset accepted by Gemini's `responseSchema`.

use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Integer,
    Array,
    Object,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Keeps generated JSON fields in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
}

impl Schema {
    fn scalar(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: None,
            required: Vec::new(),
            property_ordering: Vec::new(),
            items: None,
        }
    }

    pub fn string() -> Self {
        Self::scalar(SchemaType::String)
    }

    pub fn integer() -> Self {
        Self::scalar(SchemaType::Integer)
    }

    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::scalar(SchemaType::Array)
        }
    }

    /// Object whose listed properties are all required.
    pub fn object(fields: Vec<(&str, Schema)>) -> Self {
        let names: Vec<String> = fields.iter().map(|(name, _)| name.to_string()).collect();
        Self {
            properties: Some(
                fields
                    .into_iter()
                    .map(|(name, schema)| (name.to_string(), schema))
                    .collect(),
            ),
            required: names.clone(),
            property_ordering: names,
            ..Self::scalar(SchemaType::Object)
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_object_schema_serialization() {
        let schema = Schema::object(vec![
            ("name", Schema::string().with_description("Display name")),
            ("tags", Schema::array(Schema::string())),
            ("count", Schema::integer()),
        ]);

        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({
                "type": "OBJECT",
                "properties": {
                    "name": { "type": "STRING", "description": "Display name" },
                    "tags": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "count": { "type": "INTEGER" }
                },
                "required": ["name", "tags", "count"],
                "propertyOrdering": ["name", "tags", "count"]
            })
        );
    }
}
