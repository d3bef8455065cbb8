use super::property::{PropertyMap, PropertyValue};
use crate::error::ConversionError;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stencil {
    #[serde(default)]
    pub id: String,
}

impl Stencil {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

/// Reference to another shape by resource id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeRef {
    #[serde(rename = "resourceId")]
    pub resource_id: String,
}

impl ShapeRef {
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
        }
    }
}

/// One shape of the editor canvas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub stencil: Stencil,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub child_shapes: Vec<GraphNode>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outgoing: Vec<ShapeRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ShapeRef>,
    /// Editor keys this crate does not read (`bounds`, `dockers`, ...), kept verbatim.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl GraphNode {
    pub fn new(resource_id: impl Into<String>, stencil: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            stencil: Stencil::new(stencil),
            ..Default::default()
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn with_outgoing(mut self, resource_id: impl Into<String>) -> Self {
        self.outgoing.push(ShapeRef::new(resource_id));
        self
    }

    pub fn with_target(mut self, resource_id: impl Into<String>) -> Self {
        self.target = Some(ShapeRef::new(resource_id));
        self
    }

    pub fn with_child(mut self, child: GraphNode) -> Self {
        self.child_shapes.push(child);
        self
    }

    pub fn stencil_id(&self) -> &str {
        &self.stencil.id
    }

    /// Property lookup. Null values count as absent.
    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    /// Non-empty scalar text of a property.
    pub fn property_text(&self, name: &str) -> Option<String> {
        self.property(name).and_then(PropertyValue::non_empty_text)
    }

    pub fn set_property(&mut self, name: &str, value: impl Into<PropertyValue>) {
        self.properties.insert(name.to_string(), value.into());
    }
}

/// The root of an editor document: process-level properties plus the shape tree.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stencil: Option<Stencil>,
    #[serde(default)]
    pub properties: PropertyMap,
    #[serde(default)]
    pub child_shapes: Vec<GraphNode>,
    /// Canvas keys this crate does not read (`bounds`, `stencilset`, `ssextensions`, ...).
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl GraphDocument {
    pub fn from_json(json: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(json).map_err(|e| ConversionError::JsonParse(e.to_string()))
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self, ConversionError> {
        serde_json::from_value(value).map_err(|e| ConversionError::JsonParse(e.to_string()))
    }

    pub fn to_json_string(&self) -> Result<String, ConversionError> {
        serde_json::to_string(self).map_err(|e| ConversionError::JsonParse(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> Result<String, ConversionError> {
        serde_json::to_string_pretty(self).map_err(|e| ConversionError::JsonParse(e.to_string()))
    }

    pub fn property(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    pub fn property_text(&self, name: &str) -> Option<String> {
        self.property(name).and_then(PropertyValue::non_empty_text)
    }

    /// Visits every shape, parents before children.
    pub fn visit_nodes<'a>(&'a self, visitor: &mut impl FnMut(&'a GraphNode)) {
        fn walk<'a>(nodes: &'a [GraphNode], visitor: &mut impl FnMut(&'a GraphNode)) {
            for node in nodes {
                visitor(node);
                walk(&node.child_shapes, visitor);
            }
        }
        walk(&self.child_shapes, visitor);
    }
}
