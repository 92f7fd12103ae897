//! Wire types exchanged with the collaborator services.
//!
//! Field names follow the services' JSON contracts exactly.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Voltage placeholder in a template plan, replaced during enrichment.
pub const UNRESOLVED: &str = "UNRESOLVED";

// ---------------------------------------------------------------------------
// Enrichment (product data service)
// ---------------------------------------------------------------------------

/// A plan whose component values still need resolving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePlan {
    pub product: String,
    pub components: Vec<ComponentTemplate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentTemplate {
    pub name: String,
    pub voltage: String,
}

impl ComponentTemplate {
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            voltage: UNRESOLVED.to_owned(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.voltage != UNRESOLVED
    }
}

/// The plan returned by the product data service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedPlan {
    pub product: String,
    pub components: Vec<EnrichedComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedComponent {
    pub name: String,
    pub voltage: String,
}

// ---------------------------------------------------------------------------
// Rendering (document generation service)
// ---------------------------------------------------------------------------

/// The request sent to the document generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_props: Option<DocProps>,
    pub body: Vec<ComponentInstance>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocProps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// One component of the rendered document: a type name plus free-form props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentInstance {
    pub component: String,
    pub props: Map<String, Value>,
}

impl ComponentInstance {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            props: Map::new(),
        }
    }

    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }
}

/// What the document generator reports after rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderResponse {
    pub status: String,
    pub url: String,
    pub filename: String,
    pub generation_time_ms: u64,
    pub components_rendered: u32,
}
