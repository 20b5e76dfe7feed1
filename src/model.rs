// Output document model
//
// Value types serialized into the architecture JSON document. Optional
// collections are omitted entirely when empty, and `class` keys are
// suppressed for built-in scalar types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// PHP built-in scalar type keywords
const SCALAR_TYPES: &[&str] = &[
    "int", "integer", "float", "double", "string", "bool", "boolean", "array", "object",
    "callable", "iterable", "resource", "null", "void", "mixed", "never", "true", "false",
];

/// Recognizes built-in scalar type names
pub struct ScalarType;

impl ScalarType {
    /// Check whether a type name is a built-in scalar keyword
    pub fn is(type_name: &str) -> bool {
        SCALAR_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(type_name))
    }
}

/// Root document: sorted contexts plus generation metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArchOutput {
    pub contexts: Vec<ContextOutput>,
    pub meta: MetaOutput,
}

impl ArchOutput {
    /// Total module count across all contexts
    pub fn module_count(&self) -> usize {
        self.contexts.iter().map(|c| c.modules.len()).sum()
    }
}

/// Generation metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetaOutput {
    pub generated_at: DateTime<Utc>,
    pub company: String,
    pub project: String,
}

/// A bounded context and its modules
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContextOutput {
    pub name: String,
    pub modules: Vec<ModuleOutput>,
}

/// One module's extracted architecture facts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOutput {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<MessageOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub queries: Vec<MessageOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub domain_events: Vec<DomainEventOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub event_subscribers: Vec<EventSubscriberOutput>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub external_calls: Vec<ExternalCallOutput>,
}

impl ModuleOutput {
    /// Check if nothing was extracted for this module
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
            && self.queries.is_empty()
            && self.domain_events.is_empty()
            && self.event_subscribers.is_empty()
            && self.external_calls.is_empty()
    }
}

/// A command or query message record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageOutput {
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub input: Vec<ParameterOutput>,
    pub output: OutputTypeOutput,
}

/// A constructor parameter record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterOutput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ParameterOutput {
    /// Create a parameter record; the class is suppressed for scalar types
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        class: impl Into<String>,
        description: Option<String>,
    ) -> Self {
        let type_name = type_name.into();
        let class = class.into();
        let class = if ScalarType::is(&type_name) {
            None
        } else {
            Some(class)
        };
        Self {
            name: name.into(),
            type_name,
            class,
            description,
        }
    }
}

/// The logical return type of a message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputTypeOutput {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

impl OutputTypeOutput {
    /// Create an output type record; the class is suppressed for scalars
    pub fn new(type_name: impl Into<String>, class: impl Into<String>) -> Self {
        let type_name = type_name.into();
        let class = class.into();
        let class = if ScalarType::is(&type_name) {
            None
        } else {
            Some(class)
        };
        Self { type_name, class }
    }

    /// Sentinel for commands without a return-type annotation
    pub fn void() -> Self {
        Self::new("void", "void")
    }

    /// Sentinel for queries without a return-type annotation
    pub fn mixed() -> Self {
        Self::new("mixed", "mixed")
    }
}

/// A domain event record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DomainEventOutput {
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub properties: Vec<EventPropertyOutput>,
}

/// A public property of a domain event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventPropertyOutput {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An event subscriber record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventSubscriberOutput {
    pub name: String,
    pub class: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub event: String,
    pub event_class: String,
}

/// Whether a cross-module call dispatches a command or a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallKind {
    Command,
    Query,
}

/// A cross-module call edge
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExternalCallOutput {
    #[serde(rename = "type")]
    pub kind: CallKind,
    pub source: String,
    pub source_class: String,
    pub name: String,
    pub target_class: String,
    pub target_context: String,
    pub target_module: String,
}
