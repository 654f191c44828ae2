//! Kind-specific node configuration.
//!
//! Node config arrives from two directions: palette defaults attached when a
//! node is created, and free-text JSON typed into the config editor. The
//! editor path is the fragile one, so parsing is explicit and recoverable:
//! a malformed edit produces [`ConfigError::Malformed`] and the caller keeps
//! the previous config instead of crashing or half-applying.
//!
//! [`NodeConfig`] is a union keyed by the owning node's kind. The call kinds
//! (model/tool/agent) have strongly typed shapes covering the fields tooling
//! actually reads; everything else, and any JSON that does not match its
//! kind's shape, lands in the [`Unstructured`](NodeConfig::Unstructured)
//! bucket so forward-compatible settings are never dropped.
//!
//! # Examples
//!
//! ```rust
//! use agentloom::graph::NodeConfig;
//! use agentloom::types::NodeKind;
//!
//! // Palette default for a model-call node.
//! let config = NodeConfig::default_for(NodeKind::ModelCall);
//! assert!(matches!(config, NodeConfig::Model(_)));
//!
//! // Editor text that fails to parse leaves the caller's config untouched.
//! let bad = NodeConfig::from_json_str(NodeKind::ModelCall, "{not json");
//! assert!(bad.is_err());
//! ```

use miette::Diagnostic;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::types::NodeKind;

/// Free-form extension map used by the unstructured bucket and the nested
/// schema/config fields.
pub type ConfigMap = FxHashMap<String, Value>;

/// Configuration payload of a node, keyed by its kind.
///
/// Serializes flat (just the variant's fields), matching the stored and
/// exported record shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeConfig {
    /// Settings for a model-call node.
    Model(ModelConfig),
    /// Settings for a tool-call node.
    Tool(ToolConfig),
    /// Settings for an agent-call node.
    Agent(AgentConfig),
    /// Anything else: control nodes, boundary nodes, and shapes that do not
    /// match the structured variants.
    Unstructured(ConfigMap),
}

impl Default for NodeConfig {
    fn default() -> Self {
        NodeConfig::Unstructured(ConfigMap::default())
    }
}

impl NodeConfig {
    /// The palette default for a node of `kind`.
    #[must_use]
    pub fn default_for(kind: NodeKind) -> Self {
        match kind {
            NodeKind::ModelCall => NodeConfig::Model(ModelConfig::default()),
            NodeKind::ToolCall => NodeConfig::Tool(ToolConfig::default()),
            NodeKind::AgentCall => NodeConfig::Agent(AgentConfig::default()),
            _ => NodeConfig::Unstructured(ConfigMap::default()),
        }
    }

    /// Default model config with a specific model name (generator hint).
    #[must_use]
    pub fn model_named(model_name: impl Into<String>) -> Self {
        NodeConfig::Model(ModelConfig {
            model_name: model_name.into(),
            ..ModelConfig::default()
        })
    }

    /// Interpret a JSON value as config for a node of `kind`.
    ///
    /// The kind's structured shape is tried first; any object that does not
    /// match falls back to [`Unstructured`](Self::Unstructured). Non-object
    /// values are rejected.
    pub fn from_value(kind: NodeKind, value: Value) -> Result<Self, ConfigError> {
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject {
                found: json_type_name(&value),
            });
        };

        let structured = match kind {
            NodeKind::ModelCall => {
                serde_json::from_value::<ModelConfig>(Value::Object(map.clone()))
                    .ok()
                    .map(NodeConfig::Model)
            }
            NodeKind::ToolCall => serde_json::from_value::<ToolConfig>(Value::Object(map.clone()))
                .ok()
                .map(NodeConfig::Tool),
            NodeKind::AgentCall => {
                serde_json::from_value::<AgentConfig>(Value::Object(map.clone()))
                    .ok()
                    .map(NodeConfig::Agent)
            }
            _ => None,
        };

        Ok(structured.unwrap_or_else(|| NodeConfig::Unstructured(map.into_iter().collect())))
    }

    /// Parse free-text editor JSON as config for a node of `kind`.
    ///
    /// On error the caller is expected to keep its previous config; nothing
    /// is partially applied.
    pub fn from_json_str(kind: NodeKind, text: &str) -> Result<Self, ConfigError> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| ConfigError::Malformed { source })?;
        Self::from_value(kind, value)
    }

    /// Returns `true` when this config carries no settings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, NodeConfig::Unstructured(map) if map.is_empty())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Settings for a model-call node. Field names follow the stored record
/// shape.
///
/// Unknown fields are rejected so that extended shapes fall through to
/// [`NodeConfig::Unstructured`] instead of being silently dropped.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    pub model_name: String,
    pub endpoint: String,
    pub streaming: bool,
    pub retry_count: u32,
    pub confidence_threshold: f64,
    pub temperature: f64,
    pub max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_name: "gpt-4o".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            streaming: true,
            retry_count: 3,
            confidence_threshold: 0.8,
            temperature: 0.7,
            max_tokens: 4096,
        }
    }
}

/// Settings for a tool-call node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    pub server_name: String,
    pub url: String,
    pub method: String,
    pub auth_key: String,
    #[serde(default)]
    pub body_schema: ConfigMap,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            server_name: String::new(),
            url: String::new(),
            method: "POST".to_string(),
            auth_key: String::new(),
            body_schema: ConfigMap::default(),
        }
    }
}

/// Settings for an agent-call node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    pub agent_role: String,
    pub model: String,
    pub memory_enabled: bool,
    pub turn_limits: u32,
    #[serde(default)]
    pub agent_config: ConfigMap,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            agent_role: "planner".to_string(),
            model: "gpt-4o".to_string(),
            memory_enabled: true,
            turn_limits: 10,
            agent_config: ConfigMap::default(),
        }
    }
}

/// Errors from applying editor-supplied config JSON.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// The editor text is not valid JSON. The previous config is retained.
    #[error("malformed config JSON: {source}")]
    #[diagnostic(
        code(agentloom::config::malformed),
        help("the previous configuration is kept; fix the JSON and reapply")
    )]
    Malformed {
        #[source]
        source: serde_json::Error,
    },

    /// The editor text parsed, but the top level is not an object.
    #[error("config JSON must be an object, got {found}")]
    #[diagnostic(
        code(agentloom::config::not_an_object),
        help("wrap the settings in a JSON object, e.g. {{\"model_name\": \"gpt-4o\"}}")
    )]
    NotAnObject { found: &'static str },
}
