use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Workflow as returned by the remote platform.
///
/// Only the fields the engine reads are typed; `connections`, `settings`,
/// `staticData` and `pinData` are opaque pass-through values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nodes: Vec<Node>,
    #[serde(default = "empty_object")]
    pub connections: Value,
    #[serde(default = "empty_object")]
    pub settings: Value,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub active: bool,
    #[serde(default, alias = "isArchived", deserialize_with = "lenient_bool")]
    pub archived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_data: Option<Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
}

impl Workflow {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            nodes: Vec::new(),
            connections: empty_object(),
            settings: empty_object(),
            active: false,
            archived: false,
            static_data: None,
            pin_data: None,
            tags: Vec::new(),
        }
    }

    /// Workflow id, or an empty string for workflows not yet created remotely
    pub fn id_str(&self) -> &str {
        self.id.as_deref().unwrap_or_default()
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t.name.eq_ignore_ascii_case(name))
    }

    /// Build a creation payload carrying this workflow's content under a new name.
    ///
    /// The payload never carries an id, so the remote platform assigns a fresh one.
    pub fn to_create_request(&self, name: impl Into<String>) -> CreateWorkflowRequest {
        CreateWorkflowRequest {
            name: name.into(),
            nodes: self.nodes.clone(),
            connections: object_or_empty(&self.connections),
            settings: object_or_empty(&self.settings),
            static_data: non_empty(&self.static_data),
            pin_data: non_empty(&self.pin_data),
        }
    }
}

/// One step within a workflow
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub node_type: String,
    #[serde(default = "empty_object")]
    pub parameters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Map<String, Value>>,
    /// typeVersion, position, webhookId, disabled, ...
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Node {
    pub fn new(node_type: impl Into<String>, parameters: Value) -> Self {
        Self {
            id: None,
            name: String::new(),
            node_type: node_type.into(),
            parameters,
            credentials: None,
            extra: Map::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
}

/// Body of `POST /workflows`
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkflowRequest {
    pub name: String,
    pub nodes: Vec<Node>,
    pub connections: Value,
    pub settings: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin_data: Option<Value>,
}

/// List payload, either `{ "data": [...], "nextCursor": ... }` or a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WorkflowList {
    Page {
        data: Vec<Workflow>,
        #[serde(default, rename = "nextCursor")]
        next_cursor: Option<String>,
    },
    Bare(Vec<Workflow>),
}

impl WorkflowList {
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Page { next_cursor, .. } => next_cursor.as_deref().filter(|c| !c.is_empty()),
            Self::Bare(_) => None,
        }
    }

    pub fn into_workflows(self) -> Vec<Workflow> {
        match self {
            Self::Page { data, .. } => data,
            Self::Bare(data) => data,
        }
    }
}

impl From<Vec<Workflow>> for WorkflowList {
    fn from(workflows: Vec<Workflow>) -> Self {
        Self::Bare(workflows)
    }
}

/// Tag list payload, same two shapes as [`WorkflowList`]
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    Page {
        data: Vec<Tag>,
        #[serde(default, rename = "nextCursor")]
        next_cursor: Option<String>,
    },
    Bare(Vec<Tag>),
}

impl TagList {
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Page { next_cursor, .. } => next_cursor.as_deref().filter(|c| !c.is_empty()),
            Self::Bare(_) => None,
        }
    }

    pub fn into_tags(self) -> Vec<Tag> {
        match self {
            Self::Page { data, .. } => data,
            Self::Bare(data) => data,
        }
    }
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

fn object_or_empty(value: &Value) -> Value {
    match value {
        Value::Null => empty_object(),
        other => other.clone(),
    }
}

fn non_empty(value: &Option<Value>) -> Option<Value> {
    match value {
        Some(Value::Object(map)) if map.is_empty() => None,
        Some(Value::Null) | None => None,
        Some(other) => Some(other.clone()),
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `true`, `false`, `"true"`, `"false"` and `null`
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Bool(b)) => b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    })
}
