use crate::error::Result;
use crate::serde_util::{read_json_file, string_or_json, value_to_string};
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

/// A Postman v2.1 collection, limited to the parts needed to send requests.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Collection {
    pub info: CollectionInfo,
    pub item: Vec<CollectionEntry>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Auth>,
}

impl Collection {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading collection {path:?}");
        read_json_file(path)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(rename = "_postman_id", skip_serializing_if = "Option::is_none")]
    pub postman_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
}

/// Either a folder (has `item`) or a saved request (has `request`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionEntry {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<Vec<CollectionEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<CollectionItem>,
    pub response: Vec<Value>,
}

impl CollectionEntry {
    pub fn is_folder(&self) -> bool {
        self.item.is_some()
    }
}

/// A single saved request definition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CollectionItem {
    pub name: String,
    pub url: Url,
    pub method: String,
    pub header: Vec<Header>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Value>,
}

impl Default for CollectionItem {
    fn default() -> Self {
        Self {
            name: String::new(),
            url: Url::default(),
            method: "GET".to_string(),
            header: Vec::new(),
            body: None,
            description: None,
        }
    }
}

impl CollectionItem {
    /// Postman stores descriptions either as a string or as `{ content, type }`.
    pub fn description_text(&self) -> Option<String> {
        match &self.description {
            None => None,
            Some(Value::Object(o)) => o.get("content").cloned().map(value_to_string),
            Some(v) => Some(value_to_string(v.clone())),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum UrlRepr {
    Raw(String),
    Detailed {
        #[serde(default)]
        raw: String,
    },
}

impl From<UrlRepr> for Url {
    fn from(value: UrlRepr) -> Self {
        match value {
            UrlRepr::Raw(raw) | UrlRepr::Detailed { raw } => Url { raw },
        }
    }
}

/// Request URL. Collections write it either as a plain string or as an
/// object carrying `raw` next to its parsed parts; only `raw` is kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(from = "UrlRepr")]
pub struct Url {
    pub raw: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Header {
    pub key: String,
    #[serde(deserialize_with = "string_or_json")]
    pub value: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl Header {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into(), disabled: false }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    Raw,
    Urlencoded,
    Formdata,
    File,
    Graphql,
    #[default]
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Body {
    pub mode: BodyMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub graphql: Option<GraphQlBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub urlencoded: Vec<FormParam>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub formdata: Vec<FormParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl Body {
    /// The `options.raw.language` hint Postman stores for raw bodies (json, xml, text...).
    pub fn raw_language(&self) -> Option<&str> {
        self.options.as_ref()?.get("raw")?.get("language")?.as_str()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphQlBody {
    #[serde(deserialize_with = "string_or_json")]
    pub query: String,
    #[serde(deserialize_with = "string_or_json")]
    pub variables: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct FormParam {
    pub key: String,
    #[serde(deserialize_with = "string_or_json")]
    pub value: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
}

impl FormParam {
    pub fn is_file(&self) -> bool {
        self.param_type.as_deref() == Some("file")
    }

    /// Postman writes `src` as a single path or a list with one path.
    pub fn file_path(&self) -> Option<&str> {
        match self.src.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(a) => a.first().and_then(|v| v.as_str()),
            _ => None,
        }
    }
}

/// Collection-level authentication. The parameters for a type live under a
/// key named after the type, e.g. `{"type": "bearer", "bearer": [...]}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Auth {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub auth_type: Option<String>,
    #[serde(flatten)]
    pub params: BTreeMap<String, Value>,
}

impl Auth {
    pub fn bearer(token: &str) -> Self {
        let mut params = BTreeMap::new();
        params.insert(
            "bearer".to_string(),
            serde_json::json!([{ "key": "token", "value": token, "type": "string" }]),
        );
        Self { auth_type: Some("bearer".to_string()), params }
    }

    /// Attributes stored for the configured type.
    pub fn attributes(&self) -> Vec<AuthAttribute> {
        let Some(auth_type) = &self.auth_type else {
            return Vec::new();
        };
        self.params
            .get(auth_type)
            .cloned()
            .and_then(|v| serde_json::from_value(v).ok())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AuthAttribute {
    pub key: String,
    #[serde(deserialize_with = "string_or_json")]
    pub value: String,
}
