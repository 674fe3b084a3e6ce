use crate::error::Result;
use crate::serde_util::{read_json_file, string_or_json};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Variables available for `{{name}}` substitution. Keys are case sensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Environments(BTreeMap<String, String>);

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EnvironmentFile {
    name: String,
    values: Vec<EnvironmentValue>,
}

#[derive(Debug, Deserialize)]
struct EnvironmentValue {
    key: String,
    #[serde(default, deserialize_with = "string_or_json")]
    value: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl Environments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a Postman environment export, keeping only enabled values.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let file: EnvironmentFile = read_json_file(path.as_ref())?;
        debug!("Loading environment \"{}\" with {} values", file.name, file.values.len());
        for v in file.values.into_iter().filter(|v| v.enabled) {
            self.0.insert(v.key, v.value);
        }
        Ok(())
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut environments = Self::new();
        environments.load(path)?;
        Ok(environments)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Overwrite with every pair from `other`.
    pub fn update<K, V>(&mut self, other: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (k, v) in other {
            self.0.insert(k.into(), v.into());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(|v| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut environments = Self::new();
        environments.update(iter);
        environments
    }
}
