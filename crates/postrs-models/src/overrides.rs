use crate::error::Result;
use crate::serde_util::{read_json_file, string_map_or_json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Runtime values that take precedence over what the collection stores.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RequestOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(deserialize_with = "string_map_or_json")]
    pub headers: Option<BTreeMap<String, String>>,
    /// Seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<f64>,
}

impl RequestOverrides {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        read_json_file(path.as_ref())
    }

    pub fn with_headers<K, V>(headers: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            headers: Some(headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
            .filter(|t| *t > 0.0)
            .and_then(|t| Duration::try_from_secs_f64(t).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_headers() {
        let o: RequestOverrides =
            serde_json::from_value(json!({"headers": {"RUNTIMEHEADER": "RUNTIMEVALUE"}})).unwrap();
        assert_eq!(o, RequestOverrides::with_headers([("RUNTIMEHEADER", "RUNTIMEVALUE")]));
        assert_eq!(o.timeout(), None);
    }

    #[test]
    fn test_timeout() {
        let o: RequestOverrides = serde_json::from_value(json!({"timeout": 1.5})).unwrap();
        assert_eq!(o.timeout(), Some(Duration::from_millis(1500)));
        assert!(o.headers.is_none());

        let zero = RequestOverrides { timeout: Some(0.0), ..Default::default() };
        assert_eq!(zero.timeout(), None);
    }

    #[test]
    fn test_timeout_out_of_range_is_ignored() {
        let huge: RequestOverrides = serde_json::from_value(json!({"timeout": 1e30})).unwrap();
        assert_eq!(huge.timeout(), None);

        for t in [f64::INFINITY, f64::NAN, -1.0] {
            let o = RequestOverrides { timeout: Some(t), ..Default::default() };
            assert_eq!(o.timeout(), None);
        }
    }

    #[test]
    fn test_non_string_header_values() {
        let o: RequestOverrides = serde_json::from_value(json!({
            "headers": {"X-Retry": 3, "X-Debug": true, "X-Name": "a", "X-None": null},
        }))
        .unwrap();
        assert_eq!(
            o,
            RequestOverrides::with_headers([
                ("X-Debug", "true"),
                ("X-Name", "a"),
                ("X-None", ""),
                ("X-Retry", "3"),
            ])
        );

        let none: RequestOverrides = serde_json::from_value(json!({"headers": null})).unwrap();
        assert!(none.headers.is_none());
    }
}
