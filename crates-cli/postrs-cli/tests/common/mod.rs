#![allow(dead_code)]

pub mod http_server;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};

pub fn cli_cmd() -> Command {
    cargo_bin_cmd!("postrs")
}

pub fn write_json(dir: &Path, file_name: &str, value: &Value) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, serde_json::to_string_pretty(value).expect("Failed to serialize fixture"))
        .expect("Failed to write fixture");
    path
}

/// Collection with a top-level `Ping` and a `Users` folder holding `Get User`.
pub fn seed_collection(dir: &Path) -> PathBuf {
    write_json(
        dir,
        "collection.json",
        &json!({
            "info": {"name": "Seed Collection"},
            "item": [
                {
                    "name": "Ping",
                    "request": {
                        "url": {"raw": "{{host}}/ping"},
                        "method": "GET",
                        "header": [{"key": "X-Collection", "value": "seed"}],
                    },
                    "response": [],
                },
                {
                    "name": "Users",
                    "item": [{
                        "name": "Get User",
                        "request": {"url": "{{host}}/users/{{id}}", "method": "GET"},
                        "response": [],
                    }],
                },
            ],
        }),
    )
}

pub fn seed_environment(dir: &Path, host: &str) -> PathBuf {
    write_json(
        dir,
        "environment.json",
        &json!({
            "name": "Test",
            "values": [
                {"key": "host", "value": host, "enabled": true},
                {"key": "id", "value": "1", "enabled": true},
            ],
        }),
    )
}
