use crate::cli::SendArgs;
use crate::commands::{CommandResult, exit_code};
use crate::ui;
use log::debug;
use postrs::PostCollection;
use postrs_http::sender::ReqwestSender;
use postrs_models::{Environments, RequestOverrides};
use std::path::Path;

pub async fn run(args: SendArgs, environment: Option<&Path>, verbose: bool) -> i32 {
    exit_code(send(args, environment, verbose).await)
}

async fn send(args: SendArgs, environment: Option<&Path>, verbose: bool) -> CommandResult {
    let overrides = build_overrides(&args)?;
    debug!("request overrides: {overrides:?}");

    let mut collection =
        PostCollection::from_path(&args.collection, overrides).map_err(|e| e.to_string())?;
    if let Some(path) = environment {
        collection.load_environment(path).map_err(|e| e.to_string())?;
    }

    let mut call_vars = Environments::new();
    for raw in &args.vars {
        let (name, value) = parse_var(raw)?;
        call_vars.insert(name, value);
    }

    if verbose {
        ui::info(&format!("Sending {}.{}", args.folder, args.request));
    }

    let sender = ReqwestSender::new().map_err(|e| format!("Failed to create HTTP client: {e}"))?;
    let response = collection
        .send(&args.folder, &args.request, &sender, &call_vars)
        .await
        .map_err(|e| e.to_string())?;

    println!("HTTP {} {}", response.status, response.status_reason.as_deref().unwrap_or(""));
    if verbose {
        for (name, value) in &response.headers {
            println!("{}: {}", name, value);
        }
        println!();
    }
    println!("{}", String::from_utf8_lossy(&response.body));

    Ok(())
}

/// Overrides file first, then `--header` and `--timeout` on top.
fn build_overrides(args: &SendArgs) -> CommandResult<Option<RequestOverrides>> {
    let mut overrides = match &args.overrides {
        Some(path) => Some(RequestOverrides::from_path(path).map_err(|e| e.to_string())?),
        None => None,
    };

    if !args.headers.is_empty() {
        let headers = overrides
            .get_or_insert_with(RequestOverrides::default)
            .headers
            .get_or_insert_with(Default::default);
        for raw in &args.headers {
            let (name, value) = parse_header(raw)?;
            headers.insert(name, value);
        }
    }

    if let Some(timeout) = args.timeout {
        overrides.get_or_insert_with(RequestOverrides::default).timeout = Some(timeout);
    }

    Ok(overrides)
}

fn parse_header(raw: &str) -> CommandResult<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(format!("Invalid header \"{raw}\", expected \"Name: Value\"")),
    }
}

fn parse_var(raw: &str) -> CommandResult<(String, String)> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("Invalid variable \"{raw}\", expected name=value")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        assert_eq!(
            parse_header("X-Token:  abc:def "),
            Ok(("X-Token".to_string(), "abc:def".to_string()))
        );
        assert!(parse_header("no-colon").is_err());
        assert!(parse_header(": value").is_err());
    }

    #[test]
    fn test_parse_var() {
        assert_eq!(parse_var("id=1=2"), Ok(("id".to_string(), "1=2".to_string())));
        assert_eq!(parse_var("empty="), Ok(("empty".to_string(), String::new())));
        assert!(parse_var("=x").is_err());
        assert!(parse_var("novalue").is_err());
    }
}
