use crate::auth::apply_auth;
use crate::error::Result;
use log::{debug, info, warn};
use postrs_http::sender::HttpSender;
use postrs_http::types::{
    HttpResponse, MultipartPart, SendableBody, SendableHttpRequest, SendableHttpRequestOptions,
};
use postrs_models::{
    Auth, Body, BodyMode, CollectionItem, Environments, FormParam, GraphQlBody, RequestOverrides,
};
use postrs_templates::{RenderOptions, render, render_json_value};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Literal sent as `variables` when a GraphQL body leaves them empty.
pub const EMPTY_GRAPHQL_VARIABLES: &str = "{}";

/// Everything outside the item itself that shapes the outgoing call.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub environments: Environments,
    pub request_overrides: Option<RequestOverrides>,
    pub auth: Option<Auth>,
}

impl RequestContext {
    pub fn new(environments: Environments, request_overrides: Option<RequestOverrides>) -> Self {
        Self { environments, request_overrides, auth: None }
    }
}

/// Build the call for `item` and send it through `sender` exactly once.
pub async fn build_and_send<S: HttpSender + ?Sized>(
    item: &CollectionItem,
    context: &RequestContext,
    sender: &S,
) -> Result<HttpResponse> {
    build_and_send_with_vars(item, context, sender, &Environments::new()).await
}

/// Like [`build_and_send`], with per-call variables layered over the environments.
pub async fn build_and_send_with_vars<S: HttpSender + ?Sized>(
    item: &CollectionItem,
    context: &RequestContext,
    sender: &S,
    call_vars: &Environments,
) -> Result<HttpResponse> {
    let request = build_request(item, context, call_vars)?;
    info!("Sending {} {}", request.method, request.url);
    Ok(sender.send(request).await?)
}

pub fn build_request(
    item: &CollectionItem,
    context: &RequestContext,
    call_vars: &Environments,
) -> Result<SendableHttpRequest> {
    debug!("Building request \"{}\"", item.name);

    let mut vars = context.environments.clone();
    vars.update(call_vars.vars().clone());
    let vars = vars.vars();
    let options = RenderOptions::keep_raw();

    let mut headers = render_headers(collection_headers(item), vars, &options)?;
    if let Some(overrides) = &context.request_overrides {
        merge_override_headers(&mut headers, overrides, vars, &options)?;
    }
    apply_auth(&mut headers, context.auth.as_ref(), vars, &options)?;

    let json = match item.body.as_ref().and_then(graphql_payload) {
        Some(payload) => Some(render_json_value(payload, vars, &options)?),
        None => None,
    };

    let body = match &item.body {
        Some(body) if json.is_none() => build_body(body, vars, &options)?,
        _ => None,
    };

    let request = SendableHttpRequest {
        url: render(&item.url.raw, vars, &options)?,
        method: item.method.clone(),
        headers,
        json,
        body,
        options: SendableHttpRequestOptions {
            timeout: context.request_overrides.as_ref().and_then(|o| o.timeout()),
        },
    };
    debug!("request kwargs: {request:?}");

    Ok(request)
}

/// Enabled headers in order; a repeated key keeps its last value.
fn collection_headers(item: &CollectionItem) -> BTreeMap<String, String> {
    item.header
        .iter()
        .filter(|h| !h.disabled)
        .map(|h| (h.key.clone(), h.value.clone()))
        .collect()
}

fn render_headers(
    headers: impl IntoIterator<Item = (String, String)>,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<BTreeMap<String, String>> {
    let mut rendered = BTreeMap::new();
    for (name, value) in headers {
        rendered.insert(render(&name, vars, options)?, render(&value, vars, options)?);
    }
    Ok(rendered)
}

/// Override headers are rendered on their own and replace any collection header
/// with the same rendered name.
fn merge_override_headers(
    headers: &mut BTreeMap<String, String>,
    overrides: &RequestOverrides,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<()> {
    if let Some(override_headers) = &overrides.headers {
        headers.extend(render_headers(override_headers.clone(), vars, options)?);
    }
    Ok(())
}

/// `{"query", "variables"}` for GraphQL bodies. Variables are forwarded as text
/// without being parsed.
fn graphql_payload(body: &Body) -> Option<Value> {
    if body.mode != BodyMode::Graphql {
        return None;
    }

    let GraphQlBody { query, variables } = body.graphql.clone().unwrap_or_default();
    let variables = if variables.is_empty() {
        info!("default variables to {EMPTY_GRAPHQL_VARIABLES}");
        EMPTY_GRAPHQL_VARIABLES.to_string()
    } else {
        variables
    };

    Some(json!({ "query": query, "variables": variables }))
}

fn build_body(
    body: &Body,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<Option<SendableBody>> {
    let b = match body.mode {
        BodyMode::Raw => match &body.raw {
            Some(raw) => Some(SendableBody::Text {
                text: render(raw, vars, options)?,
                content_type: raw_content_type(body.raw_language()),
            }),
            None => None,
        },
        BodyMode::Urlencoded => {
            let mut pairs = Vec::new();
            for p in enabled(&body.urlencoded) {
                pairs.push((render(&p.key, vars, options)?, render(&p.value, vars, options)?));
            }
            Some(SendableBody::Form(pairs))
        }
        BodyMode::Formdata => {
            let mut parts = Vec::new();
            for p in enabled(&body.formdata) {
                let name = render(&p.key, vars, options)?;
                if p.is_file() {
                    let Some(path) = p.file_path() else {
                        warn!("Skipping file field {name} without src");
                        continue;
                    };
                    parts.push(MultipartPart::File {
                        name,
                        path: PathBuf::from(render(path, vars, options)?),
                        content_type: p.content_type.clone(),
                    });
                } else {
                    parts.push(MultipartPart::Text { name, value: render(&p.value, vars, options)? });
                }
            }
            Some(SendableBody::Multipart(parts))
        }
        BodyMode::Graphql => None,
        BodyMode::File | BodyMode::Other => {
            warn!("Unsupported body mode: {:?}", body.mode);
            None
        }
    };

    Ok(b)
}

fn enabled(params: &[FormParam]) -> impl Iterator<Item = &FormParam> {
    params.iter().filter(|p| !p.disabled && !p.key.is_empty())
}

fn raw_content_type(language: Option<&str>) -> Option<String> {
    let content_type = match language? {
        "json" => "application/json",
        "xml" => "application/xml",
        "html" => "text/html",
        "javascript" => "application/javascript",
        "text" => "text/plain",
        _ => return None,
    };
    Some(content_type.to_string())
}
