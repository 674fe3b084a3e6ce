use crate::error::Error::VariableNotFound;
use crate::error::Result;
use crate::parser::{Token, parse};
use log::debug;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum RenderErrorBehavior {
    Throw,
    /// Leave `{{name}}` in place when `name` is unknown.
    #[default]
    KeepRaw,
    ReturnEmpty,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub error_behavior: RenderErrorBehavior,
}

impl RenderOptions {
    pub fn throw() -> Self {
        Self { error_behavior: RenderErrorBehavior::Throw }
    }

    pub fn keep_raw() -> Self {
        Self { error_behavior: RenderErrorBehavior::KeepRaw }
    }

    pub fn return_empty() -> Self {
        Self { error_behavior: RenderErrorBehavior::ReturnEmpty }
    }
}

pub fn render(
    template: &str,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<String> {
    let tokens = parse(template);
    if !tokens.has_variables() {
        return Ok(template.to_string());
    }

    let mut out = String::with_capacity(template.len());
    for token in tokens.tokens {
        match token {
            Token::Raw(text) => out.push_str(&text),
            Token::Var { name, source } => match vars.get(&name) {
                Some(value) => out.push_str(value),
                None => match options.error_behavior {
                    RenderErrorBehavior::Throw => return Err(VariableNotFound(name)),
                    RenderErrorBehavior::KeepRaw => {
                        debug!("Leaving unknown variable {source}");
                        out.push_str(&source);
                    }
                    RenderErrorBehavior::ReturnEmpty => {}
                },
            },
        }
    }

    Ok(out)
}

/// Render every string inside a JSON value. Object keys are rendered too.
pub fn render_json_value(
    value: Value,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<Value> {
    let v = match value {
        Value::String(s) => Value::String(render(&s, vars, options)?),
        Value::Array(a) => Value::Array(
            a.into_iter()
                .map(|v| render_json_value(v, vars, options))
                .collect::<Result<Vec<_>>>()?,
        ),
        Value::Object(o) => {
            let mut rendered = serde_json::Map::with_capacity(o.len());
            for (k, v) in o {
                rendered.insert(render(&k, vars, options)?, render_json_value(v, vars, options)?);
            }
            Value::Object(rendered)
        }
        v => v,
    };
    Ok(v)
}
