use crate::error::{Error, Result};
use log::{debug, info};
use postrs_models::Auth;
use postrs_templates::{RenderOptions, render};
use std::collections::BTreeMap;

/// Add the collection-level authentication to already merged headers.
pub fn apply_auth(
    headers: &mut BTreeMap<String, String>,
    auth: Option<&Auth>,
    vars: &BTreeMap<String, String>,
    options: &RenderOptions,
) -> Result<()> {
    let Some(auth) = auth else {
        return Ok(());
    };

    let Some(auth_type) = auth.auth_type.as_deref() else {
        return Ok(());
    };
    info!("auth type '{auth_type}'");

    match auth_type.to_lowercase().as_str() {
        "noauth" => Ok(()),
        "bearer" => {
            let attributes = auth.attributes();
            if attributes.len() > 1 {
                return Err(Error::MultipleAuthValues);
            }
            let token = match attributes.first() {
                Some(a) => render(&a.value, vars, options)?,
                None => String::new(),
            };
            headers.insert("Authorization".to_string(), format!("Bearer {token}"));
            Ok(())
        }
        _ => {
            debug!("{auth:?}");
            Err(Error::UnsupportedAuth(auth_type.to_string()))
        }
    }
}
