use std::path::Path;

use wf_interact::{AppConfig, Interaction};

/// Parse a `key=value` modal field.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.trim().is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.trim().to_string(), value.to_string()))
}

pub fn run(
    content: &Path,
    config: AppConfig,
    token: &str,
    fields: Vec<(String, String)>,
) -> Result<(), String> {
    let mut app = super::load_app(content, config)?;
    let interaction = if fields.is_empty() {
        Interaction::button(token)
    } else {
        Interaction::modal_submit(token, fields.into_iter().collect())
    };
    super::show(&app.press(&interaction))
}
