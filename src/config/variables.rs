use anyhow::{bail, Context, Result};
use serde_json::Value;
use std::path::Path;

use crate::domain::template::Variables;

/// Load variable bindings from a YAML or JSON file.
/// `.json` files are read as JSON; anything else as YAML (a superset of JSON).
pub fn load_variables_file(path: &Path) -> Result<Variables> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read variables file {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    parse_variables(&text, is_json)
        .with_context(|| format!("Invalid variables file {}", path.display()))
}

pub fn parse_variables(text: &str, is_json: bool) -> Result<Variables> {
    if text.trim().is_empty() {
        return Ok(Variables::new());
    }
    let value: Value = if is_json {
        serde_json::from_str(text)?
    } else {
        serde_yaml::from_str(text)?
    };
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Variables::new()),
        other => bail!("Variables must be a mapping, found {}", kind_of(&other)),
    }
}

/// Parse a `name=value` assignment from the command line
pub fn parse_assignment(raw: &str) -> Result<(String, Value)> {
    let Some((name, value)) = raw.split_once('=') else {
        bail!("Invalid assignment '{}': expected name=value", raw);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("Invalid assignment '{}': missing variable name", raw);
    }
    Ok((name.to_string(), Value::String(value.to_string())))
}

/// Merge file bindings with command-line assignments; assignments win
pub fn merge_assignments(mut base: Variables, assignments: &[String]) -> Result<Variables> {
    for raw in assignments {
        let (name, value) = parse_assignment(raw)?;
        base.insert(name, value);
    }
    Ok(base)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
