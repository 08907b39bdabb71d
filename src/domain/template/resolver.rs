// Value resolution and expression expansion

use serde_json::Value as Json;

use super::ast::{Expression, Modifier, Partial, Template, VarSpec, Variables};
use super::operator::Operator;

/// Shape of a variable's bound data once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    String(String),
    List(Vec<String>),
    /// Keys and values interleaved: `[k1, v1, k2, v2, ...]`
    FlatPairs(Vec<String>),
    /// One `(key, value)` per map entry, used when exploded
    Pairs(Vec<(String, String)>),
}

impl Value {
    /// Zero elements, or a single empty string
    pub fn is_empty(&self) -> bool {
        match self {
            Value::String(s) => s.is_empty(),
            Value::List(items) | Value::FlatPairs(items) => items.is_empty(),
            Value::Pairs(pairs) => pairs.is_empty(),
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }
}

impl VarSpec {
    /// Resolve this var-spec against a value map. `None` means undefined.
    pub fn resolve(&self, values: &Variables) -> Option<Value> {
        resolve(values.get(self.name())?, self.modifier())
    }
}

/// Shape a bound value according to a modifier
pub fn resolve(bound: &Json, modifier: Modifier) -> Option<Value> {
    let max_length = modifier.max_length();
    match bound {
        Json::Null => None,
        Json::Object(map) if modifier.is_explode() => Some(Value::Pairs(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .map(|(k, v)| (k.clone(), stringify(v)))
                .collect(),
        )),
        Json::Object(map) => Some(Value::FlatPairs(
            map.iter()
                .filter(|(_, v)| !v.is_null())
                .flat_map(|(k, v)| {
                    [
                        truncate(k.trim(), max_length),
                        truncate(stringify(v).trim(), max_length),
                    ]
                })
                .collect(),
        )),
        Json::Array(items) => Some(Value::List(
            items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| truncate(stringify(item).trim(), max_length))
                .collect(),
        )),
        scalar => Some(Value::String(truncate(&stringify(scalar), max_length))),
    }
}

fn stringify(value: &Json) -> String {
    match value {
        Json::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn truncate(value: &str, max_length: Option<usize>) -> String {
    match max_length {
        Some(len) => value.chars().take(len).collect(),
        None => value.to_string(),
    }
}

impl Expression {
    /// Expand this expression against a value map
    pub fn expand(&self, values: &Variables) -> String {
        let op = self.operator();
        let named = op.is_named();
        let mut out = String::new();
        let mut is_first = true;

        for var in self.var_specs() {
            let Some(value) = var.resolve(values) else {
                continue;
            };
            // Empty lists and maps count as undefined
            if !value.is_string() && value.is_empty() {
                continue;
            }

            out.push_str(if is_first { op.first() } else { op.sep() });
            if var.modifier().is_explode() {
                push_exploded(&mut out, op, var.name(), &value);
            } else {
                push_joined(&mut out, op, var.name(), &value);
            }
            is_first = false;
        }

        if named && out.len() <= 1 {
            String::new()
        } else {
            out
        }
    }
}

// Strings and non-exploded composites: `name=` prefix when named, comma-joined values
fn push_joined(out: &mut String, op: Operator, name: &str, value: &Value) {
    let rule = op.allow();
    if op.is_named() {
        out.push_str(name);
        out.push_str(if value.is_empty() { op.ifemp() } else { "=" });
    }
    match value {
        Value::String(s) => out.push_str(&rule.encode(s)),
        Value::List(items) | Value::FlatPairs(items) => {
            let encoded: Vec<String> = items.iter().map(|item| rule.encode(item)).collect();
            out.push_str(&encoded.join(","));
        }
        Value::Pairs(pairs) => {
            let encoded: Vec<String> = pairs
                .iter()
                .flat_map(|(k, v)| [rule.encode(k), rule.encode(v)])
                .collect();
            out.push_str(&encoded.join(","));
        }
    }
}

fn push_exploded(out: &mut String, op: Operator, name: &str, value: &Value) {
    let rule = op.allow();
    let named = op.is_named();
    let parts: Vec<String> = match value {
        Value::String(_) => return push_joined(out, op, name, value),
        Value::List(items) if named => items
            .iter()
            .map(|item| named_part(op, name, &rule.encode(item), item.is_empty()))
            .collect(),
        Value::List(items) => items.iter().map(|item| rule.encode(item)).collect(),
        Value::FlatPairs(items) => items
            .chunks(2)
            .map(|pair| pair_part(op, &pair[0], pair.get(1).map_or("", String::as_str)))
            .collect(),
        Value::Pairs(pairs) => pairs.iter().map(|(k, v)| pair_part(op, k, v)).collect(),
    };
    out.push_str(&parts.join(op.sep()));
}

fn named_part(op: Operator, name: &str, encoded: &str, empty: bool) -> String {
    if empty {
        format!("{}{}", name, op.ifemp())
    } else {
        format!("{}={}", name, encoded)
    }
}

// Keys are data here, so they are encoded alongside the value
fn pair_part(op: Operator, key: &str, value: &str) -> String {
    let rule = op.allow();
    if op.is_named() {
        named_part(op, &rule.encode(key), &rule.encode(value), value.is_empty())
    } else {
        format!("{}={}", rule.encode(key), rule.encode(value))
    }
}

impl Partial {
    pub fn expand(&self, values: &Variables) -> String {
        match self {
            Partial::Literal(text) => text.clone(),
            Partial::Expression(expr) => expr.expand(values),
        }
    }
}

impl Template {
    /// Expand against the given values; the template itself is not modified
    pub fn expand(&self, values: &Variables) -> String {
        self.partials()
            .iter()
            .map(|partial| partial.expand(values))
            .collect()
    }

    /// Expand against the values bound to this template
    pub fn render(&self) -> String {
        self.expand(self.values())
    }
}
