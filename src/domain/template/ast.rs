// Abstract Syntax Tree types for URI templates

use std::fmt;

use super::operator::Operator;
use crate::error::{Result, TemplateError};

/// Variable bindings used for expansion, in insertion order
pub type Variables = serde_json::Map<String, serde_json::Value>;

/// Upper bound for a prefix modifier's max-length
pub const MAX_PREFIX_LENGTH: u16 = 10_000;

/// Represents a parsed template as a list of partials plus bound values
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Template {
    partials: Vec<Partial>,
    values: Variables,
}

impl Template {
    pub fn new(partials: Vec<Partial>) -> Self {
        Self {
            partials,
            values: Variables::new(),
        }
    }

    pub fn with_values(mut self, values: Variables) -> Self {
        self.values = values;
        self
    }

    /// Prepend a base URL literal
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        if !base_url.is_empty() {
            self.partials.insert(0, Partial::Literal(base_url.to_string()));
        }
        self
    }

    /// Partials in template order; a partial's index is its position
    pub fn partials(&self) -> &[Partial] {
        &self.partials
    }

    pub fn values(&self) -> &Variables {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut Variables {
        &mut self.values
    }

    /// Bind a value, replacing any previous binding of `name`
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> &mut Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Get all var-specs in this template
    pub fn variables(&self) -> Vec<&VarSpec> {
        self.partials
            .iter()
            .filter_map(|partial| match partial {
                Partial::Expression(expr) => Some(expr.var_specs()),
                Partial::Literal(_) => None,
            })
            .flatten()
            .collect()
    }

    /// Distinct variable names, first occurrence first
    pub fn variable_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for var in self.variables() {
            if !names.contains(&var.name()) {
                names.push(var.name());
            }
        }
        names
    }

    /// Reconstruct the template string
    pub fn source_form(&self) -> String {
        self.partials.iter().map(Partial::source_form).collect()
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for partial in &self.partials {
            fmt::Display::fmt(partial, f)?;
        }
        Ok(())
    }
}

/// A template consists of literal strings and expressions
#[derive(Debug, Clone, PartialEq)]
pub enum Partial {
    Literal(String),
    Expression(Expression),
}

impl Partial {
    pub fn source_form(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Partial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Partial::Literal(text) => f.write_str(text),
            Partial::Expression(expr) => fmt::Display::fmt(expr, f),
        }
    }
}

impl From<Expression> for Partial {
    fn from(expr: Expression) -> Self {
        Partial::Expression(expr)
    }
}

/// One `{...}` block: an operator and at least one var-spec
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    operator: Operator,
    var_specs: Vec<VarSpec>,
}

impl Expression {
    pub fn new(operator: Operator, var_specs: Vec<VarSpec>) -> Result<Self> {
        if var_specs.is_empty() {
            return Err(TemplateError::structural(
                "expression must contain at least one variable",
            ));
        }
        Ok(Self {
            operator,
            var_specs,
        })
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn var_specs(&self) -> &[VarSpec] {
        &self.var_specs
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}", self.operator)?;
        for (i, var) in self.var_specs.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", var)?;
        }
        f.write_str("}")
    }
}

/// Value-shaping suffix on a var-spec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modifier {
    #[default]
    None,
    /// `:N`, keep at most N characters
    Prefix(u16),
    /// `*`, expand composites element by element
    Explode,
}

impl Modifier {
    pub fn prefix(max_length: u16) -> Result<Self> {
        if max_length == 0 || max_length > MAX_PREFIX_LENGTH {
            return Err(TemplateError::malformed(format!(
                "prefix max-length {} must be between 1 and {}",
                max_length, MAX_PREFIX_LENGTH
            )));
        }
        Ok(Modifier::Prefix(max_length))
    }

    pub fn max_length(self) -> Option<usize> {
        match self {
            Modifier::Prefix(len) => Some(len as usize),
            _ => None,
        }
    }

    pub fn is_explode(self) -> bool {
        matches!(self, Modifier::Explode)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modifier::None => Ok(()),
            Modifier::Prefix(len) => write!(f, ":{}", len),
            Modifier::Explode => f.write_str("*"),
        }
    }
}

/// A variable reference inside an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarSpec {
    name: String,
    modifier: Modifier,
}

impl VarSpec {
    pub fn new(name: &str, modifier: Modifier) -> Result<Self> {
        validate_name(name)?;
        if let Modifier::Prefix(len) = modifier {
            Modifier::prefix(len)?;
        }
        Ok(Self {
            name: name.to_string(),
            modifier,
        })
    }

    pub fn simple(name: &str) -> Result<Self> {
        Self::new(name, Modifier::None)
    }

    pub fn explode(name: &str) -> Result<Self> {
        Self::new(name, Modifier::Explode)
    }

    pub fn prefix(name: &str, max_length: u16) -> Result<Self> {
        Self::new(name, Modifier::prefix(max_length)?)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn modifier(&self) -> Modifier {
        self.modifier
    }
}

impl fmt::Display for VarSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name, self.modifier)
    }
}

/// Names are `([A-Za-z0-9_.]|%XX)+` with no whitespace anywhere
fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(TemplateError::malformed(format!(
            "variable name \"{}\" cannot be empty",
            name
        )));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(TemplateError::malformed(format!(
            "variable name \"{}\" cannot contain spaces",
            name
        )));
    }

    let bytes = name.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b if b.is_ascii_alphanumeric() || b == b'_' || b == b'.' => i += 1,
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                i += 3
            }
            _ => {
                return Err(TemplateError::malformed(format!(
                    "variable name \"{}\" contains invalid characters",
                    name
                )))
            }
        }
    }
    Ok(())
}
