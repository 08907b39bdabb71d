// Template tokenizer: splits raw text into literals and expressions

use std::str::FromStr;

use super::ast::{Expression, Modifier, Partial, Template, VarSpec};
use super::operator::Operator;
use crate::error::{Result, TemplateError};

pub struct TemplateParser<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TemplateParser<'a> {
    pub fn parse(template: &'a str) -> Result<Template> {
        let mut parser = Self {
            input: template,
            pos: 0,
        };
        let partials = parser.parse_partials()?;
        tracing::debug!(template, partials = partials.len(), "parsed template");
        Ok(Template::new(partials))
    }

    fn parse_partials(&mut self) -> Result<Vec<Partial>> {
        let mut partials = Vec::new();
        let mut literal_buf = String::new();

        while let Some(ch) = self.peek_char() {
            if ch != '{' {
                literal_buf.push(ch);
                self.pos += ch.len_utf8();
                continue;
            }

            let start = self.pos;
            let rest = &self.input[start + 1..];
            let close = rest.find('}');
            let reopen = rest.find('{');
            match close {
                Some(end) if reopen.map_or(true, |open| end < open) => {
                    flush_literal(&mut partials, &mut literal_buf);
                    let body = &rest[..end];
                    let expr = parse_body(body, start + 1)?;
                    tracing::trace!(position = partials.len(), %expr, "expression");
                    partials.push(Partial::Expression(expr));
                    self.pos = start + 1 + end + 1;
                }
                _ => {
                    // Unterminated or nested brace: keep the text, drop the brace
                    tracing::debug!(position = start, "stray '{{' treated as literal text");
                    self.pos += 1;
                }
            }
        }

        flush_literal(&mut partials, &mut literal_buf);
        Ok(partials)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }
}

fn flush_literal(partials: &mut Vec<Partial>, literal_buf: &mut String) {
    if !literal_buf.trim().is_empty() {
        tracing::trace!(position = partials.len(), literal = %literal_buf, "literal");
        partials.push(Partial::Literal(std::mem::take(literal_buf)));
    } else {
        literal_buf.clear();
    }
}

/// Parse the text between `{` and `}`. `offset` is the byte offset of the
/// body in the full template, used for error positions.
fn parse_body(body: &str, offset: usize) -> Result<Expression> {
    let trimmed = body.trim_start();
    let mut offset = offset + (body.len() - trimmed.len());

    let (operator, specs) = match trimmed.chars().next().and_then(Operator::from_char) {
        Some(op) => {
            offset += 1;
            (op, &trimmed[1..])
        }
        None => (Operator::Simple, trimmed),
    };

    if specs.trim().is_empty() {
        return Err(TemplateError::structural(format!(
            "expression \"{{{}}}\" must contain at least one variable",
            body
        )));
    }

    let mut var_specs = Vec::new();
    for raw in specs.split(',') {
        let var = parse_var_spec(raw).map_err(|e| {
            let lead = raw.len() - raw.trim_start().len();
            e.with_position(offset + lead)
        })?;
        var_specs.push(var);
        offset += raw.len() + 1;
    }

    Expression::new(operator, var_specs)
}

/// Parse one var-spec token such as `name`, `name:3` or `name*`
pub fn parse_var_spec(raw: &str) -> Result<VarSpec> {
    let token = raw.trim();
    if let Some((name, digits)) = token.split_once(':') {
        let max_length = digits
            .trim()
            .parse::<u16>()
            .map_err(|_| {
                TemplateError::malformed(format!(
                    "invalid prefix max-length \"{}\" for \"{}\"",
                    digits, name
                ))
            })?;
        VarSpec::new(name, Modifier::prefix(max_length)?)
    } else if let Some(name) = token.strip_suffix('*') {
        VarSpec::new(name, Modifier::Explode)
    } else {
        VarSpec::new(token, Modifier::None)
    }
}

/// Parse a raw template string
pub fn parse(template: &str) -> Result<Template> {
    TemplateParser::parse(template)
}

impl FromStr for Template {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        TemplateParser::parse(s)
    }
}

impl FromStr for Expression {
    type Err = TemplateError;

    /// Parse a single wrapped expression such as `{?x,y}`
    fn from_str(s: &str) -> Result<Self> {
        let token = s.trim();
        match token
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
        {
            Some(body) if !body.contains(['{', '}']) => parse_body(body, 1),
            _ => Err(TemplateError::structural(format!(
                "expression \"{}\" should begin with '{{' and end with '}}'",
                s
            ))),
        }
    }
}

impl FromStr for VarSpec {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self> {
        parse_var_spec(s)
    }
}
