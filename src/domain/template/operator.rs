// Expression operators and their expansion table

use std::fmt;

use super::encode::EncodeRule;
use super::encode::EncodeRule::{Unreserved as U, UnreservedReserved as UR};
use crate::error::{Result, TemplateError};

/// The eight expression operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Operator {
    /// `{var}`
    #[default]
    Simple,
    /// `{+var}`
    Reserved,
    /// `{#var}`
    Fragment,
    /// `{.var}`
    Label,
    /// `{/var}`
    Path,
    /// `{;var}`
    Parameter,
    /// `{?var}`
    Query,
    /// `{&var}`
    Continuation,
}

/// Per-operator expansion behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorSpec {
    pub sign: &'static str,
    pub first: &'static str,
    pub sep: &'static str,
    pub named: bool,
    pub ifemp: &'static str,
    pub allow: EncodeRule,
}

const fn spec(
    sign: &'static str,
    first: &'static str,
    sep: &'static str,
    named: bool,
    ifemp: &'static str,
    allow: EncodeRule,
) -> OperatorSpec {
    OperatorSpec {
        sign,
        first,
        sep,
        named,
        ifemp,
        allow,
    }
}

static SIMPLE: OperatorSpec = spec("", "", ",", false, "", U);
static RESERVED: OperatorSpec = spec("+", "", ",", false, "", UR);
static FRAGMENT: OperatorSpec = spec("#", "#", ",", false, "", UR);
static LABEL: OperatorSpec = spec(".", ".", ".", false, "", U);
static PATH: OperatorSpec = spec("/", "/", "/", false, "", U);
static PARAMETER: OperatorSpec = spec(";", ";", ";", true, "", U);
static QUERY: OperatorSpec = spec("?", "?", "&", true, "=", U);
static CONTINUATION: OperatorSpec = spec("&", "&", "&", true, "=", U);

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Simple,
        Operator::Reserved,
        Operator::Fragment,
        Operator::Label,
        Operator::Path,
        Operator::Parameter,
        Operator::Query,
        Operator::Continuation,
    ];

    pub fn spec(self) -> &'static OperatorSpec {
        match self {
            Operator::Simple => &SIMPLE,
            Operator::Reserved => &RESERVED,
            Operator::Fragment => &FRAGMENT,
            Operator::Label => &LABEL,
            Operator::Path => &PATH,
            Operator::Parameter => &PARAMETER,
            Operator::Query => &QUERY,
            Operator::Continuation => &CONTINUATION,
        }
    }

    /// Operator for a leading sign character, if it is one
    pub fn from_char(ch: char) -> Option<Operator> {
        match ch {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::Path),
            ';' => Some(Operator::Parameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::Continuation),
            _ => None,
        }
    }

    /// Parse an operator sign. An empty sign is the simple operator.
    pub fn from_sign(sign: &str) -> Result<Operator> {
        if sign.is_empty() {
            return Ok(Operator::Simple);
        }
        let mut chars = sign.chars();
        match (chars.next().and_then(Operator::from_char), chars.next()) {
            (Some(op), None) => Ok(op),
            _ => Err(TemplateError::structural(format!(
                "'{}' is not a valid operator",
                sign
            ))),
        }
    }

    pub fn sign(self) -> &'static str {
        self.spec().sign
    }

    pub fn first(self) -> &'static str {
        self.spec().first
    }

    pub fn sep(self) -> &'static str {
        self.spec().sep
    }

    pub fn is_named(self) -> bool {
        self.spec().named
    }

    pub fn ifemp(self) -> &'static str {
        self.spec().ifemp
    }

    pub fn allow(self) -> EncodeRule {
        self.spec().allow
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.sign())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_table() {
        assert_eq!(Operator::Simple.sep(), ",");
        assert_eq!(Operator::Fragment.first(), "#");
        assert_eq!(Operator::Fragment.allow(), EncodeRule::UnreservedReserved);
        assert_eq!(Operator::Label.sep(), ".");
        assert!(Operator::Parameter.is_named());
        assert_eq!(Operator::Parameter.ifemp(), "");
        assert_eq!(Operator::Query.sep(), "&");
        assert_eq!(Operator::Query.ifemp(), "=");
        assert!(!Operator::Path.is_named());
        assert_eq!(Operator::Continuation.allow(), EncodeRule::Unreserved);
    }

    #[test]
    fn test_from_sign_round_trip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_sign(op.sign()).unwrap(), op);
        }
    }

    #[test]
    fn test_from_sign_rejects_unknown() {
        for bad in ["=", "!", "@", "|", "++", "x"] {
            let err = Operator::from_sign(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Structural);
        }
    }
}
