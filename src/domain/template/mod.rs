// Template module for RFC 6570 URI templates
//
// This module provides parsing, re-serialization, and expansion of URI
// templates: literal text interleaved with `{...}` expressions.

mod ast;
mod encode;
mod operator;
mod parser;
mod resolver;

pub use ast::{Expression, Modifier, Partial, Template, VarSpec, Variables, MAX_PREFIX_LENGTH};
pub use encode::{is_reserved, is_unreserved, EncodeRule};
pub use operator::{Operator, OperatorSpec};
pub use parser::{parse, parse_var_spec, TemplateParser};
pub use resolver::{resolve, Value};
