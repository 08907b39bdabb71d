//! RFC 6570 URI Template parsing and expansion.
//!
//! ```
//! use uritemplate::Template;
//!
//! let mut template: Template = "https://example.com/search{?q,lang}".parse().unwrap();
//! template.set("q", "uri templates");
//! assert_eq!(template.render(), "https://example.com/search?q=uri%20templates");
//! ```

pub mod config;
pub mod domain;
pub mod error;

pub use domain::template::{
    parse, EncodeRule, Expression, Modifier, Operator, Partial, Template, Value, VarSpec,
    Variables,
};
pub use error::{ErrorKind, TemplateError};
