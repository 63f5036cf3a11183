//! Field-selection expressions.
//!
//! Parses a selection such as `kind,items(title,characteristics(length))`
//! into a [`ParamNode`] tree that response shapers and path builders can
//! query:
//!
//! ```
//! let root = paramtree::parse("kind,items(title)").unwrap();
//! assert_eq!(root.child_names(), vec!["kind", "items"]);
//! assert!(root.contains_path("items.title"));
//! assert_eq!(root.canonical_form(), "kind,items(title)");
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod parser;
pub mod tree_traits;
pub mod util;

pub use domain::{DomainError, DomainResult, ParamNode};
pub use parser::{parse, ExpressionParser, ParseOptions};
