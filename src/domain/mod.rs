//! Domain layer: the selection tree and how it is built
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod builder;
pub mod error;
pub mod node;

pub use builder::{TreeBuilder, MAX_DEPTH_LIMIT};
pub use error::{DomainError, DomainResult};
pub use node::{is_valid_name, Iter, ParamNode};
