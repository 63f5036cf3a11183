//! Selection service
//!
//! Parses selection expressions with the configured options and resolves
//! dotted paths inside the resulting tree.

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::config::Settings;
use crate::domain::ParamNode;
use crate::parser::ExpressionParser;

/// Service for parsing and querying field selections.
#[derive(Debug, Clone)]
pub struct SelectionService {
    parser: ExpressionParser,
}

impl SelectionService {
    /// Create a new selection service.
    pub fn new(settings: &Settings) -> Self {
        Self {
            parser: ExpressionParser::new(settings.parse_options()),
        }
    }

    /// Parse `text` with the configured depth limit and strictness.
    #[instrument(level = "debug", skip(self))]
    pub fn parse(&self, text: &str) -> ApplicationResult<ParamNode> {
        let root = self.parser.parse(text)?;
        debug!("parse: {} nodes, depth {}", root.iter().count() - 1, root.depth());
        Ok(root)
    }

    /// Canonical form of `text`.
    pub fn normalize(&self, text: &str) -> ApplicationResult<String> {
        Ok(self.parse(text)?.canonical_form())
    }

    /// Node reached by following the dotted `path` from `root`.
    ///
    /// An empty path resolves to `root` itself.
    #[instrument(level = "debug", skip(self, root))]
    pub fn resolve<'a>(&self, root: &'a ParamNode, path: &str) -> ApplicationResult<&'a ParamNode> {
        if path.is_empty() {
            return Ok(root);
        }
        let names: Vec<&str> = path.split('.').collect();
        root.descend(&names)
            .ok_or_else(|| ApplicationError::PathNotFound(path.to_string()))
    }
}
