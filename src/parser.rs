//! Field-selection expression parser.
//!
//! Grammar:
//!
//! ```text
//! expression   := paramList
//! paramList    := param (',' param)*      | ε
//! param        := NAME ['(' paramList ')']
//! NAME         := one-or-more word characters
//! ```
//!
//! Example: `kind,items(title,characteristics(length))`.
//!
//! The default (lenient) mode never rejects input: characters outside the
//! grammar are skipped, missing commas are tolerated, a `)` with nothing open
//! is ignored and groups left open at the end are closed. Strict mode reports
//! each of these as a [`DomainError`] carrying the byte offset.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, instrument, trace};

use crate::domain::{DomainError, DomainResult, ParamNode, TreeBuilder};

pub use crate::domain::MAX_DEPTH_LIMIT;

static NAME_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").unwrap());

/// Default limit on nested groups below the root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Parser knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested groups below the root, capped at
    /// [`MAX_DEPTH_LIMIT`]
    pub max_depth: usize,
    /// Reject malformed input instead of skipping it
    pub strict: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict: false,
        }
    }
}

/// Last structural token seen, used to decide what may come next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Start,
    Name,
    Open,
    Close,
    Comma,
}

#[derive(Debug, Clone, Default)]
pub struct ExpressionParser {
    options: ParseOptions,
}

impl ExpressionParser {
    pub fn new(options: ParseOptions) -> Self {
        Self { options }
    }

    /// Parse `text` into a root node whose children are the top-level
    /// selections. `None` and `""` both give an empty root.
    #[instrument(level = "debug", skip(self, text), fields(strict = self.options.strict))]
    pub fn parse<'a>(&self, text: impl Into<Option<&'a str>>) -> DomainResult<ParamNode> {
        let Some(text) = text.into() else {
            return Ok(ParamNode::root());
        };
        let strict = self.options.strict;
        let mut builder = TreeBuilder::new(self.options.max_depth);
        let mut last = Token::Start;
        let mut pos = 0;

        while let Some(ch) = text[pos..].chars().next() {
            match ch {
                c if is_word_char(c) => {
                    let Some(token) = NAME_TOKEN.find_at(text, pos) else {
                        break;
                    };
                    if strict && matches!(last, Token::Name | Token::Close) {
                        return Err(DomainError::MissingSeparator { position: pos });
                    }
                    builder.add(token.as_str())?;
                    last = Token::Name;
                    pos = token.end();
                    continue;
                }
                '(' => {
                    if last == Token::Name && builder.open(pos)? {
                        last = Token::Open;
                    } else if strict {
                        return Err(DomainError::MisplacedOpen { position: pos });
                    } else {
                        trace!("skipping '(' without owner at {}", pos);
                    }
                }
                ')' => {
                    if strict && last == Token::Comma {
                        return Err(DomainError::EmptyParam { position: pos });
                    }
                    if builder.close() {
                        last = Token::Close;
                    } else if strict {
                        return Err(DomainError::UnbalancedClose { position: pos });
                    } else {
                        debug!("ignoring unbalanced ')' at {}", pos);
                    }
                }
                ',' => {
                    if strict && !matches!(last, Token::Name | Token::Close) {
                        return Err(DomainError::EmptyParam { position: pos });
                    }
                    last = Token::Comma;
                }
                c if c.is_whitespace() => {}
                c => {
                    if strict {
                        return Err(DomainError::UnexpectedChar { ch: c, position: pos });
                    }
                    trace!("skipping {:?} at {}", c, pos);
                }
            }
            pos += ch.len_utf8();
        }

        if strict {
            if last == Token::Comma {
                return Err(DomainError::EmptyParam { position: text.len() });
            }
            if let Some((name, open)) = builder.innermost_open() {
                return Err(DomainError::UnclosedGroup {
                    name: name.to_string(),
                    open,
                });
            }
        }

        let root = builder.finish();
        debug!("parsed {} top-level params", root.children().len());
        Ok(root)
    }
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Parse with default (lenient) options.
pub fn parse<'a>(text: impl Into<Option<&'a str>>) -> DomainResult<ParamNode> {
    ExpressionParser::default().parse(text)
}
