//! Selection tree entity

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::domain::error::{DomainError, DomainResult};

static VALID_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// Check a param label: non-blank and made only of ASCII word characters.
pub fn is_valid_name(name: &str) -> bool {
    VALID_NAME.is_match(name)
}

/// One selected field, with the nested fields selected under it.
///
/// The synthetic root carries an empty name and holds the top-level
/// selections. Nodes are immutable once built; the only way to get a tree
/// with content is [`crate::parse`] or the validating constructors below.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawParamNode")]
pub struct ParamNode {
    /// Field label, empty for the root
    name: String,
    /// Nested selections in textual order, duplicates kept
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<ParamNode>,
}

impl ParamNode {
    /// Create a leaf node.
    pub fn new(name: impl Into<String>) -> DomainResult<Self> {
        Self::with_children(name, Vec::new())
    }

    /// Create a node owning the given children.
    ///
    /// Fails with `InvalidName` for a bad label or when a child is a root.
    pub fn with_children(name: impl Into<String>, children: Vec<ParamNode>) -> DomainResult<Self> {
        let name = name.into();
        if !is_valid_name(&name) {
            return Err(DomainError::InvalidName(name));
        }
        reject_nested_root(&children)?;
        Ok(Self { name, children })
    }

    /// Create an empty root.
    pub fn root() -> Self {
        Self::from_parts(String::new(), Vec::new())
    }

    /// Create a root holding the given top-level selections.
    ///
    /// A root can only sit at the top, so a root among `children` is refused.
    pub fn root_with(children: Vec<ParamNode>) -> DomainResult<Self> {
        reject_nested_root(&children)?;
        Ok(Self::from_parts(String::new(), children))
    }

    /// Assemble a node whose name was already validated by the caller.
    pub(crate) fn from_parts(name: String, children: Vec<ParamNode>) -> Self {
        Self { name, children }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[ParamNode] {
        &self.children
    }

    /// First direct child called `name`, if any.
    pub fn child_named(&self, name: &str) -> Option<&ParamNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Names of the direct children, in order, one entry per child.
    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_branch(&self) -> bool {
        !self.is_leaf()
    }

    pub fn is_root(&self) -> bool {
        self.name.is_empty()
    }

    /// Serialize the subtree back to the selection grammar.
    ///
    /// A leaf renders as its name, a branch as `name(child,...)` and the root
    /// as its children joined by `,`. Whitespace from the source is gone, so
    /// this is not a byte-for-byte echo of the input, but parsing it again
    /// gives an equal tree.
    pub fn canonical_form(&self) -> String {
        let inner = self.children.iter().map(ParamNode::canonical_form).join(",");
        if self.is_root() {
            inner
        } else if self.is_leaf() {
            self.name.clone()
        } else {
            format!("{}({})", self.name, inner)
        }
    }

    /// Edges on the longest downward path; a leaf has depth 0.
    ///
    /// On a parsed root this is one more than the number of nested groups
    /// that ended up with children: `a` is 1, `a(b)` is 2. An empty group
    /// collapses to a leaf and a `(` with no name before it is skipped, so
    /// `a()`, `a(b())` and `(a` give 1, 2 and 1.
    #[instrument(level = "trace", skip(self))]
    pub fn depth(&self) -> usize {
        self.children
            .iter()
            .map(|c| 1 + c.depth())
            .max()
            .unwrap_or(0)
    }

    /// Pre-order, left-to-right traversal starting at this node.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Dotted paths (`items.characteristics.length`) of every leaf below
    /// this node. The root contributes no segment.
    #[instrument(level = "debug", skip(self))]
    pub fn leaf_paths(&self) -> Vec<String> {
        let mut paths = Vec::new();
        let mut prefix = Vec::new();
        if self.is_root() {
            for child in &self.children {
                child.collect_leaf_paths(&mut prefix, &mut paths);
            }
        } else {
            self.collect_leaf_paths(&mut prefix, &mut paths);
        }
        paths
    }

    fn collect_leaf_paths<'a>(&'a self, prefix: &mut Vec<&'a str>, paths: &mut Vec<String>) {
        prefix.push(&self.name);
        if self.is_leaf() {
            paths.push(prefix.join("."));
        } else {
            for child in &self.children {
                child.collect_leaf_paths(prefix, paths);
            }
        }
        prefix.pop();
    }

    /// Follow `child_named` along `names`; an empty slice yields `self`.
    pub fn descend<S: AsRef<str>>(&self, names: &[S]) -> Option<&ParamNode> {
        names
            .iter()
            .try_fold(self, |node, name| node.child_named(name.as_ref()))
    }

    /// Whether a dotted path such as `items.title` is selected below this node.
    pub fn contains_path(&self, dotted: &str) -> bool {
        let names: Vec<&str> = dotted.split('.').collect();
        self.descend(&names).is_some()
    }
}

impl Default for ParamNode {
    fn default() -> Self {
        Self::root()
    }
}

impl fmt::Display for ParamNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            write!(f, "root")
        } else {
            write!(f, "{}", self.name)
        }
    }
}

impl FromStr for ParamNode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::parser::parse(s)
    }
}

impl<'a> IntoIterator for &'a ParamNode {
    type Item = &'a ParamNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a subtree, see [`ParamNode::iter`].
pub struct Iter<'a> {
    stack: Vec<&'a ParamNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a ParamNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

fn reject_nested_root(children: &[ParamNode]) -> DomainResult<()> {
    if children.iter().any(ParamNode::is_root) {
        return Err(DomainError::InvalidName(String::new()));
    }
    Ok(())
}

/// Unchecked shape used while deserializing; names are validated on the way
/// into [`ParamNode`].
#[derive(Deserialize)]
struct RawParamNode {
    name: String,
    #[serde(default)]
    children: Vec<RawParamNode>,
}

impl RawParamNode {
    fn into_child(self) -> DomainResult<ParamNode> {
        let children = self
            .children
            .into_iter()
            .map(RawParamNode::into_child)
            .collect::<DomainResult<Vec<_>>>()?;
        ParamNode::with_children(self.name, children)
    }
}

impl TryFrom<RawParamNode> for ParamNode {
    type Error = DomainError;

    fn try_from(raw: RawParamNode) -> Result<Self, Self::Error> {
        if !raw.name.is_empty() {
            return raw.into_child();
        }
        let children = raw
            .children
            .into_iter()
            .map(RawParamNode::into_child)
            .collect::<DomainResult<Vec<_>>>()?;
        ParamNode::root_with(children)
    }
}
