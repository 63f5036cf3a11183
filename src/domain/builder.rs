//! Stack-based tree builder used by the expression parser.

use tracing::{instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::node::ParamNode;

/// Hard ceiling on nested groups. Trees deeper than this would overflow the
/// stack in the recursive operations on [`ParamNode`].
pub const MAX_DEPTH_LIMIT: usize = 256;

/// An open group: the owner's name and the children collected so far.
#[derive(Debug)]
struct Frame {
    name: String,
    /// Byte offset of the '(' that opened the group
    open: usize,
    children: Vec<ParamNode>,
}

/// Builds a [`ParamNode`] tree top-down.
///
/// The bottom frame is the root and is never popped. Opening a group moves
/// the most recently added node onto the stack; closing it freezes the frame
/// into an immutable node and appends it to the frame below.
#[derive(Debug)]
pub struct TreeBuilder {
    stack: Vec<Frame>,
    max_depth: usize,
}

impl TreeBuilder {
    /// `max_depth` above [`MAX_DEPTH_LIMIT`] is lowered to the limit.
    pub fn new(max_depth: usize) -> Self {
        Self {
            stack: vec![Frame {
                name: String::new(),
                open: 0,
                children: Vec::new(),
            }],
            max_depth: max_depth.min(MAX_DEPTH_LIMIT),
        }
    }

    /// Number of groups currently open below the root.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    /// Whether the last added node in the current group can own a group.
    fn has_pending_node(&self) -> bool {
        self.top().children.last().is_some_and(ParamNode::is_leaf)
    }

    fn top(&self) -> &Frame {
        &self.stack[self.stack.len() - 1]
    }

    fn top_mut(&mut self) -> &mut Frame {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Append a leaf named `name` to the current group.
    #[instrument(level = "trace", skip(self))]
    pub fn add(&mut self, name: &str) -> DomainResult<()> {
        let node = ParamNode::new(name)?;
        self.top_mut().children.push(node);
        Ok(())
    }

    /// Turn the last added node into an open group.
    ///
    /// Returns `Ok(false)` when there is no node to own the group.
    #[instrument(level = "trace", skip(self))]
    pub fn open(&mut self, position: usize) -> DomainResult<bool> {
        if !self.has_pending_node() {
            return Ok(false);
        }
        if self.depth() >= self.max_depth {
            return Err(DomainError::DepthExceeded {
                depth: self.depth() + 1,
                limit: self.max_depth,
            });
        }
        let Some(owner) = self.top_mut().children.pop() else {
            return Ok(false);
        };
        trace!("push group '{}' at depth {}", owner.name(), self.depth() + 1);
        self.stack.push(Frame {
            name: owner.name().to_string(),
            open: position,
            children: Vec::new(),
        });
        Ok(true)
    }

    /// Close the innermost group. Returns `false` at root level, where the
    /// stack is left untouched.
    #[instrument(level = "trace", skip(self))]
    pub fn close(&mut self) -> bool {
        if self.depth() == 0 {
            return false;
        }
        if let Some(frame) = self.stack.pop() {
            trace!("pop group '{}' with {} children", frame.name, frame.children.len());
            let node = ParamNode::from_parts(frame.name, frame.children);
            self.top_mut().children.push(node);
        }
        true
    }

    /// Name and opening offset of the innermost open group, if any.
    pub fn innermost_open(&self) -> Option<(&str, usize)> {
        if self.depth() == 0 {
            None
        } else {
            let frame = self.top();
            Some((frame.name.as_str(), frame.open))
        }
    }

    /// Close whatever is still open and return the root.
    pub fn finish(mut self) -> ParamNode {
        while self.close() {}
        let root = self.stack.pop().map(|f| f.children).unwrap_or_default();
        ParamNode::from_parts(String::new(), root)
    }
}
