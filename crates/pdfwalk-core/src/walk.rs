//! The traversal engine.
//!
//! [`Walker`] performs an iterative, explicit-stack depth-first traversal
//! from a root node, with three policies layered on top of plain DFS:
//!
//! 1. **Reference transparency**: a node wrapping an indirect reference is
//!    replaced by its resolution before anything else sees it.
//! 2. **Depth bound**: nodes deeper than the ceiling are never expanded.
//!    This is the sole cycle-breaking mechanism; no identity deduplication
//!    is performed, so shared subtrees are visited once per path.
//! 3. **Trigger-gated emission**: once any node's label equals the sentinel
//!    key, every subsequently visited node emits one formatted trail line.
//!
//! Traversal state (the armed flag, the abort flag) lives in an explicit
//! [`TrailState`] that is shared between the outer walk and any nested
//! re-walks a visitor starts through [`Recurse::descend`].

use serde::Serialize;
use tracing::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::format::{indented, Formatter, UnknownPolicy};
use crate::model::{DocumentModel, RootSelector};
use crate::node::Node;
use crate::value::GraphValue;

/// What to do when an indirect reference fails to resolve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferencePolicy {
    /// Propagate the error and end the walk
    Halt,
    /// Abandon that branch, record it in the summary, continue with siblings
    #[default]
    SkipBranch,
}

/// Configuration for the walker
#[derive(Debug, Clone)]
pub struct WalkerConfig {
    /// Depth ceiling: nodes deeper than this are never expanded
    pub max_depth: usize,
    /// Label whose first appearance arms trail emission
    pub sentinel: String,
    /// Policy for value kinds the formatter does not render
    pub unknown: UnknownPolicy,
    /// Policy for references the document model cannot resolve
    pub on_unresolved: ReferencePolicy,
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            max_depth: crate::DEFAULT_MAX_DEPTH,
            sentinel: crate::DEFAULT_SENTINEL.to_string(),
            unknown: UnknownPolicy::default(),
            on_unresolved: ReferencePolicy::default(),
        }
    }
}

impl WalkerConfig {
    /// Creates a new walker config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the depth ceiling
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Sets the sentinel label
    pub fn sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    /// Sets the unknown-kind formatting policy
    pub fn unknown(mut self, policy: UnknownPolicy) -> Self {
        self.unknown = policy;
        self
    }

    /// Sets the unresolved-reference policy
    pub fn on_unresolved(mut self, policy: ReferencePolicy) -> Self {
        self.on_unresolved = policy;
        self
    }
}

/// One emitted trail record: the node's depth and its formatted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrailLine {
    /// Depth of the node that produced the line
    pub depth: usize,
    /// The formatted node description
    pub text: String,
}

/// Destination for emitted trail lines.
///
/// The walker reports `(depth, text)` records; sinks decide how to render
/// or store them.
pub trait TrailSink {
    /// Receives one emitted line
    fn line(&mut self, depth: usize, text: &str);
}

/// A sink that collects lines in memory
#[derive(Debug, Default)]
pub struct TrailBuffer {
    lines: Vec<TrailLine>,
}

impl TrailBuffer {
    /// Creates an empty buffer
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the collected lines
    pub fn lines(&self) -> &[TrailLine] {
        &self.lines
    }

    /// Consumes the buffer, returning the collected lines
    pub fn into_lines(self) -> Vec<TrailLine> {
        self.lines
    }
}

impl TrailSink for TrailBuffer {
    fn line(&mut self, depth: usize, text: &str) {
        self.lines.push(TrailLine {
            depth,
            text: text.to_string(),
        });
    }
}

/// A sink that forwards lines to the `tracing` log stream at INFO
#[derive(Debug, Default)]
pub struct LogSink;

impl TrailSink for LogSink {
    fn line(&mut self, depth: usize, text: &str) {
        tracing::info!(target: "pdfwalk::trail", "{}", indented("-", depth, text));
    }
}

/// Traversal state shared between the outer walk and nested re-walks
#[derive(Debug, Default)]
pub struct TrailState {
    armed: bool,
    aborted: bool,
}

impl TrailState {
    /// Returns true once the sentinel has been observed
    pub fn armed(&self) -> bool {
        self.armed
    }

    /// Returns true once the walk has been asked to stop
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// Asks the walk to stop; checked once per popped node
    pub fn abort(&mut self) {
        self.aborted = true;
    }
}

/// A branch the walk abandoned, with the node path that produced the error
#[derive(Debug)]
pub struct SkippedNode {
    /// Label path from the root to the abandoned node
    pub path: String,
    /// The error that caused the skip
    pub error: Error,
}

/// Outcome of a completed walk
#[derive(Debug, Default)]
pub struct WalkSummary {
    /// Nodes visited (after reference resolution)
    pub visited: usize,
    /// Trail lines emitted
    pub emitted: usize,
    /// Branches abandoned under [`ReferencePolicy::SkipBranch`]
    pub skipped: Vec<SkippedNode>,
}

/// Per-node callback deciding whether a node's children are queued.
///
/// Invoked after reference resolution and sentinel arming, before the
/// depth-bound check. Returning `false` prunes the node's subtree.
pub trait Visitor {
    /// Visits one node; the return value gates expansion
    fn visit(&mut self, node: &Node, walk: &mut Recurse<'_, '_>) -> Result<bool>;
}

/// The default visitor: expand everything, never recurse manually
#[derive(Debug, Default)]
pub struct ExpandAll;

impl Visitor for ExpandAll {
    fn visit(&mut self, _node: &Node, _walk: &mut Recurse<'_, '_>) -> Result<bool> {
        Ok(true)
    }
}

/// Handle given to visitors for interacting with the walk in progress.
///
/// [`Recurse::descend`] runs an independent nested DFS over a node's
/// children, sharing the outer walk's [`TrailState`], sink, and summary.
/// The nested walk expands unconditionally.
pub struct Recurse<'w, 'a> {
    walker: &'w Walker<'a>,
    state: &'w mut TrailState,
    sink: &'w mut dyn TrailSink,
    summary: &'w mut WalkSummary,
    path: &'w str,
}

impl Recurse<'_, '_> {
    /// Gives access to the shared traversal state (armed flag, abort)
    pub fn state(&mut self) -> &mut TrailState {
        self.state
    }

    /// Label path from the root to the node being visited
    pub fn path(&self) -> &str {
        self.path
    }

    /// Synchronously re-walks `node`'s children within the current walk.
    ///
    /// A visitor that calls this usually returns `false` afterwards, so the
    /// outer stack does not queue the same children a second time.
    pub fn descend(&mut self, node: &Node) -> Result<()> {
        let stack = node
            .children()
            .into_iter()
            .rev()
            .map(|child| {
                let path = format!("{}/{}", self.path, child.label);
                (child, path)
            })
            .collect();
        self.walker.run(
            stack,
            &mut ExpandAll,
            &mut *self.state,
            &mut *self.sink,
            &mut *self.summary,
        )
    }
}

/// The traversal engine.
///
/// A walker borrows the document model and is created per traversal run;
/// no state persists across runs. Concurrent walks need independent
/// walker values.
pub struct Walker<'a> {
    model: &'a dyn DocumentModel,
    config: WalkerConfig,
    formatter: Formatter,
}

impl<'a> Walker<'a> {
    /// Creates a walker with default configuration
    pub fn new(model: &'a dyn DocumentModel) -> Self {
        Self::with_config(model, WalkerConfig::default())
    }

    /// Creates a walker with custom configuration
    pub fn with_config(model: &'a dyn DocumentModel, config: WalkerConfig) -> Self {
        let formatter = Formatter::with_policy(config.unknown);
        Self {
            model,
            config,
            formatter,
        }
    }

    /// Returns the walker's configuration
    pub fn config(&self) -> &WalkerConfig {
        &self.config
    }

    /// Walks the graph with the default always-expand visitor
    pub fn walk(&self, root: RootSelector, sink: &mut dyn TrailSink) -> Result<WalkSummary> {
        self.walk_with(root, &mut ExpandAll, sink)
    }

    /// Walks the graph, consulting `visitor` for every node.
    ///
    /// Visitation is pre-order, left to right: the stack pops the top node,
    /// processes it, and pushes its children in reverse child order.
    pub fn walk_with(
        &self,
        root: RootSelector,
        visitor: &mut dyn Visitor,
        sink: &mut dyn TrailSink,
    ) -> Result<WalkSummary> {
        let root = root.root_node(self.model)?;
        let path = root.label.to_string();

        debug!(
            "Starting walk (sentinel: {:?}, max depth: {})",
            self.config.sentinel, self.config.max_depth
        );

        let mut state = TrailState::default();
        let mut summary = WalkSummary::default();
        self.run(
            vec![(root, path)],
            visitor,
            &mut state,
            sink,
            &mut summary,
        )?;

        debug!(
            "Walk complete: {} visited, {} emitted, {} skipped",
            summary.visited,
            summary.emitted,
            summary.skipped.len()
        );
        Ok(summary)
    }

    /// The DFS loop over an explicit stack of `(node, label path)` entries
    fn run(
        &self,
        mut stack: Vec<(Node, String)>,
        visitor: &mut dyn Visitor,
        state: &mut TrailState,
        sink: &mut dyn TrailSink,
        summary: &mut WalkSummary,
    ) -> Result<()> {
        while let Some((node, path)) = stack.pop() {
            if state.aborted {
                trace!("Walk aborted before {}", path);
                break;
            }

            let node = match self.resolve_node(node) {
                Ok(node) => node,
                Err(err) => match self.config.on_unresolved {
                    ReferencePolicy::Halt => return Err(err),
                    ReferencePolicy::SkipBranch => {
                        warn!("Skipping branch at {}: {}", path, err);
                        summary.skipped.push(SkippedNode { path, error: err });
                        continue;
                    }
                },
            };

            summary.visited += 1;

            if !state.armed && node.label.is_key(&self.config.sentinel) {
                debug!("Sentinel {:?} observed at {}", self.config.sentinel, path);
                state.armed = true;
            }

            if state.armed {
                let text = self.formatter.line(&node)?;
                sink.line(node.depth, &text);
                summary.emitted += 1;
            }

            trace!("Visited {} (depth {})", path, node.depth);

            let expand = visitor.visit(
                &node,
                &mut Recurse {
                    walker: self,
                    state: &mut *state,
                    sink: &mut *sink,
                    summary: &mut *summary,
                    path: &path,
                },
            )?;
            if !expand {
                continue;
            }

            if node.depth > self.config.max_depth {
                trace!("Depth ceiling reached at {}", path);
                continue;
            }

            // Reverse push order so children pop left to right
            for child in node.children().into_iter().rev() {
                let child_path = format!("{path}/{}", child.label);
                stack.push((child, child_path));
            }
        }

        Ok(())
    }

    /// Replaces a reference-valued node by its resolution, following chains
    /// up to the depth ceiling many hops
    fn resolve_node(&self, mut node: Node) -> Result<Node> {
        let mut hops = 0;
        while let GraphValue::Reference(reference) = node.value {
            if hops >= self.config.max_depth {
                return Err(Error::unresolved_reference(
                    reference,
                    format!("reference chain exceeded {} hops", self.config.max_depth),
                ));
            }
            trace!("Resolving {}", reference);
            let value = self.model.resolve(reference)?;
            node = node.resolved(value, reference);
            hops += 1;
        }
        Ok(node)
    }
}
