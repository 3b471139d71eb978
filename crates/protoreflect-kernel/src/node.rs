//! Base reflected node: identity plus free-form options.
//!
//! Every node of a reflection tree (namespaces, messages, enums, services)
//! carries a name and an optional bag of options. The namespace that owns a
//! node enforces name uniqueness; the node itself only stores the name.
//!
//! Options are opaque here. Their keys and values are interpreted by the
//! collaborators that read them (code generators, validators), never by the
//! node.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Free-form node options, keyed by option name.
///
/// Backed by `serde_json::Map` with insertion order preserved, so options
/// read from a schema come back out in the order they were written.
pub type Options = serde_json::Map<String, Value>;

/// The named, optioned data every reflected node is built from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    options: Option<Options>,
}

impl SchemaNode {
    /// Create a node. Absent options stay absent until the first `set_option`.
    pub fn new(name: impl Into<String>, options: Option<Options>) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn options(&self) -> Option<&Options> {
        self.options.as_ref()
    }

    /// Look up a single option by key.
    pub fn get_option(&self, key: &str) -> Option<&Value> {
        self.options.as_ref().and_then(|options| options.get(key))
    }

    /// Set a single option, creating the options map on first write.
    ///
    /// Returns the previous value for `key`, if any.
    pub fn set_option(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.options
            .get_or_insert_with(Options::new)
            .insert(key.into(), value)
    }
}

impl std::fmt::Display for SchemaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The shared "named, optioned" capability of reflected nodes.
///
/// A namespace holds its children as `dyn ReflectionNode` and only ever
/// needs identity and options from them. Node kinds compose a
/// [`SchemaNode`] and expose it through [`ReflectionNode::node`]; the
/// remaining methods are derived from it.
pub trait ReflectionNode: Send + Sync {
    /// The base node this value is composed with.
    fn node(&self) -> &SchemaNode;

    /// The node's name within its owning namespace.
    fn name(&self) -> &str {
        self.node().name()
    }

    /// The node's options, if any were given.
    fn options(&self) -> Option<&Options> {
        self.node().options()
    }
}

impl ReflectionNode for SchemaNode {
    fn node(&self) -> &SchemaNode {
        self
    }
}
