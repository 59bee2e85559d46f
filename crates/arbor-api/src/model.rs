use arbor_core::tree_view::TreeItem;
use serde::Deserialize;

/// A node in the server's tree. Identity and hierarchy are owned by
/// the server; the client never invents an id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Node {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub children: Vec<Node>,
}

/// The `tree.get` response: the (unnamed) root plus its immediate
/// children. Only the children are rendered; the root id is the parent
/// for first-level creates.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeRoot {
    pub id: i64,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl TreeItem for Node {
    fn id(&self) -> i64 {
        self.id
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn children(&self) -> &[Self] {
        &self.children
    }
}
