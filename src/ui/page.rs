// Page — the root set of nodes controllers are bound against.

use super::element::Node;

/// A document: one or more root nodes plus lookup helpers.
#[derive(Debug, Clone, Default)]
pub struct Page {
    roots: Vec<Node>,
}

impl Page {
    pub fn new(roots: Vec<Node>) -> Self {
        Self { roots }
    }

    pub fn push(&mut self, root: Node) {
        self.roots.push(root);
    }

    /// Every attached node in document order.
    pub fn all(&self) -> Vec<Node> {
        let mut out = Vec::new();
        for root in self.roots.iter().filter(|r| r.is_attached()) {
            out.push(root.clone());
            out.extend(root.descendants());
        }
        out
    }

    pub fn by_id(&self, id: &str) -> Option<Node> {
        self.all()
            .into_iter()
            .find(|n| n.id().as_deref() == Some(id))
    }

    pub fn by_class(&self, class: &str) -> Vec<Node> {
        self.all()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    /// Descendant query: nodes matching `pred` inside any `.ancestor_class`.
    pub fn within_class(&self, ancestor_class: &str, pred: impl Fn(&Node) -> bool) -> Vec<Node> {
        let mut out: Vec<Node> = Vec::new();
        for ancestor in self.by_class(ancestor_class) {
            for node in ancestor.descendants() {
                if pred(&node) && !out.iter().any(|seen| seen.ptr_eq(&node)) {
                    out.push(node);
                }
            }
        }
        out
    }

    /// True if `node` is attached somewhere in this page.
    pub fn contains(&self, node: &Node) -> bool {
        self.all().iter().any(|n| n.ptr_eq(node))
    }
}
