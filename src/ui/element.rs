// Element model — the subset of DOM state the controllers read and write.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, PoisonError};

/// Mutable state of one element.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub inner_html: String,
    pub value: String,
    pub placeholder: String,
    pub disabled: bool,
    /// Inline `style.display`, `None` when unset
    pub display: Option<String>,
    /// Inline `style.opacity`, `None` when unset
    pub opacity: Option<f64>,
    /// Custom validity message; empty means valid
    pub validity_message: String,
    /// False once the element has been removed from the page
    pub attached: bool,
    children: Vec<Node>,
}

/// Shared handle to an element. Clones point at the same element.
///
/// Timers run on spawned tasks, so the state sits behind a mutex. Handlers
/// never hold two locks at once.
#[derive(Debug, Clone)]
pub struct Node(Arc<Mutex<Element>>);

impl Node {
    pub fn new(tag: &str) -> Self {
        Node(Arc::new(Mutex::new(Element {
            tag: tag.to_string(),
            attached: true,
            ..Element::default()
        })))
    }

    fn with<R>(&self, f: impl FnOnce(&mut Element) -> R) -> R {
        let mut guard = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    // --- builders ---

    pub fn with_id(self, id: &str) -> Self {
        self.with(|e| e.id = Some(id.to_string()));
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_html(self, html: &str) -> Self {
        self.set_inner_html(html);
        self
    }

    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    pub fn with_child(self, child: Node) -> Self {
        self.append(child);
        self
    }

    // --- identity and tree ---

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    pub fn tag(&self) -> String {
        self.with(|e| e.tag.clone())
    }

    pub fn id(&self) -> Option<String> {
        self.with(|e| e.id.clone())
    }

    pub fn append(&self, child: Node) {
        self.with(|e| e.children.push(child));
    }

    pub fn children(&self) -> Vec<Node> {
        self.with(|e| e.children.clone())
    }

    /// All attached descendants, depth first, excluding `self`.
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        for child in self.children() {
            if !child.is_attached() {
                continue;
            }
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    /// True if `other` is this node or one of its attached descendants.
    pub fn contains(&self, other: &Node) -> bool {
        self.ptr_eq(other) || self.descendants().iter().any(|d| d.ptr_eq(other))
    }

    pub fn first_descendant(&self, pred: impl Fn(&Node) -> bool) -> Option<Node> {
        self.descendants().into_iter().find(|n| pred(n))
    }

    // --- classes and attributes ---

    pub fn has_class(&self, class: &str) -> bool {
        self.with(|e| e.classes.contains(class))
    }

    pub fn add_class(&self, class: &str) {
        self.with(|e| e.classes.insert(class.to_string()));
    }

    pub fn remove_class(&self, class: &str) {
        self.with(|e| e.classes.remove(class));
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.with(|e| e.attributes.get(name).cloned())
    }

    pub fn set_attr(&self, name: &str, value: &str) {
        self.with(|e| e.attributes.insert(name.to_string(), value.to_string()));
    }

    // --- content and form state ---

    pub fn inner_html(&self) -> String {
        self.with(|e| e.inner_html.clone())
    }

    pub fn set_inner_html(&self, html: &str) {
        self.with(|e| e.inner_html = html.to_string());
    }

    pub fn value(&self) -> String {
        self.with(|e| e.value.clone())
    }

    pub fn set_value(&self, value: &str) {
        self.with(|e| e.value = value.to_string());
    }

    pub fn placeholder(&self) -> String {
        self.with(|e| e.placeholder.clone())
    }

    pub fn set_placeholder(&self, placeholder: &str) {
        self.with(|e| e.placeholder = placeholder.to_string());
    }

    pub fn is_disabled(&self) -> bool {
        self.with(|e| e.disabled)
    }

    pub fn set_disabled(&self, disabled: bool) {
        self.with(|e| e.disabled = disabled);
    }

    /// The `type` attribute of an input (`password`, `text`, `submit`, ...).
    pub fn input_type(&self) -> Option<String> {
        self.attr("type")
    }

    pub fn set_input_type(&self, kind: &str) {
        self.set_attr("type", kind);
    }

    pub fn validity_message(&self) -> String {
        self.with(|e| e.validity_message.clone())
    }

    /// Mirrors `setCustomValidity`: an empty message marks the field valid.
    pub fn set_custom_validity(&self, message: &str) {
        self.with(|e| e.validity_message = message.to_string());
    }

    pub fn is_valid(&self) -> bool {
        self.with(|e| e.validity_message.is_empty())
    }

    // --- style and lifecycle ---

    pub fn display(&self) -> Option<String> {
        self.with(|e| e.display.clone())
    }

    pub fn set_display(&self, display: &str) {
        self.with(|e| e.display = Some(display.to_string()));
    }

    pub fn opacity(&self) -> Option<f64> {
        self.with(|e| e.opacity)
    }

    pub fn set_opacity(&self, opacity: f64) {
        self.with(|e| e.opacity = Some(opacity));
    }

    pub fn is_attached(&self) -> bool {
        self.with(|e| e.attached)
    }

    /// Detach from the page. Queries skip detached nodes and their subtrees.
    pub fn remove(&self) {
        self.with(|e| e.attached = false);
    }
}
