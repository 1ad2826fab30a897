//! In-memory host document.
//!
//! An arena of element nodes with an id index, used to run the helpers
//! headless. Handles are cheap clones sharing the same tree, so a handle held
//! by a caller observes every later mutation, including its own removal.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::host::{Document, Element};
use crate::resolve::Target;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct NodeId(usize);

#[derive(Debug, Clone)]
enum NodeType {
    Document,
    Element(ElementData),
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    node_type: NodeType,
}

#[derive(Debug, Clone)]
struct ElementData {
    tag_name: String,
    attrs: HashMap<String, String>,
    disabled: bool,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    // Every connected element per id, in document order.
    id_index: HashMap<String, Vec<NodeId>>,
}

impl Tree {
    fn new() -> Self {
        let root = Node {
            parent: None,
            children: Vec::new(),
            node_type: NodeType::Document,
        };
        Self {
            nodes: vec![root],
            root: NodeId(0),
            id_index: HashMap::new(),
        }
    }

    fn create_node(&mut self, parent: Option<NodeId>, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent,
            children: Vec::new(),
            node_type,
        });
        if let Some(parent_id) = parent {
            self.nodes[parent_id.0].children.push(id);
        }
        id
    }

    fn create_element(
        &mut self,
        parent: Option<NodeId>,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> NodeId {
        let attrs = attrs
            .iter()
            .map(|(name, value)| (name.to_ascii_lowercase(), (*value).to_string()))
            .collect::<HashMap<_, _>>();
        let disabled = supports_disabled_attr(tag_name) && attrs.contains_key("disabled");
        let element = ElementData {
            tag_name: tag_name.to_ascii_lowercase(),
            attrs,
            disabled,
        };
        let has_id = element.attrs.get("id").is_some_and(|id| !id.is_empty());
        let id = self.create_node(parent, NodeType::Element(element));
        if has_id && parent.is_some_and(|parent_id| self.is_connected(parent_id)) {
            self.rebuild_id_index();
        }
        id
    }

    fn index_id(&mut self, node_id: NodeId) {
        if let Some(id_attr) = self
            .element(node_id)
            .and_then(|element| element.attrs.get("id"))
            .filter(|id| !id.is_empty())
            .cloned()
        {
            self.id_index.entry(id_attr).or_default().push(node_id);
        }
    }

    // First match in document order, like getElementById.
    fn by_id(&self, id: &str) -> Option<NodeId> {
        self.id_index.get(id).and_then(|nodes| nodes.first()).copied()
    }

    fn element(&self, node_id: NodeId) -> Option<&ElementData> {
        match &self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            NodeType::Document => None,
        }
    }

    fn element_mut(&mut self, node_id: NodeId) -> Option<&mut ElementData> {
        match &mut self.nodes[node_id.0].node_type {
            NodeType::Element(element) => Some(element),
            NodeType::Document => None,
        }
    }

    fn is_connected(&self, node_id: NodeId) -> bool {
        let mut cursor = Some(node_id);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            cursor = self.nodes[current.0].parent;
        }
        false
    }

    fn detach(&mut self, node_id: NodeId) {
        if let Some(parent) = self.nodes[node_id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != node_id);
        }
        self.rebuild_id_index();
    }

    fn rebuild_id_index(&mut self) {
        self.id_index.clear();
        let mut stack = vec![self.root];
        let mut ordered = Vec::new();
        while let Some(node_id) = stack.pop() {
            ordered.push(node_id);
            stack.extend(self.nodes[node_id.0].children.iter().rev().copied());
        }
        for node_id in ordered {
            self.index_id(node_id);
        }
    }

    fn class_contains(&self, node_id: NodeId, class_name: &str) -> bool {
        self.element(node_id)
            .is_some_and(|element| has_class(element, class_name))
    }

    fn class_add(&mut self, node_id: NodeId, class_name: &str) {
        let Some(element) = self.element_mut(node_id) else {
            return;
        };
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        if !classes.iter().any(|name| name == class_name) {
            classes.push(class_name.to_string());
        }
        set_class_attr(element, &classes);
    }

    fn class_remove(&mut self, node_id: NodeId, class_name: &str) {
        let Some(element) = self.element_mut(node_id) else {
            return;
        };
        let mut classes = class_tokens(element.attrs.get("class").map(String::as_str));
        classes.retain(|name| name != class_name);
        set_class_attr(element, &classes);
    }

    fn set_disabled(&mut self, node_id: NodeId, disabled: bool) -> bool {
        let Some(element) = self.element_mut(node_id) else {
            return false;
        };
        if !supports_disabled_attr(&element.tag_name) {
            return false;
        }
        element.disabled = disabled;
        if disabled {
            element.attrs.insert("disabled".to_string(), String::new());
        } else {
            element.attrs.remove("disabled");
        }
        true
    }
}

fn has_class(element: &ElementData, class_name: &str) -> bool {
    element
        .attrs
        .get("class")
        .map(|classes| classes.split_whitespace().any(|c| c == class_name))
        .unwrap_or(false)
}

fn class_tokens(class_attr: Option<&str>) -> Vec<String> {
    class_attr
        .map(|value| {
            value
                .split_whitespace()
                .map(ToOwned::to_owned)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default()
}

fn set_class_attr(element: &mut ElementData, classes: &[String]) {
    if classes.is_empty() {
        element.attrs.remove("class");
    } else {
        element.attrs.insert("class".to_string(), classes.join(" "));
    }
}

/// Elements that expose a native `disabled` attribute.
fn supports_disabled_attr(tag_name: &str) -> bool {
    ["button", "input", "select", "textarea", "fieldset", "optgroup", "option"]
        .iter()
        .any(|tag| tag_name.eq_ignore_ascii_case(tag))
}

/// A shared in-memory document.
#[derive(Clone)]
pub struct Dom {
    tree: Rc<RefCell<Tree>>,
}

impl Dom {
    pub fn new() -> Self {
        Self {
            tree: Rc::new(RefCell::new(Tree::new())),
        }
    }

    /// Appends an element to the document root and indexes its `id`.
    pub fn append_element(&self, tag_name: &str, attrs: &[(&str, &str)]) -> DomElement {
        let mut tree = self.tree.borrow_mut();
        let root = tree.root;
        let node = tree.create_element(Some(root), tag_name, attrs);
        self.handle(node)
    }

    /// Appends an element under `parent`.
    pub fn append_child(
        &self,
        parent: &DomElement,
        tag_name: &str,
        attrs: &[(&str, &str)],
    ) -> DomElement {
        let node = self
            .tree
            .borrow_mut()
            .create_element(Some(parent.node), tag_name, attrs);
        self.handle(node)
    }

    /// Creates an element outside the document. It is never found by id.
    pub fn create_detached_element(&self, tag_name: &str) -> DomElement {
        let node = self.tree.borrow_mut().create_element(None, tag_name, &[]);
        self.handle(node)
    }

    /// Detaches `element` from the document. Held handles keep working.
    pub fn remove(&self, element: &DomElement) {
        self.tree.borrow_mut().detach(element.node);
    }

    pub fn element_count(&self) -> usize {
        self.tree
            .borrow()
            .nodes
            .iter()
            .filter(|node| matches!(node.node_type, NodeType::Element(_)))
            .count()
    }

    fn handle(&self, node: NodeId) -> DomElement {
        DomElement {
            tree: Rc::clone(&self.tree),
            node,
        }
    }
}

impl Default for Dom {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dom")
            .field("elements", &self.element_count())
            .finish()
    }
}

impl Document for Dom {
    type Element = DomElement;

    fn element_by_id(&self, id: &str) -> Option<DomElement> {
        let node = self.tree.borrow().by_id(id)?;
        Some(self.handle(node))
    }
}

/// Handle to an element of a [`Dom`].
#[derive(Clone)]
pub struct DomElement {
    tree: Rc<RefCell<Tree>>,
    node: NodeId,
}

impl DomElement {
    pub fn tag_name(&self) -> String {
        self.tree
            .borrow()
            .element(self.node)
            .map(|element| element.tag_name.clone())
            .unwrap_or_default()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.tree
            .borrow()
            .element(self.node)
            .and_then(|element| element.attrs.get(name).cloned())
    }

    pub fn class_name(&self) -> String {
        self.attr("class").unwrap_or_default()
    }

    pub fn is_connected(&self) -> bool {
        self.tree.borrow().is_connected(self.node)
    }
}

impl From<DomElement> for Target<DomElement> {
    fn from(element: DomElement) -> Self {
        Self::Element(element)
    }
}

impl From<&DomElement> for Target<DomElement> {
    fn from(element: &DomElement) -> Self {
        Self::Element(element.clone())
    }
}

impl PartialEq for DomElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.tree, &other.tree) && self.node == other.node
    }
}

impl Eq for DomElement {}

impl fmt::Debug for DomElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DomElement")
            .field("tag", &self.tag_name())
            .field("id", &self.attr("id"))
            .field("class", &self.class_name())
            .finish()
    }
}

impl Element for DomElement {
    fn id(&self) -> Option<String> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    fn has_class(&self, class_name: &str) -> bool {
        self.tree.borrow().class_contains(self.node, class_name)
    }

    fn add_class(&self, class_name: &str) {
        self.tree.borrow_mut().class_add(self.node, class_name);
    }

    fn remove_class(&self, class_name: &str) {
        self.tree.borrow_mut().class_remove(self.node, class_name);
    }

    fn disabled(&self) -> Option<bool> {
        let tree = self.tree.borrow();
        let element = tree.element(self.node)?;
        supports_disabled_attr(&element.tag_name).then_some(element.disabled)
    }

    fn set_disabled(&self, disabled: bool) -> bool {
        self.tree.borrow_mut().set_disabled(self.node, disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_id_finds_first_match() {
        let dom = Dom::new();
        let first = dom.append_element("div", &[("id", "panel")]);
        dom.append_element("div", &[("id", "panel")]);
        assert_eq!(dom.element_by_id("panel"), Some(first));
        assert_eq!(dom.element_by_id("missing"), None);
    }

    #[test]
    fn lookup_by_id_follows_document_order() {
        let dom = Dom::new();
        let outer = dom.append_element("div", &[("id", "a")]);
        let later = dom.append_element("p", &[("id", "dup")]);
        let nested = dom.append_child(&outer, "span", &[("id", "dup")]);
        let other = dom.append_element("i", &[("id", "other")]);

        assert_eq!(dom.element_by_id("dup"), Some(nested.clone()));
        dom.remove(&other);
        assert_eq!(dom.element_by_id("dup"), Some(nested.clone()));

        dom.remove(&nested);
        assert_eq!(dom.element_by_id("dup"), Some(later));
    }

    #[test]
    fn class_tokens_are_deduplicated_and_removed_cleanly() {
        let dom = Dom::new();
        let el = dom.append_element("div", &[("class", "card  d-none")]);
        el.add_class("d-none");
        assert_eq!(el.class_name(), "card d-none");
        el.remove_class("d-none");
        el.remove_class("card");
        assert_eq!(el.attr("class"), None);
    }

    #[test]
    fn disabled_attribute_only_on_form_controls() {
        let dom = Dom::new();
        let button = dom.append_element("button", &[("disabled", "")]);
        let div = dom.append_element("div", &[("disabled", "")]);
        assert_eq!(button.disabled(), Some(true));
        assert_eq!(div.disabled(), None);
        assert!(button.set_disabled(false));
        assert_eq!(button.attr("disabled"), None);
        assert!(!div.set_disabled(false));
        assert_eq!(div.attr("disabled"), Some(String::new()));
    }

    #[test]
    fn removed_elements_drop_out_of_the_index() {
        let dom = Dom::new();
        let el = dom.append_element("p", &[("id", "note")]);
        dom.remove(&el);
        assert!(!el.is_connected());
        assert_eq!(dom.element_by_id("note"), None);
        el.add_class("still-works");
        assert!(el.has_class("still-works"));
    }

    #[test]
    fn detached_elements_have_no_id_and_are_not_indexed() {
        let dom = Dom::new();
        let el = dom.create_detached_element("span");
        assert_eq!(el.id(), None);
        assert!(!el.is_connected());
        assert_eq!(dom.element_count(), 1);
    }

    #[test]
    fn children_of_detached_elements_are_not_indexed() {
        let dom = Dom::new();
        let form = dom.append_element("form", &[("id", "login")]);
        let button = dom.append_child(&form, "button", &[("id", "send")]);
        assert_eq!(dom.element_by_id("send"), Some(button));

        let loose = dom.create_detached_element("div");
        dom.append_child(&loose, "span", &[("id", "orphan")]);
        assert_eq!(dom.element_by_id("orphan"), None);
    }
}
