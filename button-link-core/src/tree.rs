use std::collections::BTreeMap;

use crate::{handle_click, ButtonLinkConfig, DomElement, Navigator};

/// Represents an html tag such as `<div>`, `<button>`, etc. before it is mounted into a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlElement {
    tag_name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<HtmlNode>,
}

impl HtmlElement {
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    /// Attributes keyed by name, iterated in name order.
    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Element(HtmlElement),
    Text(String),
}

impl HtmlNode {
    pub fn element<T>(tag_name: T) -> HtmlElementBuilder
    where
        T: Into<String>,
    {
        HtmlElementBuilder {
            tag_name: tag_name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn text<T>(text: T) -> Self
    where
        T: Into<String>,
    {
        Self::Text(text.into())
    }
}

pub struct HtmlElementBuilder {
    tag_name: String,
    attributes: BTreeMap<String, String>,
}

impl HtmlElementBuilder {
    /// set one specific attribute of the element:
    /// ```
    /// use button_link_core::tree::tag;
    ///
    /// tag::div().attr("id", "foo").build();
    /// ```
    /// builds a `<div id="foo">`
    pub fn attr<K, V>(mut self, key: K, value: V) -> Self
    where
        K: ToString,
        V: ToString,
    {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Append a class to the `class` attribute.
    pub fn class<C>(mut self, class: C) -> Self
    where
        C: AsRef<str>,
    {
        let classes = self.attributes.entry("class".to_string()).or_default();
        if !classes.is_empty() {
            classes.push(' ');
        }
        classes.push_str(class.as_ref());
        self
    }

    pub fn children(self, children: Vec<HtmlNode>) -> HtmlNode {
        HtmlNode::Element(HtmlElement {
            tag_name: self.tag_name,
            attributes: self.attributes,
            children,
        })
    }

    pub fn build(self) -> HtmlNode {
        self.children(Vec::new())
    }
}

pub mod tag {
    use super::{HtmlElementBuilder, HtmlNode};

    pub fn div() -> HtmlElementBuilder {
        HtmlNode::element("div")
    }

    pub fn span() -> HtmlElementBuilder {
        HtmlNode::element("span")
    }

    pub fn button() -> HtmlElementBuilder {
        HtmlNode::element("button")
    }

    pub fn a() -> HtmlElementBuilder {
        HtmlNode::element("a")
    }

    pub fn img() -> HtmlElementBuilder {
        HtmlNode::element("img")
    }
}

pub fn text<T>(text: T) -> HtmlNode
where
    T: Into<String>,
{
    HtmlNode::text(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag_name: String,
        attributes: BTreeMap<String, String>,
    },
    Text(String),
}

#[derive(Debug)]
struct NodeData {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    kind: NodeKind,
}

/// An arena backed `<html><body>...</body></html>` document.
#[derive(Debug)]
pub struct Document {
    nodes: Vec<NodeData>,
    body: NodeId,
}

impl Document {
    pub fn new(children: Vec<HtmlNode>) -> Self {
        let mut document = Self {
            nodes: Vec::new(),
            body: NodeId(0),
        };

        let html = document.insert(None, element_kind("html"));
        document.body = document.insert(Some(html), element_kind("body"));
        for child in children {
            document.append(document.body, child);
        }

        document
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Mount `node` and its descendants as the last child of `parent`.
    ///
    /// Panics if `parent` does not belong to this document.
    pub fn append(&mut self, parent: NodeId, node: HtmlNode) -> NodeId {
        match node {
            HtmlNode::Text(text) => self.insert(Some(parent), NodeKind::Text(text)),
            HtmlNode::Element(element) => {
                let id = self.insert(
                    Some(parent),
                    NodeKind::Element {
                        tag_name: element.tag_name,
                        attributes: element.attributes,
                    },
                );
                for child in element.children {
                    self.append(id, child);
                }
                id
            }
        }
    }

    fn insert(&mut self, parent: Option<NodeId>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            parent,
            children: Vec::new(),
            kind,
        });
        if let Some(parent) = parent {
            self.nodes[parent.0].children.push(id);
        }
        id
    }

    fn node(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.0)
    }

    /// The element with this id. Text nodes resolve to their parent element.
    /// Ids of other documents that are out of range yield `None`.
    pub fn element(&self, id: NodeId) -> Option<TreeElement<'_>> {
        let node = self.node(id)?;
        match node.kind {
            NodeKind::Element { .. } => Some(TreeElement { document: self, id }),
            NodeKind::Text(_) => node.parent.and_then(|parent| self.element(parent)),
        }
    }

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = TreeElement<'_>> + '_ {
        let mut stack = vec![self.root()];
        std::iter::from_fn(move || loop {
            let id = stack.pop()?;
            let node = self.node(id)?;
            stack.extend(node.children.iter().rev().copied());
            if let NodeKind::Element { .. } = node.kind {
                return Some(TreeElement { document: self, id });
            }
        })
    }

    pub fn element_by_id(&self, id: &str) -> Option<TreeElement<'_>> {
        self.elements()
            .find(|element| element.get_attribute("id").as_deref() == Some(id))
    }

    pub fn elements_by_class_name(&self, class: &str) -> Vec<TreeElement<'_>> {
        self.elements()
            .filter(|element| element.has_class(class))
            .collect()
    }
}

fn element_kind(tag_name: &str) -> NodeKind {
    NodeKind::Element {
        tag_name: tag_name.to_string(),
        attributes: BTreeMap::new(),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TreeElement<'a> {
    document: &'a Document,
    id: NodeId,
}

impl<'a> TreeElement<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|classes| classes.split_ascii_whitespace().any(|name| name == class))
            .unwrap_or(false)
    }

    fn data(&self) -> &'a NodeData {
        &self.document.nodes[self.id.0]
    }

    fn attributes(&self) -> &'a BTreeMap<String, String> {
        match &self.data().kind {
            NodeKind::Element { attributes, .. } => attributes,
            NodeKind::Text(_) => unreachable!("TreeElement always points at an element"),
        }
    }
}

impl DomElement for TreeElement<'_> {
    /// Upper case, the way browsers report tag names of html documents.
    fn tag_name(&self) -> String {
        match &self.data().kind {
            NodeKind::Element { tag_name, .. } => tag_name.to_ascii_uppercase(),
            NodeKind::Text(_) => unreachable!("TreeElement always points at an element"),
        }
    }

    fn parent_element(&self) -> Option<Self> {
        self.data()
            .parent
            .and_then(|parent| self.document.element(parent))
    }

    fn get_attribute(&self, name: &str) -> Option<String> {
        self.attributes().get(name).cloned()
    }
}

/// The trigger elements a click listener was attached to.
/// The set is captured once in [`Bindings::bind`]; elements appended afterwards are not covered.
#[derive(Debug, Clone)]
pub struct Bindings {
    config: ButtonLinkConfig,
    triggers: Vec<NodeId>,
}

impl Bindings {
    pub fn bind(document: &Document, config: ButtonLinkConfig) -> Self {
        let triggers: Vec<NodeId> = document
            .elements_by_class_name(config.trigger_class())
            .iter()
            .map(TreeElement::id)
            .collect();
        log::debug!(
            "bound {} .{} element(s)",
            triggers.len(),
            config.trigger_class()
        );

        Self { config, triggers }
    }

    pub fn is_bound(&self, id: NodeId) -> bool {
        self.triggers.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.triggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triggers.is_empty()
    }

    /// Dispatch a bubbling click on `target`: every bound trigger on the path from
    /// `target` to the root runs the handler once, innermost first.
    /// Returns the urls handed to the navigator.
    pub fn click<N>(&self, document: &Document, target: NodeId, navigator: &N) -> Vec<String>
    where
        N: Navigator + ?Sized,
    {
        let Some(origin) = document.element(target) else {
            return Vec::new();
        };

        let mut navigations = Vec::new();
        let mut current = Some(origin);
        while let Some(element) = current {
            if self.is_bound(element.id()) {
                navigations.extend(handle_click(origin, &self.config, navigator));
            }
            current = element.parent_element();
        }

        navigations
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::{tag::*, *};

    fn recorder() -> RefCell<Vec<String>> {
        RefCell::new(Vec::new())
    }

    fn record(visited: &RefCell<Vec<String>>) -> impl Fn(&str) + '_ {
        move |url: &str| visited.borrow_mut().push(url.to_string())
    }

    fn page() -> Document {
        Document::new(vec![
            button()
                .class("button-link")
                .attr("id", "plain")
                .attr("data-href", "/x")
                .children(vec![span().attr("id", "label").children(vec![text("Go")])]),
            button()
                .class("button-link")
                .attr("id", "deep")
                .attr("data-href", "/podcasts/3")
                .children(vec![div().children(vec![span().children(vec![img()
                    .attr("id", "icon")
                    .build()])])]),
            div()
                .class("button-link")
                .attr("id", "lonely")
                .children(vec![text("not a button")]),
            button()
                .class("button-link")
                .attr("id", "bare")
                .build(),
        ])
    }

    fn id(document: &Document, id: &str) -> NodeId {
        document.element_by_id(id).expect("element exists").id()
    }

    #[test]
    fn document_structure() {
        let document = page();
        let body = document.element(document.body()).unwrap();
        assert_eq!(body.tag_name(), "BODY");
        assert_eq!(body.parent_element().unwrap().tag_name(), "HTML");
        assert!(body.parent_element().unwrap().parent_element().is_none());
        assert_eq!(document.elements_by_class_name("button-link").len(), 4);
    }

    #[test]
    fn builder_collects_classes_and_attributes() {
        let HtmlNode::Element(element) = button()
            .class("card")
            .class("button-link")
            .attr("data-href", "/x")
            .build()
        else {
            panic!("expected an element");
        };

        assert_eq!(element.tag_name(), "button");
        assert_eq!(
            element.attributes().keys().collect::<Vec<_>>(),
            vec!["class", "data-href"]
        );
        assert_eq!(element.attributes()["class"], "card button-link");
    }

    #[test]
    fn ids_from_another_document_are_ignored() {
        let large = page();
        let small = Document::new(Vec::new());
        let bindings = Bindings::bind(&small, ButtonLinkConfig::default());
        let visited = recorder();

        let navigations = bindings.click(&small, id(&large, "icon"), &record(&visited));

        assert!(small.element(id(&large, "icon")).is_none());
        assert!(navigations.is_empty());
        assert!(visited.borrow().is_empty());
    }

    #[test]
    fn text_nodes_resolve_to_their_element() {
        let mut document = page();
        let label = id(&document, "label");
        let text = document.append(label, text("!"));
        assert_eq!(document.element(text).unwrap().id(), label);
    }

    #[test]
    fn click_on_button() {
        let document = page();
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        let navigations = bindings.click(&document, id(&document, "plain"), &record(&visited));

        assert_eq!(navigations, vec!["/x".to_string()]);
        assert_eq!(*visited.borrow(), vec!["/x".to_string()]);
    }

    #[test]
    fn click_on_nested_child() {
        let document = page();
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        bindings.click(&document, id(&document, "label"), &record(&visited));
        bindings.click(&document, id(&document, "icon"), &record(&visited));

        assert_eq!(
            *visited.borrow(),
            vec!["/x".to_string(), "/podcasts/3".to_string()]
        );
    }

    #[test]
    fn click_without_button_ancestor() {
        let document = page();
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        let navigations = bindings.click(&document, id(&document, "lonely"), &record(&visited));

        assert!(navigations.is_empty());
        assert!(visited.borrow().is_empty());
    }

    #[test]
    fn click_on_button_without_href() {
        let document = page();
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        bindings.click(&document, id(&document, "bare"), &record(&visited));

        assert_eq!(*visited.borrow(), vec![String::new()]);
    }

    #[test]
    fn unbound_elements_do_nothing() {
        let document = Document::new(vec![button()
            .attr("id", "unmarked")
            .attr("data-href", "/x")
            .build()]);
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        bindings.click(&document, id(&document, "unmarked"), &record(&visited));

        assert!(bindings.is_empty());
        assert!(visited.borrow().is_empty());
    }

    #[test]
    fn late_triggers_are_not_bound() {
        let mut document = page();
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let late = document.append(
            document.body(),
            button()
                .class("button-link")
                .attr("data-href", "/late")
                .build(),
        );
        let visited = recorder();

        bindings.click(&document, late, &record(&visited));

        assert_eq!(bindings.len(), 4);
        assert!(!bindings.is_bound(late));
        assert!(visited.borrow().is_empty());
        assert_eq!(
            Bindings::bind(&document, ButtonLinkConfig::default()).len(),
            5
        );
    }

    #[test]
    fn trigger_wrapping_a_button() {
        let document = Document::new(vec![div().class("card").class("button-link").children(
            vec![button()
                .attr("data-href", "/inside")
                .children(vec![span().attr("id", "inner").build()])],
        )]);
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        bindings.click(&document, id(&document, "inner"), &record(&visited));

        assert_eq!(*visited.borrow(), vec!["/inside".to_string()]);
    }

    #[test]
    fn nested_triggers_each_handle_the_click() {
        let document = Document::new(vec![div().class("button-link").children(vec![button()
            .class("button-link")
            .attr("data-href", "/both")
            .attr("id", "inner")
            .build()])]);
        let bindings = Bindings::bind(&document, ButtonLinkConfig::default());
        let visited = recorder();

        let navigations = bindings.click(&document, id(&document, "inner"), &record(&visited));

        assert_eq!(navigations, vec!["/both".to_string(), "/both".to_string()]);
    }

    #[test]
    fn custom_markup() {
        let config = crate::ButtonLinkConfigBuilder::default()
            .trigger_class("go")
            .button_tag("a")
            .href_attribute("data-url")
            .build()
            .unwrap();
        let document = Document::new(vec![a()
            .class("go")
            .attr("data-url", "https://example.com/")
            .children(vec![span().attr("id", "text").build()])]);
        let bindings = Bindings::bind(&document, config);
        let visited = recorder();

        bindings.click(&document, id(&document, "text"), &record(&visited));

        assert_eq!(*visited.borrow(), vec!["https://example.com/".to_string()]);
    }
}
