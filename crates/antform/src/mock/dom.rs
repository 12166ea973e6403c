//! Minimal element tree used by [`MockPage`](super::MockPage).
//!
//! Supports exactly what the locator steps need: compound selectors
//! (`tag.class:not(.class)`), text content and attach/detach of subtrees.

use crate::locator::{text_contains, text_equals, Step};

/// Index of a node in the mock document
pub type NodeId = usize;

/// The document node
pub const DOCUMENT: NodeId = 0;

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) tag: String,
    pub(crate) classes: Vec<String>,
    pub(crate) text: String,
    pub(crate) value: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) attached: bool,
}

impl Node {
    pub(crate) fn new(tag: &str, classes: &[&str], text: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: classes.iter().map(|c| (*c).to_string()).collect(),
            text: text.to_string(),
            value: String::new(),
            parent: None,
            children: Vec::new(),
            attached: true,
        }
    }
}

/// A parsed compound selector
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Compound {
    tag: Option<String>,
    classes: Vec<String>,
    not_classes: Vec<String>,
}

impl Compound {
    pub(crate) fn parse(css: &str) -> Self {
        let mut compound = Self::default();
        let mut rest = css.trim();

        let tag_len = rest.find(['.', ':']).unwrap_or(rest.len());
        if tag_len > 0 {
            compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
        }
        rest = &rest[tag_len..];

        while !rest.is_empty() {
            if let Some(inner) = rest.strip_prefix(":not(.") {
                let end = inner.find(')').unwrap_or(inner.len());
                compound.not_classes.push(inner[..end].to_string());
                rest = inner.get(end + 1..).unwrap_or("");
            } else if let Some(inner) = rest.strip_prefix('.') {
                let end = inner.find(['.', ':']).unwrap_or(inner.len());
                compound.classes.push(inner[..end].to_string());
                rest = &inner[end..];
            } else {
                // Unsupported syntax: treat the remainder as a class name so it never matches silently.
                compound.classes.push(rest.to_string());
                break;
            }
        }
        compound
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = &self.tag {
            if *tag != node.tag {
                return false;
            }
        }
        self.classes.iter().all(|c| node.classes.contains(c))
            && !self.not_classes.iter().any(|c| node.classes.contains(c))
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Dom {
    nodes: Vec<Node>,
}

impl Default for Dom {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new("#document", &[], "")],
        }
    }
}

impl Dom {
    pub(crate) fn append(&mut self, parent: NodeId, mut node: Node) -> NodeId {
        let id = self.nodes.len();
        node.parent = Some(parent);
        self.nodes.push(node);
        self.nodes[parent].children.push(id);
        id
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// Attached nodes in document order, the document first
    fn preorder(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![DOCUMENT];
        while let Some(id) = stack.pop() {
            out.push(id);
            for &child in self.nodes[id].children.iter().rev() {
                if self.nodes[child].attached {
                    stack.push(child);
                }
            }
        }
        out
    }

    /// Whether the node and all of its ancestors are attached
    pub(crate) fn is_rendered(&self, id: NodeId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            if !self.nodes[current].attached {
                return false;
            }
            cursor = self.nodes[current].parent;
        }
        true
    }

    fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[id].children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if !self.nodes[current].attached {
                continue;
            }
            out.push(current);
            stack.extend(self.nodes[current].children.iter().rev().copied());
        }
        out
    }

    pub(crate) fn text_content(&self, id: NodeId) -> String {
        let mut text = self.nodes[id].text.clone();
        for child in self.descendants(id) {
            text.push_str(&self.nodes[child].text);
        }
        text
    }

    /// Resolve a step chain from the given scope
    pub(crate) fn resolve(&self, steps: &[Step], scope: Vec<NodeId>) -> Vec<NodeId> {
        let order = self.preorder();
        let mut current: Vec<NodeId> = scope
            .into_iter()
            .filter(|id| self.is_rendered(*id))
            .collect();

        for step in steps {
            current = match step {
                Step::Descendant { css } => {
                    let compound = Compound::parse(css);
                    let mut found: Vec<NodeId> = current
                        .iter()
                        .flat_map(|id| self.descendants(*id))
                        .filter(|id| compound.matches(&self.nodes[*id]))
                        .collect();
                    found.sort_by_key(|id| order.iter().position(|o| o == id));
                    found.dedup();
                    found
                }
                Step::Child { css } => {
                    let compound = Compound::parse(css);
                    current
                        .iter()
                        .flat_map(|id| self.nodes[*id].children.iter().copied())
                        .filter(|id| self.nodes[*id].attached && compound.matches(&self.nodes[*id]))
                        .collect()
                }
                Step::HasText { text } => current
                    .into_iter()
                    .filter(|id| text_contains(&self.text_content(*id), text))
                    .collect(),
                Step::ExactText { text } => current
                    .into_iter()
                    .filter(|id| {
                        text_equals(&self.text_content(*id), text)
                            || self
                                .descendants(*id)
                                .iter()
                                .any(|d| text_equals(&self.text_content(*d), text))
                    })
                    .collect(),
                Step::Has { inner } => current
                    .into_iter()
                    .filter(|id| !self.resolve(inner, vec![*id]).is_empty())
                    .collect(),
                Step::HasNot { inner } => current
                    .into_iter()
                    .filter(|id| self.resolve(inner, vec![*id]).is_empty())
                    .collect(),
                Step::Nth { index } => current.get(*index).copied().into_iter().collect(),
            };
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::Locator;

    fn el(tag: &str, classes: &[&str], text: &str) -> Node {
        Node::new(tag, classes, text)
    }

    mod compound_tests {
        use super::*;

        #[test]
        fn test_parse_tag_classes_and_negations() {
            let c = Compound::parse("form.ant-form:not(.hidden).x");
            assert_eq!(c.tag.as_deref(), Some("form"));
            assert_eq!(c.classes, vec!["ant-form".to_string(), "x".to_string()]);
            assert_eq!(c.not_classes, vec!["hidden".to_string()]);
        }

        #[test]
        fn test_negation_excludes() {
            let node = el("span", &["box", "box-checked"], "");
            assert!(Compound::parse(".box").matches(&node));
            assert!(!Compound::parse(".box:not(.box-checked)").matches(&node));
        }
    }

    mod resolve_tests {
        use super::*;

        fn sample() -> (Dom, NodeId, NodeId) {
            let mut dom = Dom::default();
            let list = dom.append(DOCUMENT, el("div", &["list"], ""));
            let a = dom.append(list, el("div", &["item"], "Alpha"));
            let b = dom.append(list, el("div", &["item"], "Beta"));
            let _ = dom.append(b, el("span", &["unit"], ""));
            (dom, a, b)
        }

        #[test]
        fn test_document_order_and_nth() {
            let (dom, a, b) = sample();
            let all = dom.resolve(Locator::new(".item").steps(), vec![DOCUMENT]);
            assert_eq!(all, vec![a, b]);
            let second = dom.resolve(Locator::new(".item").nth(1).steps(), vec![DOCUMENT]);
            assert_eq!(second, vec![b]);
        }

        #[test]
        fn test_has_and_has_not() {
            let (dom, a, b) = sample();
            let unit = Locator::new(".unit");
            assert_eq!(dom.resolve(Locator::new(".item").has(&unit).steps(), vec![DOCUMENT]), vec![b]);
            assert_eq!(dom.resolve(Locator::new(".item").has_not(&unit).steps(), vec![DOCUMENT]), vec![a]);
        }

        #[test]
        fn test_detached_subtree_is_invisible() {
            let (mut dom, a, b) = sample();
            dom.node_mut(a).attached = false;
            assert_eq!(dom.resolve(Locator::new(".item").steps(), vec![DOCUMENT]), vec![b]);
            assert!(!dom.is_rendered(a));
        }

        #[test]
        fn test_child_only_looks_one_level_down() {
            let (dom, _, _) = sample();
            assert_eq!(dom.resolve(Locator::new(".list").child(".unit").steps(), vec![DOCUMENT]).len(), 0);
            assert_eq!(dom.resolve(Locator::new(".list").child(".item").steps(), vec![DOCUMENT]).len(), 2);
        }

        #[test]
        fn test_text_filters() {
            let (dom, a, _) = sample();
            assert_eq!(dom.resolve(Locator::new(".item").has_text("alp").steps(), vec![DOCUMENT]), vec![a]);
            assert_eq!(dom.resolve(Locator::new(".list").exact_text("Alpha").steps(), vec![DOCUMENT]).len(), 1);
            assert!(dom.resolve(Locator::new(".item").exact_text("alpha").steps(), vec![DOCUMENT]).is_empty());
        }
    }
}
