//! Ant Design widget fixtures for [`MockPage`].
//!
//! Each builder renders the markup of one v4 widget inside a form item and
//! registers the reactions a user would observe in the browser. Overlays are
//! appended to `<body>`, hidden until their widget is opened, exactly like the
//! portal-rendered dropdowns of the real library.

use super::{MockPage, NodeId, Reaction, Trigger};

const HIDDEN: &str = "ant-select-dropdown-hidden";

/// A rendered `.ant-form-item`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormItemFixture {
    /// The `.ant-form-item` wrapper
    pub item: NodeId,
    /// The `<label>` inside `.ant-form-item-label`
    pub label: NodeId,
    /// Container the widget is rendered into
    pub control: NodeId,
}

/// A rendered select or search select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectFixture {
    /// `.ant-select` root
    pub root: NodeId,
    /// Embedded search box
    pub search: NodeId,
    /// Committed selection text
    pub selection: NodeId,
    /// Overlay in `<body>`
    pub dropdown: NodeId,
    /// One node per option, in render order
    pub options: Vec<NodeId>,
}

/// A rendered cascader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascaderFixture {
    /// `.ant-cascader` root
    pub root: NodeId,
    /// Committed selection text
    pub selection: NodeId,
    /// Overlay in `<body>`
    pub dropdown: NodeId,
    /// Items of each menu column
    pub columns: Vec<Vec<NodeId>>,
}

/// A rendered radio group, checkbox group or switch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceFixture {
    /// Group root (or the switch itself)
    pub root: NodeId,
    /// Option wrappers, in render order
    pub options: Vec<NodeId>,
}

/// Selection behaviour of a tree select
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeSelectKind {
    /// Single value; clicking a title commits it and closes the overlay
    Single,
    /// Several values selected by clicking titles
    Multiple,
    /// Nodes carry checkboxes
    Checkable,
}

/// Shape of a tree to render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeFixtureNode {
    /// Title
    pub name: String,
    /// Nested nodes
    pub children: Vec<TreeFixtureNode>,
}

impl TreeFixtureNode {
    /// A node without children
    #[must_use]
    pub fn leaf(name: &str) -> Self {
        Self {
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    /// A node with children
    #[must_use]
    pub fn branch(name: &str, children: Vec<Self>) -> Self {
        Self {
            name: name.to_string(),
            children,
        }
    }
}

/// One rendered `.ant-select-tree-treenode`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNodeHandle {
    /// Title
    pub name: String,
    /// Nesting depth
    pub depth: usize,
    /// The tree node row
    pub node: NodeId,
    /// Expand/collapse switcher
    pub switcher: NodeId,
    /// Checkbox, for checkable trees
    pub checkbox: Option<NodeId>,
    /// Title wrapper
    pub title: NodeId,
}

/// A rendered tree select
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeSelectFixture {
    /// `.ant-tree-select` root
    pub root: NodeId,
    /// Committed selection text
    pub selection: NodeId,
    /// Overlay in `<body>`
    pub dropdown: NodeId,
    /// Every tree node in preorder
    pub nodes: Vec<TreeNodeHandle>,
}

impl TreeSelectFixture {
    /// Find a node by title and depth
    #[must_use]
    pub fn node(&self, name: &str, depth: usize) -> Option<&TreeNodeHandle> {
        self.nodes.iter().find(|n| n.name == name && n.depth == depth)
    }
}

impl MockPage {
    /// Render `<form class="ant-form">` in the body
    pub fn antd_form(&self) -> NodeId {
        self.element(self.body(), "form", &["ant-form", "ant-form-horizontal"], "")
    }

    /// Render a labelled form item
    pub fn form_item(&self, form: NodeId, label: &str) -> FormItemFixture {
        let item = self.element(form, "div", &["ant-form-item"], "");
        let label_col = self.element(item, "div", &["ant-form-item-label"], "");
        let label = self.element(label_col, "label", &[], label);
        let control = self.element(item, "div", &["ant-form-item-control"], "");
        let control = self.element(control, "div", &["ant-form-item-control-input"], "");
        FormItemFixture {
            item,
            label,
            control,
        }
    }

    /// Render a text input; returns the `<input>`
    pub fn text_input(&self, form: NodeId, label: &str) -> NodeId {
        let item = self.form_item(form, label);
        self.element(item.control, "input", &["ant-input"], "")
    }

    /// Render a text area; returns the `<textarea>`
    pub fn textarea(&self, form: NodeId, label: &str) -> NodeId {
        let item = self.form_item(form, label);
        self.element(item.control, "textarea", &["ant-input"], "")
    }

    /// Render a date or time picker; returns the `<input>`
    pub fn picker(&self, form: NodeId, label: &str) -> NodeId {
        let item = self.form_item(form, label);
        let picker = self.element(item.control, "div", &["ant-picker"], "");
        let wrap = self.element(picker, "div", &["ant-picker-input"], "");
        self.element(wrap, "input", &[], "")
    }

    /// Render a range picker; returns both `<input>`s
    pub fn range_picker(&self, form: NodeId, label: &str) -> (NodeId, NodeId) {
        let item = self.form_item(form, label);
        let picker = self.element(item.control, "div", &["ant-picker", "ant-picker-range"], "");
        let start = self.element(picker, "div", &["ant-picker-input"], "");
        let start = self.element(start, "input", &[], "");
        self.element(picker, "div", &["ant-picker-range-separator"], "");
        let end = self.element(picker, "div", &["ant-picker-input"], "");
        let end = self.element(end, "input", &[], "");
        (start, end)
    }

    /// Render a select. With `loading_ticks` the root carries the loading
    /// marker until that many clock ticks have passed.
    pub fn select(
        &self,
        form: NodeId,
        label: &str,
        options: &[&str],
        loading_ticks: Option<u64>,
    ) -> SelectFixture {
        let item = self.form_item(form, label);
        let root = self.element(item.control, "div", &["ant-select", "ant-select-single"], "");
        let selector = self.element(root, "div", &["ant-select-selector"], "");
        let search_wrap = self.element(selector, "span", &["ant-select-selection-search"], "");
        let search = self.element(search_wrap, "input", &["ant-select-selection-search-input"], "");
        let selection = self.element(selector, "span", &["ant-select-selection-item"], "");

        let dropdown = self.element(self.body(), "div", &["ant-select-dropdown", HIDDEN], "");
        let holder = self.element(dropdown, "div", &["rc-virtual-list-holder-inner"], "");
        let options: Vec<NodeId> = options
            .iter()
            .map(|text| {
                let option = self.element(holder, "div", &["ant-select-item", "ant-select-item-option"], "");
                self.element(option, "div", &["ant-select-item-option-content"], text);
                option
            })
            .collect();

        let open = || Reaction::RemoveClass {
            node: dropdown,
            class: HIDDEN.to_string(),
        };
        self.on(root, Trigger::Click, open());
        self.on(search, Trigger::Fill, open());
        for option in &options {
            self.on(*option, Trigger::Click, Reaction::SetText {
                node: selection,
                text: self.text(*option),
            });
            self.on(*option, Trigger::Click, Reaction::AddClass {
                node: *option,
                class: "ant-select-item-option-selected".to_string(),
            });
            self.on(*option, Trigger::Click, Reaction::AddClass {
                node: dropdown,
                class: HIDDEN.to_string(),
            });
        }

        if let Some(ticks) = loading_ticks {
            self.apply(&Reaction::AddClass {
                node: root,
                class: "ant-select-loading".to_string(),
            });
            self.schedule(ticks, Reaction::RemoveClass {
                node: root,
                class: "ant-select-loading".to_string(),
            });
        }

        SelectFixture {
            root,
            search,
            selection,
            dropdown,
            options,
        }
    }

    /// Render a cascader whose column `i + 1` appears once an item of column `i` is clicked
    pub fn cascader(&self, form: NodeId, label: &str, columns: &[&[&str]]) -> CascaderFixture {
        let item = self.form_item(form, label);
        let root = self.element(item.control, "div", &["ant-select", "ant-cascader"], "");
        let selector = self.element(root, "div", &["ant-select-selector"], "");
        let selection = self.element(selector, "span", &["ant-select-selection-item"], "");

        let dropdown = self.element(
            self.body(),
            "div",
            &["ant-select-dropdown", "ant-cascader-dropdown", HIDDEN],
            "",
        );
        let menus_wrap = self.element(dropdown, "div", &["ant-cascader-menus"], "");
        let mut menus = Vec::new();
        let mut items = Vec::new();
        for (depth, column) in columns.iter().enumerate() {
            let menu = self.element(menus_wrap, "ul", &["ant-cascader-menu"], "");
            if depth > 0 {
                self.apply(&Reaction::Detach(menu));
            }
            let column_items: Vec<NodeId> = column
                .iter()
                .map(|text| {
                    let li = self.element(menu, "li", &["ant-cascader-menu-item"], "");
                    self.element(li, "div", &["ant-cascader-menu-item-content"], text);
                    li
                })
                .collect();
            menus.push(menu);
            items.push(column_items);
        }

        self.on(root, Trigger::Click, Reaction::RemoveClass {
            node: dropdown,
            class: HIDDEN.to_string(),
        });
        for (depth, column) in items.iter().enumerate() {
            for item in column {
                self.on(*item, Trigger::Click, Reaction::AddClass {
                    node: *item,
                    class: "ant-cascader-menu-item-active".to_string(),
                });
                if let Some(next) = menus.get(depth + 1) {
                    self.on(*item, Trigger::Click, Reaction::Attach(*next));
                } else {
                    self.on(*item, Trigger::Click, Reaction::SetText {
                        node: selection,
                        text: self.text(*item),
                    });
                    self.on(*item, Trigger::Click, Reaction::AddClass {
                        node: dropdown,
                        class: HIDDEN.to_string(),
                    });
                }
            }
        }

        CascaderFixture {
            root,
            selection,
            dropdown,
            columns: items,
        }
    }

    /// Render a tree select. Only root nodes are rendered until their
    /// ancestors are expanded through the switcher.
    pub fn tree_select(
        &self,
        form: NodeId,
        label: &str,
        kind: TreeSelectKind,
        roots: &[TreeFixtureNode],
    ) -> TreeSelectFixture {
        let item = self.form_item(form, label);
        let mut root_classes = vec!["ant-select", "ant-tree-select"];
        if kind != TreeSelectKind::Single {
            root_classes.push("ant-select-multiple");
        }
        let root = self.element(item.control, "div", &root_classes, "");
        let selector = self.element(root, "div", &["ant-select-selector"], "");
        let selection = self.element(selector, "span", &["ant-select-selection-item"], "");

        let dropdown = self.element(
            self.body(),
            "div",
            &["ant-select-dropdown", "ant-tree-select-dropdown", HIDDEN],
            "",
        );
        let tree = self.element(dropdown, "div", &["ant-select-tree"], "");
        let list = self.element(tree, "div", &["ant-select-tree-list"], "");
        let holder = self.element(list, "div", &["ant-select-tree-list-holder"], "");
        let inner = self.element(holder, "div", &["ant-select-tree-list-holder-inner"], "");

        let mut nodes = Vec::new();
        for node in roots {
            self.render_tree_node(inner, node, 0, kind, &mut nodes);
        }

        self.on(root, Trigger::Click, Reaction::RemoveClass {
            node: dropdown,
            class: HIDDEN.to_string(),
        });
        self.on(self.body(), Trigger::Click, Reaction::AddClass {
            node: dropdown,
            class: HIDDEN.to_string(),
        });
        for handle in &nodes {
            match kind {
                TreeSelectKind::Checkable => {
                    if let Some(checkbox) = handle.checkbox {
                        self.on(checkbox, Trigger::Click, Reaction::AddClass {
                            node: checkbox,
                            class: "ant-select-tree-checkbox-checked".to_string(),
                        });
                    }
                }
                TreeSelectKind::Multiple => {
                    self.on(handle.title, Trigger::Click, Reaction::AddClass {
                        node: handle.title,
                        class: "ant-select-tree-node-selected".to_string(),
                    });
                }
                TreeSelectKind::Single => {
                    for other in &nodes {
                        self.on(handle.title, Trigger::Click, Reaction::RemoveClass {
                            node: other.title,
                            class: "ant-select-tree-node-selected".to_string(),
                        });
                    }
                    self.on(handle.title, Trigger::Click, Reaction::AddClass {
                        node: handle.title,
                        class: "ant-select-tree-node-selected".to_string(),
                    });
                    self.on(handle.title, Trigger::Click, Reaction::SetText {
                        node: selection,
                        text: handle.name.clone(),
                    });
                    self.on(handle.title, Trigger::Click, Reaction::AddClass {
                        node: dropdown,
                        class: HIDDEN.to_string(),
                    });
                }
            }
        }

        TreeSelectFixture {
            root,
            selection,
            dropdown,
            nodes,
        }
    }

    fn render_tree_node(
        &self,
        list: NodeId,
        spec: &TreeFixtureNode,
        depth: usize,
        kind: TreeSelectKind,
        out: &mut Vec<TreeNodeHandle>,
    ) -> NodeId {
        let node = self.element(list, "div", &["ant-select-tree-treenode"], "");
        let indent = self.element(node, "span", &["ant-select-tree-indent"], "");
        for _ in 0..depth {
            self.element(indent, "span", &["ant-select-tree-indent-unit"], "");
        }
        let switcher_state = if spec.children.is_empty() {
            "ant-select-tree-switcher-noop"
        } else {
            "ant-select-tree-switcher_close"
        };
        let switcher = self.element(node, "span", &["ant-select-tree-switcher", switcher_state], "");
        let checkbox = (kind == TreeSelectKind::Checkable).then(|| {
            let checkbox = self.element(node, "span", &["ant-select-tree-checkbox"], "");
            self.element(checkbox, "span", &["ant-select-tree-checkbox-inner"], "");
            checkbox
        });
        let title = self.element(node, "span", &["ant-select-tree-node-content-wrapper"], "");
        self.element(title, "span", &["ant-select-tree-title"], &spec.name);

        out.push(TreeNodeHandle {
            name: spec.name.clone(),
            depth,
            node,
            switcher,
            checkbox,
            title,
        });

        if !spec.children.is_empty() {
            self.on(switcher, Trigger::Click, Reaction::RemoveClass {
                node: switcher,
                class: "ant-select-tree-switcher_close".to_string(),
            });
            self.on(switcher, Trigger::Click, Reaction::AddClass {
                node: switcher,
                class: "ant-select-tree-switcher_open".to_string(),
            });
            for child in &spec.children {
                let child_node = self.render_tree_node(list, child, depth + 1, kind, out);
                // Collapsed: only direct children are revealed by the switcher.
                self.apply(&Reaction::Detach(child_node));
                self.on(switcher, Trigger::Click, Reaction::Attach(child_node));
            }
        }
        node
    }

    /// Render a radio group, button style or plain
    pub fn radio_group(&self, form: NodeId, label: &str, options: &[&str], buttons: bool) -> ChoiceFixture {
        let item = self.form_item(form, label);
        let root = self.element(item.control, "div", &["ant-radio-group", "ant-radio-group-outline"], "");
        let (wrapper, checked) = if buttons {
            ("ant-radio-button-wrapper", "ant-radio-button-wrapper-checked")
        } else {
            ("ant-radio-wrapper", "ant-radio-wrapper-checked")
        };
        let options: Vec<NodeId> = options
            .iter()
            .map(|text| {
                let label = self.element(root, "label", &[wrapper], "");
                self.element(label, "span", &[if buttons { "ant-radio-button" } else { "ant-radio" }], "");
                self.element(label, "span", &[], text);
                label
            })
            .collect();
        for option in &options {
            for other in &options {
                self.on(*option, Trigger::Click, Reaction::RemoveClass {
                    node: *other,
                    class: checked.to_string(),
                });
            }
            self.on(*option, Trigger::Click, Reaction::AddClass {
                node: *option,
                class: checked.to_string(),
            });
        }
        ChoiceFixture { root, options }
    }

    /// Render a checkbox group with some options pre-checked
    pub fn checkbox_group(
        &self,
        form: NodeId,
        label: &str,
        options: &[&str],
        checked: &[&str],
    ) -> ChoiceFixture {
        let item = self.form_item(form, label);
        let root = self.element(item.control, "div", &["ant-checkbox-group"], "");
        let options: Vec<NodeId> = options
            .iter()
            .map(|text| {
                let label = self.element(root, "label", &["ant-checkbox-wrapper"], "");
                self.element(label, "span", &["ant-checkbox"], "");
                self.element(label, "span", &[], text);
                if checked.contains(text) {
                    self.apply(&Reaction::AddClass {
                        node: label,
                        class: "ant-checkbox-wrapper-checked".to_string(),
                    });
                }
                self.on(label, Trigger::Click, Reaction::ToggleClass {
                    node: label,
                    class: "ant-checkbox-wrapper-checked".to_string(),
                });
                label
            })
            .collect();
        ChoiceFixture { root, options }
    }

    /// Render a switch; returns its `<button>`
    pub fn switch(&self, form: NodeId, label: &str, checked: bool) -> NodeId {
        let item = self.form_item(form, label);
        let button = self.element(item.control, "button", &["ant-switch"], "");
        if checked {
            self.apply(&Reaction::AddClass {
                node: button,
                class: "ant-switch-checked".to_string(),
            });
        }
        self.on(button, Trigger::Click, Reaction::ToggleClass {
            node: button,
            class: "ant-switch-checked".to_string(),
        });
        button
    }
}
