//! Tree selection walker.
//!
//! Walks a desired selection ([`TreeSelectValue`]s) depth-first against the
//! open overlay of a tree select. Tree nodes are rendered as one flat list,
//! so a node is told apart from a same-named node elsewhere only by its
//! indentation: a node at depth `n` renders exactly `n` indent units.
//!
//! For each visited node:
//! 1. find the list row containing the name with exactly `depth` indent units
//! 2. wait for it to be rendered (children appear only after expansion)
//! 3. if `select` is set and the node is not yet selected, select it
//! 4. if it has children, expand it when collapsed, then visit each child at
//!    `depth + 1` in order

use crate::classes;
use crate::driver::{ElementState, PageDriver};
use crate::locator::Locator;
use crate::result::FormResult;
use crate::value::TreeSelectValue;
use futures::future::{BoxFuture, FutureExt};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// How a node is selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TreeSelectMode {
    /// Tick the node's checkbox
    Checkbox,
    /// Click the node's title
    Title,
}

impl TreeSelectMode {
    /// Selector of the selection control while the node is not selected
    #[must_use]
    pub const fn unselected(self) -> &'static str {
        match self {
            Self::Checkbox => classes::TREE_CHECKBOX_UNCHECKED,
            Self::Title => classes::TREE_TITLE_UNSELECTED,
        }
    }
}

/// Depth-first walker over the open tree select overlay.
#[derive(Debug)]
pub struct TreeWalker<'a, D: ?Sized> {
    driver: &'a D,
    list: Locator,
    mode: TreeSelectMode,
}

impl<'a, D: PageDriver + ?Sized> TreeWalker<'a, D> {
    /// Walk the currently open tree select overlay
    #[must_use]
    pub fn new(driver: &'a D, mode: TreeSelectMode) -> Self {
        Self {
            driver,
            list: Locator::new(classes::TREE_SELECT_DROPDOWN).locator(classes::TREE_LIST),
            mode,
        }
    }

    /// Row of the node named `name` at `depth`
    #[must_use]
    pub fn option(&self, name: &str, depth: usize) -> Locator {
        let indent = Locator::new(classes::TREE_INDENT_UNIT);
        let mut row = self.list.child(classes::TREE_NODE).has_text(name);
        if depth > 0 {
            row = row.has(&indent.nth(depth - 1));
        }
        row.has_not(&indent.nth(depth)).first()
    }

    /// Visit every root at depth 0, in order
    pub async fn walk(&self, roots: &[TreeSelectValue]) -> FormResult<()> {
        for root in roots {
            self.visit(root, 0).await?;
        }
        Ok(())
    }

    /// Visit one node and its subtree
    pub fn visit<'b>(&'b self, node: &'b TreeSelectValue, depth: usize) -> BoxFuture<'b, FormResult<()>>
    where
        'a: 'b,
    {
        async move {
            let row = self.option(&node.name, depth);
            debug!(name = %node.name, depth, "visiting tree node");
            self.driver.wait_for(&row, ElementState::Attached).await?;

            if node.select {
                let toggled = self
                    .driver
                    .click_descendant(&row, self.mode.unselected())
                    .await?;
                debug!(name = %node.name, toggled, "selecting tree node");
            }

            if !node.children.is_empty() {
                let expanded = self
                    .driver
                    .click_descendant(&row, classes::TREE_SWITCHER_CLOSED)
                    .await?;
                debug!(name = %node.name, expanded, "expanding tree node");
                for child in &node.children {
                    self.visit(child, depth + 1).await?;
                }
            }
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockPage, TreeFixtureNode as N, TreeSelectKind};
    use crate::PageDriver as _;

    async fn open(page: &MockPage, kind: TreeSelectKind, roots: &[N]) -> crate::mock::TreeSelectFixture {
        let form = page.antd_form();
        let tree = page.tree_select(form, "Tree", kind, roots);
        page.click(&Locator::new(classes::TREE_SELECT)).await.unwrap();
        tree
    }

    mod locator_tests {
        use super::*;

        #[test]
        fn test_depth_filter_is_exact() {
            let page = MockPage::new();
            let walker = TreeWalker::new(&page, TreeSelectMode::Checkbox);
            let rendered = walker.option("node-1", 2).to_string();
            assert!(rendered.contains("has=(.ant-select-tree-indent-unit >> nth=1)"));
            assert!(rendered.contains("has-not=(.ant-select-tree-indent-unit >> nth=2)"));
            let root = walker.option("node-1", 0).to_string();
            assert!(!root.contains("has=("));
            assert!(root.contains("has-not=(.ant-select-tree-indent-unit >> nth=0)"));
        }
    }

    mod walk_tests {
        use super::*;

        #[tokio::test]
        async fn test_same_name_at_other_depth_is_untouched() {
            let page = MockPage::new();
            let tree = open(
                &page,
                TreeSelectKind::Checkable,
                &[
                    N::branch("Fruit", vec![N::leaf("Apple")]),
                    N::leaf("Apple"),
                ],
            )
            .await;

            let walker = TreeWalker::new(&page, TreeSelectMode::Checkbox);
            walker
                .walk(&[TreeSelectValue::new("Fruit", false, vec![TreeSelectValue::leaf("Apple", true)])])
                .await
                .unwrap();

            let nested = tree.node("Apple", 1).unwrap().checkbox.unwrap();
            let root = tree.node("Apple", 0).unwrap().checkbox.unwrap();
            assert!(page.node_has_class(nested, "ant-select-tree-checkbox-checked"));
            assert!(!page.node_has_class(root, "ant-select-tree-checkbox-checked"));
            assert_eq!(page.clicks_on(root), 0);
        }

        #[tokio::test]
        async fn test_root_lookup_skips_nested_namesake() {
            let page = MockPage::new();
            let tree = open(
                &page,
                TreeSelectKind::Checkable,
                &[N::branch("Group", vec![N::leaf("Shared")]), N::leaf("Shared")],
            )
            .await;
            let group = tree.node("Group", 0).unwrap();
            page.click(&Locator::new(classes::TREE_SWITCHER_CLOSED)).await.unwrap();
            assert!(page.is_rendered(tree.node("Shared", 1).unwrap().node));
            assert_eq!(page.clicks_on(group.switcher), 1);

            TreeWalker::new(&page, TreeSelectMode::Checkbox)
                .walk(&[TreeSelectValue::leaf("Shared", true)])
                .await
                .unwrap();
            let root = tree.node("Shared", 0).unwrap().checkbox.unwrap();
            let nested = tree.node("Shared", 1).unwrap().checkbox.unwrap();
            assert!(page.node_has_class(root, "ant-select-tree-checkbox-checked"));
            assert!(!page.node_has_class(nested, "ant-select-tree-checkbox-checked"));
        }

        #[tokio::test]
        async fn test_already_selected_node_is_not_clicked_again() {
            let page = MockPage::new();
            let tree = open(&page, TreeSelectKind::Checkable, &[N::leaf("a")]).await;
            let walker = TreeWalker::new(&page, TreeSelectMode::Checkbox);
            let value = [TreeSelectValue::leaf("a", true)];
            walker.walk(&value).await.unwrap();
            walker.walk(&value).await.unwrap();
            let checkbox = tree.node("a", 0).unwrap().checkbox.unwrap();
            assert_eq!(page.clicks_on(checkbox), 1);
            assert!(page.node_has_class(checkbox, "ant-select-tree-checkbox-checked"));
        }

        #[tokio::test]
        async fn test_expanded_node_is_not_collapsed() {
            let page = MockPage::new();
            let tree = open(&page, TreeSelectKind::Checkable, &[N::branch("a", vec![N::leaf("b")])]).await;
            let walker = TreeWalker::new(&page, TreeSelectMode::Checkbox);
            let value = [TreeSelectValue::new("a", false, vec![TreeSelectValue::leaf("b", true)])];
            walker.walk(&value).await.unwrap();
            walker.walk(&value).await.unwrap();
            assert_eq!(page.clicks_on(tree.node("a", 0).unwrap().switcher), 1);
        }

        #[tokio::test]
        async fn test_title_mode_marks_titles() {
            let page = MockPage::new();
            let tree = open(&page, TreeSelectKind::Multiple, &[N::leaf("x"), N::leaf("y")]).await;
            TreeWalker::new(&page, TreeSelectMode::Title)
                .walk(&[TreeSelectValue::leaf("y", true)])
                .await
                .unwrap();
            assert!(page.node_has_class(tree.node("y", 0).unwrap().title, "ant-select-tree-node-selected"));
            assert!(!page.node_has_class(tree.node("x", 0).unwrap().title, "ant-select-tree-node-selected"));
        }

        #[tokio::test]
        async fn test_missing_node_times_out() {
            let page = MockPage::with_config(crate::DriverConfig::new().element_timeout(50).poll_interval(10));
            open(&page, TreeSelectKind::Checkable, &[N::leaf("a")]).await;
            let err = TreeWalker::new(&page, TreeSelectMode::Checkbox)
                .walk(&[TreeSelectValue::leaf("zzz", true)])
                .await
                .unwrap_err();
            assert!(matches!(err, crate::FormError::Timeout { .. }));
        }
    }
}
