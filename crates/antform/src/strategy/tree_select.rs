use super::FieldHandle;
use crate::classes;
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::FormResult;
use crate::tree::{TreeSelectMode, TreeWalker};
use crate::value::TreeSelectValue;

/// Open the overlay, walk the selection, then click outside to close it.
pub(super) async fn fill<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    nodes: &[TreeSelectValue],
    mode: TreeSelectMode,
) -> FormResult<()> {
    field.driver.click(&field.part(classes::TREE_SELECT)).await?;
    TreeWalker::new(field.driver, mode).walk(nodes).await?;
    field.driver.click_at(&Locator::new(classes::BODY), 0.0, 0.0).await
}
