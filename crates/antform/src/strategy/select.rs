use super::FieldHandle;
use crate::classes;
use crate::driver::{ElementState, PageDriver};
use crate::locator::Locator;
use crate::result::FormResult;
use tracing::debug;

/// Option of the open select overlay whose text contains `text`
fn overlay_option(text: &str) -> Locator {
    Locator::new(classes::SELECT_DROPDOWN)
        .locator(classes::SELECT_OPTION)
        .has_text(text)
        .first()
}

pub(super) async fn fill<D: PageDriver + ?Sized>(field: &FieldHandle<'_, D>, option: &str) -> FormResult<()> {
    let select = field.part(classes::SELECT);
    if field
        .driver
        .has_class(&select, classes::SELECT_LOADING_CLASS)
        .await?
    {
        debug!(locator = %select, "waiting for options to load");
        let loading = field.item.locator(classes::SELECT_LOADING);
        field.driver.wait_for(&loading, ElementState::Detached).await?;
    }
    field.driver.click(&select).await?;
    field.driver.click(&overlay_option(option)).await
}

pub(super) async fn fill_search<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    option: &str,
) -> FormResult<()> {
    let search = field.part(classes::SELECT_SEARCH_INPUT);
    field.driver.fill(&search, option).await?;
    field.driver.click(&overlay_option(option)).await
}

pub(super) async fn fill_cascade<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    path: &[String],
) -> FormResult<()> {
    field.driver.click(&field.part(classes::CASCADER)).await?;
    let menus = Locator::new(classes::CASCADER_DROPDOWN).locator(classes::CASCADER_MENU);
    for (column, label) in path.iter().enumerate() {
        debug!(column, label = %label, "picking cascader item");
        let item = menus
            .nth(column)
            .locator(classes::CASCADER_MENU_ITEM)
            .has_text(label.as_str())
            .first();
        field.driver.click(&item).await?;
    }
    Ok(())
}
