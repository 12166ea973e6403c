use super::FieldHandle;
use crate::classes;
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::FormResult;
use tracing::debug;

const ACCEPT_KEY: &str = "Enter";

/// Double click to clear, type, then accept
async fn type_into<D: PageDriver + ?Sized>(driver: &D, input: &Locator, text: &str) -> FormResult<()> {
    debug!(locator = %input, text, "typing into picker");
    driver.dblclick(input).await?;
    driver.fill(input, text).await?;
    driver.press(input, ACCEPT_KEY).await
}

pub(super) async fn fill<D: PageDriver + ?Sized>(field: &FieldHandle<'_, D>, text: &str) -> FormResult<()> {
    type_into(field.driver, &field.part(classes::INPUT), text).await
}

pub(super) async fn fill_range<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    (start, end): (String, String),
) -> FormResult<()> {
    let inputs = field.item.locator(classes::INPUT);
    type_into(field.driver, &inputs.nth(0), &start).await?;
    type_into(field.driver, &inputs.nth(1), &end).await
}
