//! Per-widget fill strategies and the dispatcher that picks one.
//!
//! Every strategy coerces its value first, so a value of the wrong shape is
//! rejected before the page is touched.

mod choice;
mod picker;
mod select;
mod text;
mod tree_select;

use crate::classes;
use crate::driver::PageDriver;
use crate::locator::Locator;
use crate::result::FormResult;
use crate::tree::TreeSelectMode;
use crate::value::{FillValue, TreeSelectValue};
use crate::widget::WidgetType;

/// Scope of one form item, handed to exactly one strategy call.
#[derive(Debug)]
pub(crate) struct FieldHandle<'a, D: ?Sized> {
    driver: &'a D,
    item: Locator,
    stop_on_error: bool,
}

impl<'a, D: PageDriver + ?Sized> FieldHandle<'a, D> {
    pub(crate) const fn new(driver: &'a D, item: Locator, stop_on_error: bool) -> Self {
        Self {
            driver,
            item,
            stop_on_error,
        }
    }

    /// First element matching `css` inside the form item
    fn part(&self, css: &str) -> Locator {
        self.item.locator(css).first()
    }
}

/// Run the strategy for `widget`.
pub(crate) async fn dispatch<D: PageDriver + ?Sized>(
    widget: WidgetType,
    field: &FieldHandle<'_, D>,
    value: &FillValue,
) -> FormResult<()> {
    match widget {
        WidgetType::TextInput => text::fill(field, classes::INPUT, &value.as_text(widget)?).await,
        WidgetType::TextArea => text::fill(field, classes::TEXTAREA, &value.as_text(widget)?).await,
        WidgetType::DatePicker => picker::fill(field, &value.as_date_text(widget)?).await,
        WidgetType::DateRangePicker => {
            picker::fill_range(field, value.as_pair(widget, FillValue::as_date_text)?).await
        }
        WidgetType::TimePicker => picker::fill(field, &value.as_time_text(widget)?).await,
        WidgetType::TimeRangePicker => {
            picker::fill_range(field, value.as_pair(widget, FillValue::as_time_text)?).await
        }
        WidgetType::Select => select::fill(field, &value.as_text(widget)?).await,
        WidgetType::SearchSelect => select::fill_search(field, &value.as_text(widget)?).await,
        WidgetType::CascadeSelect => select::fill_cascade(field, &value.as_path(widget)?).await,
        WidgetType::TreeSelect => {
            let path = value.as_path(widget)?;
            let chain: Vec<TreeSelectValue> = TreeSelectValue::from_path(&path).into_iter().collect();
            tree_select::fill(field, &chain, TreeSelectMode::Title).await
        }
        WidgetType::MultipleTreeSelect => {
            tree_select::fill(field, value.as_tree(widget)?, TreeSelectMode::Title).await
        }
        WidgetType::CheckableTreeSelect => {
            tree_select::fill(field, value.as_tree(widget)?, TreeSelectMode::Checkbox).await
        }
        WidgetType::RadioGroup => choice::fill_radio(field, &value.as_text(widget)?).await,
        WidgetType::CheckboxGroup => choice::fill_checkboxes(field, value.as_checks(widget)?).await,
        WidgetType::Switch => choice::fill_switch(field, value.as_bool(widget)?).await,
    }
}
