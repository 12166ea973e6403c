//! Declarative fill instructions.

use crate::value::{CheckboxValues, FillValue, TreeSelectValue};
use crate::widget::{WidgetTag, WidgetType};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One field to fill: which field, what kind of widget, which value.
///
/// Serialized as `{ label, exactLabel?, type, value }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSpec {
    /// Label of the form item
    pub label: String,
    /// Match the label verbatim instead of by substring
    #[serde(default)]
    pub exact_label: bool,
    /// Widget rendered in the form item
    #[serde(rename = "type")]
    pub widget: WidgetTag,
    /// Value to set
    pub value: FillValue,
}

impl FillSpec {
    /// Create a fill instruction
    #[must_use]
    pub fn new(label: impl Into<String>, widget: impl Into<WidgetTag>, value: impl Into<FillValue>) -> Self {
        Self {
            label: label.into(),
            exact_label: false,
            widget: widget.into(),
            value: value.into(),
        }
    }

    /// Match the label verbatim
    #[must_use]
    pub const fn exact(mut self) -> Self {
        self.exact_label = true;
        self
    }

    /// Text box
    #[must_use]
    pub fn text_input(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(label, WidgetType::TextInput, text.into())
    }

    /// Multi-line text box
    #[must_use]
    pub fn text_area(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(label, WidgetType::TextArea, text.into())
    }

    /// Date picker
    #[must_use]
    pub fn date_picker(label: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(label, WidgetType::DatePicker, date)
    }

    /// Date range picker
    #[must_use]
    pub fn date_range_picker(label: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self::new(label, WidgetType::DateRangePicker, FillValue::range(start, end))
    }

    /// Time picker
    #[must_use]
    pub fn time_picker(label: impl Into<String>, time: NaiveTime) -> Self {
        Self::new(label, WidgetType::TimePicker, time)
    }

    /// Time range picker
    #[must_use]
    pub fn time_range_picker(label: impl Into<String>, start: NaiveTime, end: NaiveTime) -> Self {
        Self::new(label, WidgetType::TimeRangePicker, FillValue::range(start, end))
    }

    /// Select
    #[must_use]
    pub fn select(label: impl Into<String>, option: impl Into<String>) -> Self {
        Self::new(label, WidgetType::Select, option.into())
    }

    /// Searchable select
    #[must_use]
    pub fn search_select(label: impl Into<String>, option: impl Into<String>) -> Self {
        Self::new(label, WidgetType::SearchSelect, option.into())
    }

    /// Cascader path, outermost label first
    #[must_use]
    pub fn cascade_select<I, S>(label: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(label, WidgetType::CascadeSelect, FillValue::path(path))
    }

    /// Single-value tree select, root-to-leaf path
    #[must_use]
    pub fn tree_select<I, S>(label: impl Into<String>, path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(label, WidgetType::TreeSelect, FillValue::path(path))
    }

    /// Multi-value tree select
    #[must_use]
    pub fn multiple_tree_select(label: impl Into<String>, nodes: Vec<TreeSelectValue>) -> Self {
        Self::new(label, WidgetType::MultipleTreeSelect, nodes)
    }

    /// Tree select with checkboxes
    #[must_use]
    pub fn checkable_tree_select(label: impl Into<String>, nodes: Vec<TreeSelectValue>) -> Self {
        Self::new(label, WidgetType::CheckableTreeSelect, nodes)
    }

    /// Radio group
    #[must_use]
    pub fn radio_group(label: impl Into<String>, option: impl Into<String>) -> Self {
        Self::new(label, WidgetType::RadioGroup, option.into())
    }

    /// Checkbox group
    #[must_use]
    pub fn checkbox_group(label: impl Into<String>, values: CheckboxValues) -> Self {
        Self::new(label, WidgetType::CheckboxGroup, values)
    }

    /// Switch
    #[must_use]
    pub fn switch(label: impl Into<String>, on: bool) -> Self {
        Self::new(label, WidgetType::Switch, on)
    }
}
