//! Widget type tags.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of widgets the form helper knows how to fill.
///
/// Serialized with the names used by declarative fill files
/// (`"TextInput"`, `"CheckableTreeSelect"`, ...). `"InputText"` is accepted
/// as an alias of [`WidgetType::TextInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WidgetType {
    /// Single-line text box
    #[serde(alias = "InputText")]
    TextInput,
    /// Multi-line text box
    TextArea,
    /// Date picker
    DatePicker,
    /// Date range picker
    DateRangePicker,
    /// Time picker
    TimePicker,
    /// Time range picker
    TimeRangePicker,
    /// Select with a fixed option list
    Select,
    /// Select with an embedded search box
    SearchSelect,
    /// Cascader
    CascadeSelect,
    /// Single-value tree select
    TreeSelect,
    /// Multi-value tree select, selected by title
    MultipleTreeSelect,
    /// Tree select with checkboxes
    CheckableTreeSelect,
    /// Radio group, button or plain style
    RadioGroup,
    /// Checkbox group
    CheckboxGroup,
    /// Switch
    Switch,
}

impl WidgetType {
    /// Every widget type, in declaration order
    pub const ALL: [Self; 15] = [
        Self::TextInput,
        Self::TextArea,
        Self::DatePicker,
        Self::DateRangePicker,
        Self::TimePicker,
        Self::TimeRangePicker,
        Self::Select,
        Self::SearchSelect,
        Self::CascadeSelect,
        Self::TreeSelect,
        Self::MultipleTreeSelect,
        Self::CheckableTreeSelect,
        Self::RadioGroup,
        Self::CheckboxGroup,
        Self::Switch,
    ];

    /// Serialized name
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TextInput => "TextInput",
            Self::TextArea => "TextArea",
            Self::DatePicker => "DatePicker",
            Self::DateRangePicker => "DateRangePicker",
            Self::TimePicker => "TimePicker",
            Self::TimeRangePicker => "TimeRangePicker",
            Self::Select => "Select",
            Self::SearchSelect => "SearchSelect",
            Self::CascadeSelect => "CascadeSelect",
            Self::TreeSelect => "TreeSelect",
            Self::MultipleTreeSelect => "MultipleTreeSelect",
            Self::CheckableTreeSelect => "CheckableTreeSelect",
            Self::RadioGroup => "RadioGroup",
            Self::CheckboxGroup => "CheckboxGroup",
            Self::Switch => "Switch",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A widget tag as written by the caller.
///
/// Unknown tags deserialize into [`WidgetTag::Other`] so a single bad entry
/// does not reject a whole fill file; the dispatcher refuses them when the
/// entry is filled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WidgetTag {
    /// A supported widget
    Known(WidgetType),
    /// Anything else
    Other(String),
}

impl WidgetTag {
    /// The supported widget, if any
    #[must_use]
    pub const fn known(&self) -> Option<WidgetType> {
        match self {
            Self::Known(widget) => Some(*widget),
            Self::Other(_) => None,
        }
    }
}

impl From<WidgetType> for WidgetTag {
    fn from(widget: WidgetType) -> Self {
        Self::Known(widget)
    }
}

impl fmt::Display for WidgetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(widget) => write!(f, "{widget}"),
            Self::Other(tag) => f.write_str(tag),
        }
    }
}
