//! Fill values and their per-widget coercions.
//!
//! A [`FillValue`] is dynamic: the same enum carries text, dates, pairs,
//! label-to-boolean mappings and trees. Each fill strategy coerces it to the
//! shape it needs through one of the `as_*` methods, which fail with
//! [`FormError::InvalidValue`] before anything on the page is touched.

use crate::result::{FormError, FormResult};
use crate::widget::WidgetType;
use chrono::{NaiveDate, NaiveTime};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Date format typed into date pickers
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Time format typed into time pickers
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// A node of the desired selection in a tree select.
///
/// Depth in this tree must mirror the indentation depth of the rendered
/// widget; it is what tells two same-named nodes apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeSelectValue {
    /// Visible title of the node
    pub name: String,
    /// Whether the node itself should end up selected
    #[serde(default)]
    pub select: bool,
    /// Nodes to visit below this one
    #[serde(default)]
    pub children: Vec<TreeSelectValue>,
}

impl TreeSelectValue {
    /// Create a node
    #[must_use]
    pub fn new(name: impl Into<String>, select: bool, children: Vec<Self>) -> Self {
        Self {
            name: name.into(),
            select,
            children,
        }
    }

    /// Create a node without children
    #[must_use]
    pub fn leaf(name: impl Into<String>, select: bool) -> Self {
        Self::new(name, select, Vec::new())
    }

    /// Turn a root-to-leaf path into a chain that selects only the leaf.
    /// Returns `None` for an empty path.
    #[must_use]
    pub fn from_path<S: AsRef<str>>(path: &[S]) -> Option<Self> {
        let (leaf, ancestors) = path.split_last()?;
        let mut node = Self::leaf(leaf.as_ref(), true);
        for name in ancestors.iter().rev() {
            node = Self::new(name.as_ref(), false, vec![node]);
        }
        Some(node)
    }

    /// Number of nodes in this subtree
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Self::node_count).sum::<usize>()
    }
}

/// Desired checked state per checkbox label, in the caller's order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckboxValues(Vec<(String, bool)>);

impl CheckboxValues {
    /// Create an empty mapping
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, keeping the position of an existing label
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, checked: bool) -> Self {
        self.insert(label, checked);
        self
    }

    /// Add or replace an entry, keeping the position of an existing label
    pub fn insert(&mut self, label: impl Into<String>, checked: bool) {
        let label = label.into();
        if let Some(entry) = self.0.iter_mut().find(|(l, _)| *l == label) {
            entry.1 = checked;
        } else {
            self.0.push((label, checked));
        }
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(l, c)| (l.as_str(), *c))
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, bool)> for CheckboxValues {
    fn from_iter<I: IntoIterator<Item = (S, bool)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (label, checked) in iter {
            values.insert(label, checked);
        }
        values
    }
}

impl Serialize for CheckboxValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, checked) in &self.0 {
            map.serialize_entry(label, checked)?;
        }
        map.end()
    }
}

struct CheckboxValuesVisitor;

impl<'de> Visitor<'de> for CheckboxValuesVisitor {
    type Value = CheckboxValues;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of checkbox label to boolean")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut values = CheckboxValues::new();
        while let Some((label, checked)) = access.next_entry::<String, bool>()? {
            values.insert(label, checked);
        }
        Ok(values)
    }
}

impl<'de> Deserialize<'de> for CheckboxValues {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CheckboxValuesVisitor)
    }
}

/// The value of one field.
///
/// Deserialization is untagged: `true`, `12`, `"text"`, `["a", "b"]`,
/// `[{name, select, children}]` and `{label: bool}` map to the matching
/// variant. Date, time and range variants come from the Rust constructors;
/// in files they are written as strings and pairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FillValue {
    /// Switch state
    Bool(bool),
    /// Number typed as text, digits kept as written
    Number(serde_json::Number),
    /// Text, option label or preformatted date/time
    Text(String),
    /// Ordered labels: a cascader path, tree path or range pair
    List(Vec<String>),
    /// Desired tree selection
    Tree(Vec<TreeSelectValue>),
    /// Desired checkbox states
    Checks(CheckboxValues),
    /// Calendar date
    Date(NaiveDate),
    /// Wall clock time
    Time(NaiveTime),
    /// Start and end of a range
    Range(Box<FillValue>, Box<FillValue>),
}

impl FillValue {
    /// A range from two values
    #[must_use]
    pub fn range(start: impl Into<Self>, end: impl Into<Self>) -> Self {
        Self::Range(Box::new(start.into()), Box::new(end.into()))
    }

    /// An ordered list of labels
    #[must_use]
    pub fn path<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(labels.into_iter().map(Into::into).collect())
    }

    /// Plain text
    pub fn as_text(&self, widget: WidgetType) -> FormResult<String> {
        match self {
            Self::Text(text) => Ok(text.clone()),
            Self::Number(n) => Ok(n.to_string()),
            _ => Err(FormError::invalid_value(widget, "a string")),
        }
    }

    /// Date formatted as `YYYY-MM-DD`; strings pass through untouched
    pub fn as_date_text(&self, widget: WidgetType) -> FormResult<String> {
        match self {
            Self::Date(date) => Ok(date.format(DATE_FORMAT).to_string()),
            Self::Text(text) => Ok(text.clone()),
            _ => Err(FormError::invalid_value(widget, "a date or a string")),
        }
    }

    /// Time formatted as `HH:mm:ss`; strings pass through untouched
    pub fn as_time_text(&self, widget: WidgetType) -> FormResult<String> {
        match self {
            Self::Time(time) => Ok(time.format(TIME_FORMAT).to_string()),
            Self::Text(text) => Ok(text.clone()),
            _ => Err(FormError::invalid_value(widget, "a time or a string")),
        }
    }

    /// Two values coerced with `each`
    pub fn as_pair<F>(&self, widget: WidgetType, each: F) -> FormResult<(String, String)>
    where
        F: Fn(&Self, WidgetType) -> FormResult<String>,
    {
        match self {
            Self::Range(start, end) => Ok((each(start, widget)?, each(end, widget)?)),
            Self::List(items) if items.len() == 2 => Ok((items[0].clone(), items[1].clone())),
            _ => Err(FormError::invalid_value(widget, "a pair of values")),
        }
    }

    /// Ordered labels; a single string is a one-step path
    pub fn as_path(&self, widget: WidgetType) -> FormResult<Vec<String>> {
        match self {
            Self::List(items) if !items.is_empty() => Ok(items.clone()),
            Self::Text(text) => Ok(vec![text.clone()]),
            _ => Err(FormError::invalid_value(widget, "a non-empty list of labels")),
        }
    }

    /// Tree selection; an empty list is an empty selection
    pub fn as_tree(&self, widget: WidgetType) -> FormResult<&[TreeSelectValue]> {
        match self {
            Self::Tree(nodes) => Ok(nodes),
            Self::List(items) if items.is_empty() => Ok(&[]),
            _ => Err(FormError::invalid_value(widget, "a list of tree nodes")),
        }
    }

    /// Checkbox mapping
    pub fn as_checks(&self, widget: WidgetType) -> FormResult<&CheckboxValues> {
        match self {
            Self::Checks(values) => Ok(values),
            _ => Err(FormError::invalid_value(widget, "a label to boolean mapping")),
        }
    }

    /// Boolean
    pub fn as_bool(&self, widget: WidgetType) -> FormResult<bool> {
        match self {
            Self::Bool(b) => Ok(*b),
            _ => Err(FormError::invalid_value(widget, "a boolean")),
        }
    }
}

impl From<&str> for FillValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for FillValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<bool> for FillValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<NaiveDate> for FillValue {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<NaiveTime> for FillValue {
    fn from(time: NaiveTime) -> Self {
        Self::Time(time)
    }
}

impl From<Vec<TreeSelectValue>> for FillValue {
    fn from(nodes: Vec<TreeSelectValue>) -> Self {
        Self::Tree(nodes)
    }
}

impl From<CheckboxValues> for FillValue {
    fn from(values: CheckboxValues) -> Self {
        Self::Checks(values)
    }
}
