//! Field locator resolution.
//!
//! Turns a label into the locator of its `.ant-form-item`. By default the
//! label is matched as a substring of the item's text and the first item in
//! document order wins; `exact` restricts the match to items whose label cell
//! carries exactly that text. A custom locator replaces both rules.

use crate::classes;
use crate::locator::Locator;
use std::fmt;
use std::sync::Arc;

/// Caller supplied `(label, exact, form) -> field` strategy
pub type CustomFieldLocator = Arc<dyn Fn(&str, bool, &Locator) -> Locator + Send + Sync>;

/// Resolves labels to form item locators within one form root.
#[derive(Clone)]
pub struct FieldResolver {
    form: Locator,
    custom: Option<CustomFieldLocator>,
}

impl fmt::Debug for FieldResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldResolver")
            .field("form", &self.form.to_string())
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl Default for FieldResolver {
    fn default() -> Self {
        Self::new(Locator::new(classes::FORM))
    }
}

impl FieldResolver {
    /// Resolve within `form`
    #[must_use]
    pub const fn new(form: Locator) -> Self {
        Self { form, custom: None }
    }

    /// Form root every lookup is scoped to
    #[must_use]
    pub const fn form(&self) -> &Locator {
        &self.form
    }

    /// Replace the form root
    pub fn set_form(&mut self, form: Locator) {
        self.form = form;
    }

    /// Install a custom strategy
    pub fn set_custom<F>(&mut self, locate: F)
    where
        F: Fn(&str, bool, &Locator) -> Locator + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(locate));
    }

    /// Go back to the built-in matching
    pub fn clear_custom(&mut self) {
        self.custom = None;
    }

    /// Whether a custom strategy is installed
    #[must_use]
    pub const fn has_custom(&self) -> bool {
        self.custom.is_some()
    }

    /// Locator of the form item labelled `label`
    #[must_use]
    pub fn locate(&self, label: &str, exact: bool) -> Locator {
        if let Some(custom) = &self.custom {
            return custom(label, exact, &self.form);
        }
        if exact {
            let label_cell = Locator::new(classes::FORM_ITEM_LABEL).exact_text(label);
            self.form.locator(classes::FORM_ITEM).has(&label_cell)
        } else {
            self.form.locator(classes::FORM_ITEM).has_text(label)
        }
    }
}
