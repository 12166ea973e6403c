//! Locator abstraction for element selection.
//!
//! A [`Locator`] is plain data: an ordered chain of [`Step`]s evaluated
//! against the page by a [`PageDriver`](crate::PageDriver). Nothing is
//! queried until an action is performed, so a locator built before a dropdown
//! opens still finds the options once they are rendered.
//!
//! # Matching rules
//!
//! - Resolution starts at the document and applies each step to the current
//!   element set, keeping document order and dropping duplicates.
//! - `has_text` is a case-insensitive, whitespace-normalized substring match
//!   on the element's text content.
//! - `exact_text` keeps elements whose own text, or the text of one of their
//!   descendants, equals the needle after whitespace normalization.
//! - Actions always use the first element of the final set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single resolution step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Descendants matching a compound CSS selector
    Descendant {
        /// Compound selector, e.g. `.ant-select.ant-select-loading`
        css: String,
    },
    /// Direct children matching a compound CSS selector
    Child {
        /// Compound selector
        css: String,
    },
    /// Keep elements whose text contains the needle
    HasText {
        /// Needle
        text: String,
    },
    /// Keep elements carrying exactly this text
    ExactText {
        /// Needle
        text: String,
    },
    /// Keep elements for which the inner chain matches something
    Has {
        /// Chain evaluated relative to each candidate
        inner: Vec<Step>,
    },
    /// Keep elements for which the inner chain matches nothing
    HasNot {
        /// Chain evaluated relative to each candidate
        inner: Vec<Step>,
    },
    /// Keep only the element at this index
    Nth {
        /// Zero-based index
        index: usize,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Descendant { css } => write!(f, "{css}"),
            Self::Child { css } => write!(f, ":scope > {css}"),
            Self::HasText { text } => write!(f, "has-text={text:?}"),
            Self::ExactText { text } => write!(f, "text={text:?}"),
            Self::Has { inner } => write!(f, "has=({})", Chain(inner)),
            Self::HasNot { inner } => write!(f, "has-not=({})", Chain(inner)),
            Self::Nth { index } => write!(f, "nth={index}"),
        }
    }
}

struct Chain<'a>(&'a [Step]);

impl fmt::Display for Chain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, step) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" >> ")?;
            }
            write!(f, "{step}")?;
        }
        Ok(())
    }
}

/// A lazy element query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Locator {
    steps: Vec<Step>,
}

impl Locator {
    /// Create a locator for descendants of the document matching `css`
    #[must_use]
    pub fn new(css: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Descendant { css: css.into() }],
        }
    }

    /// Create a locator from raw steps
    #[must_use]
    pub fn from_steps(steps: Vec<Step>) -> Self {
        Self { steps }
    }

    /// Narrow to descendants matching `css`
    #[must_use]
    pub fn locator(&self, css: impl Into<String>) -> Self {
        self.then(Step::Descendant { css: css.into() })
    }

    /// Narrow to direct children matching `css`
    #[must_use]
    pub fn child(&self, css: impl Into<String>) -> Self {
        self.then(Step::Child { css: css.into() })
    }

    /// Keep matches whose text contains `text`
    #[must_use]
    pub fn has_text(&self, text: impl Into<String>) -> Self {
        self.then(Step::HasText { text: text.into() })
    }

    /// Keep matches carrying exactly `text`
    #[must_use]
    pub fn exact_text(&self, text: impl Into<String>) -> Self {
        self.then(Step::ExactText { text: text.into() })
    }

    /// Keep matches containing an element found by `inner`
    #[must_use]
    pub fn has(&self, inner: &Self) -> Self {
        self.then(Step::Has {
            inner: inner.steps.clone(),
        })
    }

    /// Keep matches not containing an element found by `inner`
    #[must_use]
    pub fn has_not(&self, inner: &Self) -> Self {
        self.then(Step::HasNot {
            inner: inner.steps.clone(),
        })
    }

    /// Keep the match at `index`
    #[must_use]
    pub fn nth(&self, index: usize) -> Self {
        self.then(Step::Nth { index })
    }

    /// Keep the first match
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// The resolution chain
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    fn then(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Chain(&self.steps))
    }
}

/// Collapse runs of whitespace and trim, the way rendered text is compared
#[must_use]
pub fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text containment used by [`Step::HasText`]
#[must_use]
pub fn text_contains(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack)
        .to_lowercase()
        .contains(&normalize_text(needle).to_lowercase())
}

/// Text equality used by [`Step::ExactText`]
#[must_use]
pub fn text_equals(haystack: &str, needle: &str) -> bool {
    normalize_text(haystack) == normalize_text(needle)
}
