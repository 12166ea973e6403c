//! Antform: Declarative Ant Design Form Filling
//!
//! Describe what a form should contain as a list of [`FillSpec`]s (label,
//! widget type, value) and let [`AntdForm`] drive the page: it finds each
//! field by its label, picks the interaction strategy for the widget, and
//! runs the fills strictly one after another.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │ FillSpec[]   │──►│ TaskQueue    │──►│ FieldResolver│──►│ strategy per │
//! │ (JSON/YAML)  │   │ (sequential) │   │ (label match)│   │ WidgetType   │
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────┬───────┘
//!                                                                 │
//!                                              ┌──────────────────▼───────┐
//!                                              │ PageDriver               │
//!                                              │ ChromiumDriver / MockPage│
//!                                              └──────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use antform::mock::MockPage;
//! use antform::prelude::*;
//!
//! # futures::executor::block_on(async {
//! let page = MockPage::new();
//! let form = page.antd_form();
//! let name = page.text_input(form, "Name");
//!
//! let helper = AntdForm::new(page);
//! helper
//!     .fill_form_values(&[FillSpec::text_input("Name", "Ada")])
//!     .await
//!     .unwrap();
//! assert_eq!(helper.driver().value(name), "Ada");
//! # });
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::large_stack_arrays, clippy::large_stack_frames))]

/// Class names and selectors rendered by Ant Design widgets
pub mod classes;

/// In-memory page for exercising fills without a browser
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::doc_markdown
)]
pub mod mock;

#[cfg(feature = "browser")]
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::doc_markdown,
    clippy::cast_precision_loss
)]
mod cdp;
mod config;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::doc_markdown
)]
mod driver;
mod fill;
#[allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::missing_const_for_fn,
    clippy::doc_markdown
)]
mod form;
mod locator;
mod queue;
mod resolver;
mod result;
#[allow(clippy::missing_errors_doc, clippy::doc_markdown)]
mod strategy;
mod tree;
mod value;
mod widget;

#[cfg(feature = "browser")]
pub use cdp::ChromiumDriver;
pub use config::FillConfig;
pub use driver::{
    DriverConfig, ElementState, PageDriver, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TIMEOUT_MS,
};
pub use fill::FillSpec;
pub use form::AntdForm;
pub use locator::{normalize_text, text_contains, text_equals, Locator, Step};
pub use queue::{QueuedTask, TaskQueue};
pub use resolver::{CustomFieldLocator, FieldResolver};
pub use result::{FormError, FormResult};
pub use tree::{TreeSelectMode, TreeWalker};
pub use value::{CheckboxValues, FillValue, TreeSelectValue, DATE_FORMAT, TIME_FORMAT};
pub use widget::{WidgetTag, WidgetType};

/// Prelude for convenient imports
pub mod prelude {
    #[cfg(feature = "browser")]
    pub use super::cdp::*;
    pub use super::config::*;
    pub use super::driver::*;
    pub use super::fill::*;
    pub use super::form::*;
    pub use super::locator::*;
    pub use super::resolver::*;
    pub use super::result::*;
    pub use super::value::*;
    pub use super::widget::*;
}
