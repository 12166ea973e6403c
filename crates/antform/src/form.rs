//! Ant Design form helper.
//!
//! [`AntdForm`] owns a [`PageDriver`] and fills form items from
//! [`FillSpec`]s. A batch is queued and drained one field at a time; whether
//! a failing field aborts the batch is decided by
//! [`FillConfig::stop_on_error`].
//!
//! # Error policy
//!
//! With `stop_on_error` off (the default) a failing field is logged and
//! skipped, and [`AntdForm::fill_form_values`] still returns `Ok(())`. That
//! only means the batch drained. Callers who need to know which fields were
//! set should fill them one at a time with [`AntdForm::fill_form_item`] or
//! verify the page afterwards.

use crate::config::FillConfig;
use crate::driver::PageDriver;
use crate::fill::FillSpec;
use crate::locator::Locator;
use crate::queue::TaskQueue;
use crate::resolver::FieldResolver;
use crate::result::{FormError, FormResult};
use crate::strategy::{self, FieldHandle};
use tracing::{debug, info};

/// Fills Ant Design forms through a [`PageDriver`].
#[derive(Debug)]
pub struct AntdForm<D> {
    driver: D,
    resolver: FieldResolver,
    config: FillConfig,
}

impl<D: PageDriver> AntdForm<D> {
    /// Create a helper with default settings
    #[must_use]
    pub fn new(driver: D) -> Self {
        Self::with_config(driver, FillConfig::default())
    }

    /// Create a helper with custom settings.
    ///
    /// The wait budget of `config` replaces the driver's own.
    #[must_use]
    pub fn with_config(mut driver: D, config: FillConfig) -> Self {
        driver.set_wait_budget(config.timeout_ms, config.poll_interval_ms);
        Self {
            driver,
            resolver: FieldResolver::new(Locator::new(config.form_selector.as_str())),
            config,
        }
    }

    /// The underlying driver
    #[must_use]
    pub const fn driver(&self) -> &D {
        &self.driver
    }

    /// Give the driver back
    #[must_use]
    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Current settings
    #[must_use]
    pub const fn config(&self) -> &FillConfig {
        &self.config
    }

    /// Abort batches on the first failing field
    pub fn set_stop_on_error(&mut self, stop: bool) {
        self.config.stop_on_error = stop;
    }

    /// Scope later lookups to another form root
    pub fn set_form_locator(&mut self, form: Locator) {
        self.resolver.set_form(form);
    }

    /// Replace label matching for later lookups
    pub fn set_custom_field_locator<F>(&mut self, locate: F)
    where
        F: Fn(&str, bool, &Locator) -> Locator + Send + Sync + 'static,
    {
        self.resolver.set_custom(locate);
    }

    /// Go back to matching fields by their label text
    pub fn clear_custom_field_locator(&mut self) {
        self.resolver.clear_custom();
    }

    /// Locator of the form item labelled `label`
    #[must_use]
    pub fn locate_form_item(&self, label: &str, exact: bool) -> Locator {
        self.resolver.locate(label, exact)
    }

    /// Fill every field in order, one at a time.
    ///
    /// # Errors
    ///
    /// With `stop_on_error` set, the first field that fails; the fields after
    /// it are not touched. Otherwise never fails.
    pub async fn fill_form_values(&self, specs: &[FillSpec]) -> FormResult<()> {
        info!(fields = specs.len(), stop_on_error = self.config.stop_on_error, "filling form");
        let queue = TaskQueue::new();
        for spec in specs {
            queue.push(move || self.fill_form_item(spec));
        }
        queue.run(self.config.stop_on_error).await
    }

    /// Fill one field.
    ///
    /// # Errors
    ///
    /// [`FormError::UnsupportedWidgetType`] for an unknown widget tag, raised
    /// before the page is touched; [`FormError::InvalidValue`] when the value
    /// does not fit the widget; otherwise whatever the driver reports.
    pub async fn fill_form_item(&self, spec: &FillSpec) -> FormResult<()> {
        let widget = spec
            .widget
            .known()
            .ok_or_else(|| FormError::unsupported(spec.widget.to_string()))?;
        let item = self.locate_form_item(&spec.label, spec.exact_label);
        debug!(label = %spec.label, %widget, locator = %item, "filling field");

        let field = FieldHandle::new(&self.driver, item.clone(), self.config.stop_on_error);
        strategy::dispatch(widget, &field, &spec.value).await?;
        info!(label = %spec.label, %widget, "filled field");

        if !spec.exact_label && !self.resolver.has_custom() {
            self.note_ambiguity(&spec.label, &item).await;
        }
        Ok(())
    }

    async fn note_ambiguity(&self, label: &str, item: &Locator) {
        match self.driver.count(item).await {
            Ok(matches) if matches > 1 => {
                debug!(label, matches, "label matches several form items; the first one was filled");
            }
            Ok(_) => {}
            Err(err) => debug!(label, error = %err, "could not count matching form items"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::{MockPage, TreeFixtureNode as N, TreeSelectKind};
    use crate::value::{CheckboxValues, FillValue, TreeSelectValue};
    use crate::widget::{WidgetTag, WidgetType};
    use chrono::NaiveDate;

    fn quick() -> FillConfig {
        FillConfig::new().timeout_ms(100).poll_interval_ms(10)
    }

    mod dispatch_tests {
        use super::*;

        #[tokio::test]
        async fn test_unknown_tag_touches_nothing() {
            let page = MockPage::new();
            let form = page.antd_form();
            page.text_input(form, "Score");
            let helper = AntdForm::new(page);

            let spec = FillSpec::new("Score", WidgetTag::Other("Rate".into()), "4");
            let err = helper.fill_form_item(&spec).await.unwrap_err();

            assert!(matches!(err, FormError::UnsupportedWidgetType { ref tag } if tag == "Rate"));
            assert!(helper.driver().interactions().is_empty());
        }

        #[tokio::test]
        async fn test_wrong_value_shape_touches_nothing() {
            let page = MockPage::new();
            let form = page.antd_form();
            page.checkbox_group(form, "Fruits", &["Apple"], &[]);
            let helper = AntdForm::new(page);

            let spec = FillSpec::new("Fruits", WidgetType::CheckboxGroup, "Apple");
            let err = helper.fill_form_item(&spec).await.unwrap_err();

            assert!(matches!(err, FormError::InvalidValue { .. }));
            assert!(helper.driver().interactions().is_empty());
        }

        #[tokio::test]
        async fn test_every_widget_type_has_a_strategy() {
            let page = MockPage::new();
            let form = page.antd_form();
            let name = page.text_input(form, "Name");
            let notes = page.textarea(form, "Notes");
            let day = page.picker(form, "Day");
            let (from, to) = page.range_picker(form, "Period");
            let at = page.picker(form, "Alarm");
            let (open, close) = page.range_picker(form, "Hours");
            let city = page.select(form, "City", &["Paris", "Rome"], Some(2));
            let user = page.select(form, "User", &["alice", "bob"], None);
            let region = page.cascader(form, "Region", &[&["Asia"], &["Japan"]]);
            let category = page.tree_select(form, "Category", TreeSelectKind::Single, &[N::branch("a", vec![N::leaf("b")])]);
            let tags = page.tree_select(form, "Tags", TreeSelectKind::Multiple, &[N::leaf("t1"), N::leaf("t2")]);
            let scope = page.tree_select(form, "Scope", TreeSelectKind::Checkable, &[N::leaf("s1")]);
            let size = page.radio_group(form, "Size", &["S", "L"], true);
            let fruits = page.checkbox_group(form, "Fruits", &["Apple", "Pear"], &[]);
            let notify = page.switch(form, "Notify", false);

            let date = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
            let time = |h| chrono::NaiveTime::from_hms_opt(h, 0, 0).unwrap();
            let specs = vec![
                FillSpec::text_input("Name", "Ada"),
                FillSpec::text_area("Notes", "hi"),
                FillSpec::date_picker("Day", date(1)),
                FillSpec::date_range_picker("Period", date(2), date(3)),
                FillSpec::time_picker("Alarm", time(7)),
                FillSpec::time_range_picker("Hours", time(9), time(17)),
                FillSpec::select("City", "Rome"),
                FillSpec::search_select("User", "bob"),
                FillSpec::cascade_select("Region", ["Asia", "Japan"]),
                FillSpec::tree_select("Category", ["a", "b"]),
                FillSpec::multiple_tree_select("Tags", vec![TreeSelectValue::leaf("t2", true)]),
                FillSpec::checkable_tree_select("Scope", vec![TreeSelectValue::leaf("s1", true)]),
                FillSpec::radio_group("Size", "L"),
                FillSpec::checkbox_group("Fruits", CheckboxValues::new().with("Pear", true)),
                FillSpec::switch("Notify", true),
            ];
            let covered: Vec<WidgetType> = specs.iter().filter_map(|s| s.widget.known()).collect();
            assert_eq!(covered, WidgetType::ALL.to_vec());

            let helper = AntdForm::with_config(page, FillConfig::new().stop_on_error(true));
            helper.fill_form_values(&specs).await.unwrap();
            let page = helper.driver();

            assert_eq!(page.value(name), "Ada");
            assert_eq!(page.value(notes), "hi");
            assert_eq!(page.value(day), "2024-06-01");
            assert_eq!(page.value(from), "2024-06-02");
            assert_eq!(page.value(to), "2024-06-03");
            assert_eq!(page.value(at), "07:00:00");
            assert_eq!(page.value(open), "09:00:00");
            assert_eq!(page.value(close), "17:00:00");
            assert_eq!(page.text(city.selection), "Rome");
            assert_eq!(page.text(user.selection), "bob");
            assert_eq!(page.text(region.selection), "Japan");
            assert_eq!(page.text(category.selection), "b");
            assert!(page.node_has_class(tags.node("t2", 0).unwrap().title, "ant-select-tree-node-selected"));
            assert!(page.node_has_class(scope.node("s1", 0).unwrap().checkbox.unwrap(), "ant-select-tree-checkbox-checked"));
            assert!(page.node_has_class(size.options[1], "ant-radio-button-wrapper-checked"));
            assert!(page.node_has_class(fruits.options[1], "ant-checkbox-wrapper-checked"));
            assert!(page.node_has_class(notify, "ant-switch-checked"));
        }
    }

    mod batch_tests {
        use super::*;

        fn three_fields(page: &MockPage) -> (usize, usize) {
            let form = page.antd_form();
            let first = page.text_input(form, "First");
            page.select(form, "Broken", &["x"], None);
            let third = page.text_input(form, "Third");
            (first, third)
        }

        fn batch() -> Vec<FillSpec> {
            vec![
                FillSpec::text_input("First", "1"),
                FillSpec::select("Broken", "missing option"),
                FillSpec::text_input("Third", "3"),
            ]
        }

        #[tokio::test]
        async fn test_stop_on_error_skips_the_rest() {
            let page = MockPage::new();
            let (first, third) = three_fields(&page);
            let helper = AntdForm::with_config(page, quick().stop_on_error(true));

            assert!(helper.fill_form_values(&batch()).await.is_err());
            assert_eq!(helper.driver().value(first), "1");
            assert_eq!(helper.driver().value(third), "");
        }

        #[tokio::test]
        async fn test_failures_are_skipped_by_default() {
            let page = MockPage::new();
            let (first, third) = three_fields(&page);
            let helper = AntdForm::with_config(page, quick());

            helper.fill_form_values(&batch()).await.unwrap();
            assert_eq!(helper.driver().value(first), "1");
            assert_eq!(helper.driver().value(third), "3");
        }

        #[tokio::test]
        async fn test_unknown_tag_does_not_abort_default_batch() {
            let page = MockPage::new();
            let form = page.antd_form();
            let name = page.text_input(form, "Name");
            let helper = AntdForm::new(page);

            let specs = vec![
                FillSpec::new("Name", WidgetTag::Other("Mentions".into()), "x"),
                FillSpec::text_input("Name", "Ada"),
            ];
            helper.fill_form_values(&specs).await.unwrap();
            assert_eq!(helper.driver().value(name), "Ada");
        }

        #[tokio::test]
        async fn test_checkbox_group_inside_batch_runs_in_order() {
            let page = MockPage::new();
            let form = page.antd_form();
            let fruits = page.checkbox_group(form, "Fruits", &["Apple", "Pear"], &[]);
            let after = page.text_input(form, "After");
            let helper = AntdForm::new(page);

            let specs = vec![
                FillSpec::checkbox_group("Fruits", CheckboxValues::new().with("Pear", true).with("Apple", true)),
                FillSpec::text_input("After", "done"),
            ];
            helper.fill_form_values(&specs).await.unwrap();

            let page = helper.driver();
            let order: Vec<_> = page
                .interactions()
                .into_iter()
                .filter(|i| matches!(i.action, crate::mock::Action::Click | crate::mock::Action::Fill(_)))
                .filter_map(|i| i.node)
                .collect();
            assert_eq!(order, vec![fruits.options[1], fruits.options[0], after]);
        }
    }

    mod scenario_tests {
        use super::*;

        #[tokio::test]
        async fn test_select_waits_for_async_options() {
            let page = MockPage::new();
            let form = page.antd_form();
            let city = page.select(form, "City", &["London", "Paris", "Tokyo"], Some(10));
            let helper = AntdForm::new(page);

            helper
                .fill_form_values(&[FillSpec::select("City", "Paris")])
                .await
                .unwrap();

            assert_eq!(helper.driver().text(city.selection), "Paris");
        }

        #[tokio::test]
        async fn test_nested_tree_checks_only_leaf() {
            let page = MockPage::new();
            let form = page.antd_form();
            let tree = page.tree_select(
                form,
                "TreeSelect",
                TreeSelectKind::Checkable,
                &[
                    N::branch(
                        "node-1",
                        vec![
                            N::branch("node-1-1", vec![N::leaf("node-1-1-1")]),
                            N::leaf("node-1-2"),
                        ],
                    ),
                    N::leaf("node-2"),
                ],
            );
            let helper = AntdForm::new(page);
            let value: FillValue = serde_json::from_str(
                r#"[{"name": "node-1", "select": false, "children": [
                      {"name": "node-1-1", "select": false, "children": [
                        {"name": "node-1-1-1", "select": true, "children": []}]}]}]"#,
            )
            .unwrap();

            helper
                .fill_form_item(&FillSpec::new("TreeSelect", WidgetType::CheckableTreeSelect, value))
                .await
                .unwrap();

            let page = helper.driver();
            let checked = |name, depth| {
                let node = tree.node(name, depth).unwrap();
                page.node_has_class(node.checkbox.unwrap(), "ant-select-tree-checkbox-checked")
            };
            assert!(checked("node-1-1-1", 2));
            assert!(!checked("node-1-1", 1));
            assert!(!checked("node-1", 0));
            assert!(page.is_rendered(tree.node("node-1-1-1", 2).unwrap().node));
            assert!(page.node_has_class(tree.node("node-1", 0).unwrap().switcher, "ant-select-tree-switcher_open"));
            assert!(page.node_has_class(tree.node("node-1-1", 1).unwrap().switcher, "ant-select-tree-switcher_open"));
        }
    }

    mod locator_tests {
        use super::*;

        #[tokio::test]
        async fn test_exact_label_picks_verbatim_field() {
            let page = MockPage::new();
            let form = page.antd_form();
            let address2 = page.text_input(form, "Address2");
            let address = page.text_input(form, "Address");
            let helper = AntdForm::new(page);

            helper.fill_form_item(&FillSpec::text_input("Address", "first")).await.unwrap();
            helper
                .fill_form_item(&FillSpec::text_input("Address", "exact").exact())
                .await
                .unwrap();

            assert_eq!(helper.driver().value(address2), "first");
            assert_eq!(helper.driver().value(address), "exact");
        }

        #[tokio::test]
        async fn test_only_contains_matches_are_counted() {
            use crate::mock::Action;

            let page = MockPage::new();
            let form = page.antd_form();
            page.text_input(form, "Address2");
            page.text_input(form, "Address");
            let helper = AntdForm::new(page);
            let counted = |helper: &AntdForm<MockPage>| {
                helper
                    .driver()
                    .interactions()
                    .iter()
                    .filter(|i| i.action == Action::Count)
                    .count()
            };

            helper.fill_form_item(&FillSpec::text_input("Address", "a")).await.unwrap();
            assert_eq!(counted(&helper), 1);
            assert_eq!(
                helper.driver().count(&helper.locate_form_item("Address", false)).await.unwrap(),
                2
            );

            helper.driver().clear_log();
            helper
                .fill_form_item(&FillSpec::text_input("Address", "b").exact())
                .await
                .unwrap();
            assert_eq!(counted(&helper), 0);
        }

        #[tokio::test]
        async fn test_custom_locator_and_form_root() {
            let page = MockPage::new();
            let first = page.antd_form();
            page.text_input(first, "Name");
            let second = page.antd_form();
            let target = page.text_input(second, "Name");

            let mut helper = AntdForm::new(page);
            helper.set_form_locator(Locator::new("form.ant-form").nth(1));
            helper.fill_form_item(&FillSpec::text_input("Name", "second")).await.unwrap();
            assert_eq!(helper.driver().value(target), "second");

            helper.set_custom_field_locator(|label, _exact, form| {
                form.locator(".ant-form-item-label").has_text(label).first()
            });
            let loc = helper.locate_form_item("Name", false);
            assert!(loc.to_string().starts_with("form.ant-form >> nth=1 >> .ant-form-item-label"));

            helper.clear_custom_field_locator();
            assert_eq!(
                helper.locate_form_item("Name", false).to_string(),
                r#"form.ant-form >> nth=1 >> .ant-form-item >> has-text="Name""#
            );
        }

        #[tokio::test]
        async fn test_missing_field_surfaces_as_timeout() {
            let helper = AntdForm::with_config(MockPage::new(), quick());
            let err = helper
                .fill_form_item(&FillSpec::text_input("Ghost", "boo"))
                .await
                .unwrap_err();
            assert!(matches!(err, FormError::Timeout { ms: 100, .. }));
        }

        #[tokio::test]
        async fn test_configured_timeout_overrides_driver_budget() {
            let page = MockPage::with_config(crate::DriverConfig::new().element_timeout(9000));
            let helper = AntdForm::with_config(page, FillConfig::new().timeout_ms(50).poll_interval_ms(10));
            assert_eq!(helper.driver().config().element_timeout_ms, 50);

            let err = helper
                .fill_form_item(&FillSpec::text_input("Ghost", "x"))
                .await
                .unwrap_err();
            assert!(matches!(err, FormError::Timeout { ms: 50, .. }));
            assert!(helper.driver().clock() <= 5);
        }

        #[tokio::test]
        async fn test_default_helper_uses_default_budget() {
            let helper = AntdForm::new(MockPage::with_config(crate::DriverConfig::new().element_timeout(10)));
            assert_eq!(helper.driver().config().element_timeout_ms, crate::DEFAULT_TIMEOUT_MS);
        }
    }
}
