use super::FieldHandle;
use crate::classes;
use crate::driver::PageDriver;
use crate::queue::TaskQueue;
use crate::result::FormResult;
use crate::value::CheckboxValues;
use tracing::debug;

pub(super) async fn fill_radio<D: PageDriver + ?Sized>(field: &FieldHandle<'_, D>, option: &str) -> FormResult<()> {
    let group = field.part(classes::RADIO_GROUP);
    // Button and plain groups render different wrappers; decide per call.
    let wrapper = if field
        .driver
        .query_exists(&group, classes::RADIO_BUTTON_WRAPPER)
        .await?
    {
        classes::RADIO_BUTTON_WRAPPER
    } else {
        classes::RADIO_WRAPPER
    };
    debug!(wrapper, option, "picking radio option");
    field
        .driver
        .click(&group.locator(wrapper).has_text(option).first())
        .await
}

/// Each entry runs as its own task on a queue drained before returning, so
/// every toggle lands before the next field of the batch starts.
pub(super) async fn fill_checkboxes<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    values: &CheckboxValues,
) -> FormResult<()> {
    let group = field.part(classes::CHECKBOX_GROUP);
    let queue = TaskQueue::new();
    for (label, desired) in values.iter() {
        let wrapper = group.locator(classes::CHECKBOX_WRAPPER).has_text(label).first();
        let driver = field.driver;
        queue.push(move || async move {
            let checked = driver.has_class(&wrapper, classes::CHECKBOX_CHECKED_CLASS).await?;
            if checked == desired {
                debug!(locator = %wrapper, checked, "checkbox already in place");
                return Ok(());
            }
            debug!(locator = %wrapper, desired, "toggling checkbox");
            driver.click(&wrapper).await
        });
    }
    queue.run(field.stop_on_error).await
}

pub(super) async fn fill_switch<D: PageDriver + ?Sized>(field: &FieldHandle<'_, D>, on: bool) -> FormResult<()> {
    let switch = field.part(classes::SWITCH);
    if field.driver.has_class(&switch, classes::SWITCH_CHECKED_CLASS).await? != on {
        field.driver.click(&switch).await?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mock::MockPage;
    use crate::resolver::FieldResolver;
    use crate::DriverConfig;

    fn field<'a>(page: &'a MockPage, label: &str, stop_on_error: bool) -> FieldHandle<'a, MockPage> {
        FieldHandle::new(page, FieldResolver::default().locate(label, false), stop_on_error)
    }

    mod radio_tests {
        use super::*;

        #[tokio::test]
        async fn test_button_style_group() {
            let page = MockPage::new();
            let form = page.antd_form();
            let group = page.radio_group(form, "Size", &["Small", "Large"], true);
            fill_radio(&field(&page, "Size", false), "Large").await.unwrap();
            assert!(page.node_has_class(group.options[1], "ant-radio-button-wrapper-checked"));
            assert!(!page.node_has_class(group.options[0], "ant-radio-button-wrapper-checked"));
        }

        #[tokio::test]
        async fn test_plain_style_group() {
            let page = MockPage::new();
            let form = page.antd_form();
            let group = page.radio_group(form, "Fruit", &["Apple", "Banana"], false);
            fill_radio(&field(&page, "Fruit", false), "banana").await.unwrap();
            assert!(page.node_has_class(group.options[1], "ant-radio-wrapper-checked"));
        }
    }

    mod checkbox_tests {
        use super::*;

        fn fruits() -> CheckboxValues {
            CheckboxValues::new()
                .with("Apple", true)
                .with("Orange", false)
                .with("Banana", true)
        }

        #[tokio::test]
        async fn test_toggles_only_mismatched_boxes() {
            let page = MockPage::new();
            let form = page.antd_form();
            let group = page.checkbox_group(form, "Fruits", &["Apple", "Orange", "Banana"], &["Orange", "Banana"]);

            fill_checkboxes(&field(&page, "Fruits", false), &fruits()).await.unwrap();

            let checked: Vec<bool> = group
                .options
                .iter()
                .map(|o| page.node_has_class(*o, "ant-checkbox-wrapper-checked"))
                .collect();
            assert_eq!(checked, vec![true, false, true]);
            assert_eq!(page.clicks_on(group.options[0]), 1);
            assert_eq!(page.clicks_on(group.options[1]), 1);
            assert_eq!(page.clicks_on(group.options[2]), 0);
        }

        #[tokio::test]
        async fn test_second_pass_is_a_no_op() {
            let page = MockPage::new();
            let form = page.antd_form();
            let group = page.checkbox_group(form, "Fruits", &["Apple", "Orange", "Banana"], &[]);
            let handle = field(&page, "Fruits", false);

            fill_checkboxes(&handle, &fruits()).await.unwrap();
            let clicks: usize = group.options.iter().map(|o| page.clicks_on(*o)).sum();
            page.clear_log();
            fill_checkboxes(&handle, &fruits()).await.unwrap();

            assert_eq!(clicks, 2);
            assert!(group.options.iter().all(|o| page.clicks_on(*o) == 0));
            assert!(page.node_has_class(group.options[0], "ant-checkbox-wrapper-checked"));
            assert!(!page.node_has_class(group.options[1], "ant-checkbox-wrapper-checked"));
        }

        #[tokio::test]
        async fn test_missing_entry_respects_stop_on_error() {
            let config = DriverConfig::new().element_timeout(50).poll_interval(10);
            let values = CheckboxValues::new().with("Kiwi", true).with("Apple", true);

            let page = MockPage::with_config(config.clone());
            let form = page.antd_form();
            let group = page.checkbox_group(form, "Fruits", &["Apple"], &[]);
            assert!(fill_checkboxes(&field(&page, "Fruits", true), &values).await.is_err());
            assert!(!page.node_has_class(group.options[0], "ant-checkbox-wrapper-checked"));

            let page = MockPage::with_config(config);
            let form = page.antd_form();
            let group = page.checkbox_group(form, "Fruits", &["Apple"], &[]);
            fill_checkboxes(&field(&page, "Fruits", false), &values).await.unwrap();
            assert!(page.node_has_class(group.options[0], "ant-checkbox-wrapper-checked"));
        }
    }

    mod switch_tests {
        use super::*;

        #[tokio::test]
        async fn test_clicks_only_when_state_differs() {
            let page = MockPage::new();
            let form = page.antd_form();
            let on = page.switch(form, "Notify", true);
            let off = page.switch(form, "Dark mode", false);

            fill_switch(&field(&page, "Notify", false), true).await.unwrap();
            fill_switch(&field(&page, "Dark mode", false), true).await.unwrap();

            assert_eq!(page.clicks_on(on), 0);
            assert_eq!(page.clicks_on(off), 1);
            assert!(page.node_has_class(off, "ant-switch-checked"));
        }
    }
}
