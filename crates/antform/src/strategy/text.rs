use super::FieldHandle;
use crate::driver::PageDriver;
use crate::result::FormResult;
use tracing::debug;

/// Replace the content of the text box matching `css`
pub(super) async fn fill<D: PageDriver + ?Sized>(
    field: &FieldHandle<'_, D>,
    css: &str,
    text: &str,
) -> FormResult<()> {
    let input = field.part(css);
    debug!(locator = %input, "filling text box");
    field.driver.fill(&input, text).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::classes;
    use crate::mock::MockPage;
    use crate::resolver::FieldResolver;

    #[tokio::test]
    async fn test_fills_input_and_textarea() {
        let page = MockPage::new();
        let form = page.antd_form();
        let input = page.text_input(form, "Name");
        let area = page.textarea(form, "Notes");
        let resolver = FieldResolver::default();

        let name = FieldHandle::new(&page, resolver.locate("Name", false), false);
        fill(&name, classes::INPUT, "Ada").await.unwrap();
        let notes = FieldHandle::new(&page, resolver.locate("Notes", false), false);
        fill(&notes, classes::TEXTAREA, "line 1\nline 2").await.unwrap();

        assert_eq!(page.value(input), "Ada");
        assert_eq!(page.value(area), "line 1\nline 2");
    }

    #[tokio::test]
    async fn test_overwrites_previous_value() {
        let page = MockPage::new();
        let form = page.antd_form();
        let input = page.text_input(form, "Name");
        let field = FieldHandle::new(&page, FieldResolver::default().locate("Name", false), false);
        fill(&field, classes::INPUT, "first").await.unwrap();
        fill(&field, classes::INPUT, "second").await.unwrap();
        assert_eq!(page.value(input), "second");
    }
}
