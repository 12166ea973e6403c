//! Command implementations

use crate::commands::{CheckArgs, FillArgs};
use crate::error::{CliError, CliResult};
use crate::spec_file::SpecFile;
use antform::{FillConfig, WidgetType};
use console::style;

/// Merge command-line overrides into the file's settings
#[must_use]
pub fn effective_config(file: &FillConfig, args: &FillArgs) -> FillConfig {
    let mut config = file.clone();
    if let Some(ref form) = args.form {
        config.form_selector.clone_from(form);
    }
    if args.stop_on_error {
        config.stop_on_error = true;
    }
    if let Some(ms) = args.timeout_ms {
        config.timeout_ms = ms;
    }
    config
}

/// Describe every field of a spec file, flagging unsupported widgets
pub fn run_check(args: &CheckArgs) -> CliResult<()> {
    let spec = SpecFile::load(&args.spec)?;
    let mut unsupported = 0usize;

    println!(
        "{} {} ({} fields, form {})",
        style("Spec").bold(),
        args.spec.display(),
        spec.fields.len(),
        spec.config.form_selector
    );
    for (i, field) in spec.fields.iter().enumerate() {
        let label = if field.exact_label {
            format!("\"{}\" (exact)", field.label)
        } else {
            format!("\"{}\"", field.label)
        };
        match field.widget.known() {
            Some(widget) => println!("  {:>2}. {} {label}", i + 1, style(widget).cyan()),
            None => {
                unsupported += 1;
                println!("  {:>2}. {} {label}", i + 1, style(&field.widget).red());
            }
        }
    }

    if unsupported > 0 {
        let known: Vec<&str> = WidgetType::ALL.iter().map(|w| w.name()).collect();
        return Err(CliError::invalid_argument(format!(
            "{unsupported} field(s) use an unsupported widget type; supported: {}",
            known.join(", ")
        )));
    }
    println!("{}", style("ok").green());
    Ok(())
}

/// Open the page in Chromium and fill it
#[cfg(feature = "browser")]
pub async fn run_fill(args: &FillArgs) -> CliResult<()> {
    use antform::{AntdForm, ChromiumDriver};
    use tracing::{info, Instrument};

    let spec = SpecFile::load(&args.spec)?;
    let config = effective_config(&spec.config, args);
    let run_id = uuid::Uuid::new_v4();

    let mut driver_config = config.driver_config().headless(!args.headful);
    if args.no_sandbox {
        driver_config = driver_config.no_sandbox();
    }
    if let Some(ref path) = args.chromium {
        driver_config = driver_config.executable_path(path.as_str());
    }

    async {
        let driver = ChromiumDriver::launch(driver_config).await?;
        driver.goto(&args.url).await?;
        let form = AntdForm::with_config(driver, config);
        let filled = form.fill_form_values(&spec.fields).await;
        form.into_driver().close().await?;
        filled?;
        info!(fields = spec.fields.len(), "form filled");
        println!("{} {} fields on {}", style("Filled").green().bold(), spec.fields.len(), args.url);
        Ok::<(), CliError>(())
    }
    .instrument(tracing::info_span!("fill", %run_id))
    .await
}

/// Open the page in Chromium and fill it
#[cfg(not(feature = "browser"))]
pub async fn run_fill(_args: &FillArgs) -> CliResult<()> {
    Err(CliError::config(
        "browser support not enabled. Rebuild with --features browser",
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn args() -> FillArgs {
        FillArgs {
            url: "http://localhost".to_string(),
            spec: PathBuf::from("f.yaml"),
            form: None,
            stop_on_error: false,
            timeout_ms: None,
            headful: false,
            chromium: None,
            no_sandbox: false,
        }
    }

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let file = FillConfig::new().timeout_ms(900).form_selector("#profile");
        let mut a = args();
        let merged = effective_config(&file, &a);
        assert_eq!(merged, file);

        a.form = Some("form#signup".to_string());
        a.stop_on_error = true;
        a.timeout_ms = Some(200);
        let merged = effective_config(&file, &a);
        assert_eq!(merged.form_selector, "form#signup");
        assert!(merged.stop_on_error);
        assert_eq!(merged.timeout_ms, 200);
    }

    #[test]
    fn test_check_accepts_known_widgets() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- label: Name\n  type: TextInput\n  value: Ada").unwrap();
        let args = CheckArgs {
            spec: file.path().to_path_buf(),
        };
        assert!(run_check(&args).is_ok());
    }

    #[test]
    fn test_check_rejects_unknown_widget() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "- label: Score\n  type: Rate\n  value: 3").unwrap();
        let args = CheckArgs {
            spec: file.path().to_path_buf(),
        };
        let err = run_check(&args).unwrap_err();
        assert!(err.to_string().contains("Select"));
    }
}
