//! Chromium page driver over the DevTools protocol.
//!
//! Locators are shipped to the page as JSON and resolved by a small script
//! that mirrors the in-memory DOM rules of [`MockPage`](crate::mock::MockPage):
//! descendant and child steps keep document order, text filters normalize
//! whitespace, and actions use the first element of the final set.
//!
//! Pointer and keyboard input goes through the CDP `Input` domain so that
//! React handlers see trusted events. Each action polls the page until its
//! target resolves or [`DriverConfig::element_timeout`] runs out.

use crate::driver::{DriverConfig, ElementState, PageDriver};
use crate::locator::Locator;
use crate::result::{FormError, FormResult};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, InsertTextParams, MouseButton,
};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, trace};

/// Resolves a step chain to an element list, in document order.
const RESOLVE_JS: &str = r"
const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
const order = (els) => [...new Set(els)].sort((a, b) =>
    a === b ? 0 : (a.compareDocumentPosition(b) & Node.DOCUMENT_POSITION_FOLLOWING ? -1 : 1));
const resolve = (steps, scope) => {
    let set = scope;
    for (const step of steps) {
        switch (step.kind) {
            case 'descendant':
                set = order(set.flatMap((el) => [...el.querySelectorAll(step.css)]));
                break;
            case 'child':
                set = order(set.flatMap((el) => [...el.children].filter((c) => c.matches(step.css))));
                break;
            case 'has_text': {
                const needle = norm(step.text).toLowerCase();
                set = set.filter((el) => norm(el.textContent).toLowerCase().includes(needle));
                break;
            }
            case 'exact_text': {
                const needle = norm(step.text);
                set = set.filter((el) =>
                    [el, ...el.querySelectorAll('*')].some((n) => norm(n.textContent) === needle));
                break;
            }
            case 'has':
                set = set.filter((el) => resolve(step.inner, [el]).length > 0);
                break;
            case 'has_not':
                set = set.filter((el) => resolve(step.inner, [el]).length === 0);
                break;
            case 'nth':
                set = step.index < set.length ? [set[step.index]] : [];
                break;
        }
    }
    return set;
};
";

/// Centre of the element's box after scrolling it into view
const CENTER_JS: &str = r"
if (!el) return null;
el.scrollIntoView({ block: 'center', inline: 'center' });
const r = el.getBoundingClientRect();
return [r.left + r.width / 2, r.top + r.height / 2];
";

/// Focus a text box and clear it through the native setter so React notices
const CLEAR_JS: &str = r"
if (!el) return null;
el.scrollIntoView({ block: 'center' });
el.focus();
const proto = el instanceof HTMLTextAreaElement
    ? HTMLTextAreaElement.prototype
    : HTMLInputElement.prototype;
const setter = Object.getOwnPropertyDescriptor(proto, 'value');
if (setter && setter.set) { setter.set.call(el, ''); } else { el.value = ''; }
el.dispatchEvent(new Event('input', { bubbles: true }));
return true;
";

const FOCUS_JS: &str = r"
if (!el) return null;
el.focus();
return true;
";

/// Wrap `body` so it runs with `el` bound to the first match of `target`.
///
/// The script always returns a JSON string; `null` means nothing matched.
fn script(target: &Locator, body: &str) -> FormResult<String> {
    let steps = serde_json::to_string(target.steps())?;
    Ok(format!(
        "(() => {{ {RESOLVE_JS}\nconst all = resolve({steps}, [document]);\nconst el = all[0];\nconst run = () => {{ {body} }};\nreturn JSON.stringify(run());\n}})()"
    ))
}

/// Key name, code, Windows virtual key and text for a named key
fn key_definition(key: &str) -> (String, String, i64, Option<String>) {
    match key {
        "Enter" => ("Enter".into(), "Enter".into(), 13, Some("\r".into())),
        "Tab" => ("Tab".into(), "Tab".into(), 9, None),
        "Escape" => ("Escape".into(), "Escape".into(), 27, None),
        "Backspace" => ("Backspace".into(), "Backspace".into(), 8, None),
        "ArrowDown" => ("ArrowDown".into(), "ArrowDown".into(), 40, None),
        "ArrowUp" => ("ArrowUp".into(), "ArrowUp".into(), 38, None),
        other => {
            let vk = other
                .chars()
                .next()
                .filter(|_| other.chars().count() == 1)
                .map_or(0, |c| i64::from(u32::from(c.to_ascii_uppercase())));
            (other.into(), other.into(), vk, Some(other.into()))
        }
    }
}

fn input_error(e: impl std::fmt::Display) -> FormError {
    FormError::driver(e.to_string())
}

/// Page driver backed by a real Chromium instance
#[derive(Debug)]
pub struct ChromiumDriver {
    config: DriverConfig,
    browser: Arc<Mutex<CdpBrowser>>,
    page: Arc<Mutex<CdpPage>>,
    #[allow(dead_code)]
    handle: tokio::task::JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launch Chromium and open a blank page
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched or the page cannot be created
    pub async fn launch(config: DriverConfig) -> FormResult<Self> {
        let mut builder =
            CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);

        if !config.headless {
            builder = builder.with_head();
        }

        if !config.sandbox {
            builder = builder.no_sandbox();
        }

        if let Some(ref path) = config.executable_path {
            builder = builder.chrome_executable(path);
        }

        let cdp_config = builder
            .build()
            .map_err(|e| FormError::BrowserLaunch { message: e })?;

        let (browser, mut handler) =
            CdpBrowser::launch(cdp_config)
                .await
                .map_err(|e| FormError::BrowserLaunch {
                    message: e.to_string(),
                })?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| FormError::BrowserLaunch {
                message: e.to_string(),
            })?;

        debug!(headless = config.headless, "chromium launched");
        Ok(Self {
            config,
            browser: Arc::new(Mutex::new(browser)),
            page: Arc::new(Mutex::new(page)),
            handle,
        })
    }

    /// Driver configuration
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Navigate the page to `url` and wait for the load to finish
    ///
    /// # Errors
    ///
    /// Returns error if navigation fails
    pub async fn goto(&self, url: &str) -> FormResult<()> {
        let page = self.page.lock().await;
        page.goto(url)
            .await
            .map_err(|e| FormError::driver(format!("navigation to {url} failed: {e}")))?;
        debug!(url, "navigated");
        Ok(())
    }

    /// Close the browser
    ///
    /// # Errors
    ///
    /// Returns error if the browser does not shut down cleanly
    pub async fn close(self) -> FormResult<()> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| FormError::BrowserLaunch {
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Run `body` against the first match once, without waiting
    async fn evaluate<T: DeserializeOwned>(&self, target: &Locator, body: &str) -> FormResult<Option<T>> {
        let expr = script(target, body)?;
        let page = self.page.lock().await;
        let raw: String = page
            .evaluate(expr)
            .await
            .map_err(input_error)?
            .into_value()
            .map_err(input_error)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Poll `body` until it reports a match or the element timeout runs out
    async fn poll<T: DeserializeOwned>(&self, target: &Locator, body: &str) -> FormResult<T> {
        let deadline = Instant::now() + self.config.timeout();
        loop {
            if let Some(found) = self.evaluate(target, body).await? {
                return Ok(found);
            }
            if Instant::now() >= deadline {
                return Err(FormError::Timeout {
                    selector: target.to_string(),
                    ms: self.config.element_timeout_ms,
                });
            }
            trace!(locator = %target, "waiting for element");
            tokio::time::sleep(self.config.poll()).await;
        }
    }

    async fn mouse(&self, kind: DispatchMouseEventType, x: f64, y: f64, clicks: i64) -> FormResult<()> {
        let moved = matches!(kind, DispatchMouseEventType::MouseMoved);
        let mut builder = DispatchMouseEventParams::builder().r#type(kind).x(x).y(y);
        if !moved {
            builder = builder.button(MouseButton::Left).click_count(clicks);
        }
        let params = builder.build().map_err(input_error)?;
        let page = self.page.lock().await;
        page.execute(params).await.map_err(input_error)?;
        Ok(())
    }

    /// Move, press and release at a viewport point, `count` times
    async fn click_point(&self, x: f64, y: f64, count: i64) -> FormResult<()> {
        self.mouse(DispatchMouseEventType::MouseMoved, x, y, 0).await?;
        for clicks in 1..=count {
            self.mouse(DispatchMouseEventType::MousePressed, x, y, clicks).await?;
            self.mouse(DispatchMouseEventType::MouseReleased, x, y, clicks).await?;
        }
        Ok(())
    }

    async fn key(&self, kind: DispatchKeyEventType, key: &str) -> FormResult<()> {
        let (name, code, vk, text) = key_definition(key);
        let down = matches!(kind, DispatchKeyEventType::KeyDown);
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(kind)
            .key(name)
            .code(code)
            .windows_virtual_key_code(vk)
            .native_virtual_key_code(vk);
        if let (true, Some(text)) = (down, text) {
            builder = builder.text(text);
        }
        let params = builder.build().map_err(input_error)?;
        let page = self.page.lock().await;
        page.execute(params).await.map_err(input_error)?;
        Ok(())
    }
}

#[async_trait]
impl PageDriver for ChromiumDriver {
    async fn click(&self, target: &Locator) -> FormResult<()> {
        let [x, y]: [f64; 2] = self.poll(target, CENTER_JS).await?;
        debug!(locator = %target, x, y, "click");
        self.click_point(x, y, 1).await
    }

    async fn dblclick(&self, target: &Locator) -> FormResult<()> {
        let [x, y]: [f64; 2] = self.poll(target, CENTER_JS).await?;
        debug!(locator = %target, x, y, "double click");
        self.click_point(x, y, 2).await
    }

    async fn fill(&self, target: &Locator, text: &str) -> FormResult<()> {
        let _: bool = self.poll(target, CLEAR_JS).await?;
        debug!(locator = %target, len = text.len(), "fill");
        if text.is_empty() {
            return Ok(());
        }
        let page = self.page.lock().await;
        page.execute(InsertTextParams::new(text))
            .await
            .map_err(input_error)?;
        Ok(())
    }

    async fn press(&self, target: &Locator, key: &str) -> FormResult<()> {
        let _: bool = self.poll(target, FOCUS_JS).await?;
        debug!(locator = %target, key, "press");
        self.key(DispatchKeyEventType::KeyDown, key).await?;
        self.key(DispatchKeyEventType::KeyUp, key).await
    }

    async fn wait_for(&self, target: &Locator, state: ElementState) -> FormResult<()> {
        let body = match state {
            ElementState::Attached => "return el ? true : null;",
            ElementState::Detached => "return el ? null : true;",
        };
        debug!(locator = %target, %state, "wait for");
        let _: bool = self.poll(target, body).await?;
        Ok(())
    }

    async fn has_class(&self, target: &Locator, class: &str) -> FormResult<bool> {
        let class = serde_json::to_string(class)?;
        self.poll(target, &format!("return el ? el.classList.contains({class}) : null;"))
            .await
    }

    async fn query_exists(&self, target: &Locator, css: &str) -> FormResult<bool> {
        let css = serde_json::to_string(css)?;
        self.poll(target, &format!("return el ? el.querySelector({css}) !== null : null;"))
            .await
    }

    async fn click_descendant(&self, target: &Locator, css: &str) -> FormResult<bool> {
        let css_json = serde_json::to_string(css)?;
        let clicked: bool = self
            .poll(
                target,
                &format!(
                    "if (!el) return null; const hit = el.querySelector({css_json}); if (!hit) return false; hit.click(); return true;"
                ),
            )
            .await?;
        debug!(locator = %target, css, clicked, "click descendant");
        Ok(clicked)
    }

    async fn click_at(&self, target: &Locator, x: f64, y: f64) -> FormResult<()> {
        let [left, top]: [f64; 2] = self
            .poll(
                target,
                "if (!el) return null; const r = el.getBoundingClientRect(); return [r.left, r.top];",
            )
            .await?;
        debug!(locator = %target, x, y, "click at offset");
        self.click_point(left + x, top + y, 1).await
    }

    async fn count(&self, target: &Locator) -> FormResult<usize> {
        let n: Option<usize> = self.evaluate(target, "return all.length;").await?;
        Ok(n.unwrap_or(0))
    }

    fn set_wait_budget(&mut self, element_timeout_ms: u64, poll_interval_ms: u64) {
        self.config.element_timeout_ms = element_timeout_ms;
        self.config.poll_interval_ms = poll_interval_ms;
    }
}
