//! Mock Page for Testing Fill Strategies
//!
//! [`MockPage`] is an in-memory element tree that implements
//! [`PageDriver`]. Widgets are assembled with the builders in [`antd`], which
//! render the same marker classes the real component library does and wire
//! up scripted [`Reaction`]s so that clicking a switcher reveals children,
//! clicking an option commits it, and so on.
//!
//! Time is simulated: every poll of an auto-wait advances a tick clock, and
//! reactions registered with [`MockPage::schedule`] fire once their tick is
//! reached. Waits never sleep, so a test exercising a five second timeout
//! finishes immediately.
//!
//! ## Example
//!
//! ```rust
//! use antform::mock::{MockPage, Trigger, Reaction};
//! use antform::{Locator, PageDriver};
//!
//! # futures::executor::block_on(async {
//! let page = MockPage::new();
//! let button = page.element(page.body(), "button", &["btn"], "Save");
//! page.on(button, Trigger::Click, Reaction::AddClass { node: button, class: "clicked".into() });
//!
//! page.click(&Locator::new(".btn")).await.unwrap();
//! assert!(page.node_has_class(button, "clicked"));
//! # });
//! ```

pub mod antd;
mod dom;

pub use antd::{
    CascaderFixture, ChoiceFixture, FormItemFixture, SelectFixture, TreeFixtureNode,
    TreeNodeHandle, TreeSelectFixture, TreeSelectKind,
};
pub use dom::{NodeId, DOCUMENT};

use crate::driver::{DriverConfig, ElementState, PageDriver};
use crate::locator::Locator;
use crate::result::{FormError, FormResult};
use async_trait::async_trait;
use dom::{Dom, Node};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Action that fires the reactions registered on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Trigger {
    /// Single click (including `click_at` and `click_descendant`)
    Click,
    /// Double click
    DoubleClick,
    /// Content replaced through `fill`
    Fill,
    /// Key pressed through `press`
    Press,
}

/// Scripted change to the element tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reaction {
    /// Add a class to a node
    AddClass {
        /// Node to change
        node: NodeId,
        /// Class name
        class: String,
    },
    /// Remove a class from a node
    RemoveClass {
        /// Node to change
        node: NodeId,
        /// Class name
        class: String,
    },
    /// Toggle a class on a node
    ToggleClass {
        /// Node to change
        node: NodeId,
        /// Class name
        class: String,
    },
    /// Render a node (and its attached descendants)
    Attach(NodeId),
    /// Remove a node from the rendered tree
    Detach(NodeId),
    /// Replace a node's own text
    SetText {
        /// Node to change
        node: NodeId,
        /// New text
        text: String,
    },
    /// Replace a node's value
    SetValue {
        /// Node to change
        node: NodeId,
        /// New value
        value: String,
    },
}

/// What the driver was asked to do
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// `click`
    Click,
    /// `dblclick`
    DoubleClick,
    /// `fill`
    Fill(String),
    /// `press`
    Press(String),
    /// `click_at`
    ClickAt(f64, f64),
    /// `wait_for`
    WaitFor(ElementState),
    /// `has_class`
    HasClass(String),
    /// `query_exists`
    Query(String),
    /// `count`
    Count,
}

/// One recorded driver call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// The call
    pub action: Action,
    /// Node acted on, when one was resolved
    pub node: Option<NodeId>,
    /// Rendered locator
    pub target: String,
}

#[derive(Debug, Default)]
struct State {
    dom: Dom,
    reactions: Vec<(NodeId, Trigger, Reaction)>,
    scheduled: Vec<(u64, Reaction)>,
    clock: u64,
    log: Vec<Interaction>,
}

impl State {
    fn apply(&mut self, reaction: &Reaction) {
        match reaction {
            Reaction::AddClass { node, class } => {
                let classes = &mut self.dom.node_mut(*node).classes;
                if !classes.contains(class) {
                    classes.push(class.clone());
                }
            }
            Reaction::RemoveClass { node, class } => {
                self.dom.node_mut(*node).classes.retain(|c| c != class);
            }
            Reaction::ToggleClass { node, class } => {
                let classes = &mut self.dom.node_mut(*node).classes;
                if classes.contains(class) {
                    classes.retain(|c| c != class);
                } else {
                    classes.push(class.clone());
                }
            }
            Reaction::Attach(node) => self.dom.node_mut(*node).attached = true,
            Reaction::Detach(node) => self.dom.node_mut(*node).attached = false,
            Reaction::SetText { node, text } => self.dom.node_mut(*node).text.clone_from(text),
            Reaction::SetValue { node, value } => {
                self.dom.node_mut(*node).value.clone_from(value);
            }
        }
    }

    fn fire(&mut self, node: NodeId, trigger: Trigger) {
        let due: Vec<Reaction> = self
            .reactions
            .iter()
            .filter(|(n, t, _)| *n == node && *t == trigger)
            .map(|(_, _, r)| r.clone())
            .collect();
        for reaction in &due {
            self.apply(reaction);
        }
    }

    fn tick(&mut self) {
        self.clock += 1;
        let clock = self.clock;
        let (due, pending): (Vec<_>, Vec<_>) =
            self.scheduled.drain(..).partition(|(at, _)| *at <= clock);
        self.scheduled = pending;
        for (_, reaction) in &due {
            self.apply(reaction);
        }
    }

    fn find(&self, target: &Locator) -> Vec<NodeId> {
        self.dom.resolve(target.steps(), vec![DOCUMENT])
    }

    fn record(&mut self, action: Action, node: Option<NodeId>, target: &Locator) {
        self.log.push(Interaction {
            action,
            node,
            target: target.to_string(),
        });
    }
}

/// In-memory page implementing [`PageDriver`].
#[derive(Debug)]
pub struct MockPage {
    state: Mutex<State>,
    config: DriverConfig,
    body: NodeId,
}

impl Default for MockPage {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPage {
    /// Create a page holding an empty `<body>`
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DriverConfig::default())
    }

    /// Create a page with custom wait settings
    #[must_use]
    pub fn with_config(config: DriverConfig) -> Self {
        let mut state = State::default();
        let body = state.dom.append(DOCUMENT, Node::new("body", &[], ""));
        Self {
            state: Mutex::new(state),
            config,
            body,
        }
    }

    /// The `<body>` element
    #[must_use]
    pub const fn body(&self) -> NodeId {
        self.body
    }

    /// Wait settings used by every auto-wait
    #[must_use]
    pub const fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Append a rendered element under `parent`
    pub fn element(&self, parent: NodeId, tag: &str, classes: &[&str], text: &str) -> NodeId {
        self.lock().dom.append(parent, Node::new(tag, classes, text))
    }

    /// Register a reaction fired when `trigger` hits exactly `node`
    pub fn on(&self, node: NodeId, trigger: Trigger, reaction: Reaction) {
        self.lock().reactions.push((node, trigger, reaction));
    }

    /// Apply a reaction once the clock has advanced `after_ticks` more ticks
    pub fn schedule(&self, after_ticks: u64, reaction: Reaction) {
        let mut state = self.lock();
        let at = state.clock + after_ticks;
        state.scheduled.push((at, reaction));
    }

    /// Apply a reaction right away
    pub fn apply(&self, reaction: &Reaction) {
        self.lock().apply(reaction);
    }

    /// Advance the clock by one tick
    pub fn tick(&self) {
        self.lock().tick();
    }

    /// Current tick
    #[must_use]
    pub fn clock(&self) -> u64 {
        self.lock().clock
    }

    /// Current value of a node
    #[must_use]
    pub fn value(&self, node: NodeId) -> String {
        self.lock().dom.node(node).value.clone()
    }

    /// Text content of a node and its rendered descendants
    #[must_use]
    pub fn text(&self, node: NodeId) -> String {
        self.lock().dom.text_content(node)
    }

    /// Whether a node carries `class`
    #[must_use]
    pub fn node_has_class(&self, node: NodeId, class: &str) -> bool {
        self.lock().dom.node(node).classes.iter().any(|c| c == class)
    }

    /// Whether a node and all of its ancestors are rendered
    #[must_use]
    pub fn is_rendered(&self, node: NodeId) -> bool {
        self.lock().dom.is_rendered(node)
    }

    /// Elements currently matching a locator, in document order
    #[must_use]
    pub fn find(&self, target: &Locator) -> Vec<NodeId> {
        self.lock().find(target)
    }

    /// Every recorded driver call
    #[must_use]
    pub fn interactions(&self) -> Vec<Interaction> {
        self.lock().log.clone()
    }

    /// Number of clicks that landed on `node`
    #[must_use]
    pub fn clicks_on(&self, node: NodeId) -> usize {
        self.lock()
            .log
            .iter()
            .filter(|i| i.node == Some(node))
            .filter(|i| matches!(i.action, Action::Click | Action::ClickAt(..)))
            .count()
    }

    /// Forget recorded calls
    pub fn clear_log(&self) {
        self.lock().log.clear();
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn timeout(&self, target: &Locator) -> FormError {
        FormError::Timeout {
            selector: target.to_string(),
            ms: self.config.element_timeout_ms,
        }
    }

    /// Poll until the locator matches, ticking the clock between polls
    fn wait_attached(&self, target: &Locator) -> FormResult<NodeId> {
        for _ in 0..=self.config.max_polls() {
            let mut state = self.lock();
            if let Some(&node) = state.find(target).first() {
                return Ok(node);
            }
            state.tick();
        }
        Err(self.timeout(target))
    }

    fn act(&self, target: &Locator, action: Action, trigger: Option<Trigger>) -> FormResult<NodeId> {
        let node = self.wait_attached(target)?;
        let mut state = self.lock();
        if let Action::Fill(text) = &action {
            state.dom.node_mut(node).value.clone_from(text);
        }
        state.record(action, Some(node), target);
        if let Some(trigger) = trigger {
            state.fire(node, trigger);
        }
        Ok(node)
    }
}

#[async_trait]
impl PageDriver for MockPage {
    async fn click(&self, target: &Locator) -> FormResult<()> {
        self.act(target, Action::Click, Some(Trigger::Click)).map(|_| ())
    }

    async fn dblclick(&self, target: &Locator) -> FormResult<()> {
        self.act(target, Action::DoubleClick, Some(Trigger::DoubleClick))
            .map(|_| ())
    }

    async fn fill(&self, target: &Locator, text: &str) -> FormResult<()> {
        self.act(target, Action::Fill(text.to_string()), Some(Trigger::Fill))
            .map(|_| ())
    }

    async fn press(&self, target: &Locator, key: &str) -> FormResult<()> {
        self.act(target, Action::Press(key.to_string()), Some(Trigger::Press))
            .map(|_| ())
    }

    async fn wait_for(&self, target: &Locator, state: ElementState) -> FormResult<()> {
        for _ in 0..=self.config.max_polls() {
            let mut page = self.lock();
            let found = page.find(target);
            let done = match state {
                ElementState::Attached => !found.is_empty(),
                ElementState::Detached => found.is_empty(),
            };
            if done {
                page.record(Action::WaitFor(state), found.first().copied(), target);
                return Ok(());
            }
            page.tick();
        }
        Err(self.timeout(target))
    }

    async fn has_class(&self, target: &Locator, class: &str) -> FormResult<bool> {
        let node = self.act(target, Action::HasClass(class.to_string()), None)?;
        Ok(self.node_has_class(node, class))
    }

    async fn query_exists(&self, target: &Locator, css: &str) -> FormResult<bool> {
        let node = self.act(target, Action::Query(css.to_string()), None)?;
        let state = self.lock();
        Ok(!state
            .dom
            .resolve(Locator::new(css).steps(), vec![node])
            .is_empty())
    }

    async fn click_descendant(&self, target: &Locator, css: &str) -> FormResult<bool> {
        let node = self.wait_attached(target)?;
        let mut state = self.lock();
        let inner = Locator::new(css);
        let hits = state.dom.resolve(inner.steps(), vec![node]);
        let Some(&hit) = hits.first() else {
            return Ok(false);
        };
        let rendered = Locator::from_steps([target.steps(), inner.steps()].concat());
        state.record(Action::Click, Some(hit), &rendered);
        state.fire(hit, Trigger::Click);
        Ok(true)
    }

    async fn click_at(&self, target: &Locator, x: f64, y: f64) -> FormResult<()> {
        self.act(target, Action::ClickAt(x, y), Some(Trigger::Click))
            .map(|_| ())
    }

    async fn count(&self, target: &Locator) -> FormResult<usize> {
        let mut state = self.lock();
        let found = state.find(target);
        state.record(Action::Count, found.first().copied(), target);
        Ok(found.len())
    }

    fn set_wait_budget(&mut self, element_timeout_ms: u64, poll_interval_ms: u64) {
        self.config.element_timeout_ms = element_timeout_ms;
        self.config.poll_interval_ms = poll_interval_ms;
    }
}
