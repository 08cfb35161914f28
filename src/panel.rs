use smallvec::SmallVec;
use thiserror::Error;

use crate::aria::{AccessibilityProvider, RuleAccessibilityProvider};
use crate::element::Element;
use crate::layout::{ColumnLayout, LIST_HEADER_HEIGHT};
use crate::list::RuleList;
use crate::model::{ListRowEntry, RULE_ENTRY_TEMPLATE, RuleModel};
use crate::template::RuleItemRenderer;

/// Vertical padding between the panel header and the list body.
const BODY_PADDING: f32 = 12.0;

/// Available size handed down by the host pane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimension {
    /// Width in px.
    pub width: f32,
    /// Height in px.
    pub height: f32,
}

impl Dimension {
    /// Creates a dimension.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Failures surfaced by the panel itself.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PanelError {
    /// The operation is stubbed and fails fast.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

/// Pane lifecycle stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelState {
    /// Constructed, no resolve started.
    #[default]
    Uninitialized,
    /// Model resolve in progress.
    Loading,
    /// Rows rendered from the resolved model.
    Ready,
    /// Torn down; every later callback is a no-op.
    Disposed,
}

/// Оркестратор панели правил уведомлений.
///
/// Owns the layout dimension, the column layout, and the virtualized list, and
/// is the single writer of the column width cache. A `layout` call resolves
/// widths, re-applies them to every live template synchronously in
/// template-creation order, and only then fires the public layout listeners.
pub struct RulePanel {
    state: PanelState,
    root: Element,
    aria_label: Element,
    header: Element,
    body: Element,
    list_header: Element,
    list_container: Element,
    columns: ColumnLayout,
    list: RuleList<RuleItemRenderer>,
    dimension: Option<Dimension>,
    aria: RuleAccessibilityProvider,
    on_layout: Vec<Box<dyn FnMut()>>,
}

impl RulePanel {
    /// Creates an uninitialized panel. Call [`RulePanel::create_editor`]
    /// before the first render.
    pub fn new() -> Self {
        Self {
            state: PanelState::Uninitialized,
            root: Element::new(),
            aria_label: Element::new(),
            header: Element::new(),
            body: Element::new(),
            list_header: Element::new(),
            list_container: Element::new(),
            columns: ColumnLayout::rule_header(),
            list: RuleList::new(RuleItemRenderer::new()),
            dimension: None,
            aria: RuleAccessibilityProvider,
            on_layout: Vec::new(),
        }
    }

    /// Builds the element skeleton: root, aria-live label, header, body, the
    /// 30 px list header row, and the list container.
    pub fn create_editor(&mut self) {
        self.root = Element::with_class("notifications-editor");
        self.aria_label = Element::with_class("aria-label");
        self.header = Element::with_class("notifications-header");
        self.body = Element::with_class("notifications-body");
        self.list_header = Element::with_class("notifications-list-header");
        self.list_header.set_height(LIST_HEADER_HEIGHT);
        self.list_container = Element::with_class("notifications-list-container");
    }

    /// Resolves the model and renders its rules into the list.
    ///
    /// The await on `resolve` is the panel's only suspension point. Calling
    /// `render` again re-resolves and re-renders from the latest model state;
    /// calling it on a disposed panel does nothing. Cancellation is dropping
    /// the returned future: nothing is mutated after the drop, and `dispose`
    /// still releases everything.
    pub async fn render<M: RuleModel>(&mut self, model: &mut M) -> Result<(), M::Error> {
        if self.state == PanelState::Disposed {
            return Ok(());
        }
        self.state = PanelState::Loading;
        tracing::debug!("resolving notification rules");
        model.resolve().await?;
        self.render_entries(model);
        Ok(())
    }

    fn render_entries<M: RuleModel>(&mut self, model: &M) {
        let items = model.notification_items();
        // Rule labels are the stable identity; the model carries no id of its
        // own and indices do not survive a reload.
        let entries = items
            .iter()
            .map(|item| ListRowEntry::new(item.label.clone(), item.clone()))
            .collect();
        self.list.splice(entries);
        self.aria_label
            .set_text(format!("Showing {} notifications", items.len()));
        self.layout_rule_list();
        self.state = PanelState::Ready;
        tracing::debug!(rules = items.len(), "notification rules rendered");
    }

    /// Applies a new dimension: proportional widths are reset and recomputed,
    /// live templates are resized, then the layout listeners fire.
    pub fn layout(&mut self, dimension: Dimension) {
        if self.state == PanelState::Disposed {
            return;
        }
        self.dimension = Some(dimension);
        self.root.set_width(dimension.width);
        self.root.set_height(dimension.height);

        self.columns.reset_proportional();
        self.columns.set_available_width(dimension.width);
        self.layout_rule_list();

        for listener in &mut self.on_layout {
            listener();
        }
    }

    // Width resolve + list sizing + template broadcast. No-op until a
    // dimension has been received.
    fn layout_rule_list(&mut self) {
        let Some(dimension) = self.dimension else {
            return;
        };
        self.columns.resolve();
        let widths = self.columns.widths();
        self.list.renderer_mut().set_widths(widths.clone());

        let list_height =
            (dimension.height - self.header.height() - BODY_PADDING - LIST_HEADER_HEIGHT).max(0.0);
        self.list_container.set_height(list_height);
        self.list.layout(list_height);
        self.list
            .broadcast_templates(|template| template.apply_widths(&widths));
        tracing::trace!(
            width = dimension.width,
            list_height,
            "rule list laid out"
        );
    }

    /// Registers a listener fired after every successful `layout` call.
    pub fn on_layout(&mut self, listener: impl FnMut() + 'static) {
        if self.state != PanelState::Disposed {
            self.on_layout.push(Box::new(listener));
        }
    }

    /// Focuses and selects the row currently holding `entry`.
    ///
    /// The entry is resolved to its current index by exact match first, then
    /// by an identity scan on `id`, so selection survives positional drift
    /// after a model reload. Unresolvable entries are a no-op.
    pub fn select_entry(&mut self, entry: &ListRowEntry) {
        if let Some(index) = self.index_of(entry) {
            self.select_index(index);
        }
    }

    /// Focuses and selects the row at `index`. Stale indices are a no-op.
    pub fn select_index(&mut self, index: usize) {
        if self.state == PanelState::Disposed || index >= self.list.len() {
            return;
        }
        self.list.set_focus(&[index]);
        self.list.set_selection(&[index]);
    }

    fn index_of(&self, entry: &ListRowEntry) -> Option<usize> {
        let entries = self.list.entries();
        entries
            .iter()
            .position(|existing| existing == entry)
            .or_else(|| entries.iter().position(|existing| existing.id == entry.id))
    }

    /// Re-selects the active entry, if any.
    pub fn focus(&mut self) {
        if let Some(index) = self.active_index() {
            self.select_index(index);
        }
    }

    /// Focuses the rule list, keeping the current focus index or starting at
    /// the first row.
    pub fn focus_rules(&mut self) {
        let current = self.list.get_focus().first().copied().unwrap_or(0);
        self.list.set_focus(&[current]);
    }

    /// Selects the given rule entry with focus.
    pub fn select_rule(&mut self, entry: &ListRowEntry) {
        self.select_entry(entry);
    }

    /// Resets pane-scoped focus and selection bookkeeping.
    pub fn clear_input(&mut self) {
        if self.state == PanelState::Disposed {
            return;
        }
        self.list.set_focus(&[]);
        self.list.set_selection(&[]);
    }

    /// Selects the entry under a context-menu request when it is a rule row.
    pub fn handle_context_menu(&mut self, index: usize) {
        let Some(entry) = self.list.entry_at(index) else {
            return;
        };
        if entry.kind == RULE_ENTRY_TEMPLATE {
            self.select_index(index);
        }
    }

    /// The focused entry, when it is a rule row.
    pub fn active_entry(&self) -> Option<&ListRowEntry> {
        self.active_index().and_then(|index| self.list.entry_at(index))
    }

    fn active_index(&self) -> Option<usize> {
        let index = self.list.get_focus().first().copied()?;
        let entry = self.list.entry_at(index)?;
        (entry.kind == RULE_ENTRY_TEMPLATE).then_some(index)
    }

    /// Filters the rule list. Stubbed.
    pub fn search(&self, _filter: &str) -> Result<(), PanelError> {
        Err(PanelError::NotImplemented("search"))
    }

    /// Moves focus into the search widget. Stubbed.
    pub fn focus_search(&self) -> Result<(), PanelError> {
        Err(PanelError::NotImplemented("focus search"))
    }

    /// Clears an active search. Stubbed.
    pub fn clear_search_results(&self) -> Result<(), PanelError> {
        Err(PanelError::NotImplemented("clear search results"))
    }

    /// Re-enables a suppressed notification. Stubbed.
    pub fn show_notification_again(&self, _entry: &ListRowEntry) -> Result<(), PanelError> {
        Err(PanelError::NotImplemented("show notification again"))
    }

    /// Releases the list and every template, exactly once. Later lifecycle
    /// calls are no-ops.
    pub fn dispose(&mut self) {
        if self.state == PanelState::Disposed {
            return;
        }
        self.on_layout.clear();
        self.list.dispose();
        self.state = PanelState::Disposed;
        tracing::debug!("rule panel disposed");
    }

    /// Returns the lifecycle stage.
    #[inline]
    pub const fn state(&self) -> PanelState {
        self.state
    }

    /// Returns the last received dimension, if any.
    #[inline]
    pub const fn dimension(&self) -> Option<Dimension> {
        self.dimension
    }

    /// Returns the root element.
    #[inline]
    pub const fn root(&self) -> &Element {
        &self.root
    }

    /// Returns the aria-live summary text ("Showing {n} notifications").
    #[inline]
    pub fn aria_summary(&self) -> &str {
        self.aria_label.text()
    }

    /// Returns the accessibility label announced for one entry.
    pub fn entry_aria_label(&self, entry: &ListRowEntry) -> String {
        self.aria.entry_label(entry)
    }

    /// Returns the column layout.
    #[inline]
    pub const fn columns(&self) -> &ColumnLayout {
        &self.columns
    }

    /// Returns the resolved column widths in layout order.
    pub fn column_widths(&self) -> SmallVec<[f32; 4]> {
        self.columns.widths()
    }

    /// Returns the rule list.
    #[inline]
    pub const fn list(&self) -> &RuleList<RuleItemRenderer> {
        &self.list
    }

    /// Returns the rule list mutably.
    pub const fn list_mut(&mut self) -> &mut RuleList<RuleItemRenderer> {
        &mut self.list
    }
}

impl Default for RulePanel {
    fn default() -> Self {
        Self::new()
    }
}
