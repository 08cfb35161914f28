use smallvec::SmallVec;

use crate::action::{ListAction, ListEvent};
use crate::element::Element;
use crate::model::TemplateKind;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "keymap")]
use crate::keymap::ListKeyBindings;
#[cfg(feature = "keymap")]
use crossterm::event::KeyEvent;

/// Renderer capability the list engine drives.
///
/// The engine owns the template pool's lifetime and calls back synchronously
/// from its own update cycle: a template is created once per pool slot,
/// rebound many times as the viewport scrolls, and released exactly once.
pub trait RowRenderer {
    /// Data row type.
    type Entry;
    /// Reusable template type.
    type Template;

    /// Returns the template kind for an entry.
    fn template_kind(&self, entry: &Self::Entry) -> TemplateKind;

    /// Returns the row height in px for an entry.
    fn row_height(&self, entry: &Self::Entry) -> f32;

    /// Creates a fresh template under the given row container element.
    fn create_template(&mut self, container: Element) -> Self::Template;

    /// Binds one entry into an existing template. Must not allocate new
    /// columns; only rendered content changes.
    fn bind_row(&mut self, entry: &Self::Entry, index: usize, template: &mut Self::Template);

    /// Releases a template and everything it owns.
    fn release_template(&mut self, template: Self::Template);
}

struct Slot<T> {
    template: T,
    bound: Option<usize>,
}

/// Snapshot of list view state (focus, selection, scroll offset).
///
/// With the `serde` feature enabled, this type derives
/// `Serialize`/`Deserialize`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct RuleListSnapshot {
    /// Focused row indices.
    pub focus: Vec<usize>,
    /// Selected row indices.
    pub selection: Vec<usize>,
    /// Scroll offset within the entry list.
    pub offset: usize,
}

/// Виртуализированный список строк поверх пула шаблонов.
///
/// Holds the entries, the recycled template pool, and focus/selection. The
/// pool never grows past what the laid-out height can show; scrolling rebinds
/// the existing templates to the rows that moved into view.
pub struct RuleList<R: RowRenderer> {
    renderer: R,
    entries: Vec<R::Entry>,
    // Pool slots stay in template-creation order; broadcasts rely on it.
    pool: Vec<Slot<R::Template>>,
    height: f32,
    offset: usize,
    focus: SmallVec<[usize; 1]>,
    selection: SmallVec<[usize; 1]>,
    focus_listeners: Vec<Box<dyn FnMut(&[usize])>>,
    disposed: bool,
    #[cfg(feature = "keymap")]
    keymap: ListKeyBindings,
}

impl<R: RowRenderer> RuleList<R> {
    /// Creates an empty list over the given renderer.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            entries: Vec::new(),
            pool: Vec::new(),
            height: 0.0,
            offset: 0,
            focus: SmallVec::new(),
            selection: SmallVec::new(),
            focus_listeners: Vec::new(),
            disposed: false,
            #[cfg(feature = "keymap")]
            keymap: ListKeyBindings::new(),
        }
    }

    /// Returns the renderer.
    #[inline]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Returns the renderer mutably.
    pub const fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Returns the current entries.
    #[inline]
    pub fn entries(&self) -> &[R::Entry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry at `index`, if in range.
    pub fn entry_at(&self, index: usize) -> Option<&R::Entry> {
        self.entries.get(index)
    }

    /// Returns the scroll offset (first bound row index).
    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Replaces the entries and rebinds the pool.
    ///
    /// Focus and selection indices that no longer exist are dropped.
    pub fn splice(&mut self, entries: Vec<R::Entry>) {
        if self.disposed {
            return;
        }
        self.entries = entries;
        let len = self.entries.len();
        self.focus.retain(|index| *index < len);
        self.selection.retain(|index| *index < len);
        self.rebind();
    }

    /// Lays the list out at the given height in px and rebinds the pool.
    pub fn layout(&mut self, height: f32) {
        if self.disposed {
            return;
        }
        self.height = height.max(0.0);
        self.rebind();
        tracing::trace!(height = self.height, templates = self.pool.len(), "list layout");
    }

    /// Scrolls so the given row is the first bound one (clamped).
    pub fn scroll_to(&mut self, offset: usize) {
        if self.disposed {
            return;
        }
        self.offset = offset;
        self.rebind();
    }

    /// Adjusts the offset so the row at `index` is bound and in view.
    pub fn ensure_visible(&mut self, index: usize) {
        if self.disposed || index >= self.entries.len() {
            return;
        }
        let viewport = self.viewport_rows().max(1);
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + viewport {
            self.offset = index + 1 - viewport;
        }
        self.rebind();
    }

    /// Applies focus. Out-of-range indices are guarded: a request carrying
    /// only stale indices is a no-op.
    pub fn set_focus(&mut self, indices: &[usize]) {
        if self.disposed {
            return;
        }
        let len = self.entries.len();
        let valid: SmallVec<[usize; 1]> = indices.iter().copied().filter(|i| *i < len).collect();
        if valid.is_empty() && !indices.is_empty() {
            return;
        }
        self.focus = valid;
        if let Some(first) = self.focus.first().copied() {
            self.ensure_visible(first);
        }
        let focus = self.focus.clone();
        for listener in &mut self.focus_listeners {
            listener(&focus);
        }
    }

    /// Registers a listener fired after every applied focus change.
    pub fn on_did_focus(&mut self, listener: impl FnMut(&[usize]) + 'static) {
        if !self.disposed {
            self.focus_listeners.push(Box::new(listener));
        }
    }

    /// Applies selection with the same stale-index guard as `set_focus`.
    pub fn set_selection(&mut self, indices: &[usize]) {
        if self.disposed {
            return;
        }
        let len = self.entries.len();
        let valid: SmallVec<[usize; 1]> = indices.iter().copied().filter(|i| *i < len).collect();
        if valid.is_empty() && !indices.is_empty() {
            return;
        }
        self.selection = valid;
    }

    /// Returns the focused row indices.
    #[inline]
    pub fn get_focus(&self) -> &[usize] {
        &self.focus
    }

    /// Returns the selected row indices.
    #[inline]
    pub fn get_selection(&self) -> &[usize] {
        &self.selection
    }

    /// Returns the first focused entry, if any.
    pub fn focused_entry(&self) -> Option<&R::Entry> {
        self.focus
            .first()
            .and_then(|index| self.entries.get(*index))
    }

    /// Returns every focused entry, in focus order.
    pub fn focused_entries(&self) -> impl Iterator<Item = &R::Entry> {
        self.focus.iter().filter_map(|index| self.entries.get(*index))
    }

    /// Moves focus and selection to the previous row.
    pub fn select_prev(&mut self) {
        if self.entries.is_empty() {
            self.focus.clear();
            self.selection.clear();
            return;
        }
        let current = self.focus.first().copied().unwrap_or(0);
        let target = current.saturating_sub(1);
        self.set_focus(&[target]);
        self.set_selection(&[target]);
    }

    /// Moves focus and selection to the next row.
    pub fn select_next(&mut self) {
        if self.entries.is_empty() {
            self.focus.clear();
            self.selection.clear();
            return;
        }
        let current = self.focus.first().copied().unwrap_or(0);
        let target = (current + 1).min(self.entries.len().saturating_sub(1));
        self.set_focus(&[target]);
        self.set_selection(&[target]);
    }

    /// Moves focus and selection to the first row.
    pub fn select_first(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.set_focus(&[0]);
        self.set_selection(&[0]);
    }

    /// Moves focus and selection to the last row.
    pub fn select_last(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let last = self.entries.len() - 1;
        self.set_focus(&[last]);
        self.set_selection(&[last]);
    }

    /// Handles a selection action against the current entries.
    pub fn handle_action<C>(&mut self, action: ListAction<C>) -> ListEvent<C> {
        if self.disposed || self.entries.is_empty() {
            return ListEvent::Unhandled;
        }
        match action {
            ListAction::SelectPrev => {
                self.select_prev();
                ListEvent::Handled
            }
            ListAction::SelectNext => {
                self.select_next();
                ListEvent::Handled
            }
            ListAction::SelectFirst => {
                self.select_first();
                ListEvent::Handled
            }
            ListAction::SelectLast => {
                self.select_last();
                ListEvent::Handled
            }
            ListAction::Custom(custom) => ListEvent::Action(ListAction::Custom(custom)),
        }
    }

    #[cfg(feature = "keymap")]
    /// Returns the key bindings mutably.
    pub const fn keymap_mut(&mut self) -> &mut ListKeyBindings {
        &mut self.keymap
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event into an action and handles it.
    pub fn handle_key(&mut self, key: KeyEvent) -> ListEvent<()> {
        let Some(action) = self.keymap.resolve(key) else {
            return ListEvent::Unhandled;
        };
        self.handle_action(action)
    }

    #[cfg(feature = "keymap")]
    /// Resolves a key event with a custom mapping and handles it.
    pub fn handle_key_with<C, F>(&mut self, key: KeyEvent, custom: F) -> ListEvent<C>
    where
        F: Fn(KeyEvent) -> Option<C>,
    {
        let Some(action) = self.keymap.resolve_with(key, custom) else {
            return ListEvent::Unhandled;
        };
        self.handle_action(action)
    }

    /// Runs `apply` over every live template, synchronously, in
    /// template-creation order.
    pub fn broadcast_templates(&mut self, mut apply: impl FnMut(&mut R::Template)) {
        for slot in &mut self.pool {
            apply(&mut slot.template);
        }
    }

    /// Returns `(row index, template)` for every currently bound template.
    pub fn bound_templates(&self) -> impl Iterator<Item = (usize, &R::Template)> {
        self.pool
            .iter()
            .filter_map(|slot| slot.bound.map(|row| (row, &slot.template)))
    }

    /// Returns the number of live templates in the pool.
    #[inline]
    pub fn template_count(&self) -> usize {
        self.pool.len()
    }

    /// Captures focus, selection, and scroll offset.
    pub fn snapshot(&self) -> RuleListSnapshot {
        RuleListSnapshot {
            focus: self.focus.to_vec(),
            selection: self.selection.to_vec(),
            offset: self.offset,
        }
    }

    /// Restores a previously captured snapshot, clamped to the current
    /// entries.
    pub fn restore(&mut self, snapshot: RuleListSnapshot) {
        if self.disposed {
            return;
        }
        let len = self.entries.len();
        self.focus = snapshot.focus.into_iter().filter(|i| *i < len).collect();
        self.selection = snapshot
            .selection
            .into_iter()
            .filter(|i| *i < len)
            .collect();
        self.offset = snapshot.offset;
        self.rebind();
    }

    /// Releases every template exactly once and turns later calls into
    /// no-ops.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for slot in self.pool.drain(..) {
            self.renderer.release_template(slot.template);
        }
        self.focus.clear();
        self.selection.clear();
        self.focus_listeners.clear();
        self.disposed = true;
        tracing::debug!("rule list disposed");
    }

    /// Returns `true` once `dispose` has run.
    #[inline]
    pub const fn is_disposed(&self) -> bool {
        self.disposed
    }

    // Rows that fit fully in the laid-out height.
    fn viewport_rows(&self) -> usize {
        let Some(first) = self.entries.first() else {
            return 0;
        };
        let row_height = self.renderer.row_height(first).max(1.0);
        (self.height / row_height) as usize
    }

    // Rows that need a template (a partial trailing row still gets one).
    fn pool_target(&self) -> usize {
        let Some(first) = self.entries.first() else {
            return 0;
        };
        let row_height = self.renderer.row_height(first).max(1.0);
        let rows = (self.height / row_height).ceil() as usize;
        rows.min(self.entries.len())
    }

    fn rebind(&mut self) {
        let target = self.pool_target();

        if self.pool.len() > target {
            for slot in self.pool.drain(target..) {
                self.renderer.release_template(slot.template);
            }
        }
        while self.pool.len() < target {
            let template = self
                .renderer
                .create_template(Element::with_class("notification-item"));
            self.pool.push(Slot {
                template,
                bound: None,
            });
        }

        self.offset = self.offset.min(self.entries.len().saturating_sub(target));

        let Self {
            renderer,
            entries,
            pool,
            offset,
            ..
        } = self;
        for (slot_index, slot) in pool.iter_mut().enumerate() {
            let row = *offset + slot_index;
            if let Some(entry) = entries.get(row) {
                renderer.bind_row(entry, row, &mut slot.template);
                slot.bound = Some(row);
            } else {
                slot.bound = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RULE_ENTRY_TEMPLATE;

    struct TestTemplate {
        serial: usize,
        bound: Option<(usize, u32)>,
    }

    #[derive(Default)]
    struct TestRenderer {
        created: usize,
        released: usize,
    }

    impl RowRenderer for TestRenderer {
        type Entry = u32;
        type Template = TestTemplate;

        fn template_kind(&self, _entry: &u32) -> TemplateKind {
            RULE_ENTRY_TEMPLATE
        }

        fn row_height(&self, _entry: &u32) -> f32 {
            24.0
        }

        fn create_template(&mut self, _container: Element) -> TestTemplate {
            self.created += 1;
            TestTemplate {
                serial: self.created,
                bound: None,
            }
        }

        fn bind_row(&mut self, entry: &u32, index: usize, template: &mut TestTemplate) {
            template.bound = Some((index, *entry));
        }

        fn release_template(&mut self, _template: TestTemplate) {
            self.released += 1;
        }
    }

    fn list_with(entries: Vec<u32>, height: f32) -> RuleList<TestRenderer> {
        let mut list = RuleList::new(TestRenderer::default());
        list.splice(entries);
        list.layout(height);
        list
    }

    #[test]
    fn pool_tracks_the_laid_out_height() {
        let mut list = list_with(vec![10, 20, 30, 40, 50], 72.0);
        assert_eq!(list.template_count(), 3);
        assert_eq!(list.renderer().created, 3);

        // Shrinking the viewport releases the surplus templates.
        list.layout(48.0);
        assert_eq!(list.template_count(), 2);
        assert_eq!(list.renderer().released, 1);

        // The pool never outgrows the entry count.
        list.layout(2000.0);
        assert_eq!(list.template_count(), 5);
    }

    #[test]
    fn scrolling_rebinds_rather_than_recreates() {
        let mut list = list_with(vec![10, 20, 30, 40, 50], 72.0);
        list.scroll_to(9);

        // Clamped to the last full window.
        assert_eq!(list.offset(), 2);
        let bound: Vec<_> = list.bound_templates().map(|(row, _)| row).collect();
        assert_eq!(bound, vec![2, 3, 4]);
        assert_eq!(list.renderer().created, 3, "no new templates on scroll");
    }

    #[test]
    fn stale_focus_and_selection_are_no_ops() {
        let mut list = list_with(vec![10, 20, 30], 72.0);
        list.set_focus(&[1]);
        list.set_selection(&[1]);

        list.set_focus(&[7]);
        list.set_selection(&[7]);
        assert_eq!(list.get_focus(), &[1]);
        assert_eq!(list.get_selection(), &[1]);

        // An explicit empty request does clear.
        list.set_focus(&[]);
        assert!(list.get_focus().is_empty());
    }

    #[test]
    fn splice_drops_out_of_range_focus() {
        let mut list = list_with(vec![10, 20, 30, 40, 50], 72.0);
        list.set_focus(&[4]);
        list.splice(vec![10, 20]);
        assert!(list.get_focus().is_empty());
        assert_eq!(list.template_count(), 2);
    }

    #[test]
    fn focus_scrolls_the_row_into_view() {
        let mut list = list_with(vec![10, 20, 30, 40, 50, 60], 72.0);
        list.set_focus(&[5]);
        assert_eq!(list.offset(), 3);

        list.set_focus(&[0]);
        assert_eq!(list.offset(), 0);
    }

    #[test]
    fn broadcast_walks_templates_in_creation_order() {
        let mut list = list_with(vec![10, 20, 30, 40], 96.0);
        let mut serials = Vec::new();
        list.broadcast_templates(|template| serials.push(template.serial));
        assert_eq!(serials, vec![1, 2, 3, 4]);
    }

    #[test]
    fn dispose_releases_every_template_exactly_once() {
        let mut list = list_with(vec![10, 20, 30], 72.0);
        list.dispose();
        assert_eq!(list.renderer().released, 3);

        // Later calls are no-ops.
        list.dispose();
        list.layout(200.0);
        list.set_focus(&[0]);
        assert_eq!(list.renderer().released, 3);
        assert_eq!(list.template_count(), 0);
        assert!(list.get_focus().is_empty());
    }

    #[test]
    fn snapshot_round_trips_and_clamps() {
        let mut list = list_with(vec![10, 20, 30, 40, 50], 72.0);
        list.set_focus(&[3]);
        list.set_selection(&[3]);
        let snapshot = list.snapshot();

        let mut restored = list_with(vec![10, 20], 72.0);
        restored.restore(snapshot);
        assert!(restored.get_focus().is_empty(), "index 3 no longer exists");
        assert_eq!(restored.offset(), 0);
    }

    #[test]
    fn select_next_and_prev_move_focus_with_selection() {
        let mut list = list_with(vec![10, 20, 30], 72.0);
        list.select_next();
        assert_eq!(list.get_focus(), &[1]);
        assert_eq!(list.get_selection(), &[1]);

        list.select_next();
        list.select_next();
        assert_eq!(list.get_focus(), &[2], "clamped at the last row");

        list.select_prev();
        assert_eq!(list.get_focus(), &[1]);

        list.select_last();
        assert_eq!(list.get_selection(), &[2]);
        list.select_first();
        assert_eq!(list.get_selection(), &[0]);
    }

    #[test]
    fn actions_drive_selection_and_forward_custom_ones() {
        let mut list = list_with(vec![10, 20, 30], 72.0);

        assert!(matches!(
            list.handle_action::<()>(ListAction::SelectLast),
            ListEvent::Handled
        ));
        assert_eq!(list.get_selection(), &[2]);

        assert!(matches!(
            list.handle_action(ListAction::Custom("open")),
            ListEvent::Action(ListAction::Custom("open"))
        ));

        let mut empty = list_with(vec![], 72.0);
        assert!(matches!(
            empty.handle_action::<()>(ListAction::SelectNext),
            ListEvent::Unhandled
        ));
    }

    #[test]
    fn focus_listeners_observe_applied_changes_only() {
        let mut list = list_with(vec![10, 20, 30], 72.0);
        let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let observer = std::rc::Rc::clone(&seen);
        list.on_did_focus(move |focus| observer.borrow_mut().push(focus.to_vec()));

        list.set_focus(&[2]);
        // A stale-only request never reaches the listeners.
        list.set_focus(&[9]);
        assert_eq!(*seen.borrow(), vec![vec![2]]);
        assert_eq!(list.focused_entries().copied().collect::<Vec<_>>(), vec![30]);
    }

    #[cfg(feature = "keymap")]
    #[test]
    fn keys_resolve_through_the_bound_profile() {
        use crossterm::event::{KeyCode, KeyEvent};

        use crate::keymap::KeymapProfile;

        let mut list = list_with(vec![10, 20, 30], 72.0);
        assert!(matches!(
            list.handle_key(KeyEvent::from(KeyCode::Down)),
            ListEvent::Handled
        ));
        assert_eq!(list.get_selection(), &[1]);

        list.keymap_mut().set_profile(KeymapProfile::Vim);
        assert!(matches!(
            list.handle_key(KeyEvent::from(KeyCode::Down)),
            ListEvent::Unhandled
        ));
        assert!(matches!(
            list.handle_key(KeyEvent::from(KeyCode::Char('j'))),
            ListEvent::Handled
        ));
        assert_eq!(list.get_selection(), &[2]);
    }
}
