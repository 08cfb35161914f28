use smallvec::SmallVec;

use crate::columns::{RuleColumn, create_columns};
use crate::dispose::DisposableStore;
use crate::element::Element;
use crate::layout::COLUMN_GUTTER;
use crate::list::RowRenderer;
use crate::model::{ListRowEntry, TemplateKind};

/// Uniform row height in px; no per-row measurement exists.
pub const ROW_HEIGHT: f32 = 24.0;

/// One reusable pool slot: the row container, the fixed ordered column set,
/// and the aggregate release group.
///
/// Created once per slot by the list engine, rebound many times, released
/// exactly once. Live templates receive every relayout broadcast after their
/// creation; widths current at creation time are applied immediately.
pub struct RowTemplate {
    row: Element,
    columns: [RuleColumn; 3],
    disposables: DisposableStore,
}

impl RowTemplate {
    fn new(row: Element, widths: &[f32]) -> Self {
        let mut template = Self {
            row,
            columns: create_columns(),
            disposables: DisposableStore::new(),
        };
        template.apply_widths(widths);
        template
    }

    /// Returns the row container element.
    #[inline]
    pub const fn row(&self) -> &Element {
        &self.row
    }

    /// Returns the columns in their fixed order.
    #[inline]
    pub const fn columns(&self) -> &[RuleColumn; 3] {
        &self.columns
    }

    /// Re-applies resolved widths to the column elements, in column order,
    /// reserving the trailing gutter per column.
    pub fn apply_widths(&mut self, widths: &[f32]) {
        for (column, width) in self.columns.iter_mut().zip(widths.iter().copied()) {
            let element = column.element_mut();
            element.set_padding_right(COLUMN_GUTTER);
            element.set_width(width);
        }
    }

    fn bind(&mut self, entry: &ListRowEntry, index: usize) {
        self.row.toggle_class("odd", index % 2 == 1);
        for column in &mut self.columns {
            column.render(&entry.item);
        }
    }

    fn release(&mut self) {
        for column in &mut self.columns {
            column.dispose();
        }
        self.disposables.dispose();
    }
}

/// Renderer for rule entries: creates, binds, and releases row templates.
///
/// Carries the column width cache the panel resolves, so templates created
/// after a layout come out already sized.
pub struct RuleItemRenderer {
    widths: SmallVec<[f32; 4]>,
}

impl RuleItemRenderer {
    /// Creates a renderer with no widths resolved yet.
    pub fn new() -> Self {
        Self {
            widths: SmallVec::new(),
        }
    }

    /// Replaces the width cache applied to newly created templates.
    pub fn set_widths(&mut self, widths: SmallVec<[f32; 4]>) {
        self.widths = widths;
    }

    /// Returns the cached widths.
    #[inline]
    pub fn widths(&self) -> &[f32] {
        &self.widths
    }
}

impl Default for RuleItemRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl RowRenderer for RuleItemRenderer {
    type Entry = ListRowEntry;
    type Template = RowTemplate;

    fn template_kind(&self, entry: &ListRowEntry) -> TemplateKind {
        entry.kind
    }

    fn row_height(&self, _entry: &ListRowEntry) -> f32 {
        ROW_HEIGHT
    }

    fn create_template(&mut self, container: Element) -> RowTemplate {
        RowTemplate::new(container, &self.widths)
    }

    fn bind_row(&mut self, entry: &ListRowEntry, index: usize, template: &mut RowTemplate) {
        template.bind(entry, index);
    }

    fn release_template(&mut self, mut template: RowTemplate) {
        template.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationRuleItem;

    fn entry(id: &str, label: &str, when: &str) -> ListRowEntry {
        ListRowEntry::new(id, NotificationRuleItem::new(label, when, true))
    }

    #[test]
    fn template_always_holds_three_columns_in_order() {
        let mut renderer = RuleItemRenderer::new();
        let template = renderer.create_template(Element::with_class("notification-item"));

        assert_eq!(template.columns().len(), 3);
        assert!(matches!(template.columns()[0], RuleColumn::NeverShowAgain(_)));
        assert!(matches!(template.columns()[1], RuleColumn::Label(_)));
        assert!(matches!(template.columns()[2], RuleColumn::When(_)));
    }

    #[test]
    fn odd_class_follows_the_bind_index() {
        let mut renderer = RuleItemRenderer::new();
        let mut template = renderer.create_template(Element::new());
        let entry = entry("r1", "a", "b");

        renderer.bind_row(&entry, 1, &mut template);
        assert!(template.row().has_class("odd"));

        // Rebinding the same template to an even row clears the class.
        renderer.bind_row(&entry, 4, &mut template);
        assert!(!template.row().has_class("odd"));
    }

    #[test]
    fn creation_applies_the_current_widths() {
        let mut renderer = RuleItemRenderer::new();
        renderer.set_widths(SmallVec::from_slice(&[30.0, 185.75, 185.75, 371.5]));
        let template = renderer.create_template(Element::new());

        let widths: Vec<f32> = template
            .columns()
            .iter()
            .map(|column| column.element().width())
            .collect();
        assert_eq!(widths, vec![30.0, 185.75, 185.75]);
        assert_eq!(template.columns()[0].element().padding_right(), COLUMN_GUTTER);
    }

    #[test]
    fn bind_mutates_content_without_reallocating_columns() {
        let mut renderer = RuleItemRenderer::new();
        let mut template = renderer.create_template(Element::new());

        renderer.bind_row(&entry("r1", "first", "w1"), 0, &mut template);
        renderer.bind_row(&entry("r2", "second", "w2"), 1, &mut template);

        assert_eq!(template.columns().len(), 3);
        assert_eq!(template.columns()[1].element().title(), "second");
        assert_eq!(template.columns()[2].element().title(), "w2");
    }

    #[test]
    fn release_clears_column_content() {
        let mut renderer = RuleItemRenderer::new();
        let mut template = renderer.create_template(Element::new());
        renderer.bind_row(&entry("r1", "label", "when"), 0, &mut template);

        template.release();
        assert!(template.columns()[1].element().title().is_empty());
        assert!(template.disposables.is_disposed());
    }
}
