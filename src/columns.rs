use crate::dispose::DisposableStore;
use crate::element::Element;
use crate::model::NotificationRuleItem;

/// Fixed label of the suppression toggle.
pub const NEVER_SHOW_AGAIN_LABEL: &str = "Never Show Again";

/// Toggle sub-widget owned by the suppression column.
///
/// Constructed once at template-creation time and reused across binds; only
/// its checked state changes per render.
#[derive(Clone, Debug)]
pub struct Toggle {
    label: &'static str,
    checked: bool,
}

impl Toggle {
    /// Creates a toggle with the given label and initial state.
    pub const fn new(label: &'static str, checked: bool) -> Self {
        Self { label, checked }
    }

    /// Returns the toggle label.
    #[inline]
    pub const fn label(&self) -> &'static str {
        self.label
    }

    /// Sets the checked state.
    pub const fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Returns the checked state.
    #[inline]
    pub const fn is_checked(&self) -> bool {
        self.checked
    }
}

/// Highlighted-text sub-widget owned by the text columns.
///
/// Unlike the toggle, one of these is created fresh on every render; the
/// previous instance is dropped with the bind that produced it.
#[derive(Clone, Debug, Default)]
pub struct HighlightedText {
    element: Element,
}

impl HighlightedText {
    /// Creates a text widget showing `text`.
    pub fn new(text: &str) -> Self {
        let mut element = Element::new();
        element.set_text(text);
        Self { element }
    }

    /// Sets the tooltip title.
    pub fn set_title(&mut self, title: &str) {
        self.element.set_title(title);
    }

    /// Returns the widget element.
    #[inline]
    pub const fn element(&self) -> &Element {
        &self.element
    }

    /// Returns the widget element mutably.
    pub const fn element_mut(&mut self) -> &mut Element {
        &mut self.element
    }
}

/// Suppression-toggle column.
pub struct NeverShowAgainColumn {
    element: Element,
    toggle: Toggle,
    render_scope: DisposableStore,
}

impl NeverShowAgainColumn {
    fn new() -> Self {
        let mut element = Element::with_class("column");
        element.add_class("neverShowAgain");
        Self {
            element,
            toggle: Toggle::new(NEVER_SHOW_AGAIN_LABEL, true),
            render_scope: DisposableStore::new(),
        }
    }

    /// Returns the owned toggle.
    #[inline]
    pub const fn toggle(&self) -> &Toggle {
        &self.toggle
    }

    fn render(&mut self, item: &NotificationRuleItem) {
        self.render_scope.clear();
        self.element.clear();
        self.toggle.set_checked(item.never_show_again);
    }

    fn dispose(&mut self) {
        self.render_scope.dispose();
        self.element.clear();
    }
}

/// Primary-text column.
pub struct LabelColumn {
    element: Element,
    text: Option<HighlightedText>,
    render_scope: DisposableStore,
}

impl LabelColumn {
    fn new() -> Self {
        let mut element = Element::with_class("column");
        element.add_class("label");
        Self {
            element,
            text: None,
            render_scope: DisposableStore::new(),
        }
    }

    /// Returns the current text widget, if a bind has happened.
    #[inline]
    pub const fn text(&self) -> Option<&HighlightedText> {
        self.text.as_ref()
    }

    fn render(&mut self, item: &NotificationRuleItem) {
        self.render_scope.clear();
        self.element.clear();
        let mut text = HighlightedText::new(&item.label);
        text.set_title(&item.label);
        self.element.set_title(&item.label);
        self.text = Some(text);
    }

    fn dispose(&mut self) {
        self.render_scope.dispose();
        self.text = None;
        self.element.clear();
    }
}

/// Condition-expression column.
pub struct WhenColumn {
    element: Element,
    text: Option<HighlightedText>,
    render_scope: DisposableStore,
}

impl WhenColumn {
    fn new() -> Self {
        let mut element = Element::with_class("column");
        element.add_class("when");
        Self {
            element,
            text: None,
            render_scope: DisposableStore::new(),
        }
    }

    /// Returns the current text widget, if a bind has happened.
    #[inline]
    pub const fn text(&self) -> Option<&HighlightedText> {
        self.text.as_ref()
    }

    fn render(&mut self, item: &NotificationRuleItem) {
        self.render_scope.clear();
        self.element.clear();
        self.element.toggle_class("code", item.when.is_empty());
        let mut text = HighlightedText::new(&item.when);
        text.set_title(&item.when);
        self.element.set_title(&item.when);
        self.text = Some(text);
    }

    fn dispose(&mut self) {
        self.render_scope.dispose();
        self.text = None;
        self.element.clear();
    }
}

/// Tagged-variant set of the three row columns.
///
/// One interface (`element`/`render`/`dispose`), no inheritance. The factory
/// below fixes the count and order once per template; binding only mutates
/// rendered content.
pub enum RuleColumn {
    /// Suppression toggle.
    NeverShowAgain(NeverShowAgainColumn),
    /// Primary text.
    Label(LabelColumn),
    /// Condition expression.
    When(WhenColumn),
}

impl RuleColumn {
    /// Returns the column's root element.
    pub const fn element(&self) -> &Element {
        match self {
            Self::NeverShowAgain(column) => &column.element,
            Self::Label(column) => &column.element,
            Self::When(column) => &column.element,
        }
    }

    /// Returns the column's root element mutably.
    pub const fn element_mut(&mut self) -> &mut Element {
        match self {
            Self::NeverShowAgain(column) => &mut column.element,
            Self::Label(column) => &mut column.element,
            Self::When(column) => &mut column.element,
        }
    }

    /// Renders the given item into the column.
    ///
    /// Clears the per-render scope first, so resources from the previous bind
    /// are released before the new content lands.
    pub fn render(&mut self, item: &NotificationRuleItem) {
        match self {
            Self::NeverShowAgain(column) => column.render(item),
            Self::Label(column) => column.render(item),
            Self::When(column) => column.render(item),
        }
    }

    /// Releases the column's resources. Called once at template teardown.
    pub fn dispose(&mut self) {
        match self {
            Self::NeverShowAgain(column) => column.dispose(),
            Self::Label(column) => column.dispose(),
            Self::When(column) => column.dispose(),
        }
    }
}

/// Creates the fixed, ordered column set for one row template.
pub fn create_columns() -> [RuleColumn; 3] {
    [
        RuleColumn::NeverShowAgain(NeverShowAgainColumn::new()),
        RuleColumn::Label(LabelColumn::new()),
        RuleColumn::When(WhenColumn::new()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(label: &str, when: &str, never_show_again: bool) -> NotificationRuleItem {
        NotificationRuleItem::new(label, when, never_show_again)
    }

    #[test]
    fn factory_order_is_fixed() {
        let columns = create_columns();
        assert!(matches!(columns[0], RuleColumn::NeverShowAgain(_)));
        assert!(matches!(columns[1], RuleColumn::Label(_)));
        assert!(matches!(columns[2], RuleColumn::When(_)));
    }

    #[test]
    fn toggle_reflects_the_suppression_flag() {
        let mut columns = create_columns();
        columns[0].render(&item("a", "", false));

        let RuleColumn::NeverShowAgain(column) = &columns[0] else {
            unreachable!()
        };
        assert!(!column.toggle().is_checked());
        assert_eq!(column.toggle().label(), NEVER_SHOW_AGAIN_LABEL);
    }

    #[test]
    fn label_column_shows_the_label() {
        let mut columns = create_columns();
        columns[1].render(&item("editor dirty", "editorFocus", true));

        let RuleColumn::Label(column) = &columns[1] else {
            unreachable!()
        };
        assert_eq!(column.text().unwrap().element().text(), "editor dirty");
        assert_eq!(column.text().unwrap().element().title(), "editor dirty");
        assert_eq!(columns[1].element().title(), "editor dirty");
    }

    #[test]
    fn when_column_marks_empty_expressions_as_code() {
        let mut columns = create_columns();

        columns[2].render(&item("a", "", true));
        assert!(columns[2].element().has_class("code"));

        columns[2].render(&item("a", "editorFocus", true));
        assert!(!columns[2].element().has_class("code"));
        let RuleColumn::When(column) = &columns[2] else {
            unreachable!()
        };
        assert_eq!(column.text().unwrap().element().text(), "editorFocus");
    }

    #[test]
    fn rebind_replaces_the_text_widget() {
        let mut columns = create_columns();
        columns[2].render(&item("a", "first", true));
        columns[2].render(&item("a", "second", true));

        let RuleColumn::When(column) = &columns[2] else {
            unreachable!()
        };
        assert_eq!(column.text().unwrap().element().text(), "second");
        assert_eq!(columns[2].element().title(), "second");
    }
}
