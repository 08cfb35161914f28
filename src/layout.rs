use smallvec::SmallVec;

use crate::element::Element;

/// Trailing gutter reserved per column, independent of the width calculation.
pub const COLUMN_GUTTER: f32 = 6.0;

/// Horizontal space reserved for the list scrollbar.
pub const SCROLLBAR_GUTTER: f32 = 27.0;

/// Height of the column header row.
pub const LIST_HEADER_HEIGHT: f32 = 30.0;

/// Width source for one column.
///
/// Exactly one source is authoritative per column: a fixed px width, or a
/// fraction of the space remaining once fixed columns are subtracted.
/// Proportions across columns need not sum to 1; unused space stays
/// unallocated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ColumnSpec {
    /// Fixed width in px.
    Fixed(f32),
    /// Fraction of the remaining space.
    Proportional(f32),
}

/// One header column: its spec, its element, and the resolved width cache.
pub struct ColumnItem {
    header: Element,
    spec: ColumnSpec,
    width: f32,
}

impl ColumnItem {
    /// Creates a column item. Fixed columns start at their fixed width;
    /// proportional columns start unresolved (width 0).
    pub const fn new(header: Element, spec: ColumnSpec) -> Self {
        let width = match spec {
            ColumnSpec::Fixed(width) => width,
            ColumnSpec::Proportional(_) => 0.0,
        };
        Self {
            header,
            spec,
            width,
        }
    }

    /// Returns the header element.
    #[inline]
    pub const fn header(&self) -> &Element {
        &self.header
    }

    /// Returns the width spec.
    #[inline]
    pub const fn spec(&self) -> ColumnSpec {
        self.spec
    }

    /// Returns the resolved width in px (0 while unresolved).
    #[inline]
    pub const fn width(&self) -> f32 {
        self.width
    }
}

/// Вычислитель ширин колонок (fixed px + доли остатка).
///
/// Resolved widths are cached per column: once a proportional column has a
/// non-zero width it is skipped on later passes, so relayout churn does not
/// recompute anything. A dimension change resets the proportional widths to 0
/// before the next pass.
pub struct ColumnLayout {
    items: SmallVec<[ColumnItem; 4]>,
    available: Option<f32>,
}

impl ColumnLayout {
    /// Creates a layout over the given column items. Width is unknown until
    /// [`ColumnLayout::set_available_width`] is called.
    pub const fn new(items: SmallVec<[ColumnItem; 4]>) -> Self {
        Self {
            items,
            available: None,
        }
    }

    /// The concrete rule-panel header: a 30 px actions gutter, then
    /// "Never Show Again" / "Notification" / "When" at 0.25 / 0.25 / 0.5 of
    /// the remaining space.
    pub fn rule_header() -> Self {
        let mut items = SmallVec::new();

        let actions = Element::with_class("header");
        items.push(ColumnItem::new(actions, ColumnSpec::Fixed(30.0)));

        let mut never_show_again = Element::with_class("header");
        never_show_again.set_text("Never Show Again");
        items.push(ColumnItem::new(
            never_show_again,
            ColumnSpec::Proportional(0.25),
        ));

        let mut notification = Element::with_class("header");
        notification.set_text("Notification");
        items.push(ColumnItem::new(
            notification,
            ColumnSpec::Proportional(0.25),
        ));

        let mut when = Element::with_class("header");
        when.set_text("When");
        items.push(ColumnItem::new(when, ColumnSpec::Proportional(0.5)));

        Self::new(items)
    }

    /// Returns the column items in layout order.
    #[inline]
    pub fn items(&self) -> &[ColumnItem] {
        &self.items
    }

    /// Stores the available width for the next resolve pass.
    pub const fn set_available_width(&mut self, width: f32) {
        self.available = Some(width);
    }

    /// Returns the available width, if a dimension has been received.
    #[inline]
    pub const fn available_width(&self) -> Option<f32> {
        self.available
    }

    /// Resets every proportional width to 0 so the next resolve pass
    /// recomputes it. Fixed widths are untouched.
    pub fn reset_proportional(&mut self) {
        for item in &mut self.items {
            if matches!(item.spec, ColumnSpec::Proportional(_)) {
                item.width = 0.0;
            }
        }
    }

    /// Resolves column widths and applies them to the header elements.
    ///
    /// No-op while the available width is unknown: elements keep their stale
    /// or zero widths until a dimension arrives. Fixed widths are subtracted
    /// from the available width (minus the scrollbar gutter) in list order;
    /// each still-unresolved proportional column then receives its fraction of
    /// the remainder.
    pub fn resolve(&mut self) {
        let Some(available) = self.available else {
            return;
        };

        let mut remaining = available - SCROLLBAR_GUTTER;
        for item in &self.items {
            if matches!(item.spec, ColumnSpec::Fixed(_)) && item.width != 0.0 {
                remaining -= item.width;
            }
        }

        for item in &mut self.items {
            if let ColumnSpec::Proportional(proportion) = item.spec
                && item.width == 0.0
            {
                item.width = remaining * proportion;
            }
        }

        for item in &mut self.items {
            item.header.set_padding_right(COLUMN_GUTTER);
            item.header.set_width(item.width);
        }
    }

    /// Returns the resolved widths in layout order.
    pub fn widths(&self) -> SmallVec<[f32; 4]> {
        self.items.iter().map(ColumnItem::width).collect()
    }
}
