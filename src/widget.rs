use ratatui::layout::{Constraint, Rect};
use ratatui::prelude::Buffer;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{
    Cell, Row, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Table, TableState,
};
use smallvec::SmallVec;

use crate::columns::RuleColumn;
use crate::glyphs::PanelGlyphs;
use crate::panel::RulePanel;
use crate::theme::{StyleSelector, ThemeRegistry};

/// Основной виджет панели (table + stateful).
pub struct RulePanelView<'a> {
    styles: &'a ThemeRegistry,
    glyphs: PanelGlyphs<'a>,
}

impl<'a> RulePanelView<'a> {
    /// Creates a view drawing with the given registered styles.
    pub const fn new(styles: &'a ThemeRegistry) -> Self {
        Self {
            styles,
            glyphs: PanelGlyphs::unicode(),
        }
    }

    /// Replaces the glyph set.
    pub const fn glyphs(mut self, glyphs: PanelGlyphs<'a>) -> Self {
        self.glyphs = glyphs;
        self
    }

    // Resolved px widths scaled onto terminal cells. Before the first
    // dimension the header proportions stand in.
    fn column_constraints(widths: &[f32], width: u16) -> SmallVec<[Constraint; 4]> {
        let total: f32 = widths.iter().sum();
        if total > 0.0 {
            widths
                .iter()
                .map(|w| Constraint::Length(((w / total) * f32::from(width)).round() as u16))
                .collect()
        } else {
            SmallVec::from_slice(&[
                Constraint::Length(4),
                Constraint::Fill(1),
                Constraint::Fill(1),
                Constraint::Fill(2),
            ])
        }
    }

    fn render_scrollbar(
        area: Rect,
        buf: &mut Buffer,
        offset: usize,
        inner_height: usize,
        scroll_rows: usize,
    ) {
        let scroll_len = scroll_rows.saturating_add(1);
        let position = offset.min(scroll_len.saturating_sub(1));
        let mut scrollbar_state = ScrollbarState::new(scroll_len)
            .position(position)
            .viewport_content_length(inner_height);
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .render(area, buf, &mut scrollbar_state);
    }
}

impl StatefulWidget for RulePanelView<'_> {
    type State = RulePanel;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() {
            return;
        }
        let list = state.list();
        let total_rows = list.len();
        let inner_height = area.height.saturating_sub(1) as usize;
        let scroll_rows = total_rows.saturating_sub(inner_height);

        let (table_area, scrollbar_area) = if scroll_rows > 0 {
            let table_area = Rect {
                width: area.width.saturating_sub(1),
                ..area
            };
            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y,
                width: 1,
                height: area.height,
            };
            (table_area, Some(scrollbar_area))
        } else {
            (area, None)
        };

        let widths = state.column_widths();
        let constraints = Self::column_constraints(&widths, table_area.width);

        let header_style = self
            .styles
            .style(StyleSelector::ListHeader)
            .unwrap_or_default();
        let header = Row::new(
            state
                .columns()
                .items()
                .iter()
                .map(|item| Cell::from(item.header().text())),
        )
        .style(header_style);

        let odd_style = self.styles.style(StyleSelector::OddRow).unwrap_or_default();
        let mut rows = Vec::with_capacity(inner_height);
        for (_, template) in list.bound_templates().take(inner_height) {
            let odd = template.row().has_class("odd");
            let columns = template.columns();
            let toggle = match &columns[0] {
                RuleColumn::NeverShowAgain(column) => {
                    self.glyphs.toggle(column.toggle().is_checked())
                }
                RuleColumn::Label(_) | RuleColumn::When(_) => self.glyphs.unchecked,
            };
            let label = match &columns[1] {
                RuleColumn::Label(column) => column.text().map_or("", |text| text.element().text()),
                RuleColumn::NeverShowAgain(_) | RuleColumn::When(_) => "",
            };
            let when = match &columns[2] {
                RuleColumn::When(column) => column.text().map_or("", |text| text.element().text()),
                RuleColumn::NeverShowAgain(_) | RuleColumn::Label(_) => "",
            };

            let mut when_cell = Cell::from(when);
            if columns[2].element().has_class("code") {
                let selector = if odd {
                    StyleSelector::CodeTextOdd
                } else {
                    StyleSelector::CodeText
                };
                if let Some(style) = self.styles.style(selector) {
                    when_cell = when_cell.style(style);
                }
            }

            let mut table_row = Row::new([
                Cell::from(""),
                Cell::from(toggle),
                Cell::from(label),
                when_cell,
            ]);
            if odd {
                table_row = table_row.style(odd_style);
            }
            rows.push(table_row);
        }

        let highlight_style = self
            .styles
            .style(StyleSelector::CodeTextSelectedActive)
            .unwrap_or_else(|| Style::default().add_modifier(Modifier::REVERSED));

        let mut table_state = TableState::default();
        if let Some(selected) = list.get_selection().first().copied() {
            let offset = list.offset();
            if selected >= offset && selected < offset + inner_height {
                table_state.select(Some(selected - offset));
            }
        }
        let offset = list.offset();

        let table = Table::new(rows, constraints.iter().copied())
            .header(header)
            .row_highlight_style(highlight_style)
            .highlight_symbol(self.glyphs.highlight_symbol);
        table.render(table_area, buf, &mut table_state);

        if let Some(scrollbar_area) = scrollbar_area {
            Self::render_scrollbar(scrollbar_area, buf, offset, inner_height, scroll_rows);
        }
    }
}
