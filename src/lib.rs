//! Notification rule panel widget for ratatui: a virtualized, three-column
//! list of notification suppression rules with a pooled row-template renderer
//! and fixed/proportional column layout.
//!
//! Feature flags:
//! - `keymap`: crossterm-based key bindings and `RuleList::handle_key*` helpers.
//! - `serde`: serde support for `RuleListSnapshot`.

mod action;
mod aria;
mod columns;
mod dispose;
mod element;
mod glyphs;
#[cfg(feature = "keymap")]
mod keymap;
mod layout;
mod list;
mod model;
mod panel;
pub mod prelude;
mod template;
mod theme;
mod widget;

pub use action::{ListAction, ListEvent};
pub use aria::{AccessibilityProvider, RuleAccessibilityProvider};
pub use columns::{
    HighlightedText, LabelColumn, NEVER_SHOW_AGAIN_LABEL, NeverShowAgainColumn, RuleColumn,
    Toggle, WhenColumn, create_columns,
};
pub use dispose::DisposableStore;
pub use element::Element;
pub use glyphs::PanelGlyphs;
#[cfg(feature = "keymap")]
pub use keymap::{KeymapProfile, ListKeyBindings};
pub use layout::{
    COLUMN_GUTTER, ColumnItem, ColumnLayout, ColumnSpec, LIST_HEADER_HEIGHT, SCROLLBAR_GUTTER,
};
pub use list::{RowRenderer, RuleList, RuleListSnapshot};
pub use model::{
    ListRowEntry, NotificationRuleItem, RULE_ENTRY_TEMPLATE, RuleModel, TemplateKind,
};
pub use panel::{Dimension, PanelError, PanelState, RulePanel};
pub use template::{ROW_HEIGHT, RowTemplate, RuleItemRenderer};
pub use theme::{
    ODD_ROW_BACKGROUND, Rgba, SemanticColor, StyleCollector, StyleSelector, ThemeRegistry,
    ThemeSource, register_panel_styles,
};
pub use widget::RulePanelView;
