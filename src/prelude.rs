pub use crate::{
    AccessibilityProvider, ColumnItem, ColumnLayout, ColumnSpec, Dimension, DisposableStore,
    Element, ListAction, ListEvent, ListRowEntry, NotificationRuleItem, PanelError, PanelGlyphs,
    PanelState, Rgba, RowRenderer, RowTemplate, RuleAccessibilityProvider, RuleColumn,
    RuleItemRenderer, RuleList, RuleListSnapshot, RuleModel, RulePanel, RulePanelView,
    SemanticColor, StyleCollector, StyleSelector, TemplateKind, ThemeRegistry, ThemeSource,
    register_panel_styles,
};

#[cfg(feature = "keymap")]
pub use crate::{KeymapProfile, ListKeyBindings};
