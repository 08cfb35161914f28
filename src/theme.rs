use ratatui::style::{Color, Style};
use rustc_hash::FxHashMap;

/// Background wash applied to odd rows and the list header.
pub const ODD_ROW_BACKGROUND: Rgba = Rgba::new(130, 130, 130, 0.04);

// Fallback when the theme has no workbench background resolved.
const DEFAULT_WORKBENCH_BACKGROUND: Rgba = Rgba::opaque(37, 37, 38);

/// Color with straight alpha, used for compositing before the terminal color
/// is produced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Straight alpha in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    /// Creates a color with the given alpha.
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Returns the color with its alpha multiplied by `factor`.
    #[must_use]
    pub fn transparent(self, factor: f32) -> Self {
        Self::new(self.r, self.g, self.b, self.a * factor)
    }

    /// Source-over composite onto an opaque background, yielding an opaque
    /// color a terminal can show.
    #[must_use]
    pub fn over(self, background: Self) -> Self {
        let blend = |fg: u8, bg: u8| -> u8 {
            let value = f32::from(fg).mul_add(self.a, f32::from(bg) * (1.0 - self.a));
            value.round().clamp(0.0, 255.0) as u8
        };
        Self::opaque(
            blend(self.r, background.r),
            blend(self.g, background.g),
            blend(self.b, background.b),
        )
    }

    /// Returns the terminal color, dropping alpha.
    pub const fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

/// Semantic colors the panel asks the theme for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SemanticColor {
    /// Default foreground.
    Foreground,
    /// Editor background.
    EditorBackground,
    /// Workbench background (compositing base).
    WorkbenchBackground,
    /// Active-selection foreground.
    ListActiveSelectionForeground,
    /// Active-selection background.
    ListActiveSelectionBackground,
    /// Inactive-selection foreground.
    ListInactiveSelectionForeground,
    /// Inactive-selection background.
    ListInactiveSelectionBackground,
    /// Focused-row foreground.
    ListFocusForeground,
    /// Focused-row background.
    ListFocusBackground,
    /// Hovered-row foreground.
    ListHoverForeground,
    /// Hovered-row background.
    ListHoverBackground,
    /// Match-highlight foreground.
    ListHighlightForeground,
}

/// Theme collaborator: resolves semantic colors.
pub trait ThemeSource {
    /// Returns the resolved color, or `None` when the theme leaves it unset.
    fn color(&self, color: SemanticColor) -> Option<Rgba>;
}

/// Structural selectors the emitted style rules are keyed by, scoped to the
/// panel root.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleSelector {
    /// The column header row.
    ListHeader,
    /// Odd row, not focused/selected/hovered.
    OddRow,
    /// Odd focused row while the list itself has no focus.
    OddRowFocusedUnfocusedList,
    /// Odd focused row in an inactive list.
    OddRowFocusedInactiveList,
    /// Code-style cell text.
    CodeText,
    /// Code-style cell text on an odd row.
    CodeTextOdd,
    /// Code-style cell text on the active selection.
    CodeTextSelectedActive,
    /// Code-style cell text on an inactive selection.
    CodeTextSelectedInactive,
    /// Code-style cell text on the focused row.
    CodeTextFocused,
    /// Code-style cell text on a hovered row.
    CodeTextHover,
    /// Match-highlight text.
    HighlightText,
}

/// Collects style rules keyed by structural selector.
#[derive(Default)]
pub struct StyleCollector {
    rules: FxHashMap<StyleSelector, Style>,
}

impl StyleCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the rule for a selector.
    pub fn add_rule(&mut self, selector: StyleSelector, style: Style) {
        self.rules.insert(selector, style);
    }

    /// Returns the rule for a selector, if one was emitted.
    pub fn style_of(&self, selector: StyleSelector) -> Option<Style> {
        self.rules.get(&selector).copied()
    }

    /// Returns the number of emitted rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no rules were emitted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Emits the panel's style rules from the resolved theme colors.
///
/// Declarative and one-shot: queried colors that the theme leaves unset skip
/// their rules rather than guessing. "Code" text states are the panel
/// foreground at 80% alpha composited onto the state's own background, so the
/// dimmed expression text stays readable on every row state.
pub fn register_panel_styles(theme: &dyn ThemeSource, collector: &mut StyleCollector) {
    let workbench = theme
        .color(SemanticColor::WorkbenchBackground)
        .unwrap_or(DEFAULT_WORKBENCH_BACKGROUND);
    let odd_row = ODD_ROW_BACKGROUND.over(workbench);

    let odd_bg = Style::default().bg(odd_row.to_color());
    collector.add_rule(StyleSelector::ListHeader, odd_bg);
    collector.add_rule(StyleSelector::OddRow, odd_bg);
    collector.add_rule(StyleSelector::OddRowFocusedUnfocusedList, odd_bg);
    collector.add_rule(StyleSelector::OddRowFocusedInactiveList, odd_bg);

    if let Some(foreground) = theme.color(SemanticColor::Foreground) {
        let code = foreground.transparent(0.8).over(workbench);
        collector.add_rule(StyleSelector::CodeText, Style::default().fg(code.to_color()));
        let code_odd = foreground.transparent(0.8).over(odd_row);
        collector.add_rule(
            StyleSelector::CodeTextOdd,
            Style::default().fg(code_odd.to_color()),
        );
    }

    let states = [
        (
            StyleSelector::CodeTextSelectedActive,
            SemanticColor::ListActiveSelectionForeground,
            SemanticColor::ListActiveSelectionBackground,
        ),
        (
            StyleSelector::CodeTextSelectedInactive,
            SemanticColor::ListInactiveSelectionForeground,
            SemanticColor::ListInactiveSelectionBackground,
        ),
        (
            StyleSelector::CodeTextFocused,
            SemanticColor::ListFocusForeground,
            SemanticColor::ListFocusBackground,
        ),
        (
            StyleSelector::CodeTextHover,
            SemanticColor::ListHoverForeground,
            SemanticColor::ListHoverBackground,
        ),
    ];
    for (selector, fg, bg) in states {
        if let (Some(foreground), Some(background)) = (theme.color(fg), theme.color(bg)) {
            let code = foreground.transparent(0.8).over(background);
            collector.add_rule(
                selector,
                Style::default().fg(code.to_color()).bg(background.to_color()),
            );
        }
    }

    if let Some(highlight) = theme.color(SemanticColor::ListHighlightForeground) {
        collector.add_rule(
            StyleSelector::HighlightText,
            Style::default().fg(highlight.to_color()),
        );
    }
}

/// Process-wide registration point for the panel's style rules.
///
/// An explicit object rather than a hidden module singleton: the application
/// bootstrap constructs one, calls `init` once with its theme source, and
/// hands the registry to whatever draws the panel. Repeat `init` calls are
/// ignored.
#[derive(Default)]
pub struct ThemeRegistry {
    collector: StyleCollector,
    initialized: bool,
}

impl ThemeRegistry {
    /// Creates an uninitialized registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the one-time style registration. A second call is a no-op.
    pub fn init(&mut self, theme: &dyn ThemeSource) {
        if self.initialized {
            return;
        }
        register_panel_styles(theme, &mut self.collector);
        self.initialized = true;
    }

    /// Returns `true` once `init` has run.
    #[inline]
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Returns the rule for a selector, if emitted.
    pub fn style(&self, selector: StyleSelector) -> Option<Style> {
        self.collector.style_of(selector)
    }

    /// Returns the collected rules.
    #[inline]
    pub const fn collector(&self) -> &StyleCollector {
        &self.collector
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestTheme;

    impl ThemeSource for TestTheme {
        fn color(&self, color: SemanticColor) -> Option<Rgba> {
            match color {
                SemanticColor::Foreground => Some(Rgba::opaque(255, 255, 255)),
                SemanticColor::WorkbenchBackground | SemanticColor::EditorBackground => {
                    Some(Rgba::opaque(0, 0, 0))
                }
                SemanticColor::ListActiveSelectionForeground => Some(Rgba::opaque(255, 255, 255)),
                SemanticColor::ListActiveSelectionBackground => Some(Rgba::opaque(0, 0, 100)),
                SemanticColor::ListHighlightForeground => Some(Rgba::opaque(0, 255, 0)),
                _ => None,
            }
        }
    }

    #[test]
    fn over_composites_straight_alpha() {
        let blended = Rgba::opaque(255, 255, 255).transparent(0.8).over(Rgba::opaque(0, 0, 0));
        assert_eq!(blended, Rgba::opaque(204, 204, 204));
    }

    #[test]
    fn registration_emits_code_text_rules_for_resolved_states() {
        let mut collector = StyleCollector::new();
        register_panel_styles(&TestTheme, &mut collector);

        assert!(collector.style_of(StyleSelector::OddRow).is_some());
        assert_eq!(
            collector.style_of(StyleSelector::CodeText).and_then(|s| s.fg),
            Some(Color::Rgb(204, 204, 204))
        );
        assert!(collector.style_of(StyleSelector::CodeTextSelectedActive).is_some());

        // Unresolved hover colors emit no rule.
        assert!(collector.style_of(StyleSelector::CodeTextHover).is_none());
        assert!(collector.style_of(StyleSelector::HighlightText).is_some());
    }

    #[test]
    fn registry_initializes_once() {
        let mut registry = ThemeRegistry::new();
        assert!(!registry.is_initialized());

        registry.init(&TestTheme);
        assert!(registry.is_initialized());
        let first = registry.collector().len();

        registry.init(&TestTheme);
        assert_eq!(registry.collector().len(), first);
    }
}
