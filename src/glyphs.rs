/// Glyph set for the terminal rendition of the panel.
///
/// The suppression toggle has no native checkbox in a terminal; these marks
/// stand in for its checked state. `ascii` is for terminals without the
/// unicode ballot symbols.
#[derive(Clone, Copy)]
pub struct PanelGlyphs<'a> {
    /// Checked toggle mark.
    pub checked: &'a str,
    /// Unchecked toggle mark.
    pub unchecked: &'a str,
    /// Selection marker put in front of the selected row.
    pub highlight_symbol: &'a str,
}

impl PanelGlyphs<'static> {
    /// Unicode ballot-box marks.
    pub const fn unicode() -> Self {
        Self {
            checked: "☑",
            unchecked: "☐",
            highlight_symbol: "❯ ",
        }
    }

    /// Plain ASCII marks.
    pub const fn ascii() -> Self {
        Self {
            checked: "[x]",
            unchecked: "[ ]",
            highlight_symbol: "> ",
        }
    }
}

impl<'a> PanelGlyphs<'a> {
    /// Returns the mark for a toggle state.
    #[inline]
    pub const fn toggle(&self, checked: bool) -> &'a str {
        if checked { self.checked } else { self.unchecked }
    }
}
