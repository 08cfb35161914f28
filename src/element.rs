use smallvec::SmallVec;

/// Retained render node backing a panel fragment.
///
/// Rows, columns, and headers all resolve to one of these: a flat node with
/// structural classes, display text, a tooltip title, and the box metrics the
/// layout pass writes into it. Binds and relayouts mutate elements in place;
/// nothing here allocates per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    classes: SmallVec<[&'static str; 4]>,
    text: String,
    title: String,
    width: f32,
    height: f32,
    padding_right: f32,
}

impl Element {
    /// Creates an empty element with no classes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an element carrying the given structural class.
    pub fn with_class(class: &'static str) -> Self {
        let mut element = Self::default();
        element.add_class(class);
        element
    }

    /// Adds a structural class if not already present.
    pub fn add_class(&mut self, class: &'static str) {
        if !self.has_class(class) {
            self.classes.push(class);
        }
    }

    /// Removes a structural class if present.
    pub fn remove_class(&mut self, class: &'static str) {
        self.classes.retain(|existing| *existing != class);
    }

    /// Adds or removes a class depending on `on`.
    pub fn toggle_class(&mut self, class: &'static str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    /// Returns `true` if the class is set.
    #[inline]
    pub fn has_class(&self, class: &'static str) -> bool {
        self.classes.contains(&class)
    }

    /// Clears display text and tooltip, keeping classes and box metrics.
    pub fn clear(&mut self) {
        self.text.clear();
        self.title.clear();
    }

    /// Sets the display text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Returns the display text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Sets the tooltip title.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Returns the tooltip title.
    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the resolved width in px.
    pub const fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Returns the resolved width in px.
    #[inline]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Sets the resolved height in px.
    pub const fn set_height(&mut self, height: f32) {
        self.height = height;
    }

    /// Returns the resolved height in px.
    #[inline]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Sets the trailing gutter in px.
    pub const fn set_padding_right(&mut self, padding: f32) {
        self.padding_right = padding;
    }

    /// Returns the trailing gutter in px.
    #[inline]
    pub const fn padding_right(&self) -> f32 {
        self.padding_right
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_class_is_idempotent() {
        let mut element = Element::with_class("column");

        element.toggle_class("odd", true);
        element.toggle_class("odd", true);
        assert!(element.has_class("odd"));
        assert_eq!(element.classes.len(), 2);

        element.toggle_class("odd", false);
        assert!(!element.has_class("odd"));
        assert!(element.has_class("column"));
    }

    #[test]
    fn clear_keeps_classes_and_metrics() {
        let mut element = Element::with_class("label");
        element.set_text("render if unsaved");
        element.set_title("render if unsaved");
        element.set_width(120.0);

        element.clear();

        assert!(element.text().is_empty());
        assert!(element.title().is_empty());
        assert!(element.has_class("label"));
        assert_eq!(element.width(), 120.0);
    }
}
