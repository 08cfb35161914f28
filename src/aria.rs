use crate::model::ListRowEntry;

/// Accessibility label composition for a list widget and its entries.
///
/// Label text sources (localization included) live outside the panel; this is
/// the narrow surface the panel reads from.
pub trait AccessibilityProvider<E> {
    /// Label announced for the widget as a whole.
    fn widget_label(&self) -> &str;

    /// Label announced for one entry.
    fn entry_label(&self, entry: &E) -> String;
}

/// Default labels for rule entries.
#[derive(Clone, Copy, Debug, Default)]
pub struct RuleAccessibilityProvider;

impl AccessibilityProvider<ListRowEntry> for RuleAccessibilityProvider {
    fn widget_label(&self) -> &str {
        "Notifications"
    }

    fn entry_label(&self, entry: &ListRowEntry) -> String {
        format!(
            "{}, {}, {}",
            entry.item.never_show_again, entry.item.label, entry.item.when
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NotificationRuleItem;

    #[test]
    fn entry_label_joins_the_three_fields() {
        let provider = RuleAccessibilityProvider;
        let entry = ListRowEntry::new(
            "r1",
            NotificationRuleItem::new("files dirty", "editorFocus", true),
        );

        assert_eq!(provider.widget_label(), "Notifications");
        assert_eq!(provider.entry_label(&entry), "true, files dirty, editorFocus");
    }
}
