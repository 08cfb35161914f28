use std::future::Future;

/// Template kind tag carried by every list entry.
///
/// The panel renders a single row shape, so one constant kind covers the whole
/// list; the tag exists so entry handling can stay honest about which rows a
/// renderer owns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TemplateKind(pub &'static str);

/// The only template kind the rule panel renders.
pub const RULE_ENTRY_TEMPLATE: TemplateKind = TemplateKind("notification.entry.template");

/// One notification suppression rule, as loaded by the model collaborator.
///
/// Read-only once loaded. `when` is boolean-expression source text and may be
/// empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotificationRuleItem {
    /// Primary display label.
    pub label: String,
    /// Condition expression source, possibly empty.
    pub when: String,
    /// Whether the notification is suppressed.
    pub never_show_again: bool,
}

impl NotificationRuleItem {
    /// Creates a rule item.
    pub fn new(label: impl Into<String>, when: impl Into<String>, never_show_again: bool) -> Self {
        Self {
            label: label.into(),
            when: when.into(),
            never_show_again,
        }
    }
}

/// Rendering-facing wrapper around one rule item.
///
/// `id` is the stable identity used to re-select an entry after the underlying
/// collection was rebuilt; positional indices do not survive a reload, ids do.
#[derive(Clone, Debug, PartialEq)]
pub struct ListRowEntry {
    /// Stable identity across list rebuilds.
    pub id: String,
    /// Template kind tag.
    pub kind: TemplateKind,
    /// The wrapped rule item.
    pub item: NotificationRuleItem,
}

impl ListRowEntry {
    /// Wraps a rule item under the rule-entry template kind.
    pub fn new(id: impl Into<String>, item: NotificationRuleItem) -> Self {
        Self {
            id: id.into(),
            kind: RULE_ENTRY_TEMPLATE,
            item,
        }
    }
}

/// External model collaborator that loads and owns the rule set.
///
/// `resolve` is the panel's only suspension point: awaited once per render
/// pass, after which `notification_items` returns the loaded rules. Resolving
/// again is allowed and simply refreshes the items.
pub trait RuleModel {
    /// Resolve failure reported by the collaborator.
    type Error;

    /// Loads (or reloads) the rule set.
    fn resolve(&mut self) -> impl Future<Output = Result<(), Self::Error>>;

    /// Returns the loaded rules. Empty until `resolve` completes.
    fn notification_items(&self) -> &[NotificationRuleItem];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_carry_the_single_template_kind() {
        let entry = ListRowEntry::new("r1", NotificationRuleItem::new("label", "", false));
        assert_eq!(entry.kind, RULE_ENTRY_TEMPLATE);
        assert_eq!(entry.id, "r1");
    }
}
