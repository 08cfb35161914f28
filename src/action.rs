/// Actions that a user or application can initiate on the rule list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListAction<Custom = ()> {
    /// Move selection to the previous row.
    SelectPrev,
    /// Move selection to the next row.
    SelectNext,
    /// Select the first row.
    SelectFirst,
    /// Select the last row.
    SelectLast,
    /// Custom action forwarded to the caller without internal handling.
    Custom(Custom),
}

/// Result of handling an action or key event.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ListEvent<Custom = ()> {
    /// The action was handled internally and state was updated.
    Handled,
    /// The action was ignored (e.g., empty list / nothing to do).
    Unhandled,
    /// The action is forwarded to the caller for handling.
    Action(ListAction<Custom>),
}
