/// Every key press the controllers care about resolves to an Action.
/// Controllers never look at raw key codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    Quit,

    // Main list
    Copy,
    StartDelete,
    Select,

    // Delete confirmation
    ConfirmDelete,
    CancelDelete,
}
