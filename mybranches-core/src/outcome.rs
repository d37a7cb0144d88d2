/// What the invoking layer should do once an interactive session has ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Switch to the named branch
    Switch(String),
    /// Delete the named branch
    Delete(String),
    /// The cleanup pipeline finished; `count` branches were deleted (or would
    /// have been, when `dry_run` is set)
    CleanedUp { count: usize, dry_run: bool },
    /// Quit, or nothing chosen
    Nothing,
}
