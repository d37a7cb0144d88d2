use crate::{action::Action, cleanup::CleanupStage};
use crossterm::event::KeyEvent;

/// Messages consumed by the cleanup controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupMsg {
    /// A key press, already resolved against the keymap
    KeyPress(Action),

    /// A stage's external call finished; `next` is the stage to move to.
    /// `affected` carries the branch count reported by the find/delete stage.
    StageAdvanced {
        next: CleanupStage,
        affected: Option<usize>,
    },

    /// A stage's external call failed
    StageFailed(String),

    /// Periodic spinner tick, independent of stage execution
    AnimationTick,
}

/// Everything that travels on the event loop's single ordered channel.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Raw key press from the input reader thread
    Key(KeyEvent),

    /// Completion or tick destined for the cleanup controller
    Cleanup(CleanupMsg),

    /// The input reader could no longer read the terminal and has stopped
    InputFailed(String),
}

/// Side effect requested by a controller update. The event loop performs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Quit,
    RunStage(CleanupStage),
}
