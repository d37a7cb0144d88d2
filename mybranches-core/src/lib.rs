pub mod action;
pub mod browser;
pub mod cleanup;
pub mod clipboard;
pub mod config;
pub mod event;
pub mod git;
pub mod outcome;
pub mod pattern;

// Re-export commonly used types at crate root
pub use action::Action;
pub use browser::{BrowserContext, BrowserState, DeletionContext};
pub use cleanup::{CleanupStage, CleanupState, StageMappingError};
pub use clipboard::{Clipboard, ClipboardError, PlatformClipboard};
pub use config::Config;
pub use event::{AppEvent, CleanupMsg, Command};
pub use git::{BranchProvider, CliGitProvider};
pub use outcome::Outcome;
