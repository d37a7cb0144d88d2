//! The branch browser: a list with a cursor and a modal delete confirmation.
//!
//! Every update consumes the previous [`BrowserState`] and returns its
//! replacement, plus [`Command::Quit`] when the session is over.

use crate::{
    action::Action,
    clipboard::{Clipboard, ClipboardError, copy_text},
    event::Command,
    git::BranchProvider,
    outcome::Outcome,
};
use anyhow::Result;

/// The confirmation sub-view. Present only while confirming a delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletionContext {
    pub branch_name: String,
    pub confirmed: bool,
}

/// Collaborators the browser calls out to while handling a key.
pub struct BrowserContext<'a> {
    pub git: &'a dyn BranchProvider,
    pub clipboard: Option<&'a dyn Clipboard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserState {
    branches: Vec<String>,
    cursor: usize,
    selected_branch: Option<String>,
    deletion: Option<DeletionContext>,
}

impl BrowserState {
    pub fn new(branches: Vec<String>) -> Self {
        Self {
            branches,
            cursor: 0,
            selected_branch: None,
            deletion: None,
        }
    }

    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selected_branch(&self) -> Option<&str> {
        self.selected_branch.as_deref()
    }

    pub fn deletion(&self) -> Option<&DeletionContext> {
        self.deletion.as_ref()
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.deletion.is_some()
    }

    /// Nothing to browse; the session ends before it starts
    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }

    pub fn branch_under_cursor(&self) -> Option<&str> {
        self.branches.get(self.cursor).map(String::as_str)
    }

    pub fn update(self, action: Action, ctx: &BrowserContext<'_>) -> Result<(Self, Option<Command>)> {
        if self.branches.is_empty() {
            return Ok((self, Some(Command::Quit)));
        }

        if self.deletion.is_some() {
            self.update_confirm_delete(action, ctx)
        } else {
            self.update_main(action, ctx)
        }
    }

    fn update_main(mut self, action: Action, ctx: &BrowserContext<'_>) -> Result<(Self, Option<Command>)> {
        match action {
            Action::Quit => return Ok((self, Some(Command::Quit))),
            Action::MoveUp => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::MoveDown => {
                if self.cursor + 1 < self.branches.len() {
                    self.cursor += 1;
                }
            }
            Action::Copy => {
                let branch = &self.branches[self.cursor];
                match copy_text(ctx.clipboard, branch) {
                    Ok(()) => log::info!("copied {branch} to the clipboard"),
                    Err(ClipboardError::NotSupported) => {
                        log::debug!("clipboard not supported, ignoring copy");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
            Action::StartDelete => {
                self.deletion = Some(DeletionContext {
                    branch_name: self.branches[self.cursor].clone(),
                    confirmed: false,
                });
            }
            Action::Select => {
                self.selected_branch = Some(self.branches[self.cursor].clone());
                return Ok((self, Some(Command::Quit)));
            }
            Action::ConfirmDelete | Action::CancelDelete => {}
        }

        Ok((self, None))
    }

    fn update_confirm_delete(
        mut self,
        action: Action,
        ctx: &BrowserContext<'_>,
    ) -> Result<(Self, Option<Command>)> {
        match action {
            Action::Quit => return Ok((self, Some(Command::Quit))),
            Action::CancelDelete => {
                self.deletion = None;
            }
            Action::ConfirmDelete => {
                if let Some(deletion) = &mut self.deletion {
                    // The checked-out branch can change outside this process, so ask git now.
                    // git refuses to delete it anyway; don't bother sending the request.
                    let current = ctx.git.current_branch()?;
                    if current == deletion.branch_name {
                        log::info!("refusing to delete {current}: it is checked out");
                    } else {
                        deletion.confirmed = true;
                        return Ok((self, Some(Command::Quit)));
                    }
                }
            }
            Action::MoveUp
            | Action::MoveDown
            | Action::Copy
            | Action::StartDelete
            | Action::Select => {}
        }

        Ok((self, None))
    }

    /// What the session decided, once it has ended
    pub fn outcome(&self) -> Outcome {
        if let Some(branch) = &self.selected_branch {
            return Outcome::Switch(branch.clone());
        }
        match &self.deletion {
            Some(DeletionContext {
                branch_name,
                confirmed: true,
            }) => Outcome::Delete(branch_name.clone()),
            _ => Outcome::Nothing,
        }
    }
}
