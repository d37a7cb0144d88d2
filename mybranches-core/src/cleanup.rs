//! The cleanup pipeline: fetch with prune, then find (and optionally delete)
//! local branches whose upstream is gone.
//!
//! Stages only ever move forward. Each stage's git call runs off the event
//! loop; its result comes back as a [`CleanupMsg`].

use crate::{
    action::Action,
    event::{CleanupMsg, Command},
    git::BranchProvider,
    outcome::Outcome,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CleanupStage {
    FetchPrune,
    /// Count gone branches without deleting them (dry run)
    Find,
    /// Delete gone branches
    Delete,
    Done,
}

impl CleanupStage {
    pub const ALL: [CleanupStage; 4] = [Self::FetchPrune, Self::Find, Self::Delete, Self::Done];

    /// The stage after this one. `Done` stays `Done`.
    pub fn next(self, dry_run: bool) -> Self {
        match self {
            Self::FetchPrune if dry_run => Self::Find,
            Self::FetchPrune => Self::Delete,
            Self::Find | Self::Delete | Self::Done => Self::Done,
        }
    }

    pub fn is_done(self) -> bool {
        self == Self::Done
    }
}

/// A stage with no entry in [`STAGE_LABELS`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageMappingError {
    pub stage: CleanupStage,
}

impl std::fmt::Display for StageMappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to map cleanup stage {:?} to a message", self.stage)
    }
}

impl std::error::Error for StageMappingError {}

const STAGE_LABELS: &[(CleanupStage, &str)] = &[
    (CleanupStage::FetchPrune, "Fetching remote branches"),
    (CleanupStage::Find, "Finding local branches not on remote"),
    (CleanupStage::Delete, "Deleting local branches not on remote"),
    (CleanupStage::Done, "Done"),
];

pub fn stage_label(stage: CleanupStage) -> Result<&'static str, StageMappingError> {
    STAGE_LABELS
        .iter()
        .find(|(s, _)| *s == stage)
        .map(|(_, label)| *label)
        .ok_or(StageMappingError { stage })
}

/// Run one stage's git call and turn the result into the message that
/// advances (or stops) the pipeline. Blocks; call it off the event loop.
pub fn execute_stage(git: &dyn BranchProvider, stage: CleanupStage, dry_run: bool) -> CleanupMsg {
    let result = match stage {
        CleanupStage::FetchPrune => git.fetch_and_prune().map(|()| None),
        CleanupStage::Find => git.find_and_delete_stale(true).map(Some),
        CleanupStage::Delete => git.find_and_delete_stale(false).map(Some),
        CleanupStage::Done => Ok(None),
    };

    match result {
        Ok(affected) => CleanupMsg::StageAdvanced {
            next: stage.next(dry_run),
            affected,
        },
        Err(e) => CleanupMsg::StageFailed(format!("{e:#}")),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupState {
    stage: CleanupStage,
    dry_run: bool,
    affected: Option<usize>,
    error: Option<String>,
    quitting: bool,
    spinner_frame: usize,
}

impl CleanupState {
    pub fn new(dry_run: bool) -> Self {
        Self {
            stage: CleanupStage::FetchPrune,
            dry_run,
            affected: None,
            error: None,
            quitting: false,
            spinner_frame: 0,
        }
    }

    /// The command that starts the pipeline
    pub fn init(&self) -> Command {
        Command::RunStage(self.stage)
    }

    pub fn stage(&self) -> CleanupStage {
        self.stage
    }

    pub fn dry_run(&self) -> bool {
        self.dry_run
    }

    pub fn affected(&self) -> Option<usize> {
        self.affected
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_quitting(&self) -> bool {
        self.quitting
    }

    pub fn spinner_frame(&self) -> usize {
        self.spinner_frame
    }

    /// No more stage results will be acted on
    pub fn is_finished(&self) -> bool {
        self.quitting || self.error.is_some() || self.stage.is_done()
    }

    pub fn update(mut self, msg: CleanupMsg) -> (Self, Option<Command>) {
        match msg {
            CleanupMsg::KeyPress(Action::Quit) => {
                self.quitting = true;
                (self, Some(Command::Quit))
            }
            CleanupMsg::KeyPress(_) => (self, None),
            CleanupMsg::AnimationTick => {
                if !self.is_finished() {
                    self.spinner_frame = self.spinner_frame.wrapping_add(1);
                }
                (self, None)
            }
            CleanupMsg::StageFailed(error) => {
                if self.is_finished() {
                    return (self, None);
                }
                log::warn!("cleanup stage {:?} failed: {error}", self.stage);
                self.error = Some(error);
                (self, Some(Command::Quit))
            }
            CleanupMsg::StageAdvanced { next, affected } => {
                if self.is_finished() || next != self.stage.next(self.dry_run) {
                    log::debug!("ignoring stale advance to {next:?} at {:?}", self.stage);
                    return (self, None);
                }
                log::info!("cleanup stage {:?} -> {next:?}", self.stage);
                self.stage = next;
                if affected.is_some() {
                    self.affected = affected;
                }
                if next.is_done() {
                    (self, Some(Command::Quit))
                } else {
                    (self, Some(Command::RunStage(next)))
                }
            }
        }
    }

    /// What the pipeline achieved; only a completed run has an outcome
    pub fn outcome(&self) -> Outcome {
        if self.stage.is_done() && self.error.is_none() {
            Outcome::CleanedUp {
                count: self.affected.unwrap_or(0),
                dry_run: self.dry_run,
            }
        } else {
            Outcome::Nothing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::mock::MockBranchProvider;
    use proptest::prelude::*;

    /// Drive the pipeline synchronously, executing stages inline
    fn run_pipeline(git: &MockBranchProvider, dry_run: bool) -> CleanupState {
        let mut state = CleanupState::new(dry_run);
        let mut command = Some(state.init());
        while let Some(Command::RunStage(stage)) = command {
            let msg = execute_stage(git, stage, dry_run);
            (state, command) = state.update(msg);
        }
        state
    }

    #[test]
    fn test_next_stage() {
        assert_eq!(CleanupStage::FetchPrune.next(false), CleanupStage::Delete);
        assert_eq!(CleanupStage::FetchPrune.next(true), CleanupStage::Find);
        assert_eq!(CleanupStage::Find.next(true), CleanupStage::Done);
        assert_eq!(CleanupStage::Delete.next(false), CleanupStage::Done);
        assert_eq!(CleanupStage::Done.next(false), CleanupStage::Done);
        assert_eq!(CleanupStage::Done.next(true), CleanupStage::Done);
    }

    #[test]
    fn test_every_stage_reaches_done_within_three_steps() {
        for dry_run in [false, true] {
            for start in CleanupStage::ALL {
                let mut stage = start;
                for _ in 0..3 {
                    stage = stage.next(dry_run);
                }
                assert_eq!(stage, CleanupStage::Done, "from {start:?}, dry_run={dry_run}");
                assert_eq!(stage.next(dry_run), CleanupStage::Done);
            }
        }
    }

    #[test]
    fn test_every_stage_has_a_label() {
        for stage in CleanupStage::ALL {
            let label = stage_label(stage).unwrap();
            assert!(!label.is_empty(), "{stage:?} has a blank label");
        }
    }

    #[test]
    fn test_stage_labels() {
        assert_eq!(
            stage_label(CleanupStage::FetchPrune),
            Ok("Fetching remote branches")
        );
        assert_eq!(
            stage_label(CleanupStage::Find),
            Ok("Finding local branches not on remote")
        );
        assert_eq!(
            stage_label(CleanupStage::Delete),
            Ok("Deleting local branches not on remote")
        );
    }

    #[test]
    fn test_stage_mapping_error_message() {
        let err = StageMappingError {
            stage: CleanupStage::Find,
        };
        assert_eq!(err.to_string(), "Failed to map cleanup stage Find to a message");
    }

    #[test]
    fn test_starts_by_fetching() {
        let state = CleanupState::new(false);
        assert_eq!(state.stage(), CleanupStage::FetchPrune);
        assert_eq!(state.init(), Command::RunStage(CleanupStage::FetchPrune));
    }

    #[test]
    fn test_full_pipeline_deletes() {
        let git = MockBranchProvider::with_gone_branches(&["alice/old", "bob/old"]);
        let state = run_pipeline(&git, false);
        assert_eq!(state.stage(), CleanupStage::Done);
        assert_eq!(state.affected(), Some(2));
        assert_eq!(git.fetch_calls(), 1);
        assert_eq!(git.delete_calls(), vec!["alice/old", "bob/old"]);
        assert_eq!(
            state.outcome(),
            Outcome::CleanedUp {
                count: 2,
                dry_run: false
            }
        );
    }

    #[test]
    fn test_dry_run_never_deletes() {
        let git = MockBranchProvider::with_gone_branches(&["alice/old", "bob/old"]);
        let state = run_pipeline(&git, true);
        assert_eq!(state.stage(), CleanupStage::Done);
        assert_eq!(state.affected(), Some(2));
        assert_eq!(git.list_gone_calls(), 1);
        assert!(git.delete_calls().is_empty());
        assert_eq!(
            state.outcome(),
            Outcome::CleanedUp {
                count: 2,
                dry_run: true
            }
        );
    }

    #[test]
    fn test_fetch_failure_stops_pipeline() {
        let git = MockBranchProvider::with_gone_branches(&["alice/old"]);
        *git.fetch_result.lock().unwrap() = Some(Err(anyhow::anyhow!("could not resolve host")));

        let state = run_pipeline(&git, false);
        assert_eq!(state.stage(), CleanupStage::FetchPrune);
        assert!(state.error().unwrap().contains("could not resolve host"));
        assert_eq!(git.list_gone_calls(), 0);
        assert!(git.delete_calls().is_empty());
        assert_eq!(state.outcome(), Outcome::Nothing);
    }

    #[test]
    fn test_delete_failure_stops_pipeline() {
        let git = MockBranchProvider::with_gone_branches(&["alice/old"]);
        *git.list_gone_result.lock().unwrap() = Some(Err(anyhow::anyhow!("not a git repository")));

        let state = run_pipeline(&git, false);
        assert_eq!(state.stage(), CleanupStage::Delete);
        assert!(state.error().unwrap().contains("not a git repository"));
        assert_eq!(state.outcome(), Outcome::Nothing);
    }

    #[test]
    fn test_quit_at_any_stage() {
        for stage in [CleanupStage::FetchPrune, CleanupStage::Delete] {
            let mut state = CleanupState::new(false);
            if stage == CleanupStage::Delete {
                state = state
                    .update(CleanupMsg::StageAdvanced {
                        next: CleanupStage::Delete,
                        affected: None,
                    })
                    .0;
            }
            let (state, command) = state.update(CleanupMsg::KeyPress(Action::Quit));
            assert_eq!(command, Some(Command::Quit));
            assert!(state.is_quitting());
            assert_eq!(state.stage(), stage);
            assert_eq!(state.outcome(), Outcome::Nothing);
        }
    }

    #[test]
    fn test_results_after_quit_are_ignored() {
        let (state, _) = CleanupState::new(false).update(CleanupMsg::KeyPress(Action::Quit));
        let (state, command) = state.update(CleanupMsg::StageAdvanced {
            next: CleanupStage::Delete,
            affected: None,
        });
        assert_eq!(command, None);
        assert_eq!(state.stage(), CleanupStage::FetchPrune);

        let (state, command) = state.update(CleanupMsg::StageFailed("late".to_string()));
        assert_eq!(command, None);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_out_of_order_advance_is_ignored() {
        let state = CleanupState::new(false);
        let (state, command) = state.update(CleanupMsg::StageAdvanced {
            next: CleanupStage::Done,
            affected: Some(5),
        });
        assert_eq!(command, None);
        assert_eq!(state.stage(), CleanupStage::FetchPrune);
        assert_eq!(state.affected(), None);
    }

    #[test]
    fn test_other_keys_ignored() {
        let state = CleanupState::new(false);
        let (next, command) = state.clone().update(CleanupMsg::KeyPress(Action::MoveDown));
        assert_eq!(command, None);
        assert_eq!(next, state);
    }

    #[test]
    fn test_tick_animates_until_finished() {
        let state = CleanupState::new(false);
        let (state, command) = state.update(CleanupMsg::AnimationTick);
        assert_eq!(command, None);
        assert_eq!(state.spinner_frame(), 1);

        let (state, _) = state.update(CleanupMsg::StageFailed("boom".to_string()));
        let (state, _) = state.update(CleanupMsg::AnimationTick);
        assert_eq!(state.spinner_frame(), 1);
    }

    #[test]
    fn test_execute_done_stage_is_idempotent() {
        let git = MockBranchProvider::default();
        assert_eq!(
            execute_stage(&git, CleanupStage::Done, false),
            CleanupMsg::StageAdvanced {
                next: CleanupStage::Done,
                affected: None
            }
        );
        assert_eq!(git.fetch_calls(), 0);
        assert_eq!(git.list_gone_calls(), 0);
    }

    proptest! {
        #[test]
        fn test_dry_run_counts_without_deleting(
            gone in prop::collection::vec("[a-z]{1,6}/[a-z0-9-]{1,8}", 0..10)
        ) {
            let names: Vec<&str> = gone.iter().map(String::as_str).collect();
            let git = MockBranchProvider::with_gone_branches(&names);

            let state = run_pipeline(&git, true);

            prop_assert_eq!(state.stage(), CleanupStage::Done);
            prop_assert!(git.delete_calls().is_empty());
            prop_assert_eq!(
                state.outcome(),
                Outcome::CleanedUp { count: gone.len(), dry_run: true }
            );
        }

        #[test]
        fn test_real_run_deletes_every_gone_branch(
            gone in prop::collection::vec("[a-z]{1,6}/[a-z0-9-]{1,8}", 0..10)
        ) {
            let names: Vec<&str> = gone.iter().map(String::as_str).collect();
            let git = MockBranchProvider::with_gone_branches(&names);

            let state = run_pipeline(&git, false);

            prop_assert_eq!(git.delete_calls(), gone.clone());
            prop_assert_eq!(
                state.outcome(),
                Outcome::CleanedUp { count: gone.len(), dry_run: false }
            );
        }
    }
}
