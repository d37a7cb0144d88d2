use crossterm::event::{self, Event, KeyEventKind};
use mybranches_core::{
    cleanup::{CleanupStage, execute_stage},
    event::{AppEvent, CleanupMsg},
    git::BranchProvider,
};
use std::{sync::Arc, thread, time::Duration};

use super::EventSender;

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Forward key presses from the terminal until cancelled
pub(crate) fn spawn_input_reader(sender: &EventSender) {
    let sender = sender.clone();
    thread::spawn(move || {
        while !sender.is_cancelled() {
            match event::poll(INPUT_POLL_INTERVAL) {
                Ok(false) => {}
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        sender.send(AppEvent::Key(key));
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("failed to read terminal event: {e}");
                        sender.send(AppEvent::InputFailed(e.to_string()));
                        break;
                    }
                },
                Err(e) => {
                    log::warn!("failed to poll terminal events: {e}");
                    sender.send(AppEvent::InputFailed(e.to_string()));
                    break;
                }
            }
        }
    });
}

pub(super) fn spawn_ticker(sender: &EventSender, interval: Duration) {
    let sender = sender.clone();
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if sender.is_cancelled() {
                break;
            }
            sender.send(AppEvent::Cleanup(CleanupMsg::AnimationTick));
        }
    });
}

pub(super) fn spawn_stage(
    git: &Arc<dyn BranchProvider>,
    sender: &EventSender,
    stage: CleanupStage,
    dry_run: bool,
) {
    let git = Arc::clone(git);
    let sender = sender.clone();
    thread::spawn(move || {
        if sender.is_cancelled() {
            return;
        }
        let msg = execute_stage(git.as_ref(), stage, dry_run);
        sender.send(AppEvent::Cleanup(msg));
    });
}
