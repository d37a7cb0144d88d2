mod spawn;

use crate::{
    components::{
        branch_list::{self, BranchListView},
        cleanup_progress, confirm_delete,
    },
    keymap,
    theme::Theme,
};
use anyhow::{Result, bail};
use mybranches_core::{
    browser::{BrowserContext, BrowserState},
    cleanup::CleanupState,
    event::{AppEvent, CleanupMsg, Command},
    git::BranchProvider,
};
use ratatui::{Frame, Terminal, backend::Backend};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc,
    },
    time::Duration,
};

/// Spinner animation interval
pub const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Handle for producers feeding the event loop
#[derive(Clone)]
pub struct EventSender {
    tx: mpsc::Sender<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventSender {
    /// Send an event from a background thread to the main loop
    pub fn send(&self, event: AppEvent) {
        let _ = self.tx.send(event);
    }

    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }
}

/// The single ordered channel every producer writes into.
///
/// The loop that consumes it keeps no sender of its own unless it needs one
/// to dispatch work, so a channel with every producer gone reads as closed.
pub struct EventLoop {
    sender: EventSender,
    queue: EventQueue,
}

impl EventLoop {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        Self {
            sender: EventSender {
                tx,
                cancel: Arc::clone(&cancel),
            },
            queue: EventQueue { rx, cancel },
        }
    }

    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Start forwarding terminal key presses into the channel
    pub fn with_terminal_input(self) -> Self {
        spawn::spawn_input_reader(&self.sender);
        self
    }

    fn split(self) -> (EventSender, EventQueue) {
        (self.sender, self.queue)
    }
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving end; raises the cancel flag for every producer when dropped
struct EventQueue {
    rx: mpsc::Receiver<AppEvent>,
    cancel: Arc<AtomicBool>,
}

impl EventQueue {
    fn recv(&self) -> Result<AppEvent> {
        match self.rx.recv() {
            Ok(event) => Ok(event),
            Err(_) => bail!("Lost terminal input: no event producers left"),
        }
    }
}

impl Drop for EventQueue {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Relaxed);
    }
}

/// Run the branch browser until it asks to quit.
///
/// Returns the final state; the caller reads its outcome.
pub fn run_browser<B: Backend>(
    terminal: &mut Terminal<B>,
    mut state: BrowserState,
    ctx: &BrowserContext<'_>,
    pattern: &str,
    theme: &Theme,
    events: EventLoop,
) -> Result<BrowserState>
where
    B::Error: Send + Sync + 'static,
{
    if state.is_empty() {
        return Ok(state);
    }
    // Only the producers already started hold senders from here on
    let (sender, queue) = events.split();
    drop(sender);
    let copy_available = ctx.clipboard.is_some();

    loop {
        // Re-queried every frame so the badge tracks switches made elsewhere
        let current_branch = ctx.git.current_branch().unwrap_or_else(|e| {
            log::warn!("could not determine current branch: {e:#}");
            String::new()
        });
        let view = BranchListView {
            pattern,
            current_branch: &current_branch,
            copy_available,
        };
        terminal.draw(|f| draw_browser(f, &state, &view, theme))?;

        let key = match queue.recv()? {
            AppEvent::Key(key) => key,
            AppEvent::InputFailed(e) => bail!("Lost terminal input: {e}"),
            AppEvent::Cleanup(_) => continue,
        };
        let Some(action) = keymap::resolve_browser_action(key, &state) else {
            continue;
        };

        let (next, command) = state.update(action, ctx)?;
        state = next;
        if command == Some(Command::Quit) {
            break;
        }
    }

    Ok(state)
}

fn draw_browser(f: &mut Frame, state: &BrowserState, view: &BranchListView<'_>, theme: &Theme) {
    match state.deletion() {
        Some(deletion) => confirm_delete::draw(f, f.area(), deletion, view.current_branch, theme),
        None => branch_list::draw(f, f.area(), state, view, theme),
    }
}

/// Run the cleanup pipeline with a progress view until it finishes, fails or is quit.
pub fn run_cleanup<B: Backend>(
    terminal: &mut Terminal<B>,
    mut state: CleanupState,
    git: &Arc<dyn BranchProvider>,
    theme: &Theme,
    events: EventLoop,
) -> Result<CleanupState>
where
    B::Error: Send + Sync + 'static,
{
    let (sender, queue) = events.split();
    spawn::spawn_ticker(&sender, TICK_INTERVAL);
    let mut command = Some(state.init());

    loop {
        if let Some(Command::RunStage(stage)) = command {
            spawn::spawn_stage(git, &sender, stage, state.dry_run());
        }
        terminal.draw(|f| cleanup_progress::draw(f, f.area(), &state, theme))?;
        if command == Some(Command::Quit) {
            break;
        }

        let msg = match queue.recv()? {
            AppEvent::Key(key) => keymap::resolve_cleanup_action(key).map(CleanupMsg::KeyPress),
            AppEvent::Cleanup(msg) => Some(msg),
            AppEvent::InputFailed(e) => bail!("Lost terminal input: {e}"),
        };
        command = None;
        if let Some(msg) = msg {
            (state, command) = state.update(msg);
        }
    }

    Ok(state)
}
