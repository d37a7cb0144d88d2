mod logging;

use anyhow::Result;
use clap::Parser;
use mybranches_core::{
    browser::{BrowserContext, BrowserState},
    cleanup::CleanupState,
    clipboard::PlatformClipboard,
    config::{self, Config},
    git::{BranchProvider, CliGitProvider},
    outcome::Outcome,
    pattern::{DefaultPattern, default_pattern},
};
use mybranches_tui::{EventLoop, Theme};
use ratatui::{DefaultTerminal, TerminalOptions, Viewport};
use std::{path::PathBuf, process::ExitCode, sync::Arc};

/// Title, blank line, blank line and footer around the branch rows
const BROWSER_CHROME_HEIGHT: u16 = 4;
const MAX_BROWSER_HEIGHT: u16 = 24;
const MIN_BROWSER_HEIGHT: u16 = 6;
const CLEANUP_HEIGHT: u16 = 3;

#[derive(Parser)]
#[command(version, about = "Browse, switch to, delete and clean up your git branches")]
struct Cli {
    /// Branch name prefix to search for (defaults to your login name)
    #[arg(short, long)]
    pattern: Option<String>,

    /// Fetch with prune and delete local branches whose remote is gone
    #[arg(long)]
    cleanup: bool,

    /// With --cleanup, only count the branches that would be deleted
    #[arg(long)]
    dry_run: bool,

    /// Override path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level written to the log file
    #[arg(long, default_value = logging::DEFAULT_LOG_LEVEL)]
    log_level: log::LevelFilter,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging(cli.log_level) {
        eprintln!("Warning: failed to set up logging: {e:#}");
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = config::load_config(cli.config.as_deref())?;
    let theme = Theme::from_config(&config.theme);
    let git: Arc<dyn BranchProvider> = Arc::new(CliGitProvider::new());

    if cli.cleanup {
        if cli.pattern.is_some() {
            log::warn!("both --pattern and --cleanup given, running cleanup");
            eprintln!("Warning: --pattern is ignored when --cleanup is given");
        }
        let dry_run = cli.dry_run || config.cleanup.dry_run;
        return run_cleanup(&git, dry_run, &theme);
    }

    let pattern = resolve_pattern(cli, &config);
    if pattern.trim().is_empty() {
        println!("No branch pattern given, nothing to search for");
        return Ok(());
    }
    run_browser(git.as_ref(), &pattern, &theme)
}

/// Flag, then config, then login name
fn resolve_pattern(cli: &Cli, config: &Config) -> String {
    if let Some(pattern) = cli.pattern.as_ref().or(config.pattern.as_ref()) {
        return pattern.clone();
    }
    match default_pattern() {
        DefaultPattern::Username(name) => name,
        DefaultPattern::Fallback(fallback) => {
            log::warn!("could not determine login name, using '{fallback}'");
            eprintln!("Could not determine your login name, searching for '{fallback}'");
            fallback
        }
    }
}

fn run_browser(git: &dyn BranchProvider, pattern: &str, theme: &Theme) -> Result<()> {
    let branches = git.find_branches(pattern)?;
    if branches.is_empty() {
        println!("Couldn't find any branches containing '{pattern}'");
        return Ok(());
    }
    log::info!("found {} branches matching '{pattern}'", branches.len());

    let clipboard = PlatformClipboard::detect();
    let ctx = BrowserContext {
        git,
        clipboard: clipboard.capability(),
    };
    let height = browser_height(branches.len());

    let mut terminal = init_terminal(height)?;
    let result = mybranches_tui::run_browser(
        &mut terminal,
        BrowserState::new(branches),
        &ctx,
        pattern,
        theme,
        EventLoop::new().with_terminal_input(),
    );
    restore_terminal(&mut terminal);

    perform(git, &result?.outcome())
}

fn run_cleanup(git: &Arc<dyn BranchProvider>, dry_run: bool, theme: &Theme) -> Result<()> {
    let mut terminal = init_terminal(CLEANUP_HEIGHT)?;
    let result = mybranches_tui::run_cleanup(
        &mut terminal,
        CleanupState::new(dry_run),
        git,
        theme,
        EventLoop::new().with_terminal_input(),
    );
    restore_terminal(&mut terminal);

    let state = result?;
    if let Some(error) = state.error() {
        anyhow::bail!("Something went wrong: {error}");
    }
    perform(git.as_ref(), &state.outcome())
}

fn perform(git: &dyn BranchProvider, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Switch(branch) => {
            let output = git.switch_to(branch)?;
            println!("\n---\n\n{output}");
        }
        Outcome::Delete(branch) => {
            let output = git.delete_branch(branch)?;
            print!("{output}");
        }
        Outcome::CleanedUp {
            count,
            dry_run: true,
        } => {
            println!("Found {count} branch(es) not on remote (dry run)");
        }
        Outcome::CleanedUp {
            count,
            dry_run: false,
        } => {
            println!("Deleted {count} branch(es)");
        }
        Outcome::Nothing => log::debug!("session ended without an action"),
    }
    Ok(())
}

fn browser_height(branch_count: usize) -> u16 {
    let rows = u16::try_from(branch_count).unwrap_or(u16::MAX);
    rows.saturating_add(BROWSER_CHROME_HEIGHT)
        .clamp(MIN_BROWSER_HEIGHT, MAX_BROWSER_HEIGHT)
}

fn init_terminal(height: u16) -> Result<DefaultTerminal> {
    // Inline viewport keeps drawing in the primary screen buffer, so the
    // tool's output stays in the scrollback like any other command.
    let terminal = ratatui::try_init_with_options(TerminalOptions {
        viewport: Viewport::Inline(height),
    })?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut DefaultTerminal) {
    if let Err(e) = terminal.clear() {
        log::warn!("failed to clear the viewport: {e}");
    }
    ratatui::restore();
}
