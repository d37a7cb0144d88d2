pub mod cli;
pub mod mock;
pub mod provider;

pub use cli::CliGitProvider;
pub use provider::BranchProvider;

use regex::Regex;
use std::sync::LazyLock;

/// Matches a `git branch -vv` line whose upstream is gone, e.g.
/// `  alice/fix-1  1a2b3c4 [origin/alice/fix-1: gone] Fix the thing`.
/// The first column is `*` for the current branch and `+` for a branch
/// checked out in another worktree.
static GONE_BRANCH_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?<marker>[*+ ]) (?<name>\S+)\s+[0-9a-f]+ \[[^\]]+: gone\]")
        .expect("gone branch pattern is valid")
});

/// Parse `git branch -vv` output into the names of deletable gone branches
pub fn parse_gone_branches(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| GONE_BRANCH_LINE.captures(line))
        .filter(|caps| &caps["marker"] == " ")
        .map(|caps| caps["name"].to_string())
        .collect()
}

/// Split `git branch --format` style output into names, dropping blank lines
pub fn parse_branch_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
