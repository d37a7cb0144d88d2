use super::{parse_branch_names, parse_gone_branches, provider::BranchProvider};
use anyhow::{Context, Result};
use std::{
    path::PathBuf,
    process::{Command, Output},
};

/// Runs the `git` binary, in the process's working directory unless told otherwise.
#[derive(Debug, Clone, Default)]
pub struct CliGitProvider {
    dir: Option<PathBuf>,
}

impl CliGitProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: Some(dir.into()),
        }
    }

    /// Spawn git with `args` and wait for it. `env` is applied on top of the
    /// inherited environment.
    fn run(&self, args: &[&str], env: &[(&str, &str)]) -> Result<Output> {
        log::debug!("running git {}", args.join(" "));

        let mut command = Command::new("git");
        command.args(args).envs(env.iter().copied());
        if let Some(dir) = &self.dir {
            command.current_dir(dir);
        }

        command
            .output()
            .with_context(|| format!("failed to run git {}", args.join(" ")))
    }

    /// Run git with `args`, returning stdout. A missing binary or a non-zero
    /// exit is an error carrying git's stderr.
    fn git(&self, args: &[&str]) -> Result<String> {
        stdout_or_bail(args, &self.run(args, &[])?)
    }

    /// `git` with untranslated messages, for output that gets parsed
    fn git_untranslated(&self, args: &[&str]) -> Result<String> {
        stdout_or_bail(args, &self.run(args, &[("LC_ALL", "C")])?)
    }

    /// Like `git`, but returns stdout and stderr together, the way git's own
    /// porcelain reports what it did (e.g. "Switched to branch ...").
    fn git_combined(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args, &[])?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            anyhow::bail!("git {} failed: {}", args.join(" "), combined.trim());
        }

        Ok(combined)
    }
}

fn stdout_or_bail(args: &[&str], output: &Output) -> Result<String> {
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        log::debug!("git {} failed: {}", args.join(" "), stderr.trim());
        anyhow::bail!("git {} failed: {}", args.join(" "), stderr.trim());
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

impl BranchProvider for CliGitProvider {
    fn find_branches(&self, pattern: &str) -> Result<Vec<String>> {
        let glob = format!("{pattern}*");
        let stdout = self
            .git(&["branch", "--list", &glob, "--format", "%(refname:short)"])
            .context("Error finding branches")?;
        Ok(parse_branch_names(&stdout))
    }

    fn current_branch(&self) -> Result<String> {
        let stdout = self
            .git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .context("Error getting current branch")?;
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    fn switch_to(&self, branch: &str) -> Result<String> {
        self.git_combined(&["switch", branch])
            .context("Error switching branch")
    }

    fn delete_branch(&self, branch: &str) -> Result<String> {
        self.git_combined(&["branch", "-D", branch])
            .context("Error deleting branch")
    }

    fn fetch_and_prune(&self) -> Result<()> {
        self.git(&["fetch", "--prune"])
            .context("Error fetching remote branches")?;
        Ok(())
    }

    fn list_gone_branches(&self) -> Result<Vec<String>> {
        let stdout = self
            .git_untranslated(&["branch", "-vv", "--no-color"])
            .context("Error finding local branches not on remote")?;
        Ok(parse_gone_branches(&stdout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{fs, path::Path};

    fn git_in(dir: &Path, args: &[&str]) {
        Command::new("git")
            .args(args)
            .current_dir(dir)
            .output()
            .unwrap();
    }

    fn init_test_repo(dir: &Path) {
        git_in(dir, &["init", "-b", "main"]);
        git_in(dir, &["config", "user.email", "test@test.com"]);
        git_in(dir, &["config", "user.name", "Test"]);
        fs::write(dir.join("README.md"), "# test").unwrap();
        git_in(dir, &["add", "."]);
        git_in(dir, &["commit", "-m", "init"]);
    }

    /// A bare "remote" plus a clone of it, with `branches` pushed and tracked
    fn init_repo_with_remote(tmp: &Path, branches: &[&str]) -> PathBuf {
        let origin = tmp.join("origin");
        let work = tmp.join("work");
        fs::create_dir_all(&work).unwrap();
        init_test_repo(&work);
        git_in(tmp, &["clone", "--bare", "work", "origin"]);
        git_in(&work, &["remote", "add", "origin", &origin.to_string_lossy()]);
        git_in(&work, &["fetch", "origin"]);
        for branch in branches {
            git_in(&work, &["branch", branch]);
            git_in(&work, &["push", "-u", "origin", branch]);
        }
        work
    }

    #[test]
    fn test_find_branches_by_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "alice/fix-1"]);
        git_in(tmp.path(), &["branch", "alice/fix-2"]);
        git_in(tmp.path(), &["branch", "bob/feature"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        let branches = provider.find_branches("alice").unwrap();
        assert_eq!(branches, vec!["alice/fix-1", "alice/fix-2"]);
    }

    #[test]
    fn test_find_branches_no_match() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        assert!(provider.find_branches("nobody").unwrap().is_empty());
    }

    #[test]
    fn test_find_branches_outside_repo_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = CliGitProvider::in_dir(tmp.path());
        let err = provider.find_branches("alice").unwrap_err();
        assert!(
            format!("{err:#}").contains("Error finding branches"),
            "Error was: {err:#}"
        );
    }

    #[test]
    fn test_current_branch() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        assert_eq!(provider.current_branch().unwrap(), "main");
    }

    #[test]
    fn test_switch_to() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "alice/fix-1"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        let output = provider.switch_to("alice/fix-1").unwrap();
        assert!(output.contains("alice/fix-1"), "Output was: {output}");
        assert_eq!(provider.current_branch().unwrap(), "alice/fix-1");
    }

    #[test]
    fn test_switch_to_missing_branch_fails() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        assert!(provider.switch_to("does-not-exist").is_err());
    }

    #[test]
    fn test_delete_branch() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());
        git_in(tmp.path(), &["branch", "alice/fix-1"]);

        let provider = CliGitProvider::in_dir(tmp.path());
        let output = provider.delete_branch("alice/fix-1").unwrap();
        assert!(output.contains("Deleted branch"), "Output was: {output}");
        assert!(provider.find_branches("alice").unwrap().is_empty());
    }

    #[test]
    fn test_delete_current_branch_fails() {
        let tmp = tempfile::tempdir().unwrap();
        init_test_repo(tmp.path());

        let provider = CliGitProvider::in_dir(tmp.path());
        assert!(provider.delete_branch("main").is_err());
    }

    #[test]
    fn test_fetch_and_prune_outside_repo_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let provider = CliGitProvider::in_dir(tmp.path());
        let err = provider.fetch_and_prune().unwrap_err();
        assert!(
            format!("{err:#}").contains("Error fetching remote branches"),
            "Error was: {err:#}"
        );
    }

    #[test]
    fn test_gone_branches_after_remote_deletion() {
        let tmp = tempfile::tempdir().unwrap();
        let work = init_repo_with_remote(tmp.path(), &["alice/fix-1", "alice/fix-2"]);
        git_in(&work, &["push", "origin", "--delete", "alice/fix-1"]);

        let provider = CliGitProvider::in_dir(&work);
        provider.fetch_and_prune().unwrap();
        assert_eq!(provider.list_gone_branches().unwrap(), vec!["alice/fix-1"]);
    }

    #[test]
    fn test_gone_branches_ignore_color_config() {
        let tmp = tempfile::tempdir().unwrap();
        let work = init_repo_with_remote(tmp.path(), &["alice/fix-1", "alice/fix-2"]);
        git_in(&work, &["push", "origin", "--delete", "alice/fix-1"]);
        git_in(&work, &["config", "color.ui", "always"]);
        git_in(&work, &["config", "color.branch", "always"]);

        let provider = CliGitProvider::in_dir(&work);
        provider.fetch_and_prune().unwrap();
        assert_eq!(provider.list_gone_branches().unwrap(), vec!["alice/fix-1"]);
    }

    #[test]
    fn test_find_and_delete_stale_dry_run_keeps_branches() {
        let tmp = tempfile::tempdir().unwrap();
        let work = init_repo_with_remote(tmp.path(), &["alice/fix-1"]);
        git_in(&work, &["push", "origin", "--delete", "alice/fix-1"]);

        let provider = CliGitProvider::in_dir(&work);
        provider.fetch_and_prune().unwrap();
        assert_eq!(provider.find_and_delete_stale(true).unwrap(), 1);
        assert_eq!(provider.find_branches("alice").unwrap(), vec!["alice/fix-1"]);
    }

    #[test]
    fn test_find_and_delete_stale_deletes_branches() {
        let tmp = tempfile::tempdir().unwrap();
        let work = init_repo_with_remote(tmp.path(), &["alice/fix-1", "alice/fix-2"]);
        git_in(&work, &["push", "origin", "--delete", "alice/fix-1"]);

        let provider = CliGitProvider::in_dir(&work);
        provider.fetch_and_prune().unwrap();
        assert_eq!(provider.find_and_delete_stale(false).unwrap(), 1);
        assert_eq!(provider.find_branches("alice").unwrap(), vec!["alice/fix-2"]);
    }
}
