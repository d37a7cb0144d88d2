use anyhow::Result;

/// Everything the controllers need from version control.
pub trait BranchProvider: Send + Sync {
    /// Local branches whose name starts with `pattern`, in git's order
    fn find_branches(&self, pattern: &str) -> Result<Vec<String>>;
    fn current_branch(&self) -> Result<String>;
    /// Returns the command's output on success
    fn switch_to(&self, branch: &str) -> Result<String>;
    /// Returns the command's output on success
    fn delete_branch(&self, branch: &str) -> Result<String>;
    fn fetch_and_prune(&self) -> Result<()>;
    /// Local branches whose upstream no longer exists on the remote.
    /// Branches that are checked out anywhere are left out.
    fn list_gone_branches(&self) -> Result<Vec<String>>;

    /// Count the gone branches, deleting them unless `dry_run` is set.
    /// Stops at the first branch that fails to delete.
    fn find_and_delete_stale(&self, dry_run: bool) -> Result<usize> {
        let gone = self.list_gone_branches()?;
        if !dry_run {
            for branch in &gone {
                self.delete_branch(branch)?;
            }
        }
        Ok(gone.len())
    }
}
