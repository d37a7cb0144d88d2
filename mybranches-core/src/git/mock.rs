use super::provider::BranchProvider;
use anyhow::Result;
use std::sync::Mutex;

/// Scripted provider for tests. Results left as `None` succeed; calls are recorded.
#[derive(Default)]
pub struct MockBranchProvider {
    pub branches: Vec<String>,
    pub current_branch: Mutex<String>,
    pub gone_branches: Vec<String>,
    pub find_branches_result: Mutex<Option<Result<Vec<String>>>>,
    pub fetch_result: Mutex<Option<Result<()>>>,
    pub list_gone_result: Mutex<Option<Result<Vec<String>>>>,
    pub delete_result: Mutex<Option<Result<String>>>,
    pub switch_calls: Mutex<Vec<String>>,
    pub delete_calls: Mutex<Vec<String>>,
    pub fetch_calls: Mutex<usize>,
    pub list_gone_calls: Mutex<usize>,
    pub current_branch_calls: Mutex<usize>,
}

impl MockBranchProvider {
    pub fn with_branches(branches: &[&str], current: &str) -> Self {
        Self {
            branches: branches.iter().map(ToString::to_string).collect(),
            current_branch: Mutex::new(current.to_string()),
            ..Self::default()
        }
    }

    pub fn with_gone_branches(gone: &[&str]) -> Self {
        Self {
            gone_branches: gone.iter().map(ToString::to_string).collect(),
            ..Self::default()
        }
    }

    /// Simulate a `git switch` happening outside this process
    pub fn set_current_branch(&self, branch: &str) {
        *self.current_branch.lock().unwrap() = branch.to_string();
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.delete_calls.lock().unwrap().clone()
    }

    pub fn fetch_calls(&self) -> usize {
        *self.fetch_calls.lock().unwrap()
    }

    pub fn list_gone_calls(&self) -> usize {
        *self.list_gone_calls.lock().unwrap()
    }

    pub fn current_branch_calls(&self) -> usize {
        *self.current_branch_calls.lock().unwrap()
    }
}

impl BranchProvider for MockBranchProvider {
    fn find_branches(&self, pattern: &str) -> Result<Vec<String>> {
        self.find_branches_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| {
                Ok(self
                    .branches
                    .iter()
                    .filter(|b| b.starts_with(pattern))
                    .cloned()
                    .collect())
            })
    }

    fn current_branch(&self) -> Result<String> {
        *self.current_branch_calls.lock().unwrap() += 1;
        Ok(self.current_branch.lock().unwrap().clone())
    }

    fn switch_to(&self, branch: &str) -> Result<String> {
        self.switch_calls.lock().unwrap().push(branch.to_string());
        self.set_current_branch(branch);
        Ok(format!("Switched to branch '{branch}'\n"))
    }

    fn delete_branch(&self, branch: &str) -> Result<String> {
        self.delete_calls.lock().unwrap().push(branch.to_string());
        self.delete_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(format!("Deleted branch {branch}\n")))
    }

    fn fetch_and_prune(&self) -> Result<()> {
        *self.fetch_calls.lock().unwrap() += 1;
        self.fetch_result.lock().unwrap().take().unwrap_or(Ok(()))
    }

    fn list_gone_branches(&self) -> Result<Vec<String>> {
        *self.list_gone_calls.lock().unwrap() += 1;
        self.list_gone_result
            .lock()
            .unwrap()
            .take()
            .unwrap_or_else(|| Ok(self.gone_branches.clone()))
    }
}
