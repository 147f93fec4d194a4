use serde::{Deserialize, Serialize};

use crate::script::script_model::ScriptResult;

/// Outcome of replaying every script against one page fixture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaySuiteReport {
    /// Page fixture the scripts ran against.
    pub page: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,

    /// Failed assertions across all scripts. Step errors are not counted.
    pub failed_assertions: usize,
    /// Sum of the selections left standing at the end of each script.
    pub selected_at_end: usize,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u128>,

    pub script_results: Vec<ScriptResult>,
}

impl ReplaySuiteReport {
    pub fn from_results(page: &str, results: Vec<ScriptResult>) -> Self {
        let passed = results.iter().filter(|r| r.passed).count();
        let failed_assertions = results
            .iter()
            .flat_map(|r| &r.assertion_results)
            .filter(|a| !a.passed)
            .count();
        let selected_at_end = results.iter().map(|r| r.final_selection.len()).sum();

        Self {
            page: page.to_string(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            failed_assertions,
            selected_at_end,
            duration_ms: None,
            script_results: results,
        }
    }

    pub fn with_duration(mut self, duration_ms: u128) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Scripts that stopped on a step error rather than an assertion.
    pub fn errored(&self) -> impl Iterator<Item = &ScriptResult> {
        self.script_results.iter().filter(|r| r.error.is_some())
    }
}
