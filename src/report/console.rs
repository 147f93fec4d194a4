use crate::report::report_model::ReplaySuiteReport;
use crate::script::script_model::AssertionSpec;

// ============================================================================
// Console reporter
// ============================================================================

/// Format a replay report for terminal output.
///
/// ```text
/// === Replay Suite: page.json ===
///
/// ✓ PASS  multiple toggle (6 steps, 3 assertions, 2 selected)
/// ✗ FAIL  area drag (3 steps, 1 assertions, 4 selected)
///     [FAIL] Step 2: SelectedCount: expected 1, got 4
///
/// === Results: 1 passed, 1 failed (2 total) ===
/// 1 failed assertions, 0 step errors
/// ```
pub fn format_console_report(report: &ReplaySuiteReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Replay Suite: {} ===\n\n", report.page));

    for result in &report.script_results {
        let marker = if result.passed {
            "\u{2713} PASS"
        } else {
            "\u{2717} FAIL"
        };

        out.push_str(&format!(
            "{}  {} ({} steps, {} assertions, {} selected)\n",
            marker,
            result.script_name,
            result.steps_run,
            result.assertion_results.len(),
            result.final_selection.len()
        ));

        if let Some(ref error) = result.error {
            out.push_str(&format!("    [ERROR] {}\n", error));
        }

        for ar in result.assertion_results.iter().filter(|ar| !ar.passed) {
            let detail = ar.message.as_deref().unwrap_or("assertion failed");
            out.push_str(&format!(
                "    [FAIL] Step {}: {}: {}\n",
                ar.step_index,
                assertion_name(&ar.spec),
                detail
            ));
        }
    }

    out.push_str(&format!(
        "\n=== Results: {} passed, {} failed ({} total)",
        report.passed, report.failed, report.total
    ));

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {:.1}s", ms as f64 / 1000.0));
    }

    out.push_str(" ===\n");

    if !report.all_passed() {
        out.push_str(&format!(
            "{} failed assertions, {} step errors\n",
            report.failed_assertions,
            report.errored().count()
        ));
    }
    out
}

fn assertion_name(spec: &AssertionSpec) -> &'static str {
    match spec {
        AssertionSpec::Active { .. } => "Active",
        AssertionSpec::Mode { .. } => "Mode",
        AssertionSpec::SelectedCount { .. } => "SelectedCount",
        AssertionSpec::SelectedTags { .. } => "SelectedTags",
        AssertionSpec::SelectedIds { .. } => "SelectedIds",
        AssertionSpec::OverlayCount { .. } => "OverlayCount",
        AssertionSpec::ListenerCount { .. } => "ListenerCount",
        AssertionSpec::LabelText { .. } => "LabelText",
    }
}
