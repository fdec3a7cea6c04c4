//! Human-readable report rendering
//!
//! One line per scenario, then a summary line. The JSON form of the report
//! is just the serialized [`SuiteReport`]; the CLI picks one or the other.

use bmx_core::SuiteReport;

/// Render the report as the lines the CLI prints
pub fn render(report: &SuiteReport) -> String {
    let mut out = String::new();

    for scenario in &report.outcomes {
        out.push_str(&format!(
            "{}: {} ({} ms)",
            scenario.name, scenario.outcome, scenario.elapsed_ms
        ));
        if !scenario.artifacts.is_empty() {
            let paths: Vec<String> = scenario
                .artifacts
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            out.push_str(&format!(" [{}]", paths.join(", ")));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "suite: {} ({} ms)\n",
        report.summary(),
        report.elapsed_ms
    ));
    out
}
