//! CLI output formatting.
//!
//! # Output Format
//!
//! ```text
//! Image rotated by 45 degrees.
//!     Source: photos/dawn.jpg (1920x1080)
//!     Output: out/dawn.png (png)
//!     Clipped: 612744 pixels (29.5%)
//!     Time: 84 ms (parallel)
//! ```
//!
//! The first line is the whole story; indented context lines follow for
//! anyone tracing where the pixels came from and went.
//!
//! # Architecture
//!
//! Each display has a `format_*` function (returns `Vec<String>` or
//! `String`) for testability and a `print_*` wrapper that writes to stdout.
//! Format functions are pure: no I/O, no side effects.

use crate::raster::{Execution, RotationReport};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn execution_label(execution: Execution) -> &'static str {
    match execution {
        Execution::Parallel => "parallel",
        Execution::Sequential => "sequential",
    }
}

/// Format a finished rotation as a headline plus indented context lines.
pub fn format_rotation_report(report: &RotationReport) -> Vec<String> {
    vec![
        format!("Image rotated by {} degrees.", report.angle_degrees),
        format!(
            "{}Source: {} ({}x{})",
            indent(1),
            report.input.display(),
            report.width,
            report.height
        ),
        format!(
            "{}Output: {} ({})",
            indent(1),
            report.output.display(),
            report.format
        ),
        format!(
            "{}Clipped: {} pixels ({:.1}%)",
            indent(1),
            report.clipped_pixels,
            report.clipped_percent()
        ),
        format!(
            "{}Time: {} ms ({})",
            indent(1),
            report.elapsed_ms,
            execution_label(report.execution)
        ),
    ]
}

pub fn print_rotation_report(report: &RotationReport) {
    for line in format_rotation_report(report) {
        println!("{}", line);
    }
}

/// Pretty JSON rendering of a report, for `--json`.
pub fn format_report_json(report: &RotationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn print_report_json(report: &RotationReport) -> Result<(), serde_json::Error> {
    println!("{}", format_report_json(report)?);
    Ok(())
}
