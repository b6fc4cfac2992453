//! Pure formatting functions for UI output.
//!
//! Colour comes from `console`, which drops styling when the stream is not a
//! terminal.

use console::style;

use crate::boundary::ReleaseWarning;
use crate::cli::orchestration::ReleaseOutcome;
use crate::domain::ExecutionMode;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().for_stderr(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a release warning to the user.
///
/// Shows a yellow warning icon followed by the warning message.
pub fn display_release_warning(warning: &ReleaseWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").yellow().for_stderr(), warning);
}

/// Announce which path the run takes.
pub fn display_mode(mode: ExecutionMode, version: &str) {
    let path = match mode {
        ExecutionMode::Local => "stage and create hosted release",
        ExecutionMode::Automated => "publish to registry",
    };
    println!(
        "\n{} {} ({} mode: {})",
        style("Releasing").bold(),
        style(version).cyan(),
        mode,
        path
    );
}

/// Display the commands a dry run would have executed.
pub fn display_dry_run(commands: &[String]) {
    println!("\n{}", style("Dry run - would run:").bold());
    for command in commands {
        println!("  {}", style(command).cyan());
    }
}

/// One-line summary of a finished run.
pub fn summarize_outcome(outcome: &ReleaseOutcome) -> String {
    match outcome {
        ReleaseOutcome::Staged { version, packages } => format!(
            "Staged {} package(s) at {}; hosted release created",
            packages.len(),
            version
        ),
        ReleaseOutcome::Published {
            version,
            tag,
            packages,
        } => format!(
            "Published {} package(s) at {} under '{}'",
            packages.len(),
            version,
            tag
        ),
        ReleaseOutcome::DryRun { version, tag, commands } => format!(
            "Dry run complete: {} command(s) for {} under '{}' not executed",
            commands.len(),
            version,
            tag
        ),
    }
}

/// Print the run summary.
pub fn display_outcome(outcome: &ReleaseOutcome) {
    println!("\n{} {}\n", style("✓").green(), summarize_outcome(outcome));
}
