//! Operator-facing output
//!
//! Section headers, progress lines and the final success or abort report.
//! Diagnostics go to the tracing log; everything here is for the person
//! running the installer.

use console::Style;
use miette::Diagnostic;

use crate::error::WaydrError;
use crate::installer::InstallState;
use crate::platform::Platform;

/// Program banner
pub fn banner() {
    println!("\n{}", Style::new().bold().cyan().apply_to("Darth Waydr"));
}

/// Header for an install step
pub fn section(title: &str) {
    println!("\n{}", Style::new().bold().green().apply_to(title));
}

/// A command about to run with visible output
pub fn command(command: &str) {
    println!("{}", Style::new().dim().apply_to(command));
}

/// Detected platform summary
pub fn platform(platform: &Platform) {
    println!(
        "  {} {}",
        Style::new().bold().apply_to("cpu:"),
        platform.architecture
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("distribution:"),
        platform.distro
    );
    println!(
        "  {} {}",
        Style::new().bold().apply_to("session:"),
        platform.session
    );
}

/// Name of the package currently being installed
pub fn package(name: &str, current: usize, total: usize) {
    println!(
        "\n{} {}",
        Style::new().dim().apply_to(format!("({current}/{total})")),
        Style::new().bold().yellow().apply_to(name)
    );
}

/// Alias definitions offered to the operator
pub fn aliases(aliases: &[String]) {
    for alias in aliases {
        println!("\n  {alias}");
    }
    println!();
}

/// Plain informational line
pub fn note(message: &str) {
    println!("{message}");
}

/// A failure that does not stop the run
pub fn warning(message: &str) {
    println!("{} {message}", Style::new().bold().yellow().apply_to("warning:"));
}

/// Closing line of a completed run
pub fn success(application: &str) {
    println!(
        "\n{}",
        Style::new()
            .bold()
            .green()
            .apply_to(format!("Enjoy {application}!"))
    );
}

/// Report why the run stopped, including the diagnostic help text
pub fn abort(step: InstallState, cause: &WaydrError) {
    eprintln!(
        "\n{} {}",
        Style::new().bold().red().apply_to("error:"),
        cause
    );
    if let Some(help) = cause.help() {
        eprintln!("  {help}");
    }
    if cause.is_precondition() {
        eprintln!("  nothing on this system was changed");
    }
    eprintln!(
        "{}",
        Style::new()
            .dim()
            .apply_to(format!("exiting during \"{}\" due to previous error", step.title()))
    );
}
