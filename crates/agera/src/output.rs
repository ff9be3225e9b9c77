//! Terminal output: status lines on stderr, plain results on stdout.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;

/// Color status lines only when stderr is a terminal and `NO_COLOR` is unset.
fn should_color() -> bool {
    io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none()
}

/// `✓ message` on stderr, unless quiet.
pub fn success(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    if should_color() {
        let _ = writeln!(stderr, "{} {message}", "✓".green().bold());
    } else {
        let _ = writeln!(stderr, "✓ {message}");
    }
}

/// `! message` on stderr, unless quiet.
pub fn notice(message: &str, quiet: bool) {
    if quiet {
        return;
    }
    let mut stderr = io::stderr().lock();
    if should_color() {
        let _ = writeln!(stderr, "{} {}", "!".yellow().bold(), message.dimmed());
    } else {
        let _ = writeln!(stderr, "! {message}");
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}
