//! Progress and completion output for the publisher CLI.
//!
//! User-facing progress goes through an injected writer so tests can capture
//! it; errors from the writer itself are swallowed, as losing a progress
//! line must never abort a publish.

use std::io::Write;

/// Write a progress line, ignoring writer failures.
pub fn write_progress_line(stderr: &mut dyn Write, message: impl std::fmt::Display) {
    if writeln!(stderr, "{message}").is_err() {
        // Best-effort progress; ignore write failures.
    }
}

/// Message printed after a successful publish.
///
/// The commit is local only; the operator still has to push it.
#[must_use]
pub fn completion_message() -> &'static str {
    "completed, make sure to run `git push` to publish your changes"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_progress_line_appends_a_newline() {
        let mut buffer = Vec::new();
        write_progress_line(&mut buffer, "packaging demo-0.1.0");
        assert_eq!(buffer, b"packaging demo-0.1.0\n");
    }

    #[test]
    fn completion_message_reminds_about_push() {
        assert!(completion_message().contains("git push"));
    }
}
