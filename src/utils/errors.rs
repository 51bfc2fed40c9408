//! User-Friendly Error Formatting
//!
//! Turns a failed run into a short message with a troubleshooting hint.
//! Printed to stderr; `wl-paste --watch` usually discards it, but it helps
//! when clipman2 is run by hand.

use std::fmt::Write;

use crate::error::{ClipmanError, ErrorType};

/// Format error for user consumption
pub fn format_user_error(error: &anyhow::Error) -> String {
    let mut output = String::new();

    writeln!(&mut output, "clipman2: {}", error).ok();

    match error.downcast_ref::<ClipmanError>().map(ClipmanError::kind) {
        Some(ErrorType::Input) => format_input_error(&mut output),
        Some(ErrorType::Publisher) => format_publisher_error(&mut output),
        Some(ErrorType::Stream) => {
            writeln!(&mut output, "  The clipboard stream broke off while being read.").ok();
        }
        Some(ErrorType::Config) | Some(ErrorType::Unknown) | None => {}
    }

    // Technical details
    if error.chain().nth(1).is_some() {
        writeln!(&mut output).ok();
        writeln!(&mut output, "Technical Details:").ok();
        writeln!(&mut output, "  {:#}", error).ok();
    }

    output
}

fn format_input_error(output: &mut String) {
    writeln!(output, "  Nothing arrived on stdin.").ok();
    writeln!(output, "  clipman2 is meant to be started by wl-paste for every change:").ok();
    writeln!(
        output,
        "    wl-paste -t \"text/plain;charset=utf-8\" --watch clipman2"
    )
    .ok();
}

fn format_publisher_error(output: &mut String) {
    writeln!(output, "  Could not run the clipboard-set utility.").ok();
    writeln!(output, "  → Install wl-clipboard (provides wl-copy and wl-paste)").ok();
    writeln!(output, "  → Check that wl-copy is on PATH for the watching session").ok();
}
