//! Human and JSON renderings of command results and diagnostics.
//!
//! Results (values, names, JSON documents) go to stdout; diagnostics go to
//! stderr so piping `fsxattr get` output stays clean.

use serde_json::{json, Value};

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Sink for everything a command prints
pub trait OutputFormatter {
    /// Confirmation of a change (set, remove)
    fn success(&self, message: &str);
    fn error(&self, message: &str);
    fn warn(&self, message: &str);
    /// One result line, printed verbatim
    fn line(&self, text: &str);
    fn print_json(&self, value: &Value);
}

/// Plain text with status glyphs. `quiet` hides confirmations and warnings.
pub struct HumanFormatter {
    pub quiet: bool,
}

impl OutputFormatter for HumanFormatter {
    fn success(&self, message: &str) {
        if !self.quiet {
            println!("\u{2713} {message}");
        }
    }

    fn error(&self, message: &str) {
        eprintln!("\u{2717} Error: {message}");
    }

    fn warn(&self, message: &str) {
        if !self.quiet {
            eprintln!("\u{26a0} Warning: {message}");
        }
    }

    fn line(&self, text: &str) {
        println!("{text}");
    }

    fn print_json(&self, _value: &Value) {}
}

/// One JSON document per call, tagged with a `status` field.
pub struct JsonFormatter;

impl JsonFormatter {
    fn status(status: &str, message: &str) -> Value {
        json!({ "status": status, "message": message })
    }
}

impl OutputFormatter for JsonFormatter {
    fn success(&self, message: &str) {
        println!("{}", Self::status("ok", message));
    }

    fn error(&self, message: &str) {
        eprintln!("{}", Self::status("error", message));
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", Self::status("warning", message));
    }

    fn line(&self, text: &str) {
        println!("{}", Value::String(text.to_owned()));
    }

    fn print_json(&self, value: &Value) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(err) => self.error(&format!("cannot render output: {err}")),
        }
    }
}

pub fn get_formatter(format: OutputFormat, quiet: bool) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Human => Box::new(HumanFormatter { quiet }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_status_shape() {
        assert_eq!(
            JsonFormatter::status("warning", "ignoring config"),
            json!({ "status": "warning", "message": "ignoring config" })
        );
    }

    #[test]
    fn test_get_formatter_does_not_panic() {
        for format in [OutputFormat::Human, OutputFormat::Json] {
            let formatter = get_formatter(format, true);
            formatter.success("done");
            formatter.line("user.a");
            formatter.print_json(&json!({ "names": ["user.a"] }));
        }
    }
}
