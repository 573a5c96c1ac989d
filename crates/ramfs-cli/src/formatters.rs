//! Output formatters for command results.
//!
//! Provides the line-based text protocol and a JSON rendering with one
//! object per command.

use crate::OutputFormat;
use crate::runner::Outcome;
use anyhow::Result;

/// Renders the result of `command` in the given format.
///
/// The returned string has no trailing newline. A text `find` result may
/// span several lines.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Examples
///
/// ```
/// use ramfs_cli::OutputFormat;
/// use ramfs_cli::formatters::format_outcome;
/// use ramfs_cli::runner::Outcome;
///
/// let text = format_outcome("write", &Outcome::Written(5), OutputFormat::Text)?;
/// assert_eq!(text, "ok 5");
///
/// let json = format_outcome("write", &Outcome::Written(5), OutputFormat::Json)?;
/// assert_eq!(json, r#"{"command":"write","status":"ok","written":5}"#);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn format_outcome(command: &str, outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text::format(outcome)),
        OutputFormat::Json => json::format(command, outcome),
    }
}

/// Line-based text protocol.
pub mod text {
    use crate::runner::Outcome;

    /// Formats an outcome as protocol lines.
    ///
    /// - success: `ok`
    /// - write of `n > 0` bytes: `ok <n>`
    /// - read: `contenuto <content>`
    /// - find: one `ok <path>` per match, or `no`
    /// - failure: `no`
    #[must_use]
    pub fn format(outcome: &Outcome) -> String {
        match outcome {
            Outcome::Done | Outcome::Written(0) => "ok".to_string(),
            Outcome::Written(n) => format!("ok {n}"),
            Outcome::Content(content) => {
                format!("contenuto {}", String::from_utf8_lossy(content))
            }
            Outcome::Found(paths) if !paths.is_empty() => paths
                .iter()
                .map(|path| format!("ok {path}"))
                .collect::<Vec<_>>()
                .join("\n"),
            Outcome::Found(_) | Outcome::Failed(_) => "no".to_string(),
        }
    }
}

/// JSON output formatting.
pub mod json {
    use crate::runner::Outcome;
    use anyhow::Result;
    use serde::Serialize;
    use std::borrow::Cow;

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    enum Status {
        Ok,
        No,
    }

    #[derive(Serialize, Debug)]
    struct Report<'a> {
        command: &'a str,
        status: Status,
        #[serde(skip_serializing_if = "Option::is_none")]
        written: Option<usize>,
        #[serde(skip_serializing_if = "Option::is_none")]
        content: Option<Cow<'a, str>>,
        #[serde(skip_serializing_if = "Option::is_none")]
        paths: Option<&'a [String]>,
        #[serde(skip_serializing_if = "Option::is_none")]
        error: Option<&'a str>,
    }

    impl<'a> Report<'a> {
        const fn new(command: &'a str, status: Status) -> Self {
            Self {
                command,
                status,
                written: None,
                content: None,
                paths: None,
                error: None,
            }
        }
    }

    /// Formats an outcome as a single-line JSON object.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn format(command: &str, outcome: &Outcome) -> Result<String> {
        let status = if outcome.is_success() {
            Status::Ok
        } else {
            Status::No
        };

        let mut report = Report::new(command, status);
        match outcome {
            Outcome::Done => {}
            Outcome::Written(n) => report.written = Some(*n),
            Outcome::Content(content) => {
                report.content = Some(String::from_utf8_lossy(content));
            }
            Outcome::Found(paths) => report.paths = Some(paths.as_slice()),
            Outcome::Failed(error) => report.error = Some(error.as_str()),
        }

        Ok(serde_json::to_string(&report)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_status_lines() {
        assert_eq!(text::format(&Outcome::Done), "ok");
        assert_eq!(text::format(&Outcome::Written(0)), "ok");
        assert_eq!(text::format(&Outcome::Written(12)), "ok 12");
        assert_eq!(text::format(&Outcome::Failed("x".to_string())), "no");
    }

    #[test]
    fn test_text_content() {
        let outcome = Outcome::Content(b"hello world".to_vec());
        assert_eq!(text::format(&outcome), "contenuto hello world");

        let empty = Outcome::Content(Vec::new());
        assert_eq!(text::format(&empty), "contenuto ");
    }

    #[test]
    fn test_text_find() {
        let found = Outcome::Found(vec!["/x/y".to_string(), "/z/y".to_string()]);
        assert_eq!(text::format(&found), "ok /x/y\nok /z/y");
        assert_eq!(text::format(&Outcome::Found(Vec::new())), "no");
    }

    #[test]
    fn test_json_variants() {
        let done = json::format("create", &Outcome::Done).unwrap();
        assert_eq!(done, r#"{"command":"create","status":"ok"}"#);

        let read = json::format("read", &Outcome::Content(b"hi".to_vec())).unwrap();
        assert_eq!(read, r#"{"command":"read","status":"ok","content":"hi"}"#);

        let found = json::format("find", &Outcome::Found(vec!["/a".to_string()])).unwrap();
        assert_eq!(found, r#"{"command":"find","status":"ok","paths":["/a"]}"#);

        let none = json::format("find", &Outcome::Found(Vec::new())).unwrap();
        assert_eq!(none, r#"{"command":"find","status":"no","paths":[]}"#);

        let failed = json::format("delete", &Outcome::Failed("nope".to_string())).unwrap();
        assert_eq!(
            failed,
            r#"{"command":"delete","status":"no","error":"nope"}"#
        );
    }

    #[test]
    fn test_json_is_valid() {
        let output = format_outcome(
            "write",
            &Outcome::Written(3),
            OutputFormat::Json,
        )
        .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["written"], 3);
        assert!(!output.contains('\n'));
    }
}
