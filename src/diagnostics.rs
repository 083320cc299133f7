//! Compiler messages, and the keyword combination each one was reported for.
//!
//! The toolchain reports the keywords of the failing variant in the first line of a
//! message's details, as in `Compiling Vertex program with FOO _BAR`. Extracting them
//! lets a message be used to jump straight to the variant that produced it.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "Error"),
            Severity::Warning => write!(f, "Warning"),
        }
    }
}

/// A message as reported by the shader compiler
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderMessage {
    pub severity: Severity,
    pub platform: String,
    pub file: String,
    pub line: i64,
    pub message: String,
    pub message_details: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DiagnosticMessage {
    pub full_message: String,
    pub message_without_details: String,

    /// Keywords of the variant the message was reported for
    pub sorted_keywords: String,
}

impl DiagnosticMessage {
    pub fn new(msg: &ShaderMessage) -> Self {
        let message_without_details = format!(
            "[{}] (on {}): {}:{} - {}",
            msg.severity,
            msg.platform,
            file_name(&msg.file),
            msg.line,
            msg.message
        );

        DiagnosticMessage {
            full_message: format!("{}\n{}", message_without_details, msg.message_details),
            message_without_details,
            sorted_keywords: keywords_for_message(&msg.message_details),
        }
    }
}

/// Diagnostics for all error messages among `messages`; warnings are left out.
pub fn collect_errors<'m, I>(messages: I) -> Vec<DiagnosticMessage>
where
    I: IntoIterator<Item = &'m ShaderMessage>,
{
    messages
        .into_iter()
        .filter(|msg| msg.severity == Severity::Error)
        .map(DiagnosticMessage::new)
        .collect()
}

/// Keyword list from the first line of a message's details. If the line isn't a
/// `Compiling <stage> program with …` header, it is returned as-is.
pub fn keywords_for_message(message_details: &str) -> String {
    lazy_static::lazy_static! {
        static ref COMPILING_PROGRAM_RE: regex::Regex =
            regex::Regex::new(r"Compiling \S+ program with (.*)$").unwrap();
    }

    let first_line = message_details
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim_end_matches('\r');

    match COMPILING_PROGRAM_RE.captures(first_line) {
        Some(captures) => captures[1].trim().to_string(),
        None => first_line.to_string(),
    }
}

fn file_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
