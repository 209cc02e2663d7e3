//! Bash command mutation classifier.
//!
//! Decides whether a shell command string is safe to run under a read-only
//! mode. The approach is lexical: split the string into chain/pipe
//! segments and check each against a blocklist of known mutating commands.
//! Unknown commands pass. The goal is to catch obvious mutations (writes,
//! deletes, git push, package installs) without false positives on jq
//! filters, SQL comparisons with `>`, `python -c`, and other routine
//! read-only work. This is not a sandbox and not a security boundary
//! against direct shell access.

mod catalog;
mod segment;

use std::sync::LazyLock;

use regex::Regex;

pub use segment::{CommandParts, extract_command, split_commands};

/// Longest command preview quoted in a block reason.
const REASON_PREVIEW_LEN: usize = 60;

static DOUBLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""(?:[^"\\]|\\.)*""#).unwrap());
static SINGLE_QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"'[^']*'").unwrap());

/// Outcome of classifying a command string or segment.
///
/// Classification is a pure function of its input: same string, same
/// verdict, no I/O.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Blocked(String),
}

impl Verdict {
    pub fn is_blocked(&self) -> bool {
        matches!(self, Verdict::Blocked(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Allowed => None,
            Verdict::Blocked(reason) => Some(reason),
        }
    }

    fn blocked(reason: impl Into<String>) -> Self {
        Verdict::Blocked(reason.into())
    }
}

/// Classify a full bash command string.
///
/// Shell-escape constructs (`eval`, `exec`, `bash -c`, ...) are checked
/// against the whole string first: they can execute an arbitrary nested
/// string, so per-segment analysis would never see the payload. After
/// that, every segment in the chain is checked in original order,
/// short-circuiting on the first block.
pub fn check_command(command: &str) -> Verdict {
    let trimmed = command.trim();

    for (pattern, label) in catalog::SHELL_ESCAPES.iter() {
        if pattern.is_match(trimmed) {
            return Verdict::blocked(format!("{} can execute arbitrary code", label));
        }
    }

    for segment in split_commands(trimmed) {
        let verdict = check_segment(segment);
        if verdict.is_blocked() {
            return verdict;
        }
    }

    Verdict::Allowed
}

/// Classify a single already-segmented command.
pub fn check_segment(segment: &str) -> Verdict {
    if has_file_redirect(segment) {
        return Verdict::blocked("output redirection writes to disk");
    }

    let parts = extract_command(segment);
    if parts.cmd.is_empty() {
        return Verdict::Allowed;
    }

    // Patterns like "git push" need the arguments, so the catalog is
    // matched against the reconstructed "<cmd> <rest>" string.
    let full = if parts.rest.is_empty() {
        parts.cmd.clone()
    } else {
        format!("{} {}", parts.cmd, parts.rest)
    };
    for pattern in catalog::MUTATING_COMMANDS.iter() {
        if pattern.matches(&full) {
            let preview: String = full.chars().take(REASON_PREVIEW_LEN).collect();
            return Verdict::blocked(format!("\"{}\" is a mutating command", preview));
        }
    }

    if parts.cmd == "sqlite3" && catalog::MUTATING_SQL.is_match(&parts.rest) {
        return Verdict::blocked("sqlite3 with mutating SQL");
    }

    // Interpreters handed a script file can do anything; inline expressions
    // (python -c, node -e) stay usable for read-only queries.
    if matches!(parts.cmd.as_str(), "python" | "python3" | "node")
        && !parts.rest.is_empty()
        && !parts.rest.starts_with('-')
    {
        let file = parts.rest.split_whitespace().next().unwrap_or_default();
        return Verdict::blocked(format!("\"{} {}\" runs a script file", parts.cmd, file));
    }

    Verdict::Allowed
}

/// Detect output redirection to a file.
///
/// Quoted substrings are replaced with empty quoted placeholders first so
/// a `>` inside a literal never counts. A redirect is `>` or `>>` preceded
/// by start-of-string or whitespace and not followed, after optional
/// whitespace, by `=` (comparison), `&` (fd duplication), or another `>`.
/// The `regex` crate has no lookahead, so the operator scan is done by
/// hand over the quote-stripped text.
fn has_file_redirect(segment: &str) -> bool {
    let stripped = DOUBLE_QUOTED.replace_all(segment, "\"\"");
    let stripped = SINGLE_QUOTED.replace_all(&stripped, "''");
    let bytes = stripped.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != b'>' || (i > 0 && !bytes[i - 1].is_ascii_whitespace()) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        if j < bytes.len() && bytes[j] == b'>' {
            j += 1;
        }
        if j < bytes.len() && bytes[j] == b'>' {
            // three or more `>` in a row is not a redirect operator
            i = j + 1;
            continue;
        }
        while j < bytes.len() && bytes[j].is_ascii_whitespace() {
            j += 1;
        }
        match bytes.get(j) {
            Some(b'=') | Some(b'&') | Some(b'>') => i = j.max(i + 1),
            // anything else, including end of string, is a file target
            _ => return true,
        }
    }

    false
}
