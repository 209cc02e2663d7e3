//! Command segmentation and normalization.

use std::sync::LazyLock;

use regex::Regex;

static CHAIN_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:&&|\|\||;)\s*").unwrap());
static PIPE_SPLIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*\|\s*").unwrap());
static ENV_ASSIGNMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Za-z_][A-Za-z0-9_]*=\S*\s+)+").unwrap());

/// Timing/priority wrappers stripped before the base command is taken.
/// One pass over the list; a wrapper-of-a-wrapper that appears earlier in
/// list order than its outer wrapper stays in place (known limitation).
static WRAPPER_PREFIXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ["time", "timeout", "nice", "ionice"]
        .into_iter()
        .map(|wrapper| {
            // Consume flags and digit-leading arguments: covers `-n 10`,
            // `-k 2`, and timeout's duration (`5`, `30s`).
            let pattern = format!(r"^{}\s+(?:(?:-\S+|\d\S*)\s+)*", wrapper);
            Regex::new(&pattern).unwrap()
        })
        .collect()
});

/// Split a command string into the segments that execute independently:
/// first across chain operators (`&&`, `||`, `;`), then across pipes.
///
/// Splitting is purely lexical. A delimiter inside a quoted string still
/// splits (`echo 'a && b'` yields two segments); honoring quoting depth
/// would need a shell grammar, which is out of proportion for this engine.
pub fn split_commands(command: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for chain in CHAIN_SPLIT.split(command) {
        for piped in PIPE_SPLIT.split(chain) {
            let trimmed = piped.trim();
            if !trimmed.is_empty() {
                segments.push(trimmed);
            }
        }
    }
    segments
}

/// A normalized segment: the base command and its arguments.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandParts {
    /// Final path component of the first token (`/usr/bin/grep` -> `grep`).
    pub cmd: String,
    /// Remaining tokens joined by single spaces.
    pub rest: String,
}

/// Normalize a segment down to `(command, rest)`.
///
/// Strips leading `NAME=value` assignments, then one layer of
/// timing/priority wrapper together with its flags and numeric arguments
/// (timeout's duration included), then reduces the command to its final
/// path component. An empty segment yields empty parts.
pub fn extract_command(segment: &str) -> CommandParts {
    let stripped = ENV_ASSIGNMENTS.replace(segment.trim(), "");
    let mut s: &str = &stripped;

    for prefix in WRAPPER_PREFIXES.iter() {
        if let Some(m) = prefix.find(s) {
            s = &s[m.end()..];
        }
    }

    let mut tokens = s.split_whitespace();
    let raw = tokens.next().unwrap_or_default();
    let rest = tokens.collect::<Vec<_>>().join(" ");

    let cmd = match raw.rsplit('/').next() {
        Some(base) if !base.is_empty() => base,
        _ => raw,
    };

    CommandParts {
        cmd: cmd.to_string(),
        rest,
    }
}
