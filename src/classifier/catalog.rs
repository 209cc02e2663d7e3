//! Pattern catalogs for the mutation classifier.
//!
//! Everything here is data: ordered collections of matchers evaluated
//! generically by the classifier, so extending coverage is a table edit
//! rather than a new code branch.

use std::sync::LazyLock;

use regex::Regex;

/// A blocklist entry tested against the normalized `"<cmd> <rest>"` string.
///
/// `unless` carves out an exception the pattern itself cannot express: the
/// `regex` crate has no negative lookahead, so `git stash` minus
/// `list`/`show` is two regexes instead of one.
pub(crate) struct CommandPattern {
    pattern: Regex,
    unless: Option<Regex>,
}

impl CommandPattern {
    fn new(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).unwrap(),
            unless: None,
        }
    }

    fn unless(mut self, exception: &str) -> Self {
        self.unless = Some(Regex::new(exception).unwrap());
        self
    }

    pub(crate) fn matches(&self, command: &str) -> bool {
        self.pattern.is_match(command)
            && !self
                .unless
                .as_ref()
                .is_some_and(|exception| exception.is_match(command))
    }
}

/// Commands and patterns that mutate filesystem, processes, or system
/// state. Checked against each segment in a command chain; first match
/// wins. Unknown commands are deliberately absent: the catalog targets
/// known mutation vectors, not a sandbox.
pub(crate) static MUTATING_COMMANDS: LazyLock<Vec<CommandPattern>> = LazyLock::new(|| {
    let p = CommandPattern::new;
    vec![
        // filesystem mutations
        p(r"^rm\b"),
        p(r"^mv\b"),
        p(r"^cp\b"),
        p(r"^mkdir\b"),
        p(r"^rmdir\b"),
        p(r"^touch\b"),
        p(r"^chmod\b"),
        p(r"^chown\b"),
        p(r"^chgrp\b"),
        p(r"^ln\b"),
        // coreutils install
        p(r"^install\b"),
        // editors (interactive, but block in case of scripted use)
        p(r"^nano\b"),
        p(r"^vi\b"),
        p(r"^vim\b"),
        p(r"^emacs\b"),
        // git mutations
        p(
            r"^git\s+(add|commit|push|merge|rebase|reset|checkout\s+-b|switch\s+-c|branch\s+-[dDmM]|cherry-pick|revert|tag\s+\S+|clean|gc|am|format-patch)\b",
        ),
        CommandPattern::new(r"^git\s+stash\b").unless(r"^git\s+stash\s+(list|show)\b"),
        // package managers: install/modify
        p(r"^npm\s+(install|uninstall|update|publish|init|link|ci|pkg)\b"),
        p(r"^npx\b"),
        p(r"^yarn\s+(add|remove|install)\b"),
        p(r"^pnpm\s+(add|remove|install)\b"),
        p(r"^pip\s+(install|uninstall)\b"),
        p(r"^uv\s+(add|remove|sync|lock|pip\s+install|pip\s+uninstall)\b"),
        p(r"^cargo\s+(install|build|run|publish|add|remove)\b"),
        p(r"^go\s+(install|build|run|get)\b"),
        // process control
        p(r"^kill\b"),
        p(r"^pkill\b"),
        p(r"^killall\b"),
        p(r"^nohup\b"),
        p(r"^disown\b"),
        p(r"^sudo\b"),
        // containers
        p(r"^docker\s+(run|rm|stop|kill|build|push|pull|exec|create|compose)\b"),
        p(r"^docker-compose\b"),
        p(r"^podman\s+(run|rm|stop|kill|build|push|pull|exec|create)\b"),
        // service management
        p(r"^systemctl\s+(start|stop|restart|enable|disable|mask|unmask|daemon-reload)\b"),
        p(r"^service\s+\S+\s+(start|stop|restart)\b"),
        // destructive disk tools
        p(r"^dd\b"),
        p(r"^mkfs\b"),
        p(r"^fdisk\b"),
        p(r"^parted\b"),
        // firewalls
        p(r"^iptables\b"),
        p(r"^ufw\b"),
        p(r"^crontab\s+-[er]\b"),
        // in-place stream editing
        p(r"^sed\s.*-i\b"),
        p(r"^sed\s+-i\b"),
        // tee writes its stdin to files
        p(r"^tee\b"),
    ]
});

/// Shell constructs that execute an arbitrary nested string, bypassing
/// per-segment analysis. Checked against the whole command string before
/// segmentation.
pub(crate) static SHELL_ESCAPES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"\beval\b").unwrap(), "eval"),
        (Regex::new(r"\bexec\s").unwrap(), "exec"),
        (Regex::new(r"\bbash\s+-c\b").unwrap(), "bash -c"),
        (Regex::new(r"\bsh\s+-c\b").unwrap(), "sh -c"),
        (Regex::new(r"\bzsh\s+-c\b").unwrap(), "zsh -c"),
    ]
});

/// SQL that modifies data, matched case-insensitively on whole words.
pub(crate) static MUTATING_SQL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|TRUNCATE|REPLACE)\b").unwrap()
});
