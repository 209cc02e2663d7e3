//! Classifier Tests
//!
//! Tests for the bash mutation classifier: command segmentation, wrapper
//! and path normalization, the mutating-command catalog, shell escapes,
//! redirects, and interpreter handling.
//!
//! Run: cargo nextest run --test classifier_tests

use agent_mode::{Verdict, check_command, extract_command, split_commands};

fn blocked(command: &str) -> String {
    match check_command(command) {
        Verdict::Blocked(reason) => reason,
        Verdict::Allowed => panic!("expected {:?} to be blocked", command),
    }
}

fn allowed(command: &str) {
    assert_eq!(check_command(command), Verdict::Allowed, "{}", command);
}

// =============================================================================
// Segmentation
// =============================================================================

mod segmentation {
    use super::*;

    #[test]
    fn test_split_on_chain_operators() {
        assert_eq!(
            split_commands("a && b || c; d | e"),
            vec!["a", "b", "c", "d", "e"]
        );
    }

    #[test]
    fn test_single_command_is_one_segment() {
        assert_eq!(split_commands("git log --oneline"), vec!["git log --oneline"]);
    }

    #[test]
    fn test_every_segment_is_checked() {
        allowed("ls && pwd && git status");
        assert!(blocked("ls && pwd && rm x").contains("rm"));
        assert!(check_command("rm x && ls").is_blocked());
        assert!(check_command("cat f | tee out").is_blocked());
    }

    #[test]
    fn test_first_block_wins() {
        // rm comes before git push in the chain, so the reason names rm.
        let reason = blocked("rm x && git push");
        assert!(reason.contains("rm x"), "{}", reason);
    }
}

// =============================================================================
// Normalization
// =============================================================================

mod normalization {
    use super::*;

    #[test]
    fn test_env_assignments_stripped() {
        let parts = extract_command("FOO=1 BAR=2 rm -rf x");
        assert_eq!(parts.cmd, "rm");
        assert_eq!(parts.rest, "-rf x");
    }

    #[test]
    fn test_wrapper_with_flags_and_duration_stripped() {
        assert_eq!(extract_command("timeout 5 rm -rf x").cmd, "rm");
        assert_eq!(extract_command("timeout -k 2 5 rm x").cmd, "rm");
        assert_eq!(extract_command("nice -n 10 rm x").cmd, "rm");
        assert_eq!(extract_command("time cargo tree").cmd, "cargo");
    }

    #[test]
    fn test_path_qualification_reduced() {
        assert_eq!(extract_command("/usr/bin/rm -rf x").cmd, "rm");
        assert_eq!(extract_command("./scripts/build.sh").cmd, "build.sh");
    }

    #[test]
    fn test_combined_normalization_blocks() {
        assert!(check_command("FOO=1 timeout 5 /bin/rm -rf x").is_blocked());
    }
}

// =============================================================================
// Mutating-command catalog
// =============================================================================

mod catalog {
    use super::*;

    #[test]
    fn test_file_mutations_blocked() {
        for cmd in ["rm -rf x", "mv a b", "cp a b", "mkdir d", "touch f", "chmod +x f"] {
            assert!(check_command(cmd).is_blocked(), "{}", cmd);
        }
    }

    #[test]
    fn test_git_reads_allowed_mutations_blocked() {
        for cmd in ["git status", "git log", "git diff HEAD~1", "git stash list", "git stash show"] {
            allowed(cmd);
        }
        for cmd in [
            "git push origin main",
            "git commit -m x",
            "git checkout -b f",
            "git rebase main",
            "git stash",
            "git stash pop",
        ] {
            assert!(check_command(cmd).is_blocked(), "{}", cmd);
        }
    }

    #[test]
    fn test_git_tag_listing_vs_creation() {
        allowed("git tag");
        assert!(check_command("git tag v1.0").is_blocked());
        assert!(check_command("git tag release").is_blocked());
    }

    #[test]
    fn test_package_managers() {
        allowed("cargo tree");
        allowed("npm ls");
        assert!(check_command("cargo install ripgrep").is_blocked());
        assert!(check_command("npm install left-pad").is_blocked());
        assert!(check_command("pip install requests").is_blocked());
    }

    #[test]
    fn test_process_and_system_control() {
        for cmd in [
            "kill -9 123",
            "pkill node",
            "sudo ls",
            "systemctl restart nginx",
            "docker run image",
            "dd if=/dev/zero of=/dev/sda",
        ] {
            assert!(check_command(cmd).is_blocked(), "{}", cmd);
        }
    }

    #[test]
    fn test_sed_in_place_only() {
        allowed("sed 's/a/b/' file");
        assert!(check_command("sed -i 's/a/b/' file").is_blocked());
    }

    #[test]
    fn test_crontab_edit_only() {
        allowed("crontab -l");
        assert!(check_command("crontab -e").is_blocked());
    }

    #[test]
    fn test_reason_quotes_the_command() {
        let reason = blocked("rm -rf /tmp/x");
        assert!(reason.contains("\"rm -rf /tmp/x\""), "{}", reason);
        assert!(reason.contains("mutating"), "{}", reason);
    }
}

// =============================================================================
// Shell escapes, redirects, interpreters
// =============================================================================

mod escapes_and_redirects {
    use super::*;

    #[test]
    fn test_shell_escapes_checked_whole_string() {
        assert!(blocked("eval \"$PAYLOAD\"").contains("arbitrary code"));
        assert!(check_command("exec /bin/sh").is_blocked());
        assert!(check_command("bash -c 'rm x'").is_blocked());
        assert!(check_command("ls; zsh -c 'anything'").is_blocked());
        allowed("bash script-named-bash-c"); // no -c flag, plain token
    }

    #[test]
    fn test_redirects_blocked_comparisons_allowed() {
        assert!(check_command("echo hi > out.txt").is_blocked());
        assert!(check_command("sort data >> merged").is_blocked());
        allowed("awk '$3 > 100' data.txt");
        allowed("ls 2>&1");
        allowed("echo \"a > b\"");
        allowed("[ 1 >= 2 ]");
    }

    #[test]
    fn test_interpreter_script_files() {
        allowed("python -c 'import sys; print(sys.path)'");
        allowed("python --version");
        assert!(check_command("python manage.py migrate").is_blocked());
        assert!(check_command("node build.js").is_blocked());
    }

    #[test]
    fn test_sqlite_sql_keywords() {
        allowed("sqlite3 app.db 'SELECT count(*) FROM users'");
        for sql in ["INSERT INTO t VALUES (1)", "update t set a=1", "DROP TABLE t"] {
            let cmd = format!("sqlite3 app.db '{}'", sql);
            assert!(check_command(&cmd).is_blocked(), "{}", cmd);
        }
    }
}
