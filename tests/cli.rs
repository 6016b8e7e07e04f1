// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Command-line tests for the redactor binary

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn redactor() -> Command {
    cargo_bin_cmd!("redactor")
}

/// Scratch directory with `in/` holding the given files.
fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (name, body) in files {
        let path = dir.path().join("in").join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }
    dir
}

fn pattern(dir: &Path, glob: &str) -> String {
    dir.join("in").join(glob).display().to_string()
}

mod usage {
    use super::*;

    #[test]
    fn nothing_to_redact_is_usage_error() {
        let dir = workspace(&[("a.txt", "hello")]);
        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt")])
            .arg("--output")
            .arg(dir.path().join("out"))
            .assert()
            .code(2)
            .stderr(predicate::str::contains("nothing to redact"));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn missing_input_is_usage_error() {
        redactor()
            .args(["--output", "out", "--names"])
            .assert()
            .code(2)
            .stderr(predicate::str::contains("--input"));
    }

    #[test]
    fn malformed_config_is_usage_error() {
        let dir = workspace(&[("a.txt", "hello")]);
        let config = dir.path().join("redactor.toml");
        fs::write(&config, "overlap_policy = 7").unwrap();

        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt"), "--names"])
            .arg("--output")
            .arg(dir.path().join("out"))
            .arg("--config")
            .arg(&config)
            .assert()
            .code(2);
    }

    #[test]
    fn invalid_glob_fails() {
        let dir = workspace(&[]);
        redactor()
            .args(["--input", "in/[.txt", "--phones"])
            .arg("--output")
            .arg(dir.path().join("out"))
            .assert()
            .code(1)
            .stderr(predicate::str::contains("invalid input pattern"));
    }
}

mod batch {
    use super::*;

    #[test]
    fn writes_censored_tree_and_stats() {
        let dir = workspace(&[
            ("a.txt", "John Doe went to the store.\n"),
            ("mail/b.txt", "Call me at 123-456-7890.\n"),
            ("skip.pdf", "John Doe"),
        ]);
        let out = dir.path().join("out");

        redactor()
            .args(["--input", &pattern(dir.path(), "**/*")])
            .args(["--names", "--phones", "--stats", "stdout"])
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stdout(predicate::str::contains("names: 1\n"))
            .stdout(predicate::str::contains("phones: 1\n"))
            .stdout(predicate::str::contains("total redacted: 2\n"))
            .stdout(predicate::str::contains("files processed: 2\n"))
            .stdout(predicate::str::contains("files failed: 0\n"));

        assert_eq!(
            fs::read_to_string(out.join("a.txt.censored")).unwrap(),
            "████ ███ went to the store.\n"
        );
        assert_eq!(
            fs::read_to_string(out.join("mail/b.txt.censored")).unwrap(),
            "Call me at ████████████.\n"
        );
        assert!(!out.join("skip.pdf.censored").exists());
    }

    #[test]
    fn unreadable_file_does_not_stop_batch() {
        let dir = workspace(&[("good.txt", "Friday works.\n")]);
        fs::write(dir.path().join("in/bad.txt"), [0xffu8, 0xfe, 0x00]).unwrap();
        let out = dir.path().join("out");

        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt"), "--dates", "--stats", "stderr"])
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stderr(predicate::str::contains("error: "))
            .stderr(predicate::str::contains("bad.txt"))
            .stderr(predicate::str::contains("files processed: 1\n"))
            .stderr(predicate::str::contains("files failed: 1\n"));

        assert_eq!(
            fs::read_to_string(out.join("good.txt.censored")).unwrap(),
            "██████ works.\n"
        );
    }

    #[test]
    fn concepts_and_stats_file() {
        let dir = workspace(&[(
            "enron.txt",
            "Enron had a major impact on the energy sector. Lunch is at noon.\n",
        )]);
        let out = dir.path().join("out");
        let stats = dir.path().join("stats/run.txt");

        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt"), "--concept", "enron"])
            .arg("--output")
            .arg(&out)
            .arg("--stats")
            .arg(&stats)
            .assert()
            .success();

        let censored = fs::read_to_string(out.join("enron.txt.censored")).unwrap();
        assert!(censored.starts_with('█'));
        assert!(censored.ends_with(". Lunch is at noon.\n"));

        let report = fs::read_to_string(stats).unwrap();
        assert!(report.contains("concepts: 1\n"));
        assert!(report.contains("total redacted: 1\n"));
    }

    #[test]
    fn config_file_and_flags_combine() {
        let dir = workspace(&[("note.txt", "Ask Zorblatt on Friday.\n")]);
        let config = dir.path().join("redactor.toml");
        fs::write(
            &config,
            "deny_list = [\"Zorblatt\"]\n\n[categories]\nnames = true\n",
        )
        .unwrap();
        let out = dir.path().join("out");

        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt"), "--dates"])
            .arg("--config")
            .arg(&config)
            .arg("--output")
            .arg(&out)
            .assert()
            .success();

        assert_eq!(
            fs::read_to_string(out.join("note.txt.censored")).unwrap(),
            "Ask ████████ on ██████.\n"
        );
    }

    #[test]
    fn colliding_output_paths_fail_the_later_file() {
        let dir = workspace(&[
            ("a/x.txt", "Call 555-123-4567.\n"),
            ("b/x.txt", "Call 555-987-6543.\n"),
        ]);
        let out = dir.path().join("out");

        redactor()
            .args(["--input", &pattern(dir.path(), "a/x.txt")])
            .args(["--input", &pattern(dir.path(), "b/x.txt")])
            .args(["--phones", "--stats", "stdout"])
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stderr(predicate::str::contains("would overwrite the censored copy"))
            .stdout(predicate::str::contains("files processed: 1\n"))
            .stdout(predicate::str::contains("files failed: 1\n"));

        assert_eq!(
            fs::read_to_string(out.join("x.txt.censored")).unwrap(),
            "Call ████████████.\n"
        );
    }

    #[test]
    fn no_stats_flag_prints_no_report() {
        let dir = workspace(&[("a.txt", "nothing here\n")]);
        redactor()
            .args(["--input", &pattern(dir.path(), "*.txt"), "--phones"])
            .arg("--output")
            .arg(dir.path().join("out"))
            .assert()
            .success()
            .stdout(predicate::str::is_empty());
    }
}
