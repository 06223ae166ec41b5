use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

#[test]
fn converts_stdin_to_stdout() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.write_stdin("**bold** and *italic*");

    // println! adds a trailing newline.
    cmd.assert()
        .success()
        .stdout(predicate::eq("*bold* and _italic_\n"));
}

#[test]
fn converts_file_to_stdout() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.md");
    fs::write(&input, "# Notes\n\n- [ ] task\n- [x] done\n").unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(&input);

    cmd.assert()
        .success()
        .stdout(predicate::eq("h1. Notes\n\n* ( ) task\n* (/) done\n"));
}

#[test]
fn writes_output_file_without_trailing_newline() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.md");
    let output = dir.path().join("out.txt");
    fs::write(&input, "```js\ncode;\n```\n").unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(&input).arg("-o").arg(&output);
    cmd.assert().success();

    let jira = fs::read_to_string(&output).unwrap();
    assert_eq!(jira, "{code:javascript}\ncode;\n{code}");
}

#[test]
fn verbose_prints_warnings_to_stderr() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg("--verbose").write_stdin("<div>\n<b>x</b>\n</div>\n");

    cmd.assert()
        .success()
        .stdout(predicate::eq("*x*\n"))
        .stderr(
            predicate::str::contains("Warnings:")
                .and(predicate::str::contains("HTML block found - converted with best effort")),
        );
}

#[test]
fn warnings_hidden_without_verbose() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.write_stdin("<div>x</div>\n");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Warnings:").not());
}

#[test]
fn preserve_html_keeps_blocks() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg("--preserve-html").write_stdin("<div>\n<b>x</b>\n</div>\n");

    cmd.assert()
        .success()
        .stdout(predicate::eq("<div>\n<b>x</b>\n</div>\n"));
}

#[test]
fn json_output_includes_warnings() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.args(["--json", "--verbose"]).write_stdin("<p>hi</p>\n");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["output"], "hi");
    assert_eq!(value["warnings"].as_array().unwrap().len(), 1);
}

#[test]
fn converts_several_files_into_directory() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("first.md");
    let second = dir.path().join("second.markdown");
    fs::write(&first, "# One").unwrap();
    fs::write(&second, "[text](url)").unwrap();
    let out_dir = dir.path().join("out");

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(&first).arg(&second).arg("-o").arg(&out_dir);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Conversion Complete"));

    assert_eq!(
        fs::read_to_string(out_dir.join("first.jira")).unwrap(),
        "h1. One"
    );
    assert_eq!(
        fs::read_to_string(out_dir.join("second.jira")).unwrap(),
        "[text|url]"
    );
}

#[test]
fn batch_writes_next_to_inputs_by_default() {
    let dir = tempdir().unwrap();
    let first = dir.path().join("a.md");
    let second = dir.path().join("b.md");
    fs::write(&first, "*a*").unwrap();
    fs::write(&second, "*b*").unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(&first).arg(&second);
    cmd.assert().success();

    assert_eq!(fs::read_to_string(dir.path().join("a.jira")).unwrap(), "_a_");
    assert_eq!(fs::read_to_string(dir.path().join("b.jira")).unwrap(), "_b_");
}

#[test]
fn batch_reports_missing_file() {
    let dir = tempdir().unwrap();
    let present = dir.path().join("present.md");
    fs::write(&present, "text").unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(&present).arg(dir.path().join("missing.md"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 files failed"));

    assert!(dir.path().join("present.jira").exists());
}

#[test]
fn missing_input_file_fails() {
    let dir = tempdir().unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg(dir.path().join("nope.md"));

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error").and(predicate::str::contains("I/O error")));
}

#[test]
fn tree_dumps_json() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("doc.md");
    fs::write(&input, "# Title").unwrap();

    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg("tree").arg(&input).arg("--compact");

    let output = cmd.assert().success().get_output().stdout.clone();
    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["kind"]["type"], "document");
    assert_eq!(value["children"][0]["kind"]["type"], "heading");
    assert_eq!(value["children"][0]["kind"]["level"], 1);
}

#[test]
fn languages_lists_mappings() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg("languages");

    cmd.assert().success().stdout(
        predicate::str::contains("js -> javascript")
            .and(predicate::str::contains("yml -> yaml"))
            .and(predicate::str::contains("text -> none")),
    );
}

#[test]
fn version_flag() {
    let mut cmd = cargo_bin_cmd!("md2jira");
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("md2jira "));
}
