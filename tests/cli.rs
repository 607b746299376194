//! End-to-end tests for the CLI. Main purpose is exercising the command
//! queue and its pinned output formats.

use assert_cmd::Command;
use predicates::prelude::*;
use rstest::rstest;
use std::io::Write;
use tempfile::NamedTempFile;

fn metapeg() -> Command {
    let mut cmd = Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap();
    // Keep stderr deterministic regardless of the environment's log level.
    cmd.env_remove("RUST_LOG");
    cmd
}

fn file_with(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create temporary file");
    file.write_all(contents.as_bytes())
        .expect("failed to write temporary file");
    file
}

#[test]
fn test_support_emits_the_embedded_source_byte_for_byte() {
    metapeg()
        .arg("--support")
        .assert()
        .success()
        .stdout(include_str!("../src/support.rs"));
}

#[test]
fn test_support_is_idempotent() {
    let first = metapeg().arg("--support").output().unwrap();
    let second = metapeg().arg("--support").output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_copy_writes_file_contents_verbatim() {
    let file = file_with("keep\nme\nas-is");
    metapeg()
        .arg("--copy")
        .arg(file.path())
        .assert()
        .success()
        .stdout("keep\nme\nas-is");
}

#[test]
fn test_copy_reads_stdin_for_dash() {
    metapeg()
        .args(["--copy", "-"])
        .write_stdin("from stdin")
        .assert()
        .success()
        .stdout("from stdin");
}

#[test]
fn test_embed_writes_a_named_string_literal() {
    let file = file_with("say \"hi\"\n");
    metapeg()
        .arg("--embed")
        .arg("GREETING")
        .arg(file.path())
        .assert()
        .success()
        .stdout("GREETING = \"say \\\"hi\\\"\\n\"\n");
}

#[test]
fn test_compile_reads_stdin_when_no_commands_given() {
    metapeg()
        .write_stdin("Grammar {\n  x = 'a'-'c'\n}\n")
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "//! @generated by metapeg --compile.",
        ))
        .stdout(predicate::str::contains(
            "match_object(Pred::Range('a', 'c'))",
        ));
}

#[test]
fn test_compile_of_a_grammar_file() {
    let file = file_with("Grammar { x = % | . }");
    metapeg()
        .arg("--compile")
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("match_call_rule(\"Grammar\")"))
        .stdout(predicate::str::contains("match_object(Pred::Any)"));
}

#[test]
fn test_commands_run_left_to_right() {
    let first = file_with("first");
    let second = file_with("second");
    metapeg()
        .arg("--copy")
        .arg(first.path())
        .arg("--copy")
        .arg(second.path())
        .assert()
        .success()
        .stdout("firstsecond");
}

#[test]
fn test_unknown_command_fails() {
    metapeg()
        .arg("--frobnicate")
        .assert()
        .failure()
        .stderr("ERROR: Unknown command '--frobnicate'\n");
}

#[test]
fn test_missing_operand_fails() {
    metapeg()
        .arg("--copy")
        .assert()
        .failure()
        .stderr("ERROR: Missing argument for '--copy'\n");
}

#[test]
fn test_mid_sequence_action_fails_to_parse() {
    // A semantic action anywhere other than at the end of a sequence is a
    // parse failure, reported at the deepest position reached.
    metapeg()
        .write_stdin("Grammar { x = . -> [] . }")
        .assert()
        .failure()
        .stderr(predicate::str::starts_with("ERROR: "))
        .stderr(predicate::str::contains("POSITION: 22"))
        .stderr(predicate::str::contains("STREAM:"));
}

#[rstest]
#[case("Grammar {", 9)]
#[case("Grammar { x = 'a }", 18)]
fn test_parse_failures_mark_the_furthest_position(#[case] source: &str, #[case] position: usize) {
    metapeg()
        .write_stdin(source)
        .assert()
        .failure()
        .stderr(predicate::str::contains(format!("POSITION: {position}")))
        .stderr(predicate::str::contains("<ERROR POSITION>"));
}

#[test]
fn test_missing_input_file_fails() {
    metapeg()
        .args(["--compile", "definitely/not/a/file.peg"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed reading file"));
}
