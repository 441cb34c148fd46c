//! Integration tests for scanning whole files.
//!
//! These tests run the scanner over a complete Java program and drive the
//! `tokenize` binary end to end.

use std::{path::PathBuf, process::Command};

use lexer::lexer::{
    lexer::{collect_errors, tokenize, tokenize_with_options, LexerOptions},
    tokens::{Keyword, Precision, Radix, TokenKind, TokenValue},
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn sample_source() -> String {
    std::fs::read_to_string(fixture("Main.java")).expect("fixture should be readable")
}

#[test]
fn test_sample_program_has_no_lexical_errors() {
    let source = sample_source();
    let tokens = tokenize(&source);

    assert!(collect_errors(&tokens).is_empty());
    assert_eq!(tokens.last().map(|token| token.kind), Some(TokenKind::EndOfInput));
    assert_eq!(
        tokens
            .iter()
            .filter(|token| token.kind == TokenKind::EndOfInput)
            .count(),
        1
    );
}

#[test]
fn test_sample_program_literals() {
    let source = sample_source();
    let tokens = tokenize(&source);

    let find = |lexeme: &str| {
        tokens
            .iter()
            .find(|token| token.lexeme == lexeme)
            .unwrap_or_else(|| panic!("missing token {}", lexeme))
    };

    assert_eq!(
        find("0x1A2B").value,
        TokenValue::Integer {
            value: 6699,
            radix: Radix::Hexadecimal,
            long: false
        }
    );
    assert_eq!(
        find("1.23e4f").value,
        TokenValue::Float {
            value: 12300.0,
            precision: Precision::Single
        }
    );
    assert_eq!(
        find("3.14").value,
        TokenValue::Float {
            value: 3.14,
            precision: Precision::Double
        }
    );
    assert_eq!(find("'A'").value, TokenValue::Char('A'));
    assert_eq!(
        find("\"Hello, world!\\n\"").value,
        TokenValue::Str("Hello, world!\n".to_string())
    );
}

#[test]
fn test_sample_program_positions() {
    let source = sample_source();
    let tokens = tokenize(&source);

    let package = &tokens[0];
    assert_eq!(package.kind, TokenKind::Keyword(Keyword::Package));
    assert_eq!((package.span.start.line, package.span.start.column), (3, 1));

    let if_token = tokens
        .iter()
        .find(|token| token.kind == TokenKind::Keyword(Keyword::If))
        .expect("sample has an if statement");
    assert_eq!((if_token.span.start.line, if_token.span.start.column), (28, 9));
}

#[test]
fn test_sample_program_comments() {
    let source = sample_source();
    let tokens = tokenize_with_options(
        &source,
        LexerOptions {
            keep_comments: true,
        },
    );

    let comments: Vec<&str> = tokens
        .iter()
        .filter(|token| token.kind == TokenKind::Comment)
        .map(|token| token.lexeme)
        .collect();

    assert_eq!(comments.len(), 4);
    assert_eq!(comments[0], "// Example Java program");
    assert!(comments[3].starts_with("/* Multiline comment"));
    assert!(comments[3].ends_with("*/"));
}

#[test]
fn test_cli_prints_one_line_per_token() {
    let output = Command::new(env!("CARGO_BIN_EXE_tokenize"))
        .arg(fixture("Main.java"))
        .output()
        .expect("binary should run");

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "Keyword package [3:1]");
    assert_eq!(lines[1], "Identifier demo [3:9]");
    assert_eq!(lines.last().copied(), Some("EndOfInput  [35:1]"));
}

#[test]
fn test_cli_succeeds_with_invalid_tokens() {
    let path = std::env::temp_dir().join(format!("lexer-invalid-{}.java", std::process::id()));
    std::fs::write(&path, "int a = #;\nString s = \"open").expect("temp file should be writable");

    let output = Command::new(env!("CARGO_BIN_EXE_tokenize"))
        .arg(&path)
        .arg("--diagnostics")
        .output()
        .expect("binary should run");
    let _ = std::fs::remove_file(&path);

    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Invalid(UnknownCharacter) # [1:9]"));
    assert!(stdout.contains("Invalid(UnterminatedStringLiteral)"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: UnknownCharacter"));
    assert!(stderr.contains("Error: UnterminatedStringLiteral"));
}

#[test]
fn test_cli_fails_on_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_tokenize"))
        .arg(fixture("does-not-exist.java"))
        .output()
        .expect("binary should run");

    assert!(!output.status.success());
}
