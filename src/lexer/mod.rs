//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts C-family source
//! text into a lazy stream of tokens. It handles:
//!
//! - Keywords and identifiers, with regex patterns for the character classes
//! - Decimal, hexadecimal and floating-point literals with width suffixes
//! - Character and string literals with escape decoding
//! - Maximal-munch operators and punctuators
//! - Line and block comments, whitespace, and line/column tracking
//! - Non-fatal error tokens for malformed input

pub mod cursor;
pub mod lexer;
pub mod tokens;
