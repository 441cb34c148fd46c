//! ANSI colouring of a token stream.
//!
//! Re-emits the source with each token wrapped in a colour chosen by its
//! kind. Text between tokens (whitespace, and comments when they were not
//! kept) is copied through unchanged.

use crate::lexer::tokens::{Token, TokenKind};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";
const WHITE: &str = "\x1b[37m";

pub fn color_for(kind: TokenKind) -> String {
    match kind {
        TokenKind::Keyword(_) => format!("{}{}", BLUE, BOLD),
        TokenKind::Identifier => WHITE.to_string(),
        TokenKind::IntegerLiteral | TokenKind::FloatLiteral => MAGENTA.to_string(),
        TokenKind::CharLiteral | TokenKind::StringLiteral => GREEN.to_string(),
        TokenKind::Comment => CYAN.to_string(),
        TokenKind::Operator | TokenKind::Punctuator => YELLOW.to_string(),
        TokenKind::Invalid(_) => format!("{}{}", RED, BOLD),
        TokenKind::EndOfInput => String::new(),
    }
}

pub fn highlight(source: &str, tokens: &[Token]) -> String {
    let mut out = String::with_capacity(source.len() * 2);
    let mut last = 0;

    for token in tokens {
        let start = token.span.start.offset;
        if start > last {
            out.push_str(&source[last..start]);
        }

        let color = color_for(token.kind);
        if color.is_empty() || token.lexeme.is_empty() {
            out.push_str(token.lexeme);
        } else {
            out.push_str(&color);
            out.push_str(token.lexeme);
            out.push_str(RESET);
        }

        last = last.max(token.span.end.offset);
    }

    if last < source.len() {
        out.push_str(&source[last..]);
    }

    out
}
