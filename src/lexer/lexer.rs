use std::iter::FusedIterator;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, trace};

use crate::{
    errors::errors::{Error, LexErrorKind},
    Position, MK_SPAN, MK_TOKEN,
};

use super::{
    cursor::Cursor,
    tokens::{Keyword, Precision, Radix, Token, TokenKind, TokenValue},
};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"^[ \t\r\n\x0C]+").unwrap();
    static ref IDENTIFIER: Regex =
        Regex::new(r"^[\p{Alphabetic}_$][\p{Alphabetic}\p{Nd}_$]*").unwrap();
    static ref DECIMAL_DIGITS: Regex = Regex::new(r"^[0-9]+").unwrap();
    static ref HEX_DIGITS: Regex = Regex::new(r"^[0-9A-Fa-f]+").unwrap();
}

/// Operators and punctuators, longest first so the first prefix hit is the
/// maximal munch.
const SYMBOLS: &[(&str, TokenKind)] = &[
    (">>>=", TokenKind::Operator),
    (">>>", TokenKind::Operator),
    ("<<=", TokenKind::Operator),
    (">>=", TokenKind::Operator),
    ("...", TokenKind::Operator),
    ("<<", TokenKind::Operator),
    (">>", TokenKind::Operator),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("--", TokenKind::Operator),
    ("+=", TokenKind::Operator),
    ("-=", TokenKind::Operator),
    ("*=", TokenKind::Operator),
    ("/=", TokenKind::Operator),
    ("%=", TokenKind::Operator),
    ("&=", TokenKind::Operator),
    ("|=", TokenKind::Operator),
    ("^=", TokenKind::Operator),
    ("->", TokenKind::Operator),
    ("::", TokenKind::Operator),
    ("+", TokenKind::Operator),
    ("-", TokenKind::Operator),
    ("*", TokenKind::Operator),
    ("/", TokenKind::Operator),
    ("%", TokenKind::Operator),
    ("&", TokenKind::Operator),
    ("|", TokenKind::Operator),
    ("^", TokenKind::Operator),
    ("~", TokenKind::Operator),
    ("!", TokenKind::Operator),
    ("=", TokenKind::Operator),
    ("<", TokenKind::Operator),
    (">", TokenKind::Operator),
    ("?", TokenKind::Operator),
    (":", TokenKind::Operator),
    ("(", TokenKind::Punctuator),
    (")", TokenKind::Punctuator),
    ("{", TokenKind::Punctuator),
    ("}", TokenKind::Punctuator),
    ("[", TokenKind::Punctuator),
    ("]", TokenKind::Punctuator),
    (";", TokenKind::Punctuator),
    (",", TokenKind::Punctuator),
    (".", TokenKind::Punctuator),
    ("@", TokenKind::Punctuator),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Emit `Comment` tokens instead of skipping comments.
    pub keep_comments: bool,
}

/// Pull-based scanner over a single source buffer.
///
/// Yields tokens until exactly one `EndOfInput` has been produced, then
/// returns `None` on every further call.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    options: LexerOptions,
    finished: bool,
    emitted: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Lexer<'src> {
        Lexer::with_options(source, LexerOptions::default())
    }

    pub fn with_options(source: &'src str, options: LexerOptions) -> Lexer<'src> {
        debug!(
            bytes = source.len(),
            keep_comments = options.keep_comments,
            "starting scan"
        );

        Lexer {
            cursor: Cursor::new(source),
            options,
            finished: false,
            emitted: 0,
        }
    }

    fn make_token(&self, kind: TokenKind, start: Position, value: TokenValue) -> Token<'src> {
        MK_TOKEN!(
            kind,
            self.cursor.slice_from(start.offset),
            value,
            MK_SPAN!(start, self.cursor.position())
        )
    }

    fn invalid(&self, start: Position, kind: LexErrorKind) -> Token<'src> {
        let token = self.make_token(TokenKind::Invalid(kind), start, TokenValue::None);
        debug!(
            kind = kind.name(),
            line = start.line,
            column = start.column,
            lexeme = token.lexeme,
            "lexical error"
        );
        token
    }

    fn eat_pattern(&mut self, pattern: &Regex) -> usize {
        let len = pattern
            .find(self.cursor.remainder())
            .map_or(0, |matched| matched.end());
        self.cursor.advance_bytes(len);
        len
    }

    fn next_token(&mut self) -> Token<'src> {
        loop {
            self.eat_pattern(&WHITESPACE);

            let start = self.cursor.position();
            let Some(c) = self.cursor.peek() else {
                return self.make_token(TokenKind::EndOfInput, start, TokenValue::None);
            };

            if self.cursor.starts_with("//") {
                self.cursor.eat_while(|c| c != '\n');
                if self.options.keep_comments {
                    return self.make_token(TokenKind::Comment, start, TokenValue::None);
                }
                continue;
            }

            if self.cursor.starts_with("/*") {
                match self.block_comment(start) {
                    Some(token) => return token,
                    None => continue,
                }
            }

            return match c {
                _ if IDENTIFIER.is_match(self.cursor.remainder()) => self.identifier(start),
                '0'..='9' => self.number(start),
                '.' if matches!(self.cursor.peek_nth(1), Some('0'..='9')) => self.number(start),
                '\'' => self.char_literal(start),
                '"' => self.string_literal(start),
                _ => self.symbol(start),
            };
        }
    }

    fn block_comment(&mut self, start: Position) -> Option<Token<'src>> {
        self.cursor.bump_n(2);

        match self.cursor.remainder().find("*/") {
            Some(index) => {
                self.cursor.advance_bytes(index + 2);
                self.options
                    .keep_comments
                    .then(|| self.make_token(TokenKind::Comment, start, TokenValue::None))
            }
            None => {
                self.cursor.advance_bytes(self.cursor.remainder().len());
                Some(self.invalid(start, LexErrorKind::UnterminatedComment))
            }
        }
    }

    fn identifier(&mut self, start: Position) -> Token<'src> {
        self.eat_pattern(&IDENTIFIER);

        match Keyword::lookup(self.cursor.slice_from(start.offset)) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword), start, TokenValue::None),
            None => self.make_token(TokenKind::Identifier, start, TokenValue::None),
        }
    }

    fn number(&mut self, start: Position) -> Token<'src> {
        if self.cursor.starts_with("0x") || self.cursor.starts_with("0X") {
            return self.hex_number(start);
        }

        let mut is_float = false;
        self.eat_pattern(&DECIMAL_DIGITS);

        if self.cursor.peek() == Some('.') && matches!(self.cursor.peek_nth(1), Some('0'..='9')) {
            is_float = true;
            self.cursor.bump();
            self.eat_pattern(&DECIMAL_DIGITS);
        }

        // An exponent marker without digits is left for the next token.
        if matches!(self.cursor.peek(), Some('e' | 'E')) {
            let digits_at = if matches!(self.cursor.peek_nth(1), Some('+' | '-')) {
                2
            } else {
                1
            };

            if matches!(self.cursor.peek_nth(digits_at), Some('0'..='9')) {
                is_float = true;
                self.cursor.bump_n(digits_at);
                self.eat_pattern(&DECIMAL_DIGITS);
            }
        }

        let digits = self.cursor.slice_from(start.offset);

        let precision = match self.cursor.peek() {
            Some('f' | 'F') => Some(Precision::Single),
            Some('d' | 'D') => Some(Precision::Double),
            _ => None,
        };

        if is_float || precision.is_some() {
            if precision.is_some() {
                self.cursor.bump();
            }
            return self.float_literal(start, digits, precision.unwrap_or(Precision::Double));
        }

        let long = self.eat_long_suffix();

        match digits.parse::<u64>() {
            Ok(value) => self.make_token(
                TokenKind::IntegerLiteral,
                start,
                TokenValue::Integer {
                    value,
                    radix: Radix::Decimal,
                    long,
                },
            ),
            Err(_) => self.invalid(start, LexErrorKind::MalformedNumericLiteral),
        }
    }

    fn hex_number(&mut self, start: Position) -> Token<'src> {
        self.cursor.bump_n(2);

        let digits_start = self.cursor.offset();
        if self.eat_pattern(&HEX_DIGITS) == 0 {
            return self.invalid(start, LexErrorKind::MalformedNumericLiteral);
        }
        let digits = self.cursor.slice_from(digits_start);

        let long = self.eat_long_suffix();

        match u64::from_str_radix(digits, 16) {
            Ok(value) => self.make_token(
                TokenKind::IntegerLiteral,
                start,
                TokenValue::Integer {
                    value,
                    radix: Radix::Hexadecimal,
                    long,
                },
            ),
            Err(_) => self.invalid(start, LexErrorKind::MalformedNumericLiteral),
        }
    }

    fn float_literal(
        &mut self,
        start: Position,
        digits: &str,
        precision: Precision,
    ) -> Token<'src> {
        let value = match precision {
            Precision::Single => digits.parse::<f32>().map(f64::from),
            Precision::Double => digits.parse::<f64>(),
        };

        match value {
            Ok(value) if value.is_finite() => self.make_token(
                TokenKind::FloatLiteral,
                start,
                TokenValue::Float { value, precision },
            ),
            _ => self.invalid(start, LexErrorKind::MalformedNumericLiteral),
        }
    }

    fn eat_long_suffix(&mut self) -> bool {
        if matches!(self.cursor.peek(), Some('l' | 'L')) {
            self.cursor.bump();
            true
        } else {
            false
        }
    }

    /// Decodes the escape after a consumed backslash. On failure the
    /// offending character is consumed, except a newline, which is left for
    /// the caller.
    fn escape(&mut self) -> Option<char> {
        let c = self.cursor.peek().filter(|c| *c != '\n')?;
        self.cursor.bump();

        match c {
            'n' => Some('\n'),
            't' => Some('\t'),
            'r' => Some('\r'),
            'b' => Some('\u{8}'),
            'f' => Some('\u{c}'),
            '0' => Some('\0'),
            '\\' | '\'' | '"' => Some(c),
            'u' => {
                self.cursor.eat_while(|c| c == 'u');

                let hex: String = self.cursor.remainder().chars().take(4).collect();
                if hex.len() != 4 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                    return None;
                }
                self.cursor.bump_n(4);

                u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32)
            }
            _ => None,
        }
    }

    fn char_literal(&mut self, start: Position) -> Token<'src> {
        self.cursor.bump();
        let after_quote = self.cursor.clone();

        let value = match self.cursor.peek() {
            None | Some('\n') => {
                return self.invalid(start, LexErrorKind::UnterminatedCharLiteral);
            }
            Some('\'') => {
                self.cursor.bump();
                return self.invalid(start, LexErrorKind::EmptyCharLiteral);
            }
            Some('\\') => {
                self.cursor.bump();
                let after_backslash = self.cursor.clone();
                match self.escape() {
                    Some(c) => c,
                    None => {
                        // Resume right after the backslash.
                        self.cursor = after_backslash;
                        return self.invalid(start, LexErrorKind::InvalidEscape);
                    }
                }
            }
            Some(c) => {
                self.cursor.bump();
                c
            }
        };

        if self.cursor.peek() == Some('\'') {
            self.cursor.bump();
            return self.make_token(TokenKind::CharLiteral, start, TokenValue::Char(value));
        }

        // Resume right after the opening quote.
        self.cursor = after_quote;
        self.invalid(start, LexErrorKind::UnterminatedCharLiteral)
    }

    fn string_literal(&mut self, start: Position) -> Token<'src> {
        self.cursor.bump();

        let mut value = String::new();
        let mut bad_escape = false;

        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    return self.invalid(start, LexErrorKind::UnterminatedStringLiteral);
                }
                Some('"') => {
                    self.cursor.bump();
                    break;
                }
                Some('\\') => {
                    self.cursor.bump();
                    match self.escape() {
                        Some(c) => value.push(c),
                        None => bad_escape = true,
                    }
                }
                Some(c) => {
                    self.cursor.bump();
                    value.push(c);
                }
            }
        }

        if bad_escape {
            return self.invalid(start, LexErrorKind::InvalidEscape);
        }

        self.make_token(TokenKind::StringLiteral, start, TokenValue::Str(value))
    }

    fn symbol(&mut self, start: Position) -> Token<'src> {
        for (text, kind) in SYMBOLS {
            if self.cursor.starts_with(text) {
                self.cursor.bump_n(text.len());
                return self.make_token(*kind, start, TokenValue::None);
            }
        }

        self.cursor.bump();
        self.invalid(start, LexErrorKind::UnknownCharacter)
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Token<'src>> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        self.emitted += 1;
        trace!(
            kind = %token.kind,
            lexeme = token.lexeme,
            line = token.span.start.line,
            column = token.span.start.column,
            "token"
        );

        if token.kind == TokenKind::EndOfInput {
            self.finished = true;
            debug!(tokens = self.emitted, "scan finished");
        }

        Some(token)
    }
}

impl FusedIterator for Lexer<'_> {}

/// Starts a lazy scan of `source`. Each call scans from the beginning.
pub fn scan(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    scan(source).collect()
}

pub fn tokenize_with_options(source: &str, options: LexerOptions) -> Vec<Token<'_>> {
    Lexer::with_options(source, options).collect()
}

/// Converts every `Invalid` token into an [`Error`] for reporting.
pub fn collect_errors(tokens: &[Token]) -> Vec<Error> {
    tokens
        .iter()
        .filter_map(|token| {
            token
                .error_kind()
                .map(|kind| Error::new(kind, token.span.start, token.lexeme))
        })
        .collect()
}
