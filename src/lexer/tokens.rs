use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{errors::errors::LexErrorKind, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, Keyword> = {
        let mut map = HashMap::new();
        for keyword in Keyword::ALL {
            map.insert(keyword.as_str(), *keyword);
        }
        map
    };
}

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        #[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),*];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),*
                }
            }
        }
    };
}

keywords! {
    Abstract => "abstract",
    Assert => "assert",
    Boolean => "boolean",
    Break => "break",
    Byte => "byte",
    Case => "case",
    Catch => "catch",
    Char => "char",
    Class => "class",
    Const => "const",
    Continue => "continue",
    Default => "default",
    Do => "do",
    Double => "double",
    Else => "else",
    Enum => "enum",
    Extends => "extends",
    Final => "final",
    Finally => "finally",
    Float => "float",
    For => "for",
    Goto => "goto",
    If => "if",
    Implements => "implements",
    Import => "import",
    Instanceof => "instanceof",
    Int => "int",
    Interface => "interface",
    Long => "long",
    Native => "native",
    New => "new",
    Package => "package",
    Private => "private",
    Protected => "protected",
    Public => "public",
    Return => "return",
    Short => "short",
    Static => "static",
    Strictfp => "strictfp",
    Super => "super",
    Switch => "switch",
    Synchronized => "synchronized",
    This => "this",
    Throw => "throw",
    Throws => "throws",
    Transient => "transient",
    Try => "try",
    Void => "void",
    Volatile => "volatile",
    While => "while",
    Yield => "yield",
    Record => "record",
    Sealed => "sealed",
    Permits => "permits",
    Var => "var",
    Module => "module",
    Opens => "opens",
    Requires => "requires",
    Exports => "exports",
    Provides => "provides",
    Uses => "uses",
    With => "with",
    To => "to",
    Transitive => "transitive",
}

impl Keyword {
    pub fn lookup(text: &str) -> Option<Keyword> {
        RESERVED_LOOKUP.get(text).copied()
    }
}

impl Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Keyword(Keyword),
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    Operator,
    Punctuator,
    Comment,
    EndOfInput,
    Invalid(LexErrorKind),
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Identifier => "Identifier",
            TokenKind::Keyword(_) => "Keyword",
            TokenKind::IntegerLiteral => "IntegerLiteral",
            TokenKind::FloatLiteral => "FloatLiteral",
            TokenKind::CharLiteral => "CharLiteral",
            TokenKind::StringLiteral => "StringLiteral",
            TokenKind::Operator => "Operator",
            TokenKind::Punctuator => "Punctuator",
            TokenKind::Comment => "Comment",
            TokenKind::EndOfInput => "EndOfInput",
            TokenKind::Invalid(_) => "Invalid",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Invalid(kind) => write!(f, "Invalid({})", kind.name()),
            _ => write!(f, "{}", self.name()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Precision {
    Single,
    Double,
}

/// Decoded payload of a literal token.
#[derive(Debug, PartialEq, Clone)]
pub enum TokenValue {
    None,
    Integer { value: u64, radix: Radix, long: bool },
    Float { value: f64, precision: Precision },
    Char(char),
    Str(String),
}

impl TokenValue {
    /// Re-renders a numeric value in literal syntax. Hex integers keep their
    /// base; floats use the shortest decimal form that parses back exactly.
    pub fn to_literal(&self) -> Option<String> {
        match self {
            TokenValue::Integer { value, radix, long } => {
                let suffix = if *long { "L" } else { "" };
                Some(match radix {
                    Radix::Decimal => format!("{}{}", value, suffix),
                    Radix::Hexadecimal => format!("0x{:X}{}", value, suffix),
                })
            }
            TokenValue::Float { value, precision } => {
                let mut text = format!("{:?}", value);
                if !text.contains(['.', 'e', 'E']) {
                    text.push_str(".0");
                }
                if let Precision::Single = precision {
                    text.push('f');
                }
                Some(text)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub lexeme: &'src str,
    pub value: TokenValue,
    pub span: Span,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.kind)?;
        // Control characters (newlines in block comments) stay on one line.
        for c in self.lexeme.chars() {
            if c.is_control() {
                write!(f, "{}", c.escape_default())?;
            } else {
                write!(f, "{}", c)?;
            }
        }
        write!(f, " [{}:{}]", self.span.start.line, self.span.start.column)
    }
}

impl Token<'_> {
    pub fn error_kind(&self) -> Option<LexErrorKind> {
        match self.kind {
            TokenKind::Invalid(kind) => Some(kind),
            _ => None,
        }
    }
}
