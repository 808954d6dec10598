use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{diagnostics::Logger, Position};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("array", TokenKind::Array);
        map.insert("boolean", TokenKind::Boolean);
        map.insert("char", TokenKind::Char);
        map.insert("else", TokenKind::Else);
        map.insert("false", TokenKind::False);
        map.insert("for", TokenKind::For);
        map.insert("function", TokenKind::Function);
        map.insert("if", TokenKind::If);
        map.insert("integer", TokenKind::Integer);
        map.insert("map", TokenKind::Map);
        map.insert("print", TokenKind::Print);
        map.insert("return", TokenKind::Return);
        map.insert("string", TokenKind::String);
        map.insert("true", TokenKind::True);
        map.insert("void", TokenKind::Void);
        map.insert("while", TokenKind::While);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Identifier,

    IntegerLiteral,
    CharLiteral,
    StringLiteral,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,

    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Array,
    Boolean,
    Char,
    Else,
    False,
    For,
    Function,
    If,
    Integer,
    Map,
    Print,
    Return,
    String,
    True,
    Void,
    While,
}

impl TokenKind {
    /// Keywords that name a builtin type and can therefore start a declaration.
    pub fn is_type_keyword(&self) -> bool {
        matches!(
            self,
            TokenKind::Integer
                | TokenKind::Boolean
                | TokenKind::Char
                | TokenKind::String
                | TokenKind::Void
        )
    }

    pub fn is_literal(&self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLiteral
                | TokenKind::CharLiteral
                | TokenKind::StringLiteral
                | TokenKind::True
                | TokenKind::False
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    pub fn position(&self) -> Position {
        Position(self.line, self.column)
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    pub fn is_type_keyword(&self) -> bool {
        self.kind.is_type_keyword()
    }

    pub fn is_literal(&self) -> bool {
        self.kind.is_literal()
    }

    pub fn log(&self, logger: &Logger) {
        if self.is_one_of_many(&[
            TokenKind::Identifier,
            TokenKind::IntegerLiteral,
            TokenKind::CharLiteral,
            TokenKind::StringLiteral,
        ]) {
            logger.debug(format!(
                "{}:{} {} ({})",
                self.line, self.column, self.kind, self.value
            ));
        } else {
            logger.debug(format!("{}:{} {} ()", self.line, self.column, self.kind));
        }
    }
}
