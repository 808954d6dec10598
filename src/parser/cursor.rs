use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    MK_TOKEN,
};

/// Read-only forward view over a token sequence.
///
/// The sequence always ends with exactly one `EOF` token, so `peek` has a
/// token to return even once everything has been consumed.
pub struct TokenCursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl TokenCursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|token| token.kind) != Some(TokenKind::EOF) {
            let (line, column) = tokens
                .last()
                .map_or((1, 1), |token| (token.line, token.column));
            tokens.push(MK_TOKEN!(TokenKind::EOF, String::from("EOF"), line, column));
        }

        TokenCursor { tokens, pos: 0 }
    }

    /// True past the last real token or when sitting on the end marker.
    pub fn at_end(&self) -> bool {
        self.pos + 1 >= self.tokens.len() || self.peek().kind == TokenKind::EOF
    }

    pub fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    /// Returns the current token and moves forward, unless already at the end.
    pub fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.at_end() {
            self.pos += 1;
        }
        token
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        !self.at_end() && self.peek().kind == kind
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn previous(&self) -> Option<&Token> {
        self.pos.checked_sub(1).and_then(|pos| self.tokens.get(pos))
    }

    /// Consumes a required token or fails with `message`.
    pub fn consume(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.check(kind) {
            return Ok(self.advance());
        }

        let token = self.peek();
        Err(Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: token.value.clone(),
                message: String::from(message),
            },
            token.position(),
        ))
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}
