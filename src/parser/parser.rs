//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the `parse` entry point.
//! The grammar is implemented by recursive descent with one function per
//! nonterminal, spread over `stmt`, `expr` and `types`. Syntax errors inside a
//! top-level declaration are recovered from in panic mode: the error is
//! recorded, tokens are skipped up to and including the next `;`, and parsing
//! resumes at the next declaration.

use crate::{
    ast::ast::{link_parents, Declaration, NodeId, Program},
    diagnostics::Logger,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{cursor::TokenCursor, stmt::parse_declaration};

/// Deepest nesting of expressions and statements the parser accepts.
///
/// Every nested expression or statement and every operator or index folded
/// into a chain counts one level, so the depth of any tree that parses is
/// bounded. The bound keeps parsing, analysis and dropping the tree within a
/// default 2 MiB thread stack.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The main parser structure that maintains parsing state.
pub struct Parser<'a> {
    /// The token stream
    cursor: TokenCursor,
    /// Sink for rule traces and syntax errors
    logger: &'a Logger,
    /// Counter for generating unique node ids
    current_id: u32,
    /// Current nesting of expressions and statements
    depth: usize,
    /// Syntax errors reported so far
    errors: Vec<Error>,
}

/// Why `parse` did not produce a program.
#[derive(Debug)]
pub struct ParseFailure {
    pub errors: Vec<Error>,
    /// The declarations that did parse. `None` when recovery ran into the end
    /// of input before it could re-synchronize.
    pub partial: Option<Program>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, logger: &'a Logger) -> Self {
        Parser {
            cursor: TokenCursor::new(tokens),
            logger,
            current_id: 0,
            depth: 0,
            errors: vec![],
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.cursor.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.cursor.peek().kind
    }

    /// Advances to the next token and returns the one advanced past.
    pub fn advance(&mut self) -> Token {
        self.cursor.advance()
    }

    pub fn check(&self, kind: TokenKind) -> bool {
        self.cursor.check(kind)
    }

    pub fn check_any(&self, kinds: &[TokenKind]) -> bool {
        kinds.iter().any(|kind| self.cursor.check(*kind))
    }

    pub fn match_kind(&mut self, kind: TokenKind) -> bool {
        self.cursor.match_kind(kind)
    }

    pub fn at_end(&self) -> bool {
        self.cursor.at_end()
    }

    /// Expects a token of the specified kind, failing with `message`.
    pub fn expect_error(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        self.cursor.consume(kind, message)
    }

    /// Expects a token of the specified kind with the default error.
    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected())
        }
    }

    /// An `UnexpectedToken` error at the current token.
    pub fn unexpected(&self) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: self.current_token().value.clone(),
            },
            self.get_position(),
        )
    }

    pub fn unexpected_detailed(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.get_position(),
        )
    }

    /// Advances the internal ID counter and returns the previous value.
    pub fn advance_id(&mut self) -> NodeId {
        let id = self.current_id;
        self.current_id += 1;
        NodeId(id)
    }

    /// Position of the current token.
    pub fn get_position(&self) -> Position {
        self.current_token().position()
    }

    pub fn logger(&self) -> &'a Logger {
        self.logger
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn log_rule(&self, rule: &str) {
        if self.logger.is_enabled(crate::diagnostics::Level::Debug) {
            self.logger.debug(format!(
                "{} at {} ({})",
                rule,
                self.get_position(),
                self.current_token().value
            ));
        }
    }

    /// Runs `f` one nesting level deeper, failing once the bound is exceeded.
    pub fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }

        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn too_deep(&self) -> Error {
        Error::new(
            ErrorImpl::NestingTooDeep {
                limit: MAX_NESTING_DEPTH,
            },
            self.get_position(),
        )
    }

    /// Takes one more level for a node that a loop stacks on top of the
    /// previous one. The level is held until the enclosing `folded` returns.
    pub fn deepen(&mut self) -> Result<(), Error> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        Ok(())
    }

    /// Runs `f`, then releases every level it took with `deepen`.
    pub fn folded<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, Error>,
    ) -> Result<T, Error> {
        let depth = self.depth;
        let result = f(self);
        self.depth = depth;
        result
    }

    fn report(&mut self, error: Error) {
        self.logger.error(error.to_string());
        self.errors.push(error);
    }

    /// Panic-mode recovery. Skips one token, then keeps skipping until a `;`
    /// has been consumed. Returns false when the end of input came first.
    fn synchronize(&mut self) -> bool {
        self.depth = 0;

        if self.at_end() {
            return false;
        }

        if self.advance().kind == TokenKind::Semicolon {
            return true;
        }

        while !self.at_end() {
            if self.advance().kind == TokenKind::Semicolon {
                return true;
            }
        }

        false
    }
}

/// Parses a token sequence into a program.
///
/// Returns the parser (with its state after parsing) and either the complete
/// program or every syntax error that was found along with what could be
/// salvaged.
pub fn parse(tokens: Vec<Token>, logger: &Logger) -> (Parser<'_>, Result<Program, ParseFailure>) {
    let mut parser = Parser::new(tokens, logger);
    parser.log_rule("program");

    let id = parser.advance_id();
    let position = parser.get_position();
    let mut declarations: Vec<Declaration> = vec![];
    let mut resynchronized = true;

    if parser.at_end() {
        let error = Error::new(
            ErrorImpl::ExpectedDeclaration {
                token: parser.current_token().value.clone(),
            },
            position,
        );
        parser.report(error);
    }

    while !parser.at_end() {
        match parse_declaration(&mut parser) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => {
                parser.report(error);
                if !parser.synchronize() {
                    resynchronized = false;
                    break;
                }
            }
        }
    }

    let mut program = Program {
        id,
        parent: None,
        position,
        declarations,
    };
    link_parents(&mut program);

    if parser.errors.is_empty() {
        return (parser, Ok(program));
    }

    let failure = ParseFailure {
        errors: parser.errors.clone(),
        partial: resynchronized.then_some(program),
    };
    (parser, Err(failure))
}
