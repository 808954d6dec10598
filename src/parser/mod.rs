//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It is a recursive-descent parser with one
//! function per grammar rule and handles:
//!
//! - Declarations (variables and functions) and statements
//! - Expressions, with precedence encoded by the call structure
//! - Type annotations
//! - Panic-mode error recovery and reporting
//!
//! Follow sets, operator sets and the ordered statement alternatives live in
//! `lookups`.

pub mod cursor;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;
