//! Error types and error handling for the front end.
//!
//! This module defines the error types shared by every stage. It includes:
//!
//! - Error structures with source position information
//! - Syntax variants (lexer and parser) and semantic variants (analyzer)
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;

#[cfg(test)]
mod tests;
