#![allow(clippy::module_inception)]

use crate::{
    ast::ast::Program,
    diagnostics::Logger,
    errors::errors::{Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    semantics::analyzer::{analyze, Analysis},
};

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod semantics;

extern crate regex;

/// A 1-based `(line, column)` location in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position(pub u32, pub u32);

impl Position {
    pub fn null() -> Self {
        Position(0, 0)
    }

    pub fn line(&self) -> u32 {
        self.0
    }

    pub fn column(&self) -> u32 {
        self.1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.0, self.1)
    }
}

/// Everything one run of the front end produced.
///
/// `program` is absent when tokenizing failed or the parser could not
/// re-synchronize. `analysis` is only present when parsing succeeded, since a
/// failed parse never proceeds to the next stage.
#[derive(Debug)]
pub struct FrontendOutput {
    pub program: Option<Program>,
    pub analysis: Option<Analysis>,
    pub errors: Vec<Error>,
}

impl FrontendOutput {
    pub fn succeeded(&self) -> bool {
        self.errors.is_empty()
            && self.program.is_some()
            && self.analysis.as_ref().is_some_and(|a| !a.has_error())
    }
}

/// Runs lexer, parser and semantic analyzer over `source`.
pub fn check_source(source: &str, logger: &Logger) -> FrontendOutput {
    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            logger.error(error.to_string());
            return FrontendOutput {
                program: None,
                analysis: None,
                errors: vec![error],
            };
        }
    };

    for token in tokens.iter() {
        token.log(logger);
    }

    let (_, parsed) = parse(tokens, logger);

    match parsed {
        Ok(program) => {
            let analysis = analyze(&program, logger);
            let errors = analysis.errors().to_vec();
            FrontendOutput {
                program: Some(program),
                analysis: Some(analysis),
                errors,
            }
        }
        Err(failure) => FrontendOutput {
            program: failure.partial,
            analysis: None,
            errors: failure.errors,
        },
    }
}

/// Finds the line of `source` that `position` points into.
///
/// Returns the line number, the text of that line and the 0-based column.
pub fn get_line_at_position(source: &str, position: Position) -> Option<(usize, String, usize)> {
    if position.line() == 0 {
        return None;
    }

    let line_number = position.line() as usize;
    let line = source.split_inclusive('\n').nth(line_number - 1)?;

    Some((line_number, line.to_string(), position.column().saturating_sub(1) as usize))
}

pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> input.txt:20:9
           |
        20 | integer = #;
           | --------^
    */

    let position = error.get_position();
    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error.get_tip()));
    }
    out.push_str(&format!("-> {}:{}\n", file, position));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, *position) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

pub fn display_error(error: &Error, source: &str, file: &str) {
    print!("{}", render_error(error, source, file));
}

/// Strips leading whitespace and returns how many characters it took.
fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let trimmed = string.trim_start();
    let removed = string[..string.len() - trimmed.len()].chars().count();

    (String::from(trimmed), removed)
}
