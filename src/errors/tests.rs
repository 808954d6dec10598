//! Unit tests for positioned errors, their names, tips and classification.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::Position;

fn tip_text(error_impl: ErrorImpl) -> String {
    Error::new(error_impl, Position::null()).get_tip().to_string()
}

#[test]
fn test_lexical_error_carries_position() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: String::from("#"),
        },
        Position(3, 14),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
    assert_eq!(*error.get_position(), Position(3, 14));
    assert_eq!(error.get_position().line(), 3);
    assert_eq!(error.get_position().column(), 14);
    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_display_includes_position() {
    let error = Error::new(
        ErrorImpl::VariableNotDeclared {
            variable: String::from("y"),
        },
        Position(2, 5),
    );

    assert_eq!(error.to_string(), "undefined identifier \"y\" at 2:5");
}

#[test]
fn test_syntax_and_semantic_errors_are_classified() {
    let syntax = [
        ErrorImpl::UnterminatedLiteral {
            literal: String::from("\"abc"),
        },
        ErrorImpl::ExpectedDeclaration {
            token: String::from("x"),
        },
        ErrorImpl::InvalidAssignmentTarget {
            token: String::from("="),
        },
        ErrorImpl::NestingTooDeep { limit: 64 },
    ];
    for error_impl in syntax {
        assert!(Error::new(error_impl, Position(1, 1)).is_syntax_error());
    }

    let semantic = [
        ErrorImpl::VoidVariable {
            name: String::from("v"),
        },
        ErrorImpl::NotAFunction {
            name: String::from("x"),
        },
        ErrorImpl::FunctionAlreadyDeclared {
            function: String::from("f"),
        },
    ];
    for error_impl in semantic {
        assert!(!Error::new(error_impl, Position(1, 1)).is_syntax_error());
    }
}

#[test]
fn test_detailed_unexpected_token_tip() {
    let tip = tip_text(ErrorImpl::UnexpectedTokenDetailed {
        token: String::from("}"),
        message: String::from("expected `)` after condition"),
    });

    assert_eq!(tip, "Unexpected token: `}`, expected `)` after condition");
}

#[test]
fn test_type_error_tips() {
    assert_eq!(
        tip_text(ErrorImpl::TypeMatchError {
            expected: String::from("integer"),
            received: String::from("char"),
        }),
        "Expected type `integer`, received `char`"
    );
    assert_eq!(
        tip_text(ErrorImpl::ReturnTypeMismatch {
            function: String::from("f"),
            expected: String::from("integer"),
            received: String::from("boolean"),
        }),
        "Function `f` returns `integer`, found `boolean`"
    );
    assert_eq!(
        tip_text(ErrorImpl::OperandTypeMismatch {
            operator: String::from("+"),
            left: String::from("integer"),
            right: String::from("string"),
        }),
        "Operands of `+` must share a type, found `integer` and `string`"
    );
}

#[test]
fn test_argument_count_errors() {
    let extra = Error::new(
        ErrorImpl::UnexpectedArguments {
            expected: 1,
            received: 3,
        },
        Position(4, 12),
    );
    let missing = Error::new(
        ErrorImpl::MissingArguments {
            expected: 2,
            received: 0,
        },
        Position(4, 5),
    );

    assert_eq!(extra.get_error_name(), "UnexpectedArguments");
    assert_eq!(extra.get_tip().to_string(), "Expected 1 arguments, received 3");
    assert_eq!(missing.get_error_name(), "MissingArguments");
    assert_eq!(missing.get_tip().to_string(), "Expected 2 arguments, received 0");
}

#[test]
fn test_empty_tip_renders_empty() {
    assert_eq!(ErrorTip::None.to_string(), "");
}
