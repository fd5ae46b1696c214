//! Construction error types.
//!
//! Every fallible operation in this crate fails at construction time with
//! one of two errors: [`LexicalError`] when a terminal rejects its input
//! text, and [`StructuralError`] when a node constructor rejects the shape
//! of its operands. Once a tree exists, rendering and triple collection
//! are total.

use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// A terminal constructor rejected its input text.
///
/// The raw value did not match the terminal's lexical pattern as a whole
/// string. The offending value is carried verbatim for reporting.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("'{value}' is not a valid {terminal}")]
pub struct LexicalError {
    /// Grammar name of the terminal, e.g. `IRIREF` or `VAR1`.
    pub terminal: &'static str,
    /// The rejected input.
    pub value: Arc<str>,
}

impl LexicalError {
    pub(crate) fn new(terminal: &'static str, value: impl Into<Arc<str>>) -> Self {
        Self {
            terminal,
            value: value.into(),
        }
    }
}

/// A node constructor rejected the shape of its operands.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum StructuralError {
    /// A production requiring at least one element was given none.
    #[error("{production} requires at least one element")]
    EmptyList { production: &'static str },

    /// Interleaved repetition out of step: with more than one primary
    /// element, each adjacent pair must be joined by a secondary element.
    #[error(
        "{production} pairing violated: {primary} primary element(s), \
         but only {secondary} secondary element(s) to join them"
    )]
    PairingMismatch {
        production: &'static str,
        primary: usize,
        secondary: usize,
    },

    /// A builder helper was handed an operand kind it does not accept
    /// in that position.
    #[error("{helper} does not accept {operand} in {position} position")]
    UnsupportedOperand {
        helper: &'static str,
        position: &'static str,
        operand: &'static str,
    },

    /// A builder helper was handed an operand whose shape does not fit
    /// the operator, e.g. a single expression where `IN` needs a list.
    #[error("{helper}: operator {operator} requires {expected}")]
    OperandShape {
        helper: &'static str,
        operator: &'static str,
        expected: &'static str,
    },
}

impl StructuralError {
    /// Create an empty list error.
    pub fn empty_list(production: &'static str) -> Self {
        Self::EmptyList { production }
    }

    /// Create a pairing mismatch error.
    pub fn pairing_mismatch(production: &'static str, primary: usize, secondary: usize) -> Self {
        Self::PairingMismatch {
            production,
            primary,
            secondary,
        }
    }

    /// Create an unsupported operand error.
    pub fn unsupported_operand(
        helper: &'static str,
        position: &'static str,
        operand: &'static str,
    ) -> Self {
        Self::UnsupportedOperand {
            helper,
            position,
            operand,
        }
    }

    /// Create an operand shape error.
    pub fn operand_shape(
        helper: &'static str,
        operator: &'static str,
        expected: &'static str,
    ) -> Self {
        Self::OperandShape {
            helper,
            operator,
            expected,
        }
    }
}
