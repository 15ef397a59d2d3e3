// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOperator {
    Minus,
    Plus,
    LogicalNot,
    BitwiseNot,
    TypeOf,
    Void,
    Delete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateOperator {
    Increment,
    Decrement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinaryOperator {
    Equality,
    Inequality,
    StrictEquality,
    StrictInequality,
    LessThan,
    LessEqualThan,
    GreaterThan,
    GreaterEqualThan,
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Remainder,
    Exponential,
    ShiftLeft,
    ShiftRight,
    ShiftRightZeroFill,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    In,
    Instanceof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOperator {
    And,
    Or,
    NullishCoalesce,
}

/// Includes the logical compound forms (`||=`, `&&=`, `??=`) alongside the
/// arithmetic/bitwise compound assignments, matching spec.md §4.C.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Exponential,
    ShiftLeft,
    ShiftRight,
    ShiftRightZeroFill,
    BitwiseOr,
    BitwiseXor,
    BitwiseAnd,
    LogicalAnd,
    LogicalOr,
    NullishCoalesce,
}

impl AssignmentOperator {
    /// The plain binary operator behind a compound (non-logical) assignment,
    /// or `None` for `=` and the logical compound forms.
    pub fn as_binary_operator(self) -> Option<BinaryOperator> {
        Some(match self {
            Self::Add => BinaryOperator::Addition,
            Self::Subtract => BinaryOperator::Subtraction,
            Self::Multiply => BinaryOperator::Multiplication,
            Self::Divide => BinaryOperator::Division,
            Self::Remainder => BinaryOperator::Remainder,
            Self::Exponential => BinaryOperator::Exponential,
            Self::ShiftLeft => BinaryOperator::ShiftLeft,
            Self::ShiftRight => BinaryOperator::ShiftRight,
            Self::ShiftRightZeroFill => BinaryOperator::ShiftRightZeroFill,
            Self::BitwiseOr => BinaryOperator::BitwiseOr,
            Self::BitwiseXor => BinaryOperator::BitwiseXor,
            Self::BitwiseAnd => BinaryOperator::BitwiseAnd,
            Self::Assign
            | Self::LogicalAnd
            | Self::LogicalOr
            | Self::NullishCoalesce => return None,
        })
    }

    pub fn is_logical(self) -> bool {
        matches!(
            self,
            Self::LogicalAnd | Self::LogicalOr | Self::NullishCoalesce
        )
    }
}
