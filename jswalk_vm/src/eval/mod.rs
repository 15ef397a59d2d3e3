// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Expression/statement/loop/iterator evaluation, split out of
//! [`crate::program`] and [`crate::function_invocation`] since every kind of
//! callable body (program, function, generator replay) runs the same
//! statement-list machinery.

pub mod expression;
pub mod iterator;
pub mod loop_plan;
pub mod statement;
