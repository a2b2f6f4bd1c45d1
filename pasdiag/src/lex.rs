// pasdiag - diagnostics for Pascal source files.
// Copyright (C) 2025 Free Software Foundation, Inc.
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE.  See the GNU General Public License for more
// details.
//
// You should have received a copy of the GNU General Public License along with
// this program.  If not, see <http://www.gnu.org/licenses/>.

//! Lexical analysis for Pascal source.
//!
//! Lexical analysis is divided into three pieces:
//!
//! 1. Loading, implemented in the [source] module.  This reads a file,
//!    recodes it into UTF-8, and splits it into lines.
//!
//! 2. Character positioning, implemented in the [cursor] module.  A
//!    [Cursor](cursor::Cursor) walks the lines one character at a time,
//!    with an implicit character at the end of each line.
//!
//! 3. Scanning, implemented in the [scan] module.  This groups characters
//!    into [Token]s and reports malformed literals.

// Warn about missing docs, but not for items declared with `#[cfg(test)]`.
#![cfg_attr(not(test), warn(missing_docs))]

pub mod cursor;
pub mod scan;
pub mod source;
mod token;
pub use token::{Punct, Token};
