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

//! Diagnostics for Pascal source files.
//!
//! A source file is checked by two independent passes that share only the
//! source lines and a [DiagnosticSink](message::DiagnosticSink):
//!
//! - The [Scanner](lex::scan::Scanner) splits the source into tokens and
//!   reports malformed literals and unrecognized characters.
//!
//! - The [Analyzer](analyze::Analyzer) looks at one line at a time and
//!   reports likely mistakes such as `=` written for `:=` and unbalanced
//!   `begin` and `end`.
//!
//! [Engine](engine::Engine) runs both passes and produces a
//! [Report](engine::Report).

pub mod analyze;
pub mod engine;
pub mod identifier;
pub mod lex;
pub mod message;
pub mod settings;
