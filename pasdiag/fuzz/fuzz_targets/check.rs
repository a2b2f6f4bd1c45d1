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

#![no_main]

use libfuzzer_sys::fuzz_target;
use pasdiag::{
    engine::Engine,
    lex::{Token, source::SourceFile},
    settings::Settings,
};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let source = SourceFile::for_string(input);
        let settings = Settings {
            paired_keywords: true,
            ..Settings::default()
        };
        let report = Engine::new(settings).check(&source);
        assert_eq!(
            report.tokens().last_key_value(),
            Some((&(source.len() + 1), &vec![Token::End]))
        );
        let _ = report.to_string();
    }
});
