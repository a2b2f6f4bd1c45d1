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

//! Source files.

use std::{
    fs,
    io::Error as IoError,
    path::{Path, PathBuf},
};

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use log::debug;
use thiserror::Error as ThisError;

/// Failure to load a source file.
#[derive(ThisError, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("{}: {source}", path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,

        /// The underlying error.
        source: IoError,
    },
}

/// A source file and its contents.
///
/// This holds the entire contents of a source file, which are always read
/// into memory in their entirety, recoded into UTF-8 if necessary, and split
/// into lines without their line terminators.
#[derive(Clone, Debug)]
pub struct SourceFile {
    /// `None` if this source is not associated with a file.
    file_name: Option<String>,

    /// Original encoding.
    encoding: &'static Encoding,

    /// Source lines, without new-lines.
    lines: Vec<String>,
}

impl SourceFile {
    /// Returns a `SourceFile` by reading `path` and recoding it from
    /// `encoding`.  If `encoding` is `None`, it is guessed from the file's
    /// contents.
    pub fn for_file<P>(path: P, encoding: Option<&'static Encoding>) -> Result<Self, SourceError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| SourceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let encoding = encoding.unwrap_or_else(|| {
            let mut encoding_detector = EncodingDetector::new();
            encoding_detector.feed(&bytes, true);
            encoding_detector.guess(None, true)
        });
        let (contents, _encoding, malformed) = encoding.decode(&bytes);
        if malformed {
            debug!(
                "{}: replaced malformed {} sequences",
                path.display(),
                encoding.name()
            );
        }
        Ok(Self::new(
            &contents,
            Some(path.to_string_lossy().into_owned()),
            encoding,
        ))
    }

    /// Creates a new `SourceFile` for `contents`, recording that `contents`
    /// was originally encoded in `encoding` and that it was read from
    /// `file_name`.
    ///
    /// Lines may end in `\n` or `\r\n`.  A final line terminator does not
    /// start an extra, empty line.
    pub fn new(contents: &str, file_name: Option<String>, encoding: &'static Encoding) -> Self {
        Self {
            file_name,
            encoding,
            lines: contents.lines().map(String::from).collect(),
        }
    }

    /// Returns a `SourceFile` for `contents`.
    pub fn for_string(contents: &str) -> Self {
        Self::new(contents, None, UTF_8)
    }

    /// Returns a `SourceFile` made up of `lines`, which should not contain
    /// new-lines.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            file_name: None,
            encoding: UTF_8,
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the name of the file this source was read from, if any.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    /// Returns the encoding the source was recoded from.
    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Returns all of the lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Returns 1-based line `line_number`, or `None` if it is out of range.
    pub fn line(&self, line_number: usize) -> Option<&str> {
        line_number
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(String::as_str)
    }

    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if there are no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for SourceFile {
    fn default() -> Self {
        Self::new("", None, UTF_8)
    }
}
