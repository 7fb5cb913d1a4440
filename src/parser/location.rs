/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fmt::Display;

/// A position in the parser input byte stream.
///
/// This struct is returned from the
/// [location()](crate::TagParser::location) method and gives the
/// position of the last byte fed to the parser. After a failed
/// [feed()](crate::TagParser::feed) it points at the offending byte.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Location {
    /// Number of bytes fed so far.
    pub bytes: usize,
    /// How many newline characters have been fed.
    pub lines: usize,
    /// How many bytes after the last newline character.
    pub column: usize,
}

impl Location {
    /// Creates a location at the beginning of the input stream.
    pub fn new() -> Self {
        Location {
            bytes: 0,
            lines: 0,
            column: 0,
        }
    }

    pub(super) fn advance(&mut self, c: u8) {
        self.bytes += 1;
        if c == b'\n' {
            self.lines += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "byte: {}, line: {}, column: {}",
            self.bytes, self.lines, self.column
        )
    }
}
