/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use thiserror::Error;

/// Type of the error returned from [feed()](super::TagParser::feed).
///
/// Both kinds are reported at the exact byte which caused them. The
/// parser does not try to resynchronize after an error, the parser
/// state is well defined but usually not useful for continuing the
/// same tag. Recommended recovery is a [reset()](super::TagParser::reset).
///
/// Position of the offending byte is available via
/// [location()](super::TagParser::location).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum FeedError {
    /// A byte appeared in a structural position where it is not allowed.
    #[error("invalid tag syntax: {}", .0.description())]
    Syntax(SyntaxError),

    /// Staged text did not fit into the parser buffer.
    ///
    /// Only returned when truncation is not allowed, see
    /// [set_allow_truncated()](super::TagParser::set_allow_truncated).
    /// The byte is not consumed into the staged text.
    #[error("string does not fit into the parser buffer")]
    BufferOverflow,
}

impl From<SyntaxError> for FeedError {
    fn from(err: SyntaxError) -> Self {
        FeedError::Syntax(err)
    }
}

/// Details of a [FeedError::Syntax] error.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SyntaxError {
    /// `<` seen right after a tag start.
    TagStartInTag,
    /// `>` seen right after a tag start.
    TagEmptyName,
    /// `<` seen inside an end tag.
    TagStartInEndTag,
}

impl SyntaxError {
    /// Returns a human readable description of the problem.
    pub fn description(&self) -> &'static str {
        match self {
            SyntaxError::TagStartInTag => "Tag start character '<' inside a tag marker",
            SyntaxError::TagEmptyName => "Tag has no name",
            SyntaxError::TagStartInEndTag => "Tag start character '<' inside an end tag",
        }
    }
}

/// Error type for parser construction failures.
///
/// No parser is returned when the construction fails, the sink and
/// the buffer given to the constructor are dropped.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ConstructionError {
    /// Buffer capacity is less than [MIN_CAPACITY](crate::MIN_CAPACITY).
    #[error("buffer capacity {0} is too small, need at least {min}", min = crate::MIN_CAPACITY)]
    CapacityTooSmall(usize),

    /// Buffer could not be allocated.
    #[error("not enough memory")]
    NoMemory,

    /// The static arena buffer is already leased to another parser.
    #[error("static arena is already in use")]
    ArenaInUse,
}
