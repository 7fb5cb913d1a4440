/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod error;
mod location;
mod nocompile;
mod sink;

use log::{debug, trace};

pub use error::ConstructionError;
pub use error::FeedError;
pub use error::SyntaxError;
pub use location::Location;
pub use sink::Callbacks;
pub use sink::TagSink;
pub use sink::TextHandler;

/// Smallest accepted buffer capacity.
pub const MIN_CAPACITY: usize = 2;

/// Name delivered to [TagSink::tag_close] for empty element tags whose
/// real name is no longer in the buffer.
///
/// A single space can never be a tag name, so it cannot collide with
/// a real close event.
pub const PLACEHOLDER_NAME: &[u8] = b" ";

const TERMINATOR: u8 = 0;

/// Parser states.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum State {
    /// Waiting for the first `<`.
    Begin,
    /// Seen `<`, deciding between a start tag and an end tag.
    StartTag,
    /// Collecting a start tag name.
    TagName,
    /// Collecting an attribute inside a start tag.
    Attribute,
    /// Seen the `/` of an empty element tag, waiting for `>`.
    EmptyTag,
    /// Collecting character data after a tag.
    TagContents,
    /// Collecting an end tag name.
    EndTag,
}

macro_rules! whitespace {
    () => {
        b' ' | b'\t' | b'\r' | b'\n'
    };
}

macro_rules! fire {
    ($self:ident, $event:ident) => {
        $self.fire(|sink, text| sink.$event(text))
    };
}

/// Streaming tag parser.
///
/// The parser is fed one byte at a time and calls the methods of its
/// [TagSink] when a tag name, an attribute, or a run of character data
/// is complete. Text is staged in a fixed size buffer given at
/// construction time, nothing else is allocated while parsing.
///
/// This is not a conforming XML parser. Comments, CDATA sections,
/// processing instructions, doctypes and entity references are not
/// recognized, and well-formedness is not checked beyond the tag syntax.
///
/// # Examples
///
/// ```
/// use picosax::{TagParser, TagSink};
///
/// #[derive(Default)]
/// struct Printer {
///     lines: Vec<String>,
/// }
///
/// impl TagSink for Printer {
///     fn tag_open(&mut self, name: &[u8]) {
///         self.lines.push(format!("open {}", String::from_utf8_lossy(name)));
///     }
///
///     fn content(&mut self, text: &[u8]) {
///         self.lines.push(format!("text {}", String::from_utf8_lossy(text)));
///     }
/// }
///
/// let mut parser = TagParser::new(Printer::default(), 256)?;
/// for c in b"<greeting>hello</greeting>" {
///     parser.feed(*c)?;
/// }
/// assert_eq!(parser.sink().lines, ["open greeting", "text hello"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// Errors are not recovered automatically, the caller decides whether to
/// give up or [reset()](TagParser::reset) and continue:
/// ```
/// use picosax::{FeedError, SyntaxError, TagParser, TagSink};
///
/// struct Nothing;
/// impl TagSink for Nothing {}
///
/// let mut parser = TagParser::new(Nothing, 16)?;
/// assert_eq!(
///     parser.feed_bytes(b"<<a>"),
///     Err(FeedError::Syntax(SyntaxError::TagStartInTag))
/// );
/// assert_eq!(parser.location().bytes, 2);
/// parser.reset();
/// parser.feed_bytes(b"<a>")?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct TagParser<S: TagSink, B: AsRef<[u8]> + AsMut<[u8]> = Box<[u8]>> {
    sink: S,
    state: State,
    entering: bool,
    in_quotes: bool,
    allow_truncated: bool,
    buffer: B,
    length: usize,
    location: Location,
}

impl<S: TagSink> TagParser<S> {
    /// Creates a parser with a heap allocated buffer of `capacity` bytes.
    ///
    /// The longest string delivered to the sink is `capacity - 2` bytes,
    /// the remaining slots are reserved for terminators.
    pub fn new(sink: S, capacity: usize) -> Result<TagParser<S>, ConstructionError> {
        if capacity < MIN_CAPACITY {
            return Err(ConstructionError::CapacityTooSmall(capacity));
        }
        let mut buffer = Vec::<u8>::new();
        if buffer.try_reserve_exact(capacity).is_err() {
            return Err(ConstructionError::NoMemory);
        }
        buffer.resize(capacity, 0);
        Self::with_buffer(sink, buffer.into_boxed_slice())
    }
}

impl<S: TagSink, B: AsRef<[u8]> + AsMut<[u8]>> TagParser<S, B> {
    /// Creates a parser which stages text in the given buffer.
    ///
    /// The capacity is the length of the buffer. This is the way to run
    /// the parser without any dynamic allocation, by passing an array, a
    /// borrowed slice, or an [ArenaLease](crate::ArenaLease).
    pub fn with_buffer(sink: S, buffer: B) -> Result<TagParser<S, B>, ConstructionError> {
        let capacity = buffer.as_ref().len();
        if capacity < MIN_CAPACITY {
            return Err(ConstructionError::CapacityTooSmall(capacity));
        }
        debug!(target: "picosax::parser", "created parser with capacity {capacity}");
        Ok(TagParser {
            sink,
            state: State::Begin,
            entering: true,
            in_quotes: false,
            allow_truncated: false,
            buffer,
            length: 0,
            location: Location::new(),
        })
    }

    /// Destroys the parser and gives back the sink.
    ///
    /// The buffer is released, or handed back to its owner for borrowed
    /// and leased buffers.
    pub fn teardown(self) -> S {
        debug!(target: "picosax::parser", "parser torn down at {}", self.location);
        self.sink
    }

    /// Resets the parser into the initial state.
    ///
    /// The buffer is kept and the truncation policy is not changed.
    pub fn reset(&mut self) {
        debug!(target: "picosax::parser", "reset from {:?}", self.state);
        self.change_state(State::Begin);
        self.length = 0;
        self.in_quotes = false;
        self.location = Location::new();
    }

    /// Selects what happens when a string does not fit into the buffer.
    ///
    /// When allowed, extra bytes are silently dropped and the sink gets the
    /// truncated string. Otherwise [feed()](TagParser::feed) returns
    /// [FeedError::BufferOverflow]. Not allowed by default.
    pub fn set_allow_truncated(&mut self, allow: bool) {
        self.allow_truncated = allow;
    }

    pub fn allow_truncated(&self) -> bool {
        self.allow_truncated
    }

    /// Returns the buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buffer.as_ref().len()
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// Returns the position of the last fed byte.
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Feeds all given bytes, stopping at the first error.
    ///
    /// [location()](TagParser::location) points at the failing byte when
    /// an error is returned.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Result<(), FeedError> {
        for c in bytes {
            self.feed(*c)?;
        }
        Ok(())
    }

    /// Feeds a single byte into the parser.
    ///
    /// At most one sink method is called before this returns.
    pub fn feed(&mut self, c: u8) -> Result<(), FeedError> {
        self.location.advance(c);
        let entering = std::mem::replace(&mut self.entering, false);
        trace!(target: "picosax::parser", "[{:?}] {:?}", self.state, c as char);

        match self.state {
            State::Begin => {
                if entering {
                    self.length = 0;
                }
                if c == b'<' {
                    self.change_state(State::StartTag);
                }
            }

            State::StartTag => match c {
                b'<' => return Err(SyntaxError::TagStartInTag.into()),
                b'>' => return Err(SyntaxError::TagEmptyName.into()),
                whitespace!() => (),
                b'/' => self.change_state(State::EndTag),
                _ => {
                    self.restart_with(c)?;
                    self.change_state(State::TagName);
                }
            },

            State::TagName => match c {
                whitespace!() => {
                    fire!(self, tag_open);
                    self.change_state(State::Attribute);
                }
                b'/' => {
                    fire!(self, tag_open);
                    self.change_state(State::EmptyTag);
                }
                b'>' => {
                    fire!(self, tag_open);
                    self.change_state(State::TagContents);
                }
                _ => self.push(c)?,
            },

            // Buffer still holds the tag name or the placeholder here.
            State::EmptyTag => {
                if c == b'>' {
                    fire!(self, tag_close);
                    self.change_state(State::TagContents);
                }
            }

            State::TagContents => {
                if entering {
                    self.length = 0;
                    self.in_quotes = false;
                }
                match c {
                    b'<' if !self.in_quotes => {
                        fire!(self, content);
                        self.change_state(State::StartTag);
                    }
                    b'"' => {
                        self.push(c)?;
                        self.in_quotes = !self.in_quotes;
                    }
                    whitespace!() if !self.in_quotes && self.length == 0 => (),
                    _ => self.push(c)?,
                }
            }

            State::Attribute => {
                if entering {
                    self.length = 0;
                    self.in_quotes = false;
                }
                match c {
                    whitespace!() if !self.in_quotes => {
                        if self.length > 0 {
                            fire!(self, attribute);
                            self.change_state(State::Attribute);
                        }
                    }
                    b'/' if !self.in_quotes => {
                        // Attribute text has replaced the tag name, so the
                        // close event gets the placeholder instead.
                        if self.length > 0 {
                            fire!(self, attribute);
                            self.length = 0;
                        }
                        self.push(PLACEHOLDER_NAME[0])?;
                        self.change_state(State::EmptyTag);
                    }
                    b'>' if !self.in_quotes => {
                        fire!(self, attribute);
                        self.change_state(State::TagContents);
                    }
                    b'"' => {
                        self.push(c)?;
                        self.in_quotes = !self.in_quotes;
                    }
                    _ => self.push(c)?,
                }
            }

            State::EndTag => {
                if entering {
                    self.length = 0;
                }
                match c {
                    b'<' => return Err(SyntaxError::TagStartInEndTag.into()),
                    whitespace!() => (),
                    b'>' => {
                        fire!(self, tag_close);
                        self.change_state(State::TagContents);
                    }
                    _ => self.push(c)?,
                }
            }
        }

        Ok(())
    }

    fn change_state(&mut self, state: State) {
        trace!(target: "picosax::parser", "{:?} -> {:?}", self.state, state);
        self.state = state;
        self.entering = true;
    }

    // Longest string which can be staged, two slots are kept for terminators.
    fn limit(&self) -> usize {
        self.buffer.as_ref().len() - 2
    }

    fn overflow(&self) -> Result<(), FeedError> {
        if self.allow_truncated {
            Ok(())
        } else {
            Err(FeedError::BufferOverflow)
        }
    }

    fn push(&mut self, c: u8) -> Result<(), FeedError> {
        if self.length < self.limit() {
            self.buffer.as_mut()[self.length] = c;
            self.length += 1;
            Ok(())
        } else {
            self.overflow()
        }
    }

    // Starts a new tag name with its first byte, dropping whatever the
    // previous unit left in the buffer.
    fn restart_with(&mut self, c: u8) -> Result<(), FeedError> {
        if self.limit() == 0 {
            self.overflow()?;
            self.length = 0;
            return Ok(());
        }
        self.buffer.as_mut()[0] = c;
        self.length = 1;
        Ok(())
    }

    fn fire(&mut self, deliver: impl FnOnce(&mut S, &[u8])) {
        if self.length == 0 {
            return;
        }
        let buffer = self.buffer.as_mut();
        if self.length < buffer.len() {
            buffer[self.length] = TERMINATOR;
            self.length += 1;
        }
        let staged = &buffer[..self.length];
        let end = staged
            .iter()
            .position(|c| *c == TERMINATOR)
            .unwrap_or(staged.len());
        deliver(&mut self.sink, &staged[..end]);
    }
}
