/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// # Must not compile tests
///
/// Parser cannot be used after the teardown:
/// ```compile_fail
/// use picosax::{TagParser, TagSink};
/// struct Nothing;
/// impl TagSink for Nothing {}
/// let mut parser = TagParser::new(Nothing, 16).unwrap();
/// let _sink = parser.teardown();
/// parser.feed(b'<').unwrap();
/// ```
///
/// Sink cannot call back into its own parser:
/// ```compile_fail
/// use picosax::{TagParser, TagSink};
/// struct Nothing;
/// impl TagSink for Nothing {}
/// let mut parser = TagParser::new(Nothing, 16).unwrap();
/// let sink = parser.sink_mut();
/// parser.reset();
/// sink.tag_open(b"a");
/// ```
///
/// Borrowed buffer cannot outlive the parser:
/// ```compile_fail
/// use picosax::{TagParser, TagSink};
/// struct Nothing;
/// impl TagSink for Nothing {}
/// let mut parser;
/// {
///     let mut buffer = [0u8; 16];
///     parser = TagParser::with_buffer(Nothing, &mut buffer[..]).unwrap();
/// }
/// parser.feed(b'<').unwrap();
/// ```
///
/// Arena lease cannot outlive the arena:
/// ```compile_fail
/// use picosax::StaticArena;
/// let lease;
/// {
///     let arena = StaticArena::<16>::new();
///     lease = arena.claim().unwrap();
/// }
/// drop(lease);
/// ```
#[cfg(doctest)]
struct MustNotCompileTests;
