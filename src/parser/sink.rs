/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

/// Receiver of the parser events.
///
/// Every method gets the staged text of the completed unit. All methods
/// have empty default bodies, so a sink only implements the events it
/// cares about. Methods are called synchronously from inside
/// [feed()](crate::TagParser::feed), at most once per fed byte.
///
/// Text is passed as raw bytes since the parser works on single bytes
/// and a truncated string may end in the middle of a UTF-8 sequence.
pub trait TagSink {
    /// A start tag name is complete.
    fn tag_open(&mut self, _name: &[u8]) {}

    /// An end tag or an empty element tag is complete.
    ///
    /// For empty element tags with attributes or whitespace before the
    /// `/`, the name is [PLACEHOLDER_NAME](crate::PLACEHOLDER_NAME)
    /// since the real name was overwritten by the attribute text.
    fn tag_close(&mut self, _name: &[u8]) {}

    /// A tag attribute is complete.
    ///
    /// The text is the whole attribute as written, e.g. `id="x1"`.
    fn attribute(&mut self, _text: &[u8]) {}

    /// A run of character data between tags is complete.
    ///
    /// Leading whitespace is dropped, trailing whitespace is kept.
    fn content(&mut self, _text: &[u8]) {}

    /// Reserved, the parser never calls this.
    fn parameter(&mut self, _text: &[u8]) {}
}

impl<S: TagSink + ?Sized> TagSink for &mut S {
    fn tag_open(&mut self, name: &[u8]) {
        (**self).tag_open(name)
    }

    fn tag_close(&mut self, name: &[u8]) {
        (**self).tag_close(name)
    }

    fn attribute(&mut self, text: &[u8]) {
        (**self).attribute(text)
    }

    fn content(&mut self, text: &[u8]) {
        (**self).content(text)
    }

    fn parameter(&mut self, text: &[u8]) {
        (**self).parameter(text)
    }
}

/// Signature of a [Callbacks] handler function.
pub type TextHandler<C> = fn(&mut C, &[u8]);

/// A sink made of optional handler functions and a caller context.
///
/// The context is passed to each handler untouched. Handlers which
/// are `None` are skipped.
///
/// # Examples
///
/// ```
/// use picosax::{Callbacks, TagParser};
///
/// let mut sink = Callbacks::new(Vec::<String>::new());
/// sink.tag_open = Some(|names: &mut Vec<String>, name: &[u8]| {
///     names.push(String::from_utf8_lossy(name).into_owned())
/// });
///
/// let mut parser = TagParser::new(sink, 64)?;
/// parser.feed_bytes(b"<doc><item/></doc>")?;
/// assert_eq!(parser.teardown().context, vec!["doc", "item"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct Callbacks<C> {
    pub context: C,
    pub tag_open: Option<TextHandler<C>>,
    pub tag_close: Option<TextHandler<C>>,
    pub attribute: Option<TextHandler<C>>,
    pub content: Option<TextHandler<C>>,
    pub parameter: Option<TextHandler<C>>,
}

impl<C> Callbacks<C> {
    /// Creates a sink with the given context and no handlers.
    pub fn new(context: C) -> Self {
        Callbacks {
            context,
            tag_open: None,
            tag_close: None,
            attribute: None,
            content: None,
            parameter: None,
        }
    }
}

impl<C> TagSink for Callbacks<C> {
    fn tag_open(&mut self, name: &[u8]) {
        if let Some(handler) = self.tag_open {
            handler(&mut self.context, name);
        }
    }

    fn tag_close(&mut self, name: &[u8]) {
        if let Some(handler) = self.tag_close {
            handler(&mut self.context, name);
        }
    }

    fn attribute(&mut self, text: &[u8]) {
        if let Some(handler) = self.attribute {
            handler(&mut self.context, text);
        }
    }

    fn content(&mut self, text: &[u8]) {
        if let Some(handler) = self.content {
            handler(&mut self.context, text);
        }
    }

    fn parameter(&mut self, text: &[u8]) {
        if let Some(handler) = self.parameter {
            handler(&mut self.context, text);
        }
    }
}
