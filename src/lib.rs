/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

mod arena;
mod parser;

pub use arena::ArenaLease;
pub use arena::StaticArena;

pub use parser::Callbacks;
pub use parser::ConstructionError;
pub use parser::FeedError;
pub use parser::Location;
pub use parser::MIN_CAPACITY;
pub use parser::PLACEHOLDER_NAME;
pub use parser::State;
pub use parser::SyntaxError;
pub use parser::TagParser;
pub use parser::TagSink;
pub use parser::TextHandler;
