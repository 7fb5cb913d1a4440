/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{debug, warn};
use picosax::{ConstructionError, FeedError, TagParser, TagSink};
use thiserror::Error;

const DEFAULT_CAPACITY: usize = 256;

const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Prints the events of the streaming tag parser for each input.
#[derive(Parser)]
#[command(name = "tagdump", version)]
#[command(after_help = "Logging is controlled with the RUST_LOG environment variable.")]
struct Cli {
    /// Input files, standard input is read when none given
    files: Vec<PathBuf>,

    /// Parser buffer capacity in bytes, longest string is two bytes less
    #[arg(short, long, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Truncate long strings instead of failing
    #[arg(short, long)]
    truncate: bool,

    /// Reset the parser and continue after an error
    #[arg(short, long)]
    resync: bool,

    /// Print event counts after each input
    #[arg(short, long)]
    stat: bool,

    /// Do not print the events
    #[arg(short, long)]
    quiet: bool,

    /// File read buffer size in bytes
    #[arg(short, long, default_value_t = DEFAULT_BUFFER_SIZE)]
    buffer: usize,
}

#[derive(Default)]
struct Stats {
    nr_tags: usize,
    nr_end_tags: usize,
    nr_attributes: usize,
    nr_content_bytes: usize,
    nr_errors: usize,
}

struct Printer<W: Write> {
    out: W,
    quiet: bool,
    stats: Stats,
    error: Option<io::Error>,
}

impl<W: Write> Printer<W> {
    fn new(out: W, quiet: bool) -> Self {
        Printer {
            out,
            quiet,
            stats: Stats::default(),
            error: None,
        }
    }

    fn print(&mut self, label: &str, text: &[u8]) {
        if self.quiet || self.error.is_some() {
            return;
        }
        let result = writeln!(self.out, "{}: '{}'", label, String::from_utf8_lossy(text));
        if let Err(err) = result {
            self.error = Some(err);
        }
    }

    fn take_error(&mut self) -> Result<(), io::Error> {
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn report(&mut self, name: &str) -> Result<(), io::Error> {
        writeln!(
            self.out,
            "{}: tags: {}, end tags: {}, attributes: {}, content: {} bytes, errors: {}",
            name,
            self.stats.nr_tags,
            self.stats.nr_end_tags,
            self.stats.nr_attributes,
            self.stats.nr_content_bytes,
            self.stats.nr_errors,
        )
    }
}

impl<W: Write> TagSink for Printer<W> {
    fn tag_open(&mut self, name: &[u8]) {
        self.stats.nr_tags += 1;
        self.print("tag_open", name);
    }

    fn tag_close(&mut self, name: &[u8]) {
        self.stats.nr_end_tags += 1;
        self.print("tag_close", name);
    }

    fn attribute(&mut self, text: &[u8]) {
        self.stats.nr_attributes += 1;
        self.print("attribute", text);
    }

    fn content(&mut self, text: &[u8]) {
        self.stats.nr_content_bytes += text.len();
        self.print("content", text);
    }

    fn parameter(&mut self, text: &[u8]) {
        self.print("parameter", text);
    }
}

#[derive(Debug, Error)]
enum DumpError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{error} at {location}")]
    Feed {
        error: FeedError,
        location: picosax::Location,
    },
}

struct Dumper<W: Write> {
    parser: TagParser<Printer<W>>,
    resync: bool,
    buffer_size: usize,
}

impl<W: Write> Dumper<W> {
    fn new(cli: &Cli, out: W) -> Result<Self, ConstructionError> {
        let mut parser = TagParser::new(Printer::new(out, cli.quiet), cli.capacity)?;
        parser.set_allow_truncated(cli.truncate);
        Ok(Dumper {
            parser,
            resync: cli.resync,
            buffer_size: cli.buffer.max(1),
        })
    }

    fn dump(&mut self, input: &mut dyn Read) -> Result<(), DumpError> {
        let mut buffer = vec![0u8; self.buffer_size];
        loop {
            let bytes_read = input.read(&mut buffer)?;
            if bytes_read == 0 {
                break;
            }
            for c in &buffer[..bytes_read] {
                if let Err(error) = self.parser.feed(*c) {
                    let location = self.parser.location();
                    self.parser.sink_mut().stats.nr_errors += 1;
                    if !self.resync {
                        return Err(DumpError::Feed { error, location });
                    }
                    warn!("{} at {}, resynchronizing", error, location);
                    self.parser.reset();
                }
                self.parser.sink_mut().take_error()?;
            }
        }
        Ok(())
    }

    fn dump_file(&mut self, name: &str, input: &mut dyn Read, stat: bool) -> bool {
        debug!("dumping '{}'", name);
        self.parser.reset();
        self.parser.sink_mut().stats = Stats::default();
        let result = self.dump(input);
        if stat {
            if let Err(err) = self.parser.sink_mut().report(name) {
                eprintln!("Error writing output: {}", err);
                return false;
            }
        }
        match result {
            Ok(()) => self.parser.sink().stats.nr_errors == 0,
            Err(DumpError::Io(err)) => {
                eprintln!("Error processing '{}': {}", name, err);
                false
            }
            Err(err @ DumpError::Feed { .. }) => {
                eprintln!("Parse error in '{}': {}", name, err);
                false
            }
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut dumper = match Dumper::new(&cli, stdout.lock()) {
        Ok(dumper) => dumper,
        Err(err) => {
            eprintln!("Error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut ok = true;
    if cli.files.is_empty() {
        ok = dumper.dump_file("stdin", &mut io::stdin().lock(), cli.stat);
    } else {
        for path in &cli.files {
            let name = path.display().to_string();
            match File::open(path) {
                Ok(mut file) => {
                    if !dumper.dump_file(&name, &mut file, cli.stat) {
                        ok = false;
                    }
                }
                Err(err) => {
                    eprintln!("Error opening '{}': {}", name, err);
                    ok = false;
                }
            }
        }
    }

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
