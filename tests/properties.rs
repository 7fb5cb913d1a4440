//! Property-based tests for the streaming tag parser.
//!
//! These check invariants which must hold for any input and any buffer
//! capacity, not just hand written documents.

use picosax::{FeedError, MIN_CAPACITY, State, TagParser, TagSink};
use proptest::prelude::*;

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
enum Event {
    Open(Vec<u8>),
    Close(Vec<u8>),
    Attr(Vec<u8>),
    Content(Vec<u8>),
}

impl Event {
    fn text(&self) -> &[u8] {
        match self {
            Event::Open(t) | Event::Close(t) | Event::Attr(t) | Event::Content(t) => t,
        }
    }
}

#[derive(Default)]
struct Recorder {
    events: Vec<Event>,
}

impl TagSink for Recorder {
    fn tag_open(&mut self, name: &[u8]) {
        self.events.push(Event::Open(name.to_vec()));
    }

    fn tag_close(&mut self, name: &[u8]) {
        self.events.push(Event::Close(name.to_vec()));
    }

    fn attribute(&mut self, text: &[u8]) {
        self.events.push(Event::Attr(text.to_vec()));
    }

    fn content(&mut self, text: &[u8]) {
        self.events.push(Event::Content(text.to_vec()));
    }
}

fn parser(capacity: usize, truncate: bool) -> TagParser<Recorder> {
    let mut parser = TagParser::new(Recorder::default(), capacity).unwrap();
    parser.set_allow_truncated(truncate);
    parser
}

/// Feeds every byte, resetting after errors, and returns the errors.
fn feed_all(parser: &mut TagParser<Recorder>, input: &[u8]) -> Vec<FeedError> {
    let mut errors = Vec::new();
    for c in input {
        if let Err(err) = parser.feed(*c) {
            errors.push(err);
            parser.reset();
        }
    }
    errors
}

fn tag_soup() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            Just(b'<'),
            Just(b'>'),
            Just(b'/'),
            Just(b'"'),
            Just(b' '),
            Just(b'\n'),
            Just(b'='),
            Just(0u8),
            b'a'..=b'e',
        ],
        0..300,
    )
}

// =============================================================================
// Property: Parser Never Panics
// =============================================================================

proptest! {
    #![proptest_config(config())]

    #[test]
    fn never_panics(
        input in prop::collection::vec(any::<u8>(), 0..500),
        capacity in MIN_CAPACITY..40,
        truncate in any::<bool>(),
    ) {
        let mut parser = parser(capacity, truncate);
        feed_all(&mut parser, &input);
    }

    #[test]
    fn never_panics_on_tag_soup(
        input in tag_soup(),
        capacity in MIN_CAPACITY..40,
        truncate in any::<bool>(),
    ) {
        let mut parser = parser(capacity, truncate);
        feed_all(&mut parser, &input);
    }
}

// =============================================================================
// Property: Buffer Bound
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Delivered strings never exceed capacity - 2 bytes and never
    /// contain the terminator.
    #[test]
    fn delivered_text_fits(
        input in tag_soup(),
        capacity in MIN_CAPACITY..20,
        truncate in any::<bool>(),
    ) {
        let mut parser = parser(capacity, truncate);
        feed_all(&mut parser, &input);
        for event in &parser.sink().events {
            prop_assert!(event.text().len() <= capacity - 2);
            prop_assert!(!event.text().contains(&0));
        }
    }

    /// With truncation allowed the only possible errors are syntax errors.
    #[test]
    fn truncation_never_overflows(
        input in tag_soup(),
        capacity in MIN_CAPACITY..20,
    ) {
        let mut parser = parser(capacity, true);
        let errors = feed_all(&mut parser, &input);
        prop_assert!(errors.iter().all(|e| matches!(e, FeedError::Syntax(_))));
    }

    #[test]
    fn long_tag_name(name in "[a-z]{1,60}", capacity in 3usize..30) {
        let document = format!("<{}>", name);
        let limit = capacity - 2;

        let mut strict = parser(capacity, false);
        let result = strict.feed_bytes(document.as_bytes());
        if name.len() <= limit {
            prop_assert_eq!(result, Ok(()));
            prop_assert_eq!(&strict.sink().events, &vec![Event::Open(name.clone().into_bytes())]);
        } else {
            prop_assert_eq!(result, Err(FeedError::BufferOverflow));
            // '<' plus the bytes that fit, then the overflowing one
            prop_assert_eq!(strict.location().bytes, limit + 2);
            prop_assert!(strict.sink().events.is_empty());
        }

        let mut lenient = parser(capacity, true);
        for c in document.bytes() {
            prop_assert_eq!(lenient.feed(c), Ok(()));
        }
        let expected = name.as_bytes()[..name.len().min(limit)].to_vec();
        prop_assert_eq!(&lenient.sink().events, &vec![Event::Open(expected)]);
    }
}

// =============================================================================
// Property: Reset
// =============================================================================

proptest! {
    #![proptest_config(config())]

    /// Whatever came before, a reset gives a clean start.
    #[test]
    fn reset_gives_clean_start(prefix in tag_soup(), capacity in 4usize..20) {
        let mut parser = parser(capacity, true);
        feed_all(&mut parser, &prefix);
        parser.reset();
        prop_assert_eq!(parser.state(), State::Begin);

        parser.sink_mut().events.clear();
        parser.feed_bytes(b"<ab>x</ab>").unwrap();
        prop_assert_eq!(
            &parser.sink().events,
            &vec![
                Event::Open(b"ab".to_vec()),
                Event::Content(b"x".to_vec()),
                Event::Close(b"ab".to_vec()),
            ]
        );
    }

    #[test]
    fn reset_is_idempotent(
        prefix in tag_soup(),
        suffix in tag_soup(),
        capacity in MIN_CAPACITY..20,
    ) {
        let mut once = parser(capacity, true);
        feed_all(&mut once, &prefix);
        once.reset();
        once.sink_mut().events.clear();
        let once_errors = feed_all(&mut once, &suffix);

        let mut twice = parser(capacity, true);
        feed_all(&mut twice, &prefix);
        twice.reset();
        twice.reset();
        twice.sink_mut().events.clear();
        let twice_errors = feed_all(&mut twice, &suffix);

        prop_assert_eq!(once_errors, twice_errors);
        prop_assert_eq!(&once.sink().events, &twice.sink().events);
        prop_assert_eq!(once.state(), twice.state());
    }

    /// Feeding byte by byte and in one block give the same events.
    #[test]
    fn block_feed_matches_byte_feed(input in tag_soup(), capacity in MIN_CAPACITY..20) {
        let mut by_byte = parser(capacity, true);
        let mut result = Ok(());
        for c in &input {
            result = by_byte.feed(*c);
            if result.is_err() {
                break;
            }
        }

        let mut by_block = parser(capacity, true);
        prop_assert_eq!(by_block.feed_bytes(&input), result);
        prop_assert_eq!(&by_block.sink().events, &by_byte.sink().events);
        prop_assert_eq!(by_block.location(), by_byte.location());
    }
}
