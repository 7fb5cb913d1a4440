/*
** This file is a part of picosax (streaming tag parser)
** Copyright (C) 2017-2025 Gurer Ozen
**
** picosax is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

use log::debug;

use crate::ConstructionError;

/// A fixed size buffer which can be leased to one parser at a time.
///
/// This is meant for builds without a heap: declare the arena as a
/// `static` and give its lease to
/// [TagParser::with_buffer()](crate::TagParser::with_buffer). Claiming
/// the arena while an earlier lease is alive fails with
/// [ConstructionError::ArenaInUse]. The lease goes back to the arena
/// when it is dropped, usually together with its parser.
///
/// # Examples
///
/// ```
/// use picosax::{ConstructionError, StaticArena, TagParser, TagSink};
///
/// static ARENA: StaticArena<64> = StaticArena::new();
///
/// struct Nothing;
/// impl TagSink for Nothing {}
///
/// let parser = TagParser::with_buffer(Nothing, ARENA.claim()?)?;
/// assert_eq!(ARENA.claim().err(), Some(ConstructionError::ArenaInUse));
/// parser.teardown();
/// assert!(ARENA.claim().is_ok());
/// # Ok::<(), ConstructionError>(())
/// ```
pub struct StaticArena<const N: usize> {
    in_use: AtomicBool,
    memory: UnsafeCell<[u8; N]>,
}

// SAFETY: memory is only reachable through an ArenaLease, and the in_use
// flag guarantees that at most one lease exists at any time.
unsafe impl<const N: usize> Sync for StaticArena<N> {}

impl<const N: usize> StaticArena<N> {
    pub const fn new() -> Self {
        StaticArena {
            in_use: AtomicBool::new(false),
            memory: UnsafeCell::new([0; N]),
        }
    }

    /// Takes the arena buffer, failing if it is already leased.
    pub fn claim(&self) -> Result<ArenaLease<'_, N>, ConstructionError> {
        if self
            .in_use
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(ConstructionError::ArenaInUse);
        }
        debug!(target: "picosax::arena", "arena of {N} bytes claimed");
        Ok(ArenaLease { arena: self })
    }

    /// Returns true if a lease is currently alive.
    pub fn is_claimed(&self) -> bool {
        self.in_use.load(Ordering::Acquire)
    }
}

impl<const N: usize> Default for StaticArena<N> {
    fn default() -> Self {
        StaticArena::new()
    }
}

/// Exclusive access to the buffer of a [StaticArena].
pub struct ArenaLease<'a, const N: usize> {
    arena: &'a StaticArena<N>,
}

impl<const N: usize> AsRef<[u8]> for ArenaLease<'_, N> {
    fn as_ref(&self) -> &[u8] {
        // SAFETY: this lease is the only one, see StaticArena::claim().
        unsafe { &*self.arena.memory.get() }
    }
}

impl<const N: usize> AsMut<[u8]> for ArenaLease<'_, N> {
    fn as_mut(&mut self) -> &mut [u8] {
        // SAFETY: this lease is the only one, and &mut self keeps the
        // returned slice unique.
        unsafe { &mut *self.arena.memory.get() }
    }
}

impl<const N: usize> Drop for ArenaLease<'_, N> {
    fn drop(&mut self) {
        self.arena.in_use.store(false, Ordering::Release);
        debug!(target: "picosax::arena", "arena of {N} bytes released");
    }
}
