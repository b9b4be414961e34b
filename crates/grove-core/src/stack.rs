//! Scope discipline for traversal frames.
//!
//! Object and array nodes open nested scopes in the backing archive. Only
//! the innermost open scope may be used at any instant: a caller that
//! retains a parent handle and uses it while a child scope is still open
//! would corrupt the archive's cursor. `FrameStack` turns that misuse into
//! an immediate [`Usage`](crate::GroveError::Usage) error before the
//! archive is touched.

use crate::error::{GroveError, Result};

/// Identifier of one traversal frame, held by the node that opened it.
///
/// The generation number keeps a stale handle from an already-closed scope
/// from matching a newer frame that happens to sit at the same depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameId {
    depth: usize,
    gen: u64,
}

/// Arena of frames indexed by traversal depth. Frames form a strict stack:
/// the frame pushed last must be released first, and release reactivates
/// the parent.
#[derive(Debug)]
pub struct FrameStack {
    frames: Vec<u64>,
    next_gen: u64,
}

impl FrameStack {
    /// A fresh stack with only the root frame active.
    pub fn new() -> Self {
        FrameStack {
            frames: vec![0],
            next_gen: 1,
        }
    }

    /// The frame owned by the document root node.
    pub fn root(&self) -> FrameId {
        FrameId { depth: 0, gen: 0 }
    }

    /// Opens a child frame, deactivating the current top.
    pub fn push(&mut self) -> FrameId {
        let gen = self.next_gen;
        self.next_gen += 1;
        self.frames.push(gen);
        FrameId {
            depth: self.frames.len() - 1,
            gen,
        }
    }

    /// Releases `frame` and reactivates its parent. Runs on every scope
    /// exit path, including unwinding, so it must not fail; node
    /// construction already guarantees strict nesting.
    pub fn pop(&mut self, frame: FrameId) {
        debug_assert!(self.frames.len() > 1, "root frame is never popped");
        debug_assert_eq!(
            self.frames.last().copied(),
            Some(frame.gen),
            "frames must be released innermost-first"
        );
        let _ = frame;
        self.frames.pop();
    }

    /// Fails unless `frame` is the unique active (top) frame.
    pub fn require_active(&self, frame: FrameId) -> Result<()> {
        if frame.depth + 1 == self.frames.len() && self.frames[frame.depth] == frame.gen {
            Ok(())
        } else {
            Err(GroveError::Usage(
                "node is not the innermost open scope",
            ))
        }
    }

    /// Nesting depth below the root frame; 0 once every opened scope has
    /// been closed again.
    pub fn depth(&self) -> usize {
        self.frames.len() - 1
    }
}

impl Default for FrameStack {
    fn default() -> Self {
        FrameStack::new()
    }
}
