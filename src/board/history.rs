//! Fixed-capacity undo stack.

use super::state::DerivedState;
use super::types::{CastlingRights, Move, Piece, Square};

/// Maximum number of moves that can be on the undo stack at once.
pub const MAX_HISTORY: usize = 4096;

/// Everything `undo_move` needs to restore the position before a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UndoInfo {
    pub(crate) mv: Move,
    pub(crate) captured: Option<Piece>,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant: Option<Square>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
    pub(crate) derived: DerivedState,
    pub(crate) hash: u64,
}

impl UndoInfo {
    const EMPTY: UndoInfo = UndoInfo {
        mv: Move::null(),
        captured: None,
        castling_rights: CastlingRights::none(),
        en_passant: None,
        halfmove_clock: 0,
        fullmove_number: 1,
        derived: DerivedState::EMPTY,
        hash: 0,
    };
}

/// Preallocated arena of snapshots with a cursor.
///
/// Pushing past [`MAX_HISTORY`] or popping an empty stack panics.
#[derive(Clone)]
pub(crate) struct History {
    entries: Box<[UndoInfo]>,
    len: usize,
}

impl History {
    pub(crate) fn new() -> Self {
        History {
            entries: vec![UndoInfo::EMPTY; MAX_HISTORY].into_boxed_slice(),
            len: 0,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, undo: UndoInfo) {
        assert!(
            self.len < MAX_HISTORY,
            "history overflow: more than {MAX_HISTORY} moves made without undo"
        );
        self.entries[self.len] = undo;
        self.len += 1;
    }

    #[inline]
    pub(crate) fn pop(&mut self) -> UndoInfo {
        assert!(self.len > 0, "history underflow: undo_move without a matching do_move");
        self.len -= 1;
        self.entries[self.len]
    }

    #[inline]
    pub(crate) fn last(&self) -> Option<&UndoInfo> {
        self.len.checked_sub(1).map(|idx| &self.entries[idx])
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.entries[..self.len].iter().map(|u| u.mv))
            .finish()
    }
}
