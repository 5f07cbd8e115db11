//! Perft: exhaustive move-path counting for generator verification.

use std::ops::AddAssign;

use log::trace;

use super::state::Position;
use super::types::Move;

/// Leaf statistics of a perft run.
///
/// Every field except `nodes` describes the last move on each path.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PerftStats {
    pub nodes: u64,
    pub captures: u64,
    pub en_passants: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub double_checks: u64,
}

impl AddAssign for PerftStats {
    fn add_assign(&mut self, other: Self) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passants += other.en_passants;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.double_checks += other.double_checks;
    }
}

impl Position {
    /// Number of legal move paths of length `depth`.
    pub fn perft(&mut self, depth: usize) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0;
        for mv in moves {
            self.do_move(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }

    /// Perft split by root move.
    pub fn divide(&mut self, depth: usize) -> Vec<(Move, u64)> {
        if depth == 0 {
            return Vec::new();
        }
        let mut counts = Vec::new();
        for mv in self.generate_moves() {
            self.do_move(mv);
            let nodes = self.perft(depth - 1);
            self.undo_move();
            trace!("{mv}: {nodes}");
            counts.push((mv, nodes));
        }
        counts
    }

    /// Perft with leaf classification.
    pub fn perft_stats(&mut self, depth: usize) -> PerftStats {
        let mut stats = PerftStats::default();
        if depth == 0 {
            stats.nodes = 1;
            return stats;
        }
        for mv in self.generate_moves() {
            self.do_move(mv);
            if depth == 1 {
                stats += self.leaf_stats(mv);
            } else {
                stats += self.perft_stats(depth - 1);
            }
            self.undo_move();
        }
        stats
    }

    fn leaf_stats(&self, mv: Move) -> PerftStats {
        PerftStats {
            nodes: 1,
            captures: u64::from(mv.is_capture()),
            en_passants: u64::from(mv.is_en_passant()),
            castles: u64::from(mv.is_castling()),
            promotions: u64::from(mv.is_promotion()),
            checks: u64::from(self.in_check()),
            double_checks: u64::from(self.in_double_check()),
        }
    }
}
