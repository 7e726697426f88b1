//! Per-scan best-so-far table: for every arrow seen during one `best(...)`
//! scan, the best architecture achievable ending at or before that arrow.
//!
//! States, per §4.3.6: an arrow is either carrying the previous best (filled in
//! by `extend_up_to`) or holds a freshly recorded best (`add_best_at`).
//! Queries past the current frontier are a programming error.

use crate::arrow::Arrow;
use crate::resolver::scored_arch_proxy::ScoredArchProxy;

pub struct BestScan {
    /// Indices into `arches`, one per arrow seen so far (`bests[i]` is the
    /// best-arch index for arrow `i`). Forward-filled by `extend_up_to`.
    bests: Vec<u32>,
    arches: Vec<ScoredArchProxy>,
}

impl BestScan {
    /// Starts a scan with a single "nothing chosen yet" entry at arrow 0.
    pub fn new(expected_residues: usize) -> Self {
        let mut bests = Vec::with_capacity(expected_residues + 1);
        bests.push(0);
        BestScan {
            bests,
            arches: vec![ScoredArchProxy::default()],
        }
    }

    /// The best architecture recorded at or before `arrow`.
    pub fn best_up_to(&self, arrow: Arrow) -> &ScoredArchProxy {
        let idx = arrow.index() as usize;
        debug_assert!(idx < self.bests.len(), "arrow queried before the scan reached it");
        &self.arches[self.bests[idx] as usize]
    }

    /// The best architecture recorded so far (at the current frontier).
    pub fn best_so_far(&self) -> &ScoredArchProxy {
        &self.arches[*self.bests.last().expect("bests always has at least one entry") as usize]
    }

    /// Forward-fills the table up to and including `arrow` with the current
    /// best-so-far, and returns the score that was current before the fill.
    pub fn extend_up_to(&mut self, arrow: Arrow) -> f32 {
        let target_len = arrow.index() as usize + 1;
        debug_assert!(
            target_len >= self.bests.len(),
            "extend_up_to must not move the frontier backwards"
        );
        let prev_score = self.best_so_far().score();
        let fill = *self.bests.last().expect("bests always has at least one entry");
        self.bests.resize(target_len, fill);
        prev_score
    }

    /// Commits a new best at `arrow`, which must equal the current frontier
    /// (one past the last filled arrow).
    pub fn add_best_at(&mut self, arrow: Arrow, proxy: ScoredArchProxy) {
        debug_assert_eq!(
            arrow.index() as usize,
            self.bests.len(),
            "add_best_at must be called exactly at the current frontier"
        );
        let new_idx = self.arches.len() as u32;
        self.arches.push(proxy);
        self.bests.push(new_idx);
    }
}
