//! Decides *where* the masked-bests cache gets fed entries during a scan
//! (§4.3.5): only at arrows that are starts of discontiguous hits that
//! right-intersperse every hit currently in the mask, since those are the
//! only arrows a later, more-masked recursive call could legitimately reuse.

use crate::arrow::Arrow;
use crate::hit::second_right_intersperses_first;
use crate::hit_list::HitList;
use crate::resolver::masked_bests_cache::MaskedBestsCache;
use crate::resolver::scored_arch_proxy::ScoredArchProxy;

/// Precomputes the storage arrows for `masks`, then feeds the cache as the
/// enclosing scan's frontier advances.
pub struct MaskedBestsCacher {
    arrows_to_store: Vec<Arrow>,
    next: usize,
}

impl MaskedBestsCacher {
    pub fn new(hits: &HitList, masks: &[usize], start_arrow: Arrow) -> Self {
        MaskedBestsCacher {
            arrows_to_store: arrows_before_starts_of_doms_right_interspersed_with_all_of(hits, masks, start_arrow),
            next: 0,
        }
    }

    /// Stores `best` at every precomputed arrow strictly before `new_position`
    /// that hasn't been stored yet, then advances the frontier to there.
    pub fn advance_to_pos_with_best_so_far(
        &mut self,
        cache: &mut MaskedBestsCache,
        hits: &HitList,
        masks: &[usize],
        new_position: Arrow,
        best: &ScoredArchProxy,
    ) {
        let target = self.arrows_to_store.partition_point(|&a| a < new_position);
        self.advance_to_idx(cache, hits, masks, target, best);
    }

    /// Stores `best` at every remaining precomputed arrow.
    pub fn advance_to_end_with_best_so_far(
        &mut self,
        cache: &mut MaskedBestsCache,
        hits: &HitList,
        masks: &[usize],
        best: &ScoredArchProxy,
    ) {
        let target = self.arrows_to_store.len();
        self.advance_to_idx(cache, hits, masks, target, best);
    }

    fn advance_to_idx(
        &mut self,
        cache: &mut MaskedBestsCache,
        hits: &HitList,
        masks: &[usize],
        target: usize,
        best: &ScoredArchProxy,
    ) {
        debug_assert!(target >= self.next, "cacher frontier must not move backwards");
        while self.next < target {
            let arrow = self.arrows_to_store[self.next];
            cache.store(hits, masks, arrow, best.clone());
            self.next += 1;
        }
    }
}

fn arrows_before_starts_of_doms_right_interspersed_with_all_of(
    hits: &HitList,
    masks: &[usize],
    arg_start_arrow: Arrow,
) -> Vec<Arrow> {
    if masks.is_empty() {
        return Vec::new();
    }
    let max_stop = masks
        .iter()
        .map(|&idx| hits.get(idx).stop_arrow())
        .max()
        .expect("masks is non-empty");

    let mut arrows: Vec<Arrow> = hits
        .indices_with_stop_after(max_stop)
        .filter(|&idx| {
            let candidate = hits.get(idx);
            candidate.is_discontiguous()
                && masks
                    .iter()
                    .all(|&m| second_right_intersperses_first(hits.get(m), candidate))
        })
        .map(|idx| hits.get(idx).start_arrow())
        .filter(|&start| start >= arg_start_arrow)
        .collect();
    arrows.sort_unstable();
    arrows.dedup();
    arrows
}
