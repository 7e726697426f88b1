//! The DP engine (§4.3): for one query's hit list, returns the maximum-score
//! non-overlapping architecture, correctly handling discontiguous hits whose
//! segments may interleave.

pub mod best_scan;
pub mod masked_bests_cache;
pub mod masked_bests_cacher;
pub mod scored_arch_proxy;

use crate::arrow::Arrow;
use crate::hit::hits_overlap;
use crate::hit_list::HitList;
use best_scan::BestScan;
use masked_bests_cache::MaskedBestsCache;
use masked_bests_cacher::MaskedBestsCacher;
use scored_arch_proxy::{add_hit_copy, ScoredArchProxy};
use std::ops::Range;
use tracing::{debug, trace};

/// The chosen subset of a hit list and its summed score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredArchitecture {
    score: f32,
    hit_indices: Vec<usize>,
}

impl ScoredArchitecture {
    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    /// Indices into the resolved `HitList`, in ascending order.
    #[inline]
    pub fn hit_indices(&self) -> &[usize] {
        &self.hit_indices
    }
}

/// Computes the maximum-score non-overlapping subset of `hits`.
pub fn resolve(hits: &HitList) -> ScoredArchitecture {
    debug!(num_hits = hits.len(), "resolving hit list");
    if hits.is_empty() {
        return ScoredArchitecture {
            score: 0.0,
            hit_indices: Vec::new(),
        };
    }

    let mut cache = MaskedBestsCache::new();
    let stop_arrow = hits.max_stop_arrow();
    let proxy = best_score_and_arch_of_specified_regions(
        hits,
        &mut cache,
        &[],
        Arrow::start(),
        stop_arrow,
        &ScoredArchProxy::default(),
    );

    let mut hit_indices: Vec<usize> = proxy.hit_indices().iter().map(|&i| i as usize).collect();
    hit_indices.sort_unstable();
    debug!(score = proxy.score(), num_chosen = hit_indices.len(), "resolved");
    ScoredArchitecture {
        score: proxy.score(),
        hit_indices,
    }
}

/// Best score/architecture achievable using residues in `[start_arrow,
/// stop_arrow]`, given that no chosen hit may overlap any hit index in
/// `masks`, and that `best_upto_start` is the already-computed best for
/// everything strictly before `start_arrow` under the same mask.
fn best_score_and_arch_of_specified_regions(
    hits: &HitList,
    cache: &mut MaskedBestsCache,
    masks: &[usize],
    start_arrow: Arrow,
    stop_arrow: Arrow,
    best_upto_start: &ScoredArchProxy,
) -> ScoredArchProxy {
    trace!(
        num_masks = masks.len(),
        start = start_arrow.index(),
        stop = stop_arrow.index(),
        "entering scan"
    );
    let span = stop_arrow.index().saturating_sub(start_arrow.index()) as usize;
    let mut bests = BestScan::new(span + 2);

    if start_arrow > Arrow::start() && best_upto_start.score() > 0.0 {
        bests.extend_up_to(start_arrow - 1);
        bests.add_best_at(start_arrow, best_upto_start.clone());
    }

    let mut cacher = MaskedBestsCacher::new(hits, masks, start_arrow);

    let range = hits.indices_of_hits_that_stop_in_range(start_arrow, stop_arrow);
    let mut i = range.start;
    while i < range.end {
        let current_stop = hits.get(i).stop_arrow();
        let mut j = i + 1;
        while j < range.end && hits.get(j).stop_arrow() == current_stop {
            j += 1;
        }
        let group = i..j;

        cacher.advance_to_pos_with_best_so_far(cache, hits, masks, current_stop, bests.best_so_far());

        let best_prev_score = bests.extend_up_to(current_stop - 1);
        let best_new = best_scored_arch_with_one_of_hits(
            hits,
            cache,
            masks,
            group,
            start_arrow,
            &bests,
            best_prev_score,
        );

        match best_new {
            Some(candidate) if candidate.score() > best_prev_score => {
                bests.add_best_at(current_stop, candidate);
            }
            _ => {
                // May extend over forbidden regions, but nothing downstream reads those arrows.
                bests.extend_up_to(current_stop);
            }
        }
        i = j;
    }

    cacher.advance_to_end_with_best_so_far(cache, hits, masks, bests.best_so_far());
    bests.best_so_far().clone()
}

/// Among the hits in `group` (all sharing one stop arrow), finds the one
/// whose own score plus its best non-clashing complement most improves on
/// `score_to_beat`. Ties keep whichever hit was encountered first, which is
/// the earlier hit in canonical order since `group` iterates the hit list in
/// its sorted order.
fn best_scored_arch_with_one_of_hits(
    hits: &HitList,
    cache: &mut MaskedBestsCache,
    masks: &[usize],
    group: Range<usize>,
    start_arrow: Arrow,
    bests: &BestScan,
    score_to_beat: f32,
) -> Option<ScoredArchProxy> {
    let mut best_so_far: Option<ScoredArchProxy> = None;

    for hit_index in group {
        let the_hit = hits.get(hit_index);

        if masks.iter().any(|&m| hits_overlap(the_hit, hits.get(m))) {
            continue;
        }

        let complement = if !the_hit.is_discontiguous() {
            bests.best_up_to(the_hit.start_arrow()).clone()
        } else {
            let hit_start = the_hit.start_arrow();
            let mut extended_masks = Vec::with_capacity(masks.len() + 1);
            extended_masks.extend_from_slice(masks);
            extended_masks.push(hit_index);

            if hit_start >= start_arrow {
                best_score_and_arch_of_specified_regions(
                    hits,
                    cache,
                    &extended_masks,
                    the_hit.run().stop_of_first_segment(),
                    the_hit.run().start_of_last_segment(),
                    bests.best_up_to(hit_start),
                )
            } else {
                trace!(hit_index, "straddling discontiguous hit: consulting masked-bests cache");
                let seed = cache.get(hits, &extended_masks, start_arrow);
                best_score_and_arch_of_specified_regions(
                    hits,
                    cache,
                    &extended_masks,
                    start_arrow,
                    the_hit.run().start_of_last_segment(),
                    &seed,
                )
            }
        };

        let this_score = the_hit.score() + complement.score();
        let improves = match &best_so_far {
            Some(incumbent) => this_score > incumbent.score(),
            None => this_score > score_to_beat,
        };
        if improves {
            best_so_far = Some(add_hit_copy(&complement, the_hit.score(), hit_index as u32));
        }
    }

    best_so_far
}
