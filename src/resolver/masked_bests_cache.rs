//! Memoisation cache keyed on "unmasked-regions signatures" (§4.3.4): the
//! ordered list of open arrow intervals not covered by any hit in the current
//! mask. Different masks that leave the same gaps open share a cache entry.

use crate::arrow::Arrow;
use crate::hit_list::HitList;
use crate::resolver::scored_arch_proxy::ScoredArchProxy;
use rustc_hash::FxHashMap;

/// The unmasked-regions signature: an ordered list of `(start, stop)` index
/// pairs for the open gaps in `[0, arrow)` left by `masks` (hit indices into
/// `hits`). Zero-length gaps are elided, so distinct masks can share a
/// signature — that's deliberate.
pub fn unmasked_regions_before(hits: &HitList, masks: &[usize], arrow: Arrow) -> Vec<(u32, u32)> {
    let mut segments: Vec<(u32, u32)> = masks
        .iter()
        .flat_map(|&idx| hits.get(idx).run().segments())
        .map(|s| (s.start().index(), s.stop().index()))
        .collect();
    segments.sort_unstable();

    let mut regions = Vec::new();
    let mut prev_stop = 0u32;
    for (start, stop) in segments {
        if start > prev_stop {
            regions.push((prev_stop, start));
        }
        if stop > prev_stop {
            prev_stop = stop;
        }
    }
    let upto = arrow.index();
    if upto > prev_stop {
        regions.push((prev_stop, upto));
    }
    regions
}

#[derive(Default)]
pub struct MaskedBestsCache {
    store: FxHashMap<Vec<(u32, u32)>, ScoredArchProxy>,
}

impl MaskedBestsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the best architecture for `[0, arrow)` under `masks`. A miss
    /// means the enclosing scan never stored this signature before it was
    /// needed, which is an internal-inconsistency bug in the scan ordering,
    /// not a legitimate runtime condition.
    pub fn get(&self, hits: &HitList, masks: &[usize], arrow: Arrow) -> ScoredArchProxy {
        let key = unmasked_regions_before(hits, masks, arrow);
        debug_assert!(self.store.contains_key(&key), "masked-bests cache miss for signature {:?}", key);
        self.store.get(&key).cloned().unwrap_or_default()
    }

    pub fn store(&mut self, hits: &HitList, masks: &[usize], arrow: Arrow, proxy: ScoredArchProxy) {
        let key = unmasked_regions_before(hits, masks, arrow);
        self.store.insert(key, proxy);
    }
}
