//! Hit list: an immutable, canonically-sorted collection of hits for one query.

use crate::arrow::Arrow;
use crate::error::{ResolveError, Result};
use crate::hit::Hit;
use std::ops::Range;

/// The largest hit count a `HitList` can index; two values are reserved as
/// sentinels by the resolver's scan bookkeeping.
pub const MAX_HITS: usize = (u32::MAX - 2) as usize;

/// An immutable, sorted collection of hits for one query, plus the side
/// indices the resolver needs to scan them efficiently.
pub struct HitList {
    hits: Vec<Hit>,
    labels: Vec<String>,
    /// `(start_arrow, hit_idx)` pairs for discontiguous hits only, sorted by start arrow.
    discontiguous_by_start: Vec<(Arrow, u32)>,
}

impl HitList {
    /// Builds a hit list, sorting hits into canonical order: stop arrow, start
    /// arrow, score, segment list, then label string.
    ///
    /// `labels[hit.label_idx()]` must resolve for every hit in `hits`.
    pub fn new(mut hits: Vec<Hit>, labels: Vec<String>) -> Result<Self> {
        if hits.len() > MAX_HITS {
            return Err(ResolveError::CapacityExceeded {
                count: hits.len(),
                capacity: MAX_HITS,
            });
        }
        hits.sort_by(|a, b| compare_hits(a, b, &labels));

        let mut discontiguous_by_start: Vec<(Arrow, u32)> = hits
            .iter()
            .enumerate()
            .filter(|(_, h)| h.is_discontiguous())
            .map(|(i, h)| (h.start_arrow(), i as u32))
            .collect();
        discontiguous_by_start.sort_by_key(|&(start, _)| start);

        Ok(HitList {
            hits,
            labels,
            discontiguous_by_start,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> &Hit {
        &self.hits[idx]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Hit> {
        self.hits.iter()
    }

    #[inline]
    pub fn label(&self, label_idx: u32) -> &str {
        &self.labels[label_idx as usize]
    }

    /// The greatest stop arrow among all hits, or the start arrow if empty.
    pub fn max_stop_arrow(&self) -> Arrow {
        self.hits
            .iter()
            .map(Hit::stop_arrow)
            .max()
            .unwrap_or_else(Arrow::start)
    }

    /// The half-open index range of hits whose stop arrow lies in `(after, upto]`.
    /// Valid because the list is primarily sorted by stop arrow.
    pub fn indices_of_hits_that_stop_in_range(&self, after: Arrow, upto: Arrow) -> Range<usize> {
        let lo = self.hits.partition_point(|h| h.stop_arrow() <= after);
        let hi = self.hits.partition_point(|h| h.stop_arrow() <= upto);
        lo..hi
    }

    /// Index range of all hits whose stop arrow lies strictly after `arrow`.
    /// Since the list is primarily sorted by stop arrow, this is the suffix
    /// starting at the first such hit.
    pub fn indices_with_stop_after(&self, arrow: Arrow) -> Range<usize> {
        let lo = self.hits.partition_point(|h| h.stop_arrow() <= arrow);
        lo..self.hits.len()
    }

    /// Indices (into this list) of discontiguous hits whose start arrow lies in
    /// `[from, upto]`, in ascending start-arrow order.
    pub fn discontiguous_hits_starting_in(&self, from: Arrow, upto: Arrow) -> Vec<u32> {
        let lo = self
            .discontiguous_by_start
            .partition_point(|&(start, _)| start < from);
        let hi = self
            .discontiguous_by_start
            .partition_point(|&(start, _)| start <= upto);
        self.discontiguous_by_start[lo..hi]
            .iter()
            .map(|&(_, idx)| idx)
            .collect()
    }
}

fn compare_hits(a: &Hit, b: &Hit, labels: &[String]) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    a.stop_arrow()
        .cmp(&b.stop_arrow())
        .then_with(|| a.start_arrow().cmp(&b.start_arrow()))
        .then_with(|| a.score().total_cmp(&b.score()))
        .then_with(|| {
            let sa: Vec<(u32, u32)> = a
                .run()
                .segments()
                .iter()
                .map(|s| (s.start().index(), s.stop().index()))
                .collect();
            let sb: Vec<(u32, u32)> = b
                .run()
                .segments()
                .iter()
                .map(|s| (s.start().index(), s.stop().index()))
                .collect();
            sa.cmp(&sb)
        })
        .then_with(|| {
            let la = labels.get(a.label_idx() as usize).map(String::as_str).unwrap_or("");
            let lb = labels.get(b.label_idx() as usize).map(String::as_str).unwrap_or("");
            la.cmp(lb)
        })
        .then(Ordering::Equal)
}
