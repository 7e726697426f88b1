//! Segment run: the ordered, gap-separated list of segments making up one hit's footprint.
//!
//! Segments aren't stored directly; only the overall span (`start_arrow`,
//! `stop_arrow`) and the *gaps* between consecutive segments ("fragments") are
//! kept, matching how discontiguous hits are represented upstream. Segments are
//! reconstructed from the fragments on demand.

use crate::arrow::Arrow;
use crate::error::{ResolveError, Result};
use crate::segment::Segment;

/// A hit's footprint on the sequence: one or more non-overlapping segments in
/// strictly ascending order, with gaps ("fragments") between them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SegmentRun {
    start_arrow: Arrow,
    stop_arrow: Arrow,
    fragments: Vec<Segment>,
}

impl SegmentRun {
    /// A run with a single segment.
    pub fn contiguous(start: Arrow, stop: Arrow) -> Result<Self> {
        if start >= stop {
            return Err(ResolveError::InvalidSegmentGeometry(format!(
                "run start arrow {:?} must precede stop arrow {:?}",
                start.index(),
                stop.index()
            )));
        }
        Ok(SegmentRun {
            start_arrow: start,
            stop_arrow: stop,
            fragments: Vec::new(),
        })
    }

    /// Builds a run from an ordered, non-overlapping list of segment arrow pairs.
    /// Requires at least one segment and strictly increasing, non-touching segments.
    pub fn from_segments(segments: &[(Arrow, Arrow)]) -> Result<Self> {
        if segments.is_empty() {
            return Err(ResolveError::InvalidSegmentGeometry(
                "a segment run needs at least one segment".to_string(),
            ));
        }
        for &(s, e) in segments {
            if s >= e {
                return Err(ResolveError::InvalidSegmentGeometry(format!(
                    "segment start arrow {:?} must precede stop arrow {:?}",
                    s.index(),
                    e.index()
                )));
            }
        }
        let mut fragments = Vec::with_capacity(segments.len() - 1);
        for pair in segments.windows(2) {
            let (_, prev_stop) = pair[0];
            let (next_start, _) = pair[1];
            if next_start <= prev_stop {
                return Err(ResolveError::InvalidSegmentGeometry(format!(
                    "segment starting at arrow {:?} must strictly follow the previous segment's stop arrow {:?}",
                    next_start.index(),
                    prev_stop.index()
                )));
            }
            fragments.push(Segment::new(prev_stop, next_start)?);
        }
        Ok(SegmentRun {
            start_arrow: segments[0].0,
            stop_arrow: segments[segments.len() - 1].1,
            fragments,
        })
    }

    #[inline]
    pub fn start_arrow(&self) -> Arrow {
        self.start_arrow
    }

    #[inline]
    pub fn stop_arrow(&self) -> Arrow {
        self.stop_arrow
    }

    #[inline]
    pub fn is_discontiguous(&self) -> bool {
        !self.fragments.is_empty()
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.fragments.len() + 1
    }

    /// Reconstructs the full ordered segment list from the span and fragments.
    pub fn segments(&self) -> Vec<Segment> {
        let mut out = Vec::with_capacity(self.num_segments());
        let mut cursor = self.start_arrow;
        for frag in &self.fragments {
            out.push(Segment::new(cursor, frag.start()).expect("fragment invariant holds"));
            cursor = frag.stop();
        }
        out.push(Segment::new(cursor, self.stop_arrow).expect("fragment invariant holds"));
        out
    }

    /// The stop arrow of the run's first segment. Only meaningful when discontiguous.
    pub fn stop_of_first_segment(&self) -> Arrow {
        debug_assert!(
            self.is_discontiguous(),
            "stop_of_first_segment is only meaningful for discontiguous runs"
        );
        self.fragments
            .first()
            .map(|f| f.start())
            .unwrap_or(self.stop_arrow)
    }

    /// The start arrow of the run's last segment. Only meaningful when discontiguous.
    pub fn start_of_last_segment(&self) -> Arrow {
        debug_assert!(
            self.is_discontiguous(),
            "start_of_last_segment is only meaningful for discontiguous runs"
        );
        self.fragments
            .last()
            .map(|f| f.stop())
            .unwrap_or(self.start_arrow)
    }

    /// Sum of the lengths of this run's segments (excludes the gaps).
    pub fn total_length(&self) -> u32 {
        let span = self.stop_arrow - self.start_arrow;
        let gaps: u32 = self.fragments.iter().map(Segment::len).sum();
        span - gaps
    }
}

/// Cheap outer-bound check: true if the runs' overall spans could possibly interact.
#[inline]
pub fn any_interaction(a: &SegmentRun, b: &SegmentRun) -> bool {
    a.start_arrow < b.stop_arrow && b.start_arrow < a.stop_arrow
}

/// Full segment-by-segment overlap check, short-circuiting on the first hit.
/// Both segment lists are sorted, so this is a linear merge rather than a
/// nested all-pairs scan.
pub fn are_overlapping(a: &SegmentRun, b: &SegmentRun) -> bool {
    if !any_interaction(a, b) {
        return false;
    }
    let segs_a = a.segments();
    let segs_b = b.segments();
    let (mut i, mut j) = (0, 0);
    while i < segs_a.len() && j < segs_b.len() {
        let sa = &segs_a[i];
        let sb = &segs_b[j];
        if crate::segment::are_overlapping(sa, sb) {
            return true;
        }
        if sa.stop() <= sb.stop() {
            i += 1;
        } else {
            j += 1;
        }
    }
    false
}
