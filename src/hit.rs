//! Hit: a scored segment run with an opaque label index.

use crate::arrow::Arrow;
use crate::error::{ResolveError, Result};
use crate::segment_run::{self, SegmentRun};

/// A candidate domain hit: a footprint on the sequence, a strictly-positive
/// score, and an opaque index into an external label table.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    score: f32,
    label_idx: u32,
    run: SegmentRun,
}

impl Hit {
    /// A hit with a single contiguous segment.
    pub fn contiguous(start: Arrow, stop: Arrow, score: f32, label_idx: u32) -> Result<Self> {
        check_score(score)?;
        let run = SegmentRun::contiguous(start, stop)?;
        Ok(Hit {
            score,
            label_idx,
            run,
        })
    }

    /// A hit built from an ordered, non-overlapping list of segment arrow pairs.
    pub fn from_segments(
        segments: &[(Arrow, Arrow)],
        score: f32,
        label_idx: u32,
    ) -> Result<Self> {
        check_score(score)?;
        let run = SegmentRun::from_segments(segments)?;
        Ok(Hit {
            score,
            label_idx,
            run,
        })
    }

    #[inline]
    pub fn score(&self) -> f32 {
        self.score
    }

    #[inline]
    pub fn label_idx(&self) -> u32 {
        self.label_idx
    }

    #[inline]
    pub fn run(&self) -> &SegmentRun {
        &self.run
    }

    #[inline]
    pub fn start_arrow(&self) -> Arrow {
        self.run.start_arrow()
    }

    #[inline]
    pub fn stop_arrow(&self) -> Arrow {
        self.run.stop_arrow()
    }

    #[inline]
    pub fn is_discontiguous(&self) -> bool {
        self.run.is_discontiguous()
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.run.num_segments()
    }
}

fn check_score(score: f32) -> Result<()> {
    if !(score > 0.0) {
        return Err(ResolveError::NonPositiveScore { score });
    }
    Ok(())
}

/// Cheap outer-bound interaction check between two hits' spans.
#[inline]
pub fn any_interaction(a: &Hit, b: &Hit) -> bool {
    segment_run::any_interaction(&a.run, &b.run)
}

/// Full segment-by-segment overlap check between two hits.
#[inline]
pub fn hits_overlap(a: &Hit, b: &Hit) -> bool {
    segment_run::are_overlapping(&a.run, &b.run)
}

/// True if `hit` overlaps any hit in `mask`; short-circuits on the first hit found.
#[inline]
pub fn hit_overlaps_any(hit: &Hit, mask: &[&Hit]) -> bool {
    mask.iter().any(|m| hits_overlap(hit, m))
}

/// True iff both hits are discontiguous, `a` starts and stops strictly before
/// `b` starts and stops respectively, `b`'s start precedes `a`'s stop, and the
/// two hits do not overlap. This is what lets a later discontiguous hit's
/// segments interleave an earlier one's gaps without conflict.
pub fn second_right_intersperses_first(a: &Hit, b: &Hit) -> bool {
    if !a.is_discontiguous() || !b.is_discontiguous() {
        return false;
    }
    let ends_are_ok =
        a.start_arrow() < b.start_arrow() && a.stop_arrow() < b.stop_arrow() && b.start_arrow() < a.stop_arrow();
    if !ends_are_ok {
        return false;
    }
    !hits_overlap(a, b)
}
