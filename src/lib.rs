#![allow(clippy::too_many_arguments)]
#![allow(clippy::should_implement_trait)]

//! resolve-hits: picks the maximum-score non-overlapping architecture from a
//! list of scored, possibly-discontiguous sequence hits.
//!
//! # Example
//!
//! ```
//! use resolve_hits::arrow::Arrow;
//! use resolve_hits::hit::Hit;
//! use resolve_hits::hit_list::HitList;
//! use resolve_hits::resolver;
//!
//! let h0 = Hit::contiguous(Arrow::before_residue(1), Arrow::before_residue(20), 5.0, 0).unwrap();
//! let h1 = Hit::contiguous(Arrow::before_residue(10), Arrow::before_residue(30), 7.0, 1).unwrap();
//! let hits = HitList::new(vec![h0, h1], vec!["dom_a".into(), "dom_b".into()]).unwrap();
//!
//! let architecture = resolver::resolve(&hits);
//! assert_eq!(architecture.score(), 7.0);
//! ```

pub mod arrow;
pub mod batch;
pub mod error;
pub mod hit;
pub mod hit_list;
pub mod resolver;
pub mod segment;
pub mod segment_run;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arrow::Arrow;
    pub use crate::batch::{group_hits_by_query, resolve_all, resolve_all_parallel, HitSpec};
    pub use crate::error::{ResolveError, Result};
    pub use crate::hit::Hit;
    pub use crate::hit_list::HitList;
    pub use crate::resolver::{resolve, ScoredArchitecture};
    pub use crate::segment::Segment;
    pub use crate::segment_run::SegmentRun;
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn empty_scenario() {
        let hits = HitList::new(vec![], vec![]).unwrap();
        let arch = resolve(&hits);
        assert_eq!(arch.score(), 0.0);
        assert!(arch.hit_indices().is_empty());
    }

    #[test]
    fn single_hit_scenario() {
        let h0 = Hit::contiguous(Arrow::before_residue(10), Arrow::before_residue(20), 1.0, 0).unwrap();
        let hits = HitList::new(vec![h0], vec!["dom".into()]).unwrap();
        let arch = resolve(&hits);
        assert_eq!(arch.score(), 1.0);
        assert_eq!(arch.hit_indices(), &[0]);
    }

    #[test]
    fn two_disjoint_hits_scenario() {
        let h0 = Hit::contiguous(Arrow::before_residue(1), Arrow::before_residue(10), 2.0, 0).unwrap();
        let h1 = Hit::contiguous(Arrow::before_residue(20), Arrow::before_residue(30), 3.0, 1).unwrap();
        let hits = HitList::new(vec![h0, h1], vec!["a".into(), "b".into()]).unwrap();
        let arch = resolve(&hits);
        assert_eq!(arch.score(), 5.0);
    }

    #[test]
    fn batch_resolves_independent_queries() {
        let specs = vec![
            HitSpec {
                query_id: "q1".into(),
                label: "dom_a".into(),
                score: 4.0,
                segments: vec![(1, 10)],
            },
            HitSpec {
                query_id: "q2".into(),
                label: "dom_b".into(),
                score: 2.0,
                segments: vec![(1, 10)],
            },
        ];
        let grouped = group_hits_by_query(specs).unwrap();
        let results = resolve_all(&grouped);
        assert_eq!(results.len(), 2);
        let total: f32 = results.iter().map(|(_, a)| a.score()).sum();
        assert_eq!(total, 6.0);
    }

    #[test]
    fn invalid_geometry_is_rejected() {
        let err = Segment::new(Arrow::before_residue(5), Arrow::before_residue(5));
        assert!(err.is_err());
    }
}
