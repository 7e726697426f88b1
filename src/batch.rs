//! Orchestration across many queries: group a flat stream of hit specs by
//! query id, then resolve each query's hit list independently — sequentially
//! in sorted order for deterministic output, or in parallel since `resolve()`
//! shares no mutable state across queries (§5).

use crate::arrow::Arrow;
use crate::error::Result;
use crate::hit::Hit;
use crate::hit_list::HitList;
use crate::resolver::{self, ScoredArchitecture};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// One raw hit as read from an upstream producer, not yet validated.
pub struct HitSpec {
    pub query_id: String,
    pub label: String,
    pub score: f32,
    pub segments: Vec<(u32, u32)>,
}

/// Groups hits by query id, building one `HitList` per query. Each query's
/// hits are sorted into canonical order by `HitList::new`; this function only
/// does the grouping and per-hit construction.
pub fn group_hits_by_query(specs: Vec<HitSpec>) -> Result<BTreeMap<String, HitList>> {
    let mut by_query: BTreeMap<String, (Vec<Hit>, Vec<String>)> = BTreeMap::new();

    for spec in specs {
        let entry = by_query.entry(spec.query_id).or_default();
        let label_idx = entry.1.len() as u32;
        entry.1.push(spec.label);
        let arrows: Vec<(Arrow, Arrow)> = spec
            .segments
            .iter()
            .map(|&(s, e)| (Arrow::before_residue(s), Arrow::before_residue(e)))
            .collect();
        let hit = Hit::from_segments(&arrows, spec.score, label_idx)?;
        entry.0.push(hit);
    }

    by_query
        .into_iter()
        .map(|(query_id, (hits, labels))| HitList::new(hits, labels).map(|list| (query_id, list)))
        .collect()
}

/// Resolves every query's hit list, sequentially, in sorted query-id order.
pub fn resolve_all(queries: &BTreeMap<String, HitList>) -> Vec<(String, ScoredArchitecture)> {
    queries
        .iter()
        .map(|(query_id, hits)| {
            debug!(query_id, "resolving query");
            (query_id.clone(), resolver::resolve(hits))
        })
        .collect()
}

/// Like `resolve_all`, but resolves queries concurrently. Output order still
/// matches sorted query-id order; only the resolution work itself is parallel.
pub fn resolve_all_parallel(queries: &BTreeMap<String, HitList>) -> Vec<(String, ScoredArchitecture)> {
    let entries: Vec<(&String, &HitList)> = queries.iter().collect();
    entries
        .into_par_iter()
        .map(|(query_id, hits)| (query_id.clone(), resolver::resolve(hits)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(query_id: &str, label: &str, score: f32, segments: &[(u32, u32)]) -> HitSpec {
        HitSpec {
            query_id: query_id.to_string(),
            label: label.to_string(),
            score,
            segments: segments.to_vec(),
        }
    }

    #[test]
    fn groups_by_query_and_resolves_each() {
        let specs = vec![
            spec("q2", "b1", 1.0, &[(1, 10)]),
            spec("q1", "a1", 2.0, &[(1, 10)]),
            spec("q1", "a2", 3.0, &[(20, 30)]),
        ];
        let grouped = group_hits_by_query(specs).unwrap();
        assert_eq!(grouped.len(), 2);
        assert_eq!(grouped["q1"].len(), 2);
        assert_eq!(grouped["q2"].len(), 1);

        let resolved = resolve_all(&grouped);
        assert_eq!(resolved[0].0, "q1");
        assert_eq!(resolved[0].1.score(), 5.0);
        assert_eq!(resolved[1].0, "q2");
        assert_eq!(resolved[1].1.score(), 1.0);
    }

    #[test]
    fn parallel_matches_sequential() {
        let specs = vec![
            spec("q1", "a1", 2.0, &[(1, 10)]),
            spec("q2", "b1", 1.0, &[(1, 10)]),
        ];
        let grouped = group_hits_by_query(specs).unwrap();
        let seq = resolve_all(&grouped);
        let par = resolve_all_parallel(&grouped);
        assert_eq!(
            seq.iter().map(|(_, a)| a.score()).collect::<Vec<_>>(),
            par.iter().map(|(_, a)| a.score()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn rejects_non_positive_score_at_construction() {
        let specs = vec![spec("q1", "a1", 0.0, &[(1, 10)])];
        assert!(group_hits_by_query(specs).is_err());
    }
}
