//! End-to-end resolution scenarios over small, hand-built hit lists.

use resolve_hits::prelude::*;

fn contiguous(start: u32, stop: u32, score: f32, label_idx: u32) -> Hit {
    Hit::contiguous(Arrow::before_residue(start), Arrow::before_residue(stop), score, label_idx).unwrap()
}

fn discontiguous(segs: &[(u32, u32)], score: f32, label_idx: u32) -> Hit {
    let pairs: Vec<(Arrow, Arrow)> = segs
        .iter()
        .map(|&(s, e)| (Arrow::before_residue(s), Arrow::before_residue(e)))
        .collect();
    Hit::from_segments(&pairs, score, label_idx).unwrap()
}

#[test]
fn scenario_empty() {
    let hits = HitList::new(vec![], vec![]).unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 0.0);
    assert!(arch.hit_indices().is_empty());
}

#[test]
fn scenario_single_hit() {
    let hits = HitList::new(vec![contiguous(10, 20, 1.0, 0)], vec!["h0".into()]).unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 1.0);
    assert_eq!(arch.hit_indices(), &[0]);
}

#[test]
fn scenario_two_disjoint_hits() {
    let hits = HitList::new(
        vec![contiguous(1, 10, 2.0, 0), contiguous(20, 30, 3.0, 1)],
        vec!["h0".into(), "h1".into()],
    )
    .unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 5.0);
    assert_eq!(arch.hit_indices().len(), 2);
}

#[test]
fn scenario_two_overlapping_contiguous_higher_score_wins() {
    let hits = HitList::new(
        vec![contiguous(1, 20, 5.0, 0), contiguous(10, 30, 7.0, 1)],
        vec!["h0".into(), "h1".into()],
    )
    .unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 7.0);
    let chosen_labels: Vec<&str> = arch.hit_indices().iter().map(|&i| hits.label(hits.get(i).label_idx())).collect();
    assert_eq!(chosen_labels, vec!["h1"]);
}

#[test]
fn scenario_overlapping_pair_plus_compatible_third() {
    let hits = HitList::new(
        vec![
            contiguous(1, 20, 5.0, 0),
            contiguous(10, 30, 7.0, 1),
            contiguous(35, 40, 1.0, 2),
        ],
        vec!["h0".into(), "h1".into(), "h2".into()],
    )
    .unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 8.0);

    // Moving h2 to (25,40) still doesn't overlap the winning h1, so the answer is unchanged.
    let hits_b = HitList::new(
        vec![
            contiguous(1, 20, 5.0, 0),
            contiguous(10, 30, 7.0, 1),
            contiguous(25, 40, 1.0, 2),
        ],
        vec!["h0".into(), "h1".into(), "h2".into()],
    )
    .unwrap();
    let arch_b = resolve(&hits_b);
    assert_eq!(arch_b.score(), 8.0);
}

#[test]
fn scenario_discontiguous_interleaving_beats_single_covering_hit() {
    let hits = HitList::new(
        vec![
            discontiguous(&[(10, 25), (60, 75)], 10.0, 0),
            contiguous(30, 55, 4.0, 1),
            contiguous(10, 75, 12.0, 2),
        ],
        vec!["h0".into(), "h1".into(), "h2".into()],
    )
    .unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 14.0);
    let chosen_labels: Vec<&str> = arch
        .hit_indices()
        .iter()
        .map(|&i| hits.label(hits.get(i).label_idx()))
        .collect();
    assert_eq!(chosen_labels.len(), 2);
    assert!(chosen_labels.contains(&"h0"));
    assert!(chosen_labels.contains(&"h1"));
}

#[test]
fn scenario_mutually_right_interspersing_pair_uses_memo_cache() {
    let hits = HitList::new(
        vec![
            discontiguous(&[(1, 30), (60, 90)], 8.0, 0),
            discontiguous(&[(15, 45), (75, 105)], 9.0, 1),
            contiguous(50, 55, 1.0, 2),
        ],
        vec!["h0".into(), "h1".into(), "h2".into()],
    )
    .unwrap();
    let arch = resolve(&hits);
    assert_eq!(arch.score(), 10.0);
    let chosen_labels: Vec<&str> = arch
        .hit_indices()
        .iter()
        .map(|&i| hits.label(hits.get(i).label_idx()))
        .collect();
    assert!(chosen_labels.contains(&"h1"));
    assert!(chosen_labels.contains(&"h2"));
    assert!(!chosen_labels.contains(&"h0"));
}

#[test]
fn scenario_non_positive_score_rejected_at_construction() {
    assert!(Hit::contiguous(Arrow::before_residue(1), Arrow::before_residue(10), 0.0, 0).is_err());
    assert!(Hit::contiguous(Arrow::before_residue(1), Arrow::before_residue(10), -2.0, 0).is_err());
}

#[test]
fn scenario_invalid_segment_geometry_rejected() {
    assert!(Hit::contiguous(Arrow::before_residue(10), Arrow::before_residue(10), 1.0, 0).is_err());
    assert!(Hit::from_segments(
        &[
            (Arrow::before_residue(1), Arrow::before_residue(10)),
            (Arrow::before_residue(5), Arrow::before_residue(20)),
        ],
        1.0,
        0
    )
    .is_err());
}
