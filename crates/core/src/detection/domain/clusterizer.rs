use crate::shared::rect::Rect;

/// Merges a bunch of rectangles into a smaller bunch of bigger rectangles
/// using a gated Manhattan gap distance.
///
/// Greedy nearest-pair agglomerative merge: each input rectangle starts in
/// its own partition; the closest pair of partitions within
/// `distance_threshold` is merged and the scan restarts, until no pair
/// qualifies. Merged-away partitions are tombstoned (emptied, never
/// removed) so indices stay stable for the lifetime of one call.
///
/// O(n^3) worst case, which is fine for the tens of detections a vision
/// API returns per image.
pub fn clusterize(rects: &[Rect], distance_threshold: i32) -> Vec<Rect> {
    let mut partitions: Vec<Vec<Rect>> = rects.iter().map(|r| vec![*r]).collect();

    loop {
        let mut min_dist: Option<i32> = None;
        let mut min_pair = (0usize, 0usize);

        // Nested pair scan, j always above i. A pair at distance exactly 0
        // ends the scan early: no smaller distance is possible. Ties keep
        // the first pair encountered in scan order.
        'scan: for i in 0..partitions.len() {
            for j in (i + 1)..partitions.len() {
                let dist = distance(&partitions[i], &partitions[j]);
                if dist <= distance_threshold && min_dist.map_or(true, |d| dist < d) {
                    min_dist = Some(dist);
                    min_pair = (i, j);
                    if dist == 0 {
                        break 'scan;
                    }
                }
            }
        }

        match min_dist {
            Some(_) => {
                let (i, j) = min_pair;
                let absorbed = std::mem::take(&mut partitions[j]);
                partitions[i].extend(absorbed);
            }
            None => break,
        }
    }

    partitions
        .iter()
        .filter_map(|p| Rect::union_of(p))
        .collect()
}

/// Distance between two partition groups: bounding-box both groups, then
/// sum the per-axis gaps. An axis contributes 0 when the boxes overlap or
/// touch on it, otherwise the smaller of the two possible edge gaps.
/// Empty groups (tombstones) are infinitely far away.
fn distance(p1: &[Rect], p2: &[Rect]) -> i32 {
    let (a, b) = match (Rect::union_of(p1), Rect::union_of(p2)) {
        (Some(a), Some(b)) => (a, b),
        _ => return i32::MAX,
    };

    axis_gap(a.x, a.right(), b.x, b.right()) + axis_gap(a.y, a.bottom(), b.y, b.bottom())
}

/// Gap between two 1-D extents; 0 when any endpoint of one lies within the
/// other.
fn axis_gap(a_lo: i32, a_hi: i32, b_lo: i32, b_hi: i32) -> i32 {
    if in_range(a_lo, b_lo, b_hi)
        || in_range(a_hi, b_lo, b_hi)
        || in_range(b_lo, a_lo, a_hi)
        || in_range(b_hi, a_lo, a_hi)
    {
        return 0;
    }
    (a_lo - b_hi).abs().min((b_lo - a_hi).abs())
}

fn in_range(value: i32, lower: i32, upper: i32) -> bool {
    value >= lower && value <= upper
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rect(x: i32, y: i32, w: i32, h: i32) -> Rect {
        Rect::new(x, y, w, h)
    }

    #[test]
    fn test_empty_input_yields_empty_output() {
        assert!(clusterize(&[], 10).is_empty());
    }

    #[test]
    fn test_single_rect_is_unchanged() {
        let r = rect(5, 7, 20, 10);
        assert_eq!(clusterize(&[r], 0), vec![r]);
        assert_eq!(clusterize(&[r], 1000), vec![r]);
    }

    #[test]
    fn test_overlapping_rects_merge_at_zero_threshold() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        assert_eq!(clusterize(&[a, b], 0), vec![rect(0, 0, 15, 15)]);
    }

    #[test]
    fn test_touching_rects_merge_at_zero_threshold() {
        let a = rect(0, 0, 10, 10);
        let b = rect(10, 0, 10, 10);
        assert_eq!(clusterize(&[a, b], 0), vec![rect(0, 0, 20, 10)]);
    }

    #[test]
    fn test_gap_beyond_threshold_stays_separate() {
        let a = rect(0, 0, 10, 10);
        let b = rect(15, 0, 10, 10); // x gap of 5
        let result = clusterize(&[a, b], 4);
        assert_eq!(result, vec![a, b]);
    }

    #[test]
    fn test_gap_within_threshold_merges() {
        let a = rect(0, 0, 10, 10);
        let b = rect(15, 0, 10, 10); // x gap of 5
        assert_eq!(clusterize(&[a, b], 5), vec![rect(0, 0, 25, 10)]);
    }

    #[test]
    fn test_diagonal_gap_is_sum_of_axis_gaps() {
        // x gap 3 and y gap 4: Manhattan distance 7
        let a = rect(0, 0, 10, 10);
        let b = rect(13, 14, 10, 10);
        assert_eq!(clusterize(&[a, b], 6), vec![a, b]);
        assert_eq!(clusterize(&[a, b], 7), vec![rect(0, 0, 23, 24)]);
    }

    #[test]
    fn test_negative_threshold_merges_nothing() {
        let a = rect(0, 0, 10, 10);
        let b = rect(5, 5, 10, 10);
        assert_eq!(clusterize(&[a, b], -1), vec![a, b]);
    }

    #[test]
    fn test_transitive_chain_collapses() {
        // a-b and b-c are each within range; a-c only via the growing group
        let a = rect(0, 0, 10, 10);
        let b = rect(12, 0, 10, 10);
        let c = rect(24, 0, 10, 10);
        assert_eq!(clusterize(&[a, b, c], 2), vec![rect(0, 0, 34, 10)]);
    }

    #[test]
    fn test_two_distant_clusters_remain_distinct() {
        let rects = [
            rect(0, 0, 10, 10),
            rect(11, 0, 10, 10),
            rect(500, 500, 10, 10),
            rect(511, 500, 10, 10),
        ];
        let result = clusterize(&rects, 2);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&rect(0, 0, 21, 10)));
        assert!(result.contains(&rect(500, 500, 21, 10)));
    }

    #[test]
    fn test_every_input_lands_in_exactly_one_output() {
        let rects = [
            rect(10, 10, 5, 5),
            rect(16, 10, 5, 5),
            rect(100, 100, 5, 5),
            rect(40, 40, 8, 8),
        ];
        let merged = clusterize(&rects, 3);
        for r in &rects {
            let containing = merged
                .iter()
                .filter(|m| {
                    r.x >= m.x && r.y >= m.y && r.right() <= m.right() && r.bottom() <= m.bottom()
                })
                .count();
            assert_eq!(containing, 1, "{r:?} must land in exactly one output");
        }
    }

    #[test]
    fn test_idempotent_at_fixed_threshold() {
        let rects = [
            rect(10, 10, 5, 5),
            rect(16, 10, 5, 5),
            rect(30, 10, 5, 5),
            rect(100, 100, 5, 5),
        ];
        for threshold in [0, 1, 2, 5, 20] {
            let once = clusterize(&rects, threshold);
            let twice = clusterize(&once, threshold);
            assert_eq!(twice, once, "threshold {threshold}");
        }
    }

    #[test]
    fn test_contained_rect_contributes_nothing_to_bounds() {
        let outer = rect(0, 0, 100, 100);
        let inner = rect(20, 20, 10, 10);
        assert_eq!(clusterize(&[outer, inner], 0), vec![outer]);
    }

    #[test]
    fn test_output_preserves_partition_creation_order() {
        // No merges: output order equals input order.
        let a = rect(100, 0, 10, 10);
        let b = rect(0, 0, 10, 10);
        let c = rect(200, 0, 10, 10);
        assert_eq!(clusterize(&[a, b, c], 0), vec![a, b, c]);
    }

    #[test]
    fn test_first_minimal_pair_in_scan_order_wins() {
        // Both (0,1) and (2,3) are at distance 1; (0,1) is scanned first
        // and absorbs into partition 0, so the merged pair leads the output.
        let rects = [
            rect(0, 0, 10, 10),
            rect(11, 0, 10, 10),
            rect(100, 0, 10, 10),
            rect(111, 0, 10, 10),
        ];
        let result = clusterize(&rects, 1);
        assert_eq!(result, vec![rect(0, 0, 21, 10), rect(100, 0, 21, 10)]);
    }

    #[rstest]
    #[case::same_extent(0, 10, 0, 10, 0)]
    #[case::nested(0, 100, 20, 30, 0)]
    #[case::touching(0, 10, 10, 20, 0)]
    #[case::gap_right(0, 10, 15, 20, 5)]
    #[case::gap_left(15, 20, 0, 10, 5)]
    fn test_axis_gap(
        #[case] a_lo: i32,
        #[case] a_hi: i32,
        #[case] b_lo: i32,
        #[case] b_hi: i32,
        #[case] expected: i32,
    ) {
        assert_eq!(axis_gap(a_lo, a_hi, b_lo, b_hi), expected);
    }

    #[test]
    fn test_distance_to_empty_group_is_max() {
        let group = [rect(0, 0, 10, 10)];
        assert_eq!(distance(&group, &[]), i32::MAX);
        assert_eq!(distance(&[], &group), i32::MAX);
    }
}
