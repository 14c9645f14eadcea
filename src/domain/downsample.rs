// Point-reduction algorithms for chart rendering
use crate::domain::point::Point;

/// Which reduction algorithm a render pass should apply.
///
/// `Stride` keeps every step-th point; `Lttb` (Largest Triangle Three
/// Buckets) keeps the points that best preserve the visual shape of the
/// series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownsampleStrategy {
    Stride,
    Lttb,
}

/// Reduce `points` to roughly `limit` elements using `strategy`.
///
/// Sequences already within the limit are returned unchanged.
pub fn downsample(points: &[Point], limit: usize, strategy: DownsampleStrategy) -> Vec<Point> {
    match strategy {
        DownsampleStrategy::Stride => downsample_stride(points, limit),
        DownsampleStrategy::Lttb => downsample_lttb(points, limit),
    }
}

/// Stride sampling: keep indices 0, step, 2*step, ... with
/// `step = ceil(len / max_points)`, always retaining the final element.
pub fn downsample_stride(points: &[Point], max_points: usize) -> Vec<Point> {
    let n = points.len();
    if n <= max_points || max_points == 0 {
        return points.to_vec();
    }

    let step = n.div_ceil(max_points);
    let mut sampled: Vec<Point> = points.iter().step_by(step).cloned().collect();

    // The stride only lands on the last element when its index divides evenly.
    if (n - 1) % step != 0 {
        sampled.push(points[n - 1].clone());
    }

    sampled
}

/// Largest-Triangle-Three-Buckets downsampling.
///
/// Partitions the interior points into `threshold - 2` buckets and keeps,
/// per bucket, the point forming the largest triangle with the previously
/// selected point and the next bucket's average. First and last points are
/// always kept; output length is exactly `threshold` when the input is
/// longer than it.
pub fn downsample_lttb(points: &[Point], threshold: usize) -> Vec<Point> {
    let n = points.len();
    if n <= threshold || threshold < 3 {
        return points.to_vec();
    }

    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0].clone());

    let bucket_size = (n - 2) as f64 / (threshold - 2) as f64;
    let mut a_idx = 0usize;

    for i in 0..(threshold - 2) {
        let bucket_start = (i as f64 * bucket_size).floor() as usize + 1;
        let bucket_end = (((i + 1) as f64 * bucket_size).floor() as usize + 1).min(n - 1);

        // Arithmetic mean of the next bucket is the third triangle vertex.
        let next_start = bucket_end;
        let next_end = (((i + 2) as f64 * bucket_size).floor() as usize + 1).min(n);

        let (avg_x, avg_y) = if next_end > next_start {
            let count = (next_end - next_start) as f64;
            let mut sum_x = 0.0;
            let mut sum_y = 0.0;
            for point in &points[next_start..next_end] {
                sum_x += point.timestamp as f64;
                sum_y += point.value;
            }
            (sum_x / count, sum_y / count)
        } else {
            (points[n - 1].timestamp as f64, points[n - 1].value)
        };

        let a_x = points[a_idx].timestamp as f64;
        let a_y = points[a_idx].value;

        // Strict `>` keeps the first candidate on equal areas.
        let mut max_area = -1.0f64;
        let mut max_idx = bucket_start;

        for (j, point) in points.iter().enumerate().take(bucket_end).skip(bucket_start) {
            let b_x = point.timestamp as f64;
            let b_y = point.value;
            let area = ((a_x - avg_x) * (b_y - a_y) - (a_x - b_x) * (avg_y - a_y)).abs();
            if area > max_area {
                max_area = area;
                max_idx = j;
            }
        }

        sampled.push(points[max_idx].clone());
        a_idx = max_idx;
    }

    sampled.push(points[n - 1].clone());
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<Point> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| Point::new(i as i64, v, "test"))
            .collect()
    }

    #[test]
    fn stride_returns_input_when_within_limit() {
        let points = series(&[1.0, 2.0, 3.0]);
        assert_eq!(downsample_stride(&points, 3), points);
        assert_eq!(downsample_stride(&points, 10), points);
    }

    #[test]
    fn stride_keeps_first_and_last() {
        let points = series(&[0.0, 1.0, 2.0, 3.0, 4.0]);
        let sampled = downsample_stride(&points, 2);

        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
        // step = ceil(5/2) = 3 -> indices 0, 3, plus the forced last element
        assert_eq!(
            sampled.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
            vec![0, 3, 4]
        );
    }

    #[test]
    fn stride_does_not_duplicate_last_element() {
        // step = ceil(10/4) = 3 lands exactly on index 9
        let points = series(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let sampled = downsample_stride(&points, 4);
        assert_eq!(
            sampled.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
            vec![0, 3, 6, 9]
        );
    }

    #[test]
    fn lttb_returns_input_when_within_threshold() {
        let points = series(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(downsample_lttb(&points, 4), points);
        assert_eq!(downsample_lttb(&points, 10), points);
    }

    #[test]
    fn lttb_output_length_is_exactly_threshold() {
        let points: Vec<Point> = (0..100)
            .map(|i| Point::new(i, (i as f64 * 0.3).sin() * 50.0 + 50.0, "wave"))
            .collect();
        let sampled = downsample_lttb(&points, 20);

        assert_eq!(sampled.len(), 20);
        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
    }

    #[test]
    fn lttb_keeps_extreme_points() {
        // A flat series with one spike: the spike survives reduction.
        let mut values = vec![10.0; 50];
        values[25] = 90.0;
        let points = series(&values);

        let sampled = downsample_lttb(&points, 10);
        assert!(sampled.iter().any(|p| p.value == 90.0));
    }

    #[test]
    fn lttb_tie_break_prefers_first_candidate() {
        // Bucket [2, 4) has two candidates with equal triangle areas against
        // a = point 1 and the next-bucket average (point 4); the first one
        // must win under strict `>`.
        let points = vec![
            Point::new(0, 10.0, "t"),
            Point::new(1, 10.0, "t"),
            Point::new(2, 20.0, "t"),
            Point::new(3, 0.0, "t"),
            Point::new(4, 10.0, "t"),
        ];
        let sampled = downsample_lttb(&points, 4);

        assert_eq!(
            sampled.iter().map(|p| p.timestamp).collect::<Vec<_>>(),
            vec![0, 1, 2, 4]
        );
    }

    #[test]
    fn strategy_dispatch_matches_direct_calls() {
        let points: Vec<Point> = (0..50).map(|i| Point::new(i, i as f64, "t")).collect();

        assert_eq!(
            downsample(&points, 10, DownsampleStrategy::Stride),
            downsample_stride(&points, 10)
        );
        assert_eq!(
            downsample(&points, 10, DownsampleStrategy::Lttb),
            downsample_lttb(&points, 10)
        );
    }
}
