use ndarray::{ArrayView2, Axis};

use crate::types::{Department, DepartmentScoreMap};

/// Sum node outputs column-wise, giving one raw total per scored class.
pub fn aggregate(out: ArrayView2<'_, f32>) -> Vec<f64> {
    out.sum_axis(Axis(0)).iter().map(|&v| v as f64).collect()
}

/// Rescale so the minimum maps to 0 and the maximum to 1.
///
/// When every value is equal the range is empty, and each entry instead gets
/// an equal share `1 / len`.
pub fn min_max_normalize(raw: &[f64]) -> Vec<f64> {
    if raw.is_empty() { return Vec::new() }

    let min = raw.iter().copied().fold(f64::INFINITY, f64::min);
    let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range == 0.0 || !range.is_finite() {
        let share = 1.0 / raw.len() as f64;
        return vec![share; raw.len()];
    }

    raw.iter().map(|&v| (v - min) / range).collect()
}

/// Aggregate and normalize scorer output into a department score map,
/// with columns read in `departments` order.
pub fn department_scores(out: ArrayView2<'_, f32>, departments: impl IntoIterator<Item = Department>) -> DepartmentScoreMap {
    let normalized = min_max_normalize(&aggregate(out));
    departments.into_iter()
        .zip(normalized)
        .map(|(dept, score)| (dept.to_str(), score))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn aggregate_sums_columns() {
        let out = array![[0.5f32, 0.25], [0.5, 0.5], [1.0, 0.0]];
        assert_eq!(aggregate(out.view()), vec![2.0, 0.75]);
    }

    #[test]
    fn normalized_range_is_unit() {
        let norm = min_max_normalize(&[3.0, 1.0, 2.0, 5.0]);
        assert_eq!(norm, vec![0.5, 0.0, 0.25, 1.0]);
    }

    #[test]
    fn equal_values_share_evenly() {
        let norm = min_max_normalize(&[0.8; 7]);
        for v in norm { assert_abs_diff_eq!(v, 1.0 / 7.0) }
        assert_eq!(min_max_normalize(&[]), Vec::<f64>::new());
        assert_eq!(min_max_normalize(&[4.2]), vec![1.0]);
    }

    #[test]
    fn department_scores_follow_column_order() {
        let out = array![[0.1f32, 0.9, 0.5]];
        let map = department_scores(out.view(), [Department::Roads, Department::Water, Department::Construction]);
        assert_eq!(map.iter().map(|(n, _)| n).collect::<Vec<_>>(), vec!["Roads", "Water", "Construction"]);
        assert_eq!(map.get("Roads"), Some(0.0));
        assert_eq!(map.get("Water"), Some(1.0));
        assert_abs_diff_eq!(map.get("Construction").unwrap(), 0.5, epsilon = 1e-6);
    }
}
