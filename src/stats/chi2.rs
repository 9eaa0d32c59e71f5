use crate::stats::special::chi2_sf;
use serde::Serialize;

/// Outcome of a chi-squared contingency test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chi2Result {
    /// The test statistic.
    pub statistic: f64,
    /// The p-value of the test.
    pub p_value: f64,
    /// Degrees of freedom.
    pub dof: usize,
    /// Expected frequencies, based on the marginal sums of the table.
    pub expected: Vec<Vec<f64>>,
}

/// Chi-squared test of independence on a contingency table.
///
/// `observed` is given row by row and every row must have the same length.
/// With a single degree of freedom and `correction` set, Yates' continuity
/// correction moves each observed count by at most 0.5 towards its expected
/// value. Cells with zero expected frequency do not contribute.
///
/// * `observed` - The contingency table.
/// * `correction` - Whether to apply Yates' correction when dof is 1.
pub fn chi2_contingency(observed: &[Vec<f64>], correction: bool) -> Chi2Result {
    let n_rows = observed.len();
    let n_cols = observed.first().map_or(0, |r| r.len());

    let row_sums: Vec<f64> = observed.iter().map(|r| r.iter().sum()).collect();
    let col_sums: Vec<f64> = (0..n_cols).map(|j| observed.iter().map(|r| r[j]).sum()).collect();
    let total: f64 = row_sums.iter().sum();

    let expected: Vec<Vec<f64>> = row_sums
        .iter()
        .map(|r| {
            col_sums
                .iter()
                .map(|c| if total > 0.0 { r * c / total } else { 0.0 })
                .collect()
        })
        .collect();

    let dof = n_rows.saturating_sub(1) * n_cols.saturating_sub(1);
    if dof == 0 {
        return Chi2Result {
            statistic: 0.0,
            p_value: 1.0,
            dof,
            expected,
        };
    }

    let yates = correction && dof == 1;
    let mut statistic = 0.0;
    for (obs_row, exp_row) in observed.iter().zip(&expected) {
        for (&o, &e) in obs_row.iter().zip(exp_row) {
            if e <= 0.0 {
                continue;
            }
            let o = if yates {
                let diff = e - o;
                o + diff.signum() * diff.abs().min(0.5)
            } else {
                o
            };
            statistic += (o - e).powi(2) / e;
        }
    }

    Chi2Result {
        statistic,
        p_value: chi2_sf(statistic, dof),
        dof,
        expected,
    }
}
