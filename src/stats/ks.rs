use crate::stats::special::kolmogorov_sf;
use serde::Serialize;

/// Outcome of a two sample Kolmogorov-Smirnov test.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KsResult {
    /// Largest distance between the two empirical distribution functions.
    pub statistic: f64,
    /// Two sided p-value.
    pub p_value: f64,
}

fn sorted(data: &[f64]) -> Vec<f64> {
    let mut v = data.to_vec();
    v.sort_by(|a, b| a.total_cmp(b));
    v
}

/// Two sided, two sample Kolmogorov-Smirnov test.
///
/// The statistic is `sup |F1(x) - F2(x)|` over the pooled sample. The
/// p-value uses the asymptotic Kolmogorov distribution with Stephens'
/// small sample correction. A NaN in either sample makes both fields NaN.
///
/// * `data1` - First sample.
/// * `data2` - Second sample.
pub fn ks_2samp(data1: &[f64], data2: &[f64]) -> KsResult {
    if data1.is_empty() || data2.is_empty() || data1.iter().chain(data2).any(|x| x.is_nan()) {
        return KsResult {
            statistic: f64::NAN,
            p_value: f64::NAN,
        };
    }
    let a = sorted(data1);
    let b = sorted(data2);
    let (n1, n2) = (a.len(), b.len());

    let (mut i, mut j) = (0, 0);
    let mut d: f64 = 0.0;
    // Walk the pooled order statistics, stepping over ties on both sides at once.
    while i < n1 && j < n2 {
        let x = a[i].min(b[j]);
        while i < n1 && a[i] <= x {
            i += 1;
        }
        while j < n2 && b[j] <= x {
            j += 1;
        }
        d = d.max((i as f64 / n1 as f64 - j as f64 / n2 as f64).abs());
    }

    let en = ((n1 * n2) as f64 / (n1 + n2) as f64).sqrt();
    let p_value = kolmogorov_sf((en + 0.12 + 0.11 / en) * d);
    KsResult { statistic: d, p_value }
}
