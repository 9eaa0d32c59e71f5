//! Monitoring a Model
//! ==================
//! Freeze the training time distribution of a numeric feature and of the
//! predicted class, then check two batches of production data against it:
//! one that looks like training data and one where both have drifted.
//!
//! ```bash
//! cargo run --example monitor
//! ```

use driftcheck::{
    CategoricalConfig, CategoricalEvaluator, ContinuousConfig, ContinuousEvaluator, EvaluationReport, Evaluator,
};
use std::error::Error;

/// Deterministic, roughly bell shaped values around `center`.
fn feature(n: usize, center: f64, spread: f64) -> Vec<f64> {
    (0..n)
        .map(|i| {
            let u = (i as f64 * 0.618_033_988_75).fract();
            let v = (i as f64 * 0.414_213_562_37).fract();
            center + spread * (u + v - 1.0)
        })
        .collect()
}

fn classes(n: usize, weights: &[(&'static str, usize)]) -> Vec<&'static str> {
    let cycle: Vec<&'static str> = weights.iter().flat_map(|(c, w)| vec![*c; *w]).collect();
    (0..n).map(|i| cycle[i % cycle.len()]).collect()
}

fn print_report(title: &str, report: &EvaluationReport) {
    println!("{title}");
    for r in report {
        let observed = r.observed.map_or(String::from("-"), |v| format!("{v:.4}"));
        let status = if r.passed { "ok" } else { "DRIFT" };
        println!("  {:<10} {:<6} observed={}", r.name, status, observed);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    // ------------------------------------------------------------------
    // 1. Freeze reference statistics from training data
    // ------------------------------------------------------------------
    let train_feature = feature(5_000, 10.0, 4.0);
    let train_classes = classes(5_000, &[("low", 5), ("mid", 3), ("high", 2)]);

    let feature_eval = ContinuousEvaluator::new(&train_feature, ContinuousConfig::default().set_verbose(false))?;
    let class_eval = CategoricalEvaluator::new(
        &train_classes,
        CategoricalConfig::default().set_verbose(false).set_chi2_stat(10.0),
    )?;
    println!("Reference parameters:");
    for key in ["minimum", "maximum", "mean", "std"] {
        println!("  {key:<8} {:.4}", feature_eval.parameters().require_scalar(key)?);
    }

    // ------------------------------------------------------------------
    // 2. A production batch that matches training
    // ------------------------------------------------------------------
    let batch = feature(1_000, 10.0, 3.9);
    print_report("Stable feature:", &feature_eval.evaluate(&batch)?);
    let batch_classes = classes(1_000, &[("low", 5), ("mid", 3), ("high", 2)]);
    print_report("Stable classes:", &class_eval.evaluate(&batch_classes)?);

    // ------------------------------------------------------------------
    // 3. A production batch after drift
    // ------------------------------------------------------------------
    let drifted = feature(1_000, 13.0, 6.0);
    print_report("Drifted feature:", &feature_eval.evaluate(&drifted)?);
    let drifted_classes = classes(1_000, &[("low", 2), ("mid", 3), ("high", 5)]);
    print_report("Drifted classes:", &class_eval.evaluate(&drifted_classes)?);

    Ok(())
}
