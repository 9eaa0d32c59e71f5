use super::*;
use crate::config::ConfigIO;
use crate::data::Matrix;

fn labels(parts: &[(&'static str, usize)]) -> Vec<&'static str> {
    parts.iter().flat_map(|(label, n)| vec![*label; *n]).collect()
}

fn reference() -> Vec<&'static str> {
    labels(&[("A", 10), ("B", 12), ("C", 8)])
}

fn quiet() -> CategoricalConfig {
    CategoricalConfig::default().set_verbose(false)
}

#[test]
fn test_default_parameters() {
    let evaluator = CategoricalEvaluator::with_defaults(&reference()).unwrap();
    assert_eq!(evaluator.assertions(), CategoricalAssertion::ALL);
    match evaluator.parameters().get("cat_exists") {
        Some(CategoricalParam::Categories(c)) => {
            assert_eq!(c.iter().copied().collect::<Vec<_>>(), vec!["A", "B", "C"])
        }
        other => panic!("unexpected parameter {:?}", other),
    }
    match evaluator.parameters().get("chi2_test") {
        Some(CategoricalParam::Chi2Test(binding)) => {
            assert_eq!(binding.categories(), &["A", "B", "C"]);
            assert_eq!(binding.reference_counts(), &[10.0, 12.0, 8.0]);
        }
        other => panic!("unexpected parameter {:?}", other),
    }
    assert_eq!(evaluator.parameters().require_scalar("chi2_stat"), Ok(0.2));
}

#[test]
fn test_exist_needs_exact_category_set() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();

    let missing = labels(&[("A", 10), ("B", 10)]);
    assert!(!evaluator.check_exist(&missing).unwrap().passed);

    let unexpected = labels(&[("A", 10), ("B", 10), ("C", 10), ("D", 10)]);
    assert!(!evaluator.check_exist(&unexpected).unwrap().passed);

    let exact = labels(&[("C", 1), ("A", 3), ("B", 2)]);
    let result = evaluator.check_exist(&exact).unwrap();
    assert!(result.passed);
    assert_eq!(result.observed, Some(3.0));
}

#[test]
fn test_reference_passes_every_check() {
    let evaluator = CategoricalEvaluator::with_defaults(&reference()).unwrap();
    let report = evaluator.evaluate_reference().unwrap();
    assert_eq!(report.to_pairs(), vec![("cat_exists", true), ("chi2_test", true)]);
    assert_eq!(report.get("chi2_test").unwrap().observed, Some(0.0));
}

#[test]
fn test_chi2_same_proportions_pass() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    let doubled = labels(&[("A", 20), ("B", 24), ("C", 16)]);
    let result = evaluator.check_chi2(&doubled).unwrap();
    assert!(result.passed);
    assert_eq!(result.observed, Some(0.0));
}

#[test]
fn test_chi2_threshold_tie_passes() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet().set_chi2_stat(0.0)).unwrap();
    let doubled = labels(&[("A", 20), ("B", 24), ("C", 16)]);
    let result = evaluator.check_chi2(&doubled).unwrap();
    assert_eq!(result.observed, Some(0.0));
    assert!(result.passed);
}

#[test]
fn test_update_param_rejects_nan() {
    let mut evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    let err = evaluator
        .update_param("chi2_stat", CategoricalParam::Scalar(f64::NAN))
        .unwrap_err();
    assert!(matches!(err, DriftError::InvalidParameter(k, _, _) if k == "chi2_stat"));
    assert_eq!(evaluator.parameters().require_scalar("chi2_stat"), Ok(0.2));
}

#[test]
fn test_chi2_shifted_proportions_fail() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    let shifted = labels(&[("A", 30), ("B", 5), ("C", 5)]);
    let report = evaluator.evaluate(&shifted).unwrap();
    assert_eq!(report.to_pairs(), vec![("cat_exists", true), ("chi2_test", false)]);
    assert!(report.get("chi2_test").unwrap().observed.unwrap() > 10.0);
}

#[test]
fn test_chi2_threshold_from_config() {
    let config = quiet().set_chi2_stat(1e6);
    let evaluator = CategoricalEvaluator::new(&reference(), config).unwrap();
    let shifted = labels(&[("A", 30), ("B", 5), ("C", 5)]);
    assert!(evaluator.evaluate(&shifted).unwrap().all_passed());
}

#[test]
fn test_chi2_needs_enough_reference_data() {
    let sparse = labels(&[("A", 10), ("B", 4)]);
    let err = CategoricalEvaluator::with_defaults(&sparse).unwrap_err();
    assert_eq!(
        err,
        DriftError::InsufficientData {
            test: "chi-squared contingency test",
            required: 5,
            found: 4
        }
    );
    // The existence check alone has no floor.
    let config = quiet().set_assertions("cat_exists");
    assert!(CategoricalEvaluator::new(&sparse, config).is_ok());
}

#[test]
fn test_chi2_needs_enough_comparison_data() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();

    let sparse = labels(&[("A", 10), ("B", 10), ("C", 3)]);
    let err = evaluator.check_chi2(&sparse).unwrap_err();
    assert!(matches!(err, DriftError::InsufficientData { found: 3, .. }));

    let missing = labels(&[("A", 10), ("B", 10)]);
    let err = evaluator.check_chi2(&missing).unwrap_err();
    assert!(matches!(err, DriftError::InsufficientData { found: 0, .. }));
}

#[test]
fn test_chi2_unseen_category() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    let unseen = labels(&[("A", 10), ("B", 10), ("C", 10), ("D", 10)]);
    let err = evaluator.check_chi2(&unseen).unwrap_err();
    assert!(matches!(err, DriftError::CategoryMismatch(label) if label.contains('D')));
    // An error aborts the evaluation, the evaluator stays usable.
    assert!(evaluator.evaluate(&unseen).is_err());
    assert!(evaluator.evaluate(&reference()).unwrap().all_passed());
}

#[test]
fn test_two_categories_use_yates_correction() {
    let reference = labels(&[("yes", 20), ("no", 20)]);
    let evaluator = CategoricalEvaluator::new(&reference, quiet().set_assertions("chi2_test")).unwrap();
    // Table [[20, 20], [25, 15]] has expected [[22.5, 17.5], [22.5, 17.5]], |o - e| = 2.5.
    let comparison = labels(&[("no", 25), ("yes", 15)]);
    let result = evaluator.check_chi2(&comparison).unwrap();
    let corrected = 4.0 * (2.0 * 2.0 / 22.5 + 2.0 * 2.0 / 17.5) / 2.0;
    assert!((result.observed.unwrap() - corrected).abs() < 1e-10);
    assert!(!result.passed);
}

#[test]
fn test_unknown_assertion() {
    let config = quiet().set_assertions(vec!["chi2_test", "exist"]);
    let err = CategoricalEvaluator::new(&reference(), config).unwrap_err();
    assert!(matches!(err, DriftError::UnknownAssertion(name, _) if name == "exist"));
}

#[test]
fn test_requested_order_is_kept() {
    let config = quiet().set_assertions(["chi2_test", "cat_exists"]);
    let evaluator = CategoricalEvaluator::new(&reference(), config).unwrap();
    let report = evaluator.evaluate_reference().unwrap();
    assert_eq!(report.to_pairs(), vec![("chi2_test", true), ("cat_exists", true)]);
}

#[test]
fn test_matrix_is_rejected() {
    let data = labels(&[("A", 10), ("B", 10)]);
    let matrix = Matrix::new(&data, 10, 2);
    let err = CategoricalEvaluator::with_defaults(&matrix).unwrap_err();
    assert_eq!(err, DriftError::Shape(2));

    let evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    assert_eq!(evaluator.evaluate(&matrix).unwrap_err(), DriftError::Shape(2));
}

#[test]
fn test_unbuilt_check_is_not_configured() {
    let evaluator = CategoricalEvaluator::new(&reference(), quiet().set_assertions("cat_exists")).unwrap();
    assert_eq!(
        evaluator.check_chi2(&reference()).unwrap_err(),
        DriftError::NotConfigured("chi2_test".to_string())
    );
}

#[test]
fn test_update_param() {
    let mut evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    assert_eq!(
        evaluator.update_param("minimum", CategoricalParam::Scalar(1.0)),
        Err(DriftError::UnknownParameter("minimum".to_string()))
    );

    let extended = labels(&[("A", 10), ("B", 10), ("C", 10), ("D", 10)]);
    assert!(!evaluator.check_exist(&extended).unwrap().passed);
    let categories: BTreeSet<&str> = ["A", "B", "C", "D"].into_iter().collect();
    evaluator
        .update_param("cat_exists", CategoricalParam::Categories(categories))
        .unwrap();
    assert!(evaluator.check_exist(&extended).unwrap().passed);

    let binding = Chi2Binding::from_counts(vec![("D", 10), ("A", 10), ("C", 10), ("B", 10)]).unwrap();
    assert_eq!(binding.categories(), &["A", "B", "C", "D"]);
    evaluator.update_param("chi2_test", CategoricalParam::Chi2Test(binding)).unwrap();
    assert!(evaluator.evaluate(&extended).unwrap().all_passed());
}

#[test]
fn test_update_param_checks_role() {
    let mut evaluator = CategoricalEvaluator::new(&reference(), quiet()).unwrap();
    let err = evaluator
        .update_param("cat_exists", CategoricalParam::Scalar(1.0))
        .unwrap_err();
    assert!(matches!(err, DriftError::ParameterType(k, _, _) if k == "cat_exists"));
    let err = evaluator
        .update_param("chi2_stat", CategoricalParam::Categories(BTreeSet::new()))
        .unwrap_err();
    assert!(matches!(err, DriftError::ParameterType(k, _, _) if k == "chi2_stat"));
}

#[test]
fn test_integer_labels() {
    let reference: Vec<i64> = (0..60).map(|i| i % 3).collect();
    let evaluator = CategoricalEvaluator::new(&reference, quiet()).unwrap();
    let comparison: Vec<i64> = (0..90).map(|i| i % 3).collect();
    assert!(evaluator.evaluate(&comparison).unwrap().all_passed());
    let collapsed: Vec<i64> = (0..90).map(|i| i % 2).collect();
    assert!(!evaluator.check_exist(&collapsed).unwrap().passed);
}

#[test]
fn test_string_labels_from_json_config() {
    let reference: Vec<String> = reference().into_iter().map(String::from).collect();
    let config = CategoricalConfig::from_json(r#"{"assertions": ["cat_exists"], "verbose": false}"#).unwrap();
    let evaluator: CategoricalEvaluator = CategoricalEvaluator::new(&reference, config).unwrap();
    assert_eq!(evaluator.assertions(), &[CategoricalAssertion::CatExists]);
    assert!(evaluator.evaluate_reference().unwrap().all_passed());
}

#[test]
fn test_registry() {
    let names: Vec<&str> = CategoricalEvaluator::<String>::registry()
        .iter()
        .map(|a| a.name())
        .collect();
    assert_eq!(names, vec!["cat_exists", "chi2_test"]);
    assert!("bogus".parse::<CategoricalAssertion>().is_err());
}
