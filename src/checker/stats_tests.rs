use super::*;

fn result(result_type: CheckResultType) -> AssetCheckResult {
    AssetCheckResult::new(result_type, "r")
}

#[test]
fn from_results_counts_each_type() {
    let results = vec![
        result(CheckResultType::Error),
        result(CheckResultType::Error),
        result(CheckResultType::Warning),
        result(CheckResultType::Exception),
        result(CheckResultType::AllPass),
    ];

    let stats = CheckResultStats::from_results(&results, 4);

    assert_eq!(stats.error, 2);
    assert_eq!(stats.warning, 1);
    assert_eq!(stats.exception, 1);
    assert_eq!(stats.all_pass, 1);
    assert_eq!(stats.not_important, 0);
    assert_eq!(stats.null_result, 4);
}

#[test]
fn total_excludes_null_results() {
    let results = vec![result(CheckResultType::Error), result(CheckResultType::NotImportant)];
    let stats = CheckResultStats::from_results(&results, 10);
    assert_eq!(stats.total(), 2);
}

#[test]
fn count_matches_fields() {
    let mut stats = CheckResultStats::default();
    stats.record(CheckResultType::NotImportant);
    stats.record(CheckResultType::NotImportant);
    assert_eq!(stats.count(CheckResultType::NotImportant), 2);
    assert_eq!(stats.count(CheckResultType::Error), 0);
}

#[test]
fn copies_are_independent() {
    let mut original = CheckResultStats::from_results(&[result(CheckResultType::Error)], 1);
    let copy = original;

    original.reset();

    assert_eq!(original, CheckResultStats::default());
    assert_eq!(copy.error, 1);
    assert_eq!(copy.null_result, 1);
}
