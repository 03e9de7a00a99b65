use super::*;

struct NamedChecker(&'static str);

impl AssetChecker for NamedChecker {
    fn name(&self) -> &str {
        self.0
    }

    fn check_asset(&self, asset: &AssetRef) -> CheckOutcome {
        Ok(Some(
            AssetCheckResult::new(CheckResultType::NotImportant, asset.name()).with_asset(asset.clone()),
        ))
    }
}

#[test]
fn checker_ref_equality_is_identity() {
    let a = CheckerRef::new(NamedChecker("same"));
    let b = CheckerRef::new(NamedChecker("same"));
    let a_again = a.clone();

    assert_eq!(a, a_again);
    assert_ne!(a, b);
}

#[test]
fn checker_ref_derefs_to_checker() {
    let checker = CheckerRef::new(NamedChecker("naming"));
    let outcome = checker.check_asset(&AssetRef::project("Assets/a.png")).unwrap();

    assert_eq!(checker.name(), "naming");
    assert_eq!(outcome.map(|r| r.title), Some("a.png".to_string()));
}

#[test]
fn default_repair_is_unsupported() {
    let checker = CheckerRef::new(NamedChecker("naming"));
    let mut result = AssetCheckResult::new(CheckResultType::Error, "t");

    let err = checker.repair_asset(&mut result).unwrap_err();

    assert!(matches!(err, CheckerError::RepairUnsupported(name) if name == "naming"));
}

#[test]
fn checker_ref_debug_shows_name() {
    let checker = CheckerRef::new(NamedChecker("file-size"));
    assert_eq!(format!("{checker:?}"), "CheckerRef(\"file-size\")");
}

#[test]
fn repair_status_reports_completeness() {
    assert!(RepairStatus::AllRepaired.all_issues_repaired());
    assert!(!RepairStatus::Partial.all_issues_repaired());
}
