// Golden tests: compare rendered plans for fixture manifests against expected files.

use std::path::PathBuf;

use pgnaming_core::diagnostics::warning;
use pgnaming_core::naming::Operation;
use pgnaming_core::render::{OutputFormat, render};
use pgnaming_core::{PlanError, PlanOptions, PlanResult, plan_paths};

/// Resolve a path relative to the workspace root (parent of core/).
fn workspace_path(rel: &str) -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir.parent().unwrap().join(rel)
}

fn run_golden_test(fixture: &str, golden: &str, opts: &PlanOptions) -> PlanResult {
    let fixture_path = workspace_path(fixture);
    let golden_path = workspace_path(golden);

    let expected = std::fs::read_to_string(&golden_path)
        .unwrap_or_else(|e| panic!("Failed to read golden {}: {e}", golden_path.display()));

    let result = plan_paths(&[fixture_path.clone()], opts)
        .unwrap_or_else(|e| panic!("Planning failed for {}: {e}", fixture_path.display()));
    let rendered = render(&result.plan, OutputFormat::Text).unwrap();

    assert_eq!(
        rendered,
        expected,
        "Output mismatch for {}\n\n--- Expected ---\n{expected}\n--- Got ---\n{rendered}",
        fixture_path.display(),
    );
    result
}

#[test]
fn test_golden_shop() {
    let result = run_golden_test(
        "tests/fixtures/shop.yaml",
        "tests/golden/shop.out.txt",
        &PlanOptions::default(),
    );

    let mut escaped: Vec<&str> = result
        .warnings
        .iter()
        .filter(|w| w.code == warning::RESERVED_ESCAPED)
        .filter_map(|w| w.object.as_deref())
        .collect();
    escaped.sort();
    assert_eq!(escaped, vec!["Order", "Promotion.default", "User"]);
    assert_eq!(result.warnings.len(), 3);
}

#[test]
fn test_golden_shop_strict_passes() {
    // reserved-word escapes are informational only
    run_golden_test(
        "tests/fixtures/shop.yaml",
        "tests/golden/shop.out.txt",
        &PlanOptions {
            strict: true,
            ..Default::default()
        },
    );
}

#[test]
fn test_golden_blog_directory() {
    let result = run_golden_test(
        "tests/fixtures/blog",
        "tests/golden/blog.out.txt",
        &PlanOptions::default(),
    );
    assert!(result.warnings.is_empty());
}

#[test]
fn test_too_long_join_column_aborts() {
    let fixture = workspace_path("tests/fixtures/too_long.yaml");
    let err = plan_paths(&[fixture], &PlanOptions::default()).unwrap_err();
    let err = match err {
        PlanError::IdentifierTooLong(e) => e,
        other => panic!("expected IdentifierTooLong, got {other}"),
    };
    assert_eq!(err.operation, Operation::JoinColumnName);
    assert_eq!(
        err.inputs,
        vec!["preferredShippingAddressForInternationalExpressDeliveries"]
    );
    assert_eq!(
        err.candidate,
        "preferred_shipping_address_for_international_express_deliveries_id"
    );
    assert_eq!(err.length, 66);
    assert_eq!(err.limit, 63);
}

#[test]
fn test_raised_limit_accepts_long_join_column() {
    let fixture = workspace_path("tests/fixtures/too_long.yaml");
    let opts = PlanOptions {
        max_identifier_length: 127,
        ..Default::default()
    };
    let result = plan_paths(&[fixture], &opts).unwrap();
    let customer = &result.plan.tables[0];
    assert_eq!(
        customer.columns[1].name,
        "preferred_shipping_address_for_international_express_deliveries_id"
    );
}
