// End-to-end pipeline tests: extracted text through parsing, budget
// loading, allocation, and comparison, using the shipped budget tables.
use std::fs;
use std::path::PathBuf;

use taxflow::calculator::{calculate_breakdown, BudgetStore};
use taxflow::error::TaxError;
use taxflow::parser;
use taxflow::types::{FicaContributions, TaxInput};

fn shipped_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data/budgets")
}

const SAMPLE_RETURN_TEXT: &str = "\
Form 1040 (2023)
Department of the Treasury - Internal Revenue Service
U.S. Individual Income Tax Return
Filing Status: Single
22 Subtract line 21 from line 18 . . . 12,345
23 Other taxes, including self-employment tax . . . 0
24 Total tax. Add lines 22 and 23 . . . . . . . 12,345
25 Federal income tax withheld . . . 13,000";

#[test]
fn shipped_tables_load_and_validate() {
    let mut store = BudgetStore::new(shipped_data_dir());
    for year in [2023u16, 2024] {
        let budget = store.load(year).unwrap_or_else(|e| panic!("{year}: {e}"));
        let pct_sum: f64 = budget.allocations.iter().map(|a| a.percentage).sum();
        assert!((pct_sum - 1.0).abs() < 1e-9, "{year} percentages sum to {pct_sum}");
        assert!(budget.fica_allocations.is_some());
        assert!(budget.national_averages.is_some());
    }
}

#[test]
fn text_to_breakdown_end_to_end() {
    let parsed = parser::parse_return_text(SAMPLE_RETURN_TEXT).unwrap();
    assert_eq!(parsed.year, 2023);
    assert_eq!(parsed.income_tax, 12_345);

    let mut store = BudgetStore::new(shipped_data_dir());
    let budget = store.load(parsed.year).unwrap();

    let input = TaxInput {
        income_tax: parsed.income_tax,
        year: parsed.year,
        fica: Some(FicaContributions {
            social_security: 6_200,
            medicare: 1_450,
        }),
    };
    let result = calculate_breakdown(&input, budget).unwrap();

    // Core invariants: exact sums at both levels.
    let category_sum: i64 = result.category_breakdown.iter().map(|c| c.amount).sum();
    assert_eq!(category_sum, 12_345);
    for category in &result.category_breakdown {
        if !category.subcategories.is_empty() {
            let sub_sum: i64 = category.subcategories.iter().map(|s| s.amount).sum();
            assert_eq!(sub_sum, category.amount, "drift in {}", category.name);
        }
    }

    assert_eq!(result.total_tax, 12_345 + 6_200 + 1_450);
    assert!(result.fica_breakdown.is_some());

    let cmp = result.national_comparison.expect("2023 table ships averages");
    assert_eq!(cmp.user_total, result.total_tax);
    assert!(cmp.percentile.is_some());
}

#[test]
fn breakdown_is_reproducible() {
    let mut store = BudgetStore::new(shipped_data_dir());
    let input = TaxInput {
        income_tax: 54_321,
        year: 2024,
        fica: None,
    };
    let budget = store.load(2024).unwrap();
    let first = calculate_breakdown(&input, budget).unwrap();
    let second = calculate_breakdown(&input, budget).unwrap();
    assert_eq!(first, second);

    // Byte-for-byte on the serialized payload as well.
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn percentile_bucket_against_shipped_thresholds() {
    // 2023 table: p50 is 7,300.
    let mut store = BudgetStore::new(shipped_data_dir());
    let budget = store.load(2023).unwrap();

    let at_p50 = calculate_breakdown(
        &TaxInput { income_tax: 7_300, year: 2023, fica: None },
        budget,
    )
    .unwrap();
    assert_eq!(at_p50.national_comparison.unwrap().percentile, Some(50));

    let above_p99 = calculate_breakdown(
        &TaxInput { income_tax: 500_000, year: 2023, fica: None },
        budget,
    )
    .unwrap();
    assert_eq!(above_p99.national_comparison.unwrap().percentile, Some(99));
}

#[test]
fn cache_is_per_year_and_clearable() {
    let dir = tempfile::tempdir().unwrap();
    let table = fs::read(shipped_data_dir().join("budget-2023.json")).unwrap();
    fs::write(dir.path().join("budget-2023.json"), &table).unwrap();

    let mut store = BudgetStore::new(dir.path());
    store.load(2023).unwrap();
    assert!(store.is_cached(2023));
    assert!(!store.is_cached(2024));

    // Cached year keeps working after the backing file is gone.
    fs::remove_file(dir.path().join("budget-2023.json")).unwrap();
    assert!(store.load(2023).is_ok());

    store.clear();
    assert!(matches!(
        store.load(2023),
        Err(TaxError::BudgetDataMissing { year: 2023, .. })
    ));
}

#[test]
fn failed_parse_is_an_error_not_a_guess() {
    // Withheld amount on line 25 must not be mistaken for total tax when
    // the total-tax line is missing entirely.
    let text = "Form 1040 (2023)\n25 Federal income tax withheld 13,000";
    assert!(matches!(
        parser::parse_return_text(text),
        Err(TaxError::AmountNotFound)
    ));
}
