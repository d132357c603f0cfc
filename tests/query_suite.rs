use chrono::NaiveDate;
use pocketlog::errors::LedgerError;
use pocketlog::ledger::{
    filter_transactions, search_transactions, LedgerView, SearchCriteria, Transaction,
};
use rust_decimal_macros::dec;

mod common;

// Chronological file order, so reverse file order doubles as reverse
// chronological order. The last line is dated after the fixed "today".
const LEDGER_FIXTURE: &str = "\
2024-01-05|09:00|january groceries|Market|-82.50
2024-02-01|08:00|february rent|Homes LLC|-1200.00
2024-02-10|12:15|refund|Market|40.00
2024-03-01|09:30|march salary|Acme Corp|2500.00
2024-03-10|18:45|dinner out|Bistro|-64.20
2024-03-14|10:00|gift|Aunt May|0.00
2024-03-15|08:30|coffee|Bistro|-4.80
2024-03-20|09:00|future booking|Travel|-300.00
";

fn load_fixture() -> Vec<Transaction> {
    let store = common::seeded_store(LEDGER_FIXTURE);
    let outcome = store.load().expect("load fixture");
    assert!(outcome.warnings.is_empty(), "fixture should be clean");
    outcome.transactions
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

#[test]
fn all_view_returns_every_record_newest_first() {
    let transactions = load_fixture();
    let rows = filter_transactions(&transactions, &LedgerView::All, today()).expect("filter");

    assert_eq!(rows.len(), 8);
    assert_eq!(rows[0].date(), "2024-03-20");
    assert_eq!(rows[7].date(), "2024-01-05");
}

#[test]
fn deposits_view_holds_strictly_positive_amounts() {
    let transactions = load_fixture();
    let rows = filter_transactions(&transactions, &LedgerView::Deposits, today()).expect("filter");

    let amounts: Vec<_> = rows.iter().map(|txn| txn.amount()).collect();
    assert_eq!(amounts, vec![dec!(2500.00), dec!(40.00)]);
}

#[test]
fn payments_view_holds_strictly_negative_amounts() {
    let transactions = load_fixture();
    let rows = filter_transactions(&transactions, &LedgerView::Payments, today()).expect("filter");

    let amounts: Vec<_> = rows.iter().map(|txn| txn.amount()).collect();
    assert_eq!(
        amounts,
        vec![
            dec!(-300.00),
            dec!(-4.80),
            dec!(-64.20),
            dec!(-1200.00),
            dec!(-82.50)
        ]
    );
}

#[test]
fn zero_amount_belongs_to_neither_deposits_nor_payments() {
    let transactions = load_fixture();

    let all = filter_transactions(&transactions, &LedgerView::All, today()).expect("filter");
    assert!(all.iter().any(|txn| txn.description() == "gift"));

    for view in [LedgerView::Deposits, LedgerView::Payments] {
        let rows = filter_transactions(&transactions, &view, today()).expect("filter");
        assert!(rows.iter().all(|txn| txn.description() != "gift"));
    }
}

#[test]
fn vendor_view_matches_whole_names_case_insensitively() {
    let transactions = load_fixture();

    let rows = filter_transactions(
        &transactions,
        &LedgerView::Vendor("market".into()),
        today(),
    )
    .expect("filter");
    assert_eq!(rows.len(), 2);

    let partial = filter_transactions(
        &transactions,
        &LedgerView::Vendor("Mark".into()),
        today(),
    )
    .expect("filter");
    assert!(partial.is_empty(), "vendor view must not match substrings");
}

#[test]
fn month_to_date_covers_the_first_of_the_month_through_today() {
    let transactions = load_fixture();
    let rows =
        filter_transactions(&transactions, &LedgerView::MonthToDate, today()).expect("filter");

    let dates: Vec<_> = rows.iter().map(|txn| txn.date()).collect();
    assert_eq!(
        dates,
        ["2024-03-15", "2024-03-14", "2024-03-10", "2024-03-01"]
    );
}

#[test]
fn month_to_date_fails_when_a_stored_date_cannot_be_read() {
    let store = common::seeded_store(
        "botched|10:00|typo month|Shop|-5.00\n2024-03-02|10:00|fine|Shop|-5.00\n",
    );
    let transactions = store.load().expect("load").transactions;

    let err = filter_transactions(&transactions, &LedgerView::MonthToDate, today()).unwrap_err();
    match err {
        LedgerError::DataCorrupted(value) => assert_eq!(value, "botched"),
        other => panic!("expected DataCorrupted, got {other:?}"),
    }
}

#[test]
fn blank_search_still_applies_the_default_amount_bounds() {
    // With every field left blank the amount range falls back to
    // [0, Decimal::MAX], so payments disappear from the result.
    let transactions = load_fixture();
    let rows = search_transactions(&transactions, &SearchCriteria::default()).expect("search");

    let descriptions: Vec<_> = rows.iter().map(|txn| txn.description()).collect();
    assert_eq!(descriptions, ["gift", "march salary", "refund"]);
    assert!(rows.iter().all(|txn| txn.amount() >= dec!(0)));
}

#[test]
fn search_applies_every_criterion_together() {
    let transactions = load_fixture();
    let criteria = SearchCriteria {
        vendor: Some("bistro".into()),
        description: Some("dinner".into()),
        min_amount: Some(dec!(-100.00)),
        max_amount: Some(dec!(-1.00)),
        start_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")),
        end_date: Some(NaiveDate::from_ymd_opt(2024, 3, 31).expect("valid date")),
    };

    let rows = search_transactions(&transactions, &criteria).expect("search");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description(), "dinner out");
}

#[test]
fn search_description_match_is_a_case_insensitive_substring() {
    let transactions = load_fixture();
    let criteria = SearchCriteria {
        description: Some("SALARY".into()),
        ..SearchCriteria::default()
    };

    let rows = search_transactions(&transactions, &criteria).expect("search");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description(), "march salary");
}

#[test]
fn search_date_bounds_are_inclusive_on_both_ends() {
    let transactions = load_fixture();
    let criteria = SearchCriteria {
        min_amount: Some(dec!(-10000.00)),
        start_date: Some(NaiveDate::from_ymd_opt(2024, 2, 1).expect("valid date")),
        end_date: Some(NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date")),
        ..SearchCriteria::default()
    };

    let rows = search_transactions(&transactions, &criteria).expect("search");
    let dates: Vec<_> = rows.iter().map(|txn| txn.date()).collect();
    assert_eq!(dates, ["2024-03-01", "2024-02-10", "2024-02-01"]);
}

#[test]
fn search_accepts_a_start_date_without_an_end_date() {
    let transactions = load_fixture();
    let criteria = SearchCriteria {
        min_amount: Some(dec!(-10000.00)),
        start_date: Some(NaiveDate::from_ymd_opt(2024, 3, 14).expect("valid date")),
        ..SearchCriteria::default()
    };

    let rows = search_transactions(&transactions, &criteria).expect("search");
    let dates: Vec<_> = rows.iter().map(|txn| txn.date()).collect();
    assert_eq!(dates, ["2024-03-20", "2024-03-15", "2024-03-14"]);
}

#[test]
fn undated_search_tolerates_lines_a_dated_search_rejects() {
    let store = common::seeded_store(
        "botched|10:00|mystery credit|Shop|10.00\n2024-03-02|10:00|fine|Shop|25.00\n",
    );
    let transactions = store.load().expect("load").transactions;

    let undated = search_transactions(&transactions, &SearchCriteria::default()).expect("search");
    assert_eq!(undated.len(), 2);

    let dated = SearchCriteria {
        start_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date")),
        ..SearchCriteria::default()
    };
    let err = search_transactions(&transactions, &dated).unwrap_err();
    assert!(matches!(err, LedgerError::DataCorrupted(_)));
}

#[test]
fn queries_leave_the_loaded_set_untouched() {
    let transactions = load_fixture();
    let before = transactions.clone();

    filter_transactions(&transactions, &LedgerView::All, today()).expect("filter");
    filter_transactions(&transactions, &LedgerView::MonthToDate, today()).expect("filter");
    search_transactions(&transactions, &SearchCriteria::default()).expect("search");

    assert_eq!(transactions, before);
}
