use std::fs;

use dealership_ledger::{
    app::run_script,
    domain::{catalog::ItemId, ledger::Ledger},
    io::writer::write_items,
    worker::processor::Summary,
};

fn run_case(input_csv: &str) -> (Summary, String) {
    let mut ledger = Ledger::new();
    let mut out = Vec::<u8>::new();

    let summary = run_script(&mut ledger, input_csv.as_bytes(), &mut out, false)
        .expect("script should run to completion");

    let catalog = ledger.items().iter().enumerate();
    write_items(&mut out, catalog.map(|(i, item)| (ItemId(i), item)))
        .expect("failed to write output CSV");
    (summary, String::from_utf8(out).expect("output was not valid UTF-8"))
}

fn normalize_csv(s: &str) -> String {
    s.replace("\r\n", "\n")
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[test]
fn case1_sales_and_restock_move_stock() {
    let input = fs::read_to_string("tests/fixtures/case1_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case1_expected.csv").unwrap();

    let (summary, actual) = run_case(&input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
    assert_eq!(summary, Summary { applied: 7, rejected: 0 });
}

#[test]
fn case2_rejected_sales_leave_stock_untouched() {
    let input = fs::read_to_string("tests/fixtures/case2_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case2_expected.csv").unwrap();

    let (summary, actual) = run_case(&input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
    assert_eq!(summary, Summary { applied: 4, rejected: 3 });
}

#[test]
fn case3_reports_and_blocked_removal() {
    let input = fs::read_to_string("tests/fixtures/case3_input.csv").unwrap();
    let expected = fs::read_to_string("tests/fixtures/case3_expected.csv")
        .unwrap()
        .replace("DATE", &today());

    let (summary, actual) = run_case(&input);

    assert_eq!(normalize_csv(&actual), normalize_csv(&expected));
    assert_eq!(summary.rejected, 1);
}
