mod common;

use std::fs;
use std::io::Write;

use report_core::errors::ExportError;
use report_core::report::export::write_csv;

use common::usd_scenario;

#[test]
fn csv_export_mirrors_transaction_fields() {
    let scenario = usd_scenario();
    let mut buffer = Vec::new();
    write_csv(
        &scenario.store.transactions,
        &scenario.store.accounts,
        &scenario.store.categories,
        &mut buffer,
    )
    .expect("export");
    let text = String::from_utf8(buffer).expect("utf8");
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some(
            "id,type,amount,currency,account,to_account,to_amount,category,title,description,\
             date_time,due_date"
        )
    );
    assert_eq!(lines.count(), 3);
    assert!(text.contains("income,100.00,USD,A"));
    assert!(text.contains("transfer,20.00,USD,A,B"));
    assert!(text.contains("Unspecified"));
}

#[test]
fn csv_export_writes_to_a_file() {
    let scenario = usd_scenario();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.csv");
    let file = fs::File::create(&path).expect("create");
    write_csv(
        &scenario.store.transactions,
        &scenario.store.accounts,
        &scenario.store.categories,
        file,
    )
    .expect("export");
    let written = fs::read_to_string(&path).expect("read back");
    assert_eq!(written.lines().count(), 4);
}

struct FailingSink;

impl Write for FailingSink {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "sink closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failure_surfaces_as_export_error() {
    let scenario = usd_scenario();
    let err = write_csv(
        &scenario.store.transactions,
        &scenario.store.accounts,
        &scenario.store.categories,
        FailingSink,
    )
    .expect_err("must fail");
    assert!(matches!(err, ExportError::Csv(_) | ExportError::Io(_)));
}
