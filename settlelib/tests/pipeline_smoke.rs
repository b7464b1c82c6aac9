use rust_decimal::Decimal;
use settlelib::{
    aggregate::{by_date, by_store},
    clean::clean,
    error::SettleError,
    load::load_dir,
    report::{build_sheets, Cell, ReportSink, Sheet},
    settle::settle,
    xlsx::XlsxSink,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, body: &[u8]) {
    fs::write(dir.join(name), body).expect("write input file");
}

#[test]
fn two_files_dedup_and_aggregate() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        dir.path(),
        "a.csv",
        b"order_id,order_date,store_name,menu_name,qty,unit_price,fee_rate,channel\n\
          A-1,2025-07-01,Pizza Roma,Margherita,2,9000,0.12,app\n\
          A-2,2025-07-01,Pizza Roma,Diavola,1,11000,0.12,web\n",
    );
    // A-2 повторяется: должна остаться строка из первого файла
    write_file(
        dir.path(),
        "b.csv",
        b"order_id,order_date,store_name,menu_name,qty,unit_price,fee_rate\n\
          A-2,2025-07-02,Pizza Roma,Diavola,5,11000,0.12\n\
          B-1,2025-07-02,Sushi Bar,Set L,1,25000,0.08\n",
    );

    let raw = load_dir(dir.path()).expect("load");
    assert_eq!(raw.rows.len(), 4);
    assert!(raw.columns.contains(&"channel".to_string()));

    let cleaned = clean(&raw).expect("clean");
    assert_eq!(cleaned.rows.len(), 3);
    assert_eq!(cleaned.rows[1].record.order_id, "A-2");
    assert_eq!(cleaned.rows[1].record.qty, Decimal::from(1));
    assert_eq!(cleaned.extra_columns, vec!["channel".to_string()]);

    let settled = settle(cleaned);
    assert_eq!(settled.rows[0].order.gross_amount, Decimal::from(18000));
    assert_eq!(settled.rows[0].order.fee_amount, Decimal::from(2160));
    assert_eq!(settled.rows[0].order.settlement_amount, Decimal::from(15840));

    let stores = by_store(&settled);
    assert_eq!(stores.len(), 2);
    assert_eq!(stores[0].store_name, "Pizza Roma");
    assert_eq!(stores[0].gross_amount, Decimal::from(29000));
    assert_eq!(stores[0].fee_amount, Decimal::from(3480));
    assert_eq!(stores[0].settlement_amount, Decimal::from(25520));
    assert_eq!(stores[1].store_name, "Sushi Bar");
    assert_eq!(stores[1].settlement_amount, Decimal::from(23000));

    // суммы по магазинам сходятся с общим итогом
    let grand: Decimal = settled.rows.iter().map(|r| r.order.settlement_amount).sum();
    let by_stores: Decimal = stores.iter().map(|s| s.settlement_amount).sum();
    assert_eq!(grand, by_stores);

    let dates = by_date(&settled);
    assert_eq!(dates.len(), 2);
    assert_eq!(dates[0].gross_amount, Decimal::from(29000));
    assert_eq!(dates[1].gross_amount, Decimal::from(25000));
}

#[test]
fn padded_headers_and_cells_are_trimmed() {
    let dir = TempDir::new().expect("tempdir");
    // пробелы вокруг заголовка и значений не должны терять колонку
    write_file(
        dir.path(),
        "padded.csv",
        b"order_id,order_date,store_name,menu_name, qty ,unit_price,fee_rate\n\
          E-1,2025-07-06,Pizza Roma,Margherita, 2 ,9000,0.12\n",
    );

    let raw = load_dir(dir.path()).expect("load");
    assert!(raw.columns.contains(&"qty".to_string()));

    let cleaned = clean(&raw).expect("clean");
    assert_eq!(cleaned.rows.len(), 1);
    assert_eq!(cleaned.rows[0].record.qty, Decimal::from(2));
}

#[test]
fn unreadable_file_is_skipped() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        dir.path(),
        "good.csv",
        b"order_id,order_date,store_name,menu_name,qty,unit_price,fee_rate\n\
          C-1,2025-07-03,Pizza Roma,Margherita,1,9000,0.12\n",
    );
    // не-UTF8 мусор: файл пропускается, прогон продолжается
    write_file(dir.path(), "broken.csv", b"\xff\xfe\x00\x01garbage");

    let raw = load_dir(dir.path()).expect("load");
    let cleaned = clean(&raw).expect("clean");
    assert_eq!(cleaned.rows.len(), 1);
    assert_eq!(cleaned.rows[0].record.order_id, "C-1");
}

#[test]
fn empty_dir_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_dir(dir.path()).expect_err("must fail");
    assert!(matches!(err, SettleError::NoInput(_)));
}

#[test]
fn missing_dir_is_fatal() {
    let dir = TempDir::new().expect("tempdir");
    let err = load_dir(&dir.path().join("nope")).expect_err("must fail");
    assert!(matches!(err, SettleError::NoInput(_)));
}

#[test]
fn report_is_written() {
    let dir = TempDir::new().expect("tempdir");
    write_file(
        dir.path(),
        "orders.csv",
        b"order_id,order_date,store_name,menu_name,qty,unit_price,fee_rate\n\
          D-1,2025-07-04,Pizza Roma,Margherita,2,9000,0.12\n\
          D-2,2025-07-04,Sushi Bar,Set S,1,15000,0.08\n\
          D-3,2025-07-05,Pizza Roma,Diavola,1,11000,0.12\n",
    );

    let raw = load_dir(dir.path()).expect("load");
    let cleaned = clean(&raw).expect("clean");
    let settled = settle(cleaned);
    let stores = by_store(&settled);
    let dates = by_date(&settled);

    let sheets = build_sheets(&settled, &stores, &dates);
    assert_eq!(sheets.len(), 3);
    assert_eq!(sheets[0].name, "raw_data");
    assert_eq!(sheets[1].name, "by_store");
    assert_eq!(sheets[2].name, "by_date");
    assert_eq!(sheets[1].rows.len(), 2);
    assert_eq!(sheets[2].rows.len(), 2);

    let out = dir.path().join("settlement_report.xlsx");
    XlsxSink::new(&out).write(&sheets).expect("write xlsx");
    let meta = fs::metadata(&out).expect("report file");
    assert!(meta.len() > 0);
}

#[test]
fn extreme_amounts_are_written_without_substitution() {
    let dir = TempDir::new().expect("tempdir");
    let sheet = Sheet {
        name: "by_store".into(),
        columns: vec!["store_name".into(), "gross_amount".into()],
        money_columns: vec!["gross_amount".into()],
        rows: vec![vec![
            Cell::Text("Pizza Roma".into()),
            Cell::Number(Decimal::MAX),
        ]],
    };

    let out = dir.path().join("large.xlsx");
    XlsxSink::new(&out)
        .write(std::slice::from_ref(&sheet))
        .expect("write xlsx");
    assert!(fs::metadata(&out).expect("report file").len() > 0);
}
