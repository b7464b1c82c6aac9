//! Проверка схемы, приведение типов, фильтрация и дедупликация.

use crate::error::{Result, SettleError};
use crate::load::RawTable;
use crate::model::OrderRecord;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashSet;

pub const REQUIRED_COLUMNS: [&str; 7] = [
    "order_id",
    "order_date",
    "store_name",
    "menu_name",
    "qty",
    "unit_price",
    "fee_rate",
];

/// Строка после очистки: типизированный заказ плюс ячейки «лишних» колонок,
/// которые проносятся в лист raw_data как есть.
#[derive(Debug, Clone)]
pub struct CleanRow {
    pub record: OrderRecord,
    pub extras: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct CleanTable {
    pub extra_columns: Vec<String>,
    pub rows: Vec<CleanRow>,
}

/// Порядок фиксированный: схема → приведение типов и отсев пустых →
/// проверка диапазонов (фатальная) → дедупликация по order_id.
pub fn clean(table: &RawTable) -> Result<CleanTable> {
    let cols = check_columns(table)?;
    let mut out = coerce_rows(table, &cols);
    check_ranges(&out.rows)?;
    dedup(&mut out);
    Ok(out)
}

/// Позиции обязательных колонок плюс индексы остальных.
struct Columns {
    order_id: usize,
    order_date: usize,
    store_name: usize,
    menu_name: usize,
    qty: usize,
    unit_price: usize,
    fee_rate: usize,
    extras: Vec<usize>,
}

fn check_columns(table: &RawTable) -> Result<Columns> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&c| table.column_index(c).is_none())
        .map(|&c| c.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SettleError::MissingColumns(missing));
    }

    let idx = |name: &str| table.column_index(name).unwrap_or_default();
    let extras = (0..table.columns.len())
        .filter(|&i| !REQUIRED_COLUMNS.contains(&table.columns[i].as_str()))
        .collect();

    Ok(Columns {
        order_id: idx("order_id"),
        order_date: idx("order_date"),
        store_name: idx("store_name"),
        menu_name: idx("menu_name"),
        qty: idx("qty"),
        unit_price: idx("unit_price"),
        fee_rate: idx("fee_rate"),
        extras,
    })
}

fn coerce_rows(table: &RawTable, cols: &Columns) -> CleanTable {
    let before = table.rows.len();
    let mut rows = Vec::with_capacity(before);

    for cells in &table.rows {
        let get = |i: usize| cells.get(i).and_then(|c| c.as_deref());

        let order_id = text_cell(get(cols.order_id));
        let order_date = parse_date(get(cols.order_date));
        let qty = parse_number(get(cols.qty));
        let unit_price = parse_number(get(cols.unit_price));
        let fee_rate = parse_number(get(cols.fee_rate));

        // критичное поле не распарсилось — строка отбрасывается
        let (Some(order_id), Some(order_date), Some(qty), Some(unit_price), Some(fee_rate)) =
            (order_id, order_date, qty, unit_price, fee_rate)
        else {
            continue;
        };

        let record = OrderRecord {
            order_id,
            order_date,
            store_name: get(cols.store_name).map(|s| s.trim().to_string()).unwrap_or_default(),
            menu_name: get(cols.menu_name).map(|s| s.trim().to_string()).unwrap_or_default(),
            qty,
            unit_price,
            fee_rate,
        };
        let extras = cols
            .extras
            .iter()
            .map(|&i| cells.get(i).cloned().flatten())
            .collect();
        rows.push(CleanRow { record, extras });
    }

    log::info!("dropped {} row(s) with missing or unparsable fields", before - rows.len());

    CleanTable {
        extra_columns: cols.extras.iter().map(|&i| table.columns[i].clone()).collect(),
        rows,
    }
}

/// Некорректная денежная строка отравляет весь прогон: частичный отчёт
/// не формируется.
fn check_ranges(rows: &[CleanRow]) -> Result<()> {
    for row in rows {
        let r = &row.record;
        if r.qty <= Decimal::ZERO {
            return Err(SettleError::QtyRange(r.order_id.clone()));
        }
        if r.unit_price <= Decimal::ZERO {
            return Err(SettleError::PriceRange(r.order_id.clone()));
        }
        if r.fee_rate < Decimal::ZERO || r.fee_rate > Decimal::ONE {
            return Err(SettleError::FeeRateRange(r.order_id.clone()));
        }
    }
    Ok(())
}

/// Повтор order_id — остаётся первое вхождение в текущем порядке строк.
fn dedup(table: &mut CleanTable) {
    let before = table.rows.len();
    let mut seen = HashSet::new();
    table.rows.retain(|row| seen.insert(row.record.order_id.clone()));
    log::info!("removed {} duplicate order(s)", before - table.rows.len());
}

fn text_cell(cell: Option<&str>) -> Option<String> {
    let v = cell?.trim();
    if v.is_empty() {
        None
    } else {
        Some(v.to_string())
    }
}

fn parse_date(cell: Option<&str>) -> Option<NaiveDate> {
    let v = cell?.trim();
    NaiveDate::parse_from_str(v, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(v, "%Y/%m/%d"))
        .ok()
}

fn parse_number(cell: Option<&str>) -> Option<Decimal> {
    cell?.trim().parse::<Decimal>().ok()
}
