//! Табличная модель отчёта: листы, ячейки и трэйт приёмника.
//! Приёмник получает готовые таблицы и указания по оформлению,
//! о происхождении данных он ничего не знает.

use crate::clean::REQUIRED_COLUMNS;
use crate::error::Result;
use crate::model::{DateSummary, StoreSummary};
use crate::settle::SettledTable;
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Денежные колонки получают целочисленный формат с разделителем тысяч.
pub const MONEY_COLUMNS: [&str; 3] = ["gross_amount", "fee_amount", "settlement_amount"];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Date(NaiveDate),
    Number(Decimal),
    Empty,
}

impl Cell {
    /// Отображаемое значение — им же меряется ширина колонки.
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub columns: Vec<String>,
    pub money_columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

pub trait ReportSink {
    fn write(&mut self, sheets: &[Sheet]) -> Result<()>;
}

/// Три листа отчёта: raw_data, by_store, by_date.
pub fn build_sheets(
    table: &SettledTable,
    stores: &[StoreSummary],
    dates: &[DateSummary],
) -> Vec<Sheet> {
    vec![raw_sheet(table), store_sheet(stores), date_sheet(dates)]
}

/// Обязательные колонки, затем сквозные «лишние», затем три расчётные.
fn raw_sheet(table: &SettledTable) -> Sheet {
    let mut columns: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| (*c).to_string()).collect();
    columns.extend(table.extra_columns.iter().cloned());
    columns.extend(MONEY_COLUMNS.iter().map(|c| (*c).to_string()));

    let rows = table
        .rows
        .iter()
        .map(|row| {
            let r = &row.order.record;
            let mut cells = vec![
                Cell::Text(r.order_id.clone()),
                Cell::Date(r.order_date),
                Cell::Text(r.store_name.clone()),
                Cell::Text(r.menu_name.clone()),
                Cell::Number(r.qty),
                Cell::Number(r.unit_price),
                Cell::Number(r.fee_rate),
            ];
            cells.extend(row.extras.iter().map(|c| match c {
                Some(v) => Cell::Text(v.clone()),
                None => Cell::Empty,
            }));
            cells.push(Cell::Number(row.order.gross_amount));
            cells.push(Cell::Number(row.order.fee_amount));
            cells.push(Cell::Number(row.order.settlement_amount));
            cells
        })
        .collect();

    Sheet {
        name: "raw_data".into(),
        columns,
        money_columns: MONEY_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows,
    }
}

fn store_sheet(stores: &[StoreSummary]) -> Sheet {
    let rows = stores
        .iter()
        .map(|s| {
            vec![
                Cell::Text(s.store_name.clone()),
                Cell::Number(s.gross_amount),
                Cell::Number(s.fee_amount),
                Cell::Number(s.settlement_amount),
            ]
        })
        .collect();

    Sheet {
        name: "by_store".into(),
        columns: vec![
            "store_name".into(),
            "gross_amount".into(),
            "fee_amount".into(),
            "settlement_amount".into(),
        ],
        money_columns: MONEY_COLUMNS.iter().map(|c| (*c).to_string()).collect(),
        rows,
    }
}

fn date_sheet(dates: &[DateSummary]) -> Sheet {
    let rows = dates
        .iter()
        .map(|d| vec![Cell::Date(d.order_date), Cell::Number(d.gross_amount)])
        .collect();

    Sheet {
        name: "by_date".into(),
        columns: vec!["order_date".into(), "gross_amount".into()],
        money_columns: vec!["gross_amount".into()],
        rows,
    }
}
