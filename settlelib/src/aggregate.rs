//! Агрегация: group-and-sum по магазину и по дате,
//! с сохранением порядка первого появления ключа.

use crate::model::{DateSummary, StoreSummary};
use crate::settle::SettledTable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Одна строка на магазин: суммы gross/fee/settlement.
pub fn by_store(table: &SettledTable) -> Vec<StoreSummary> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut out: Vec<StoreSummary> = Vec::new();

    for row in &table.rows {
        let o = &row.order;
        let key = &o.record.store_name;
        let i = *index.entry(key.clone()).or_insert_with(|| {
            out.push(StoreSummary {
                store_name: key.clone(),
                gross_amount: Decimal::ZERO,
                fee_amount: Decimal::ZERO,
                settlement_amount: Decimal::ZERO,
            });
            out.len() - 1
        });
        let s = &mut out[i];
        s.gross_amount += o.gross_amount;
        s.fee_amount += o.fee_amount;
        s.settlement_amount += o.settlement_amount;
    }
    out
}

/// Одна строка на дату: только валовая выручка.
pub fn by_date(table: &SettledTable) -> Vec<DateSummary> {
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();
    let mut out: Vec<DateSummary> = Vec::new();

    for row in &table.rows {
        let o = &row.order;
        let key = o.record.order_date;
        let i = *index.entry(key).or_insert_with(|| {
            out.push(DateSummary {
                order_date: key,
                gross_amount: Decimal::ZERO,
            });
            out.len() - 1
        });
        out[i].gross_amount += o.gross_amount;
    }
    out
}
