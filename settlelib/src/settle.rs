//! Расчёт выплат: валовая сумма, комиссия, сумма к перечислению.

use crate::clean::{CleanRow, CleanTable};
use crate::model::SettledOrder;

#[derive(Debug, Clone)]
pub struct SettledRow {
    pub order: SettledOrder,
    pub extras: Vec<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct SettledTable {
    pub extra_columns: Vec<String>,
    pub rows: Vec<SettledRow>,
}

/// Чистое построчное преобразование, без ветвлений и ошибок:
/// входные данные уже проверены.
pub fn settle(table: CleanTable) -> SettledTable {
    SettledTable {
        extra_columns: table.extra_columns,
        rows: table.rows.into_iter().map(settle_row).collect(),
    }
}

/// Комиссия округляется до целых по банковскому правилу
/// (к ближайшему чётному), как это делает `Decimal::round`.
fn settle_row(row: CleanRow) -> SettledRow {
    let r = &row.record;
    let gross_amount = r.qty * r.unit_price;
    let fee_amount = (gross_amount * r.fee_rate).round();
    let settlement_amount = gross_amount - fee_amount;

    SettledRow {
        order: SettledOrder {
            record: row.record,
            gross_amount,
            fee_amount,
            settlement_amount,
        },
        extras: row.extras,
    }
}
