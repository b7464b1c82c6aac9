//! Доменные модели: заказ, рассчитанная выплата, агрегаты.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Заказ после очистки: qty > 0, unit_price > 0, fee_rate в [0, 1],
/// order_id уникален в пределах прогона.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub store_name: String,
    pub menu_name: String,
    pub qty: Decimal,
    pub unit_price: Decimal,
    pub fee_rate: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SettledOrder {
    pub record: OrderRecord,
    /// qty × unit_price, без округления.
    pub gross_amount: Decimal,
    /// Комиссия, округлённая до целых.
    pub fee_amount: Decimal,
    /// gross_amount − fee_amount.
    pub settlement_amount: Decimal,
}

/// Итог по магазину.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreSummary {
    pub store_name: String,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub settlement_amount: Decimal,
}

/// Выручка за день.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DateSummary {
    pub order_date: NaiveDate,
    pub gross_amount: Decimal,
}
