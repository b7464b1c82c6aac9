//! Единый тип ошибок публичного API.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettleError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("no CSV files in input directory: {}", .0.display())]
    NoInput(PathBuf),

    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("qty must be > 0 (order_id {0})")]
    QtyRange(String),

    #[error("unit_price must be > 0 (order_id {0})")]
    PriceRange(String),

    #[error("fee_rate must be within [0, 1] (order_id {0})")]
    FeeRateRange(String),

    #[error("cannot represent amount as a number cell: {0}")]
    Amount(String),
}

pub type Result<T> = std::result::Result<T, SettleError>;
