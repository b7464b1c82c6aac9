//! settlelib — библиотека расчёта выплат по заказам доставки:
//! загрузка CSV-файлов, очистка данных, расчёт выплат, агрегация и XLSX-отчёт.

pub mod error;
pub mod model;
pub mod load;
pub mod clean;
pub mod settle;
pub mod aggregate;
pub mod report;
pub mod xlsx;
