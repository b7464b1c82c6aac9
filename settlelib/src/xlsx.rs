//! Запись отчёта в XLSX (rust_xlsxwriter) с оформлением:
//! жирная заливка заголовка, авто-ширина колонок, формат `#,##0` для денег.

use crate::error::{Result, SettleError};
use crate::report::{Cell, ReportSink, Sheet};
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook};
use std::path::{Path, PathBuf};

const HEADER_FILL: Color = Color::RGB(0xDDDDDD);
const WIDTH_PADDING: usize = 2;

pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl ReportSink for XlsxSink {
    fn write(&mut self, sheets: &[Sheet]) -> Result<()> {
        let mut workbook = Workbook::new();
        let header = Format::new()
            .set_bold()
            .set_background_color(HEADER_FILL)
            .set_align(FormatAlign::Center);
        let money = Format::new().set_num_format("#,##0");

        for sheet in sheets {
            let ws = workbook.add_worksheet();
            ws.set_name(&sheet.name)?;

            for (c, name) in sheet.columns.iter().enumerate() {
                ws.write_string_with_format(0, c as u16, name, &header)?;
            }

            let is_money: Vec<bool> = sheet
                .columns
                .iter()
                .map(|c| sheet.money_columns.iter().any(|m| m == c))
                .collect();

            for (r, row) in sheet.rows.iter().enumerate() {
                let r = (r + 1) as u32;
                for (c, cell) in row.iter().enumerate() {
                    let col = c as u16;
                    match cell {
                        Cell::Text(s) => {
                            ws.write_string(r, col, s)?;
                        }
                        Cell::Date(d) => {
                            ws.write_string(r, col, d.format("%Y-%m-%d").to_string())?;
                        }
                        Cell::Number(n) => {
                            // денежная ячейка с подменённым значением хуже
                            // сорванной записи
                            let v = n
                                .to_f64()
                                .ok_or_else(|| SettleError::Amount(n.to_string()))?;
                            if is_money[c] {
                                ws.write_number_with_format(r, col, v, &money)?;
                            } else {
                                ws.write_number(r, col, v)?;
                            }
                        }
                        Cell::Empty => {}
                    }
                }
            }

            // ширина = максимум по заголовку и значениям + отступ
            for (c, name) in sheet.columns.iter().enumerate() {
                let mut width = name.chars().count();
                for row in &sheet.rows {
                    if let Some(cell) = row.get(c) {
                        width = width.max(cell.display().chars().count());
                    }
                }
                ws.set_column_width(c as u16, (width + WIDTH_PADDING) as f64)?;
            }
        }

        workbook.save(&self.path)?;
        Ok(())
    }
}
