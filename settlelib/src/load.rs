//! Загрузка каталога CSV-файлов в одну объединённую таблицу.

use crate::error::{Result, SettleError};
use csv::{ReaderBuilder, Trim};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Объединённая «сырая» таблица: колонки в порядке первого появления,
/// ячейки, которых у файла не было, — `None`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

type FileRows = Vec<HashMap<String, String>>;

/// Читает все `*.csv` каталога (без рекурсии) и склеивает их по объединению
/// колонок. Нечитаемый файл пропускается с предупреждением; пустой каталог —
/// ошибка конфигурации, прогон прерывается сразу.
pub fn load_dir(dir: &Path) -> Result<RawTable> {
    let files = list_csv_files(dir)?;
    if files.is_empty() {
        return Err(SettleError::NoInput(dir.to_path_buf()));
    }
    log::info!("found {} CSV file(s) in {}", files.len(), dir.display());

    let mut table = RawTable::default();
    for path in &files {
        match load_file(path) {
            Ok((headers, rows)) => {
                append_file(&mut table, &headers, rows);
                log::info!("loaded: {}", path.display());
            }
            Err(e) => log::warn!("failed to load {}: {e}", path.display()),
        }
    }

    // колонки, добавленные поздними файлами, выравниваем по всем строкам
    let ncols = table.columns.len();
    for row in &mut table.rows {
        row.resize(ncols, None);
    }

    log::info!("combined rows: {}", table.rows.len());
    Ok(table)
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        // отсутствующий каталог равносилен пустому
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_csv = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if path.is_file() && is_csv {
            files.push(path);
        }
    }
    // порядок перечисления фиксируем сортировкой путей
    files.sort();
    Ok(files)
}

fn load_file(path: &Path) -> Result<(Vec<String>, FileRows)> {
    let file = File::open(path)?;
    // Trim::All обрезает и заголовки, и значения: ключи строк всегда
    // совпадают с именами колонок таблицы
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr.headers()?.iter().map(|h| h.to_string()).collect();

    let mut rows = Vec::new();
    for rec in rdr.deserialize::<HashMap<String, String>>() {
        rows.push(rec?);
    }
    Ok((headers, rows))
}

fn append_file(table: &mut RawTable, headers: &[String], rows: FileRows) {
    for h in headers {
        if table.column_index(h).is_none() {
            table.columns.push(h.clone());
        }
    }
    for mut row in rows {
        let cells = table.columns.iter().map(|c| row.remove(c)).collect();
        table.rows.push(cells);
    }
}
