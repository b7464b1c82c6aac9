use clap::Parser;
use settlelib::{
    aggregate::{by_date, by_store},
    clean::clean,
    error::Result,
    load::load_dir,
    report::{build_sheets, ReportSink},
    settle::settle,
    xlsx::XlsxSink,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "settle", version, about = "Расчёт выплат по заказам доставки")]
struct Cli {
    /// Каталог с CSV-файлами заказов
    #[arg(short = 'i', long = "input", default_value = "input")]
    input: PathBuf,

    /// Путь к итоговому XLSX-отчёту
    #[arg(short = 'o', long = "output", default_value = "output/settlement_report.xlsx")]
    output: PathBuf,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let raw = load_dir(&cli.input)?;
    let cleaned = clean(&raw)?;
    let settled = settle(cleaned);
    log::info!("settlement computed for {} order(s)", settled.rows.len());

    let stores = by_store(&settled);
    let dates = by_date(&settled);

    // отчёт пишется только после успешной валидации: прошлый файл
    // не перезатирается сорванным прогоном
    if let Some(parent) = cli.output.parent() {
        fs::create_dir_all(parent)?;
    }
    let sheets = build_sheets(&settled, &stores, &dates);
    XlsxSink::new(&cli.output).write(&sheets)?;

    log::info!("report written: {}", cli.output.display());
    Ok(())
}
