use clap::Parser;
use std::path::PathBuf;
use villagegen::{GenerationSettings, SymbolTable, generate, serialize_layout};

/// Генератор деревень для Chronicles of Realms
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Путь к конфигурационному файлу в формате TOML
    #[arg(short, long)]
    config: PathBuf,

    /// Путь для символьной раскладки (по умолчанию: ./village.txt)
    #[arg(short, long, default_value = "village.txt")]
    output: PathBuf,

    /// Путь для отладочного PNG (не сохраняется, если не указан)
    #[arg(short, long)]
    png: Option<PathBuf>,

    /// Путь для JSON-отчёта о прогоне (не сохраняется, если не указан)
    #[arg(short, long)]
    report: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    println!("🔍 Загрузка конфигурации...");
    let settings = GenerationSettings::from_toml_file(cli.config.to_str().unwrap())?;

    println!(
        "Генерация деревни (размер: {}×{})...",
        settings.map_width, settings.map_height
    );
    let village = generate(&settings)?;

    println!("Сид прогона: {}", village.seed);
    for warning in &village.warnings {
        println!("⚠️  {warning}");
    }

    let text = serialize_layout(&village.grid, &SymbolTable::default());
    std::fs::write(&cli.output, text)?;
    println!("Раскладка сохранена в {:?}", cli.output);

    if let Some(png_path) = &cli.png {
        villagegen::render::save_as_png(&village.grid, png_path.to_str().unwrap())?;
        println!("PNG сохранён в {png_path:?}");
    }

    if let Some(report_path) = &cli.report {
        let report = serde_json::json!({
            "seed": village.seed,
            "warnings": village.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "footprints": village.footprints,
        });
        std::fs::write(report_path, serde_json::to_string_pretty(&report)?)?;
        println!("Отчёт сохранён в {report_path:?}");
    }

    println!("\nГотово! Деревня сгенерирована.");
    Ok(())
}
