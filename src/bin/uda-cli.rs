//! Headless client: train on three CSV files, print the metrics, save the
//! predictions, and optionally predict a single row.

use std::path::{Path, PathBuf};

use uda_client::backend::HttpBackend;
use uda_client::config::{self, AppSettings};
use uda_client::download;
use uda_client::logging::{self, ConsoleStream};
use uda_client::report::ResultsView;
use uda_client::session::Session;
use uda_client::uploads::{CsvFile, UploadSlot};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliOptions {
    backend: Option<String>,
    source: PathBuf,
    target: PathBuf,
    columns: PathBuf,
    single: Option<PathBuf>,
    out: PathBuf,
}

impl CliOptions {
    fn upload_path(&self, slot: UploadSlot) -> &Path {
        match slot {
            UploadSlot::Source => &self.source,
            UploadSlot::Target => &self.target,
            UploadSlot::Columns => &self.columns,
        }
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init_with(ConsoleStream::Stderr) {
        eprintln!("Logging disabled: {err}");
    }

    let settings = resolve_settings(&options)?;
    let backend = HttpBackend::new(&settings.backend).map_err(|err| err.to_string())?;
    eprintln!("Backend: {}", backend.base_url());

    let mut session = Session::new();
    for slot in UploadSlot::ALL {
        let file = CsvFile::open(options.upload_path(slot)).map_err(|err| err.to_string())?;
        session.batch.select(slot, file);
    }

    eprintln!("Processing your data...");
    let submitted = session.batch.submit(&backend).map(|_| ());
    if let Err(err) = submitted {
        return Err(session.batch.user_message().unwrap_or_else(|| err.to_string()));
    }
    let Some(metrics) = session.batch.metrics() else {
        return Err("Backend returned no metrics".to_string());
    };
    print!("{}", ResultsView::from_metrics(metrics).to_text());

    let Some(file) = download::prepare(session.batch.predictions()) else {
        return Err("Backend returned no predictions".to_string());
    };
    std::fs::create_dir_all(&options.out)
        .map_err(|err| format!("Failed to create {}: {err}", options.out.display()))?;
    let saved = file.save_into(&options.out).map_err(|err| err.to_string())?;
    println!();
    println!("Predictions written to {}", saved.display());

    if let Some(single) = &options.single {
        let file = CsvFile::open(single).map_err(|err| err.to_string())?;
        session.select_single_row(file);
        let predicted = session.predict(&backend).map(|_| ());
        if let Err(err) = predicted {
            return Err(session
                .single_row
                .user_message()
                .unwrap_or_else(|| err.to_string()));
        }
        if let Some(label) = session.single_row.prediction() {
            println!("Predicted label: {label}");
        }
    }
    Ok(())
}

fn resolve_settings(options: &CliOptions) -> Result<AppSettings, String> {
    let mut settings = config::load_or_default().map_err(|err| err.to_string())?;
    if let Some(url) = &options.backend {
        settings.backend.base_url = url.trim().trim_end_matches('/').to_string();
    }
    Ok(settings)
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut backend: Option<String> = None;
    let mut source: Option<PathBuf> = None;
    let mut target: Option<PathBuf> = None;
    let mut columns: Option<PathBuf> = None;
    let mut single: Option<PathBuf> = None;
    let mut out = PathBuf::from(".");

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--backend" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--backend requires a value".to_string())?;
                backend = Some(value.to_string());
            }
            "--source" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--source requires a value".to_string())?;
                source = Some(PathBuf::from(value));
            }
            "--target" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--target requires a value".to_string())?;
                target = Some(PathBuf::from(value));
            }
            "--columns" => {
                idx += 1;
                let value =
                    args.get(idx).ok_or_else(|| "--columns requires a value".to_string())?;
                columns = Some(PathBuf::from(value));
            }
            "--single" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--single requires a value".to_string())?;
                single = Some(PathBuf::from(value));
            }
            "--out" => {
                idx += 1;
                let value = args.get(idx).ok_or_else(|| "--out requires a value".to_string())?;
                out = PathBuf::from(value);
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let source = source.ok_or_else(|| "--source is required".to_string())?;
    let target = target.ok_or_else(|| "--target is required".to_string())?;
    let columns = columns.ok_or_else(|| "--columns is required".to_string())?;
    Ok(CliOptions {
        backend,
        source,
        target,
        columns,
        single,
        out,
    })
}

fn help_text() -> String {
    [
        "uda-cli",
        "",
        "Trains the backend model on three CSV files and prints the resulting metrics.",
        "",
        "Usage:",
        "  uda-cli --source <csv> --target <csv> --columns <csv> [options]",
        "",
        "Options:",
        "  --source <csv>    Labeled source-domain data (required).",
        "  --target <csv>    Unlabeled target-domain data (required).",
        "  --columns <csv>   Useful columns list, must include 'Label' (required).",
        "  --single <csv>    Single row to predict after training.",
        "  --out <dir>       Directory for predictions.csv (default: current directory).",
        "  --backend <url>   Backend base URL (default: config file or UDA_BACKEND_URL).",
    ]
    .join("\n")
}
