//! Batch converter binary
//!
//! Converts every PDF in the content directory using the default settings
//! or a JSON configuration file.

use pdf_table_slides::{BatchSummary, ConversionError, Converter, PipelineConfig};
use std::{env, path::Path, process};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("pdf-table-slides");

    let config = match args.get(1).map(String::as_str) {
        None => PipelineConfig::default(),
        Some("-h") | Some("--help") => {
            print_help(program);
            return;
        }
        Some("--write-default-config") => {
            let Some(path) = args.get(2) else {
                print_help(program);
                process::exit(1);
            };
            write_default_config(Path::new(path));
            return;
        }
        Some(path) => match PipelineConfig::from_json_file(Path::new(path)) {
            Ok(cfg) => {
                log::info!("Loaded configuration from {}", path);
                cfg
            }
            Err(e) => exit_with(&e),
        },
    };

    let converter = match Converter::new(config) {
        Ok(converter) => converter,
        Err(e) => exit_with(&e),
    };

    match converter.convert_all() {
        Ok(summary) => {
            print_summary(&summary);
            if !summary.is_success() {
                process::exit(1);
            }
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(error: &ConversionError) -> ! {
    log::error!("{}", error);
    eprintln!("{}", error.user_message());
    process::exit(1);
}

fn write_default_config(path: &Path) {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            process::exit(1);
        }
    }

    let config = PipelineConfig::default();
    if let Err(e) = config.to_json_file(path) {
        exit_with(&e);
    }
    eprintln!("Configuration saved to {}", path.display());
}

fn print_summary(summary: &BatchSummary) {
    eprintln!();
    eprintln!("Batch processing complete:");
    for report in &summary.reports {
        eprintln!(
            "  {}: {} pages, {} tables, {} slides",
            report.project,
            report.pages.len(),
            report.cropped_pages().count(),
            report.slide_images().len()
        );
    }
    for (pdf, error) in &summary.failures {
        eprintln!("  {}: ✗ {}", pdf.display(), error);
    }
    eprintln!("  Success: {}", summary.reports.len());
    eprintln!("  Errors: {}", summary.failures.len());
}

fn print_help(program_name: &str) {
    eprintln!("Usage: {} [config.json]", program_name);
    eprintln!("       {} --write-default-config <config.json>", program_name);
    eprintln!();
    eprintln!("Render every PDF in the content directory, crop purple-bordered tables");
    eprintln!("and rebuild the remaining pages as a PPTX deck and a PDF.");
    eprintln!();
    eprintln!("Layout (defaults):");
    eprintln!("  content/<name>.pdf               input");
    eprintln!("  pages/<name>/page_NN.png         rendered pages");
    eprintln!("  content/<name>/page_NN.png       table crops");
    eprintln!("  content/<name>/<name>.pptx|.pdf  outputs");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  RUST_LOG=debug   Per-page detection details");
}
