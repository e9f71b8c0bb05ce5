use anyhow::{Context, Result};
use clap::Parser;
use sickday::cli::{Cli, OutputFormat};
use sickday::config::ReportConfig;
use sickday::dataset::AbsenceDataset;
use sickday::html_output::HtmlOutput;
use sickday::json_output::JsonOutput;
use sickday::report::build_report;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let mut config = match &args.config {
        Some(path) => ReportConfig::from_file(path)?,
        None => ReportConfig::default(),
    };
    args.apply_overrides(&mut config);
    config.validate().context("Invalid settings")?;

    let dataset = AbsenceDataset::from_path(&args.input)
        .with_context(|| format!("Failed to load {}", args.input.display()))?;
    if dataset.is_empty() {
        tracing::warn!("{} contains no records", args.input.display());
    }

    // Statistical failures of a single comparison are part of the report
    let report = build_report(&dataset, &config)?;

    let rendered = match args.format {
        OutputFormat::Text => report.to_report_string(),
        OutputFormat::Json => JsonOutput::new(report)
            .with_input(args.input.display().to_string())
            .to_json()?,
        OutputFormat::Html => {
            let html = HtmlOutput::new(&report);
            if args.no_ecdf {
                html.without_ecdf().to_html()
            } else {
                html.to_html()
            }
        }
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
