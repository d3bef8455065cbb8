use clap::{Parser, Subcommand, ValueEnum};
use procmodel::prelude::*;
use std::fs;
use std::time::Instant;

/// Output format for the `convert` subcommand.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// The typed model as JSON
    Model,
    /// Deployable BPMN 2.0 XML
    Bpmn,
}

/// Converts editor process graphs into typed process models
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Optional converter config JSON file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long, global = true)]
    output: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert editor JSON into a typed model
    Convert {
        /// Path to the editor JSON file
        input: String,
        #[arg(short, long, value_enum, default_value = "model")]
        format: OutputFormat,
        /// Normalize condition literals before converting
        #[arg(short, long)]
        normalize: bool,
    },
    /// Apply the save-path normalization to editor JSON
    Normalize {
        /// Path to the editor JSON file
        input: String,
    },
    /// Convert editor JSON and render it back into canonical editor JSON
    Render {
        /// Path to the editor JSON file
        input: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ConverterConfig::from_file(path).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to load config '{}': {}", path, e))
        }),
        None => ConverterConfig::default(),
    };
    let converter = Converter::builder(config).build();

    let start = Instant::now();
    let output = match cli.command {
        Command::Convert {
            input,
            format,
            normalize,
        } => run_convert(&converter, &input, format, normalize),
        Command::Normalize { input } => run_normalize(&input),
        Command::Render { input } => run_render(&converter, &input),
    };
    log::debug!("Finished in {:?}", start.elapsed());

    match cli.output {
        Some(path) => fs::write(&path, output)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write '{}': {}", path, e))),
        None => println!("{}", output),
    }
}

fn run_convert(converter: &Converter, input: &str, format: OutputFormat, normalize: bool) -> String {
    let mut document = load_document(input);
    if normalize {
        report_warnings(&normalize_document(&mut document));
    }

    let converted = converter
        .to_typed_model_with_diagnostics(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    report_warnings(&converted.diagnostics);

    match format {
        OutputFormat::Model => serde_json::to_string_pretty(&converted.model)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize model: {}", e))),
        OutputFormat::Bpmn => to_bpmn_xml(&converted.model)
            .unwrap_or_else(|e| exit_with_error(&format!("BPMN export failed: {}", e))),
    }
}

fn run_normalize(input: &str) -> String {
    let mut document = load_document(input);
    report_warnings(&normalize_document(&mut document));
    pretty(&document)
}

fn run_render(converter: &Converter, input: &str) -> String {
    let document = load_document(input);
    let converted = converter
        .to_typed_model_with_diagnostics(&document)
        .unwrap_or_else(|e| exit_with_error(&format!("Conversion failed: {}", e)));
    report_warnings(&converted.diagnostics);
    pretty(&converter.to_graph_document(&converted.model))
}

fn load_document(path: &str) -> GraphDocument {
    let json = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    GraphDocument::from_json(&json)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn pretty(document: &GraphDocument) -> String {
    document
        .to_json_pretty()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize document: {}", e)))
}

fn report_warnings(warnings: &[ConversionWarning]) {
    for warning in warnings {
        eprintln!("warning: {}", warning);
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
