//! html2carbon CLI - HTML to Carbon JSON conversion tool

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use env_logger::Env;

use html2carbon::{
    ConvertOptions, Converter, JsonFormat, MinimumHeading, ParagraphConfig, ParagraphMatcher,
};

#[derive(Parser)]
#[command(name = "html2carbon")]
#[command(version)]
#[command(about = "Convert article HTML to Carbon editor JSON", long_about = None)]
struct Cli {
    /// Input HTML file (stdin if not specified)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,

    /// Paragraph type that h3..h6 are clamped to
    #[arg(
        long,
        value_enum,
        default_value = "h3",
        env = "HTML2CARBON_MINIMUM_HEADING"
    )]
    minimum_heading: HeadingLevel,

    /// Log recoverable HTML parse errors as warnings
    #[arg(long)]
    show_parse_errors: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show section, layout and component counts
    Info {
        /// Input HTML file (stdin if not specified)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum HeadingLevel {
    /// Clamp h2 and below to h1
    H1,
    /// Clamp h3 and below to h2
    H2,
    /// Clamp h4 and below to h3 (default)
    H3,
}

impl From<HeadingLevel> for MinimumHeading {
    fn from(level: HeadingLevel) -> Self {
        match level {
            HeadingLevel::H1 => MinimumHeading::H1,
            HeadingLevel::H2 => MinimumHeading::H2,
            HeadingLevel::H3 => MinimumHeading::H3,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    log_builder(&cli, Env::default()).init();

    let converter = build_converter(&cli);

    let result = match cli.command {
        Some(Commands::Info { ref input }) => cmd_info(&converter, input.as_deref()),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_convert(&converter, cli.input.as_deref(), cli.output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Logger configured from `env`; `--show-parse-errors` lowers the default
/// filter to `warn` so parse errors reach stderr without `RUST_LOG`.
fn log_builder(cli: &Cli, env: Env<'_>) -> env_logger::Builder {
    let default_filter = if cli.show_parse_errors { "warn" } else { "error" };
    env_logger::Builder::from_env(env.default_filter_or(default_filter))
}

fn build_converter(cli: &Cli) -> Converter {
    let format = if cli.pretty {
        JsonFormat::Pretty
    } else {
        JsonFormat::Compact
    };
    let options = ConvertOptions::new()
        .with_suppress_errors(!cli.show_parse_errors)
        .with_json_format(format);

    let paragraphs = ParagraphConfig::new().with_minimum_heading(cli.minimum_heading.into());

    let mut converter = Converter::with_options(options);
    converter.add_component("paragraph", Arc::new(ParagraphMatcher::with_config(paragraphs)));
    converter
}

fn read_input(input: Option<&Path>) -> io::Result<String> {
    match input {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut html = String::new();
            io::stdin().read_to_string(&mut html)?;
            Ok(html)
        }
    }
}

fn cmd_convert(
    converter: &Converter,
    input: Option<&Path>,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_input(input)?;
    let json = converter.convert(&html)?;

    if json.is_empty() {
        log::debug!("empty input, nothing to write");
        return Ok(());
    }

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(converter: &Converter, input: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let html = read_input(input)?;
    let doc = converter.to_document(&html)?;

    let layouts: usize = doc.sections.iter().map(|s| s.components.len()).sum();
    let mut kinds: BTreeMap<&str, usize> = BTreeMap::new();
    for component in doc.components() {
        *kinds.entry(component.kind()).or_default() += 1;
    }

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    if let Some(path) = input {
        println!("{}: {}", "File".bold(), path.display());
    }
    println!("{}: {}", "Sections".bold(), doc.section_count());
    println!("{}: {}", "Layouts".bold(), layouts);
    println!("{}: {}", "Components".bold(), kinds.values().sum::<usize>());

    for (kind, count) in &kinds {
        println!("  {} {}: {}", "├─".dimmed(), kind, count);
    }

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "html2carbon".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to Carbon editor JSON converter");
    println!();
    println!("License: MIT");
}
