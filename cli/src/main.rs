//! reportpage CLI - survey report pagination tool

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use reportpage::{paginate_batch, Document, JsonFormat, PaginationConfig, PaginationEngine, PaginationResult};

type CliResult<T = ()> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "reportpage")]
#[command(version)]
#[command(about = "Paginate survey report documents into bounded-height pages", long_about = None)]
struct Cli {
    /// Input document (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Paginate a document and write the result as JSON
    Paginate {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show a page-by-page summary of a document
    Info {
        /// Input document (JSON)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Paginate several documents in parallel
    Batch {
        /// Input documents (JSON)
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Show version information
    Version,
}

#[derive(Args, Default)]
struct ConfigArgs {
    /// Pagination config file (JSON)
    #[arg(short, long, value_name = "FILE", env = "REPORTPAGE_CONFIG")]
    config: Option<PathBuf>,

    /// Maximum content height per page in pixels
    #[arg(long, value_name = "PX")]
    max_height: Option<f64>,

    /// Disable widow and orphan control
    #[arg(long)]
    no_widow_orphan: bool,
}

impl ConfigArgs {
    fn load(&self) -> CliResult<PaginationConfig> {
        let mut config = match &self.config {
            Some(path) => PaginationConfig::from_json_file(path)?,
            None => PaginationConfig::default(),
        };
        if let Some(height) = self.max_height {
            config = config.with_max_content_height(height);
        }
        if self.no_widow_orphan {
            config = config.with_widow_control(false).with_orphan_control(false);
        }
        config.validate()?;
        log::debug!(
            "Using max content height {}px (widow {}, orphan {})",
            config.max_content_height,
            config.widow_control,
            config.orphan_control
        );
        Ok(config)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Paginate {
            input,
            output,
            compact,
            config,
        }) => cmd_paginate(&input, output.as_deref(), compact, &config),
        Some(Commands::Info { input, config }) => cmd_info(&input, &config),
        Some(Commands::Batch {
            inputs,
            output,
            config,
        }) => cmd_batch(&inputs, output.as_deref(), &config),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: summarize if input is provided
            if let Some(input) = cli.input {
                cmd_info(&input, &ConfigArgs::default())
            } else {
                println!("{}", "Usage: reportpage <FILE>".yellow());
                println!("       reportpage --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Turn a result carrying fatal errors into an `Err`.
fn check_errors(result: &PaginationResult) -> CliResult {
    if result.is_ok() {
        Ok(())
    } else {
        Err(result.errors.join("; ").into())
    }
}

fn print_warnings(result: &PaginationResult) {
    for warning in &result.warnings {
        eprintln!("{}: {}", "Warning".yellow(), warning);
    }
}

fn cmd_paginate(input: &Path, output: Option<&Path>, compact: bool, args: &ConfigArgs) -> CliResult {
    let config = args.load()?;
    let doc = Document::from_json_file(input)?;
    let result = PaginationEngine::new(config).apply_page_breaks(&doc);
    check_errors(&result)?;
    print_warnings(&result);

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = result.to_json(format)?;

    if let Some(path) = output {
        fs::write(path, &json)?;
        println!(
            "{} {} ({} pages)",
            "Saved to".green(),
            path.display(),
            result.page_count()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn cmd_info(input: &Path, args: &ConfigArgs) -> CliResult {
    let config = args.load()?;
    let doc = Document::from_json_file(input)?;
    let result = PaginationEngine::new(config.clone()).apply_page_breaks(&doc);
    check_errors(&result)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.title {
        println!("{}: {}", "Title".bold(), title);
    }
    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Elements".bold(), result.stats.element_count);
    println!("{}: {}px", "Max height".bold(), config.max_content_height);

    println!();
    println!("{}", "Pages".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for page in &result.pages {
        let height = format!("{:.1}px", page.height);
        let height = if page.height > config.max_content_height {
            height.red()
        } else {
            height.normal()
        };
        println!(
            "{} {:>3}  {:>3} elements  {}",
            "Page".bold(),
            page.number,
            page.len(),
            height
        );
    }

    println!();
    println!("{}", "Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = &result.stats;
    println!("{}: {}", "Manual breaks".bold(), stats.manual_breaks);
    println!("{}: {}", "Splits".bold(), stats.splits);
    println!("{}: {}", "Forced placements".bold(), stats.forced_placements);
    println!("{}: {}", "Oversized pages".bold(), stats.oversized_pages);
    println!("{}: {}", "Orphan moves".bold(), stats.orphan_moves);
    println!("{}: {}", "Widow moves".bold(), stats.widow_moves);

    if !result.warnings.is_empty() {
        println!();
        print_warnings(&result);
    }

    Ok(())
}

/// `<dir>/<stem>.pages.json` for an input document.
fn batch_output_path(input: &Path, dir: &Path) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    dir.join(format!("{}.pages.json", stem))
}

fn cmd_batch(inputs: &[PathBuf], output: Option<&Path>, args: &ConfigArgs) -> CliResult {
    let config = args.load()?;
    let output_dir = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."));
    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 * 2);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading documents...");
    let mut loaded = Vec::new();
    let mut docs = Vec::new();
    let mut failed = 0;
    for input in inputs {
        match Document::from_json_file(input) {
            Ok(doc) => {
                loaded.push(input);
                docs.push(doc);
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red(), input.display(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.set_message("Paginating...");
    let results = paginate_batch(&docs, &config);

    pb.set_message("Writing results...");
    for (input, result) in loaded.iter().zip(&results) {
        if !result.is_ok() {
            pb.println(format!(
                "{} {}: {}",
                "Failed".red(),
                input.display(),
                result.errors.join("; ")
            ));
            failed += 1;
        } else {
            let path = batch_output_path(input, &output_dir);
            fs::write(&path, result.to_json(JsonFormat::Pretty)?)?;
        }
        pb.inc(1);
    }
    pb.finish_with_message("Done!");

    let pages: usize = results.iter().map(PaginationResult::page_count).sum();
    println!(
        "\n{} {} documents, {} pages",
        "Paginated".green().bold(),
        inputs.len() - failed,
        pages
    );

    if failed > 0 {
        return Err(format!("{} of {} documents failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "reportpage".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Survey report pagination tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_args_defaults() {
        let config = ConfigArgs::default().load().unwrap();
        assert_eq!(config, PaginationConfig::default());
    }

    #[test]
    fn test_config_args_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"maxContentHeight": 500, "pageBreakMargin": 0}}"#).unwrap();

        let args = ConfigArgs {
            config: Some(file.path().to_path_buf()),
            max_height: Some(750.0),
            no_widow_orphan: true,
        };
        let config = args.load().unwrap();
        assert_eq!(config.max_content_height, 750.0);
        assert_eq!(config.page_break_margin, 0.0);
        assert!(!config.widow_control);
        assert!(!config.orphan_control);
    }

    #[test]
    fn test_config_args_rejects_bad_height() {
        let args = ConfigArgs {
            max_height: Some(0.0),
            ..Default::default()
        };
        assert!(args.load().is_err());
    }

    #[test]
    fn test_batch_output_path() {
        let path = batch_output_path(Path::new("surveys/high-street.json"), Path::new("out"));
        assert_eq!(path, Path::new("out/high-street.pages.json"));
    }

    #[test]
    fn test_check_errors() {
        let mut result = PaginationResult::new();
        assert!(check_errors(&result).is_ok());
        result.errors.push("Duplicate element id: p1".to_string());
        let err = check_errors(&result).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate element id: p1");
    }
}
