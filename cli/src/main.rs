//! md2jira CLI - Markdown to JIRA markup conversion tool
//!
//! A command-line tool for converting Markdown files or stdin into JIRA
//! wiki markup.

use clap::{CommandFactory, Parser, Subcommand};
use colored::*;
use log::debug;
use md2jira::{ConversionResult, ConvertOptions, Converter};
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};

/// Markdown to JIRA markup converter
#[derive(Parser)]
#[command(
    name = "md2jira",
    version,
    about = "Convert Markdown documents to JIRA markup",
    long_about = "md2jira - Markdown to JIRA markup converter.\n\n\
                  Usage:\n  \
                  md2jira input.md                  Convert file to stdout\n  \
                  md2jira input.md -o output.txt    Convert file to output file\n  \
                  md2jira a.md b.md -o out/         Convert several files into out/\n  \
                  cat README.md | md2jira           Convert from stdin\n  \
                  md2jira --verbose input.md        Convert with warnings",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input Markdown files (default: stdin)
    inputs: Vec<PathBuf>,

    /// Output file, or output directory when several inputs are given
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show conversion warnings and debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Keep raw HTML blocks instead of downgrading them
    #[arg(long)]
    preserve_html: bool,

    /// Print output and warnings as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Dump the parsed Markdown document tree as JSON
    Tree {
        /// Input file path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,
    },

    /// List the code block language mappings
    Languages,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        let mut options = ConvertOptions::new();
        if self.preserve_html {
            options = options.with_preserved_html();
        }
        if self.verbose {
            options = options.with_warnings().verbose();
        }
        options
    }
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = cli.options();

    match cli.command {
        Some(Commands::Tree {
            input,
            output,
            compact,
        }) => return run_tree(&input, output.as_deref(), compact),
        Some(Commands::Languages) => {
            print_languages();
            return Ok(());
        }
        None => {}
    }

    let converter = Converter::new().with_options(options);

    match cli.inputs.as_slice() {
        [] => {
            let mut stdin = io::stdin();
            if stdin.is_terminal() {
                // No input provided
                Cli::command().print_help()?;
                std::process::exit(1);
            }

            let mut data = Vec::new();
            stdin.read_to_end(&mut data)?;
            debug!("read {} bytes from stdin", data.len());

            let result = converter.convert_bytes(&data);
            emit(&result, cli.output.as_deref(), cli.json, cli.verbose)
        }
        [input] => {
            let result = converter.convert_file(input)?;
            emit(&result, cli.output.as_deref(), cli.json, cli.verbose)
        }
        inputs => run_batch(inputs, cli.output.as_deref(), &options, cli.verbose),
    }
}

/// Writes a single conversion result.
fn emit(
    result: &ConversionResult,
    output: Option<&Path>,
    json: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if verbose {
        print_warnings(&result.warnings);
    }

    let content = if json {
        serde_json::to_string_pretty(result)?
    } else {
        result.output.clone()
    };

    write_output(output, &content)?;

    if let Some(path) = output {
        println!(
            "{} Converted to JIRA markup: {}",
            "✓".green().bold(),
            path.display()
        );
    }

    Ok(())
}

/// Converts several files in parallel, writing `<stem>.jira` for each.
fn run_batch(
    inputs: &[PathBuf],
    output_dir: Option<&Path>,
    options: &ConvertOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output_dir {
        fs::create_dir_all(dir)?;
    }

    let results = md2jira::convert_files(inputs, options);

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(result) => {
                let path = md2jira::output_path(input, output_dir);
                fs::write(&path, &result.output)?;
                println!(
                    "  {} {} -> {}",
                    "✓".green(),
                    input.display(),
                    path.display()
                );
                if verbose {
                    print_warnings(&result.warnings);
                }
            }
            Err(e) => {
                eprintln!("  {} {}: {}", "✗".red(), input.display(), e);
                failed += 1;
            }
        }
    }

    println!("{}", "Conversion Complete".green().bold());
    println!("{}", "─".repeat(40));
    println!("{}: {}", "Converted".bold(), inputs.len() - failed);
    println!("{}: {}", "Failed".bold(), failed);

    if failed > 0 {
        return Err(format!("{} of {} files failed to convert", failed, inputs.len()).into());
    }
    Ok(())
}

fn run_tree(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = fs::read(input)?;
    let doc = md2jira::tree::parse(&String::from_utf8_lossy(&data));

    let json = if compact {
        serde_json::to_string(&doc)?
    } else {
        serde_json::to_string_pretty(&doc)?
    };

    write_output(output, &json)
}

fn print_languages() {
    for (from, to) in md2jira::language::languages() {
        println!("{} -> {}", from, to);
    }
}

fn print_warnings(warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    eprintln!("{}", "Warnings:".yellow().bold());
    for warning in warnings {
        eprintln!("  - {}", warning);
    }
    eprintln!();
}

fn write_output(path: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_verbose_enables_warnings() {
        let cli = Cli::parse_from(["md2jira", "--verbose", "--preserve-html", "in.md"]);
        let options = cli.options();
        assert!(options.warn_on_unsupported);
        assert!(options.verbose);
        assert!(options.preserve_raw_html);
        assert_eq!(cli.inputs, vec![PathBuf::from("in.md")]);
    }

    #[test]
    fn test_subcommand_parse() {
        let cli = Cli::parse_from(["md2jira", "tree", "doc.md", "--compact"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Tree { compact: true, .. })
        ));
    }
}
