//! tracelens — analyze pasted error traces from the command line.
//!
//! Three modes:
//!
//! - **stdin mode**: `pbpaste | tracelens`
//! - **file mode**: `tracelens -f html -o reports/ logs/*.log`
//! - **issue mode**: `tracelens --issues export.json` refreshes `error_pattern`
//!   on exported issue records

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use tracelens::analyzer;
use tracelens::issue::{self, IssueRecord};
use tracelens::render::{self, Report};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(
    name = "tracelens",
    about = "Extract file, line, and message fields from error traces and highlight them"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Write one report per input file into this directory instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Output format: text (default), summary, markdown, html, json
    #[arg(short = 'f', long, default_value = "text")]
    format: String,

    /// Disable ANSI colors in text output
    #[arg(long)]
    no_color: bool,

    /// Treat inputs as JSON issue records and refresh their error_pattern
    #[arg(long, conflicts_with = "output")]
    issues: bool,

    /// With --issues, print only the N (default 5) most recently created parsed issues
    #[arg(long, value_name = "N", requires = "issues")]
    recent: Option<Option<usize>>,

    /// With --issues, keep only issues the public shared view may show
    #[arg(long, requires = "issues")]
    shared: bool,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short = 'v', long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.issues {
        return issue_mode(&cli);
    }

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "tracelens=warn",
        1 => "tracelens=info",
        _ => "tracelens=debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

/// Colors only when writing to a terminal and NO_COLOR is unset.
fn use_color(cli: &Cli) -> bool {
    !cli.no_color
        && cli.output.is_none()
        && std::env::var_os("NO_COLOR").is_none()
        && io::stdout().is_terminal()
}

fn read_stdin() -> Result<String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("failed to read stdin")?;
    Ok(input)
}

/// stdin mode: analyze stdin, write the report to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let input = read_stdin()?;
    let renderer = render::create_renderer(&cli.format, use_color(cli))?;
    let analysis = analyzer::analyze(&input);
    info!(matchers = analysis.results.len(), "analyzed stdin");
    let report = Report {
        source: None,
        text: &input,
        analysis: &analysis,
    };
    print!("{}", renderer.render(&report)?);
    Ok(())
}

/// file mode: analyze each input file; print the reports, or write them to
/// the output directory.
fn file_mode(cli: &Cli) -> Result<()> {
    let renderer = render::create_renderer(&cli.format, use_color(cli))?;

    if let Some(ref dir) = cli.output {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
    }

    let input_files = expand_globs(&cli.files, TRACE_EXTENSIONS)?;
    let mut printed = 0;
    for path in &input_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("skipping {}: {}", path.display(), e);
                continue;
            }
        };

        let source = path.to_string_lossy().to_string();
        let analysis = analyzer::analyze(&content);
        info!(file = %source, matchers = analysis.results.len(), "analyzed");
        let report = Report {
            source: Some(source.as_str()),
            text: &content,
            analysis: &analysis,
        };
        let rendered = renderer.render(&report)?;

        match cli.output {
            Some(ref dir) => {
                let out_path = dir.join(format!(
                    "{}.{}",
                    derive_output_name(&source),
                    renderer.file_extension()
                ));
                fs::write(&out_path, &rendered)
                    .with_context(|| format!("failed to write {}", out_path.display()))?;
            }
            None => {
                if printed > 0 {
                    println!();
                }
                print!("{}", rendered);
                printed += 1;
            }
        }
    }

    Ok(())
}

/// issue mode: refresh `error_pattern` on every record and print the records
/// back as JSON.
fn issue_mode(cli: &Cli) -> Result<()> {
    let mut records: Vec<IssueRecord> = Vec::new();
    if cli.files.is_empty() {
        records.extend(issue::load_issues(&read_stdin()?).context("failed to parse stdin")?);
    } else {
        for path in expand_globs(&cli.files, ISSUE_EXTENSIONS)? {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let loaded = issue::load_issues(&content)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            records.extend(loaded);
        }
    }

    for record in &mut records {
        if let Some(analysis) = record.analyze_trace() {
            info!(
                issue = record.id().unwrap_or("?"),
                title = record.title().unwrap_or(""),
                matchers = analysis.results.len(),
                "refreshed error_pattern"
            );
        }
    }

    if cli.shared {
        records.retain(IssueRecord::is_publicly_visible);
    }

    let json = match cli.recent {
        Some(limit) => {
            let limit = limit.unwrap_or(issue::RECENT_LOG_LIMIT);
            serde_json::to_string_pretty(&issue::recent_parsed(&records, limit))
        }
        None => serde_json::to_string_pretty(&records),
    }
    .context("failed to serialize issues")?;
    println!("{}", json);
    Ok(())
}

/// File extensions picked up when a directory is given.
const TRACE_EXTENSIONS: &[&str] = &["log", "txt", "trace", "err"];
const ISSUE_EXTENSIONS: &[&str] = &["json"];

/// Expand glob patterns into a list of real file paths.
/// Also handles bare directory paths by scanning for files with one of `extensions`.
fn expand_globs(patterns: &[String], extensions: &[&str]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        // Directories are scanned non-recursively
        if path.is_dir() {
            let entries = fs::read_dir(path)
                .with_context(|| format!("failed to read directory: {}", path.display()))?;
            for entry in entries.flatten() {
                let p = entry.path();
                if p.is_file() {
                    if let Some(ext) = p.extension().and_then(|e| e.to_str()) {
                        if extensions.contains(&ext) {
                            files.push(p);
                        }
                    }
                }
            }
            continue;
        }
        let matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            warn!("no files matched: {}", pattern);
        }
        files.extend(matches);
    }
    // Sort for deterministic output
    files.sort();
    files.dedup();
    Ok(files)
}

/// Derive the output file name (without extension) from a source path.
/// "logs/ci.log" → "ci", "build/tsc.err" → "tsc"
fn derive_output_name(source: &str) -> String {
    let path = Path::new(source);
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| source.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn output_name_strips_extension() {
        assert_eq!(derive_output_name("logs/ci.log"), "ci");
        assert_eq!(derive_output_name("ci.log"), "ci");
    }

    #[test]
    fn output_name_no_extension() {
        assert_eq!(derive_output_name("TRACE"), "TRACE");
    }

    #[test]
    fn recent_requires_issues() {
        assert!(Cli::try_parse_from(["tracelens", "--recent", "3"]).is_err());
        assert!(Cli::try_parse_from(["tracelens", "--issues", "--recent", "3"]).is_ok());
    }

    #[test]
    fn recent_defaults_to_dashboard_limit() {
        let cli = Cli::try_parse_from(["tracelens", "--issues", "--recent"]).unwrap();
        assert_eq!(cli.recent, Some(None));
        let cli = Cli::try_parse_from(["tracelens", "--issues", "--recent", "2"]).unwrap();
        assert_eq!(cli.recent, Some(Some(2)));
    }

    #[test]
    fn shared_requires_issues() {
        assert!(Cli::try_parse_from(["tracelens", "--shared"]).is_err());
    }

    #[test]
    fn issues_conflicts_with_output() {
        assert!(Cli::try_parse_from(["tracelens", "--issues", "-o", "out"]).is_err());
    }
}
