//! readalong CLI: grade reading attempts against target text.

use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use serde::Deserialize;

use readalong_core::{ComparisonEngine, ComparisonResult, EngineConfig, MistakeType};

// ─── Top-level CLI ───────────────────────────────────────────────

#[derive(Parser)]
#[command(
    name = "readalong",
    about = "Word-level reading assessment for read-aloud and handwriting practice",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compare one transcript against its target text
    Compare(CompareArgs),
    /// Compare every line of a JSON Lines file
    Batch(BatchArgs),
    /// Print the built-in configuration as JSON
    DefaultConfig,
}

// ─── Shared arguments (embedded in each subcommand) ──────────────

#[derive(Parser, Debug)]
struct SharedArgs {
    /// JSON engine config (confusion pairs, tokenizer, feedback text)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Tokenizer backend, overrides the config file
    #[arg(long, value_parser = ["unicode", "whitespace"])]
    tokenizer: Option<String>,

    /// Show verbose output
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

// ─── Compare ─────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Grade a single reading attempt")]
struct CompareArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Target text the learner was asked to read
    #[arg(long)]
    original: String,

    /// What the learner actually said or wrote
    #[arg(long)]
    spoken: String,

    /// Print the result as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

// ─── Batch ───────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Grade reading attempts from a JSON Lines file")]
struct BatchArgs {
    #[command(flatten)]
    shared: SharedArgs,

    /// Input file, one {"original": ..., "spoken": ...} object per line
    input: PathBuf,

    /// Output file for JSON results (default: stdout)
    #[arg(long)]
    output: Option<PathBuf>,
}

/// One line of batch input.
#[derive(Debug, Deserialize)]
struct BatchItem {
    original: String,
    spoken: String,
}

// ─── Main ────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    // Init logging
    let log_level = match &cli.command {
        Command::Compare(a) if a.shared.verbose => "debug",
        Command::Batch(a) if a.shared.verbose => "debug",
        _ => "info",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    let result = match cli.command {
        Command::Compare(args) => run_compare(args),
        Command::Batch(args) => run_batch(args),
        Command::DefaultConfig => run_default_config(),
    };

    if let Err(e) = result {
        log::error!("{:#}", e);
        std::process::exit(1);
    }
}

// ─── Helpers ─────────────────────────────────────────────────────

/// Resolve config file + overrides into an engine.
fn build_engine(shared: &SharedArgs) -> Result<ComparisonEngine> {
    let mut config = match &shared.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    if let Some(tokenizer) = &shared.tokenizer {
        config.tokenizer = tokenizer.clone();
    }
    let engine = ComparisonEngine::new(&config).context("Invalid engine configuration")?;
    log::debug!("Using tokenizer '{}'", engine.tokenizer_name());
    Ok(engine)
}

fn mistake_label(mistake_type: MistakeType) -> &'static str {
    match mistake_type {
        MistakeType::Substitution => "substitution",
        MistakeType::Omission => "omission",
        MistakeType::Insertion => "insertion",
        MistakeType::Mispronunciation => "mispronunciation",
    }
}

/// Human-readable report for one result.
fn format_report(result: &ComparisonResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Accuracy: {:.1}% ({})\n",
        result.accuracy * 100.0,
        result.band().label()
    ));
    out.push_str(&format!("Feedback: {}\n", result.feedback));

    if result.mistakes.is_empty() {
        out.push_str("No mistakes\n");
        return out;
    }

    let summary = result.mistake_summary();
    out.push_str(&format!(
        "Mistakes ({}): {} substitution, {} omission, {} insertion, {} mispronunciation\n",
        summary.total(),
        summary.substitutions,
        summary.omissions,
        summary.insertions,
        summary.mispronunciations
    ));
    for m in &result.mistakes {
        let detail = match m.mistake_type {
            MistakeType::Omission => format!("'{}' was skipped", m.expected_word),
            MistakeType::Insertion => format!("extra word '{}'", m.actual_word),
            _ => format!("'{}' read as '{}'", m.expected_word, m.actual_word),
        };
        out.push_str(&format!(
            "  [{}] {} ({:?}): {}\n",
            m.position,
            mistake_label(m.mistake_type),
            m.severity,
            detail
        ));
    }
    out
}

// ─── Runners ─────────────────────────────────────────────────────

fn run_compare(args: CompareArgs) -> Result<()> {
    let engine = build_engine(&args.shared)?;
    let result = engine.compare_texts(&args.original, &args.spoken);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result.to_json_value())?);
    } else {
        print!("{}", format_report(&result));
    }
    Ok(())
}

/// Parse JSON Lines input; blank lines are skipped.
fn read_batch(reader: impl BufRead) -> Result<Vec<BatchItem>> {
    let mut items = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("Failed to read line {}", i + 1))?;
        if line.trim().is_empty() {
            continue;
        }
        let item: BatchItem = serde_json::from_str(&line)
            .with_context(|| format!("Invalid batch entry on line {}", i + 1))?;
        items.push(item);
    }
    Ok(items)
}

fn run_batch(args: BatchArgs) -> Result<()> {
    if !args.input.exists() {
        bail!("File not found: {}", args.input.display());
    }
    let engine = build_engine(&args.shared)?;

    let file = std::fs::File::open(&args.input)
        .with_context(|| format!("Failed to open {}", args.input.display()))?;
    let items = read_batch(BufReader::new(file))?;
    log::info!("Comparing {} reading attempt(s)", items.len());

    let pairs: Vec<(&str, &str)> = items
        .iter()
        .map(|item| (item.original.as_str(), item.spoken.as_str()))
        .collect();
    let results = engine.compare_batch(&pairs);

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            std::fs::File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(std::io::stdout())),
    };
    for result in &results {
        writeln!(writer, "{}", serde_json::to_string(&result.to_json_value())?)?;
    }
    writer.flush()?;

    let mean = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.accuracy).sum::<f64>() / results.len() as f64
    };
    log::info!("Mean accuracy: {:.1}%", mean * 100.0);
    if let Some(path) = &args.output {
        log::info!("Wrote {}", path.display());
    }
    Ok(())
}

fn run_default_config() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&EngineConfig::default())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared() -> SharedArgs {
        SharedArgs {
            config: None,
            tokenizer: None,
            verbose: false,
        }
    }

    #[test]
    fn test_read_batch_skips_blank_lines() {
        let input = "{\"original\": \"Con mèo\", \"spoken\": \"Con mèo nhỏ\"}\n\n   \n{\"original\": \"a\", \"spoken\": \"b\"}\n";
        let items = read_batch(input.as_bytes()).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].original, "Con mèo");
        assert_eq!(items[1].spoken, "b");
    }

    #[test]
    fn test_read_batch_reports_line_number() {
        let input = "{\"original\": \"a\", \"spoken\": \"b\"}\nnot json\n";
        let err = read_batch(input.as_bytes()).unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));
    }

    #[test]
    fn test_build_engine_tokenizer_override() {
        let mut args = shared();
        args.tokenizer = Some("whitespace".into());
        let engine = build_engine(&args).unwrap();
        assert_eq!(engine.tokenizer_name(), "whitespace");
    }

    #[test]
    fn test_build_engine_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"tokenizer": "whitespace", "max_edit_distance": 0}"#).unwrap();
        let mut args = shared();
        args.config = Some(path);
        let engine = build_engine(&args).unwrap();
        assert_eq!(engine.tokenizer_name(), "whitespace");
        assert_eq!(engine.judge().max_edit_distance(), 0);
    }

    #[test]
    fn test_build_engine_missing_config() {
        let mut args = shared();
        args.config = Some(PathBuf::from("/nonexistent/config.json"));
        assert!(build_engine(&args).is_err());
    }

    #[test]
    fn test_format_report() {
        let engine = ComparisonEngine::default();
        let report = format_report(&engine.compare_texts("Con mèo ngồi", "Con ngồi"));
        assert!(report.contains("Accuracy: 66.7%"));
        assert!(report.contains("omission"));
        assert!(report.contains("'mèo' was skipped"));
        assert!(report.contains("Mistakes (1): 0 substitution, 1 omission, 0 insertion, 0 mispronunciation"));

        let mixed = format_report(&engine.compare_texts("ở giữa nhà", "cái ở dựa nhà"));
        assert!(mixed.contains("Mistakes (2): 0 substitution, 0 omission, 1 insertion, 1 mispronunciation"));

        let clean = format_report(&engine.compare_texts("trời xanh", "chời xanh"));
        assert!(clean.contains("Accuracy: 100.0% (excellent)"));
        assert!(clean.contains("No mistakes"));
    }
}
