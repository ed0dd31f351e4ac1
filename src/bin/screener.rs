//! CLI binary for resume-screener.
//!
//! A thin shim over the library crate: collects the job description, the
//! uploaded resume and a mode, runs one screening and prints the labelled
//! response.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use resume_screener::prompts::{CUSTOM_LABEL, CUSTOM_TAG};
use resume_screener::{
    load_document, Mode, Preset, Screener, ScreenerConfig, ScreenerError, DEFAULT_CUSTOM_PROMPT,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const UPLOAD_WARNING: &str = "Please upload a resume PDF file.";

const AFTER_HELP: &str = r#"EXAMPLES:
  # HR summary of a resume against a job posting
  screener --resume cv.pdf --job-file posting.txt --mode summary

  # ATS-style score, JSON output
  screener -r cv.pdf -j "Data engineer, Spark, AWS" --mode scoring --json

  # Free-form question
  screener -r cv.pdf --job-file posting.txt --prompt "Does the candidate know Kubernetes?"

  # List the preset modes
  screener --list-modes

ENVIRONMENT VARIABLES:
  GOOGLE_API_KEY          Gemini API key (GEMINI_API_KEY is also accepted)
  PDFIUM_LIB_PATH         Directory holding libpdfium, or the library file
                          (default: /usr/local/lib)
  SCREENER_MODEL          Override the model ID (default: gemini-pro-latest)
  SCREENER_API_BASE_URL   Override the API base URL

  A .env file in the working directory is read at startup.
"#;

/// Screen a resume against a job description with a vision model.
#[derive(Parser, Debug)]
#[command(
    name = "screener",
    version,
    about = "Screen a resume PDF against a job description with a vision model",
    long_about = "Render the first page of a resume PDF, send it together with a job description \
and an analysis instruction to Gemini, and print the model's answer.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Resume PDF to screen. Only the first page is sent.
    #[arg(short, long)]
    resume: Option<PathBuf>,

    /// Job description text.
    #[arg(short, long, conflicts_with = "job_file")]
    job: Option<String>,

    /// Read the job description from this file.
    #[arg(long)]
    job_file: Option<PathBuf>,

    /// Analysis to run.
    #[arg(short, long, value_parser = parse_mode, required_unless_present_any = ["list_modes", "prompt"])]
    mode: Option<ModeChoice>,

    /// Custom instruction (implies `--mode custom`). May be empty.
    #[arg(short, long)]
    prompt: Option<String>,

    /// Model ID override.
    #[arg(long)]
    model: Option<String>,

    /// pdfium location override (directory or library file).
    #[arg(long)]
    renderer_path: Option<PathBuf>,

    /// Print the analysis as JSON.
    #[arg(long, conflicts_with = "html")]
    json: bool,

    /// Replace newlines in the response with <br>.
    #[arg(long)]
    html: bool,

    /// List the preset modes and exit.
    #[arg(long)]
    list_modes: bool,

    /// Disable the spinner.
    #[arg(long)]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all output except errors and the response.
    #[arg(short, long)]
    quiet: bool,
}

/// `--mode` value: a preset tag or `custom`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ModeChoice {
    Preset(Preset),
    Custom,
}

fn parse_mode(s: &str) -> Result<ModeChoice, String> {
    if s.trim().eq_ignore_ascii_case(CUSTOM_TAG) {
        Ok(ModeChoice::Custom)
    } else {
        s.parse().map(ModeChoice::Preset)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    if cli.list_modes {
        print_modes();
        return Ok(());
    }

    let mode = resolve_mode(cli.mode, cli.prompt.clone())?;

    // ── Guard: nothing uploaded ──────────────────────────────────────────
    let Some(ref resume_path) = cli.resume else {
        eprintln!("{} {}", yellow("⚠"), UPLOAD_WARNING);
        return Ok(());
    };

    // ── Build config (read once) ─────────────────────────────────────────
    let config = ScreenerConfig::from_env()
        .and_then(|c| apply_overrides(c, &cli))
        .context("Invalid configuration")?;

    let job_text = read_job_text(&cli).await?;
    let document = load_document(resume_path)
        .await
        .context("Failed to read resume")?;

    // ── Run screening ────────────────────────────────────────────────────
    let spinner = show_progress.then(|| start_spinner(mode.label()));
    let screener = Screener::from_config(&config);
    let result = screener.screen(&job_text, Some(document.as_slice()), &mode).await;
    if let Some(ref bar) = spinner {
        bar.finish_and_clear();
    }
    let analysis = result.context("Screening failed")?;

    // ── Output ───────────────────────────────────────────────────────────
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if cli.json {
        let json =
            serde_json::to_string_pretty(&analysis).context("Failed to serialise analysis")?;
        writeln!(handle, "{json}").context("Failed to write to stdout")?;
    } else {
        let body = if cli.html {
            analysis.response_as_html()
        } else {
            analysis.response.clone()
        };
        if !cli.quiet {
            writeln!(handle, "{}\n", bold(&analysis.label)).context("Failed to write to stdout")?;
        }
        handle
            .write_all(body.as_bytes())
            .context("Failed to write to stdout")?;
        if !body.ends_with('\n') {
            handle.write_all(b"\n").ok();
        }
    }

    Ok(())
}

/// Map `--mode` / `--prompt` to a single [`Mode`].
fn resolve_mode(mode: Option<ModeChoice>, prompt: Option<String>) -> Result<Mode> {
    let preset = match mode {
        Some(ModeChoice::Preset(p)) => Some(p),
        Some(ModeChoice::Custom) | None => None,
    };
    match (preset, prompt) {
        (Some(_), Some(_)) => {
            anyhow::bail!("--prompt only applies to custom mode; drop --mode or use --mode custom")
        }
        (Some(preset), None) => Ok(Mode::Preset(preset)),
        (None, Some(text)) => Ok(Mode::Custom(text)),
        (None, None) => Ok(Mode::Custom(DEFAULT_CUSTOM_PROMPT.to_string())),
    }
}

/// Apply `--model` / `--renderer-path` and re-validate.
fn apply_overrides(
    config: ScreenerConfig,
    cli: &Cli,
) -> Result<ScreenerConfig, ScreenerError> {
    let mut builder = config.into_builder();
    if let Some(ref model) = cli.model {
        builder = builder.model(model.clone());
    }
    if let Some(ref path) = cli.renderer_path {
        builder = builder.renderer_path(path.clone());
    }
    builder.build()
}

async fn read_job_text(cli: &Cli) -> Result<String> {
    if let Some(ref path) = cli.job_file {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read job description from {:?}", path));
    }
    Ok(cli.job.clone().unwrap_or_default())
}

fn start_spinner(label: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Screening");
    bar.set_message(label.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn print_modes() {
    for preset in Preset::ALL {
        println!(
            "{:<12} {:<24} {}",
            cyan(preset.tag()),
            bold(preset.label()),
            dim(preset.question())
        );
    }
    println!(
        "{:<12} {:<24} {}",
        cyan(CUSTOM_TAG),
        bold(CUSTOM_LABEL),
        dim("Your own instruction via --prompt")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_mode_without_prompt() {
        assert_eq!(
            resolve_mode(Some(ModeChoice::Preset(Preset::SkillsGap)), None).unwrap(),
            Mode::Preset(Preset::SkillsGap)
        );
    }

    #[test]
    fn custom_mode_defaults_to_prefilled_prompt() {
        assert_eq!(
            resolve_mode(Some(ModeChoice::Custom), None).unwrap(),
            Mode::Custom(DEFAULT_CUSTOM_PROMPT.to_string())
        );
    }

    #[test]
    fn prompt_alone_implies_custom_and_may_be_empty() {
        assert_eq!(
            resolve_mode(None, Some(String::new())).unwrap(),
            Mode::Custom(String::new())
        );
    }

    #[test]
    fn prompt_with_preset_is_rejected() {
        assert!(resolve_mode(Some(ModeChoice::Preset(Preset::Fit)), Some("x".into())).is_err());
    }

    #[test]
    fn kebab_case_mode_values_parse() {
        let cli = Cli::try_parse_from(["screener", "--mode", "multi-role", "-r", "cv.pdf"]).unwrap();
        assert_eq!(cli.mode, Some(ModeChoice::Preset(Preset::MultiRole)));
        assert_eq!(cli.resume, Some(PathBuf::from("cv.pdf")));
    }

    #[test]
    fn every_preset_tag_and_custom_are_accepted() {
        for preset in Preset::ALL {
            let cli = Cli::try_parse_from(["screener", "--mode", preset.tag()]).unwrap();
            assert_eq!(cli.mode, Some(ModeChoice::Preset(preset)));
        }
        let cli = Cli::try_parse_from(["screener", "--mode", "custom"]).unwrap();
        assert_eq!(cli.mode, Some(ModeChoice::Custom));
        assert!(Cli::try_parse_from(["screener", "--mode", "hire"]).is_err());
    }

    #[test]
    fn empty_model_override_is_invalid_config() {
        let cli = Cli::try_parse_from(["screener", "--mode", "fit", "--model", ""]).unwrap();
        let err = apply_overrides(ScreenerConfig::default(), &cli).unwrap_err();
        assert!(
            matches!(err, ScreenerError::InvalidConfig(_)),
            "got: {err:?}"
        );
    }

    #[test]
    fn model_override_replaces_configured_model() {
        let cli = Cli::try_parse_from(["screener", "--mode", "fit", "--model", "gemini-2.5-flash"])
            .unwrap();
        let config = apply_overrides(ScreenerConfig::default(), &cli).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
    }

    #[test]
    fn job_and_job_file_conflict() {
        let res = Cli::try_parse_from([
            "screener", "--mode", "fit", "--job", "jd", "--job-file", "jd.txt",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn mode_required_unless_listing() {
        assert!(Cli::try_parse_from(["screener", "-r", "cv.pdf"]).is_err());
        assert!(Cli::try_parse_from(["screener", "--list-modes"]).is_ok());
    }
}
