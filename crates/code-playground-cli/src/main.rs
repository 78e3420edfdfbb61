mod report;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use code_playground::diagnostics::{self, mismatch_report};
use code_playground::reference;
use code_playground::{
    EvaluationError, Playground, PlaygroundConfig, PreviewDocument, REFERENCE_SOLUTION, RunOutcome,
    SourceSet, Verdict,
};

use report::GradeReport;

const DEFAULT_CONFIG_FILE: &str = "Playground.toml";

#[derive(Parser)]
#[command(name = "code-playground")]
#[command(about = "Grade and preview HTML/CSS/JS playground submissions")]
struct Cli {
    /// Playground config (defaults to ./Playground.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Grade a submission against the reference solution
    ///
    /// Texts are compared byte for byte, including any trailing newline.
    /// Use `reference --write-dir` to get files that grade as correct.
    Grade {
        #[command(flatten)]
        sources: SourceFiles,

        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Write the preview document of a submission
    Preview {
        #[command(flatten)]
        sources: SourceFiles,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the reference solution
    Reference {
        /// Write index.html, style.css and script.js byte-exact into this directory
        #[arg(long)]
        write_dir: Option<PathBuf>,
    },
    /// Print the default buffers
    Defaults {
        /// Defaults of the ungraded sandbox instead of the exercise
        #[arg(long)]
        ungraded: bool,

        /// Write index.html, style.css and script.js byte-exact into this directory
        #[arg(long)]
        write_dir: Option<PathBuf>,
    },
}

#[derive(Args)]
struct SourceFiles {
    /// HTML file
    #[arg(long)]
    html: PathBuf,
    /// CSS file
    #[arg(long)]
    css: PathBuf,
    /// JavaScript file
    #[arg(long)]
    js: PathBuf,
}

impl SourceFiles {
    fn read(&self) -> Result<SourceSet> {
        let read = |path: &Path| {
            fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
        };
        Ok(SourceSet::new(
            read(self.html.as_path())?,
            read(self.css.as_path())?,
            read(self.js.as_path())?,
        ))
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Grade { sources, format } => {
            let config = load_config(cli.config.as_deref())?;
            grade(config, &sources, format)
        }
        Commands::Preview { sources, output } => {
            let config = load_config(cli.config.as_deref())?;
            preview(config, &sources, output.as_deref())
        }
        Commands::Reference { write_dir } => {
            emit_sources(&REFERENCE_SOLUTION, write_dir.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Defaults { ungraded, write_dir } => {
            emit_sources(&reference::defaults(!ungraded), write_dir.as_deref())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<PlaygroundConfig> {
    match path {
        Some(path) => PlaygroundConfig::load(path).context("Failed to load playground config"),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            PlaygroundConfig::load(Path::new(DEFAULT_CONFIG_FILE))
                .context("Failed to load playground config")
        }
        None => {
            log::debug!("No {DEFAULT_CONFIG_FILE} found, using defaults");
            Ok(PlaygroundConfig::default())
        }
    }
}

fn run(config: PlaygroundConfig, files: &SourceFiles) -> Result<Playground> {
    let sources = files.read()?;
    let mut playground = Playground::with_sources(config, &sources);
    playground.run();
    Ok(playground)
}

fn failed(verdict: &Verdict) -> bool {
    match verdict {
        Verdict::Incorrect(_) => true,
        Verdict::Unevaluated | Verdict::Correct => false,
    }
}

fn exit_code(verdict: &Verdict) -> ExitCode {
    if failed(verdict) {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn grade(config: PlaygroundConfig, files: &SourceFiles, format: Format) -> Result<ExitCode> {
    let playground = run(config, files)?;
    let outcome = playground.outcome();

    match format {
        Format::Json => {
            let report = GradeReport::from_outcome(outcome);
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Format::Text => match &outcome.verdict {
            Verdict::Unevaluated => println!("Grading is disabled; preview composed."),
            Verdict::Correct => println!("Correct!"),
            Verdict::Incorrect(error) if error.mismatches().is_empty() => {
                eprintln!("{error}");
            }
            Verdict::Incorrect(error) => {
                for mismatch in error.mismatches() {
                    let submitted = playground.buffers().buffer(mismatch.kind);
                    let expected = playground.reference().get(mismatch.kind);
                    eprintln!("{}", mismatch_report(mismatch, submitted, expected));
                }
                eprintln!("{error}");
            }
        },
    }
    Ok(exit_code(&outcome.verdict))
}

/// The document to write, or the error that left the run without one.
fn preview_document(outcome: &RunOutcome) -> Result<&PreviewDocument, &EvaluationError> {
    match outcome.verdict.error() {
        Some(error) => Err(error),
        None => Ok(&outcome.preview),
    }
}

fn preview(config: PlaygroundConfig, files: &SourceFiles, output: Option<&Path>) -> Result<ExitCode> {
    let playground = run(config, files)?;

    let document = match preview_document(playground.outcome()) {
        Ok(document) => document,
        Err(error) => {
            eprintln!("No preview: {error}");
            return Ok(ExitCode::FAILURE);
        }
    };
    match output {
        Some(path) => {
            fs::write(path, document.as_str())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Preview written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(document.as_str().as_bytes())?;
            stdout.write_all(b"\n")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn emit_sources<S: AsRef<str>>(sources: &SourceSet<S>, write_dir: Option<&Path>) -> Result<()> {
    match write_dir {
        Some(dir) => write_sources(sources, dir),
        None => {
            print_sources(sources);
            Ok(())
        }
    }
}

/// Writes each text unchanged, so the files grade exactly like the texts.
fn write_sources<S: AsRef<str>>(sources: &SourceSet<S>, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for (kind, text) in sources.iter() {
        let path = dir.join(diagnostics::file_name(kind));
        fs::write(&path, text).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("{} written to {}", kind.tab_label(), path.display());
    }
    Ok(())
}

fn print_sources<S: AsRef<str>>(sources: &SourceSet<S>) {
    for (kind, text) in sources.iter() {
        println!("--- {} ({})", kind.tab_label(), kind.short_name());
        println!("{text}");
    }
}
