use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prompt_chat::{Config, ConfigBuilder, ExtractionReport, ResponseMatcher, StudySession};
use rand::Rng;
use tracing_subscriber::EnvFilter;

/// prompt-chat - canned-response chat and a document study assistant
#[derive(Parser)]
#[command(name = "prompt-chat")]
#[command(about = "Chat with a keyword bot, or ask questions about your documents")]
#[command(version)]
struct Cli {
    /// Location of the extracted-text cache
    #[arg(long, global = true, value_name = "PATH")]
    cache: Option<PathBuf>,

    /// JSON file mapping keywords to reply lists
    #[arg(long, global = true, value_name = "PATH")]
    responses: Option<PathBuf>,

    /// Write extraction failures into the corpus instead of only reporting them
    #[arg(long, global = true)]
    inline_errors: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Chat with the keyword bot; reads messages from stdin when none is given
    Chat(ChatCommand),
    /// Extract text from documents into the cache
    Extract(ExtractCommand),
    /// Answer one question from the cached text
    Ask(AskCommand),
    /// Upload documents, then answer questions read from stdin
    Study(StudyCommand),
}

#[derive(Parser)]
struct ChatCommand {
    /// A single message to reply to
    #[arg(value_name = "MESSAGE")]
    message: Option<String>,
}

#[derive(Parser)]
struct ExtractCommand {
    /// PDF, image (jpg, jpeg, png) or text files, in order
    #[arg(value_name = "FILES", required = true)]
    files: Vec<PathBuf>,
}

#[derive(Parser)]
struct AskCommand {
    /// The question to answer
    #[arg(value_name = "QUESTION")]
    question: String,
}

#[derive(Parser)]
struct StudyCommand {
    /// Files to upload before asking; the cache is used when omitted
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(&cli);

    if let Err(e) = result {
        let exit_code = if is_user_error(&e) { 1 } else { 2 };
        eprintln!("Error: {e:#}");
        std::process::exit(exit_code);
    }
}

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` takes precedence over the `--verbose` flag.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "prompt_chat=debug"
    } else {
        "prompt_chat=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = build_config(cli)?;
    let stdin = io::stdin();
    let stdout = io::stdout();

    match &cli.command {
        Commands::Chat(cmd) => {
            let table = config
                .response_table()
                .context("Failed to load response table")?;
            let mut matcher = ResponseMatcher::new(table);
            match &cmd.message {
                Some(message) => {
                    if message.trim().is_empty() {
                        anyhow::bail!("Message cannot be empty");
                    }
                    println!("{}", matcher.respond(message));
                    Ok(())
                }
                None => run_chat_loop(&mut matcher, stdin.lock(), stdout.lock()),
            }
        }
        Commands::Extract(cmd) => {
            let mut session = StudySession::new(config.extractor());
            if let Some(report) = session.upload(&cmd.files)? {
                print_upload_summary(&mut stdout.lock(), session.uploaded_files(), &report)?;
            }
            Ok(())
        }
        Commands::Ask(cmd) => {
            if cmd.question.trim().is_empty() {
                anyhow::bail!("Question cannot be empty");
            }
            let mut session = StudySession::new(config.extractor());
            println!("{}", session.ask(&cmd.question)?);
            Ok(())
        }
        Commands::Study(cmd) => {
            let mut session = StudySession::new(config.extractor());
            if let Some(report) = session.upload(&cmd.files)? {
                print_upload_summary(&mut stdout.lock(), session.uploaded_files(), &report)?;
            }
            run_study_loop(&mut session, stdin.lock(), stdout.lock())
        }
    }
}

/// Resolves configuration, letting command-line flags override the environment.
fn build_config(cli: &Cli) -> Result<Config> {
    let mut builder = ConfigBuilder::new();
    if let Some(cache) = &cli.cache {
        builder = builder.cache_path(cache);
    }
    if let Some(responses) = &cli.responses {
        builder = builder.responses_path(responses);
    }
    if cli.inline_errors {
        builder = builder.inline_errors(true);
    }
    builder.build().context("Failed to resolve configuration")
}

/// Determines if an error is a user error (vs internal error).
///
/// User errors are input validation failures such as an empty message.
fn is_user_error(error: &anyhow::Error) -> bool {
    error.to_string().contains("cannot be empty")
}

/// Returns true for lines that end an interactive loop.
fn is_exit_command(line: &str) -> bool {
    matches!(line, "exit" | "quit")
}

/// Replies to every message read from `input` until EOF or `exit`.
///
/// Blank lines are ignored.
fn run_chat_loop<R: Rng>(
    matcher: &mut ResponseMatcher<R>,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write!(output, "You: ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("Failed to read message")?;
        let message = line.trim();
        if is_exit_command(message) {
            break;
        }
        if !message.is_empty() {
            writeln!(output, "Bot: {}", matcher.respond(message))?;
        }
        write!(output, "You: ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

/// Answers every question read from `input` until EOF or `exit`.
///
/// Blank lines are ignored.
fn run_study_loop(
    session: &mut StudySession,
    input: impl BufRead,
    mut output: impl Write,
) -> Result<()> {
    write!(output, "Question: ")?;
    output.flush()?;
    for line in input.lines() {
        let line = line.context("Failed to read question")?;
        let question = line.trim();
        if is_exit_command(question) {
            break;
        }
        if !question.is_empty() {
            writeln!(output, "Answer: {}", session.ask(question)?)?;
        }
        write!(output, "Question: ")?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

/// Prints the uploaded file names, the total, and any failures.
fn print_upload_summary(
    output: &mut impl Write,
    files: &[String],
    report: &ExtractionReport,
) -> Result<()> {
    for name in files {
        writeln!(output, "{name}")?;
    }
    writeln!(output, "\nTotal Files Uploaded: {}", files.len())?;
    for path in report.skipped() {
        writeln!(output, "Skipped unsupported file: {}", path.display())?;
    }
    for failure in report.failures() {
        writeln!(output, "Could not extract {failure}")?;
    }
    writeln!(output, "Text extracted and saved!")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use prompt_chat::extraction::{CorpusCache, Extractor};
    use prompt_chat::ResponseTable;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    fn transcript(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).expect("transcript should be UTF-8")
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["prompt-chat", "ask", "why?", "--cache", "c.txt", "-v"])
            .expect("arguments should parse");
        assert_eq!(cli.cache, Some(PathBuf::from("c.txt")));
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Ask(ref cmd) if cmd.question == "why?"));
    }

    #[test]
    fn extract_requires_files() {
        assert!(Cli::try_parse_from(["prompt-chat", "extract"]).is_err());
    }

    #[test]
    fn user_errors_are_detected() {
        assert!(is_user_error(&anyhow::anyhow!("Question cannot be empty")));
        assert!(!is_user_error(&anyhow::anyhow!("disk on fire")));
    }

    #[test]
    fn chat_loop_replies_and_skips_blank_lines() {
        let table = ResponseTable::new([("hello", ["Hi there!"])]);
        let mut matcher = ResponseMatcher::with_rng(table, StdRng::seed_from_u64(1));
        let mut output = Vec::new();

        run_chat_loop(&mut matcher, Cursor::new("hello\n\n  \nexit\nhello\n"), &mut output)
            .unwrap();

        let text = transcript(output);
        assert_eq!(text.matches("Bot: Hi there!").count(), 1);
    }

    #[test]
    fn study_loop_answers_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = CorpusCache::new(dir.path().join("cache.txt"));
        cache.write("Gravity pulls objects together. Light travels fast.\n").unwrap();
        let mut session = StudySession::new(Extractor::new(cache));
        let mut output = Vec::new();

        run_study_loop(&mut session, Cursor::new("what does gravity do\n"), &mut output).unwrap();

        assert!(transcript(output).contains("Answer: Gravity pulls objects together."));
    }

    #[test]
    fn upload_summary_lists_files_and_total() {
        let report = ExtractionReport::default();
        let mut output = Vec::new();

        print_upload_summary(&mut output, &["a.pdf".into(), "b.txt".into()], &report).unwrap();

        let text = transcript(output);
        assert!(text.starts_with("a.pdf\nb.txt\n"));
        assert!(text.contains("Total Files Uploaded: 2"));
        assert!(text.ends_with("Text extracted and saved!\n"));
    }
}
