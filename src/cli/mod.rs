//! Command-line interface for commenttree.
//!
//! Without a subcommand the interactive TUI starts. The scriptable commands
//! drive the same navigation controller and print what the TUI would show:
//! - `list`, `show`, `open`: tree views
//! - `search`: ranked hits
//! - `post`, `delete`: mutations
//! - `health`, `config`, `completions`: housekeeping

mod commands;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use std::io;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::Result;
use crate::model::{CommentId, SortOrder};

/// Terminal client for threaded comment trees.
#[derive(Debug, Parser)]
#[command(name = "commenttree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to run (default: tui).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Base URL of the comment service (overrides the config file).
    #[arg(short = 's', long, global = true, env = "COMMENTTREE_SERVER")]
    pub server: Option<String>,

    /// Output as JSON.
    #[arg(long, global = true, env = "COMMENTTREE_JSON")]
    pub json: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn", env = "COMMENTTREE_LOG_LEVEL")]
    pub log_level: LogLevel,

    /// Log format (text, json, compact, pretty).
    #[arg(long, global = true, default_value = "text", env = "COMMENTTREE_LOG_FORMAT")]
    pub log_format: LogFormat,

    /// Log output file (default: stderr; the TUI only logs to a file).
    #[arg(long, global = true, env = "COMMENTTREE_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Path to custom configuration file.
    #[arg(long, global = true, env = "COMMENTTREE_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Log level options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Only errors.
    Error,
    /// Errors and warnings.
    #[default]
    Warn,
    /// Errors, warnings, and informational messages.
    Info,
    /// All of the above plus debug messages.
    Debug,
    /// All messages including trace-level details.
    Trace,
}

/// Log format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable text format.
    #[default]
    Text,
    /// Structured JSON format for machine consumption.
    Json,
    /// Compact single-line format.
    Compact,
    /// Pretty format with full details.
    Pretty,
}

impl LogLevel {
    /// Convert to tracing filter level.
    #[must_use]
    pub fn to_filter_string(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Output format for CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON output.
    Json,
}

impl Cli {
    /// Get effective output format.
    #[must_use]
    pub fn effective_output(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }

    /// Whether this invocation runs the interactive TUI.
    #[must_use]
    pub fn is_tui(&self) -> bool {
        matches!(self.command, None | Some(Commands::Tui(_)))
    }
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Launch the interactive terminal UI.
    #[command(alias = "ui")]
    Tui(TuiArgs),

    /// Show top-level comments with their replies.
    #[command(alias = "ls")]
    List(ListArgs),

    /// Show one thread.
    Show(ShowArgs),

    /// Full-text search.
    #[command(alias = "find")]
    Search(SearchArgs),

    /// Show the thread containing a comment, with that comment highlighted.
    Open(OpenArgs),

    /// Post a top-level comment or a reply.
    Post(PostArgs),

    /// Delete a comment and all replies under it.
    #[command(alias = "rm")]
    Delete(DeleteArgs),

    /// Check that the comment service is reachable.
    Health,

    /// Manage configuration.
    Config(ConfigArgs),

    /// Generate shell completions.
    Completions(CompletionsArgs),
}

/// Arguments for the tui command.
#[derive(Debug, Default, Parser)]
pub struct TuiArgs {
    /// Color theme (dark, light, high-contrast).
    #[arg(long)]
    pub theme: Option<String>,

    /// Use ASCII glyphs instead of Unicode.
    #[arg(long)]
    pub ascii: bool,
}

/// Arguments for the list command.
#[derive(Debug, Parser)]
pub struct ListArgs {
    /// Tree order (created_at_desc, created_at_asc; also newest, oldest).
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// Thread root id.
    pub id: CommentId,

    /// Comment to highlight.
    #[arg(long)]
    pub highlight: Option<CommentId>,

    /// Tree order.
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

/// Arguments for the search command.
#[derive(Debug, Parser)]
pub struct SearchArgs {
    /// Search query.
    pub query: String,

    /// Maximum number of hits.
    #[arg(short = 'n', long)]
    pub limit: Option<u32>,
}

/// Arguments for the open command.
#[derive(Debug, Parser)]
pub struct OpenArgs {
    /// Comment to locate (usually a search hit id).
    pub id: CommentId,

    /// Tree order.
    #[arg(long)]
    pub sort: Option<SortOrder>,
}

/// Arguments for the post command.
#[derive(Debug, Parser)]
pub struct PostArgs {
    /// Comment text.
    pub text: String,

    /// Reply to this comment instead of posting at the top level.
    #[arg(short = 'p', long)]
    pub parent: Option<CommentId>,
}

/// Arguments for the delete command.
#[derive(Debug, Parser)]
pub struct DeleteArgs {
    /// Comment to delete.
    pub id: CommentId,

    /// Skip the confirmation prompt.
    #[arg(short = 'y', long)]
    pub yes: bool,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    /// Config action to perform.
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,

    /// Show configuration file path.
    Path,

    /// Write a configuration file with defaults.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the completions command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for.
    #[arg(value_enum)]
    pub shell: CompletionShell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CompletionShell {
    /// Bash shell.
    Bash,
    /// Zsh shell.
    Zsh,
    /// Fish shell.
    Fish,
    /// PowerShell.
    Powershell,
    /// Elvish shell.
    Elvish,
}

impl From<CompletionShell> for Shell {
    fn from(shell: CompletionShell) -> Self {
        match shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
            CompletionShell::Elvish => Shell::Elvish,
        }
    }
}

/// Generate shell completions and print to stdout.
pub fn generate_completions(shell: CompletionShell) {
    let mut cmd = Cli::command();
    let shell: Shell = shell.into();
    generate(shell, &mut cmd, "commenttree", &mut io::stdout());
}

/// Initialize tracing/logging based on CLI options.
///
/// The TUI owns the terminal, so it only logs when `--log-file` is given.
fn init_logging(cli: &Cli) {
    use std::sync::Arc;
    use tracing_subscriber::{
        fmt::{self, format::FmtSpan, writer::BoxMakeWriter},
        layer::SubscriberExt,
        util::SubscriberInitExt,
        EnvFilter,
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.to_filter_string()));

    let file = cli.log_file.as_ref().and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| eprintln!("Warning: Could not open log file {}: {e}", path.display()))
            .ok()
    });
    let ansi = file.is_none();
    let writer = match file {
        Some(file) => BoxMakeWriter::new(Arc::new(file)),
        None if cli.is_tui() => BoxMakeWriter::new(io::sink),
        None => BoxMakeWriter::new(io::stderr),
    };

    let result = match cli.log_format {
        LogFormat::Json => {
            let layer = fmt::layer()
                .json()
                .with_span_events(FmtSpan::CLOSE)
                .with_file(true)
                .with_line_number(true)
                .with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Compact => {
            let layer = fmt::layer()
                .compact()
                .with_target(false)
                .with_ansi(ansi)
                .with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Pretty => {
            let layer = fmt::layer()
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .with_ansi(ansi)
                .with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
        LogFormat::Text => {
            let layer = fmt::layer().with_ansi(ansi).with_writer(writer);
            tracing_subscriber::registry().with(filter).with(layer).try_init()
        }
    };

    if let Err(e) = result {
        eprintln!("Warning: Could not initialize logging: {e}");
    }
}

/// Load the config file and apply command-line overrides.
///
/// An explicit `--config` path must load; the default location falls back to
/// defaults with a warning.
pub fn effective_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable config file");
            Config::default()
        }),
    };

    if let Some(server) = &cli.server {
        config.server.base_url = server.clone();
    }
    if let Some(Commands::Tui(args)) = &cli.command {
        if let Some(theme) = &args.theme {
            config.theme.name = theme.clone();
        }
        if args.ascii {
            config.theme.unicode = false;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Run the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli);

    match &cli.command {
        Some(Commands::Completions(args)) => {
            generate_completions(args.shell);
            return Ok(());
        }
        Some(Commands::Config(args)) => return commands::config::run(&cli, args),
        _ => {}
    }

    let config = effective_config(&cli)?;

    match &cli.command {
        None => commands::tui::run(&config),
        Some(Commands::Tui(_)) => commands::tui::run(&config),
        Some(Commands::List(args)) => commands::list::run_list(&cli, &config, args),
        Some(Commands::Show(args)) => commands::list::run_show(&cli, &config, args),
        Some(Commands::Open(args)) => commands::list::run_open(&cli, &config, args),
        Some(Commands::Search(args)) => commands::search::run(&cli, &config, args),
        Some(Commands::Post(args)) => commands::post::run_post(&cli, &config, args),
        Some(Commands::Delete(args)) => commands::post::run_delete(&cli, &config, args),
        Some(Commands::Health) => commands::health::run(&cli, &config),
        Some(Commands::Config(_) | Commands::Completions(_)) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::parse_from(["commenttree"]);
        assert!(cli.command.is_none());
        assert!(cli.is_tui());
    }

    #[test]
    fn test_parse_post_reply() {
        let cli = Cli::parse_from(["commenttree", "post", "hello there", "--parent", "7"]);
        match cli.command {
            Some(Commands::Post(args)) => {
                assert_eq!(args.text, "hello there");
                assert_eq!(args.parent, Some(7));
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(!Cli::parse_from(["commenttree", "post", "x"]).is_tui());
    }

    #[test]
    fn test_parse_sort_alias() {
        let cli = Cli::parse_from(["commenttree", "list", "--sort", "oldest"]);
        match cli.command {
            Some(Commands::List(args)) => assert_eq!(args.sort, Some(SortOrder::CreatedAsc)),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_server_override() {
        let cli = Cli::parse_from([
            "commenttree",
            "--server",
            "http://example.test:9000",
            "--config",
            "/nonexistent/commenttree.toml",
            "health",
        ]);
        assert!(effective_config(&cli).is_err());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nbase_url = \"http://from-file:1\"\n").unwrap();
        let cli = Cli::parse_from([
            "commenttree",
            "--server",
            "http://example.test:9000",
            "--config",
            path.to_str().unwrap(),
            "health",
        ]);
        let config = effective_config(&cli).unwrap();
        assert_eq!(config.server.base_url, "http://example.test:9000");
    }

    #[test]
    fn test_log_level_to_filter() {
        assert_eq!(LogLevel::Error.to_filter_string(), "error");
        assert_eq!(LogLevel::Warn.to_filter_string(), "warn");
        assert_eq!(LogLevel::Debug.to_filter_string(), "debug");
        assert_eq!(LogLevel::Trace.to_filter_string(), "trace");
    }
}
