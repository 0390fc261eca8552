use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use simplelog::{ConfigBuilder, WriteLogger};

use notetype::core::action::Collaborators;
use notetype::core::commands;
use notetype::core::config::{self, CliOverrides, ResolvedConfig};
use notetype::core::error::StoreError;
use notetype::core::paths;
use notetype::tui;

#[derive(Parser)]
#[command(
    name = "notetype",
    version,
    about = "Your personal journal and notes, in the terminal"
)]
struct Cli {
    /// Directory holding notes (default: current directory)
    #[arg(long, global = true)]
    notes_dir: Option<PathBuf>,

    /// Directory holding journal entries (default: ~/.notetype/journal)
    #[arg(long, global = true)]
    journal_dir: Option<PathBuf>,

    /// Log level: error, warn, info, debug, trace, off
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the interactive interface (the default)
    Tui,
    /// Write today's journal entry, or view and list entries
    Journal(JournalArgs),
    /// Create a note with a title header
    New { id: String, title: String },
    /// Append text to an existing note
    Update {
        id: String,
        /// Text to append; read from stdin when omitted
        content: Vec<String>,
        /// Prefix the text with an "Updated:" timestamp
        #[arg(short, long)]
        timestamp: bool,
    },
    /// Delete a note
    #[command(visible_alias = "remove")]
    Delete { id: String },
    /// Browse #tags across notes and journal entries
    Tags {
        #[command(subcommand)]
        action: Option<TagsAction>,
    },
    /// Show, list, preview or set the interface theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Work with note templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

#[derive(Args)]
#[command(args_conflicts_with_subcommands = true)]
struct JournalArgs {
    /// Entry text; read from stdin (until EOF or a line `EOF`) when omitted
    entry: Vec<String>,

    #[command(subcommand)]
    action: Option<JournalAction>,
}

#[derive(Subcommand)]
enum JournalAction {
    /// Print today's entry
    View,
    /// List entries, newest first
    List {
        /// Show at most this many entries (0 = all)
        #[arg(short, long, default_value_t = 0)]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum TagsAction {
    /// Every tag with its file count
    List,
    /// Files mentioning a tag
    Show { tag: String },
}

#[derive(Subcommand)]
enum ThemeAction {
    List,
    Set { name: String },
    Preview { name: String },
}

#[derive(Subcommand)]
enum TemplateAction {
    /// Built-in and custom templates
    List,
    /// Print a template's body
    Show { name: String },
    /// Create note `id` from a template
    Apply {
        name: String,
        id: String,
        title: String,
    },
    /// Save a file as a custom template
    Add { name: String, file: PathBuf },
}

fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(dir) = config.log_file.parent()
        && paths::ensure_dir(dir).is_err()
    {
        return;
    }
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

fn joined(words: &[String]) -> Option<String> {
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn run_command(
    command: Command,
    config: ResolvedConfig,
    out: &mut dyn Write,
) -> Result<(), StoreError> {
    if let Command::Tui = command {
        return tui::launch(config).map_err(StoreError::Io);
    }

    let collab = &Collaborators::from_config(&config);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match command {
        Command::Tui => Ok(()),
        Command::Journal(args) => match args.action {
            Some(JournalAction::View) => commands::journal_view(collab, out),
            Some(JournalAction::List { limit }) => commands::journal_list(collab, limit, out),
            None => {
                let entry = joined(&args.entry);
                commands::journal_entry(collab, entry.as_deref(), &mut input, out)
            }
        },
        Command::New { id, title } => commands::new_note(collab, &id, &title, out),
        Command::Update {
            id,
            content,
            timestamp,
        } => {
            let content = joined(&content);
            commands::update_note(collab, &id, content.as_deref(), timestamp, &mut input, out)
        }
        Command::Delete { id } => commands::delete_note(collab, &id, out),
        Command::Tags { action } => match action {
            None | Some(TagsAction::List) => commands::tags_list(collab, out),
            Some(TagsAction::Show { tag }) => commands::tags_show(collab, &tag, out),
        },
        Command::Theme { action } => match action {
            None => commands::theme_current(collab, out),
            Some(ThemeAction::List) => commands::theme_list(collab, out),
            Some(ThemeAction::Set { name }) => commands::theme_set(collab, &name, out),
            Some(ThemeAction::Preview { name }) => commands::theme_preview(&name, out),
        },
        Command::Template { action } => match action {
            TemplateAction::List => commands::template_list(collab, out),
            TemplateAction::Show { name } => commands::template_show(collab, &name, out),
            TemplateAction::Apply { name, id, title } => {
                commands::template_apply(collab, &name, &id, &title, out)
            }
            TemplateAction::Add { name, file } => {
                commands::template_add(collab, &name, &file, out)
            }
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    dotenv::dotenv().ok();

    let (file_config, config_error) = match config::load_config() {
        Ok(cfg) => (cfg, None),
        Err(e) => {
            eprintln!("Warning: {}; using defaults", e);
            (Default::default(), Some(e))
        }
    };
    let overrides = CliOverrides {
        notes_dir: cli.notes_dir,
        journal_dir: cli.journal_dir,
        log_level: cli.log_level,
    };
    let resolved = config::resolve(&file_config, &overrides);

    init_logging(&resolved);
    if let Some(e) = config_error {
        log::warn!("Ignoring config file: {}", e);
    }
    log::info!(
        "NoteType starting: notes={} journal={}",
        resolved.notes_dir.display(),
        resolved.journal_dir.display()
    );

    let command = cli.command.unwrap_or(Command::Tui);
    let mut stdout = io::stdout();
    match run_command(command, resolved, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Command failed: {}", e);
            eprintln!("❌ {}", e);
            ExitCode::FAILURE
        }
    }
}
