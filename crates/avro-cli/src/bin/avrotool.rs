use std::path::Path;

use clap::{Parser, Subcommand};

use avro_cli::commands::{config_ops, convert_ops};
use avro_cli::trace_init::init_tracing;
use avro_core::settings::settings;
use avro_core::Mode;

#[derive(Parser)]
#[command(name = "avrotool", about = "Avro Phonetic transliteration tool")]
struct Cli {
    /// Custom settings TOML (see `settings-export`)
    #[arg(long, global = true)]
    settings: Option<String>,
    /// Log engine spans to stderr (requires the `trace` feature)
    #[arg(long, global = true)]
    trace: bool,
    /// Write the trace as JSONL into this directory instead of stderr
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate TEXT, or every line of stdin
    Convert {
        /// Text to convert (reads stdin when omitted)
        text: Option<String>,
        /// Mode: avro, orva, banglish, lishbang (default from settings)
        #[arg(short, long)]
        mode: Option<String>,
        /// Grammar JSON file (default: embedded Avro grammar)
        #[arg(long)]
        grammar: Option<String>,
    },
    /// Show how each part of TEXT was matched and resolved
    Explain {
        text: String,
        #[arg(long)]
        grammar: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Look up a Latin sequence in the pattern trie
    Lookup {
        seq: String,
        #[arg(long)]
        grammar: Option<String>,
    },
    /// Run a TOML fixture corpus and report mismatches
    Accuracy {
        corpus_file: String,
        #[arg(long)]
        grammar: Option<String>,
        /// Only run cases in this category
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        verbose: bool,
    },
    /// Print the embedded grammar JSON
    GrammarExport,
    /// Decode a grammar JSON file and report its size
    GrammarValidate { file: String },
    /// Print the embedded default settings TOML
    SettingsExport,
    /// Parse and validate a settings TOML file
    SettingsValidate { file: String },
}

fn main() {
    let cli = Cli::parse();

    if cli.trace || cli.trace_dir.is_some() {
        init_tracing(cli.trace_dir.as_deref().map(Path::new));
    }
    if let Some(file) = &cli.settings {
        config_ops::settings_install(file);
    }

    match cli.command {
        Command::Convert {
            text,
            mode,
            grammar,
        } => {
            let mode = match mode {
                Some(m) => m.parse::<Mode>().unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    std::process::exit(2);
                }),
                None => settings().default_mode(),
            };
            convert_ops::convert_cmd(text.as_deref(), mode, grammar.as_deref());
        }
        Command::Explain {
            text,
            grammar,
            json,
        } => convert_ops::explain_cmd(&text, grammar.as_deref(), json),
        Command::Lookup { seq, grammar } => convert_ops::lookup_cmd(&seq, grammar.as_deref()),
        Command::Accuracy {
            corpus_file,
            grammar,
            category,
            verbose,
        } => convert_ops::accuracy_cmd(
            &corpus_file,
            grammar.as_deref(),
            category.as_deref(),
            verbose,
        ),
        Command::GrammarExport => config_ops::grammar_export(),
        Command::GrammarValidate { file } => config_ops::grammar_validate(&file),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
