use std::fs;
use std::path::PathBuf;

use clap::Parser;
use env_logger::Env;
use log::warn;
use rustyline::completion::FilenameCompleter;
use rustyline::error::ReadlineError;
use rustyline::highlight::MatchingBracketHighlighter;
use rustyline::hint::HistoryHinter;
use rustyline::history::FileHistory;
use rustyline::validate::MatchingBracketValidator;
use rustyline::Editor;

use crate::controller::Session;
use crate::editor::CofreHelper;
use crate::feedback::FeedbackLog;
use crate::settings::Settings;
use crate::store::Ledger;

mod categoriser;
mod common;
mod config;
mod controller;
mod csv_reader;
mod editor;
mod feedback;
mod parser;
mod patterns;
mod review;
mod settings;
mod store;
mod tokeniser;
mod transaction;
mod util;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// Ledger file path. Defaults to cofre.db in the user data dir.
    file: Option<String>,

    /// Directory holding bank statement files
    #[clap(long, default_value = "./extratos")]
    statements: String,

    /// Categorisation rules file
    #[clap(long)]
    rules: Option<String>,
}

static COMMAND_HISTORY_FILE: &str = ".cofre_history";

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli: Cli = Cli::parse();

    let ledger_path = match cli.file {
        Some(file) => PathBuf::from(file),
        None => {
            let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from(".")).join("cofre");
            if let Err(e) = fs::create_dir_all(&data_dir) {
                warn!("Unable to create {}: {e}", data_dir.display());
            }
            data_dir.join("cofre.db")
        }
    };
    let settings_path = ledger_path.with_extension("settings.json");
    let feedback_path = ledger_path.with_extension("feedback.csv");

    let ledger_path_str = ledger_path.to_str().expect("Ledger path is not valid UTF-8").to_string();
    let ledger = Ledger::load(&ledger_path_str).expect("Unable to open ledger file");

    let mut session = Session {
        ledger,
        settings: Settings::load(&settings_path),
        feedback: FeedbackLog::load(&feedback_path),
        statements_dir: PathBuf::from(&cli.statements),
        rules_file: cli.rules.unwrap_or_default(),
        settings_path,
    };

    let mut rl = Editor::<CofreHelper, FileHistory>::new().expect("Unable to initialise terminal");
    rl.set_helper(Some(CofreHelper {
        completer: FilenameCompleter::new(),
        highlighter: MatchingBracketHighlighter::new(),
        validator: MatchingBracketValidator::new(),
        hinter: HistoryHinter::new(),
        colored_prompt: "\x1b[1;32mcofre>\x1b[0m ".to_string(),
    }));
    if rl.load_history(COMMAND_HISTORY_FILE).is_err() {
        println!("No previous history.");
    }

    loop {
        let readline = rl.readline("cofre> ");
        match readline {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(line);

                if line == "quit" || line == "exit" {
                    break;
                }

                if let Err(err) = controller::parse_and_run_command(&mut session, line) {
                    println!("{err}");
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            }
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }
    if let Err(e) = rl.save_history(COMMAND_HISTORY_FILE) {
        warn!("Unable to save command history: {e}");
    }
}
