use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "repz")]
#[command(about = "File-backed workout tracker shell", long_about = None)]
pub struct Cli {
    /// Directory for the session marker (defaults to the platform data dir)
    #[arg(long)]
    pub state_dir: Option<PathBuf>,
}

/// One line typed into the shell.
#[derive(Parser, Debug)]
#[command(name = "repz", no_binary_name = true, disable_version_flag = true)]
#[command(about = "Workout tracker commands", long_about = None)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start a session (no password; a username is all there is)
    Login {
        username: String,
    },

    /// End the session, wiping all in-memory data
    Logout,

    /// Print the active session's username
    Whoami,

    /// Manage workout templates
    #[command(subcommand)]
    Template(TemplateCmd),

    /// Manage logged workouts
    #[command(subcommand)]
    Log(LogCmd),

    /// Write a snapshot of everything to a JSON file
    Export {
        /// Output path (defaults to repz-{user}-{date}.json)
        path: Option<PathBuf>,
    },

    /// Restore a snapshot file, replacing session and data
    Import {
        path: PathBuf,
    },

    /// Leave the shell (unexported data is lost)
    #[command(alias = "exit")]
    Quit,
}

#[derive(Subcommand, Debug)]
pub enum TemplateCmd {
    /// Add a template from a JSON file
    Add { file: PathBuf },
    /// List all templates
    #[command(alias = "ls")]
    List,
    /// Show one template in full
    Show { id: String },
    /// Replace a template from a JSON file (matched by id)
    Edit { file: PathBuf },
    /// Delete a template
    Rm { id: String },
}

#[derive(Subcommand, Debug)]
pub enum LogCmd {
    /// Add a logged workout from a JSON file
    Add { file: PathBuf },
    /// List all logged workouts, newest first
    #[command(alias = "ls")]
    List,
    /// Show one logged workout in full
    Show { id: String },
    /// Replace a logged workout from a JSON file (matched by id)
    Edit { file: PathBuf },
    /// Delete a logged workout
    Rm { id: String },
}

/// Split a shell line into tokens, honoring double quotes.
pub fn split_line(line: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
