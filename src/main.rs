use clap::Parser;
use directories::ProjectDirs;
use repz::api::RepzApi;
use repz::error::{RepzError, Result};
use repz::model::{fresh_id, normalize_exercises, LoggedWorkout, WorkoutTemplate};
use repz::session::{FsMarkerStore, MarkerStore, Route};
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

mod args;
mod print;

use args::{Cli, Commands, LogCmd, ShellLine, TemplateCmd};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let state_dir = resolve_state_dir(&cli);
    let mut api = RepzApi::new(FsMarkerStore::new(state_dir));

    match api.current_user() {
        Some(user) => print::info(&format!(
            "Session restored for {}. Data lives in memory; `import` a snapshot to pick up where you left off.",
            user
        )),
        None => print::info("No active session. Use `login <username>` or `import <file>`."),
    }

    repl(&mut api)
}

fn resolve_state_dir(cli: &Cli) -> PathBuf {
    if let Some(dir) = &cli.state_dir {
        return dir.clone();
    }
    if let Ok(dir) = std::env::var("REPZ_STATE_DIR") {
        return PathBuf::from(dir);
    }
    ProjectDirs::from("com", "repz", "repz")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".repz"))
}

fn repl<M: MarkerStore>(api: &mut RepzApi<M>) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();

    loop {
        if interactive {
            print!("repz> ");
            io::stdout().flush().map_err(RepzError::Io)?;
        }

        let mut line = String::new();
        // EOF ends the session like `quit`.
        if stdin.lock().read_line(&mut line).map_err(RepzError::Io)? == 0 {
            return Ok(());
        }

        let tokens = args::split_line(&line);
        if tokens.is_empty() {
            continue;
        }

        let parsed = match ShellLine::try_parse_from(&tokens) {
            Ok(parsed) => parsed,
            Err(e) => {
                // Clap renders its own usage/help text.
                print!("{}", e);
                continue;
            }
        };

        match dispatch(api, parsed.command) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            // All engine errors are recoverable; report and keep the shell up.
            Err(e) => report(&e),
        }
    }
}

fn report(e: &RepzError) {
    match e {
        RepzError::Io(inner) => print::error(&format!("Could not read or write the file: {}", inner)),
        RepzError::InvalidSnapshot(reason) => {
            print::error(&format!("Import failed, file is not a valid snapshot: {}", reason))
        }
        other => print::error(&format!("{}", other)),
    }
}

/// Returns `Ok(false)` when the shell should exit.
fn dispatch<M: MarkerStore>(api: &mut RepzApi<M>, command: Commands) -> Result<bool> {
    match command {
        Commands::Login { username } => handle_login(api, &username)?,
        Commands::Logout => handle_logout(api)?,
        Commands::Whoami => match api.current_user() {
            Some(user) => println!("{}", user),
            None => print::info("Not logged in."),
        },
        Commands::Template(cmd) => {
            if guard(api, Route::Templates) {
                handle_template(api, cmd)?;
            }
        }
        Commands::Log(cmd) => {
            if guard(api, Route::LogEditor) {
                handle_log(api, cmd)?;
            }
        }
        Commands::Export { path } => {
            if guard(api, Route::Home) {
                let written = api.export_to_file(path)?;
                print::success(&format!("Exported to {}", written.display()));
            }
        }
        Commands::Import { path } => {
            let username = api.import_from_file(&path)?;
            print::success(&format!("Imported data for {}.", username));
        }
        Commands::Quit => return Ok(false),
    }
    Ok(true)
}

/// The routing collaborator's half of the session guard: ask the session
/// manager where the requested destination resolves, refuse on redirect.
fn guard<M: MarkerStore>(api: &RepzApi<M>, requested: Route) -> bool {
    match api.resolve_route(requested) {
        Route::Auth if requested != Route::Auth => {
            print::warn("No active session. Use `login <username>` or `import <file>`.");
            false
        }
        _ => true,
    }
}

fn handle_login<M: MarkerStore>(api: &mut RepzApi<M>, username: &str) -> Result<()> {
    // Auth view redirects home when a session already exists.
    if api.resolve_route(Route::Auth) == Route::Home {
        print::warn(&format!(
            "Already logged in as {}. `logout` first.",
            api.current_user().unwrap_or_default()
        ));
        return Ok(());
    }
    api.login(username)?;
    print::success(&format!(
        "Logged in as {}. The session starts empty; `import` a snapshot to load your data.",
        username.trim()
    ));
    Ok(())
}

fn handle_logout<M: MarkerStore>(api: &mut RepzApi<M>) -> Result<()> {
    if !api.is_authenticated() {
        print::info("Not logged in.");
        return Ok(());
    }
    api.logout()?;
    print::success("Logged out. Unexported data is gone.");
    Ok(())
}

fn handle_template<M: MarkerStore>(api: &mut RepzApi<M>, cmd: TemplateCmd) -> Result<()> {
    match cmd {
        TemplateCmd::Add { file } => {
            let template = read_template(&file)?;
            let name = template.name.clone();
            api.add_template(template)?;
            print::success(&format!("Added template {}", name));
        }
        TemplateCmd::List => print::print_templates(api.templates()),
        TemplateCmd::Show { id } => match api.get_template_by_id(&id) {
            Some(t) => print::print_template(t),
            None => print::warn(&format!("No template with id {}", id)),
        },
        TemplateCmd::Edit { file } => {
            let template = read_template(&file)?;
            let id = template.id.clone();
            if api.update_template(template)? {
                print::success(&format!("Updated template {}", id));
            } else {
                print::warn(&format!("No template with id {}", id));
            }
        }
        TemplateCmd::Rm { id } => {
            if api.delete_template(&id)? {
                print::success(&format!("Deleted template {}", id));
            } else {
                print::warn(&format!("No template with id {}", id));
            }
        }
    }
    Ok(())
}

fn handle_log<M: MarkerStore>(api: &mut RepzApi<M>, cmd: LogCmd) -> Result<()> {
    match cmd {
        LogCmd::Add { file } => {
            let log = read_log(&file)?;
            let date = log.date;
            api.add_logged_workout(log)?;
            print::success(&format!("Logged workout for {}", date));
        }
        LogCmd::List => print::print_logs(api.logged_workouts()),
        LogCmd::Show { id } => match api.get_logged_workout_by_id(&id) {
            Some(l) => print::print_log(l),
            None => print::warn(&format!("No logged workout with id {}", id)),
        },
        LogCmd::Edit { file } => {
            let log = read_log(&file)?;
            let id = log.id.clone();
            if api.update_logged_workout(log)? {
                print::success(&format!("Updated logged workout {}", id));
            } else {
                print::warn(&format!("No logged workout with id {}", id));
            }
        }
        LogCmd::Rm { id } => {
            if api.delete_logged_workout(&id)? {
                print::success(&format!("Deleted logged workout {}", id));
            } else {
                print::warn(&format!("No logged workout with id {}", id));
            }
        }
    }
    Ok(())
}

// The forms collaborator is out of scope for the shell; entities arrive as
// the JSON it would have produced. Missing ids are minted here, and legacy
// exercise shapes are normalized on the way in.

fn read_template(path: &Path) -> Result<WorkoutTemplate> {
    let raw = fs::read_to_string(path).map_err(RepzError::Io)?;
    let mut template: WorkoutTemplate =
        serde_json::from_str(&raw).map_err(RepzError::Serialization)?;
    if template.id.is_empty() {
        template.id = fresh_id();
    }
    normalize_exercises(&mut template.exercises);
    Ok(template)
}

fn read_log(path: &Path) -> Result<LoggedWorkout> {
    let raw = fs::read_to_string(path).map_err(RepzError::Io)?;
    let mut log: LoggedWorkout = serde_json::from_str(&raw).map_err(RepzError::Serialization)?;
    if log.id.is_empty() {
        log.id = fresh_id();
    }
    normalize_exercises(&mut log.exercises);
    Ok(log)
}
