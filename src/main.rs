//! commitdiff - compare two commits from the terminal.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::panic;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::prelude::*;

use commitdiff::cli::{run_auth_command, run_compare_command, AuthAction, OutputFormat};
use commitdiff::core::{
    data_dir, ChainedCredentials, CompareClient, CompareForm, Config, EnvCredentials, TokenStore,
};
use commitdiff::theme::Theme;
use commitdiff::ui::{handle_input, render, App};

/// Compare two commits of a hosted repository.
#[derive(Parser, Debug)]
#[command(name = "commitdiff", version, about)]
struct Cli {
    /// Backend base URL (overrides $COMMITDIFF_BASE_URL and config.json)
    #[arg(long = "base-url", value_name = "URL", global = true)]
    base_url: Option<String>,

    /// Workspace to compare in
    #[arg(short = 'w', long = "workspace", global = true)]
    workspace: Option<String>,

    /// Repository slug
    #[arg(short = 'r', long = "repo", value_name = "SLUG", global = true)]
    repo: Option<String>,

    /// Base commit
    #[arg(long = "from", value_name = "REV", global = true)]
    from: Option<String>,

    /// Target commit
    #[arg(long = "to", value_name = "REV", global = true)]
    to: Option<String>,

    /// Color theme (default, dracula, gruvbox, nord, or a user theme)
    #[arg(short = 't', long = "theme", value_name = "THEME")]
    theme: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compare once and print the changes
    Compare {
        /// Print the change list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage the stored access token
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },
}

/// RAII guard for terminal state. Restores terminal on drop (including panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Disable mouse capture first (while still in raw mode)
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = io::stdout().flush();
        // Then leave alternate screen and disable raw mode
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = io::stdout().flush();
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    commitdiff::metrics::init();
    init_logging();

    let config = Config::load();
    let form = initial_form(&cli, &config);

    match cli.command {
        Some(Command::Auth { ref action }) => {
            let store = TokenStore::open_default();
            run_auth_command(&store, action, &mut io::stdout())
        }
        Some(Command::Compare { json }) => {
            let base_url = config.resolve_base_url(cli.base_url.as_deref());
            let client = match CompareClient::new(&base_url) {
                Ok(client) => client,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    return ExitCode::from(1);
                }
            };
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Plain
            };
            run_compare_command(&client, &credentials(), &form, format)
        }
        None => {
            let theme = cli.theme.clone().or_else(|| config.theme.clone());
            match run_tui(form, &config, cli.base_url.as_deref(), theme.as_deref()) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::from(1)
                }
            }
        }
    }
}

/// Form values from flags, falling back to config for workspace and repo.
fn initial_form(cli: &Cli, config: &Config) -> CompareForm {
    CompareForm::new(
        cli.workspace
            .clone()
            .or_else(|| config.workspace.clone())
            .unwrap_or_default(),
        cli.repo
            .clone()
            .or_else(|| config.repo_slug.clone())
            .unwrap_or_default(),
        cli.from.clone().unwrap_or_default(),
        cli.to.clone().unwrap_or_default(),
    )
}

/// Token sources, in lookup order.
fn credentials() -> ChainedCredentials {
    ChainedCredentials::new()
        .with(EnvCredentials)
        .with(TokenStore::open_default())
}

/// Send log records to `commitdiff.log`; stdout and stderr belong to the UI.
fn init_logging() {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::new().filter_or("COMMITDIFF_LOG", "warn"),
    );

    let dir = data_dir();
    let file = std::fs::create_dir_all(&dir).and_then(|_| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("commitdiff.log"))
    });

    match file {
        Ok(file) => {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            if let Some((target, level)) = commitdiff::metrics::log_directive() {
                builder.filter_module(target, level);
            }
        }
        Err(_) => {
            builder.filter_level(LevelFilter::Off);
        }
    }

    let _ = builder.try_init();
}

/// Run the TUI application.
fn run_tui(
    form: CompareForm,
    config: &Config,
    base_url: Option<&str>,
    theme: Option<&str>,
) -> Result<()> {
    // Set panic hook to ensure terminal cleanup
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        // Restore terminal before printing panic
        let _ = execute!(io::stdout(), DisableMouseCapture);
        let _ = io::stdout().flush();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = disable_raw_mode();
        let _ = io::stdout().flush();
        default_hook(info);
    }));

    let base_url = config.resolve_base_url(base_url);
    log::info!("starting TUI against {}", base_url);
    if let Some(name) = theme {
        if !Theme::list().iter().any(|t| t == name) {
            log::warn!("Unknown theme {:?}, using default", name);
        }
    }
    let mut app = App::new(form, &base_url, Box::new(credentials()), theme)?;

    // Setup terminal with RAII guard
    let _guard = TerminalGuard::new()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    run_loop(&mut terminal, &mut app)
}

fn run_loop<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        app.poll_worker();

        // Only redraw if dirty or on resize
        if app.ui.dirty {
            terminal.draw(|frame| render(frame, app))?;
            app.clear_dirty();
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            let event = event::read()?;
            handle_input(app, event);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
