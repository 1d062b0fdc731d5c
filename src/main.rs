use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use radicais_livres::api::{ApiError, HttpDashboardApi};
use radicais_livres::app::App;
use radicais_livres::config::{AppConfig, ConfigError, DEFAULT_LOG_FILTER};
use radicais_livres::credentials::StaticCredentialStore;
use radicais_livres::navigation::Screen;
use radicais_livres::pages::Providers;
use radicais_livres::session::{LoginError, SessionManager};
use radicais_livres::storage::FileStorage;
use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("api client error: {0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Login(#[from] LoginError),
    #[error("terminal i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "radicais-livres", about = "Radicais Livres youth ministry dashboard")]
struct Cli {
    /// Session storage file (overrides RL_STORAGE_PATH).
    #[arg(long, global = true)]
    storage_path: Option<PathBuf>,

    /// Dashboard API base URL (overrides RL_API_BASE_URL).
    #[arg(long, global = true)]
    api_base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive session (default).
    Shell,
    Login {
        username: String,
        password: String,
    },
    Logout,
    /// Print the current screen and header.
    Status,
    /// Print one page for the signed-in user.
    Page {
        id: String,
        #[arg(long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    exit_code(run(Cli::parse()).await)
}

/// Failures are reported by their `Display` message on stderr.
fn exit_code(result: Result<(), CliError>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = AppConfig::from_env()?.with_overrides(cli.api_base_url.as_deref(), cli.storage_path)?;
    init_tracing(&config.log_filter);

    let mut app = build_app(&config)?;
    app.session().restore();

    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => run_shell(&mut app).await,
        Command::Login { username, password } => {
            let identity = app.login(&username, &password).await?;
            println!("{}", serde_json::to_string_pretty(&identity)?);
            Ok(())
        }
        Command::Logout => {
            app.logout();
            println!("ok");
            Ok(())
        }
        Command::Status => print_status(&app),
        Command::Page { id, search } => {
            app.navigate(&id);
            print_page(&app, &search).await
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_app(config: &AppConfig) -> Result<App, CliError> {
    let storage = Arc::new(FileStorage::new(config.storage_path.clone()));
    let session = SessionManager::new(Arc::new(StaticCredentialStore::demo()), storage, config.login_delay);
    let api = Arc::new(HttpDashboardApi::new(&config.api_base_url)?);
    tracing::debug!(api = %config.api_base_url, storage = %config.storage_path.display(), "app configured");
    Ok(App::new(session, Providers::with_sample_data(api, config.sample_delay)))
}

fn print_status(app: &App) -> Result<(), CliError> {
    let status = json!({ "screen": app.screen(), "header": app.header() });
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}

async fn print_page(app: &App, search: &str) -> Result<(), CliError> {
    match app.render(search).await {
        Some(view) => println!("{}", serde_json::to_string_pretty(&view)?),
        None => println!("{}", serde_json::to_string_pretty(&app.screen())?),
    }
    Ok(())
}

// =============================================================================
// SHELL
// =============================================================================

const SHELL_HELP: &str = "\
comandos:
  login <usuário> <senha>   entrar
  logout                    sair
  whoami                    usuário atual
  go <página>               abrir página (home, pastors, networks, reports, gallery, contacts)
  search <termo>            filtrar relatórios ou galeria
  show                      mostrar página atual
  menu                      itens do menu
  help                      esta ajuda
  quit                      encerrar";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Login { username: String, password: String },
    Logout,
    Whoami,
    Go(String),
    Search(String),
    Show,
    Menu,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_shell_command(line: &str) -> ShellCommand {
    let line = line.trim();
    let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    match head {
        "" => ShellCommand::Empty,
        "login" => match rest.split_whitespace().collect::<Vec<_>>().as_slice() {
            [username, password] => {
                ShellCommand::Login { username: (*username).to_owned(), password: (*password).to_owned() }
            }
            _ => ShellCommand::Unknown(line.to_owned()),
        },
        "logout" => ShellCommand::Logout,
        "whoami" => ShellCommand::Whoami,
        "go" if !rest.is_empty() => ShellCommand::Go(rest.to_owned()),
        "search" => ShellCommand::Search(rest.to_owned()),
        "show" => ShellCommand::Show,
        "menu" => ShellCommand::Menu,
        "help" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_owned()),
    }
}

async fn run_shell(app: &mut App) -> Result<(), CliError> {
    println!("Radicais Livres - digite `help` para ver os comandos");
    if app.screen() == Screen::Login {
        println!("Faça login para continuar.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut search = String::new();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        match parse_shell_command(&line) {
            ShellCommand::Empty => {}
            ShellCommand::Login { username, password } => {
                println!("Entrando...");
                match app.login(&username, &password).await {
                    Ok(identity) => {
                        println!("Bem-vindo, {}!", identity.full_name);
                        print_page(app, &search).await?;
                    }
                    Err(e) => println!("{e}"),
                }
            }
            ShellCommand::Logout => {
                app.logout();
                search.clear();
                println!("Sessão encerrada.");
            }
            ShellCommand::Whoami => match app.header() {
                Some(header) => println!("{} ({})", header.display_name, header.role.description()),
                None => println!("Não autenticado."),
            },
            ShellCommand::Go(id) => {
                app.navigate(&id);
                search.clear();
                print_page(app, &search).await?;
            }
            ShellCommand::Search(term) => {
                search = term;
                print_page(app, &search).await?;
            }
            ShellCommand::Show => print_page(app, &search).await?,
            ShellCommand::Menu => match app.header() {
                Some(header) => {
                    for item in header.menu {
                        let marker = if item.active { '*' } else { ' ' };
                        println!("{marker} {:<10} {}", item.id, item.label);
                    }
                }
                None => println!("Não autenticado."),
            },
            ShellCommand::Help => println!("{SHELL_HELP}"),
            ShellCommand::Quit => break,
            ShellCommand::Unknown(input) => println!("comando desconhecido: {input} (digite `help`)"),
        }
    }
    Ok(())
}
