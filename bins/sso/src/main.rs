use std::process::ExitCode;

use clap::{Parser, Subcommand};
use common::utils::logging::{init_logging, LogFormat};
use configs::{AppConfig, Environment};
use dotenvy::dotenv;
use tracing::{error, info};
use uuid::Uuid;

#[derive(Debug, Parser)]
#[command(name = "sso", version, about = "Single sign-on authentication service")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "CONFIG_PATH", default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the gRPC auth server (default)
    Serve,
    /// Create or upgrade the storage schema and exit
    Migrate,
    /// Manage registered client apps
    Apps {
        #[command(subcommand)]
        command: AppsCommand,
    },
    /// Manage users
    Users {
        #[command(subcommand)]
        command: UsersCommand,
    },
}

#[derive(Debug, Subcommand)]
enum AppsCommand {
    /// Register an app and its signing secret
    Add {
        #[arg(long)]
        id: i32,
        #[arg(long)]
        name: String,
        #[arg(long, env = "SSO_APP_SECRET", hide_env_values = true)]
        secret: String,
    },
}

#[derive(Debug, Subcommand)]
enum UsersCommand {
    /// Grant or revoke admin rights
    SetAdmin {
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        admin: bool,
    },
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Command::Serve => "serve",
            Command::Migrate => "migrate",
            Command::Apps { .. } => "apps",
            Command::Users { .. } => "users",
        }
    }
}

fn init_logging_for(env: Environment) {
    match env {
        Environment::Local => init_logging(LogFormat::Compact, "debug"),
        Environment::Dev => init_logging(LogFormat::Json, "debug"),
        Environment::Prod => init_logging(LogFormat::Json, "info"),
    }
    info!(service = "sso", event = "logger_init", ?env, "tracing subscriber initialized");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(service = "sso", event = "signal_error", error = %e, "cannot listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(service = "sso", event = "signal_error", error = %e, "cannot listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    info!(service = "sso", event = "shutdown_signal", "shutdown requested, draining in-flight requests");
}

async fn execute(cfg: AppConfig, command: Command) -> anyhow::Result<()> {
    match command {
        Command::Serve => server::run(&cfg, shutdown_signal()).await,
        Command::Migrate => {
            common::env::ensure_storage_dir(&cfg.storage_path).await?;
            let db = models::db::connect_and_migrate(&cfg.storage_path).await?;
            db.close().await?;
            info!(service = "sso", event = "migrated", storage_path = %cfg.storage_path, "storage schema up to date");
            Ok(())
        }
        Command::Apps { command: AppsCommand::Add { id, name, secret } } => {
            common::env::ensure_storage_dir(&cfg.storage_path).await?;
            let db = models::db::connect_and_migrate(&cfg.storage_path).await?;
            let app = models::app::create(&db, id, &name, &secret).await?;
            db.close().await?;
            info!(service = "sso", event = "app_added", app_id = app.id, name = %app.name, "app registered");
            Ok(())
        }
        Command::Users { command: UsersCommand::SetAdmin { email, admin } } => {
            common::env::ensure_storage_dir(&cfg.storage_path).await?;
            let db = models::db::connect_and_migrate(&cfg.storage_path).await?;
            let user = models::user::find_by_email(&db, &email)
                .await?
                .ok_or_else(|| anyhow::anyhow!("no user with email {email}"))?;
            models::user::set_admin(&db, &user.id, admin).await?;
            db.close().await?;
            info!(service = "sso", event = "admin_updated", user_id = %user.id, is_admin = admin, "admin flag updated");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();

    let cfg = match AppConfig::load_and_validate(Some(&cli.config)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("sso: invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    init_logging_for(cfg.env);

    let service_id = Uuid::new_v4();
    let pid = std::process::id();
    let version = env!("CARGO_PKG_VERSION");

    std::panic::set_hook(Box::new(move |info| {
        error!(service = "sso", event = "panic", %service_id, pid, message = %info, "unhandled panic occurred");
    }));

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "sso", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    let command = cli.command.unwrap_or(Command::Serve);
    info!(service = "sso", event = "start", %service_id, pid, version, command = command.name(), "sso starting");

    match rt.block_on(execute(cfg, command)) {
        Ok(()) => {
            info!(service = "sso", event = "stop", %service_id, pid, "sso stopped normally");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "sso", event = "run_failed", %service_id, error = %format!("{e:#}"), "sso exited with error");
            ExitCode::FAILURE
        }
    }
}
