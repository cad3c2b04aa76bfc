//! `firm-admin`: provisioning and verification tools for the firm site backend.
//!
//! Every subcommand reads credentials from the environment (a `.env` file is
//! loaded first) or from flags. Exit status is 0 on success and 1 on any
//! failure.

mod api_check;
mod db;
mod deploy_check;
mod error;
mod provision;
mod roster;
mod seed;
mod verify;

use std::path::PathBuf;
use std::process::ExitCode;

use backend::{BackendConfig, KeyRole, RestBackend};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "firm-admin", about = "Provisioning and verification tools for the firm site backend")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create or find the admin auth identity and link it as a site administrator.
    ProvisionAdmin {
        #[arg(long, env = "ADMIN_EMAIL")]
        email: String,
        #[arg(long, env = "ADMIN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Upsert the lawyer roster into the directory table.
    SeedDirectory {
        /// JSON array of lawyers. Defaults to the built-in roster.
        #[arg(long)]
        roster: Option<PathBuf>,
    },
    /// Check connectivity, tables, columns and directory content.
    Verify,
    /// Call the deployed `GET /api/lawyers` endpoint.
    CheckApi {
        #[arg(long, env = "NEXT_PUBLIC_APP_URL", default_value = "http://localhost:3000")]
        base_url: String,
    },
    /// Check a checkout for deploy blockers.
    DeployCheck {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Apply schema migrations over a direct Postgres connection.
    Migrate {
        #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
        database_url: String,
    },
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

fn service_backend() -> Result<RestBackend, CliError> {
    let config = BackendConfig::from_env()?;
    Ok(RestBackend::new(&config, KeyRole::ServiceRole)?)
}

async fn run(command: Command) -> Result<(), CliError> {
    match command {
        Command::ProvisionAdmin { email, password } => {
            let backend = service_backend()?;
            let report = provision::provision_admin(&backend, &email, &password).await?;
            print_lines(&report.render());
        }
        Command::SeedDirectory { roster } => {
            let roster = match roster {
                Some(path) => roster::load_roster(&path)?,
                None => roster::default_roster(),
            };
            let backend = service_backend()?;
            let report = seed::seed_directory(&backend, &roster).await?;
            print_lines(&report.render());
            if report.failed() > 0 {
                warn!(failed = report.failed(), "some roster entries were not written");
            }
        }
        Command::Verify => {
            let config = BackendConfig::from_env()?;
            let role = config.strongest_role();
            info!(role = ?role, url = %config.url, "verifying backend");
            let backend = RestBackend::new(&config, role)?;
            let results = verify::run_checks(&backend, role == KeyRole::ServiceRole).await;
            print_lines(&verify::render_summary(&results));
            let failed = verify::failed_count(&results);
            if failed > 0 {
                return Err(CliError::ChecksFailed { failed });
            }
        }
        Command::CheckApi { base_url } => {
            let report = api_check::check_lawyers_api(&base_url).await?;
            print_lines(&report.render());
        }
        Command::DeployCheck { dir } => {
            let findings = deploy_check::run(&dir);
            print_lines(&deploy_check::render(&findings));
            let errors = deploy_check::blocking(&findings);
            if errors > 0 {
                return Err(CliError::DeployBlocked { errors });
            }
        }
        Command::Migrate { database_url } => {
            db::run_migrations(&database_url).await?;
            println!("migrations applied");
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    match run(cli.command).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            for line in e.report_lines() {
                eprintln!("error: {line}");
            }
            ExitCode::FAILURE
        }
    }
}
