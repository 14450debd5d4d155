//! Command dispatch: one handler per subcommand

use std::io;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::FipService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{self, Settings};
use crate::infrastructure::di::ServiceContainer;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Config { command } => cmd_config(cli, command),
        Commands::Completion { shell } => cmd_completion(*shell),
        command => connect(cli)
            .and_then(|container| run_fip_command(command, &container.fip_service))
            .map_err(CliError::into_command),
    }
}

fn connect(cli: &Cli) -> CliResult<ServiceContainer> {
    Ok(ServiceContainer::new(load_settings(cli)?)?)
}

/// Run one of the floating IP subcommands against `service`.
///
/// Any failure exits 1, whatever its cause.
pub fn run_fip_command(command: &Commands, service: &FipService) -> CliResult<()> {
    dispatch(command, service).map_err(CliError::into_command)
}

fn dispatch(command: &Commands, service: &FipService) -> CliResult<()> {
    match command {
        Commands::Allocate { count } => cmd_allocate(service, count),
        Commands::Release { fips } => cmd_release(service, fips),
        Commands::Associate { fip, container } => cmd_associate(service, fip, container),
        Commands::Deassociate { container } => cmd_deassociate(service, container),
        Commands::Ls { filters } => cmd_ls(service, filters),
        Commands::Config { .. } | Commands::Completion { .. } => Err(CliError::Usage(
            "not a floating IP command".to_string(),
        )),
    }
}

/// Settings with the `--host` flag applied on top.
pub fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load()?;
    if let Some(host) = &cli.host {
        settings.host = host.clone();
    }
    debug!("load_settings: host={}", settings.host);
    Ok(settings)
}

#[instrument(skip(service))]
fn cmd_allocate(service: &FipService, count: &str) -> CliResult<()> {
    let ips = service.allocate(count)?;
    output::lines(&ips);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_release(service: &FipService, fips: &[String]) -> CliResult<()> {
    let report = service.release(fips, |_, e| output::problem(e));
    debug!(
        "release: {} released, {} failed",
        report.released.len(),
        report.failed.len()
    );
    if report.is_success() {
        Ok(())
    } else {
        Err(ApplicationError::PartialRelease {
            failed: report.failed.len(),
            total: report.total(),
        }
        .into())
    }
}

#[instrument(skip(service))]
fn cmd_associate(service: &FipService, fip: &str, container: &str) -> CliResult<()> {
    service.associate(fip, container)?;
    Ok(())
}

#[instrument(skip(service))]
fn cmd_deassociate(service: &FipService, container: &str) -> CliResult<()> {
    let ip = service.deassociate(container)?;
    output::info(&ip);
    Ok(())
}

#[instrument(skip(service))]
fn cmd_ls(service: &FipService, filters: &[String]) -> CliResult<()> {
    let ips = service.list(filters)?;
    output::lines(&ips);
    Ok(())
}

fn cmd_config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = load_settings(cli)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::info(&global_config_path()?.display());
        }
        ConfigCommands::Init => {
            let path = global_config_path()?;
            config::write_template(&path)?;
            output::success(&format!("Created config: {}", path.display()));
        }
    }
    Ok(())
}

fn global_config_path() -> CliResult<std::path::PathBuf> {
    config::global_config_path().ok_or_else(|| {
        ApplicationError::Config {
            message: "cannot determine config directory".to_string(),
        }
        .into()
    })
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
