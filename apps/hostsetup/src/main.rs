//! hostsetup - bootstrap a management server host
//!
//! This is the CLI application. It loads the configuration, wires the
//! host implementations into an operations context and renders the events
//! the operations emit while they run.

mod cli;
mod display;
mod error;
mod events;
mod logging;

use crate::cli::{Cli, Commands};
use crate::display::OutputRenderer;
use crate::error::CliError;
use crate::events::EventHandler;
use clap::Parser;
use hostsetup_config::Config;
use hostsetup_events::{EventReceiver, EventSender};
use hostsetup_net::{HttpDownloader, NetClient, NetConfig};
use hostsetup_ops::{OperationResult, OpsContextBuilder, OpsCtx};
use hostsetup_platform::HostProcessOperations;
use hostsetup_types::{ColorChoice, OsFamily};
use std::process;
use std::sync::Arc;
use tokio::select;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let json_mode = cli.global.json;

    // Configuration decides where debug logs go, so load it before tracing
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(e.exit_code());
        }
    };

    logging::init_tracing(json_mode, cli.global.debug, &config.log_dir());

    if let Err(e) = run(cli, config).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(e.exit_code());
    }
}

/// Load configuration with file, environment and flag precedence
async fn load_config(global: &cli::GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref())
        .await
        .map_err(CliError::Config)?;
    config.merge_env().map_err(CliError::Config)?;

    if let Some(color) = global.color {
        config.general.color = color;
    }
    Ok(config)
}

/// Main application logic
async fn run(cli: Cli, config: Config) -> Result<(), CliError> {
    info!("Starting hostsetup v{}", env!("CARGO_PKG_VERSION"));

    let colors_enabled = match config.general.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => console::Term::stderr().features().colors_supported(),
    };

    let (event_sender, event_receiver) = hostsetup_events::channel();
    let ctx = build_ops_context(config, event_sender, cli.global.silent)?;

    let event_handler = EventHandler::new(colors_enabled, cli.global.debug, cli.global.json);
    let renderer = OutputRenderer::new(cli.global.json, colors_enabled);

    let result = execute_command_with_events(
        cli.command,
        cli.global.silent,
        ctx,
        event_receiver,
        &event_handler,
    )
    .await?;

    renderer.render_result(&result)?;

    info!("Command completed successfully");
    Ok(())
}

/// Build operations context with the host implementations
fn build_ops_context(
    config: Config,
    event_sender: EventSender,
    silent: bool,
) -> Result<OpsCtx, CliError> {
    let net = NetClient::new(NetConfig {
        timeout: config.timeout(),
        connect_timeout: config.connect_timeout(),
        user_agent: format!("hostsetup/{}", env!("CARGO_PKG_VERSION")),
    })?;

    let ctx = OpsContextBuilder::new()
        .with_family(OsFamily::current())
        .with_process_ops(Arc::new(HostProcessOperations::with_events(
            event_sender.clone(),
        )))
        .with_downloader(Box::new(HttpDownloader::with_events(
            net,
            event_sender.clone(),
        )))
        .with_prompter(hostsetup_prompt::for_mode(silent))
        .with_event_sender(event_sender)
        .with_config(config)
        .build()?;

    Ok(ctx)
}

/// Execute command with concurrent event handling
async fn execute_command_with_events(
    command: Commands,
    silent: bool,
    ctx: OpsCtx,
    mut event_receiver: EventReceiver,
    event_handler: &EventHandler,
) -> Result<OperationResult, CliError> {
    let mut command_future = Box::pin(execute_command(command, silent, ctx));

    loop {
        select! {
            biased;

            // Disabled once the channel closes, the command future then wins
            Some(event) = event_receiver.recv() => {
                event_handler.handle_event(event);
            }

            result = &mut command_future => {
                while let Ok(event) = event_receiver.try_recv() {
                    event_handler.handle_event(event);
                }
                return result;
            }
        }
    }
}

/// Execute the specified command
async fn execute_command(
    command: Commands,
    silent: bool,
    ctx: OpsCtx,
) -> Result<OperationResult, CliError> {
    match command {
        Commands::Setup(args) => {
            let report = hostsetup_ops::setup(&ctx, args.into_options(silent)).await?;
            Ok(OperationResult::Setup(report))
        }
        Commands::Reset => {
            let database = hostsetup_ops::reset(&ctx).await?;
            Ok(OperationResult::Reset(database))
        }
        Commands::SetupPolicy { bundle } => {
            let security_dir = hostsetup_ops::setup_policy(&ctx, &bundle).await?;
            Ok(OperationResult::PolicyInstalled(security_dir))
        }
    }
}
