use std::process::ExitCode;
use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use paceload::args::LoadArgs;
use paceload::error::AppResult;
use paceload::http::{Dispatcher, HttpExecutor, Target};
use paceload::metrics::Aggregator;
use paceload::progress::{ProgressReporter, TerminalProgress};
use paceload::shutdown::{ShutdownReceiver, ShutdownSender};
use paceload::shutdown_handlers::{
    ShutdownSignals, setup_signal_shutdown_handler, shutdown_channel,
};
use paceload::summary::{export_json, print_report, start_line};

struct ShutdownWiring {
    shutdown_tx: ShutdownSender,
    shutdown_rx: ShutdownReceiver,
    signal_handle: JoinHandle<()>,
}

pub(crate) fn run() -> AppResult<ExitCode> {
    let (mut args, matches) = parse_args()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    // Hooks go in before anything slow so an early Ctrl+C still yields a report.
    let wiring = {
        let _guard = runtime.enter();
        install_signal_handlers()?
    };

    apply_config(&mut args, &matches)?;
    paceload::logger::init_logging(args.verbose, args.no_color);
    debug!("Signal handlers installed");

    runtime.block_on(run_async(args, wiring))
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().get_matches_from(std::env::args_os());
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn install_signal_handlers() -> AppResult<ShutdownWiring> {
    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let signals = ShutdownSignals::register()?;
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx, signals);
    Ok(ShutdownWiring {
        shutdown_tx,
        shutdown_rx,
        signal_handle,
    })
}

fn apply_config(args: &mut LoadArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = paceload::config::load_config(args.config.as_deref())? {
        paceload::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

async fn run_async(args: LoadArgs, wiring: ShutdownWiring) -> AppResult<ExitCode> {
    let ShutdownWiring {
        shutdown_tx,
        shutdown_rx,
        signal_handle,
    } = wiring;

    let run_config = args.run_config();
    let target = Target::parse(&args.url)?;
    info!("Target: {}", target.url());
    let executor = Arc::new(HttpExecutor::new(target, args.request_timeout)?);

    let progress = Arc::new(TerminalProgress::new(args.no_color));
    let aggregator = Arc::new(Aggregator::new(run_config.requests, progress.clone()));
    let mut dispatcher = Dispatcher::new(run_config, executor, aggregator);

    println!("{}", start_line(&run_config));
    let result = dispatcher.run(shutdown_rx).await;

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }
    progress.finish();

    let stats = result?;
    if stats.interrupted {
        println!();
        println!("Test interrupted by user");
    }
    print_report(&stats);

    if let Some(path) = args.export_json.as_deref() {
        export_json(path, &stats).await?;
        info!("Exported report to {}", path);
    }

    if stats.interrupted {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
