//! Finance API process: reads configuration once, sizes the tokio runtime
//! from it and serves until Ctrl+C.

use std::process::ExitCode;

use tokio::runtime::{Builder, Runtime};
use tracing::{error, info, warn};
use uuid::Uuid;

fn build_runtime(worker_threads: Option<usize>) -> std::io::Result<Runtime> {
    let mut builder = Builder::new_multi_thread();
    builder.enable_all().thread_name("finance-worker");
    if let Some(n) = worker_threads {
        builder.worker_threads(n);
    }
    builder.build()
}

async fn ctrl_c() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("ctrl+c received, draining"),
        Err(e) => {
            // no signal handler: keep serving until the process is killed
            warn!(error = %e, "cannot listen for ctrl+c");
            std::future::pending::<()>().await
        }
    }
}

fn main() -> ExitCode {
    // .env before the subscriber so RUST_LOG and LOG_FORMAT take effect
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let instance = Uuid::new_v4();
    std::panic::set_hook(Box::new(move |panic| {
        let location = panic.location().map(|l| format!("{}:{}", l.file(), l.line()));
        error!(%instance, location = location.as_deref().unwrap_or("unknown"), message = %panic, "panic");
    }));

    let cfg = match server::startup::load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "configuration rejected");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(cfg.server.worker_threads) {
        Ok(rt) => rt,
        Err(e) => {
            error!(error = %e, "runtime build failed");
            return ExitCode::FAILURE;
        }
    };

    info!(
        %instance,
        pid = std::process::id(),
        version = env!("CARGO_PKG_VERSION"),
        workers = ?cfg.server.worker_threads,
        "finance api booting"
    );

    match rt.block_on(server::serve(cfg, ctrl_c())) {
        Ok(()) => {
            info!(%instance, "finance api stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(%instance, error = %e, "finance api failed");
            ExitCode::FAILURE
        }
    }
}
