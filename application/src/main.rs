use std::{io, process::ExitCode, sync::OnceLock};

use application::{Args, Config, Service};
use service::{
    command::LoadSession,
    infra::{storage::File, Rest},
    Command as _,
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::WARN)
                                >= *meta.level()
                })),
        )
        .init();

    start().await.unwrap_or_else(|code| code)
}

async fn start() -> Result<ExitCode, ExitCode> {
    let Args { config, screen } = Args::parse().map_err(|e| {
        // Prints help and version requests too.
        _ = e.print();
        ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(2))
    })?;

    let Config { api, storage, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {e}");
        ExitCode::FAILURE
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let rest = Rest::new(&api.url).map_err(|e| {
        log::error!("failed to initialize `Rest` client: {e}");
        ExitCode::FAILURE
    })?;
    let service = Service::new(rest, File::new(storage.path));

    let state = service
        .execute(LoadSession)
        .await
        .unwrap_or_else(|e| match e {});
    log::debug!("session loaded (logged in: {})", state.is_logged_in());

    match screen.open(&service).await {
        Ok(out) => {
            println!("{out}");
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            log::debug!("{e}");
            eprintln!("{}", e.message);
            Err(e.exit_code())
        }
    }
}
