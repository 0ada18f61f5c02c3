//! Console application for the live channel demo.
//!
//! Wires the session to a loopback RTC engine and drives it from stdin.

mod config;
mod console;
mod loopback;

use std::io;
use std::thread;

use anyhow::{anyhow, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use livestream_session::{create_session, AutoGrant, ChannelDirectory};

use crate::config::Config;
use crate::console::Console;
use crate::loopback::LoopbackEngine;

/// Initialize logging. Logs go to stderr so they don't interleave with the console.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "livestream=debug,livestream_session=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(?config, "Starting livestream");

    let (engine, remote) = LoopbackEngine::new(config.loopback_auto_confirm);
    let (mut session, handle) = create_session(
        config.session_config(),
        ChannelDirectory::builtin(),
        Box::new(engine),
        Box::new(AutoGrant),
    );

    let worker = thread::Builder::new()
        .name("session".to_string())
        .spawn(move || {
            info!("Session thread starting");
            session.run();
            info!("Session thread stopped");
        })
        .context("Failed to spawn session thread")?;

    handle.set_role(config.default_role)?;

    let result = Console::new(&handle, &remote).run(io::stdin().lock(), io::stdout().lock());

    handle.shutdown()?;
    worker
        .join()
        .map_err(|_| anyhow!("Session thread panicked"))?;

    result
}
