use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use sesmail::confirm::HttpConfirmer;
use sesmail::sns::SnsVerifier;
use sesmail::storage::S3Store;
use sesmail::Adapter;

mod config;
mod controllers;
mod error;
mod http;
mod routes;

async fn run(opt: config::Opt) -> Result<(), sesmail::Error> {
    let mut config = sesmail::config::load_config(opt.config.as_deref())?;

    if let Some(port) = opt.port {
        config.port = port;
    }

    if config.route.is_empty() || config.route.contains('/') {
        return Err(sesmail::Error::Config(format!(
            "route must be a single path segment, got {:?}",
            config.route
        )));
    }

    let config = Arc::new(config);
    let confirm_timeout = Duration::from_secs(config.confirm_timeout_secs);

    let verifier = SnsVerifier::new(confirm_timeout)?;
    let store = S3Store::new(
        &config.aws_region,
        Duration::from_secs(config.storage_timeout_secs),
    )
    .await;
    let confirmer = HttpConfirmer::new(confirm_timeout)?;

    log::info!(
        "Accepting topics ending in {:?}, raw mail from S3 in {}",
        config.topic_suffix,
        config.aws_region
    );

    let port = config.port;
    let adapter = Adapter::new(config, verifier, store, confirmer);

    http::run(Arc::new(adapter), port).await;

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::builder().format_timestamp_micros().init();

    let opt = config::Opt::parse();

    log::info!("Starting server...");

    if let Err(e) = run(opt).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
