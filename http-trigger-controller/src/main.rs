use std::process::exit;

use anyhow::Context;
use config::ControllerConfig;
use controller::main_controller;
use kube::Client;

mod config;
mod controller;
mod helpers;

#[tokio::main]
async fn main() {
    configure_logger();

    let config = get_config();
    let client = create_client().await.unwrap_or_else(|error| {
        log::error!("Couldn't create client! {error:?}");
        exit(6)
    });

    main_controller(client, config).await;
}

async fn create_client() -> anyhow::Result<Client> {
    Client::try_default()
        .await
        .context("Kubernetes configuration is unavailable!")
}

fn get_config() -> ControllerConfig {
    match ControllerConfig::from_env() {
        Ok(config) => config,
        Err(error) => {
            log::error!("Couldn't load controller configuration! {error}");
            exit(7)
        }
    }
}

fn configure_logger() {
    env_logger::builder()
        .default_format()
        .format_module_path(false)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init()
}
