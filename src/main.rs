#![deny(warnings)]

mod attestation;
mod authenticator;
mod buffers;
mod config;
mod error;
mod network;
mod options;
mod registration;

use crate::{
    authenticator::CommandAuthenticator,
    config::{Config, RawConfig},
    network::Network,
    options::OptionsFormat,
    registration::{RegistrationFlow, SubmitEvent},
};
use anyhow::anyhow;
use clap::{Arg, Command, crate_authors, crate_description, crate_version, value_parser};
use std::{env, process::ExitCode};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<ExitCode, anyhow::Error> {
    dotenvy::dotenv().ok();

    if env::var("RUST_LOG_FORMAT").is_ok_and(|format| format == "json") {
        tracing_subscriber::fmt().json().flatten_event(true).init();
    } else {
        tracing_subscriber::fmt::init();
    }

    let matches = Command::new("Passkey registrar")
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::new("CONFIG")
                .env("PASSKEY_REGISTRAR_CONFIG")
                .short('c')
                .long("config")
                .default_value("passkey-registrar.toml")
                .help("Path to the application configuration file."),
        )
        .arg(
            Arg::new("FORMAT")
                .short('f')
                .long("format")
                .value_parser(["msgpack", "json"])
                .help("Wire format of the creation options, overrides the configuration."),
        )
        .arg(
            Arg::new("FORM")
                .long("form")
                .value_parser(value_parser!(String))
                .default_value("attestation")
                .help("Name of the form that submits the registration."),
        )
        .get_matches();

    let mut raw_config = RawConfig::read_from_file(
        matches
            .get_one::<String>("CONFIG")
            .ok_or_else(|| anyhow!("<CONFIG> argument is not provided."))?,
    )?;

    // CLI argument takes precedence.
    if let Some(format) = matches.get_one::<String>("FORMAT") {
        raw_config.options_format = match format.as_str() {
            "json" => OptionsFormat::Json,
            _ => OptionsFormat::MessagePack,
        };
    }

    info!("Passkey registrar raw configuration: {raw_config:?}.");

    let config = Config::try_from(raw_config)?;
    let network = Network::create(&config.http.client)?;
    let authenticator = CommandAuthenticator::new(config.authenticator.clone());
    let flow = RegistrationFlow::new(config, network, authenticator);

    let form = matches
        .get_one::<String>("FORM")
        .ok_or_else(|| anyhow!("<FORM> argument is not provided."))?;
    let attempt = flow.register(SubmitEvent::new(form)).await?;
    match attempt.notice() {
        Ok(notice) => {
            println!("{notice}");
            Ok(ExitCode::SUCCESS)
        }
        Err(notice) => {
            warn!(
                attempt.id = %attempt.id(),
                error.kind = ?attempt.error().map(|err| err.kind()),
                "Registration attempt went through {:?}.",
                attempt.history()
            );
            eprintln!("{notice}");
            Ok(ExitCode::FAILURE)
        }
    }
}
