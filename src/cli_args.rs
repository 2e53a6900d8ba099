use crate::{client::Client, error::Error, server::Server, utils::any::Any};
use clap::Parser;
use std::{net::Ipv4Addr, path::PathBuf};

#[derive(Clone, Parser)]
pub struct CliArgs {
    #[arg(long)]
    pub serve_only: bool,

    #[arg(default_value_t = Server::DEFAULT_HOST, long)]
    pub host: Ipv4Addr,

    #[arg(default_value_t = Server::DEFAULT_PORT, long)]
    pub port: u16,

    #[arg(long = "config")]
    pub config_filepath: Option<PathBuf>,

    #[arg(long = "logs")]
    pub log_filepath: Option<PathBuf>,

    pub jan: Option<String>,
}

impl CliArgs {
    // NOTE: the interactive client owns the tty, so it only ever logs to a file; json-to-stdout is reserved for
    // --serve-only
    fn init_tracing(&self) -> Result<(), Error> {
        if let Some(log_filepath) = &self.log_filepath {
            let log_file = log_filepath.create()?;

            tracing_subscriber::fmt().with_writer(log_file.arc()).json().init();
        } else if self.serve_only {
            tracing_subscriber::fmt().json().init();
        }

        ().ok()
    }

    pub async fn run(self) -> Result<(), Error> {
        self.init_tracing()?;

        if self.serve_only {
            Server::serve(&self).await
        } else if let Some(jan) = &self.jan {
            Client::run_once(self.config_filepath.as_deref(), jan).await
        } else {
            Client::run(self).await
        }
    }
}
