use crate::{
    cli_args::CliArgs,
    config::Config,
    error::Error,
    search::{app::App, lookup, render::Render},
    utils::any::Any,
};
use crossterm::{
    cursor::{Hide, Show},
    event::EventStream,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    QueueableCommand,
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use reqwest::Client as ReqwestClient;
use std::{
    io::{StdoutLock, Write},
    path::Path,
};
use tokio::sync::mpsc;

pub struct Client {
    terminal: Terminal<CrosstermBackend<StdoutLock<'static>>>,
}

impl Client {
    fn new() -> Result<Self, Error> {
        let mut stdout = std::io::stdout().lock();

        crossterm::terminal::enable_raw_mode()?;
        stdout
            .queue(EnterAlternateScreen)?
            .queue(Hide)?
            .queue(Clear(ClearType::All))?
            .flush()?;

        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        let client = Self { terminal };

        client.ok()
    }

    fn on_drop(&mut self) -> Result<(), Error> {
        crossterm::terminal::disable_raw_mode()?;
        self.terminal
            .backend_mut()
            .queue(LeaveAlternateScreen)?
            .queue(Show)?
            .flush()?;

        ().ok()
    }

    fn draw(&mut self, app: &App) -> Result<(), Error> {
        self.terminal
            .draw(|frame| Render::new(frame, app.query(), app.state()).render())?;

        ().ok()
    }

    pub async fn run(cli_args: CliArgs) -> Result<(), Error> {
        let config = Config::load(cli_args.config_filepath.as_deref()).await;
        let (outcome_tx, mut outcome_rx) = mpsc::unbounded_channel();
        let mut app = App::new(config.api_url, outcome_tx);
        let mut client = Self::new()?;
        let mut events = EventStream::new();

        loop {
            client.draw(&app)?;

            tokio::select! {
                event_res_opt = events.next() => {
                    let Some(event_res) = event_res_opt else { break };

                    if app.feed(event_res?) {
                        break;
                    }
                }
                outcome_opt = outcome_rx.recv() => {
                    let Some(outcome) = outcome_opt else { break };

                    app.resolve(outcome);
                }
            }
        }

        ().ok()
    }

    pub async fn run_once(config_filepath: Option<&Path>, jan: &str) -> Result<(), Error> {
        let config = Config::load(config_filepath).await;
        let result = lookup::fetch(&ReqwestClient::new(), &config.api_url, jan)
            .await
            .map_err(Error::Lookup)?;

        std::println!("{}", result.serialize()?);

        ().ok()
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.on_drop().error();
    }
}
