use crate::{
    search::lookup::{self, SearchState},
    utils::any::Any,
};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use reqwest::Client as ReqwestClient;
use tokio::sync::mpsc::UnboundedSender;

macro_rules! key_pattern {
    ($code:pat) => {
        Event::Key(KeyEvent {
            code: $code,
            modifiers: KeyModifiers::NONE | KeyModifiers::SHIFT,
            ..
        })
    };
}

pub struct App {
    api_url: String,
    query: String,
    state: SearchState,
    http_client: ReqwestClient,
    outcome_tx: UnboundedSender<SearchState>,
}

impl App {
    pub fn new(api_url: String, outcome_tx: UnboundedSender<SearchState>) -> Self {
        Self {
            api_url,
            query: String::new(),
            state: SearchState::Idle,
            http_client: ReqwestClient::new(),
            outcome_tx,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    // NOTE: returns whether the client should exit; while a search is in flight only the quit keys are honored (the
    // input and search control are disabled, matching the displayed busy indication)
    pub fn feed(&mut self, event: Event) -> bool {
        match event {
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
            | key_pattern!(KeyCode::Esc) => return true,
            _ if self.state.is_loading() => {}
            key_pattern!(KeyCode::Enter) => self.submit(),
            key_pattern!(KeyCode::Backspace) => {
                self.query.pop();

                if self.query.is_empty() {
                    self.state = SearchState::Idle;
                }
            }
            key_pattern!(KeyCode::Char(chr)) => self.query.push(chr),
            ignored_event => tracing::debug!(?ignored_event),
        }

        false
    }

    pub fn submit(&mut self) {
        if self.query.trim().is_empty() {
            self.state = SearchState::Failed(lookup::EMPTY_QUERY_MESSAGE.into());

            return;
        }

        self.state = SearchState::Loading;

        let http_client = self.http_client.clone();
        let api_url = self.api_url.clone();
        let jan = self.query.clone();
        let outcome_tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = lookup::lookup(&http_client, &api_url, &jan).await;

            outcome_tx.send(outcome).warn().unit();
        });
    }

    // NOTE: outcomes are applied in arrival order; when searches overlap, whichever response resolves last wins
    pub fn resolve(&mut self, outcome: SearchState) {
        self.state = outcome;
    }
}
