//! Retrieves menu markup from the dining site and hands it to the parsers.
//!
//! Two upstream protocols are supported: a single ajax GET that answers with
//! menu HTML ([`SimpleSource`]) and the NetNutrition handshake that walks a
//! cookie session through unit and menu selection ([`SessionSource`]).
mod envelope;
mod session;
mod simple;

use std::{num::NonZeroU32, time::Duration};

use governor::{DefaultDirectRateLimiter, Jitter, Quota, RateLimiter};
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
};

use crate::{
    config::{Config, HttpConfig, Protocol},
    error::{Error, Result},
    identifier::MenuIdentifier,
    parse::Menu,
};

pub use envelope::{Panel, PanelEnvelope, ITEM_PANEL, MENU_PANEL};
pub use session::SessionSource;
pub use simple::SimpleSource;

static DELAY_JITTER: Duration = Duration::from_millis(250);

/// Client with the headers the dining site expects from its own ajax calls.
pub fn make_client(http: &HttpConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        "X-Requested-With",
        HeaderValue::from_static("XMLHttpRequest"),
    );
    let client = Client::builder()
        .user_agent(http.user_agent.as_str())
        .default_headers(headers)
        .cookie_store(true)
        .gzip(true)
        .timeout(http.timeout())
        .build()?;
    Ok(client)
}

/// Optional client-side pacing of requests to the dining site.
#[derive(Default)]
pub struct Pacer(Option<DefaultDirectRateLimiter>);

impl std::fmt::Debug for Pacer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Pacer").field(&self.0.is_some()).finish()
    }
}

impl Pacer {
    pub fn new(requests_per_second: Option<NonZeroU32>) -> Self {
        Self(requests_per_second.map(|rps| RateLimiter::direct(Quota::per_second(rps))))
    }

    pub async fn wait(&self) {
        if let Some(limiter) = &self.0 {
            let jitter = Jitter::new(Duration::ZERO, DELAY_JITTER);
            limiter.until_ready_with_jitter(jitter).await;
        }
    }
}

#[derive(Debug)]
pub enum MenuSource {
    Simple(SimpleSource),
    Session(SessionSource),
}

impl MenuSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let pacer = || Pacer::new(config.http.requests_per_second);
        match config.protocol {
            Protocol::Simple => {
                let endpoint = config
                    .simple
                    .clone()
                    .ok_or_else(|| Error::config_error("missing `simple` endpoint"))?;
                let client = make_client(&config.http)?;
                Ok(Self::Simple(SimpleSource::new(
                    client,
                    endpoint,
                    config.parse,
                    pacer(),
                )))
            }
            Protocol::Session => {
                let endpoints = config
                    .session
                    .clone()
                    .ok_or_else(|| Error::config_error("missing `session` endpoints"))?;
                Ok(Self::Session(SessionSource::new(
                    endpoints,
                    config.http.clone(),
                    config.parse,
                    pacer(),
                )))
            }
        }
    }

    /// `Ok(None)` means the hall has no menu for that date and meal.
    pub async fn fetch_menu(&self, id: &MenuIdentifier) -> Result<Option<Menu>> {
        match self {
            Self::Simple(source) => source.fetch_menu(id).await,
            Self::Session(source) => source.fetch_menu(id).await,
        }
    }
}
