use reqwest::Client;
use tracing::{instrument, Level};

use super::Pacer;
use crate::{
    config::SimpleEndpoint,
    error::Result,
    identifier::MenuIdentifier,
    parse::{simple, Menu, ParseOptions},
};

/// The WordPress ajax endpoint that renders a whole menu in one GET.
#[derive(Debug)]
pub struct SimpleSource {
    client: Client,
    endpoint: SimpleEndpoint,
    options: ParseOptions,
    pacer: Pacer,
}

impl SimpleSource {
    pub fn new(
        client: Client,
        endpoint: SimpleEndpoint,
        options: ParseOptions,
        pacer: Pacer,
    ) -> Self {
        Self {
            client,
            endpoint,
            options,
            pacer,
        }
    }

    /// Any non-success status is reported as "no menu", not as an error.
    #[instrument(skip(self, id), fields(
        date = %id.date,
        meal = %id.meal,
        hall = %id.hall,
    ), level = Level::TRACE)]
    pub async fn fetch_menu(&self, id: &MenuIdentifier) -> Result<Option<Menu>> {
        self.pacer.wait().await;
        let pid = id.hall.to_string();
        let date = id.date_key();
        let res = self
            .client
            .get(self.endpoint.endpoint.clone())
            .query(&[
                ("action", self.endpoint.action.as_str()),
                ("date", date.as_str()),
                ("meal", id.meal.as_query()),
                ("pid", pid.as_str()),
            ])
            .send()
            .await?;
        if !res.status().is_success() {
            log::warn!(
                "{} {} {}: menu endpoint answered {}, treating as no menu",
                id.hall,
                date,
                id.meal,
                res.status()
            );
            return Ok(None);
        }
        let start = std::time::Instant::now();
        let text = res.text().await?;
        log::trace!("Got text of menu page in \t {:?}", start.elapsed());
        Ok(Some(simple::parse_menu(&text, self.options)))
    }
}
