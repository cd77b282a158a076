use reqwest::Client;
use tracing::{instrument, Level};

use super::{make_client, Pacer, PanelEnvelope, ITEM_PANEL, MENU_PANEL};
use crate::{
    config::{HttpConfig, SessionEndpoints},
    error::{Error, Result},
    identifier::{HallRef, MenuIdentifier},
    parse::{net_nutrition, DayIndex, Menu, ParseOptions},
};

/// The NetNutrition site, where a menu is reached by selecting a unit and then a menu offer.
#[derive(Debug)]
pub struct SessionSource {
    endpoints: SessionEndpoints,
    http: HttpConfig,
    options: ParseOptions,
    pacer: Pacer,
}

impl SessionSource {
    pub fn new(
        endpoints: SessionEndpoints,
        http: HttpConfig,
        options: ParseOptions,
        pacer: Pacer,
    ) -> Self {
        Self {
            endpoints,
            http,
            options,
            pacer,
        }
    }

    /// Runs the whole handshake on a fresh cookie session.
    ///
    /// A date/meal pair the unit does not offer is `Ok(None)`. A step that answers
    /// with something other than a JSON envelope holding the expected panel fails.
    #[instrument(skip(self, id), fields(
        date = %id.date,
        meal = %id.meal,
        hall = %id.hall,
    ), level = Level::TRACE)]
    pub async fn fetch_menu(&self, id: &MenuIdentifier) -> Result<Option<Menu>> {
        let unit_oid = match &id.hall {
            HallRef::Id(oid) => *oid,
            HallRef::Name(name) => return Err(Error::UnknownHall(name.clone())),
        };
        let session = Session::open(self).await?;
        let index = session.unit_menus(unit_oid).await?;
        let Some(menu_oid) = index.offer_id(id.date, id.meal.capitalized()) else {
            log::warn!("{unit_oid} {} {} no menu", id.date_key(), id.meal);
            return Ok(None);
        };
        let items = session.select_menu(menu_oid).await?;
        Ok(Some(net_nutrition::parse_menu(&items, self.options)))
    }
}

/// One cookie-carrying client, alive for a single handshake.
struct Session<'a> {
    source: &'a SessionSource,
    client: Client,
}

impl<'a> Session<'a> {
    async fn open(source: &'a SessionSource) -> Result<Session<'a>> {
        let client = make_client(&source.http)?;
        source.pacer.wait().await;
        client
            .get(source.endpoints.base_url.clone())
            .send()
            .await?
            .error_for_status()?;
        log::debug!("opened session at {}", source.endpoints.base_url);
        Ok(Self { source, client })
    }

    async fn unit_menus(&self, unit_oid: u64) -> Result<DayIndex> {
        let envelope = self
            .post(&self.source.endpoints.select_unit_url, "unitOid", unit_oid)
            .await?;
        let html = envelope.require(MENU_PANEL)?;
        Ok(DayIndex::from_html(html)?)
    }

    async fn select_menu(&self, menu_oid: u64) -> Result<String> {
        let envelope = self
            .post(&self.source.endpoints.select_menu_url, "menuOid", menu_oid)
            .await?;
        envelope.require(ITEM_PANEL).map(str::to_owned)
    }

    async fn post(&self, url: &url::Url, field: &str, oid: u64) -> Result<PanelEnvelope> {
        self.source.pacer.wait().await;
        log::debug!("POST {url} {field}={oid}");
        let res = self
            .client
            .post(url.clone())
            .form(&[(field, oid)])
            .send()
            .await?
            .error_for_status()?;
        PanelEnvelope::from_response(res).await
    }
}
