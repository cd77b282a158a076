use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;
use serde::Serialize;

use super::text::stripped_text;
use super::Error;
use crate::static_selector;

/// Day headers read like `Monday, January 06, 2025`.
pub const DAY_HEADER_FORMAT: &str = "%A, %B %d, %Y";

/// Offer ids listed in a unit's menu panel, keyed by date and then by meal label.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayIndex(BTreeMap<NaiveDate, BTreeMap<String, u64>>);

impl DayIndex {
    /// Builds the index from the `menuPanel` fragment of a unit selection.
    ///
    /// A day card whose header does not read as a date is an error: it means the
    /// page template changed. Meal links without a numeric id are skipped.
    pub fn from_html(html: &str) -> Result<Self, Error> {
        static_selector!(CARD_SELECTOR <- "section.card");
        static_selector!(HEADER_SELECTOR <- "header.card-title");
        static_selector!(MEAL_LINK_SELECTOR <- "a.cbo_nn_menuLink");

        let document = Html::parse_fragment(html);
        let mut days = BTreeMap::new();
        for card in document.select(&CARD_SELECTOR) {
            let Some(header) = card.select(&HEADER_SELECTOR).next() else {
                continue;
            };
            let header = stripped_text(header);
            let date = NaiveDate::parse_from_str(&header, DAY_HEADER_FORMAT).map_err(|e| {
                Error::html_parse_error(&format!("day header {header:?} is not a date: {e}"))
            })?;

            let meals: &mut BTreeMap<String, u64> = days.entry(date).or_default();
            for link in card.select(&MEAL_LINK_SELECTOR) {
                let Some(id) = link.attr("onclick").and_then(offer_id) else {
                    log::debug!("skipping meal link without an offer id on {date}");
                    continue;
                };
                meals.insert(stripped_text(link), id);
            }
        }
        Ok(Self(days))
    }

    pub fn offer_id(&self, date: NaiveDate, meal_label: &str) -> Option<u64> {
        self.0.get(&date)?.get(meal_label).copied()
    }

    pub fn meals_on(&self, date: NaiveDate) -> Option<&BTreeMap<String, u64>> {
        self.0.get(&date)
    }

    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Pulls `482` out of handlers like `menuListSelectMenu(482);`.
fn offer_id(onclick: &str) -> Option<u64> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r"\((\d+)\)").expect("regex should be valid"));
    re.captures(onclick)?.get(1)?.as_str().parse().ok()
}
