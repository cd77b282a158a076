use reqwest::{header::CONTENT_TYPE, Response};
use serde::Deserialize;

use crate::error::{Error, Result};

pub const MENU_PANEL: &str = "menuPanel";
pub const ITEM_PANEL: &str = "itemPanel";

const PREVIEW_CHARS: usize = 300;

/// The `{"panels": [{"id": ..., "html": ...}]}` body NetNutrition answers ajax posts with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PanelEnvelope {
    #[serde(default)]
    pub panels: Vec<Panel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Panel {
    pub id: String,
    #[serde(rename = "html")]
    pub content: Option<String>,
}

impl PanelEnvelope {
    /// Reads the envelope out of `response`, refusing anything not served as JSON.
    pub async fn from_response(response: Response) -> Result<Self> {
        let endpoint = response.url().to_string();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();
        if !content_type.starts_with("application/json") {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UnexpectedContentType {
                endpoint,
                content_type,
                preview: body.chars().take(PREVIEW_CHARS).collect(),
            });
        }
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    /// First panel with the given id that carries markup.
    pub fn panel(&self, id: &str) -> Option<&str> {
        self.panels
            .iter()
            .filter(|p| p.id == id)
            .find_map(|p| p.content.as_deref())
    }

    pub fn require(&self, id: &'static str) -> Result<&str> {
        self.panel(id).ok_or(Error::MissingPanel { panel: id })
    }
}
