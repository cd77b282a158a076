use std::{
    fs,
    num::NonZeroU32,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Deserializer};
use url::Url;

use crate::{
    error::{Error, Result},
    identifier::{HallRef, Meal},
    parse::ParseOptions,
};

pub const DEFAULT_PATH: &str = "config/config.json";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub halls: Vec<Hall>,
    #[serde(default = "default_periods")]
    pub periods: Vec<String>,
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default)]
    pub protocol: Protocol,
    pub simple: Option<SimpleEndpoint>,
    pub session: Option<SessionEndpoints>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub parse: ParseOptions,
    #[serde(default = "default_translations_dir")]
    pub translations_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Hall {
    pub name: String,
    #[serde(deserialize_with = "string_or_number")]
    pub pid: String,
}

impl Hall {
    /// The numeric unit id the session protocol posts, when the pid is numeric.
    pub fn unit_oid(&self) -> Option<u64> {
        self.pid.parse().ok()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Simple,
    #[default]
    Session,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimpleEndpoint {
    pub endpoint: Url,
    pub action: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionEndpoints {
    pub base_url: Url,
    pub select_unit_url: Url,
    pub select_menu_url: Url,
}

impl SessionEndpoints {
    /// Endpoints laid out the way NetNutrition mounts them below a site root.
    pub fn under(base_url: &str) -> Result<Self> {
        let root = base_url.trim_end_matches('/');
        Ok(Self {
            base_url: Url::parse(root)?,
            select_unit_url: Url::parse(&format!("{root}/Unit/SelectUnitFromUnitsList"))?,
            select_menu_url: Url::parse(&format!("{root}/Menu/SelectMenu"))?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub requests_per_second: Option<NonZeroU32>,
}

impl HttpConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            requests_per_second: None,
        }
    }
}

fn default_periods() -> Vec<String> {
    ["Breakfast", "Lunch", "Dinner"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_languages() -> Vec<String> {
    vec!["English".to_owned()]
}

fn default_translations_dir() -> PathBuf {
    PathBuf::from("translations")
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_owned()
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pid {
        Number(u64),
        Text(String),
    }
    Ok(match Pid::deserialize(deserializer)? {
        Pid::Number(n) => n.to_string(),
        Pid::Text(s) => s,
    })
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        match self.protocol {
            Protocol::Simple if self.simple.is_none() => {
                return Err(Error::config_error(
                    "protocol is \"simple\" but the `simple` endpoint is missing",
                ))
            }
            Protocol::Session if self.session.is_none() => {
                return Err(Error::config_error(
                    "protocol is \"session\" but the `session` endpoints are missing",
                ))
            }
            _ => {}
        }
        if self.http.timeout_secs == 0 {
            return Err(Error::config_error("http.timeout_secs must be positive"));
        }
        self.meals()?;
        Ok(())
    }

    pub fn meals(&self) -> Result<Vec<Meal>> {
        self.periods
            .iter()
            .map(|p| p.parse::<Meal>().map_err(|e| Error::Config(e.to_string())))
            .collect()
    }

    /// Finds a hall by pid, or by name ignoring ASCII case.
    pub fn hall(&self, hall: &HallRef) -> Option<&Hall> {
        match hall {
            HallRef::Id(id) => {
                let id = id.to_string();
                self.halls.iter().find(|h| h.pid == id)
            }
            HallRef::Name(name) => self
                .halls
                .iter()
                .find(|h| h.name.eq_ignore_ascii_case(name) || h.pid == *name),
        }
    }

    pub fn supports_language(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l.eq_ignore_ascii_case(language))
    }
}
