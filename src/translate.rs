//! Table-driven translation of menu text.
//!
//! Looking a string up and noting that it had no translation are kept apart:
//! [`Translations::lookup`] is a pure query and [`MissLog`] is where gaps are
//! recorded. [`translate`] composes the two for callers that want both.
use std::{
    collections::{BTreeMap, HashMap},
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{
    error::Result,
    parse::{Dish, Menu},
};

pub const SOURCE_LANGUAGE: &str = "English";
pub const MISS_LOG_FILE: &str = "untranslated.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Translations {
    language: String,
    table: HashMap<String, String>,
}

impl Translations {
    /// Reads `<dir>/<language>.json`, a flat `{"source": "translated"}` object.
    ///
    /// A language without a file gets an empty table, so every lookup misses.
    pub fn load(dir: impl AsRef<Path>, language: &str) -> Result<Self> {
        if is_source_language(language) {
            return Ok(Self::identity());
        }
        let path = dir.as_ref().join(format!("{language}.json"));
        let table = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("no translations at {}", path.display());
                HashMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            language: language.to_owned(),
            table,
        })
    }

    pub fn identity() -> Self {
        Self {
            language: SOURCE_LANGUAGE.to_owned(),
            table: HashMap::new(),
        }
    }

    pub fn from_table(language: &str, table: HashMap<String, String>) -> Self {
        Self {
            language: language.to_owned(),
            table,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn is_identity(&self) -> bool {
        is_source_language(&self.language)
    }

    pub fn lookup<'a>(&'a self, text: &'a str) -> Option<&'a str> {
        if self.is_identity() {
            return Some(text);
        }
        self.table.get(text).map(String::as_str)
    }
}

fn is_source_language(language: &str) -> bool {
    language.eq_ignore_ascii_case(SOURCE_LANGUAGE)
}

/// Texts that had no translation, per language, in the order they were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MissLog {
    misses: BTreeMap<String, Vec<String>>,
    dirty: bool,
}

impl MissLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a previously saved log; a missing file is an empty log.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self {
            misses: read_misses(path.as_ref())?,
            dirty: false,
        })
    }

    /// Returns whether `text` was new for `language`.
    pub fn record(&mut self, language: &str, text: &str) -> bool {
        let seen = self.misses.entry(language.to_owned()).or_default();
        if seen.iter().any(|s| s == text) {
            return false;
        }
        seen.push(text.to_owned());
        self.dirty = true;
        true
    }

    pub fn misses(&self, language: &str) -> &[String] {
        self.misses.get(language).map_or(&[][..], Vec::as_slice)
    }

    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Writes the log, first folding in whatever is on disk now so entries
    /// saved by another run since `load` are kept.
    pub fn save(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut merged = read_misses(path)?;
        for (language, texts) in std::mem::take(&mut self.misses) {
            let seen = merged.entry(language).or_default();
            for text in texts {
                if !seen.contains(&text) {
                    seen.push(text);
                }
            }
        }
        self.misses = merged;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.misses)?)?;
        self.dirty = false;
        Ok(())
    }
}

fn read_misses(path: &Path) -> Result<BTreeMap<String, Vec<String>>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(serde_json::from_str(&text)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(e.into()),
    }
}

pub fn miss_log_path(dir: impl AsRef<Path>) -> PathBuf {
    dir.as_ref().join(MISS_LOG_FILE)
}

/// Translated text, or `text` itself after recording the miss.
pub fn translate(text: &str, translations: &Translations, misses: &mut MissLog) -> String {
    if let Some(translated) = translations.lookup(text) {
        return translated.to_owned();
    }
    if misses.record(translations.language(), text) {
        log::debug!("no {} translation for {text:?}", translations.language());
    }
    text.to_owned()
}

/// Translates category and dish names; diet tags are left as they are.
pub fn translate_menu(menu: &Menu, translations: &Translations, misses: &mut MissLog) -> Menu {
    let mut out = Menu::new();
    for category in menu {
        let name = translate(&category.name, translations, misses);
        let dishes = out.category_mut(&name);
        for dish in &category.dishes {
            dishes.push(Dish {
                name: translate(&dish.name, translations, misses),
                diets: dish.diets.clone(),
            });
        }
    }
    out
}
