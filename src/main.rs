#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Parser;

use dining_menu::{
    config::{self, Config},
    format::{format_menu, format_title},
    translate::{self, miss_log_path, MissLog, Translations},
    HallRef, Meal, MenuIdentifier, MenuSource,
};

const NO_MENU: &str =
    "Sorry, no menu data available. This hall may not be open during this period.";

/// Look up what a campus dining hall is serving.
#[derive(Debug, Parser)]
#[command(name = "dining-menu", version)]
struct Args {
    /// Hall name or id as listed in the config.
    #[arg(long)]
    hall: String,
    /// Meal period, e.g. breakfast, lunch or dinner.
    #[arg(long)]
    meal: Meal,
    /// Date as YYYY-MM-DD; today when omitted.
    #[arg(long)]
    date: Option<NaiveDate>,
    #[arg(long, default_value = translate::SOURCE_LANGUAGE)]
    language: String,
    #[arg(long, env = "DINING_CONFIG", default_value = config::DEFAULT_PATH)]
    config: PathBuf,
    /// Print the menu as JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> core::result::Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let args = Args::parse();
    let config = Config::load(&args.config)?;

    let requested: HallRef = args.hall.parse()?;
    let hall = config
        .hall(&requested)
        .ok_or_else(|| dining_menu::Error::UnknownHall(requested.to_string()))?;
    let hall_ref = hall
        .unit_oid()
        .map_or_else(|| HallRef::Name(hall.pid.clone()), HallRef::Id);
    if !config.meals()?.contains(&args.meal) {
        log::warn!("{} is not one of the configured periods", args.meal);
    }
    if !config.supports_language(&args.language) {
        log::warn!("{} is not one of the configured languages", args.language);
    }

    let id = MenuIdentifier::new(
        args.date.unwrap_or_else(|| Local::now().date_naive()),
        args.meal,
        hall_ref,
    );
    let source = MenuSource::from_config(&config)?;
    log::info!("fetching {} for {}", id.meal, hall.name);
    let menu = source.fetch_menu(&id).await?;

    let translations = Translations::load(&config.translations_dir, &args.language)?;
    let misses_path = miss_log_path(&config.translations_dir);
    let mut misses = MissLog::load(&misses_path)?;
    match menu {
        None => println!("{}", translate::translate(NO_MENU, &translations, &mut misses)),
        Some(menu) => {
            let menu = translate::translate_menu(&menu, &translations, &mut misses);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&menu)?);
            } else {
                println!("{}\n{}", format_title(&id, &hall.name), format_menu(&menu));
            }
        }
    }
    if misses.is_dirty() {
        misses.save(&misses_path)?;
    }
    Ok(())
}
