mod day_index;
mod error;
mod menu;
pub mod net_nutrition;
pub mod simple;
pub mod static_selector;
mod text;
mod whitespace;

pub use day_index::DayIndex;
pub use error::Error;
pub use menu::{Category, Dish, Menu, ParseOptions};
