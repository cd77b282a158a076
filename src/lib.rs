//! Scrapes campus dining menus into a category → dishes mapping.
#![deny(unused_crate_dependencies)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

pub mod config;
pub mod error;
pub mod fetch;
pub mod format;
pub mod identifier;
pub mod parse;
pub mod translate;

pub use error::{Error, Result};
pub use fetch::MenuSource;
pub use identifier::{HallRef, Meal, MenuIdentifier};
pub use parse::{Dish, Menu};

// only the `dining-menu` binary uses these
use clap as _;
use pretty_env_logger as _;
use tokio as _;
