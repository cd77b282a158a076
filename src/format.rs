use std::fmt::Write;

use crate::{identifier::MenuIdentifier, parse::Menu};

/// Plain-text listing: each category name followed by its dishes as bullets.
pub fn format_menu(menu: &Menu) -> String {
    let mut out = String::new();
    for category in menu {
        let _ = writeln!(out, "{}:", category.name);
        for dish in &category.dishes {
            let _ = writeln!(out, "    • {}", dish.name);
        }
        out.push('\n');
    }
    out
}

pub fn format_title(id: &MenuIdentifier, hall_name: &str) -> String {
    format!("{} - {} - {}", id.date_key(), hall_name, id.meal)
}
