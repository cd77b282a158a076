use scraper::{ElementRef, Html};

use super::menu::{Dish, Menu, ParseOptions};
use super::text::trimmed_text;
use super::whitespace::first_segment;
use crate::static_selector;

const GROUP_ROW: &str = "cbo_nn_itemGroupRow";
const ITEM_ROWS: [&str; 2] = ["cbo_nn_itemPrimaryRow", "cbo_nn_itemAlternateRow"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RowKind {
    Group,
    Item,
    Other,
}

impl RowKind {
    fn of(row: ElementRef<'_>) -> Self {
        let classes: Vec<&str> = row.value().classes().collect();
        if classes.contains(&GROUP_ROW) {
            Self::Group
        } else if classes.iter().any(|c| ITEM_ROWS.contains(c)) {
            Self::Item
        } else {
            Self::Other
        }
    }
}

/// Parses the `itemPanel` grid of a NetNutrition menu.
///
/// Rows are read top to bottom: a group row opens a category and the item rows
/// after it fill that category. Item rows before any group row are dropped.
pub fn parse_menu(html: &str, options: ParseOptions) -> Menu {
    static_selector!(ROW_SELECTOR <- "tr");
    static_selector!(GROUP_NAME_SELECTOR <- "[role=button]");

    let document = Html::parse_fragment(html);
    let mut menu = Menu::new();
    let mut current: Option<String> = None;
    for row in document.select(&ROW_SELECTOR) {
        match RowKind::of(row) {
            RowKind::Group => {
                current = row
                    .select(&GROUP_NAME_SELECTOR)
                    .next()
                    .map(trimmed_text)
                    .filter(|name| !name.is_empty());
                if let Some(name) = &current {
                    menu.category_mut(name);
                }
            }
            RowKind::Item => {
                let Some(category) = &current else {
                    log::debug!("skipping item row outside of any group");
                    continue;
                };
                if let Some(dish) = dish_from_row(row) {
                    menu.push(category, dish);
                }
            }
            RowKind::Other => {}
        }
    }
    options.finish(menu)
}

fn dish_from_row(row: ElementRef<'_>) -> Option<Dish> {
    static_selector!(ITEM_LINK_SELECTOR <- "a.cbo_nn_itemHover");
    static_selector!(ICON_SELECTOR <- "img[alt]");

    let link = row.select(&ITEM_LINK_SELECTOR).next()?;
    let text = trimmed_text(link);
    let name = first_segment(&text);
    if name.is_empty() {
        return None;
    }
    let diets = row.select(&ICON_SELECTOR).filter_map(|img| img.attr("alt"));
    Some(Dish::new(name).with_diets(diets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture() -> String {
        fs::read_to_string("./src/parse/html_examples/net_nutrition/item_panel.html").unwrap()
    }

    fn table(rows: &str) -> String {
        format!("<table><tbody>{rows}</tbody></table>")
    }

    #[test]
    fn test_parse_menu() {
        let menu = parse_menu(&fixture(), ParseOptions::default());
        assert_eq!(
            menu.dish_names(),
            vec![
                ("Entrées", vec!["Grilled Chicken", "Rice"]),
                ("Desserts", vec!["Chocolate Chip Cookie"]),
            ]
        );
        let entrees = menu.get("Entrées").unwrap();
        assert!(entrees[0].diets.contains("Vegan"));
        assert!(entrees[1].diets.is_empty());
    }

    #[test]
    fn test_parse_is_idempotent() {
        let html = fixture();
        assert_eq!(
            parse_menu(&html, ParseOptions::default()),
            parse_menu(&html, ParseOptions::default())
        );
    }

    #[test]
    fn test_two_items_under_one_group() {
        let html = table(
            r#"
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Entrées</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Grilled Chicken  (V)</a></td></tr>
            <tr class="cbo_nn_itemAlternateRow"><td><a class="cbo_nn_itemHover">Rice</a></td></tr>
            "#,
        );
        let menu = parse_menu(&html, ParseOptions::default());
        assert_eq!(
            menu.dish_names(),
            vec![("Entrées", vec!["Grilled Chicken", "Rice"])]
        );
    }

    #[test]
    fn test_group_without_items_is_dropped() {
        let html = table(
            r#"<tr class="cbo_nn_itemGroupRow"><td><div role="button">Soups</div></td></tr>"#,
        );
        assert!(parse_menu(&html, ParseOptions::default()).is_empty());
        let kept = parse_menu(
            &html,
            ParseOptions {
                keep_empty_categories: true,
            },
        );
        assert_eq!(kept.get("Soups"), Some(&[][..]));
    }

    #[test]
    fn test_item_before_group_is_skipped() {
        let html = table(
            r#"
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Orphan</a></td></tr>
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Sides</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Fries</a></td></tr>
            "#,
        );
        let menu = parse_menu(&html, ParseOptions::default());
        assert_eq!(menu.dish_names(), vec![("Sides", vec!["Fries"])]);
    }

    #[test]
    fn test_unnamed_group_closes_current_category() {
        let html = table(
            r#"
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Sides</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Fries</a></td></tr>
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">  </div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Lost</a></td></tr>
            "#,
        );
        let menu = parse_menu(&html, ParseOptions::default());
        assert_eq!(menu.dish_names(), vec![("Sides", vec!["Fries"])]);
    }

    #[test]
    fn test_blank_item_name_is_skipped() {
        let html = table(
            r#"
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Soups</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">   </a></td></tr>
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Sides</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Fries</a></td></tr>
            "#,
        );
        let menu = parse_menu(&html, ParseOptions::default());
        assert_eq!(menu.dish_names(), vec![("Sides", vec!["Fries"])]);
    }

    #[test]
    fn test_repeated_group_merges() {
        let html = table(
            r#"
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Grill</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Burger</a></td></tr>
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Deli</div></td></tr>
            <tr class="cbo_nn_itemPrimaryRow"><td><a class="cbo_nn_itemHover">Club</a></td></tr>
            <tr class="cbo_nn_itemGroupRow"><td><div role="button">Grill</div></td></tr>
            <tr class="cbo_nn_itemAlternateRow"><td><a class="cbo_nn_itemHover">Hot Dog</a></td></tr>
            "#,
        );
        let menu = parse_menu(&html, ParseOptions::default());
        assert_eq!(
            menu.dish_names(),
            vec![("Grill", vec!["Burger", "Hot Dog"]), ("Deli", vec!["Club"])]
        );
    }

    #[test]
    fn test_empty_html() {
        assert!(parse_menu("", ParseOptions::default()).is_empty());
    }
}
