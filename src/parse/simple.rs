use scraper::{ElementRef, Html};

use super::menu::{Dish, Menu, ParseOptions};
use super::text::trimmed_text;
use crate::static_selector;

/// Parses the category/list layout served by the WordPress ajax endpoint.
///
/// ```html
/// <div class="dining-menu-category">
///   <h4>Grill</h4>
///   <ul><li><a>Cheeseburger</a><img alt="Halal"></li></ul>
/// </div>
/// ```
pub fn parse_menu(html: &str, options: ParseOptions) -> Menu {
    static_selector!(CATEGORY_SELECTOR <- "div.dining-menu-category");
    static_selector!(NAME_SELECTOR <- "h4");
    static_selector!(ITEM_SELECTOR <- "li");

    let document = Html::parse_fragment(html);
    let mut menu = Menu::new();
    for category in document.select(&CATEGORY_SELECTOR) {
        let Some(name) = category.select(&NAME_SELECTOR).next() else {
            log::debug!("skipping menu category without a heading");
            continue;
        };
        let name = trimmed_text(name);
        let dishes = menu.category_mut(&name);
        dishes.extend(category.select(&ITEM_SELECTOR).filter_map(dish_from_item));
    }
    options.finish(menu)
}

fn dish_from_item(item: ElementRef<'_>) -> Option<Dish> {
    static_selector!(LINK_SELECTOR <- "a");
    static_selector!(ICON_SELECTOR <- "img[alt]");

    let link = item.select(&LINK_SELECTOR).next()?;
    let diets = item
        .select(&ICON_SELECTOR)
        .filter_map(|img| img.attr("alt"));
    Some(Dish::new(trimmed_text(link)).with_diets(diets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::fs;

    fn fixture() -> String {
        fs::read_to_string("./src/parse/html_examples/simple/menu.html").unwrap()
    }

    #[test]
    fn test_parse_menu() {
        let menu = parse_menu(&fixture(), ParseOptions::default());
        assert_eq!(
            menu.dish_names(),
            vec![
                ("Grill", vec!["Cheeseburger", "Veggie Burger"]),
                ("Desserts", vec!["Apple Pie"]),
            ]
        );
        let grill = menu.get("Grill").unwrap();
        assert_eq!(grill[0].diets, BTreeSet::from(["Halal".to_owned()]));
        assert_eq!(
            grill[1].diets,
            BTreeSet::from(["Vegan".to_owned(), "Vegetarian".to_owned()])
        );
        assert!(menu.get("Desserts").unwrap()[0].diets.is_empty());
    }

    #[test]
    fn test_keep_empty_categories() {
        let options = ParseOptions {
            keep_empty_categories: true,
        };
        let menu = parse_menu(&fixture(), options);
        assert_eq!(menu.len(), 3);
        assert_eq!(menu.get("Soup of the Day"), Some(&[][..]));
    }

    #[test]
    fn test_every_declared_alt_is_a_tag() {
        let html = r#"
            <div class="dining-menu-category">
                <h4>Grill</h4>
                <ul><li><a>Fries</a><img alt=""><img src="x.svg"><img alt="Vegan"></li></ul>
            </div>"#;
        let menu = parse_menu(html, ParseOptions::default());
        assert_eq!(
            menu.get("Grill").unwrap()[0].diets,
            BTreeSet::from([String::new(), "Vegan".to_owned()])
        );
    }

    #[test]
    fn test_empty_html() {
        assert!(parse_menu("", ParseOptions::default()).is_empty());
    }
}
