use scraper::ElementRef;

/// Concatenated text of the element and its descendants, trimmed.
pub fn trimmed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

/// Every text node trimmed on its own and joined without a separator.
///
/// Matches how link labels like `<a> Dinner <span>\n</span></a>` read on screen.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}
