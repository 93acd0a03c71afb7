use scraper::ElementRef;

/// Collapses every whitespace run to a single space and trims both ends.
pub fn clean_string(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized text content of an element.
pub fn element_text(element: &ElementRef) -> String {
    clean_string(&element.text().collect::<String>())
}

/// Label text without its trailing separator, e.g. `"Place of birth:"` -> `"Place of birth"`.
pub fn strip_label_suffix(label: &str) -> String {
    let mut label = clean_string(label);
    label.pop();
    label
}
