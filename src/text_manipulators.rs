use scraper::ElementRef;

/// Concatenated text of every descendant, each piece trimmed.
pub fn extract_text(node: ElementRef) -> String {
    node.text().map(str::trim).collect::<String>()
}
