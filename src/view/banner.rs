const NBSP_ENTITY: &str = "&nbsp;";

/// Chapter title as shown in the info banner: upper-case, with every space
/// turned into a non-breaking space so the banner never wraps mid-title.
pub fn format_banner_title(title: &str) -> String {
    title.to_uppercase().replace(' ', NBSP_ENTITY)
}

/// Banner markup back to drawable text.
pub fn decode_banner_title(markup: &str) -> String {
    markup.replace(NBSP_ENTITY, "\u{a0}")
}
