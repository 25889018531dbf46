use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Runs of whitespace (spaces, tabs, newlines) collapsed to a single space
    /// when normalising free text such as cause numbers and rejection reasons
    pub static ref WHITESPACE_REGEX: Regex = Regex::new(r"\s+").unwrap();

    /// Typographic apostrophes that appear in pasted registry text
    /// - "Bankers’ cheques" and "Bankers' cheques" compare equal after normalisation
    pub static ref APOSTROPHE_REGEX: Regex = Regex::new(r"[\x{2018}\x{2019}\x{02BC}]").unwrap();
}

/// Trim and collapse internal whitespace
pub fn normalize_text(input: &str) -> String {
    WHITESPACE_REGEX.replace_all(input.trim(), " ").into_owned()
}

/// Key used to compare free text case- and punctuation-insensitively
pub fn comparison_key(input: &str) -> String {
    APOSTROPHE_REGEX
        .replace_all(&normalize_text(input), "'")
        .to_lowercase()
}

/// True when the text holds nothing but whitespace
pub fn is_blank(input: &str) -> bool {
    input.trim().is_empty()
}
