//! Localized strings consumed by the carousel.
//!
//! The page's content library resolves strings; this module only looks them
//! up and falls back to fixed English text when a key is missing.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// Placeholder key for the region role description.
pub const CAROUSEL: &str = "carousel";
/// Placeholder key for the indicator navigation label.
pub const SLIDE_CONTROLS: &str = "carouselSlideControls";
/// Placeholder key for the previous button label.
pub const PREVIOUS_SLIDE: &str = "previousSlide";
/// Placeholder key for the next button label.
pub const NEXT_SLIDE: &str = "nextSlide";
/// Placeholder key for the first half of an indicator label.
pub const SHOW_SLIDE: &str = "showSlide";
/// Placeholder key for the "of" in "Show Slide 1 of 3".
pub const OF: &str = "of";

/// A key-value lookup of already-resolved strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Placeholders {
    entries: HashMap<String, String>,
}

#[derive(Deserialize)]
struct Sheet {
    data: Vec<SheetRow>,
}

#[derive(Deserialize)]
struct SheetRow {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Text", default)]
    text: String,
}

impl Placeholders {
    /// An empty lookup; every string falls back to its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of `key -> text`.
    pub fn from_json(source: &str) -> Result<Self> {
        let entries: HashMap<String, String> = serde_json::from_str(source)?;
        Ok(Self { entries })
    }

    /// Parse a spreadsheet export (`{"data": [{"Key": .., "Text": ..}]}`).
    ///
    /// Keys are normalized to camelCase, so `"Previous Slide"` is found
    /// under `previousSlide`.
    pub fn from_sheet_json(source: &str) -> Result<Self> {
        let sheet: Sheet = serde_json::from_str(source)?;
        let entries = sheet
            .data
            .into_iter()
            .map(|row| (to_camel_case(&row.key), row.text))
            .collect();
        Ok(Self { entries })
    }

    /// Add or replace one entry.
    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(key.into(), text.into());
    }

    /// Look up a string.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a string, using `default` when missing or empty.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.get(key) {
            Some(text) if !text.is_empty() => text,
            _ => default,
        }
    }

    /// Role description of the carousel region.
    pub fn carousel(&self) -> &str {
        self.get_or(CAROUSEL, "Carousel")
    }

    /// Label of the indicator navigation.
    pub fn slide_controls(&self) -> &str {
        self.get_or(SLIDE_CONTROLS, "Carousel Slide Controls")
    }

    /// Label of the previous button.
    pub fn previous_slide(&self) -> &str {
        self.get_or(PREVIOUS_SLIDE, "Previous Slide")
    }

    /// Label of the next button.
    pub fn next_slide(&self) -> &str {
        self.get_or(NEXT_SLIDE, "Next Slide")
    }

    /// Label of the indicator for 0-based `index` out of `count` slides.
    pub fn indicator_label(&self, index: usize, count: usize) -> String {
        format!(
            "{} {} {} {}",
            self.get_or(SHOW_SLIDE, "Show Slide"),
            index + 1,
            self.get_or(OF, "of"),
            count
        )
    }
}

/// Turn a free-form sheet key into a camelCase lookup key.
fn to_camel_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper_next = false;
    for ch in key.chars() {
        if ch.is_ascii_alphanumeric() {
            if upper_next && !out.is_empty() {
                out.push(ch.to_ascii_uppercase());
            } else {
                out.push(ch.to_ascii_lowercase());
            }
            upper_next = false;
        } else {
            upper_next = true;
        }
    }
    out
}
