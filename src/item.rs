//! Decoded WXR records.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One `<item>` of a WordPress export, reduced to the fields the converter
/// reads. Missing fields are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub title: String,
    /// Raw HTML body (`content:encoded`).
    pub content: String,
    /// `wp:post_date`, `YYYY-MM-DD HH:MM:SS` in the site's local time.
    pub post_date: String,
    /// `wp:status`: `publish`, `draft`, `trash`, …
    pub status: String,
    /// `wp:post_type`: `post`, `page`, `attachment`, `nav_menu_item`, …
    pub post_type: String,
    /// `wp:post_name`, the URL slug.
    pub post_name: String,
}

/// The two record types that produce output files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Page,
}

impl Item {
    /// `None` for attachments, menu items and every other non-content type.
    pub fn kind(&self) -> Option<ContentKind> {
        match self.post_type.as_str() {
            "post" => Some(ContentKind::Post),
            "page" => Some(ContentKind::Page),
            _ => None,
        }
    }

    pub fn is_trashed(&self) -> bool {
        self.status == "trash"
    }

    pub fn is_published(&self) -> bool {
        self.status == "publish"
    }

    /// The file-name stem: `post_name`, or the kebab-cased title when the
    /// export left the slug empty (drafts usually do).
    pub fn slug(&self) -> Option<String> {
        let name = self.post_name.trim();
        if !name.is_empty() {
            return Some(name.to_string());
        }
        let derived = kebab_case(&self.title);
        (!derived.is_empty()).then_some(derived)
    }
}

static RE_NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{Alphabetic}\p{N}]+").unwrap());

/// Lowercase, with every run of non-alphanumerics collapsed to one `-`.
pub fn kebab_case(s: &str) -> String {
    RE_NON_ALNUM
        .replace_all(&s.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}
