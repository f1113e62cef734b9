//! Front-matter templates, one per supported static site generator.
//!
//! Every template lives here so adding a generator means one new
//! [`Generator`] variant, one template constant, and one match arm.

use crate::error::WxrError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp layout used in `wp:post_date` and in the front-matter `date`.
pub const POST_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// YAML front-matter for Hugo. Placeholders: `{title}`, `{date}`, `{draft}`.
pub const HUGO_TEMPLATE: &str = "---
title: \"{title}\"
date: {date}
draft: {draft}
---

";

/// A target static site generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Generator {
    #[default]
    Hugo,
}

impl Generator {
    pub const ALL: &'static [Generator] = &[Generator::Hugo];

    pub fn name(self) -> &'static str {
        match self {
            Generator::Hugo => "hugo",
        }
    }

    fn template(self) -> &'static str {
        match self {
            Generator::Hugo => HUGO_TEMPLATE,
        }
    }

    /// Fill the template for one document. The title goes in last so a
    /// title containing `{date}` is left alone.
    pub fn front_matter(self, fm: &FrontMatter) -> String {
        self.template()
            .replace("{date}", &fm.date.format(POST_DATE_FORMAT).to_string())
            .replace("{draft}", if fm.draft { "true" } else { "false" })
            .replace("{title}", &escape_quoted(&fm.title))
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = WxrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Generator::ALL
            .iter()
            .copied()
            .find(|g| g.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| WxrError::UnknownGenerator {
                name: wanted.to_string(),
                available: Generator::ALL
                    .iter()
                    .map(|g| g.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// The per-document values a template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub date: NaiveDateTime,
    pub draft: bool,
}

/// Escape for a double-quoted YAML scalar.
fn escape_quoted(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
