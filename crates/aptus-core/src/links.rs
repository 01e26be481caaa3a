//! Detail-page URL templates.
//!
//! Index pages link to detail pages either through an `onclick` handler on a
//! table row (`document.location.href='…/<Section>/Details/<id>'`) or by
//! redirecting straight to `…/<Section>/Details/<id>`. One [`DetailLink`] per
//! section knows how to pull the id out of both.

use once_cell::sync::Lazy;
use regex::Regex;

/// URL template of one portal section.
#[derive(Debug)]
pub struct DetailLink {
    section: &'static str,
    onclick: Regex,
    url: Regex,
}

impl DetailLink {
    fn new(section: &'static str) -> Self {
        let section_re = regex::escape(section);
        Self {
            section,
            onclick: Regex::new(&format!(
                r"document\.location\.href='.+/{}/Details/(\d+)'",
                section_re
            ))
            .expect("onclick pattern is valid"),
            url: Regex::new(&format!(r".+/{}/Details/(\d+)", section_re))
                .expect("url pattern is valid"),
        }
    }

    pub fn section(&self) -> &'static str {
        self.section
    }

    /// Id from a row's `onclick` handler; `None` for rows that link elsewhere.
    pub fn id_from_onclick(&self, onclick: &str) -> Option<String> {
        self.onclick
            .captures(onclick)
            .map(|caps| caps[1].to_string())
    }

    /// Id from a details page URL.
    pub fn id_from_url(&self, url: &str) -> Option<String> {
        self.url.captures(url).map(|caps| caps[1].to_string())
    }

    /// `<Section>/Index/<id>`
    pub fn index_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/Index/{}", self.section, id)
    }

    /// `<Section>/Details/<id>`
    pub fn details_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/Details/{}", self.section, id)
    }

    /// `<Section>/Edit/<id>`
    pub fn edit_path(&self, id: impl std::fmt::Display) -> String {
        format!("{}/Edit/{}", self.section, id)
    }
}

pub static AUTHORITY: Lazy<DetailLink> = Lazy::new(|| DetailLink::new("Authority"));
pub static CUSTOMER: Lazy<DetailLink> = Lazy::new(|| DetailLink::new("Customer"));
pub static CUSTOMER_KEYS: Lazy<DetailLink> = Lazy::new(|| DetailLink::new("CustomerKeys"));
pub static CUSTOMER_CONTRACT: Lazy<DetailLink> =
    Lazy::new(|| DetailLink::new("CustomerContract"));
pub static CUSTOMER_ENTRY_PHONE: Lazy<DetailLink> =
    Lazy::new(|| DetailLink::new("CustomerEntryPhone"));
pub static CUSTOMER_NOTE: Lazy<DetailLink> = Lazy::new(|| DetailLink::new("CustomerNote"));
