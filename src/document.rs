//! Top-level document API.
//!
//! [`PageDocument`] owns the source markup and its parsed section tree.
//! Parsing and validation happen at construction; the builders and the
//! rewriter then operate on known-good records.

use crate::config::AugmentConfig;
use crate::error::Result;
use crate::model::PageModel;
use crate::nav::{self, NavEntry};
use crate::packets::{self, PacketRow};
use crate::render;
use crate::rewrite;
use std::fs;
use std::path::Path;

/// A documentation page loaded for augmentation.
///
/// # Example
///
/// ```no_run
/// use page_oxide::PageDocument;
///
/// let doc = PageDocument::open("protocol.html")?;
/// let augmented = doc.augment()?;
/// std::fs::write("protocol.out.html", augmented)?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct PageDocument {
    html: String,
    config: AugmentConfig,
    model: PageModel,
}

impl PageDocument {
    /// Open and parse a page from a file, using the default contract.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_config(path, AugmentConfig::default())
    }

    /// Open and parse a page from a file with an explicit contract.
    pub fn open_with_config(path: impl AsRef<Path>, config: AugmentConfig) -> Result<Self> {
        let html = fs::read_to_string(path)?;
        Self::from_html_with_config(html, config)
    }

    /// Parse a page from markup held in memory, using the default contract.
    pub fn from_html(html: impl Into<String>) -> Result<Self> {
        Self::from_html_with_config(html, AugmentConfig::default())
    }

    /// Parse a page from markup held in memory with an explicit contract.
    pub fn from_html_with_config(html: impl Into<String>, config: AugmentConfig) -> Result<Self> {
        let html = html.into();
        let model = crate::parser::parse_page(&html, &config)?;
        Ok(Self {
            html,
            config,
            model,
        })
    }

    /// The parsed section tree.
    pub fn model(&self) -> &PageModel {
        &self.model
    }

    /// The structural contract in effect.
    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }

    /// Derive the sidebar navigation entries.
    pub fn nav_entries(&self) -> Result<Vec<NavEntry>> {
        nav::build_nav(self.model.nav_candidates())
    }

    /// Derive the packet rows, sorted by direction and type hierarchy.
    pub fn packet_rows(&self) -> Result<Vec<PacketRow>> {
        packets::build_rows(self.model.packet_candidates(&self.config.packet_container_id))
    }

    /// Produce the augmented page markup.
    ///
    /// Derives the navigation list and the packet table, renders both, and
    /// splices them into the source markup. Running this on its own output
    /// yields the same page again.
    pub fn augment(&self) -> Result<String> {
        let entries = self.nav_entries()?;
        let rows = self.packet_rows()?;

        let nav_html = render::render_nav_list(&entries);
        let rows_html = render::render_packet_rows(&rows);

        rewrite::rewrite_page(&self.html, &nav_html, &rows_html, &self.config, !rows.is_empty())
    }

    /// Augment the page and write the result to a file.
    pub fn write_augmented(&self, path: impl AsRef<Path>) -> Result<()> {
        let augmented = self.augment()?;
        fs::write(path, augmented)?;
        Ok(())
    }
}
