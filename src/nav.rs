//! Sidebar navigation tree.
//!
//! Builds a two-level list of anchor links mirroring the section structure
//! of the page. Top-level entries come from h2-headed sections, and
//! h3-headed sections nest under the most recent top-level entry.

use crate::error::{Error, Result};
use crate::model::{HeadingLevel, Section};
use serde::Serialize;

/// A single navigation entry linking to a section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavEntry {
    /// The rendered heading text of the target section
    pub label: String,

    /// The id of the target section (the link target is `#` + this id)
    pub target_id: String,

    /// Child entries under this one
    pub children: Vec<NavEntry>,
}

impl NavEntry {
    fn leaf(label: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target_id: target_id.into(),
            children: Vec::new(),
        }
    }
}

/// Build the navigation tree from the nav candidate sections, in document
/// order.
///
/// Sections without an id are skipped. A section with an id must carry a
/// heading, and an h3-headed section must be preceded by an h2-headed one;
/// both violations are configuration errors in the source document.
pub fn build_nav<'a, I>(candidates: I) -> Result<Vec<NavEntry>>
where
    I: IntoIterator<Item = &'a Section>,
{
    // The accumulator's last entry is the parent for subsequent h3 sections.
    let mut entries: Vec<NavEntry> = Vec::new();

    for section in candidates {
        let id = match section.id.as_deref() {
            Some(id) => id,
            None => {
                log::debug!("skipping section without id in navigation");
                continue;
            },
        };

        let heading = section
            .heading
            .as_ref()
            .ok_or_else(|| Error::MissingHeading(id.to_string()))?;

        let entry = NavEntry::leaf(heading.text.clone(), id);
        match heading.level {
            HeadingLevel::H2 => entries.push(entry),
            HeadingLevel::H3 => {
                let parent = entries
                    .last_mut()
                    .ok_or_else(|| Error::OrphanSubsection(id.to_string()))?;
                parent.children.push(entry);
            },
        }
    }

    log::info!(
        "navigation built: {} top-level entries, {} total",
        entries.len(),
        entries.len() + entries.iter().map(|e| e.children.len()).sum::<usize>()
    );

    Ok(entries)
}
