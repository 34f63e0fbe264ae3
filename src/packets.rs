//! Packet table of contents.
//!
//! Derives one row per packet section from the packet-types container and
//! orders them by direction, then primary type, then secondary and tertiary
//! type. The comparator is an explicit multi-key one; ordering is
//! deterministic lexicographic order on the key fields, and the underlying
//! stable sort preserves document order for exact duplicate keys.

use crate::error::{Error, Result};
use crate::model::Section;
use serde::Serialize;

/// A table row summarizing one packet-type section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PacketRow {
    /// Rendered heading text of the packet section
    pub label: String,

    /// Id of the packet section (the row links to `#` + this id)
    pub target_id: String,

    /// Whether the packet is marked removed
    pub removed: bool,

    /// Direction indicator text
    pub direction: String,

    /// Primary type code
    pub primary_type: String,

    /// Secondary type code, if any
    pub secondary_type: Option<String>,

    /// Tertiary type code; only meaningful when a secondary type is present
    pub tertiary_type: Option<String>,
}

impl PacketRow {
    /// Composite sort key: direction, then primary, secondary, tertiary type.
    fn sort_key(&self) -> (&str, &str, &str, &str) {
        (
            &self.direction,
            &self.primary_type,
            self.secondary_type.as_deref().unwrap_or(""),
            self.tertiary_type.as_deref().unwrap_or(""),
        )
    }
}

/// Extract packet rows from the candidate sections, sorted.
///
/// Sections without an id are skipped. A packet section with an id must
/// carry a heading, a props block, and at least one type code.
pub fn build_rows<'a, I>(candidates: I) -> Result<Vec<PacketRow>>
where
    I: IntoIterator<Item = &'a Section>,
{
    let mut rows = Vec::new();

    for section in candidates {
        let id = match section.id.as_deref() {
            Some(id) => id,
            None => {
                log::debug!("skipping packet section without id");
                continue;
            },
        };

        let heading = section
            .heading
            .as_ref()
            .ok_or_else(|| Error::MissingHeading(id.to_string()))?;
        let props = section
            .props
            .as_ref()
            .ok_or_else(|| Error::MissingProps(id.to_string()))?;

        let mut codes = props.type_codes.iter();
        let primary_type = codes
            .next()
            .cloned()
            .ok_or_else(|| Error::MissingTypeCode(id.to_string()))?;
        let secondary_type = codes.next().cloned();
        let tertiary_type = codes.next().cloned();
        if codes.next().is_some() {
            log::warn!(
                "packet section '{}' has more than three type codes; extras ignored",
                id
            );
        }

        rows.push(PacketRow {
            label: heading.text.clone(),
            target_id: id.to_string(),
            removed: heading.removed,
            direction: props.direction.clone(),
            primary_type,
            secondary_type,
            tertiary_type,
        });
    }

    rows.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));

    log::info!("packet table built: {} rows", rows.len());
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Heading, HeadingLevel, PropsBlock};

    fn packet(id: &str, direction: &str, codes: &[&str]) -> Section {
        let mut sec = Section::new(Some(id.to_string()));
        sec.heading = Some(Heading {
            level: HeadingLevel::H3,
            text: id.to_string(),
            removed: false,
        });
        sec.props = Some(PropsBlock {
            direction: direction.to_string(),
            type_codes: codes.iter().map(|c| c.to_string()).collect(),
        });
        sec
    }

    #[test]
    fn test_rows_sorted_by_direction_then_types() {
        let sections = vec![
            packet("b", "TX", &["0x01"]),
            packet("c", "RX", &["0x02"]),
            packet("a", "RX", &["0x01"]),
        ];

        let rows = build_rows(&sections).expect("row build failed");
        let order: Vec<_> = rows.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(order, vec!["a", "c", "b"]);
    }

    #[test]
    fn test_secondary_breaks_primary_ties() {
        let sections = vec![
            packet("late", "RX", &["0x01", "0x10"]),
            packet("early", "RX", &["0x01", "0x05"]),
            packet("first", "RX", &["0x01"]),
        ];

        let rows = build_rows(&sections).expect("row build failed");
        let order: Vec<_> = rows.iter().map(|r| r.target_id.as_str()).collect();
        assert_eq!(order, vec!["first", "early", "late"]);
    }

    #[test]
    fn test_concatenation_collisions_do_not_reorder() {
        // "TX1"+"0" and "TX"+"10" collide under naive key concatenation; the
        // multi-key comparator keeps them apart.
        let sections = vec![
            packet("b", "TX1", &["0"]),
            packet("a", "TX", &["10"]),
        ];

        let rows = build_rows(&sections).expect("row build failed");
        assert_eq!(rows[0].target_id, "a");
        assert_eq!(rows[1].target_id, "b");
    }

    #[test]
    fn test_duplicate_keys_keep_document_order() {
        let sections = vec![
            packet("first", "RX", &["0x01"]),
            packet("second", "RX", &["0x01"]),
        ];

        let rows = build_rows(&sections).expect("row build failed");
        assert_eq!(rows[0].target_id, "first");
        assert_eq!(rows[1].target_id, "second");
    }

    #[test]
    fn test_type_hierarchy_extraction() {
        let sections = vec![packet("pkt", "RX", &["0x01", "0x05", "0x02", "0xFF"])];

        let rows = build_rows(&sections).expect("row build failed");
        assert_eq!(rows[0].primary_type, "0x01");
        assert_eq!(rows[0].secondary_type.as_deref(), Some("0x05"));
        assert_eq!(rows[0].tertiary_type.as_deref(), Some("0x02"));
    }

    #[test]
    fn test_sections_without_id_are_skipped() {
        let mut anonymous = packet("x", "RX", &["0x01"]);
        anonymous.id = None;
        let sections = vec![anonymous, packet("kept", "RX", &["0x01"])];

        let rows = build_rows(&sections).expect("row build failed");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].target_id, "kept");
    }

    #[test]
    fn test_missing_props_rejected() {
        let mut sec = packet("pkt", "RX", &["0x01"]);
        sec.props = None;
        let err = build_rows(&[sec]).unwrap_err();
        assert!(matches!(err, Error::MissingProps(id) if id == "pkt"));
    }

    #[test]
    fn test_missing_type_code_rejected() {
        let sections = vec![packet("pkt", "RX", &[])];
        let err = build_rows(&sections).unwrap_err();
        assert!(matches!(err, Error::MissingTypeCode(id) if id == "pkt"));
    }

    #[test]
    fn test_removed_flag_carried() {
        let mut sec = packet("old", "RX", &["0x03"]);
        if let Some(ref mut heading) = sec.heading {
            heading.removed = true;
        }
        let rows = build_rows(&[sec]).expect("row build failed");
        assert!(rows[0].removed);
    }
}
