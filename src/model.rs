//! Typed records for the parsed page.
//!
//! The source markup is parsed into these records at a single boundary (see
//! [`crate::parser`]) so malformed input is caught up front instead of
//! failing deep inside the builders.

use indexmap::IndexSet;

/// Heading level of a section title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingLevel {
    /// Top-level section title (h2)
    H2,
    /// Subsection title (h3)
    H3,
}

/// A section heading with its rendered text.
#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    /// Heading level
    pub level: HeadingLevel,
    /// Rendered text, markup stripped and whitespace collapsed
    pub text: String,
    /// Whether the heading carries the "removed" marker class
    pub removed: bool,
}

/// Direction and type-code metadata of a packet section.
#[derive(Debug, Clone, PartialEq)]
pub struct PropsBlock {
    /// Rendered text of the direction indicator span(s)
    pub direction: String,
    /// Ordered type-code tokens; the first is the primary type
    pub type_codes: Vec<String>,
}

/// A structural content block of the page.
///
/// Sections without an id are kept in the tree (their children may still
/// carry ids) but are skipped by the builders.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    /// Unique id, if any
    pub id: Option<String>,
    /// First h2 or h3 heading inside the section
    pub heading: Option<Heading>,
    /// Props block, present on packet sections
    pub props: Option<PropsBlock>,
    /// Nested child sections in document order
    pub children: Vec<Section>,
}

impl Section {
    /// Create an empty section with an optional id.
    pub fn new(id: Option<String>) -> Self {
        Self {
            id,
            heading: None,
            props: None,
            children: Vec::new(),
        }
    }
}

/// The parsed section tree of a page.
#[derive(Debug, Clone, Default)]
pub struct PageModel {
    /// Sections directly under the content root, in document order
    pub sections: Vec<Section>,
    ids: IndexSet<String>,
}

impl PageModel {
    /// Create a model from the top-level sections and the id registry.
    pub(crate) fn new(sections: Vec<Section>, ids: IndexSet<String>) -> Self {
        Self { sections, ids }
    }

    /// All section ids in first-seen document order.
    pub fn section_ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Find a section by id anywhere in the tree.
    pub fn find_section(&self, id: &str) -> Option<&Section> {
        fn walk<'a>(sections: &'a [Section], id: &str) -> Option<&'a Section> {
            for sec in sections {
                if sec.id.as_deref() == Some(id) {
                    return Some(sec);
                }
                if let Some(found) = walk(&sec.children, id) {
                    return Some(found);
                }
            }
            None
        }
        walk(&self.sections, id)
    }

    /// Sections eligible for the navigation list: nesting depth 1 and 2
    /// under the content root, in document order.
    pub fn nav_candidates(&self) -> Vec<&Section> {
        let mut candidates = Vec::new();
        for top in &self.sections {
            candidates.push(top);
            candidates.extend(top.children.iter());
        }
        candidates
    }

    /// Sections eligible for the packet table: grandchildren of the packet
    /// container section, in document order.
    ///
    /// Returns an empty list when the container is absent.
    pub fn packet_candidates(&self, container_id: &str) -> Vec<&Section> {
        let mut candidates = Vec::new();
        if let Some(container) = self.find_section(container_id) {
            for group in &container.children {
                candidates.extend(group.children.iter());
            }
        }
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str) -> Section {
        Section::new(Some(id.to_string()))
    }

    #[test]
    fn test_find_section_nested() {
        let mut root = section("a");
        root.children.push(section("b"));
        let model = PageModel::new(vec![root], IndexSet::new());

        assert!(model.find_section("a").is_some());
        assert!(model.find_section("b").is_some());
        assert!(model.find_section("c").is_none());
    }

    #[test]
    fn test_nav_candidates_depth_limit() {
        let mut deep = section("deep");
        deep.children.push(section("too-deep"));
        let mut top = section("top");
        top.children.push(deep);
        let model = PageModel::new(vec![top], IndexSet::new());

        let ids: Vec<_> = model
            .nav_candidates()
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["top", "deep"]);
    }

    #[test]
    fn test_packet_candidates_are_grandchildren() {
        let mut group = section("client-packets");
        group.children.push(section("pkt-hello"));
        group.children.push(section("pkt-goodbye"));
        let mut container = section("packet-types");
        container.children.push(group);
        let model = PageModel::new(vec![container], IndexSet::new());

        let ids: Vec<_> = model
            .packet_candidates("packet-types")
            .iter()
            .filter_map(|s| s.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["pkt-hello", "pkt-goodbye"]);
    }

    #[test]
    fn test_packet_candidates_missing_container() {
        let model = PageModel::new(vec![section("intro")], IndexSet::new());
        assert!(model.packet_candidates("packet-types").is_empty());
    }
}
