//! Configuration for page augmentation.

/// Structural contract of the source page.
///
/// The defaults match the conventional layout of a protocol reference page:
/// a `<content>` root holding the sections, a `<ul id="sidebar">` for the
/// navigation list, and a `<table id="packet-table">` whose body receives the
/// packet rows.
#[derive(Debug, Clone)]
pub struct AugmentConfig {
    /// Element name of the content root holding the sections.
    pub content_root: String,

    /// Id of the sidebar container that receives the navigation list.
    pub sidebar_id: String,

    /// Id of the section holding the packet-type sections.
    pub packet_container_id: String,

    /// Id of the table whose body receives the packet rows.
    pub packet_table_id: String,

    /// Class marking the props block inside a packet section.
    pub props_class: String,

    /// Scroll-tracking target selector wired onto the body element.
    pub scrollspy_target: String,

    /// Scroll-tracking offset in pixels.
    pub scrollspy_offset: u32,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AugmentConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self {
            content_root: "content".to_string(),
            sidebar_id: "sidebar".to_string(),
            packet_container_id: "packet-types".to_string(),
            packet_table_id: "packet-table".to_string(),
            props_class: "pkt-props".to_string(),
            scrollspy_target: ".navsidebar".to_string(),
            scrollspy_offset: 40,
        }
    }

    /// Set the content root element name.
    pub fn with_content_root(mut self, name: impl Into<String>) -> Self {
        self.content_root = name.into();
        self
    }

    /// Set the sidebar container id.
    pub fn with_sidebar_id(mut self, id: impl Into<String>) -> Self {
        self.sidebar_id = id.into();
        self
    }

    /// Set the packet container section id.
    pub fn with_packet_container_id(mut self, id: impl Into<String>) -> Self {
        self.packet_container_id = id.into();
        self
    }

    /// Set the packet table id.
    pub fn with_packet_table_id(mut self, id: impl Into<String>) -> Self {
        self.packet_table_id = id.into();
        self
    }

    /// Set the props block class.
    pub fn with_props_class(mut self, class: impl Into<String>) -> Self {
        self.props_class = class.into();
        self
    }

    /// Set the scroll-tracking target selector.
    pub fn with_scrollspy_target(mut self, target: impl Into<String>) -> Self {
        self.scrollspy_target = target.into();
        self
    }

    /// Set the scroll-tracking offset.
    pub fn with_scrollspy_offset(mut self, offset: u32) -> Self {
        self.scrollspy_offset = offset;
        self
    }
}
