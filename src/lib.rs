//! # Page Oxide
//!
//! Documentation page toolkit: derive sidebar navigation and sorted
//! packet-type tables from structured markup.
//!
//! ## Core Features
//!
//! - **Typed parsing**: the page's section structure is parsed into typed
//!   records at a single validation boundary, so malformed markup surfaces
//!   as a descriptive configuration error instead of failing mid-traversal
//! - **Navigation tree**: a two-level anchor-link list mirroring the h2/h3
//!   section structure, ready for the sidebar container
//! - **Packet table**: one row per packet-type section with direction and
//!   type-code hierarchy, ordered by an explicit multi-key comparator
//! - **In-place augmentation**: a streaming rewrite splices both rendered
//!   fragments into the page and wires scroll-position tracking onto the
//!   body element; re-running it replaces prior output, so augmentation is
//!   idempotent
//!
//! ## Quick Start
//!
//! ```no_run
//! use page_oxide::PageDocument;
//!
//! let doc = PageDocument::open("protocol.html")?;
//!
//! for entry in doc.nav_entries()? {
//!     println!("{} -> #{}", entry.label, entry.target_id);
//! }
//!
//! let augmented = doc.augment()?;
//! std::fs::write("protocol.out.html", augmented)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## License
//!
//! Licensed under either of:
//!
//! * Apache License, Version 2.0 ([LICENSE-APACHE](LICENSE-APACHE) or <http://www.apache.org/licenses/LICENSE-2.0>)
//! * MIT license ([LICENSE-MIT](LICENSE-MIT) or <http://opensource.org/licenses/MIT>)
//!
//! at your option.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Page parsing
pub mod document;
pub mod model;
pub mod parser;

// Derived structures
pub mod nav;
pub mod packets;

// Output
pub mod render;
pub mod rewrite;

// Configuration
pub mod config;

// Re-exports
pub use config::AugmentConfig;
pub use document::PageDocument;
pub use error::{Error, Result};
pub use model::{Heading, HeadingLevel, PageModel, PropsBlock, Section};
pub use nav::NavEntry;
pub use packets::PacketRow;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
