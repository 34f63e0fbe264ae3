//! Markup parser for documentation pages.
//!
//! Walks the page markup once and produces the typed [`PageModel`]. All
//! structural validation happens here so the builders operate on records
//! that are already known to be well formed:
//!
//! - section ids must be unique ([`Error::DuplicateId`])
//! - the markup must be well nested ([`Error::Markup`])
//!
//! Sections without an id are kept in the tree but never produce output.
//! The first h2 or h3 inside a section becomes its heading; later headings
//! in the same section are ignored.

use crate::config::AugmentConfig;
use crate::error::{Error, Result};
use crate::model::{Heading, HeadingLevel, PageModel, PropsBlock, Section};
use indexmap::IndexSet;
use lazy_static::lazy_static;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

lazy_static! {
    /// Regex collapsing runs of whitespace in rendered text
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Collapse internal whitespace and trim, yielding the rendered text of an
/// element with nested markup.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text.trim(), " ").into_owned()
}

/// Get an attribute value from an element.
pub(crate) fn attr_value(e: &BytesStart, name: &str) -> Option<String> {
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == name.as_bytes() {
            return Some(String::from_utf8_lossy(&attr.value).to_string());
        }
    }
    None
}

/// Check whether an element's class attribute contains a token.
pub(crate) fn has_class(e: &BytesStart, class: &str) -> bool {
    attr_value(e, "class")
        .map(|c| c.split_whitespace().any(|t| t == class))
        .unwrap_or(false)
}

/// In-progress heading capture.
struct HeadingCapture {
    level: HeadingLevel,
    removed: bool,
    text: String,
}

/// In-progress props block capture.
struct PropsCapture {
    /// Element nesting depth below the props element
    child_depth: usize,
    direction: String,
    type_codes: Vec<String>,
    current_code: Option<String>,
    in_span: bool,
}

impl PropsCapture {
    fn new() -> Self {
        Self {
            child_depth: 0,
            direction: String::new(),
            type_codes: Vec::new(),
            current_code: None,
            in_span: false,
        }
    }

    fn finish(self) -> PropsBlock {
        PropsBlock {
            direction: collapse_whitespace(&self.direction),
            type_codes: self
                .type_codes
                .into_iter()
                .map(|c| collapse_whitespace(&c))
                .collect(),
        }
    }
}

/// Parse the page markup into a section tree.
pub fn parse_page(html: &str, config: &AugmentConfig) -> Result<PageModel> {
    let mut reader = Reader::from_str(html);

    let mut top_sections: Vec<Section> = Vec::new();
    let mut ids: IndexSet<String> = IndexSet::new();
    let mut stack: Vec<Section> = Vec::new();
    let mut content_depth: usize = 0;
    let mut heading: Option<HeadingCapture> = None;
    let mut props: Option<PropsCapture> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                if let Some(ref mut capture) = props {
                    if capture.child_depth == 0 {
                        match name.as_str() {
                            "span" => capture.in_span = true,
                            "code" => capture.current_code = Some(String::new()),
                            _ => {},
                        }
                    }
                    capture.child_depth += 1;
                } else if heading.is_some() {
                    // Inline markup inside a heading; its text still accumulates.
                } else if name == config.content_root {
                    content_depth += 1;
                } else if name == "section" && content_depth > 0 {
                    let id = attr_value(e, "id").filter(|id| !id.is_empty());
                    if let Some(ref id) = id {
                        if !ids.insert(id.clone()) {
                            return Err(Error::DuplicateId(id.clone()));
                        }
                    }
                    stack.push(Section::new(id));
                } else if (name == "h2" || name == "h3") && !stack.is_empty() {
                    let innermost_has_heading =
                        stack.last().map(|s| s.heading.is_some()).unwrap_or(true);
                    if !innermost_has_heading {
                        heading = Some(HeadingCapture {
                            level: if name == "h2" {
                                HeadingLevel::H2
                            } else {
                                HeadingLevel::H3
                            },
                            removed: has_class(e, "removed"),
                            text: String::new(),
                        });
                    }
                } else if has_class(e, &config.props_class) && !stack.is_empty() {
                    let innermost_has_props =
                        stack.last().map(|s| s.props.is_some()).unwrap_or(true);
                    if !innermost_has_props {
                        props = Some(PropsCapture::new());
                    }
                }
            },
            Ok(Event::Empty(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                if let Some(ref mut capture) = props {
                    if capture.child_depth == 0 {
                        match name.as_str() {
                            // An empty span contributes nothing to the direction.
                            "span" => {},
                            "code" => capture.type_codes.push(String::new()),
                            _ => {},
                        }
                    }
                } else if heading.is_some() {
                    // Void element inside a heading, no text.
                } else if name == "section" && content_depth > 0 {
                    let id = attr_value(e, "id").filter(|id| !id.is_empty());
                    if let Some(ref id) = id {
                        if !ids.insert(id.clone()) {
                            return Err(Error::DuplicateId(id.clone()));
                        }
                    }
                    attach_section(Section::new(id), &mut stack, &mut top_sections);
                } else if has_class(e, &config.props_class) && !stack.is_empty() {
                    if let Some(sec) = stack.last_mut() {
                        if sec.props.is_none() {
                            sec.props = Some(PropsCapture::new().finish());
                        }
                    }
                }
            },
            Ok(Event::Text(e)) => {
                let text = e.unescape().unwrap_or_default();

                if let Some(ref mut capture) = props {
                    if capture.in_span {
                        capture.direction.push_str(&text);
                    } else if let Some(ref mut code) = capture.current_code {
                        code.push_str(&text);
                    }
                } else if let Some(ref mut capture) = heading {
                    capture.text.push_str(&text);
                }
            },
            Ok(Event::End(ref e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                match props {
                    Some(ref mut capture) if capture.child_depth > 0 => {
                        capture.child_depth -= 1;
                        if capture.child_depth == 0 {
                            match name.as_str() {
                                "span" => capture.in_span = false,
                                "code" => {
                                    if let Some(code) = capture.current_code.take() {
                                        capture.type_codes.push(code);
                                    }
                                },
                                _ => {},
                            }
                        }
                        continue;
                    },
                    Some(_) => {
                        // The props element itself closed.
                        if let Some(capture) = props.take() {
                            if let Some(sec) = stack.last_mut() {
                                sec.props = Some(capture.finish());
                            }
                        }
                        continue;
                    },
                    None => {},
                }

                if (name == "h2" || name == "h3") && heading.is_some() {
                    if let Some(capture) = heading.take() {
                        if let Some(sec) = stack.last_mut() {
                            sec.heading = Some(Heading {
                                level: capture.level,
                                text: collapse_whitespace(&capture.text),
                                removed: capture.removed,
                            });
                        }
                    }
                } else if name == config.content_root {
                    content_depth = content_depth.saturating_sub(1);
                } else if name == "section" && content_depth > 0 {
                    if let Some(sec) = stack.pop() {
                        log::debug!(
                            "parsed section '{}'",
                            sec.id.as_deref().unwrap_or("(anonymous)")
                        );
                        attach_section(sec, &mut stack, &mut top_sections);
                    }
                }
            },
            Ok(Event::Eof) => break,
            Ok(_) => {},
            Err(e) => {
                return Err(Error::Markup {
                    offset: reader.buffer_position(),
                    reason: e.to_string(),
                });
            },
        }
    }

    if !stack.is_empty() {
        return Err(Error::Markup {
            offset: reader.buffer_position(),
            reason: format!("{} unclosed section(s) at end of input", stack.len()),
        });
    }

    log::info!(
        "parsed {} top-level sections, {} section ids",
        top_sections.len(),
        ids.len()
    );

    Ok(PageModel::new(top_sections, ids))
}

/// Attach a completed section to its parent, or to the top level.
fn attach_section(sec: Section, stack: &mut Vec<Section>, top_sections: &mut Vec<Section>) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(sec);
    } else {
        top_sections.push(sec);
    }
}
