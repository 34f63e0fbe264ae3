//! Streaming page rewriter.
//!
//! Splices the rendered navigation list and packet rows into the source
//! markup in a single pass. The sidebar container's and the table body's
//! existing children are dropped, so augmenting an already-augmented page
//! replaces the previous output instead of appending to it. All other
//! events pass through untouched.
//!
//! The body element additionally receives declarative scroll-tracking
//! attributes (`data-spy`, `data-target`, `data-offset`) so the rendering
//! environment highlights the navigation entry of the currently visible
//! section.

use crate::config::AugmentConfig;
use crate::error::{Error, Result};
use crate::parser::attr_value;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

/// Rewrite the page, injecting the rendered fragments.
///
/// `require_table` demands a table body for the packet rows; it is set when
/// there are rows to place. The sidebar container is always required.
pub fn rewrite_page(
    html: &str,
    nav_html: &str,
    rows_html: &str,
    config: &AugmentConfig,
    require_table: bool,
) -> Result<String> {
    let mut reader = Reader::from_str(html);
    let mut writer = Writer::new(Vec::new());

    let mut sidebar_done = false;
    let mut tbody_done = false;
    let mut scrollspy_done = false;
    // Element name and nesting depth of the packet table while inside it.
    let mut packet_table: Option<(String, usize)> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();
                let id = attr_value(&e, "id");

                if let Some((ref table_name, ref mut depth)) = packet_table {
                    if *table_name == name {
                        *depth += 1;
                    }
                }

                if name == "body" && !scrollspy_done {
                    let elem = with_scrollspy_attrs(&e, config);
                    write(&mut writer, Event::Start(elem))?;
                    scrollspy_done = true;
                } else if !sidebar_done && id.as_deref() == Some(config.sidebar_id.as_str()) {
                    inject_into(&mut reader, &mut writer, &e, nav_html)?;
                    sidebar_done = true;
                } else if packet_table.is_none()
                    && id.as_deref() == Some(config.packet_table_id.as_str())
                {
                    packet_table = Some((name, 1));
                    write(&mut writer, Event::Start(e))?;
                } else if name == "tbody" && matches!(packet_table, Some((_, 1))) && !tbody_done {
                    inject_into(&mut reader, &mut writer, &e, rows_html)?;
                    tbody_done = true;
                } else {
                    write(&mut writer, Event::Start(e))?;
                }
            },
            Ok(Event::Empty(e)) => {
                let id = attr_value(&e, "id");

                if !sidebar_done && id.as_deref() == Some(config.sidebar_id.as_str()) {
                    expand_with(&mut writer, &e, nav_html)?;
                    sidebar_done = true;
                } else if String::from_utf8_lossy(e.local_name().as_ref()) == "tbody"
                    && matches!(packet_table, Some((_, 1)))
                    && !tbody_done
                {
                    expand_with(&mut writer, &e, rows_html)?;
                    tbody_done = true;
                } else {
                    write(&mut writer, Event::Empty(e))?;
                }
            },
            Ok(Event::End(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).to_string();

                if let Some((ref table_name, ref mut depth)) = packet_table {
                    if *table_name == name {
                        *depth -= 1;
                        if *depth == 0 {
                            packet_table = None;
                        }
                    }
                }

                write(&mut writer, Event::End(e))?;
            },
            Ok(Event::Eof) => break,
            Ok(event) => write(&mut writer, event)?,
            Err(e) => {
                return Err(Error::Markup {
                    offset: reader.buffer_position(),
                    reason: e.to_string(),
                });
            },
        }
    }

    if !sidebar_done {
        return Err(Error::MissingContainer(format!("#{}", config.sidebar_id)));
    }
    if require_table && !tbody_done {
        return Err(Error::MissingContainer(format!(
            "#{} tbody",
            config.packet_table_id
        )));
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Write the element's start tag, the raw fragment, and the end tag,
/// dropping the element's original children.
fn inject_into(
    reader: &mut Reader<&[u8]>,
    writer: &mut Writer<Vec<u8>>,
    start: &BytesStart,
    fragment: &str,
) -> Result<()> {
    let end = start.to_end().into_owned();
    write(writer, Event::Start(start.clone()))?;
    write(writer, Event::Text(BytesText::from_escaped(fragment)))?;
    reader.read_to_end(end.name()).map_err(|e| Error::Markup {
        offset: reader.buffer_position(),
        reason: e.to_string(),
    })?;
    write(writer, Event::End(end))
}

/// Expand a self-closed container into start tag, fragment, end tag.
fn expand_with(writer: &mut Writer<Vec<u8>>, start: &BytesStart, fragment: &str) -> Result<()> {
    let end = start.to_end().into_owned();
    write(writer, Event::Start(start.clone()))?;
    write(writer, Event::Text(BytesText::from_escaped(fragment)))?;
    write(writer, Event::End(end))
}

/// Copy the body start tag, adding any scroll-tracking attribute not
/// already present.
fn with_scrollspy_attrs(e: &BytesStart, config: &AugmentConfig) -> BytesStart<'static> {
    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut elem = BytesStart::new(name);

    let mut has_spy = false;
    let mut has_target = false;
    let mut has_offset = false;
    for attr in e.attributes().flatten() {
        match attr.key.as_ref() {
            b"data-spy" => has_spy = true,
            b"data-target" => has_target = true,
            b"data-offset" => has_offset = true,
            _ => {},
        }
        elem.push_attribute(attr);
    }

    if !has_spy {
        elem.push_attribute(("data-spy", "scroll"));
    }
    if !has_target {
        elem.push_attribute(("data-target", config.scrollspy_target.as_str()));
    }
    if !has_offset {
        let offset = config.scrollspy_offset.to_string();
        elem.push_attribute(("data-offset", offset.as_str()));
    }

    elem
}

fn write(writer: &mut Writer<Vec<u8>>, event: Event) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|e| Error::Serialize(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<ul id="sidebar" class="navsidebar"><li>stale</li></ul>
<content><section id="a"><h2>A</h2></section></content>
<table id="packet-table"><thead><tr><th>Packet</th></tr></thead>
<tbody><tr><td>stale</td></tr></tbody></table>
</body></html>"#;

    fn rewrite(nav: &str, rows: &str, require_table: bool) -> Result<String> {
        rewrite_page(PAGE, nav, rows, &AugmentConfig::default(), require_table)
    }

    #[test]
    fn test_sidebar_contents_replaced() {
        let out = rewrite("<li><a href=\"#a\">A</a></li>", "", false).expect("rewrite failed");
        assert!(out.contains("<ul id=\"sidebar\" class=\"navsidebar\"><li><a href=\"#a\">A</a></li></ul>"));
        assert!(!out.contains("stale</li>"));
    }

    #[test]
    fn test_table_body_replaced() {
        let out = rewrite("", "<tr><td>fresh</td></tr>", true).expect("rewrite failed");
        assert!(out.contains("<tbody><tr><td>fresh</td></tr></tbody>"));
        assert!(!out.contains("<td>stale</td>"));
        // The header row outside the body is untouched.
        assert!(out.contains("<th>Packet</th>"));
    }

    #[test]
    fn test_scrollspy_attributes_added() {
        let out = rewrite("", "", false).expect("rewrite failed");
        assert!(out.contains("data-spy=\"scroll\""));
        assert!(out.contains("data-target=\".navsidebar\""));
        assert!(out.contains("data-offset=\"40\""));
    }

    #[test]
    fn test_scrollspy_attributes_not_duplicated() {
        let page = r#"<html><body data-spy="scroll" data-target=".other" data-offset="10">
<ul id="sidebar"></ul></body></html>"#;
        let out = rewrite_page(page, "", "", &AugmentConfig::default(), false)
            .expect("rewrite failed");
        assert_eq!(out.matches("data-spy").count(), 1);
        assert!(out.contains("data-target=\".other\""));
        assert!(out.contains("data-offset=\"10\""));
    }

    #[test]
    fn test_missing_sidebar_rejected() {
        let err = rewrite_page("<html><body></body></html>", "", "", &AugmentConfig::default(), false)
            .unwrap_err();
        assert!(matches!(err, Error::MissingContainer(c) if c == "#sidebar"));
    }

    #[test]
    fn test_missing_table_body_rejected_only_with_rows() {
        let page = r#"<html><body><ul id="sidebar"></ul></body></html>"#;
        assert!(rewrite_page(page, "", "", &AugmentConfig::default(), false).is_ok());
        let err = rewrite_page(page, "", "<tr></tr>", &AugmentConfig::default(), true).unwrap_err();
        assert!(matches!(err, Error::MissingContainer(c) if c == "#packet-table tbody"));
    }

    #[test]
    fn test_self_closed_sidebar_expanded() {
        let page = r#"<html><body><ul id="sidebar"/></body></html>"#;
        let out = rewrite_page(page, "<li>x</li>", "", &AugmentConfig::default(), false)
            .expect("rewrite failed");
        assert!(out.contains("<ul id=\"sidebar\"><li>x</li></ul>"));
    }

    #[test]
    fn test_unrelated_tbody_untouched() {
        let page = r#"<html><body><ul id="sidebar"></ul>
<table id="other"><tbody><tr><td>keep</td></tr></tbody></table></body></html>"#;
        let out = rewrite_page(page, "", "<tr><td>new</td></tr>", &AugmentConfig::default(), false)
            .expect("rewrite failed");
        assert!(out.contains("<td>keep</td>"));
        assert!(!out.contains("<td>new</td>"));
    }
}
