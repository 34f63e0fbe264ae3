//! HTML fragment rendering for the navigation list and the packet table.

use crate::nav::NavEntry;
use crate::packets::PacketRow;

/// Class applied to nested navigation lists.
const NAV_CHILD_LIST_CLASS: &str = "nav nav-stacked";

/// Escape special HTML characters in text content and attribute values.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Render the navigation entries as a sequence of list items.
///
/// The surrounding list element is the sidebar container already present in
/// the page; child entries get their own nested list.
pub fn render_nav_list(entries: &[NavEntry]) -> String {
    let mut html = String::new();
    for entry in entries {
        html.push_str("<li>");
        push_nav_link(&mut html, entry);
        if !entry.children.is_empty() {
            html.push_str(&format!("<ul class=\"{}\">", NAV_CHILD_LIST_CLASS));
            for child in &entry.children {
                html.push_str("<li>");
                push_nav_link(&mut html, child);
                html.push_str("</li>");
            }
            html.push_str("</ul>");
        }
        html.push_str("</li>");
    }
    html
}

fn push_nav_link(html: &mut String, entry: &NavEntry) {
    html.push_str(&format!(
        "<a href=\"#{}\">{}</a>",
        escape_html(&entry.target_id),
        escape_html(&entry.label)
    ));
}

/// Render the sorted packet rows as a sequence of table rows.
///
/// Each row has four cells: the linked label, the direction, the primary
/// type, and the secondary/tertiary types joined by a hyphen (empty when no
/// secondary type exists).
pub fn render_packet_rows(rows: &[PacketRow]) -> String {
    let mut html = String::new();
    for row in rows {
        html.push_str("<tr>");

        html.push_str("<td>");
        let class = if row.removed { " class=\"removed\"" } else { "" };
        html.push_str(&format!(
            "<a href=\"#{}\"{}>{}</a>",
            escape_html(&row.target_id),
            class,
            escape_html(&row.label)
        ));
        html.push_str("</td>");

        html.push_str(&format!("<td>{}</td>", escape_html(&row.direction)));
        html.push_str(&format!("<td><code>{}</code></td>", escape_html(&row.primary_type)));

        html.push_str("<td>");
        if let Some(ref secondary) = row.secondary_type {
            html.push_str(&format!("<code>{}</code>", escape_html(secondary)));
            if let Some(ref tertiary) = row.tertiary_type {
                html.push_str(&format!("-<code>{}</code>", escape_html(tertiary)));
            }
        }
        html.push_str("</td>");

        html.push_str("</tr>");
    }
    html
}
