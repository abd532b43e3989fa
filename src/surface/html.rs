use std::fmt::Write;

use super::page::{Block, Page};
use super::Region;
use crate::annotation_table::AnnotationTable;
use crate::arc_diagram::{ArcDiagram, DiagramOptions};
use crate::chunk::{EntityMarkup, EntitySegment};
use crate::toc::NavList;

const STYLE: &str = r#"body { display: flex; margin: 0; font-family: sans-serif; }
aside { width: 18rem; padding: 1rem; background: #f0f2f6; position: sticky; top: 0; height: 100vh; overflow-y: auto; }
main { flex: 1; padding: 1rem 2rem; overflow-x: auto; }
ul.toc { list-style: none; padding: 0; }
table.tokens { border-collapse: collapse; font-size: 0.85rem; }
table.tokens th, table.tokens td { border: 1px solid #ddd; padding: 0.2rem 0.4rem; white-space: nowrap; }
mark.entity { padding: 0.2em 0.4em; margin: 0 0.2em; border-radius: 0.3em; background: #ddd; }
mark.entity .entity-label { font-size: 0.7em; font-weight: bold; margin-left: 0.4em; }"#;

/// Hands each embedded diagram to the renderer's global `renderDiagram`.
const RENDER_DIAGRAMS: &str = r#"document.querySelectorAll("div.diagram").forEach(function (el) {
  if (typeof renderDiagram !== "function") return;
  var parse = JSON.parse(el.querySelector("script").textContent);
  renderDiagram(el, parse, {
    compact: el.dataset.compact === "true",
    offsetX: Number(el.dataset.offsetX),
    distance: Number(el.dataset.distance)
  });
});"#;

impl Page {
    /// Render the page as a standalone HTML document.
    ///
    /// Diagrams are embedded as JSON for a client-side renderer, together with
    /// their layout options and display width. With a renderer URL set, the
    /// script is loaded after the content and its `renderDiagram(element,
    /// parse, options)` is called for each diagram.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let title = self.title.as_deref().unwrap_or("");

        html.push_str("<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n<meta charset=\"utf-8\">\n");
        let _ = writeln!(html, "<title>{}</title>", html_escape(title));
        let _ = writeln!(html, "<style>\n{}\n</style>", STYLE);
        html.push_str("</head>\n<body>\n");

        html.push_str("<aside>\n");
        self.render_blocks(Region::Sidebar, &mut html);
        html.push_str("</aside>\n<main>\n");
        self.render_blocks(Region::Main, &mut html);
        html.push_str("</main>\n");
        if let Some(url) = &self.renderer {
            let _ = writeln!(html, "<script src=\"{}\"></script>", html_escape(url));
            let _ = writeln!(html, "<script>\n{}\n</script>", RENDER_DIAGRAMS);
        }
        html.push_str("</body>\n</html>\n");

        html
    }

    fn render_blocks(&self, region: Region, html: &mut String) {
        for block in self.blocks(region) {
            match block {
                Block::Heading {
                    level,
                    anchor,
                    text,
                } => {
                    let n = level.number();
                    let _ = writeln!(
                        html,
                        "<h{n} id='{}'>{}</h{n}>",
                        html_escape(anchor),
                        html_escape(text),
                        n = n
                    );
                }
                Block::Subheader(text) => {
                    let _ = writeln!(html, "<h3 class=\"section\">{}</h3>", html_escape(text));
                }
                Block::Text(text) => {
                    let _ = writeln!(html, "<pre class=\"text\">{}</pre>", html_escape(text));
                }
                Block::Diagram { diagram, options } => render_diagram(diagram, options, html),
                Block::Table(table) => render_table(table, html),
                Block::Entities(markup) => render_entities(markup, html),
                Block::Slot(slot) => {
                    if let Some(nav) = self.slot(*slot) {
                        render_nav(nav, html);
                    }
                }
            }
        }
    }
}

fn render_diagram(diagram: &ArcDiagram, options: &DiagramOptions, html: &mut String) {
    let json = diagram
        .to_json()
        .unwrap_or_else(|_| String::from(r#"{"words":[],"arcs":[]}"#))
        .replace("</", "<\\/");

    let _ = writeln!(
        html,
        "<div class=\"diagram\" style=\"width: {}px\" data-compact=\"{}\" data-offset-x=\"{}\" data-distance=\"{}\">",
        options.width_for(diagram.words.len()),
        options.compact,
        options.offset_x,
        options.distance
    );
    let _ = writeln!(html, "<script type=\"application/json\">{}</script>", json);
    html.push_str("</div>\n");
}

fn render_table(table: &AnnotationTable, html: &mut String) {
    html.push_str("<table class=\"tokens\">\n");
    for column in table.columns() {
        let _ = write!(html, "<tr><th>{}</th>", html_escape(column.header()));
        for cell in table.column(*column) {
            let _ = write!(html, "<td>{}</td>", html_escape(cell));
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
}

fn render_entities(markup: &EntityMarkup, html: &mut String) {
    html.push_str("<div class=\"entities\">");
    for segment in &markup.segments {
        match segment {
            EntitySegment::Text(text) => html.push_str(&html_escape(text)),
            EntitySegment::Entity { text, label } => {
                let _ = write!(
                    html,
                    "<mark class=\"entity\">{}<span class=\"entity-label\">{}</span></mark>",
                    html_escape(text),
                    html_escape(label)
                );
            }
        }
    }
    html.push_str("</div>\n");
}

fn render_nav(nav: &NavList, html: &mut String) {
    html.push_str("<nav>\n<ul class=\"toc\">\n");
    for entry in &nav.entries {
        let _ = writeln!(
            html,
            "<li style=\"margin-left: {}em\"><a href='#{}'>{}</a></li>",
            entry.level.depth(),
            html_escape(&entry.anchor),
            html_escape(&entry.text)
        );
    }
    html.push_str("</ul>\n</nav>\n");
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
