use crate::app::Screen;
use crate::document::{Document, ListRegion, PaginationRegion};
use crate::format::RenderedItem;
use crate::i18n::TextKey;
use colored::*;

/// Draw a document as terminal text, one line per region row.
pub fn render_document(doc: &Document) -> String {
    let mut lines = vec![
        doc.title.bold().green().to_string(),
        "=".repeat(50).dimmed().to_string(),
    ];

    let nav = doc
        .nav
        .iter()
        .enumerate()
        .map(|(i, b)| {
            let label = format!("[{}] {}", i + 1, b.label);
            if b.active {
                label.bold().yellow().to_string()
            } else {
                label.normal().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    lines.push(nav);

    let langs = doc
        .lang_links
        .iter()
        .map(|l| {
            if l.active {
                l.code.bold().underline().to_string()
            } else {
                l.code.dimmed().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" / ");
    let lang_label = doc.static_text(TextKey::LangLabel).unwrap_or("");
    let per_page_label = doc.static_text(TextKey::ItemsPerPage).unwrap_or("");
    lines.push(format!(
        "{}: {}   {} {}",
        lang_label, langs, per_page_label, doc.items_per_page
    ));
    lines.push(doc.update_time.dimmed().to_string());
    lines.push(doc.user_count.cyan().to_string());
    lines.push(String::new());

    match &doc.list {
        ListRegion::Message(message) => lines.push(message.clone()),
        ListRegion::Items(items) => {
            for item in items {
                render_item(&mut lines, item);
            }
        }
    }

    if let Some(pagination) = &doc.pagination {
        lines.push(String::new());
        lines.push(render_pagination(pagination));
    }

    lines.push(String::new());
    let footer = [TextKey::DataSource, TextKey::ProjectSource]
        .into_iter()
        .filter_map(|key| doc.static_text(key))
        .collect::<Vec<_>>()
        .join(" | ");
    lines.push(footer.dimmed().to_string());
    lines.push(doc.fetch_time_footer.dimmed().to_string());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn render_item(lines: &mut Vec<String>, item: &RenderedItem) {
    match item {
        RenderedItem::Repo {
            display_rank,
            name,
            url,
            stars,
            trending,
            language,
            description,
            ..
        } => {
            lines.push(format!("{:>4}. {}  {}", display_rank, name.bold(), url.dimmed()));
            let mut details = format!(
                "{}: {}   {}: {}",
                stars.label, stars.value, trending.label, trending.value
            );
            if let Some(language) = language {
                details.push_str(&format!("   {}: {}", language.label, language.value));
            }
            lines.push(format!("      {}", details));
            if let Some(description) = description {
                lines.push(format!("      {}", description.italic()));
            }
        }
        RenderedItem::User {
            display_rank,
            display_name,
            url,
            followers,
            ..
        } => {
            lines.push(format!("{:>4}. {}  {}", display_rank, display_name.bold(), url.dimmed()));
            lines.push(format!("      {}: {}", followers.label, followers.value));
        }
    }
}

fn render_pagination(p: &PaginationRegion) -> String {
    let prev = if p.prev_enabled {
        format!("< {}", p.prev_label).normal()
    } else {
        format!("< {}", p.prev_label).dimmed()
    };
    let next = if p.next_enabled {
        format!("{} >", p.next_label).normal()
    } else {
        format!("{} >", p.next_label).dimmed()
    };
    format!("{}   {}   {}", prev, p.page_info.bold(), next)
}

/// Draws to stdout.
#[derive(Debug, Default)]
pub struct TerminalScreen;

impl Screen for TerminalScreen {
    fn draw(&mut self, doc: &Document) {
        println!("{}", render_document(doc));
    }

    fn notice(&mut self, text: &str) {
        println!("{}", text.yellow());
    }
}
