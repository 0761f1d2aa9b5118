use lazy_static::lazy_static;
use tera::{Context, Tera};

use crate::{model::KudosEntry, view::View};

lazy_static! {
    static ref TEMPLATES: Tera = {
        let mut templates = Tera::default();
        templates
            .add_raw_templates(vec![
                ("feed_item.html", include_str!("../templates/feed_item.html")),
                ("page.html", include_str!("../templates/page.html")),
            ])
            .expect("embedded templates parse");
        templates.set_escape_fn(escape_html);
        templates
    };
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to render template: {0}")]
    Render(#[from] tera::Error),
}

/// Escape the five HTML-significant characters and nothing else.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Render one feed entry. `moderation` adds the Hide and Delete buttons.
pub fn render_feed_item(entry: &KudosEntry, moderation: bool) -> Result<String, Error> {
    let mut context = Context::new();
    context.insert("entry", entry);
    context.insert("moderation", &moderation);

    let rendered = TEMPLATES.render("feed_item.html", &context)?;
    Ok(rendered.trim_end().to_string())
}

/// Render the whole page for the given view state.
pub fn render_page(view: &View) -> Result<String, Error> {
    let mut context = Context::new();
    context.insert("view", view);

    Ok(TEMPLATES.render("page.html", &context)?)
}
