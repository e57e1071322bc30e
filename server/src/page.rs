//! Server-side rendering of the landing page.

use std::fmt::Write;

use common::{
    content::{
        Feature, Review, FEATURES, HERO_TAGLINE, HERO_TITLE, INFO_TAGLINE, NAV, REVIEWS,
        REVIEWS_TITLE, SITE_NAME,
    },
    format_file_size, MAX_FILE_SIZE, UPLOAD_FIELD,
};

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

fn header() -> String {
    let mut nav = String::new();
    for entry in NAV {
        let _ = write!(
            nav,
            r##"<a href="#{}">{}</a>"##,
            escape(entry.id),
            escape(entry.label)
        );
    }
    format!(
        r#"<header><nav><span class="brand">{}</span>{nav}</nav></header>"#,
        escape(SITE_NAME)
    )
}

/// The hero and upload form. Without scripts the form posts straight to the
/// endpoint, so only the browser's own checks apply.
fn hero(endpoint: &str) -> String {
    format!(
        r#"<section id="home"><h1>{}</h1><p>{}</p>
<form action="{}" method="post" enctype="multipart/form-data" class="dropzone">
<label>Drag &amp; drop your file here<input type="file" name="{}" accept="*/*" required></label>
<p class="hint">or click to select a file (max {})</p>
<button type="submit">Upload File</button>
</form></section>"#,
        escape(HERO_TITLE),
        escape(HERO_TAGLINE),
        escape(endpoint),
        UPLOAD_FIELD,
        format_file_size(MAX_FILE_SIZE),
    )
}

fn feature_card(feature: &Feature) -> String {
    format!(
        r#"<div class="card" data-icon="{}"><h3>{}</h3><p>{}</p></div>"#,
        escape(feature.icon),
        escape(feature.title),
        escape(feature.description)
    )
}

fn review_card(review: &Review) -> String {
    format!(
        r#"<div class="card"><img src="{}" alt="{}"><h3>{}</h3><p class="role">{}</p><p class="stars" aria-label="{} out of 5 stars">{}</p><p>{}</p></div>"#,
        escape(review.image),
        escape(review.name),
        escape(review.name),
        escape(review.role),
        review.stars,
        review.star_row(),
        escape(review.review)
    )
}

pub fn render(endpoint: &str) -> String {
    let features: String = FEATURES.iter().map(feature_card).collect();
    let reviews: String = REVIEWS.iter().map(review_card).collect();
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head><meta charset="utf-8"><title>{}</title></head>
<body>{}<main>{}
<section id="info"><p>{}</p>{features}</section>
<section id="reviews"><h2>{}</h2>{reviews}</section>
</main></body></html>
"#,
        escape(SITE_NAME),
        header(),
        hero(endpoint),
        escape(INFO_TAGLINE),
        escape(REVIEWS_TITLE),
    )
}
