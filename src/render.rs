//! Server-rendered HTML for the idea form and generated landing pages.
//!
//! Pages are plain strings built with `format!`; every user or model supplied
//! value goes through `html_escape` before it lands in the markup. The
//! interactive parts (signup, feedback, analytics polling) live in
//! `ui/landing.js`, configured through `data-*` attributes on `<body>`.

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use std::fmt::Write;

use crate::constants::storage_keys;
use crate::db::GenerationRecord;
use crate::domain::{GeneratedContent, PricePoint};

/// What a landing page needs to render, whether freshly generated or loaded
/// back from the store.
#[derive(Debug, Clone)]
pub struct LandingPage<'a> {
    pub startup_id: &'a str,
    pub idea: &'a str,
    pub source: &'a str,
    pub content: &'a GeneratedContent,
}

impl<'a> From<&'a GenerationRecord> for LandingPage<'a> {
    fn from(record: &'a GenerationRecord) -> Self {
        Self {
            startup_id: &record.startup_id,
            idea: &record.idea,
            source: &record.source,
            content: &record.content,
        }
    }
}

fn layout(title: &str, body_attrs: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/assets/style.css">
</head>
<body{body_attrs}>
{body}
</body>
</html>
"#,
        title = text(title),
    )
}

/// The idea submission page, with links to previously generated pages.
#[must_use]
pub fn index_page(recent: &[GenerationRecord], error: Option<&str>) -> String {
    let mut body = String::from(
        r#"<main class="container">
<header class="hero">
<h1>MarketPulse</h1>
<p class="lead">Describe a startup idea and get a landing page you can share to test demand.</p>
</header>
"#,
    );

    if let Some(error) = error {
        let _ = writeln!(body, r#"<p class="error" role="alert">{}</p>"#, text(error));
    }

    body.push_str(
        r#"<form class="card idea-form" method="post" action="/ideas">
<label for="idea">Your idea</label>
<textarea id="idea" name="idea" rows="4" required placeholder="A dog walking app for busy professionals"></textarea>
<label for="source">Source tag <span class="muted">(optional)</span></label>
<input id="source" name="source" type="text" placeholder="twitter">
<button type="submit">Generate landing page</button>
</form>
"#,
    );

    if !recent.is_empty() {
        body.push_str("<section class=\"card\">\n<h2>Recent landing pages</h2>\n<ul class=\"page-list\">\n");
        for page in recent {
            let _ = writeln!(
                body,
                r#"<li><a href="/p/{id}">{idea}</a> <span class="tag">{industry}</span> <span class="muted">{source}</span></li>"#,
                id = attr(&page.startup_id),
                idea = text(&page.idea),
                industry = text(page.content.industry.label()),
                source = text(&page.source),
            );
        }
        body.push_str("</ul>\n</section>\n");
    }

    body.push_str("</main>");

    layout("MarketPulse", "", &body)
}

/// A generated landing page with signup, feedback and the live analytics panel.
#[must_use]
pub fn landing_page(page: &LandingPage<'_>, poll_seconds: u32) -> String {
    let content = page.content;

    let body_attrs = format!(
        r#" data-startup-id="{id}" data-idea="{idea}" data-source="{source}" data-industry="{industry}" data-poll-seconds="{poll_seconds}" data-ideas-key="{ideas_key}" data-signups-key="{signups_key}""#,
        id = attr(page.startup_id),
        idea = attr(page.idea),
        source = attr(page.source),
        industry = attr(content.industry.label()),
        ideas_key = storage_keys::STARTUP_IDEAS,
        signups_key = storage_keys::SIGNUPS,
    );

    let mut features = String::new();
    for feature in &content.features {
        let _ = writeln!(features, "<li>{}</li>", text(feature));
    }

    let mut price_options = String::from("<option value=\"\">Not sure</option>\n");
    for price in PricePoint::ALLOWED.iter().filter_map(|p| PricePoint::new(i64::from(*p))) {
        let _ = writeln!(
            price_options,
            r#"<option value="{value}">{price}</option>"#,
            value = price.value(),
        );
    }

    let body = format!(
        r#"<main class="container landing">
<section class="hero">
<span class="tag">{industry}</span>
<h1>{headline}</h1>
<p class="lead">{pitch}</p>
</section>
<section class="card">
<ul class="features">
{features}</ul>
</section>
<section class="card">
<form id="signup-form" class="stack">
<label for="email">Email</label>
<input id="email" name="email" type="email" required placeholder="you@example.com">
<label class="inline"><input id="would-pay" name="wouldPay" type="checkbox"> I would pay for this</label>
<label for="price-point">How much per month?</label>
<select id="price-point" name="pricePoint">
{price_options}</select>
<button type="submit">{cta}</button>
<p id="signup-status" class="status" aria-live="polite"></p>
</form>
</section>
<section class="card">
<h2>What do you think?</h2>
<form id="feedback-form" class="stack">
<label for="rating">Rating</label>
<select id="rating" name="rating" required>
<option value="5">5 - Love it</option>
<option value="4">4</option>
<option value="3">3</option>
<option value="2">2</option>
<option value="1">1 - Not for me</option>
</select>
<label for="feedback">Feedback</label>
<textarea id="feedback" name="feedback" rows="3" required></textarea>
<button type="submit">Send feedback</button>
<p id="feedback-status" class="status" aria-live="polite"></p>
</form>
</section>
<section class="card analytics" id="analytics">
<h2>Validation signals</h2>
<dl class="stats">
<div><dt>Emails captured</dt><dd data-stat="emailsCaptured">0</dd></div>
<div><dt>Would pay</dt><dd data-stat="wouldPaySignals">0</dd></div>
<div><dt>Feedback</dt><dd data-stat="feedbackCount">0</dd></div>
<div><dt>Average rating</dt><dd data-stat="averageRating">-</dd></div>
</dl>
<div class="breakdown">
<div><h3>Signups by source</h3><ul id="signups-by-source" class="tally"></ul></div>
<div><h3>Recent signups</h3><ul id="recent-signups" class="signups"></ul></div>
</div>
<h3>Latest feedback</h3>
<ul id="recent-quotes" class="quotes"></ul>
<p id="analytics-status" class="status muted" aria-live="polite"></p>
</section>
<footer class="muted"><a href="/">Validate another idea</a></footer>
</main>
<script src="/assets/landing.js" defer></script>"#,
        industry = text(content.industry.label()),
        headline = text(&content.headline),
        pitch = text(&content.pitch),
        cta = text(&content.cta),
    );

    layout(&content.headline, &body_attrs, &body)
}

#[must_use]
pub fn not_found_page(startup_id: &str) -> String {
    let body = format!(
        r#"<main class="container">
<h1>Landing page not found</h1>
<p>No landing page is stored for <code>{}</code>.</p>
<p><a href="/">Generate a new one</a></p>
</main>"#,
        text(startup_id)
    );
    layout("Not found", "", &body)
}
