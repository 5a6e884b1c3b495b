//! Email body — a single-column HTML fragment with inline styles only.
//!
//! No stylesheets, images or web fonts, so it displays the same in clients
//! that strip `<head>` and block remote content.

use crate::render::markup::escape;
use crate::render::outline::ReportOutline;
use crate::render::ReportContext;

const CONTAINER_STYLE: &str = "font-family:Arial,Helvetica,sans-serif;max-width:600px;margin:0 auto;padding:24px;background:#ffffff;color:#111827;";
const TITLE_STYLE: &str = "margin:0 0 8px;font-size:24px;line-height:32px;color:#4f46e5;";
const TEXT_STYLE: &str = "margin:0 0 16px;font-size:14px;line-height:22px;color:#4b5563;";
const CELL_STYLE: &str = "padding:16px 0;border-top:1px solid #e5e7eb;";
const LABEL_STYLE: &str = "margin:0;font-size:13px;font-weight:600;color:#4f46e5;";
const VALUE_STYLE: &str = "margin:4px 0;font-size:28px;line-height:34px;font-weight:700;color:#111827;";
const DESCRIPTION_STYLE: &str = "margin:0;font-size:14px;line-height:22px;color:#4b5563;";
const SUBTITLE_STYLE: &str = "margin:24px 0 8px;font-size:16px;color:#111827;";
const LIST_STYLE: &str = "margin:0;padding-left:20px;font-size:14px;line-height:22px;color:#4b5563;";
const FOOTER_STYLE: &str = "margin:24px 0 0;font-size:12px;line-height:18px;color:#9ca3af;";

pub fn render_email_html(ctx: &ReportContext) -> String {
    let outline = ReportOutline::build(ctx);

    let cards: String = outline
        .sections
        .iter()
        .map(|section| {
            format!(
                r#"<tr><td style="{CELL_STYLE}"><p style="{LABEL_STYLE}">{label}</p><p style="{VALUE_STYLE}">{value}</p><p style="{DESCRIPTION_STYLE}">{description}</p></td></tr>"#,
                label = escape(section.title),
                value = section.number,
                description = escape(&section.description),
            )
        })
        .collect();

    let items: String = outline
        .recommendations
        .iter()
        .map(|item| format!(r#"<li style="margin:0 0 6px;">{}</li>"#, escape(item)))
        .collect();

    format!(
        concat!(
            r#"<div style="{container}">"#,
            r#"<h1 style="{title_style}">{title}</h1>"#,
            r#"<p style="{text}">Hello {name}, here are the core numbers from your numerology report. The full report is attached as a PDF.</p>"#,
            r#"<table role="presentation" width="100%" cellpadding="0" cellspacing="0" border="0" style="border-collapse:collapse;">{cards}</table>"#,
            r#"<h2 style="{subtitle}">{recommendations_heading}</h2>"#,
            r#"<ul style="{list}">{items}</ul>"#,
            r#"<p style="{footer}">This email was generated automatically from the details you submitted.</p>"#,
            r#"</div>"#,
        ),
        container = CONTAINER_STYLE,
        title_style = TITLE_STYLE,
        title = escape(outline.title),
        text = TEXT_STYLE,
        name = escape(&outline.full_name),
        cards = cards,
        subtitle = SUBTITLE_STYLE,
        recommendations_heading = escape(outline.recommendations_heading),
        list = LIST_STYLE,
        items = items,
        footer = FOOTER_STYLE,
    )
}
