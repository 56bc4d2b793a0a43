//! Server-side HTML for the dashboard page

use orderlens_graphs::{ChartKind, DashboardData, RenderedViews};
use orderlens_i18n::I18nManager;
use std::fmt::Write;

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 0; background: #F9F9F9; color: #212121; }
header { padding: 1.5rem 2rem 0.5rem; }
h1 { margin: 0 0 1rem; }
form { display: flex; gap: 1rem; align-items: end; flex-wrap: wrap; }
label { display: flex; flex-direction: column; font-size: 0.9rem; }
.caption { color: #616161; margin: 0.5rem 0 0; }
nav { display: flex; gap: 0.5rem; padding: 0 2rem; border-bottom: 1px solid #D3D3D3; }
nav a { padding: 0.6rem 1rem; text-decoration: none; color: #1565C0; }
section { padding: 1rem 2rem; }
.charts { display: flex; flex-wrap: wrap; gap: 1rem; }
.chart svg { max-width: 100%; height: auto; }
.revenue { font-size: 1.4rem; font-weight: bold; }
"#;

/// Escape text for use in HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
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

/// Render the full dashboard page
pub fn render_page(
    title: &str,
    i18n: &I18nManager,
    data: &DashboardData,
    views: &RenderedViews,
) -> String {
    let msg = |key: &str| escape_html(&i18n.message(key, None));
    let start = data.range.start().to_string();
    let end = data.range.end().to_string();
    let min = data.bounds.min.to_string();
    let max = data.bounds.max.to_string();

    let mut html = String::with_capacity(64 * 1024);
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<header>\n\
         <h1>{title}</h1>\n<form method=\"get\" action=\"/\">\n<span>{period}</span>\n\
         <label>{start_label}<input type=\"date\" name=\"start\" value=\"{start}\" min=\"{min}\" max=\"{max}\"></label>\n\
         <label>{end_label}<input type=\"date\" name=\"end\" value=\"{end}\" min=\"{min}\" max=\"{max}\"></label>\n\
         <button type=\"submit\">{apply}</button>\n</form>\n<p class=\"caption\">{caption}</p>\n</header>\n",
        lang = i18n.locale().code(),
        title = escape_html(title),
        period = msg("date-range-label"),
        start_label = msg("date-range-start"),
        end_label = msg("date-range-end"),
        apply = msg("date-range-apply"),
        caption = escape_html(&i18n.rows_in_range(data.row_count, &start, &end)),
    );

    let tabs = [
        ("monthly-orders", "tab-monthly-orders"),
        ("sold-products", "tab-sold-products"),
        ("payment-type", "tab-payment-type"),
        ("insights", "tab-insights"),
    ];
    html.push_str("<nav>\n");
    for (anchor, key) in tabs {
        let _ = writeln!(html, "<a href=\"#{anchor}\">{}</a>", msg(key));
    }
    html.push_str("</nav>\n");

    let chart = |kind: ChartKind| -> String {
        format!(
            "<div class=\"chart\" id=\"chart-{}\">{}</div>\n",
            kind.slug(),
            views.chart(kind).unwrap_or_default()
        )
    };

    let _ = write!(
        html,
        "<section id=\"monthly-orders\">\n<h2>{}</h2>\n{}</section>\n",
        msg("tab-monthly-orders"),
        chart(ChartKind::MonthlyOrders)
    );
    let _ = write!(
        html,
        "<section id=\"sold-products\">\n<h2>{}</h2>\n<div class=\"charts\">\n{}{}</div>\n</section>\n",
        msg("tab-sold-products"),
        chart(ChartKind::TopCategories),
        chart(ChartKind::BottomCategories)
    );
    let _ = write!(
        html,
        "<section id=\"payment-type\">\n<h2>{}</h2>\n{}</section>\n",
        msg("tab-payment-type"),
        chart(ChartKind::PaymentTypes)
    );
    let _ = write!(
        html,
        "<section id=\"insights\">\n<h2>{}</h2>\n<p class=\"revenue\">{}</p>\n<h3>{}</h3>\n\
         <div class=\"charts\">\n{}{}{}</div>\n</section>\n",
        msg("tab-insights"),
        escape_html(&views.total_revenue),
        msg("rfm-heading"),
        chart(ChartKind::RfmRecency),
        chart(ChartKind::RfmFrequency),
        chart(ChartKind::RfmMonetary)
    );

    html.push_str("</body>\n</html>\n");
    html
}
