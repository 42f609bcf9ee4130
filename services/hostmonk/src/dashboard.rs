//! Web dashboard with themed service cards and JSON API endpoints

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::config::{DashboardConfig, Service};
use crate::icons::get_icon_path;
use crate::monitor::{ServiceStatus, StatusKind};
use crate::state::StateHandle;
use crate::theme::{all_themes, Theme};

const UNCATEGORIZED: &str = "Uncategorized";
const ALL_SERVICES: &str = "All Services";

/// Dashboard application state
#[derive(Clone)]
pub struct DashboardState {
    pub state: StateHandle,
}

/// Build the dashboard axum router
pub fn build_router(state: StateHandle) -> Router {
    let dashboard_state = DashboardState { state };

    Router::new()
        .route("/", get(index_handler))
        .route("/api/status", get(status_handler))
        .route("/api/config", get(config_handler))
        .route("/api/themes", get(themes_handler))
        .route("/api/theme", get(theme_handler).put(select_theme_handler))
        .route("/health", get(health_handler))
        .with_state(dashboard_state)
}

/// Group service indices by category, in order of first appearance.
///
/// With `showCategories` off everything lands in a single group.
pub fn group_services(config: &DashboardConfig) -> Vec<(String, Vec<usize>)> {
    if !config.settings.show_categories {
        return vec![(
            ALL_SERVICES.to_string(),
            (0..config.services.len()).collect(),
        )];
    }

    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (i, service) in config.services.iter().enumerate() {
        let category = service
            .category
            .as_deref()
            .filter(|c| !c.is_empty())
            .unwrap_or(UNCATEGORIZED);
        match groups.iter_mut().find(|(name, _)| name.as_str() == category) {
            Some((_, members)) => members.push(i),
            None => groups.push((category.to_string(), vec![i])),
        }
    }
    groups
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn status_indicator(status: StatusKind) -> &'static str {
    match status {
        StatusKind::Online | StatusKind::Offline => "●",
        StatusKind::Loading => "◐",
        StatusKind::Unknown => "○",
    }
}

fn render_card(index: usize, service: &Service, status: &ServiceStatus) -> String {
    let description = service
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="description">{}</p>"#, escape(d)))
        .unwrap_or_default();
    let category = service
        .category
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| format!(r#"<div class="category">[ {} ]</div>"#, escape(&c.to_uppercase())))
        .unwrap_or_default();
    let status_line = if service.ping && status.status != StatusKind::Unknown {
        format!(r#"<div class="status">{}</div>"#, status.label())
    } else {
        String::new()
    };
    let tags: String = service
        .tags
        .iter()
        .map(|t| format!(r#"<span class="tag">#{}</span>"#, escape(t)))
        .collect();

    format!(
        r#"<a href="{url}" target="_blank" rel="noopener noreferrer" class="card-link">
            <div class="card status-{kind}" id="card-{index}">
                <div class="header">
                    <img src="{icon}" alt="{name} icon" class="icon">
                    <span class="indicator">{indicator}</span>
                </div>
                <h3 class="name">&gt; {name}<span class="cursor">_</span></h3>
                {description}
                {category}
                {status_line}
                <div class="tags">{tags}</div>
            </div>
        </a>"#,
        url = escape(&service.url),
        kind = status.status.as_str(),
        index = index,
        icon = get_icon_path(&service.icon),
        name = escape(&service.name),
        indicator = status_indicator(status.status),
        description = description,
        category = category,
        status_line = status_line,
        tags = tags,
    )
}

fn theme_css(theme: &Theme) -> String {
    let c = &theme.colors;
    format!(
        ":root {{ --color-primary: {}; --color-primary-dim: {}; --color-primary-bright: {}; \
         --color-background: {}; --color-background-alt: {}; --color-text: {}; \
         --color-border: {}; --color-success: {}; --color-warning: {}; --color-error: {}; \
         --font-family: '{}', monospace; --scanline-opacity: {}; }}",
        c.primary,
        c.primary_dim,
        c.primary_bright,
        c.background,
        c.background_alt,
        c.text,
        c.border,
        c.success,
        c.warning,
        c.error,
        theme.font,
        theme.scanline_opacity,
    )
}

async fn index_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    let state = &dashboard.state;
    let config = &state.config;
    let statuses = state.snapshot();
    let theme = state.current_theme().await;

    let sections: String = group_services(config)
        .iter()
        .map(|(category, members)| {
            let heading = if config.settings.show_categories {
                format!(
                    r#"<h2 class="category-title">╔═══ {} ═══╗</h2>"#,
                    escape(&category.to_uppercase())
                )
            } else {
                String::new()
            };
            let cards: String = members
                .iter()
                .map(|&i| render_card(i, &config.services[i], &statuses[i]))
                .collect();
            let grid_class = if config.settings.compact_mode {
                "grid compact"
            } else {
                "grid"
            };
            format!(
                r#"<section class="group">{}<div class="{}">{}</div></section>"#,
                heading, grid_class, cards
            )
        })
        .collect();

    let empty = if config.services.is_empty() {
        r#"<div class="empty"><p class="glow">[ NO SERVICES CONFIGURED ]</p>
        <p>Add services to config/services.yaml to get started</p></div>"#
    } else {
        ""
    };

    let theme_buttons: String = all_themes()
        .iter()
        .map(|t| {
            let mark = if t.name == theme.name { "X" } else { " " };
            format!(
                r#"<button onclick="selectTheme('{}')" title="{}">[{}] {}</button>"#,
                t.name, t.display_name, mark, t.display_name
            )
        })
        .collect();

    let title = escape(config.title.as_deref().unwrap_or("HostMonk"));

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>
        {theme_css}
        body {{ background: var(--color-background); color: var(--color-text); font-family: var(--font-family); max-width: 1200px; margin: 0 auto; padding: 1rem; }}
        .grid {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }}
        .grid.compact {{ grid-template-columns: repeat(auto-fill, minmax(180px, 1fr)); gap: 0.5rem; }}
        .card {{ border: 1px solid var(--color-border); background: var(--color-background-alt); padding: 1rem; }}
        .card-link {{ color: inherit; text-decoration: none; }}
        .icon {{ width: 32px; height: 32px; }}
        .header {{ display: flex; justify-content: space-between; }}
        .status-online .indicator {{ color: var(--color-success); }}
        .status-offline .indicator {{ color: var(--color-error); }}
        .status-loading .indicator {{ color: var(--color-warning); }}
        .tag {{ margin-right: 0.5em; color: var(--color-primary-dim); }}
    </style>
    <script>
        const LABELS = {{ loading: 'CHECKING...', offline: 'OFFLINE' }};
        const INDICATORS = {{ online: '●', offline: '●', loading: '◐', unknown: '○' }};
        function label(s) {{
            if (s.status === 'online') return s.response_time_ms ? `ONLINE (${{s.response_time_ms}}ms)` : 'ONLINE';
            return LABELS[s.status] || '';
        }}
        function refreshStatus() {{
            fetch('/api/status')
                .then(r => r.json())
                .then(data => data.forEach((s, i) => {{
                    const card = document.getElementById(`card-${{i}}`);
                    if (!card) return;
                    card.className = `card status-${{s.status}}`;
                    const line = card.querySelector('.status');
                    if (line) line.textContent = label(s);
                    const indicator = card.querySelector('.indicator');
                    if (indicator) indicator.textContent = INDICATORS[s.status] || '○';
                }}));
        }}
        function selectTheme(name) {{
            fetch('/api/theme', {{
                method: 'PUT',
                headers: {{ 'Content-Type': 'application/json' }},
                body: JSON.stringify({{ name }}),
            }}).then(() => location.reload());
        }}
        setInterval(refreshStatus, 5000);
    </script>
</head>
<body>
    <header><h1>{title}</h1></header>
    <nav class="themes">&gt;&gt; THEME: {theme_buttons}</nav>
    <main>{sections}{empty}</main>
    <footer><p>[ CONFIG VERSION {version} ]</p><p>[ MONITORING ACTIVE ]</p></footer>
</body>
</html>"#,
        title = title,
        theme_css = theme_css(theme),
        theme_buttons = theme_buttons,
        sections = sections,
        empty = empty,
        version = escape(&config.version),
    );

    Html(html)
}

async fn status_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.state.snapshot())
}

async fn config_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.state.config.clone())
}

async fn themes_handler() -> impl IntoResponse {
    Json(all_themes())
}

async fn theme_handler(State(dashboard): State<DashboardState>) -> impl IntoResponse {
    Json(dashboard.state.current_theme().await)
}

#[derive(Debug, Deserialize)]
struct ThemeRequest {
    name: String,
}

async fn select_theme_handler(
    State(dashboard): State<DashboardState>,
    Json(request): Json<ThemeRequest>,
) -> Response {
    match dashboard.state.select_theme(&request.name).await {
        Some(theme) => Json(theme).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            format!("Unknown theme '{}'", request.name),
        )
            .into_response(),
    }
}

async fn health_handler() -> impl IntoResponse {
    "OK"
}
