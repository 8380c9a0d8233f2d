//! ==============================================================================
//! server.rs - dashboard web server
//! ==============================================================================
//!
//! purpose:
//!     thin presentation adapter over the state store. it renders whatever
//!     snapshot is current and forwards the single toggle command to the
//!     engine. no state lives here.
//!
//! routes:
//!     GET  /            html dashboard (stats, trend line, newest-first list)
//!     GET  /api         current snapshot as json
//!     POST /api/toggle  start or stop the simulation
//!
//! relationships:
//!     - uses: engine.rs (toggle), store.rs (snapshots), display.rs (formatting)
//!     - started by: main.rs
//!
//! ==============================================================================

use anyhow::Result;
use axum::{
    extract::State,
    response::{Html, Json},
    routing::{get, post},
    Router,
};
use std::fmt::Write as _;
use std::future::Future;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::display::{chart_points, format_temperature, TemperatureBand, ToggleButton};
use crate::engine::SimulationEngine;
use crate::store::Snapshot;

const CHART_WIDTH: f64 = 600.0;
const CHART_HEIGHT: f64 = 180.0;

pub fn router(engine: SimulationEngine) -> Router {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/api", get(api_handler))
        .route("/api/toggle", post(toggle_handler))
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

/// serve until `shutdown` resolves
pub async fn run_server(
    bind: &str,
    engine: SimulationEngine,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("[SERVER] Dashboard live at http://{}", listener.local_addr()?);
    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// resolve once `signal` fires
///
/// a signal that fails to register is logged and treated as a shutdown
/// request, so the server never stops without saying why
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("[RUNTIME] Shutdown requested"),
        Err(e) => warn!("[RUNTIME] Failed to listen for shutdown signal: {} - shutting down", e),
    }
}

async fn dashboard_handler(State(engine): State<SimulationEngine>) -> Html<String> {
    Html(render_dashboard(&engine.store().current()))
}

/// json api endpoint for programmatic access
async fn api_handler(State(engine): State<SimulationEngine>) -> Json<Snapshot> {
    Json(engine.store().current())
}

async fn toggle_handler(State(engine): State<SimulationEngine>) -> Json<serde_json::Value> {
    let running = engine.toggle();
    Json(serde_json::json!({ "running": running }))
}

// ==============================================================================
// html rendering
// ==============================================================================

pub fn render_dashboard(snapshot: &Snapshot) -> String {
    let has_data = snapshot.has_data();
    let stats = &snapshot.statistics;
    let button = ToggleButton::for_state(snapshot.running);

    let mut html = String::with_capacity(4096);
    html.push_str(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><meta http-equiv="refresh" content="2"><title>temperature monitor</title></head>
<body style="font-family: system-ui; padding: 1.5rem; background: #1a1a2e; color: #eee;">
<h1>Temperature Monitor</h1>
<section style="display: flex; gap: 1rem;">
"#,
    );

    for (label, value) in [
        ("Current", stats.current),
        ("Average", stats.average),
        ("Min", stats.min),
        ("Max", stats.max),
    ] {
        let color = if has_data {
            TemperatureBand::of(value).color()
        } else {
            "#888"
        };
        let _ = writeln!(
            html,
            r#"<div class="stat"><div>{label}</div><div style="font-size: 1.6rem; color: {color};">{}</div></div>"#,
            html_escape(&format_temperature(value, has_data)),
        );
    }
    html.push_str("</section>\n");

    match chart_points(&snapshot.temperatures(), CHART_WIDTH, CHART_HEIGHT) {
        Some(points) => {
            let polyline = points
                .iter()
                .map(|(x, y)| format!("{x:.1},{y:.1}"))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(
                html,
                r##"<svg width="{CHART_WIDTH}" height="{CHART_HEIGHT}" style="background: #16213e;"><polyline fill="none" stroke="#4fc3f7" stroke-width="2" points="{polyline}"/></svg>"##,
            );
        }
        None => html.push_str("<p style=\"color: #888;\">Not enough variation to chart yet</p>\n"),
    }

    let _ = writeln!(
        html,
        r#"<button onclick="fetch('/api/toggle', {{ method: 'POST' }}).then(() => location.reload())" style="background: {}; color: #fff;">{}</button>"#,
        button.color, button.label,
    );

    html.push_str("<ul>\n");
    if has_data {
        for reading in snapshot.newest_first() {
            let _ = writeln!(
                html,
                r#"<li id="r-{}"><span style="color: {};">{}</span> {}</li>"#,
                reading.id,
                TemperatureBand::of(reading.temperature).color(),
                html_escape(&format_temperature(reading.temperature, true)),
                html_escape(&reading.timestamp),
            );
        }
    } else {
        html.push_str("<li style=\"color: #888;\">No readings yet</li>\n");
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    html
}

/// escape html special characters to prevent xss
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Reading;
    use crate::store::StateStore;

    #[test]
    fn empty_dashboard_uses_placeholders() {
        let html = render_dashboard(&StateStore::new().current());

        assert!(html.contains("--"));
        assert!(!html.contains("0.0°"));
        assert!(html.contains("No readings yet"));
        assert!(html.contains(">Start<"));
    }

    #[test]
    fn populated_dashboard_lists_newest_first() {
        let store = StateStore::new();
        store.set_running(true);
        store.record(Reading::new(70.0, "10:00:00"));
        store.record(Reading::new(80.0, "10:00:02"));

        let html = render_dashboard(&store.current());
        let newest = html.find("10:00:02").unwrap();
        let oldest = html.find("10:00:00").unwrap();
        assert!(newest < oldest);
        assert!(html.contains("<polyline"));
        assert!(html.contains(">Stop<"));
        assert!(html.contains("75.0°"));
    }

    #[test]
    fn flat_history_skips_the_chart() {
        let store = StateStore::new();
        store.record(Reading::new(75.0, "10:00:00"));
        store.record(Reading::new(75.0, "10:00:02"));

        let html = render_dashboard(&store.current());
        assert!(!html.contains("<polyline"));
        assert!(html.contains("Not enough variation"));
    }

    #[tokio::test]
    async fn shutdown_resolves_on_signal() {
        wait_for_shutdown(async { Ok(()) }).await;
    }

    #[tokio::test]
    async fn shutdown_resolves_when_signal_registration_fails() {
        wait_for_shutdown(async { Err(std::io::Error::other("no signal handler")) }).await;
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape("<a href=\"x\">&"), "&lt;a href=&quot;x&quot;&gt;&amp;");
    }
}
