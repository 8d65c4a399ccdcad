//! Development server: search API plus the generated outputs

use anyhow::Result;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use notify_debouncer_mini::{
    new_debouncer,
    notify::{RecursiveMode, Watcher},
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::SearchEntry;
use crate::{Site, CONFIG_FILE};

/// Server state
struct ServerState {
    base_dir: PathBuf,
}

/// `GET /api/search` parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Start the development server
pub async fn start(site: &Site, ip: &str, port: u16, watch: bool) -> Result<()> {
    let state = Arc::new(ServerState {
        base_dir: site.base_dir.clone(),
    });

    let app = Router::new()
        .route("/api/search", get(search_handler))
        .fallback_service(
            ServeDir::new(&site.public_dir).append_index_html_on_directories(true),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Search API at http://{}:{}/api/search?q=", ip, port);
    if watch {
        println!("Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let base_dir = site.base_dir.clone();
        let content_dir = site.content_dir.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = watch_and_regenerate(&base_dir, &content_dir) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// The catalog, filtered by `q` when it is present and non-blank
pub fn search(site: &Site, q: Option<&str>) -> Result<Vec<SearchEntry>> {
    let index = site.repository().search_index()?;
    Ok(match q.filter(|q| !q.trim().is_empty()) {
        Some(q) => index.into_iter().filter(|e| e.matches(q)).collect(),
        None => index,
    })
}

async fn search_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<SearchParams>,
) -> (StatusCode, Json<Vec<SearchEntry>>) {
    let base_dir = state.base_dir.clone();
    let result = tokio::task::spawn_blocking(move || {
        let site = Site::new(&base_dir)?;
        search(&site, params.q.as_deref())
    })
    .await;

    match result {
        Ok(Ok(entries)) => (StatusCode::OK, Json(entries)),
        Ok(Err(e)) => {
            tracing::error!("Search failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
        Err(e) => {
            tracing::error!("Search task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Json(Vec::new()))
        }
    }
}

/// Whether a changed path should trigger regeneration
fn is_relevant(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') || name.ends_with('~') {
        return false;
    }
    name == CONFIG_FILE
        || path
            .extension()
            .map(|ext| ext == "md" || ext == "mdx")
            .unwrap_or(false)
}

/// Watch content and config, regenerating outputs on change. Blocks.
fn watch_and_regenerate(base_dir: &Path, content_dir: &Path) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();

    // Create debouncer to avoid multiple rapid rebuilds
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    if content_dir.exists() {
        debouncer
            .watcher()
            .watch(content_dir, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", content_dir);
    }

    let config_path = base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
        tracing::debug!("Watching: {:?}", config_path);
    }

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events.iter().filter(|e| is_relevant(&e.path)).collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("File changed: {}", event.path.display());
                }

                match Site::new(base_dir).and_then(|site| site.generate()) {
                    Ok(()) => tracing::info!("Regenerated successfully"),
                    Err(e) => tracing::error!("Generation failed: {:#}", e),
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(e) => {
                tracing::error!("Channel error: {:?}", e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn site() -> (TempDir, Site) {
        let tmp = TempDir::new().unwrap();
        let site = Site::new(tmp.path()).unwrap();
        fs::create_dir_all(&site.content_dir).unwrap();
        fs::write(
            site.content_dir.join("grab-bars.mdx"),
            "---\ntitle: Grab Bars\ndescription: Mounting heights\ndate: 2025-01-03\ncategory: bathroom-safety\n---\n",
        )
        .unwrap();
        fs::write(
            site.content_dir.join("night-lights.md"),
            "---\ntitle: Night Lights\ndate: 2025-01-02\ncategory: lighting\n---\n",
        )
        .unwrap();
        (tmp, site)
    }

    #[test]
    fn test_search_without_query_returns_catalog() {
        let (_tmp, site) = site();
        assert_eq!(search(&site, None).unwrap().len(), 2);
        assert_eq!(search(&site, Some("  ")).unwrap().len(), 2);
    }

    #[test]
    fn test_search_filters() {
        let (_tmp, site) = site();
        let hits = search(&site, Some("BATHROOM mounting")).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].slug, "grab-bars");
        assert!(search(&site, Some("ramp")).unwrap().is_empty());
    }

    #[test]
    fn test_relevant_paths() {
        assert!(is_relevant(Path::new("/site/content/posts/a.mdx")));
        assert!(is_relevant(Path::new("/site/content/posts/a.md")));
        assert!(is_relevant(Path::new("/site/_config.yml")));
        assert!(!is_relevant(Path::new("/site/content/posts/.a.md.swp")));
        assert!(!is_relevant(Path::new("/site/content/posts/a.md~")));
        assert!(!is_relevant(Path::new("/site/content/posts/notes.txt")));
    }
}
