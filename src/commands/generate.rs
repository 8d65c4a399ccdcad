//! Generate static outputs

use anyhow::{Context, Result};
use notify::Watcher;
use std::fs;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Generate search index, sitemap and per-post payloads
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let written = Generator::new(site).generate()?;

    tracing::info!(
        "Generated {} posts into {:?} in {:.2}s",
        written,
        site.public_dir,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Watch the content directory and config file, regenerating on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    fs::create_dir_all(&site.content_dir)
        .with_context(|| format!("Failed to create {:?}", site.content_dir))?;
    watcher.watch(&site.content_dir, notify::RecursiveMode::NonRecursive)?;

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce: editors emit several events per save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, regenerating...");
                    // Reload so config edits take effect
                    if let Err(e) = Site::new(&site.base_dir).and_then(|site| run(&site)) {
                        tracing::error!("Generation failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
