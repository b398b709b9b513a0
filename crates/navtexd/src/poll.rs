//! Overlay poller
//!
//! Mirrors a running `navtexd serve` instance into per-source
//! overlay files. Every interval, the index endpoint is queried
//! for the source names and each `/read/{idx}` body is written to
//! `<out>/<name>.geojson`. Writes are atomic and skipped when the
//! content is byte-identical, so chart plotters watching the
//! directory only see real changes.

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use log::{debug, info, warn};
use reqwest::blocking::Client;

use crate::output;

/// Poll `base_url` forever
///
/// Fetch failures are logged and retried at the next interval;
/// only a failure to create the output directory or the HTTP
/// client is fatal.
pub fn run(base_url: &str, interval: Duration, out: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("unable to create --out \"{}\"", out.display()))?;
    let client = Client::builder()
        .timeout(Duration::from_secs(60))
        .build()
        .context("unable to build http client")?;
    let base_url = base_url.trim_end_matches('/');

    info!("polling {} every {}s", base_url, interval.as_secs());
    loop {
        if let Err(err) = poll_once(&client, base_url, out) {
            warn!("poll failed: {}", err);
        }
        std::thread::sleep(interval);
    }
}

fn poll_once(client: &Client, base_url: &str, out: &Path) -> anyhow::Result<()> {
    let index: serde_json::Value = client.get(base_url).send()?.error_for_status()?.json()?;
    let names = index["sources"]
        .as_array()
        .context("index did not list sources")?;

    for (idx, name) in names.iter().enumerate() {
        let name = name.as_str().context("source name is not a string")?;
        let url = format!("{}/read/{}", base_url, idx);
        debug!("fetching {}", url);

        match client.get(&url).send().and_then(|r| {
            let r = r.error_for_status()?;
            r.bytes()
        }) {
            Ok(bytes) => {
                let path = out.join(format!("{}.geojson", name));
                if output::write_overlay(&path, &bytes)? {
                    info!("{}: updated", path.display());
                }
            }
            Err(err) => warn!("source {}: {}", name, err),
        }
    }
    Ok(())
}
