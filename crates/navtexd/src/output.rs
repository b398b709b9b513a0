//! Source-list loading and overlay-file writing

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::Context;
use log::{error, info};

use navtexgeo::Source;

/// Assemble the source list from arguments and an optional config file
///
/// The config file holds one source specification per line; lines
/// starting with `#` are comments. Positional sources come first.
pub fn load_sources(specs: &[String], config: Option<&Path>) -> anyhow::Result<Vec<Source>> {
    let mut sources: Vec<Source> = specs.iter().map(|s| Source::from_spec(s)).collect();

    if let Some(path) = config {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read --config \"{}\"", path.display()))?;
        sources.extend(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(Source::from_spec),
        );
    }

    if sources.is_empty() {
        anyhow::bail!("no sources configured; pass them as arguments or via --config");
    }
    Ok(sources)
}

/// Parse every source once and write `<name>.geojson` files
///
/// A failing source is logged and skipped; its siblings still
/// run. The whole run fails only if the output directory cannot
/// be created.
pub fn run_parse(sources: &[Source], out: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(out)
        .with_context(|| format!("unable to create --out \"{}\"", out.display()))?;

    for source in sources {
        match source.parse() {
            Ok(fc) => {
                let bytes =
                    serde_json::to_vec_pretty(&fc).context("feature serialization failed")?;
                let path = out.join(format!("{}.geojson", source.name()));
                if write_overlay(&path, &bytes)? {
                    info!("{}: wrote {} features", path.display(), fc.len());
                } else {
                    info!("{}: unchanged", path.display());
                }
            }
            Err(err) => error!("source {}: {}", source.name(), err),
        }
    }
    Ok(())
}

/// Atomically (re)write one overlay file
///
/// Writes to a temporary sibling and renames it into place, so a
/// reader never observes a half-written overlay. Returns `false`
/// without touching the file when `bytes` equals its current
/// contents.
pub fn write_overlay(path: &Path, bytes: &[u8]) -> anyhow::Result<bool> {
    if let Ok(existing) = fs::read(path) {
        if existing == bytes {
            return Ok(false);
        }
    }

    let tmp = path.with_extension("geojson.tmp");
    {
        let mut file = fs::File::create(&tmp)
            .with_context(|| format!("unable to create \"{}\"", tmp.display()))?;
        file.write_all(bytes)?;
        file.sync_all()?;
    }
    fs::rename(&tmp, path)
        .with_context(|| format!("unable to move overlay into \"{}\"", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_sources_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = dir.path().join("config.txt");
        fs::write(
            &cfg,
            "# bulletin sources\n/media/WIB2/NATIONAL\n\nhttps://example.org/navtex.html\n",
        )
        .unwrap();

        let sources = load_sources(&["./local".to_owned()], Some(&cfg)).unwrap();
        assert_eq!(3, sources.len());
        assert!(matches!(sources[0], Source::Directory(_)));
        assert!(matches!(sources[2], Source::Remote(_)));
    }

    #[test]
    fn test_load_sources_empty_is_error() {
        assert!(load_sources(&[], None).is_err());
    }

    #[test]
    fn test_write_overlay_atomic_and_skipping() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("NATIONAL.geojson");

        assert!(write_overlay(&path, b"{\"a\":1}").unwrap());
        assert_eq!(b"{\"a\":1}".to_vec(), fs::read(&path).unwrap());

        // identical content: skipped
        assert!(!write_overlay(&path, b"{\"a\":1}").unwrap());

        // changed content: rewritten, temp file gone
        assert!(write_overlay(&path, b"{\"a\":2}").unwrap());
        assert_eq!(b"{\"a\":2}".to_vec(), fs::read(&path).unwrap());
        assert!(!path.with_extension("geojson.tmp").exists());
    }
}
