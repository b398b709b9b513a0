//! Bulletin sources
//!
//! Bulletins arrive either as `.TXT` files below a local
//! directory (one NAVTEX receiver dump per file) or inside the
//! `<pre>` block of a remote bulletin-board page. A [`Source`]
//! wraps both and produces one
//! [`FeatureCollection`](crate::FeatureCollection) per
//! [`parse()`](Source::parse) call.

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use thiserror::Error;

use crate::feature::FeatureCollection;
use crate::parser;

/// Error reading or fetching a source
///
/// Fatal for the affected source only; sibling sources of a
/// multi-source run are unaffected.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The HTTP request itself failed
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The remote answered with an error status
    ///
    /// Callers surface this as an `{"Error": status}` value
    /// rather than a FeatureCollection.
    #[error("remote returned status {0}")]
    Status(u16),

    /// The response body carried no `<pre>` block
    #[error("no <pre> block in response body")]
    MissingPre,

    /// Local file or directory access failed
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// One configured bulletin source
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Source {
    /// A remote bulletin-board URL
    Remote(String),

    /// A local directory of receiver dumps
    Directory(PathBuf),
}

impl Source {
    /// Classify a source specification string
    ///
    /// Anything shaped like an `http://` or `https://` URL is a
    /// [`Remote`](Source::Remote) source; everything else is
    /// taken as a local directory path.
    pub fn from_spec(spec: &str) -> Self {
        let spec = spec.trim();
        if RE_URL.is_match(spec) {
            Source::Remote(spec.to_owned())
        } else {
            Source::Directory(PathBuf::from(spec))
        }
    }

    /// Short identifier for this source
    ///
    /// The last non-empty `/`-separated segment of the
    /// specification, or `"default"` when there is none. Used to
    /// name output files and index entries.
    pub fn name(&self) -> String {
        let spec = match self {
            Source::Remote(url) => url.as_str(),
            Source::Directory(path) => path.to_str().unwrap_or_default(),
        };
        spec.split('/')
            .filter(|part| !part.is_empty())
            .last()
            .unwrap_or("default")
            .to_owned()
    }

    /// Read and parse this source
    ///
    /// Runs one parsing pass per input file (directory sources)
    /// or one pass over the extracted `<pre>` text (remote
    /// sources).
    pub fn parse(&self) -> Result<FeatureCollection, SourceError> {
        match self {
            Source::Remote(url) => fetch_remote(url),
            Source::Directory(path) => read_directory(path),
        }
    }
}

/// Parse every `.TXT` file below `root`, recursively
///
/// Files are visited in sorted path order so repeated runs over
/// the same tree produce the same feature order.
fn read_directory(root: &Path) -> Result<FeatureCollection, SourceError> {
    let mut files = Vec::new();
    walk_txt(root, &mut files)?;
    files.sort();

    let mut out = FeatureCollection::new();
    for path in files {
        debug!("reading {}", path.display());
        let contents = fs::read_to_string(&path)?;
        out.append(parser::parse_lines(contents.lines()));
    }
    info!(
        "directory {}: {} features",
        root.display(),
        out.len()
    );
    Ok(out)
}

// Collect `.TXT` file paths below `dir`. Extension match is
// case-sensitive, like the receiver software that writes them.
fn walk_txt(dir: &Path, out: &mut Vec<PathBuf>) -> std::io::Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk_txt(&path, out)?;
        } else if path.extension().map_or(false, |ext| ext == "TXT") {
            out.push(path);
        }
    }
    Ok(())
}

/// Fetch a remote bulletin board and parse its `<pre>` text
fn fetch_remote(url: &str) -> Result<FeatureCollection, SourceError> {
    debug!("fetching {}", url);
    let response = reqwest::blocking::get(url)?;
    let status = response.status().as_u16();
    if status >= 400 {
        return Err(SourceError::Status(status));
    }

    let body = response.text()?;
    let text = pre_text(&body).ok_or(SourceError::MissingPre)?;
    let out = parser::parse_lines(text.lines());
    info!("{}: {} features", url, out.len());
    Ok(out)
}

// Isolate the text of the first <pre> block: inner markup is
// stripped and the basic character entities are decoded.
fn pre_text(html: &str) -> Option<String> {
    let inner = RE_PRE.captures(html)?.get(1)?.as_str();
    let stripped = RE_TAG.replace_all(inner, "");
    Some(
        stripped
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&"),
    )
}

lazy_static! {
    static ref RE_URL: Regex = Regex::new(r"^https?://[^/]+/").expect("bad url regexp");
    static ref RE_PRE: Regex =
        Regex::new(r"(?is)<pre[^>]*>(.*?)</pre>").expect("bad pre regexp");
    static ref RE_TAG: Regex = Regex::new(r"<[^>]+>").expect("bad tag regexp");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_from_spec() {
        assert_eq!(
            Source::Remote("https://example.org/navtex/".to_owned()),
            Source::from_spec("  https://example.org/navtex/ ")
        );
        assert_eq!(
            Source::Directory(PathBuf::from("/media/WIB2/NATIONAL")),
            Source::from_spec("/media/WIB2/NATIONAL")
        );
        // a bare scheme without a host is not a URL
        assert!(matches!(
            Source::from_spec("https-archive"),
            Source::Directory(_)
        ));
    }

    #[test]
    fn test_source_name() {
        assert_eq!(
            "NATIONAL",
            Source::from_spec("/media/WIB2/NATIONAL").name()
        );
        assert_eq!(
            "NATIONAL",
            Source::from_spec("/media/WIB2/NATIONAL/").name()
        );
        assert_eq!(
            "navtex.html",
            Source::from_spec("https://example.org/pub/navtex.html").name()
        );
        assert_eq!("default", Source::from_spec("/").name());
    }

    #[test]
    fn test_read_directory_recursive() {
        let root = tempfile::tempdir().unwrap();
        let sub = root.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let mut f = fs::File::create(sub.join("msg1.TXT")).unwrap();
        writeln!(f, "ZCZC AB12\n48 30.5N 008 15.2E\nNNNN").unwrap();

        // wrong extension: ignored
        let mut f = fs::File::create(root.path().join("notes.txt")).unwrap();
        writeln!(f, "ZCZC CD34\n49 00.0N 009 00.0E\nNNNN").unwrap();

        let fc = read_directory(root.path()).unwrap();
        assert_eq!(1, fc.len());
        assert_eq!(Some("AB12".to_owned()), fc.features[0].id);
    }

    #[test]
    fn test_read_directory_missing() {
        let err = read_directory(Path::new("/nonexistent/navtex")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_pre_text() {
        let html = "<html><body><h1>Board</h1>\
                    <pre>ZCZC AB12\nA &amp; B\nNNNN</pre></body></html>";
        assert_eq!(
            "ZCZC AB12\nA & B\nNNNN",
            pre_text(html).unwrap()
        );

        // inner markup is stripped
        let html = "<PRE class=x>LINE<br/>MORE</PRE>";
        assert_eq!("LINEMORE", pre_text(html).unwrap());

        assert_eq!(None, pre_text("<html><body>nothing</body></html>"));
    }
}
