//! # navtexgeo: NAVTEX bulletins as geographic features
//!
//! This crate parses raw textual
//! [NAVTEX](https://en.wikipedia.org/wiki/Navtex) maritime safety
//! bulletins and extracts the positional content as GeoJSON-shaped
//! features. It can read receiver dump files from a directory tree
//! or scrape the `<pre>` block of a remote bulletin board.
//!
//! ## Disclaimer
//!
//! This crate is dual-licensed MIT and Apache 2.0. Read these
//! licenses carefully as they may affect your rights.
//!
//! This crate has not been certified as a navigational aid. The
//! author **strongly discourages** its use in any safety-critical
//! applications. Official charts and broadcasts always take
//! precedence over anything this crate produces.
//!
//! ## Example
//!
//! A NAVTEX bulletin is a block of plain text bounded by the
//! standardized `ZCZC` and `NNNN` markers:
//!
//! ```txt
//! ZCZC FA01
//! 291205 UTC APR 23
//! NAVTEX RESUME ROSTOCK
//! BUOY ADRIFT 54 21.8N 012 14.1E
//! NNNN
//! ```
//!
//! Feed any ordered line sequence to [`parse_lines`]. Each
//! well-formed block with at least one embedded coordinate becomes
//! one [`Feature`]; the shape of its [`Geometry`] is chosen from
//! the coordinate count and the `AREA`/`TRACK` keywords.
//!
//! ```
//! use navtexgeo::parse_lines;
//!
//! let fc = parse_lines([
//!     "ZCZC FA01",
//!     "291205 UTC APR 23",
//!     "BUOY ADRIFT 54 21.8N 012 14.1E",
//!     "NNNN",
//! ]);
//!
//! assert_eq!(1, fc.len());
//! assert_eq!(Some("FA01".to_owned()), fc.features[0].id);
//! assert_eq!("Point", fc.features[0].geometry.kind());
//!
//! let geojson = serde_json::to_string_pretty(&fc).unwrap();
//! # assert!(geojson.contains("FeatureCollection"));
//! ```
//!
//! Parsing is purely computational and synchronous. Blocks are
//! independent of one another; the only shared input is the
//! fallback timestamp, captured once per parsing pass and used
//! when a bulletin carries no (parseable) issue time.
//!
//! For complete sources, use [`Source`]:
//!
//! ```no_run
//! use navtexgeo::Source;
//!
//! let source = Source::from_spec("/media/WIB2/NATIONAL");
//! let fc = source.parse().expect("read failure");
//! println!("{} features from {}", fc.len(), source.name());
//! ```
//!
//! For a complete CLI, HTTP service, and overlay-file poller, see
//! the companion binary crate `navtexd`.

mod feature;
mod geometry;
mod message;
mod navcodes;
pub mod position;
mod segment;
mod source;
pub mod timestamp;

pub mod parser;

pub use feature::{Feature, FeatureCollection, Properties};
pub use geometry::Geometry;
pub use message::{HeaderDecodeErr, MessageHeader};
pub use navcodes::SubjectIndicator;
pub use parser::{parse_block, parse_lines, parse_lines_at};
pub use position::Position;
pub use segment::{MessageBlock, Segmenter};
pub use source::{Source, SourceError};
