//! NAVTEX message segmentation

use lazy_static::lazy_static;
use regex::Regex;

#[cfg(not(test))]
use log::debug;

#[cfg(test)]
use std::println as debug;

/// One NAVTEX bulletin, inclusive of its marker lines
///
/// A `MessageBlock` holds every line of a single bulletin, from
/// the `ZCZC` start marker through the `NNNN` end marker. Lines
/// are stored trimmed, in input order. Blocks are produced by the
/// [`Segmenter`] and consumed by the
/// [`parser`](crate::parser).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageBlock {
    lines: Vec<String>,
}

impl MessageBlock {
    /// Lines of the block, in input order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Full message text
    ///
    /// Every line followed by a newline, concatenated.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Obtain the owned lines, destroying this block
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Cuts a flat line stream into bulletin blocks
///
/// The `Segmenter` is a two-state machine. While `Outside`, it
/// discards lines until one matches the start marker (`ZCZC`
/// followed by whitespace and content), which seeds a new buffer.
/// While `Collecting`, every line is appended; a line that is the
/// end marker (`NNNN`, possibly surrounded by whitespace) closes
/// the buffer and emits it.
///
/// A further `ZCZC` line seen while `Collecting` does *not* start
/// a nested block. It is appended like any other content line.
///
/// Feed lines with [`push()`](Segmenter::push). If the input ends
/// while a block is still open, the partial buffer is dropped:
/// the `Segmenter` emits only terminated blocks.
///
/// ```
/// use navtexgeo::Segmenter;
///
/// let mut seg = Segmenter::new();
/// assert!(seg.push("ZCZC FA01").is_none());
/// assert!(seg.push("SOME TEXT").is_none());
/// let block = seg.push("NNNN").expect("block ends here");
/// assert_eq!(block.lines().len(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Segmenter {
    state: State,
}

#[derive(Clone, Debug, Default)]
enum State {
    /// Not within a bulletin
    #[default]
    Outside,

    /// Start marker seen, gathering lines until the end marker
    Collecting(Vec<String>),
}

impl Segmenter {
    /// New segmenter, initially outside any bulletin
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one input line
    ///
    /// Returns a completed [`MessageBlock`] if `line` is the end
    /// marker of the block currently being collected.
    pub fn push(&mut self, line: &str) -> Option<MessageBlock> {
        let line = line.trim();
        match std::mem::take(&mut self.state) {
            State::Outside => {
                if RE_START.is_match(line) {
                    debug!("message start: {}", line);
                    self.state = State::Collecting(vec![line.to_owned()]);
                }
                None
            }
            State::Collecting(mut lines) => {
                lines.push(line.to_owned());
                if RE_END.is_match(line) {
                    debug!("message end after {} lines", lines.len());
                    self.state = State::Outside;
                    Some(MessageBlock { lines })
                } else {
                    self.state = State::Collecting(lines);
                    None
                }
            }
        }
    }

    /// True if a block is currently open
    pub fn is_collecting(&self) -> bool {
        matches!(self.state, State::Collecting(_))
    }

    /// Segment an entire line sequence
    ///
    /// Convenience driver over [`push()`](Segmenter::push). An
    /// unterminated trailing block is dropped.
    pub fn segment<I, S>(lines: I) -> Vec<MessageBlock>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seg = Segmenter::new();
        lines
            .into_iter()
            .filter_map(|line| seg.push(line.as_ref()))
            .collect()
    }
}

lazy_static! {
    static ref RE_START: Regex = Regex::new(r"^\s*ZCZC\s+\S").expect("bad start regexp");
    static ref RE_END: Regex = Regex::new(r"^\s*NNNN\s*$").expect("bad end regexp");
}
