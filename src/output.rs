//! Output formatting for search results
//!
//! Plain mode prints offsets followed by the text with every match
//! highlighted; `--json` mode prints the same reports through serde_json.

use serde::Serialize;
use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Occurrences of one pattern in a text
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub pattern: String,
    pub positions: Vec<usize>,
}

/// A trie pattern found at a text offset
#[derive(Debug, Clone, Serialize)]
pub struct LabeledMatch {
    pub offset: usize,
    pub pattern: String,
    /// Matched length in bytes; `pattern` may be longer after lossy decoding
    #[serde(skip)]
    pub byte_len: usize,
}

impl LabeledMatch {
    pub fn new(offset: usize, matched: &[u8]) -> Self {
        Self {
            offset,
            pattern: lossy(matched),
            byte_len: matched.len(),
        }
    }

    fn span(&self) -> (usize, usize) {
        (self.offset, self.offset + self.byte_len)
    }
}

/// A repeated substring and where it starts
#[derive(Debug, Clone, Serialize)]
pub struct RepeatReport {
    pub sequence: String,
    pub positions: Vec<usize>,
}

/// A Burrows-Wheeler transform and its optional suffix array
#[derive(Debug, Clone, Serialize)]
pub struct TransformReport {
    pub bwt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_array: Option<Vec<usize>>,
}

/// Render bytes for display
pub fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Print any report as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)
}

/// Print match offsets and the text with each match highlighted
pub fn print_match_report(
    report: &MatchReport,
    text: &[u8],
    pattern_len: usize,
    choice: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
    write!(stdout, "{}", report.pattern)?;
    stdout.reset()?;
    writeln!(stdout, ": {} match(es)", report.positions.len())?;

    if report.positions.is_empty() {
        return Ok(());
    }

    print_offsets(&mut stdout, &report.positions)?;

    let spans: Vec<(usize, usize)> = report
        .positions
        .iter()
        .map(|&p| (p, p + pattern_len))
        .collect();
    print_highlighted(&mut stdout, text, &spans)
}

/// Print trie matches as `offset:pattern` lines, then the highlighted text
pub fn print_labeled_matches(
    matches: &[LabeledMatch],
    text: &[u8],
    choice: ColorChoice,
) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for m in matches {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(stdout, "{}", m.offset)?;
        stdout.reset()?;
        write!(stdout, ":")?;
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        writeln!(stdout, "{}", m.pattern)?;
        stdout.reset()?;
    }

    if matches.is_empty() {
        return Ok(());
    }

    let spans: Vec<(usize, usize)> = matches.iter().map(LabeledMatch::span).collect();
    print_highlighted(&mut stdout, text, &spans)
}

/// Print repeats as `sequence (count): offsets`
pub fn print_repeats(repeats: &[RepeatReport], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);

    for r in repeats {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", r.sequence)?;
        stdout.reset()?;
        write!(stdout, " ({})", r.positions.len())?;
        write!(stdout, ": ")?;
        print_offsets(&mut stdout, &r.positions)?;
    }

    Ok(())
}

/// Print one sequence per line
pub fn print_sequences(sequences: &[String]) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    for seq in sequences {
        writeln!(stdout, "{}", seq)?;
    }
    Ok(())
}

fn print_offsets(stdout: &mut StandardStream, positions: &[usize]) -> io::Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    let joined: Vec<String> = positions.iter().map(|p| p.to_string()).collect();
    write!(stdout, "{}", joined.join(" "))?;
    stdout.reset()?;
    writeln!(stdout)
}

/// Print `text` with the given `[start, end)` spans highlighted.
///
/// Overlapping spans are merged.
fn print_highlighted(
    stdout: &mut StandardStream,
    text: &[u8],
    spans: &[(usize, usize)],
) -> io::Result<()> {
    let merged = merge_spans(spans, text.len());
    let mut cursor = 0;

    for (start, end) in merged {
        // Text before match
        if start > cursor {
            write!(stdout, "{}", String::from_utf8_lossy(&text[cursor..start]))?;
        }

        // The match itself (highlighted)
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
        write!(stdout, "{}", String::from_utf8_lossy(&text[start..end]))?;
        stdout.reset()?;

        cursor = end;
    }

    // Text after the last match
    if cursor < text.len() {
        write!(stdout, "{}", String::from_utf8_lossy(&text[cursor..]))?;
    }

    writeln!(stdout)
}

/// Sort spans, clamp them to `len` and merge the overlapping ones
fn merge_spans(spans: &[(usize, usize)], len: usize) -> Vec<(usize, usize)> {
    let mut sorted: Vec<(usize, usize)> = spans
        .iter()
        .map(|&(s, e)| (s.min(len), e.min(len)))
        .filter(|&(s, e)| e > s)
        .collect();
    sorted.sort_unstable();

    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(sorted.len());
    for (start, end) in sorted {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_spans() {
        let merged = merge_spans(&[(4, 7), (0, 2), (1, 3), (6, 9)], 8);
        assert_eq!(merged, vec![(0, 3), (4, 8)]);
    }

    #[test]
    fn test_merge_spans_drops_empty() {
        assert!(merge_spans(&[(5, 5), (10, 12)], 8).is_empty());
    }

    #[test]
    fn test_labeled_match_span_uses_bytes() {
        let m = LabeledMatch::new(2, &[b'A', 0xff, b'C']);
        assert_eq!(m.pattern, "A\u{fffd}C");
        assert_eq!(m.pattern.len(), 5);
        assert_eq!(m.span(), (2, 5));

        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "{\"offset\":2,\"pattern\":\"A\u{fffd}C\"}");
    }

    #[test]
    fn test_transform_report_json() {
        let report = TransformReport {
            bwt: "annb$aa".to_string(),
            suffix_array: None,
        };
        let json = serde_json::to_string(&report).unwrap();
        assert_eq!(json, r#"{"bwt":"annb$aa"}"#);
    }
}
