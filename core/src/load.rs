//! Edge-list loader for the quoted-label route format.
//!
//! Each edge sits on its own line: two double-quoted labels followed by a
//! bracketed `key=value` annotation carrying the weight, e.g.
//!
//! ```text
//! "Union South" -> "Computer Sciences and Statistics" [seconds=176.0];
//! ```
//!
//! Lines of any other shape (graph headers, braces, comments) are ignored.

use std::path::Path;

use tracing::{debug, info};

use crate::error::LoadError;
use crate::query::PathGraph;

/// Default annotation key holding the edge weight.
pub const DEFAULT_WEIGHT_KEY: &str = "seconds";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Annotation key whose value is the edge weight.
    pub weight_key: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            weight_key: DEFAULT_WEIGHT_KEY.to_string(),
        }
    }
}

/// Counts from one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    pub lines_read: usize,
    pub edges_loaded: usize,
    /// Edge lines skipped because the pair was already loaded.
    pub duplicates_skipped: usize,
    pub lines_ignored: usize,
}

/// A parsed edge line.
#[derive(Debug, Clone, PartialEq)]
struct EdgeLine<'a> {
    from: &'a str,
    to: &'a str,
    weight: f64,
}

/// Read `path` into `graph`.
///
/// A missing or zero-length file is `EmptySource`; nothing is inserted.
pub fn load_file<G>(path: impl AsRef<Path>, graph: &mut G, options: &LoadOptions) -> Result<LoadSummary, LoadError>
where
    G: PathGraph<Label = String>,
{
    let path = path.as_ref();
    let empty = || LoadError::EmptySource(path.display().to_string());

    let metadata = match std::fs::metadata(path) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(empty()),
        Err(e) => return Err(e.into()),
    };
    if !metadata.is_file() || metadata.len() == 0 {
        return Err(empty());
    }

    let text = std::fs::read_to_string(path)?;
    load_lines(&text, graph, options, &path.display().to_string())
}

/// Parse edge lines from memory into `graph`. Blank input is `EmptySource`.
pub fn load_str<G>(text: &str, graph: &mut G, options: &LoadOptions) -> Result<LoadSummary, LoadError>
where
    G: PathGraph<Label = String>,
{
    load_lines(text, graph, options, "<memory>")
}

fn load_lines<G>(text: &str, graph: &mut G, options: &LoadOptions, source: &str) -> Result<LoadSummary, LoadError>
where
    G: PathGraph<Label = String>,
{
    if text.trim().is_empty() {
        return Err(LoadError::EmptySource(source.to_string()));
    }

    // Validate everything before touching the graph so a bad line leaves it
    // unchanged.
    let mut parsed = Vec::new();
    let mut summary = LoadSummary::default();
    for (idx, line) in text.lines().enumerate() {
        summary.lines_read += 1;
        match parse_line(line, &options.weight_key, idx + 1)? {
            Some(edge) => parsed.push(edge),
            None => {
                summary.lines_ignored += 1;
                if !line.trim().is_empty() {
                    debug!(line = idx + 1, "ignored line");
                }
            }
        }
    }

    for edge in parsed {
        let from = edge.from.to_string();
        let to = edge.to.to_string();
        graph.insert_node(from.clone());
        graph.insert_node(to.clone());
        if graph.contains_edge(&from, &to) {
            summary.duplicates_skipped += 1;
            continue;
        }
        graph.insert_edge(&from, &to, edge.weight)?;
        summary.edges_loaded += 1;
    }

    info!(
        source,
        lines = summary.lines_read,
        edges = summary.edges_loaded,
        duplicates = summary.duplicates_skipped,
        ignored = summary.lines_ignored,
        "loaded route data"
    );
    Ok(summary)
}

/// Parse one line. `Ok(None)` for lines that are not edge lines; an error
/// only when an edge line carries a bad weight.
fn parse_line<'a>(line: &'a str, weight_key: &str, line_no: usize) -> Result<Option<EdgeLine<'a>>, LoadError> {
    let line = line.trim();
    if !line.starts_with('"') {
        return Ok(None);
    }

    let Some((from, rest)) = quoted(line) else {
        return Ok(None);
    };
    let Some(rest) = rest.find('"').map(|i| &rest[i..]) else {
        return Ok(None);
    };
    let Some((to, rest)) = quoted(rest) else {
        return Ok(None);
    };

    let Some(open) = rest.find('[') else {
        return Ok(None);
    };
    let annotation = &rest[open + 1..];
    let annotation = match annotation.find(']') {
        Some(close) => &annotation[..close],
        None => annotation,
    };

    let Some(raw) = annotation_value(annotation, weight_key) else {
        return Ok(None);
    };

    let weight = parse_weight(raw).map_err(|reason| LoadError::InvalidInput {
        line: line_no,
        reason,
    })?;

    Ok(Some(EdgeLine { from, to, weight }))
}

/// Split `"label" rest` into the label and whatever follows its closing
/// quote. `s` must start with a quote.
fn quoted(s: &str) -> Option<(&str, &str)> {
    let body = s.strip_prefix('"')?;
    let end = body.find('"')?;
    Some((&body[..end], &body[end + 1..]))
}

/// Find `key=value` among comma-, semicolon- or whitespace-separated
/// attributes. Separators inside double quotes do not split.
fn annotation_value<'a>(annotation: &'a str, key: &str) -> Option<&'a str> {
    let mut in_quotes = false;
    annotation
        .split(move |c: char| {
            if c == '"' {
                in_quotes = !in_quotes;
            }
            !in_quotes && (c == ',' || c == ';' || c.is_whitespace())
        })
        .filter_map(|attr| attr.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, v)| v.trim().trim_matches('"'))
}

fn parse_weight(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("weight '{}' is not a number", raw))?;
    if !value.is_finite() {
        return Err(format!("weight '{}' is not finite", raw));
    }
    if value < 0.0 {
        return Err(format!("weight '{}' is negative", raw));
    }
    Ok(value)
}
