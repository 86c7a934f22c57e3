use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::text_utils::slugify;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeadingEntry {
    pub id: String,
    pub text: String,
    pub level: u8,
}

/// Hands out heading ids in document order. The first heading with a given
/// slug keeps it, later ones get `-1`, `-2`, ...
#[derive(Default)]
pub struct UniqueSlugs {
    seen: HashMap<String, u32>,
    issued: HashSet<String>,
}

impl UniqueSlugs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self, text: &str) -> String {
        let slug = slugify(text);
        let count = self.seen.entry(slug.clone()).or_insert(0);

        let mut id = if *count == 0 { slug.clone() } else { format!("{}-{}", slug, count) };
        *count += 1;

        // A literal heading such as "Setup 1" may already own "setup-1".
        while self.issued.contains(&id) {
            id = format!("{}-{}", slug, count);
            *count += 1;
        }

        self.issued.insert(id.clone());
        id
    }
}

lazy_static! {
    static ref ATX_REGEX: Regex = Regex::new(r"^ {0,3}(#{1,6})[ \t]+(.+?)(?:[ \t]+#+)?[ \t]*$").unwrap();
    static ref EMPTY_ATX_REGEX: Regex = Regex::new(r"^ {0,3}#{1,6}[ \t]*$").unwrap();
    static ref SETEXT_REGEX: Regex = Regex::new(r"^ {0,3}(=+|-+)[ \t]*$").unwrap();
    static ref THEMATIC_BREAK_REGEX: Regex = Regex::new(r"^ {0,3}((\*[ \t]*){3,}|(-[ \t]*){3,}|(_[ \t]*){3,})$").unwrap();
    static ref FENCE_REGEX: Regex = Regex::new(r"^ {0,3}(`{3,}|~{3,})").unwrap();
    // list items, block quotes, html blocks and tables never open a paragraph
    static ref CONTAINER_REGEX: Regex = Regex::new(r"^ {0,3}([-*+][ \t]|\d{1,9}[.)][ \t]|>|<|\|)").unwrap();
    static ref COMMENT_REGEX: Regex = Regex::new(r"(?s)<!--.*?-->").unwrap();
    static ref IMAGE_REGEX: Regex = Regex::new(r"!\[[^\]]*\]\([^)]*\)").unwrap();
    static ref LINK_REGEX: Regex = Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap();
}

enum Block<'a> {
    None,
    Paragraph(Vec<&'a str>),
    Container,
    Fence(&'a str),
}

fn is_fence_close(line: &str, open: &str) -> bool {
    let trimmed = line.trim();
    let marker = open.as_bytes()[0] as char;
    trimmed.len() >= open.len() && trimmed.chars().all(|c| c == marker)
}

fn heading_entry(slugs: &mut UniqueSlugs, level: u8, raw_text: &str) -> HeadingEntry {
    let text = IMAGE_REGEX.replace_all(raw_text, "");
    let text = LINK_REGEX.replace_all(&text, "$1").trim().to_string();
    let id = slugs.next_id(&text);
    HeadingEntry { id, text, level }
}

/// Outline of a markdown document, in document order.
///
/// Both ATX (`## Title`) and setext (`Title` over `===`/`---`) headings are
/// recognized. HTML comments are dropped first and fenced code blocks are
/// skipped, so ids are numbered over the same headings the renderer emits.
/// Headings nested in list items or block quotes are not part of the outline.
pub fn extract_headings(markdown: &str) -> Vec<HeadingEntry> {
    let markdown = COMMENT_REGEX.replace_all(markdown, "");

    let mut slugs = UniqueSlugs::new();
    let mut headings = vec![];
    let mut block = Block::None;

    for line in markdown.lines() {
        if let Block::Fence(open) = &block {
            if is_fence_close(line, open) {
                block = Block::None;
            }
            continue;
        }

        if let Some(cap) = FENCE_REGEX.captures(line) {
            block = Block::Fence(cap.get(1).map_or("```", |m| m.as_str()));
            continue;
        }

        if let Some(cap) = ATX_REGEX.captures(line) {
            block = Block::None;
            let text = cap[2].trim();
            if !text.is_empty() {
                headings.push(heading_entry(&mut slugs, cap[1].len() as u8, text));
            }
            continue;
        }

        if line.trim().is_empty() || EMPTY_ATX_REGEX.is_match(line) {
            block = Block::None;
            continue;
        }

        block = match block {
            Block::Paragraph(mut lines) => {
                if let Some(cap) = SETEXT_REGEX.captures(line) {
                    let level = if cap[1].starts_with('=') { 1 } else { 2 };
                    let text = lines.iter().map(|l| l.trim()).collect::<Vec<_>>().join(" ");
                    headings.push(heading_entry(&mut slugs, level, &text));
                    Block::None
                } else if THEMATIC_BREAK_REGEX.is_match(line) {
                    Block::None
                } else if CONTAINER_REGEX.is_match(line) {
                    Block::Container
                } else {
                    lines.push(line);
                    Block::Paragraph(lines)
                }
            }
            Block::Container => Block::Container,
            _ if THEMATIC_BREAK_REGEX.is_match(line) => Block::None,
            _ if CONTAINER_REGEX.is_match(line) => Block::Container,
            // indented code
            _ if line.starts_with("    ") || line.starts_with('\t') => Block::None,
            _ => Block::Paragraph(vec![line]),
        };
    }

    headings
}

/// Keeps only the headings whose id made it into the rendered document.
pub fn filter_rendered(headings: Vec<HeadingEntry>, rendered_ids: &HashSet<String>) -> Vec<HeadingEntry> {
    headings.into_iter()
        .filter(|h| rendered_ids.contains(&h.id))
        .collect()
}

/// The last heading, in document order, whose distance from the viewport top
/// is at or above `threshold`. Headings without a known offset are ignored.
pub fn active_heading<'a>(headings: &'a [HeadingEntry], offsets: &HashMap<String, f64>, threshold: f64) -> Option<&'a HeadingEntry> {
    headings.iter()
        .rev()
        .filter_map(|h| offsets.get(&h.id).map(|top| (h, *top)))
        .find(|(_, top)| *top <= threshold)
        .map(|(h, _)| h)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistenceCheck {
    generation: u64,
}

/// Table of contents state for one article view.
///
/// Loading new content invalidates any existence check still in flight, and
/// scroll events only move the active heading while the listener is attached.
pub struct TocTracker {
    generation: u64,
    candidates: Vec<HeadingEntry>,
    entries: Vec<HeadingEntry>,
    active_id: Option<String>,
    attached: bool,
    threshold: f64,
}

impl TocTracker {
    pub fn new(threshold: f64) -> Self {
        TocTracker {
            generation: 0,
            candidates: vec![],
            entries: vec![],
            active_id: None,
            attached: false,
            threshold,
        }
    }

    pub fn load(&mut self, markdown: &str) -> ExistenceCheck {
        self.generation += 1;
        self.candidates = extract_headings(markdown);
        self.entries.clear();
        self.active_id = None;
        ExistenceCheck { generation: self.generation }
    }

    /// Applies a deferred existence check. Returns false and changes nothing
    /// when the content was reloaded after the check was scheduled.
    pub fn complete_check(&mut self, check: ExistenceCheck, rendered_ids: &HashSet<String>) -> bool {
        if check.generation != self.generation {
            return false;
        }
        self.entries = filter_rendered(self.candidates.clone(), rendered_ids);
        true
    }

    pub fn attach(&mut self) {
        self.attached = true;
    }

    pub fn detach(&mut self) {
        self.attached = false;
    }

    pub fn on_scroll(&mut self, offsets: &HashMap<String, f64>) -> Option<&str> {
        if !self.attached {
            return None;
        }
        if let Some(heading) = active_heading(&self.entries, offsets, self.threshold) {
            self.active_id = Some(heading.id.clone());
        }
        self.active_id.as_deref()
    }

    pub fn entries(&self) -> &[HeadingEntry] {
        &self.entries
    }

    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }
}
