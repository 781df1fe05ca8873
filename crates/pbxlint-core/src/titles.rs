//! Title recovery from project file comments.
//!
//! Xcode writes a comment beside almost every object id, e.g.
//! `D2A90D13 /* First.swift */ = {...}`. Those names are what a user sees in
//! the navigator, but the property list decoder throws comments away. This
//! pass reads the raw text line by line and rebuilds an id→title table for
//! the sections whose names we report on.

use std::collections::HashMap;

/// Sections scanned for titles, in merge order. Later sections win when an
/// id shows up in more than one.
const FILE_REFERENCE_SECTION: &str = "PBXFileReference section";
const GROUP_SECTION: &str = "PBXGroup section";
const BUILD_CONFIGURATION_SECTION: &str = "XCBuildConfiguration section";
const CONFIGURATION_LIST_SECTION: &str = "XCConfigurationList section";

/// Maps object ids to their display titles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Titles {
    by_id: HashMap<String, String>,
}

impl Titles {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans project text and collects titles from all known sections.
    pub fn extract(project_text: &str) -> Self {
        let mut titles = Self::new();
        titles.merge(scan_section(project_text, FILE_REFERENCE_SECTION, file_reference_line));
        titles.merge(scan_section(project_text, GROUP_SECTION, commented_line));
        titles.merge(scan_section(project_text, BUILD_CONFIGURATION_SECTION, commented_line));
        titles.merge(scan_section(project_text, CONFIGURATION_LIST_SECTION, commented_line));
        titles
    }

    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.by_id.insert(id.into(), title.into());
    }

    /// Returns the recovered title, if any.
    pub fn get(&self, id: &str) -> Option<&str> {
        self.by_id.get(id).map(String::as_str)
    }

    /// Returns the display name for an id, falling back to the id itself.
    pub fn resolve(&self, id: &str) -> String {
        self.get(id).unwrap_or(id).to_string()
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    fn merge(&mut self, section: HashMap<String, String>) {
        self.by_id.extend(section);
    }
}

/// Collects titles between the first and second occurrence of `marker`.
///
/// Xcode brackets each section with `/* Begin X section */` and
/// `/* End X section */`, so both boundary lines contain the marker.
fn scan_section(
    text: &str,
    marker: &str,
    parse: fn(&str) -> Option<(&str, &str)>,
) -> HashMap<String, String> {
    let mut titles = HashMap::new();
    let mut lines = text.lines().skip_while(|line| !line.contains(marker));

    if lines.next().is_none() {
        return titles;
    }

    for line in lines {
        if line.contains(marker) {
            break;
        }
        if let Some((id, title)) = parse(line.trim()) {
            titles.insert(id.to_string(), title.to_string());
        }
    }

    titles
}

/// Splits on `sep`, requiring exactly one occurrence.
fn split_once_exact<'a>(line: &'a str, sep: &str) -> Option<(&'a str, &'a str)> {
    let (head, tail) = line.split_once(sep)?;
    if tail.contains(sep) {
        return None;
    }
    Some((head, tail))
}

/// `<id> /* <title> */ = {` and `<id> /* <title> */,`
fn commented_line(line: &str) -> Option<(&str, &str)> {
    let (id, rest) = split_once_exact(line, " /* ")?;
    let (title, _) = split_once_exact(rest, " */")?;
    Some((id, title))
}

/// File references are written on one line with all their attributes, so
/// the comment close is located first and the id must be a bare token.
fn file_reference_line(line: &str) -> Option<(&str, &str)> {
    let (head, _) = split_once_exact(line, " */")?;
    let (id, title) = split_once_exact(head, " /* ")?;
    if id.contains(" = ") {
        return None;
    }
    Some((id, title))
}
