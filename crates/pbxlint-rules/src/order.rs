//! Alphabetical ordering of group contents.

use crate::report::{Diagnostic, Report};
use crate::walk::top_level_children;
use pbxlint_graph::Project;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter::Peekable;
use std::str::Chars;
use tracing::debug;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How a group's children are expected to be arranged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Subgroups first, then files, each sorted on its own.
    #[default]
    GroupsFirst,
    /// Subgroups and files interleaved in one sort.
    ByName,
}

impl SortOrder {
    fn arrange<'a>(self, groups: &[&'a str], files: &[&'a str]) -> Vec<&'a str> {
        match self {
            SortOrder::ByName => {
                let mut all: Vec<&str> = groups.iter().chain(files).copied().collect();
                all.sort_by(|a, b| natural_cmp(a, b));
                all
            }
            SortOrder::GroupsFirst => {
                let mut groups = groups.to_vec();
                let mut files = files.to_vec();
                groups.sort_by(|a, b| natural_cmp(a, b));
                files.sort_by(|a, b| natural_cmp(a, b));
                groups.extend(files);
                groups
            }
        }
    }
}

/// Compares names the way Finder does: case and accent insensitive, with
/// runs of digits compared by value so `File2` sorts before `File10`.
///
/// Names that still tie are ordered by accents, then lowercase before
/// uppercase, then by code point, so the order stays total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (folded_a, folded_b) = (fold(a), fold(b));
    compare_runs(&folded_a, &folded_b)
        .then_with(|| compare_runs(&lowercase(a), &lowercase(b)))
        .then_with(|| a.chars().map(case_key).cmp(b.chars().map(case_key)))
        .then_with(|| a.cmp(b))
}

/// Decomposed, lowercased, with combining marks dropped: `Éclair` → `eclair`.
fn fold(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Decomposed and lowercased, accents kept.
fn lowercase(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_key(c: char) -> (bool, char) {
    (c.is_uppercase(), c)
}

fn compare_runs(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        let (l, r) = match (left.peek(), right.peek()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => (*l, *r),
        };

        let ordering = if l.is_ascii_digit() && r.is_ascii_digit() {
            let l = digit_run(&mut left);
            let r = digit_run(&mut right);
            let l = l.trim_start_matches('0');
            let r = r.trim_start_matches('0');
            l.len().cmp(&r.len()).then_with(|| l.cmp(r))
        } else {
            left.next();
            right.next();
            l.cmp(&r)
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn digit_run(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        run.push(c);
    }
    run
}

fn check_group(project: &Project, id: &str, order: SortOrder) -> Option<Diagnostic> {
    let group = project.group(id)?;

    let mut groups = Vec::new();
    let mut files = Vec::new();
    let mut actual = Vec::new();
    for child in &group.children {
        if let Some(subgroup) = project.group(child) {
            groups.push(subgroup.title.as_str());
            actual.push(subgroup.title.as_str());
        } else if let Some(file) = project.file_reference(child) {
            files.push(file.title.as_str());
            actual.push(file.title.as_str());
        }
    }

    let expected = order.arrange(&groups, &files);
    if expected == actual {
        return None;
    }

    Some(Diagnostic::new(format!(
        "Xcode folder “{}” has out-of-order children.\nExpected: {:?}\nActual:   {:?}",
        project.display_path(id),
        expected,
        actual
    )))
}

fn visit<'a>(
    project: &'a Project,
    ids: &'a [String],
    order: SortOrder,
    seen: &mut HashSet<&'a str>,
    out: &mut Vec<Diagnostic>,
) {
    for id in ids {
        let Some(group) = project.group(id) else {
            continue;
        };
        if !seen.insert(id) {
            continue;
        }
        visit(project, &group.children, order, seen, out);
        out.extend(check_group(project, id, order));
    }
}

/// Reports every group whose children are not in `order`.
///
/// Top-level groups named in `skip_folders` are left out, along with
/// everything beneath them. Nested groups are reported before the group
/// that contains them.
pub fn check_order(project: &Project, order: SortOrder, skip_folders: &[String]) -> Report {
    let Some(children) = top_level_children(project, skip_folders) else {
        return Report::InvalidInput;
    };

    let mut diagnostics = Vec::new();
    visit(project, &children, order, &mut HashSet::new(), &mut diagnostics);

    debug!("items-in-alpha-order: {} out-of-order groups", diagnostics.len());
    Report::from_diagnostics(diagnostics)
}
