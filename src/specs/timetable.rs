// src/specs/timetable.rs
//! Extraction *spec* for the timetable page.
//!
//! Purpose:
//! - Locate the timetable's `<tbody>` inside a saved portal page.
//! - Walk its rows and keep the ones whose period cell matches a configured
//!   label set (the slots still to come today).
//! - Dig the subject name out of each kept row's detail cell and normalize it.
//!
//! The portal renders one `<tr>` per period slot. The period number sits in
//! the second cell as bare text; the subject sits deep in the fourth cell,
//! wrapped in the theme's nested divs, as `"<name> <code> <room...>"`. Both
//! locations are positional, so the paths below are plain child indices over
//! the parsed tree. Any row where a step is missing (header rows, separator
//! rows, notices) is skipped and the pass continues; per-row damage is
//! normal and must never abort extraction.

use crate::config::options::ExtractOptions;
use crate::core::markup::Node;

/// Period cell: second cell of the row, bare text inside.
const PERIOD_PATH: &[usize] = &[1, 0];
/// Subject text: fourth cell, second child of four nested wrappers, then the
/// leaf's text.
const SUBJECT_PATH: &[usize] = &[3, 1, 1, 1, 1, 0];

/// One timetable row that matched the valid-period filter. Borrows the
/// parsed tree; `index` is the row's position in the table body and is kept
/// for traceability only.
#[derive(Clone, Debug)]
pub struct PeriodRow<'a> {
    pub index: usize,
    pub label: String,
    pub node: &'a Node,
}

/// Slice the timetable body out of a full saved page: the first
/// `<table class=timetable>` block's `<tbody>` inner markup.
/// Case-insensitive, tolerant of quoting style. None when the page doesn't
/// carry the table (wrong page saved, layout change).
pub fn table_body(doc: &str) -> Option<&str> {
    let lower = doc.to_ascii_lowercase();

    let mut from = 0usize;
    let table_at = loop {
        let t = lower[from..].find("<table")? + from;
        let open_end = lower[t..].find('>')? + t;
        let opener = &lower[t..open_end];
        if opener.contains("class=\"timetable")
            || opener.contains("class='timetable")
            || opener.contains("class=timetable")
        {
            break open_end + 1;
        }
        from = open_end + 1;
    };

    let tbody = lower[table_at..].find("<tbody")? + table_at;
    let inner_start = lower[tbody..].find('>')? + tbody + 1;
    let inner_end = lower[inner_start..].find("</tbody>")? + inner_start;
    Some(&doc[inner_start..inner_end])
}

/// Walk the table body's rows in document order and keep those whose period
/// label is in `valid`. Rows where the label path is broken are skipped;
/// duplicate labels are kept as-is (the page is the authority on what
/// repeats).
pub fn select_rows<'a>(body: &'a [Node], valid: &[String]) -> Vec<PeriodRow<'a>> {
    let mut rows = Vec::new();
    for (index, node) in body.iter().enumerate() {
        let label = match node.descend(PERIOD_PATH).and_then(Node::text) {
            Some(label) => label,
            None => continue, // header/separator row, or not a row at all
        };
        if valid.iter().any(|v| v == label) {
            rows.push(PeriodRow { index, label: s!(label), node });
        }
    }
    rows
}

/// Subject name for one selected row: the leading token of the detail cell's
/// deep text, run through the abbreviation rules. None when the detail cell
/// doesn't have the expected shape; the row just drops out of the sentence.
pub fn subject_of(row: &PeriodRow<'_>, rules: &[(String, String)]) -> Option<String> {
    let raw = row.node.descend(SUBJECT_PATH)?.text()?;
    let token = raw.split_whitespace().next()?;
    Some(normalize_subject(token, rules))
}

/// First rule whose fragment occurs anywhere in the token replaces the whole
/// token; the rest are not consulted. Canonical names satisfy their own
/// fragment, so re-running the rules is a fixed point.
fn normalize_subject(token: &str, rules: &[(String, String)]) -> String {
    for (fragment, canonical) in rules {
        if token.contains(fragment.as_str()) {
            return canonical.clone();
        }
    }
    s!(token)
}

/// Full extraction pass: selected rows' subjects, in document order.
pub fn subjects(body: &[Node], opts: &ExtractOptions) -> Vec<String> {
    select_rows(body, &opts.periods)
        .iter()
        .filter_map(|row| subject_of(row, &opts.abbreviations))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::parse_fragment;

    fn labels(periods: &[&str]) -> Vec<String> {
        periods.iter().map(|p| s!(*p)).collect()
    }

    // Minimal rows that satisfy the fixed paths. The detail cell mirrors the
    // portal's wrapper nesting: icon, then lesson block, each level keeping
    // the subject branch as its second child.
    fn row(label: &str, lesson: &str) -> String {
        format!(
            "<tr><td>08:50</td><td>{label}</td><td>B12</td>\
             <td><img src=i.png><div><span>7X</span><div><em>-</em><div>\
             <b>-</b><span>{lesson}</span></div></div></div></td></tr>"
        )
    }

    #[test]
    fn selects_rows_in_document_order() {
        let html = [row("2", "Science 201"), row("1", "Math 101"), row("4", "English 401")].concat();
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["1", "2", "4"]));
        let found: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(found, ["2", "1", "4"]);
        assert_eq!(rows[1].index, 1);
    }

    #[test]
    fn rows_outside_valid_set_are_dropped() {
        let html = [row("1", "Math 101"), row("5", "Chemistry 501")].concat();
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["1", "2", "3", "4"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].label, "1");
    }

    #[test]
    fn empty_valid_set_selects_nothing() {
        let html = row("1", "Math 101");
        let body = parse_fragment(&html).unwrap();
        assert!(select_rows(&body, &[]).is_empty());
    }

    #[test]
    fn duplicate_labels_are_both_kept() {
        let html = [row("2", "Science 201"), row("2", "Drama 210")].concat();
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["2"]));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn broken_label_path_skips_only_that_row() {
        // one-cell separator row, then a normal one
        let html = [s!("<tr><td colspan=4>Lunch</td></tr>"), row("3", "Psych 301")].concat();
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["3"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].index, 1);
    }

    #[test]
    fn subject_is_first_token_of_deep_text() {
        let html = row("1", "Math 101 Rm4");
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["1"]));
        assert_eq!(subject_of(&rows[0], &[]).as_deref(), Some("Math"));
    }

    #[test]
    fn abbreviation_rule_rewrites_whole_token() {
        let opts = ExtractOptions::default();
        let html = row("3", "Psych2U 301");
        let body = parse_fragment(&html).unwrap();
        let rows = select_rows(&body, &labels(&["3"]));
        assert_eq!(subject_of(&rows[0], &opts.abbreviations).as_deref(), Some("Psychology"));
    }

    #[test]
    fn normalization_is_idempotent() {
        let opts = ExtractOptions::default();
        let once = normalize_subject("Psych", &opts.abbreviations);
        let twice = normalize_subject(&once, &opts.abbreviations);
        assert_eq!(once, twice);
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = vec![(s!("Psych"), s!("Psychology")), (s!("Psy"), s!("Psychiatry"))];
        assert_eq!(normalize_subject("Psych101", &rules), "Psychology");
    }

    #[test]
    fn missing_subject_cell_yields_none() {
        // valid period cell but a flat detail cell
        let html = "<tr><td>08:50</td><td>1</td><td>B12</td><td>Math 101</td></tr>";
        let body = parse_fragment(html).unwrap();
        let rows = select_rows(&body, &labels(&["1"]));
        assert_eq!(rows.len(), 1);
        assert_eq!(subject_of(&rows[0], &[]), None);
    }

    #[test]
    fn subjects_composes_selection_and_extraction() {
        let opts = ExtractOptions::default();
        let html = [
            row("1", "Math 101"),
            s!("<tr><td>recess</td></tr>"),
            row("5", "Chemistry 501"),
            row("3", "Psych 301"),
        ]
        .concat();
        let body = parse_fragment(&html).unwrap();
        assert_eq!(subjects(&body, &opts), vec![s!("Math"), s!("Psychology")]);
    }

    #[test]
    fn finds_tbody_in_full_page() {
        let page = format!(
            "<html><body><table class=\"timetable striped\">\
             <thead><tr><th>Time</th><th>Period</th></tr></thead>\
             <tbody>{}</tbody></table></body></html>",
            row("1", "Math 101")
        );
        let inner = table_body(&page).expect("tbody");
        assert!(inner.contains("Math 101"));
        assert!(!inner.contains("thead"));
    }

    #[test]
    fn table_body_skips_unrelated_tables() {
        let page = format!(
            "<table class=nav><tbody><tr><td>menu</td></tr></tbody></table>\
             <TABLE CLASS=TIMETABLE><TBODY>{}</TBODY></TABLE>",
            row("1", "Math 101")
        );
        let inner = table_body(&page).expect("tbody");
        assert!(inner.contains("Math 101"));
        assert!(!inner.contains("menu"));
    }

    #[test]
    fn table_body_absent_when_class_missing() {
        assert_eq!(table_body("<table><tbody><tr></tr></tbody></table>"), None);
        assert_eq!(table_body("<table class=timetable><tr></tr></table>"), None);
    }
}
