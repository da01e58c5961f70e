// src/config/options.rs
use super::consts::{DEFAULT_ABBREVIATIONS, DEFAULT_PERIODS};

/// Extraction configuration, passed explicitly into the timetable spec so
/// callers (and tests) can run with arbitrary label sets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Period labels that count as still to come. A row is kept only when
    /// its period cell matches one of these exactly.
    pub periods: Vec<String>,
    /// Ordered `fragment → canonical` subject rewrites; the first fragment
    /// found anywhere in a subject token replaces the whole token.
    pub abbreviations: Vec<(String, String)>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            periods: DEFAULT_PERIODS.iter().map(|p| s!(*p)).collect(),
            abbreviations: DEFAULT_ABBREVIATIONS
                .iter()
                .map(|(fragment, canonical)| (s!(*fragment), s!(*canonical)))
                .collect(),
        }
    }
}
