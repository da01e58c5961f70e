// src/runner.rs
use std::error::Error;
use std::fs;
use std::io::Read;
use std::path::PathBuf;

use crate::config::options::ExtractOptions;
use crate::core::markup;
use crate::sentence;
use crate::specs::timetable;

pub struct Params {
    /// Saved portal page to read. None reads stdin.
    pub input: Option<PathBuf>,
    pub extract: ExtractOptions,
}

impl Params {
    pub fn new() -> Self {
        Self {
            input: None,
            extract: ExtractOptions::default(),
        }
    }
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

/// Full pipeline over one raw document: locate the timetable body, parse it,
/// extract subjects, compose the reply. Accepts either a whole saved page or
/// an already-sliced tbody fragment (anything without the table landmarks is
/// treated as a fragment).
pub fn extract_sentence(doc: &str, opts: &ExtractOptions) -> Result<String, Box<dyn Error>> {
    let fragment = timetable::table_body(doc).unwrap_or(doc);
    let body = markup::parse_fragment(fragment)?;
    let subjects = timetable::subjects(&body, opts);
    logf!(
        "extracted {} subject(s) from {} table-body node(s)",
        subjects.len(),
        body.len()
    );
    Ok(sentence::compose(&subjects))
}

/// Top-level runner: read the document named by `params` and run the
/// pipeline on it.
pub fn run(params: &Params) -> Result<String, Box<dyn Error>> {
    let doc = match &params.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    extract_sentence(&doc, &params.extract)
}
