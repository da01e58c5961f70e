// src/config/consts.rs

// Extraction defaults: the four period slots that can still be "today",
// and the label rewrites the portal's cells need.
pub const DEFAULT_PERIODS: &[&str] = &["1", "2", "3", "4"];
pub const DEFAULT_ABBREVIATIONS: &[(&str, &str)] = &[("Psych", "Psychology")];

// Local files
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = ".store/nextclass.log";
