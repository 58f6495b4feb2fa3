//! Copyright year bookkeeping for regenerated documents.

use std::io::ErrorKind;
use std::path::Path;
use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;

static COPYRIGHT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Copyright \(c\) (\d{4})(?:, (\d{4}))?").expect("copyright pattern is valid")
});

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Year text for a document: the first year found in `existing` extended to `current`,
/// or just `current`.
pub fn year_range(existing: Option<&str>, current: i32) -> String {
    let first_year = existing
        .and_then(|text| COPYRIGHT.captures(text))
        .and_then(|captures| captures[1].parse::<i32>().ok());

    match first_year {
        Some(first) if first != current => format!("{first}, {current}"),
        _ => current.to_string(),
    }
}

/// Year text for the document at `path`, reading the previous version if one exists.
pub fn year_range_for(path: &Path, current: i32) -> std::io::Result<String> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(year_range(Some(&String::from_utf8_lossy(&bytes)), current)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(year_range(None, current)),
        Err(e) => Err(e),
    }
}
