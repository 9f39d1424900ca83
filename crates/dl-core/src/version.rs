//! Document version numbers.
//!
//! Spreadsheet documents label their layout with a `Version` cell written
//! either as a plain integer (`1`, `300`) or as dotted / dashed semantic
//! parts (`2-0-0`, `3.0.0`).  Both spellings collapse to one integer so
//! callers can compare against constants such as `300`.

/// Parse a version label into its integer form.
///
/// `"3-0-0"` and `"3.0.0"` become `300`; `"1"` stays `1`.  Each dotted part
/// must be a single digit after the first.  Returns `None` for anything
/// else.
pub fn parse_version(label: &str) -> Option<u32> {
    let label = label.trim();
    if label.is_empty() {
        return None;
    }
    if let Ok(n) = label.parse::<u32>() {
        return Some(n);
    }

    let parts: Vec<&str> = label.split(['-', '.']).collect();
    if parts.len() != 3 {
        return None;
    }
    let major: u32 = parts[0].parse().ok()?;
    let minor: u32 = parts[1].parse().ok()?;
    let patch: u32 = parts[2].parse().ok()?;
    if minor > 9 || patch > 9 {
        return None;
    }
    Some(major * 100 + minor * 10 + patch)
}
