//! Parses `loadorder.txt` (spec §6): one plugin name per line, later lines
//! loading later. Lines are plugin names, not archive paths — the caller
//! appends `.bsa` and checks existence under the data root.

/// Non-empty, non-comment lines, in file order (spec §6 "read each line").
pub fn parse_load_order(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
