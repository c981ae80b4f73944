//! Header cleanup shared by all readers.

/// Trims, strips a UTF-8 BOM and collapses inner whitespace.
pub fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Normalizes a header row and makes every header unique.
///
/// Blank headers become `Unnamed: <index>`; repeats get `.1`, `.2`, ...
/// suffixes in order of appearance.
pub fn unique_headers<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut headers: Vec<String> = Vec::new();
    for (idx, value) in raw.into_iter().enumerate() {
        let mut header = normalize_header(value.as_ref());
        if header.is_empty() {
            header = format!("Unnamed: {idx}");
        }
        if headers.contains(&header) {
            let base = header.clone();
            let mut suffix = 1usize;
            while headers.contains(&header) {
                header = format!("{base}.{suffix}");
                suffix += 1;
            }
        }
        headers.push(header);
    }
    headers
}
