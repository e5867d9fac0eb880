//! Integer range lists such as `"0-3,6,10-12"`.

use std::collections::BTreeSet;

/// Parse a comma separated list of integers and inclusive ranges.
///
/// Whitespace around items is ignored. Empty input yields an empty set.
pub fn parse_ranges(s: &str) -> Result<BTreeSet<i32>, String> {
    let mut out = BTreeSet::new();

    for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        // A leading '-' belongs to the first number, not to the range.
        let split = item
            .char_indices()
            .skip(1)
            .find(|&(_, c)| c == '-')
            .map(|(i, _)| i);

        match split {
            Some(i) => {
                let start = parse_int(&item[..i])?;
                let end = parse_int(&item[i + 1..])?;
                if start > end {
                    return Err(format!("range '{}' is reversed", item));
                }
                out.extend(start..=end);
            }
            None => {
                out.insert(parse_int(item)?);
            }
        }
    }

    Ok(out)
}

fn parse_int(s: &str) -> Result<i32, String> {
    s.trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid number '{}': {}", s.trim(), e))
}

/// Render integers back into the compact range notation, collapsing runs.
pub fn format_ranges<I>(values: I) -> String
where
    I: IntoIterator<Item = i32>,
{
    let sorted: BTreeSet<i32> = values.into_iter().collect();
    let mut parts = Vec::new();
    let mut iter = sorted.into_iter().peekable();

    while let Some(start) = iter.next() {
        let mut end = start;
        while iter.peek() == Some(&(end + 1)) {
            end += 1;
            iter.next();
        }
        if start == end {
            parts.push(start.to_string());
        } else {
            parts.push(format!("{}-{}", start, end));
        }
    }

    parts.join(",")
}
