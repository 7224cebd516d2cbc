//! Utility functions for string processing.

/// Normalize a string for matching: lowercase and collapse whitespace.
///
/// - "  Grade 10   A " → "grade 10 a"
/// - "Life\tSciences" → "life sciences"
///
/// Case folding and whitespace are the only normalization applied. Accents and
/// other scripts are compared as written.
pub fn normalize(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True for a non-empty string made only of ASCII digits.
pub fn is_all_digits(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Case-insensitive containment. `needle` must already be normalized.
#[inline]
pub fn contains_normalized(haystack: &str, needle: &str) -> bool {
    normalize(haystack).contains(needle)
}

/// Compare two strings with digit runs ordered by numeric value.
///
/// Used for line dropdowns, where "2" must come before "10".
pub fn natural_cmp(a: &str, b: &str) -> std::cmp::Ordering {
    use std::cmp::Ordering;

    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let run_a = take_digits(&mut a_chars);
                let run_b = take_digits(&mut b_chars);
                let trimmed_a = run_a.trim_start_matches('0');
                let trimmed_b = run_b.trim_start_matches('0');
                let ord = trimmed_a
                    .len()
                    .cmp(&trimmed_b.len())
                    .then_with(|| trimmed_a.cmp(trimmed_b));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            (Some(ca), Some(cb)) => {
                let ord = ca
                    .to_lowercase()
                    .cmp(cb.to_lowercase())
                    .then_with(|| ca.cmp(&cb));
                if ord != Ordering::Equal {
                    return ord;
                }
                a_chars.next();
                b_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied().filter(char::is_ascii_digit) {
        run.push(c);
        chars.next();
    }
    run
}
