//! Filename range parsing.
//!
//! Source recordings may declare the numbers they contain in the filename,
//! e.g. `numbers_0-19.mp3`, `20_39.wav`, `40~59.m4a` or `80to99.mp3`. The
//! parser extracts that claim; filenames without a recognizable token are the
//! normal "undeclared" case, not an error.

/// Declared numeric content of a source recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberRange {
    /// The filename declares an inclusive range of spoken numbers.
    Declared {
        /// Lowest number in the range.
        low: u32,
        /// Highest number in the range.
        high: u32,
    },
    /// No recognizable range token in the filename.
    Undeclared,
}

impl NumberRange {
    /// Number of labels this range accounts for, if declared.
    #[must_use]
    pub fn expected_count(self) -> Option<u32> {
        match self {
            Self::Declared { low, high } => Some(high - low + 1),
            Self::Undeclared => None,
        }
    }

    /// True if the filename declared a range.
    #[must_use]
    pub fn is_declared(self) -> bool {
        matches!(self, Self::Declared { .. })
    }
}

/// Separator characters accepted between the two numbers.
const SEPARATORS: &[char] = &['-', '_', '~', '\u{2013}', '\u{2014}'];

/// Parse an optional inclusive number range from a filename stem.
///
/// Token shapes are tried in priority order: separator forms first
/// (`0-19`, `20_39`, `40~59`, en/em dashes), then the natural-language
/// `80to99` form (case-insensitive). The first match in scan order wins,
/// and out-of-order captures are swapped so `low <= high`.
#[must_use]
pub fn parse_range_from_stem(stem: &str) -> NumberRange {
    if let Some((a, b)) = find_pair(stem, match_separator) {
        return ordered(a, b);
    }
    if let Some((a, b)) = find_pair(stem, match_to_keyword) {
        return ordered(a, b);
    }
    NumberRange::Undeclared
}

fn ordered(a: u32, b: u32) -> NumberRange {
    NumberRange::Declared {
        low: a.min(b),
        high: a.max(b),
    }
}

/// Scan for the first `<number> <sep> <number>` occurrence, where `sep` is
/// recognized by `matcher` (returning the byte length it consumed).
fn find_pair(stem: &str, matcher: fn(&str) -> Option<usize>) -> Option<(u32, u32)> {
    let bytes = stem.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        // Candidate first numbers start at a digit that is not preceded by one.
        if !bytes[i].is_ascii_digit() || (i > 0 && bytes[i - 1].is_ascii_digit()) {
            i += 1;
            continue;
        }
        if let Some(pair) = parse_pair_at(stem, i, matcher) {
            return Some(pair);
        }
        i += 1;
    }
    None
}

fn parse_pair_at(stem: &str, start: usize, matcher: fn(&str) -> Option<usize>) -> Option<(u32, u32)> {
    let (a, mut pos) = take_number(stem, start)?;
    pos += take_spaces(&stem[pos..]);
    pos += matcher(&stem[pos..])?;
    pos += take_spaces(&stem[pos..]);
    let (b, _) = take_number(stem, pos)?;
    Some((a, b))
}

/// Parse a digit run starting at `start`; returns the value and the byte
/// position after it. Runs that overflow `u32` are rejected.
fn take_number(stem: &str, start: usize) -> Option<(u32, usize)> {
    let rest = &stem.as_bytes()[start..];
    let len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if len == 0 {
        return None;
    }
    let value: u32 = stem[start..start + len].parse().ok()?;
    Some((value, start + len))
}

fn take_spaces(s: &str) -> usize {
    s.chars()
        .take_while(|c| c.is_whitespace())
        .map(char::len_utf8)
        .sum()
}

fn match_separator(s: &str) -> Option<usize> {
    let c = s.chars().next()?;
    SEPARATORS.contains(&c).then(|| c.len_utf8())
}

fn match_to_keyword(s: &str) -> Option<usize> {
    s.get(..2)
        .filter(|prefix| prefix.eq_ignore_ascii_case("to"))
        .map(str::len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(low: u32, high: u32) -> NumberRange {
        NumberRange::Declared { low, high }
    }

    #[test]
    fn parses_dash_separated_range() {
        assert_eq!(parse_range_from_stem("numbers_0-19"), declared(0, 19));
        assert_eq!(parse_range_from_stem("0-19"), declared(0, 19));
    }

    #[test]
    fn parses_underscore_tilde_and_unicode_dashes() {
        assert_eq!(parse_range_from_stem("20_39"), declared(20, 39));
        assert_eq!(parse_range_from_stem("40~59"), declared(40, 59));
        assert_eq!(parse_range_from_stem("40\u{2013}59"), declared(40, 59));
        assert_eq!(parse_range_from_stem("60\u{2014}79"), declared(60, 79));
    }

    #[test]
    fn parses_to_keyword_case_insensitively() {
        assert_eq!(parse_range_from_stem("80to99"), declared(80, 99));
        assert_eq!(parse_range_from_stem("80TO99"), declared(80, 99));
        assert_eq!(parse_range_from_stem("80 To 99"), declared(80, 99));
    }

    #[test]
    fn swaps_out_of_order_captures() {
        assert_eq!(parse_range_from_stem("19-0"), declared(0, 19));
        assert_eq!(parse_range_from_stem("99to80"), declared(80, 99));
    }

    #[test]
    fn allows_whitespace_around_separator() {
        assert_eq!(parse_range_from_stem("0 - 19"), declared(0, 19));
        assert_eq!(parse_range_from_stem("20 _ 39"), declared(20, 39));
    }

    #[test]
    fn separator_form_wins_over_to_form() {
        // "5to9" appears first, but the dash pattern has priority.
        assert_eq!(parse_range_from_stem("5to9_then_10-14"), declared(10, 14));
    }

    #[test]
    fn no_token_is_undeclared() {
        assert_eq!(parse_range_from_stem("extra_numbers"), NumberRange::Undeclared);
        assert_eq!(parse_range_from_stem("take2"), NumberRange::Undeclared);
        assert_eq!(parse_range_from_stem(""), NumberRange::Undeclared);
        assert_eq!(parse_range_from_stem("a-b"), NumberRange::Undeclared);
    }

    #[test]
    fn multibyte_characters_after_a_digit_are_harmless() {
        assert_eq!(parse_range_from_stem("5\u{2026}9"), NumberRange::Undeclared);
        assert_eq!(parse_range_from_stem("5\u{e9}9"), NumberRange::Undeclared);
    }

    #[test]
    fn overflowing_numbers_do_not_panic() {
        assert_eq!(
            parse_range_from_stem("99999999999999999999-5"),
            NumberRange::Undeclared
        );
    }

    #[test]
    fn expected_count_is_inclusive() {
        assert_eq!(declared(0, 19).expected_count(), Some(20));
        assert_eq!(declared(7, 7).expected_count(), Some(1));
        assert_eq!(NumberRange::Undeclared.expected_count(), None);
    }
}
