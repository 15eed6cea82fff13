/// Inclusive `(min, max)` bounds; `None` is open.
pub type Bounds = (Option<i64>, Option<i64>);

/// Parse a user-typed numeric range.
///
/// ```text
/// "4"   -> (4, 4)        "2-4" -> (2, 4)
/// "4+"  -> (4, ..)       ">=4" -> (4, ..)     ">4" -> (5, ..)
/// "<=4" -> (.., 4)       "<4"  -> (.., 3)     ""   -> (.., ..)
/// ```
///
/// Returns `None` for anything else.
pub fn parse_range(input: &str) -> Option<Bounds> {
    let val: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if val.is_empty() {
        return Some((None, None));
    }

    let int = |s: &str| s.parse::<i64>().ok();

    if let Some((lo, hi)) = val.split_once('-').filter(|_| !val.starts_with('-')) {
        return Some((Some(int(lo)?), Some(int(hi)?)));
    }
    if let Some(lo) = val.strip_suffix('+') {
        return Some((Some(int(lo)?), None));
    }
    if let Some(lo) = val.strip_prefix(">=") {
        return Some((Some(int(lo)?), None));
    }
    if let Some(lo) = val.strip_prefix('>') {
        return Some((Some(int(lo)?.checked_add(1)?), None));
    }
    if let Some(hi) = val.strip_prefix("<=") {
        return Some((None, Some(int(hi)?)));
    }
    if let Some(hi) = val.strip_prefix('<') {
        return Some((None, Some(int(hi)?.checked_sub(1)?)));
    }

    let exact = int(&val)?;
    Some((Some(exact), Some(exact)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_range_forms() {
        assert_eq!(parse_range("4"), Some((Some(4), Some(4))));
        assert_eq!(parse_range("2-4"), Some((Some(2), Some(4))));
        assert_eq!(parse_range(" 2 - 4 "), Some((Some(2), Some(4))));
        assert_eq!(parse_range("4+"), Some((Some(4), None)));
        assert_eq!(parse_range(">=4"), Some((Some(4), None)));
        assert_eq!(parse_range(">4"), Some((Some(5), None)));
        assert_eq!(parse_range("<=4"), Some((None, Some(4))));
        assert_eq!(parse_range("<4"), Some((None, Some(3))));
        assert_eq!(parse_range(""), Some((None, None)));
    }

    #[test]
    fn test_parse_range_rejects_garbage() {
        assert_eq!(parse_range("invalid"), None);
        assert_eq!(parse_range("1-2-3"), None);
        assert_eq!(parse_range("2-"), None);
        assert_eq!(parse_range(">x"), None);
    }
}
