//! Classification of raw menu input. Stateless; callers decide what each
//! entry number means.

/// Result of classifying one raw menu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// An integer inside the menu range.
    Entry(i64),
    /// Not an integer at all; the caller reprompts without side effects.
    Invalid,
    /// An integer outside the menu range; the caller reports and continues.
    Unrecognized,
}

/// Classify `line` against a `1..=max` menu.
#[must_use]
pub fn route(line: &str, max: i64) -> MenuChoice {
    match line.trim().parse::<i64>() {
        Err(_) => MenuChoice::Invalid,
        Ok(n) if (1..=max).contains(&n) => MenuChoice::Entry(n),
        Ok(_) => MenuChoice::Unrecognized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_integers_are_invalid() {
        assert_eq!(route("abc", 3), MenuChoice::Invalid);
        assert_eq!(route("", 3), MenuChoice::Invalid);
        assert_eq!(route("1.5", 3), MenuChoice::Invalid);
    }

    #[test]
    fn in_range_integers_are_entries() {
        assert_eq!(route("1", 3), MenuChoice::Entry(1));
        assert_eq!(route(" 2 ", 3), MenuChoice::Entry(2));
        assert_eq!(route("9", 9), MenuChoice::Entry(9));
    }

    #[test]
    fn out_of_range_integers_are_unrecognized() {
        assert_eq!(route("0", 3), MenuChoice::Unrecognized);
        assert_eq!(route("4", 3), MenuChoice::Unrecognized);
        assert_eq!(route("-7", 9), MenuChoice::Unrecognized);
    }
}
