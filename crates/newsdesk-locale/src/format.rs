//! Go-style message formatting.
//!
//! Translation tables are shared with other tooling that writes messages with
//! printf verbs, e.g. `"%d minutes ago"` or `"Feed %q"`. Only the verbs that
//! appear in message tables are understood:
//!
//! | Verb | Output |
//! |------|--------|
//! | `%s`, `%v`, `%d` | the argument's `Display` output |
//! | `%q` | the argument as a double-quoted string |
//! | `%%` | a literal `%` |
//!
//! A verb without a matching argument renders as `%!d(MISSING)`. Surplus
//! arguments are ignored so that a translation may drop a value the source
//! language needed.

use std::fmt::Display;

/// Formats `format` with `args`.
///
/// # Example
///
/// ```rust
/// use newsdesk_locale::sprintf;
///
/// assert_eq!(sprintf("%s new entries in %s", &["3", "Rust"]), "3 new entries in Rust");
/// assert_eq!(sprintf("100%%", &[] as &[&str]), "100%");
/// ```
pub fn sprintf<A: Display>(format: &str, args: &[A]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = args.iter();
    let mut chars = format.chars();

    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('%') => out.push('%'),
            Some(verb @ ('s' | 'v' | 'd')) => match args.next() {
                Some(arg) => out.push_str(&arg.to_string()),
                None => out.push_str(&format!("%!{}(MISSING)", verb)),
            },
            Some('q') => match args.next() {
                Some(arg) => out.push_str(&format!("{:?}", arg.to_string())),
                None => out.push_str("%!q(MISSING)"),
            },
            Some(other) => {
                out.push('%');
                out.push(other);
            }
            None => out.push_str("%!(NOVERB)"),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_ARGS: &[&str] = &[];

    #[test]
    fn test_plain_text_is_unchanged() {
        assert_eq!(sprintf("Unread entries", NO_ARGS), "Unread entries");
    }

    #[test]
    fn test_string_and_number_verbs() {
        assert_eq!(sprintf("%s has %d items", &["Inbox", "4"]), "Inbox has 4 items");
        assert_eq!(sprintf("%d minutes ago", &[12]), "12 minutes ago");
    }

    #[test]
    fn test_quoted_verb() {
        assert_eq!(sprintf("Feed %q", &["Rust Blog"]), "Feed \"Rust Blog\"");
    }

    #[test]
    fn test_escaped_percent() {
        assert_eq!(sprintf("%d%% done", &[50]), "50% done");
    }

    #[test]
    fn test_missing_argument_is_marked() {
        assert_eq!(sprintf("%d minutes ago", NO_ARGS), "%!d(MISSING) minutes ago");
    }

    #[test]
    fn test_extra_arguments_are_ignored() {
        assert_eq!(sprintf("Yesterday", &[1, 2]), "Yesterday");
    }

    #[test]
    fn test_unknown_verb_passes_through() {
        assert_eq!(sprintf("%x and %", &[1]), "%x and %!(NOVERB)");
    }

    #[test]
    fn test_multibyte_text_around_verbs() {
        assert_eq!(sprintf("il y a %d jours …", &[3]), "il y a 3 jours …");
    }
}
