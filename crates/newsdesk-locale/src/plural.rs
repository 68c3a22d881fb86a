//! Plural form selection.
//!
//! Message tables store plural messages as arrays; [`plural_form`] picks the
//! array index for a count. The rules follow the CLDR cardinal categories for
//! each language, collapsed to the number of forms the tables carry.

/// Returns the index of the plural form to use for `n` in `language`.
///
/// Languages without a dedicated rule use the English rule: form 0 for
/// exactly one, form 1 otherwise.
///
/// # Example
///
/// ```rust
/// use newsdesk_locale::plural_form;
///
/// assert_eq!(plural_form("en_US", 1), 0);
/// assert_eq!(plural_form("en_US", 0), 1);
/// assert_eq!(plural_form("ru_RU", 22), 1);
/// assert_eq!(plural_form("ru_RU", 25), 2);
/// ```
pub fn plural_form(language: &str, n: i64) -> usize {
    match language {
        "ar_SA" => match n {
            0 => 0,
            1 => 1,
            2 => 2,
            _ if (3..=10).contains(&(n % 100)) => 3,
            _ if n % 100 >= 11 => 4,
            _ => 5,
        },
        "cs_CZ" => match n {
            1 => 0,
            2..=4 => 1,
            _ => 2,
        },
        "id_ID" | "ja_JP" | "tr_TR" | "zh_CN" | "zh_TW" => 0,
        "pl_PL" => {
            if n == 1 {
                0
            } else if is_few(n) {
                1
            } else {
                2
            }
        }
        "fr_FR" | "pt_BR" => usize::from(n > 1),
        "ru_RU" | "sr_RS" | "uk_UA" => {
            if n % 10 == 1 && n % 100 != 11 {
                0
            } else if is_few(n) {
                1
            } else {
                2
            }
        }
        _ => usize::from(n != 1),
    }
}

/// Slavic "few" category: ends in 2-4, but not 12-14.
fn is_few(n: i64) -> bool {
    (2..=4).contains(&(n % 10)) && !(10..20).contains(&(n % 100))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_english_rule() {
        assert_eq!(plural_form("en_US", 0), 1);
        assert_eq!(plural_form("en_US", 1), 0);
        assert_eq!(plural_form("en_US", 2), 1);
    }

    #[test]
    fn test_unknown_language_uses_english_rule() {
        assert_eq!(plural_form("xx_XX", 1), 0);
        assert_eq!(plural_form("", 7), 1);
    }

    #[test]
    fn test_french_treats_zero_as_singular() {
        assert_eq!(plural_form("fr_FR", 0), 0);
        assert_eq!(plural_form("fr_FR", 1), 0);
        assert_eq!(plural_form("fr_FR", 2), 1);
    }

    #[test]
    fn test_russian_rule() {
        assert_eq!(plural_form("ru_RU", 1), 0);
        assert_eq!(plural_form("ru_RU", 21), 0);
        assert_eq!(plural_form("ru_RU", 11), 2);
        assert_eq!(plural_form("ru_RU", 3), 1);
        assert_eq!(plural_form("ru_RU", 13), 2);
        assert_eq!(plural_form("ru_RU", 104), 1);
        assert_eq!(plural_form("ru_RU", 5), 2);
    }

    #[test]
    fn test_polish_rule() {
        assert_eq!(plural_form("pl_PL", 1), 0);
        assert_eq!(plural_form("pl_PL", 21), 2);
        assert_eq!(plural_form("pl_PL", 22), 1);
        assert_eq!(plural_form("pl_PL", 12), 2);
    }

    #[test]
    fn test_czech_rule() {
        assert_eq!(plural_form("cs_CZ", 1), 0);
        assert_eq!(plural_form("cs_CZ", 4), 1);
        assert_eq!(plural_form("cs_CZ", 5), 2);
    }

    #[test]
    fn test_arabic_rule() {
        assert_eq!(plural_form("ar_SA", 0), 0);
        assert_eq!(plural_form("ar_SA", 2), 2);
        assert_eq!(plural_form("ar_SA", 103), 3);
        assert_eq!(plural_form("ar_SA", 99), 4);
        assert_eq!(plural_form("ar_SA", 100), 5);
    }

    #[test]
    fn test_single_form_languages() {
        for lang in ["ja_JP", "zh_CN", "id_ID"] {
            assert_eq!(plural_form(lang, 1), 0);
            assert_eq!(plural_form(lang, 42), 0);
        }
    }

    proptest! {
        #[test]
        fn prop_form_index_is_bounded(n in 0i64..1_000_000) {
            prop_assert!(plural_form("en_US", n) < 2);
            prop_assert!(plural_form("fr_FR", n) < 2);
            prop_assert!(plural_form("ru_RU", n) < 3);
            prop_assert!(plural_form("pl_PL", n) < 3);
            prop_assert!(plural_form("cs_CZ", n) < 3);
            prop_assert!(plural_form("ar_SA", n) < 6);
        }
    }
}
