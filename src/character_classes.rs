#![allow(clippy::module_name_repetitions)]

use once_cell::sync::Lazy;
use std::collections::HashSet;

// These are the various character sets defined in RFC 3986.  Each of the
// `*_NOT_PCT_ENCODED` sets is what a component of that type may carry
// literally; anything else must be percent-encoded.  The `%` character itself
// is part of every such set so that existing percent triplets survive
// encoding and are checked by the component grammar instead.

pub static ALPHA: Lazy<HashSet<char>> = Lazy::new(|| ('a'..='z').chain('A'..='Z').collect());

pub static DIGIT: Lazy<HashSet<char>> = Lazy::new(|| ('0'..='9').collect());

pub static HEXDIG: Lazy<HashSet<char>> = Lazy::new(|| {
    DIGIT
        .iter()
        .copied()
        .chain('A'..='F')
        .chain('a'..='f')
        .collect()
});

pub static UNRESERVED: Lazy<HashSet<char>> = Lazy::new(|| {
    ALPHA
        .iter()
        .chain(DIGIT.iter())
        .chain(['-', '.', '_', '~'].iter())
        .copied()
        .collect()
});

pub static SUB_DELIMS: Lazy<HashSet<char>> = Lazy::new(|| {
    ['!', '$', '&', '\'', '(', ')', '*', '+', ',', ';', '=']
        .iter()
        .copied()
        .collect()
});

pub static REG_NAME_NOT_PCT_ENCODED: Lazy<HashSet<char>> = Lazy::new(|| {
    UNRESERVED
        .iter()
        .chain(SUB_DELIMS.iter())
        .chain(['%'].iter())
        .copied()
        .collect()
});

pub static USER_INFO_NOT_PCT_ENCODED: Lazy<HashSet<char>> = Lazy::new(|| {
    REG_NAME_NOT_PCT_ENCODED
        .iter()
        .chain([':'].iter())
        .copied()
        .collect()
});

pub static PATH_NOT_PCT_ENCODED: Lazy<HashSet<char>> = Lazy::new(|| {
    USER_INFO_NOT_PCT_ENCODED
        .iter()
        .chain(['@', '/'].iter())
        .copied()
        .collect()
});

pub static QUERY_OR_FRAGMENT_NOT_PCT_ENCODED: Lazy<HashSet<char>> = Lazy::new(|| {
    PATH_NOT_PCT_ENCODED
        .iter()
        .chain(['?'].iter())
        .copied()
        .collect()
});

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn unreserved_is_ascii_alphanumeric_and_marks() {
        for byte in 0_u8..=0x7F {
            let c = char::from(byte);
            assert_eq!(
                c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~'),
                UNRESERVED.contains(&c),
                "{:02X}",
                byte
            );
        }
        assert_eq!(66, UNRESERVED.len());
    }

    #[test]
    fn sets_nest() {
        assert!(REG_NAME_NOT_PCT_ENCODED.is_subset(&USER_INFO_NOT_PCT_ENCODED));
        assert!(USER_INFO_NOT_PCT_ENCODED.is_subset(&PATH_NOT_PCT_ENCODED));
        assert!(PATH_NOT_PCT_ENCODED.is_subset(&QUERY_OR_FRAGMENT_NOT_PCT_ENCODED));
        assert!(!REG_NAME_NOT_PCT_ENCODED.contains(&':'));
        assert!(!PATH_NOT_PCT_ENCODED.contains(&'?'));
        assert!(!QUERY_OR_FRAGMENT_NOT_PCT_ENCODED.contains(&'#'));
        assert_eq!(22, HEXDIG.len());
    }
}
