use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{
    character_classes::{
        PATH_NOT_PCT_ENCODED, QUERY_OR_FRAGMENT_NOT_PCT_ENCODED, REG_NAME_NOT_PCT_ENCODED,
        USER_INFO_NOT_PCT_ENCODED,
    },
    component_type::ComponentType,
};

/// One row of the grammar registry.
pub(crate) struct Grammar {
    /// The whole normalized component string must match this.
    pub component: Regex,

    /// Applied to a complete URI string; capture group 1 is the raw component.
    pub uri: Regex,

    /// Lowercase the whole string.
    pub normalize_case: bool,

    /// Uppercase the hex digits of percent triplets.
    pub normalize_entity_case: bool,

    /// Replace triplets which encode unreserved characters by the characters.
    pub decode_unreserved: bool,

    /// Characters which may stay unencoded; `None` disables encoding.
    pub encode_unsafe: Option<&'static Lazy<HashSet<char>>>,
}

fn regex(pattern: &str) -> Regex {
    match Regex::new(pattern) {
        Ok(regex) => regex,
        Err(error) => panic!("grammar pattern {:?} must compile: {}", pattern, error),
    }
}

static GRAMMARS: Lazy<[Grammar; 7]> = Lazy::new(|| {
    [
        Grammar {
            component: regex(r"^[a-z][+\-.0-9a-z]*$"),
            uri: regex(r"^([^/?#:]*):"),
            normalize_case: true,
            normalize_entity_case: false,
            decode_unreserved: false,
            encode_unsafe: None,
        },
        Grammar {
            component: regex(r"^(?:[!$&'()*+,\-.0-9:;=A-Z_a-z~]|%[0-9A-F]{2})+$"),
            uri: regex(r"^(?:[^/]*:)?//([^@/?#]*)@"),
            normalize_case: false,
            normalize_entity_case: true,
            decode_unreserved: true,
            encode_unsafe: Some(&USER_INFO_NOT_PCT_ENCODED),
        },
        Grammar {
            component: regex(r"^(?:[!$&'()*+,\-.0-9;=A-Z_a-z~]|%[0-9A-F]{2})+$"),
            uri: regex(r"^(?:[^/]*:)?//(?:[^/?#]*@)?(\[[^\]/?#@]*\]|[^:/?#]*)"),
            normalize_case: false,
            normalize_entity_case: true,
            decode_unreserved: true,
            encode_unsafe: Some(&REG_NAME_NOT_PCT_ENCODED),
        },
        Grammar {
            component: regex(r"^[0-9]+$"),
            uri: regex(r"^(?:[^/]*:)?//[^/?#]*:([^@/?#\]]*)(?:[/?#]|$)"),
            normalize_case: false,
            normalize_entity_case: false,
            decode_unreserved: false,
            encode_unsafe: None,
        },
        Grammar {
            component: regex(r"^(?:[!$&'()*+,\-./0-9:;=@A-Z_a-z~]|%[0-9A-F]{2})+$"),
            uri: regex(r"^(?:(?:[^/]*:)?//[^/?#]*|[^/?#]+?:|)([^?#]*)"),
            normalize_case: false,
            normalize_entity_case: true,
            decode_unreserved: true,
            encode_unsafe: Some(&PATH_NOT_PCT_ENCODED),
        },
        Grammar {
            component: regex(r"^(?:[!$&'()*+,\-./0-9:;=?@A-Z_a-z~]|%[0-9A-F]{2})+$"),
            uri: regex(r"^[^#]*?\?([^#]*)"),
            normalize_case: false,
            normalize_entity_case: true,
            decode_unreserved: true,
            encode_unsafe: Some(&QUERY_OR_FRAGMENT_NOT_PCT_ENCODED),
        },
        Grammar {
            component: regex(r"^(?:[!$&'()*+,\-./0-9:;=?@A-Z_a-z~]|%[0-9A-F]{2})+$"),
            uri: regex(r"#(.*)$"),
            normalize_case: false,
            normalize_entity_case: true,
            decode_unreserved: true,
            encode_unsafe: Some(&QUERY_OR_FRAGMENT_NOT_PCT_ENCODED),
        },
    ]
});

/// Runs of triplets which each encode an unreserved character.
pub(crate) static UNRESERVED_TRIPLETS: Lazy<Regex> =
    Lazy::new(|| regex(r"(?i)(?:%(?:2[DE]|3[0-9]|[46][1-9A-F]|5[0-9AF]|7[0-9AE]))+"));

/// Runs of anything shaped like a percent triplet.
pub(crate) static TRIPLETS: Lazy<Regex> = Lazy::new(|| regex(r"(?i)(?:%[0-9A-Z]{2})+"));

/// A single path segment.
pub(crate) static PATH_SEGMENT: Lazy<Regex> =
    Lazy::new(|| regex(r"^(?:[!$&'()*+,\-.0-9:;=@A-Z_a-z~]|%[0-9A-F]{2})*$"));

/// Look up the registry row for a component type.
pub(crate) fn grammar(kind: ComponentType) -> &'static Grammar {
    &GRAMMARS[kind.index()]
}
