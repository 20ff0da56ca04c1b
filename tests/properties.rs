use proptest::prelude::*;
use uri_component::{
    decode_percent_run, encode_char_at, percent_decode, percent_encode, utf8_char_at, utf8_decode,
    Component, ComponentType, KeyValue, Uri,
};

fn component_type() -> impl Strategy<Value = ComponentType> {
    prop::sample::select(ComponentType::ALL.to_vec())
}

// Mostly characters with special meaning somewhere in a URI.
fn raw_text() -> impl Strategy<Value = String> {
    let alphabet = vec![
        'a', 'Z', '0', '9', '-', '.', '_', '~', '%', '/', ':', '@', '?', '#', '[', ']', '!', '$',
        '&', '\'', '(', ')', '*', '+', ',', ';', '=', ' ', 'e', 'F', '2', '7', '\u{e9}',
        '\u{4e2d}', '\u{1f600}',
    ];
    prop::collection::vec(prop::sample::select(alphabet), 0..24)
        .prop_map(|chars| chars.into_iter().collect())
}

fn scheme() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9+.-]{0,7}"
}

fn user() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}",
        "[a-z]{1,8}:[a-z0-9]{1,8}",
        "[a-z]{1,4} [a-z]{1,4}",
    ]
}

fn name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9]{1,16}",
        "[a-z0-9]{1,8}\\.[a-z]{2,4}",
        (0u8..=255, 0u8..=255, 0u8..=255, 0u8..=255)
            .prop_map(|(a, b, c, d)| format!("{}.{}.{}.{}", a, b, c, d)),
        Just("[::1]".to_string()),
        Just("[2001:db8::1]".to_string()),
    ]
}

fn port() -> impl Strategy<Value = String> {
    prop_oneof![Just(String::new()), (1u16..=65535).prop_map(|port| port.to_string())]
}

fn path() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9._~ -]{0,8}", 0..4).prop_map(|segments| {
        segments
            .iter()
            .map(|segment| format!("/{}", segment))
            .collect()
    })
}

fn query_or_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[a-z]{1,8}=[a-z0-9]{1,8}",
        "[a-z]{1,8}=[a-z0-9]{1,8}&[a-z]{1,8}=[a-z0-9/?]{1,8}",
    ]
}

proptest! {
    #[test]
    fn normalization_is_idempotent(kind in component_type(), text in raw_text()) {
        if let Ok(component) = Component::with_string(kind, &text) {
            let again = Component::with_string(kind, component.as_str());
            prop_assert_eq!(Ok(component), again);
        }
    }

    #[test]
    fn failed_assignment_keeps_value(kind in component_type(), text in raw_text()) {
        let mut component = Component::new(kind);
        let before = component.clone();
        if component.set_string(&text).is_err() {
            prop_assert_eq!(before, component);
        }
    }

    #[test]
    fn utf8_decode_accepts_any_text(text in any::<String>()) {
        prop_assert_eq!(Ok(text.clone()), utf8_decode(text.as_bytes()));
    }

    #[test]
    fn utf8_char_at_inverts_decode(text in "\\PC{1,16}", index in 0usize..16) {
        let len = text.chars().count();
        let index = index % len;
        let expected = text.chars().nth(index).map(String::from);
        let bytes = utf8_char_at(&text, index).unwrap();
        prop_assert_eq!(expected.clone(), utf8_decode(&bytes).ok());
        let encoded = encode_char_at(&text, index).unwrap();
        prop_assert_eq!(expected, decode_percent_run(&encoded).ok());
    }

    #[test]
    fn percent_decode_inverts_encode(text in any::<String>()) {
        prop_assert_eq!(Ok(text.clone()), percent_decode(&percent_encode(&text)));
    }

    #[test]
    fn uri_round_trip(
        scheme in scheme(),
        user in user(),
        name in name(),
        port in port(),
        path in path(),
        query in query_or_fragment(),
        fragment in query_or_fragment(),
    ) {
        let mut uri = Uri::new();
        uri.set_scheme(&scheme).unwrap();
        uri.set_user(&user).unwrap();
        uri.set_name(&name).unwrap();
        uri.set_port(&port).unwrap();
        uri.set_path(&path).unwrap();
        uri.set_query(&query).unwrap();
        uri.set_fragment(&fragment).unwrap();
        prop_assert!(uri.is_valid());
        let parsed = Uri::parse(uri.as_str()).unwrap();
        prop_assert_eq!(&uri, &parsed);
        prop_assert_eq!(uri.as_str(), parsed.as_str());
    }

    #[test]
    fn key_value_round_trip(
        pairs in prop::collection::btree_map(
            "[a-z]{1,6}",
            prop::collection::vec("[a-z0-9%]{1,6}", 0..3),
            0..5,
        )
    ) {
        let key_value = KeyValue::from_parts(
            &pairs.keys().collect::<Vec<_>>(),
            &pairs
                .iter()
                .filter(|(_, values)| !values.is_empty())
                .map(|(key, values)| (key, values.clone()))
                .collect::<Vec<_>>(),
            Default::default(),
        )
        .unwrap();
        let parsed = KeyValue::parse(key_value.to_string()).unwrap();
        prop_assert_eq!(key_value, parsed);
    }
}
