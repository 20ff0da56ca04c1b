/// Determines if `address` is an RFC 3986 `IPv4address`: four dec-octets
/// separated by `.`, each in `0..=255` and without leading zeros.
pub(crate) fn validate_ipv4_address(address: &str) -> bool {
    let mut octets = 0;
    for octet in address.split('.') {
        if !is_dec_octet(octet.as_bytes()) {
            return false;
        }
        octets += 1;
    }
    octets == 4
}

fn is_dec_octet(octet: &[u8]) -> bool {
    match octet {
        [b'0'..=b'9'] => true,
        [b'1'..=b'9', b'0'..=b'9'] => true,
        [b'1', b'0'..=b'9', b'0'..=b'9'] => true,
        [b'2', b'0'..=b'4', b'0'..=b'9'] => true,
        [b'2', b'5', b'0'..=b'5'] => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn good_addresses() {
        let test_vectors = [
            "0.0.0.0",
            "1.2.3.0",
            "1.2.3.4",
            "1.2.3.255",
            "1.2.255.4",
            "1.255.3.4",
            "255.2.3.4",
            "255.255.255.255",
            "199.249.99.10",
        ];
        for test_vector in &test_vectors {
            assert!(validate_ipv4_address(test_vector), "{}", test_vector);
        }
    }

    #[test]
    fn bad_addresses() {
        let test_vectors = [
            "1.2.x.4",
            "1.2.3.4.8",
            "1.2.3",
            "1.2.3.",
            "1.2.3.256",
            "1.2.3.-4",
            "1.2.3. 4",
            "1.2.3.4 ",
            "01.2.3.4",
            "1.2.3.040",
            "1..3.4",
            "",
        ];
        for test_vector in &test_vectors {
            assert!(!validate_ipv4_address(test_vector), "{:?}", test_vector);
        }
    }
}
