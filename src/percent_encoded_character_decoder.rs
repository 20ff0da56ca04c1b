use super::{character_classes::HEXDIG, error::Error};

/// Accumulates the two hex digits following a `%` into the byte they encode.
pub struct PercentEncodedCharacterDecoder {
    decoded_character: u8,
    digits_left: usize,
}

impl PercentEncodedCharacterDecoder {
    pub fn new() -> Self {
        Self {
            decoded_character: 0,
            digits_left: 2,
        }
    }

    /// Feed the next hex digit.  Returns the decoded byte once both digits
    /// have been seen.
    pub fn next(&mut self, c: char) -> Result<Option<u8>, Error> {
        self.shift_in_hex_digit(c)?;
        self.digits_left -= 1;
        if self.digits_left == 0 {
            Ok(Some(self.decoded_character))
        } else {
            Ok(None)
        }
    }

    fn shift_in_hex_digit(&mut self, c: char) -> Result<(), Error> {
        if self.digits_left == 0 || !HEXDIG.contains(&c) {
            return Err(Error::IllegalPercentEncoding);
        }
        let digit = c.to_digit(16).ok_or(Error::IllegalPercentEncoding)?;
        self.decoded_character <<= 4;
        self.decoded_character |= digit as u8;
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn good_sequences() {
        struct Test {
            sequence: [char; 2],
            expected_output: u8,
        }
        let test_vectors: &[Test] = &[
            Test {
                sequence: ['4', '1'],
                expected_output: b'A',
            },
            Test {
                sequence: ['5', 'A'],
                expected_output: b'Z',
            },
            Test {
                sequence: ['6', 'e'],
                expected_output: b'n',
            },
            Test {
                sequence: ['e', '1'],
                expected_output: 0xE1,
            },
            Test {
                sequence: ['C', 'A'],
                expected_output: 0xCA,
            },
        ];
        for test_vector in test_vectors {
            let mut pec = PercentEncodedCharacterDecoder::new();
            assert_eq!(Ok(None), pec.next(test_vector.sequence[0]));
            assert_eq!(
                Ok(Some(test_vector.expected_output)),
                pec.next(test_vector.sequence[1])
            );
        }
    }

    #[test]
    fn bad_sequences() {
        let test_vectors = ['G', 'g', '.', 'z', '-', ' ', 'V'];
        for test_vector in &test_vectors {
            let mut pec = PercentEncodedCharacterDecoder::new();
            assert!(pec.next(*test_vector).is_err());
        }
    }

    #[test]
    fn third_digit_is_rejected() {
        let mut pec = PercentEncodedCharacterDecoder::new();
        assert_eq!(Ok(None), pec.next('2'));
        assert_eq!(Ok(Some(0x20)), pec.next('0'));
        assert_eq!(Err(Error::IllegalPercentEncoding), pec.next('0'));
    }
}
