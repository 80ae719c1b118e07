/*!
Provides convenience routines for escaping raw bytes in error messages.

Input given to the parsers in this crate is a byte slice, so it may not be
valid UTF-8. These wrappers render such input in a readable way without
failing.
*/

/// Provides a convenient `Display` and `Debug` implementation for a `u8`.
///
/// The byte is treated as ASCII. If it isn't printable ASCII, then it's
/// emitted as an escape sequence.
#[derive(Clone, Copy)]
pub(crate) struct Byte(pub(crate) u8);

impl core::fmt::Display for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.0 == b' ' {
            return f.write_str(" ");
        }
        for (i, b) in core::ascii::escape_default(self.0).enumerate() {
            // Capitalize the hex digits of `\xab` to get `\xAB`.
            let ch = char::from(b);
            let ch = if i >= 2 { ch.to_ascii_uppercase() } else { ch };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

impl core::fmt::Debug for Byte {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// Provides a convenient `Display` and `Debug` implementation for `&[u8]`.
///
/// Valid UTF-8 is written as is (with control characters escaped), while
/// every byte that is not part of a valid UTF-8 sequence is written as a
/// hex escape.
pub(crate) struct Bytes<'a>(pub(crate) &'a [u8]);

impl<'a> core::fmt::Display for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut bytes = self.0;
        while !bytes.is_empty() {
            let (valid, invalid) = match core::str::from_utf8(bytes) {
                Ok(valid) => (valid, &[][..]),
                Err(err) => {
                    let (valid, rest) = bytes.split_at(err.valid_up_to());
                    let invalid_len = err.error_len().unwrap_or(rest.len());
                    // `valid_up_to` guarantees this prefix is valid UTF-8.
                    let valid = core::str::from_utf8(valid).unwrap_or("");
                    (valid, &rest[..invalid_len])
                }
            };
            for ch in valid.chars() {
                if ch.is_control() {
                    write!(f, "{}", ch.escape_debug())?;
                } else {
                    write!(f, "{ch}")?;
                }
            }
            for &byte in invalid {
                write!(f, r"\x{byte:02x}")?;
            }
            bytes = &bytes[valid.len() + invalid.len()..];
        }
        Ok(())
    }
}

impl<'a> core::fmt::Debug for Bytes<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn byte() {
        assert_eq!(Byte(b'a').to_string(), "a");
        assert_eq!(Byte(b' ').to_string(), " ");
        assert_eq!(Byte(b'\n').to_string(), "\\n");
        assert_eq!(Byte(0xFF).to_string(), "\\xFF");
    }

    #[test]
    fn bytes() {
        assert_eq!(Bytes(b"P1Y").to_string(), "P1Y");
        assert_eq!(Bytes(b"P\xFF1Y").to_string(), "P\\xff1Y");
        assert_eq!(Bytes("P1Y\u{2603}".as_bytes()).to_string(), "P1Y\u{2603}");
        assert_eq!(Bytes(b"P\t").to_string(), "P\\t");
    }
}
