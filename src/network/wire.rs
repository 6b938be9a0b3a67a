//! Bodies travel as single-byte ASCII text. There's no framing: whatever a
//! single read returns is one request.

/// Anything outside ASCII turns into U+FFFD.
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| if b.is_ascii() { b as char } else { char::REPLACEMENT_CHARACTER })
        .collect()
}

/// Replaces `buf` with `body` and a trailing newline. Characters outside
/// ASCII are sent as `?`.
pub fn encode(body: &str, buf: &mut Vec<u8>) {
    buf.clear();
    buf.extend(body.chars().map(|c| if c.is_ascii() { c as u8 } else { b'?' }));
    buf.push(b'\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_is_bytewise() {
        assert_eq!(decode(b"MOVE e2 e4\r\n"), "MOVE e2 e4\r\n");
        assert_eq!(decode(&[b'a', 0xC3, 0xA9]), "a\u{FFFD}\u{FFFD}");
        assert_eq!(decode(b""), "");
    }

    #[test]
    fn encode_reuses_the_buffer() {
        let mut buf = b"stale bytes".to_vec();
        encode("Wait for your turn", &mut buf);
        assert_eq!(buf, b"Wait for your turn\n");
        encode("caf\u{e9}", &mut buf);
        assert_eq!(buf, b"caf?\n");
    }

    // Two requests in one read arrive as one body. Callers see a single
    // message and the second command is lost.
    #[test]
    fn merged_requests_stay_merged() {
        assert_eq!(decode(b"PRINT_STATE\nPRINT_STATE\n"), "PRINT_STATE\nPRINT_STATE\n");
    }
}
