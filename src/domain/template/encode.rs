// Percent-encoding rules applied to expanded values

/// RFC 3986 reserved characters (gen-delims and sub-delims)
const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

/// Which characters an operator lets through unencoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncodeRule {
    /// Only unreserved characters pass: `A-Za-z0-9-._~`
    Unreserved,
    /// Unreserved and reserved characters pass, as do existing `%XX` triplets
    UnreservedReserved,
}

impl EncodeRule {
    pub fn encode(self, value: &str) -> String {
        match self {
            EncodeRule::Unreserved => urlencoding::encode(value).into_owned(),
            EncodeRule::UnreservedReserved => encode_allow_reserved(value),
        }
    }

    /// Whether `ch` appears verbatim in output under this rule
    pub fn allows(self, ch: char) -> bool {
        match self {
            EncodeRule::Unreserved => is_unreserved(ch),
            EncodeRule::UnreservedReserved => is_unreserved(ch) || is_reserved(ch),
        }
    }
}

pub fn is_unreserved(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, '-' | '.' | '_' | '~')
}

pub fn is_reserved(ch: char) -> bool {
    RESERVED.contains(ch)
}

fn is_pct_triplet(bytes: &[u8]) -> bool {
    bytes.len() >= 3
        && bytes[0] == b'%'
        && bytes[1].is_ascii_hexdigit()
        && bytes[2].is_ascii_hexdigit()
}

// Runs of disallowed characters are handed to urlencoding as a unit so
// multi-byte characters are always encoded whole.
fn encode_allow_reserved(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut pending_start: Option<usize> = None;
    let bytes = value.as_bytes();

    for (idx, ch) in value.char_indices() {
        let pass = is_unreserved(ch) || is_reserved(ch) || is_pct_triplet(&bytes[idx..]);
        if pass {
            if let Some(start) = pending_start.take() {
                out.push_str(&urlencoding::encode(&value[start..idx]));
            }
            out.push(ch);
        } else if pending_start.is_none() {
            pending_start = Some(idx);
        }
    }

    if let Some(start) = pending_start {
        out.push_str(&urlencoding::encode(&value[start..]));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unreserved_encodes_reserved() {
        let rule = EncodeRule::Unreserved;
        assert_eq!(rule.encode("hello world"), "hello%20world");
        assert_eq!(rule.encode("foo/bar"), "foo%2Fbar");
        assert_eq!(rule.encode("Hello World!"), "Hello%20World%21");
        assert_eq!(rule.encode("a-b.c_d~e"), "a-b.c_d~e");
    }

    #[test]
    fn test_unreserved_encodes_percent() {
        assert_eq!(EncodeRule::Unreserved.encode("50%"), "50%25");
        assert_eq!(EncodeRule::Unreserved.encode("%20"), "%2520");
    }

    #[test]
    fn test_reserved_passthrough() {
        let rule = EncodeRule::UnreservedReserved;
        assert_eq!(rule.encode("/foo/bar"), "/foo/bar");
        assert_eq!(rule.encode(":/?#[]@!$&'()*+,;="), ":/?#[]@!$&'()*+,;=");
        assert_eq!(rule.encode("Hello World!"), "Hello%20World!");
    }

    #[test]
    fn test_reserved_keeps_pct_triplets() {
        let rule = EncodeRule::UnreservedReserved;
        assert_eq!(rule.encode("a%20b"), "a%20b");
        assert_eq!(rule.encode("100%"), "100%25");
        assert_eq!(rule.encode("%zz"), "%25zz");
    }

    #[test]
    fn test_multibyte_encoded_whole() {
        assert_eq!(EncodeRule::Unreserved.encode("\u{e9}"), "%C3%A9");
        assert_eq!(EncodeRule::UnreservedReserved.encode("a\u{1F600}/b"), "a%F0%9F%98%80/b");
        assert_eq!(EncodeRule::UnreservedReserved.encode("\u{10FFFF}"), "%F4%8F%BF%BF");
    }

    #[test]
    fn test_allows() {
        assert!(EncodeRule::Unreserved.allows('~'));
        assert!(!EncodeRule::Unreserved.allows('/'));
        assert!(EncodeRule::UnreservedReserved.allows('/'));
        assert!(!EncodeRule::UnreservedReserved.allows(' '));
        assert!(!EncodeRule::UnreservedReserved.allows('%'));
    }
}
