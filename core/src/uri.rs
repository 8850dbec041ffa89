/*
 * uri.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Mailto, a mailto: URI builder for email clients.
 *
 * Mailto is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Mailto is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Mailto.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Percent-encoding for mailto: URIs. Header values and both halves of an addr-spec are encoded
//! as URI components: everything except the RFC 3986 unreserved set is escaped, so a space
//! becomes `%20` (never `+`) and CRLF becomes `%0D%0A`.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Component safe set: only ALPHA / DIGIT / "-" / "." / "_" / "~" stay literal.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Scheme prefix of every URI this crate produces.
pub const MAILTO_SCHEME: &str = "mailto:";

/// Percent-encode a header value (subject, body) or one half of an address.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, COMPONENT).to_string()
}

/// Percent-encode an address for the `to` part or a `cc`/`bcc` value.
///
/// The address is split at its last `@` and each side encoded on its own, so the separator
/// stays a literal `@` while any `@` inside a quoted local part becomes `%40`.
pub fn encode_recipient(address: &str) -> String {
    match address.rfind('@') {
        Some(at) => format!(
            "{}@{}",
            encode_component(&address[..at]),
            encode_component(&address[at + 1..])
        ),
        None => encode_component(address),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_address_unchanged() {
        assert_eq!(encode_recipient("john@example.org"), "john@example.org");
        assert_eq!(encode_recipient("obi.wan@example.org"), "obi.wan@example.org");
    }

    #[test]
    fn splits_at_last_at() {
        assert_eq!(encode_recipient("\"not@me\"@example.org"), "%22not%40me%22@example.org");
    }

    #[test]
    fn escapes_backslashes() {
        assert_eq!(encode_recipient("\"oh\\\\no\"@example.org"), "%22oh%5C%5Cno%22@example.org");
    }

    #[test]
    fn escapes_quoted_pairs_and_sub_delims() {
        assert_eq!(
            encode_recipient("\"\\\\\\\"it's\\ ugly\\\\\\\"\"@example.org"),
            "%22%5C%5C%5C%22it%27s%5C%20ugly%5C%5C%5C%22%22@example.org"
        );
        assert_eq!(encode_recipient("a+b@example.org"), "a%2Bb@example.org");
    }

    #[test]
    fn component_space_and_crlf() {
        assert_eq!(encode_component("hi there"), "hi%20there");
        assert_eq!(encode_component("a\r\nb"), "a%0D%0Ab");
        assert_eq!(encode_component("a & b=c?"), "a%20%26%20b%3Dc%3F");
        assert_eq!(encode_component("-_.~"), "-_.~");
    }

    #[test]
    fn component_non_ascii_is_utf8() {
        assert_eq!(encode_component("café"), "caf%C3%A9");
    }

    #[test]
    fn no_at_encodes_whole() {
        assert_eq!(encode_recipient("a b"), "a%20b");
    }
}
