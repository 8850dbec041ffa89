/*
 * validate.rs
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

//! Field validation: a permissive RFC 5322 addr-spec check for recipients and a line-break
//! check for single-line fields.
//!
//! The address grammar is permissive. It accepts dot-atom and quoted-string local
//! parts (so `"not@me"@example.org` is fine), hostnames with any number of labels, and domain
//! literals. It does not resolve or otherwise check the domain.

use crate::error::MailtoError;

/// Checks if a byte is RFC 5322 atext. Bytes of multi-byte UTF-8 sequences are accepted so
/// internationalized local parts pass through to the encoder.
#[inline]
fn is_atext(c: u8) -> bool {
    matches!(c,
        b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' |
        b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*' | b'+' | b'-' | b'/' |
        b'=' | b'?' | b'^' | b'_' | b'`' | b'{' | b'|' | b'}' | b'~'
    ) || c >= 0x80
}

#[inline]
fn is_label_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c >= 0x80
}

/// Dot-atom: atext runs separated by single dots.
fn is_dot_atom(s: &[u8]) -> bool {
    !s.is_empty() && s.split(|&b| b == b'.').all(|atom| !atom.is_empty() && atom.iter().copied().all(is_atext))
}

/// Quoted string including its surrounding quotes. Inside, a backslash escapes the next
/// character; an unescaped quote or any control character (other than tab) ends validity.
fn is_quoted_string(s: &[u8]) -> bool {
    if s.len() < 2 || s[0] != b'"' || s[s.len() - 1] != b'"' {
        return false;
    }
    let inner = &s[1..s.len() - 1];
    let mut pos = 0;
    while pos < inner.len() {
        match inner[pos] {
            b'\\' => {
                if pos + 1 >= inner.len() || is_forbidden_control(inner[pos + 1]) {
                    return false;
                }
                pos += 2;
            }
            b'"' => return false,
            c if is_forbidden_control(c) => return false,
            _ => pos += 1,
        }
    }
    true
}

#[inline]
fn is_forbidden_control(c: u8) -> bool {
    (c < 0x20 && c != b'\t') || c == 0x7f
}

fn is_valid_local_part(local: &[u8]) -> bool {
    if local.first() == Some(&b'"') {
        is_quoted_string(local)
    } else {
        is_dot_atom(local)
    }
}

fn is_valid_domain(domain: &[u8]) -> bool {
    if domain.first() == Some(&b'[') {
        return domain.len() > 2
            && domain[domain.len() - 1] == b']'
            && domain[1..domain.len() - 1]
                .iter()
                .all(|&c| (33..=126).contains(&c) && c != b'[' && c != b']' && c != b'\\');
    }
    !domain.is_empty()
        && domain.split(|&b| b == b'.').all(|label| {
            !label.is_empty()
                && label.iter().copied().all(is_label_char)
                && label[0] != b'-'
                && label[label.len() - 1] != b'-'
        })
}

/// True if `address` is `local-part@domain` per the permissive grammar. The split happens at
/// the last `@`, matching how recipients are encoded.
pub fn is_valid_address(address: &str) -> bool {
    let at = match address.rfind('@') {
        Some(at) => at,
        None => return false,
    };
    let bytes = address.as_bytes();
    is_valid_local_part(&bytes[..at]) && is_valid_domain(&bytes[at + 1..])
}

/// Reject anything that is not a syntactically valid email address.
pub fn validate_address(address: &str) -> Result<(), MailtoError> {
    if is_valid_address(address) {
        Ok(())
    } else {
        Err(MailtoError::InvalidAddress(address.to_string()))
    }
}

/// Reject text containing CR or LF.
pub fn validate_no_line_break(text: &str) -> Result<(), MailtoError> {
    if text.contains(|c: char| c == '\r' || c == '\n') {
        Err(MailtoError::ContainsLineBreak)
    } else {
        Ok(())
    }
}
