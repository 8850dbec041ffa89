/*
 * mailto.rs
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

//! Assemble a mailto: URI (RFC 6068) from recipients, subject and body.
//!
//! Layout: `mailto:` + comma-separated `to` addresses, then a query with `cc`, `bcc`,
//! `subject` and `body` in that order, each only when set. The string is emitted as built and
//! never passed through a generic URI parser, which could re-encode it.

use crate::address_set::AddressSet;
use crate::uri::{encode_component, encode_recipient, MAILTO_SCHEME};

/// Everything needed to assemble one URI. Borrowed from a [`crate::MailtoBuilder`]; the body is
/// already normalized to CRLF line endings.
#[derive(Debug, Clone, Copy)]
pub struct MailtoRequest<'a> {
    pub(crate) to: &'a AddressSet,
    pub(crate) cc: &'a AddressSet,
    pub(crate) bcc: &'a AddressSet,
    pub(crate) subject: Option<&'a str>,
    pub(crate) body: Option<&'a str>,
}

impl<'a> MailtoRequest<'a> {
    pub fn to(&self) -> &'a AddressSet {
        self.to
    }

    pub fn cc(&self) -> &'a AddressSet {
        self.cc
    }

    pub fn bcc(&self) -> &'a AddressSet {
        self.bcc
    }

    pub fn subject(&self) -> Option<&'a str> {
        self.subject
    }

    pub fn body(&self) -> Option<&'a str> {
        self.body
    }
}

/// Build the URI. Cannot fail: every field was validated when it was set.
pub fn build(request: MailtoRequest<'_>) -> String {
    let mut mailto = String::with_capacity(1024);
    mailto.push_str(MAILTO_SCHEME);
    append_recipients(&mut mailto, request.to);

    let mut has_query = false;
    has_query = append_recipient_parameter(&mut mailto, "cc", request.cc, has_query);
    has_query = append_recipient_parameter(&mut mailto, "bcc", request.bcc, has_query);
    has_query = append_parameter(&mut mailto, "subject", request.subject, has_query);
    append_parameter(&mut mailto, "body", request.body, has_query);

    mailto
}

/// `?` before the first parameter, `&` before the rest.
fn append_separator(mailto: &mut String, has_query: bool) {
    mailto.push(if has_query { '&' } else { '?' });
}

/// Append `field=value` if the value is set (an empty string is set). Returns the new
/// has-query state.
fn append_parameter(mailto: &mut String, field: &str, value: Option<&str>, has_query: bool) -> bool {
    let value = match value {
        Some(v) => v,
        None => return has_query,
    };
    append_separator(mailto, has_query);
    mailto.push_str(field);
    mailto.push('=');
    mailto.push_str(&encode_component(value));
    true
}

/// Append `field=addr,addr,...` if the set is non-empty. Returns the new has-query state.
fn append_recipient_parameter(mailto: &mut String, field: &str, recipients: &AddressSet, has_query: bool) -> bool {
    if recipients.is_empty() {
        return has_query;
    }
    append_separator(mailto, has_query);
    mailto.push_str(field);
    mailto.push('=');
    append_recipients(mailto, recipients);
    true
}

fn append_recipients(mailto: &mut String, recipients: &AddressSet) {
    for (i, recipient) in recipients.iter().enumerate() {
        if i > 0 {
            mailto.push(',');
        }
        mailto.push_str(&encode_recipient(recipient));
    }
}
