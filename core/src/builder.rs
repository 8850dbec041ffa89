/*
 * builder.rs
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

//! Staged builder for mailto: URIs.
//!
//! ```
//! use mailto_core::MailtoBuilder;
//!
//! let mut builder = MailtoBuilder::new();
//! builder
//!     .to("alice@example.org")?
//!     .subject("Bug report for 'My awesome app'")?
//!     .body("Something went wrong :(");
//! assert_eq!(
//!     builder.build(),
//!     "mailto:alice@example.org?subject=Bug%20report%20for%20%27My%20awesome%20app%27&body=Something%20went%20wrong%20%3A%28"
//! );
//! # Ok::<(), mailto_core::MailtoError>(())
//! ```

use log::{debug, trace, warn};

use crate::address_set::AddressSet;
use crate::dispatch::Dispatcher;
use crate::error::MailtoError;
use crate::mailto::{build, MailtoRequest};
use crate::normalize::normalize_line_endings;
use crate::validate::{validate_address, validate_no_line_break};

/// Which recipient list an address goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipientField {
    To,
    Cc,
    Bcc,
}

impl RecipientField {
    pub fn as_str(self) -> &'static str {
        match self {
            RecipientField::To => "to",
            RecipientField::Cc => "cc",
            RecipientField::Bcc => "bcc",
        }
    }
}

/// Accumulates recipients, subject and body. Every mutator validates its input first and
/// leaves the builder untouched when it returns an error.
#[derive(Debug, Clone, Default)]
pub struct MailtoBuilder {
    to: AddressSet,
    cc: AddressSet,
    bcc: AddressSet,
    subject: Option<String>,
    body: Option<String>,
}

impl MailtoBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one address to `to`.
    pub fn to(&mut self, address: &str) -> Result<&mut Self, MailtoError> {
        self.add_recipient(RecipientField::To, address)
    }

    /// Add several addresses to `to`. Nothing is added unless all of them are valid.
    pub fn to_all<I, S>(&mut self, addresses: I) -> Result<&mut Self, MailtoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_recipients(RecipientField::To, addresses)
    }

    pub fn cc(&mut self, address: &str) -> Result<&mut Self, MailtoError> {
        self.add_recipient(RecipientField::Cc, address)
    }

    pub fn cc_all<I, S>(&mut self, addresses: I) -> Result<&mut Self, MailtoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_recipients(RecipientField::Cc, addresses)
    }

    pub fn bcc(&mut self, address: &str) -> Result<&mut Self, MailtoError> {
        self.add_recipient(RecipientField::Bcc, address)
    }

    pub fn bcc_all<I, S>(&mut self, addresses: I) -> Result<&mut Self, MailtoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.add_recipients(RecipientField::Bcc, addresses)
    }

    /// Add one address to the given list.
    pub fn add_recipient(&mut self, field: RecipientField, address: &str) -> Result<&mut Self, MailtoError> {
        validate_address(address)?;
        if self.recipients_mut(field).insert(address) {
            debug!("added {} recipient", field.as_str());
        } else {
            trace!("duplicate {} recipient ignored", field.as_str());
        }
        Ok(self)
    }

    /// Add several addresses to the given list, all or nothing.
    pub fn add_recipients<I, S>(&mut self, field: RecipientField, addresses: I) -> Result<&mut Self, MailtoError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let addresses: Vec<S> = addresses.into_iter().collect();
        for address in &addresses {
            validate_address(address.as_ref())?;
        }
        let set = self.recipients_mut(field);
        let added = addresses.iter().filter(|a| set.insert((*a).as_ref())).count();
        debug!("added {} of {} {} recipients", added, addresses.len(), field.as_str());
        Ok(self)
    }

    /// Set the subject, replacing any previous one. Must be a single line.
    pub fn subject(&mut self, subject: &str) -> Result<&mut Self, MailtoError> {
        validate_no_line_break(subject)?;
        self.subject = Some(subject.to_string());
        debug!("subject set ({} bytes)", subject.len());
        Ok(self)
    }

    /// Set the body, replacing any previous one. Line endings are normalized to CRLF.
    pub fn body(&mut self, body: &str) -> &mut Self {
        let body = normalize_line_endings(body);
        debug!("body set ({} bytes)", body.len());
        self.body = Some(body);
        self
    }

    pub fn recipients(&self, field: RecipientField) -> &AddressSet {
        match field {
            RecipientField::To => &self.to,
            RecipientField::Cc => &self.cc,
            RecipientField::Bcc => &self.bcc,
        }
    }

    fn recipients_mut(&mut self, field: RecipientField) -> &mut AddressSet {
        match field {
            RecipientField::To => &mut self.to,
            RecipientField::Cc => &mut self.cc,
            RecipientField::Bcc => &mut self.bcc,
        }
    }

    /// Snapshot of the current fields for [`crate::mailto::build`].
    pub fn request(&self) -> MailtoRequest<'_> {
        MailtoRequest {
            to: &self.to,
            cc: &self.cc,
            bcc: &self.bcc,
            subject: self.subject.as_deref(),
            body: self.body.as_deref(),
        }
    }

    /// The mailto: URI for the current fields.
    pub fn build(&self) -> String {
        let uri = build(self.request());
        trace!("built {}", uri);
        uri
    }

    /// Build the URI and hand it to `dispatcher`. Returns false if no application could handle
    /// it; that is an expected outcome and callers should tell the user instead of failing.
    pub fn start(&self, dispatcher: &dyn Dispatcher) -> bool {
        let uri = self.build();
        match dispatcher.dispatch(&uri) {
            Ok(()) => {
                debug!("mailto URI dispatched");
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}
