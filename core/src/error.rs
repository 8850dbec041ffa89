/*
 * error.rs
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

//! Builder and dispatch errors.

use thiserror::Error;

/// Errors raised while filling in a builder. All of them are precondition violations: the
/// mutator that raised one left the builder unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MailtoError {
    /// A required argument was null (only reachable through the C API).
    #[error("{0} must not be null")]
    MissingArgument(&'static str),
    /// The address did not match the permissive addr-spec grammar.
    #[error("not a valid email address: {0:?}")]
    InvalidAddress(String),
    /// A single-line field (the subject) contained CR or LF.
    #[error("argument must not contain line breaks")]
    ContainsLineBreak,
}

/// No application is available to handle the URI. Expected on devices without a mail client;
/// callers should show a fallback message rather than treat it as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no application found to handle {scheme}: URIs")]
pub struct NoHandlerFound {
    scheme: String,
}

impl NoHandlerFound {
    /// Build the error for `uri`, keeping only its scheme (the rest may hold addresses and
    /// message text). Without a `:` there is no scheme and nothing is kept.
    pub fn for_uri(uri: &str) -> Self {
        let scheme = uri.split_once(':').map(|(scheme, _)| scheme).unwrap_or_default();
        Self {
            scheme: scheme.to_string(),
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}
