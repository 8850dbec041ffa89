/*
 * lib.rs
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

//! Core of mailto: build `mailto:` URIs (RFC 6068) from recipient lists, a subject and a body,
//! and hand them to a mail client.
//!
//! [`MailtoBuilder`] validates each field as it is set; [`mailto::build`] assembles the URI;
//! [`Dispatcher`] is the seam to whatever actually opens it.

pub mod address_set;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod mailto;
pub mod normalize;
pub mod uri;
pub mod validate;

pub use address_set::AddressSet;
pub use builder::{MailtoBuilder, RecipientField};
pub use dispatch::{Dispatcher, SystemDispatcher};
pub use error::{MailtoError, NoHandlerFound};
pub use mailto::{build, MailtoRequest};
pub use normalize::normalize_line_endings;
pub use uri::{encode_component, encode_recipient};
pub use validate::{is_valid_address, validate_address, validate_no_line_break};
