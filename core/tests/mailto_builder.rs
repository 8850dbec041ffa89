/*
 * mailto_builder.rs
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

// End-to-end tests for MailtoBuilder: field order, separators, encoding and validation.
//
// Run with:
//   cargo test -p mailto_core --test mailto_builder

use std::cell::RefCell;

use mailto_core::{MailtoBuilder, MailtoError, NoHandlerFound, RecipientField};
use pretty_assertions::assert_eq;

#[test]
fn empty_builder() {
    assert_eq!(MailtoBuilder::new().build(), "mailto:");
}

#[test]
fn single_to() {
    let mut b = MailtoBuilder::new();
    b.to("john@example.org").unwrap();
    assert_eq!(b.build(), "mailto:john@example.org");
}

#[test]
fn to_keeps_insertion_order() {
    let mut b = MailtoBuilder::new();
    b.to("bob@example.org").unwrap().to("alice@example.org").unwrap();
    assert_eq!(b.build(), "mailto:bob@example.org,alice@example.org");
}

#[test]
fn to_list() {
    let mut b = MailtoBuilder::new();
    b.to_all(["bob@example.org", "alice@example.org"]).unwrap();
    assert_eq!(b.build(), "mailto:bob@example.org,alice@example.org");
}

#[test]
fn duplicate_recipients_ignored() {
    let mut b = MailtoBuilder::new();
    b.to_all(["bob@example.org", "alice@example.org", "bob@example.org"]).unwrap();
    b.to("alice@example.org").unwrap();
    assert_eq!(b.build(), "mailto:bob@example.org,alice@example.org");
}

#[test]
fn single_cc() {
    let mut b = MailtoBuilder::new();
    b.cc("john@example.org").unwrap();
    assert_eq!(b.build(), "mailto:?cc=john@example.org");
}

#[test]
fn single_bcc() {
    let mut b = MailtoBuilder::new();
    b.bcc("john@example.org").unwrap();
    assert_eq!(b.build(), "mailto:?bcc=john@example.org");
}

#[test]
fn bcc_list() {
    let mut b = MailtoBuilder::new();
    b.bcc_all(vec!["alice@example.org".to_string(), "bob@example.org".to_string()]).unwrap();
    assert_eq!(b.build(), "mailto:?bcc=alice@example.org,bob@example.org");
}

#[test]
fn subject_is_encoded() {
    let mut b = MailtoBuilder::new();
    b.subject("hi there").unwrap();
    assert_eq!(b.build(), "mailto:?subject=hi%20there");
}

#[test]
fn to_cc_subject() {
    let mut b = MailtoBuilder::new();
    b.to("leia@example.org").unwrap();
    b.cc("han@example.org").unwrap();
    b.subject("hi there").unwrap();
    assert_eq!(b.build(), "mailto:leia@example.org?cc=han@example.org&subject=hi%20there");
}

#[test]
fn body_with_improper_line_break_is_fixed() {
    let mut b = MailtoBuilder::new();
    b.body("this is\na test");
    assert_eq!(b.build(), "mailto:?body=this%20is%0D%0Aa%20test");
}

#[test]
fn subject_rejects_what_body_accepts() {
    let mut b = MailtoBuilder::new();
    assert_eq!(b.subject("Keep\nreading").err(), Some(MailtoError::ContainsLineBreak));
    b.body("Keep\nreading");
    assert_eq!(b.build(), "mailto:?body=Keep%0D%0Areading");
}

#[test]
fn all_fields() {
    let mut b = MailtoBuilder::new();
    b.to_all(["leia@example.org", "luke@example.org"])
        .unwrap()
        .cc("obi.wan@example.org")
        .unwrap()
        .cc("han@example.org")
        .unwrap()
        .bcc("chewbacca@example.org")
        .unwrap()
        .subject("rebel stuff")
        .unwrap()
        .body("start execution of secret plan & good luck");
    assert_eq!(
        b.build(),
        "mailto:\
         leia@example.org,luke@example.org\
         ?cc=obi.wan@example.org,han@example.org\
         &bcc=chewbacca@example.org\
         &subject=rebel%20stuff\
         &body=start%20execution%20of%20secret%20plan%20%26%20good%20luck"
    );
}

#[test]
fn order_does_not_depend_on_call_order() {
    let mut b = MailtoBuilder::new();
    b.body("b");
    b.subject("s").unwrap();
    b.bcc("c@example.org").unwrap();
    b.cc("d@example.org").unwrap();
    b.to("e@example.org").unwrap();
    assert_eq!(b.build(), "mailto:e@example.org?cc=d@example.org&bcc=c@example.org&subject=s&body=b");
}

#[test]
fn quoted_local_part_is_encoded() {
    let mut b = MailtoBuilder::new();
    b.to("\"not@me\"@example.org").unwrap();
    b.cc("\"john smith\"@example.org").unwrap();
    assert_eq!(b.build(), "mailto:%22not%40me%22@example.org?cc=%22john%20smith%22@example.org");
}

#[test]
fn invalid_addresses_rejected_at_insertion() {
    for bad in ["@example.org", "hi@", "bob(at)example.org", ""] {
        let mut b = MailtoBuilder::new();
        assert_eq!(b.to(bad).err(), Some(MailtoError::InvalidAddress(bad.to_string())));
        assert_eq!(b.cc(bad).err(), Some(MailtoError::InvalidAddress(bad.to_string())));
        assert_eq!(b.bcc(bad).err(), Some(MailtoError::InvalidAddress(bad.to_string())));
        assert_eq!(b.build(), "mailto:");
    }
}

#[test]
fn failed_list_leaves_state() {
    let mut b = MailtoBuilder::new();
    b.cc("first@example.org").unwrap();
    assert!(b.cc_all(["second@example.org", "hi@"]).is_err());
    assert_eq!(b.recipients(RecipientField::Cc).len(), 1);
    assert_eq!(b.build(), "mailto:?cc=first@example.org");
}

#[test]
fn start_returns_false_without_handler() {
    let mut b = MailtoBuilder::new();
    b.to("john@example.org").unwrap();
    let no_mail_app = |uri: &str| -> Result<(), NoHandlerFound> { Err(NoHandlerFound::for_uri(uri)) };
    assert!(!b.start(&no_mail_app));
}

#[test]
fn start_hands_over_built_uri() {
    let mut b = MailtoBuilder::new();
    b.to("john@example.org").unwrap().subject("hi").unwrap();
    let opened = RefCell::new(None);
    let mail_app = |uri: &str| -> Result<(), NoHandlerFound> {
        *opened.borrow_mut() = Some(uri.to_string());
        Ok(())
    };
    assert!(b.start(&mail_app));
    assert_eq!(opened.into_inner().as_deref(), Some("mailto:john@example.org?subject=hi"));
}
