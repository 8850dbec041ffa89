/*
 * address_set.rs
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

//! Ordered set of recipient addresses.

/// Addresses in insertion order, without duplicates. Comparison is exact (case-sensitive).
/// Only the builder inserts, after validation, so every entry is a valid address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressSet {
    addresses: Vec<String>,
}

impl AddressSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `address` unless already present. Returns false for a duplicate.
    pub(crate) fn insert(&mut self, address: &str) -> bool {
        if self.contains(address) {
            return false;
        }
        self.addresses.push(address.to_string());
        true
    }

    pub fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a == address)
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.addresses.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_insertion_order() {
        let mut set = AddressSet::new();
        set.insert("bob@example.org");
        set.insert("alice@example.org");
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["bob@example.org", "alice@example.org"]);
    }

    #[test]
    fn ignores_duplicates_case_sensitively() {
        let mut set = AddressSet::new();
        assert!(set.insert("bob@example.org"));
        assert!(!set.insert("bob@example.org"));
        assert!(set.insert("Bob@example.org"));
        assert_eq!(set.len(), 2);
    }
}
