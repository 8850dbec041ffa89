/*
 * dispatch.rs
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

//! Handing a finished URI to the platform. The core never opens anything itself; it calls a
//! [`Dispatcher`], which is either supplied by the host application (a native UI through the
//! FFI) or the [`SystemDispatcher`] that asks the desktop to open it.

use log::{debug, warn};

use crate::error::NoHandlerFound;

/// Launches an application for a URI, or reports that none is available.
pub trait Dispatcher {
    fn dispatch(&self, uri: &str) -> Result<(), NoHandlerFound>;
}

impl<F> Dispatcher for F
where
    F: Fn(&str) -> Result<(), NoHandlerFound>,
{
    fn dispatch(&self, uri: &str) -> Result<(), NoHandlerFound> {
        self(uri)
    }
}

/// Opens URIs through the desktop's handler for their scheme, or with a specific program.
/// Any failure to launch means no handler was found.
#[derive(Debug, Clone, Default)]
pub struct SystemDispatcher {
    program: Option<String>,
}

impl SystemDispatcher {
    /// Dispatcher using the desktop's registered `mailto:` handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that launches `program` with the URI as its only argument. The program is
    /// started detached; dispatch returns as soon as it is running.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }
}

impl Dispatcher for SystemDispatcher {
    fn dispatch(&self, uri: &str) -> Result<(), NoHandlerFound> {
        let result = match &self.program {
            Some(program) => {
                debug!("opening URI with {}", program);
                open::with_detached(uri, program.clone())
            }
            None => {
                debug!("opening URI with the desktop handler");
                open::that(uri)
            }
        };
        result.map_err(|e| {
            warn!("cannot open URI: {}", e);
            NoHandlerFound::for_uri(uri)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn closure_dispatcher() {
        let d = |uri: &str| -> Result<(), NoHandlerFound> {
            if uri.starts_with("mailto:") {
                Ok(())
            } else {
                Err(NoHandlerFound::for_uri(uri))
            }
        };
        assert!(d.dispatch("mailto:a@example.org").is_ok());
        assert_eq!(d.dispatch("foo:bar").unwrap_err().scheme(), "foo");
    }

    #[test]
    fn missing_program_is_no_handler() {
        let d = SystemDispatcher::with_program("/nonexistent/mailto-client-for-tests");
        let err = d.dispatch("mailto:a@example.org").unwrap_err();
        assert_eq!(err.scheme(), "mailto");
    }

    #[cfg(unix)]
    #[test]
    fn configured_program_does_not_block_caller() {
        // `sleep 5` stands in for a mail client that stays open.
        let d = SystemDispatcher::with_program("sleep");
        let started = Instant::now();
        assert!(d.dispatch("5").is_ok());
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}
