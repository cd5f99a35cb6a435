//! Session URL codec.
//!
//! A single `session_id` query parameter on the addressable location is the
//! entire shareable state of a conversation. The codec functions here read
//! and write that parameter through the [`AddressableLocation`] seam; the
//! conversation store remains the source of truth, and the location is only
//! consulted at process start (see the orchestrator's startup hint).

use std::sync::Mutex;

use url::Url;

use crate::error::Result;

/// Name of the query parameter carrying the session id.
pub const SESSION_ID_PARAM: &str = "session_id";

/// The addressable location of the running client.
///
/// Implementations replace the location in place, without creating a history
/// entry, so back/forward navigation is unaffected.
pub trait AddressableLocation: Send + Sync {
    /// Returns the current location.
    fn current(&self) -> Url;

    /// Replaces the current location.
    fn replace(&self, url: Url);
}

/// Writes the session id parameter, replacing any existing value.
///
/// Other query parameters are preserved. Idempotent.
pub fn set_session_id(location: &dyn AddressableLocation, session_id: &str) {
    let mut url = location.current();
    let retained = other_pairs(&url);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
        pairs.append_pair(SESSION_ID_PARAM, session_id);
    }
    location.replace(url);
}

/// Reads the session id parameter, if present.
pub fn session_id(location: &dyn AddressableLocation) -> Option<String> {
    location
        .current()
        .query_pairs()
        .find(|(key, _)| key == SESSION_ID_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Removes the session id parameter, preserving all others. Idempotent.
pub fn remove_session_id(location: &dyn AddressableLocation) {
    let mut url = location.current();
    let retained = other_pairs(&url);
    if retained.is_empty() {
        url.set_query(None);
    } else {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(retained);
    }
    location.replace(url);
}

/// Removes every query parameter.
pub fn clear_params(location: &dyn AddressableLocation) {
    let mut url = location.current();
    url.set_query(None);
    location.replace(url);
}

fn other_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .into_owned()
        .filter(|(key, _)| key != SESSION_ID_PARAM)
        .collect()
}

/// In-memory location for headless embedding and tests.
#[derive(Debug)]
pub struct MemoryLocation {
    url: Mutex<Url>,
}

impl MemoryLocation {
    /// Creates a location starting at the given URL.
    pub fn new(url: Url) -> Self {
        Self {
            url: Mutex::new(url),
        }
    }

    /// Parses the input and creates a location from it.
    pub fn parse(input: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(input)?))
    }
}

impl AddressableLocation for MemoryLocation {
    fn current(&self) -> Url {
        self.url.lock().expect("location lock poisoned").clone()
    }

    fn replace(&self, url: Url) {
        *self.url.lock().expect("location lock poisoned") = url;
    }
}
