use crate::sources::payload::ExternalPayload;
use crate::types::location::Location;
use log::debug;
use std::sync::Arc;
use tokio::sync::RwLock;

struct CachedPayload {
    location: Location,
    payload: Arc<ExternalPayload>,
}

/// Holds the most recently fetched external payload.
///
/// A later request for the same location may reuse it for a different date
/// sub-range when the source is unavailable. Neither reads nor writes ever
/// wait: if the slot is locked by someone else, a read is a miss and a write
/// is skipped.
#[derive(Default)]
pub struct PayloadCache {
    slot: RwLock<Option<CachedPayload>>,
}

impl PayloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached payload if it was fetched for `location`.
    pub fn latest_for(&self, location: &Location) -> Option<Arc<ExternalPayload>> {
        let guard = match self.slot.try_read() {
            Ok(guard) => guard,
            Err(_) => {
                debug!("Payload cache busy, treating as a miss");
                return None;
            }
        };
        guard
            .as_ref()
            .filter(|cached| cached.location == *location)
            .map(|cached| Arc::clone(&cached.payload))
    }

    /// Replaces the cached payload. Returns `false` if the slot was busy.
    pub fn store(&self, location: Location, payload: Arc<ExternalPayload>) -> bool {
        match self.slot.try_write() {
            Ok(mut guard) => {
                *guard = Some(CachedPayload { location, payload });
                true
            }
            Err(_) => {
                debug!("Payload cache busy, skipping store");
                false
            }
        }
    }

    pub fn clear(&self) {
        if let Ok(mut guard) = self.slot.try_write() {
            *guard = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.slot
            .try_read()
            .map(|guard| guard.is_none())
            .unwrap_or(false)
    }
}
