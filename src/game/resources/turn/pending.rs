//! Single-flight guard for move provider requests

/// Tracks the one provider request allowed in flight
///
/// Each request gets a fresh id; a reply is only honoured if its id is the
/// one still in flight, so a late reply to a superseded request is dropped.
#[derive(Debug, Default, Clone)]
pub struct ProviderRequestGuard {
    in_flight: Option<u64>,
    next_id: u64,
}

impl ProviderRequestGuard {
    /// Start a request. Returns `None` if one is already outstanding.
    pub fn request(&mut self) -> Option<u64> {
        if self.in_flight.is_some() {
            return None;
        }
        self.next_id += 1;
        self.in_flight = Some(self.next_id);
        Some(self.next_id)
    }

    /// Finish request `id`. Returns `false` when `id` is stale.
    pub fn take(&mut self, id: u64) -> bool {
        if self.in_flight == Some(id) {
            self.in_flight = None;
            true
        } else {
            false
        }
    }

    /// Forget any outstanding request; its reply will be treated as stale
    pub fn reset(&mut self) {
        self.in_flight = None;
    }

    pub fn is_pending(&self) -> bool {
        self.in_flight.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_request_is_single_flight() {
        let mut guard = ProviderRequestGuard::default();
        let id = guard.request().unwrap();
        assert!(guard.is_pending());
        assert!(guard.request().is_none());

        assert!(!guard.take(id + 1));
        assert!(guard.take(id));
        assert!(!guard.is_pending());
        assert!(!guard.take(id));
    }

    #[test]
    fn test_reset_makes_reply_stale() {
        let mut guard = ProviderRequestGuard::default();
        let first = guard.request().unwrap();
        guard.reset();
        let second = guard.request().unwrap();
        assert_ne!(first, second);
        assert!(!guard.take(first));
        assert!(guard.take(second));
    }
}
