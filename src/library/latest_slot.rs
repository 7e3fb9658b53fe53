use std::sync::Mutex;

/// Single-value handoff between a producer and a consumer thread.
///
/// The producer overwrites the slot on every publish, so a slow consumer
/// only ever observes the most recent value. A consumer that polls before
/// the first publish gets `None`.
pub struct LatestSlot<T> {
    value: Mutex<Option<T>>,
}

impl<T: Clone> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
        }
    }

    /// Replaces whatever the slot holds. Never blocks on the consumer.
    pub fn publish(&self, value: T) {
        *self.value.lock().unwrap() = Some(value);
    }

    /// Returns a copy of the most recently published value, leaving the
    /// slot untouched so repeated reads see the same value.
    pub fn latest(&self) -> Option<T> {
        self.value.lock().unwrap().clone()
    }

    #[allow(dead_code)]
    pub fn clear(&self) {
        *self.value.lock().unwrap() = None;
    }
}

impl<T: Clone> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_slot_returns_none() {
        let slot: LatestSlot<u32> = LatestSlot::new();
        assert_eq!(slot.latest(), None);
    }

    #[test]
    fn test_reader_sees_most_recent_publish() {
        let slot = LatestSlot::new();
        for n in 1..=5 {
            slot.publish(n);
        }
        assert_eq!(slot.latest(), Some(5));
    }

    #[test]
    fn test_read_does_not_consume() {
        let slot = LatestSlot::new();
        slot.publish("dog".to_string());
        assert_eq!(slot.latest(), Some("dog".to_string()));
        assert_eq!(slot.latest(), Some("dog".to_string()));
    }

    #[test]
    fn test_clear_empties_the_slot() {
        let slot = LatestSlot::new();
        slot.publish(7);
        slot.clear();
        assert_eq!(slot.latest(), None);
    }

    #[test]
    fn test_publish_from_another_thread() {
        let slot = Arc::new(LatestSlot::new());
        let writer = slot.clone();
        let handle = std::thread::spawn(move || {
            for n in 0..100 {
                writer.publish(n);
            }
        });
        handle.join().unwrap();
        assert_eq!(slot.latest(), Some(99));
    }
}
