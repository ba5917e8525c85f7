use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// One credential slot as handed out by the rotation.
#[derive(Debug, Clone)]
pub struct Credential {
    pub index: usize,
    pub key: String,
}

/// Process-wide API key rotation. The cursor advances after every failed
/// attempt and wraps modulo the slot count. Racing advances may skip or
/// repeat a slot, which is acceptable; the index itself never leaves the
/// list. A slot marked revoked stays unusable until the process restarts.
pub struct KeyRotation {
    keys: Vec<String>,
    cursor: AtomicUsize,
    revoked: Vec<AtomicBool>,
}

impl KeyRotation {
    pub fn new(keys: Vec<String>) -> Self {
        // At least one slot, so the modulo arithmetic below stays valid.
        let keys = if keys.is_empty() {
            vec![String::new()]
        } else {
            keys
        };
        let revoked = keys.iter().map(|_| AtomicBool::new(false)).collect();
        KeyRotation {
            keys,
            cursor: AtomicUsize::new(0),
            revoked,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.keys.len()
    }

    pub fn current(&self) -> Credential {
        let index = self.cursor.load(Ordering::Relaxed) % self.keys.len();
        Credential {
            index,
            key: self.keys[index].clone(),
        }
    }

    /// Moves the cursor to the next slot and returns the new index.
    pub fn advance(&self) -> usize {
        let len = self.keys.len();
        match self
            .cursor
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cursor| {
                Some((cursor + 1) % len)
            }) {
            Ok(previous) => (previous + 1) % len,
            // The closure always returns Some, so this arm is unreachable.
            Err(previous) => previous % len,
        }
    }

    pub fn mark_revoked(&self, index: usize) {
        if let Some(flag) = self.revoked.get(index) {
            flag.store(true, Ordering::Relaxed);
        }
    }

    pub fn is_revoked(&self, index: usize) -> bool {
        self.revoked
            .get(index)
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(true)
    }

    /// Whether any slot is configured and not yet revoked.
    pub fn has_usable_key(&self) -> bool {
        self.keys
            .iter()
            .enumerate()
            .any(|(index, key)| !key.is_empty() && !self.is_revoked(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn two_keys() -> KeyRotation {
        KeyRotation::new(vec!["key-a".to_string(), "key-b".to_string()])
    }

    #[test]
    fn cursor_starts_at_zero() {
        let rotation = two_keys();
        let credential = rotation.current();
        assert_eq!(credential.index, 0);
        assert_eq!(credential.key, "key-a");
    }

    #[test]
    fn advance_wraps_modulo_slot_count() {
        let rotation = two_keys();
        assert_eq!(rotation.advance(), 1);
        assert_eq!(rotation.advance(), 0);
        assert_eq!(rotation.current().index, 0);
    }

    #[test]
    fn advancing_slot_count_times_returns_to_start() {
        let rotation = two_keys();
        rotation.advance();
        let start = rotation.current().index;
        for _ in 0..rotation.slot_count() {
            rotation.advance();
        }
        assert_eq!(rotation.current().index, start);
    }

    #[test]
    fn revoked_slot_is_remembered() {
        let rotation = two_keys();
        assert!(!rotation.is_revoked(0));
        rotation.mark_revoked(0);
        assert!(rotation.is_revoked(0));
        assert!(rotation.has_usable_key());
        rotation.mark_revoked(1);
        assert!(!rotation.has_usable_key());
    }

    #[test]
    fn blank_keys_are_not_usable() {
        let rotation = KeyRotation::new(vec![String::new(), String::new()]);
        assert!(!rotation.has_usable_key());
        assert_eq!(rotation.slot_count(), 2);

        let rotation = KeyRotation::new(vec![String::new(), "key-b".to_string()]);
        assert!(rotation.has_usable_key());
    }

    #[test]
    fn empty_list_still_has_one_blank_slot() {
        let rotation = KeyRotation::new(Vec::new());
        assert_eq!(rotation.slot_count(), 1);
        assert!(!rotation.has_usable_key());
        rotation.advance();
        assert_eq!(rotation.current().index, 0);
    }

    #[test]
    fn concurrent_advances_keep_index_in_range() {
        let rotation = Arc::new(two_keys());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let rotation = rotation.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..1000 {
                    let index = rotation.advance();
                    assert!(index < rotation.slot_count());
                }
            }));
        }
        for handle in handles {
            handle.join().expect("worker panicked");
        }
        assert!(rotation.current().index < rotation.slot_count());
    }
}
