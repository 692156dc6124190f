/// Hands out record ids.
///
/// Ids are derived from the wall clock in milliseconds but never repeat within a session: a
/// second request in the same millisecond (or after the clock stepped backwards) gets
/// `last + 1`.
#[derive(Debug, Default)]
pub struct IdGenerator {
    last: Option<u64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> u64 {
        self.next_at(now_millis())
    }

    fn next_at(&mut self, now: u64) -> u64 {
        let id = match self.last {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last = Some(id);
        id
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

// `SystemTime::now` panics on wasm32-unknown-unknown.
#[cfg(target_arch = "wasm32")]
fn now_millis() -> u64 {
    js_sys::Date::now() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_clock_when_it_moves_forward() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(1_000), 1_000);
        assert_eq!(ids.next_at(1_500), 1_500);
    }

    #[test]
    fn test_same_millisecond_still_distinct() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(42), 42);
        assert_eq!(ids.next_at(42), 43);
        assert_eq!(ids.next_at(42), 44);
    }

    #[test]
    fn test_clock_stepping_back_keeps_increasing() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_at(100), 100);
        assert_eq!(ids.next_at(10), 101);
    }

    #[test]
    fn test_real_clock_is_strictly_increasing() {
        let mut ids = IdGenerator::new();
        let a = ids.next();
        let b = ids.next();
        assert!(b > a, "{b} should be greater than {a}");
    }
}
