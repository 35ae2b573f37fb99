use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner for object IDs.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// A lightweight, interned identifier for canvas objects.
/// Internally a `Spur` index, so copies and hashing are O(1).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(Spur);

impl ObjectId {
    /// Intern a string as an ObjectId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ObjectId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Generate an ID that has never been interned in this process.
    ///
    /// IDs loaded from templates are interned on deserialize, so a fresh
    /// ID can never collide with an object already in the document.
    pub fn fresh() -> Self {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        loop {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let candidate = format!("obj_{n}");
            if !INTERNER.contains(&candidate) {
                return Self::intern(&candidate);
            }
        }
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ObjectId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = ObjectId::intern("V1StGXR8_Z5jdHi6B-myT");
        let b = ObjectId::intern("V1StGXR8_Z5jdHi6B-myT");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "V1StGXR8_Z5jdHi6B-myT");
    }

    #[test]
    fn fresh_ids_are_unique() {
        let a = ObjectId::fresh();
        let b = ObjectId::fresh();
        assert_ne!(a, b);
    }

    #[test]
    fn fresh_skips_ids_already_loaded() {
        // Pre-intern the next few counter values, as a loaded template would.
        let probe = ObjectId::fresh();
        let n: u64 = probe.as_str().trim_start_matches("obj_").parse().unwrap();
        for k in 1..=3 {
            ObjectId::intern(&format!("obj_{}", n + k));
        }
        let next = ObjectId::fresh();
        let m: u64 = next.as_str().trim_start_matches("obj_").parse().unwrap();
        assert!(m > n + 3, "fresh id {next} reused a loaded id");
    }
}
