use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global string interner for element ids. Snapshots copy ids by value,
/// so they stay 4 bytes and compare in O(1).
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Opaque, unique identifier of an element within a scene.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(Spur);

impl ElementId {
    /// Intern a string as an ElementId, or return the existing one.
    pub fn intern(s: &str) -> Self {
        ElementId(INTERNER.get_or_intern(s))
    }

    /// Resolve back to a string slice.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// Next candidate id of the form `el_<n>`.
    ///
    /// Candidates are unique within the process but not across reloads;
    /// callers that hold a scene should go through [`ElementId::fresh`].
    pub fn generate() -> Self {
        let n = COUNTER.fetch_add(1, Ordering::Relaxed);
        Self::intern(&format!("el_{n}"))
    }

    /// Generate an id for which `taken` returns false.
    pub fn fresh(mut taken: impl FnMut(ElementId) -> bool) -> Self {
        loop {
            let candidate = Self::generate();
            if !taken(candidate) {
                return candidate;
            }
            log::trace!("id {} already in scene, skipping", candidate.as_str());
        }
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ElementId::intern(&s))
    }
}
