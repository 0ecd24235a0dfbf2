//! Special placements: hand-authored adjustments that override the defaults
//!
//! Placement data is addressed by `(grid mode, orientation key, letter)`. Each
//! document maps a turns tuple such as `"(1, 0.5)"` to attribute keys
//! (`"blue"`, `"red"`, `"pro"`, ...) and their `[dx, dy]` adjustments:
//!
//! ```json
//! { "(1, 0.5)": { "blue": [10, -5], "red": [0, 20] } }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use glam::{DVec2, dvec2};
use serde::{Deserialize, Serialize};

use crate::errors::OverrideError;
use crate::letter::Letter;
use crate::log::{debug, warn};
use crate::types::{GridMode, format_turns_tuple, parse_turns_tuple};

/// Combined orientation class of both props, used to address placement data
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationKey {
    /// Both props radial (in/out)
    FromLayer1,
    /// Both props non-radial (clock/counter)
    FromLayer2,
    /// Blue radial, red non-radial
    FromLayer3Blue1Red2,
    /// Blue non-radial, red radial
    FromLayer3Blue2Red1,
}

impl OrientationKey {
    pub const ALL: [OrientationKey; 4] = [
        OrientationKey::FromLayer1,
        OrientationKey::FromLayer2,
        OrientationKey::FromLayer3Blue1Red2,
        OrientationKey::FromLayer3Blue2Red1,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            OrientationKey::FromLayer1 => "from_layer1",
            OrientationKey::FromLayer2 => "from_layer2",
            OrientationKey::FromLayer3Blue1Red2 => "from_layer3_blue1_red2",
            OrientationKey::FromLayer3Blue2Red1 => "from_layer3_blue2_red1",
        }
    }
}

impl fmt::Display for OrientationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Placement Documents
// ============================================================================

/// Special placements for one letter: turns tuple → attribute key → `[dx, dy]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LetterPlacements {
    entries: BTreeMap<String, BTreeMap<String, [f64; 2]>>,
}

impl LetterPlacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a placement document
    ///
    /// Turns tuple keys are rewritten to their canonical spelling, so an
    /// authored `"(1.0, 0.5)"` is found under `"(1, 0.5)"`. Keys that are not
    /// turns tuples are kept as written.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, BTreeMap<String, [f64; 2]>> = serde_json::from_str(json)?;
        let entries = raw
            .into_iter()
            .map(|(key, attributes)| match parse_turns_tuple(&key).ok() {
                Some((blue, red)) => (format_turns_tuple(blue, red), attributes),
                None => {
                    debug!(%key, "keeping non-tuple placement key");
                    (key, attributes)
                }
            })
            .collect();
        Ok(Self { entries })
    }

    /// Builder-style insert
    pub fn with(mut self, turns_tuple: &str, attribute: &str, adjustment: DVec2) -> Self {
        self.insert(turns_tuple, attribute, adjustment);
        self
    }

    pub fn insert(&mut self, turns_tuple: &str, attribute: &str, adjustment: DVec2) {
        self.entries
            .entry(turns_tuple.to_string())
            .or_default()
            .insert(attribute.to_string(), adjustment.to_array());
    }

    pub fn get(&self, turns_tuple: &str, attribute: &str) -> Option<DVec2> {
        let [x, y] = *self.entries.get(turns_tuple)?.get(attribute)?;
        Some(dvec2(x, y))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Where special placement documents come from
///
/// `Ok(None)` means no document exists for the address, which is normal.
pub trait OverrideSource: Send + Sync {
    fn fetch(
        &self,
        grid_mode: GridMode,
        ori_key: OrientationKey,
        letter: Letter,
    ) -> Result<Option<LetterPlacements>, OverrideError>;
}

/// A source with no documents at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverrides;

impl OverrideSource for NoOverrides {
    fn fetch(&self, _: GridMode, _: OrientationKey, _: Letter) -> Result<Option<LetterPlacements>, OverrideError> {
        Ok(None)
    }
}

/// Documents held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryOverrideSource {
    documents: HashMap<(GridMode, OrientationKey, Letter), LetterPlacements>,
}

impl MemoryOverrideSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter, placements: LetterPlacements) -> Self {
        self.insert(grid_mode, ori_key, letter, placements);
        self
    }

    pub fn insert(&mut self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter, placements: LetterPlacements) {
        self.documents.insert((grid_mode, ori_key, letter), placements);
    }
}

impl OverrideSource for MemoryOverrideSource {
    fn fetch(
        &self,
        grid_mode: GridMode,
        ori_key: OrientationKey,
        letter: Letter,
    ) -> Result<Option<LetterPlacements>, OverrideError> {
        Ok(self.documents.get(&(grid_mode, ori_key, letter)).cloned())
    }
}

/// Documents laid out as `<root>/<grid mode>/<orientation key>/<letter>.json`
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    root: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn document_path(&self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter) -> PathBuf {
        self.root
            .join(grid_mode.as_str())
            .join(ori_key.as_str())
            .join(format!("{letter}.json"))
    }

    fn read(path: &Path) -> Result<Option<String>, OverrideError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(OverrideError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }
}

impl OverrideSource for JsonDirectorySource {
    fn fetch(
        &self,
        grid_mode: GridMode,
        ori_key: OrientationKey,
        letter: Letter,
    ) -> Result<Option<LetterPlacements>, OverrideError> {
        let path = self.document_path(grid_mode, ori_key, letter);
        let Some(text) = Self::read(&path)? else {
            return Ok(None);
        };
        LetterPlacements::from_json(&text)
            .map(Some)
            .map_err(|source| OverrideError::Json {
                path: path.display().to_string(),
                source,
            })
    }
}

// ============================================================================
// Cache
// ============================================================================

type Address = (GridMode, OrientationKey, Letter);
type Slot = Arc<OnceLock<Option<Arc<LetterPlacements>>>>;

/// Fetches each address at most once per cache lifetime
///
/// Misses and fetch failures are cached as empty. Concurrent lookups of the
/// same address wait on the single in-flight fetch.
pub struct OverrideCache {
    source: Box<dyn OverrideSource>,
    slots: RwLock<HashMap<Address, Slot>>,
}

impl fmt::Debug for OverrideCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverrideCache")
            .field("cached", &self.cached_len())
            .finish_non_exhaustive()
    }
}

impl Default for OverrideCache {
    fn default() -> Self {
        Self::new(NoOverrides)
    }
}

impl OverrideCache {
    pub fn new(source: impl OverrideSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Placements for an address, fetching on first use
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn placements(&self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter) -> Option<Arc<LetterPlacements>> {
        let slot = self.slot((grid_mode, ori_key, letter));
        slot.get_or_init(|| match self.source.fetch(grid_mode, ori_key, letter) {
            Ok(Some(placements)) => {
                debug!(%grid_mode, %ori_key, %letter, "loaded special placements");
                Some(Arc::new(placements))
            }
            Ok(None) => None,
            Err(error) => {
                warn!(%grid_mode, %ori_key, %letter, %error, "special placement fetch failed, treating as empty");
                None
            }
        })
        .clone()
    }

    /// Placements for an address only if already fetched; never fetches
    pub fn cached(&self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter) -> Option<Arc<LetterPlacements>> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.get(&(grid_mode, ori_key, letter))?.get()?.clone()
    }

    /// Whether a fetch for this address has completed
    pub fn is_cached(&self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter) -> bool {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&(grid_mode, ori_key, letter))
            .is_some_and(|slot| slot.get().is_some())
    }

    /// Addresses whose fetch has completed, hits and misses alike, in order
    pub fn cached_triples(&self) -> Vec<(GridMode, OrientationKey, Letter)> {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        let mut triples: Vec<_> = slots
            .iter()
            .filter(|(_, slot)| slot.get().is_some())
            .map(|(address, _)| *address)
            .collect();
        triples.sort();
        triples
    }

    pub fn cached_len(&self) -> usize {
        let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.get().is_some()).count()
    }

    fn slot(&self, address: Address) -> Slot {
        {
            let slots = self.slots.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(slot) = slots.get(&address) {
                return Arc::clone(slot);
            }
        }
        let mut slots = self.slots.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(slots.entry(address).or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Counting<S> {
        inner: S,
        calls: Arc<AtomicUsize>,
    }

    impl<S: OverrideSource> OverrideSource for Counting<S> {
        fn fetch(&self, grid_mode: GridMode, ori_key: OrientationKey, letter: Letter) -> Result<Option<LetterPlacements>, OverrideError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.fetch(grid_mode, ori_key, letter)
        }
    }

    struct Failing;

    impl OverrideSource for Failing {
        fn fetch(&self, _: GridMode, _: OrientationKey, _: Letter) -> Result<Option<LetterPlacements>, OverrideError> {
            Err(OverrideError::Unavailable {
                message: "offline".to_string(),
            })
        }
    }

    #[test]
    fn placements_parse_from_json() {
        let placements = LetterPlacements::from_json(r#"{ "(1, 0.5)": { "blue": [10, -5], "pro": [3.5, 0] } }"#).unwrap();
        assert_eq!(placements.get("(1, 0.5)", "blue"), Some(dvec2(10.0, -5.0)));
        assert_eq!(placements.get("(1, 0.5)", "pro"), Some(dvec2(3.5, 0.0)));
        assert_eq!(placements.get("(1, 0.5)", "red"), None);
        assert_eq!(placements.get("(0, 0)", "blue"), None);
    }

    #[test]
    fn tuple_keys_are_canonicalized() {
        let placements = LetterPlacements::from_json(r#"{ "(1.0, 0.50)": { "red": [1, 2] }, "notes": {} }"#).unwrap();
        assert_eq!(placements.get("(1, 0.5)", "red"), Some(dvec2(1.0, 2.0)));
        assert_eq!(placements.get("(1.0, 0.50)", "red"), None);
    }

    #[test]
    fn each_address_is_fetched_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = MemoryOverrideSource::new().with(
            GridMode::Diamond,
            OrientationKey::FromLayer1,
            Letter::A,
            LetterPlacements::new().with("(0, 0)", "blue", dvec2(1.0, 2.0)),
        );
        let cache = OverrideCache::new(Counting {
            inner: source,
            calls: Arc::clone(&calls),
        });

        for _ in 0..3 {
            assert!(cache.placements(GridMode::Diamond, OrientationKey::FromLayer1, Letter::A).is_some());
            assert!(cache.placements(GridMode::Diamond, OrientationKey::FromLayer1, Letter::B).is_none());
        }
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            cache.cached_triples(),
            [
                (GridMode::Diamond, OrientationKey::FromLayer1, Letter::A),
                (GridMode::Diamond, OrientationKey::FromLayer1, Letter::B),
            ]
        );
    }

    #[test]
    fn failures_are_cached_as_empty() {
        let cache = OverrideCache::new(Failing);
        assert!(!cache.is_cached(GridMode::Box, OrientationKey::FromLayer2, Letter::C));
        assert!(cache.placements(GridMode::Box, OrientationKey::FromLayer2, Letter::C).is_none());
        assert!(cache.is_cached(GridMode::Box, OrientationKey::FromLayer2, Letter::C));
    }

    #[test]
    fn cached_never_fetches() {
        let calls = Arc::new(AtomicUsize::new(0));
        let cache = OverrideCache::new(Counting {
            inner: NoOverrides,
            calls: Arc::clone(&calls),
        });
        assert!(cache.cached(GridMode::Diamond, OrientationKey::FromLayer1, Letter::A).is_none());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn directory_source_paths() {
        let source = JsonDirectorySource::new("/data/placements");
        let path = source.document_path(GridMode::Box, OrientationKey::FromLayer3Blue2Red1, Letter::ThetaDash);
        assert_eq!(path, PathBuf::from("/data/placements/box/from_layer3_blue2_red1/θ-.json"));
    }

    #[test]
    fn directory_source_missing_file_is_none() {
        let source = JsonDirectorySource::new(std::env::temp_dir().join("pictograph-no-such-dir"));
        let fetched = source.fetch(GridMode::Diamond, OrientationKey::FromLayer1, Letter::A).unwrap();
        assert!(fetched.is_none());
    }
}
