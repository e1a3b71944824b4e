//! Capability tables: per category, the fixed mapping from operation and
//! element width to the feature predicate its vector instruction requires.
//!
//! The tables specify, on a high level, which instruction-set subset is
//! required for emitting each operation at each register width. At this level
//! nothing cares about the particular machine instruction; only a (possibly
//! conservative) estimate of the feature set it will need.
//!
//! Every table is built once into a `OnceLock` singleton and validated during
//! construction: a duplicate key, a duplicate width row or a non-power-of-two
//! width is a build defect and panics immediately. An *explicit* `None`
//! requirement is a legitimate row meaning "no such instruction exists at
//! this width, ever" — distinct from an absent row, which is a programming
//! error on the caller's side.

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::requirement::TierRequirement;

pub mod arithmetic;
pub mod blend;
pub mod compare;
pub mod compress;
pub mod convert;
pub mod gather;
pub mod mask;
pub mod permute;

/// Element category a single-width table is keyed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Integer elements (object references resolve here at their stride
    /// width).
    Int,
    /// Floating-point elements.
    Float,
}

/// One width row: the predicate for this element width, or `None` for "no
/// instruction exists".
#[derive(Debug, Clone, Copy)]
pub struct WidthRow {
    bits: u32,
    requirement: Option<TierRequirement>,
}

/// Row constructor used by the table modules.
pub(crate) const fn row(bits: u32, requirement: Option<TierRequirement>) -> WidthRow {
    WidthRow { bits, requirement }
}

pub(crate) type Rows = SmallVec<[WidthRow; 4]>;

/// A validated, immutable mapping from operation key to width rows.
pub struct CapabilityTable<K> {
    name: &'static str,
    rows: FxHashMap<K, Rows>,
}

impl<K: Eq + Hash + Debug> CapabilityTable<K> {
    /// Build and validate. Panics on any integrity defect; tables are static
    /// configuration, so a defect here is a bug, never a runtime condition.
    pub(crate) fn new(name: &'static str, entries: Vec<(K, Rows)>) -> Self {
        let mut rows: FxHashMap<K, Rows> = FxHashMap::default();
        for (key, key_rows) in entries {
            for (i, a) in key_rows.iter().enumerate() {
                assert!(
                    a.bits.is_power_of_two(),
                    "capability table defect: width {} for {key:?} in {name} is not a power of two",
                    a.bits
                );
                for b in &key_rows[i + 1..] {
                    assert!(
                        a.bits != b.bits,
                        "capability table defect: duplicate width {} for {key:?} in {name}",
                        a.bits
                    );
                }
            }
            let previous = rows.insert(key, key_rows);
            assert!(
                previous.is_none(),
                "capability table defect: duplicate key in {name}"
            );
        }
        Self { name, rows }
    }

    /// Predicate for `key` at `bits`, or `None` when the row says "no
    /// instruction exists".
    ///
    /// # Panics
    ///
    /// When `key` has no entry or the entry has no row at `bits`: requesting
    /// an unknown combination is a programming error and must not silently
    /// degrade to scalar.
    pub fn requirement(&self, key: &K, bits: u32) -> Option<TierRequirement> {
        let rows = self
            .rows
            .get(key)
            .unwrap_or_else(|| panic!("capability table defect: missing entry {key:?} in {}", self.name));
        rows.iter()
            .find(|r| r.bits == bits)
            .unwrap_or_else(|| {
                panic!(
                    "capability table defect: {} does not specify width {bits} for {key:?}",
                    self.name
                )
            })
            .requirement
    }
}

/// One conversion row: a (from, to) width pair and its predicate.
#[derive(Debug, Clone, Copy)]
pub struct ConvertRow {
    from_bits: u32,
    to_bits: u32,
    requirement: Option<TierRequirement>,
}

pub(crate) const fn convert_row(
    from_bits: u32,
    to_bits: u32,
    requirement: Option<TierRequirement>,
) -> ConvertRow {
    ConvertRow {
        from_bits,
        to_bits,
        requirement,
    }
}

pub(crate) type ConvertRows = SmallVec<[ConvertRow; 6]>;

/// The convert table's pair-keyed variant of [`CapabilityTable`].
pub struct ConvertCapabilityTable<K> {
    name: &'static str,
    rows: FxHashMap<K, ConvertRows>,
}

impl<K: Eq + Hash + Debug> ConvertCapabilityTable<K> {
    pub(crate) fn new(name: &'static str, entries: Vec<(K, ConvertRows)>) -> Self {
        let mut rows: FxHashMap<K, ConvertRows> = FxHashMap::default();
        for (key, key_rows) in entries {
            for (i, a) in key_rows.iter().enumerate() {
                assert!(
                    a.from_bits.is_power_of_two() && a.to_bits.is_power_of_two(),
                    "capability table defect: widths {}->{} for {key:?} in {name} must be powers of two",
                    a.from_bits,
                    a.to_bits
                );
                for b in &key_rows[i + 1..] {
                    assert!(
                        a.from_bits != b.from_bits || a.to_bits != b.to_bits,
                        "capability table defect: duplicate conversion {}->{} for {key:?} in {name}",
                        a.from_bits,
                        a.to_bits
                    );
                }
            }
            let previous = rows.insert(key, key_rows);
            assert!(
                previous.is_none(),
                "capability table defect: duplicate key in {name}"
            );
        }
        Self { name, rows }
    }

    fn find(&self, key: &K, from_bits: u32, to_bits: u32) -> Option<&ConvertRow> {
        let rows = self
            .rows
            .get(key)
            .unwrap_or_else(|| panic!("capability table defect: missing entry {key:?} in {}", self.name));
        rows.iter()
            .find(|r| r.from_bits == from_bits && r.to_bits == to_bits)
    }

    /// Predicate for the pair, with an absent pair meaning "no instruction
    /// exists" — the public convert-query contract.
    pub fn requirement_opt(&self, key: &K, from_bits: u32, to_bits: u32) -> Option<TierRequirement> {
        self.find(key, from_bits, to_bits).and_then(|r| r.requirement)
    }

    /// Predicate for a pair the caller knows must be present (the blend
    /// condition scans only query pairs the table specifies).
    ///
    /// # Panics
    ///
    /// When the pair is absent.
    pub fn requirement_required(
        &self,
        key: &K,
        from_bits: u32,
        to_bits: u32,
    ) -> Option<TierRequirement> {
        self.find(key, from_bits, to_bits)
            .unwrap_or_else(|| {
                panic!(
                    "capability table defect: {} does not specify conversion {}->{} for {key:?}",
                    self.name, from_bits, to_bits
                )
            })
            .requirement
    }
}
