use crate::menu::{SLICE_ANGLE, SLICE_COUNT};
use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    #[strum(serialize = "North", serialize = "n", serialize = "0")]
    North,
    #[strum(serialize = "NorthEast", serialize = "ne", serialize = "1")]
    NorthEast,
    #[strum(serialize = "East", serialize = "e", serialize = "2")]
    East,
    #[strum(serialize = "SouthEast", serialize = "se", serialize = "3")]
    SouthEast,
    #[strum(serialize = "South", serialize = "s", serialize = "4")]
    South,
    #[strum(serialize = "SouthWest", serialize = "sw", serialize = "5")]
    SouthWest,
    #[strum(serialize = "West", serialize = "w", serialize = "6")]
    West,
    #[strum(serialize = "NorthWest", serialize = "nw", serialize = "7")]
    NorthWest,
}

impl Position {
    pub fn as_index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(idx: usize) -> Option<Self> {
        Self::iter().nth(idx % 8)
    }

    /// The two slices a position owns before redistribution. Slices count
    /// clockwise on screen starting at East, so a position's pair is listed
    /// counter-clockwise end first.
    pub fn default_slices(&self) -> (Slice, Slice) {
        let (a, b) = match self {
            Self::East => (15, 0),
            Self::SouthEast => (1, 2),
            Self::South => (3, 4),
            Self::SouthWest => (5, 6),
            Self::West => (7, 8),
            Self::NorthWest => (9, 10),
            Self::North => (11, 12),
            Self::NorthEast => (13, 14),
        };
        (Slice(a), Slice(b))
    }
}

/// One of the sixteen 22.5° wedges around the origin. Wedge `k` covers
/// `[22.5·k, 22.5·(k+1))` degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slice(u8);

impl Slice {
    pub fn new(index: u8) -> Option<Self> {
        (index < SLICE_COUNT).then_some(Self(index))
    }

    /// Slice under an angle in degrees. Angles outside `[0, 360)` wrap.
    pub fn from_angle(degrees: f64) -> Self {
        let wrapped = degrees.rem_euclid(360.0);
        let index = (wrapped / SLICE_ANGLE).floor() as u8;
        Self(index.min(SLICE_COUNT - 1))
    }

    pub fn index(&self) -> u8 {
        self.0
    }

    pub fn prev(&self) -> Self {
        Self((self.0 + SLICE_COUNT - 1) % SLICE_COUNT)
    }

    pub fn next(&self) -> Self {
        Self((self.0 + 1) % SLICE_COUNT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SliceSet(u16);

impl SliceSet {
    pub const EMPTY: Self = Self(0);
    pub const FULL: Self = Self(u16::MAX);

    pub fn contains(&self, slice: Slice) -> bool {
        self.0 & (1 << slice.0) != 0
    }

    pub fn insert(&mut self, slice: Slice) -> bool {
        let fresh = !self.contains(slice);
        self.0 |= 1 << slice.0;
        fresh
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn is_full(&self) -> bool {
        *self == Self::FULL
    }

    pub fn is_disjoint(&self, other: SliceSet) -> bool {
        self.0 & other.0 == 0
    }

    pub fn union(&self, other: SliceSet) -> SliceSet {
        Self(self.0 | other.0)
    }

    pub fn iter(self) -> impl Iterator<Item = Slice> {
        (0..SLICE_COUNT)
            .map(Slice)
            .filter(move |s| self.contains(*s))
    }
}

impl FromIterator<Slice> for SliceSet {
    fn from_iter<I: IntoIterator<Item = Slice>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for slice in iter {
            set.insert(slice);
        }
        set
    }
}

/// A contiguous run of slices that grows outward from both ends.
#[derive(Debug, Clone, Copy)]
struct SliceArc {
    first: Slice,
    last: Slice,
    slices: SliceSet,
}

impl SliceArc {
    fn new(position: Position) -> Self {
        let (first, last) = position.default_slices();
        Self {
            first,
            last,
            slices: [first, last].into_iter().collect(),
        }
    }
}

/// Distributes all sixteen slices over the active positions.
///
/// Every position starts with its default pair. Each pass then lets every
/// position, in registration order, claim the free slice just before its
/// first slice and the free slice just after its last one, until nothing is
/// left. The returned sets are in the same order as `positions`.
///
/// Repeated positions start from the same pair; only the first registration
/// of a position can grow, since its neighbors are claimed before the
/// repeat gets a turn.
pub fn assign_slices(positions: &[Position]) -> Vec<SliceSet> {
    let mut arcs: Vec<SliceArc> = positions.iter().copied().map(SliceArc::new).collect();
    if arcs.is_empty() {
        return Vec::new();
    }

    let mut used = arcs
        .iter()
        .fold(SliceSet::EMPTY, |acc, arc| acc.union(arc.slices));

    // every free slice borders some arc, so each pass claims at least one
    while !used.is_full() {
        for arc in arcs.iter_mut() {
            let before = arc.first.prev();
            if used.insert(before) {
                arc.slices.insert(before);
                arc.first = before;
            }
            let after = arc.last.next();
            if used.insert(after) {
                arc.slices.insert(after);
                arc.last = after;
            }
        }
    }

    arcs.into_iter().map(|arc| arc.slices).collect()
}
