//! Magic bitboards for sliding-piece attacks.
//!
//! For every square the relevant occupancy (the squares along the piece's
//! rays, minus the last square of each ray) is multiplied by a 64-bit
//! constant and shifted down so that every subset lands on its own slot in
//! a per-square segment of one shared attack table. Two subsets may share a
//! slot only when they produce the same attack set.

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::types::{Bitboard, Direction, Square};

/// Candidate constants tried per square before a search gives up.
pub const MAX_MAGIC_ATTEMPTS: usize = 1_000_000;

// Base seed for replacing a built-in constant that fails verification
const FALLBACK_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Sliding piece geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    #[inline]
    #[must_use]
    pub const fn directions(self) -> [Direction; 4] {
        match self {
            Slider::Rook => Direction::ORTHOGONAL,
            Slider::Bishop => Direction::DIAGONAL,
        }
    }
}

/// Perfect-hash parameters for one square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MagicEntry {
    pub mask: Bitboard,
    pub magic: u64,
    pub shift: u32,
    pub offset: usize,
}

impl MagicEntry {
    /// Slot of `occupancy` within this square's segment
    #[inline]
    #[must_use]
    pub const fn index(&self, occupancy: Bitboard) -> usize {
        ((occupancy.0 & self.mask.0).wrapping_mul(self.magic) >> self.shift) as usize
    }

    /// Segment length, `2^(64 - shift)`
    #[inline]
    #[must_use]
    pub const fn table_len(&self) -> usize {
        1usize << (64 - self.shift)
    }
}

pub(crate) struct SliderTable {
    entries: [MagicEntry; 64],
    attacks: Vec<Bitboard>,
}

impl SliderTable {
    #[inline]
    pub(crate) fn attacks(&self, sq: Square, occupancy: Bitboard) -> Bitboard {
        let entry = &self.entries[sq.index()];
        self.attacks[entry.offset + entry.index(occupancy)]
    }

    #[inline]
    pub(crate) fn entry(&self, sq: Square) -> &MagicEntry {
        &self.entries[sq.index()]
    }

    pub(crate) fn len(&self) -> usize {
        self.attacks.len()
    }

    /// Commit precomputed constants, checking each against every subset.
    pub(crate) fn from_magics(slider: Slider, magics: &[u64; 64]) -> Self {
        Self::assemble(slider, |sq| {
            let magic = magics[sq.index()];
            if let Some(segment) = fill_segment(slider, sq, magic) {
                return (magic, segment);
            }
            warn!("{slider:?} magic {magic:#018x} collides on {sq}, searching a replacement");
            let mut rng = StdRng::seed_from_u64(FALLBACK_SEED ^ sq.index() as u64);
            searched_segment(slider, sq, &mut rng)
        })
    }

    /// Search a fresh constant for every square.
    pub(crate) fn from_search(slider: Slider, rng: &mut StdRng) -> Self {
        Self::assemble(slider, |sq| searched_segment(slider, sq, rng))
    }

    fn assemble(slider: Slider, mut segment_for: impl FnMut(Square) -> (u64, Vec<Bitboard>)) -> Self {
        let mut entries = [MagicEntry::default(); 64];
        let mut attacks = Vec::new();
        for sq in Square::all() {
            let (magic, segment) = segment_for(sq);
            let mask = relevant_mask(slider, sq);
            let entry = MagicEntry {
                mask,
                magic,
                shift: 64 - mask.popcount(),
                offset: attacks.len(),
            };
            debug_assert_eq!(segment.len(), entry.table_len());
            entries[sq.index()] = entry;
            attacks.extend(segment);
        }
        SliderTable { entries, attacks }
    }
}

/// Squares whose occupancy can change `slider`'s attacks from `sq`.
#[must_use]
pub fn relevant_mask(slider: Slider, sq: Square) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    for dir in slider.directions() {
        let mut current = sq;
        while let Some(next) = current.offset(dir) {
            // the last square of a ray is attacked whether or not it is occupied
            if next.offset(dir).is_none() {
                break;
            }
            mask |= next.bitboard();
            current = next;
        }
    }
    mask
}

/// Attacks found by walking each ray until the first occupied square.
#[must_use]
pub fn sliding_attacks(slider: Slider, sq: Square, occupancy: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    for dir in slider.directions() {
        let mut current = sq;
        while let Some(next) = current.offset(dir) {
            attacks |= next.bitboard();
            if occupancy.contains(next) {
                break;
            }
            current = next;
        }
    }
    attacks
}

/// Every subset of `mask`, starting with `mask` itself and ending with the
/// empty set (carry-rippler enumeration).
pub fn subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mut next = Some(mask.0);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current == 0 {
            None
        } else {
            Some((current - 1) & mask.0)
        };
        Some(Bitboard(current))
    })
}

/// Search for a constant that hashes every relevant occupancy of `sq`
/// without a harmful collision. Gives up after [`MAX_MAGIC_ATTEMPTS`].
pub fn find_magic<R: Rng + ?Sized>(slider: Slider, sq: Square, rng: &mut R) -> Option<u64> {
    search(slider, sq, rng).map(|(magic, _)| magic)
}

fn search<R: Rng + ?Sized>(slider: Slider, sq: Square, rng: &mut R) -> Option<(u64, Vec<Bitboard>)> {
    let mask = relevant_mask(slider, sq);
    let shift = 64 - mask.popcount();
    let cases: Vec<(Bitboard, Bitboard)> = subsets(mask)
        .map(|occ| (occ, sliding_attacks(slider, sq, occ)))
        .collect();
    let mut table = vec![Bitboard::EMPTY; cases.len()];
    let mut stamp = vec![0usize; cases.len()];

    for attempt in 1..=MAX_MAGIC_ATTEMPTS {
        let magic = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        // the top byte of mask * magic must be well populated to spread indices
        if (mask.0.wrapping_mul(magic) >> 56).count_ones() < 6 {
            continue;
        }
        let entry = MagicEntry {
            mask,
            magic,
            shift,
            offset: 0,
        };
        let fits = cases.iter().all(|&(occ, attacks)| {
            let idx = entry.index(occ);
            if stamp[idx] == attempt {
                table[idx] == attacks
            } else {
                stamp[idx] = attempt;
                table[idx] = attacks;
                true
            }
        });
        if fits {
            if attempt > MAX_MAGIC_ATTEMPTS / 10 {
                warn!("{slider:?} magic for {sq} took {attempt} attempts");
            }
            return fill_segment(slider, sq, magic).map(|segment| (magic, segment));
        }
    }
    None
}

fn searched_segment<R: Rng + ?Sized>(slider: Slider, sq: Square, rng: &mut R) -> (u64, Vec<Bitboard>) {
    match search(slider, sq, rng) {
        Some(found) => found,
        None => panic!(
            "no {slider:?} magic found for {sq} within {MAX_MAGIC_ATTEMPTS} attempts"
        ),
    }
}

/// Lay out `sq`'s segment for `magic`, or `None` if two subsets with
/// different attacks share a slot.
fn fill_segment(slider: Slider, sq: Square, magic: u64) -> Option<Vec<Bitboard>> {
    let mask = relevant_mask(slider, sq);
    let entry = MagicEntry {
        mask,
        magic,
        shift: 64 - mask.popcount(),
        offset: 0,
    };
    let mut slots: Vec<Option<Bitboard>> = vec![None; entry.table_len()];
    for occ in subsets(mask) {
        let attacks = sliding_attacks(slider, sq, occ);
        let idx = entry.index(occ);
        match slots[idx] {
            Some(existing) if existing != attacks => return None,
            _ => slots[idx] = Some(attacks),
        }
    }
    Some(
        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Bitboard::EMPTY))
            .collect(),
    )
}

#[rustfmt::skip]
pub(crate) const ROOK_MAGICS: [u64; 64] = [
    0x0a8002c000108020, 0x4440200140003000, 0x8080200010011880, 0x0380180080141000,
    0x1a00060008211044, 0x410001000a0c0008, 0x9500060004008100, 0x0100024284a20700,
    0x0000802140008000, 0x0080c01002a00840, 0x0402004282011020, 0x9862000820420050,
    0x0001001448011100, 0x6432800200800400, 0x040100010002000c, 0x0002800d0010c080,
    0x90c0008000803042, 0x4010004000200041, 0x0003010010200040, 0x0a40828028001000,
    0x0123010008000430, 0x0024008004020080, 0x0060040001104802, 0x00582200028400d1,
    0x4000802080044000, 0x0408208200420308, 0x0610038080102000, 0x3601000900100020,
    0x0000080080040180, 0x00c2020080040080, 0x0080084400100102, 0x4022408200014401,
    0x0040052040800082, 0x0b08200280804000, 0x008a80a008801000, 0x4000480080801000,
    0x0911808800801401, 0x822a003002001894, 0x401068091400108a, 0x000004a10a00004c,
    0x2000800640008024, 0x1486408102020020, 0x000100a000d50041, 0x00810050020b0020,
    0x0204000800808004, 0x00020048100a000c, 0x0112000831020004, 0x0009000040810002,
    0x0440490200208200, 0x8910401000200040, 0x6404200050008480, 0x4b824a2010010100,
    0x04080801810c0080, 0x00000400802a0080, 0x8224080110026400, 0x40002c4104088200,
    0x01002100104a0282, 0x1208400811048021, 0x3201014a40d02001, 0x0005100019200501,
    0x0101000208001005, 0x0002008450080702, 0x001002080301d00c, 0x410201ce5c030092,
];

#[rustfmt::skip]
pub(crate) const BISHOP_MAGICS: [u64; 64] = [
    0x0040210414004040, 0x2290100115012200, 0x0a240400a6004201, 0x00080a0420800480,
    0x4022021000000061, 0x0031012010200000, 0x4404421051080068, 0x0001040882015000,
    0x8048c01206021210, 0x0222091024088820, 0x4328110102020200, 0x0901cc41052000d0,
    0xa828c20210000200, 0x0308419004a004e0, 0x4000840404860881, 0x0800008424020680,
    0x28100040100204a1, 0x0082001002080510, 0x9008103000204010, 0x141820040c00b000,
    0x0081010090402022, 0x0014400480602000, 0x008a008048443c00, 0x0000280202060220,
    0x3520100860841100, 0x9810083c02080100, 0x41003000620c0140, 0x06100400104010a0,
    0x0020840000802008, 0x40050a010900a080, 0x0818404001041602, 0x8040604006010400,
    0x1028044001041800, 0x0080b00828108200, 0xc000280c04080220, 0x3010020080880081,
    0x10004c0400004100, 0x3010020200002080, 0x202304019004020a, 0x0004208a0000e110,
    0x0108018410006000, 0x0202210120440800, 0x100850c828001000, 0x1401024204800800,
    0x0000041028800402, 0x0020642300480600, 0x0020410200800202, 0xca02480845000080,
    0x0140c404a0080410, 0x2180a40108884441, 0x4410420104980302, 0x1108040046080000,
    0x8141029012020008, 0x0894081818082800, 0x0040020404628000, 0x0804100c010c2122,
    0x8168210510101200, 0x0001088148121080, 0x0204010100c11010, 0x1814102013841400,
    0x0000c00010020602, 0x001045220c040820, 0x0012400808070840, 0x002004012a040132,
];
