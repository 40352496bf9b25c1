//! 16×16 coin artwork. `1` is the coin disc; any non-zero digit in a face is a feature pixel.

use crate::coin::{FaceVariant, Side};

use super::pixels::Rgb;

pub const SIZE: usize = 16;

type Bitmap = [&'static str; SIZE];

#[rustfmt::skip]
pub const DISC: Bitmap = [
    "0000001111000000",
    "0000111111110000",
    "0001111111111000",
    "0011111111111100",
    "0111111111111110",
    "0111111111111110",
    "1111111111111111",
    "1111111111111111",
    "1111111111111111",
    "1111111111111111",
    "0111111111111110",
    "0111111111111110",
    "0011111111111100",
    "0001111111111000",
    "0000111111110000",
    "0000001111000000",
];

#[rustfmt::skip]
const KING: Bitmap = [
    "0000000000000000",
    "0000002020000000",
    "0000202020200000",
    "0000222222200000",
    "0000000000000000",
    "0000200000020000",
    "0000200000020000",
    "0000000000000000",
    "0000002002000000",
    "0000022222200000",
    "0000002222000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const SUN: Bitmap = [
    "0000000220000000",
    "0000200000020000",
    "0000000000000000",
    "0020000000000200",
    "0000002002000000",
    "0000002002000000",
    "0000002002000000",
    "0200000000000020",
    "0200000220000020",
    "0000002222000000",
    "0020020000200200",
    "0000000000000000",
    "0000200000020000",
    "0000000220000000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const JESTER: Bitmap = [
    "0000000000000000",
    "0000002020000000",
    "0000020002000000",
    "0000022222000000",
    "0000000000000000",
    "0000020002000000",
    "0000000000000000",
    "0000000200000000",
    "0002000000020000",
    "0002200000220000",
    "0000222222200000",
    "0000022222000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const HARVEST: Bitmap = [
    "0000000000000000",
    "0002000000002000",
    "0002000220002000",
    "0002200220022000",
    "0002200220022000",
    "0000220220220000",
    "0000222222220000",
    "0000022222200000",
    "0000002222000000",
    "0000000220000000",
    "0000000220000000",
    "0000000220000000",
    "0000000220000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const DRAGON: Bitmap = [
    "0000000000000000",
    "0000002002000000",
    "0000020000200000",
    "0000222222220000",
    "0002002200002000",
    "0020002200000200",
    "0020002200000200",
    "0020002200000200",
    "0020002200000200",
    "0002002200002000",
    "0000222222220000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const SKULL: Bitmap = [
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
    "0000022222200000",
    "0000020202200000",
    "0000022222200000",
    "0000002022000000",
    "0000022222220000",
    "0000220002200000",
    "0000220002200000",
    "0000222222222000",
    "0000222222222000",
    "0000002222200000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const GHOST: Bitmap = [
    "0000000000000000",
    "0000001111000000",
    "0000111111110000",
    "0001111111111000",
    "0001101100111000",
    "0001111111111000",
    "0001111111111000",
    "0001111111111000",
    "0001111111111000",
    "0001111111111000",
    "0001111111111000",
    "0001111111111000",
    "0001110111011100",
    "0001000100010000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const SERPENT: Bitmap = [
    "0000000000000000",
    "0000022222000000",
    "0000220202000000",
    "0002022222200000",
    "0020220000000000",
    "0000220000000000",
    "0000022222000000",
    "0000000002200000",
    "0000000022000000",
    "0000000220000000",
    "0000022200000000",
    "0000220000000000",
    "0000222222200000",
    "0000222222200000",
    "0000000000000000",
    "0000000000000000",
];

#[rustfmt::skip]
const DEMON: Bitmap = [
    "0000000000000000",
    "0002000000002000",
    "0002200000022000",
    "0000220000220000",
    "0000022222200000",
    "0000020000200000",
    "0000020000200000",
    "0000022222200000",
    "0000002222000000",
    "0000002222000000",
    "0000020000200000",
    "0000020220200000",
    "0000002002000000",
    "0000000000000000",
    "0000000000000000",
    "0000000000000000",
];

pub fn bitmap(face: FaceVariant) -> &'static Bitmap {
    match face {
        FaceVariant::King => &KING,
        FaceVariant::Sun => &SUN,
        FaceVariant::Jester => &JESTER,
        FaceVariant::Harvest => &HARVEST,
        FaceVariant::Dragon => &DRAGON,
        FaceVariant::Skull => &SKULL,
        FaceVariant::Ghost => &GHOST,
        FaceVariant::Serpent => &SERPENT,
        FaceVariant::Demon => &DEMON,
    }
}

pub fn in_disc(x: usize, y: usize) -> bool {
    DISC[y].as_bytes()[x] != b'0'
}

pub fn is_feature(face: FaceVariant, x: usize, y: usize) -> bool {
    bitmap(face)[y].as_bytes()[x] != b'0'
}

/// Metal colors for one side: body, feature, edge ridge, edge groove.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub body: Rgb,
    pub feature: Rgb,
    pub ridge: Rgb,
    pub groove: Rgb,
}

pub const GOLD: Palette = Palette {
    body: Rgb::hex(0xF59E0B),
    feature: Rgb::hex(0x78350F),
    ridge: Rgb::hex(0xD97706),
    groove: Rgb::hex(0x92400E),
};

pub const SILVER: Palette = Palette {
    body: Rgb::hex(0xCBD5E1),
    feature: Rgb::hex(0x475569),
    ridge: Rgb::hex(0x64748B),
    groove: Rgb::hex(0x1E293B),
};

pub fn palette(side: Side) -> Palette {
    match side {
        Side::Heads => GOLD,
        Side::Tails => SILVER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_bitmap_is_square() {
        for face in FaceVariant::ALL {
            for row in bitmap(face) {
                assert_eq!(row.len(), SIZE, "{}", face.name());
            }
        }
        for row in DISC {
            assert_eq!(row.len(), SIZE);
        }
    }

    #[test]
    fn disc_is_round() {
        assert!(!in_disc(0, 0));
        assert!(in_disc(8, 8));
        assert!(in_disc(0, 7));
    }
}
