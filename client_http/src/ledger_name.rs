//! The host ledger's 64-bit name encoding.
//!
//! A name packs up to 13 characters: twelve 5-bit symbols from the high bits
//! down, then one 4-bit symbol. Ballots are keyed by such a name, so the
//! engine's ballot counter is sent as `base + counter` rendered as a name.

use oig_types::BallotId;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";

fn symbol(c: u8) -> Option<u64> {
    match c {
        b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
        b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
        b'.' => Some(0),
        _ => None,
    }
}

/// Encode a name string. `None` when it is longer than 13 characters, uses a
/// character outside the ledger alphabet, or its 13th character does not fit
/// in four bits.
pub fn encode(name: &str) -> Option<u64> {
    let bytes = name.as_bytes();
    if bytes.len() > 13 {
        return None;
    }
    let mut value = 0u64;
    for (i, &c) in bytes.iter().enumerate() {
        let sym = symbol(c)?;
        if i < 12 {
            value |= (sym & 0x1f) << (64 - 5 * (i + 1));
        } else {
            if sym > 0x0f {
                return None;
            }
            value |= sym;
        }
    }
    Some(value)
}

/// Render a name value, trimming trailing dots.
pub fn decode(value: u64) -> String {
    let mut out = [b'.'; 13];
    let mut tmp = value;
    for i in 0..13 {
        let mask = if i == 0 { 0x0f } else { 0x1f };
        out[12 - i] = CHARMAP[(tmp & mask) as usize];
        tmp >>= if i == 0 { 4 } else { 5 };
    }
    let end = out.iter().rposition(|&c| c != b'.').map_or(0, |p| p + 1);
    out[..end].iter().map(|&c| c as char).collect()
}

/// Maps ballot counter values onto ledger names above a fixed base name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BallotNamer {
    base: u64,
}

impl BallotNamer {
    pub fn new(base: &str) -> Option<Self> {
        encode(base).map(|base| Self { base })
    }

    pub fn name(&self, ballot: BallotId) -> String {
        decode(self.base.wrapping_add(ballot.raw()))
    }
}
