//! QWERTY layout with touch-typing finger assignments, used for "which finger
//! next" hints in lesson mode.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Hand {
    Left,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    Pinky,
    Ring,
    Middle,
    Index,
    Thumb,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct KeyConfig {
    pub key: char,
    pub finger: Finger,
    /// 0 = number row, 1 = top, 2 = home, 3 = bottom, 4 = space bar.
    pub row: u8,
    pub hand: Hand,
}

const fn k(key: char, row: u8, hand: Hand, finger: Finger) -> KeyConfig {
    KeyConfig { key, finger, row, hand }
}

use Finger::*;
use Hand::*;

pub static LAYOUT: &[KeyConfig] = &[
    // number row
    k('1', 0, Left, Pinky), k('2', 0, Left, Ring), k('3', 0, Left, Middle), k('4', 0, Left, Index),
    k('5', 0, Left, Index), k('6', 0, Right, Index), k('7', 0, Right, Index), k('8', 0, Right, Middle),
    k('9', 0, Right, Ring), k('0', 0, Right, Pinky),
    // top row
    k('q', 1, Left, Pinky), k('w', 1, Left, Ring), k('e', 1, Left, Middle), k('r', 1, Left, Index),
    k('t', 1, Left, Index), k('y', 1, Right, Index), k('u', 1, Right, Index), k('i', 1, Right, Middle),
    k('o', 1, Right, Ring), k('p', 1, Right, Pinky),
    // home row
    k('a', 2, Left, Pinky), k('s', 2, Left, Ring), k('d', 2, Left, Middle), k('f', 2, Left, Index),
    k('g', 2, Left, Index), k('h', 2, Right, Index), k('j', 2, Right, Index), k('k', 2, Right, Middle),
    k('l', 2, Right, Ring), k(';', 2, Right, Pinky),
    // bottom row
    k('z', 3, Left, Pinky), k('x', 3, Left, Ring), k('c', 3, Left, Middle), k('v', 3, Left, Index),
    k('b', 3, Left, Index), k('n', 3, Right, Index), k('m', 3, Right, Index), k(',', 3, Right, Middle),
    k('.', 3, Right, Ring), k('/', 3, Right, Pinky),
    k(' ', 4, Right, Thumb),
];

/// Layout entry for `key`, case-insensitive.
pub fn lookup(key: char) -> Option<&'static KeyConfig> {
    let key = key.to_ascii_lowercase();
    LAYOUT.iter().find(|c| c.key == key)
}
