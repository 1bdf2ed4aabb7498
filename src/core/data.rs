//! Shared scratch data carried by a machine.
//!
//! The slot is caller-defined and engine-opaque: callbacks use it to pass
//! lightweight context from one state to the next.

use serde::{Deserialize, Serialize};

/// Small value attached to a machine and shared by all of its callbacks.
///
/// The engine stores the value and hands it back; it never inspects it.
///
/// # Example
///
/// ```rust
/// use cycle_fsm::core::SharedData;
///
/// let data = SharedData::from(42u32);
/// assert_eq!(data.as_word(), Some(42));
/// assert_eq!(data.as_bytes(), None);
///
/// let packed = SharedData::Bytes([1, 2, 3, 4]);
/// assert_eq!(packed.as_bytes(), Some([1, 2, 3, 4]));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SharedData {
    /// Nothing stored yet
    #[default]
    Empty,

    /// Opaque handle chosen by the application (an index, an address, a key)
    Handle(usize),

    /// 32-bit integer
    Word(u32),

    /// Four packed bytes
    Bytes([u8; 4]),
}

impl SharedData {
    /// Check whether the slot holds no value.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    pub fn as_handle(&self) -> Option<usize> {
        match self {
            Self::Handle(handle) => Some(*handle),
            _ => None,
        }
    }

    pub fn as_word(&self) -> Option<u32> {
        match self {
            Self::Word(word) => Some(*word),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<[u8; 4]> {
        match self {
            Self::Bytes(bytes) => Some(*bytes),
            _ => None,
        }
    }
}

impl From<u32> for SharedData {
    fn from(word: u32) -> Self {
        Self::Word(word)
    }
}

impl From<[u8; 4]> for SharedData {
    fn from(bytes: [u8; 4]) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<usize> for SharedData {
    fn from(handle: usize) -> Self {
        Self::Handle(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_empty() {
        assert!(SharedData::default().is_empty());
        assert!(!SharedData::Word(0).is_empty());
    }

    #[test]
    fn accessors_only_match_their_variant() {
        let handle = SharedData::Handle(7);
        assert_eq!(handle.as_handle(), Some(7));
        assert_eq!(handle.as_word(), None);
        assert_eq!(handle.as_bytes(), None);

        let word = SharedData::from(0xDEAD_BEEFu32);
        assert_eq!(word.as_word(), Some(0xDEAD_BEEF));
        assert_eq!(word.as_handle(), None);
    }

    #[test]
    fn conversions_pick_the_right_variant() {
        assert_eq!(SharedData::from(3usize), SharedData::Handle(3));
        assert_eq!(SharedData::from([9, 8, 7, 6]), SharedData::Bytes([9, 8, 7, 6]));
    }

    #[test]
    fn shared_data_serializes_correctly() {
        let data = SharedData::Bytes([0, 1, 2, 255]);
        let json = serde_json::to_string(&data).unwrap();
        let deserialized: SharedData = serde_json::from_str(&json).unwrap();
        assert_eq!(data, deserialized);
    }
}
