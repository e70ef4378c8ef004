use crate::error::MembershipError;

type Word = u64;

const WORD_BITS: u32 = Word::BITS;

/// Number of words needed to hold `capacity` bits.
const fn words_for(capacity: u32) -> usize {
    capacity.div_ceil(WORD_BITS) as usize
}

/// Fixed-capacity bitmap recording which indices have been drawn.
///
/// Bit `i` lives in word `i / 64` at position `i % 64`. Storage is sized by
/// ceiling division so the highest index always has a backing word. Bits are
/// only ever set; there is no clear operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MembershipSet {
    words: Vec<Word>,
    capacity: u32,
    len: u32,
}

impl MembershipSet {
    /// Allocates an empty set covering indices `0..capacity`.
    pub fn with_capacity(capacity: u32) -> Result<Self, MembershipError> {
        let count = words_for(capacity);
        let mut words = Vec::new();
        words
            .try_reserve_exact(count)
            .map_err(|source| MembershipError::Allocation { capacity, source })?;
        words.resize(count, 0);
        Ok(Self {
            words,
            capacity,
            len: 0,
        })
    }

    /// Number of indices the set can track.
    #[must_use]
    pub const fn capacity(&self) -> u32 {
        self.capacity
    }

    /// Number of indices currently set.
    #[must_use]
    pub const fn len(&self) -> u32 {
        self.len
    }

    /// Reports whether no index has been set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Reports whether every index in `0..capacity` has been set.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Marks `index` as drawn.
    pub fn set_bit(&mut self, index: u32) -> Result<(), MembershipError> {
        self.insert(index).map(drop)
    }

    /// Reports whether `index` has been drawn.
    pub fn test_bit(&self, index: u32) -> Result<bool, MembershipError> {
        let (word, mask) = self.locate(index)?;
        Ok(self.words[word] & mask != 0)
    }

    /// Marks `index` as drawn and reports whether it was previously unset.
    pub fn insert(&mut self, index: u32) -> Result<bool, MembershipError> {
        let (word, mask) = self.locate(index)?;
        let slot = &mut self.words[word];
        if *slot & mask != 0 {
            return Ok(false);
        }
        *slot |= mask;
        self.len += 1;
        Ok(true)
    }

    fn locate(&self, index: u32) -> Result<(usize, Word), MembershipError> {
        if index >= self.capacity {
            return Err(MembershipError::OutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        let word = (index / WORD_BITS) as usize;
        let mask = 1 << (index % WORD_BITS);
        Ok((word, mask))
    }

    #[cfg(test)]
    fn word_count(&self) -> usize {
        self.words.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_rounds_up_to_whole_words() {
        assert_eq!(MembershipSet::with_capacity(0).expect("0").word_count(), 0);
        assert_eq!(MembershipSet::with_capacity(1).expect("1").word_count(), 1);
        assert_eq!(MembershipSet::with_capacity(64).expect("64").word_count(), 1);
        assert_eq!(MembershipSet::with_capacity(65).expect("65").word_count(), 2);
        assert_eq!(MembershipSet::with_capacity(130).expect("130").word_count(), 3);
    }

    #[test]
    fn highest_index_is_addressable_when_not_a_word_multiple() {
        for capacity in [1u32, 7, 9, 63, 65, 100, 129] {
            let mut set = MembershipSet::with_capacity(capacity).expect("alloc");
            let last = capacity - 1;
            assert!(!set.test_bit(last).expect("in range"));
            set.set_bit(last).expect("in range");
            assert!(set.test_bit(last).expect("in range"));
        }
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut set = MembershipSet::with_capacity(10).expect("alloc");
        assert!(matches!(
            set.test_bit(10),
            Err(MembershipError::OutOfRange {
                index: 10,
                capacity: 10
            })
        ));
        assert!(set.set_bit(64).is_err());
        assert!(set.is_empty());

        let mut empty = MembershipSet::with_capacity(0).expect("alloc");
        assert!(empty.insert(0).is_err());
    }

    #[test]
    fn bits_are_independent_and_permanent() {
        let mut set = MembershipSet::with_capacity(128).expect("alloc");
        set.set_bit(3).expect("set 3");
        set.set_bit(64).expect("set 64");
        assert!(set.test_bit(3).expect("3"));
        assert!(set.test_bit(64).expect("64"));
        assert!(!set.test_bit(4).expect("4"));
        assert!(!set.test_bit(63).expect("63"));
        assert!(!set.test_bit(65).expect("65"));

        set.set_bit(3).expect("set again");
        assert!(set.test_bit(3).expect("still set"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn insert_reports_first_insertion_only() {
        let mut set = MembershipSet::with_capacity(5).expect("alloc");
        assert!(set.insert(2).expect("first"));
        assert!(!set.insert(2).expect("second"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn full_after_every_index_is_set() {
        let mut set = MembershipSet::with_capacity(70).expect("alloc");
        for index in (0..70).rev() {
            assert!(!set.is_full());
            set.set_bit(index).expect("set");
        }
        assert!(set.is_full());
        assert_eq!(set.len(), set.capacity());
    }
}
