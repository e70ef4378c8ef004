use crate::EntropySource;
use crate::error::{EntropyError, EntropyResult};

/// Deterministic source that replays a fixed list of values.
///
/// Once the list is drained the source fails with
/// [`EntropyError::Exhausted`], unless it was built with [`cycling`] in which
/// case it starts over from the first value.
///
/// [`cycling`]: SequenceSource::cycling
#[derive(Clone, Debug, Default)]
pub struct SequenceSource {
    values: Vec<u32>,
    position: usize,
    consumed: u64,
    cycle: bool,
}

impl SequenceSource {
    /// Creates a source that yields `values` once, in order.
    pub fn new<I: IntoIterator<Item = u32>>(values: I) -> Self {
        Self {
            values: values.into_iter().collect(),
            position: 0,
            consumed: 0,
            cycle: false,
        }
    }

    /// Creates a source that repeats `values` forever.
    ///
    /// An empty list still reports exhaustion.
    pub fn cycling<I: IntoIterator<Item = u32>>(values: I) -> Self {
        Self {
            cycle: true,
            ..Self::new(values)
        }
    }

    /// Number of values handed out so far.
    #[must_use]
    pub const fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Number of values left before exhaustion; `None` for cycling sources.
    #[must_use]
    pub fn remaining(&self) -> Option<usize> {
        if self.cycle {
            None
        } else {
            Some(self.values.len() - self.position)
        }
    }
}

impl EntropySource for SequenceSource {
    fn next_u32(&mut self) -> EntropyResult<u32> {
        if self.position == self.values.len() {
            if !self.cycle || self.values.is_empty() {
                return Err(EntropyError::Exhausted {
                    consumed: self.consumed,
                });
            }
            self.position = 0;
        }

        let value = self.values[self.position];
        self.position += 1;
        self.consumed += 1;
        Ok(value)
    }
}
