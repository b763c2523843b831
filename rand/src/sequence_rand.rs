use crate::Rand;

/// Deterministic byte source that cycles over a fixed sequence.
///
/// Meant for tests that need reproducible salts or prime candidates;
/// an empty sequence yields all-zero bytes.
#[derive(Clone, Debug, Default)]
pub struct SequenceRand {
    seq: Vec<u8>,
    pos: usize,
}

impl SequenceRand {
    pub fn new<S: Into<Vec<u8>>>(seq: S) -> Self {
        Self {
            seq: seq.into(),
            pos: 0,
        }
    }
}

impl Rand for SequenceRand {
    fn rand(&mut self, random: &mut [u8]) {
        if self.seq.is_empty() {
            random.fill(0);
            return;
        }

        for b in random.iter_mut() {
            *b = self.seq[self.pos];
            self.pos = (self.pos + 1) % self.seq.len();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{Rand, SequenceRand};

    #[test]
    fn cycles_over_sequence() {
        let mut rd = SequenceRand::new(vec![1u8, 2, 3]);
        let mut out = [0u8; 7];
        rd.rand(&mut out);
        assert_eq!(out, [1, 2, 3, 1, 2, 3, 1]);
        rd.rand(&mut out[..2]);
        assert_eq!(&out[..2], &[2, 3]);
    }

    #[test]
    fn empty_sequence_is_all_zero() {
        let mut rd = SequenceRand::default();
        let mut out = [0xffu8; 4];
        rd.rand(&mut out);
        assert_eq!(out, [0; 4]);
    }
}
