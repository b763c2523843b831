use crate::Rand;
use xrand::rngs::OsRng;
use xrand::RngCore;

/// Cryptographically secure byte source backed by the operating system.
#[derive(Copy, Clone, Default)]
pub struct DefaultRand {
    rng: OsRng,
}

impl Rand for DefaultRand {
    fn rand(&mut self, random: &mut [u8]) {
        self.rng.fill_bytes(random);
    }
}
