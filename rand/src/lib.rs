pub trait Rand: Default {
    fn rand(&mut self, random: &mut [u8]);
}

mod default_rand;
pub use default_rand::DefaultRand;

mod sequence_rand;
pub use sequence_rand::SequenceRand;
