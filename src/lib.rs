mod error;
pub use error::CipherError;

pub use rand::{DefaultRand, Rand, SequenceRand};

mod sha;
pub use sha::{DigestX, Sha2Kind};

pub mod rsa;

pub trait Sign {
    // 写入signature之前不清空
    fn sign(&self, msg: &[u8], signature: &mut Vec<u8>) -> Result<(), CipherError>;
}

pub trait Verify {
    fn verify(&self, msg: &[u8], signature: &[u8]) -> Result<(), CipherError>;
}

pub trait Signer: Sign + Verify {}

impl<T> Signer for T where T: Sign + Verify {}
