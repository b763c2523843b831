mod biguint_ext;
pub use biguint_ext::BigUintExt;

pub mod mod_arith;
pub mod octets;
