#[macro_use]
extern crate quickcheck_macros;

mod document;
mod ops;
mod tree;

pub(crate) use ops::Op;
