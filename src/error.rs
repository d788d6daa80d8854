//! Error types, grounded on
//! `examples/novacrazy-rust-softrender/src/error.rs` (the `failure`-derived
//! enum and `RenderResult` alias).

use failure::Fail;

#[derive(Debug, Fail)]
pub enum RenderError {
    #[fail(display = "index {} is out of bounds for {} vertices", _0, _1)]
    IndexOutOfBounds(u32, usize),

    #[fail(display = "mesh has {} normals for {} positions; these must match", _0, _1)]
    MismatchedAttributeCount(usize, usize),

    #[fail(display = "could not load asset {:?}: {}", _0, _1)]
    AssetLoad(String, String),
}

pub type RenderResult<T> = Result<T, RenderError>;
