//! The RustCrypto backend for v4 tokens.

mod local;
mod public;

/// PASETO v4 primitives, backed by `blake2`, `chacha20` and `ed25519-dalek`.
#[derive(Clone, Copy, Debug, Default)]
pub struct V4;
