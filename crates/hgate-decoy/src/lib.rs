//! hgate-decoy: deterministic decoy identity synthesis
//!
//! A decoy is derived from a single 64-bit seed and the real identity it
//! shadows. The generator is arena-style: a `ChaCha8Rng` is constructed from
//! the seed, used for one synthesis, and discarded. No process-wide random
//! state is read or written, so concurrent logins can never perturb each
//! other's decoys.
//!
//! ChaCha is used (rather than `StdRng`) because its output stream is
//! specified and portable: the same seed reproduces the same decoy across
//! builds and platforms.

pub mod content;
pub mod synthesizer;

pub use synthesizer::{DecoyPolicy, Synthesizer};
