#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use alloc::vec;
use alloc::vec::Vec;

pub trait SkeinDigest {
    fn update(&mut self, data: &[u8]);
    // Bit string of num_bits bits, the last partial byte carries its bits in
    // the high positions. No further input may follow a partial byte.
    fn update_bits(&mut self, data: &[u8], num_bits: usize) -> Result<(), Error>;
    // out.len() must equal output_bytes(). Resets afterwards.
    fn finalize_into(&mut self, out: &mut [u8]);
    fn finalize(&mut self) -> Vec<u8> {
        let mut out = vec![0u8; self.output_bytes()];
        self.finalize_into(&mut out);
        out
    }
    fn reset(&mut self);
    fn output_bits(&self) -> usize;
    fn output_bytes(&self) -> usize { self.output_bits().div_ceil(8) }
}

pub const LOG_TARGET: &str = "skein3fish";
pub const MAX_STATE_WORDS: usize = 16;

mod error;
pub use error::Error;

pub mod threefish; // Threefish tweakable block cipher, 256, 512 and 1024 bits.
pub use threefish::{Threefish, Threefish256, Threefish512, Threefish1024};

pub mod tweak;  // UBI tweak: position, block type and flags.
pub mod config; // Configuration block, the initial chaining value.

pub mod engine; // Skein hash over a fixed state width.
pub use engine::{Engine, Skein256, Skein512, Skein1024};

pub mod skein;  // State width chosen at runtime.
pub use skein::{new_hash, Skein, StateSize};

pub mod mac;    // Skein-MAC.
pub use mac::{new_mac, SkeinMac};

#[cfg(feature = "std")]
mod std_support;
