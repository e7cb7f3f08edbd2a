use crate::*;
use crate::engine::Engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateSize {
    Skein256,
    Skein512,
    Skein1024,
}

impl StateSize {
    pub fn from_bits(bits: usize) -> Result<StateSize, Error> {
        match bits {
            256 => Ok(StateSize::Skein256),
            512 => Ok(StateSize::Skein512),
            1024 => Ok(StateSize::Skein1024),
            _ => Err(Error::InvalidStateSize(bits)),
        }
    }
    pub fn bits(self) -> usize {
        match self {
            StateSize::Skein256 => 256,
            StateSize::Skein512 => 512,
            StateSize::Skein1024 => 1024,
        }
    }
    pub fn words(self) -> usize { self.bits() / 64 }
    pub fn block_size(self) -> usize { self.bits() / 8 }
}

impl TryFrom<usize> for StateSize {
    type Error = Error;

    fn try_from(bits: usize) -> Result<Self, Self::Error> {
        StateSize::from_bits(bits)
    }
}

// A Skein hash whose state size is chosen at runtime.
// The width is picked once in new_hash, every call then dispatches with
// a single match to the statically sized engine, whose per-block work is
// fully monomorphised.
#[derive(Clone)]
pub enum Skein {
    Skein256(Engine<4>),
    Skein512(Engine<8>),
    Skein1024(Engine<16>),
}

macro_rules! with_engine {
    ($skein:expr, $e:ident => $body:expr) => {
        match $skein {
            Skein::Skein256($e) => $body,
            Skein::Skein512($e) => $body,
            Skein::Skein1024($e) => $body,
        }
    };
}

// ----------------------------------------------------------------------------
/// Creates a Skein hash of `state_bits` (256, 512 or 1024) internal state
/// producing `output_bits` of digest.
pub fn new_hash(state_bits: usize, output_bits: usize) -> Result<Skein, Error> {
    Ok(match StateSize::from_bits(state_bits)? {
        StateSize::Skein256 => Skein::Skein256(Engine::new(output_bits)?),
        StateSize::Skein512 => Skein::Skein512(Engine::new(output_bits)?),
        StateSize::Skein1024 => Skein::Skein1024(Engine::new(output_bits)?),
    })
}

// ----------------------------------------------------------------------------
impl Skein {
    pub(crate) fn new_keyed(size: StateSize, output_bits: usize, key: &[u8]) -> Result<Skein, Error> {
        Ok(match size {
            StateSize::Skein256 => Skein::Skein256(Engine::new_keyed(output_bits, key)?),
            StateSize::Skein512 => Skein::Skein512(Engine::new_keyed(output_bits, key)?),
            StateSize::Skein1024 => Skein::Skein1024(Engine::new_keyed(output_bits, key)?),
        })
    }

    pub fn state_size(&self) -> StateSize {
        match self {
            Skein::Skein256(_) => StateSize::Skein256,
            Skein::Skein512(_) => StateSize::Skein512,
            Skein::Skein1024(_) => StateSize::Skein1024,
        }
    }

    pub fn chaining_state(&self) -> &[u64] {
        with_engine!(self, e => e.chaining_state().as_slice())
    }

    pub fn initialize_with_state(&mut self, state: &[u64]) {
        with_engine!(self, e => e.initialize_with_state(state))
    }
}

impl SkeinDigest for Skein {
    fn update(&mut self, data: &[u8]) {
        with_engine!(self, e => e.update(data))
    }

    fn update_bits(&mut self, data: &[u8], num_bits: usize) -> Result<(), Error> {
        with_engine!(self, e => e.update_bits(data, num_bits))
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        with_engine!(self, e => e.finalize_into(out))
    }

    fn reset(&mut self) {
        with_engine!(self, e => e.reset())
    }

    fn output_bits(&self) -> usize {
        with_engine!(self, e => e.output_bits())
    }
}
