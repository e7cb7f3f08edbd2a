use crate::*;
use crate::config::{generate_configuration, generate_configuration_state};
use crate::threefish::Threefish;
use crate::tweak::{BlockType, UbiTweak};

pub type Skein256 = Engine<4>;
pub type Skein512 = Engine<8>;
pub type Skein1024 = Engine<16>;

// state is the running chaining value, also the key of the next block
// config is the reset point, the configuration value of a plain hash
// acc accumulates one block of input as little-endian words
#[derive(Clone)]
pub struct Engine<const W: usize> {
    cipher: Threefish<W>,
    tweak: UbiTweak,
    state: [u64; W], config: [u64; W],
    acc: [u64; W], acc_index: usize,
    output_bits: usize,
}

// ----------------------------------------------------------------------------
// One UBI step: encrypt the block keyed by the chaining value under the
// advanced tweak, then feed the block forward into the new chaining value.
fn ubi_block<const W: usize>(cipher: &mut Threefish<W>, tweak: &mut UbiTweak,
                             state: &mut [u64; W], block: &[u64; W], bytes: usize) {
    cipher.set_key(state);
    tweak.add_bytes_processed(bytes);
    cipher.set_tweak(&tweak.words());
    cipher.encrypt_block(block, state);
    for (s, b) in state.iter_mut().zip(block.iter()) {
        *s ^= *b;
    }
}

// ----------------------------------------------------------------------------
fn state_to_u8(state: &[u64], dst: &mut [u8]) {
    for (chunk, val) in dst.chunks_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&val.to_le_bytes()[..chunk.len()]);
    }
}

// ----------------------------------------------------------------------------
impl<const W: usize> Engine<W> {
    pub const BLOCK_SIZE: usize = W * 8;

    pub fn new(output_bits: usize) -> Result<Self, Error> {
        let mut r = Self::setup(output_bits)?;
        r.initialize();
        tracing::debug!(target: LOG_TARGET, state_bits = W * 64, output_bits, "skein hash ready");
        Ok(r)
    }

    // Key phase over the key, finalized without output, then the
    // configuration chained onto the result. An empty key skips the Key
    // phase, which makes the result equal to the plain configuration.
    pub(crate) fn new_keyed(output_bits: usize, key: &[u8]) -> Result<Self, Error> {
        let mut r = Self::setup(output_bits)?;
        let mut chain = [0u64; W];
        if !key.is_empty() {
            r.state = [0; W];
            r.tweak.start_new_block_type(BlockType::Key);
            r.update(key);
            r.final_pad();
            chain = r.state;
        }
        let keyed = generate_configuration_state(output_bits as u64, &chain);
        r.initialize_with_state(&keyed);
        tracing::debug!(target: LOG_TARGET, state_bits = W * 64, output_bits,
                        key_bytes = key.len(), "skein mac ready");
        Ok(r)
    }

    fn setup(output_bits: usize) -> Result<Self, Error> {
        if output_bits == 0 {
            return Err(Error::InvalidOutputSize(output_bits));
        }
        Ok(Engine {
            cipher: Threefish::new(),
            tweak: UbiTweak::new(),
            state: [0; W], config: generate_configuration(output_bits as u64),
            acc: [0; W], acc_index: 0,
            output_bits,
        })
    }

    fn initialize(&mut self) {
        let config = self.config;
        self.initialize_with_state(&config);
    }

    // Loads an externally saved chaining value and starts a new message.
    // Skein-MAC uses this to come back to its key-derived state without
    // hashing the key again. `state` must hold exactly `W` words.
    pub fn initialize_with_state(&mut self, state: &[u64]) {
        assert_eq!(state.len(), W, "external state must have one word per state word");
        self.state.copy_from_slice(state);
        self.tweak.start_new_block_type(BlockType::Message);
        self.acc = [0; W];
        self.acc_index = 0;
    }

    pub fn chaining_state(&self) -> &[u64; W] {
        &self.state
    }

    pub fn state_size(&self) -> StateSize {
        match W {
            4 => StateSize::Skein256,
            8 => StateSize::Skein512,
            _ => StateSize::Skein1024,
        }
    }

    #[inline(always)]
    fn accumulate_byte(&mut self, byte: u8) {
        // flush lazily, the last block always waits for final_pad
        if self.acc_index == Self::BLOCK_SIZE {
            ubi_block(&mut self.cipher, &mut self.tweak, &mut self.state, &self.acc, Self::BLOCK_SIZE);
            self.tweak.set_first_block(false);
            self.acc = [0; W];
            self.acc_index = 0;
        }
        self.acc[self.acc_index / 8] |= (byte as u64) << (8 * (self.acc_index % 8));
        self.acc_index += 1;
    }

    fn byte_at(&self, i: usize) -> u8 {
        assert!(i < self.acc_index);
        (self.acc[i / 8] >> (8 * (i % 8))) as u8
    }

    fn set_byte_at(&mut self, i: usize, byte: u8) {
        assert!(i < self.acc_index);
        let shift = 8 * (i % 8);
        self.acc[i / 8] = (self.acc[i / 8] & !(0xffu64 << shift)) | ((byte as u64) << shift);
    }

    // Last block of the current UBI phase. Bytes past acc_index are already
    // zero since acc is cleared on every flush.
    pub(crate) fn final_pad(&mut self) {
        self.tweak.set_final_block(true);
        ubi_block(&mut self.cipher, &mut self.tweak, &mut self.state, &self.acc, self.acc_index);
    }

    // Output expansion: one Out block per counter value, each keyed by the
    // chaining value left by final_pad, which is restored afterwards.
    pub(crate) fn output(&mut self, out: &mut [u8]) {
        let chain = self.state;
        let mut counter = [0u64; W];
        for (i, chunk) in out.chunks_mut(Self::BLOCK_SIZE).enumerate() {
            counter[0] = i as u64;
            self.state = chain;
            self.tweak.start_new_block_type(BlockType::Out);
            self.tweak.set_final_block(true);
            ubi_block(&mut self.cipher, &mut self.tweak, &mut self.state, &counter, 8);
            state_to_u8(&self.state, chunk);
        }
        self.state = chain;
    }
}

// ----------------------------------------------------------------------------
impl<const W: usize> SkeinDigest for Engine<W> {
    fn update(&mut self, data: &[u8]) {
        for b in data {
            self.accumulate_byte(*b);
        }
    }

    fn update_bits(&mut self, data: &[u8], num_bits: usize) -> Result<(), Error> {
        if self.tweak.is_bit_pad() {
            tracing::debug!(target: LOG_TARGET, num_bits, "rejected bit string after partial byte");
            return Err(Error::AlreadyBitPadded);
        }
        if num_bits.div_ceil(8) != data.len() {
            tracing::debug!(target: LOG_TARGET, num_bits, len = data.len(), "rejected bit string length");
            return Err(Error::LengthMismatch { bits: num_bits, len: data.len() });
        }
        self.update(data);
        if num_bits % 8 == 0 {
            return Ok(());
        }

        // keep the significant high bits, set the pad bit right below them
        let mask = 1u8 << (7 - (num_bits % 8));
        let last = self.acc_index - 1;
        let b = self.byte_at(last);
        self.set_byte_at(last, (b & mask.wrapping_neg()) | mask);
        self.tweak.set_bit_pad(true);
        Ok(())
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        assert_eq!(out.len(), self.output_bytes(), "digest buffer must hold exactly the output bytes");
        self.final_pad();
        self.output(out);
        tracing::trace!(target: LOG_TARGET, state_bits = W * 64, output_bytes = out.len(), "skein finalized");
        self.reset();
    }

    fn reset(&mut self) {
        self.initialize();
    }

    fn output_bits(&self) -> usize {
        self.output_bits
    }
}
