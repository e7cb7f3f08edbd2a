use crate::*;

// Skein-MAC: a Skein hash whose chaining value is derived from a key.
// The key-derived state is computed once and kept aside; every
// finalization or reset goes back to it, so a single instance can
// authenticate any number of messages under the same key.
#[derive(Clone)]
pub struct SkeinMac {
    skein: Skein,
    saved: [u64; MAX_STATE_WORDS],
}

// ----------------------------------------------------------------------------
/// Creates a Skein-MAC with `state_bits` of internal state and `output_bits`
/// of tag. An empty key gives the plain hash.
pub fn new_mac(state_bits: usize, output_bits: usize, key: &[u8]) -> Result<SkeinMac, Error> {
    let size = StateSize::from_bits(state_bits)?;
    let skein = Skein::new_keyed(size, output_bits, key)?;
    let mut saved = [0u64; MAX_STATE_WORDS];
    saved[..size.words()].copy_from_slice(skein.chaining_state());
    Ok(SkeinMac { skein, saved })
}

// ----------------------------------------------------------------------------
impl SkeinMac {
    pub fn state_size(&self) -> StateSize {
        self.skein.state_size()
    }
}

impl SkeinDigest for SkeinMac {
    fn update(&mut self, data: &[u8]) {
        self.skein.update(data);
    }

    fn update_bits(&mut self, data: &[u8], num_bits: usize) -> Result<(), Error> {
        self.skein.update_bits(data, num_bits)
    }

    fn finalize_into(&mut self, out: &mut [u8]) {
        self.skein.finalize_into(out);
        // the engine resets to the plain configuration, not to the key
        self.reset();
    }

    fn reset(&mut self) {
        let words = self.skein.state_size().words();
        self.skein.initialize_with_state(&self.saved[..words]);
    }

    fn output_bits(&self) -> usize {
        self.skein.output_bits()
    }
}
