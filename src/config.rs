use crate::*;
use crate::threefish::Threefish;
use crate::tweak::{BlockType, UbiTweak};

pub const SCHEMA: [u8; 4] = *b"SHA3";
pub const VERSION: u16 = 1;
// bytes of the configuration string covered by the UBI position
pub const CONFIG_SIZE: usize = 32;

// ----------------------------------------------------------------------------
// schema and version, output length in bits, then the tree parameters
// (leaf size, fan-out, max height) which stay zero: no tree hashing
fn configuration_string<const W: usize>(output_bits: u64) -> [u64; W] {
    let mut c = [0u64; W];
    c[0] = u32::from_le_bytes(SCHEMA) as u64 | (VERSION as u64) << 32;
    c[1] = output_bits;
    c
}

// Configuration value over an all-zero chaining value, the initial state of
// a plain Skein hash.
pub fn generate_configuration<const W: usize>(output_bits: u64) -> [u64; W] {
    generate_configuration_state(output_bits, &[0; W])
}

// Configuration value chained onto `chain`, e.g. the result of the Key
// phase of Skein-MAC.
pub fn generate_configuration_state<const W: usize>(output_bits: u64, chain: &[u64; W]) -> [u64; W] {
    let config = configuration_string::<W>(output_bits);

    let mut tweak = UbiTweak::new();
    tweak.start_new_block_type(BlockType::Config);
    tweak.set_final_block(true);
    tweak.set_position(CONFIG_SIZE as u128);

    let cipher = Threefish::<W>::with_key(chain, &tweak.words());
    let mut value = [0u64; W];
    cipher.encrypt_block(&config, &mut value);
    for (v, c) in value.iter_mut().zip(config.iter()) {
        *v ^= *c;
    }
    value
}
