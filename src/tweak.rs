// UBI block types, the 6-bit type field of the tweak.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BlockType {
    Key = 0,
    Config = 4,
    Personalization = 8,
    PublicKey = 12,
    KeyIdentifier = 16,
    Nonce = 20,
    Message = 48,
    Out = 63,
}

const POSITION_HIGH_MASK: u64 = 0xffff_ffff;
const BIT_PAD_SHIFT: u32 = 55;
const TYPE_SHIFT: u32 = 56;
const FIRST_SHIFT: u32 = 62;
const FINAL_SHIFT: u32 = 63;

// position is 96 bits wide
const POSITION_LIMIT: u128 = 1 << 96;

// The UBI tweak: byte position inside the current block type, the type
// itself and the first / final / bit-pad flags.
// Packed layout of the two words handed to Threefish:
// word 0 holds position bits 0..64, word 1 holds position bits 64..96 in its
// low 32 bits, bit-pad at bit 55, the type at bits 56..62, first at bit 62
// and final at bit 63. Tree level (bits 48..55) stays zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UbiTweak {
    position: u128,
    block_type: BlockType,
    first: bool, last: bool, bit_pad: bool,
}

// ----------------------------------------------------------------------------
impl UbiTweak {
    pub fn new() -> UbiTweak {
        UbiTweak {
            position: 0,
            block_type: BlockType::Message,
            first: true, last: false, bit_pad: false,
        }
    }

    // Zeroes the position, sets first, clears final and bit-pad.
    pub fn start_new_block_type(&mut self, block_type: BlockType) {
        self.position = 0;
        self.block_type = block_type;
        self.first = true;
        self.last = false;
        self.bit_pad = false;
    }

    pub fn add_bytes_processed(&mut self, bytes: usize) {
        self.position += bytes as u128;
        assert!(self.position < POSITION_LIMIT, "UBI position exceeds 2^96 - 1 bytes");
    }

    pub fn set_position(&mut self, position: u128) {
        assert!(position < POSITION_LIMIT);
        self.position = position;
    }
    pub fn position(&self) -> u128 { self.position }

    pub fn block_type(&self) -> BlockType { self.block_type }

    pub fn set_first_block(&mut self, value: bool) { self.first = value; }
    pub fn is_first_block(&self) -> bool { self.first }

    pub fn set_final_block(&mut self, value: bool) { self.last = value; }
    pub fn is_final_block(&self) -> bool { self.last }

    pub fn set_bit_pad(&mut self, value: bool) { self.bit_pad = value; }
    pub fn is_bit_pad(&self) -> bool { self.bit_pad }

    pub fn words(&self) -> [u64; 2] {
        let t0 = self.position as u64;
        let t1 = ((self.position >> 64) as u64 & POSITION_HIGH_MASK)
            | ((self.bit_pad as u64) << BIT_PAD_SHIFT)
            | ((self.block_type as u64) << TYPE_SHIFT)
            | ((self.first as u64) << FIRST_SHIFT)
            | ((self.last as u64) << FINAL_SHIFT);
        [t0, t1]
    }
}

impl Default for UbiTweak {
    fn default() -> Self {
        Self::new()
    }
}
