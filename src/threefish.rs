use crate::*;

pub type Threefish256 = Threefish<4>;
pub type Threefish512 = Threefish<8>;
pub type Threefish1024 = Threefish<16>;

// C240 of the Threefish key schedule, xored with all key words to form the
// extra schedule word
pub const KEY_SCHEDULE_CONST: u64 = 0x1BD11BDAA9FC1A22;
pub const EXPANDED_TWEAK_SIZE: usize = 3;

// Rotation constants R[d mod 8][j], Skein v1.3
const ROTATIONS_256: [[u32; 2]; 8] =
    [   [14, 16], [52, 57], [23, 40], [ 5, 37],
        [25, 33], [46, 12], [58, 22], [32, 32] ];

const ROTATIONS_512: [[u32; 4]; 8] =
    [   [46, 36, 19, 37], [33, 27, 14, 42], [17, 49, 36, 39], [44,  9, 54, 56],
        [39, 30, 34, 24], [13, 50, 10, 17], [25, 29, 39, 43], [ 8, 35, 56, 22] ];

const ROTATIONS_1024: [[u32; 8]; 8] =
    [   [24, 13,  8, 47,  8, 17, 22, 37],
        [38, 19, 10, 55, 49, 18, 23, 52],
        [33,  4, 51, 13, 34, 41, 59, 17],
        [ 5, 20, 48, 41, 47, 28, 16, 25],
        [41,  9, 37, 31, 12, 47, 44, 30],
        [16, 34, 56, 51,  4, 53, 42, 41],
        [31, 44, 47, 46, 19, 42, 44, 25],
        [ 9, 48, 35, 52, 23, 31, 37, 20] ];

// word i of the next round is word PERMUTATION[i] of the mixed state
const PERMUTATION_256: [usize; 4] = [0, 3, 2, 1];
const PERMUTATION_512: [usize; 8] = [2, 1, 4, 7, 6, 5, 0, 3];
const PERMUTATION_1024: [usize; 16] = [0, 9, 2, 13, 6, 11, 4, 15, 10, 7, 12, 3, 14, 5, 8, 1];

/// Threefish tweakable block cipher over `W` 64-bit words (4, 8 or 16).
///
/// The key schedule keeps the `W` key words plus the parity word, the tweak
/// schedule keeps both tweak words plus their xor. Both are recomputed on
/// every `set_key` / `set_tweak`, which is what the UBI chaining needs since
/// the key changes on every block.
#[derive(Clone)]
pub struct Threefish<const W: usize> {
    k: [u64; W], parity: u64,
    t: [u64; EXPANDED_TWEAK_SIZE],
}

// ----------------------------------------------------------------------------
impl<const W: usize> Threefish<W> {
    const SUPPORTED: () = assert!(W == 4 || W == 8 || W == 16, "Threefish works on 4, 8 or 16 words");

    pub const ROUNDS: usize = if W == 16 { 80 } else { 72 };
    pub const BLOCK_SIZE: usize = W * 8;

    pub fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::SUPPORTED;
        let mut r = Threefish {
            k: [0; W], parity: 0,
            t: [0; EXPANDED_TWEAK_SIZE],
        };
        r.set_key(&[0; W]);
        r
    }

    pub fn with_key(key: &[u64; W], tweak: &[u64; 2]) -> Self {
        let mut r = Self::new();
        r.set_key(key);
        r.set_tweak(tweak);
        r
    }

    // Builds a cipher from word slices, checking their lengths once here so
    // that block operations cannot fail.
    pub fn from_slices(key: &[u64], tweak: &[u64]) -> Result<Self, Error> {
        let k: &[u64; W] = key.try_into().map_err(|_| Error::InvalidKeySize(key.len()))?;
        let t: &[u64; 2] = tweak.try_into().map_err(|_| Error::InvalidTweakSize(tweak.len()))?;
        Ok(Self::with_key(k, t))
    }

    pub fn set_key(&mut self, key: &[u64; W]) {
        let mut parity = KEY_SCHEDULE_CONST;
        for (k, w) in self.k.iter_mut().zip(key.iter()) {
            *k = *w;
            parity ^= *w;
        }
        self.parity = parity;
    }

    pub fn set_tweak(&mut self, tweak: &[u64; 2]) {
        self.t = [tweak[0], tweak[1], tweak[0] ^ tweak[1]];
    }

    pub fn encrypt_block(&self, input: &[u64; W], output: &mut [u64; W]) {
        let mut v = *input;
        for d in 0..Self::ROUNDS {
            if d % 4 == 0 {
                self.inject_key(&mut v, d / 4);
            }
            for j in 0..W / 2 {
                mix(&mut v, 2 * j, Self::rotation(d, j));
            }
            let f = v;
            for (i, p) in Self::permutation().iter().enumerate() {
                v[i] = f[*p];
            }
        }
        self.inject_key(&mut v, Self::ROUNDS / 4);
        *output = v;
    }

    pub fn decrypt_block(&self, input: &[u64; W], output: &mut [u64; W]) {
        let mut v = *input;
        self.remove_key(&mut v, Self::ROUNDS / 4);
        for d in (0..Self::ROUNDS).rev() {
            let f = v;
            for (i, p) in Self::permutation().iter().enumerate() {
                v[*p] = f[i];
            }
            for j in 0..W / 2 {
                unmix(&mut v, 2 * j, Self::rotation(d, j));
            }
            if d % 4 == 0 {
                self.remove_key(&mut v, d / 4);
            }
        }
        *output = v;
    }

    #[inline(always)]
    fn key_word(&self, i: usize) -> u64 {
        if i == W { self.parity } else { self.k[i] }
    }

    // subkey s, word i
    #[inline(always)]
    fn subkey(&self, s: usize, i: usize) -> u64 {
        let w = self.key_word((s + i) % (W + 1));
        if i == W - 3 {
            w.wrapping_add(self.t[s % 3])
        } else if i == W - 2 {
            w.wrapping_add(self.t[(s + 1) % 3])
        } else if i == W - 1 {
            w.wrapping_add(s as u64)
        } else {
            w
        }
    }

    #[inline(always)]
    fn inject_key(&self, v: &mut [u64; W], s: usize) {
        for (i, x) in v.iter_mut().enumerate() {
            *x = x.wrapping_add(self.subkey(s, i));
        }
    }

    #[inline(always)]
    fn remove_key(&self, v: &mut [u64; W], s: usize) {
        for (i, x) in v.iter_mut().enumerate() {
            *x = x.wrapping_sub(self.subkey(s, i));
        }
    }

    // W is known at monomorphisation, the match folds away
    #[inline(always)]
    fn rotation(d: usize, j: usize) -> u32 {
        match W {
            4 => ROTATIONS_256[d % 8][j],
            8 => ROTATIONS_512[d % 8][j],
            _ => ROTATIONS_1024[d % 8][j],
        }
    }

    #[inline(always)]
    fn permutation() -> &'static [usize] {
        match W {
            4 => &PERMUTATION_256,
            8 => &PERMUTATION_512,
            _ => &PERMUTATION_1024,
        }
    }
}

impl<const W: usize> Default for Threefish<W> {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------------------------------------------------------
// The Threefish MIX function on the word pair (a, a+1)
#[inline(always)]
fn mix<const W: usize>(v: &mut [u64; W], a: usize, r: u32) {
    v[a] = v[a].wrapping_add(v[a + 1]);
    v[a + 1] = v[a + 1].rotate_left(r) ^ v[a];
}

#[inline(always)]
fn unmix<const W: usize>(v: &mut [u64; W], a: usize, r: u32) {
    v[a + 1] = (v[a + 1] ^ v[a]).rotate_right(r);
    v[a] = v[a].wrapping_sub(v[a + 1]);
}
