//! SM3 cryptographic hash algorithm.
//!
//! SM3 is a 256-bit cryptographic hash function standardized by the Chinese
//! government (GB/T 32905-2016). It is structurally similar to SHA-256 and
//! is widely used in Chinese commercial cryptography alongside SM2 and SM4.

use std::io;

use hitls_types::CryptoError;

use crate::md32::{BigEndian, ByteOrder, Md32Algorithm, Md32Context};
use crate::provider::{exact_block, write_digest, Digest};

/// SM3 output size in bytes.
pub const SM3_OUTPUT_SIZE: usize = 32;

/// SM3 block size in bytes.
pub const SM3_BLOCK_SIZE: usize = 64;

const SM3_IV: [u32; 8] = [
    0x7380166f, 0x4914b2b9, 0x172442d7, 0xda8a0600, 0xa96f30bc, 0x163138aa, 0xe38dee4d, 0xb0fb0e4e,
];

const T0: u32 = 0x79cc4519;
const T1: u32 = 0x7a879d8a;

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

/// SM3 plug-in for the MD32 engine.
pub enum Sm3Core {}

impl Md32Algorithm for Sm3Core {
    type Order = BigEndian;
    type State = [u32; 8];
    type Block = [u8; SM3_BLOCK_SIZE];
    type Output = [u8; SM3_OUTPUT_SIZE];

    const INITIAL_STATE: [u32; 8] = SM3_IV;
    const EMPTY_BLOCK: [u8; SM3_BLOCK_SIZE] = [0; SM3_BLOCK_SIZE];

    fn block_data_order(state: &mut [u32; 8], data: &[u8], num: usize) {
        for block in data.chunks_exact(SM3_BLOCK_SIZE).take(num) {
            compress(state, block);
        }
    }

    fn make_output(state: &[u32; 8]) -> [u8; SM3_OUTPUT_SIZE] {
        let mut out = [0u8; SM3_OUTPUT_SIZE];
        BigEndian::store_words(state, &mut out);
        out
    }
}

fn compress(state: &mut [u32; 8], block: &[u8]) {
    // Message expansion: W[0..68]; W'[j] = W[j] ^ W[j + 4] is formed on the fly.
    let mut w = [0u32; 68];
    BigEndian::load_words(block, &mut w[..16]);
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let (t, ff, gg) = if j < 16 {
            (T0, a ^ b ^ c, e ^ f ^ g)
        } else {
            (T1, (a & b) | (a & c) | (b & c), (e & f) | (!e & g))
        };
        let a12 = a.rotate_left(12);
        let ss1 = a12
            .wrapping_add(e)
            .wrapping_add(t.rotate_left((j % 32) as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a12;
        let tt1 = ff
            .wrapping_add(d)
            .wrapping_add(ss2)
            .wrapping_add(w[j] ^ w[j + 4]);
        let tt2 = gg.wrapping_add(h).wrapping_add(ss1).wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    for (s, v) in state.iter_mut().zip([a, b, c, d, e, f, g, h]) {
        *s ^= v;
    }
}

/// SM3 hash context.
#[derive(Clone, Default)]
pub struct Sm3 {
    ctx: Md32Context<Sm3Core>,
}

impl Sm3 {
    /// Create a new SM3 hash context.
    pub fn new() -> Self {
        Self {
            ctx: Md32Context::new(),
        }
    }

    /// Feed data into the hash computation.
    pub fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        self.ctx.update(data);
        Ok(())
    }

    /// Apply the compression function to one raw 64-byte block.
    pub fn transform(&mut self, block: &[u8]) -> Result<(), CryptoError> {
        self.ctx.transform(exact_block(block)?);
        Ok(())
    }

    /// Finalize the hash and return the 32-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
        Ok(self.ctx.finalize())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// One-shot: compute the SM3 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SM3_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Digest for Sm3 {
    fn output_size(&self) -> usize {
        SM3_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        SM3_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Sm3::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        write_digest(out, &Sm3::finish(self)?)
    }

    fn reset(&mut self) {
        Sm3::reset(self);
    }
}

impl io::Write for Sm3 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
