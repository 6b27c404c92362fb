//! SHA-1 message digest algorithm.
//!
//! SHA-1 produces a 160-bit (20-byte) hash value. It is defined in FIPS 180-4.
//!
//! **Security warning**: SHA-1 is considered cryptographically weak due to
//! demonstrated collision attacks. It is provided for legacy compatibility
//! and should not be used for new security applications.

use std::io;

use hitls_types::CryptoError;

use crate::md32::{BigEndian, ByteOrder, Md32Algorithm, Md32Context};
use crate::provider::{exact_block, write_digest, Digest};

/// SHA-1 output size in bytes.
pub const SHA1_OUTPUT_SIZE: usize = 20;

/// SHA-1 block size in bytes.
pub const SHA1_BLOCK_SIZE: usize = 64;

const SHA1_IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

/// SHA-1 plug-in for the MD32 engine.
pub enum Sha1Core {}

impl Md32Algorithm for Sha1Core {
    type Order = BigEndian;
    type State = [u32; 5];
    type Block = [u8; SHA1_BLOCK_SIZE];
    type Output = [u8; SHA1_OUTPUT_SIZE];

    const INITIAL_STATE: [u32; 5] = SHA1_IV;
    const EMPTY_BLOCK: [u8; SHA1_BLOCK_SIZE] = [0; SHA1_BLOCK_SIZE];

    fn block_data_order(state: &mut [u32; 5], data: &[u8], num: usize) {
        for block in data.chunks_exact(SHA1_BLOCK_SIZE).take(num) {
            compress(state, block);
        }
    }

    fn make_output(state: &[u32; 5]) -> [u8; SHA1_OUTPUT_SIZE] {
        let mut out = [0u8; SHA1_OUTPUT_SIZE];
        BigEndian::store_words(state, &mut out);
        out
    }
}

fn compress(state: &mut [u32; 5], block: &[u8]) {
    // 16-word circular message schedule.
    let mut w = [0u32; 16];
    BigEndian::load_words(block, &mut w);

    let [mut a, mut b, mut c, mut d, mut e] = *state;

    for t in 0..80 {
        if t >= 16 {
            let x = w[(t + 13) & 15] ^ w[(t + 8) & 15] ^ w[(t + 2) & 15] ^ w[t & 15];
            w[t & 15] = x.rotate_left(1);
        }
        let (f, k) = match t {
            0..=19 => ((b & c) | (!b & d), 0x5a827999),
            20..=39 => (b ^ c ^ d, 0x6ed9eba1),
            40..=59 => ((b & c) | (b & d) | (c & d), 0x8f1bbcdc),
            _ => (b ^ c ^ d, 0xca62c1d6),
        };
        let temp = a
            .rotate_left(5)
            .wrapping_add(f)
            .wrapping_add(e)
            .wrapping_add(k)
            .wrapping_add(w[t & 15]);
        e = d;
        d = c;
        c = b.rotate_left(30);
        b = a;
        a = temp;
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
    state[4] = state[4].wrapping_add(e);
}

/// SHA-1 hash context.
#[derive(Clone, Default)]
pub struct Sha1 {
    ctx: Md32Context<Sha1Core>,
}

impl Sha1 {
    /// Create a new SHA-1 hash context.
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

    /// Finalize the hash and return the 20-byte digest.
    pub fn finish(&mut self) -> Result<[u8; SHA1_OUTPUT_SIZE], CryptoError> {
        Ok(self.ctx.finalize())
    }

    /// Reset the hash context for a new computation.
    pub fn reset(&mut self) {
        self.ctx.reset();
    }

    /// One-shot: compute the SHA-1 digest of `data`.
    pub fn digest(data: &[u8]) -> Result<[u8; SHA1_OUTPUT_SIZE], CryptoError> {
        let mut ctx = Self::new();
        ctx.update(data)?;
        ctx.finish()
    }
}

impl Digest for Sha1 {
    fn output_size(&self) -> usize {
        SHA1_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        SHA1_BLOCK_SIZE
    }

    fn update(&mut self, data: &[u8]) -> Result<(), CryptoError> {
        Sha1::update(self, data)
    }

    fn finish(&mut self, out: &mut [u8]) -> Result<(), CryptoError> {
        write_digest(out, &Sha1::finish(self)?)
    }

    fn reset(&mut self) {
        Sha1::reset(self);
    }
}

impl io::Write for Sha1 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ctx.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
