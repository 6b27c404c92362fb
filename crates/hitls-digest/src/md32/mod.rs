//! Generic streaming engine for 32-bit-word Merkle–Damgård digests.
//!
//! MD5, SHA-1, SHA-224/256 and SM3 share the same outer machinery: input is
//! collected into fixed-size blocks, a 64-bit bit count is maintained, and the
//! message is terminated with a `0x80` byte, zero fill and the bit count. This
//! module implements that machinery once. An algorithm plugs in by
//! implementing [`Md32Algorithm`], which supplies the block function, the
//! initial chaining value, the byte order and the output serialization.
//!
//! ```
//! use hitls_digest::md32::Md32Context;
//! use hitls_digest::sha2::Sha256Core;
//!
//! let mut ctx = Md32Context::<Sha256Core>::new();
//! ctx.update(b"ab");
//! ctx.update(b"c");
//! let digest = ctx.finalize();
//! assert_eq!(digest[..4], [0xba, 0x78, 0x16, 0xbf]);
//! ```

pub mod byte_order;

use std::io;

use zeroize::Zeroize;

pub use byte_order::{BigEndian, ByteOrder, LittleEndian};

/// Size in bytes of the trailing length field written by [`Md32Context::finalize`].
pub const LENGTH_FIELD_SIZE: usize = 8;

/// The per-algorithm half of an MD32 digest.
///
/// Implementations are stateless policy types; all mutable data lives in
/// [`Md32Context`].
pub trait Md32Algorithm {
    /// Byte order of message words and of the trailing length field.
    type Order: ByteOrder;

    /// Chaining state, one `u32` per word of the full (untruncated) chaining value.
    type State: Copy + AsRef<[u32]> + AsMut<[u32]>;

    /// One message block. Its length is the algorithm's block size.
    type Block: Copy + AsRef<[u8]> + AsMut<[u8]>;

    /// Serialized digest.
    type Output;

    /// Initial chaining value.
    const INITIAL_STATE: Self::State;

    /// An all-zero block.
    const EMPTY_BLOCK: Self::Block;

    /// Mix `num` consecutive blocks from `data` into `state`.
    ///
    /// `data` holds at least `num * block_size` bytes and carries no
    /// alignment guarantee.
    fn block_data_order(state: &mut Self::State, data: &[u8], num: usize);

    /// Convert the final chaining state into the digest bytes.
    fn make_output(state: &Self::State) -> Self::Output;
}

// ---------------------------------------------------------------------------
// Length counter
// ---------------------------------------------------------------------------

/// Number of message bits absorbed so far, modulo 2^64, kept as two 32-bit
/// halves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BitLength {
    lo: u32,
    hi: u32,
}

impl BitLength {
    /// Account for `len` more message bytes.
    #[inline]
    pub fn add_bytes(&mut self, len: usize) {
        let lo = self.lo.wrapping_add((len as u32) << 3);
        if lo < self.lo {
            // Carry out of the low half.
            self.hi = self.hi.wrapping_add(1);
        }
        self.hi = self.hi.wrapping_add(((len as u64) >> 29) as u32);
        self.lo = lo;
    }

    /// High and low halves, in that order.
    pub fn halves(&self) -> (u32, u32) {
        (self.hi, self.lo)
    }

    /// The full 64-bit bit count.
    pub fn bits(&self) -> u64 {
        (u64::from(self.hi) << 32) | u64::from(self.lo)
    }
}

// ---------------------------------------------------------------------------
// Streaming context
// ---------------------------------------------------------------------------

/// Streaming state of one MD32 digest computation.
///
/// Between calls the buffer holds fewer than one block of pending bytes and
/// every byte past the pending ones is zero.
pub struct Md32Context<A: Md32Algorithm> {
    h: A::State,
    bit_len: BitLength,
    data: A::Block,
    num: usize,
}

impl<A: Md32Algorithm> Md32Context<A> {
    /// Create a context seeded with the algorithm's initial chaining value.
    pub fn new() -> Self {
        Self {
            h: A::INITIAL_STATE,
            bit_len: BitLength::default(),
            data: A::EMPTY_BLOCK,
            num: 0,
        }
    }

    /// The algorithm's block size in bytes.
    #[inline(always)]
    pub fn block_size() -> usize {
        A::EMPTY_BLOCK.as_ref().len()
    }

    /// Absorb `input` into the digest.
    ///
    /// Any fragmentation of a message across calls produces the same digest.
    pub fn update(&mut self, input: &[u8]) {
        if input.is_empty() {
            return;
        }
        self.bit_len.add_bytes(input.len());

        let block_size = Self::block_size();
        let mut input = input;
        let n = self.num;
        debug_assert!(n < block_size, "pending bytes must be less than one block");

        if n != 0 {
            let want = block_size - n;
            if input.len() >= want {
                let (head, rest) = input.split_at(want);
                self.data.as_mut()[n..].copy_from_slice(head);
                A::block_data_order(&mut self.h, self.data.as_ref(), 1);
                self.num = 0;
                self.data.as_mut().zeroize();
                input = rest;
            } else {
                self.data.as_mut()[n..n + input.len()].copy_from_slice(input);
                self.num += input.len();
                return;
            }
        }

        let blocks = input.len() / block_size;
        if blocks > 0 {
            let (whole, rest) = input.split_at(blocks * block_size);
            A::block_data_order(&mut self.h, whole, blocks);
            input = rest;
        }

        if !input.is_empty() {
            self.data.as_mut()[..input.len()].copy_from_slice(input);
            self.num = input.len();
        }
    }

    /// Run the block function once on `block`, bypassing buffering and the
    /// length counter.
    ///
    /// The caller is responsible for any padding and length accounting.
    pub fn transform(&mut self, block: &A::Block) {
        A::block_data_order(&mut self.h, block.as_ref(), 1);
    }

    /// Pad the message, process the final block(s) and return the digest.
    ///
    /// This is terminal: the buffer and counters are wiped and the chaining
    /// state is left in its final form. Call [`reset`](Self::reset) before
    /// hashing another message with the same context.
    pub fn finalize(&mut self) -> A::Output {
        let block_size = Self::block_size();
        let len_at = block_size - LENGTH_FIELD_SIZE;
        let (hi, lo) = self.bit_len.halves();

        let mut n = self.num;
        debug_assert!(n < block_size, "pending bytes must be less than one block");

        let data = self.data.as_mut();
        data[n] = 0x80;
        n += 1;

        // No room for the length field: flush a block of padding first.
        if n > len_at {
            data[n..].fill(0);
            A::block_data_order(&mut self.h, data, 1);
            n = 0;
        }
        data[n..len_at].fill(0);

        let mut cursor = len_at;
        A::Order::write_bit_length(hi, lo, data, &mut cursor);
        debug_assert_eq!(cursor, block_size);
        A::block_data_order(&mut self.h, data, 1);

        self.num = 0;
        self.data.as_mut().zeroize();
        self.bit_len = BitLength::default();

        A::make_output(&self.h)
    }

    /// Reseed the context with the initial chaining value and drop any
    /// pending input.
    pub fn reset(&mut self) {
        self.h = A::INITIAL_STATE;
        self.bit_len = BitLength::default();
        self.data.as_mut().zeroize();
        self.num = 0;
    }

    /// Current chaining state.
    pub fn state(&self) -> &A::State {
        &self.h
    }

    /// Total number of bits absorbed through [`update`](Self::update), mod 2^64.
    pub fn bit_len(&self) -> u64 {
        self.bit_len.bits()
    }

    /// The bit counter as `(hi, lo)` halves.
    pub fn bit_len_halves(&self) -> (u32, u32) {
        self.bit_len.halves()
    }

    /// Bytes buffered and not yet compressed.
    pub fn pending(&self) -> &[u8] {
        &self.data.as_ref()[..self.num]
    }
}

impl<A: Md32Algorithm> Default for Md32Context<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Md32Algorithm> Clone for Md32Context<A> {
    fn clone(&self) -> Self {
        Self {
            h: self.h,
            bit_len: self.bit_len,
            data: self.data,
            num: self.num,
        }
    }
}

impl<A: Md32Algorithm> Drop for Md32Context<A> {
    fn drop(&mut self) {
        self.h.as_mut().zeroize();
        self.data.as_mut().zeroize();
        self.bit_len = BitLength::default();
        self.num = 0;
    }
}

impl<A: Md32Algorithm> io::Write for Md32Context<A> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test algorithm whose "compression" records what it was given:
    /// word 0 counts blocks, word 1 counts calls, word 2 sums all bytes,
    /// word 3 holds the last 4 bytes of the most recent block (big-endian).
    enum Probe {}

    impl Md32Algorithm for Probe {
        type Order = BigEndian;
        type State = [u32; 4];
        type Block = [u8; 64];
        type Output = [u32; 4];

        const INITIAL_STATE: [u32; 4] = [0; 4];
        const EMPTY_BLOCK: [u8; 64] = [0; 64];

        fn block_data_order(state: &mut [u32; 4], data: &[u8], num: usize) {
            assert!(data.len() >= num * 64);
            state[1] += 1;
            for block in data.chunks_exact(64).take(num) {
                state[0] += 1;
                for &b in block {
                    state[2] = state[2].wrapping_add(u32::from(b));
                }
                let mut cursor = 60;
                state[3] = BigEndian::read_word(block, &mut cursor);
            }
        }

        fn make_output(state: &[u32; 4]) -> [u32; 4] {
            *state
        }
    }

    /// Same probe with little-endian length encoding.
    enum ProbeLe {}

    impl Md32Algorithm for ProbeLe {
        type Order = LittleEndian;
        type State = [u32; 4];
        type Block = [u8; 64];
        type Output = [u32; 4];

        const INITIAL_STATE: [u32; 4] = [0; 4];
        const EMPTY_BLOCK: [u8; 64] = [0; 64];

        fn block_data_order(state: &mut [u32; 4], data: &[u8], num: usize) {
            Probe::block_data_order(state, data, num);
            // Keep the length bytes as they appear in memory for the check below.
            let last = &data[(num - 1) * 64..num * 64];
            let mut cursor = 56;
            state[3] = LittleEndian::read_word(last, &mut cursor);
        }

        fn make_output(state: &[u32; 4]) -> [u32; 4] {
            *state
        }
    }

    fn finalize_blocks(len: usize) -> u32 {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&vec![0u8; len]);
        let before = ctx.state()[0];
        ctx.finalize()[0] - before
    }

    #[test]
    fn test_empty_update_is_noop() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[]);
        assert_eq!(ctx.bit_len(), 0);
        assert_eq!(ctx.state(), &[0; 4]);
        assert!(ctx.pending().is_empty());
    }

    #[test]
    fn test_partial_block_is_buffered() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[1u8; 10]);
        ctx.update(&[2u8; 20]);
        assert_eq!(ctx.state()[1], 0, "no compression below one block");
        assert_eq!(ctx.pending().len(), 30);
        assert_eq!(ctx.bit_len(), 240);
        assert!(ctx.data[30..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_completing_buffer_then_bulk_dispatch() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[1u8; 10]);
        // 54 bytes complete the first block, 192 bytes form three more, 4 remain.
        ctx.update(&[1u8; 54 + 192 + 4]);
        let st = ctx.state();
        assert_eq!(st[0], 4, "four blocks compressed");
        assert_eq!(st[1], 2, "one call for the buffered block, one for the run");
        assert_eq!(ctx.pending(), &[1u8; 4]);
        assert!(ctx.data[4..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_exact_block_leaves_nothing_pending() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[7u8; 128]);
        assert_eq!(ctx.state()[0], 2);
        assert_eq!(ctx.state()[1], 1);
        assert!(ctx.pending().is_empty());
    }

    #[test]
    fn test_bit_length_carry_into_high_half() {
        let mut len = BitLength::default();
        len.add_bytes(1 << 29);
        assert_eq!(len.halves(), (1, 0));

        let mut len = BitLength { lo: 0xffff_fff8, hi: 0 };
        len.add_bytes(1);
        assert_eq!(len.halves(), (1, 0));

        let mut len = BitLength { lo: 0xffff_fff0, hi: 7 };
        len.add_bytes(3);
        assert_eq!(len.halves(), (8, 0x8));
    }

    #[test]
    fn test_bit_length_matches_u64_arithmetic() {
        let steps = [0usize, 1, 63, 64, 1 << 20, (1 << 29) - 1, 1 << 29, (1 << 29) + 5, 0x7654_3210];
        let mut len = BitLength::default();
        let mut reference: u64 = 0;
        for _ in 0..3 {
            for &s in &steps {
                len.add_bytes(s);
                reference = reference.wrapping_add((s as u64).wrapping_mul(8));
                assert_eq!(len.bits(), reference);
            }
        }
    }

    #[test]
    fn test_bit_length_wraps_mod_2_64() {
        let mut len = BitLength {
            lo: 0xffff_fff8,
            hi: 0xffff_ffff,
        };
        len.add_bytes(2);
        assert_eq!(len.bits(), 8);
    }

    #[test]
    fn test_padding_boundary() {
        assert_eq!(finalize_blocks(0), 1);
        assert_eq!(finalize_blocks(55), 1);
        assert_eq!(finalize_blocks(56), 2);
        assert_eq!(finalize_blocks(63), 2);
        assert_eq!(finalize_blocks(64), 1);
        assert_eq!(finalize_blocks(64 + 55), 1);
        assert_eq!(finalize_blocks(64 + 56), 2);
    }

    #[test]
    fn test_padding_layout_big_endian() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[0xffu8; 3]);
        let out = ctx.finalize();
        // 3 * 0xff + 0x80 + length byte 0x18.
        assert_eq!(out[2], 3 * 0xff + 0x80 + 0x18);
        // Length is the low half, written last in big-endian order.
        assert_eq!(out[3], 24);
    }

    #[test]
    fn test_padding_layout_little_endian() {
        let mut ctx = Md32Context::<ProbeLe>::new();
        ctx.update(&[0u8; 5]);
        let out = ctx.finalize();
        // Low half is written first, at offset 56.
        assert_eq!(out[3], 40);
    }

    #[test]
    fn test_finalize_wipes_buffer_and_counters() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[0xaau8; 100]);
        ctx.finalize();
        assert_eq!(ctx.num, 0);
        assert!(ctx.data.iter().all(|&b| b == 0));
        assert_eq!(ctx.bit_len(), 0);
    }

    #[test]
    fn test_transform_leaves_counters() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(b"a known message");
        let before = ctx.bit_len_halves();
        let pending = ctx.pending().to_vec();

        ctx.transform(&[0x5au8; 64]);

        assert_eq!(ctx.bit_len_halves(), before);
        assert_eq!(ctx.pending(), &pending[..]);
        assert_eq!(ctx.state()[0], 1);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[1u8; 70]);
        ctx.reset();
        assert_eq!(ctx.state(), &[0; 4]);
        assert_eq!(ctx.bit_len(), 0);
        assert!(ctx.pending().is_empty());
        assert!(ctx.data.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_io_write_streams_reader() {
        let data = vec![3u8; 1000];
        let mut streamed = Md32Context::<Probe>::new();
        io::copy(&mut &data[..], &mut streamed).unwrap();

        let mut direct = Md32Context::<Probe>::new();
        direct.update(&data);
        assert_eq!(streamed.finalize(), direct.finalize());
    }

    #[test]
    fn test_clone_snapshots_prefix() {
        let mut ctx = Md32Context::<Probe>::new();
        ctx.update(&[9u8; 40]);
        let mut fork = ctx.clone();
        ctx.update(&[1u8; 40]);
        fork.update(&[1u8; 40]);
        assert_eq!(ctx.finalize(), fork.finalize());
    }
}
