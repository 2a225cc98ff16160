#![allow(clippy::unreadable_literal)]

use std::fmt;
use std::io::{self, Read, Write};
use std::mem::{size_of, take};
use std::str::FromStr;

use thiserror::Error;

use crate::array_util::load_u32_be;
use crate::{BlockHashFunction, HashFunction, HashValue};

const BLOCK_LENGTH_BYTES: usize = 64;

const DIGEST_LENGTH_BYTES: usize = 20;

/// offset inside the final block at which the message length in bits is appended
const LENGTH_OFFSET: usize = BLOCK_LENGTH_BYTES - size_of::<u64>();

/// The initial state for any SHA1 hash. From here, all blocks are applied.
pub const INITIAL: SHA1Hash = SHA1Hash {
    a: 0x67452301,
    b: 0xEFCDAB89,
    c: 0x98BADCFE,
    d: 0x10325476,
    e: 0xC3D2E1F0,
};

/// A SHA1 hash. It consists of 5 double-words named `a`, `b`, `c`, `d` and `e`, which are the digest words
/// `h0` to `h4` in that order. The canonical byte representation is the big-endian concatenation of all five words,
/// which is what `to_bytes`, `raw` and the hex formatting produce.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SHA1Hash {
    pub a: u32,
    pub b: u32,
    pub c: u32,
    pub d: u32,
    pub e: u32,
}

impl SHA1Hash {
    pub const fn from_words(words: [u32; 5]) -> SHA1Hash {
        SHA1Hash { a: words[0], b: words[1], c: words[2], d: words[3], e: words[4] }
    }

    /// The digest words in `h0..h4` order.
    pub const fn words(&self) -> [u32; 5] {
        [self.a, self.b, self.c, self.d, self.e]
    }

    /// Reads a digest from its 20-byte big-endian representation.
    pub fn from_bytes(bytes: [u8; DIGEST_LENGTH_BYTES]) -> SHA1Hash {
        let mut words = [0_u32; 5];
        load_u32_be(&mut words, &bytes);
        SHA1Hash::from_words(words)
    }

    /// Generates the 20-byte big-endian representation of this digest.
    pub fn to_bytes(&self) -> [u8; DIGEST_LENGTH_BYTES] {
        let mut bytes = [0_u8; DIGEST_LENGTH_BYTES];
        for (chunk, word) in bytes.chunks_exact_mut(4).zip(self.words().iter()) {
            chunk.copy_from_slice(&word.to_be_bytes());
        }
        bytes
    }
}

impl fmt::Display for SHA1Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.to_bytes()))
    }
}

impl fmt::LowerHex for SHA1Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Error returned when a string is not the 40-character hex form of a SHA1 hash.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDigestError {
    #[error("expected {expected} hex characters, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("invalid hex character {character:?} at position {index}")]
    InvalidCharacter { character: char, index: usize },
}

impl FromStr for SHA1Hash {
    type Err = ParseDigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let expected = DIGEST_LENGTH_BYTES * 2;
        let found = s.chars().count();
        if found != expected {
            return Err(ParseDigestError::InvalidLength { expected, found });
        }

        // positions count characters, so a multi-byte character is reported as itself
        if let Some((index, character)) = s.chars().enumerate().find(|(_, c)| !c.is_ascii_hexdigit()) {
            return Err(ParseDigestError::InvalidCharacter { character, index });
        }

        let mut bytes = [0_u8; DIGEST_LENGTH_BYTES];
        hex::decode_to_slice(s, &mut bytes).map_err(|err| match err {
            hex::FromHexError::InvalidHexCharacter { c, index } => {
                ParseDigestError::InvalidCharacter { character: c, index }
            }
            _ => ParseDigestError::InvalidLength { expected, found },
        })?;

        Ok(SHA1Hash::from_bytes(bytes))
    }
}

/// The working state of an unfinished SHA1 hash. Whole blocks are compressed as soon as they are complete, a
/// trailing partial block is kept until more data arrives or the hash is finished.
#[derive(Debug, Clone)]
pub struct SHA1HashState {
    hash: SHA1Hash,
    message_length: u64,
    remaining_data: [u8; BLOCK_LENGTH_BYTES],
    remaining_length: usize,
}

impl SHA1HashState {
    pub fn new() -> SHA1HashState {
        SHA1HashState {
            hash: INITIAL,
            message_length: 0,
            remaining_data: [0_u8; BLOCK_LENGTH_BYTES],
            remaining_length: 0,
        }
    }

    /// Absorb `input` into the hash.
    ///
    /// # Panics
    /// If the total input exceeds 2^64 - 1 bits, since the length could not be encoded in the padding anymore.
    pub fn update(&mut self, mut input: &[u8]) {
        self.count_message_bits(input.len());

        // fill up the pending block first, if there is one
        if self.remaining_length > 0 {
            let missing = BLOCK_LENGTH_BYTES - self.remaining_length;
            if input.len() < missing {
                self.remaining_data[self.remaining_length..self.remaining_length + input.len()]
                    .copy_from_slice(input);
                self.remaining_length += input.len();
                return;
            }

            self.remaining_data[self.remaining_length..].copy_from_slice(&input[..missing]);
            round_function(&mut self.hash, &self.remaining_data);
            self.remaining_length = 0;
            input = &input[missing..];
        }

        let mut blocks = input.chunks_exact(BLOCK_LENGTH_BYTES);
        for block in &mut blocks {
            round_function(&mut self.hash, block);
        }

        let tail = blocks.remainder();
        self.remaining_data[..tail.len()].copy_from_slice(tail);
        self.remaining_length = tail.len();
    }

    /// Pad the remaining data, digest the last block(s) and return the final hash.
    pub fn finish(mut self) -> SHA1Hash {
        let mut last_block = [0_u8; BLOCK_LENGTH_BYTES];

        // append the last part of message to the block, followed by a single 1-bit
        last_block[..self.remaining_length].copy_from_slice(&self.remaining_data[..self.remaining_length]);
        last_block[self.remaining_length] = 0x80_u8;

        // if there is not enough space for the message length to be appended, another block must follow
        if self.remaining_length + 1 > LENGTH_OFFSET {
            round_function(&mut self.hash, &last_block);
            last_block = [0_u8; BLOCK_LENGTH_BYTES];
        }

        last_block[LENGTH_OFFSET..].copy_from_slice(&self.message_length.to_be_bytes());
        round_function(&mut self.hash, &last_block);

        self.hash
    }

    fn count_message_bits(&mut self, input_length: usize) {
        let message_length = self.message_length as u128 + input_length as u128 * 8;
        if message_length > u64::MAX as u128 {
            panic!("cannot hash more than 2**64 - 1 bits.")
        }

        self.message_length = message_length as u64;
    }
}

impl Default for SHA1HashState {
    fn default() -> Self {
        SHA1HashState::new()
    }
}

impl Write for SHA1HashState {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Compress one 64-byte block into the hash.
fn round_function(hash: &mut SHA1Hash, block: &[u8]) {
    let mut extended_block = [0_u32; 80];
    load_u32_be(&mut extended_block[0..16], block);

    for i in 16..80 {
        extended_block[i] = u32::rotate_left(
            extended_block[i - 3] ^ extended_block[i - 8] ^ extended_block[i - 14] ^ extended_block[i - 16],
            1,
        )
    }

    let mut round_state = *hash;

    for (i, data_word) in extended_block.iter().enumerate() {
        let (scrambled_data, magic_constant) = match i {
            0..=19 => ((round_state.b & round_state.c) | ((!round_state.b) & round_state.d), 0x5A827999),
            20..=39 => (round_state.b ^ round_state.c ^ round_state.d, 0x6ED9EBA1),
            40..=59 => (
                (round_state.b & round_state.c) | (round_state.b & round_state.d) | (round_state.c & round_state.d),
                0x8F1BBCDC,
            ),
            _ => (round_state.b ^ round_state.c ^ round_state.d, 0xCA62C1D6),
        };

        let temp = u32::rotate_left(round_state.a, 5)
            .wrapping_add(scrambled_data)
            .wrapping_add(round_state.e)
            .wrapping_add(magic_constant)
            .wrapping_add(*data_word);
        round_state.e = round_state.d;
        round_state.d = round_state.c;
        round_state.c = u32::rotate_left(round_state.b, 30);
        round_state.b = round_state.a;
        round_state.a = temp;
    }

    hash.a = hash.a.wrapping_add(round_state.a);
    hash.b = hash.b.wrapping_add(round_state.b);
    hash.c = hash.c.wrapping_add(round_state.c);
    hash.d = hash.d.wrapping_add(round_state.d);
    hash.e = hash.e.wrapping_add(round_state.e);
}

/// Digest a complete message. Each call works on its own state, so this can be called from any number of threads.
pub fn digest(input: &[u8]) -> SHA1Hash {
    let mut hash_state = SHA1HashState::new();
    hash_state.update(input);
    hash_state.finish()
}

/// Digest everything `reader` yields until it is exhausted. Errors of the reader are returned unchanged.
pub fn digest_reader<R: Read>(mut reader: R) -> io::Result<SHA1Hash> {
    let mut hash_state = SHA1HashState::new();
    io::copy(&mut reader, &mut hash_state)?;
    Ok(hash_state.finish())
}

impl HashFunction for SHA1Hash {
    type Context = ();
    type HashState = SHA1HashState;
    type HashData = SHA1Hash;

    fn init_hash(_ctx: &Self::Context) -> Self::HashState {
        SHA1HashState::new()
    }

    fn update_hash(hash: &mut Self::HashState, _ctx: &Self::Context, input: &[u8]) {
        hash.update(input)
    }

    fn finish_hash(hash: &mut Self::HashState, _ctx: &Self::Context) -> Self::HashData {
        take(hash).finish()
    }

    fn digest_message(_ctx: &Self::Context, input: &[u8]) -> Self::HashData {
        digest(input)
    }
}

impl HashValue for SHA1Hash {
    /// Generates a raw `[u8; 20]` array from the current hash state.
    fn raw(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl BlockHashFunction for SHA1Hash {
    fn block_size(_ctx: &Self::Context) -> usize {
        BLOCK_LENGTH_BYTES
    }

    fn output_size(_ctx: &Self::Context) -> usize {
        DIGEST_LENGTH_BYTES
    }
}
