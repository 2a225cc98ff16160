//! A dependency-free software implementation of the SHA-1 digest, used to fingerprint chunks of content. The
//! digest can be computed in one shot with [`sha1`] or fed incrementally through a [`sha1::SHA1HashState`].
//!
//! Digests are exposed as five 32-bit words in `h0..h4` order and, canonically, as a 20-byte big-endian array.

pub mod sha1;

mod array_util;

pub use crate::sha1::{digest as sha1, ParseDigestError, SHA1Hash, SHA1HashState};

/// Output of a `HashFunction`.
pub trait HashValue {
    /// Obtain the hash as a raw byte array.
    fn raw(&self) -> Vec<u8>;
}

/// An implementation of a hashing algorithm. It defines three implementation dependent types,
/// one of which is the output hash type.
pub trait HashFunction {
    /// Implementation dependent context during hashing. May contain parameters specific to the
    /// algorithm.
    type Context;

    /// Contains the current unfinished hash value. It is constructed using `init_hash` and then
    /// used by this function as the target vector where all data is compressed into.
    type HashState;

    /// Final hash value that is obtained through completion of the hashing function. It may be
    /// the same type as `Self::HashState` though it is treated as a separate type to ensure
    /// correct usage.
    type HashData: HashValue;

    /// Obtain an initial hash value (usually the IV) conforming to the parameters set by the
    /// given `Self::Context`.
    fn init_hash(ctx: &Self::Context) -> Self::HashState;

    /// Update the hash with more data. If not all data can be consumed, the remaining buffer
    /// will be stored within the given hash state.
    fn update_hash(hash: &mut Self::HashState, ctx: &Self::Context, input: &[u8]);

    /// Finish the hash using the last bit of input data. The resulting hash is returned. The
    /// given `hash` is reset to the state `init_hash` would return, so it can be reused for the
    /// next message right away.
    fn finish_hash(hash: &mut Self::HashState, ctx: &Self::Context) -> Self::HashData;

    /// Convenience method to initialize a hash state and completely compress the given `input`
    /// into it. Then the final hash is returned.
    fn digest_message(ctx: &Self::Context, input: &[u8]) -> Self::HashData {
        let mut hash_state = Self::init_hash(ctx);
        Self::update_hash(&mut hash_state, ctx, input);
        Self::finish_hash(&mut hash_state, ctx)
    }
}

/// A special hash function that consumes input in blocks of uniform size.
pub trait BlockHashFunction: HashFunction {
    /// Obtain the block size this hash consumes given the specified context.
    fn block_size(ctx: &Self::Context) -> usize;

    /// Obtain the output size this hash will produce given the specified context.
    fn output_size(ctx: &Self::Context) -> usize;
}

#[cfg(test)]
pub(crate) mod tests {
    use std::thread;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;

    pub const EMPTY_MESSAGE: &str = "";

    pub const SOME_TEXT: &str = "a-very-long-message-that-can-be-digested-at-once";

    pub const QUICK_FOX: &str = "The quick brown fox jumps over the lazy dog";

    pub const LONG_TEXT: &str = "And Ion held six fingers aloft and upon their spears did the \
soldiers impale themselves. \"For you!\" they cried before the blood drowned their tongues. \
And Ion said, \"Now do you see?\" And Nadox wept, as more did skewer themselves in Ion's name, \
for he had seen and now knew the truth of his words.";

    pub const STREAM_TEXT: [&str; 3] = [
        "Then Ion called the Klavigar to Him, and together they sat for a time within the heart \
of the Leviathan. They spoke of many things, of the darkness to come, and of the Fall. For the \
Ozirmok knew of what would befall them all at Kythera. ",
        "And, in turn, He bade each of them to go forth and set in motion the beginning of the \
Great Plan. To Orok and to his disciple Halyna Ieva, He bade them to create the \
beginnings of a great force, one to rival that of the halkostana, but to do so in secret. \
To Lovataar and her disciple Kalakaran, to study the root of small things, to understand \
unto even the base of life itself. To learn all there was to know of how to spread the \
Flesh. ",
        "To Saarn and her disciple Naman, He bade to study life itself, how to consume more than \
merely the flesh, but to study the vitality of the soul. And finally, onto Nadox and his \
disciple Zhizao, He laid the heaviest burden. To carry the weight of the Nalmasak, that \
which was His Holy Word. To bring forth His vision, to make it manifest in the world \
after He was gone."
    ];

    #[test]
    fn test_sha1() {
        assert_eq!(
            hex::encode(&SHA1Hash::digest_message(&(), EMPTY_MESSAGE.as_bytes()).raw()),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );

        assert_eq!(
            hex::encode(&SHA1Hash::digest_message(&(), b"abc").raw()),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );

        assert_eq!(
            hex::encode(&SHA1Hash::digest_message(&(), QUICK_FOX.as_bytes()).raw()),
            "2fd4e1c67a2d28fced849ee1bb76e7391b93eb12"
        );

        assert_eq!(
            hex::encode(&SHA1Hash::digest_message(&(), SOME_TEXT.as_bytes()).raw()),
            "931bec5eec465b2e742deafbdcae2681820a4ac9"
        );

        assert_eq!(
            hex::encode(&SHA1Hash::digest_message(&(), LONG_TEXT.as_bytes()).raw()),
            "ae410e98987c6543498833540e93dd7129fc8e0b"
        );
    }

    #[test]
    fn test_sha1_stream() {
        let ctx = ();
        let mut hash_state = SHA1Hash::init_hash(&ctx);
        SHA1Hash::update_hash(&mut hash_state, &ctx, STREAM_TEXT[0].as_bytes());
        SHA1Hash::update_hash(&mut hash_state, &ctx, STREAM_TEXT[1].as_bytes());
        SHA1Hash::update_hash(&mut hash_state, &ctx, STREAM_TEXT[2].as_bytes());

        let hash = SHA1Hash::finish_hash(&mut hash_state, &ctx);
        assert_eq!(hex::encode(hash.raw()), "c11280314809ce63f5d17a92b9a858317141f747");
    }

    #[test]
    fn test_sha1_block_sizes() {
        assert_eq!(SHA1Hash::block_size(&()), 64);
        assert_eq!(SHA1Hash::output_size(&()), 20);
        assert_eq!(SHA1Hash::digest_message(&(), b"abc").raw().len(), SHA1Hash::output_size(&()));
    }

    #[test]
    fn test_sha1_reexport() {
        assert_eq!(sha1(QUICK_FOX.as_bytes()), SHA1Hash::digest_message(&(), QUICK_FOX.as_bytes()));
    }

    #[test]
    fn test_deterministic() {
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for _ in 0..32 {
            let length = rng.gen_range(0, 300);
            let mut message = vec![0u8; length];
            rng.fill(&mut message[..]);

            assert_eq!(sha1(&message), sha1(&message));
        }
    }

    #[test]
    fn test_concurrent_digests() {
        let messages: Vec<Vec<u8>> = (0..8u8)
            .map(|i| (0..1000 + i as usize * 77).map(|j| (j as u8).wrapping_mul(i + 1)).collect())
            .collect();
        let expected: Vec<SHA1Hash> = messages.iter().map(|m| sha1(m)).collect();

        let handles: Vec<_> = messages
            .into_iter()
            .map(|message| thread::spawn(move || (0..50).map(|_| sha1(&message)).collect::<Vec<_>>()))
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            let results = handle.join().unwrap();
            assert!(results.iter().all(|hash| *hash == expected));
        }
    }
}
