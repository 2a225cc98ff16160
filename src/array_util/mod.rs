#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_u32_be() {
        let mut dest = [0u32; 2];
        load_u32_be(&mut dest, &[0x12, 0x34, 0x56, 0x78, 0x00, 0xFF, 0x00, 0xFF, 0xAB]);
        assert_eq!([0x1234_5678u32, 0x00FF_00FFu32], dest)
    }

    #[test]
    #[should_panic]
    fn test_load_short_source() {
        let mut dest = [0u32; 2];
        load_u32_be(&mut dest, &[0x12, 0x34, 0x56, 0x78, 0x00]);
    }
}

/// Copies the ``source`` array to the ``dest`` array with respect to endianness. ``source`` must be at least four
/// times bigger than ``dest``, otherwise this function panics. Data from ``source`` will be treated as big endian
/// integers, trailing bytes are ignored.
pub(crate) fn load_u32_be(dest: &mut [u32], source: &[u8]) {
    assert!(source.len() >= dest.len() * 4);

    for (word, bytes) in dest.iter_mut().zip(source.chunks_exact(4)) {
        *word = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    }
}
