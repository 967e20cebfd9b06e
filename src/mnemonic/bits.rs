//! Big-endian bit packing over byte buffers (MSB of byte 0 is bit 0).

/// Read `width` (<= 16) bits starting at bit `offset`.
pub(crate) fn read_bits(buf: &[u8], offset: usize, width: usize) -> u16 {
    (offset..offset + width).fold(0u16, |acc, bit| {
        let set = (buf[bit / 8] >> (7 - bit % 8)) & 1;
        (acc << 1) | u16::from(set)
    })
}

/// OR the low `width` (<= 16) bits of `value` into `buf` at bit `offset`.
pub(crate) fn write_bits(buf: &mut [u8], offset: usize, width: usize, value: u16) {
    for i in 0..width {
        if (value >> (width - 1 - i)) & 1 == 1 {
            let bit = offset + i;
            buf[bit / 8] |= 0x80 >> (bit % 8);
        }
    }
}
