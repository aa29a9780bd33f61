//! Raw sample representation coming off the radio

#[repr(C)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Complex<T> {
    pub re: T,
    pub im: T,
}

impl<T> Complex<T> {
    pub fn new(re: T, im: T) -> Self {
        Self { re, im }
    }
}

/// Interleaved signed 8-bit I/Q, the radio's native sample format
pub type ComplexByte = Complex<i8>;

/// Bytes one raw sample occupies in the ring buffer
pub const BYTES_PER_SAMPLE: u64 = std::mem::size_of::<ComplexByte>() as u64;

impl ComplexByte {
    /// Reinterpret an (I, Q) byte pair as it arrives on the wire
    pub fn from_wire(pair: [u8; 2]) -> Self {
        Self::new(pair[0] as i8, pair[1] as i8)
    }
}
