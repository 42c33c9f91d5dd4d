//! # Scalar Codec
//!
//! Fixed-width plain values stored in a datastream slot.

/// A fixed-width value that can be copied in and out of a storage slot.
///
/// Encoding uses native byte order, matching a raw copy of the value.
pub trait Scalar: Copy {
    /// Encoded byte array.
    type Bytes: AsRef<[u8]>;

    /// Encoded width in bytes.
    const WIDTH: usize;

    /// Encode the value.
    fn to_bytes(self) -> Self::Bytes;

    /// Decode a value. `None` if `bytes` is not exactly `WIDTH` long.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;
}

macro_rules! impl_scalar_numeric {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                type Bytes = [u8; std::mem::size_of::<$t>()];
                const WIDTH: usize = std::mem::size_of::<$t>();

                fn to_bytes(self) -> Self::Bytes {
                    self.to_ne_bytes()
                }

                fn from_bytes(bytes: &[u8]) -> Option<Self> {
                    bytes.try_into().ok().map(<$t>::from_ne_bytes)
                }
            }
        )*
    };
}

impl_scalar_numeric!(u8, u16, u32, u64, i8, i16, i32, i64, f32, f64);

impl Scalar for bool {
    type Bytes = [u8; 1];
    const WIDTH: usize = 1;

    fn to_bytes(self) -> Self::Bytes {
        [u8::from(self)]
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [b] => Some(*b != 0),
            _ => None,
        }
    }
}

impl<const N: usize> Scalar for [u8; N] {
    type Bytes = [u8; N];
    const WIDTH: usize = N;

    fn to_bytes(self) -> Self::Bytes {
        self
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytes.try_into().ok()
    }
}
