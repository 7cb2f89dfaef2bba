//! types for working with raw big-endian bytes

/// A byte array that holds the raw big-endian representation of a scalar.
///
/// You do not need to implement this yourself; it is implemented for
/// `[u8; N]`, which is the raw type of every scalar in this crate.
pub trait BeByteArray: Copy + AsRef<[u8]> + 'static {
    /// Copy an array out of the front of `slice`, if it is long enough.
    fn from_slice(slice: &[u8]) -> Option<Self>;
}

impl<const N: usize> BeByteArray for [u8; N] {
    fn from_slice(slice: &[u8]) -> Option<Self> {
        slice.get(..N)?.try_into().ok()
    }
}

/// A trait for font scalars.
///
/// Implementations convert between a typed value and the exact big-endian
/// bytes that represent it in a table.
pub trait Scalar: Copy {
    /// The raw byte representation of this type.
    type Raw: BeByteArray;

    /// Encode this type as raw big-endian bytes.
    fn to_raw(self) -> Self::Raw;

    /// Create an instance of this type from raw big-endian bytes.
    fn from_raw(raw: Self::Raw) -> Self;

    /// Read this type from the front of `slice`, if it is long enough.
    fn read(slice: &[u8]) -> Option<Self> {
        Self::Raw::from_slice(slice).map(Self::from_raw)
    }
}

/// A type with a known, constant size in a table.
pub trait FixedSize: Sized {
    /// The size of this type on the wire, in bytes.
    const RAW_BYTE_LEN: usize;
}

/// A wrapper around raw big-endian bytes for some type.
#[repr(transparent)]
pub struct BigEndian<T: Scalar>(T::Raw);

impl<T: Scalar> BigEndian<T> {
    /// Construct a new wrapper around the raw bytes of `value`.
    pub fn new(value: T) -> Self {
        BigEndian(value.to_raw())
    }

    /// Read a copy of this type from the raw bytes.
    pub fn get(self) -> T {
        T::from_raw(self.0)
    }

    /// Set the value, overwriting the bytes.
    pub fn set(&mut self, value: T) {
        self.0 = value.to_raw();
    }
}

impl<T: Scalar> Clone for BigEndian<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Scalar> Copy for BigEndian<T> {}

impl<T: Scalar> FixedSize for BigEndian<T> {
    const RAW_BYTE_LEN: usize = std::mem::size_of::<T::Raw>();
}

// SAFETY: BigEndian<T> is a transparent wrapper around a byte array, for
// which any bit pattern (including all zeroes) is valid.
#[allow(unsafe_code)]
unsafe impl<T: Scalar + 'static> bytemuck::Zeroable for BigEndian<T> {}

// SAFETY: as above; every possible byte array is a valid BigEndian<T>.
#[allow(unsafe_code)]
unsafe impl<T: Scalar + 'static> bytemuck::AnyBitPattern for BigEndian<T> {}

impl<T: std::fmt::Debug + Scalar> std::fmt::Debug for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: std::fmt::Display + Scalar> std::fmt::Display for BigEndian<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        self.get().fmt(f)
    }
}

impl<T: Scalar + PartialEq> PartialEq for BigEndian<T> {
    fn eq(&self, other: &Self) -> bool {
        self.get() == other.get()
    }
}

impl<T: Scalar + Eq> Eq for BigEndian<T> {}

/// An internal macro for implementing [`Scalar`] for a newtype over another
/// scalar.
#[macro_export]
macro_rules! newtype_scalar {
    ($name:ident, $raw:ty) => {
        impl $crate::Scalar for $name {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                $crate::Scalar::to_raw(self.0)
            }

            fn from_raw(raw: $raw) -> Self {
                Self($crate::Scalar::from_raw(raw))
            }
        }

        impl $crate::FixedSize for $name {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$raw>();
        }
    };
}

macro_rules! int_scalar {
    ($ty:ty, $raw:ty) => {
        impl crate::raw::Scalar for $ty {
            type Raw = $raw;
            fn to_raw(self) -> $raw {
                self.to_be_bytes()
            }

            fn from_raw(raw: $raw) -> $ty {
                Self::from_be_bytes(raw)
            }
        }

        impl crate::raw::FixedSize for $ty {
            const RAW_BYTE_LEN: usize = std::mem::size_of::<$raw>();
        }
    };
}

int_scalar!(u8, [u8; 1]);
int_scalar!(i8, [u8; 1]);
int_scalar!(u16, [u8; 2]);
int_scalar!(i16, [u8; 2]);
int_scalar!(u32, [u8; 4]);
int_scalar!(i32, [u8; 4]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_be_bytes() {
        assert_eq!(i32::from_raw((-16776978i32).to_raw()), -16776978);
        assert_eq!((-16776978i32).to_raw(), [0xFF, 0x00, 0x00, 0xEE]);
        assert_eq!(u16::read(&[0xDE, 0xAD, 0xBE]), Some(0xDEAD));
        assert_eq!(u16::read(&[0xDE]), None);
    }

    #[test]
    fn big_endian_is_castable() {
        let bytes = [0x00u8, 0x02, 0x00, 0x01];
        let values: &[BigEndian<u16>] = bytemuck::cast_slice(&bytes);
        assert_eq!(values.len(), 2);
        assert_eq!(values[0].get(), 2);
        assert_eq!(values[1].get(), 1);
    }
}
