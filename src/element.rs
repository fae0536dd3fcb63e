use half::f16;
#[cfg(feature = "complex")]
use num_complex::Complex;
use num_traits::Zero;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DType {
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F16,
    F32,
    F64,
    C32,
    C64,
}

impl DType {
    pub fn name(&self) -> &'static str {
        match self {
            DType::I8 => "i8",
            DType::I16 => "i16",
            DType::I32 => "i32",
            DType::I64 => "i64",
            DType::U8 => "u8",
            DType::U16 => "u16",
            DType::U32 => "u32",
            DType::U64 => "u64",
            DType::F16 => "f16",
            DType::F32 => "f32",
            DType::F64 => "f64",
            DType::C32 => "complex<f32>",
            DType::C64 => "complex<f64>",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar that can live in a [`Buffer`](crate::Buffer).
///
/// Text codecs go through `Display`/`FromStr`; the binary codec goes
/// through the native-endian byte methods, `WIDTH` bytes per element.
pub trait Element: Copy + PartialEq + Zero + fmt::Debug + fmt::Display + FromStr + 'static {
    const DTYPE: DType;

    const WIDTH: usize = std::mem::size_of::<Self>();

    /// Writes `WIDTH` bytes into the front of `dst`.
    fn write_ne_bytes(&self, dst: &mut [u8]);

    /// Reads a value from the first `WIDTH` bytes of `src`.
    fn read_ne_bytes(src: &[u8]) -> Self;
}

macro_rules! impl_element {
    ($($e:ident => $d:ident),*) => {
        $(impl Element for $e {
            const DTYPE: DType = DType::$d;

            fn write_ne_bytes(&self, dst: &mut [u8]) {
                dst[..Self::WIDTH].copy_from_slice(&self.to_ne_bytes());
            }

            fn read_ne_bytes(src: &[u8]) -> Self {
                let mut b = [0u8; std::mem::size_of::<$e>()];
                b.copy_from_slice(&src[..Self::WIDTH]);
                $e::from_ne_bytes(b)
            }
        })*
    };
}

impl_element!(
    i8 => I8, i16 => I16, i32 => I32, i64 => I64,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64,
    f16 => F16, f32 => F32, f64 => F64
);

// re then im, each in the part's native encoding
#[cfg(feature = "complex")]
macro_rules! impl_complex_element {
    ($($f:ident => $d:ident),*) => {
        $(impl Element for Complex<$f> {
            const DTYPE: DType = DType::$d;

            fn write_ne_bytes(&self, dst: &mut [u8]) {
                let w = <$f as Element>::WIDTH;
                self.re.write_ne_bytes(&mut dst[..w]);
                self.im.write_ne_bytes(&mut dst[w..2 * w]);
            }

            fn read_ne_bytes(src: &[u8]) -> Self {
                let w = <$f as Element>::WIDTH;
                Complex::new(
                    <$f as Element>::read_ne_bytes(&src[..w]),
                    <$f as Element>::read_ne_bytes(&src[w..2 * w]),
                )
            }
        })*
    };
}

#[cfg(feature = "complex")]
impl_complex_element!(f32 => C32, f64 => C64);
