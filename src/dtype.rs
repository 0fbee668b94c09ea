//! Value-type and index-type tags for Yale storage
//!
//! The storage engine itself is generic over `(Element, IndexType)` pairs;
//! this module provides the runtime tags an embedder's dispatch layer uses
//! to pick an instantiation, the promotion rule for mixed-type operations,
//! and the element-conversion trait used by cast-copies and cross-type
//! equality.

use std::fmt;

use num_complex::Complex;
use num_traits::{FromPrimitive, Num, PrimInt, ToPrimitive, Unsigned};

/// Value types a Yale matrix can store
///
/// Using tags (alongside the generic engine) allows a host dispatch layer to
/// select a typed instantiation from runtime type information.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DType {
    /// 8-bit unsigned integer
    Byte,
    /// 8-bit signed integer
    Int8,
    /// 16-bit signed integer
    Int16,
    /// 32-bit signed integer
    Int32,
    /// 64-bit signed integer
    Int64,
    /// 32-bit floating point
    Float32,
    /// 64-bit floating point
    Float64,
    /// Complex number with two 32-bit floating point components
    Complex64,
    /// Complex number with two 64-bit floating point components
    Complex128,
    /// Boxed host-runtime reference (element width is one pointer)
    Object,
}

impl DType {
    /// Size of one element in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::Byte | Self::Int8 => 1,
            Self::Int16 => 2,
            Self::Int32 | Self::Float32 => 4,
            Self::Int64 | Self::Float64 | Self::Complex64 => 8,
            Self::Complex128 => 16,
            Self::Object => std::mem::size_of::<usize>(),
        }
    }

    /// Returns true if this is a floating point type
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64)
    }

    /// Returns true if this is a complex type
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns true if this is an integer type (signed or unsigned)
    #[inline]
    pub const fn is_int(self) -> bool {
        matches!(
            self,
            Self::Byte | Self::Int8 | Self::Int16 | Self::Int32 | Self::Int64
        )
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Byte => "byte",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float32 => "float32",
            Self::Float64 => "float64",
            Self::Complex64 => "complex64",
            Self::Complex128 => "complex128",
            Self::Object => "object",
        };
        write!(f, "{}", name)
    }
}

/// Promote two dtypes to a common dtype for mixed-type operations
///
/// Boxed references absorb everything; complex wins over real, floats win
/// over integers, and wider types win over narrower ones. Mixing the one
/// unsigned type with a signed type of the same width promotes to the next
/// wider signed type so no value is lost.
pub fn promote(lhs: DType, rhs: DType) -> DType {
    use DType::*;

    if lhs == rhs {
        return lhs;
    }
    if lhs == Object || rhs == Object {
        return Object;
    }

    // Byte against a signed integer: widen until the unsigned range fits.
    if lhs == Byte && rhs.is_int() {
        return if rhs == Int8 { Int16 } else { rhs };
    }
    if rhs == Byte && lhs.is_int() {
        return if lhs == Int8 { Int16 } else { lhs };
    }

    // Promotion priority (higher wins)
    let priority = |dt: DType| -> u8 {
        match dt {
            Object => 120,
            Complex128 => 110,
            Complex64 => 100,
            Float64 => 90,
            Float32 => 80,
            Int64 => 60,
            Int32 => 50,
            Int16 => 40,
            Int8 => 30,
            Byte => 20,
        }
    };

    if priority(lhs) >= priority(rhs) {
        lhs
    } else {
        rhs
    }
}

/// Index types a Yale matrix can use for its IJA vector
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum IType {
    /// 8-bit unsigned indices
    U8,
    /// 16-bit unsigned indices
    U16,
    /// 32-bit unsigned indices
    U32,
    /// 64-bit unsigned indices
    U64,
}

impl IType {
    /// Size of one index in bytes
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16 => 2,
            Self::U32 => 4,
            Self::U64 => 8,
        }
    }
}

/// Selects the smallest index type whose maximum representable value covers
/// `max(rows, cols)` for the given shape.
pub fn itype_for_shape(shape: &[usize]) -> IType {
    let max_dim = shape.iter().copied().max().unwrap_or(0);

    if max_dim <= u8::MAX as usize {
        IType::U8
    } else if max_dim <= u16::MAX as usize {
        IType::U16
    } else if max_dim <= u32::MAX as usize {
        IType::U32
    } else {
        IType::U64
    }
}

/// Trait for types that can be elements of a Yale matrix
///
/// Connects a Rust scalar to its runtime [`DType`] tag. Arithmetic bounds
/// beyond `Num` (such as `AddAssign` for multiplication kernels) are taken
/// per-function rather than baked in here.
pub trait Element: Copy + fmt::Debug + Num + 'static {
    /// The corresponding DType tag for this Rust type
    const DTYPE: DType;
}

macro_rules! impl_element {
    ($($t:ty => $tag:expr),* $(,)?) => {
        $(
            impl Element for $t {
                const DTYPE: DType = $tag;
            }
        )*
    };
}

impl_element! {
    u8 => DType::Byte,
    i8 => DType::Int8,
    i16 => DType::Int16,
    i32 => DType::Int32,
    i64 => DType::Int64,
    f32 => DType::Float32,
    f64 => DType::Float64,
    Complex<f32> => DType::Complex64,
    Complex<f64> => DType::Complex128,
}

/// Trait for types usable as IJA indices
///
/// Implemented for the unsigned widths named by [`IType`]. Conversions to
/// and from `usize` are unchecked in release builds; the index-type
/// selection rule at construction guarantees they fit.
pub trait IndexType:
    PrimInt + Unsigned + FromPrimitive + ToPrimitive + fmt::Debug + 'static
{
    /// The corresponding IType tag for this Rust type
    const ITYPE: IType;

    /// Convert a usize position or column into this index type
    fn from_usize(v: usize) -> Self;

    /// Widen this index back into a usize
    fn as_usize(self) -> usize;
}

macro_rules! impl_index_type {
    ($($t:ty => $tag:expr),* $(,)?) => {
        $(
            impl IndexType for $t {
                const ITYPE: IType = $tag;

                #[inline]
                fn from_usize(v: usize) -> Self {
                    debug_assert!(
                        v <= <$t>::MAX as usize,
                        "index {} out of range for {}",
                        v,
                        stringify!($t)
                    );
                    v as $t
                }

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }
            }
        )*
    };
}

impl_index_type! {
    u8 => IType::U8,
    u16 => IType::U16,
    u32 => IType::U32,
    u64 => IType::U64,
}

/// Element conversion used by cast-copies, mixed-type equality, and imports
///
/// `cast_into` follows the host promotion rule: numeric casts behave like
/// `as` conversions, real values lift into complex with a zero imaginary
/// part. The identity conversion is always available, so generic code can
/// treat a same-type copy as a cast.
pub trait CastInto<U>: Copy {
    /// Convert this value into the target element type
    fn cast_into(self) -> U;
}

macro_rules! impl_cast_numeric {
    ($($from:ty),* $(,)?) => {
        $(
            impl_cast_numeric!(@inner $from => u8, i8, i16, i32, i64, f32, f64);
        )*
    };
    (@inner $from:ty => $($to:ty),*) => {
        $(
            impl CastInto<$to> for $from {
                #[inline]
                fn cast_into(self) -> $to {
                    self as $to
                }
            }
        )*
    };
}

impl_cast_numeric!(u8, i8, i16, i32, i64, f32, f64);

macro_rules! impl_cast_to_complex {
    ($($from:ty),* $(,)?) => {
        $(
            impl CastInto<Complex<f32>> for $from {
                #[inline]
                fn cast_into(self) -> Complex<f32> {
                    Complex::new(self as f32, 0.0)
                }
            }

            impl CastInto<Complex<f64>> for $from {
                #[inline]
                fn cast_into(self) -> Complex<f64> {
                    Complex::new(self as f64, 0.0)
                }
            }
        )*
    };
}

impl_cast_to_complex!(u8, i8, i16, i32, i64, f32, f64);

impl CastInto<Complex<f32>> for Complex<f32> {
    #[inline]
    fn cast_into(self) -> Complex<f32> {
        self
    }
}

impl CastInto<Complex<f64>> for Complex<f32> {
    #[inline]
    fn cast_into(self) -> Complex<f64> {
        Complex::new(self.re as f64, self.im as f64)
    }
}

impl CastInto<Complex<f32>> for Complex<f64> {
    #[inline]
    fn cast_into(self) -> Complex<f32> {
        Complex::new(self.re as f32, self.im as f32)
    }
}

impl CastInto<Complex<f64>> for Complex<f64> {
    #[inline]
    fn cast_into(self) -> Complex<f64> {
        self
    }
}
