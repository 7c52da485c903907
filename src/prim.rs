//! The eight primitive types wrappers are specialised over, and how their
//! values are boxed into hashable cache keys.

use std::fmt;
use std::hash::Hash;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
        PrimitiveKind::Double,
        PrimitiveKind::Float,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Short,
    ];

    pub fn is_floating(&self) -> bool {
        matches!(self, PrimitiveKind::Double | PrimitiveKind::Float)
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Byte => "byte",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Double => "double",
            PrimitiveKind::Float => "float",
            PrimitiveKind::Int => "int",
            PrimitiveKind::Long => "long",
            PrimitiveKind::Short => "short",
        };
        write!(f, "{}", name)
    }
}

/// A primitive value type.
///
/// `Boxed` is the reference-like form of the value used wherever a hashable,
/// totally comparable representation is needed. Floating point values box to
/// their bit pattern with a single canonical NaN, so `NaN` equals itself and
/// `0.0` differs from `-0.0`.
pub trait Primitive: Copy + PartialEq + fmt::Debug + Send + Sync + 'static {
    const KIND: PrimitiveKind;
    type Boxed: Eq + Hash + Clone + fmt::Debug + Send + Sync + 'static;

    fn boxed(self) -> Self::Boxed;
    fn unboxed(boxed: &Self::Boxed) -> Self;
}

macro_rules! identity_boxed {
    ($($t:ty => $kind:ident),* $(,)?) => {
        $(
            impl Primitive for $t {
                const KIND: PrimitiveKind = PrimitiveKind::$kind;
                type Boxed = $t;

                #[inline]
                fn boxed(self) -> $t {
                    self
                }

                #[inline]
                fn unboxed(boxed: &$t) -> $t {
                    *boxed
                }
            }
        )*
    };
}

identity_boxed!(
    bool => Boolean,
    i8 => Byte,
    char => Char,
    i32 => Int,
    i64 => Long,
    i16 => Short,
);

/// Boxed `f64`: the canonical bit pattern of the value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BoxedDouble(u64);

/// Boxed `f32`: the canonical bit pattern of the value.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct BoxedFloat(u32);

impl BoxedDouble {
    pub fn value(&self) -> f64 {
        f64::from_bits(self.0)
    }
}

impl BoxedFloat {
    pub fn value(&self) -> f32 {
        f32::from_bits(self.0)
    }
}

impl Primitive for f64 {
    const KIND: PrimitiveKind = PrimitiveKind::Double;
    type Boxed = BoxedDouble;

    fn boxed(self) -> BoxedDouble {
        if self.is_nan() {
            BoxedDouble(f64::NAN.to_bits())
        } else {
            BoxedDouble(self.to_bits())
        }
    }

    fn unboxed(boxed: &BoxedDouble) -> f64 {
        boxed.value()
    }
}

impl Primitive for f32 {
    const KIND: PrimitiveKind = PrimitiveKind::Float;
    type Boxed = BoxedFloat;

    fn boxed(self) -> BoxedFloat {
        if self.is_nan() {
            BoxedFloat(f32::NAN.to_bits())
        } else {
            BoxedFloat(self.to_bits())
        }
    }

    fn unboxed(boxed: &BoxedFloat) -> f32 {
        boxed.value()
    }
}

/// Values that can key a memoization cache.
pub trait CacheKey {
    type Key: Eq + Hash + Send + 'static;

    fn cache_key(&self) -> Self::Key;
}

macro_rules! primitive_cache_key {
    ($($t:ty),*) => {
        $(
            impl CacheKey for $t {
                type Key = <$t as Primitive>::Boxed;

                #[inline]
                fn cache_key(&self) -> Self::Key {
                    self.boxed()
                }
            }
        )*
    };
}

primitive_cache_key!(bool, i8, char, f64, f32, i32, i64, i16);

impl CacheKey for String {
    type Key = String;

    fn cache_key(&self) -> String {
        self.clone()
    }
}

impl CacheKey for &'static str {
    type Key = &'static str;

    fn cache_key(&self) -> &'static str {
        self
    }
}

impl<A: CacheKey, B: CacheKey> CacheKey for (A, B) {
    type Key = (A::Key, B::Key);

    fn cache_key(&self) -> Self::Key {
        (self.0.cache_key(), self.1.cache_key())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(<i32 as Primitive>::KIND, PrimitiveKind::Int);
        assert_eq!(<char as Primitive>::KIND, PrimitiveKind::Char);
        assert_eq!(<f32 as Primitive>::KIND.to_string(), "float");
        assert!(PrimitiveKind::Double.is_floating());
        assert!(!PrimitiveKind::Short.is_floating());
        assert_eq!(PrimitiveKind::ALL.len(), 8);
    }

    #[test]
    fn integers_box_to_themselves() {
        assert_eq!(42i32.boxed(), 42);
        assert_eq!(i64::unboxed(&(-7i64).boxed()), -7);
        assert_eq!('x'.boxed(), 'x');
        assert!(true.boxed());
    }

    #[test]
    fn nan_boxes_equal() {
        let quiet = f64::NAN;
        let other = f64::from_bits(f64::NAN.to_bits() | 1);
        assert!(other.is_nan());
        assert_eq!(quiet.boxed(), other.boxed());
        assert!(f64::unboxed(&other.boxed()).is_nan());
        assert_eq!(f32::NAN.boxed(), (-f32::NAN).boxed());
    }

    #[test]
    fn signed_zeros_box_apart() {
        assert_ne!(0.0f64.boxed(), (-0.0f64).boxed());
        assert_ne!(0.0f32.boxed(), (-0.0f32).boxed());
        assert_eq!(1.5f64.boxed().value(), 1.5);
    }

    #[test]
    fn pair_keys() {
        assert_eq!((1i32, 2.0f64).cache_key(), (1, 2.0f64.boxed()));
        assert_ne!((1i32, 2i32).cache_key(), (2, 1));
    }
}
