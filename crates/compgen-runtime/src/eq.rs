//! Structural equality and hashing over schema values.
//!
//! Floats compare NaN equal to NaN and `-0.0` equal to `0.0`; their hash is
//! taken over a canonical bit pattern so equal values hash equally. Maps
//! compare as sets of entries and hash independently of iteration order.

use crate::EntityId;
use std::hash::{DefaultHasher, Hash, Hasher};

///
/// SchemaEq
///

pub trait SchemaEq {
    fn schema_eq(&self, other: &Self) -> bool;
}

///
/// SchemaHash
///

pub trait SchemaHash {
    fn schema_hash<H: Hasher>(&self, state: &mut H);
}

// impl_exact
// kinds whose std equality and hash already agree
macro_rules! impl_exact {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SchemaEq for $ty {
                fn schema_eq(&self, other: &Self) -> bool {
                    self == other
                }
            }

            impl SchemaHash for $ty {
                fn schema_hash<H: Hasher>(&self, state: &mut H) {
                    Hash::hash(self, state);
                }
            }
        )*
    };
}

impl_exact!(bool, u8, i32, i64, u32, u64, String, EntityId);

// impl_float
macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SchemaEq for $ty {
                fn schema_eq(&self, other: &Self) -> bool {
                    self == other || (self.is_nan() && other.is_nan())
                }
            }

            impl SchemaHash for $ty {
                fn schema_hash<H: Hasher>(&self, state: &mut H) {
                    let bits = if self.is_nan() {
                        <$ty>::NAN.to_bits()
                    } else if *self == 0.0 {
                        0
                    } else {
                        self.to_bits()
                    };

                    Hash::hash(&bits, state);
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl<T: SchemaEq> SchemaEq for Option<T> {
    fn schema_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Some(a), Some(b)) => a.schema_eq(b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<T: SchemaHash> SchemaHash for Option<T> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Some(value) => {
                state.write_u8(1);
                value.schema_hash(state);
            }
            None => state.write_u8(0),
        }
    }
}

impl<T: SchemaEq> SchemaEq for [T] {
    fn schema_eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, b)| a.schema_eq(b))
    }
}

impl<T: SchemaHash> SchemaHash for [T] {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for item in self {
            item.schema_hash(state);
        }
    }
}

impl<T: SchemaEq> SchemaEq for Vec<T> {
    fn schema_eq(&self, other: &Self) -> bool {
        self.as_slice().schema_eq(other.as_slice())
    }
}

impl<T: SchemaHash> SchemaHash for Vec<T> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().schema_hash(state);
    }
}

impl<T: SchemaEq + ?Sized> SchemaEq for Box<T> {
    fn schema_eq(&self, other: &Self) -> bool {
        (**self).schema_eq(other)
    }
}

impl<T: SchemaHash + ?Sized> SchemaHash for Box<T> {
    fn schema_hash<H: Hasher>(&self, state: &mut H) {
        (**self).schema_hash(state);
    }
}

/// Set equality over key/value entries. Entry lists never repeat a key, so
/// equal lengths plus containment in one direction is sufficient.
pub fn entries_eq<K: SchemaEq, V: SchemaEq>(a: &[(K, V)], b: &[(K, V)]) -> bool {
    a.len() == b.len()
        && a.iter().all(|(ka, va)| {
            b.iter()
                .any(|(kb, vb)| ka.schema_eq(kb) && va.schema_eq(vb))
        })
}

/// Order-independent hash over key/value entries.
pub fn entries_hash<K: SchemaHash, V: SchemaHash, H: Hasher>(entries: &[(K, V)], state: &mut H) {
    let mut acc = 0u64;
    for (key, value) in entries {
        let mut entry = DefaultHasher::new();
        key.schema_hash(&mut entry);
        value.schema_hash(&mut entry);
        acc = acc.wrapping_add(entry.finish());
    }

    state.write_usize(entries.len());
    state.write_u64(acc);
}

/// Hash a single value with the default hasher.
pub fn hash_one<T: SchemaHash + ?Sized>(value: &T) -> u64 {
    let mut state = DefaultHasher::new();
    value.schema_hash(&mut state);

    state.finish()
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn nan_equals_nan_and_zero_signs_agree() {
        assert!(f64::NAN.schema_eq(&f64::NAN));
        assert!((-0.0f64).schema_eq(&0.0));
        assert_eq!(hash_one(&-0.0f32), hash_one(&0.0f32));
        assert_eq!(hash_one(&f64::NAN), hash_one(&-f64::NAN));
        assert!(!1.0f64.schema_eq(&f64::NAN));
    }

    #[test]
    fn option_distinguishes_absent_from_default() {
        assert!(!Some(0i32).schema_eq(&None));
        assert_ne!(hash_one(&Some(0i32)), hash_one(&None::<i32>));
    }

    #[test]
    fn entries_ignore_order() {
        let a = vec![(1u32, "a".to_string()), (2, "b".to_string())];
        let b = vec![(2u32, "b".to_string()), (1, "a".to_string())];

        assert!(entries_eq(&a, &b));

        let (mut ha, mut hb) = (DefaultHasher::new(), DefaultHasher::new());
        entries_hash(&a, &mut ha);
        entries_hash(&b, &mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }

    #[test]
    fn entries_differ_on_value() {
        let a = vec![(1u32, 10i64)];
        let b = vec![(1u32, 11i64)];

        assert!(!entries_eq(&a, &b));
    }

    proptest! {
        #[test]
        fn equal_floats_hash_equally(a in any::<f64>(), b in any::<f64>()) {
            if a.schema_eq(&b) {
                prop_assert_eq!(hash_one(&a), hash_one(&b));
            }
        }

        #[test]
        fn float_eq_is_reflexive(a in any::<f32>()) {
            prop_assert!(a.schema_eq(&a));
        }
    }
}
