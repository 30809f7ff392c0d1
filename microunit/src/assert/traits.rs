//! Coercion traits backing `assert_true`, `assert_in` and `assert_is_instance_of`.

use std::any::{Any, type_name};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::hash::Hash;

/// Truthiness: zero, empty and absent values are false, everything else true.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

macro_rules! truthy_numbers {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Truthy for $ty {
                fn is_truthy(&self) -> bool {
                    *self != 0 as $ty
                }
            }
        )*
    };
}

truthy_numbers!(
    i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Truthy for () {
    fn is_truthy(&self) -> bool {
        false
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for [T] {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, const N: usize> Truthy for [T; N] {
    fn is_truthy(&self) -> bool {
        N != 0
    }
}

impl<T> Truthy for Vec<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for VecDeque<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V, S> Truthy for HashMap<K, V, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T, S> Truthy for HashSet<T, S> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<K, V> Truthy for BTreeMap<K, V> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl<T> Truthy for BTreeSet<T> {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

/// `None` is false, `Some(v)` is as truthy as `v`.
impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(Truthy::is_truthy)
    }
}

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy + ?Sized> Truthy for Box<T> {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

/// Membership test used by `assert_in`.
pub trait Contains<Item: ?Sized> {
    fn contains_item(&self, item: &Item) -> bool;
}

impl<T: PartialEq> Contains<T> for [T] {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq, const N: usize> Contains<T> for [T; N] {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq> Contains<T> for Vec<T> {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: PartialEq> Contains<T> for VecDeque<T> {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

/// Substring membership.
impl Contains<str> for str {
    fn contains_item(&self, item: &str) -> bool {
        self.contains(item)
    }
}

impl Contains<char> for str {
    fn contains_item(&self, item: &char) -> bool {
        self.contains(*item)
    }
}

impl Contains<str> for String {
    fn contains_item(&self, item: &str) -> bool {
        self.contains(item)
    }
}

impl Contains<char> for String {
    fn contains_item(&self, item: &char) -> bool {
        self.contains(*item)
    }
}

impl<T: Eq + Hash> Contains<T> for HashSet<T> {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

impl<T: Ord> Contains<T> for BTreeSet<T> {
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }
}

/// Maps contain their keys.
impl<K: Eq + Hash, V> Contains<K> for HashMap<K, V> {
    fn contains_item(&self, item: &K) -> bool {
        self.contains_key(item)
    }
}

impl<K: Ord, V> Contains<K> for BTreeMap<K, V> {
    fn contains_item(&self, item: &K) -> bool {
        self.contains_key(item)
    }
}

/// A tuple of types a value may be an instance of.
pub trait TypeSet {
    fn matches(value: &dyn Any) -> bool;
    fn names() -> String;
}

macro_rules! type_sets {
    ($(($($ty:ident),+)),* $(,)?) => {
        $(
            impl<$($ty: Any),+> TypeSet for ($($ty,)+) {
                fn matches(value: &dyn Any) -> bool {
                    $(value.is::<$ty>())||+
                }

                fn names() -> String {
                    let names: &[&str] = &[$(type_name::<$ty>()),+];
                    format!("({})", names.join(", "))
                }
            }
        )*
    };
}

type_sets!((A), (A, B), (A, B, C), (A, B, C, D), (A, B, C, D, E), (A, B, C, D, E, F));

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&true, true)]
    #[case(&false, false)]
    #[case(&0i32, false)]
    #[case(&-3i64, true)]
    #[case(&0.0f64, false)]
    #[case(&f64::NAN, true)]
    #[case(&"", false)]
    #[case(&"x", true)]
    #[case(&(), false)]
    fn test_truthiness_of_scalars(#[case] value: &dyn DynTruthy, #[case] expected: bool) {
        assert_eq!(value.truthy(), expected);
    }

    trait DynTruthy {
        fn truthy(&self) -> bool;
    }

    impl<T: Truthy> DynTruthy for T {
        fn truthy(&self) -> bool {
            self.is_truthy()
        }
    }

    #[test]
    fn test_truthiness_of_containers() {
        assert!(!Vec::<u8>::new().is_truthy());
        assert!(vec![0u8].is_truthy());
        assert!(!HashMap::<u8, u8>::new().is_truthy());
        assert!(!Option::<u8>::None.is_truthy());
        assert!(!Some(0u8).is_truthy());
        assert!(Some("a").is_truthy());
        assert!(!([] as [u8; 0]).is_truthy());
    }

    #[test]
    fn test_membership() {
        assert!([1, 2, 3].contains_item(&2));
        assert!(!vec!["a", "b"].contains_item(&"c"));
        assert!("hello".contains_item("ell"));
        assert!("hello".contains_item(&'h'));

        let map: BTreeMap<&str, u8> = [("k", 1)].into_iter().collect();
        assert!(map.contains_item(&"k"));
        assert!(!map.contains_item(&"v"));
    }

    #[test]
    fn test_type_sets() {
        assert!(<(i32, String)>::matches(&String::from("s")));
        assert!(!<(i32, String)>::matches(&1.5f64));
        assert_eq!(<(u8,)>::names(), "(u8)");
    }
}
