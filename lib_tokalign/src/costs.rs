use std::{
    fmt::{Debug, Display},
    ops::{Add, AddAssign},
};

use noisy_float::types::{R64, r64};
use num_traits::Zero;

/// The cost of an edit operation or of a cell in the alignment matrix.
///
/// Costs are totally ordered, so that the back-trace can compare matrix cells without ambiguity.
pub trait EditCost:
    Add<Output = Self> + AddAssign + Zero + Display + Debug + Ord + Eq + Copy
{
    fn as_f64(&self) -> f64;

    fn from_usize(value: usize) -> Self;
}

macro_rules! primitive_cost {
    ($name:ident, $primitive:ident) => {
        #[doc = concat!("An edit cost.\n\nThis cost type uses [`", stringify!($primitive), "`] as the internal representation of cost.")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name($primitive);

        impl $crate::costs::EditCost for $name {
            fn as_f64(&self) -> f64 {
                self.0 as f64
            }

            fn from_usize(value: usize) -> Self {
                Self(value.try_into().unwrap())
            }
        }

        impl $name {
            pub fn as_primitive(&self) -> $primitive {
                self.0
            }
        }

        impl From<$primitive> for $name {
            fn from(value: $primitive) -> Self {
                Self(value)
            }
        }

        impl From<u8> for $name {
            fn from(value: u8) -> Self {
                Self(value.into())
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;

            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0.checked_add(rhs.0).unwrap())
            }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) {
                *self = *self + rhs;
            }
        }

        impl num_traits::Zero for $name {
            fn zero() -> Self {
                Self(0)
            }

            fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::str::FromStr for $name {
            type Err = <$primitive as std::str::FromStr>::Err;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse().map(Self)
            }
        }
    };
}

primitive_cost!(U32Cost, u32);
primitive_cost!(U64Cost, u64);

/// Real-valued costs, as used for fractional edit weights.
impl EditCost for R64 {
    fn as_f64(&self) -> f64 {
        self.raw()
    }

    fn from_usize(value: usize) -> Self {
        r64(value as f64)
    }
}

#[cfg(test)]
mod tests {
    use noisy_float::types::{R64, r64};
    use num_traits::Zero;

    use super::{EditCost, U32Cost, U64Cost};

    #[test]
    fn primitive_cost_arithmetic() {
        let mut cost = U64Cost::zero();
        cost += 2u8.into();
        assert_eq!(cost + U64Cost::from(3u64), U64Cost::from_usize(5));
        assert_eq!(cost.as_f64(), 2.0);
        assert_eq!("7".parse::<U64Cost>().unwrap().as_primitive(), 7);
    }

    #[test]
    fn real_cost_from_usize() {
        assert_eq!(<R64 as EditCost>::from_usize(3), r64(3.0));
        assert!(r64(0.5) < r64(1.0));
    }

    #[test]
    fn narrow_cost_display_and_parse() {
        let cost = U32Cost::from_usize(40) + U32Cost::from(2u32);
        assert_eq!(cost.to_string(), "42");
        assert_eq!("42".parse::<U32Cost>(), Ok(cost));
        assert!("-1".parse::<U32Cost>().is_err());
    }

    #[test]
    #[should_panic]
    fn narrow_cost_overflow() {
        let _ = U32Cost::from(u32::MAX) + 1u8.into();
    }
}
