use num_traits::PrimInt;

use crate::error::{Error, Result};

pub(crate) trait ClampedDivRem: Sized {
    fn clamped_div_rem(self, divisor: Self, max_quotient: Self) -> (Self, Self);
}

impl<T: PrimInt> ClampedDivRem for T {
    // Like an ordinary division, except that the quotient never exceeds max_quotient. Whatever
    // does not fit ends up in the remainder. This is how the last (longer) century of a cycle and
    // the last (leap) year of a quadrennium absorb their extra day.
    fn clamped_div_rem(self, divisor: T, max_quotient: T) -> (T, T) {
        let quotient = (self / divisor).min(max_quotient);
        let remainder = self - quotient * divisor;
        (quotient, remainder)
    }
}

pub(crate) fn checked_add(a: i64, b: i64, what: &'static str) -> Result<i64> {
    a.checked_add(b).ok_or(Error::Overflow(what))
}

pub(crate) fn checked_sub(a: i64, b: i64, what: &'static str) -> Result<i64> {
    a.checked_sub(b).ok_or(Error::Overflow(what))
}

pub(crate) fn checked_mul(a: i64, b: i64, what: &'static str) -> Result<i64> {
    a.checked_mul(b).ok_or(Error::Overflow(what))
}
