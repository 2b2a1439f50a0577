use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

/// Scale used to approximate a float: `v` becomes `round(|v| * SCALE) / SCALE`.
pub const FLOAT_CONVERSION_PRECISION: u64 = 1_000_000;

/// Exact rational number.
///
/// The magnitude is stored as an unsigned numerator/denominator pair in lowest
/// terms and the sign as a separate flag. Zero is always non-negative, so two
/// fractions are equal exactly when their `(num, den, negative)` triples are.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: BigUint,
    den: BigUint,
    negative: bool,
}

impl Fraction {
    pub fn new(num: BigUint, den: BigUint, negative: bool) -> Result<Self> {
        if den.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Fraction::reduced(num, den, negative))
    }

    // `den` is never zero here
    fn reduced(num: BigUint, den: BigUint, negative: bool) -> Self {
        let g = num.gcd(&den);
        let (num, den) = if g.is_one() {
            (num, den)
        } else {
            (num / &g, den / &g)
        };
        let negative = negative && !num.is_zero();
        Self { num, den, negative }
    }

    pub fn from_f64(value: f64) -> Result<Self> {
        let scaled = (value.abs() * FLOAT_CONVERSION_PRECISION as f64).round();
        let num =
            BigUint::from_f64(scaled).ok_or_else(|| Error::InvalidFormat(value.to_string()))?;

        Ok(Fraction::reduced(
            num,
            BigUint::from(FLOAT_CONVERSION_PRECISION),
            value < 0.0,
        ))
    }

    pub fn numerator(&self) -> &BigUint {
        &self.num
    }

    pub fn denominator(&self) -> &BigUint {
        &self.den
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    pub fn negate(&mut self) -> &mut Self {
        if !self.num.is_zero() {
            self.negative = !self.negative;
        }
        self
    }

    /// Swaps numerator and denominator in place. Zero has no inverse.
    pub fn invert(&mut self) -> Result<&mut Self> {
        if self.num.is_zero() {
            return Err(Error::DivisionByZero);
        }
        std::mem::swap(&mut self.num, &mut self.den);
        Ok(self)
    }

    pub fn checked_div(&self, rhs: &Fraction) -> Result<Fraction> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Ok(Fraction::reduced(
            &self.num * &rhs.den,
            &self.den * &rhs.num,
            self.negative != rhs.negative,
        ))
    }

    pub fn to_f64(&self) -> f64 {
        let num = self.num.to_f64().unwrap_or(f64::INFINITY);
        let den = self.den.to_f64().unwrap_or(f64::INFINITY);
        if self.negative {
            -(num / den)
        } else {
            num / den
        }
    }
}

fn signed(magnitude: BigUint, negative: bool) -> BigInt {
    let sign = if negative { Sign::Minus } else { Sign::Plus };
    BigInt::from_biguint(sign, magnitude)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Accepts `[sign]digits/digits` or a signed decimal `[sign]digits[.digits]`.
/// Decimals go through [`Fraction::from_f64`].
impl FromStr for Fraction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidFormat(s.to_owned());

        let (negative, body) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        if let Some((num, den)) = body.split_once('/') {
            if !is_digits(num) || !is_digits(den) {
                return Err(invalid());
            }
            let num = num.parse::<BigUint>().map_err(|_| invalid())?;
            let den = den.parse::<BigUint>().map_err(|_| invalid())?;
            return Fraction::new(num, den, negative);
        }

        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (body, None),
        };
        if !is_digits(int_part) || !frac_part.map_or(true, is_digits) {
            return Err(invalid());
        }

        let value: f64 = s.parse().map_err(|_| invalid())?;
        Fraction::from_f64(value)
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(mut self) -> Fraction {
        self.negate();
        self
    }
}

impl ops::Neg for &Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        -self.clone()
    }
}

impl ops::Add<&Fraction> for &Fraction {
    type Output = Fraction;

    fn add(self, rhs: &Fraction) -> Fraction {
        let (lhs_num, rhs_num, den) = if self.den == rhs.den {
            (self.num.clone(), rhs.num.clone(), self.den.clone())
        } else {
            (
                &self.num * &rhs.den,
                &rhs.num * &self.den,
                &self.den * &rhs.den,
            )
        };

        let (sign, num) =
            (signed(lhs_num, self.negative) + signed(rhs_num, rhs.negative)).into_parts();
        Fraction::reduced(num, den, sign == Sign::Minus)
    }
}

impl ops::Sub<&Fraction> for &Fraction {
    type Output = Fraction;

    fn sub(self, rhs: &Fraction) -> Fraction {
        self + &(-rhs)
    }
}

impl ops::Mul<&Fraction> for &Fraction {
    type Output = Fraction;

    fn mul(self, rhs: &Fraction) -> Fraction {
        Fraction::reduced(
            &self.num * &rhs.num,
            &self.den * &rhs.den,
            self.negative != rhs.negative,
        )
    }
}

/// # Panics
///
/// Panics if `rhs` is zero, like integer division. See [`Fraction::checked_div`].
impl ops::Div<&Fraction> for &Fraction {
    type Output = Fraction;

    fn div(self, rhs: &Fraction) -> Fraction {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(error) => panic!("{}", error),
        }
    }
}

// Owned and assigning forms, all routed through the borrowed impls above
macro_rules! forward_binop {
    ($imp:ident, $method:ident, $imp_assign:ident, $method_assign:ident) => {
        impl ops::$imp<Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                ops::$imp::$method(&self, &rhs)
            }
        }

        impl ops::$imp<&Fraction> for Fraction {
            type Output = Fraction;

            fn $method(self, rhs: &Fraction) -> Fraction {
                ops::$imp::$method(&self, rhs)
            }
        }

        impl ops::$imp<Fraction> for &Fraction {
            type Output = Fraction;

            fn $method(self, rhs: Fraction) -> Fraction {
                ops::$imp::$method(self, &rhs)
            }
        }

        impl ops::$imp_assign<&Fraction> for Fraction {
            fn $method_assign(&mut self, rhs: &Fraction) {
                *self = ops::$imp::$method(&*self, rhs);
            }
        }

        impl ops::$imp_assign<Fraction> for Fraction {
            fn $method_assign(&mut self, rhs: Fraction) {
                *self = ops::$imp::$method(&*self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign);
forward_binop!(Sub, sub, SubAssign, sub_assign);
forward_binop!(Mul, mul, MulAssign, mul_assign);
forward_binop!(Div, div, DivAssign, div_assign);

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(value: $t) -> Fraction {
                    Fraction {
                        num: BigUint::from(value.unsigned_abs()),
                        den: BigUint::one(),
                        negative: value < 0,
                    }
                }
            }
        )*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Fraction {
                fn from(value: $t) -> Fraction {
                    Fraction {
                        num: BigUint::from(value),
                        den: BigUint::one(),
                        negative: false,
                    }
                }
            }
        )*
    };
}

impl_from_signed!(i32, i64);
impl_from_unsigned!(u32, u64);

impl One for Fraction {
    fn one() -> Fraction {
        Fraction {
            num: BigUint::one(),
            den: BigUint::one(),
            negative: false,
        }
    }

    fn is_one(&self) -> bool {
        !self.negative && self.num.is_one() && self.den.is_one()
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction {
            num: BigUint::zero(),
            den: BigUint::one(),
            negative: false,
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Default for Fraction {
    fn default() -> Fraction {
        Fraction::zero()
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl Ord for Fraction {
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        match (self.negative, rhs.negative) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (negative, _) => {
                let magnitude = (&self.num * &rhs.den).cmp(&(&rhs.num * &self.den));
                if negative {
                    magnitude.reverse()
                } else {
                    magnitude
                }
            }
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl std::iter::Sum<Fraction> for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
}

impl<'a> std::iter::Sum<&'a Fraction> for Fraction {
    fn sum<I: Iterator<Item = &'a Fraction>>(iter: I) -> Fraction {
        iter.fold(Fraction::zero(), |acc, f| acc + f)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
