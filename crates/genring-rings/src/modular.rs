//! Integers modulo a word-size modulus, Z/nZ.
//!
//! Elements are residues in `0..n` stored as `u64`; products go through
//! `u128` so any modulus below 2^63 is supported. Whether the ring is a
//! field is decided once, at construction, by a deterministic
//! Miller–Rabin test.

use std::any::Any;
use std::fmt;

use dashu::integer::IBig;
use rand::{Rng, RngCore};

use genring_core::{Elem, Status, Structure, Truth};

/// Bases for which Miller–Rabin is deterministic on all `u64` inputs.
const MILLER_RABIN_BASES: [u64; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// The ring Z/nZ for 1 <= n < 2^63.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModularRing {
    modulus: u64,
    prime: bool,
}

impl ModularRing {
    /// Largest supported modulus (exclusive).
    pub const MODULUS_LIMIT: u64 = 1 << 63;

    /// Creates Z/nZ, or `None` if `modulus` is zero or too large.
    #[must_use]
    pub fn new(modulus: u64) -> Option<Self> {
        if modulus == 0 || modulus >= Self::MODULUS_LIMIT {
            return None;
        }
        Some(Self {
            modulus,
            prime: is_prime_u64(modulus),
        })
    }

    /// Returns the modulus n.
    #[must_use]
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Returns true if the modulus is prime.
    #[must_use]
    pub fn is_prime_modulus(&self) -> bool {
        self.prime
    }

    /// Returns the residue held by an element.
    #[must_use]
    pub fn value(x: &Elem) -> u64 {
        *x.payload::<u64>()
    }

    fn put(res: &mut Elem, v: u64) -> Status {
        *res.payload_mut::<u64>() = v;
        Status::SUCCESS
    }

    fn reduce_i128(&self, v: i128) -> u64 {
        // The remainder is below the modulus, so it fits.
        v.rem_euclid(i128::from(self.modulus)) as u64
    }

    fn add_mod(&self, a: u64, b: u64) -> u64 {
        let s = a + b;
        if s >= self.modulus {
            s - self.modulus
        } else {
            s
        }
    }

    fn sub_mod(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.modulus - b
        }
    }

    fn mul_mod(&self, a: u64, b: u64) -> u64 {
        mul_mod(a, b, self.modulus)
    }

    /// Inverse of `a` modulo n, if `gcd(a, n) = 1`.
    fn inv_mod(&self, a: u64) -> Option<u64> {
        if self.modulus == 1 {
            return Some(0);
        }
        let (mut r0, mut r1) = (i128::from(self.modulus), i128::from(a));
        let (mut t0, mut t1) = (0i128, 1i128);
        while r1 != 0 {
            let q = r0 / r1;
            (r0, r1) = (r1, r0 - q * r1);
            (t0, t1) = (t1, t0 - q * t1);
        }
        (r0 == 1).then(|| self.reduce_i128(t0))
    }
}

fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((u128::from(a) * u128::from(b)) % u128::from(m)) as u64
}

fn pow_mod(mut base: u64, mut e: u64, m: u64) -> u64 {
    let mut acc = 1 % m;
    base %= m;
    while e > 0 {
        if e & 1 == 1 {
            acc = mul_mod(acc, base, m);
        }
        base = mul_mod(base, base, m);
        e >>= 1;
    }
    acc
}

/// Deterministic primality test for 64-bit integers.
#[must_use]
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for &p in &MILLER_RABIN_BASES {
        if n % p == 0 {
            return n == p;
        }
    }

    let s = (n - 1).trailing_zeros();
    let d = (n - 1) >> s;
    'bases: for &a in &MILLER_RABIN_BASES {
        let mut x = pow_mod(a, d, n);
        if x == 1 || x == n - 1 {
            continue;
        }
        for _ in 1..s {
            x = mul_mod(x, x, n);
            if x == n - 1 {
                continue 'bases;
            }
        }
        return false;
    }
    true
}

impl Structure for ModularRing {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn name(&self) -> String {
        format!("Integers mod {} (nmod)", self.modulus)
    }

    fn elem_size(&self) -> usize {
        std::mem::size_of::<u64>()
    }

    fn same_as(&self, other: &dyn Structure) -> bool {
        other
            .as_any()
            .downcast_ref::<Self>()
            .is_some_and(|o| o.modulus == self.modulus)
    }

    fn is_ring(&self) -> Truth {
        Truth::True
    }

    fn is_commutative_ring(&self) -> Truth {
        Truth::True
    }

    fn is_integral_domain(&self) -> Truth {
        Truth::from(self.prime)
    }

    fn is_field(&self) -> Truth {
        Truth::from(self.prime)
    }

    fn is_unique_factorization_domain(&self) -> Truth {
        Truth::from(self.prime)
    }

    fn is_finite(&self) -> Truth {
        Truth::True
    }

    fn is_finite_characteristic(&self) -> Truth {
        Truth::True
    }

    fn is_exact(&self) -> Truth {
        Truth::True
    }

    fn is_canonical(&self) -> Truth {
        Truth::True
    }

    fn is_ordered_ring(&self) -> Truth {
        Truth::False
    }

    fn is_zero_ring(&self) -> Truth {
        Truth::from(self.modulus == 1)
    }

    fn is_threadsafe(&self) -> Truth {
        Truth::True
    }

    fn characteristic(&self, res: &mut IBig) -> Status {
        *res = IBig::from(self.modulus);
        Status::SUCCESS
    }

    fn cardinality(&self, res: &mut IBig) -> Status {
        *res = IBig::from(self.modulus);
        Status::SUCCESS
    }

    fn init(&self) -> Elem {
        Elem::new(0u64)
    }

    fn set(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, Self::value(x))
    }

    fn randtest(&self, res: &mut Elem, rng: &mut dyn RngCore) -> Status {
        let n = self.modulus;
        let v = match rng.gen_range(0..8) {
            0 => 0,
            1 => 1 % n,
            2 => n - 1,
            _ => rng.gen_range(0..n),
        };
        Self::put(res, v)
    }

    fn write(&self, out: &mut dyn fmt::Write, x: &Elem) -> Status {
        Status::check(write!(out, "{}", Self::value(x)).is_ok(), Status::UNABLE)
    }

    fn set_si(&self, res: &mut Elem, v: i64) -> Status {
        Self::put(res, self.reduce_i128(i128::from(v)))
    }

    fn set_ui(&self, res: &mut Elem, v: u64) -> Status {
        Self::put(res, v % self.modulus)
    }

    fn set_int(&self, res: &mut Elem, v: &IBig) -> Status {
        let n = IBig::from(self.modulus);
        let mut r = v % &n;
        if r < IBig::ZERO {
            r += &n;
        }
        match u64::try_from(r) {
            Ok(r) => Self::put(res, r),
            Err(_) => Status::UNABLE,
        }
    }

    /// Returns the canonical representative in `0..n`.
    fn get_int(&self, res: &mut IBig, x: &Elem) -> Status {
        *res = IBig::from(Self::value(x));
        Status::SUCCESS
    }

    fn get_fraction(&self, num: &mut IBig, den: &mut IBig, x: &Elem) -> Status {
        *num = IBig::from(Self::value(x));
        *den = IBig::ONE;
        Status::SUCCESS
    }

    fn equal(&self, x: &Elem, y: &Elem) -> Truth {
        Truth::from(Self::value(x) == Self::value(y))
    }

    fn is_zero(&self, x: &Elem) -> Truth {
        Truth::from(Self::value(x) == 0)
    }

    fn is_one(&self, x: &Elem) -> Truth {
        Truth::from(Self::value(x) == 1 % self.modulus)
    }

    fn is_neg_one(&self, x: &Elem) -> Truth {
        Truth::from(Self::value(x) == self.modulus - 1)
    }

    fn add(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, self.add_mod(Self::value(x), Self::value(y)))
    }

    fn sub(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, self.sub_mod(Self::value(x), Self::value(y)))
    }

    fn neg(&self, res: &mut Elem, x: &Elem) -> Status {
        Self::put(res, self.sub_mod(0, Self::value(x)))
    }

    fn mul(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        Self::put(res, self.mul_mod(Self::value(x), Self::value(y)))
    }

    fn mul_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let c = self.reduce_i128(i128::from(c));
        Self::put(res, self.mul_mod(Self::value(x), c))
    }

    fn add_si(&self, res: &mut Elem, x: &Elem, c: i64) -> Status {
        let c = self.reduce_i128(i128::from(c));
        Self::put(res, self.add_mod(Self::value(x), c))
    }

    fn add_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        let v = self.add_mod(Self::value(res), Self::value(x));
        Self::put(res, v)
    }

    fn mul_assign(&self, res: &mut Elem, x: &Elem) -> Status {
        let v = self.mul_mod(Self::value(res), Self::value(x));
        Self::put(res, v)
    }

    /// Division by a unit; DOMAIN when `y` is a zero divisor.
    fn div(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        match self.inv_mod(Self::value(y)) {
            Some(yi) => Self::put(res, self.mul_mod(Self::value(x), yi)),
            None => Status::DOMAIN,
        }
    }

    fn divexact(&self, res: &mut Elem, x: &Elem, y: &Elem) -> Status {
        self.div(res, x, y)
    }

    fn inv(&self, res: &mut Elem, x: &Elem) -> Status {
        match self.inv_mod(Self::value(x)) {
            Some(v) => Self::put(res, v),
            None => Status::DOMAIN,
        }
    }

    fn is_invertible(&self, x: &Elem) -> Truth {
        Truth::from(self.inv_mod(Self::value(x)).is_some())
    }

    fn pow_ui(&self, res: &mut Elem, x: &Elem, e: u64) -> Status {
        Self::put(res, pow_mod(Self::value(x), e, self.modulus))
    }
}
