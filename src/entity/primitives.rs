//! Value types with their own equality operators.
//!
//! [`Decimal`], [`DateTime`] and [`TimeSpan`] each define an equality operation that differs from
//! a field-by-field comparison of their representation: `1.0` and `1.00` are equal decimals with
//! different scales, and two instants with the same tick count are equal even if one is tagged
//! UTC and the other is unspecified. `PartialEq` implements the defined operation, while
//! `structural_eq` compares the raw representation.

use std::fmt;

/// A base-10 fixed-point number: `mantissa * 10^-scale`
#[derive(Debug, Clone, Copy, Default)]
pub struct Decimal {
    mantissa: i128,
    scale: u8,
}

impl Decimal {
    /// Largest supported scale
    pub const MAX_SCALE: u8 = 28;

    /// Create a new decimal
    ///
    /// # Panics
    /// Panics if `scale` exceeds [`Decimal::MAX_SCALE`]. Use [`Decimal::try_new`] for scales that
    /// are not known to be in range.
    #[must_use]
    pub const fn new(mantissa: i128, scale: u8) -> Self {
        match Self::try_new(mantissa, scale) {
            Some(decimal) => decimal,
            None => panic!("decimal scale exceeds the maximum of 28"),
        }
    }

    /// Create a new decimal, `None` if `scale` exceeds [`Decimal::MAX_SCALE`]
    #[must_use]
    pub const fn try_new(mantissa: i128, scale: u8) -> Option<Self> {
        if scale > Self::MAX_SCALE {
            None
        } else {
            Some(Decimal { mantissa, scale })
        }
    }

    /// The unscaled integer value
    #[must_use]
    pub const fn mantissa(&self) -> i128 {
        self.mantissa
    }

    /// Number of digits after the decimal point
    #[must_use]
    pub const fn scale(&self) -> u8 {
        self.scale
    }

    /// The same number with trailing fractional zeros removed
    #[must_use]
    pub fn normalize(&self) -> Self {
        let mut mantissa = self.mantissa;
        let mut scale = self.scale;
        while scale > 0 && mantissa % 10 == 0 {
            mantissa /= 10;
            scale -= 1;
        }
        Decimal { mantissa, scale }
    }

    /// Compare the representation (mantissa and scale), not the numeric value
    #[must_use]
    pub fn structural_eq(&self, other: &Self) -> bool {
        self.mantissa == other.mantissa && self.scale == other.scale
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.normalize().structural_eq(&other.normalize())
    }
}

impl Eq for Decimal {}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(i128::from(value), 0)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.scale == 0 {
            return write!(f, "{}", self.mantissa);
        }

        let digits = self.mantissa.unsigned_abs().to_string();
        let scale = usize::from(self.scale);
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale - digits.len() + 1), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let sign = if self.mantissa < 0 { "-" } else { "" };
        write!(f, "{sign}{int_part}.{frac_part}")
    }
}

/// The time zone interpretation attached to a [`DateTime`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, strum::Display)]
pub enum DateTimeKind {
    /// No zone information
    #[default]
    Unspecified,
    /// Coordinated universal time
    Utc,
    /// Local time of the machine
    Local,
}

/// An instant, counted in 100ns ticks since 0001-01-01
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTime {
    ticks: i64,
    kind: DateTimeKind,
}

impl DateTime {
    /// Number of ticks per second
    pub const TICKS_PER_SECOND: i64 = 10_000_000;

    /// Create a new instant
    #[must_use]
    pub const fn new(ticks: i64, kind: DateTimeKind) -> Self {
        DateTime { ticks, kind }
    }

    /// Create an instant tagged as UTC
    #[must_use]
    pub const fn utc(ticks: i64) -> Self {
        Self::new(ticks, DateTimeKind::Utc)
    }

    /// Ticks since the epoch
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Zone interpretation
    #[must_use]
    pub const fn kind(&self) -> DateTimeKind {
        self.kind
    }

    /// The same instant shifted by a span
    #[must_use]
    pub fn add(&self, span: TimeSpan) -> Self {
        DateTime {
            ticks: self.ticks.saturating_add(span.ticks()),
            kind: self.kind,
        }
    }

    /// Compare ticks and kind
    #[must_use]
    pub fn structural_eq(&self, other: &Self) -> bool {
        self.ticks == other.ticks && self.kind == other.kind
    }
}

// Equality of instants ignores `kind`.
impl PartialEq for DateTime {
    fn eq(&self, other: &Self) -> bool {
        self.ticks == other.ticks
    }
}

impl Eq for DateTime {}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks ({})", self.ticks, self.kind)
    }
}

/// A signed duration in 100ns ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    /// Create a span from ticks
    #[must_use]
    pub const fn from_ticks(ticks: i64) -> Self {
        TimeSpan { ticks }
    }

    /// Create a span from whole seconds
    #[must_use]
    pub const fn from_seconds(seconds: i64) -> Self {
        TimeSpan {
            ticks: seconds.saturating_mul(DateTime::TICKS_PER_SECOND),
        }
    }

    /// Length of the span in ticks
    #[must_use]
    pub const fn ticks(&self) -> i64 {
        self.ticks
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.ticks)
    }
}
