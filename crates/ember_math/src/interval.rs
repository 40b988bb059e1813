/// Closed range `[min, max]` over the reals.
///
/// Used for ray parameter ranges and as the per-axis extent of an [`crate::Aabb`].
/// Any interval with `min > max` is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Identity for [`Interval::surrounding`].
    pub const EMPTY: Interval = Interval {
        min: f64::INFINITY,
        max: f64::NEG_INFINITY,
    };

    pub const UNIVERSE: Interval = Interval {
        min: f64::NEG_INFINITY,
        max: f64::INFINITY,
    };

    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Smallest interval covering both `a` and `b`.
    pub fn surrounding(a: &Interval, b: &Interval) -> Interval {
        Interval {
            min: a.min.min(b.min),
            max: a.max.max(b.max),
        }
    }

    /// Length of the range. Negative when empty.
    pub fn size(&self) -> f64 {
        self.max - self.min
    }

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Endpoints included.
    pub fn contains(&self, x: f64) -> bool {
        (self.min..=self.max).contains(&x)
    }

    /// Endpoints excluded. Ray hits are accepted with this test.
    pub fn surrounds(&self, x: f64) -> bool {
        self.min < x && x < self.max
    }

    /// Nearest point of the interval to `x`.
    ///
    /// Unlike `f64::clamp` this never panics, which matters for empty intervals.
    pub fn clamp(&self, x: f64) -> f64 {
        if x < self.min {
            return self.min;
        }
        if x > self.max {
            return self.max;
        }
        x
    }

    /// Grow by `delta` in total, half on each end.
    pub fn expand(&self, delta: f64) -> Interval {
        let half = 0.5 * delta;
        Interval::new(self.min - half, self.max + half)
    }

    /// The same range moved by `displacement`.
    pub fn offset(&self, displacement: f64) -> Interval {
        Interval::new(self.min + displacement, self.max + displacement)
    }
}

impl Default for Interval {
    fn default() -> Self {
        Self::EMPTY
    }
}
