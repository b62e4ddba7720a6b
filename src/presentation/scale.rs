// Linear and time scales mapping data domains onto pixel ranges

/// Maps a numeric domain linearly onto a pixel range. A zero-span domain is
/// widened so scaling stays finite; the midpoint then maps to the middle of
/// the range.
#[derive(Debug, Clone, Copy)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        let domain = if domain.0 == domain.1 {
            (domain.0 - 0.5, domain.1 + 0.5)
        } else {
            domain
        };
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain.0) / (self.domain.1 - self.domain.0);
        self.range.0 + t * (self.range.1 - self.range.0)
    }

    /// `count + 1` evenly spaced tick values including both endpoints.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let count = count.max(1);
        let step = (self.domain.1 - self.domain.0) / count as f64;
        (0..=count).map(|i| self.domain.0 + step * i as f64).collect()
    }
}

/// Chronological scale over millisecond timestamps.
#[derive(Debug, Clone, Copy)]
pub struct TimeScale {
    inner: LinearScale,
}

impl TimeScale {
    pub fn new(domain: (i64, i64), range: (f64, f64)) -> Self {
        Self {
            inner: LinearScale::new((domain.0 as f64, domain.1 as f64), range),
        }
    }

    pub fn scale(&self, timestamp: i64) -> f64 {
        self.inner.scale(timestamp as f64)
    }

    pub fn ticks(&self, count: usize) -> Vec<i64> {
        self.inner
            .ticks(count)
            .into_iter()
            .map(|t| t.round() as i64)
            .collect()
    }
}
