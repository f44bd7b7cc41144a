//! 256-bucket intensity histogram.

/// Number of buckets, one per 8-bit intensity.
pub const BUCKETS: usize = 256;

/// Reference level returned by percentile lookups on an empty histogram.
const MID_LEVEL: u8 = 128;

/// Count of pixels at each 8-bit intensity for one channel.
#[derive(Clone, PartialEq, Eq)]
pub struct Histogram {
    counts: [u64; BUCKETS],
}

impl Histogram {
    pub fn new() -> Self {
        Self {
            counts: [0; BUCKETS],
        }
    }

    /// Count one sample at `value`.
    #[inline]
    pub fn record(&mut self, value: u8) {
        self.counts[value as usize] += 1;
    }

    #[inline]
    pub fn count(&self, value: u8) -> u64 {
        self.counts[value as usize]
    }

    #[inline]
    pub fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// Total number of samples.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Count-weighted mean intensity, 0.0 for an empty histogram.
    pub fn mean(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let weighted: u64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, &count)| value as u64 * count)
            .sum();
        weighted as f64 / total as f64
    }

    /// Sum of `count * (value - center)^2` over all buckets.
    pub fn squared_deviation(&self, center: f64) -> f64 {
        self.counts
            .iter()
            .enumerate()
            .map(|(value, &count)| {
                let d = value as f64 - center;
                count as f64 * d * d
            })
            .sum()
    }

    /// Intensity at the given fraction from the bright end.
    ///
    /// Walks from 255 downward and returns the first intensity where the
    /// accumulated count reaches `fraction` of all samples. An empty
    /// histogram has no bright end and yields mid-gray (128).
    pub fn bright_percentile(&self, fraction: f64) -> u8 {
        let total = self.total();
        if total == 0 {
            return MID_LEVEL;
        }
        let threshold = total as f64 * fraction.clamp(0.0, 1.0);
        let mut accumulated = 0u64;
        for value in (0..BUCKETS).rev() {
            accumulated += self.counts[value];
            if accumulated as f64 >= threshold {
                return value as u8;
            }
        }
        0
    }
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Histogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Only non-empty buckets; 256 zeros are noise in test failures.
        f.debug_map()
            .entries(
                self.counts
                    .iter()
                    .enumerate()
                    .filter(|(_, count)| **count > 0),
            )
            .finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Histogram {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.counts.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Histogram {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = <Vec<u64> as serde::Deserialize>::deserialize(deserializer)?;
        let len = values.len();
        let counts: [u64; BUCKETS] = values.try_into().map_err(|_| {
            serde::de::Error::invalid_length(len, &"exactly 256 histogram buckets")
        })?;
        Ok(Self { counts })
    }
}
