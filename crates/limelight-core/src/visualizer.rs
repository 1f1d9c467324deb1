#![forbid(unsafe_code)]

//! Decorative bar visualizer.
//!
//! Purely cosmetic: it is not connected to any audio source. On every tick
//! each bar receives an independent, uniformly random height.

/// Small xorshift64 generator. Deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        // Zero is a fixed point of xorshift.
        Self {
            state: if seed == 0 { 0x9E37_79B9_7F4A_7C15 } else { seed },
        }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Uniform sample in `[0, 1)` from the top 53 bits.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Heights of every bar, in CSS pixels.
#[derive(Debug, Clone)]
pub struct BarField {
    heights: Vec<f64>,
    min_height: f64,
    range: f64,
    rng: Xorshift64,
}

impl BarField {
    /// `count` bars, each drawn from `[min_height, min_height + range)`.
    /// Bars start at `min_height` until the first tick.
    #[must_use]
    pub fn new(count: usize, min_height: f64, range: f64, seed: u64) -> Self {
        Self {
            heights: vec![min_height; count],
            min_height,
            range,
            rng: Xorshift64::new(seed),
        }
    }

    /// Re-roll every bar and return the new heights.
    pub fn tick(&mut self) -> &[f64] {
        for h in &mut self.heights {
            *h = self.min_height + self.rng.next_f64() * self.range;
        }
        &self.heights
    }

    #[must_use]
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heights.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

/// CSS height value for a bar.
#[must_use]
pub fn bar_height_css(height: f64) -> String {
    format!("{height}px")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_seed_still_produces_values() {
        let mut rng = Xorshift64::new(0);
        assert_ne!(rng.next_u64(), 0);
    }

    #[test]
    fn samples_are_unit_interval() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..10_000 {
            let v = rng.next_f64();
            assert!((0.0..1.0).contains(&v), "{v}");
        }
    }

    #[test]
    fn heights_stay_in_range() {
        let mut field = BarField::new(50, 10.0, 100.0, 7);
        assert_eq!(field.heights(), &[10.0; 50][..]);
        for _ in 0..200 {
            for &h in field.tick() {
                assert!((10.0..110.0).contains(&h), "{h}");
            }
        }
    }

    #[test]
    fn ticks_change_heights() {
        let mut field = BarField::new(8, 10.0, 100.0, 99);
        let first = field.tick().to_vec();
        let second = field.tick().to_vec();
        assert_ne!(first, second);
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = BarField::new(5, 10.0, 100.0, 1234);
        let mut b = BarField::new(5, 10.0, 100.0, 1234);
        assert_eq!(a.tick(), b.tick());
    }

    #[test]
    fn css_height() {
        assert_eq!(bar_height_css(42.5), "42.5px");
    }
}
