//! Seeded 2D gradient noise.
//!
//! Classic improved-Perlin construction: a seeded permutation of 0..255
//! (Fisher-Yates, duplicated to 512 entries), a quintic fade curve, and a
//! bilinear blend of four gradient dot-products at the lattice corners.

/// Deterministic 2D gradient noise generator.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    /// Permutation table, duplicated so corner lookups never wrap.
    perm: [u8; 512],
    /// Seed used to shuffle the table.
    seed: u64,
}

impl PerlinNoise {
    /// Creates a generator whose permutation is shuffled from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);

        for i in (1..256).rev() {
            let j = rng.usize(..=i);
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        perm[..256].copy_from_slice(&p);
        perm[256..].copy_from_slice(&p);

        Self { perm, seed }
    }

    /// Returns the seed this generator was built from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Samples the noise field. Output lies in [-1, 1].
    #[must_use]
    #[allow(clippy::many_single_char_names)]
    pub fn noise(&self, x: f64, y: f64) -> f64 {
        let x_floor = x.floor();
        let y_floor = y.floor();
        let xi = (x_floor as i64 & 255) as usize;
        let yi = (y_floor as i64 & 255) as usize;

        let x = x - x_floor;
        let y = y - y_floor;
        let u = fade(x);
        let v = fade(y);

        let a = self.perm(xi) + yi;
        let aa = self.perm(a);
        let ab = self.perm(a + 1);
        let b = self.perm(xi + 1) + yi;
        let ba = self.perm(b);
        let bb = self.perm(b + 1);

        lerp(
            v,
            lerp(
                u,
                grad(self.perm(aa), x, y),
                grad(self.perm(ba), x - 1.0, y),
            ),
            lerp(
                u,
                grad(self.perm(ab), x, y - 1.0),
                grad(self.perm(bb), x - 1.0, y - 1.0),
            ),
        )
    }

    fn perm(&self, index: usize) -> usize {
        self.perm[index] as usize
    }
}

/// Quintic smoothstep: 6t^5 - 15t^4 + 10t^3.
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

/// Gradient dot-product selected by the low four hash bits.
fn grad(hash: usize, x: f64, y: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        0.0
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}
