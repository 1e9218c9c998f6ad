use crate::math::{dot, fract, splat, v, V3, B1, B2, B3};

const LCG_MODULUS: i64 = 2147483647;
const LCG_MULTIPLIERS: [i64; 3] = [16807, 48271, 69621];

/// Spreads the unit-range seed vector over many lattice cells so that
/// neighbouring seeds sample unrelated parts of the hash.
const SEED_OFFSET_SCALE: f64 = 65536.;

const HASH_SCALE: f64 = 0.3183099;
const HASH_PERTURB: f64 = 19.19;

/// Per-seed offset, one normalized Lehmer step per axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SeedVector(pub V3);

impl SeedVector {
    pub fn from_seed(seed: i32) -> SeedVector {
        let lcg = |m: i64| (seed as i64 * m).rem_euclid(LCG_MODULUS) as f64 / LCG_MODULUS as f64;
        SeedVector(v(
            lcg(LCG_MULTIPLIERS[0]),
            lcg(LCG_MULTIPLIERS[1]),
            lcg(LCG_MULTIPLIERS[2]),
        ))
    }
}

/// Seeded value noise over the integer lattice.
#[derive(Clone, Copy, Debug)]
pub struct NoiseField {
    offset: V3,
}

impl NoiseField {
    pub fn new(seed: SeedVector) -> NoiseField {
        NoiseField {
            offset: SEED_OFFSET_SCALE * seed.0,
        }
    }

    /// Pseudo-random value in `[0, 1)` for a lattice cell, given by its
    /// integral corner. Kept in `f64` so huge coordinates cannot overflow.
    pub fn hash(&self, cell: &V3) -> f64 {
        let p = *cell + self.offset;
        let q = (HASH_SCALE * p).fract();
        let q = q + splat(dot(&q, &(q.yzx() + splat(HASH_PERTURB))));
        fract((q.x + q.y) * q.z)
    }

    /// Trilinear blend of the eight surrounding lattice hashes, weighted with
    /// `3t^2 - 2t^3` so the field has no kinks at cell borders.
    pub fn sample(&self, p: &V3) -> f64 {
        let cell = p.floor();
        let w = (*p - cell).map(|t| t * t * (3. - 2. * t));

        let n000 = self.hash(&cell);
        let n100 = self.hash(&(cell + B1));
        let n010 = self.hash(&(cell + B2));
        let n110 = self.hash(&(cell + B1 + B2));
        let n001 = self.hash(&(cell + B3));
        let n101 = self.hash(&(cell + B1 + B3));
        let n011 = self.hash(&(cell + B2 + B3));
        let n111 = self.hash(&(cell + B1 + B2 + B3));

        let nx00 = lerp(n000, n100, w.x);
        let nx10 = lerp(n010, n110, w.x);
        let nx01 = lerp(n001, n101, w.x);
        let nx11 = lerp(n011, n111, w.x);

        let nxy0 = lerp(nx00, nx10, w.y);
        let nxy1 = lerp(nx01, nx11, w.y);

        lerp(nxy0, nxy1, w.z)
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
