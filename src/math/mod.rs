use std::ops;

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct V3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub x: V3,
    pub d: V3,
}

impl Ray {
    pub fn at(&self, t: f64) -> V3 {
        self.x + t * self.d
    }
}

pub fn v(x: f64, y: f64, z: f64) -> V3 {
    V3 { x, y, z }
}

pub fn splat(s: f64) -> V3 {
    v(s, s, s)
}

pub fn abs2(x: &V3) -> f64 {
    x.x * x.x + x.y * x.y + x.z * x.z
}

pub fn abs(x: &V3) -> f64 {
    abs2(x).sqrt()
}

pub fn mul(scalar: f64, x: &V3) -> V3 {
    V3 {
        x: x.x * scalar,
        y: x.y * scalar,
        z: x.z * scalar,
    }
}

pub fn add(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x + y.x,
        y: x.y + y.y,
        z: x.z + y.z,
    }
}

pub fn sub(x: &V3, y: &V3) -> V3 {
    V3 {
        x: x.x - y.x,
        y: x.y - y.y,
        z: x.z - y.z,
    }
}

/// Componentwise product, used for tinting colors.
pub fn hadamard(x: &V3, y: &V3) -> V3 {
    v(x.x * y.x, x.y * y.y, x.z * y.z)
}

/// Returns `None` for a zero or non-finite vector instead of producing NaNs.
pub fn try_normalize(x: &V3) -> Option<V3> {
    let len = abs(x);
    if len > 0. && len.is_finite() {
        Some(mul(1. / len, x))
    } else {
        None
    }
}

pub fn normalize(x: &V3) -> V3 {
    mul(1. / abs(x), x)
}

pub fn dot(x: &V3, y: &V3) -> f64 {
    x.x * y.x + x.y * y.y + x.z * y.z
}

pub fn cross(v1: &V3, v2: &V3) -> V3 {
    v(
        v1.y * v2.z - v1.z * v2.y,
        v1.z * v2.x - v1.x * v2.z,
        v1.x * v2.y - v1.y * v2.x,
    )
}

pub fn fract(x: f64) -> f64 {
    x - x.floor()
}

impl V3 {
    pub fn map(self, f: impl Fn(f64) -> f64) -> V3 {
        v(f(self.x), f(self.y), f(self.z))
    }

    pub fn floor(self) -> V3 {
        self.map(f64::floor)
    }

    pub fn fract(self) -> V3 {
        self.map(fract)
    }

    /// Swizzle `(y, z, x)`.
    pub fn yzx(self) -> V3 {
        v(self.y, self.z, self.x)
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl ops::Add<V3> for V3 {
    type Output = V3;

    fn add(self, rhs: V3) -> V3 {
        add(&self, &rhs)
    }
}

impl ops::Sub<V3> for V3 {
    type Output = V3;

    fn sub(self, rhs: V3) -> V3 {
        sub(&self, &rhs)
    }
}

impl ops::Neg for V3 {
    type Output = V3;

    fn neg(self) -> V3 {
        mul(-1., &self)
    }
}

impl ops::Mul<V3> for f64 {
    type Output = V3;

    fn mul(self, rhs: V3) -> Self::Output {
        mul(self, &rhs)
    }
}

impl ops::Mul<f64> for V3 {
    type Output = V3;

    fn mul(self, rhs: f64) -> Self::Output {
        mul(rhs, &self)
    }
}

pub const B1: V3 = V3 {
    x: 1.,
    y: 0.,
    z: 0.,
};

pub const B2: V3 = V3 {
    x: 0.,
    y: 1.,
    z: 0.,
};

pub const B3: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 1.,
};

pub const O: V3 = V3 {
    x: 0.,
    y: 0.,
    z: 0.,
};
