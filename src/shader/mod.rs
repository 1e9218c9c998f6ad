use crate::field::DensityField;
use crate::math::{dot, hadamard, normalize, splat, try_normalize, v, Ray, B1, B2, B3, O, V3};
use crate::marcher::MarchResult;

/// Forward-difference step for the gradient.
pub const NORMAL_EPSILON: f64 = 0.002;

const AO_OFFSET: f64 = 0.3;
const AO_BIAS: f64 = 0.4;
const AO_SCALE: f64 = 0.6;

const AMBIENT: f64 = 0.2;
const DIFFUSE: f64 = 0.8;

const ROCK: V3 = V3 {
    x: 0.42,
    y: 0.36,
    z: 0.31,
};

const SUBSURFACE: V3 = V3 {
    x: 0.30,
    y: 0.11,
    z: 0.05,
};

const FOG_TINT: V3 = V3 {
    x: 0.16,
    y: 0.09,
    z: 0.04,
};

pub const GAMMA: f64 = 0.95;

struct Light {
    dir: V3,
    color: V3,
    weight: f64,
}

/// Fixed key light plus two fills, directions pointing towards the light.
fn lights() -> [Light; 3] {
    [
        Light {
            dir: normalize(&v(0.5, 0.8, -0.3)),
            color: v(1.0, 0.92, 0.82),
            weight: 1.0,
        },
        Light {
            dir: normalize(&v(-0.7, 0.2, 0.4)),
            color: v(0.55, 0.65, 0.9),
            weight: 0.3,
        },
        Light {
            dir: normalize(&v(0.1, -0.6, 0.8)),
            color: v(0.9, 0.7, 0.5),
            weight: 0.2,
        },
    ]
}

/// Surface normal from one-sided differences, pointing towards increasing
/// density. `None` where the field is flat.
pub fn normal(field: &impl DensityField, p: &V3) -> Option<V3> {
    let d0 = field.density(p);
    let g = v(
        field.density(&(*p + NORMAL_EPSILON * B1)) - d0,
        field.density(&(*p + NORMAL_EPSILON * B2)) - d0,
        field.density(&(*p + NORMAL_EPSILON * B3)) - d0,
    );
    try_normalize(&g)
}

/// Lit surface color before tonemapping.
///
/// The normal is flipped to the side of the surface the ray came from, and
/// the occlusion sample is read with the same orientation, so a camera that
/// starts inside rock still sees lit walls.
pub fn shade_hit(field: &impl DensityField, ray: &Ray, distance: f64) -> V3 {
    let p = ray.at(distance);
    let side = if field.density(&ray.x) < 0. { -1. } else { 1. };
    let n = match normal(field, &p) {
        Some(n) => side * n,
        None => -ray.d,
    };

    let light = lights().iter().fold(O, |acc, l| {
        acc + (l.weight * dot(&n, &l.dir).clamp(0., 1.)) * l.color
    });

    let ao = (AO_BIAS + AO_SCALE * side * field.density(&(p + AO_OFFSET * n))).clamp(0., 1.);

    let facing = dot(&n, &-ray.d).clamp(0., 1.);
    let rim = (1. - facing).powi(3);

    let lit = hadamard(&ROCK, &(splat(AMBIENT) + DIFFUSE * light));
    ao * lit + rim * SUBSURFACE
}

/// Background for rays that found nothing: fades to black with distance,
/// warmed in proportion to how far the ray got.
pub fn shade_miss(traveled: f64, max_distance: f64) -> V3 {
    let reach = traveled / max_distance;
    let fog = (-reach).exp();
    (reach * fog) * FOG_TINT
}

pub fn shade(field: &impl DensityField, ray: &Ray, result: &MarchResult, max_distance: f64) -> V3 {
    let color = match *result {
        MarchResult::Hit { distance } => shade_hit(field, ray, distance),
        MarchResult::Miss { traveled } => shade_miss(traveled, max_distance),
    };
    gamma(tonemap(color))
}

fn reinhard(c: f64) -> f64 {
    if c.is_nan() || c <= 0. {
        0.
    } else if c.is_infinite() {
        1.
    } else {
        c / (1. + c)
    }
}

/// `c / (1 + c)` per channel; the result is always within `[0, 1]`.
pub fn tonemap(color: V3) -> V3 {
    color.map(reinhard)
}

pub fn gamma(color: V3) -> V3 {
    color.map(|c| c.powf(GAMMA))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::abs;

    struct Wall;

    impl DensityField for Wall {
        fn density(&self, x: &V3) -> f64 {
            1. - x.z
        }
    }

    #[test]
    fn normal_of_wall_points_against_gradient_axis() {
        let n = normal(&Wall, &v(0.3, 0.2, 1.)).unwrap();
        assert!((n.z + 1.).abs() < 1e-9);
        assert!((abs(&n) - 1.).abs() < 1e-12);
    }

    #[test]
    fn flat_field_has_no_normal() {
        struct Flat;
        impl DensityField for Flat {
            fn density(&self, _: &V3) -> f64 {
                0.5
            }
        }
        assert!(normal(&Flat, &O).is_none());
    }

    #[test]
    fn tonemap_is_bounded() {
        for c in [0., 1e-9, 0.5, 1., 7., 1e6, f64::MAX, -3., f64::INFINITY, f64::NAN] {
            let t = tonemap(v(c, c, c));
            for x in t.to_array() {
                assert!((0.0..=1.0).contains(&x), "{c} mapped to {x}");
            }
        }
    }

    #[test]
    fn miss_darkens_to_black_at_origin() {
        assert_eq!(shade_miss(0., 200.), O);
        let far = shade_miss(200., 200.);
        assert!(far.x > far.z && far.x > 0.);
    }

    /// Mirror of `Wall`: rock on the near side, open beyond `z = 1`.
    struct Buried;

    impl DensityField for Buried {
        fn density(&self, x: &V3) -> f64 {
            x.z - 1.
        }
    }

    #[test]
    fn ray_starting_in_rock_sees_a_lit_wall() {
        let ray = Ray { x: O, d: B3 };
        assert!(Buried.density(&ray.x) < 0.);

        // gradient points away from the camera; the shaded normal must not
        let gradient = normal(&Buried, &ray.at(1.)).unwrap();
        assert!(gradient.z > 0.99);

        let c = shade_hit(&Buried, &ray, 1.);
        assert!(c.x > 0. && c.y > 0. && c.z > 0.);

        // same geometry seen from the open side shades identically, which
        // only holds if the normal and the occlusion sample are both flipped
        let open_side = shade_hit(&Wall, &ray, 1.);
        assert!(abs(&(c - open_side)) < 1e-12, "{:?} vs {:?}", c, open_side);
    }

    #[test]
    fn occlusion_sample_follows_the_ray_side() {
        // AO = 0.4 + 0.6 * side * density(p + 0.3 n) = 0.4 + 0.6 * 0.3
        let ray = Ray { x: O, d: B3 };
        let p = ray.at(1.);
        let n = -normal(&Buried, &p).unwrap();
        let above = -Buried.density(&(p + AO_OFFSET * n));
        assert!((AO_BIAS + AO_SCALE * above - 0.58).abs() < 1e-9);
    }

    #[test]
    fn miss_goes_through_the_same_tonemap_and_gamma() {
        let ray = Ray { x: O, d: B3 };
        let result = MarchResult::Miss { traveled: 150. };
        let out = shade(&Wall, &ray, &result, 200.);
        let expected = gamma(tonemap(shade_miss(150., 200.)));
        assert_eq!(out, expected);
        assert!(out.x > 0.);
        for x in out.to_array() {
            assert!((0.0..=1.0).contains(&x));
        }
    }

    #[test]
    fn hit_facing_camera_is_lit() {
        let ray = Ray { x: O, d: B3 };
        let c = shade_hit(&Wall, &ray, 1.);
        assert!(c.x > 0. && c.y > 0. && c.z > 0.);
        let out = shade(&Wall, &ray, &MarchResult::Hit { distance: 1. }, 200.);
        assert_eq!(out, gamma(tonemap(c)));
        for x in out.to_array() {
            assert!((0.0..=1.0).contains(&x));
        }
    }
}
