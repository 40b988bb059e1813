use crate::{Interval, Point3, Ray, Vec3};

/// Minimum extent of any axis of a padded box.
const PAD_DELTA: f64 = 0.0001;

/// Axis-aligned box stored as one [`Interval`] per axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    pub x: Interval,
    pub y: Interval,
    pub z: Interval,
}

impl Aabb {
    /// Box that contains nothing. Identity element of [`Aabb::surrounding`].
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };

    /// Box that contains everything.
    pub const UNIVERSE: Aabb = Aabb {
        x: Interval::UNIVERSE,
        y: Interval::UNIVERSE,
        z: Interval::UNIVERSE,
    };

    /// Create a new AABB from three intervals, padded to the minimum thickness.
    pub fn new(x: Interval, y: Interval, z: Interval) -> Self {
        Self { x, y, z }.pad()
    }

    /// Box spanned by two opposite corners given in any order, padded.
    pub fn from_points(a: Point3, b: Point3) -> Self {
        let x = Interval::new(a.x.min(b.x), a.x.max(b.x));
        let y = Interval::new(a.y.min(b.y), a.y.max(b.y));
        let z = Interval::new(a.z.min(b.z), a.z.max(b.z));
        Self::new(x, y, z)
    }

    /// Union of two boxes.
    pub fn surrounding(box0: &Aabb, box1: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(&box0.x, &box1.x),
            y: Interval::surrounding(&box0.y, &box1.y),
            z: Interval::surrounding(&box0.z, &box1.z),
        }
    }

    /// Extent along axis `n`: 0 is x, 1 is y, anything else z.
    pub fn axis_interval(&self, n: usize) -> Interval {
        match n {
            0 => self.x,
            1 => self.y,
            _ => self.z,
        }
    }

    /// Return a copy with no side narrower than `1e-4`.
    ///
    /// Keeps boxes around axis-aligned flat geometry (a quad in the xz plane, say) from
    /// collapsing to zero width and slipping through the slab test.
    pub fn pad(&self) -> Aabb {
        let widen = |i: Interval| {
            if i.size() < PAD_DELTA {
                i.expand(PAD_DELTA)
            } else {
                i
            }
        };
        Aabb {
            x: widen(self.x),
            y: widen(self.y),
            z: widen(self.z),
        }
    }

    /// Whether `r` passes through the box for some `t` in `ray_t`.
    ///
    /// Slab method, evaluated x then y then z. A zero direction component divides to
    /// ±∞ and the comparisons below do the right thing with it.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        let origin = r.origin.to_array();
        let direction = r.direction.to_array();

        for axis in 0..3 {
            let slab = self.axis_interval(axis);
            let adinv = 1.0 / direction[axis];

            let mut t0 = (slab.min - origin[axis]) * adinv;
            let mut t1 = (slab.max - origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }

            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }

        true
    }

    /// The box moved by `offset`.
    pub fn translate(&self, offset: Vec3) -> Aabb {
        Aabb::new(
            self.x.offset(offset.x),
            self.y.offset(offset.y),
            self.z.offset(offset.z),
        )
    }

    /// Smallest corner.
    pub fn min(&self) -> Point3 {
        Point3::new(self.x.min, self.y.min, self.z.min)
    }

    /// Largest corner.
    pub fn max(&self) -> Point3 {
        Point3::new(self.x.max, self.y.max, self.z.max)
    }

    /// The 8 corners of the box.
    pub fn corners(&self) -> [Point3; 8] {
        let (lo, hi) = (self.min(), self.max());
        [
            Point3::new(lo.x, lo.y, lo.z),
            Point3::new(hi.x, lo.y, lo.z),
            Point3::new(lo.x, hi.y, lo.z),
            Point3::new(hi.x, hi.y, lo.z),
            Point3::new(lo.x, lo.y, hi.z),
            Point3::new(hi.x, lo.y, hi.z),
            Point3::new(lo.x, hi.y, hi.z),
            Point3::new(hi.x, hi.y, hi.z),
        ]
    }

    pub fn centroid(&self) -> Point3 {
        (self.min() + self.max()) * 0.5
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_from_points_unordered() {
        let aabb = Aabb::from_points(Vec3::new(10.0, 0.0, 10.0), Vec3::new(0.0, 10.0, 0.0));

        assert_eq!(aabb.x, Interval::new(0.0, 10.0));
        assert_eq!(aabb.y, Interval::new(0.0, 10.0));
        assert_eq!(aabb.z, Interval::new(0.0, 10.0));
    }

    #[test]
    fn test_aabb_pad_flat_axis() {
        let flat = Aabb::from_points(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.y.size() >= PAD_DELTA - 1e-12);
        assert!(flat.y.contains(0.0));
        // Thick axes are left alone
        assert_eq!(flat.x, Interval::new(0.0, 1.0));
    }

    #[test]
    fn test_aabb_surrounding() {
        let box1 = Aabb::from_points(Vec3::ZERO, Vec3::splat(5.0));
        let box2 = Aabb::from_points(Vec3::splat(3.0), Vec3::splat(10.0));
        let surrounding = Aabb::surrounding(&box1, &box2);

        assert_eq!(surrounding.x, Interval::new(0.0, 10.0));
        assert_eq!(Aabb::surrounding(&Aabb::EMPTY, &box1), box1);
    }

    #[test]
    fn test_aabb_hit_from_each_side() {
        let cube = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray_t = Interval::new(0.001, f64::INFINITY);

        for dir in [Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z] {
            // Inbound from outside the face, outbound from the same spot
            assert!(cube.hit(&Ray::new(-3.0 * dir, dir, 0.0), ray_t));
            assert!(!cube.hit(&Ray::new(-3.0 * dir, -dir, 0.0), ray_t));
        }

        // Diagonal ray passing above the cube
        let grazing = Ray::new(Vec3::new(-3.0, 1.5, 0.0), Vec3::new(1.0, 0.0, 1.0), 0.0);
        assert!(!cube.hit(&grazing, ray_t));
    }

    #[test]
    fn test_aabb_hit_respects_interval() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::Z, 0.0);

        // Box spans t in [4, 6]
        assert!(!aabb.hit(&ray, Interval::new(0.0, 3.9)));
        assert!(!aabb.hit(&ray, Interval::new(6.1, 100.0)));
        assert!(aabb.hit(&ray, Interval::new(5.0, 5.5)));
    }

    #[test]
    fn test_aabb_hit_axis_parallel_ray() {
        let aabb = Aabb::from_points(Vec3::splat(-1.0), Vec3::splat(1.0));

        // Direction has zero x and y components: divides to infinity
        let inside = Ray::new(Vec3::new(0.5, -0.5, -5.0), Vec3::Z, 0.0);
        assert!(aabb.hit(&inside, Interval::new(0.001, f64::INFINITY)));

        let outside = Ray::new(Vec3::new(1.5, 0.0, -5.0), Vec3::Z, 0.0);
        assert!(!aabb.hit(&outside, Interval::new(0.001, f64::INFINITY)));
    }

    #[test]
    fn test_aabb_empty_never_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 1.0, 1.0), 0.0);
        assert!(!Aabb::EMPTY.hit(&ray, Interval::UNIVERSE));
    }

    #[test]
    fn test_aabb_translate() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::ONE);
        let translated = aabb.translate(Vec3::new(5.0, 0.0, 0.0));

        assert_eq!(translated.x, Interval::new(5.0, 6.0));
        assert_eq!(translated.y, Interval::new(0.0, 1.0));

        let back = translated.translate(Vec3::new(-5.0, 0.0, 0.0));
        assert!((back.x.min - aabb.x.min).abs() < 1e-12);
        assert!((back.x.max - aabb.x.max).abs() < 1e-12);
    }

    #[test]
    fn test_aabb_corners_and_centroid() {
        let aabb = Aabb::from_points(Vec3::ZERO, Vec3::splat(10.0));
        assert_eq!(aabb.centroid(), Vec3::splat(5.0));

        let corners = aabb.corners();
        assert!(corners.contains(&Vec3::ZERO));
        assert!(corners.contains(&Vec3::splat(10.0)));
        assert!(corners.contains(&Vec3::new(10.0, 0.0, 10.0)));
    }
}
