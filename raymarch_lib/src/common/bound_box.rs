use nalgebra::{point, vector, Point3, Vector3};

use super::Ray;

/// Axis aligned box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundBox {
    pub lower: Point3<f32>,
    pub upper: Point3<f32>,
}

impl BoundBox {
    pub fn new(lower: Point3<f32>, upper: Point3<f32>) -> BoundBox {
        BoundBox { lower, upper }
    }

    /// Box `[-0.5;0.5]^3`, the local frame of every volume
    pub fn unit() -> BoundBox {
        BoundBox {
            lower: point![-0.5, -0.5, -0.5],
            upper: point![0.5, 0.5, 0.5],
        }
    }

    /// Box with given dimensions, centered at origin
    pub fn centered(dims: Vector3<f32>) -> BoundBox {
        let half = dims * 0.5;
        BoundBox {
            lower: Point3::from(-half),
            upper: Point3::from(half),
        }
    }

    pub fn dims(&self) -> Vector3<f32> {
        self.upper - self.lower
    }

    pub fn center(&self) -> Point3<f32> {
        self.lower + self.dims() * 0.5
    }

    /// Strict containment, points on faces are outside
    pub fn is_in(&self, pos: &Point3<f32>) -> bool {
        self.upper.x > pos.x
            && self.upper.y > pos.y
            && self.upper.z > pos.z
            && pos.x > self.lower.x
            && pos.y > self.lower.y
            && pos.z > self.lower.z
    }

    /// Slab test, returns `(entry, exit)` ray parameters.
    ///
    /// `None` if the box is missed or lies entirely behind the ray origin.
    /// `entry` may be negative when the origin is inside the box.
    pub fn intersect(&self, ray: &Ray) -> Option<(f32, f32)> {
        // Source: An Efficient and Robust Ray–Box Intersection Algorithm. Amy Williams et al. 2004.
        // http://citeseerx.ist.psu.edu/viewdoc/summary?doi=10.1.1.64.7663

        // Zero component gives +-inf, IEEE division
        let inv_dir = vector![1.0, 1.0, 1.0].component_div(&ray.direction);

        // t value of intersection with the 6 planes of a bounding box
        let t0 = (self.lower - ray.origin).component_mul(&inv_dir);
        let t1 = (self.upper - ray.origin).component_mul(&inv_dir);

        // f32::min/max return the other operand for NaN (0 * inf),
        // so an origin lying on a slab plane never decides the result
        let t_near = t0.zip_map(&t1, f32::min);
        let t_far = t0.zip_map(&t1, f32::max);

        let tmin = f32::max(f32::max(t_near.x, t_near.y), t_near.z);
        let tmax = f32::min(f32::min(t_far.x, t_far.y), t_far.z);

        // ray is intersecting AABB, but the whole AABB is behind us
        if tmax < 0.0 {
            return None;
        }

        // ray doesn't intersect AABB
        if tmin > tmax {
            return None;
        }

        // all components NaN, degenerate ray
        if tmin.is_nan() || tmax.is_nan() {
            return None;
        }

        Some((tmin, tmax))
    }
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn intersect_works() {
        let bbox = BoundBox::unit();
        let ray = Ray::new(point![-1.0, -1.0, -0.6], vector![1.0, 1.0, 1.0]);
        let inter = bbox.intersect(&ray);
        assert!(inter.is_some());
    }

    #[test]
    fn axis_aligned_entry_exit() {
        let bbox = BoundBox::unit();
        let ray = Ray::new(point![-2.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        let (entry, exit) = bbox.intersect(&ray).unwrap();
        assert_eq!(entry, 1.5);
        assert_eq!(exit, 2.5);
    }

    #[test]
    fn origin_inside_gives_negative_entry() {
        let bbox = BoundBox::unit();
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, -1.0]);
        let (entry, exit) = bbox.intersect(&ray).unwrap();
        assert_eq!(entry, -0.5);
        assert_eq!(exit, 0.5);
    }

    #[test]
    fn not_intersecting() {
        let bbox = BoundBox::unit();
        let ray = Ray::new(point![200.0, 200.0, 200.0], vector![1.0, 0.0, 0.0]);
        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn box_behind_ray() {
        let bbox = BoundBox::unit();
        let ray = Ray::new(point![2.0, 0.0, 0.0], vector![1.0, 0.0, 0.0]);
        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_outside_slab() {
        let bbox = BoundBox::unit();
        // direction.y == 0, origin outside y slab
        let ray = Ray::new(point![-2.0, 0.7, 0.0], vector![1.0, 0.0, 0.0]);
        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn parallel_ray_on_face_plane() {
        let bbox = BoundBox::unit();
        // grazing the x = -0.5 face, 0 * inf produces NaN
        let ray = Ray::new(point![-0.5, -2.0, 0.0], vector![0.0, 1.0, 0.0]);
        assert!(bbox.intersect(&ray).is_none());
        let ray = Ray::new(point![-0.5, -2.0, 0.0], vector![-0.0, 1.0, 0.0]);
        assert!(bbox.intersect(&ray).is_none());
    }

    #[test]
    fn centered_box() {
        let bbox = BoundBox::centered(vector![1.0, 0.5, 0.25]);
        assert_eq!(bbox.lower, point![-0.5, -0.25, -0.125]);
        assert_eq!(bbox.upper, point![0.5, 0.25, 0.125]);
        assert_eq!(bbox.center(), point![0.0, 0.0, 0.0]);
        assert!(bbox.is_in(&point![0.4, 0.2, 0.1]));
        assert!(!bbox.is_in(&point![0.4, 0.3, 0.1]));
    }
}
