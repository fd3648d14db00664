use nalgebra::{Point3, Vector3};

use super::BoundBox;

/// Ray cast by camera.
/// Main usecase is getting intersections with the volume box ([`BoundBox::intersect`]),
/// then iterating over the intersected line segment in steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point3<f32>,
    pub direction: Vector3<f32>,
}

impl Ray {
    /// Construct new ray using `origin` and `direction`.
    /// `direction` does not have to be unit vector.
    pub fn new(origin: Point3<f32>, direction: Vector3<f32>) -> Ray {
        Ray { origin, direction }
    }

    /// Returns point `t` units far from ray origin in ray direction
    pub fn point_from_t(&self, t: f32) -> Point3<f32> {
        self.origin + t * self.direction
    }

    /// Same ray with unit direction.
    /// `None` for zero or non-finite direction.
    pub fn normalized(&self) -> Option<Ray> {
        let len = self.direction.norm();
        if !len.is_finite() || len == 0.0 {
            return None;
        }
        Some(Ray {
            origin: self.origin,
            direction: self.direction / len,
        })
    }

    /// Transform ray from world coordinates into the local frame of a volume box.
    ///
    /// World box is `world_box`, the local frame is the unit box `[-0.5;0.5]^3`.
    /// Direction is not renormalized.
    pub fn transform_to_volume_space(&self, world_box: &BoundBox) -> Ray {
        let dims = world_box.dims();
        let center = world_box.center();

        let origin = Point3::from((self.origin - center).component_div(&dims));
        let direction = self.direction.component_div(&dims);
        Ray { origin, direction }
    }
}

#[cfg(test)]
mod test {

    use nalgebra::{point, vector};

    use super::*;

    #[test]
    fn to_object_space() {
        let ray = Ray {
            origin: point![0.0, 0.0, 0.0],
            direction: vector![1.0, 1.0, 1.0],
        };

        let bbox = BoundBox::new(point![1.0, 1.0, 1.0], point![5.0, 5.0, 5.0]);

        let obj_ray = ray.transform_to_volume_space(&bbox);

        assert_eq!(obj_ray.origin, point![-0.75, -0.75, -0.75]);
        assert_eq!(obj_ray.direction, vector![0.25, 0.25, 0.25]);
    }

    #[test]
    fn to_object_space_scaled_box() {
        let ray = Ray {
            origin: point![0.0, 0.5, 0.0],
            direction: vector![0.0, -1.0, 0.0],
        };

        // box of a 64x32x64 volume
        let bbox = BoundBox::centered(vector![1.0, 0.5, 1.0]);

        let obj_ray = ray.transform_to_volume_space(&bbox);

        assert_eq!(obj_ray.origin, point![0.0, 1.0, 0.0]);
        assert_eq!(obj_ray.direction, vector![0.0, -2.0, 0.0]);
    }

    #[test]
    fn normalized_rejects_zero_direction() {
        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 0.0, 0.0]);
        assert!(ray.normalized().is_none());

        let ray = Ray::new(point![0.0, 0.0, 0.0], vector![0.0, 3.0, 4.0]);
        let unit = ray.normalized().unwrap();
        assert!((unit.direction.norm() - 1.0).abs() < 1e-6);
    }
}
