use glam::{DQuat, DVec3};

// World-space axis-aligned bounds of a body's collision shape
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub min_z: f64,
    pub max_z: f64,
}

impl BoundingBox {
    pub fn new(
        min_x: f64,
        max_x: f64,
        min_y: f64,
        max_y: f64,
        min_z: f64,
        max_z: f64,
    ) -> BoundingBox {
        BoundingBox {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    pub fn from_vecs(min: DVec3, max: DVec3) -> BoundingBox {
        BoundingBox {
            min_x: min.x,
            max_x: max.x,
            min_y: min.y,
            max_y: max.y,
            min_z: min.z,
            max_z: max.z,
        }
    }

    // bounds of a box of `size` centered at `pos` and rotated by `rotation`
    pub fn around(pos: DVec3, size: DVec3, rotation: DQuat) -> BoundingBox {
        let mut bounds = BoundingBox::from_vecs(pos, pos);
        bounds.set_dimensions(&pos, &size, rotation);
        bounds
    }

    pub fn center(&self) -> DVec3 {
        DVec3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    // half the size along each axis
    pub fn extents(&self) -> DVec3 {
        DVec3::new(
            (self.max_x - self.min_x) / 2.0,
            (self.max_y - self.min_y) / 2.0,
            (self.max_z - self.min_z) / 2.0,
        )
    }

    // update this bounding box based on the provided position, size and rotation
    pub fn set_dimensions(&mut self, pos: &DVec3, size: &DVec3, rotation: DQuat) {
        // because of symmetry, we only need to rotate four corners all on the
        // same face; the opposite face is those four negated
        let x_2 = size.x / 2.0;
        let y_2 = size.y / 2.0;
        let z_2 = size.z / 2.0;
        let corners = [
            DVec3::new(x_2, y_2, z_2),
            DVec3::new(-x_2, y_2, z_2),
            DVec3::new(x_2, y_2, -z_2),
            DVec3::new(-x_2, y_2, -z_2),
        ];

        let half = corners
            .iter()
            .map(|corner| (rotation * *corner).abs())
            .fold(DVec3::ZERO, |acc, corner| acc.max(corner));

        self.min_x = pos.x - half.x;
        self.max_x = pos.x + half.x;
        self.min_y = pos.y - half.y;
        self.max_y = pos.y + half.y;
        self.min_z = pos.z - half.z;
        self.max_z = pos.z + half.z;
    }
}
