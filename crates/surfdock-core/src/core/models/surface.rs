use nalgebra::Vector3;

/// The three lattice/orientation vectors describing a surface slab.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceVectors {
    pub vectors: [Vector3<f64>; 3],
}

impl SurfaceVectors {
    pub fn new(a: Vector3<f64>, b: Vector3<f64>, c: Vector3<f64>) -> Self {
        Self { vectors: [a, b, c] }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vector3<f64>> {
        self.vectors.iter()
    }
}

impl Default for SurfaceVectors {
    fn default() -> Self {
        Self::new(
            Vector3::new(4.0, 0.0, 0.0),
            Vector3::new(0.0, 4.0, 0.0),
            Vector3::new(2.0, 2.0, 0.0),
        )
    }
}
