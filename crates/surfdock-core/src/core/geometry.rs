use nalgebra::{Matrix3, Point3, SymmetricEigen, Vector3};
use std::collections::HashMap;

const ORIENTATION_EPS: f64 = 1e-6;

/// A best-fit plane through a point cloud.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub center: Point3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane {
    pub fn project(&self, p: &Point3<f64>) -> Point3<f64> {
        let v = p - self.center;
        p - self.normal * v.dot(&self.normal)
    }
}

/// Distance window and binning used when searching for lattice vectors.
#[derive(Debug, Clone, Copy)]
pub struct LatticeSearchParams {
    pub min_distance: f64,
    pub max_distance: f64,
    pub bin_width: f64,
}

impl Default for LatticeSearchParams {
    fn default() -> Self {
        Self {
            min_distance: 1.0,
            max_distance: 10.0,
            bin_width: 0.1,
        }
    }
}

/// Fits a plane by PCA; the normal is the direction of least variance.
pub fn fit_plane(points: &[Point3<f64>]) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }
    let n = points.len() as f64;
    let center = Point3::from(points.iter().map(|p| p.coords).sum::<Vector3<f64>>() / n);

    let mut covariance = Matrix3::zeros();
    for p in points {
        let d = p - center;
        covariance += d * d.transpose();
    }
    covariance /= n - 1.0;

    let eigen = SymmetricEigen::new(covariance);
    let (min_idx, _) = eigen
        .eigenvalues
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    let normal = eigen.eigenvectors.column(min_idx).into_owned().normalize();

    Some(Plane {
        center,
        normal: canonical_orientation(normal),
    })
}

/// Flips `v` so that its first significant component is positive.
fn canonical_orientation(v: Vector3<f64>) -> Vector3<f64> {
    let leading = v.iter().find(|c| c.abs() > ORIENTATION_EPS).copied().unwrap_or(0.0);
    if leading < 0.0 { -v } else { v }
}

/// Estimates up to `count` in-plane lattice vectors from the most frequent interatomic distances.
///
/// Atoms are projected onto `plane`; every pair within the distance window contributes its
/// (canonically oriented) difference vector to the bin of its length. Bins are ranked by
/// population, ties resolved by first occurrence, and each selected bin yields its mean vector.
pub fn lattice_vectors(
    points: &[Point3<f64>],
    plane: &Plane,
    params: &LatticeSearchParams,
    count: usize,
) -> Vec<Vector3<f64>> {
    let projected: Vec<Point3<f64>> = points.iter().map(|p| plane.project(p)).collect();

    let mut bins: Vec<Vec<Vector3<f64>>> = Vec::new();
    let mut bin_of: HashMap<i64, usize> = HashMap::new();

    for (i, a) in projected.iter().enumerate() {
        for b in &projected[i + 1..] {
            let v = b - a;
            let d = v.norm();
            if d <= params.min_distance || d >= params.max_distance {
                continue;
            }
            let key = (d / params.bin_width).round() as i64;
            let idx = *bin_of.entry(key).or_insert_with(|| {
                bins.push(Vec::new());
                bins.len() - 1
            });
            bins[idx].push(canonical_orientation(v));
        }
    }

    let mut order: Vec<usize> = (0..bins.len()).collect();
    order.sort_by(|a, b| bins[*b].len().cmp(&bins[*a].len()));

    order
        .into_iter()
        .take(count)
        .map(|idx| {
            let bin = &bins[idx];
            bin.iter().sum::<Vector3<f64>>() / bin.len() as f64
        })
        .collect()
}
