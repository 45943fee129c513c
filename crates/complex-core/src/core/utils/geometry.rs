use nalgebra::{Isometry3, Matrix3, Point3, Rotation3, Translation3, UnitQuaternion, Vector3};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SuperpositionError {
    #[error("Cannot superimpose an empty set of points")]
    Empty,
    #[error("Point sets differ in size: {reference} reference vs {mobile} mobile")]
    LengthMismatch { reference: usize, mobile: usize },
    #[error("Singular value decomposition of the covariance matrix failed")]
    Decomposition,
}

/// The optimal rigid-body transformation mapping a mobile point set onto a reference one.
///
/// Applying the superposition to a point computes `rotation * p + translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub rotation: Rotation3<f64>,
    pub translation: Vector3<f64>,
    pub rmsd: f64,
}

impl Superposition {
    pub fn isometry(&self) -> Isometry3<f64> {
        Isometry3::from_parts(
            Translation3::from(self.translation),
            UnitQuaternion::from_rotation_matrix(&self.rotation),
        )
    }

    pub fn apply(&self, point: &Point3<f64>) -> Point3<f64> {
        self.rotation * point + self.translation
    }
}

pub fn centroid(points: &[Point3<f64>]) -> Option<Point3<f64>> {
    if points.is_empty() {
        return None;
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Some(Point3::from(sum / points.len() as f64))
}

/// Computes the least-squares optimal superposition of `mobile` onto `reference` (Kabsch).
///
/// Both slices must be non-empty and of equal length; element `i` of one set corresponds
/// to element `i` of the other. A reflection in the optimal orthogonal matrix is corrected
/// by flipping the axis of the smallest singular value, so the result is always a proper
/// rotation.
///
/// # Errors
///
/// Returns [`SuperpositionError`] for empty or mismatched inputs, or if the SVD fails.
pub fn superimpose(
    reference: &[Point3<f64>],
    mobile: &[Point3<f64>],
) -> Result<Superposition, SuperpositionError> {
    if reference.len() != mobile.len() {
        return Err(SuperpositionError::LengthMismatch {
            reference: reference.len(),
            mobile: mobile.len(),
        });
    }
    let (Some(ref_center), Some(mob_center)) = (centroid(reference), centroid(mobile)) else {
        return Err(SuperpositionError::Empty);
    };

    let covariance = reference
        .iter()
        .zip(mobile)
        .fold(Matrix3::zeros(), |acc, (r, m)| {
            acc + (m - mob_center) * (r - ref_center).transpose()
        });

    let svd = covariance.svd(true, true);
    let (Some(u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Err(SuperpositionError::Decomposition);
    };

    let mut correction = Matrix3::identity();
    if (v_t.transpose() * u.transpose()).determinant() < 0.0 {
        correction[(2, 2)] = -1.0;
    }
    let rotation = Rotation3::from_matrix_unchecked(v_t.transpose() * correction * u.transpose());
    let translation = ref_center.coords - rotation * mob_center.coords;

    let superposition = Superposition {
        rotation,
        translation,
        rmsd: 0.0,
    };
    let moved: Vec<Point3<f64>> = mobile.iter().map(|p| superposition.apply(p)).collect();
    let rmsd = calculate_rmsd(reference, &moved).ok_or(SuperpositionError::Empty)?;

    Ok(Superposition {
        rmsd,
        ..superposition
    })
}

pub fn calculate_rmsd(coords1: &[Point3<f64>], coords2: &[Point3<f64>]) -> Option<f64> {
    if coords1.len() != coords2.len() || coords1.is_empty() {
        return None;
    }
    let n = coords1.len() as f64;
    let squared_dist_sum: f64 = coords1
        .iter()
        .zip(coords2.iter())
        .map(|(p1, p2)| (p1 - p2).norm_squared())
        .sum();
    Some((squared_dist_sum / n).sqrt())
}
