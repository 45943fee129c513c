use crate::core::models::ids::ChainId;
use crate::core::models::system::MolecularSystem;
use crate::engine::key_atoms;
use kiddo::{KdTree, SquaredEuclidean};
use nalgebra::Point3;
use tracing::{debug, instrument};

/// The reference chain that made a candidate chain redundant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clash {
    pub chain: ChainId,
    pub label: String,
    /// Number of reference key atoms found near the candidate, summed over candidate atoms.
    pub contacts: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClashReport {
    /// Contact counts of the reference chains examined, in chain order.
    pub contacts: Vec<(String, usize)>,
    /// The chain that rejected the candidate, if any.
    pub clash: Option<Clash>,
}

impl ClashReport {
    pub fn is_accepted(&self) -> bool {
        self.clash.is_none()
    }
}

/// Decides whether a candidate chain already occupies space held by the reference structure.
///
/// For each reference chain, in chain order, the key atoms are indexed in a k-d tree and the
/// reference atoms within `radius` of each candidate key atom are counted. The counts are
/// summed per chain; the first chain whose sum exceeds `threshold` rejects the candidate and
/// ends the examination.
#[instrument(skip_all, name = "clash_detection_task")]
pub fn run(
    candidate: &[Point3<f64>],
    reference: &MolecularSystem,
    radius: f64,
    threshold: usize,
) -> ClashReport {
    let mut report = ClashReport::default();
    if candidate.is_empty() {
        return report;
    }
    let radius_sq = radius * radius;

    for (chain_id, chain) in reference.chains_iter() {
        let reference_points = key_atoms::extract(reference, chain_id).as_query_points();
        if reference_points.is_empty() {
            continue;
        }
        let kdtree: KdTree<f64, 3> = (&reference_points).into();

        let contacts: usize = candidate
            .iter()
            .map(|p| {
                kdtree
                    .within_unsorted::<SquaredEuclidean>(&[p.x, p.y, p.z], radius_sq)
                    .len()
            })
            .sum();

        debug!(chain = %chain.id, contacts, threshold, "Counted contacts with reference chain.");
        report.contacts.push((chain.id.clone(), contacts));

        if contacts > threshold {
            report.clash = Some(Clash {
                chain: chain_id,
                label: chain.id.clone(),
                contacts,
            });
            break;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{SystemBuilder, helix_points, shifted};
    use nalgebra::Isometry3;

    #[test]
    fn distant_candidate_is_accepted_regardless_of_threshold() {
        let reference = SystemBuilder::new().protein("A", 8, &Isometry3::identity()).build();
        let candidate = helix_points(8, &shifted(50.0));

        let report = run(&candidate, &reference, 5.0, 0);

        assert!(report.is_accepted());
        assert_eq!(report.contacts, vec![("A".to_string(), 0)]);
    }

    #[test]
    fn coinciding_candidate_is_rejected() {
        let reference = SystemBuilder::new().protein("A", 8, &Isometry3::identity()).build();
        let candidate = helix_points(8, &Isometry3::identity());

        let report = run(&candidate, &reference, 5.0, 8);

        let clash = report.clash.expect("coinciding chain must clash");
        assert_eq!(clash.label, "A");
        assert!(clash.contacts > 8);
    }

    #[test]
    fn contacts_at_the_threshold_are_tolerated() {
        let reference = SystemBuilder::new().protein("A", 1, &Isometry3::identity()).build();
        let candidate = helix_points(1, &Isometry3::identity());

        assert!(run(&candidate, &reference, 5.0, 1).is_accepted());
        assert!(!run(&candidate, &reference, 5.0, 0).is_accepted());
    }

    #[test]
    fn contacts_are_summed_over_candidate_atoms() {
        let reference = SystemBuilder::new().protein("A", 1, &Isometry3::identity()).build();
        let origin = helix_points(1, &Isometry3::identity())[0];
        let candidate = vec![origin, origin + nalgebra::Vector3::new(1.0, 0.0, 0.0)];

        let report = run(&candidate, &reference, 5.0, 10);

        assert_eq!(report.contacts, vec![("A".to_string(), 2)]);
    }

    #[test]
    fn examination_stops_at_the_first_rejecting_chain() {
        let reference = SystemBuilder::new()
            .protein("A", 6, &shifted(60.0))
            .protein("B", 6, &Isometry3::identity())
            .protein("C", 6, &Isometry3::identity())
            .build();
        let candidate = helix_points(6, &Isometry3::identity());

        let report = run(&candidate, &reference, 5.0, 3);

        assert_eq!(report.clash.as_ref().map(|c| c.label.as_str()), Some("B"));
        assert_eq!(report.contacts.len(), 2);
        assert_eq!(report.contacts[0], ("A".to_string(), 0));
    }

    #[test]
    fn empty_candidate_is_accepted() {
        let reference = SystemBuilder::new().protein("A", 3, &Isometry3::identity()).build();
        let report = run(&[], &reference, 5.0, 0);
        assert!(report.is_accepted());
        assert!(report.contacts.is_empty());
    }
}
