//! Pet lifecycle transition policy.
//!
//! Pure decision logic - NO IO, only the static edge table. The table is a
//! process-wide constant: it is never mutated, and `evaluate` depends on
//! nothing but its two arguments. Actor identity is the gate's business,
//! not the policy's; the policy only flags which edges need admin authority.

use crate::domains::pets::models::PetStatus;

/// One row of the edge table: `(from, to, admin_only)`.
///
/// Declaration order is the stable order used by `targets_from`, which
/// snapshot-style tests rely on.
const EDGES: &[(PetStatus, PetStatus, bool)] = &[
    (PetStatus::Available, PetStatus::Pending, false),
    (PetStatus::Available, PetStatus::InCustody, false),
    (PetStatus::Pending, PetStatus::Adopted, false),
    (PetStatus::Pending, PetStatus::Available, false),
    (PetStatus::InCustody, PetStatus::Available, false),
    // ADOPTED is terminal except for an administrative reversal.
    (PetStatus::Adopted, PetStatus::Available, true),
];

/// Result of evaluating a requested edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCheck {
    /// The edge exists in the table. The no-op edge never does.
    pub legal: bool,
    /// The edge exists but only an elevated actor may take it.
    pub requires_admin: bool,
}

/// Evaluate `(current, requested)` against the edge table.
pub fn evaluate(current: PetStatus, requested: PetStatus) -> TransitionCheck {
    // `current == requested` finds no row below, so the no-op edge is
    // illegal without a special case.
    for &(from, to, admin_only) in EDGES {
        if from == current && to == requested {
            return TransitionCheck {
                legal: true,
                requires_admin: admin_only,
            };
        }
    }

    TransitionCheck {
        legal: false,
        requires_admin: false,
    }
}

/// All targets reachable from `current`, as `(target, admin_only)` pairs in
/// declaration order, duplicates removed.
pub fn targets_from(current: PetStatus) -> Vec<(PetStatus, bool)> {
    let mut targets: Vec<(PetStatus, bool)> = Vec::new();
    for &(from, to, admin_only) in EDGES {
        if from == current && !targets.iter().any(|&(t, _)| t == to) {
            targets.push((to, admin_only));
        }
    }
    targets
}

#[cfg(test)]
mod tests {
    use super::*;
    use PetStatus::*;

    #[test]
    fn test_every_pair_in_the_cross_product() {
        // Exhaustive: all 16 (from, to) pairs, including the four no-ops.
        let legal: &[(PetStatus, PetStatus)] = &[
            (Available, Pending),
            (Available, InCustody),
            (Pending, Adopted),
            (Pending, Available),
            (InCustody, Available),
            (Adopted, Available),
        ];

        for from in PetStatus::ALL {
            for to in PetStatus::ALL {
                let check = evaluate(from, to);
                assert_eq!(
                    check.legal,
                    legal.contains(&(from, to)),
                    "evaluate({from}, {to})"
                );
            }
        }
    }

    #[test]
    fn test_noop_edges_are_illegal() {
        for status in PetStatus::ALL {
            assert!(!evaluate(status, status).legal);
        }
    }

    #[test]
    fn test_only_the_adopted_reversal_needs_admin() {
        for from in PetStatus::ALL {
            for to in PetStatus::ALL {
                let check = evaluate(from, to);
                let expected = from == Adopted && to == Available;
                assert_eq!(check.requires_admin, expected, "evaluate({from}, {to})");
                // An illegal edge never carries the admin flag.
                assert!(check.legal || !check.requires_admin);
            }
        }
    }

    #[test]
    fn test_targets_are_stable_and_deduplicated() {
        assert_eq!(
            targets_from(Available),
            vec![(Pending, false), (InCustody, false)]
        );
        assert_eq!(
            targets_from(Pending),
            vec![(Adopted, false), (Available, false)]
        );
        assert_eq!(targets_from(InCustody), vec![(Available, false)]);
        assert_eq!(targets_from(Adopted), vec![(Available, true)]);
    }
}
