//! Propose-and-confirm loop around the placement searches.

use crate::collision::CollisionEvaluator;
use crate::planner::SitePlanner;
use rand::Rng;
use siteplan_core::{BuildingType, ObstacleIndex, Placement, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Answer to a proposed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Reviews proposals, typically by asking a player.
pub trait ConfirmationHandler {
    fn confirm(&mut self, proposal: &Placement) -> Decision;
}

impl<F> ConfirmationHandler for F
where
    F: FnMut(&Placement) -> Decision,
{
    fn confirm(&mut self, proposal: &Placement) -> Decision {
        self(proposal)
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "outcome", rename_all = "snake_case"))]
pub enum SessionOutcome {
    /// A proposal was accepted and is still open on the current site plan.
    Accepted { placement: Placement, proposals: u32 },
    /// The search found no position.
    Exhausted { proposals: u32 },
    /// Every allowed proposal was rejected.
    ProposalLimit { proposals: u32 },
}

impl SessionOutcome {
    /// Number of proposals offered to the handler.
    pub fn proposals(&self) -> u32 {
        match self {
            SessionOutcome::Accepted { proposals, .. }
            | SessionOutcome::Exhausted { proposals }
            | SessionOutcome::ProposalLimit { proposals } => *proposals,
        }
    }

    pub fn placement(&self) -> Option<&Placement> {
        match self {
            SessionOutcome::Accepted { placement, .. } => Some(placement),
            _ => None,
        }
    }
}

/// Repeats a search until the handler accepts a proposal.
///
/// Rejected positions are not remembered; the randomized search may offer
/// one again. The number of proposals is capped by
/// [`siteplan_core::PlacementConfig::max_proposals`].
#[derive(Debug, Clone, Copy)]
pub struct PlacementSession<'a> {
    planner: &'a SitePlanner,
}

impl<'a> PlacementSession<'a> {
    pub fn new(planner: &'a SitePlanner) -> Self {
        Self { planner }
    }

    /// Runs the loop for one building of `building_type`.
    ///
    /// An accepted proposal is checked again against a fresh snapshot of
    /// `index` before being returned; if the settlement changed under it,
    /// the proposal is dropped and the search continues. A connector is not
    /// checked against the buildings it joins.
    pub fn run<I, H, R>(
        &self,
        building_type: &BuildingType,
        index: &I,
        handler: &mut H,
        rng: &mut R,
    ) -> Result<SessionOutcome>
    where
        I: ObstacleIndex + ?Sized,
        H: ConfirmationHandler + ?Sized,
        R: Rng + ?Sized,
    {
        let max_proposals = self.planner.config().max_proposals;
        let mut proposals = 0;

        while proposals < max_proposals {
            let Some(placement) = self.planner.place(building_type, index, rng)?.into_placement()
            else {
                return Ok(SessionOutcome::Exhausted { proposals });
            };
            proposals += 1;

            match handler.confirm(&placement) {
                Decision::Accept => {
                    let evaluator = CollisionEvaluator::from_index(index)?;
                    if evaluator.is_open_ignoring(&placement.bounds, &placement.joins) {
                        return Ok(SessionOutcome::Accepted {
                            placement,
                            proposals,
                        });
                    }
                    log::warn!(
                        "Accepted position for {} is no longer open, searching again",
                        building_type.name
                    );
                }
                Decision::Reject => {
                    log::debug!(
                        "Proposal {} for {} rejected",
                        proposals,
                        building_type.name
                    );
                }
            }
        }

        log::warn!(
            "Giving up on {} after {} proposals",
            building_type.name,
            proposals
        );
        Ok(SessionOutcome::ProposalLimit { proposals })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteSnapshot;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use siteplan_core::{BoundedObject, Building, PlacementConfig};
    use std::cell::Cell;

    fn site() -> SiteSnapshot {
        SiteSnapshot::new().with_building(
            Building::new("hab-1", "Lander Hab", BoundedObject::new(0.0, 0.0, 10.0, 10.0, 0.0))
                .with_life_support(true),
        )
    }

    #[test]
    fn test_accept_first() {
        let planner = SitePlanner::default_config();
        let shed = BuildingType::new("Storage Shed", 4.0, 4.0);
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = PlacementSession::new(&planner)
            .run(&shed, &site(), &mut |_: &Placement| Decision::Accept, &mut rng)
            .unwrap();
        assert_eq!(outcome.proposals(), 1);
        assert!(outcome.placement().is_some());
    }

    #[test]
    fn test_reject_then_accept() {
        let planner = SitePlanner::default_config();
        let shed = BuildingType::new("Storage Shed", 4.0, 4.0);
        let mut rng = StdRng::seed_from_u64(2);
        let mut seen = 0;

        let mut handler = |_: &Placement| {
            seen += 1;
            if seen < 3 {
                Decision::Reject
            } else {
                Decision::Accept
            }
        };
        let outcome = PlacementSession::new(&planner)
            .run(&shed, &site(), &mut handler, &mut rng)
            .unwrap();
        assert!(matches!(outcome, SessionOutcome::Accepted { proposals: 3, .. }));
    }

    #[test]
    fn test_proposal_limit() {
        let planner = SitePlanner::new(PlacementConfig::default().with_max_proposals(4));
        let shed = BuildingType::new("Storage Shed", 4.0, 4.0);
        let mut rng = StdRng::seed_from_u64(2);

        let outcome = PlacementSession::new(&planner)
            .run(&shed, &site(), &mut |_: &Placement| Decision::Reject, &mut rng)
            .unwrap();
        assert_eq!(outcome, SessionOutcome::ProposalLimit { proposals: 4 });
    }

    #[test]
    fn test_diagonal_connector_accepted_first_time() {
        let hab = |id: &str, x: f64, y: f64| {
            Building::new(id, "Lander Hab", BoundedObject::new(x, y, 10.0, 10.0, 0.0))
                .with_life_support(true)
        };
        let site = SiteSnapshot::new()
            .with_building(hab("a", 0.0, 0.0))
            .with_building(hab("b", 20.0, 12.0));
        let planner = SitePlanner::default_config();
        let hallway = BuildingType::connector("Hallway", 2.0);
        let mut rng = StdRng::seed_from_u64(9);

        let outcome = PlacementSession::new(&planner)
            .run(&hallway, &site, &mut |_: &Placement| Decision::Accept, &mut rng)
            .unwrap();
        assert_eq!(outcome.proposals(), 1);
        let placement = outcome.placement().unwrap();
        assert_eq!(placement.joins.len(), 2);
    }

    #[test]
    fn test_exhausted_without_proposals() {
        let planner = SitePlanner::default_config();
        let hallway = BuildingType::connector("Hallway", 2.0);
        let empty = SiteSnapshot::new();
        let mut rng = StdRng::seed_from_u64(2);
        let asked = Cell::new(0);

        let outcome = PlacementSession::new(&planner)
            .run(
                &hallway,
                &empty,
                &mut |_: &Placement| {
                    asked.set(asked.get() + 1);
                    Decision::Accept
                },
                &mut rng,
            )
            .unwrap();
        assert_eq!(outcome, SessionOutcome::Exhausted { proposals: 0 });
        assert_eq!(asked.get(), 0);
    }
}
