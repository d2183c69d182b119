//! Raid Machine - Walks a RaidAttempt through its zones
//!
//! One call to [`RaidMachine::resolve`] fights exactly one step:
//!
//! ```text
//!                 choose_tactic
//!  AwaitingTactic ─────────────▶ Resolving
//!        ▲                           │ resolve()
//!        │  ZoneCleared / ZoneTaken  │
//!        ├───────────────────────────┤
//!        │  ZoneHeld (retry)         │
//!        └───────────────────────────┤
//!                                    ├──▶ Won     (terminal)
//!                                    └──▶ Failed  (terminal)
//! ```
//!
//! A raid that clears its last zone is not won yet: the kill happens on
//! the following resolution, after one more tactic.
//!
//! This is pure domain logic - no I/O, no settlement. The caller applies
//! the economic consequences of a terminal step exactly once.

use crate::model::raid::{RaidAttempt, RaidError};
use crate::model::tactic::Tactic;
use crate::model::user::UserId;
use crate::service::combat::{ZoneClash, ZoneOdds};
use crate::service::roll::RollSource;

/// What one resolution did to the raid
///
/// Zone numbers are 0-based indexes into the raid's defense.
#[derive(Debug, Clone, PartialEq)]
pub enum RaidStep {
    /// Every zone had already fallen: the target is dead
    Won { target: UserId },
    /// Nobody guarded the zone; walked through without losses
    ZoneCleared { zone: usize },
    /// Zone taken
    ZoneTaken {
        zone: usize,
        tactic: Tactic,
        guards_defeated: usize,
        losses: u32,
        team_alive: u32,
        odds: ZoneOdds,
    },
    /// Zone held; the raid will retry it
    ZoneHeld {
        zone: usize,
        tactic: Tactic,
        losses: u32,
        team_alive: u32,
        odds: ZoneOdds,
    },
    /// The last teammates died in this zone
    Failed {
        zone: usize,
        tactic: Tactic,
        /// The team took the zone but nobody survived it
        zone_taken: bool,
        losses: u32,
        odds: ZoneOdds,
    },
}

impl RaidStep {
    /// Won or Failed: the raid must be settled and removed
    pub fn is_terminal(&self) -> bool {
        matches!(self, RaidStep::Won { .. } | RaidStep::Failed { .. })
    }
}

/// RaidMachine - The zone resolution engine
///
/// Stateless: all state lives in the RaidAttempt.
#[derive(Debug, Default, Clone, Copy)]
pub struct RaidMachine;

impl RaidMachine {
    pub fn new() -> Self {
        Self
    }

    /// Fight the current zone with the tactic already locked in
    ///
    /// The raid must be `Resolving`. Non-terminal steps leave it back in
    /// `AwaitingTactic`.
    pub fn resolve(
        &self,
        raid: &mut RaidAttempt,
        dice: &mut dyn RollSource,
    ) -> Result<RaidStep, RaidError> {
        let tactic = raid.ensure_resolving()?;
        let zone = raid.current_zone();

        if raid.all_zones_cleared() {
            return Ok(RaidStep::Won {
                target: raid.target().clone(),
            });
        }

        let guards = raid.zones().guards(zone).unwrap_or(&[]).to_vec();
        if guards.is_empty() {
            raid.advance();
            return Ok(RaidStep::ZoneCleared { zone });
        }

        let team_before = raid.team_alive();
        let odds = ZoneOdds::compute(team_before, &guards, tactic);

        match odds.clash(team_before, dice.roll()) {
            ZoneClash::Won { losses } => {
                raid.clear_current_zone();
                let team_alive = raid.bury(losses);
                if team_alive == 0 {
                    return Ok(RaidStep::Failed {
                        zone,
                        tactic,
                        zone_taken: true,
                        losses,
                        odds,
                    });
                }
                raid.advance();
                Ok(RaidStep::ZoneTaken {
                    zone,
                    tactic,
                    guards_defeated: guards.len(),
                    losses,
                    team_alive,
                    odds,
                })
            }
            ZoneClash::Lost { losses } => {
                let team_alive = raid.bury(losses);
                if team_alive == 0 {
                    return Ok(RaidStep::Failed {
                        zone,
                        tactic,
                        zone_taken: false,
                        losses,
                        odds,
                    });
                }
                raid.retry();
                Ok(RaidStep::ZoneHeld {
                    zone,
                    tactic,
                    losses,
                    team_alive,
                    odds,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::guard::GuardType;
    use crate::model::method::MethodTier;
    use crate::model::raid::RaidPhase;
    use crate::model::zone::ZoneDefense;
    use crate::service::roll::FixedRolls;

    fn raid(method: &str, zones: Vec<Vec<GuardType>>) -> RaidAttempt {
        RaidAttempt::new(
            UserId::new("alice"),
            UserId::new("bob"),
            MethodTier::lookup(method).unwrap(),
            ZoneDefense::from_zones(zones),
        )
    }

    fn fight(
        machine: &RaidMachine,
        raid: &mut RaidAttempt,
        tactic: Tactic,
        dice: &mut FixedRolls,
    ) -> RaidStep {
        raid.choose_tactic(tactic).unwrap();
        machine.resolve(raid, dice).unwrap()
    }

    #[test]
    fn test_resolve_requires_tactic() {
        let machine = RaidMachine::new();
        let mut raid = raid("squad", vec![vec![GuardType::Normal]]);
        let mut dice = FixedRolls::always(0.0);

        let err = machine.resolve(&mut raid, &mut dice).unwrap_err();

        assert!(matches!(err, RaidError::WrongPhase { .. }));
        assert_eq!(raid.current_zone(), 0);
        assert_eq!(dice.consumed(), 0);
    }

    #[test]
    fn test_empty_zone_auto_clears_without_a_roll() {
        let machine = RaidMachine::new();
        let mut raid = raid("squad", vec![vec![], vec![GuardType::Normal]]);
        let mut dice = FixedRolls::always(0.0);

        let step = fight(&machine, &mut raid, Tactic::Defensive, &mut dice);

        assert_eq!(step, RaidStep::ZoneCleared { zone: 0 });
        assert_eq!(raid.current_zone(), 1);
        assert_eq!(raid.team_alive(), 5);
        assert_eq!(raid.phase(), RaidPhase::AwaitingTactic);
        assert_eq!(dice.consumed(), 0);
    }

    #[test]
    fn test_win_is_detected_on_the_following_call() {
        let machine = RaidMachine::new();
        let mut raid = raid("squad", vec![vec![GuardType::Normal]]);
        let mut dice = FixedRolls::always(0.0);

        let step = fight(&machine, &mut raid, Tactic::Aggressive, &mut dice);
        assert!(matches!(step, RaidStep::ZoneTaken { zone: 0, .. }));
        assert!(!step.is_terminal());
        assert!(raid.all_zones_cleared());

        let step = fight(&machine, &mut raid, Tactic::Aggressive, &mut dice);
        assert_eq!(
            step,
            RaidStep::Won {
                target: UserId::new("bob")
            }
        );
        assert!(step.is_terminal());
    }

    #[test]
    fn test_held_zone_is_retried() {
        let machine = RaidMachine::new();
        let mut raid = raid("army", vec![vec![GuardType::Sniper; 5]]);
        let mut dice = FixedRolls::always(0.99);

        let step = fight(&machine, &mut raid, Tactic::Defensive, &mut dice);

        match step {
            RaidStep::ZoneHeld {
                zone,
                losses,
                team_alive,
                ..
            } => {
                assert_eq!(zone, 0);
                assert_eq!(team_alive, 10 - losses);
            }
            other => panic!("unexpected step {:?}", other),
        }
        assert_eq!(raid.current_zone(), 0);
        assert_eq!(raid.zones().guards(0).map(|g| g.len()), Some(5));
        assert_eq!(raid.phase(), RaidPhase::AwaitingTactic);
    }

    #[test]
    fn test_solo_failure_is_terminal() {
        let machine = RaidMachine::new();
        let mut raid = raid("solo", vec![vec![GuardType::Normal]]);
        let mut dice = FixedRolls::always(0.99);

        let step = fight(&machine, &mut raid, Tactic::Aggressive, &mut dice);

        assert!(matches!(
            step,
            RaidStep::Failed {
                zone_taken: false,
                losses: 1,
                ..
            }
        ));
        assert_eq!(raid.team_alive(), 0);
    }

    #[test]
    fn test_solo_dies_even_when_taking_the_zone() {
        let machine = RaidMachine::new();
        let mut raid = raid("solo", vec![vec![GuardType::Normal], vec![]]);
        let mut dice = FixedRolls::always(0.0);

        let step = fight(&machine, &mut raid, Tactic::Aggressive, &mut dice);

        assert!(matches!(
            step,
            RaidStep::Failed {
                zone_taken: true,
                ..
            }
        ));
        assert_eq!(raid.current_zone(), 0);
    }

    #[test]
    fn test_team_and_zone_pointer_are_monotonic() {
        let machine = RaidMachine::new();
        let mut raid = raid(
            "regiment",
            vec![
                vec![GuardType::Sniper; 5],
                vec![],
                vec![GuardType::Shielder, GuardType::Normal],
                vec![GuardType::Sniper, GuardType::Sniper],
            ],
        );
        let mut dice = FixedRolls::new(vec![0.95, 0.05, 0.7, 0.2, 0.99, 0.1, 0.0]);
        let tactics = [Tactic::Aggressive, Tactic::Defensive];

        let mut team = raid.team_alive();
        let mut zone = raid.current_zone();
        for turn in 0..20 {
            let step = fight(&machine, &mut raid, tactics[turn % 2], &mut dice);
            assert!(raid.team_alive() <= team);
            assert!(raid.current_zone() >= zone);
            if let RaidStep::ZoneHeld { .. } = step {
                assert_eq!(raid.current_zone(), zone);
            }
            if step.is_terminal() {
                return;
            }
            team = raid.team_alive();
            zone = raid.current_zone();
        }
        panic!("raid never reached a terminal state");
    }
}
