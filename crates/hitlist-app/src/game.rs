//! Game - One place that turns a parsed command into a chat reply

use std::sync::Arc;

use hitlist_domain::{DebitOutcome, Ledger, UserId, ZoneSlots};
use hitlist_usecase::{
    BountyBoard, DefenseService, EconomyPorts, GameError, RaidService, DEFAULT_LISTING,
};
use shared::Money;
use tracing::error;

use crate::commands::Command;

pub struct Game {
    raids: RaidService,
    defense: DefenseService,
    board: BountyBoard,
    ledger: Arc<dyn Ledger>,
}

impl Game {
    pub fn new(raids: RaidService, defense: DefenseService, ports: &EconomyPorts) -> Self {
        Self {
            raids,
            defense,
            board: BountyBoard::new(ports),
            ledger: ports.ledger.clone(),
        }
    }

    /// Run one command; `None` means the message needs no answer
    pub fn execute(&self, user: &UserId, command: Command) -> Option<String> {
        match self.run(user, command) {
            Ok(reply) => reply,
            Err(e) => {
                if !e.is_rejection() {
                    error!(user = %user, error = %e, "command failed");
                }
                Some(format!("❌ {}", e))
            }
        }
    }

    fn run(&self, user: &UserId, command: Command) -> Result<Option<String>, GameError> {
        let reply = match command {
            Command::Assassinate { target, method } => {
                self.raids.initiate(user, &target, &method)?.narrative()
            }
            Command::Tactic(choice) => self.raids.choose_tactic_str(user, &choice)?.narrative(),
            Command::Chat(text) => {
                return match self.raids.handle_message(user, &text) {
                    Some(reply) => Ok(Some(reply?.narrative())),
                    None => Ok(None),
                };
            }
            Command::BuyGuard { amount, kind } => {
                let report = self.defense.hire_guards(user, amount, &kind)?;
                let mut reply = format!(
                    "🛡️ You hired {} {} guard(s) for {}.",
                    report.hired,
                    report.kind,
                    Money(report.charged)
                );
                if report.hired < amount as usize {
                    reply.push_str(&format!(
                        " Only {} fit within your {}-guard limit.",
                        report.hired, report.capacity
                    ));
                }
                reply
            }
            Command::BuyZoneSlot(slots) => {
                let tier = self.defense.buy_zone_slots(user, slots)?;
                format!(
                    "🗺️ You bought {} zone slots for {}.",
                    tier.count(),
                    Money(tier.price())
                )
            }
            Command::Guards => {
                let layout = self.defense.guard_layout(user)?;
                let mut lines = vec![format!(
                    "🛡️ {} guards across {} zones:",
                    layout.total(),
                    layout.zone_count
                )];
                lines.extend(
                    layout
                        .per_zone
                        .iter()
                        .enumerate()
                        .map(|(i, count)| format!("Zone {}: {} guard(s)", i + 1, count)),
                );
                if layout.unplaced > 0 {
                    lines.push(format!("Unposted: {} guard(s)", layout.unplaced));
                }
                lines.join("\n")
            }
            Command::Zones => {
                let layout = self.defense.guard_layout(user)?;
                let upgrades = [10, 15, 20]
                    .into_iter()
                    .filter_map(ZoneSlots::from_count)
                    .map(|tier| format!("{} zones: {}", tier.count(), Money(tier.price())))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "🗺️ You own {} zones. Upgrades: {}.",
                    layout.zone_count, upgrades
                )
            }
            Command::Bounty { target, amount } => {
                let total = self.board.place_bounty(user, &target, amount)?;
                format!(
                    "🎯 {} put {} on {}'s head. Total bounty: {}.",
                    user,
                    Money(amount),
                    target,
                    Money(total)
                )
            }
            Command::Bounties => {
                let top = self.board.top_bounties(DEFAULT_LISTING)?;
                if top.is_empty() {
                    "📜 There are no active bounties.".to_string()
                } else {
                    let mut lines = vec!["📜 Top bounties:".to_string()];
                    lines.extend(
                        top.iter()
                            .enumerate()
                            .map(|(i, (target, amount))| {
                                format!("{}. {}: {}", i + 1, target, Money(*amount))
                            }),
                    );
                    lines.join("\n")
                }
            }
            Command::Stats(who) => {
                let who = who.unwrap_or_else(|| user.clone());
                let stats = self.raids.assassination_stats(&who)?;
                format!(
                    "📊 {}: {} attempts, {} successful, {} failed.",
                    who, stats.attempts, stats.success, stats.fails
                )
            }
            Command::Money => {
                format!("💰 {} has {}.", user, Money(self.ledger.balance(user)?))
            }
            Command::Grant(amount) => {
                self.ledger.credit(user, amount)?;
                format!("💸 Granted {} to {}.", Money(amount), user)
            }
            Command::Pay { target, amount } => {
                if let DebitOutcome::Insufficient { available } =
                    self.ledger.transfer(user, &target, amount)?
                {
                    return Err(GameError::insufficient(amount, available));
                }
                format!("💸 {} paid {} to {}.", user, Money(amount), target)
            }
        };
        Ok(Some(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::parse_line;
    use hitlist_adapter::EconomyStore;
    use hitlist_domain::FixedRolls;

    fn game() -> Game {
        let ports = EconomyPorts::from_store(Arc::new(EconomyStore::in_memory()));
        Game::new(
            RaidService::new(ports.clone(), Box::new(FixedRolls::always(0.0))),
            DefenseService::new(ports.clone(), Box::new(FixedRolls::always(0.0))),
            &ports,
        )
    }

    fn say(game: &Game, line: &str) -> Option<String> {
        let (user, command) = parse_line(line).unwrap();
        game.execute(&user, command)
    }

    #[test]
    fn test_grant_pay_and_money() {
        let game = game();
        say(&game, "alice grant 1000");

        assert_eq!(
            say(&game, "alice pay bob 400").unwrap(),
            "💸 alice paid $400 to bob."
        );
        assert_eq!(say(&game, "bob money").unwrap(), "💰 bob has $400.");
        assert!(say(&game, "bob pay alice 401").unwrap().starts_with("❌ You need $401"));
    }

    #[test]
    fn test_raid_through_chat() {
        let game = game();
        say(&game, "alice grant 200000");
        say(&game, "bob grant 60000");
        say(&game, "bob buyguard 1 normal");
        say(&game, "alice bounty bob 10000");

        let start = say(&game, "alice assassinate bob squad").unwrap();
        assert!(start.contains("defensive zones"));

        assert_eq!(say(&game, "carol hello"), None);

        let mut reply = String::new();
        for _ in 0..6 {
            reply = say(&game, "alice charge").unwrap();
            if reply.contains("eliminated") {
                break;
            }
        }
        assert!(reply.contains("eliminated your target bob"));
        assert!(reply.contains("$10,000"));

        assert_eq!(say(&game, "bob money").unwrap(), "💰 bob has $0.");
        assert_eq!(
            say(&game, "alice stats").unwrap(),
            "📊 alice: 1 attempts, 1 successful, 0 failed."
        );
        assert_eq!(
            say(&game, "alice bounties").unwrap(),
            "📜 There are no active bounties."
        );
    }

    #[test]
    fn test_guard_layout_reply() {
        let game = game();
        say(&game, "dave grant 9000");
        say(&game, "dave buyguard 2");

        assert_eq!(
            say(&game, "dave guards").unwrap(),
            "🛡️ 2 guards across 5 zones:\nZone 1: 1 guard(s)\nZone 2: 1 guard(s)\nZone 3: 0 guard(s)\nZone 4: 0 guard(s)\nZone 5: 0 guard(s)"
        );
    }

    #[test]
    fn test_rejections_are_replied() {
        let game = game();

        assert_eq!(
            say(&game, "alice tactic charge").unwrap(),
            "❌ You don't have an active assassination raid."
        );
        assert!(say(&game, "alice buyzoneslot 12")
            .unwrap()
            .contains("10, 15 or 20"));
    }
}
