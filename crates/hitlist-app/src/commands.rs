//! Chat command parsing
//!
//! Input lines look like `<user> <command> [args...]`. Command words may
//! carry the bot's `!` prefix. Anything that is not a known command is
//! free text, which doubles as a raw tactic during a raid.

use hitlist_domain::UserId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Assassinate { target: UserId, method: String },
    Tactic(String),
    BuyGuard { amount: u32, kind: String },
    BuyZoneSlot(u32),
    Guards,
    Zones,
    Bounty { target: UserId, amount: u64 },
    Bounties,
    Stats(Option<UserId>),
    Money,
    Grant(u64),
    Pay { target: UserId, amount: u64 },
    Chat(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("empty line")]
    Empty,

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("`{0}` is not a valid number.")]
    NotANumber(String),
}

/// Split a console line into its author and command
pub fn parse_line(line: &str) -> Result<(UserId, Command), CommandError> {
    let line = line.trim();
    let (user, rest) = match line.split_once(char::is_whitespace) {
        Some((user, rest)) => (user, rest.trim()),
        None if !line.is_empty() => (line, ""),
        None => return Err(CommandError::Empty),
    };
    Ok((UserId::new(user), parse_command(rest)?))
}

pub fn parse_command(text: &str) -> Result<Command, CommandError> {
    let args: Vec<&str> = text.split_whitespace().collect();
    let Some(word) = args.first() else {
        return Err(CommandError::Empty);
    };
    let word = word.trim_start_matches('!').to_ascii_lowercase();
    let args = &args[1..];

    let command = match word.as_str() {
        "assassinate" => match args {
            [target, method] => Command::Assassinate {
                target: mention(target),
                method: method.to_string(),
            },
            _ => return Err(CommandError::Usage("assassinate <target> <method>")),
        },
        "tactic" => match args {
            [choice] => Command::Tactic(choice.to_string()),
            _ => return Err(CommandError::Usage("tactic <siper|charge>")),
        },
        "buyguard" => match args {
            [] => Command::BuyGuard {
                amount: 1,
                kind: String::new(),
            },
            [amount] => Command::BuyGuard {
                amount: number(amount)?,
                kind: String::new(),
            },
            [amount, kind] => Command::BuyGuard {
                amount: number(amount)?,
                kind: kind.to_string(),
            },
            _ => return Err(CommandError::Usage("buyguard [amount] [normal|shielder|sniper]")),
        },
        "buyzoneslot" => match args {
            [slots] => Command::BuyZoneSlot(number(slots)?),
            _ => return Err(CommandError::Usage("buyzoneslot <10|15|20>")),
        },
        "guards" => Command::Guards,
        "zones" => Command::Zones,
        "bounty" => match args {
            [target, amount] => Command::Bounty {
                target: mention(target),
                amount: number(amount)?,
            },
            _ => return Err(CommandError::Usage("bounty <target> <amount>")),
        },
        "bounties" => Command::Bounties,
        "stats" => match args {
            [] => Command::Stats(None),
            [user] => Command::Stats(Some(mention(user))),
            _ => return Err(CommandError::Usage("stats [user]")),
        },
        "money" | "balance" => Command::Money,
        "grant" => match args {
            [amount] => Command::Grant(number(amount)?),
            _ => return Err(CommandError::Usage("grant <amount>")),
        },
        "pay" => match args {
            [target, amount] => Command::Pay {
                target: mention(target),
                amount: number(amount)?,
            },
            _ => return Err(CommandError::Usage("pay <target> <amount>")),
        },
        _ => Command::Chat(text.trim().to_string()),
    };
    Ok(command)
}

/// `@bob` and `bob` name the same player
fn mention(raw: &str) -> UserId {
    UserId::new(raw.trim_start_matches('@'))
}

fn number<T: std::str::FromStr>(raw: &str) -> Result<T, CommandError> {
    raw.replace([',', '_'], "")
        .parse()
        .map_err(|_| CommandError::NotANumber(raw.to_string()))
}
