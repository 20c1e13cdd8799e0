use scoring::models::side::Side;
use std::str::FromStr;

/// One operator input, as written in an event script.
///
/// ```text
/// # comments and blank lines are ignored
/// 1          point to player one
/// 2          point to player two
/// suspend
/// resume
/// finish 2   operator ends the match, player two wins
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorEvent {
    Point(Side),
    Suspend,
    Resume,
    Finish(Side),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventParseError(pub String);

impl std::fmt::Display for EventParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid event: {}", self.0)
    }
}

impl std::error::Error for EventParseError {}

fn parse_side(value: &str) -> Result<Side, EventParseError> {
    let player = value
        .parse::<u8>()
        .map_err(|_| EventParseError(format!("not a player number: {}", value)))?;
    Side::try_from(player).map_err(|e| EventParseError(e.to_string()))
}

impl FromStr for OperatorEvent {
    type Err = EventParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let event = match (words.next(), words.next()) {
            (Some("suspend"), None) => OperatorEvent::Suspend,
            (Some("resume"), None) => OperatorEvent::Resume,
            (Some("finish"), Some(player)) => OperatorEvent::Finish(parse_side(player)?),
            (Some(player), None) => OperatorEvent::Point(parse_side(player)?),
            _ => return Err(EventParseError(line.trim().to_string())),
        };
        if words.next().is_some() {
            return Err(EventParseError(line.trim().to_string()));
        }
        Ok(event)
    }
}

/// Parses a whole script, reporting the first bad line by number.
pub fn parse_script(script: &str) -> Result<Vec<OperatorEvent>, EventParseError> {
    script
        .lines()
        .enumerate()
        .map(|(index, line)| (index + 1, line.split('#').next().unwrap_or("").trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(number, line)| {
            line.parse()
                .map_err(|e: EventParseError| EventParseError(format!("line {}: {}", number, e.0)))
        })
        .collect()
}
