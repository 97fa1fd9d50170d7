use crate::config::parse_point;
use crate::flight_control::{common::GeoPoint, plane::Stamp};
use crate::mode_control::ClaimError;
use std::str::FromStr;
use strum_macros::{Display, EnumIter, EnumString};

/// The first word of a console line.
#[derive(Debug, Display, EnumString, EnumIter, PartialEq, Eq, Clone, Copy)]
#[strum(serialize_all = "lowercase")]
pub enum ConsoleVerb {
    Pos,
    Nearby,
    List,
    Mine,
    Catch,
    Create,
    Heading,
    Stamp,
    Send,
    Cancel,
    State,
    Dump,
    #[strum(serialize = "quit", serialize = "exit")]
    Quit,
}

/// What a position command does to the sensor.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum PositionUpdate {
    Show,
    Report(GeoPoint),
    Lose,
}

/// A parsed console line.
#[derive(Debug, PartialEq, Clone)]
pub enum ConsoleCommand {
    Position(PositionUpdate),
    Nearby,
    List,
    Mine,
    Catch,
    Create,
    Heading(f64),
    Stamp(Stamp),
    Send,
    Cancel,
    State,
    Dump,
    Quit,
}

#[derive(Debug, Display, PartialEq)]
pub enum ConsoleError {
    Empty,
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadArgument(String),
    Claim(ClaimError),
    Dump(String),
}

impl std::error::Error for ConsoleError {}

impl From<ClaimError> for ConsoleError {
    fn from(value: ClaimError) -> Self { ConsoleError::Claim(value) }
}

impl FromStr for ConsoleCommand {
    type Err = ConsoleError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line.is_empty() {
            return Err(ConsoleError::Empty);
        }
        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let verb = ConsoleVerb::from_str(&verb.to_lowercase())
            .map_err(|_| ConsoleError::UnknownCommand(verb.to_string()))?;
        let command = match verb {
            ConsoleVerb::Pos => ConsoleCommand::Position(match rest {
                "" => PositionUpdate::Show,
                "none" | "lost" => PositionUpdate::Lose,
                point => PositionUpdate::Report(
                    parse_point(point).ok_or_else(|| ConsoleError::BadArgument(point.to_string()))?,
                ),
            }),
            ConsoleVerb::Nearby => ConsoleCommand::Nearby,
            ConsoleVerb::List => ConsoleCommand::List,
            ConsoleVerb::Mine => ConsoleCommand::Mine,
            ConsoleVerb::Catch => ConsoleCommand::Catch,
            ConsoleVerb::Create => ConsoleCommand::Create,
            ConsoleVerb::Heading => ConsoleCommand::Heading(number(first_word(rest, "heading")?)?),
            ConsoleVerb::Stamp => ConsoleCommand::Stamp(parse_stamp(rest)?),
            ConsoleVerb::Send => ConsoleCommand::Send,
            ConsoleVerb::Cancel => ConsoleCommand::Cancel,
            ConsoleVerb::State => ConsoleCommand::State,
            ConsoleVerb::Dump => ConsoleCommand::Dump,
            ConsoleVerb::Quit => ConsoleCommand::Quit,
        };
        Ok(command)
    }
}

fn first_word<'a>(rest: &'a str, name: &'static str) -> Result<&'a str, ConsoleError> {
    rest.split_whitespace().next().ok_or(ConsoleError::MissingArgument(name))
}

fn number<T: FromStr>(word: &str) -> Result<T, ConsoleError> {
    word.parse().map_err(|_| ConsoleError::BadArgument(word.to_string()))
}

/// `stamp <x> <y> <angle> <variant> <text...>`
fn parse_stamp(rest: &str) -> Result<Stamp, ConsoleError> {
    let mut remaining = rest;
    let mut next = |name: &'static str| {
        let trimmed = remaining.trim_start();
        if trimmed.is_empty() {
            return Err(ConsoleError::MissingArgument(name));
        }
        let (word, tail) = trimmed.split_once(char::is_whitespace).unwrap_or((trimmed, ""));
        remaining = tail;
        Ok(word)
    };
    let x: f64 = number(next("x")?)?;
    let y: f64 = number(next("y")?)?;
    let angle: f64 = number(next("angle")?)?;
    let variant: i64 = number(next("variant")?)?;
    let text = remaining.trim();
    if text.is_empty() {
        return Err(ConsoleError::MissingArgument("text"));
    }
    if ![x, y, angle].iter().all(|v| v.is_finite()) {
        return Err(ConsoleError::BadArgument(rest.to_string()));
    }
    Ok(Stamp::new(x, y, angle, text, variant))
}
