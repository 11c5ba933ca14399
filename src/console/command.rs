use crate::shared::{Direction, FloorRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Request { floor: i32, direction: Direction },
    Random,
    Status,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command '{0}', type 'help' for a list of commands.")]
    Unknown(String),

    #[error("Missing {0}. Usage: request <floor> <up|down>")]
    MissingArgument(&'static str),

    #[error("Floor '{0}' is not a number.")]
    InvalidFloor(String),

    #[error("Direction '{0}' is not recognised.")]
    UnknownDirection(String),
}

// Validation failures for a request that parsed fine
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("Floor must be between 1 and {max_floor}.")]
    FloorOutOfRange { floor: i32, max_floor: i32 },

    #[error("Direction must be Up or Down.")]
    InvalidDirection(Direction),
}

pub const HELP: &str = "Commands:
  request <floor> <up|down>   call an elevator
  random                      add a random request
  status                      print all elevators
  help                        show this message
  quit                        stop the simulation";

/// Parses one console line, `Ok(None)` for a blank line.
pub fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let keyword = match words.next() {
        Some(word) => word.to_lowercase(),
        None => return Ok(None),
    };

    let command = match keyword.as_str() {
        "request" => {
            let floor = words.next().ok_or(CommandError::MissingArgument("floor"))?;
            let floor = floor
                .parse::<i32>()
                .map_err(|_| CommandError::InvalidFloor(floor.to_string()))?;
            let direction = words.next().ok_or(CommandError::MissingArgument("direction"))?;
            Command::Request {
                floor,
                direction: parse_direction(direction)?,
            }
        }
        "random" => Command::Random,
        "status" => Command::Status,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(CommandError::Unknown(keyword)),
    };

    Ok(Some(command))
}

fn parse_direction(word: &str) -> Result<Direction, CommandError> {
    match word.to_lowercase().as_str() {
        "up" => Ok(Direction::Up),
        "down" => Ok(Direction::Down),
        "idle" => Ok(Direction::Idle),
        _ => Err(CommandError::UnknownDirection(word.to_string())),
    }
}

/**
 * Checks a request before it is handed to the dispatcher.
 *
 * The floor must lie in `[1, max_floor]` and the direction must be `Up` or
 * `Down`. The dispatcher itself trusts its input.
 */
pub fn validate_request(
    floor: i32,
    direction: Direction,
    max_floor: i32,
) -> Result<FloorRequest, RequestError> {
    if floor < 1 || floor > max_floor {
        return Err(RequestError::FloorOutOfRange { floor, max_floor });
    }
    if direction == Direction::Idle {
        return Err(RequestError::InvalidDirection(direction));
    }
    Ok(FloorRequest::new(floor, direction))
}
