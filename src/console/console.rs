/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{info, warn};
use std::io::BufRead;
use std::sync::Arc;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::console::command::{self, Command};
use crate::dispatcher::Dispatcher;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Message(String),
    Quit,
    Nothing,
}

/**
 * Line-based front end to the dispatcher.
 *
 * Requests are validated here before they reach the dispatcher. `quit` sends
 * on the terminate channel shared with the simulation driver.
 *
 * # Fields
 * - `dispatcher`:      Shared with the simulation driver.
 * - `max_floor`:       Top floor accepted in a request.
 * - `terminate_tx`:    Stops the simulation driver.
 */
pub struct Console {
    dispatcher: Arc<Dispatcher>,
    max_floor: i32,
    terminate_tx: cbc::Sender<()>,
}

impl Console {
    pub fn new(
        dispatcher: Arc<Dispatcher>,
        max_floor: i32,
        terminate_tx: cbc::Sender<()>,
    ) -> Console {
        Console {
            dispatcher,
            max_floor,
            terminate_tx,
        }
    }

    // Reads commands until `quit` or end of input
    pub fn run<R: BufRead>(self, input: R) {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Failed to read console input: {}", e);
                    break;
                }
            };

            match self.handle_line(&line) {
                Reply::Message(message) => println!("{}", message),
                Reply::Quit => break,
                Reply::Nothing => (),
            }
        }
    }

    pub fn handle_line(&self, line: &str) -> Reply {
        let command = match command::parse_command(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Reply::Nothing,
            Err(e) => return Reply::Message(e.to_string()),
        };

        match command {
            Command::Request { floor, direction } => {
                match command::validate_request(floor, direction, self.max_floor) {
                    Ok(request) => {
                        self.dispatcher.submit_request(request);
                        Reply::Message(format!(
                            "Request added: {} at floor {}",
                            request.direction, request.floor
                        ))
                    }
                    Err(e) => {
                        warn!("Rejected request {} at floor {}: {}", direction, floor, e);
                        Reply::Message(e.to_string())
                    }
                }
            }
            Command::Random => {
                let request = self.dispatcher.generate_random_request(self.max_floor);
                Reply::Message(format!(
                    "Request added: {} at floor {}",
                    request.direction, request.floor
                ))
            }
            Command::Status => {
                let elevators = self.dispatcher.get_elevators();
                match serde_json::to_string_pretty(&elevators) {
                    Ok(status) => Reply::Message(status),
                    Err(e) => {
                        Reply::Message(format!("Failed to serialize elevator status: {}", e))
                    }
                }
            }
            Command::Help => Reply::Message(command::HELP.to_string()),
            Command::Quit => {
                info!("Quit requested from console");
                let _ = self.terminate_tx.send(());
                Reply::Quit
            }
        }
    }
}
