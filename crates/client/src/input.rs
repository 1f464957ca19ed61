//! Input processing for the terminal client.
//!
//! Owns the line-to-command mapping so the rest of the client stays agnostic
//! about concrete key bindings.

use turn_core::EntityId;
use turn_runtime::{ArenaCommand, RegionId};

/// High-level outcome of processing one input line.
#[derive(Debug, PartialEq, Eq)]
pub enum LineAction {
    /// Exit the application.
    Quit,
    /// Submit the decoded command to the runtime.
    Submit(ArenaCommand),
    /// No meaningful command was produced.
    None,
}

/// Translates input lines into arena commands.
pub struct InputHandler {
    /// Entity `x` strikes at when no target is given.
    default_target: EntityId,
}

impl InputHandler {
    pub fn new(default_target: EntityId) -> Self {
        Self { default_target }
    }

    pub fn handle_line(&self, line: &str) -> LineAction {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return LineAction::None;
        };
        let arg = words.next().and_then(|raw| raw.parse::<u32>().ok());

        let command = match head.to_ascii_lowercase().as_str() {
            "q" | "quit" => return LineAction::Quit,
            "h" | "a" | "left" => ArenaCommand::Step { delta: -1 },
            "l" | "d" | "right" => ArenaCommand::Step { delta: 1 },
            "." | "wait" => ArenaCommand::Wait,
            "x" | "strike" => ArenaCommand::Strike {
                target: arg.map_or(self.default_target, EntityId),
            },
            "z" | "dodge" => ArenaCommand::Dodge,
            "t" | "travel" => match arg {
                Some(region) => ArenaCommand::Travel {
                    region: RegionId(region),
                },
                None => return LineAction::None,
            },
            "r" | "rest" => ArenaCommand::Rest {
                turns: arg.map_or(1, |turns| turns.clamp(1, u32::from(u8::MAX)) as u8),
            },
            _ => return LineAction::None,
        };

        LineAction::Submit(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(EntityId(1))
    }

    #[test]
    fn movement_keys_map_to_steps() {
        assert_eq!(
            handler().handle_line("h"),
            LineAction::Submit(ArenaCommand::Step { delta: -1 })
        );
        assert_eq!(
            handler().handle_line("RIGHT"),
            LineAction::Submit(ArenaCommand::Step { delta: 1 })
        );
    }

    #[test]
    fn strike_defaults_to_nearest_foe() {
        assert_eq!(
            handler().handle_line("x"),
            LineAction::Submit(ArenaCommand::Strike {
                target: EntityId(1)
            })
        );
        assert_eq!(
            handler().handle_line("strike 3"),
            LineAction::Submit(ArenaCommand::Strike {
                target: EntityId(3)
            })
        );
    }

    #[test]
    fn travel_needs_a_region() {
        assert_eq!(handler().handle_line("t"), LineAction::None);
        assert_eq!(
            handler().handle_line("travel 2"),
            LineAction::Submit(ArenaCommand::Travel {
                region: RegionId(2)
            })
        );
    }

    #[test]
    fn blank_and_unknown_lines_are_ignored() {
        assert_eq!(handler().handle_line("   "), LineAction::None);
        assert_eq!(handler().handle_line("dance"), LineAction::None);
        assert_eq!(handler().handle_line("q"), LineAction::Quit);
    }
}
