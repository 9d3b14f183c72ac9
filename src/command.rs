//! Controller commands
//!
//! One command per input line, mirroring the buttons of a windowed front
//! end: run, stop, new figure, change colors, faster, slower.

use std::str::FromStr;

use crate::consts::{MAX_COMMAND_SPEED, MAX_MANUAL_STEPS};
use crate::error::{Error, Result};
use crate::sim::ShapeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Run,
    Stop,
    /// Add a figure; None uses the configured velocity
    Add {
        shape: ShapeKind,
        velocity: Option<(i32, i32)>,
    },
    Colors,
    Faster,
    Slower,
    Resize { width: i32, height: i32 },
    /// Advance the given number of ticks by hand
    Step(u32),
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  run | stop               start or pause the animation
  ball | triangle | plus   add a figure with the default velocity
  add <shape> [dx dy]      add a figure with an explicit velocity
  colors                   give every figure a random color
  faster | slower          change every figure's speed by one
  resize <w> <h>           set the window size in pixels
  step [n]                 advance n ticks by hand (default 1)
  show                     draw the current frame
  help | quit";

impl Command {
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(Error::Command("empty line".to_string()));
        };
        let args: Vec<&str> = words.collect();

        let cmd = match head.to_lowercase().as_str() {
            "run" | "start" => Command::Run,
            "stop" | "pause" => Command::Stop,
            "ball" | "circle" | "triangle" | "plus" => Command::Add {
                shape: head.parse::<ShapeKind>()?,
                velocity: None,
            },
            "add" => {
                let shape: ShapeKind = args
                    .first()
                    .ok_or_else(|| Error::Command("add needs a shape".to_string()))?
                    .parse()?;
                let velocity: Option<(i32, i32)> = match &args[1..] {
                    [] => None,
                    [dx, dy] => Some((speed(dx)?, speed(dy)?)),
                    _ => return Err(Error::Command("add takes a shape and dx dy".to_string())),
                };
                return Ok(Command::Add { shape, velocity });
            }
            "colors" | "colours" => Command::Colors,
            "faster" => Command::Faster,
            "slower" => Command::Slower,
            "resize" => match args.as_slice() {
                [w, h] => {
                    return Ok(Command::Resize {
                        width: number::<i32>(w)?,
                        height: number::<i32>(h)?,
                    });
                }
                _ => return Err(Error::Command("resize takes a width and a height".to_string())),
            },
            "step" => {
                let n = match args.as_slice() {
                    [] => 1,
                    [n] => number::<u32>(n)?,
                    _ => return Err(Error::Command("step takes at most one count".to_string())),
                };
                if n > MAX_MANUAL_STEPS {
                    return Err(Error::Command(format!(
                        "step takes at most {MAX_MANUAL_STEPS} ticks"
                    )));
                }
                return Ok(Command::Step(n));
            }
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(Error::Command(format!("unknown command {other:?}"))),
        };

        if !args.is_empty() {
            return Err(Error::Command(format!("{head} takes no arguments")));
        }
        Ok(cmd)
    }
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Command::parse(s)
    }
}

fn number<T: FromStr>(word: &str) -> Result<T> {
    word.parse()
        .map_err(|_| Error::Command(format!("{word:?} is not a number")))
}

/// A velocity component within `MAX_COMMAND_SPEED` either way
fn speed(word: &str) -> Result<i32> {
    let d = number::<i32>(word)?;
    if d.unsigned_abs() > MAX_COMMAND_SPEED as u32 {
        return Err(Error::Command(format!(
            "speed {d} is outside -{MAX_COMMAND_SPEED}..={MAX_COMMAND_SPEED}"
        )));
    }
    Ok(d)
}
