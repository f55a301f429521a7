//! REPL Module
//!
//! The interactive prompt: reads lines, cleans them into words, dispatches
//! commands and prints their output. Command failures are reported and the
//! loop carries on.

mod commands;
mod input;
mod session;

use std::io::Write;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

use crate::error::Result;

pub use commands::{Command, CommandInfo, COMMANDS};
pub use input::clean_input;
pub use session::{CatchRoll, Flow, Session, CATCH_ROLL_RANGE};

/// Prompt printed before each line of input.
pub const PROMPT: &str = "Pokedex > ";

// == Run ==
/// Runs the prompt loop until `exit` or end of input.
pub async fn run<R, W>(session: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = clean_input(&line);
        if words.is_empty() {
            continue;
        }

        let Some(command) = Command::parse(&words) else {
            writeln!(out, "Unknown command")?;
            continue;
        };

        match session.execute(command, out).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => {
                warn!(command = %words[0], error = %err, "Command failed");
                writeln!(out, "{}", err)?;
            }
        }
    }

    Ok(())
}
