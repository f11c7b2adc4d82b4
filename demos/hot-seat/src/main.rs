//! Two players, one terminal.
//!
//! Reads both names, both secrets, then alternating guesses from stdin
//! until someone cracks the other's code. Prints the final session as
//! JSON when the game ends.

use std::io::{self, BufRead, Write};

use codebreak::prelude::*;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
enum HotSeatError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Game(#[from] CodebreakError),

    #[error("input ended before the game finished")]
    InputClosed,
}

impl From<SessionError> for HotSeatError {
    fn from(e: SessionError) -> Self {
        Self::Game(e.into())
    }
}

// ---------------------------------------------------------------------------
// Game loop
// ---------------------------------------------------------------------------

/// Plays one game over `input`/`output` and returns the finished view.
async fn play<S, G, R, W>(
    engine: &SessionEngine<S, G>,
    input: &mut R,
    output: &mut W,
) -> Result<SessionView, HotSeatError>
where
    S: SessionStore,
    G: CodeGenerator,
    R: BufRead,
    W: Write,
{
    let name_a = prompt(input, output, "Player A, your name")?;
    let seat = engine.create_session(&name_a).await?;
    let room = seat.session_id;
    writeln!(output, "Room {room} created.")?;

    let name_b = prompt(input, output, "Player B, your name")?;
    engine.join_session(&room, &name_b).await?;

    let names = [label(&name_a, Slot::A), label(&name_b, Slot::B)];

    for slot in Slot::ALL {
        loop {
            let ask = format!("{}, pick a secret", names[slot.index()]);
            let secret = prompt(input, output, &ask)?;
            match engine.submit_secret(&room, slot, &secret).await {
                Ok(_) => break,
                Err(SessionError::InvalidSecret(reason)) => {
                    writeln!(output, "  {reason}")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    let mut turn = Slot::A;
    loop {
        let ask = format!("{}, your guess", names[turn.index()]);
        let guess = prompt(input, output, &ask)?;

        let result = match engine.submit_guess(&room, turn, &guess).await {
            Ok(result) => result,
            Err(SessionError::InvalidGuess(reason)) => {
                writeln!(output, "  {reason}")?;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        writeln!(output, "  {}", result.score())?;
        match result.outcome {
            GuessOutcome::Continue { next_turn } => turn = next_turn,
            GuessOutcome::Won { winner, secrets, .. } => {
                writeln!(
                    output,
                    "{} wins! Secrets were {} (A) and {} (B).",
                    names[winner.index()],
                    secrets.a,
                    secrets.b
                )?;
                break;
            }
        }
    }

    Ok(engine.get_session(&room).await?)
}

/// Prints `label`, reads one line, and returns it trimmed.
fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
) -> Result<String, HotSeatError> {
    write!(output, "{label}: ")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(HotSeatError::InputClosed);
    }
    Ok(line.trim().to_string())
}

/// A blank name falls back to the slot letter.
fn label(name: &str, slot: Slot) -> String {
    if name.is_empty() {
        format!("Player {slot}")
    } else {
        name.to_string()
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let engine = EngineBuilder::new().build()?;
    let mut input = io::stdin().lock();
    let mut output = io::stdout().lock();

    let view = play(&engine, &mut input, &mut output).await?;

    let json = JsonCodec.encode(&view)?;
    output.write_all(&json)?;
    writeln!(output)?;
    Ok(())
}
