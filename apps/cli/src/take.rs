use std::io::Write;

use anyhow::{bail, Result};
use client_core::{Phase, QuizSession, ScoreRecorder};
use shared::domain::CardSide;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Drives `session` from line-based input: an empty line flips the card, `y`/`n` judge it.
/// Once every card is judged the score is submitted under `taker`, prompting for a name
/// until a non-empty one is given.
pub(crate) async fn run<R, I, W>(
    mut session: QuizSession,
    taker: Option<String>,
    recorder: &R,
    input: &mut I,
    output: &mut W,
) -> Result<u8>
where
    R: ScoreRecorder + ?Sized,
    I: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();

    while session.phase() == Phase::InProgress {
        let view = session.current_card()?;
        let side = match view.side() {
            CardSide::Front => "front",
            CardSide::Back => "back",
        };
        writeln!(
            output,
            "[{}/{}] {side}: {}",
            session.total() - session.remaining() + 1,
            session.total(),
            view.visible_text()
        )?;
        write!(output, "(Enter flips, y = correct, n = incorrect) > ")?;
        output.flush()?;

        let Some(line) = lines.next_line().await? else {
            bail!("input ended before the quiz was finished");
        };
        match line.trim() {
            "" => session.flip()?,
            "y" | "Y" => {
                session.judge(true)?;
            }
            "n" | "N" => {
                session.judge(false)?;
            }
            other => writeln!(output, "unrecognised answer '{other}'")?,
        }
    }

    let score = session.final_score()?;
    writeln!(
        output,
        "Finished {}: {} correct, {} incorrect, score {score}",
        session.deck_name(),
        session.correct(),
        session.incorrect()
    )?;

    let mut taker = taker.unwrap_or_default();
    while taker.is_empty() {
        write!(output, "Your name: ")?;
        output.flush()?;
        let Some(line) = lines.next_line().await? else {
            bail!("no test taker name given, score not saved");
        };
        taker = line;
    }

    session.submit(&taker, recorder).await?;
    writeln!(output, "{taker}'s score was saved")?;
    Ok(score)
}
