//! Line-oriented terminal shell over a `GameSession`.
//!
//! Reads one command per line, forwards it to the session, and prints the new state.
//! Refused actions print a short reason; they never end the shell.

use std::io::{self, BufRead, Write};

use serde::Serialize;

use ym_core::leaderboard::{self, LeaderboardEntry, ScoreStore};
use ym_core::{Category, GameSession, RULESET_ID};
use ym_logging::{
    new_session_id, now_ms, GameOverEventV1, NdjsonWriter, SessionEventV1, VersionInfoV1,
};

use crate::render;

pub struct PlayOptions {
    pub player: String,
    pub store: Box<dyn ScoreStore>,
    pub capacity: usize,
    pub events: Option<NdjsonWriter>,
}

enum Command {
    Roll,
    Hold(Vec<usize>),
    Score(Category),
    Hint,
    Auto,
    Card,
    Top,
    Reset,
    Help,
    Quit,
}

fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = parts.collect();
    let cmd = match head.to_ascii_lowercase().as_str() {
        "r" | "roll" => Command::Roll,
        "h" | "hold" => {
            if rest.is_empty() {
                return Err("usage: hold <die> [<die>...]  (dice are numbered 1-5)".to_string());
            }
            let mut idxs = Vec::with_capacity(rest.len());
            for t in &rest {
                match t.parse::<usize>() {
                    Ok(n) if (1..=5).contains(&n) => idxs.push(n - 1),
                    _ => return Err(format!("invalid die: {} (expected 1-5)", t)),
                }
            }
            Command::Hold(idxs)
        }
        "s" | "score" => {
            if rest.is_empty() {
                return Err("usage: score <category>  (see `help`)".to_string());
            }
            let name = rest.join(" ");
            let cat = name.parse::<Category>().map_err(|e| e.to_string())?;
            Command::Score(cat)
        }
        "hint" | "?" => Command::Hint,
        "auto" => Command::Auto,
        "card" | "c" => Command::Card,
        "top" => Command::Top,
        "reset" | "new" => Command::Reset,
        "help" => Command::Help,
        "q" | "quit" | "exit" => Command::Quit,
        other => return Err(format!("unknown command: {} (try `help`)", other)),
    };
    Ok(Some(cmd))
}

fn help_text() -> String {
    format!(
        r#"Commands:
  roll | r               roll all unheld dice
  hold | h <1-5>...      toggle hold on dice
  score | s <category>   score the dice (row number, key, or name)
  hint | ?               best category and suggested holds
  auto                   apply the suggested holds
  card | c               show the scorecard
  top                    show the leaderboard
  reset | new            start over
  quit | q               leave
Categories:
{}"#,
        render::categories_help()
    )
}

struct EventLog {
    writer: Option<NdjsonWriter>,
    session_id: String,
}

impl EventLog {
    fn action(
        &mut self,
        s: &GameSession,
        event: &'static str,
        applied: bool,
        die: Option<usize>,
        category: Option<Category>,
        score: Option<u32>,
    ) {
        let snap = s.snapshot();
        let e = SessionEventV1 {
            event,
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            session_id: self.session_id.clone(),
            turn: snap.turn,
            roll_count: snap.roll_count,
            dice: snap.dice,
            held: snap.held,
            applied,
            die,
            category: category.map(|c| c.key()),
            score,
            total: snap.total,
        };
        self.write(&e);
    }

    fn game_over(&mut self, s: &GameSession, player: &str, rank: Option<usize>) {
        let snap = s.snapshot();
        let e = GameOverEventV1 {
            event: "game_over",
            ts_ms: now_ms(),
            v: VersionInfoV1::new(RULESET_ID),
            session_id: self.session_id.clone(),
            player: player.to_string(),
            slots: snap.slots,
            upper_bonus: snap.upper_bonus,
            yahtzee_bonus: snap.yahtzee_bonus,
            total: snap.total,
            rank,
        };
        self.write(&e);
    }

    fn write<T: Serialize>(&mut self, e: &T) {
        let Some(w) = self.writer.as_mut() else {
            return;
        };
        if let Err(err) = w.write_event(e) {
            eprintln!("warning: disabling event log: {}", err);
            self.writer = None;
        }
    }

    fn close(&mut self) {
        if let Some(w) = self.writer.as_mut() {
            if let Err(err) = w.flush() {
                eprintln!("warning: failed to flush event log: {}", err);
            }
        }
    }
}

/// Record the final score. Store failures are reported and otherwise ignored.
fn finish_game<W: Write>(
    out: &mut W,
    s: &GameSession,
    opts: &PlayOptions,
    log: &mut EventLog,
) -> io::Result<()> {
    let entry = LeaderboardEntry {
        name: opts.player.clone(),
        score: s.total(),
        timestamp: now_ms(),
    };
    let rank = match leaderboard::record_score(opts.store.as_ref(), entry, opts.capacity) {
        Ok(rank) => rank,
        Err(e) => {
            eprintln!("warning: could not update leaderboard: {}", e);
            None
        }
    };
    log.game_over(s, &opts.player, rank);

    writeln!(out, "{}", render::status_line(s))?;
    if let Some(r) = rank {
        writeln!(out, "New high score! Rank #{}", r + 1)?;
    }
    writeln!(out, "Type `reset` to play again or `quit` to leave.")?;
    Ok(())
}

/// Run the shell until `quit` or end of input. Returns the session total at exit.
pub fn run<R: BufRead, W: Write>(
    input: R,
    out: &mut W,
    mut session: GameSession,
    mut opts: PlayOptions,
) -> io::Result<u32> {
    let mut log = EventLog {
        writer: opts.events.take(),
        session_id: new_session_id(),
    };

    writeln!(out, "Yahtzee Mini - type `help` for commands.")?;
    writeln!(out, "{}", render::dice_line(&session))?;
    writeln!(out, "{}", render::status_line(&session))?;

    for line in input.lines() {
        let line = line?;
        let cmd = match parse_command(&line) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(msg) => {
                writeln!(out, "{}", msg)?;
                continue;
            }
        };

        match cmd {
            Command::Quit => break,
            Command::Help => write!(out, "{}", help_text())?,
            Command::Card => write!(out, "{}", render::scorecard(&session))?,
            Command::Hint => writeln!(out, "{}", render::hint(&session))?,
            Command::Top => {
                let entries = opts.store.load_top_scores().unwrap_or_else(|e| {
                    eprintln!("warning: could not read leaderboard: {}", e);
                    Vec::new()
                });
                write!(out, "{}", render::leaderboard(&entries))?;
            }
            Command::Roll => {
                let applied = session.roll();
                log.action(&session, "roll", applied, None, None, None);
                if !applied {
                    if session.is_game_over() {
                        writeln!(out, "Game over - type `reset`.")?;
                        continue;
                    }
                    writeln!(out, "No rolls left - score a category.")?;
                }
                writeln!(out, "{}", render::dice_line(&session))?;
                writeln!(out, "{}", render::status_line(&session))?;
            }
            Command::Hold(idxs) => {
                for i in idxs {
                    let applied = session.toggle_hold(i);
                    log.action(&session, "hold", applied, Some(i), None, None);
                    if !applied {
                        writeln!(out, "Cannot change holds now.")?;
                        break;
                    }
                }
                writeln!(out, "{}", render::dice_line(&session))?;
            }
            Command::Auto => {
                let applied = session.set_holds(session.suggested_holds());
                log.action(&session, "hold", applied, None, None, None);
                if !applied {
                    writeln!(out, "Cannot change holds now.")?;
                }
                writeln!(out, "{}", render::dice_line(&session))?;
            }
            Command::Score(cat) => {
                let result = session.commit_score(cat);
                log.action(&session, "commit", result.is_some(), None, Some(cat), result);
                match result {
                    Some(v) => {
                        writeln!(out, "Scored {} in {}.", v, cat)?;
                        if session.is_game_over() {
                            write!(out, "{}", render::scorecard(&session))?;
                            finish_game(out, &session, &opts, &mut log)?;
                        } else {
                            writeln!(out, "{}", render::dice_line(&session))?;
                            writeln!(out, "{}", render::status_line(&session))?;
                        }
                    }
                    None if session.scorecard().is_filled(cat) => {
                        writeln!(out, "{} is already scored.", cat)?;
                    }
                    None => writeln!(out, "Roll at least once before scoring.")?,
                }
            }
            Command::Reset => {
                session.reset();
                log.action(&session, "reset", true, None, None, None);
                writeln!(out, "New game.")?;
                writeln!(out, "{}", render::dice_line(&session))?;
                writeln!(out, "{}", render::status_line(&session))?;
            }
        }
    }

    log.close();
    out.flush()?;
    Ok(session.total())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use ym_core::{ChanceMode, HoldPolicy, MemoryStore, ALL};

    fn opts() -> PlayOptions {
        PlayOptions {
            player: "tester".to_string(),
            store: Box::new(MemoryStore::new()),
            capacity: 5,
            events: None,
        }
    }

    fn run_script(faces: &[u8], script: &str) -> (String, u32) {
        let session =
            GameSession::new(HoldPolicy::default(), ChanceMode::scripted(faces.to_vec()));
        let mut out = Vec::new();
        let total = run(Cursor::new(script.to_string()), &mut out, session, opts()).unwrap();
        (String::from_utf8(out).unwrap(), total)
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert!(parse_command("hold 0").is_err());
        assert!(parse_command("hold 6").is_err());
        assert!(parse_command("hold").is_err());
        assert!(parse_command("score pair").is_err());
        assert!(parse_command("dance").is_err());
        assert!(matches!(parse_command("   "), Ok(None)));
        assert!(matches!(
            parse_command("s Three of a Kind"),
            Ok(Some(Command::Score(Category::ThreeOfAKind)))
        ));
    }

    #[test]
    fn roll_then_score_three_of_a_kind() {
        let (out, total) = run_script(&[6, 6, 6, 6, 6, 1, 1, 1, 4, 5], "r\ns 7\nq\n");
        assert!(out.contains("Scored 12 in Three of a Kind."), "{}", out);
        assert_eq!(total, 12);
    }

    #[test]
    fn refusals_are_reported_not_fatal() {
        let (out, total) = run_script(&[2], "s chance\nr\nr\nr\nr\nh 1\ns chance\ns chance\nq\n");
        assert!(out.contains("Roll at least once before scoring."));
        assert!(out.contains("No rolls left - score a category."));
        assert!(out.contains("Cannot change holds now."));
        assert!(out.contains("Scored 10 in Chance."));
        assert_eq!(total, 10);
    }

    #[test]
    fn full_game_reaches_game_over_and_records_score() {
        let mut script = String::new();
        for c in ALL {
            script.push_str(&format!("r\ns {}\n", c.key()));
        }
        script.push_str("top\n");
        let (out, total) = run_script(&[3], &script);
        assert!(out.contains("Game over! Final score:"), "{}", out);
        assert!(out.contains("New high score! Rank #1"));
        assert!(out.contains("tester"));
        assert!(total > 0);
    }

    #[test]
    fn roll_after_game_over_points_to_reset() {
        let mut script = String::new();
        for c in ALL {
            script.push_str(&format!("r\ns {}\n", c.key()));
        }
        script.push_str("r\n");
        let (out, _) = run_script(&[4], &script);
        assert!(out.trim_end().ends_with("Game over - type `reset`."), "{}", out);
        assert!(!out.contains("No rolls left"));
    }
}
