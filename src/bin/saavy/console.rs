//! Line commands typed while the machine runs.

use std::str::FromStr;

use saavy_rhythm::{sequencing::PatternSlot, voices::ParamKind, Instrument};

pub const HELP: &str = "\
commands:
  play | stop              start or stop the transport
  slot <A-H>               select a pattern memory
  step <code> <0-15>       toggle a step (e.g. `step BD 4`)
  accent <0-15>            toggle an accent
  clear <code>             clear an instrument row
  set <code> <knob> <v>    turn a knob (level tone decay tuning snappy)
  reset <code>             factory settings for one voice
  tempo <bpm>              set the current pattern's tempo
  show                     print the current pattern
  save <path>              write the bank as JSON
  help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Stop,
    Slot(PatternSlot),
    Step(Instrument, usize),
    Accent(usize),
    Clear(Instrument),
    Set(Instrument, ParamKind, f32),
    Reset(Instrument),
    Tempo(f64),
    Show,
    Save(String),
    Help,
    Quit,
}

fn knob(s: &str) -> Result<ParamKind, String> {
    match s.to_ascii_lowercase().as_str() {
        "level" => Ok(ParamKind::Level),
        "tone" => Ok(ParamKind::Tone),
        "decay" => Ok(ParamKind::Decay),
        "tuning" | "tune" => Ok(ParamKind::Tuning),
        "snappy" => Ok(ParamKind::Snappy),
        _ => Err(format!("unknown knob {s:?}")),
    }
}

fn number<T: FromStr>(s: Option<&str>, what: &str) -> Result<T, String> {
    let s = s.ok_or_else(|| format!("missing {what}"))?;
    s.parse().map_err(|_| format!("bad {what} {s:?}"))
}

fn instrument(s: Option<&str>) -> Result<Instrument, String> {
    let s = s.ok_or("missing instrument code")?;
    s.parse().map_err(|e| format!("{e}"))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err("empty command".into());
        };

        let command = match head.to_ascii_lowercase().as_str() {
            "play" | "p" => Command::Play,
            "stop" | "s" => Command::Stop,
            "slot" => {
                let slot = words.next().ok_or("missing slot")?;
                Command::Slot(slot.parse().map_err(|e| format!("{e}"))?)
            }
            "step" => Command::Step(instrument(words.next())?, number(words.next(), "step")?),
            "accent" => Command::Accent(number(words.next(), "step")?),
            "clear" => Command::Clear(instrument(words.next())?),
            "set" => {
                let inst = instrument(words.next())?;
                let kind = knob(words.next().ok_or("missing knob")?)?;
                Command::Set(inst, kind, number(words.next(), "value")?)
            }
            "reset" => Command::Reset(instrument(words.next())?),
            "tempo" | "bpm" => Command::Tempo(number(words.next(), "tempo")?),
            "show" => Command::Show,
            "save" => Command::Save(words.next().ok_or("missing path")?.to_string()),
            "help" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(format!("unknown command {other:?}, try `help`")),
        };

        match words.next() {
            Some(extra) => Err(format!("unexpected {extra:?}")),
            None => Ok(command),
        }
    }
}
