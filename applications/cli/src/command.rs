//! Line commands accepted by the interactive player

use crate::error::CliError;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the episode catalogue
    List,
    /// Play one catalogue episode on its own
    Play(usize),
    /// Queue the whole catalogue starting at an episode
    Queue(usize),
    Next,
    Prev,
    Toggle,
    Loop,
    Shuffle,
    /// Seek to whole seconds
    Seek(u64),
    /// Advance the simulated clock
    Tick(f64),
    /// Media-key pause from outside the player
    ExternalPause,
    /// Media-key resume from outside the player
    ExternalResume,
    /// Break a catalogue episode's source
    Fail(usize),
    /// Raise a playback error on the current handle
    Crash,
    /// Try the current unplayable episode again
    Retry,
    Show,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  list              show the episode catalogue
  play <n>          play catalogue episode n on its own
  queue <n>         queue the whole catalogue starting at episode n
  next | prev       move through the queue
  toggle            play / pause
  loop | shuffle    toggle loop / shuffle
  seek <secs>       jump to a position
  tick <secs>       let the simulated clock run
  pause-ext         pause from outside the player (media key)
  resume-ext        resume from outside the player (media key)
  fail <n>          make catalogue episode n fail to load
  crash             raise a playback error on the current episode
  retry             try an unplayable episode again
  show | json       print the player
  help | quit";

impl FromStr for Command {
    type Err = CliError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let Some(name) = parts.next() else {
            return Err(CliError::Command("empty line".to_string()));
        };
        let arg = parts.next();

        if parts.next().is_some() {
            return Err(CliError::Command(format!("too many arguments: {}", line)));
        }

        let command = match (name, arg) {
            ("list", None) => Command::List,
            ("play", Some(n)) => Command::Play(parse_arg(name, n)?),
            ("queue", Some(n)) => Command::Queue(parse_arg(name, n)?),
            ("next", None) => Command::Next,
            ("prev", None) => Command::Prev,
            ("toggle", None) => Command::Toggle,
            ("loop", None) => Command::Loop,
            ("shuffle", None) => Command::Shuffle,
            ("seek", Some(secs)) => Command::Seek(parse_arg(name, secs)?),
            ("tick", Some(secs)) => {
                let secs: f64 = parse_arg(name, secs)?;
                if !secs.is_finite() || secs < 0.0 {
                    return Err(CliError::Command(format!("tick: bad duration {}", secs)));
                }
                Command::Tick(secs)
            }
            ("pause-ext", None) => Command::ExternalPause,
            ("resume-ext", None) => Command::ExternalResume,
            ("fail", Some(n)) => Command::Fail(parse_arg(name, n)?),
            ("crash", None) => Command::Crash,
            ("retry", None) => Command::Retry,
            ("show", None) => Command::Show,
            ("json", None) => Command::Json,
            ("help", None) => Command::Help,
            ("quit" | "exit", None) => Command::Quit,
            _ => return Err(CliError::Command(line.trim().to_string())),
        };

        Ok(command)
    }
}

fn parse_arg<T: FromStr>(command: &str, raw: &str) -> Result<T, CliError> {
    raw.parse()
        .map_err(|_| CliError::Command(format!("{}: bad argument {:?}", command, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_commands() {
        assert_eq!("next".parse::<Command>().unwrap(), Command::Next);
        assert_eq!("  toggle ".parse::<Command>().unwrap(), Command::Toggle);
        assert_eq!("exit".parse::<Command>().unwrap(), Command::Quit);
    }

    #[test]
    fn parses_arguments() {
        assert_eq!("queue 2".parse::<Command>().unwrap(), Command::Queue(2));
        assert_eq!("seek 90".parse::<Command>().unwrap(), Command::Seek(90));
        assert_eq!("tick 1.5".parse::<Command>().unwrap(), Command::Tick(1.5));
    }

    #[test]
    fn rejects_bad_input() {
        assert!("".parse::<Command>().is_err());
        assert!("play".parse::<Command>().is_err());
        assert!("play x".parse::<Command>().is_err());
        assert!("next 1".parse::<Command>().is_err());
        assert!("seek -4".parse::<Command>().is_err());
        assert!("tick -1".parse::<Command>().is_err());
        assert!("tick 1 2".parse::<Command>().is_err());
        assert!("dance".parse::<Command>().is_err());
    }
}
