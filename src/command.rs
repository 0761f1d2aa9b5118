use std::str::FromStr;

use crate::model::Id;

pub const HELP: &str = "\
Commands:
  users                        reload the roster
  whoami                       resolve the current session again
  feed                         reload the feed
  login <user-id>              log in as a user from the roster
  logout                       log out
  send <recipient-id> [text]   send kudos
  hide <kudos-id>              hide an entry (admins)
  delete <kudos-id>            delete an entry (admins)
  show                         print the page again
  help                         print this help
  quit                         exit";

/// One line typed at the terminal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Users,
    Whoami,
    Feed,
    Login(Id),
    Logout,
    Send { recipient: Id, message: String },
    Hide(Id),
    Delete(Id),
    Show,
    Help,
    Quit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?}, try \"help\"")]
    Unknown(String),
    #[error("missing {0}")]
    Missing(&'static str),
    #[error("{0:?} is not an id")]
    InvalidId(String),
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Command, ParseError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim_start()),
            None => (line, ""),
        };

        let command = match name {
            "" => return Err(ParseError::Empty),
            "users" => Command::Users,
            "whoami" => Command::Whoami,
            "feed" => Command::Feed,
            "login" => Command::Login(parse_id(rest, "user id")?),
            "logout" => Command::Logout,
            "send" => {
                let (recipient, message) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                Command::Send {
                    recipient: parse_id(recipient, "recipient id")?,
                    message: message.to_string(),
                }
            }
            "hide" => Command::Hide(parse_id(rest, "kudos id")?),
            "delete" => Command::Delete(parse_id(rest, "kudos id")?),
            "show" => Command::Show,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => return Err(ParseError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

fn parse_id(text: &str, what: &'static str) -> Result<Id, ParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ParseError::Missing(what));
    }
    text.parse()
        .map_err(|_| ParseError::InvalidId(text.to_string()))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("feed", Command::Feed)]
    #[case("  logout  ", Command::Logout)]
    #[case("login 3", Command::Login(Id::from(3)))]
    #[case("hide 7", Command::Hide(Id::from(7)))]
    #[case("delete 7", Command::Delete(Id::from(7)))]
    #[case("exit", Command::Quit)]
    fn parses_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(line.parse::<Command>(), Ok(expected));
    }

    #[test]
    fn send_keeps_the_message_verbatim() {
        assert_eq!(
            "send 2 Great work!  <3".parse::<Command>(),
            Ok(Command::Send {
                recipient: Id::from(2),
                message: "Great work!  <3".to_string(),
            })
        );
    }

    #[test]
    fn send_without_text_sends_an_empty_message() {
        assert_eq!(
            "send 2".parse::<Command>(),
            Ok(Command::Send {
                recipient: Id::from(2),
                message: String::new(),
            })
        );
    }

    #[rstest]
    #[case("", ParseError::Empty)]
    #[case("login", ParseError::Missing("user id"))]
    #[case("hide seven", ParseError::InvalidId("seven".into()))]
    #[case("promote 3", ParseError::Unknown("promote".into()))]
    fn rejects_bad_lines(#[case] line: &str, #[case] expected: ParseError) {
        assert_eq!(line.parse::<Command>(), Err(expected));
    }
}
