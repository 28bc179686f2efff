//! Line-oriented input for the interactive `shell` command.

use folio::application::site::Command;
use thiserror::Error;

pub const HELP: &str = "\
commands:
  go <fragment>      follow a link to #fragment (home, blog, projects, post/<id>)
  open <id>          click a blog list entry
  list               return from a post to the blog list
  back | forward     move through history
  filter <category>  filter projects (`all` shows every card)
  show               print the page again
  help               this text
  quit               leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Command(Command),
    Show,
    Help,
    Quit,
    Empty,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShellError {
    #[error("unknown command `{0}` (try `help`)")]
    UnknownCommand(String),
    #[error("`{command}` needs an argument")]
    MissingArgument { command: &'static str },
}

pub fn parse_line(line: &str) -> Result<ShellInput, ShellError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word {
        "" => ShellInput::Empty,
        "go" | "nav" => ShellInput::Command(Command::Navigate(required("go", rest)?)),
        "open" | "click" => ShellInput::Command(Command::EntryClicked(required("open", rest)?)),
        "list" => ShellInput::Command(Command::BackToBlog),
        "back" => ShellInput::Command(Command::Back),
        "forward" => ShellInput::Command(Command::Forward),
        "filter" => ShellInput::Command(Command::FilterProjects(required("filter", rest)?)),
        "show" => ShellInput::Show,
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" => ShellInput::Quit,
        other => return Err(ShellError::UnknownCommand(other.to_string())),
    };
    Ok(input)
}

fn required(command: &'static str, rest: &str) -> Result<String, ShellError> {
    if rest.is_empty() {
        Err(ShellError::MissingArgument { command })
    } else {
        Ok(rest.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn navigation_words_become_commands() {
        assert_eq!(
            parse_line("go #post/hello"),
            Ok(ShellInput::Command(Command::Navigate("#post/hello".into())))
        );
        assert_eq!(
            parse_line("  open  p1 "),
            Ok(ShellInput::Command(Command::EntryClicked("p1".into())))
        );
        assert_eq!(
            parse_line("list"),
            Ok(ShellInput::Command(Command::BackToBlog))
        );
        assert_eq!(parse_line("back"), Ok(ShellInput::Command(Command::Back)));
        assert_eq!(
            parse_line("filter rust"),
            Ok(ShellInput::Command(Command::FilterProjects("rust".into())))
        );
    }

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line("   "), Ok(ShellInput::Empty));
    }

    #[test]
    fn arguments_are_required_where_expected() {
        assert_eq!(
            parse_line("go"),
            Err(ShellError::MissingArgument { command: "go" })
        );
        assert_eq!(
            parse_line("filter   "),
            Err(ShellError::MissingArgument { command: "filter" })
        );
    }

    #[test]
    fn unknown_words_are_reported() {
        assert_eq!(
            parse_line("jump blog"),
            Err(ShellError::UnknownCommand("jump".into()))
        );
    }
}
