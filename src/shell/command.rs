/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    MakeDirectory { name: &'a str },
    MakeFile { path: &'a str },
    Write { path: &'a str, content: &'a str },
    Read { path: &'a str },
    List { path: &'a str },
    ChangeDirectory { path: &'a str },
    PrintWorkingDirectory,
    Help,
    Exit,
    Empty,
    Unknown { verb: &'a str },
}

pub const HELP: &str = "\
Commands:
  mkdir <name>            create a directory in the current directory
  mkfile <path>           create an empty file
  write <path> <content>  replace a file's content with the rest of the line
  read <path>             print a file's content
  ls [path]               list a directory
  cd [path]               change the current directory
  pwd                     print the current directory
  help                    show this summary
  exit                    leave the shell";

/// Splits off the first whitespace-delimited token, skipping leading whitespace.
fn next_token(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(end) => (&input[..end], &input[end..]),
        None => (input, ""),
    }
}

impl<'a> From<&'a str> for Command<'a> {
    /// Verb and first argument are whitespace-delimited tokens. For `write`
    /// the content is the remainder of the line minus one separating space.
    /// Arguments beyond what a verb takes are ignored.
    fn from(line: &'a str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, rest) = next_token(line);
        let (argument, rest) = next_token(rest);

        match verb {
            "" => Command::Empty,
            "mkdir" => Command::MakeDirectory { name: argument },
            "mkfile" => Command::MakeFile { path: argument },
            "write" => Command::Write {
                path: argument,
                content: rest.strip_prefix(' ').unwrap_or(rest),
            },
            "read" => Command::Read { path: argument },
            "ls" => Command::List { path: argument },
            "cd" => Command::ChangeDirectory { path: argument },
            "pwd" => Command::PrintWorkingDirectory,
            "help" => Command::Help,
            "exit" => Command::Exit,
            verb => Command::Unknown { verb },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("mkdir docs", Command::MakeDirectory { name: "docs" })]
    #[case("mkfile a/b.txt", Command::MakeFile { path: "a/b.txt" })]
    #[case("read /a/b.txt", Command::Read { path: "/a/b.txt" })]
    #[case("ls", Command::List { path: "" })]
    #[case("ls ..", Command::List { path: ".." })]
    #[case("cd /", Command::ChangeDirectory { path: "/" })]
    #[case("pwd", Command::PrintWorkingDirectory)]
    #[case("help", Command::Help)]
    #[case("exit", Command::Exit)]
    #[case("", Command::Empty)]
    #[case("   \t ", Command::Empty)]
    #[case("rm -rf", Command::Unknown { verb: "rm" })]
    #[case("MKDIR docs", Command::Unknown { verb: "MKDIR" })]
    #[case("  cd   docs  ", Command::ChangeDirectory { path: "docs" })]
    #[case("mkdir a b", Command::MakeDirectory { name: "a" })]
    #[case("pwd\r\n", Command::PrintWorkingDirectory)]
    fn test_parse(#[case] line: &str, #[case] expected: Command<'static>) {
        assert_eq!(Command::from(line), expected);
    }

    #[rstest]
    #[case("write f hello", "hello")]
    #[case("write f hello world", "hello world")]
    #[case("write f  two spaces", " two spaces")]
    #[case("write f trailing  ", "trailing  ")]
    #[case("write f a/b/c", "a/b/c")]
    #[case("write f", "")]
    #[case("write f ", "")]
    fn test_write_keeps_rest_of_line(#[case] line: &str, #[case] content: &str) {
        assert_eq!(
            Command::from(line),
            Command::Write { path: "f", content }
        );
    }
}
