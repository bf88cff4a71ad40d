/// One line of REPL input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text, sent as a question
    Ask(String),
    New,
    /// Leave the current conversation; history is kept
    Clear,
    List,
    /// 1-based position in the list
    Select(usize),
    Delete(usize),
    /// `None` clears the jurisdiction
    Country(Option<String>),
    Countries,
    /// 1-based position among the answers of the active conversation;
    /// `full` prints whole passages instead of excerpts
    Sources { answer: usize, full: bool },
    KnowledgeBase,
    Suggest(Option<usize>),
    Help,
    Quit,
    Empty,
    Invalid(String),
}

pub const HELP: &str = "\
Commands:
  <question>        ask about the rules
  /new              start a new chat
  /clear            clear the screen back to the welcome state
  /list             list conversations, most recent first
  /select N         open conversation N
  /delete N         delete conversation N
  /country [CODE]   set or clear the jurisdiction
  /countries        list supported jurisdictions
  /sources N [full] show the sources of answer N
  /kb               list indexed rule books
  /suggest [N]      show example questions, or ask example N
  /help             show this help
  /quit             exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Self::Empty;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Self::Ask(line.to_string());
        };

        let mut parts = rest.split_whitespace();
        let name = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();
        let flag = parts.next();

        match name.as_str() {
            "new" => Self::New,
            "clear" => Self::Clear,
            "list" | "ls" => Self::List,
            "select" | "open" => index(arg, Self::Select),
            "delete" | "rm" => index(arg, Self::Delete),
            "country" => Self::Country(arg.map(str::to_ascii_uppercase)),
            "countries" => Self::Countries,
            "sources" => index(arg, |answer| Self::Sources {
                answer,
                full: flag.is_some_and(|f| f.eq_ignore_ascii_case("full")),
            }),
            "kb" => Self::KnowledgeBase,
            "suggest" => match arg {
                None => Self::Suggest(None),
                Some(_) => index(arg, |n| Self::Suggest(Some(n))),
            },
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => Self::Invalid(format!("Unknown command: /{}", other)),
        }
    }
}

fn index(arg: Option<&str>, make: impl FnOnce(usize) -> Command) -> Command {
    match arg.map(str::parse::<usize>) {
        Some(Ok(n)) if n > 0 => make(n),
        Some(_) => Command::Invalid("Expected a positive number".to_string()),
        None => Command::Invalid("Missing number".to_string()),
    }
}
