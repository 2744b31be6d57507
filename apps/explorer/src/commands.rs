//! Terminal commands typed at the explorer prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the text field content. The text is kept exactly as typed.
    Input(String),
    /// Add the text field content; with an argument, type it first.
    Add(Option<String>),
    Delete(usize),
    Save,
    Show,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  input <text>   put <text> in the artist id field (no text clears it)
  add [<text>]   add the field's text to the list
  delete <n>     remove the entry at position n
  save           send the list to the server
  show           print the page again
  help           show this message
  quit           leave";

/// Parses one prompt line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.find(' ') {
        Some(split) => (&trimmed[..split], Some(&trimmed[split + 1..])),
        None => (trimmed, None),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "input" => Command::Input(rest.unwrap_or_default().to_string()),
        "add" => Command::Add(rest.map(str::to_string)),
        "delete" | "del" | "rm" => {
            let raw = rest.map(str::trim).unwrap_or_default();
            let index = raw
                .parse::<usize>()
                .map_err(|_| format!("'{raw}' is not a list position"))?;
            Command::Delete(index)
        }
        "save" => Command::Save,
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command '{other}', try 'help'")),
    };
    Ok(Some(command))
}
