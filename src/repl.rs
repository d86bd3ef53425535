use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::{BufRead, Write};

use anyhow::Result;
use insightiq::view::{App, Console, Flow};
use log::{debug, warn};
use nu_ansi_term::Color;
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Editor, Helper, Hinter, Validator};

struct Terminal;

impl Console for Terminal {
    fn print(&mut self, text: &str) {
        println!("{}", text.trim_end());
    }

    fn alert(&mut self, text: &str) {
        eprintln!("{}", Color::Yellow.bold().paint(format!("! {text}")));
        eprint!("Press Enter to continue");
        let _ = std::io::stderr().flush();
        let mut line = String::new();
        let _ = std::io::stdin().lock().read_line(&mut line);
    }
}

/// Echoes `*` in place of the typed line while a secret is being read.
#[derive(Helper, Completer, Validator, Hinter, Default)]
struct InputHelper {
    secret: bool,
}

impl Highlighter for InputHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if self.secret {
            Owned("*".repeat(line.chars().count()))
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        self.secret
    }
}

pub struct Repl {
    app: App,
    editor: Editor<InputHelper, DefaultHistory>,
}

impl Repl {
    pub fn new(app: App) -> Result<Self> {
        let mut editor = Editor::new()?;
        editor.set_helper(Some(InputHelper::default()));
        Ok(Repl { app, editor })
    }

    pub async fn run(&mut self) -> Result<()> {
        let mut console = Terminal;
        println!("Type \\help for help, \\quit to exit\n");
        self.app.show(&mut console);

        loop {
            let prompt = self.app.prompt();
            let secret = self.app.is_secret_prompt();
            if let Some(helper) = self.editor.helper_mut() {
                helper.secret = secret;
            }
            match self.editor.readline(&prompt) {
                Ok(line) => {
                    if !secret && !line.trim().is_empty() {
                        let _ = self.editor.add_history_entry(line.as_str());
                    }
                    match self.app.handle_line(&line, &mut console).await {
                        Ok(Flow::Quit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => {
                            warn!("{e}");
                            eprintln!("Error: {e}");
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    debug!("eof on input");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {err:?}");
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }
}
