//! Console command parsing for the studio event loop.

/// Commands the console can feed into the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Authenticate with the backend.
    Login {
        /// Login name.
        username: String,
        /// Password.
        password: String,
    },
    /// End the session.
    Logout,
    /// Show the current session.
    WhoAmI,
    /// List the speaker's assigned books.
    Books,
    /// Open a book for recording.
    Open {
        /// Book to open.
        book_id: i64,
    },
    /// Show the current chunk's text and state.
    Show,
    /// Start recording the current chunk.
    Record,
    /// Stop recording and keep the take for review.
    Stop,
    /// Toggle playback of the captured take.
    Play,
    /// Discard the captured take and return to idle.
    ReRecord,
    /// Upload the captured take for the current chunk.
    Upload,
    /// Move to the next chunk, discarding any capture.
    Next,
    /// Move to the previous chunk, discarding any capture.
    Previous,
    /// Show workflow progress.
    Status,
    /// Print the command reference.
    Help,
    /// Exit the application.
    Quit,
}

impl AppCommand {
    /// Parses one console line. Returns `None` for blank input or an
    /// unknown command (the loop prints usage in that case).
    pub fn parse(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let verb = parts.next()?;

        match verb {
            "login" => {
                let username = parts.next()?.to_string();
                let password = parts.next()?.to_string();
                Some(AppCommand::Login { username, password })
            }
            "logout" => Some(AppCommand::Logout),
            "whoami" => Some(AppCommand::WhoAmI),
            "books" => Some(AppCommand::Books),
            "open" => {
                let book_id = parts.next()?.parse().ok()?;
                Some(AppCommand::Open { book_id })
            }
            "show" => Some(AppCommand::Show),
            "record" => Some(AppCommand::Record),
            "stop" => Some(AppCommand::Stop),
            "play" | "pause" => Some(AppCommand::Play),
            "rerecord" => Some(AppCommand::ReRecord),
            "upload" => Some(AppCommand::Upload),
            "next" => Some(AppCommand::Next),
            "prev" | "previous" => Some(AppCommand::Previous),
            "status" => Some(AppCommand::Status),
            "help" => Some(AppCommand::Help),
            "quit" | "exit" => Some(AppCommand::Quit),
            _ => None,
        }
    }

    /// One-screen command reference.
    pub fn usage() -> &'static str {
        "Commands:\n\
         \x20 login <username> <password>   authenticate\n\
         \x20 logout                        end the session\n\
         \x20 whoami                        show the current session\n\
         \x20 books                         list assigned books\n\
         \x20 open <book-id>                open a book for recording\n\
         \x20 show                          show the current chunk\n\
         \x20 record / stop                 capture a take\n\
         \x20 play                          toggle playback of the take\n\
         \x20 rerecord                      discard the take\n\
         \x20 upload                        upload the take\n\
         \x20 next / prev                   navigate chunks (discards take)\n\
         \x20 status                        show recording progress\n\
         \x20 quit                          exit"
    }
}
