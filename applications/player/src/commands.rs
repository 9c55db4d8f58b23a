//! Line commands read from the terminal
//!
//! Track ids are the backend ids shown in the grid. Queue positions,
//! playlist slots and playlist song positions are 0-based, as listed.

use std::path::Path;
use tempo_controller::{Key, RenderTarget, SelectedFile, UiEvent, View};
use tempo_core::TrackId;
use tempo_server_client::mime_type_for_file;
use thiserror::Error;

pub const HELP: &str = "\
Playback:  play <track> | queue <pos> | toggle | next | prev | seek <percent>
           volume <0-100> | shuffle | repeat | key <name> | move <from> <to>
Library:   search [text] | upload <file>... | delete <track> | download <track>
Playlists: create <name> | add <track> [slot] | remove <slot> <pos>
           drop <slot> | playlist <slot> [pos] | open <slot>
Views:     home | playlists | show <grid|queue|now|bar|playlists>
Engine:    end | tick <seconds>
Other:     yes | no | help | quit";

/// Parsed terminal command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Feed straight to the controller
    Event(UiEvent),
    /// Act on the playlist listed at `slot`
    Playlist { slot: usize, action: PlaylistAction },
    /// Redraw one part of the UI
    Show(RenderTarget),
    /// Let the media engine reach the end of the track
    EndTrack,
    /// Advance the media engine clock by this many seconds
    Tick(f64),
    Help,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistAction {
    Add { track_id: TrackId },
    Remove { index: usize },
    Delete,
    Play { start: usize },
    Open,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,

    #[error("Unknown command: {0} (try `help`)")]
    Unknown(String),

    #[error("{command}: missing <{argument}>")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("{argument}: not a number: {value}")]
    InvalidNumber { argument: &'static str, value: String },
}

/// Parse one input line
pub fn parse(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (name, rest) = match line.split_once(char::is_whitespace) {
        Some((name, rest)) => (name, rest.trim()),
        None => (line, ""),
    };
    let mut args = Args::new(name, rest);

    let event = match name.to_ascii_lowercase().as_str() {
        "" => return Err(CommandError::Empty),
        "help" | "?" => return Ok(Command::Help),
        "quit" | "exit" | "q" => return Ok(Command::Quit),

        // Playback
        "play" => UiEvent::PlayTrack {
            track_id: args.track("track")?,
        },
        "queue" => UiEvent::PlayQueueIndex {
            index: args.number("pos")?,
        },
        "toggle" | "pause" | "p" => UiEvent::TogglePlay,
        "next" | "n" => UiEvent::Next,
        "prev" | "previous" => UiEvent::Previous,
        "seek" => UiEvent::Seek {
            percent: args.number("percent")?,
        },
        "volume" | "vol" => UiEvent::SetVolume {
            level: args.number("level")?,
        },
        "shuffle" => UiEvent::ToggleShuffle,
        "repeat" => UiEvent::ToggleRepeat,
        "key" => UiEvent::KeyPressed {
            key: Key::parse(args.word("name")?),
            in_text_input: false,
        },
        "move" => UiEvent::QueueDrop {
            from: args.number("from")?,
            to: args.number("to")?,
        },

        // Library
        "search" | "/" => UiEvent::Search {
            query: rest.to_string(),
        },
        "upload" => UiEvent::UploadSelected {
            files: upload_selection(rest)?,
        },
        "delete" => UiEvent::DeleteTrackRequested {
            track_id: args.track("track")?,
        },
        "download" => UiEvent::DownloadTrack {
            track_id: args.track("track")?,
        },

        // Playlists
        "create" => UiEvent::CreatePlaylist {
            name: rest.to_string(),
        },
        "add" => {
            let track_id = args.track("track")?;
            return Ok(match args.optional_number("slot")? {
                Some(slot) => Command::Playlist {
                    slot,
                    action: PlaylistAction::Add { track_id },
                },
                None => Command::Event(UiEvent::AddToPlaylistRequested { track_id }),
            });
        }
        "remove" => {
            let slot = args.number("slot")?;
            let index = args.number("pos")?;
            return Ok(Command::Playlist {
                slot,
                action: PlaylistAction::Remove { index },
            });
        }
        "drop" => {
            return Ok(Command::Playlist {
                slot: args.number("slot")?,
                action: PlaylistAction::Delete,
            })
        }
        "playlist" => {
            let slot = args.number("slot")?;
            let start = args.optional_number("pos")?.unwrap_or(0);
            return Ok(Command::Playlist {
                slot,
                action: PlaylistAction::Play { start },
            });
        }
        "open" => {
            return Ok(Command::Playlist {
                slot: args.number("slot")?,
                action: PlaylistAction::Open,
            })
        }

        // Views
        "home" => UiEvent::ShowView { view: View::Home },
        "playlists" => UiEvent::ShowView {
            view: View::Playlists,
        },
        "show" => return show_target(args.word("target")?).map(Command::Show),

        // Media engine
        "end" => return Ok(Command::EndTrack),
        "tick" => return Ok(Command::Tick(args.number("seconds")?)),

        "yes" | "y" => UiEvent::Confirmed { accepted: true },
        "no" => UiEvent::Confirmed { accepted: false },

        _ => return Err(CommandError::Unknown(name.to_string())),
    };

    Ok(Command::Event(event))
}

fn show_target(name: &str) -> Result<RenderTarget, CommandError> {
    Ok(match name.to_ascii_lowercase().as_str() {
        "grid" | "library" => RenderTarget::Grid,
        "queue" => RenderTarget::Queue,
        "now" => RenderTarget::NowPlaying,
        "bar" | "player" => RenderTarget::PlayerBar,
        "playlists" => RenderTarget::Playlists,
        other => return Err(CommandError::Unknown(format!("show {}", other))),
    })
}

/// Files named on an `upload` line, typed by extension
fn upload_selection(rest: &str) -> Result<Vec<SelectedFile>, CommandError> {
    let files: Vec<SelectedFile> = rest
        .split_whitespace()
        .map(|location| {
            let path = Path::new(location);
            SelectedFile {
                name: path
                    .file_name()
                    .map_or_else(|| location.to_string(), |n| n.to_string_lossy().into_owned()),
                mime_type: mime_type_for_file(path).to_string(),
                location: location.to_string(),
            }
        })
        .collect();

    if files.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "upload",
            argument: "file",
        });
    }
    Ok(files)
}

/// Positional arguments of one command
struct Args<'a> {
    command: &'static str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(command: &str, rest: &'a str) -> Self {
        Self {
            command: static_name(command),
            words: rest.split_whitespace(),
        }
    }

    fn word(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.words.next().ok_or(CommandError::MissingArgument {
            command: self.command,
            argument,
        })
    }

    fn number<T: std::str::FromStr>(&mut self, argument: &'static str) -> Result<T, CommandError> {
        let value = self.word(argument)?;
        value.parse().map_err(|_| CommandError::InvalidNumber {
            argument,
            value: value.to_string(),
        })
    }

    fn optional_number<T: std::str::FromStr>(
        &mut self,
        argument: &'static str,
    ) -> Result<Option<T>, CommandError> {
        match self.words.next() {
            Some(value) => value.parse().map(Some).map_err(|_| CommandError::InvalidNumber {
                argument,
                value: value.to_string(),
            }),
            None => Ok(None),
        }
    }

    fn track(&mut self, argument: &'static str) -> Result<TrackId, CommandError> {
        self.number::<u64>(argument).map(TrackId::new)
    }
}

/// Command names for error messages
fn static_name(name: &str) -> &'static str {
    const NAMES: &[&str] = &[
        "play", "queue", "seek", "volume", "key", "move", "upload", "delete", "download", "add",
        "remove", "drop", "playlist", "open", "show", "tick",
    ];
    let lower = name.to_ascii_lowercase();
    NAMES
        .iter()
        .find(|n| **n == lower)
        .copied()
        .unwrap_or("command")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_commands() {
        assert_eq!(
            parse("play 3").unwrap(),
            Command::Event(UiEvent::PlayTrack {
                track_id: TrackId::new(3)
            })
        );
        assert_eq!(parse("  NEXT ").unwrap(), Command::Event(UiEvent::Next));
        assert_eq!(
            parse("move 0 2").unwrap(),
            Command::Event(UiEvent::QueueDrop { from: 0, to: 2 })
        );
        assert_eq!(
            parse("key space").unwrap(),
            Command::Event(UiEvent::KeyPressed {
                key: Key::Space,
                in_text_input: false
            })
        );
        assert_eq!(
            parse("volume -5").unwrap(),
            Command::Event(UiEvent::SetVolume { level: -5 })
        );
    }

    #[test]
    fn test_free_text_arguments() {
        assert_eq!(
            parse("search new order").unwrap(),
            Command::Event(UiEvent::Search {
                query: "new order".into()
            })
        );
        assert_eq!(
            parse("search").unwrap(),
            Command::Event(UiEvent::Search {
                query: String::new()
            })
        );
        assert_eq!(
            parse("create Road Trip").unwrap(),
            Command::Event(UiEvent::CreatePlaylist {
                name: "Road Trip".into()
            })
        );
    }

    #[test]
    fn test_playlist_commands() {
        assert_eq!(
            parse("add 7").unwrap(),
            Command::Event(UiEvent::AddToPlaylistRequested {
                track_id: TrackId::new(7)
            })
        );
        assert_eq!(
            parse("add 7 1").unwrap(),
            Command::Playlist {
                slot: 1,
                action: PlaylistAction::Add {
                    track_id: TrackId::new(7)
                }
            }
        );
        assert_eq!(
            parse("playlist 0").unwrap(),
            Command::Playlist {
                slot: 0,
                action: PlaylistAction::Play { start: 0 }
            }
        );
        assert_eq!(
            parse("remove 0 4").unwrap(),
            Command::Playlist {
                slot: 0,
                action: PlaylistAction::Remove { index: 4 }
            }
        );
    }

    #[test]
    fn test_upload_types_files_by_extension() {
        match parse("upload /music/a.MP3 notes.txt").unwrap() {
            Command::Event(UiEvent::UploadSelected { files }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(files[0].name, "a.MP3");
                assert!(files[0].is_audio());
                assert_eq!(files[0].location, "/music/a.MP3");
                assert!(!files[1].is_audio());
            }
            other => panic!("Expected upload, got: {:?}", other),
        }
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("dance"), Err(CommandError::Unknown("dance".into())));
        assert_eq!(
            parse("play"),
            Err(CommandError::MissingArgument {
                command: "play",
                argument: "track"
            })
        );
        assert_eq!(
            parse("seek half"),
            Err(CommandError::InvalidNumber {
                argument: "percent",
                value: "half".into()
            })
        );
        assert!(parse("upload").is_err());
        assert!(parse("show nothing").is_err());
    }

    #[test]
    fn test_engine_commands() {
        assert_eq!(parse("end").unwrap(), Command::EndTrack);
        assert_eq!(parse("tick 2.5").unwrap(), Command::Tick(2.5));
    }

    #[test]
    fn test_show_targets() {
        assert_eq!(parse("show queue").unwrap(), Command::Show(RenderTarget::Queue));
        assert_eq!(parse("show bar").unwrap(), Command::Show(RenderTarget::PlayerBar));
    }
}
