//! Shell commands and their parsing.

use crate::tokenizer::Tokens;
use thiserror::Error;

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `create <path>`
    Create {
        /// Target path
        path: String,
    },
    /// `create_dir <path>`
    CreateDir {
        /// Target path
        path: String,
    },
    /// `read <path>`
    Read {
        /// File path
        path: String,
    },
    /// `write <path> <content>`
    Write {
        /// File path
        path: String,
        /// New content, as raw bytes
        content: Vec<u8>,
    },
    /// `delete <path>`
    Delete {
        /// Target path
        path: String,
    },
    /// `delete_r <path>`
    DeleteRecursive {
        /// Target path
        path: String,
    },
    /// `find <name>`
    Find {
        /// Exact name to look for
        name: String,
    },
    /// `exit`
    Exit,
}

/// A line that does not form a valid command.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command word is not recognised.
    #[error("Unknown command: {name}")]
    Unknown {
        /// The unrecognised word
        name: String,
    },

    /// A required argument is missing.
    #[error("{command}: missing argument <{argument}>")]
    MissingArgument {
        /// Command word
        command: &'static str,
        /// Name of the missing argument
        argument: &'static str,
    },
}

impl CommandError {
    /// The command word of the rejected line.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Unknown { name } => name,
            Self::MissingArgument { command, .. } => command,
        }
    }
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line. Extra trailing tokens are ignored.
    /// `write` content is kept as raw bytes; paths and names that are not
    /// valid UTF-8 are decoded lossily.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for an unknown command word or a missing
    /// argument.
    ///
    /// # Examples
    ///
    /// ```
    /// use ramfs_cli::command::Command;
    ///
    /// let cmd = Command::parse(br#"write /notes "two words""#).unwrap();
    /// assert_eq!(
    ///     cmd,
    ///     Some(Command::Write {
    ///         path: "/notes".to_string(),
    ///         content: b"two words".to_vec(),
    ///     })
    /// );
    ///
    /// assert_eq!(Command::parse(b"   ").unwrap(), None);
    /// assert!(Command::parse(b"mkdir /x").is_err());
    /// ```
    pub fn parse(line: &[u8]) -> Result<Option<Self>, CommandError> {
        let mut tokens = Tokens::new(line);
        let Some(word) = tokens.next() else {
            return Ok(None);
        };

        let mut arg = |command: &'static str, argument: &'static str| {
            tokens
                .next()
                .ok_or(CommandError::MissingArgument { command, argument })
        };

        let command = match word.as_slice() {
            b"create" => Self::Create {
                path: arg("create", "path").map(lossy)?,
            },
            b"create_dir" => Self::CreateDir {
                path: arg("create_dir", "path").map(lossy)?,
            },
            b"read" => Self::Read {
                path: arg("read", "path").map(lossy)?,
            },
            b"write" => Self::Write {
                path: arg("write", "path").map(lossy)?,
                content: arg("write", "content")?,
            },
            b"delete" => Self::Delete {
                path: arg("delete", "path").map(lossy)?,
            },
            b"delete_r" => Self::DeleteRecursive {
                path: arg("delete_r", "path").map(lossy)?,
            },
            b"find" => Self::Find {
                name: arg("find", "name").map(lossy)?,
            },
            b"exit" => Self::Exit,
            _ => return Err(CommandError::Unknown { name: lossy(word) }),
        };

        Ok(Some(command))
    }

    /// The command word as typed.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::CreateDir { .. } => "create_dir",
            Self::Read { .. } => "read",
            Self::Write { .. } => "write",
            Self::Delete { .. } => "delete",
            Self::DeleteRecursive { .. } => "delete_r",
            Self::Find { .. } => "find",
            Self::Exit => "exit",
        }
    }
}

/// Decodes a token, replacing invalid UTF-8 sequences.
fn lossy(token: Vec<u8>) -> String {
    String::from_utf8(token)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Command {
        Command::parse(line.as_bytes()).unwrap().unwrap()
    }

    #[test]
    fn test_parse_single_argument_commands() {
        assert_eq!(
            parse("create /a"),
            Command::Create {
                path: "/a".to_string()
            }
        );
        assert_eq!(
            parse("create_dir /d"),
            Command::CreateDir {
                path: "/d".to_string()
            }
        );
        assert_eq!(
            parse("read /a"),
            Command::Read {
                path: "/a".to_string()
            }
        );
        assert_eq!(
            parse("delete /a"),
            Command::Delete {
                path: "/a".to_string()
            }
        );
        assert_eq!(
            parse("delete_r /d"),
            Command::DeleteRecursive {
                path: "/d".to_string()
            }
        );
        assert_eq!(
            parse("find y"),
            Command::Find {
                name: "y".to_string()
            }
        );
        assert_eq!(parse("exit"), Command::Exit);
    }

    #[test]
    fn test_parse_write_quoted() {
        assert_eq!(
            parse(r#"write /f "hello world""#),
            Command::Write {
                path: "/f".to_string(),
                content: b"hello world".to_vec()
            }
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(
            Command::parse(b"write /f"),
            Err(CommandError::MissingArgument {
                command: "write",
                argument: "content"
            })
        );
        assert!(matches!(
            Command::parse(b"create"),
            Err(CommandError::MissingArgument { .. })
        ));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            Command::parse(b"ls /"),
            Err(CommandError::Unknown {
                name: "ls".to_string()
            })
        );
    }

    #[test]
    fn test_parse_ignores_extra_tokens() {
        assert_eq!(
            parse("read /f extra"),
            Command::Read {
                path: "/f".to_string()
            }
        );
    }

    #[test]
    fn test_name_round_trips() {
        let lines = [
            "create a",
            "create_dir a",
            "read a",
            "write a b",
            "delete a",
            "delete_r a",
            "find a",
            "exit",
        ];
        for line in lines {
            let command = parse(line);
            assert!(line.starts_with(command.name()));
        }
    }

    #[test]
    fn test_parse_raw_content() {
        assert_eq!(
            Command::parse(b"write /f \xff\xfe").unwrap(),
            Some(Command::Write {
                path: "/f".to_string(),
                content: vec![0xff, 0xfe],
            })
        );
        assert_eq!(
            Command::parse(b"\xffbad /f"),
            Err(CommandError::Unknown {
                name: "\u{fffd}bad".to_string()
            })
        );
    }
}
