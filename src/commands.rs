//! Chat commands -- instant replies, no stored state.

/// Commands recognized in watched channels.
#[derive(Debug, PartialEq)]
pub enum Command {
    /// `!news <account>`: look up an account's latest post right now.
    News { account: String },
}

impl Command {
    /// Parse a command from message text.
    ///
    /// Returns `None` for ordinary chatter and for a bare `!news` with no
    /// account argument; both are silent no-ops, never an error reply.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.trim().strip_prefix("!news")?;
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            // "!newsy stuff" is chatter, not the command.
            return None;
        }
        let account = rest.trim();
        if account.is_empty() {
            return None;
        }
        Some(Self::News {
            account: account.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_news() {
        assert_eq!(
            Command::parse("!news alice"),
            Some(Command::News {
                account: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_parse_news_trims_whitespace() {
        assert_eq!(
            Command::parse("  !news   alice  "),
            Some(Command::News {
                account: "alice".to_string()
            })
        );
    }

    #[test]
    fn test_parse_news_without_account_is_ignored() {
        assert_eq!(Command::parse("!news"), None);
        assert_eq!(Command::parse("!news   "), None);
    }

    #[test]
    fn test_parse_requires_exact_command_word() {
        assert_eq!(Command::parse("!newsalice"), None);
        assert_eq!(Command::parse("!new alice"), None);
    }

    #[test]
    fn test_parse_command_must_lead_the_message() {
        assert_eq!(Command::parse("did you see the !news today"), None);
    }

    #[test]
    fn test_parse_ordinary_chatter_is_ignored() {
        assert_eq!(Command::parse("good morning"), None);
        assert_eq!(Command::parse(""), None);
    }
}
