use serde::{Deserialize, Serialize};

/// One recognized bot feature. Every variant is reachable both as a slash
/// token and (except `/start`) as an exact-match menu button label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Start,
    Help,
    Prediction,
    Magic,
    Luck,
    Oracle,
    Ritual,
    MagicBall,
    History,
}

impl Command {
    pub const ALL: [Command; 9] = [
        Command::Start,
        Command::Help,
        Command::Prediction,
        Command::Magic,
        Command::Luck,
        Command::Oracle,
        Command::Ritual,
        Command::MagicBall,
        Command::History,
    ];

    /// Canonical slash token. Doubles as the audit action identifier.
    pub fn token(self) -> &'static str {
        match self {
            Command::Start => "/start",
            Command::Help => "/help",
            Command::Prediction => "/prediction",
            Command::Magic => "/magic",
            Command::Luck => "/luck",
            Command::Oracle => "/oracle",
            Command::Ritual => "/ritual",
            Command::MagicBall => "/magicball",
            Command::History => "/history",
        }
    }

    /// Menu button label equivalent to this command. `/start` has no button.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Command::Start => None,
            Command::Help => Some("ℹ️ Help"),
            Command::Prediction => Some("🔮 Get a prediction"),
            Command::Magic => Some("✨ Check your magic energy"),
            Command::Luck => Some("🎲 Check your luck"),
            Command::Oracle => Some("🧙 Question from the Oracle"),
            Command::Ritual => Some("📜 Daily ritual"),
            Command::MagicBall => Some("🎱 Magic 8-ball"),
            Command::History => Some("🔄 Prediction history"),
        }
    }

    /// Resolve an inbound text to a command: a slash token (with optional
    /// `@botname` suffix and trailing arguments) or an exact button label.
    /// Anything else is free text and belongs to the session resolver.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        if let Some(rest) = text.strip_prefix('/') {
            let token = rest.split_whitespace().next().unwrap_or("");
            let token = token.split('@').next().unwrap_or(token);
            return Command::ALL
                .into_iter()
                .find(|cmd| cmd.token()[1..].eq_ignore_ascii_case(token));
        }
        Command::ALL
            .into_iter()
            .find(|cmd| cmd.label() == Some(text))
    }
}
