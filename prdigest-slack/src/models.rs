use serde::Serialize;

/// Payload accepted by a Slack incoming webhook
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlackMessage {
  /// Fallback text shown in notifications
  pub text: String,
  pub blocks: Vec<Block>,
}

/// A Block Kit layout block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
  Header { text: TextObject },
  Section { text: TextObject },
}

/// A Block Kit text composition object
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TextObject {
  PlainText { text: String, emoji: bool },
  Mrkdwn { text: String },
}

impl TextObject {
  pub fn plain(text: impl Into<String>) -> Self {
    Self::PlainText {
      text: text.into(),
      emoji: true,
    }
  }

  pub fn mrkdwn(text: impl Into<String>) -> Self {
    Self::Mrkdwn { text: text.into() }
  }
}
