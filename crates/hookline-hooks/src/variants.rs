//! Reference event variants.
//!
//! A small set of concrete occurrences showing how a variant embeds its
//! [`Envelope`] and implements [`Respond`] against the owning instance.

use async_trait::async_trait;

use crate::envelope::Envelope;
use crate::error::{EventError, Result};
use crate::event::{Event, Respond};

/// The instance finished registering with the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectEvent {
    envelope: Envelope,
}

impl ConnectEvent {
    pub fn new(envelope: Envelope) -> Self {
        Self { envelope }
    }
}

#[async_trait]
impl Respond for ConnectEvent {
    /// Sends `message` to the server as a raw line.
    async fn respond(&self, message: &str) -> Result<()> {
        let owner = self.envelope.reply_owner(self.kind())?;
        owner.send_raw(message).await?;
        Ok(())
    }
}

impl Event for ConnectEvent {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn kind(&self) -> &'static str {
        "connect"
    }
}

/// A message sent to a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageEvent {
    envelope: Envelope,
    channel: String,
    user: String,
    message: String,
}

impl MessageEvent {
    pub fn new(
        envelope: Envelope,
        channel: impl Into<String>,
        user: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            envelope,
            channel: channel.into(),
            user: user.into(),
            message: message.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[async_trait]
impl Respond for MessageEvent {
    /// Replies in the same channel, addressed to the sender.
    async fn respond(&self, message: &str) -> Result<()> {
        let owner = self.envelope.reply_owner(self.kind())?;
        owner
            .send_message(&self.channel, &format!("{}: {message}", self.user))
            .await?;
        Ok(())
    }
}

impl Event for MessageEvent {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn kind(&self) -> &'static str {
        "message"
    }
}

/// A message sent directly to the instance's nick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateMessageEvent {
    envelope: Envelope,
    user: String,
    message: String,
}

impl PrivateMessageEvent {
    pub fn new(envelope: Envelope, user: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            envelope,
            user: user.into(),
            message: message.into(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[async_trait]
impl Respond for PrivateMessageEvent {
    async fn respond(&self, message: &str) -> Result<()> {
        let owner = self.envelope.reply_owner(self.kind())?;
        owner.send_message(&self.user, message).await?;
        Ok(())
    }
}

impl Event for PrivateMessageEvent {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn kind(&self) -> &'static str {
        "private-message"
    }
}

/// A user joined a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JoinEvent {
    envelope: Envelope,
    channel: String,
    user: String,
}

impl JoinEvent {
    pub fn new(envelope: Envelope, channel: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            envelope,
            channel: channel.into(),
            user: user.into(),
        }
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

#[async_trait]
impl Respond for JoinEvent {
    /// Speaks in the joined channel.
    async fn respond(&self, message: &str) -> Result<()> {
        let owner = self.envelope.reply_owner(self.kind())?;
        owner.send_message(&self.channel, message).await?;
        Ok(())
    }
}

impl Event for JoinEvent {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn kind(&self) -> &'static str {
        "join"
    }
}

/// The connection to the server was closed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisconnectEvent {
    envelope: Envelope,
    reason: Option<String>,
}

impl DisconnectEvent {
    pub fn new(envelope: Envelope, reason: Option<String>) -> Self {
        Self { envelope, reason }
    }

    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

#[async_trait]
impl Respond for DisconnectEvent {
    async fn respond(&self, _message: &str) -> Result<()> {
        Err(EventError::InvalidResponse {
            kind: self.kind(),
            reason: "connection is closed".to_string(),
        })
    }
}

impl Event for DisconnectEvent {
    fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    fn kind(&self) -> &'static str {
        "disconnect"
    }
}
