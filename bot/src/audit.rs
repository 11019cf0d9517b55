use std::sync::Arc;

use fortuna_core::{AuditSink, UserId};
use teloxide::prelude::*;
use tokio::sync::mpsc;

struct AuditLine {
    user: UserId,
    display_name: String,
    action: String,
}

/// Audit sink that forwards each recognized command to the admin chat.
///
/// `notify` only pushes onto an unbounded channel; a detached task owns the
/// actual sends, so Telegram latency or failure never touches the reply
/// path. Delivery failures are logged and dropped.
pub struct TelegramAudit {
    tx: mpsc::UnboundedSender<AuditLine>,
}

impl TelegramAudit {
    pub fn spawn(bot: Bot, admin_chat: ChatId) -> Arc<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<AuditLine>();
        tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                let text = format!(
                    "📝 Log: {} (ID: {}) used {}",
                    line.display_name, line.user, line.action
                );
                if let Err(error) = bot.send_message(admin_chat, text).await {
                    tracing::warn!(%error, user = %line.user, "failed to deliver audit notification");
                }
            }
            tracing::debug!("audit channel closed, sender task exiting");
        });
        Arc::new(Self { tx })
    }
}

impl AuditSink for TelegramAudit {
    fn notify(&self, user: UserId, display_name: &str, action: &str) {
        // A closed channel means we are shutting down; nothing to surface.
        let _ = self.tx.send(AuditLine {
            user,
            display_name: display_name.to_string(),
            action: action.to_string(),
        });
    }
}
