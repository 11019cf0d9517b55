use crate::store::UserId;

/// Side channel telling the admin which command a user invoked.
///
/// `notify` is called inline on the reply path, so implementations must not
/// block and must swallow their own failures; a broken sink never delays or
/// corrupts the user-facing reply.
pub trait AuditSink: Send + Sync {
    fn notify(&self, user: UserId, display_name: &str, action: &str);
}

/// Sink that drops every notification. Used by the local REPL and wherever
/// no admin chat is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudit;

impl AuditSink for NullAudit {
    fn notify(&self, user: UserId, _display_name: &str, action: &str) {
        tracing::trace!(%user, action, "audit disabled, dropping notification");
    }
}
