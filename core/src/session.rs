/// Per-user dialog state. At most one session exists per user; starting a
/// new dialog overwrites whatever was in flight (last-start-wins, no
/// nesting, no queueing).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DialogSession {
    #[default]
    Idle,
    /// The Oracle posed a question; the next free-text message closes the
    /// dialog. The question is retained so a later reply could refer back
    /// to it, even though the current closing reply does not.
    AwaitingOracleAnswer { question: String },
    /// The magic 8-ball awaits any question; the reply does not depend on
    /// its content, so nothing is retained.
    AwaitingMagicBallQuestion,
}

impl DialogSession {
    pub fn is_idle(&self) -> bool {
        matches!(self, DialogSession::Idle)
    }

    /// Consume the session, leaving `Idle` behind.
    pub fn take(&mut self) -> DialogSession {
        std::mem::take(self)
    }
}

#[cfg(test)]
mod tests {
    use super::DialogSession;

    #[test]
    fn default_is_idle() {
        assert!(DialogSession::default().is_idle());
    }

    #[test]
    fn take_leaves_idle_behind() {
        let mut session = DialogSession::AwaitingOracleAnswer {
            question: "What is patience?".into(),
        };
        let taken = session.take();
        assert!(session.is_idle());
        assert_eq!(
            taken,
            DialogSession::AwaitingOracleAnswer {
                question: "What is patience?".into()
            }
        );
    }

    #[test]
    fn overwriting_implements_last_start_wins() {
        let mut session = DialogSession::AwaitingOracleAnswer {
            question: "q".into(),
        };
        session = DialogSession::AwaitingMagicBallQuestion;
        assert_eq!(session, DialogSession::AwaitingMagicBallQuestion);
    }
}
