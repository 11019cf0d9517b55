use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use rand::Rng;

use crate::audit::AuditSink;
use crate::command::Command;
use crate::daily::{
    self, FeatureKind, LUCK_INDEX_MAX, LUCK_INDEX_MIN, LuckTier, MAGIC_ENERGY_MAX,
    MAGIC_ENERGY_MIN,
};
use crate::pool::{Category, ContentPool};
use crate::session::DialogSession;
use crate::store::{StateStore, UserId};

/// Pause the transport may insert before a payload reply. Cosmetic pacing
/// only; a transport is free to skip it.
pub const THINKING_PAUSE: Duration = Duration::from_secs(2);

const UNRECOGNIZED: &str = "I don't understand that. Try pressing one of the buttons! 😊";

const NO_HISTORY: &str =
    "📜 You have no predictions yet. Send /prediction to get your first one!";

const ORACLE_INTRO: &str = "🧙 *The Oracle is wise and mysterious...*\n\n\
The Oracle will ask you a philosophical question. Write your answer, and he \
will give you a cryptic but wise interpretation. Sometimes the truth hides \
where we never look for it... 🔮\n\n\
Ready? Then listen closely... 👂";

const MAGIC_BALL_PROMPT: &str =
    "🎱 *The magic 8-ball awaits your question!* Ask anything and I will answer!";

const HELP: &str = "ℹ️ *How to use the fortune bot*\n\n\
🔮 *Commands:*\n\
/prediction – Get a random prediction.\n\
/magic – Check your magic energy level.\n\
/luck – Check your luck index.\n\
/oracle – The Oracle asks a philosophical question, then interprets your answer.\n\
/ritual – Get your task for today.\n\
/magicball – Ask the magic 8-ball a question.\n\
/history – See your recent predictions.\n\
/help – This help.\n\n\
The bot works with buttons too, just tap the one you need!";

/// One inbound chat event, already stripped of transport detail.
#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub sender: UserId,
    pub display_name: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Plain,
    Rich,
}

/// One outbound message. `pause_before` is the optional pacing step the
/// transport may honor or skip; the core never sleeps itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
    pub pause_before: Option<Duration>,
}

impl Reply {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
            pause_before: None,
        }
    }

    pub fn rich(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Rich,
            pause_before: None,
        }
    }

    pub fn after_pause(mut self, pause: Duration) -> Self {
        self.pause_before = Some(pause);
        self
    }
}

/// The conversational core: routes one inbound event to a feature handler
/// or the session resolver and produces the ordered replies.
pub struct Responder {
    pool: ContentPool,
    store: StateStore,
    audit: Arc<dyn AuditSink>,
}

impl Responder {
    pub fn new(pool: ContentPool, audit: Arc<dyn AuditSink>) -> Self {
        Self {
            pool,
            store: StateStore::default(),
            audit,
        }
    }

    /// Handle one inbound event against the local calendar day.
    pub fn handle(&self, event: &InboundEvent) -> Vec<Reply> {
        self.handle_on(event, Local::now().date_naive())
    }

    /// Dispatch precedence: recognized command first, then active-session
    /// answer, then the fixed unrecognized-input reply. Command recognition
    /// deliberately precedes session-answer consumption, so a command sent
    /// mid-dialog is never swallowed as "the answer".
    pub fn handle_on(&self, event: &InboundEvent, today: NaiveDate) -> Vec<Reply> {
        if let Some(command) = Command::parse(&event.text) {
            tracing::debug!(user = %event.sender, command = command.token(), "dispatching command");
            self.audit
                .notify(event.sender, &event.display_name, command.token());
            return match command {
                Command::Start => self.welcome(event),
                Command::Help => vec![Reply::rich(HELP)],
                Command::Prediction => self.prediction(event),
                Command::Magic => self.magic_energy(event.sender, today),
                Command::Luck => self.luck_index(event.sender, today),
                Command::Oracle => self.start_oracle(event.sender),
                Command::Ritual => self.daily_ritual(event.sender, today),
                Command::MagicBall => self.start_magic_ball(event.sender),
                Command::History => self.history(event.sender),
            };
        }

        match self.store.with_user(event.sender, |state| state.session.take()) {
            DialogSession::Idle => vec![Reply::plain(UNRECOGNIZED)],
            DialogSession::AwaitingOracleAnswer { .. } => {
                tracing::debug!(user = %event.sender, "closing oracle dialog");
                vec![Reply::plain(format!(
                    "📜 The Oracle speaks: {}",
                    self.pool.pick(Category::OracleResponses)
                ))]
            }
            DialogSession::AwaitingMagicBallQuestion => {
                tracing::debug!(user = %event.sender, "closing magic-ball dialog");
                vec![Reply::plain(format!(
                    "🔮 The ball replies: {}",
                    self.pool.pick(Category::MagicBallResponses)
                ))]
            }
        }
    }

    fn welcome(&self, event: &InboundEvent) -> Vec<Reply> {
        vec![Reply::rich(format!(
            "🔮 Hi, {}!\n\nI am a fortune-telling bot. Want to know what \
             today holds for you? Just use one of the commands below! 👇",
            event.display_name
        ))]
    }

    fn prediction(&self, event: &InboundEvent) -> Vec<Reply> {
        let prediction = self.pool.pick(Category::Predictions);
        self.store
            .with_user(event.sender, |state| state.history.append(prediction.clone()));
        vec![
            Reply::plain("🔮 I am gazing into the future... give me a second... 🤔"),
            Reply::plain(format!(
                "🔮 Here is what the stars see for you today, {}:\n\n{}",
                event.display_name, prediction
            ))
            .after_pause(THINKING_PAUSE),
        ]
    }

    fn magic_energy(&self, user: UserId, today: NaiveDate) -> Vec<Reply> {
        let (value, fresh) = self.store.with_user(user, |state| {
            daily::get_or_compute(&mut state.magic, today, || {
                rand::thread_rng().gen_range(MAGIC_ENERGY_MIN..=MAGIC_ENERGY_MAX)
            })
        });
        tracing::debug!(%user, feature = ?FeatureKind::MagicEnergy, value, fresh, "daily value served");
        if fresh {
            vec![Reply::plain(format!(
                "✨ Your magic energy level today is {value}%!"
            ))]
        } else {
            vec![Reply::plain(format!(
                "🔒 You already checked your magic energy today!\n\n\
                 ✨ Your magic level: {value}%\n🔄 Come back tomorrow!"
            ))]
        }
    }

    fn luck_index(&self, user: UserId, today: NaiveDate) -> Vec<Reply> {
        let (value, fresh) = self.store.with_user(user, |state| {
            daily::get_or_compute(&mut state.luck, today, || {
                rand::thread_rng().gen_range(LUCK_INDEX_MIN..=LUCK_INDEX_MAX)
            })
        });
        tracing::debug!(%user, feature = ?FeatureKind::LuckIndex, value, fresh, "daily value served");
        let comment = LuckTier::for_value(value).comment();
        if fresh {
            vec![Reply::plain(format!(
                "🌟 Luck index for today: {value}%\n\n{comment}"
            ))]
        } else {
            vec![Reply::plain(format!(
                "🌟 You already checked your luck today!\n\n\
                 🎲 Your luck index: {value}%\n{comment}\n🔄 Come back tomorrow!"
            ))]
        }
    }

    fn start_oracle(&self, user: UserId) -> Vec<Reply> {
        let question = self.pool.pick(Category::OracleQuestions);
        self.store.with_user(user, |state| {
            state.session = DialogSession::AwaitingOracleAnswer {
                question: question.clone(),
            };
        });
        vec![
            Reply::rich(ORACLE_INTRO),
            Reply::plain(format!(
                "🔮 The Oracle asks you:\n\n{question}\n\n💭 Write your answer!"
            ))
            .after_pause(THINKING_PAUSE),
        ]
    }

    fn daily_ritual(&self, user: UserId, today: NaiveDate) -> Vec<Reply> {
        let (ritual, fresh) = self.store.with_user(user, |state| {
            daily::get_or_compute(&mut state.ritual, today, || {
                self.pool.pick(Category::DailyRituals)
            })
        });
        tracing::debug!(%user, feature = ?FeatureKind::DailyRitual, fresh, "daily value served");
        if fresh {
            vec![Reply::plain(format!("📜 Your task for the day:\n\n{ritual}"))]
        } else {
            vec![Reply::plain(format!(
                "📜 Your task for today:\n\n{ritual}\n\n🔄 Come back tomorrow for a new one!"
            ))]
        }
    }

    fn start_magic_ball(&self, user: UserId) -> Vec<Reply> {
        self.store.with_user(user, |state| {
            state.session = DialogSession::AwaitingMagicBallQuestion;
        });
        vec![Reply::rich(MAGIC_BALL_PROMPT)]
    }

    fn history(&self, user: UserId) -> Vec<Reply> {
        let entries: Vec<String> = self
            .store
            .with_user(user, |state| state.history.iter().map(String::from).collect());
        if entries.is_empty() {
            vec![Reply::plain(NO_HISTORY)]
        } else {
            vec![Reply::plain(format!(
                "📜 Your prediction history:\n\n{}",
                entries.join("\n\n")
            ))]
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::NaiveDate;

    use super::{InboundEvent, Reply, Responder, THINKING_PAUSE};
    use crate::audit::AuditSink;
    use crate::pool::{Category, ContentPool};
    use crate::session::DialogSession;
    use crate::store::UserId;

    #[derive(Default)]
    struct RecordingAudit {
        calls: Mutex<Vec<(UserId, String, String)>>,
    }

    impl RecordingAudit {
        fn actions(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|(_, _, action)| action.clone())
                .collect()
        }
    }

    impl AuditSink for RecordingAudit {
        fn notify(&self, user: UserId, display_name: &str, action: &str) {
            self.calls.lock().unwrap().push((
                user,
                display_name.to_string(),
                action.to_string(),
            ));
        }
    }

    fn full_pool() -> ContentPool {
        let mut pool = ContentPool::default();
        pool.set(Category::Predictions, vec!["You will find a coin.".into()]);
        pool.set(Category::OracleQuestions, vec!["What is patience?".into()]);
        pool.set(Category::OracleResponses, vec!["Time answers all.".into()]);
        pool.set(Category::DailyRituals, vec!["Light a candle.".into()]);
        pool.set(Category::MagicBallResponses, vec!["Signs point to yes.".into()]);
        pool
    }

    fn responder_with(pool: ContentPool) -> (Responder, Arc<RecordingAudit>) {
        let audit = Arc::new(RecordingAudit::default());
        (Responder::new(pool, audit.clone()), audit)
    }

    fn responder() -> (Responder, Arc<RecordingAudit>) {
        responder_with(full_pool())
    }

    fn event(user: i64, text: &str) -> InboundEvent {
        InboundEvent {
            sender: UserId(user),
            display_name: "Alice".to_string(),
            text: text.to_string(),
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn texts(replies: &[Reply]) -> Vec<&str> {
        replies.iter().map(|r| r.text.as_str()).collect()
    }

    #[test]
    fn prediction_sends_acknowledgement_then_paced_payload() {
        let (responder, _) = responder();
        let replies = responder.handle_on(&event(1, "/prediction"), day(1));
        assert_eq!(replies.len(), 2);
        assert!(replies[0].text.contains("gazing into the future"));
        assert_eq!(replies[0].pause_before, None);
        assert!(replies[1].text.contains("You will find a coin."));
        assert!(replies[1].text.contains("Alice"));
        assert_eq!(replies[1].pause_before, Some(THINKING_PAUSE));
    }

    #[test]
    fn history_shows_last_three_predictions_in_order() {
        let (responder, _) = responder();
        for _ in 0..3 {
            responder.handle_on(&event(1, "/prediction"), day(1));
        }
        let replies = responder.handle_on(&event(1, "/history"), day(1));
        assert_eq!(replies.len(), 1);
        let shown = replies[0].text.matches("You will find a coin.").count();
        assert_eq!(shown, 3);

        // A fourth prediction evicts the first; the bound stays at three.
        responder.handle_on(&event(1, "/prediction"), day(1));
        let replies = responder.handle_on(&event(1, "/history"), day(1));
        assert_eq!(replies[0].text.matches("You will find a coin.").count(), 3);
    }

    #[test]
    fn empty_history_gets_a_guidance_reply() {
        let (responder, _) = responder();
        let replies = responder.handle_on(&event(1, "/history"), day(1));
        assert_eq!(
            texts(&replies),
            [super::NO_HISTORY]
        );
    }

    #[test]
    fn history_is_per_user() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/prediction"), day(1));
        let replies = responder.handle_on(&event(2, "/history"), day(1));
        assert!(replies[0].text.contains("no predictions yet"));
    }

    #[test]
    fn luck_same_day_repeats_value_and_tier_without_redraw() {
        let (responder, _) = responder();
        let first = responder.handle_on(&event(1, "/luck"), day(1));
        assert!(first[0].text.contains("Luck index for today"));

        let stored = responder
            .store
            .with_user(UserId(1), |state| state.luck.clone())
            .expect("luck record stored");
        let second = responder.handle_on(&event(1, "/luck"), day(1));
        assert!(second[0].text.contains("already checked your luck"));
        assert!(second[0].text.contains(&format!("{}%", stored.value)));
        assert!(second[0]
            .text
            .contains(crate::daily::LuckTier::for_value(stored.value).comment()));

        // No redraw happened.
        let after = responder
            .store
            .with_user(UserId(1), |state| state.luck.clone())
            .unwrap();
        assert_eq!(after, stored);
    }

    #[test]
    fn luck_recomputes_on_the_next_day() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/luck"), day(1));
        let replies = responder.handle_on(&event(1, "/luck"), day(2));
        assert!(replies[0].text.contains("Luck index for today"));
        let record = responder
            .store
            .with_user(UserId(1), |state| state.luck.clone())
            .unwrap();
        assert_eq!(record.day, day(2));
    }

    #[test]
    fn magic_energy_is_day_gated_per_user() {
        let (responder, _) = responder();
        let first = responder.handle_on(&event(1, "/magic"), day(1));
        assert!(first[0].text.contains("Your magic energy level today"));
        let second = responder.handle_on(&event(1, "/magic"), day(1));
        assert!(second[0].text.contains("already checked your magic energy"));
        // A different user is not gated by the first user's check.
        let other = responder.handle_on(&event(2, "/magic"), day(1));
        assert!(other[0].text.contains("Your magic energy level today"));
    }

    #[test]
    fn ritual_repeats_the_same_task_within_a_day() {
        let (responder, _) = responder();
        let first = responder.handle_on(&event(1, "/ritual"), day(1));
        assert!(first[0].text.contains("Light a candle."));
        let second = responder.handle_on(&event(1, "/ritual"), day(1));
        assert!(second[0].text.contains("Light a candle."));
        assert!(second[0].text.contains("Come back tomorrow"));
    }

    #[test]
    fn oracle_dialog_opens_answers_and_closes() {
        let (responder, _) = responder();
        let replies = responder.handle_on(&event(1, "/oracle"), day(1));
        assert_eq!(replies.len(), 2);
        assert!(replies[1].text.contains("What is patience?"));
        assert_eq!(replies[1].pause_before, Some(THINKING_PAUSE));

        let session = responder
            .store
            .with_user(UserId(1), |state| state.session.clone());
        assert_eq!(
            session,
            DialogSession::AwaitingOracleAnswer {
                question: "What is patience?".into()
            }
        );

        let answer = responder.handle_on(&event(1, "42"), day(1));
        assert_eq!(
            texts(&answer),
            ["📜 The Oracle speaks: Time answers all."]
        );
        let session = responder
            .store
            .with_user(UserId(1), |state| state.session.clone());
        assert!(session.is_idle());

        // A subsequent /oracle starts a fresh dialog.
        let replies = responder.handle_on(&event(1, "/oracle"), day(1));
        assert_eq!(replies.len(), 2);
    }

    #[test]
    fn magic_ball_dialog_answers_any_question() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/magicball"), day(1));
        let answer = responder.handle_on(&event(1, "Will it rain?"), day(1));
        assert_eq!(
            texts(&answer),
            ["🔮 The ball replies: Signs point to yes."]
        );
    }

    #[test]
    fn starting_a_second_dialog_overwrites_the_first() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/oracle"), day(1));
        responder.handle_on(&event(1, "/magicball"), day(1));
        let answer = responder.handle_on(&event(1, "anything"), day(1));
        assert!(answer[0].text.contains("The ball replies"));
    }

    #[test]
    fn commands_take_precedence_over_session_answers() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/oracle"), day(1));
        let replies = responder.handle_on(&event(1, "/luck"), day(1));
        assert!(replies[0].text.contains("Luck index for today"));
        // The dialog is still waiting for its answer.
        let session = responder
            .store
            .with_user(UserId(1), |state| state.session.clone());
        assert!(!session.is_idle());
    }

    #[test]
    fn sessions_are_per_user() {
        let (responder, _) = responder();
        responder.handle_on(&event(1, "/oracle"), day(1));
        let replies = responder.handle_on(&event(2, "hello"), day(1));
        assert_eq!(texts(&replies), [super::UNRECOGNIZED]);
    }

    #[test]
    fn unknown_input_outside_a_session_gets_the_fixed_reply() {
        let (responder, _) = responder();
        let replies = responder.handle_on(&event(1, "what do you do?"), day(1));
        assert_eq!(texts(&replies), [super::UNRECOGNIZED]);
    }

    #[test]
    fn start_and_help_reply_rich() {
        let (responder, _) = responder();
        let start = responder.handle_on(&event(1, "/start"), day(1));
        assert_eq!(start.len(), 1);
        assert_eq!(start[0].format, super::ReplyFormat::Rich);
        assert!(start[0].text.contains("Alice"));
        let help = responder.handle_on(&event(1, "/help"), day(1));
        assert!(help[0].text.contains("/prediction"));
    }

    #[test]
    fn button_labels_dispatch_like_their_commands() {
        let (responder, audit) = responder();
        let replies = responder.handle_on(&event(1, "🎲 Check your luck"), day(1));
        assert!(replies[0].text.contains("Luck index for today"));
        assert_eq!(audit.actions(), ["/luck"]);
    }

    #[test]
    fn audit_fires_once_per_command_and_never_for_free_text() {
        let (responder, audit) = responder();
        responder.handle_on(&event(1, "/oracle"), day(1));
        responder.handle_on(&event(1, "my answer"), day(1));
        responder.handle_on(&event(1, "gibberish"), day(1));
        responder.handle_on(&event(1, "/history"), day(1));
        assert_eq!(audit.actions(), ["/oracle", "/history"]);

        let calls = audit.calls.lock().unwrap();
        assert_eq!(calls[0].0, UserId(1));
        assert_eq!(calls[0].1, "Alice");
    }

    #[test]
    fn empty_pools_fall_back_instead_of_failing() {
        let (responder, _) = responder_with(ContentPool::default());
        let replies = responder.handle_on(&event(1, "/prediction"), day(1));
        assert!(replies[1].text.contains(Category::Predictions.fallback()));

        responder.handle_on(&event(1, "/magicball"), day(1));
        let answer = responder.handle_on(&event(1, "anything"), day(1));
        assert!(answer[0]
            .text
            .contains(Category::MagicBallResponses.fallback()));
    }
}
