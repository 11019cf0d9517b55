use std::sync::Arc;

use fortuna_core::{
    AuditSink, Command, InboundEvent, NullAudit, Reply, ReplyFormat, Responder, UserId,
    loader::load_pools,
};
use teloxide::dispatching::UpdateFilterExt;
use teloxide::dptree;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::types::{ParseMode, Update};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod audit;
mod config;
mod keyboard;

#[tokio::main]
async fn main() {
    // Load .env if present (dev only)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fortuna_bot=info,fortuna_core=info,teloxide=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env().expect("invalid configuration");
    let pool = load_pools(&config.content_dir);

    let bot = Bot::new(config.token.clone());

    let audit: Arc<dyn AuditSink> = match config.admin_chat {
        Some(chat) => audit::TelegramAudit::spawn(bot.clone(), ChatId(chat)),
        None => {
            tracing::info!("FORTUNA_ADMIN_CHAT not set, admin audit disabled");
            Arc::new(NullAudit)
        }
    };

    let responder = Arc::new(Responder::new(pool, audit));

    let handler = dptree::entry().branch(Update::filter_message().endpoint(message_handler));

    tracing::info!("fortuna bot starting long polling");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![responder])
        .default_handler(|update| async move {
            tracing::debug!(?update, "unhandled update");
        })
        .error_handler(LoggingErrorHandler::with_custom_text(
            "error in message handler",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::warn!("dispatcher stopped");
}

/// Map one Telegram message to a core event, then send the replies back,
/// honoring each reply's pacing pause and attaching the menu on /start.
async fn message_handler(
    bot: Bot,
    msg: Message,
    responder: Arc<Responder>,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };

    let sender = msg
        .from
        .as_ref()
        .map(|user| UserId(user.id.0 as i64))
        .unwrap_or(UserId(msg.chat.id.0));
    let display_name = msg
        .from
        .as_ref()
        .map(|user| user.first_name.clone())
        .unwrap_or_else(|| "friend".to_string());

    let event = InboundEvent {
        sender,
        display_name,
        text: text.to_string(),
    };
    let attach_menu = Command::parse(text) == Some(Command::Start);

    for reply in responder.handle(&event) {
        if let Some(pause) = reply.pause_before {
            tokio::time::sleep(pause).await;
        }
        send_reply(&bot, msg.chat.id, &reply, attach_menu).await?;
    }

    Ok(())
}

async fn send_reply(
    bot: &Bot,
    chat: ChatId,
    reply: &Reply,
    attach_menu: bool,
) -> ResponseResult<()> {
    let mut request = bot.send_message(chat, reply.text.clone());
    if reply.format == ReplyFormat::Rich {
        request = request.parse_mode(ParseMode::Markdown);
    }
    if attach_menu {
        request = request.reply_markup(keyboard::main_menu());
    }
    request.await?;
    Ok(())
}
