use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use fortuna_core::loader::load_pools;
use fortuna_core::{InboundEvent, NullAudit, Responder, UserId};

#[derive(Parser)]
#[command(
    name = "fortuna",
    version,
    about = "Fortuna REPL: chat with the fortune responder locally, no bot token needed"
)]
struct Cli {
    /// Directory holding the content pool files
    #[arg(long, env = "FORTUNA_CONTENT_DIR", default_value = "content")]
    content_dir: PathBuf,

    /// User id to converse as (per-user state is keyed by this)
    #[arg(long, default_value_t = 1)]
    user_id: i64,

    /// Display name used in personalized replies
    #[arg(long, default_value = "friend")]
    name: String,
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let pool = load_pools(&cli.content_dir);
    let responder = Responder::new(pool, Arc::new(NullAudit));

    println!("fortuna REPL: type /help for commands, Ctrl-D to exit");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let event = InboundEvent {
            sender: UserId(cli.user_id),
            display_name: cli.name.clone(),
            text: text.to_string(),
        };
        // Pacing pauses are transport-side; the REPL skips them.
        for reply in responder.handle(&event) {
            println!("{}\n", reply.text);
        }
    }

    Ok(())
}
