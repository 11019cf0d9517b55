use fortuna_core::Command;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

/// Persistent quick-reply menu shown with the welcome message. Button
/// labels are the exact strings the command table recognizes.
pub fn main_menu() -> KeyboardMarkup {
    let rows: Vec<Vec<KeyboardButton>> = vec![
        vec![button(Command::Prediction)],
        vec![button(Command::Magic)],
        vec![button(Command::Luck)],
        vec![button(Command::Oracle)],
        vec![button(Command::Ritual)],
        vec![button(Command::MagicBall)],
        vec![button(Command::History), button(Command::Help)],
    ];
    let mut markup = KeyboardMarkup::new(rows);
    markup.resize_keyboard = true;
    markup
}

fn button(command: Command) -> KeyboardButton {
    KeyboardButton::new(command.label().unwrap_or(command.token()))
}
