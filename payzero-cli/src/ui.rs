//! Terminal rendering for the payzero CLI.
//!
//! Status lines, the labeled field layout used by the home and confirm
//! panels, and the domain formatters: `@username` handles, ticker-suffixed
//! amounts, shortened hex addresses, and explorer links.

use colored::{ColoredString, Colorize};
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

fn status(glyph: ColoredString, message: &str) {
    println!("{} {}", glyph, message);
}

pub fn success(message: &str) {
    status("✓".green().bold(), message);
}

pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

pub fn info(message: &str) {
    status("ℹ".blue().bold(), message);
}

pub fn warning(message: &str) {
    status("⚠".yellow().bold(), message);
}

/// Section title with a rule sized to it.
pub fn header(text: &str) {
    println!("\n{}", text.bold());
    println!("{}", "─".repeat(text.chars().count().max(8)).dimmed());
}

/// One labeled line in a panel, labels aligned across the panel.
pub fn field(label: &str, value: &str) {
    println!("  {} {}", format!("{:<9}", format!("{}:", label)).cyan(), value);
}

/// A `@username` handle in the accent color.
pub fn handle(username: &str) -> String {
    format!("@{}", username).cyan().bold().to_string()
}

/// An amount with its ticker, e.g. `12.5 USDC`.
pub fn amount(value: &str, ticker: &str) -> String {
    format!("{} {}", value.bold(), ticker.dimmed())
}

/// Shorten a hex address for one-line display: `0x036CbD…CF7e`.
pub fn short_address(address: &str) -> String {
    if address.is_ascii() && address.len() > 13 {
        format!("{}…{}", &address[..8], &address[address.len() - 4..])
    } else {
        address.to_string()
    }
}

/// An explorer or faucet URL.
pub fn link(url: &str) -> String {
    url.blue().underline().to_string()
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn confirm(prompt: &str, default: bool) -> anyhow::Result<bool> {
    use dialoguer::Confirm;
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

pub fn input(prompt: &str) -> anyhow::Result<String> {
    use dialoguer::Input;
    Ok(Input::new().with_prompt(prompt).interact_text()?)
}

/// Render a payload as a scannable QR block.
pub fn qr_code(data: &str) -> anyhow::Result<()> {
    use qrcode::render::unicode;
    use qrcode::QrCode;

    let code = QrCode::new(data)?;
    let image = code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build();
    println!("\n{}\n", image);
    Ok(())
}

/// Separator sized to the terminal.
pub fn separator() {
    let width = Term::stdout().size().1 as usize;
    println!("{}", "─".repeat(width.clamp(20, 60)).dimmed());
}
