/* src/server/adapter/axum/src/ui.rs */

// ANSI helpers for dev-server diagnostics.

pub(crate) const RESET: &str = "\x1b[0m";
pub(crate) const DIM: &str = "\x1b[2m";
pub(crate) const CYAN: &str = "\x1b[36m";
pub(crate) const GREEN: &str = "\x1b[32m";
pub(crate) const RED: &str = "\x1b[31m";

pub(crate) fn detail(msg: &str) {
  println!("  {DIM}{msg}{RESET}");
}

pub(crate) fn info(msg: &str) {
  println!("  {CYAN}[portico]{RESET} {msg}");
}

pub(crate) fn error(msg: &str) {
  println!("  {RED}[portico]{RESET} {msg}");
}
