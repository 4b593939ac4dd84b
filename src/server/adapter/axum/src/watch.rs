/* src/server/adapter/axum/src/watch.rs */

use std::sync::Arc;
use std::time::Duration;

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use portico_server::{ReconciliationController, WatchEventKind};
use tokio::sync::mpsc;

use crate::ui;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Watch the project root and feed filesystem changes to the controller.
/// Runs until the watcher backend drops its channel.
pub async fn run_watch(controller: Arc<ReconciliationController>) -> notify::Result<()> {
  let (mut watcher, mut rx) = setup_watcher()?;
  watcher.watch(controller.root(), RecursiveMode::Recursive)?;

  while let Some(first) = rx.recv().await {
    // Editors fire bursts of events per save; collapse a burst into one
    // dispatch pass.
    tokio::time::sleep(DEBOUNCE).await;
    let mut events = vec![first];
    while let Ok(more) = rx.try_recv() {
      events.push(more);
    }
    for event in events {
      let Some(kind) = event_kind(&event.kind) else { continue };
      for path in &event.paths {
        if controller.notify_file_changed(path) {
          ui::info(&format!("template changed: {} (full reload)", path.display()));
        }
        controller.handle_watch_event(kind, path);
      }
    }
  }
  Ok(())
}

fn setup_watcher() -> notify::Result<(RecommendedWatcher, mpsc::Receiver<notify::Event>)> {
  let (tx, rx) = mpsc::channel(16);
  let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
    if let Ok(event) = res {
      // The notify callback runs on its own thread, so a blocking send
      // into the async side is fine here.
      let _ = tx.blocking_send(event);
    }
  })?;
  Ok((watcher, rx))
}

fn event_kind(kind: &EventKind) -> Option<WatchEventKind> {
  match kind {
    EventKind::Create(_) => Some(WatchEventKind::Create),
    EventKind::Modify(_) => Some(WatchEventKind::Modify),
    EventKind::Remove(_) => Some(WatchEventKind::Remove),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use notify::event::{CreateKind, ModifyKind, RemoveKind};

  use super::*;

  #[test]
  fn maps_supported_event_kinds() {
    assert_eq!(event_kind(&EventKind::Create(CreateKind::File)), Some(WatchEventKind::Create));
    assert_eq!(
      event_kind(&EventKind::Modify(ModifyKind::Any)),
      Some(WatchEventKind::Modify)
    );
    assert_eq!(event_kind(&EventKind::Remove(RemoveKind::File)), Some(WatchEventKind::Remove));
    assert_eq!(event_kind(&EventKind::Access(notify::event::AccessKind::Any)), None);
  }
}
