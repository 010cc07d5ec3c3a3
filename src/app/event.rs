//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background reader
//! that forwards them over a channel so the main loop stays non-blocking.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    /// Bracketed paste into the input box.
    Paste(String),
    Resize(u16, u16),
}

/// Spawns a blocking reader that polls the terminal and sends events
/// through the returned channel.  The reader stops within one `poll_rate`
/// after the receiver is dropped, and closes the channel if the terminal
/// can no longer be read.
pub fn spawn_event_reader(poll_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        pump(&tx, || {
            if event::poll(poll_rate)? {
                event::read().map(Some)
            } else {
                Ok(None)
            }
        });
    });

    rx
}

/// Forward events from `next` until the receiver is gone or `next` fails.
/// `Ok(None)` means nothing arrived within the poll interval.
fn pump(
    tx: &mpsc::UnboundedSender<AppEvent>,
    mut next: impl FnMut() -> io::Result<Option<CtEvent>>,
) {
    while !tx.is_closed() {
        let ev = match next() {
            Ok(Some(ev)) => ev,
            Ok(None) => continue,
            Err(err) => {
                tracing::error!(%err, "terminal event reader failed");
                break;
            }
        };
        let app_event = match ev {
            CtEvent::Key(k) => AppEvent::Key(k),
            CtEvent::Mouse(m) => AppEvent::Mouse(m),
            CtEvent::Paste(text) => AppEvent::Paste(text),
            CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
            _ => continue,
        };
        if tx.send(app_event).is_err() {
            break; // receiver dropped
        }
    }
}
