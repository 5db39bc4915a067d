use std::cell::RefCell;
use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent};

use crate::game::Session;

/// Events that drive a play-through: player input, terminal resizes, and the
/// 1 Hz game tick synthesized by [`GameClock`] when no input arrives.
#[derive(Clone, Debug)]
pub enum GameEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

/// Where events come from. Production reads the terminal; tests script a
/// queue. Returning `None` means nothing happened within `wait`.
pub trait EventSource {
    fn poll(&self, wait: Duration) -> Option<GameEvent>;
}

/// Terminal-backed event source. A reader thread forwards crossterm key and
/// resize events into a channel; everything else is dropped.
pub struct CrosstermEventSource {
    rx: Receiver<GameEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(CtEvent::Key(key)) => GameEvent::Key(key),
                Ok(CtEvent::Resize(_, _)) => GameEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn poll(&self, wait: Duration) -> Option<GameEvent> {
        self.rx.recv_timeout(wait).ok()
    }
}

/// Scripted event source for driving a session without a terminal. Events are
/// handed out in order, ignoring the wait; an exhausted queue reads as
/// elapsed time, one tick per poll.
pub struct QueuedEvents {
    queue: RefCell<VecDeque<GameEvent>>,
}

impl QueuedEvents {
    pub fn new(events: impl IntoIterator<Item = GameEvent>) -> Self {
        Self {
            queue: RefCell::new(events.into_iter().collect()),
        }
    }
}

impl EventSource for QueuedEvents {
    fn poll(&self, _wait: Duration) -> Option<GameEvent> {
        self.queue.borrow_mut().pop_front()
    }
}

/// The game's scheduler: waits one tick interval for input, and when none
/// arrives turns the elapsed interval into a second of game time. The
/// [`Session`] never owns a timer; every second it sees comes through here.
pub struct GameClock<S: EventSource> {
    events: S,
    tick_every: Duration,
}

impl<S: EventSource> GameClock<S> {
    pub fn new(events: S, tick_every: Duration) -> Self {
        Self { events, tick_every }
    }

    /// Blocks until the next event. Ticks, whether synthesized from a
    /// timeout or injected by a scripted source, are applied to the session
    /// before being returned, so callers only handle input.
    pub fn advance(&self, session: &mut Session) -> GameEvent {
        match self.events.poll(self.tick_every) {
            Some(GameEvent::Tick) | None => {
                session.on_tick();
                GameEvent::Tick
            }
            Some(ev) => ev,
        }
    }
}
