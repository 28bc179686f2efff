//! The location fragment and its history.
//!
//! Changing the fragment is how navigation happens: every effective change
//! queues one [`Command::HashChanged`] for the controller, the way a browser
//! fires `hashchange`. Assigning the fragment it already holds queues nothing.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::application::site::Command;
use crate::util::lock::mutex_lock;

const SOURCE: &str = "application::location::Location";

#[derive(Debug, Default)]
struct History {
    current: String,
    back: Vec<String>,
    forward: Vec<String>,
}

#[derive(Clone)]
pub struct Location {
    history: Arc<Mutex<History>>,
    events: UnboundedSender<Command>,
}

impl Location {
    /// `initial` may carry a leading `#`; it is stored without it.
    pub fn new(initial: &str, events: UnboundedSender<Command>) -> Self {
        Self {
            history: Arc::new(Mutex::new(History {
                current: normalize(initial).to_string(),
                ..History::default()
            })),
            events,
        }
    }

    /// Current fragment, without the leading `#`.
    pub fn fragment(&self) -> String {
        mutex_lock(&self.history, SOURCE, "fragment").current.clone()
    }

    /// Point the location at `fragment`. Returns whether it changed.
    pub fn assign(&self, fragment: &str) -> bool {
        let fragment = normalize(fragment);
        {
            let mut history = mutex_lock(&self.history, SOURCE, "assign");
            if history.current == fragment {
                return false;
            }
            let previous = std::mem::replace(&mut history.current, fragment.to_string());
            history.back.push(previous);
            history.forward.clear();
        }
        self.notify(false);
        true
    }

    pub fn back(&self) -> bool {
        let moved = {
            let mut history = mutex_lock(&self.history, SOURCE, "back");
            match history.back.pop() {
                Some(previous) => {
                    let current = std::mem::replace(&mut history.current, previous);
                    history.forward.push(current);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.notify(false);
        }
        moved
    }

    pub fn forward(&self) -> bool {
        let moved = {
            let mut history = mutex_lock(&self.history, SOURCE, "forward");
            match history.forward.pop() {
                Some(next) => {
                    let current = std::mem::replace(&mut history.current, next);
                    history.back.push(current);
                    true
                }
                None => false,
            }
        };
        if moved {
            self.notify(false);
        }
        moved
    }

    /// Queue a hash change without touching the fragment.
    pub fn force_change(&self) {
        self.notify(true);
    }

    fn notify(&self, forced: bool) {
        debug!(fragment = %self.fragment(), forced, "hash changed");
        if self.events.send(Command::HashChanged).is_err() {
            warn!("hash change dropped: controller inbox closed");
        }
    }
}

fn normalize(fragment: &str) -> &str {
    fragment.strip_prefix('#').unwrap_or(fragment)
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use super::*;

    fn location(initial: &str) -> (Location, UnboundedReceiver<Command>) {
        let (tx, rx) = unbounded_channel();
        (Location::new(initial, tx), rx)
    }

    fn pending(rx: &mut UnboundedReceiver<Command>) -> usize {
        let mut count = 0;
        while rx.try_recv().is_ok() {
            count += 1;
        }
        count
    }

    #[test]
    fn assign_emits_one_change_per_effective_update() {
        let (location, mut rx) = location("#home");
        assert_eq!(location.fragment(), "home");

        assert!(location.assign("blog"));
        assert_eq!(pending(&mut rx), 1);

        assert!(!location.assign("#blog"));
        assert_eq!(pending(&mut rx), 0);
    }

    #[test]
    fn back_and_forward_walk_history() {
        let (location, mut rx) = location("");
        location.assign("blog");
        location.assign("post/p1");
        pending(&mut rx);

        assert!(location.back());
        assert_eq!(location.fragment(), "blog");
        assert!(location.back());
        assert_eq!(location.fragment(), "");
        assert!(!location.back());

        assert!(location.forward());
        assert_eq!(location.fragment(), "blog");
        assert_eq!(pending(&mut rx), 3);

        location.assign("projects");
        assert!(!location.forward(), "assign clears forward history");
    }

    #[test]
    fn forced_change_keeps_fragment() {
        let (location, mut rx) = location("blog");
        location.force_change();
        assert_eq!(location.fragment(), "blog");
        assert!(matches!(rx.try_recv(), Ok(Command::HashChanged)));
    }
}
