use ratatui::layout::Size;
use static_assertions::assert_obj_safe;
use tokio::sync::watch;

/// A source of viewport size notifications a wrapper can subscribe to.
///
/// Injected at mount time so the wrapper never reaches for global state;
/// each wrapper owns its own subscription.
pub trait ResizeEvents {
    fn subscribe(&self) -> ResizeSubscription;
}

assert_obj_safe!(ResizeEvents);

/// The host-owned resize notification channel.
///
/// The host publishes the terminal size whenever it changes; subscribers
/// observe the latest committed value. No cross-subscriber coordination
/// exists or is needed.
#[derive(Debug)]
pub struct Viewport {
    tx: watch::Sender<Size>,
}

impl Viewport {
    pub fn new(initial: Size) -> Self {
        Self {
            tx: watch::Sender::new(initial),
        }
    }

    /// Publishes a new viewport size to every subscriber.
    pub fn publish(&self, size: Size) {
        self.tx.send_replace(size);
    }

    pub fn size(&self) -> Size {
        *self.tx.borrow()
    }

    /// How many subscriptions are currently alive.
    pub fn subscribers(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl ResizeEvents for Viewport {
    fn subscribe(&self) -> ResizeSubscription {
        ResizeSubscription {
            rx: self.tx.subscribe(),
        }
    }
}

/// A wrapper-owned resize subscription. Dropping it is the single
/// release path; there is nothing else to tear down.
#[derive(Debug)]
pub struct ResizeSubscription {
    rx: watch::Receiver<Size>,
}

impl ResizeSubscription {
    /// The newly published size, if it changed since the last poll.
    pub fn poll(&mut self) -> Option<Size> {
        match self.rx.has_changed() {
            Ok(true) => Some(*self.rx.borrow_and_update()),
            _ => None,
        }
    }

    /// The latest committed size, without consuming the change.
    pub fn latest(&self) -> Size {
        *self.rx.borrow()
    }
}
