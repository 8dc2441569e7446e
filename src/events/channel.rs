//! Crossbeam plumbing between the organizer and whoever renders its events.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Organizer side of the stream. Cloneable and `Send`.
#[derive(Clone)]
pub struct EventSender {
    inner: Sender<Event>,
}

impl EventSender {
    /// Queue `event` for the presenter.
    ///
    /// A run never fails because nobody is listening; with the receiver
    /// gone the event is dropped.
    pub fn send(&self, event: Event) {
        let _ = self.inner.send(event);
    }
}

/// Presenter side of the stream
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Next event, or `None` once every sender is gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    pub fn try_recv(&self) -> Option<Event> {
        self.inner.try_recv().ok()
    }

    /// Blocking iterator that ends when the organizer drops its sender
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Everything already queued, in send order, without blocking
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// Creates linked sender/receiver pairs
pub struct EventChannel;

impl EventChannel {
    /// Unbounded so a slow terminal never stalls the copy loop
    pub fn new() -> (EventSender, EventReceiver) {
        let (sender, receiver) = unbounded();
        (
            EventSender { inner: sender },
            EventReceiver { inner: receiver },
        )
    }
}

/// Sender for runs nobody watches (library callers, tests)
pub fn null_sender() -> EventSender {
    EventChannel::new().0
}
