//! Single slot mailbox published with volatile reads and writes.

use std::sync::atomic::{AtomicBool, AtomicU32};
use std::sync::Arc;

use foundation_threading::{volatile_read, volatile_write, SpinYield};

/// Number of words carried per message.
pub const MESSAGE_WORDS: usize = 4;

/// A one-message slot shared by exactly one producer and one consumer.
///
/// The producer writes every payload word and then publishes the `full`
/// flag; the consumer observes the flag and then reads the payload. The
/// flag is the only synchronisation, so the words are only guaranteed to be
/// consistent if the volatile write/read pair orders them.
///
/// # Examples
///
/// ```
/// use foundation_testing::scenarios::Mailbox;
/// use std::thread;
///
/// let mailbox = Mailbox::new();
///
/// let producer_box = mailbox.clone();
/// let producer = thread::spawn(move || {
///     for seq in 1..=10 {
///         producer_box.post(seq);
///     }
/// });
///
/// for seq in 1..=10 {
///     assert_eq!(mailbox.take(), Mailbox::expand(seq));
/// }
/// producer.join().unwrap();
/// ```
#[derive(Clone, Default)]
pub struct Mailbox {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    words: [AtomicU32; MESSAGE_WORDS],
    full: AtomicBool,
}

impl Mailbox {
    /// Creates an empty mailbox.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The payload a message with sequence `seq` carries.
    #[must_use]
    pub fn expand(seq: u32) -> [u32; MESSAGE_WORDS] {
        let mut words = [0; MESSAGE_WORDS];
        for (position, word) in (0u32..).zip(words.iter_mut()) {
            *word = seq.wrapping_mul(31).wrapping_add(position);
        }
        words
    }

    /// Publishes message `seq` if the slot is empty.
    #[must_use]
    pub fn try_post(&self, seq: u32) -> bool {
        if volatile_read(&self.inner.full) {
            return false;
        }
        for (word, value) in self.inner.words.iter().zip(Self::expand(seq)) {
            volatile_write(word, value);
        }
        volatile_write(&self.inner.full, true);
        true
    }

    /// Spins until the slot is empty, then publishes message `seq`.
    pub fn post(&self, seq: u32) {
        let mut spins = SpinYield::new();
        while !self.try_post(seq) {
            spins.tick();
        }
    }

    /// Takes the pending message, if any.
    #[must_use]
    pub fn try_take(&self) -> Option<[u32; MESSAGE_WORDS]> {
        if !volatile_read(&self.inner.full) {
            return None;
        }
        let mut words = [0; MESSAGE_WORDS];
        for (slot, word) in words.iter_mut().zip(self.inner.words.iter()) {
            *slot = volatile_read(word);
        }
        volatile_write(&self.inner.full, false);
        Some(words)
    }

    /// Spins until a message is available and takes it.
    #[must_use]
    pub fn take(&self) -> [u32; MESSAGE_WORDS] {
        let mut spins = SpinYield::new();
        loop {
            if let Some(words) = self.try_take() {
                return words;
            }
            spins.tick();
        }
    }
}
