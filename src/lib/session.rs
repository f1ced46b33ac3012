//! Module for keeping track of image macros that are waiting for their captions.
//!
//! Chat front ends usually ask for the source image first
//! and for the caption text in a follow-up message.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use parking_lot::Mutex;


/// Source of an image macro that awaits its caption text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PendingMeme {
    /// Name of a stored template.
    Template(String),
    /// URL of a remote image.
    Url(String),
}

impl fmt::Display for PendingMeme {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PendingMeme::Template(ref name) => write!(fmt, "template `{}`", name),
            PendingMeme::Url(ref url) => write!(fmt, "image at {}", url),
        }
    }
}


/// Pending image macros, one per conversation.
///
/// Entries should be `take`n once the image macro is created,
/// or its creation has failed.
pub struct PendingMemes<K> {
    pending: Mutex<HashMap<K, PendingMeme>>,
}

impl<K: Eq + Hash> PendingMemes<K> {
    #[inline]
    pub fn new() -> Self {
        PendingMemes{pending: Mutex::new(HashMap::new())}
    }

    /// Remember the pending image macro for given conversation,
    /// returning the one it replaces (if any).
    pub fn set(&self, key: K, meme: PendingMeme) -> Option<PendingMeme> {
        trace!("New pending image macro: {}", meme);
        self.pending.lock().insert(key, meme)
    }

    /// Remove the pending image macro of given conversation and return it.
    #[inline]
    pub fn take(&self, key: &K) -> Option<PendingMeme> {
        self.pending.lock().remove(key)
    }

    #[inline]
    pub fn get(&self, key: &K) -> Option<PendingMeme> {
        self.pending.lock().get(key).cloned()
    }

    /// Forget all pending image macros.
    pub fn clear(&self) {
        let mut pending = self.pending.lock();
        debug!("Clearing {} pending image macro(s)", pending.len());
        pending.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

impl<K: Eq + Hash> Default for PendingMemes<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> fmt::Debug for PendingMemes<K> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "PendingMemes({} pending)", self.pending.lock().len())
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use spectral::prelude::*;

    use super::{PendingMeme, PendingMemes};

    #[test]
    fn set_and_take() {
        let pending = PendingMemes::new();
        assert!(pending.is_empty());

        assert_that!(pending.set(42u64, PendingMeme::Template("drake.png".into()))).is_none();
        assert_eq!(1, pending.len());
        assert_eq!(Some(PendingMeme::Template("drake.png".into())), pending.get(&42));

        assert_eq!(Some(PendingMeme::Template("drake.png".into())), pending.take(&42));
        assert_that!(pending.take(&42)).is_none();
        assert!(pending.is_empty());
    }

    #[test]
    fn set_replaces_previous() {
        let pending = PendingMemes::new();
        pending.set("chat", PendingMeme::Template("drake.png".into()));
        let previous = pending.set("chat", PendingMeme::Url("https://x/img.jpg".into()));

        assert_eq!(Some(PendingMeme::Template("drake.png".into())), previous);
        assert_eq!(Some(PendingMeme::Url("https://x/img.jpg".into())), pending.get(&"chat"));
        assert_eq!(1, pending.len());
    }

    #[test]
    fn conversations_are_separate() {
        let pending = PendingMemes::new();
        pending.set(1, PendingMeme::Template("a.png".into()));
        pending.set(2, PendingMeme::Template("b.png".into()));
        pending.take(&1);

        assert_that!(pending.get(&1)).is_none();
        assert_eq!(Some(PendingMeme::Template("b.png".into())), pending.get(&2));

        pending.clear();
        assert!(pending.is_empty());
    }

    #[test]
    fn shared_between_threads() {
        let pending = Arc::new(PendingMemes::new());
        let handles: Vec<_> = (0..8u32).map(|i| {
            let pending = pending.clone();
            thread::spawn(move || {
                pending.set(i, PendingMeme::Url(format!("https://x/{}.png", i)));
            })
        }).collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(8, pending.len());
    }

    #[test]
    fn display() {
        assert_eq!("template `drake.png`", PendingMeme::Template("drake.png".into()).to_string());
        assert_eq!("image at https://x/img.jpg", PendingMeme::Url("https://x/img.jpg".into()).to_string());
    }
}
