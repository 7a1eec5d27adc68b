//! Dark/light theme as a shared reactive input.
//!
//! The host page owns theme detection (OS preference, DOM class, whatever).
//! The render loop only ever sees a [`ThemeSignal`]: a present value plus a
//! change counter, polled once per tick. This keeps the animation cores pure
//! functions of explicit inputs instead of having them inspect global state.

use std::sync::atomic::{AtomicU32, AtomicU8, Ordering};
use std::sync::Arc;

/// Color scheme the host page is currently rendering in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[inline]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn from_u8(v: u8) -> Theme {
        if v == 1 {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

struct Inner {
    value: AtomicU8,
    generation: AtomicU32,
}

/// Shared theme cell. The host calls [`ThemeSignal::set`] at any time; the
/// render loop calls [`ThemeSignal::get`] once per frame, or holds a
/// [`ThemeWatch`] when it only cares about transitions.
#[derive(Clone)]
pub struct ThemeSignal {
    inner: Arc<Inner>,
}

impl ThemeSignal {
    pub fn new(initial: Theme) -> Self {
        Self {
            inner: Arc::new(Inner {
                value: AtomicU8::new(initial as u8),
                generation: AtomicU32::new(0),
            }),
        }
    }

    pub fn get(&self) -> Theme {
        Theme::from_u8(self.inner.value.load(Ordering::Acquire))
    }

    /// Publish a new theme. A no-op when the value is unchanged, so watchers
    /// are only woken by real transitions.
    pub fn set(&self, theme: Theme) {
        let prev = self.inner.value.swap(theme as u8, Ordering::AcqRel);
        if prev != theme as u8 {
            self.inner.generation.fetch_add(1, Ordering::AcqRel);
        }
    }

    pub fn toggle(&self) {
        self.set(self.get().toggled());
    }

    pub fn watch(&self) -> ThemeWatch {
        ThemeWatch {
            signal: self.clone(),
            seen: self.inner.generation.load(Ordering::Acquire),
        }
    }
}

impl Default for ThemeSignal {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

/// Change-notification handle over a [`ThemeSignal`].
pub struct ThemeWatch {
    signal: ThemeSignal,
    seen: u32,
}

impl ThemeWatch {
    /// Returns the new theme if it changed since the last poll.
    pub fn changed(&mut self) -> Option<Theme> {
        let gen = self.signal.inner.generation.load(Ordering::Acquire);
        if gen != self.seen {
            self.seen = gen;
            Some(self.signal.get())
        } else {
            None
        }
    }

    pub fn current(&self) -> Theme {
        self.signal.get()
    }
}
