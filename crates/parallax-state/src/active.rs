//! Active-Section State Machine
//!
//! One state per section id, initial state is the home id, no terminal
//! state. Every entry notification overwrites the current value: the latest
//! entry always wins, even if an earlier section is still on screen. Entries
//! delivered in the same tick resolve to whichever is applied last.

use std::sync::Arc;

use parking_lot::RwLock;

use parallax_core::SectionId;

/// A change of active section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub from: SectionId,
    pub to: SectionId,
    /// Generation after this transition
    pub generation: u64,
}

/// The currently active section of a page view
#[derive(Debug, Clone)]
pub struct ActiveSection {
    current: SectionId,
    home: SectionId,
    /// Number of transitions applied
    generation: u64,
}

impl ActiveSection {
    /// Start at the home section
    pub fn new(home: SectionId) -> Self {
        ActiveSection {
            current: home.clone(),
            home,
            generation: 0,
        }
    }

    /// Apply an entry notification. Returns the transition, or `None` when
    /// the section was already active.
    pub fn enter(&mut self, section: SectionId) -> Option<Transition> {
        if section == self.current {
            return None;
        }

        let from = std::mem::replace(&mut self.current, section);
        self.generation += 1;
        Some(Transition {
            from,
            to: self.current.clone(),
            generation: self.generation,
        })
    }

    /// Apply a batch of entries from the same tick, in delivery order.
    /// Returns the net transition, if the final section differs from the
    /// starting one.
    pub fn enter_all<I>(&mut self, sections: I) -> Option<Transition>
    where
        I: IntoIterator<Item = SectionId>,
    {
        let start = self.current.clone();
        for section in sections {
            self.enter(section);
        }
        (self.current != start).then(|| Transition {
            from: start,
            to: self.current.clone(),
            generation: self.generation,
        })
    }

    pub fn current(&self) -> &SectionId {
        &self.current
    }

    pub fn home(&self) -> &SectionId {
        &self.home
    }

    pub fn is_home(&self) -> bool {
        self.current == self.home
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Shared handle to an `ActiveSection`
///
/// For hosts that run visibility detection and rendering on different
/// threads: the detection side writes, the frame loop reads. Writes are
/// last-write-wins, exactly like the single-threaded machine. Clones share
/// the same slot; the slot lives as long as the page view holds a handle.
#[derive(Debug, Clone)]
pub struct SharedActiveSection {
    inner: Arc<RwLock<ActiveSection>>,
}

impl SharedActiveSection {
    pub fn new(home: SectionId) -> Self {
        Self::from_state(ActiveSection::new(home))
    }

    pub fn from_state(state: ActiveSection) -> Self {
        SharedActiveSection {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn enter(&self, section: SectionId) -> Option<Transition> {
        self.inner.write().enter(section)
    }

    pub fn enter_all<I>(&self, sections: I) -> Option<Transition>
    where
        I: IntoIterator<Item = SectionId>,
    {
        self.inner.write().enter_all(sections)
    }

    /// Current section id (cheap clone of a shared string)
    pub fn current(&self) -> SectionId {
        self.inner.read().current().clone()
    }

    /// Current section together with its generation, read atomically
    pub fn snapshot(&self) -> (SectionId, u64) {
        let state = self.inner.read();
        (state.current().clone(), state.generation())
    }

    pub fn generation(&self) -> u64 {
        self.inner.read().generation()
    }
}
