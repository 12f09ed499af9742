use crate::generation::Generation;

/// What happened on a layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventKind {
    /// The data source started fetching a new batch.
    LoadingStarted,
    /// A feature batch became renderable.
    LoadingFinished,
    /// A new label set replaced the previous one.
    LabelsRecomputed,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::LoadingStarted => "loading_started",
            EventKind::LoadingFinished => "loading_finished",
            EventKind::LabelsRecomputed => "labels_recomputed",
        }
    }
}

/// Structured record of a layer event, stamped with the input generation it
/// refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub generation: Generation,
    pub kind: EventKind,
    pub message: String,
}

/// Port for surfacing a loading indicator.
///
/// Implemented by [`EventBus`] and by any `FnMut(bool)` closure.
pub trait LoadingObserver {
    fn loading_changed(&mut self, loading: bool);
}

impl<F: FnMut(bool)> LoadingObserver for F {
    fn loading_changed(&mut self, loading: bool) {
        (*self)(loading)
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    events: Vec<Event>,
    loading: bool,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, generation: Generation, kind: EventKind, message: impl Into<String>) {
        let message = message.into();
        tracing::trace!(generation = generation.0, kind = kind.as_str(), %message, "layer event");
        self.events.push(Event {
            generation,
            kind,
            message,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Last loading state reported through [`LoadingObserver`].
    pub fn is_loading(&self) -> bool {
        self.loading
    }
}

impl LoadingObserver for EventBus {
    fn loading_changed(&mut self, loading: bool) {
        self.loading = loading;
    }
}

#[cfg(test)]
mod tests {
    use super::{EventBus, EventKind, LoadingObserver};
    use crate::generation::Generation;

    #[test]
    fn records_events_with_generation() {
        let mut bus = EventBus::new();
        bus.emit(Generation(2), EventKind::LoadingStarted, "fetch");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].generation, Generation(2));
        assert_eq!(bus.events()[0].kind, EventKind::LoadingStarted);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(Generation(0), EventKind::LabelsRecomputed, "3 labels");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.events().is_empty());
    }

    #[test]
    fn closures_and_bus_are_loading_observers() {
        let mut seen = Vec::new();
        {
            let mut obs = |loading: bool| seen.push(loading);
            obs.loading_changed(true);
            obs.loading_changed(false);
        }
        assert_eq!(seen, vec![true, false]);

        let mut bus = EventBus::new();
        bus.loading_changed(true);
        assert!(bus.is_loading());
    }
}
