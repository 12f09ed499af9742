//! Boundary layer: polygons plus their auto-placed labels.
//!
//! The layer owns the inputs of a label pass (feature batch, view state),
//! each stamped with a [`Generation`]. [`BoundariesLayer::labels`] returns
//! the cached set while both stamps match the ones it was built from and
//! otherwise recomputes it from scratch.

use std::sync::Arc;

use foundation::Feature;
use foundation::math::{ViewState, WebMercatorViewport};
use runtime::{EventBus, EventKind, Generation, Latest, LoadingObserver, Versioned};
use tracing::debug;

use crate::labels::{LabelSet, PlacementConfig, assemble};
use crate::layer::{Layer, LayerId};
use crate::symbology::{BoundaryStyle, Category, style_for};

pub const DEFAULT_CATEGORY_KEY: &str = "category";

struct CachedLabels {
    features: Generation,
    view: Generation,
    labels: Arc<LabelSet>,
}

pub struct BoundariesLayer {
    id: LayerId,
    name: String,
    config: PlacementConfig,
    category_key: String,
    features: Versioned<Arc<[Feature]>>,
    view: Versioned<ViewState>,
    pending_view: Latest<ViewState>,
    cache: Option<CachedLabels>,
    events: EventBus,
    observer: Option<Box<dyn LoadingObserver>>,
}

impl BoundariesLayer {
    pub fn new(id: u64, config: PlacementConfig) -> Self {
        Self {
            id: LayerId(id),
            name: format!("boundaries-{id}"),
            config,
            category_key: DEFAULT_CATEGORY_KEY.to_string(),
            features: Versioned::new(Arc::from(Vec::<Feature>::new())),
            view: Versioned::new(ViewState::default()),
            pending_view: Latest::new(),
            cache: None,
            events: EventBus::new(),
            observer: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_category_key(mut self, key: impl Into<String>) -> Self {
        self.category_key = key.into();
        self
    }

    /// Routes loading-state changes to `observer` (e.g. a spinner).
    pub fn with_observer(mut self, observer: impl LoadingObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    /// Replaces the placement config; the next [`labels`](Self::labels) call recomputes.
    pub fn set_config(&mut self, config: PlacementConfig) {
        self.config = config;
        self.cache = None;
    }

    pub fn features(&self) -> &[Feature] {
        self.features.get()
    }

    pub fn view_state(&self) -> ViewState {
        *self.view.get()
    }

    /// Replaces the feature batch. Any call counts as a change.
    pub fn set_features(&mut self, features: impl Into<Arc<[Feature]>>) -> Generation {
        self.features.replace(features.into())
    }

    /// Applies a view state immediately. Any call counts as a change.
    pub fn set_view_state(&mut self, view: ViewState) -> Generation {
        self.pending_view.take();
        self.view.replace(view)
    }

    /// Parks a view state until the next [`labels`](Self::labels) call.
    /// Only the newest parked state is applied.
    pub fn submit_view_state(&mut self, view: ViewState) {
        if self.pending_view.submit(view).is_some() {
            debug!(layer = %self.id, "superseded pending view state");
        }
    }

    /// A fetch for a new batch started.
    pub fn begin_fetch(&mut self) {
        let upcoming = self.features.generation().next();
        self.events
            .emit(upcoming, EventKind::LoadingStarted, format!("{} fetch", self.name));
        self.set_loading(true);
    }

    /// A fetched batch became renderable.
    pub fn features_loaded(&mut self, features: impl Into<Arc<[Feature]>>) -> Generation {
        let generation = self.set_features(features);
        self.events.emit(
            generation,
            EventKind::LoadingFinished,
            format!("{} features", self.features.get().len()),
        );
        self.set_loading(false);
        generation
    }

    pub fn is_loading(&self) -> bool {
        self.events.is_loading()
    }

    /// True when the next [`labels`](Self::labels) call will recompute.
    pub fn is_stale(&self) -> bool {
        if self.pending_view.is_pending() {
            return true;
        }
        match &self.cache {
            Some(c) => c.features != self.features.generation() || c.view != self.view.generation(),
            None => true,
        }
    }

    /// Current label set, recomputed when features or view changed.
    pub fn labels(&mut self) -> Arc<LabelSet> {
        if let Some(view) = self.pending_view.take() {
            self.view.replace(view);
        }
        if !self.is_stale()
            && let Some(cache) = &self.cache
        {
            return Arc::clone(&cache.labels);
        }

        let viewport = WebMercatorViewport::new(*self.view.get());
        let labels = Arc::new(assemble(self.features.get(), &viewport, &self.config));
        debug!(
            layer = %self.id,
            features = self.features.get().len(),
            labels = labels.len(),
            "recomputed labels"
        );
        self.events.emit(
            self.features.generation(),
            EventKind::LabelsRecomputed,
            format!("{} labels", labels.len()),
        );
        self.cache = Some(CachedLabels {
            features: self.features.generation(),
            view: self.view.generation(),
            labels: Arc::clone(&labels),
        });
        labels
    }

    pub fn style_for_feature(&self, feature: &Feature) -> &'static BoundaryStyle {
        style_for(Category::of(feature, &self.category_key))
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<runtime::Event> {
        self.events.drain()
    }

    fn set_loading(&mut self, loading: bool) {
        self.events.loading_changed(loading);
        if let Some(observer) = self.observer.as_mut() {
            observer.loading_changed(loading);
        }
    }
}

impl Layer for BoundariesLayer {
    fn id(&self) -> LayerId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}
