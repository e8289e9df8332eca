use std::sync::Arc;
use tracing::{debug, warn};

use super::ChartConfig;
use crate::error::Result;
use crate::record::Record;
use crate::store::{Store, Subscription};
use crate::surface::{ElementId, SharedSurface, Surface};
use crate::tally::aggregate;
use crate::view::{ChartState, SlotRegistry, TallyTarget};

/// A chart's refresh function, detached from the chart itself.
pub type Updater = Arc<dyn Fn(&[Record]) -> Result<()> + Send + Sync>;

/// Builder for tally charts.
pub struct TallyChart;

impl TallyChart {
    /// Build a chart for `records` on `surface`.
    ///
    /// Aggregates once, creates one slot per key, then runs a first update
    /// so no slot is left showing the sentinel.
    ///
    /// ```
    /// use tallyboard::{shared, ChartConfig, MemorySurface, Record, TallyChart};
    ///
    /// let surface = shared(MemorySurface::new());
    /// let records = vec![
    ///     Record::new(1.0).with_field("color", "blue"),
    ///     Record::new(4.0).with_field("color", "red"),
    /// ];
    ///
    /// let chart = TallyChart::build(surface.clone(), &records, ChartConfig::new("color")).unwrap();
    /// assert_eq!(chart.parents().len(), 2);
    /// assert_eq!(surface.read().render(), "blue: 1\nred: 4\n");
    ///
    /// chart.update(&records[1..]).unwrap();
    /// assert_eq!(surface.read().render(), "blue: 0\nred: 4\n");
    /// ```
    pub fn build<S: Surface + 'static>(
        surface: SharedSurface<S>,
        records: &[Record],
        config: ChartConfig,
    ) -> Result<ChartHandle<S>> {
        config.validate()?;
        let initial = aggregate(records, &config.field)?;
        let registry = Arc::new(SlotRegistry::create(surface, &initial, config)?);
        registry.update(records)?;

        let update: Updater = {
            let registry = Arc::clone(&registry);
            Arc::new(move |records: &[Record]| registry.update(records))
        };
        debug!(field = %registry.config().field, slots = registry.len(), "chart built");

        Ok(ChartHandle { registry, update })
    }
}

/// What a caller keeps of a chart: its parent elements and its update
/// function. Value elements stay private.
pub struct ChartHandle<S: Surface> {
    registry: Arc<SlotRegistry<S>>,
    update: Updater,
}

impl<S: Surface + 'static> ChartHandle<S> {
    /// Parent container of every slot, for attaching interaction.
    pub fn parents(&self) -> Vec<ElementId> {
        self.registry.parents()
    }

    /// Refresh every slot from `records`.
    ///
    /// Slot values are written to the surface during the call, so no guard
    /// on the surface may be held across it. In particular a hover handler
    /// must not call this (or [`HoverLink::enter`]) with a key borrowed from
    /// `surface.read().datum(..)`; use [`key_of`](Self::key_of) or
    /// [`datum_of`](crate::surface::datum_of) to get an owned key first.
    ///
    /// [`HoverLink::enter`]: crate::interaction::HoverLink::enter
    pub fn update(&self, records: &[Record]) -> Result<()> {
        (self.update)(records)
    }

    /// The update function on its own, detached from the handle.
    pub fn updater(&self) -> Updater {
        Arc::clone(&self.update)
    }

    /// Category field this chart groups by.
    pub fn field(&self) -> &str {
        &self.registry.config().field
    }

    /// Key bound to one of this chart's parents.
    ///
    /// Reads the chart's own slots, never the surface, so it is safe to
    /// call from an interaction handler.
    pub fn key_of(&self, parent: ElementId) -> Option<String> {
        self.registry.key_of(parent)
    }

    /// `(key, value)` pairs currently displayed.
    pub fn values(&self) -> Vec<(String, f64)> {
        self.registry.values()
    }

    pub fn state(&self) -> ChartState {
        self.registry.state()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub(crate) fn tally_target(&self) -> Arc<dyn TallyTarget> {
        self.registry.clone()
    }

    /// Update this chart whenever `store` changes.
    ///
    /// Rejected updates are logged and leave the chart unchanged. The
    /// binding lasts until the returned subscription is dropped.
    pub fn bind(&self, store: &Store<Vec<Record>>) -> Subscription {
        let update = self.updater();
        let field = self.field().to_owned();
        store.subscribe(move |records: &Vec<Record>| {
            if let Err(err) = update(records) {
                warn!(%field, %err, "bound update failed");
            }
        })
    }
}
