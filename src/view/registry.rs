use parking_lot::RwLock;
use tracing::{debug, warn};

use super::slots::{create_slot, create_slots, Slot};
use crate::chart::{ChartConfig, UnknownKeyPolicy};
use crate::error::Result;
use crate::record::Record;
use crate::surface::{ElementId, SharedSurface, Surface};
use crate::tally::{aggregate, Tally};

/// Lifecycle of a chart's slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartState {
    /// Slots exist and still show the sentinel.
    Created,
    /// Slots reflect the last successful update.
    Live,
}

/// The slots of one chart and the settings used to refresh them.
pub struct SlotRegistry<S: Surface> {
    surface: SharedSurface<S>,
    config: ChartConfig,
    slots: RwLock<Vec<Slot>>,
    state: RwLock<ChartState>,
}

impl<S: Surface + 'static> SlotRegistry<S> {
    /// Create slots for the keys of `initial`.
    pub fn create(surface: SharedSurface<S>, initial: &Tally, config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let set = create_slots(&surface, initial, config.sentinel)?;
        debug!(field = %config.field, parents = ?set.parents, "slot registry created");
        Ok(Self {
            surface,
            config,
            slots: RwLock::new(set.slots),
            state: RwLock::new(ChartState::Created),
        })
    }

    /// Re-tally `records` and write the result into the slots.
    ///
    /// Keys without a slot are dropped or given a new slot according to
    /// the configured [`UnknownKeyPolicy`]; slots whose key is absent show
    /// 0. Aggregation and slot creation both run before any value is
    /// written, so a rejected input leaves the display unchanged.
    ///
    /// Slot values are written to the surface, so the caller must not hold
    /// a guard on it while calling this.
    pub fn update(&self, records: &[Record]) -> Result<()> {
        let tally = self.prepare(records)?;
        self.apply(&tally)?;
        debug!(field = %self.config.field, records = records.len(), "slots updated");
        Ok(())
    }

    /// Tally `records` by this chart's field without touching any slot.
    pub(crate) fn prepare(&self, records: &[Record]) -> Result<Tally> {
        aggregate(records, &self.config.field).inspect_err(|err| {
            warn!(field = %self.config.field, %err, "update rejected");
        })
    }

    /// Write a prepared tally into the slots.
    pub(crate) fn apply(&self, tally: &Tally) -> Result<()> {
        let mut slots = self.slots.write();

        let unseen: Vec<&str> = tally
            .keys()
            .filter(|key| !slots.iter().any(|slot| slot.key() == *key))
            .collect();
        let mut grown = Vec::new();
        if !unseen.is_empty() {
            match self.config.unknown_keys {
                UnknownKeyPolicy::Drop => {
                    debug!(field = %self.config.field, keys = ?unseen, "dropping keys without a slot");
                }
                UnknownKeyPolicy::Grow => {
                    for key in unseen {
                        grown.push(create_slot(&self.surface, key, self.config.sentinel)?);
                    }
                }
            }
        }

        slots.extend(grown);
        for slot in slots.iter() {
            slot.set_value(tally.get(slot.key()).unwrap_or(0.0));
        }

        *self.state.write() = ChartState::Live;
        Ok(())
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn state(&self) -> ChartState {
        *self.state.read()
    }

    /// Parent containers in slot order.
    pub fn parents(&self) -> Vec<ElementId> {
        self.slots.read().iter().map(Slot::parent).collect()
    }

    /// Bound keys in slot order.
    pub fn keys(&self) -> Vec<String> {
        self.slots.read().iter().map(|slot| slot.key().to_owned()).collect()
    }

    /// `(key, value)` pairs currently displayed, in slot order.
    pub fn values(&self) -> Vec<(String, f64)> {
        self.slots
            .read()
            .iter()
            .map(|slot| (slot.key().to_owned(), slot.value()))
            .collect()
    }

    /// Key bound to a parent container.
    pub fn key_of(&self, parent: ElementId) -> Option<String> {
        self.slots
            .read()
            .iter()
            .find(|slot| slot.parent() == parent)
            .map(|slot| slot.key().to_owned())
    }

    pub fn len(&self) -> usize {
        self.slots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.read().is_empty()
    }
}

/// A chart refreshed in two steps, so several charts can be checked
/// before any of them is written.
pub(crate) trait TallyTarget: Send + Sync {
    fn prepare(&self, records: &[Record]) -> Result<Tally>;
    fn apply(&self, tally: &Tally) -> Result<()>;
}

impl<S: Surface + 'static> TallyTarget for SlotRegistry<S> {
    fn prepare(&self, records: &[Record]) -> Result<Tally> {
        SlotRegistry::prepare(self, records)
    }

    fn apply(&self, tally: &Tally) -> Result<()> {
        SlotRegistry::apply(self, tally)
    }
}
