use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use crate::chart::ChartHandle;
use crate::error::{Result, TallyError};
use crate::record::{matching, Record};
use crate::surface::{ElementId, Surface};
use crate::view::TallyTarget;

/// Links pointer hover on one chart's parents to updates of other charts.
///
/// Entering a key narrows the full record set to the records whose
/// source field equals that key and pushes the subset to every target.
/// Leaving restores the full set. Every target tallies the subset before
/// any of them is redrawn, so a subset one target rejects changes nothing.
///
/// Hover handlers should resolve keys with [`ChartHandle::key_of`] or
/// [`datum_of`](crate::surface::datum_of), not through a surface guard
/// held across the call: targets write to the surface while updating.
///
/// ```
/// use tallyboard::{shared, ChartConfig, HoverLink, MemorySurface, Record, TallyChart};
///
/// let records = vec![
///     Record::new(1.0).with_field("color", "blue").with_field("moving", "flying"),
///     Record::new(4.0).with_field("color", "red").with_field("moving", "flying"),
/// ];
/// let surface = shared(MemorySurface::new());
/// let moving = TallyChart::build(surface.clone(), &records, ChartConfig::new("moving")).unwrap();
///
/// let link = HoverLink::new(records, "color").target(&moving);
/// link.enter("red").unwrap();
/// assert_eq!(moving.values(), vec![("flying".to_owned(), 4.0)]);
/// ```
pub struct HoverLink {
    records: Vec<Record>,
    source_field: String,
    targets: Vec<Arc<dyn TallyTarget>>,
    active: Mutex<Option<String>>,
}

impl HoverLink {
    /// Link keyed by `source_field` over the full record set.
    pub fn new(records: Vec<Record>, source_field: impl Into<String>) -> Self {
        Self {
            records,
            source_field: source_field.into(),
            targets: Vec::new(),
            active: Mutex::new(None),
        }
    }

    /// Add a chart to refresh on hover.
    pub fn target<S: Surface + 'static>(mut self, chart: &ChartHandle<S>) -> Self {
        self.targets.push(chart.tally_target());
        self
    }

    /// Key currently hovered, if any.
    pub fn active(&self) -> Option<String> {
        self.active.lock().clone()
    }

    /// Pointer entered the slot bound to `key`.
    pub fn enter(&self, key: &str) -> Result<()> {
        let subset = matching(&self.records, &self.source_field, key);
        debug!(field = %self.source_field, key, records = subset.len(), "hover enter");
        self.push(&subset)?;
        *self.active.lock() = Some(key.to_owned());
        Ok(())
    }

    /// Pointer entered one of `chart`'s parent elements.
    ///
    /// The chart must group by this link's source field. The key is the one
    /// bound to the parent when its slot was created, which is also the
    /// parent's datum.
    pub fn enter_parent<S: Surface + 'static>(
        &self,
        chart: &ChartHandle<S>,
        parent: ElementId,
    ) -> Result<()> {
        if chart.field() != self.source_field {
            return Err(TallyError::config(format!(
                "hover source chart groups by `{}`, link expects `{}`",
                chart.field(),
                self.source_field
            )));
        }
        let key = chart
            .key_of(parent)
            .ok_or(TallyError::UnknownElement { id: parent.index() })?;
        self.enter(&key)
    }

    /// Pointer left the hovered slot.
    pub fn leave(&self) -> Result<()> {
        debug!(field = %self.source_field, "hover leave");
        self.push(&self.records)?;
        *self.active.lock() = None;
        Ok(())
    }

    fn push(&self, records: &[Record]) -> Result<()> {
        let tallies = self
            .targets
            .iter()
            .map(|target| target.prepare(records))
            .collect::<Result<Vec<_>>>()?;
        for (target, tally) in self.targets.iter().zip(&tallies) {
            target.apply(tally)?;
        }
        Ok(())
    }
}
