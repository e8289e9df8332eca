use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::signal::{Signal, WatchGuard};
use crate::surface::{ElementId, ElementKind, SharedSurface, Surface};
use crate::tally::Tally;

/// One display unit, permanently bound to a category key.
pub(crate) struct Slot {
    key: String,
    parent: ElementId,
    reading: Signal<f64>,
    _binding: WatchGuard,
}

impl Slot {
    /// Key this slot was bound to at creation.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Parent container element.
    pub fn parent(&self) -> ElementId {
        self.parent
    }

    /// Value currently displayed.
    pub fn value(&self) -> f64 {
        self.reading.get()
    }

    /// Display a new value.
    pub fn set_value(&self, value: f64) {
        trace!(key = %self.key, value, "slot write");
        self.reading.set(value);
    }
}

/// Slots produced by [`create_slots`], with their parents listed in the
/// same order.
pub(crate) struct SlotSet {
    pub parents: Vec<ElementId>,
    pub slots: Vec<Slot>,
}

impl SlotSet {
    pub fn len(&self) -> usize {
        self.slots.len()
    }
}

/// Create one slot per key of `initial`.
///
/// Each slot is a container holding a label and a value element; the key
/// is set as the datum of the container and the value element. Values
/// display `sentinel` until first written. Only the keys of `initial` are
/// read.
///
/// The caller must not hold a lock on `surface` while calling this.
pub(crate) fn create_slots<S: Surface + 'static>(
    surface: &SharedSurface<S>,
    initial: &Tally,
    sentinel: f64,
) -> Result<SlotSet> {
    let mut set = SlotSet {
        parents: Vec::with_capacity(initial.len()),
        slots: Vec::with_capacity(initial.len()),
    };
    for key in initial.keys() {
        let slot = create_slot(surface, key, sentinel)?;
        set.parents.push(slot.parent);
        set.slots.push(slot);
    }
    debug!(slots = set.len(), "created slots");
    Ok(set)
}

pub(crate) fn create_slot<S: Surface + 'static>(
    surface: &SharedSurface<S>,
    key: &str,
    sentinel: f64,
) -> Result<Slot> {
    let (parent, value) = {
        let mut surface = surface.write();
        let parent = surface.append(None, ElementKind::Container)?;
        surface.set_datum(parent, key)?;

        let label = surface.append(Some(parent), ElementKind::Label)?;
        surface.set_text(label, key)?;

        let value = surface.append(Some(parent), ElementKind::Value)?;
        surface.set_datum(value, key)?;
        (parent, value)
    };

    let reading = Signal::new(sentinel);
    let binding = reading.watch({
        let surface = surface.clone();
        move |current: &f64| {
            if let Err(err) = surface.write().set_text(value, &format_value(*current)) {
                warn!(%err, element = %value, "failed to display slot value");
            }
        }
    });

    Ok(Slot {
        key: key.to_owned(),
        parent,
        reading,
        _binding: binding,
    })
}

/// Text shown for a value: integral values without a fraction.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Avoid displaying negative zero.
        return "0".to_owned();
    }
    format!("{value}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;
    use crate::surface::{shared, MemorySurface};
    use crate::tally::aggregate;

    fn color_tally() -> Tally {
        let records = vec![
            Record::new(1.0).with_field("color", "blue"),
            Record::new(4.0).with_field("color", "red"),
            Record::new(32.0).with_field("color", "green"),
        ];
        aggregate(&records, "color").unwrap()
    }

    #[test]
    fn creates_one_slot_per_key_showing_sentinel() {
        let surface = shared(MemorySurface::new());
        let set = create_slots(&surface, &color_tally(), -1.0).unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.parents.len(), 3);

        let surface = surface.read();
        assert_eq!(surface.len(), 9);
        for (slot, parent) in set.slots.iter().zip(&set.parents) {
            assert_eq!(slot.parent(), *parent);
            assert_eq!(surface.datum(*parent), Some(slot.key()));

            let children = surface.children(*parent);
            assert_eq!(children.len(), 2);
            assert_eq!(surface.text(children[0]), Some(slot.key()));
            assert_eq!(surface.datum(children[1]), Some(slot.key()));
            assert_eq!(surface.text(children[1]), Some("-1"));
        }
        assert_eq!(surface.render(), "blue: -1\nred: -1\ngreen: -1\n");
    }

    #[test]
    fn writes_reach_the_surface() {
        let surface = shared(MemorySurface::new());
        let set = create_slots(&surface, &color_tally(), -1.0).unwrap();

        set.slots[0].set_value(19.0);
        set.slots[1].set_value(2.5);

        assert_eq!(set.slots[0].value(), 19.0);
        assert_eq!(surface.read().render(), "blue: 19\nred: 2.5\ngreen: -1\n");
    }

    #[test]
    fn empty_tally_creates_nothing() {
        let surface = shared(MemorySurface::new());
        let set = create_slots(&surface, &Tally::default(), -1.0).unwrap();

        assert!(set.slots.is_empty());
        assert!(surface.read().is_empty());
    }

    #[test]
    fn format_value_drops_fraction_and_sign_of_zero() {
        assert_eq!(format_value(19.0), "19");
        assert_eq!(format_value(-1.0), "-1");
        assert_eq!(format_value(2.5), "2.5");
        assert_eq!(format_value(-0.0), "0");
    }
}
