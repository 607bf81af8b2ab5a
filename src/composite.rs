//! Nested spots hosted inside a single item slot.

use crate::spots::Renderable;
use std::collections::HashMap;

/// Sparse two-level map: spot index → item index → nested spots.
///
/// Keys are whatever the caller supplies; nothing here renumbers.
#[derive(Debug, Default)]
pub struct CompositeSpots {
    spots: HashMap<usize, HashMap<usize, Vec<Box<dyn Renderable>>>>,
}

impl CompositeSpots {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `spots` for the slot, replacing and returning any previous set.
    pub fn insert(
        &mut self,
        spot_index: usize,
        item_index: usize,
        spots: Vec<Box<dyn Renderable>>,
    ) -> Option<Vec<Box<dyn Renderable>>> {
        self.spots
            .entry(spot_index)
            .or_default()
            .insert(item_index, spots)
    }

    /// Nested spots stored for the slot, if any.
    pub fn get(&self, spot_index: usize, item_index: usize) -> Option<&[Box<dyn Renderable>]> {
        self.spots
            .get(&spot_index)?
            .get(&item_index)
            .map(Vec::as_slice)
    }

    /// Mutable access to the nested spots stored for the slot.
    pub fn get_mut(
        &mut self,
        spot_index: usize,
        item_index: usize,
    ) -> Option<&mut Vec<Box<dyn Renderable>>> {
        self.spots.get_mut(&spot_index)?.get_mut(&item_index)
    }

    /// Remove the slot's nested spots. The spot level is dropped once it
    /// hosts no more slots.
    pub fn remove(
        &mut self,
        spot_index: usize,
        item_index: usize,
    ) -> Option<Vec<Box<dyn Renderable>>> {
        let items = self.spots.get_mut(&spot_index)?;
        let removed = items.remove(&item_index);
        if items.is_empty() {
            self.spots.remove(&spot_index);
        }
        removed
    }

    /// Drop every nested set hosted by `spot_index`.
    pub fn remove_spot(&mut self, spot_index: usize) {
        self.spots.remove(&spot_index);
    }

    /// Follow a host spot inserted at `index`: levels at or after it move up.
    pub fn spot_inserted(&mut self, index: usize) {
        self.rekey(|key| if key >= index { key + 1 } else { key });
    }

    /// Follow a host spot removed from `index`.
    ///
    /// Its nested spots are returned and later levels move down.
    pub fn spot_removed(&mut self, index: usize) -> Vec<Box<dyn Renderable>> {
        let removed = self
            .spots
            .remove(&index)
            .map(|items| items.into_values().flatten().collect())
            .unwrap_or_default();
        self.rekey(|key| if key > index { key - 1 } else { key });
        removed
    }

    /// Follow a host spot moved from `from` to `to`.
    pub fn spot_moved(&mut self, from: usize, to: usize) {
        self.rekey(|key| {
            if key == from {
                return to;
            }
            let key = if key > from { key - 1 } else { key };
            if key >= to {
                key + 1
            } else {
                key
            }
        });
    }

    fn rekey(&mut self, new_key: impl Fn(usize) -> usize) {
        let spots = std::mem::take(&mut self.spots);
        self.spots = spots
            .into_iter()
            .map(|(key, items)| (new_key(key), items))
            .collect();
    }

    /// Drop every slot.
    pub fn clear(&mut self) {
        self.spots.clear();
    }

    /// Whether no slot holds nested spots.
    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Every nested spot, in no particular order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Box<dyn Renderable>> {
        self.spots
            .values_mut()
            .flat_map(HashMap::values_mut)
            .flat_map(|spots| spots.iter_mut())
    }
}

/// Owner of a [`CompositeSpots`] table.
pub trait CompositeDelegate {
    /// The table nested spots are resolved from.
    fn composite_spots(&self) -> &CompositeSpots;

    /// Nested spots for `(spot_index, item_index)`, or `None` if either
    /// level is absent.
    fn resolve(&self, spot_index: usize, item_index: usize) -> Option<&[Box<dyn Renderable>]> {
        self.composite_spots().get(spot_index, item_index)
    }
}

impl CompositeDelegate for CompositeSpots {
    fn composite_spots(&self) -> &CompositeSpots {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Component;
    use crate::spots::{ListSpot, ViewSpot};

    fn titled(spots: Option<&[Box<dyn Renderable>]>) -> Option<Vec<String>> {
        spots.map(|s| s.iter().map(|spot| spot.component().title.clone()).collect())
    }

    fn list(title: &str) -> Box<dyn Renderable> {
        Box::new(ListSpot::new(Component::new("list", title)))
    }

    fn sample() -> CompositeSpots {
        let mut composite = CompositeSpots::new();
        let view: Box<dyn Renderable> = Box::new(ViewSpot::new(Component::new("view", "B")));
        composite.insert(2, 5, vec![list("A"), view]);
        composite
    }

    #[test]
    fn resolve_returns_registered_pair() {
        let composite = sample();
        assert_eq!(
            titled(composite.resolve(2, 5)),
            Some(vec!["A".to_string(), "B".to_string()])
        );
    }

    #[test]
    fn resolve_missing_item_index_is_none() {
        assert!(sample().resolve(2, 9).is_none());
    }

    #[test]
    fn resolve_missing_spot_index_is_none() {
        assert!(sample().resolve(9, 5).is_none());
    }

    #[test]
    fn insert_replaces_previous_set() {
        let mut composite = sample();
        let previous = composite.insert(2, 5, vec![list("C")]);
        assert_eq!(previous.map(|p| p.len()), Some(2));
        assert_eq!(titled(composite.resolve(2, 5)), Some(vec!["C".to_string()]));
    }

    #[test]
    fn remove_prunes_empty_outer_level() {
        let mut composite = sample();
        assert!(composite.remove(2, 5).is_some());
        assert!(composite.is_empty());
        assert!(composite.remove(2, 5).is_none());
    }

    fn hosts(composite: &CompositeSpots) -> Vec<(usize, String)> {
        let mut hosts: Vec<(usize, String)> = composite
            .spots
            .iter()
            .flat_map(|(spot, items)| {
                items
                    .values()
                    .flatten()
                    .map(move |nested| (*spot, nested.component().title.clone()))
            })
            .collect();
        hosts.sort();
        hosts
    }

    fn hosted_by_position() -> CompositeSpots {
        let mut composite = CompositeSpots::new();
        composite.insert(0, 0, vec![list("a")]);
        composite.insert(1, 0, vec![list("b")]);
        composite.insert(2, 0, vec![list("c")]);
        composite
    }

    #[test]
    fn spot_removed_returns_nested_and_shifts_later_hosts() {
        let mut composite = hosted_by_position();
        let removed = composite.spot_removed(0);

        assert_eq!(titled(Some(removed.as_slice())), Some(vec!["a".to_string()]));
        assert_eq!(hosts(&composite), vec![(0, "b".to_string()), (1, "c".to_string())]);
    }

    #[test]
    fn spot_inserted_shifts_hosts_at_and_after() {
        let mut composite = hosted_by_position();
        composite.spot_inserted(1);
        assert_eq!(
            hosts(&composite),
            vec![(0, "a".to_string()), (2, "b".to_string()), (3, "c".to_string())]
        );
    }

    #[test]
    fn spot_moved_follows_the_moved_host() {
        let mut composite = hosted_by_position();
        composite.spot_moved(0, 2);
        assert_eq!(
            hosts(&composite),
            vec![(0, "b".to_string()), (1, "c".to_string()), (2, "a".to_string())]
        );

        composite.spot_moved(2, 0);
        assert_eq!(
            hosts(&composite),
            vec![(0, "a".to_string()), (1, "b".to_string()), (2, "c".to_string())]
        );
    }

    #[test]
    fn iter_mut_visits_every_nested_spot() {
        let mut composite = sample();
        composite.insert(0, 0, vec![list("D")]);
        assert_eq!(composite.iter_mut().count(), 3);
    }
}
