//! Per-component inlier sets with exclusive ownership.

use crate::types::Component;

/// Disjoint inlier sets, one per component.
///
/// A point claimed by one component is never handed to another until the
/// selection is cleared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InlierSelection {
  owner: Vec<Option<Component>>,
  sets: [Vec<u32>; 3],
}

impl InlierSelection {
  pub fn new(point_count: usize) -> Self {
    Self {
      owner: vec![None; point_count],
      sets: Default::default(),
    }
  }

  /// Claim `index` for `component`.
  ///
  /// Returns true when the point was unclaimed. Out-of-range indices and
  /// points already owned (by any component) are ignored.
  pub fn claim(&mut self, index: u32, component: Component) -> bool {
    let Some(slot) = self.owner.get_mut(index as usize) else {
      return false;
    };
    if slot.is_some() {
      return false;
    }
    *slot = Some(component);
    self.sets[component.index()].push(index);
    true
  }

  /// Indices claimed by `component`, in claim order.
  pub fn inliers(&self, component: Component) -> &[u32] {
    &self.sets[component.index()]
  }

  pub fn component_of(&self, index: u32) -> Option<Component> {
    self.owner.get(index as usize).copied().flatten()
  }

  /// Total claimed points.
  pub fn len(&self) -> usize {
    self.sets.iter().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.sets.iter().all(Vec::is_empty)
  }

  /// Release every claim.
  pub fn clear(&mut self) {
    self.owner.fill(None);
    for set in &mut self.sets {
      set.clear();
    }
  }

  /// All claimed indices, ascending.
  pub fn union(&self) -> Vec<u32> {
    let mut all: Vec<u32> = self.sets.iter().flatten().copied().collect();
    all.sort_unstable();
    all
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_claim_is_exclusive() {
    let mut selection = InlierSelection::new(4);
    assert!(selection.claim(1, Component::Head));
    assert!(!selection.claim(1, Component::Tail));
    assert!(!selection.claim(1, Component::Head));

    assert_eq!(selection.inliers(Component::Head), &[1]);
    assert!(selection.inliers(Component::Tail).is_empty());
    assert_eq!(selection.component_of(1), Some(Component::Head));
    assert_eq!(selection.component_of(0), None);
  }

  #[test]
  fn test_out_of_range_claim_is_ignored() {
    let mut selection = InlierSelection::new(2);
    assert!(!selection.claim(2, Component::Head));
    assert_eq!(selection.component_of(7), None);
    assert!(selection.is_empty());
  }

  #[test]
  fn test_union_and_clear() {
    let mut selection = InlierSelection::new(6);
    selection.claim(5, Component::Tail);
    selection.claim(0, Component::Head);
    selection.claim(3, Component::VentralCord);
    assert_eq!(selection.len(), 3);
    assert_eq!(selection.union(), vec![0, 3, 5]);

    selection.clear();
    assert!(selection.is_empty());
    assert!(selection.claim(5, Component::Head));
  }
}
