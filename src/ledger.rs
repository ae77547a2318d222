use crate::types::{RestingOrder, Side};
use slab::Slab;

/// One side of the book: slab keys of resting orders kept in priority order.
///
/// The ledger never owns orders. It stores keys into the book's order arena, so an
/// order mutated through the arena is seen the same way through the ledger and the
/// order index. Every method takes the arena the keys point into.
#[derive(Debug)]
pub(crate) struct SideLedger {
    side: Side,
    keys: Vec<usize>,
}

impl SideLedger {
    pub(crate) fn new(side: Side) -> Self {
        SideLedger {
            side,
            keys: Vec::new(),
        }
    }

    /// Inserts `key` at its priority position.
    ///
    /// Orders already ranking ahead of or level with the new one stay in front of it,
    /// which is what gives a fresh order the back of the queue at its price.
    pub(crate) fn insert(&mut self, key: usize, orders: &Slab<RestingOrder>) {
        let incoming = &orders[key];
        debug_assert_eq!(incoming.side, self.side);

        let position = self
            .keys
            .partition_point(|probe| orders[*probe].cmp_priority(incoming).is_le());
        self.keys.insert(position, key);
    }

    /// Removes `key`, returning whether it was present.
    ///
    /// Must be called while the order behind `key` still has the price it was ranked at.
    pub(crate) fn remove(&mut self, key: usize, orders: &Slab<RestingOrder>) -> bool {
        let target = &orders[key];
        match self
            .keys
            .binary_search_by(|probe| orders[*probe].cmp_priority(target))
        {
            Ok(position) => {
                self.keys.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    pub(crate) fn first(&self) -> Option<usize> {
        self.keys.first().copied()
    }

    pub(crate) fn iter<'a>(
        &'a self,
        orders: &'a Slab<RestingOrder>,
    ) -> impl Iterator<Item = &'a RestingOrder> + 'a {
        self.keys.iter().map(move |key| &orders[*key])
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
