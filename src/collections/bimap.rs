use std::collections::HashMap;
use std::hash::Hash;

/// One-to-one mapping kept as a pair of plain hash maps.
///
/// Every mutation goes through this type so `left` and `right` never drift
/// apart.
#[derive(Debug, Clone)]
pub struct BiMap<L, R> {
    left: HashMap<L, R>,
    right: HashMap<R, L>,
}

impl<L, R> Default for BiMap<L, R> {
    fn default() -> Self {
        Self {
            left: HashMap::new(),
            right: HashMap::new(),
        }
    }
}

impl<L, R> BiMap<L, R>
where
    L: Eq + Hash + Clone,
    R: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `l <-> r`, silently evicting any pair that already used either
    /// key.
    pub fn force_insert(&mut self, l: L, r: R) {
        if let Some(old_r) = self.left.remove(&l) {
            self.right.remove(&old_r);
        }
        if let Some(old_l) = self.right.remove(&r) {
            self.left.remove(&old_l);
        }
        self.left.insert(l.clone(), r.clone());
        self.right.insert(r, l);
    }

    pub fn get_by_left(&self, l: &L) -> Option<&R> {
        self.left.get(l)
    }
    pub fn get_by_right(&self, r: &R) -> Option<&L> {
        self.right.get(r)
    }

    pub fn remove_by_left(&mut self, l: &L) -> Option<R> {
        let r = self.left.remove(l)?;
        self.right.remove(&r);
        Some(r)
    }
    pub fn remove_by_right(&mut self, r: &R) -> Option<L> {
        let l = self.right.remove(r)?;
        self.left.remove(&l);
        Some(l)
    }
}
