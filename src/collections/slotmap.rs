/// Vec-backed storage handing out small, reusable `usize` keys.
///
/// The reactor registers every socket with the poller under its slot key, so
/// keys must stay stable while a connection lives and are recycled once it's
/// released.
#[derive(Debug)]
pub struct SlotMap<T> {
    head: usize,
    entries: Vec<Slot<T>>,
}
#[derive(Debug)]
enum Slot<T> {
    Occupied(T),
    // index of the next vacant slot, `NONE` at the end of the list
    Vacant(usize),
}
const NONE: usize = usize::MAX;

impl<T> Default for SlotMap<T> {
    fn default() -> Self {
        Self::new()
    }
}
impl<T> SlotMap<T> {
    pub fn new() -> Self {
        Self {
            head: NONE,
            entries: vec![],
        }
    }
    pub fn get(&self, i: usize) -> Option<&T> {
        match self.entries.get(i) {
            Some(Slot::Occupied(v)) => Some(v),
            _ => None,
        }
    }
    pub fn get_mut(&mut self, i: usize) -> Option<&mut T> {
        match self.entries.get_mut(i) {
            Some(Slot::Occupied(v)) => Some(v),
            _ => None,
        }
    }
    /// The key the next `insert` will return.
    pub fn next_idx(&self) -> usize {
        if self.head == NONE {
            self.entries.len()
        } else {
            self.head
        }
    }
    pub fn insert(&mut self, value: T) -> usize {
        if self.head == NONE {
            self.entries.push(Slot::Occupied(value));
            return self.entries.len() - 1;
        }
        let i = self.head;
        match core::mem::replace(&mut self.entries[i], Slot::Occupied(value)) {
            Slot::Vacant(next) => self.head = next,
            Slot::Occupied(_) => unreachable!("free list points at an occupied slot"),
        }
        i
    }
    pub fn release(&mut self, i: usize) -> Option<T> {
        let slot = self.entries.get_mut(i)?;
        if let Slot::Vacant(_) = slot {
            return None;
        }
        match core::mem::replace(slot, Slot::Vacant(self.head)) {
            Slot::Occupied(v) => {
                self.head = i;
                Some(v)
            }
            Slot::Vacant(_) => unreachable!("checked above"),
        }
    }
    pub fn len(&self) -> usize {
        self.iter().count()
    }
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries.iter().enumerate().filter_map(|(i, slot)| match slot {
            Slot::Occupied(v) => Some((i, v)),
            Slot::Vacant(_) => None,
        })
    }
}
