mod bimap;
mod slotmap;

pub use bimap::BiMap;
pub use slotmap::SlotMap;
