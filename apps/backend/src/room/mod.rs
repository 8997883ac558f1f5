pub mod kernel;
pub mod registry;

pub use kernel::{RoomKernel, RoomSnapshot};
pub use registry::{RoomListEntry, RoomManager};
