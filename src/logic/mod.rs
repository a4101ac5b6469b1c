mod resolve;

pub use resolve::{find_handle, readable_location};
