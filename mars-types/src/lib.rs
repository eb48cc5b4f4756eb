pub mod block_format;
pub mod encoding;
pub mod error;
pub mod header;
pub mod samples;

pub use block_format::*;
pub use encoding::*;
pub use error::*;
pub use header::*;
pub use samples::*;
