//! Plain records produced by the schemas.

pub mod angles;
pub mod constraints;
pub mod enums;
pub mod macros;
pub mod observation;
pub mod references;

pub use angles::*;
pub use constraints::*;
pub use enums::*;
pub use observation::*;
pub use references::*;
