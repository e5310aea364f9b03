pub use self::memory::*;

mod memory;
