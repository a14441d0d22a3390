mod calendar;
mod error;
mod picker;
mod random;
mod suggest;

pub use calendar::*;
pub use error::*;
pub use picker::*;
pub use random::*;
pub use suggest::*;

cfg_if::cfg_if! {
    if #[cfg(feature = "full")] {
        mod command;
        mod store;

        pub use command::*;
        pub use store::*;
    }
}
