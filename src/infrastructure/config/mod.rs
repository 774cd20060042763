//! Settings file adapters

mod xdg;

pub use xdg::XdgConfigStore;
