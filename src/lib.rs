pub mod bench;
pub mod conf;
pub mod core;
pub mod driver;
pub mod io;
pub mod keys;
pub mod workload;

#[cfg(feature = "testutil")]
pub mod testutil;
