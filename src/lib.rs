pub mod api;
pub mod chart;
pub mod chat;
pub mod conf;
pub mod core;
pub mod form;
pub mod session;
pub mod view;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
