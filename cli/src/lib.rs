pub mod driver;
pub mod drills;
pub mod http;

pub use driver::{run_auto, run_auto_then_shuffle, AutoReport, WatchTicks};
pub use http::ReqwestDeckService;
