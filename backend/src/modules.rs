#[macro_export]
macro_rules! include_modules {
    () => {
        extern crate env_logger;
        pub mod api;
        pub mod model;
        pub mod utils;
    }
}
