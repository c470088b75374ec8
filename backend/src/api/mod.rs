pub mod api_utils;
pub mod endpoints;
pub mod main_api;
pub mod model;
pub mod serve;
#[cfg(test)]
pub(crate) mod test_support;
