pub mod dispatcher;
#[cfg(test)]
pub(crate) mod mock;
pub mod model;
pub mod nativedb;
pub mod periodic;
pub mod store;
#[cfg(test)]
mod tests;
