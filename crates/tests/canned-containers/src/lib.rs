//! Disposable docker containers for integration tests.
//!
//! A [`Container`] is pulled, created, started and then polled with its
//! [`WaitStrategy`](wait_strategy::WaitStrategy) before being handed back as a
//! [`RunningContainer`]. [`MongoDbContainer`] is the canned MongoDB fixture
//! built on top of it.


pub use crate::container::{Container, RunningContainer};
pub use crate::mongo::{MongoDbContainer, MongoDbContainerRequest, MongoDbSettings, MONGO_PORT};
pub use wait_strategy;
