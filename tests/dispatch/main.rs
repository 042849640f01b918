//! Bus dispatch integration tests.


mod basic;
mod concurrency;
mod panics;
