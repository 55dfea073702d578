pub mod hasher;
pub mod stores;
