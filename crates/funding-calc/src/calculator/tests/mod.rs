mod common;
mod session;
mod store;
