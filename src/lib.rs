//! Garden client: placed-object store, backend access, and the view that
//! drives the `canvas` editor from it.
//!
//! | Module | Role |
//! |---|---|
//! | [`api`] | `GardenApi` trait, HTTP and in-memory backends |
//! | [`store`] | `GardenStore`: snapshot owner, resync after every mutation |
//! | [`view`] | `GardenView`: editor actions dispatched to the store |
//! | [`config`] | environment-driven client configuration |
//! | [`error`] | `GardenError` taxonomy |

pub mod api;
pub mod config;
pub mod error;
pub mod store;
pub mod view;
