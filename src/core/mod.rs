//! Binding engine - model, listener dispatch, error taxonomy
//!
//! Independent of any concrete toolkit: widgets are reached only through
//! `crate::widgets`.

pub mod error;
pub mod listeners;
pub mod model;

pub use error::{BindError, SetterError};
pub use listeners::{Listener, Listeners};
pub use model::Model;
