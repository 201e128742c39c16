//! heart-predict: heart disease risk prediction from a short health form.
//!
//! The pipeline runs form answers through four stages:
//!
//! 1. [`form`] collects answers into a typed [`record::InputRecord`].
//! 2. [`validate`] refuses submission until every field is answered.
//! 3. [`normalize`] encodes the complete record the way the model was trained.
//! 4. [`inference`] scores the row with a [`model::Classifier`].
//!
//! [`present`] turns each outcome into user-facing text, [`session`] ties the
//! stages into a per-user state machine, and [`ui`] hosts it in a terminal.

pub mod cli;
pub mod config;
pub mod form;
pub mod inference;
pub mod model;
pub mod normalize;
pub mod present;
pub mod record;
pub mod session;
pub mod testing;
pub mod ui;
pub mod validate;

pub use inference::{Outcome, Prediction, infer};
pub use model::{Classifier, Label, LoadError, ModelError, PipelineModel};
pub use record::{Field, InputRecord};
pub use session::{Session, Stage};
