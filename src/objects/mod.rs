//! ZCL device profile object types.
//!
//! - [`Device`] - The root of a decoded profile
//! - [`Endpoint`] - A logical sub-unit with input and output clusters
//! - [`Cluster`] - A set of attributes and commands
//! - [`Attribute`], [`Command`], [`Payload`] - Cluster leaves
//!
//! The object graph is built once by the [`decoder`](crate::decoder) and only
//! read afterwards.

mod cluster;
mod device;

pub use cluster::{Attribute, Cluster, Command, Payload, BASIC_CLUSTER_ID};
pub use device::{Device, Endpoint};
