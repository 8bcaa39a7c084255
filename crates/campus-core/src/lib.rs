//! Service plumbing shared by Campus services: tracing, request ids, health
//! probes, store deadlines and response serializers.

pub mod deadline;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
