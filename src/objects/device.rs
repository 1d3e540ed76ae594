//! Device and Endpoint - the top of a decoded ZCL device profile.
//!
//! A device owns an ordered list of endpoints; each endpoint exposes the
//! clusters it serves (`inClusters`) and the clusters it consumes
//! (`outClusters`).

use crate::objects::cluster::Cluster;

/// Root of a decoded device profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Device {
    endpoints: Vec<Endpoint>,
}

impl Device {
    /// Creates a device from its endpoints, in document order.
    pub fn new(endpoints: Vec<Endpoint>) -> Self {
        Self { endpoints }
    }

    /// Returns the endpoints in document order.
    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }

    /// Returns the number of endpoints.
    pub fn endpoint_count(&self) -> usize {
        self.endpoints.len()
    }
}

/// A logical sub-unit of a device.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Endpoint {
    /// Endpoint identifier as written in the source (e.g. `"1"`)
    pub id: String,
    in_clusters: Vec<Cluster>,
    out_clusters: Vec<Cluster>,
}

impl Endpoint {
    /// Creates an endpoint without clusters.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            in_clusters: Vec::new(),
            out_clusters: Vec::new(),
        }
    }

    /// Sets the server-side clusters.
    pub fn with_in_clusters(mut self, clusters: Vec<Cluster>) -> Self {
        self.in_clusters = clusters;
        self
    }

    /// Sets the client-side clusters.
    pub fn with_out_clusters(mut self, clusters: Vec<Cluster>) -> Self {
        self.out_clusters = clusters;
        self
    }

    /// Server-side clusters, in document order.
    pub fn in_clusters(&self) -> &[Cluster] {
        &self.in_clusters
    }

    /// Client-side clusters, in document order.
    pub fn out_clusters(&self) -> &[Cluster] {
        &self.out_clusters
    }
}
