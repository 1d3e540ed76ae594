//! Cluster and its leaves: attributes, commands and command payloads.

/// Identifier of the Basic cluster, rendered as device properties.
pub const BASIC_CLUSTER_ID: &str = "0x0000";

/// A ZCL cluster exposed or consumed by an endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cluster {
    /// Cluster identifier (e.g. `"0x0006"`)
    pub id: String,
    /// Cluster name (e.g. `"OnOff"`)
    pub name: String,
    attributes: Vec<Attribute>,
    commands: Vec<Command>,
}

impl Cluster {
    /// Creates a cluster without attributes or commands.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            attributes: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Sets the attribute list.
    pub fn with_attributes(mut self, attributes: Vec<Attribute>) -> Self {
        self.attributes = attributes;
        self
    }

    /// Sets the command list.
    pub fn with_commands(mut self, commands: Vec<Command>) -> Self {
        self.commands = commands;
        self
    }

    /// Attributes in document order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Commands in document order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Returns true for the Basic cluster (`0x0000`).
    pub fn is_properties(&self) -> bool {
        self.id == BASIC_CLUSTER_ID
    }
}

/// A typed attribute of a cluster.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    /// Attribute identifier
    pub id: String,
    /// Attribute name
    pub name: String,
    /// Type token (e.g. `"bool"`, `"uint8"`)
    pub data_type: String,
}

impl Attribute {
    /// Creates an attribute.
    pub fn new(id: impl Into<String>, name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}

/// A cluster command, optionally carrying a payload.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Command {
    /// Command identifier
    pub id: String,
    /// Command name
    pub name: String,
    /// Single payload argument, if any
    pub payload: Option<Payload>,
}

impl Command {
    /// Creates a command without payload.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            payload: None,
        }
    }

    /// Attaches a payload.
    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Payload of a command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Payload {
    /// Payload name
    pub name: String,
    /// Type token
    pub data_type: String,
}

impl Payload {
    /// Creates a payload.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }
}
