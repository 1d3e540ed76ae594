//! Decoder from a parsed ZCL element tree to the typed object graph.
//!
//! [`decode`] is a recursive descent keyed on the element's local name and
//! returns a [`DomainNode`]. The list wrappers (`endpoints`, `inClusters`,
//! `outClusters`, `attributes`, `commands`) decode to
//! [`DomainNode::Sequence`] in document order, and the typed parents then
//! check that every item has the kind they expect.
//!
//! Children of `endpoint` and `cluster` are looked up by name; other sibling
//! tags are ignored. Tags with no rule at all fail with
//! [`Error::UnexpectedElement`].

use crate::element::Element;
use crate::error::{Error, Result};
use crate::objects::{Attribute, Cluster, Command, Device, Endpoint, Payload};
use tracing::debug;

/// Result of decoding one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainNode {
    /// `<device>`
    Device(Device),
    /// `<endpoint>`
    Endpoint(Endpoint),
    /// `<cluster>`
    Cluster(Cluster),
    /// `<attribute>`
    Attribute(Attribute),
    /// `<command>`
    Command(Command),
    /// `<payload>`
    Payload(Payload),
    /// Any list wrapper, children in document order
    Sequence(Vec<DomainNode>),
}

impl DomainNode {
    /// Returns the kind of node, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainNode::Device(_) => "device",
            DomainNode::Endpoint(_) => "endpoint",
            DomainNode::Cluster(_) => "cluster",
            DomainNode::Attribute(_) => "attribute",
            DomainNode::Command(_) => "command",
            DomainNode::Payload(_) => "payload",
            DomainNode::Sequence(_) => "sequence",
        }
    }
}

/// Conversion out of a [`DomainNode`] into one concrete object type.
pub trait FromNode: Sized {
    /// Kind name of `Self`, used in error messages.
    const KIND: &'static str;

    /// Extracts `Self`, handing the node back if it has another kind.
    fn from_node(node: DomainNode) -> std::result::Result<Self, DomainNode>;

    /// Extracts `Self` or fails with [`Error::UnexpectedNode`].
    fn try_from_node(node: DomainNode) -> Result<Self> {
        Self::from_node(node).map_err(|other| Error::UnexpectedNode {
            expected: Self::KIND,
            found: other.kind(),
        })
    }
}

macro_rules! impl_from_node {
    ($ty:ident, $kind:literal) => {
        impl FromNode for $ty {
            const KIND: &'static str = $kind;

            fn from_node(node: DomainNode) -> std::result::Result<Self, DomainNode> {
                match node {
                    DomainNode::$ty(inner) => Ok(inner),
                    other => Err(other),
                }
            }
        }
    };
}

impl_from_node!(Device, "device");
impl_from_node!(Endpoint, "endpoint");
impl_from_node!(Cluster, "cluster");
impl_from_node!(Attribute, "attribute");
impl_from_node!(Command, "command");
impl_from_node!(Payload, "payload");

/// Decodes one element and everything below it.
pub fn decode(element: &Element) -> Result<DomainNode> {
    match element.name.as_str() {
        "device" => {
            let endpoints = match element.first_child() {
                Some(child) => decode_list::<Endpoint>(child)?,
                None => Vec::new(),
            };
            debug!(endpoints = endpoints.len(), "decoded device");
            Ok(DomainNode::Device(Device::new(endpoints)))
        }
        "endpoint" => {
            let id = required_attr(element, "id")?;
            let mut in_clusters = Vec::new();
            let mut out_clusters = Vec::new();
            for child in element.children() {
                match child.name.as_str() {
                    "inClusters" => in_clusters = decode_list::<Cluster>(child)?,
                    "outClusters" => out_clusters = decode_list::<Cluster>(child)?,
                    _ => {}
                }
            }
            debug!(
                endpoint = %id,
                in_clusters = in_clusters.len(),
                out_clusters = out_clusters.len(),
                "decoded endpoint"
            );
            Ok(DomainNode::Endpoint(
                Endpoint::new(id)
                    .with_in_clusters(in_clusters)
                    .with_out_clusters(out_clusters),
            ))
        }
        "cluster" => {
            let id = required_attr(element, "id")?;
            let name = required_attr(element, "name")?;
            let mut attributes = Vec::new();
            let mut commands = Vec::new();
            for child in element.children() {
                match child.name.as_str() {
                    "attributes" => attributes = decode_list::<Attribute>(child)?,
                    "commands" => commands = decode_list::<Command>(child)?,
                    _ => {}
                }
            }
            Ok(DomainNode::Cluster(
                Cluster::new(id, name)
                    .with_attributes(attributes)
                    .with_commands(commands),
            ))
        }
        "attribute" => Ok(DomainNode::Attribute(Attribute::new(
            required_attr(element, "id")?,
            required_attr(element, "name")?,
            required_attr(element, "type")?,
        ))),
        "command" => {
            let mut command = Command::new(
                required_attr(element, "id")?,
                required_attr(element, "name")?,
            );
            if let Some(child) = element.first_child() {
                command = command.with_payload(Payload::try_from_node(decode(child)?)?);
            }
            Ok(DomainNode::Command(command))
        }
        "payload" => Ok(DomainNode::Payload(Payload::new(
            required_attr(element, "name")?,
            required_attr(element, "type")?,
        ))),
        "attributes" | "commands" | "endpoints" | "inClusters" | "outClusters" => element
            .children()
            .iter()
            .map(decode)
            .collect::<Result<Vec<_>>>()
            .map(DomainNode::Sequence),
        other => Err(Error::UnexpectedElement(other.to_string())),
    }
}

/// Decodes a `<device>` root into a [`Device`].
pub fn decode_device(root: &Element) -> Result<Device> {
    Device::try_from_node(decode(root)?)
}

/// Decodes a list wrapper and checks that every item is a `T`.
fn decode_list<T: FromNode>(element: &Element) -> Result<Vec<T>> {
    match decode(element)? {
        DomainNode::Sequence(items) => items.into_iter().map(T::try_from_node).collect(),
        other => Err(Error::UnexpectedNode {
            expected: "sequence",
            found: other.kind(),
        }),
    }
}

fn required_attr(element: &Element, key: &'static str) -> Result<String> {
    element
        .attribute(key)
        .map(str::to_string)
        .ok_or_else(|| Error::MissingAttribute {
            element: element.name.clone(),
            attribute: key,
        })
}
