//! Encoder from a decoded [`Device`] to an SDT 4.0 element tree.
//!
//! The output shape is fixed:
//!
//! ```text
//! Domain (xmlns, id)
//! └── Devices
//!     └── Device
//!         └── SubDevice id="Endpoint<id>"       one per endpoint
//!             ├── Modules
//!             │   └── Module name               one per non-basic in-cluster
//!             │       ├── DataPoints            only if the cluster has attributes
//!             │       │   └── DataPoint name > DataType > SimpleType type
//!             │       ├── Action name           one per command
//!             │       │   └── DataType > SimpleType type   only with a payload
//!             │       └── extends domain class
//!             └── Properties                    only for a 0x0000 in-cluster
//!                 └── Property name > SimpleType type
//! ```
//!
//! A device with exactly one endpoint yields an empty `Device` element.
//! Output clusters are never rendered.

use crate::element::Element;
use crate::objects::{Cluster, Device, Endpoint};
use tracing::debug;

/// Namespace of the generated SDT document.
pub const SDT_NAMESPACE: &str = "http://www.onem2m.org/xml/sdt/4.0";

/// Builds the SDT document for `device`, using `domain_id` as the domain
/// identifier and as the `domain` of every `extends` reference.
pub fn encode(device: &Device, domain_id: &str) -> Element {
    let mut root = Element::new("Domain")
        .with_attribute("xmlns", SDT_NAMESPACE)
        .with_attribute("id", domain_id);
    let sdt_device = root.append("Devices").append("Device");

    // A lone endpoint is not expanded into a SubDevice.
    if device.endpoint_count() == 1 {
        debug!("single endpoint, emitting empty Device");
    } else {
        for endpoint in device.endpoints() {
            sdt_device.push(encode_endpoint(endpoint, domain_id));
        }
        debug!(sub_devices = device.endpoint_count(), "encoded device");
    }
    root
}

fn encode_endpoint(endpoint: &Endpoint, domain_id: &str) -> Element {
    let mut sub_device =
        Element::new("SubDevice").with_attribute("id", format!("Endpoint{}", endpoint.id));
    let mut modules = Element::new("Modules");
    let mut properties: Option<Element> = None;

    for cluster in endpoint.in_clusters() {
        if cluster.is_properties() {
            let block = properties.get_or_insert_with(|| Element::new("Properties"));
            for attribute in cluster.attributes() {
                block.push(
                    Element::new("Property")
                        .with_attribute("name", attribute.name.as_str())
                        .with_child(simple_type(&attribute.data_type)),
                );
            }
        } else {
            modules.push(encode_module(cluster, domain_id));
        }
    }

    sub_device.push(modules);
    if let Some(properties) = properties {
        sub_device.push(properties);
    }
    sub_device
}

fn encode_module(cluster: &Cluster, domain_id: &str) -> Element {
    let mut module = Element::new("Module").with_attribute("name", cluster.name.as_str());

    if !cluster.attributes().is_empty() {
        let data_points = module.append("DataPoints");
        for attribute in cluster.attributes() {
            data_points.push(
                Element::new("DataPoint")
                    .with_attribute("name", attribute.name.as_str())
                    .with_child(data_type(&attribute.data_type)),
            );
        }
    }

    // Actions sit directly under the Module; there is no Actions wrapper.
    for command in cluster.commands() {
        let action = module.append("Action");
        action.set_attribute("name", command.name.as_str());
        if let Some(payload) = &command.payload {
            action.push(data_type(&payload.data_type));
        }
    }

    module.push(
        Element::new("extends")
            .with_attribute("domain", domain_id)
            .with_attribute("class", cluster.name.as_str()),
    );
    module
}

fn data_type(type_name: &str) -> Element {
    Element::new("DataType").with_child(simple_type(type_name))
}

fn simple_type(type_name: &str) -> Element {
    Element::new("SimpleType").with_attribute("type", type_name)
}
