//! Synthetic Home device model compiler
//!
//! Compiles a declarative home description into the entities a presentation
//! layer renders:
//!
//! 1. [`load_registry`] reads a catalog of device type templates.
//! 2. [`load_home`] / [`parse_home`] decode a home document.
//! 3. [`compile`] merges the home's own device types over the catalog and
//!    validates every device against the merged registry.
//! 4. [`resolve`] applies restorable attribute presets to a device.
//! 5. [`expand`] turns a device into one [`ResolvedEntity`] per template.
//!
//! [`CompiledHome::build`] runs the whole pipeline and is what most callers
//! want.

mod compile;
mod compiled;
mod device_type;
mod dump;
mod error;
mod expand;
mod home;
mod resolve;
mod state_store;

pub use compile::compile;
pub use compiled::{device_unique_id, CompiledDevice, CompiledHome};
pub use device_type::{
    load_registry, AttributeKind, AttributeSpec, DeviceType, DeviceTypeRegistry, EntityTemplate,
    RestorableAttributeSet,
};
pub use dump::dump_registry;
pub use error::{ModelError, ModelResult};
pub use expand::{expand, ResolvedEntity};
pub use home::{load_home, parse_home, Device, DeviceInfo, Home};
pub use resolve::resolve;
pub use state_store::DeviceStateStore;

/// Attribute values by name, in declaration order
pub type Attributes = indexmap::IndexMap<String, serde_json::Value>;
