//! Plugin domain module.
//!
//! # Module Structure
//!
//! - `model`: Descriptors and capability tags
//! - `builtin`: Catalog of the plugins shipped with the application
//! - `registry`: `Plugin` trait and token registry with capability filtering
//! - `resolver`: Menu input → plugin resolution with narrowing

mod builtin;
mod model;
mod registry;
mod resolver;

pub use builtin::{
    BuiltinPlugin, EXIT_TOKEN, LOGIN_TOKEN, builtin_plugins, default_plugin_tokens,
    find_builtin_plugin,
};
pub use model::{Capability, PluginDescriptor};
pub use registry::{AvailablePlugin, Plugin, PluginContext, PluginRegistry};
pub use resolver::{Resolution, resolve};
