//! Entity expansion
//!
//! Turns a resolved device into one [`ResolvedEntity`] per entity template of
//! its type. Only attributes a template declares are carried over, aliases
//! are remapped and symbolic constants such as
//! `sensor.SensorDeviceClass.TEMPERATURE` are replaced with their values.

use serde::Serialize;
use serde_json::Value;
use sh_core::{Platform, Symbol, SymbolResolver, ATTR_SUPPORTED_FEATURES};

use crate::device_type::{DeviceType, EntityTemplate};
use crate::error::{ModelError, ModelResult};
use crate::home::Device;
use crate::Attributes;

/// One entity of a compiled device
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEntity {
    pub platform: Platform,
    pub key: String,
    pub attributes: Attributes,
}

impl ResolvedEntity {
    /// Attribute value by entity key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }
}

/// Expand a device into its entities, in template order
pub fn expand(
    device: &Device,
    device_type: &DeviceType,
    resolver: &dyn SymbolResolver,
) -> ModelResult<Vec<ResolvedEntity>> {
    device_type
        .entity_templates()
        .map(|(platform, template)| {
            Ok(ResolvedEntity {
                platform,
                key: template.key.clone(),
                attributes: entity_attributes(device, template, resolver)?,
            })
        })
        .collect()
}

fn entity_attributes(
    device: &Device,
    template: &EntityTemplate,
    resolver: &dyn SymbolResolver,
) -> ModelResult<Attributes> {
    let mut attributes = Attributes::new();
    for spec in &template.supported_attributes {
        let Some(value) = device.attributes.get(spec.device_key()) else {
            continue;
        };
        let value = if spec.entity_key() == ATTR_SUPPORTED_FEATURES {
            resolve_features(value, resolver)?
        } else {
            resolve_value(value, resolver)?
        };
        attributes.insert(spec.entity_key().to_string(), value);
    }
    Ok(attributes)
}

/// Replace symbolic constants in a value, descending into lists and maps
fn resolve_value(value: &Value, resolver: &dyn SymbolResolver) -> ModelResult<Value> {
    match value {
        Value::String(s) if Symbol::is_candidate(s) => resolve_symbol(s, resolver),
        Value::Array(items) => items
            .iter()
            .map(|item| resolve_value(item, resolver))
            .collect::<ModelResult<Vec<_>>>()
            .map(Value::Array),
        Value::Object(map) => map
            .iter()
            .map(|(k, v)| Ok((k.clone(), resolve_value(v, resolver)?)))
            .collect::<ModelResult<serde_json::Map<_, _>>>()
            .map(Value::Object),
        other => Ok(other.clone()),
    }
}

fn resolve_symbol(token: &str, resolver: &dyn SymbolResolver) -> ModelResult<Value> {
    let symbol: Symbol = token.parse().map_err(|e: sh_core::SymbolError| {
        ModelError::SymbolResolution {
            token: token.to_string(),
            reason: e.to_string(),
        }
    })?;
    resolver
        .resolve(&symbol)
        .ok_or_else(|| ModelError::SymbolResolution {
            token: token.to_string(),
            reason: "unknown symbol".to_string(),
        })
}

/// Feature flags are an integer, a symbol, or a list of either OR-ed together
fn resolve_features(value: &Value, resolver: &dyn SymbolResolver) -> ModelResult<Value> {
    let flags = match value {
        Value::Array(items) => items
            .iter()
            .try_fold(0u64, |acc, item| -> ModelResult<u64> {
                Ok(acc | feature_flag(item, resolver)?)
            })?,
        single => feature_flag(single, resolver)?,
    };
    Ok(Value::from(flags))
}

fn feature_flag(value: &Value, resolver: &dyn SymbolResolver) -> ModelResult<u64> {
    let (token, resolved) = match value {
        Value::String(s) => (s.clone(), resolve_symbol(s, resolver)?),
        other => (other.to_string(), other.clone()),
    };
    resolved.as_u64().ok_or_else(|| ModelError::SymbolResolution {
        token,
        reason: "feature flags must be non-negative integers".to_string(),
    })
}
