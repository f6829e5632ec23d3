use std::collections::HashMap;

use crate::objects::ClassId;

/// Resolves plugin-defined root objects to a concrete class.
pub trait PluginRegistry {
    fn resolve(&self, plugin_id: &str, class_name: &str) -> Option<ClassId>;
}

/// Registry that knows no plugin.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlugins;

impl PluginRegistry for NoPlugins {
    fn resolve(&self, _plugin_id: &str, _class_name: &str) -> Option<ClassId> {
        None
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticPluginRegistry {
    entries: HashMap<(String, String), ClassId>,
}

impl StaticPluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        plugin_id: impl Into<String>,
        class_name: impl Into<String>,
        class_id: ClassId,
    ) -> &mut Self {
        self.entries
            .insert((plugin_id.into(), class_name.into()), class_id);
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PluginRegistry for StaticPluginRegistry {
    fn resolve(&self, plugin_id: &str, class_name: &str) -> Option<ClassId> {
        self.entries
            .get(&(plugin_id.to_string(), class_name.to_string()))
            .copied()
    }
}
