/// Every plugin the optimizer ships, in registry order.
const BUILTIN_PLUGINS: &[&str] = &[
    "addAttributesToSVGElement",
    "addClassesToSVGElement",
    "cleanupAttrs",
    "cleanupEnableBackground",
    "cleanupIds",
    "cleanupListOfValues",
    "cleanupStyleAttributes",
    "cleanupTextElements",
    "cleanupXlink",
    "collapseGroups",
    "convertEllipseToCircle",
    "convertOneStopGradients",
    "convertShapeToPath",
    "convertStyleToAttrs",
    "createGroups",
    "inlineStyles",
    "inlineUse",
    "mergeGradients",
    "mergePaths",
    "minifyColors",
    "minifyGradients",
    "minifyPathData",
    "minifyStyles",
    "minifyTransforms",
    "moveElemsAttrsToGroup",
    "moveGroupAttrsToElems",
    "prefixIds",
    "removeAttributesBySelector",
    "removeAttrs",
    "removeComments",
    "removeDesc",
    "removeDimensions",
    "removeDoctype",
    "removeEditorsNSData",
    "removeElementsByAttr",
    "removeEmptyAttrs",
    "removeEmptyContainers",
    "removeEmptyText",
    "removeHiddenElems",
    "removeMetadata",
    "removeNonInheritableGroupAttrs",
    "removeOffCanvasPaths",
    "removeRasterImages",
    "removeScripts",
    "removeStyleElement",
    "removeTitle",
    "removeUnknownsAndDefaults",
    "removeUnusedNS",
    "removeUselessDefs",
    "removeUselessStrokeAndFill",
    "removeViewBox",
    "removeXMLNS",
    "removeXMLProcInst",
    "removeXlink",
    "reusePaths",
    "sortAttrs",
    "sortDefsChildren",
];

/// The default pipeline (pre, main and post phases flattened), in run order.
const DEFAULT_PIPELINE: &[&str] = &[
    "removeDoctype",
    "removeXMLProcInst",
    "removeComments",
    "removeMetadata",
    "removeEditorsNSData",
    "cleanupAttrs",
    "cleanupStyleAttributes",
    "inlineStyles",
    "minifyStyles",
    "cleanupIds",
    "removeUselessDefs",
    "removeUnknownsAndDefaults",
    "removeNonInheritableGroupAttrs",
    "removeUselessStrokeAndFill",
    "cleanupEnableBackground",
    "removeHiddenElems",
    "removeEmptyText",
    "convertShapeToPath",
    "convertEllipseToCircle",
    "moveElemsAttrsToGroup",
    "moveGroupAttrsToElems",
    "collapseGroups",
    "minifyColors",
    "minifyPathData",
    "minifyTransforms",
    "mergePaths",
    "removeEmptyAttrs",
    "removeEmptyContainers",
    "removeUnusedNS",
    "removeDesc",
    "cleanupTextElements",
    "createGroups",
    "minifyGradients",
    "sortAttrs",
    "sortDefsChildren",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginDescriptor {
    pub name: &'static str,
    pub is_default: bool,
}

/// Static list of available plugins and the subset run by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginRegistry {
    builtins: Vec<PluginDescriptor>,
    defaults: Vec<&'static str>,
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new(BUILTIN_PLUGINS, DEFAULT_PIPELINE)
    }
}

impl PluginRegistry {
    /// Builds a registry; default names that are not builtins are dropped.
    pub fn new(builtins: &[&'static str], defaults: &[&'static str]) -> Self {
        let defaults: Vec<&'static str> = defaults
            .iter()
            .copied()
            .filter(|name| builtins.contains(name))
            .collect();
        let builtins = builtins
            .iter()
            .map(|&name| PluginDescriptor {
                name,
                is_default: defaults.contains(&name),
            })
            .collect();
        Self { builtins, defaults }
    }

    /// All builtins in registry order.
    pub fn builtins(&self) -> &[PluginDescriptor] {
        &self.builtins
    }

    /// Default plugins in pipeline order.
    pub fn default_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.defaults.iter().copied()
    }

    /// Non-default builtins in registry order.
    pub fn optional_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builtins
            .iter()
            .filter(|plugin| !plugin.is_default)
            .map(|plugin| plugin.name)
    }

    pub fn is_default(&self, name: &str) -> bool {
        self.defaults.contains(&name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builtins.iter().any(|plugin| plugin.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_is_a_builtin() {
        for name in DEFAULT_PIPELINE {
            assert!(BUILTIN_PLUGINS.contains(name), "{name} missing");
        }
    }

    #[test]
    fn builtins_are_sorted_and_unique() {
        let mut sorted = BUILTIN_PLUGINS.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, BUILTIN_PLUGINS);
    }

    #[test]
    fn optional_names_exclude_defaults() {
        let registry = PluginRegistry::default();
        let optional: Vec<_> = registry.optional_names().collect();
        assert_eq!(
            optional.len() + registry.default_names().count(),
            registry.builtins().len()
        );
        assert!(optional.iter().all(|name| !registry.is_default(name)));
        assert!(optional.contains(&"removeTitle"));
    }

    #[test]
    fn unknown_defaults_are_dropped() {
        let registry = PluginRegistry::new(&["a", "b"], &["b", "zzz"]);
        assert_eq!(registry.default_names().collect::<Vec<_>>(), vec!["b"]);
        assert!(!registry.builtins()[0].is_default);
        assert!(registry.builtins()[1].is_default);
    }
}
