//! Template catalog — which components a product line's plan asks for.
//!
//! Rules enforced on load:
//! 1. The default list and every product line list at least one component.
//! 2. Component names are non-blank.
//! 3. A list does not name the same component twice.
//!
//! Lookup is by exact product name, falling back to the default list.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use collaborators::{ComponentTemplate, TemplatePlan};
use serde::{Deserialize, Serialize};

use crate::CatalogError;

/// Name used for the fallback list in error messages.
const DEFAULT_LINE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCatalog {
    /// Components for any product without its own entry.
    pub default: Vec<String>,
    /// Per-product overrides.
    #[serde(default)]
    pub product_lines: BTreeMap<String, Vec<String>>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self {
            default: vec!["PowerTest".to_owned()],
            product_lines: BTreeMap::new(),
        }
    }
}

impl TemplateCatalog {
    /// Parse and validate a catalog document.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = serde_json::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Read, parse and validate a catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        validate_line(DEFAULT_LINE, &self.default)?;
        for (line, components) in &self.product_lines {
            validate_line(line, components)?;
        }
        Ok(())
    }

    /// Component names requested for `product`.
    pub fn components_for(&self, product: &str) -> &[String] {
        self.product_lines
            .get(product)
            .unwrap_or(&self.default)
    }

    /// A template plan for `product` with every voltage unresolved.
    pub fn template_for(&self, product: &str) -> TemplatePlan {
        TemplatePlan {
            product: product.to_owned(),
            components: self
                .components_for(product)
                .iter()
                .map(ComponentTemplate::unresolved)
                .collect(),
        }
    }
}

fn validate_line(line: &str, components: &[String]) -> Result<(), CatalogError> {
    if components.is_empty() {
        return Err(CatalogError::EmptyProductLine(line.to_owned()));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for name in components {
        if name.trim().is_empty() {
            return Err(CatalogError::BlankComponentName(line.to_owned()));
        }
        if !seen.insert(name.as_str()) {
            return Err(CatalogError::DuplicateComponent {
                product_line: line.to_owned(),
                component: name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use collaborators::UNRESOLVED;

    #[test]
    fn built_in_catalog_requests_single_power_test() {
        let template = TemplateCatalog::default().template_for("WidgetX");

        assert_eq!(template.product, "WidgetX");
        assert_eq!(template.components, vec![ComponentTemplate::unresolved("PowerTest")]);
        assert_eq!(template.components[0].voltage, UNRESOLVED);
    }

    #[test]
    fn product_line_overrides_default_in_order() {
        let catalog = TemplateCatalog::from_json(
            r#"{
                "default": ["PowerTest"],
                "product_lines": { "ROUTER-100": ["PowerTest", "ThermalTest", "EmcTest"] }
            }"#,
        )
        .unwrap();

        let names: Vec<_> = catalog
            .template_for("ROUTER-100")
            .components
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["PowerTest", "ThermalTest", "EmcTest"]);
        assert_eq!(catalog.components_for("WidgetX").to_vec(), vec!["PowerTest"]);
    }

    #[test]
    fn product_lines_are_optional() {
        let catalog = TemplateCatalog::from_json(r#"{ "default": ["PowerTest"] }"#).unwrap();
        assert_eq!(catalog, TemplateCatalog::default());
    }

    #[test]
    fn empty_default_is_rejected() {
        assert!(matches!(
            TemplateCatalog::from_json(r#"{ "default": [] }"#),
            Err(CatalogError::EmptyProductLine(line)) if line == "default"
        ));
    }

    #[test]
    fn empty_product_line_is_rejected() {
        assert!(matches!(
            TemplateCatalog::from_json(r#"{ "default": ["PowerTest"], "product_lines": { "X": [] } }"#),
            Err(CatalogError::EmptyProductLine(line)) if line == "X"
        ));
    }

    #[test]
    fn duplicate_component_is_rejected() {
        assert!(matches!(
            TemplateCatalog::from_json(r#"{ "default": ["PowerTest", "PowerTest"] }"#),
            Err(CatalogError::DuplicateComponent { component, .. }) if component == "PowerTest"
        ));
    }

    #[test]
    fn blank_component_is_rejected() {
        assert!(matches!(
            TemplateCatalog::from_json(r#"{ "default": ["  "] }"#),
            Err(CatalogError::BlankComponentName(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            TemplateCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("catalog.json");
        assert!(matches!(
            TemplateCatalog::load(&missing),
            Err(CatalogError::Read { .. })
        ));
    }

    #[test]
    fn load_reads_catalog_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{ "default": ["PowerTest", "RippleTest"] }"#).unwrap();

        let catalog = TemplateCatalog::load(&path).unwrap();

        assert_eq!(catalog.default, vec!["PowerTest", "RippleTest"]);
    }
}
