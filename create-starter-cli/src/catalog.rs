//! Template catalog
//!
//! Maps framework names, optionally split into variants, to template
//! identifiers. A catalog is built once and passed by reference into the
//! prompt flow and the materializer.

use console::{style, Color};
use std::collections::BTreeSet;

/// A selectable sub-template of a framework
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Template identifier
    pub name: String,
    /// Human-readable label, e.g. `TypeScript`
    pub display: String,
    /// Color used when listing the variant
    pub color: Color,
}

impl Variant {
    /// Create a variant
    pub fn new(name: impl Into<String>, display: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            display: display.into(),
            color,
        }
    }

    /// Label shown in the variant selection prompt
    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {}",
            style(&self.name).fg(self.color),
            style(format!("({})", self.display)).dim()
        )
    }
}

/// A framework, which is either a template itself or a group of variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framework {
    /// Framework name (also the template identifier when there are no variants)
    pub name: String,
    /// Color used when listing the framework
    pub color: Color,
    variants: Vec<Variant>,
}

impl Framework {
    /// Create a framework without variants
    pub fn new(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            variants: Vec::new(),
        }
    }

    /// Add a variant
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    /// Variants in declaration order (empty when the framework is a template itself)
    #[must_use]
    pub fn variants(&self) -> &[Variant] {
        &self.variants
    }

    /// Whether the user must pick a variant after choosing this framework
    #[must_use]
    pub fn has_variants(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Label shown in the framework selection prompt
    #[must_use]
    pub fn label(&self) -> String {
        style(&self.name).fg(self.color).to_string()
    }
}

/// How an externally supplied template identifier maps onto the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution<'c> {
    /// Owning framework
    pub framework: &'c Framework,
    /// Variant named by the identifier, if it named one
    pub variant: Option<&'c Variant>,
}

/// Immutable registry of frameworks and their template identifiers
#[derive(Debug, Clone)]
pub struct Catalog {
    frameworks: Vec<Framework>,
    identifiers: BTreeSet<String>,
}

impl Catalog {
    /// Build a catalog, computing the flattened identifier set once
    #[must_use]
    pub fn new(frameworks: Vec<Framework>) -> Self {
        let identifiers = frameworks
            .iter()
            .flat_map(|f| {
                if f.has_variants() {
                    f.variants.iter().map(|v| v.name.clone()).collect::<Vec<_>>()
                } else {
                    vec![f.name.clone()]
                }
            })
            .collect();
        Self {
            frameworks,
            identifiers,
        }
    }

    /// Frameworks in presentation order
    #[must_use]
    pub fn frameworks(&self) -> &[Framework] {
        &self.frameworks
    }

    /// Every valid template identifier
    #[must_use]
    pub const fn flat_identifiers(&self) -> &BTreeSet<String> {
        &self.identifiers
    }

    /// Whether `identifier` names a template package
    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.identifiers.contains(identifier)
    }

    /// `(label, framework)` pairs for the selection prompt
    #[must_use]
    pub fn display_choices(&self) -> Vec<(String, &Framework)> {
        self.frameworks.iter().map(|f| (f.label(), f)).collect()
    }

    /// Framework that owns `identifier`, either by name or through a variant
    #[must_use]
    pub fn find_framework(&self, identifier: &str) -> Option<&Framework> {
        self.resolve(identifier).map(|r| r.framework)
    }

    /// Resolve an identifier supplied on the command line
    ///
    /// A framework name wins over a variant of the same name, so naming a
    /// framework that has variants still leads to variant selection.
    #[must_use]
    pub fn resolve(&self, identifier: &str) -> Option<Resolution<'_>> {
        if let Some(framework) = self.frameworks.iter().find(|f| f.name == identifier) {
            return Some(Resolution {
                framework,
                variant: None,
            });
        }
        self.frameworks.iter().find_map(|framework| {
            framework
                .variants
                .iter()
                .find(|v| v.name == identifier)
                .map(|variant| Resolution {
                    framework,
                    variant: Some(variant),
                })
        })
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(vec![
            Framework::new("vue", Color::Green)
                .with_variant(Variant::new("vue", "JavaScript", Color::Yellow))
                .with_variant(Variant::new("vue-ts", "TypeScript", Color::Blue)),
            Framework::new("react-ts", Color::Cyan),
            Framework::new("nest", Color::Magenta),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_frameworks_order() {
        let catalog = Catalog::default();
        let names: Vec<_> = catalog.frameworks().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["vue", "react-ts", "nest"]);
    }

    #[test]
    fn test_flat_identifiers() {
        let catalog = Catalog::default();
        let ids: Vec<_> = catalog.flat_identifiers().iter().map(String::as_str).collect();
        assert_eq!(ids, vec!["nest", "react-ts", "vue", "vue-ts"]);
        assert!(catalog.contains("vue-ts"));
        assert!(!catalog.contains("notareal"));
    }

    #[test]
    fn test_empty_variant_list_means_no_variants() {
        let catalog = Catalog::new(vec![Framework::new("solo", Color::White)]);
        assert!(catalog.contains("solo"));
        assert!(!catalog.frameworks()[0].has_variants());
    }

    #[test]
    fn test_framework_with_variants_is_not_an_identifier() {
        let catalog = Catalog::new(vec![Framework::new("svelte", Color::Red)
            .with_variant(Variant::new("svelte-js", "JavaScript", Color::Yellow))]);
        assert!(!catalog.contains("svelte"));
        assert!(catalog.contains("svelte-js"));
    }

    #[test]
    fn test_resolve_prefers_framework_name() {
        let catalog = Catalog::default();
        let resolved = catalog.resolve("vue").unwrap();
        assert_eq!(resolved.framework.name, "vue");
        assert!(resolved.variant.is_none());
    }

    #[test]
    fn test_resolve_variant() {
        let catalog = Catalog::default();
        let resolved = catalog.resolve("vue-ts").unwrap();
        assert_eq!(resolved.framework.name, "vue");
        assert_eq!(resolved.variant.map(|v| v.name.as_str()), Some("vue-ts"));
    }

    #[test]
    fn test_find_framework_through_variant() {
        let catalog = Catalog::default();
        assert_eq!(catalog.find_framework("vue-ts").map(|f| f.name.as_str()), Some("vue"));
        assert_eq!(catalog.find_framework("nest").map(|f| f.name.as_str()), Some("nest"));
        assert!(catalog.find_framework("angular").is_none());
    }

    #[test]
    fn test_resolve_unknown() {
        assert!(Catalog::default().resolve("angular").is_none());
    }

    #[test]
    fn test_display_choices_follow_framework_order() {
        let catalog = Catalog::default();
        let choices = catalog.display_choices();
        assert_eq!(choices.len(), 3);
        assert_eq!(choices[1].1.name, "react-ts");
        assert!(choices[1].0.contains("react-ts"));
    }
}
