//! Validated, injectable pattern registry.

use rustc_hash::FxHashMap;

use crate::patterns::catalog;
use crate::patterns::template::{PatternTemplate, TemplateError};

/// Lookup table of pattern templates, keyed by pattern id.
///
/// Every template passes [`PatternTemplate::validate`] on the way in, so a
/// registry only ever hands out structurally sound templates. The registry
/// is plain owned data passed to the generator by reference; the built-in
/// catalog is the `Default` construction, and tests inject synthetic
/// registries instead of monkeying with global state.
///
/// Listing order is insertion order, stable for display.
#[derive(Clone, Debug)]
pub struct PatternRegistry {
    templates: FxHashMap<String, PatternTemplate>,
    order: Vec<String>,
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl PatternRegistry {
    /// The built-in six-pattern catalog.
    ///
    /// Catalog templates are known-valid; a validation failure here would
    /// be a defect in the catalog itself, so it is checked by tests rather
    /// than handled at runtime.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        for template in catalog::builtin() {
            // Catalog data is covered by tests; skip rather than panic if
            // it were ever malformed.
            let _ = registry.register(template);
        }
        registry
    }

    /// An empty registry, for assembling custom catalogs.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            templates: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    /// Register a template, validating it first.
    ///
    /// Rejects structurally malformed templates and duplicate ids; the
    /// registry is unchanged on error.
    pub fn register(&mut self, template: PatternTemplate) -> Result<&mut Self, TemplateError> {
        template.validate()?;
        if self.templates.contains_key(&template.id) {
            return Err(TemplateError::DuplicateTemplate {
                template: template.id,
            });
        }
        self.order.push(template.id.clone());
        self.templates.insert(template.id.clone(), template);
        Ok(self)
    }

    /// Builder-style registration for fluent construction.
    ///
    /// # Examples
    /// ```rust
    /// use agentloom::patterns::{EdgeSpec, NodeSpec, PatternRegistry, PatternTemplate};
    /// use agentloom::types::NodeKind;
    ///
    /// let registry = PatternRegistry::empty().with_pattern(
    ///     PatternTemplate::new("echo", "Echo", "Pass-through", "Smoke tests")
    ///         .with_node(NodeSpec::new("a", NodeKind::Input, "In", "", 0))
    ///         .with_node(NodeSpec::new("b", NodeKind::Output, "Out", "", 1))
    ///         .with_edge(EdgeSpec::new("a", "b", "echo")),
    /// )?;
    /// assert!(registry.contains("echo"));
    /// # Ok::<(), agentloom::patterns::TemplateError>(())
    /// ```
    pub fn with_pattern(mut self, template: PatternTemplate) -> Result<Self, TemplateError> {
        self.register(template)?;
        Ok(self)
    }

    #[must_use]
    pub fn get(&self, pattern_id: &str) -> Option<&PatternTemplate> {
        self.templates.get(pattern_id)
    }

    #[must_use]
    pub fn contains(&self, pattern_id: &str) -> bool {
        self.templates.contains_key(pattern_id)
    }

    /// Registered ids in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    /// Templates in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &PatternTemplate> {
        self.order.iter().filter_map(|id| self.templates.get(id))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
