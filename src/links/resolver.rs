//! Renders link definitions into concrete links for one set of token bindings
//!
//! Resolution is a pure function of (definition, bindings):
//!
//! 1. Bound placeholders in the href are substituted; unbound ones stay
//!    literal, braces included.
//! 2. Each query template is rendered only if all of its placeholders are
//!    bound; survivors are joined with `&` and appended after `?` (or `&` when
//!    the href template already carries a query string).
//! 3. The gate decides inclusion: no gate always renders, the default gate
//!    requires every placeholder of the definition to be bound, a named gate
//!    requires its token to be bound to anything but `"false"`.

use crate::core::link::{Gate, Link, LinkDefinition};
use crate::core::template;
use crate::core::tokens::TokenBindings;

/// Stateless link renderer
pub struct LinkResolver;

impl LinkResolver {
    /// Render one definition, or `None` when its gate is closed
    pub fn resolve(definition: &LinkDefinition, bindings: &TokenBindings) -> Option<Link> {
        if !Self::is_included(definition, bindings) {
            tracing::debug!(
                rel = %definition.rel,
                href = %definition.href,
                "Optional link gated out"
            );
            return None;
        }

        Some(Link {
            rel: definition.rel.clone(),
            href: Self::render_href(definition, bindings),
            attributes: definition.attributes.clone(),
        })
    }

    /// Render every definition that passes its gate, keeping their order
    pub fn resolve_all<'a>(
        definitions: impl IntoIterator<Item = &'a LinkDefinition>,
        bindings: &TokenBindings,
    ) -> Vec<Link> {
        definitions
            .into_iter()
            .filter_map(|definition| Self::resolve(definition, bindings))
            .collect()
    }

    /// Whether the definition's gate lets it through
    pub fn is_included(definition: &LinkDefinition, bindings: &TokenBindings) -> bool {
        match &definition.optional {
            None => true,
            Some(Gate::DefaultGate) => definition
                .placeholders()
                .into_iter()
                .all(|name| bindings.contains(name)),
            Some(Gate::NamedGate(token)) => bindings.is_truthy(token),
        }
    }

    /// The href with bindings applied and fully bound query templates appended
    pub fn render_href(definition: &LinkDefinition, bindings: &TokenBindings) -> String {
        let mut href = template::substitute(&definition.href, bindings);

        let query: Vec<String> = definition
            .query
            .iter()
            .filter_map(|query| template::substitute_all(query, bindings))
            .collect();

        if !query.is_empty() {
            href.push(if definition.href.contains('?') { '&' } else { '?' });
            href.push_str(&query.join("&"));
        }

        tracing::trace!(rel = %definition.rel, template = %definition.href, %href, "Rendered link");
        href
    }
}
