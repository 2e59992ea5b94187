//! Format-agnostic resource tree handed to serializers

use crate::core::link::Link;
use crate::core::namespace::Namespace;
use indexmap::IndexMap;
use serde::Serialize;

/// Extracted properties of a subject, in field order
pub type Properties = IndexMap<String, serde_json::Value>;

/// A rendered resource: namespaces, links, properties and embedded resources
///
/// Built fresh by each assembler call. Serializers (HAL, Siren, plain JSON)
/// consume it; array-vs-object decisions for embedded rels are answered by
/// the registry's rel classification, not by the resource itself.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Resource {
    pub namespaces: Vec<Namespace>,
    pub links: Vec<Link>,
    pub properties: Properties,
    pub embedded: IndexMap<String, Vec<Resource>>,
}

impl Resource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_namespaces(&self) -> bool {
        !self.namespaces.is_empty()
    }

    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    pub fn has_properties(&self) -> bool {
        !self.properties.is_empty()
    }

    pub fn has_resources(&self) -> bool {
        !self.embedded.is_empty()
    }

    /// Embedded resources under `rel`, empty when there are none
    pub fn resources(&self, rel: &str) -> &[Resource] {
        self.embedded.get(rel).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Links with the given rel, in rendering order
    pub fn links_for<'a>(&'a self, rel: &'a str) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |link| link.rel == rel)
    }

    /// First link with the given rel
    pub fn link(&self, rel: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.rel == rel)
    }

    pub fn property(&self, name: &str) -> Option<&serde_json::Value> {
        self.properties.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_resource() {
        let resource = Resource::new();

        assert!(!resource.has_namespaces());
        assert!(!resource.has_links());
        assert!(!resource.has_properties());
        assert!(!resource.has_resources());
        assert!(resource.resources("entries").is_empty());
    }

    #[test]
    fn test_links_for_rel() {
        let resource = Resource {
            links: vec![
                Link::new("self", "/blogs"),
                Link::new("alternate", "/blogs.xml"),
                Link::new("alternate", "/blogs.json"),
            ],
            ..Resource::default()
        };

        let hrefs: Vec<_> = resource
            .links_for("alternate")
            .map(|link| link.href.as_str())
            .collect();
        assert_eq!(hrefs, vec!["/blogs.xml", "/blogs.json"]);
        assert_eq!(resource.link("self").unwrap().href, "/blogs");
        assert!(resource.link("next").is_none());
    }

    #[test]
    fn test_property_lookup() {
        let mut resource = Resource::new();
        resource
            .properties
            .insert("title".to_string(), json!("Hello"));

        assert!(resource.has_properties());
        assert_eq!(resource.property("title"), Some(&json!("Hello")));
    }
}
