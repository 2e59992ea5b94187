//! Integration tests for YAML rel configuration

use hyperrel::prelude::*;
use std::io::Write;
use std::sync::Arc;

const BLOG_MODULE: &str = r#"
namespaces:
  - name: blog
    href: "http://namespaces.example.com/{rel}"

subjects:
  - type: blog
    mode: collection
    rels:
      - rel: self
        href: /blogs
        query:
          - "limit={limit}"
          - "offset={offset}"
      - rel: next
        href: "/blogs?limit={limit}&offset={nextOffset}"
        optional: true

  - type: blog
    rels:
      - rel: self
        href: "/blogs/{blogId}"
      - rel: entries
        href: "/blogs/{blogId}/entries"
        array: true
"#;

const ENTRY_MODULE: &str = r#"
subjects:
  - type: entry
    rels:
      - rel: self
        href: "/entries/{entryId}"
      - rel: edit
        href: "/entries/{entryId}/edit"
        optional: adminRole
        attributes:
          method: PUT
          title: Edit entry
"#;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn assembler_from(config: &RelsConfig) -> ResourceAssembler {
    let registry = RelationshipRegistry::from_config(config).unwrap().frozen();
    ResourceAssembler::new(
        Arc::new(registry),
        Arc::new(FactoryRegistry::with_default(NullResourceFactory)),
    )
    .unwrap()
}

#[test]
fn test_load_from_file() {
    let file = write_config(BLOG_MODULE);
    let config = RelsConfig::from_yaml_file(file.path().to_str().unwrap()).unwrap();

    assert_eq!(config.namespaces.len(), 1);
    assert_eq!(config.subjects.len(), 2);
}

#[test]
fn test_merged_modules_render() {
    let blog = RelsConfig::from_yaml_file(write_config(BLOG_MODULE).path().to_str().unwrap())
        .unwrap();
    let entry = RelsConfig::from_yaml_str(ENTRY_MODULE).unwrap();
    let assembler = assembler_from(&RelsConfig::merge(vec![blog, entry]));

    let mut bindings = TokenBindings::new();
    bindings
        .bind("limit", 10)
        .bind("nextOffset", 10)
        .bind("adminRole", "editor")
        .bind("entryId", "abc");

    let blogs = assembler
        .assemble_collection(&[], "blog", None, "*", &bindings)
        .unwrap();
    let hrefs: Vec<_> = blogs.links.iter().map(|l| l.href.as_str()).collect();
    assert_eq!(hrefs, vec!["/blogs?limit=10", "/blogs?limit=10&offset=10"]);

    let entry = assembler
        .assemble_single(&Subject::new("entry", serde_json::json!({})), "*", &bindings)
        .unwrap();
    assert_eq!(entry.links.len(), 2);
    assert_eq!(entry.links[1].href, "/entries/abc/edit");
    assert_eq!(entry.links[1].attribute("title"), Some("Edit entry"));
    assert_eq!(entry.namespaces, vec![Namespace::new("blog", "http://namespaces.example.com/{rel}")]);
}

#[test]
fn test_rel_classification_from_config() {
    let assembler = assembler_from(&RelsConfig::from_yaml_str(BLOG_MODULE).unwrap());

    assert!(assembler.is_collection_array_rel("blog", "self"));
    assert!(assembler.is_collection_array_rel("blog", "next"));
    assert!(!assembler.is_array_rel("blog", "self"));
    assert!(assembler.is_array_rel("blog", "entries"));
}

#[test]
fn test_rejected_gate_token_never_renders_ungated_link() {
    let config = RelsConfig::from_yaml_str(
        r#"
subjects:
  - type: entry
    rels:
      - rel: edit
        href: "/entries/{id}/edit"
        optional: "{}"
"#,
    )
    .unwrap();

    let mut registry = RelationshipRegistry::new();
    let err = config.apply(&mut registry).unwrap_err();
    assert_eq!(err.error_code(), "EMPTY_GATE_TOKEN");
    assert!(registry.lookup(&SubjectKey::for_class("entry")).is_empty());

    let assembler = ResourceAssembler::new(
        Arc::new(registry.frozen()),
        Arc::new(FactoryRegistry::with_default(NullResourceFactory)),
    )
    .unwrap();
    let entry = assembler
        .assemble_single(
            &Subject::new("entry", serde_json::json!({})),
            "*",
            &TokenBindings::new(),
        )
        .unwrap();
    assert!(entry.links.is_empty());
}

#[test]
fn test_config_cannot_apply_to_frozen_registry() {
    let config = RelsConfig::from_yaml_str(ENTRY_MODULE).unwrap();
    let mut registry = RelationshipRegistry::new().frozen();

    let err = config.apply(&mut registry).unwrap_err();
    assert!(matches!(err, ConfigError::Registry(RegistryError::Frozen)));
}

#[test]
fn test_missing_file_reports_path() {
    let err = RelsConfig::from_yaml_file("/does/not/exist.yaml").unwrap_err();

    assert_eq!(err.error_code(), "CONFIG_IO_ERROR");
    assert!(err.to_string().contains("/does/not/exist.yaml"));
}
