use super::*;

#[test]
fn registry_initializes_empty() {
    let registry = ResourceRegistry::default();
    assert!(registry.resources().is_empty());
    assert_eq!(registry.generate_links(), "");
    assert_eq!(registry.generate_scripts(), "");
}

#[test]
fn stylesheet_from_single_url() {
    let url = "https://hello.world.com/file.css".to_string();
    let registry = ResourceRegistry::new(&[], &[RawResource::Url(url.clone())]);
    let resource = &registry.resources()[0];
    assert_eq!(resource.external_url.as_ref(), Some(&url));
    assert_eq!(resource.resource_type, ResourceType::Css);
}

#[test]
fn stylesheet_from_attribute_map() {
    let attributes = BTreeMap::from([
        ("href".to_string(), "https://hello.world.com/file.css".to_string()),
        ("crossorigin".to_string(), "anonymous".to_string()),
    ]);
    let registry = ResourceRegistry::new(&[], &[RawResource::Attributes(attributes.clone())]);
    let resource = &registry.resources()[0];
    assert_eq!(resource.attributes, attributes);
    assert!(resource.external_url.is_none());
}

#[test]
fn script_from_single_url_generates_script_tag() {
    let url = "https://hello.world.com/file.js".to_string();
    let registry = ResourceRegistry::new(&[RawResource::Url(url.clone())], &[]);
    assert_eq!(
        registry.generate_scripts(),
        format!("<script src=\"{url}\"></script>")
    );
}

#[test]
fn dependency_records_keep_package_metadata() {
    let mut registry = ResourceRegistry::default();
    registry.register_dependency(
        ResourceType::Js,
        DependencyResource {
            external_url: Some("https://fake.external.url/hello.js".to_string()),
            relative_package_path: Some("fake.min.js".to_string()),
            dev_package_path: Some("fake.dev.js".to_string()),
            namespace: Some("suite_whatever".to_string()),
            dynamic: false,
        },
    );

    let resource = &registry.resources()[0];
    assert_eq!(resource.namespace.as_deref(), Some("suite_whatever"));
    assert_eq!(resource.relative_package_path.as_deref(), Some("fake.min.js"));
    assert_eq!(registry.registered_namespaces(), vec!["suite_whatever"]);
    assert_eq!(registry.registered_paths("suite_whatever"), vec!["fake.min.js"]);
}

#[test]
fn serve_locally_switches_to_component_suite_urls() {
    let mut registry = ResourceRegistry::default();
    registry.register_dependency(
        ResourceType::Js,
        DependencyResource {
            external_url: Some("https://cdn.example.com/suite.min.js".to_string()),
            relative_package_path: Some("suite.min.js".to_string()),
            namespace: Some("suite".to_string()),
            ..DependencyResource::default()
        },
    );

    assert_eq!(
        registry.generate_scripts(),
        "<script src=\"https://cdn.example.com/suite.min.js\"></script>"
    );

    registry.set_serve_scripts_locally(true);
    assert_eq!(
        registry.generate_scripts(),
        "<script src=\"_dash-component-suites/suite/suite.min.js\"></script>"
    );
}

#[test]
fn dynamic_resources_are_left_out_of_generated_tags() {
    let mut registry = ResourceRegistry::default();
    registry.register_dependency(
        ResourceType::Css,
        DependencyResource {
            external_url: Some("https://cdn.example.com/lazy.css".to_string()),
            dynamic: true,
            ..DependencyResource::default()
        },
    );
    registry.register_raw(
        ResourceType::Css,
        &RawResource::Url("https://cdn.example.com/base.css".to_string()),
    );

    assert_eq!(
        registry.generate_links(),
        "<link rel=\"stylesheet\" href=\"https://cdn.example.com/base.css\">"
    );
}

#[test]
fn links_join_multiple_stylesheets_with_newlines() {
    let registry = ResourceRegistry::new(
        &[],
        &[
            RawResource::Url("https://a.example.com/a.css".to_string()),
            RawResource::Url("https://b.example.com/b.css".to_string()),
        ],
    );
    let links = registry.generate_links();
    assert_eq!(links.lines().count(), 2);
    assert!(links.contains("a.css"));
    assert!(links.contains("b.css"));
}
