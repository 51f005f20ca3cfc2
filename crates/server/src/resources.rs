//! Registry of the page's script and stylesheet resources, and the
//! `<link>`/`<script>` tag generation for the index page.

use std::collections::BTreeMap;

use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Js,
    Css,
}

/// Raw external resource as users configure them: either a bare url or an
/// attribute map for the generated tag.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawResource {
    Url(String),
    Attributes(BTreeMap<String, String>),
}

/// Resource record shipped by a component suite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DependencyResource {
    #[serde(default)]
    pub external_url: Option<String>,
    #[serde(default)]
    pub relative_package_path: Option<String>,
    #[serde(default)]
    pub dev_package_path: Option<String>,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub dynamic: bool,
}

#[derive(Debug, Clone)]
pub struct Resource {
    pub resource_type: ResourceType,
    pub external_url: Option<String>,
    pub relative_package_path: Option<String>,
    pub dev_package_path: Option<String>,
    pub namespace: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub dynamic: bool,
}

#[derive(Debug, Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    serve_scripts_locally: bool,
    serve_css_locally: bool,
}

impl ResourceRegistry {
    pub fn new(scripts: &[RawResource], stylesheets: &[RawResource]) -> Self {
        let mut registry = Self::default();
        for script in scripts {
            registry.register_raw(ResourceType::Js, script);
        }
        for stylesheet in stylesheets {
            registry.register_raw(ResourceType::Css, stylesheet);
        }
        registry
    }

    pub fn set_serve_scripts_locally(&mut self, val: bool) {
        self.serve_scripts_locally = val;
    }

    pub fn set_serve_css_locally(&mut self, val: bool) {
        self.serve_css_locally = val;
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn register_raw(&mut self, resource_type: ResourceType, resource: &RawResource) {
        let url_attribute = match resource_type {
            ResourceType::Js => "src",
            ResourceType::Css => "href",
        };
        let (external_url, attributes) = match resource {
            RawResource::Url(url) => (
                Some(url.clone()),
                BTreeMap::from([(url_attribute.to_string(), url.clone())]),
            ),
            RawResource::Attributes(attributes) => (None, attributes.clone()),
        };
        self.resources.push(Resource {
            resource_type,
            external_url,
            relative_package_path: None,
            dev_package_path: None,
            namespace: None,
            attributes,
            dynamic: false,
        });
    }

    pub fn register_dependency(
        &mut self,
        resource_type: ResourceType,
        dependency: DependencyResource,
    ) {
        self.resources.push(Resource {
            resource_type,
            external_url: dependency.external_url,
            relative_package_path: dependency.relative_package_path,
            dev_package_path: dependency.dev_package_path,
            namespace: dependency.namespace,
            attributes: BTreeMap::new(),
            dynamic: dependency.dynamic,
        });
    }

    pub fn registered_namespaces(&self) -> Vec<String> {
        let mut namespaces: Vec<String> = self
            .of_type(ResourceType::Js)
            .filter_map(|r| r.namespace.clone())
            .collect();
        namespaces.sort();
        namespaces.dedup();
        namespaces
    }

    pub fn registered_paths(&self, namespace: &str) -> Vec<String> {
        self.of_type(ResourceType::Js)
            .filter(|r| r.namespace.as_deref() == Some(namespace))
            .filter_map(|r| r.relative_package_path.clone())
            .collect()
    }

    /// `<link>` header for the index page.
    pub fn generate_links(&self) -> String {
        self.of_type(ResourceType::Css)
            .filter(|r| !r.dynamic)
            .map(|r| {
                let attributes = self.tag_attributes(r, "href", self.serve_css_locally);
                format!("<link rel=\"stylesheet\" {}>", join_attributes(&attributes))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `<script>` footer for the index page.
    pub fn generate_scripts(&self) -> String {
        self.of_type(ResourceType::Js)
            .filter(|r| !r.dynamic)
            .map(|r| {
                let attributes = self.tag_attributes(r, "src", self.serve_scripts_locally);
                format!("<script {}></script>", join_attributes(&attributes))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn of_type(&self, resource_type: ResourceType) -> impl Iterator<Item = &Resource> {
        self.resources
            .iter()
            .filter(move |r| r.resource_type == resource_type)
    }

    fn tag_attributes(
        &self,
        resource: &Resource,
        url_attribute: &str,
        serve_locally: bool,
    ) -> BTreeMap<String, String> {
        let url = if serve_locally {
            resource
                .relative_package_path
                .as_ref()
                .map(|path| component_suite_url(resource.namespace.as_deref(), path))
        } else {
            resource.external_url.clone()
        };
        match url {
            Some(url) => BTreeMap::from([(url_attribute.to_string(), url)]),
            None => resource.attributes.clone(),
        }
    }
}

/// Locally served suite resources are mounted under the component-suites
/// route, namespaced per package.
fn component_suite_url(namespace: Option<&str>, relative_path: &str) -> String {
    format!(
        "_dash-component-suites/{}/{relative_path}",
        namespace.unwrap_or_default()
    )
}

fn join_attributes(attributes: &BTreeMap<String, String>) -> String {
    attributes
        .iter()
        .map(|(key, value)| format!("{key}=\"{value}\""))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "tests/resources_tests.rs"]
mod tests;
