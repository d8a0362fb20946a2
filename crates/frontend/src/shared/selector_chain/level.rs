use contracts::shared::list_resource::ListResource;

/// Static configuration of one chain position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSpec {
    pub key: &'static str,
    /// Caption shown above the dropdown
    pub title: &'static str,
    pub resource: ListResource,
    /// Key of the level whose selection filters this one
    pub depends_on: Option<&'static str>,
}

impl LevelSpec {
    pub fn root(key: &'static str, title: &'static str, resource: ListResource) -> Self {
        Self {
            key,
            title,
            resource,
            depends_on: None,
        }
    }

    pub fn child(
        key: &'static str,
        title: &'static str,
        resource: ListResource,
        parent: &'static str,
    ) -> Self {
        Self {
            key,
            title,
            resource,
            depends_on: Some(parent),
        }
    }

    pub fn requires_parent(&self) -> bool {
        self.depends_on.is_some()
    }
}
