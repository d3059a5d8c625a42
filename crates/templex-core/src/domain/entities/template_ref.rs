//! `TemplateRef`: a caller-supplied pointer to a template, before resolution.

use std::fmt;

/// Points at a template, either a local directory or a VCS URL, with an
/// optional pinned revision.
///
/// Immutable once constructed. Resolution (cloning, tag selection) is the
/// job of the Template Locator application service, not this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRef {
    url: String,
    vcs_ref: Option<String>,
    use_prereleases: bool,
}

impl TemplateRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            vcs_ref: None,
            use_prereleases: false,
        }
    }

    pub fn with_ref(mut self, vcs_ref: impl Into<String>) -> Self {
        self.vcs_ref = Some(vcs_ref.into());
        self
    }

    pub fn with_prereleases(mut self, use_prereleases: bool) -> Self {
        self.use_prereleases = use_prereleases;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn vcs_ref(&self) -> Option<&str> {
        self.vcs_ref.as_deref()
    }

    pub fn use_prereleases(&self) -> bool {
        self.use_prereleases
    }
}

impl fmt::Display for TemplateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.vcs_ref {
            Some(r) => write!(f, "{}@{}", self.url, r),
            None => write!(f, "{}", self.url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_ref_when_present() {
        let r = TemplateRef::new("https://example.com/t.git").with_ref("v1.2.0");
        assert_eq!(r.to_string(), "https://example.com/t.git@v1.2.0");
    }

    #[test]
    fn display_omits_ref_when_absent() {
        let r = TemplateRef::new("/local/template");
        assert_eq!(r.to_string(), "/local/template");
    }
}
