use super::target::LogoTarget;

use std::collections::HashMap;

pub const DEVICON_RAW: &str = "https://raw.githubusercontent.com/devicon/devicon/master/icons";
pub const DEVICON_JSDELIVR: &str = "https://cdn.jsdelivr.net/gh/devicon/devicon/icons";
pub const SIMPLE_ICONS: &str = "https://cdn.simpleicons.org";
pub const PLACEHOLDER: &str = "https://placehold.co/100x100/333333/ffffff.svg";

lazy_static::lazy_static! {
    // Devicon names whose Simple Icons slug differs. Anything missing maps to itself.
    pub static ref ICON_NAMES: HashMap<&'static str, &'static str> = {
        let mut hm = HashMap::new();
        hm.insert("vuejs", "vuedotjs");
        hm.insert("nodejs", "nodedotjs");
        hm.insert("dotnetcore", "dotnet");
        hm.insert("chrome", "googlechrome");
        hm.insert("amazonwebservices", "amazonaws");
        hm.insert("mssql", "microsoftsqlserver");
        hm
    };
}

/// Counts only an exact 200 as a usable logo
pub fn status_is_ok(status: u16) -> bool {
    status == 200
}

/// Any 2xx
pub fn status_is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// A templated remote location tried in priority order
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    pub base: String,
    pub accept: fn(u16) -> bool,
    /// Serves a single-colour icon by slug rather than devicon paths
    pub monochrome: bool,
}

impl SourceDescriptor {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_owned(),
            accept: status_is_ok,
            monochrome: false,
        }
    }

    pub fn monochrome(base: &str) -> Self {
        Self {
            monochrome: true,
            ..Self::new(base)
        }
    }

    /// `{base}/{folder}/{folder}-{variant}.svg`
    pub fn variant_url(&self, target: &LogoTarget, variant: &str) -> String {
        let folder = target.folder();
        format!("{0}/{1}/{1}-{2}.svg", self.base, folder, variant)
    }
}

pub fn default_sources() -> Vec<SourceDescriptor> {
    vec![
        SourceDescriptor::new(DEVICON_RAW),
        SourceDescriptor::new(DEVICON_JSDELIVR),
        SourceDescriptor::monochrome(SIMPLE_ICONS),
    ]
}

pub fn default_icon_names() -> HashMap<String, String> {
    ICON_NAMES
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

/// Looks the target up in the translation table, falling back to its own name
pub fn monochrome_slug<'a>(icon_names: &'a HashMap<String, String>, target: &'a LogoTarget) -> &'a str {
    icon_names
        .get(&target.name)
        .map(String::as_str)
        .unwrap_or(&target.name)
}

pub fn placeholder_url(base: &str, target: &LogoTarget) -> String {
    format!("{}?text={}", base, target.initials())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_url_uses_folder() {
        let source = SourceDescriptor::new("https://cdn.example.com/icons/");
        let target = LogoTarget::new("angular").with_folder("angularjs");
        assert_eq!(
            "https://cdn.example.com/icons/angularjs/angularjs-plain.svg",
            source.variant_url(&target, "plain")
        );
    }

    #[test]
    fn test_monochrome_slug_translates() {
        let names = default_icon_names();
        assert_eq!("vuedotjs", monochrome_slug(&names, &LogoTarget::new("vuejs")));
        assert_eq!("googlechrome", monochrome_slug(&names, &LogoTarget::new("chrome")));
    }

    #[test]
    fn test_monochrome_slug_identity() {
        let names = default_icon_names();
        assert_eq!("docker", monochrome_slug(&names, &LogoTarget::new("docker")));
    }

    #[test]
    fn test_placeholder_url() {
        let target = LogoTarget::new("microsoftsqlserver").with_filename("mssql");
        assert_eq!(
            "https://placehold.co/100x100/333333/ffffff.svg?text=MS",
            placeholder_url(PLACEHOLDER, &target)
        );
    }

    #[test]
    fn test_acceptance() {
        assert!(status_is_ok(200));
        assert!(!status_is_ok(204));
        assert!(status_is_success(204));
        assert!(!status_is_success(404));
    }

    #[test]
    fn test_default_sources_order() {
        let sources = default_sources();
        assert_eq!(3, sources.len());
        assert_eq!(DEVICON_RAW, sources[0].base);
        assert!(!sources[1].monochrome);
        assert!(sources[2].monochrome);
    }
}
