use crate::error::AppError;

use std::fs::read_to_string;
use std::path::{Component, Path, PathBuf};

const DEFAULT_VARIANTS: &[&str] = &["original", "plain"];
const DEFAULT_EXT: &str = "svg";

/// A logo that should end up as a file in the output directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoTarget {
    /// Canonical devicon name, also the key into the monochrome icon table
    pub name: String,
    /// Fetched before any CDN is tried
    #[serde(default)]
    pub url: Option<String>,
    /// Devicon folder when it differs from the name (`angularjs` for `angular`)
    #[serde(default)]
    pub folder: Option<String>,
    /// Output file stem when it differs from the name
    #[serde(default)]
    pub filename: Option<String>,
    /// Style suffixes tried in order, e.g. `original`, `plain`, `original-wordmark`
    #[serde(default)]
    pub variants: Vec<String>,
    /// Output extension without the dot
    #[serde(default)]
    pub ext: Option<String>,
}

impl LogoTarget {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            url: None,
            folder: None,
            filename: None,
            variants: Vec::new(),
            ext: None,
        }
    }

    pub fn with_variants(self, variants: &[&str]) -> Self {
        Self {
            variants: variants.iter().map(|v| (*v).to_owned()).collect(),
            ..self
        }
    }

    pub fn with_url(self, url: &str) -> Self {
        Self {
            url: Some(url.to_owned()),
            ..self
        }
    }

    pub fn with_folder(self, folder: &str) -> Self {
        Self {
            folder: Some(folder.to_owned()),
            ..self
        }
    }

    pub fn with_filename(self, filename: &str) -> Self {
        Self {
            filename: Some(filename.to_owned()),
            ..self
        }
    }

    pub fn with_ext(self, ext: &str) -> Self {
        Self {
            ext: Some(ext.trim_start_matches('.').to_owned()),
            ..self
        }
    }

    pub fn folder(&self) -> &str {
        self.folder.as_deref().unwrap_or(&self.name)
    }

    pub fn stem(&self) -> &str {
        self.filename.as_deref().unwrap_or(&self.name)
    }

    pub fn variants(&self) -> Vec<&str> {
        if self.variants.is_empty() {
            DEFAULT_VARIANTS.to_vec()
        } else {
            self.variants.iter().map(String::as_str).collect()
        }
    }

    pub fn file_name(&self) -> String {
        let ext = self
            .ext
            .as_deref()
            .map(|e| e.trim_start_matches('.'))
            .unwrap_or(DEFAULT_EXT);
        [self.stem(), ".", ext].join("")
    }

    pub fn destination(&self, output_directory: &Path) -> PathBuf {
        output_directory.join(self.file_name())
    }

    /// The name must be non-blank and the file name a single plain path
    /// component, so the file always lands directly in the output directory.
    pub fn is_valid(&self) -> bool {
        if self.name.trim().is_empty() || self.stem().trim().is_empty() {
            return false;
        }
        let file_name = self.file_name();
        let mut components = Path::new(&file_name).components();
        matches!(
            (components.next(), components.next()),
            (Some(Component::Normal(_)), None)
        )
    }

    /// Two uppercased characters of the output stem, used as placeholder text
    pub fn initials(&self) -> String {
        self.stem().chars().take(2).collect::<String>().to_uppercase()
    }
}

/// Reads a JSON array of targets
pub fn load_manifest(path: &Path) -> Result<Vec<LogoTarget>, AppError> {
    let targets: Vec<LogoTarget> = serde_json::from_str(&read_to_string(path)?)?;
    if let Some(bad) = targets.iter().find(|t| !t.is_valid()) {
        return Err(AppError::InvalidTarget(format!("{:?}", bad)));
    }
    Ok(targets)
}

/// The logos shown on the site, in display order
pub fn default_targets() -> Vec<LogoTarget> {
    const OO: &[&str] = &["original", "plain"];
    const OW: &[&str] = &["original", "original-wordmark"];
    const PO: &[&str] = &["plain", "original"];

    vec![
        LogoTarget::new("mendix").with_variants(OO),
        LogoTarget::new("outsystems")
            .with_variants(OO)
            .with_url("https://upload.wikimedia.org/wikipedia/commons/8/8f/OutSystems_Logo_black.svg"),
        LogoTarget::new("simplifier")
            .with_url("https://placehold.co/100x100/76b900/ffffff.png?text=SP")
            .with_ext("png"),
        LogoTarget::new("powerapps")
            .with_variants(OO)
            .with_url("https://upload.wikimedia.org/wikipedia/commons/2/22/Microsoft_Power_Apps_logo.svg"),
        LogoTarget::new("html5").with_variants(OO),
        LogoTarget::new("css3").with_variants(OO),
        LogoTarget::new("javascript").with_variants(OO),
        LogoTarget::new("typescript").with_variants(OO),
        LogoTarget::new("react").with_variants(OW),
        LogoTarget::new("angular").with_folder("angularjs").with_variants(OO),
        LogoTarget::new("vuejs").with_variants(OO),
        LogoTarget::new("nodejs").with_variants(&["original", "plain", "original-wordmark"]),
        LogoTarget::new("dotnetcore").with_variants(OO),
        LogoTarget::new("php").with_variants(OO),
        LogoTarget::new("java").with_variants(OO),
        LogoTarget::new("python").with_variants(OO),
        LogoTarget::new("flutter").with_variants(OO),
        LogoTarget::new("ionic").with_variants(OW),
        LogoTarget::new("apple").with_variants(OW),
        LogoTarget::new("android").with_variants(OO),
        LogoTarget::new("chrome").with_variants(OO),
        LogoTarget::new("salesforce").with_variants(OO),
        LogoTarget::new("amazonwebservices")
            .with_filename("aws")
            .with_variants(&["original-wordmark", "plain-wordmark", "original"]),
        LogoTarget::new("azure").with_variants(OO),
        LogoTarget::new("googlecloud").with_variants(OO),
        LogoTarget::new("docker").with_variants(OO),
        LogoTarget::new("kubernetes").with_variants(PO),
        LogoTarget::new("jenkins").with_variants(OO),
        LogoTarget::new("gitlab").with_variants(OO),
        LogoTarget::new("terraform").with_variants(OO),
        LogoTarget::new("microsoftsqlserver")
            .with_filename("mssql")
            .with_variants(PO),
        LogoTarget::new("mysql").with_variants(OO),
        LogoTarget::new("mongodb").with_variants(OO),
        LogoTarget::new("oracle").with_variants(OO),
        LogoTarget::new("postgresql").with_variants(OO),
        LogoTarget::new("tensorflow").with_variants(OO),
        LogoTarget::new("pytorch").with_variants(OO),
        LogoTarget::new("selenium").with_variants(OO),
        LogoTarget::new("jest").with_variants(PO),
        LogoTarget::new("cucumber").with_variants(PO),
        LogoTarget::new("mocha").with_variants(PO),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::write;
    use tempfile::tempdir;

    #[test]
    fn test_file_name_defaults_to_svg() {
        let target = LogoTarget::new("react");
        assert_eq!("react.svg", target.file_name());
        assert_eq!("react", target.folder());
        assert_eq!(vec!["original", "plain"], target.variants());
    }

    #[test]
    fn test_overrides() {
        let target = LogoTarget::new("amazonwebservices")
            .with_filename("aws")
            .with_folder("aws-folder")
            .with_ext(".png");
        assert_eq!("aws.png", target.file_name());
        assert_eq!("aws-folder", target.folder());
        assert_eq!("AW", target.initials());
        assert_eq!(
            PathBuf::from("/tmp/logos/aws.png"),
            target.destination(Path::new("/tmp/logos"))
        );
    }

    #[test]
    fn test_initials_of_short_name() {
        assert_eq!("Q", LogoTarget::new("q").initials());
    }

    #[test]
    fn test_default_targets_have_unique_file_names() {
        let targets = default_targets();
        let mut names: Vec<String> = targets.iter().map(LogoTarget::file_name).collect();
        names.sort();
        names.dedup();
        assert_eq!(targets.len(), names.len());
    }

    #[test]
    fn test_load_manifest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.json");
        write(
            &path,
            r#"[{"name": "vuejs"}, {"name": "amazonwebservices", "filename": "aws", "variants": ["original-wordmark"]}]"#,
        )
        .unwrap();
        let targets = load_manifest(&path).unwrap();
        assert_eq!(2, targets.len());
        assert_eq!(LogoTarget::new("vuejs"), targets[0]);
        assert_eq!("aws.svg", targets[1].file_name());
        assert_eq!(vec!["original-wordmark"], targets[1].variants());
    }

    #[test]
    fn test_load_manifest_rejects_blank_names() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.json");
        write(&path, r#"[{"name": " "}]"#).unwrap();
        assert!(matches!(
            load_manifest(&path),
            Err(AppError::InvalidTarget(_))
        ));
    }

    #[test]
    fn test_load_manifest_rejects_paths_outside_output() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("targets.json");
        let outside = dir.path().join("outside");
        for target in [
            format!(r#"{{"name": "a", "filename": "{}"}}"#, outside.to_string_lossy()),
            r#"{"name": "a", "filename": "../a"}"#.to_owned(),
            r#"{"name": "../../a"}"#.to_owned(),
            r#"{"name": "sub/a"}"#.to_owned(),
            r#"{"name": "a", "ext": "svg/../../b"}"#.to_owned(),
        ] {
            write(&path, format!("[{}]", target)).unwrap();
            assert!(
                matches!(load_manifest(&path), Err(AppError::InvalidTarget(_))),
                "accepted {}",
                target
            );
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(LogoTarget::new("dotnetcore").is_valid());
        assert!(LogoTarget::new("amazonwebservices").with_filename("aws").is_valid());
        assert!(!LogoTarget::new("a").with_filename(" ").is_valid());
        assert!(!LogoTarget::new("/etc/passwd").is_valid());
        assert!(default_targets().iter().all(LogoTarget::is_valid));
    }

    #[test]
    fn test_load_manifest_missing_file() {
        assert!(load_manifest(Path::new("/tmp/bad/path/targets.json")).is_err());
    }
}
