//! POM file parsing: dependency declarations, parent inheritance, property interpolation.

use std::collections::BTreeMap;

use jargo_util::errors::JargoError;

use crate::xml::{self, Node};

const DEPENDENCY: &str = "project>dependencies>dependency";
const MANAGED_DEPENDENCY: &str = "project>dependencyManagement>dependencies>dependency";
const EXCLUSION: &str = "project>dependencies>dependency>exclusions>exclusion";
const MANAGED_EXCLUSION: &str =
    "project>dependencyManagement>dependencies>dependency>exclusions>exclusion";
const PARENT: &str = "project>parent";

/// Longest value interpolation may produce.
const MAX_INTERPOLATED_LEN: usize = 64 * 1024;

/// Property references expanded per `interpolate` call.
const MAX_EXPANSIONS: usize = 10_000;

/// A parsed POM (Project Object Model) file.
#[derive(Debug, Clone, Default)]
pub struct Pom {
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub version: Option<String>,
    pub packaging: Option<String>,

    pub parent: Option<ParentRef>,
    pub properties: BTreeMap<String, String>,
    pub dependencies: Vec<PomDependency>,
    pub dependency_management: Vec<PomDependency>,
}

/// Reference to a parent POM.
#[derive(Debug, Clone, Default)]
pub struct ParentRef {
    pub group_id: String,
    pub artifact_id: String,
    pub version: String,
}

/// A dependency declared in a POM file.
#[derive(Debug, Clone, Default)]
pub struct PomDependency {
    pub group_id: String,
    pub artifact_id: String,
    pub version: Option<String>,
    pub scope: Option<String>,
    pub optional: bool,
    pub type_: Option<String>,
    pub exclusions: Vec<PomExclusion>,
}

/// A `<exclusion>` under a dependency. `*` in either field matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PomExclusion {
    pub group_id: String,
    pub artifact_id: String,
}

impl PomDependency {
    /// Whether the dependency is needed at compile or run time by consumers.
    ///
    /// Optional dependencies and the `test`, `provided`, `system` and `import`
    /// scopes do not propagate transitively.
    pub fn is_transitive(&self) -> bool {
        !self.optional
            && matches!(
                self.scope.as_deref(),
                None | Some("compile") | Some("runtime")
            )
    }
}

impl Pom {
    /// Effective group ID (falls back to parent).
    pub fn effective_group_id(&self) -> Option<&str> {
        self.group_id
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.group_id.as_str()))
    }

    /// Effective version (falls back to parent).
    pub fn effective_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or(self.parent.as_ref().map(|p| p.version.as_str()))
    }

    /// Resolve `${property}` references using POM properties and the
    /// built-in `project.*` variables. Unknown references are left as is.
    ///
    /// A property that refers back to itself, directly or through other
    /// properties, is unresolvable and its reference is kept verbatim. If the
    /// expansion grows past 64 KiB or needs more than 10 000 lookups, the
    /// input is returned unchanged.
    pub fn interpolate(&self, input: &str) -> String {
        let mut expansion = Expansion::default();
        match self.expand(input, &mut expansion) {
            Some(result) => result,
            None => {
                tracing::warn!("property expansion of `{input}` is too large, leaving it unresolved");
                input.to_string()
            }
        }
    }

    fn expand(&self, input: &str, expansion: &mut Expansion) -> Option<String> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;
        while let Some(start) = rest.find("${") {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            let key = &rest[start + 2..start + len];
            out.push_str(&rest[..start]);
            match self.property(key) {
                Some(value) if !expansion.visiting.iter().any(|k| k == key) => {
                    expansion.steps += 1;
                    if expansion.steps > MAX_EXPANSIONS {
                        return None;
                    }
                    expansion.visiting.push(key.to_string());
                    let expanded = self.expand(&value, expansion);
                    expansion.visiting.pop();
                    out.push_str(&expanded?);
                }
                _ => out.push_str(&rest[start..=start + len]),
            }
            if out.len() > MAX_INTERPOLATED_LEN {
                return None;
            }
            rest = &rest[start + len + 1..];
        }
        out.push_str(rest);
        (out.len() <= MAX_INTERPOLATED_LEN).then_some(out)
    }

    fn property(&self, key: &str) -> Option<String> {
        match key {
            "project.groupId" | "pom.groupId" => self.effective_group_id().map(str::to_string),
            "project.artifactId" | "pom.artifactId" => self.artifact_id.clone(),
            "project.version" | "pom.version" => self.effective_version().map(str::to_string),
            "project.parent.groupId" => self.parent.as_ref().map(|p| p.group_id.clone()),
            "project.parent.version" => self.parent.as_ref().map(|p| p.version.clone()),
            _ => self.properties.get(key).cloned(),
        }
    }

    /// Interpolate all property references in dependencies and dependency management.
    pub fn resolve_properties(&mut self) {
        let snapshot = self.clone();
        for dep in self
            .dependencies
            .iter_mut()
            .chain(self.dependency_management.iter_mut())
        {
            dep.group_id = snapshot.interpolate(&dep.group_id);
            dep.artifact_id = snapshot.interpolate(&dep.artifact_id);
            if let Some(v) = &dep.version {
                dep.version = Some(snapshot.interpolate(v));
            }
            for exclusion in dep.exclusions.iter_mut() {
                exclusion.group_id = snapshot.interpolate(&exclusion.group_id);
                exclusion.artifact_id = snapshot.interpolate(&exclusion.artifact_id);
            }
        }
    }

    /// Merge a parent POM's properties and dependency management into this POM.
    /// Entries already declared by the child win.
    pub fn apply_parent(&mut self, parent: &Pom) {
        for (k, v) in &parent.properties {
            self.properties
                .entry(k.clone())
                .or_insert_with(|| v.clone());
        }
        if self.group_id.is_none() {
            self.group_id = parent.effective_group_id().map(str::to_string);
        }
        if self.version.is_none() {
            self.version = parent.effective_version().map(str::to_string);
        }
        for managed in &parent.dependency_management {
            let overridden = self.dependency_management.iter().any(|d| {
                d.group_id == managed.group_id && d.artifact_id == managed.artifact_id
            });
            if !overridden {
                self.dependency_management.push(managed.clone());
            }
        }
    }

    /// The dependency management entry for a given group:artifact.
    pub fn managed(&self, group_id: &str, artifact_id: &str) -> Option<&PomDependency> {
        self.dependency_management
            .iter()
            .find(|d| d.group_id == group_id && d.artifact_id == artifact_id)
    }

    /// Look up a version from dependency management for a given group:artifact.
    pub fn managed_version(&self, group_id: &str, artifact_id: &str) -> Option<&str> {
        self.managed(group_id, artifact_id)
            .and_then(|d| d.version.as_deref())
    }
}

/// Bookkeeping for one `interpolate` call.
#[derive(Default)]
struct Expansion {
    visiting: Vec<String>,
    steps: usize,
}

/// Parse a POM XML string into a `Pom` struct.
pub fn parse_pom(content: &str) -> miette::Result<Pom> {
    let mut pom = Pom::default();
    let mut dep: Option<PomDependency> = None;
    let mut parent: Option<ParentRef> = None;
    let mut exclusion: Option<PomExclusion> = None;

    xml::walk(content, |node| match node {
        Node::Open(DEPENDENCY | MANAGED_DEPENDENCY) => dep = Some(PomDependency::default()),
        Node::Open(EXCLUSION | MANAGED_EXCLUSION) => exclusion = Some(PomExclusion::default()),
        Node::Open(PARENT) => parent = Some(ParentRef::default()),
        Node::Open(_) => {}
        Node::Close(ctx, text) => {
            if ctx == DEPENDENCY || ctx == MANAGED_DEPENDENCY {
                if let Some(done) = dep.take() {
                    if ctx == DEPENDENCY {
                        pom.dependencies.push(done);
                    } else {
                        pom.dependency_management.push(done);
                    }
                }
            } else if ctx == EXCLUSION || ctx == MANAGED_EXCLUSION {
                if let (Some(done), Some(d)) = (exclusion.take(), dep.as_mut()) {
                    d.exclusions.push(done);
                }
            } else if let Some(field) =
                child_of(ctx, EXCLUSION).or(child_of(ctx, MANAGED_EXCLUSION))
            {
                if let Some(e) = exclusion.as_mut() {
                    match field {
                        "groupId" => e.group_id = text.to_string(),
                        "artifactId" => e.artifact_id = text.to_string(),
                        _ => {}
                    }
                }
            } else if ctx == PARENT {
                pom.parent = parent.take();
            } else if let Some(field) = child_of(ctx, DEPENDENCY).or(child_of(ctx, MANAGED_DEPENDENCY))
            {
                if let Some(d) = dep.as_mut() {
                    set_dependency_field(d, field, text);
                }
            } else if let Some(field) = child_of(ctx, PARENT) {
                if let Some(p) = parent.as_mut() {
                    match field {
                        "groupId" => p.group_id = text.to_string(),
                        "artifactId" => p.artifact_id = text.to_string(),
                        "version" => p.version = text.to_string(),
                        _ => {}
                    }
                }
            } else if let Some(name) = child_of(ctx, "project>properties") {
                pom.properties.insert(name.to_string(), text.to_string());
            } else if let Some(field) = child_of(ctx, "project") {
                let value = Some(text.to_string());
                match field {
                    "groupId" => pom.group_id = value,
                    "artifactId" => pom.artifact_id = value,
                    "version" => pom.version = value,
                    "packaging" => pom.packaging = value,
                    _ => {}
                }
            }
        }
    })
    .map_err(|e| JargoError::Document {
        document: "POM".to_string(),
        message: e.to_string(),
    })?;

    Ok(pom)
}

/// The element name when `ctx` is a direct child of `parent`.
fn child_of<'a>(ctx: &'a str, parent: &str) -> Option<&'a str> {
    ctx.strip_prefix(parent)?
        .strip_prefix('>')
        .filter(|name| !name.contains('>'))
}

fn set_dependency_field(dep: &mut PomDependency, field: &str, text: &str) {
    match field {
        "groupId" => dep.group_id = text.to_string(),
        "artifactId" => dep.artifact_id = text.to_string(),
        "version" => dep.version = Some(text.to_string()),
        "scope" => dep.scope = Some(text.to_string()),
        "optional" => dep.optional = text == "true",
        "type" => dep.type_ = Some(text.to_string()),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_POM: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<project xmlns="http://maven.apache.org/POM/4.0.0">
    <modelVersion>4.0.0</modelVersion>
    <groupId>org.example</groupId>
    <artifactId>my-lib</artifactId>
    <version>1.0.0</version>
    <packaging>jar</packaging>

    <properties>
        <slf4j.version>1.7.25</slf4j.version>
    </properties>

    <dependencies>
        <dependency>
            <groupId>org.slf4j</groupId>
            <artifactId>slf4j-api</artifactId>
            <version>${slf4j.version}</version>
        </dependency>
        <dependency>
            <groupId>junit</groupId>
            <artifactId>junit</artifactId>
            <version>4.13.2</version>
            <scope>test</scope>
        </dependency>
        <dependency>
            <groupId>com.example</groupId>
            <artifactId>extra</artifactId>
            <version>2.0</version>
            <optional>true</optional>
            <exclusions>
                <exclusion>
                    <groupId>commons-logging</groupId>
                    <artifactId>commons-logging</artifactId>
                </exclusion>
            </exclusions>
        </dependency>
    </dependencies>
</project>"#;

    #[test]
    fn parse_simple_pom() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.group_id.as_deref(), Some("org.example"));
        assert_eq!(pom.artifact_id.as_deref(), Some("my-lib"));
        assert_eq!(pom.version.as_deref(), Some("1.0.0"));
        assert_eq!(pom.packaging.as_deref(), Some("jar"));
        assert_eq!(pom.dependencies.len(), 3);
        assert_eq!(pom.properties.get("slf4j.version").unwrap(), "1.7.25");
    }

    #[test]
    fn exclusion_fields_do_not_leak_into_dependency() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert_eq!(pom.dependencies[2].group_id, "com.example");
        assert_eq!(pom.dependencies[2].artifact_id, "extra");
    }

    #[test]
    fn exclusions_are_parsed() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        assert!(pom.dependencies[0].exclusions.is_empty());
        assert_eq!(
            pom.dependencies[2].exclusions,
            vec![PomExclusion {
                group_id: "commons-logging".to_string(),
                artifact_id: "commons-logging".to_string(),
            }]
        );
    }

    #[test]
    fn managed_exclusions_are_parsed_and_interpolated() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <properties><excluded.group>org.legacy</excluded.group></properties>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>org.example</groupId>
                <artifactId>core</artifactId>
                <version>1.0</version>
                <exclusions>
                    <exclusion>
                        <groupId>${excluded.group}</groupId>
                        <artifactId>*</artifactId>
                    </exclusion>
                </exclusions>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let mut pom = parse_pom(xml).unwrap();
        pom.resolve_properties();
        let managed = pom.managed("org.example", "core").unwrap();
        assert_eq!(managed.exclusions.len(), 1);
        assert_eq!(managed.exclusions[0].group_id, "org.legacy");
        assert_eq!(managed.exclusions[0].artifact_id, "*");
    }

    #[test]
    fn property_interpolation() {
        let mut pom = parse_pom(SIMPLE_POM).unwrap();
        pom.resolve_properties();
        assert_eq!(pom.dependencies[0].version.as_deref(), Some("1.7.25"));
    }

    #[test]
    fn unknown_property_is_left_alone() {
        let pom = Pom::default();
        assert_eq!(pom.interpolate("${missing}-x"), "${missing}-x");
    }

    fn with_properties(pairs: &[(&str, &str)]) -> Pom {
        let mut pom = Pom::default();
        for (k, v) in pairs {
            pom.properties.insert(k.to_string(), v.to_string());
        }
        pom
    }

    #[test]
    fn nested_properties_expand() {
        let pom = with_properties(&[("a", "${b}-${c}"), ("b", "1"), ("c", "${b}.0")]);
        assert_eq!(pom.interpolate("v${a}"), "v1-1.0");
    }

    #[test]
    fn self_referencing_property_stays_unresolved() {
        let pom = with_properties(&[("a", "${a}${a}")]);
        assert_eq!(pom.interpolate("${a}"), "${a}${a}");
    }

    #[test]
    fn property_cycle_stays_unresolved() {
        let pom = with_properties(&[("a", "x${b}"), ("b", "y${a}")]);
        assert_eq!(pom.interpolate("${a}"), "xy${a}");
        assert_eq!(pom.interpolate("${b}"), "yx${b}");
    }

    #[test]
    fn oversized_expansion_is_left_unresolved() {
        // Each level doubles the previous one: 2^20 copies of "0123456789".
        let mut pairs = vec![("p0".to_string(), "0123456789".to_string())];
        for i in 1..=20 {
            pairs.push((format!("p{i}"), format!("${{p{}}}${{p{}}}", i - 1, i - 1)));
        }
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let pom = with_properties(&pairs);

        assert_eq!(pom.interpolate("${p20}"), "${p20}");
        assert_eq!(pom.interpolate("${p3}").len(), 80);
    }

    #[test]
    fn expansion_count_is_bounded() {
        // Expands to nothing, but would take 2^30 lookups.
        let mut pairs = vec![("q0".to_string(), String::new())];
        for i in 1..=30 {
            pairs.push((format!("q{i}"), format!("${{q{}}}${{q{}}}", i - 1, i - 1)));
        }
        let pairs: Vec<(&str, &str)> = pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect();
        let pom = with_properties(&pairs);

        assert_eq!(pom.interpolate("x${q30}"), "x${q30}");
        assert_eq!(pom.interpolate("x${q4}"), "x");
    }

    #[test]
    fn transitive_filter() {
        let pom = parse_pom(SIMPLE_POM).unwrap();
        let flags: Vec<bool> = pom.dependencies.iter().map(|d| d.is_transitive()).collect();
        assert_eq!(flags, vec![true, false, false]);
    }

    #[test]
    fn dependency_management_lookup() {
        let xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>parent</artifactId>
    <version>1.0.0</version>
    <dependencyManagement>
        <dependencies>
            <dependency>
                <groupId>com.google.guava</groupId>
                <artifactId>guava</artifactId>
                <version>32.0.0-jre</version>
            </dependency>
        </dependencies>
    </dependencyManagement>
</project>"#;
        let pom = parse_pom(xml).unwrap();
        assert_eq!(pom.dependency_management.len(), 1);
        assert!(pom.dependencies.is_empty());
        assert_eq!(
            pom.managed_version("com.google.guava", "guava"),
            Some("32.0.0-jre")
        );
    }

    #[test]
    fn parent_ref_and_inheritance() {
        let child_xml = r#"<?xml version="1.0"?>
<project>
    <parent>
        <groupId>org.example</groupId>
        <artifactId>parent-pom</artifactId>
        <version>2.0.0</version>
    </parent>
    <artifactId>child</artifactId>
    <dependencies>
        <dependency>
            <groupId>${project.groupId}</groupId>
            <artifactId>sibling</artifactId>
            <version>${sibling.version}</version>
        </dependency>
    </dependencies>
</project>"#;
        let parent_xml = r#"<?xml version="1.0"?>
<project>
    <groupId>org.example</groupId>
    <artifactId>parent-pom</artifactId>
    <version>2.0.0</version>
    <properties><sibling.version>9.9</sibling.version></properties>
</project>"#;
        let mut child = parse_pom(child_xml).unwrap();
        let parent = child.parent.clone().unwrap();
        assert_eq!(parent.artifact_id, "parent-pom");
        assert_eq!(child.effective_version(), Some("2.0.0"));

        child.apply_parent(&parse_pom(parent_xml).unwrap());
        child.resolve_properties();
        assert_eq!(child.dependencies[0].group_id, "org.example");
        assert_eq!(child.dependencies[0].version.as_deref(), Some("9.9"));
    }

    #[test]
    fn malformed_pom_is_an_error() {
        assert!(parse_pom("<project><groupId>x</project>").is_err());
    }
}
