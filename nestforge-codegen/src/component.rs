//! Selectable generator components.

use std::{fmt, str::FromStr};

/// One independently selectable generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Component {
    Entities,
    Services,
    Interfaces,
    Controllers,
    Dtos,
    Modules,
    AppModule,
    Main,
    Env,
    PackageJson,
    Readme,
    Datasource,
    Diagram,
}

impl Component {
    /// Every component, in run order.
    pub const ALL: [Component; 13] = [
        Component::Entities,
        Component::Services,
        Component::Interfaces,
        Component::Controllers,
        Component::Dtos,
        Component::Modules,
        Component::AppModule,
        Component::Main,
        Component::Env,
        Component::PackageJson,
        Component::Readme,
        Component::Datasource,
        Component::Diagram,
    ];

    /// Name accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Component::Entities => "entities",
            Component::Services => "services",
            Component::Interfaces => "interfaces",
            Component::Controllers => "controllers",
            Component::Dtos => "dtos",
            Component::Modules => "modules",
            Component::AppModule => "app-module",
            Component::Main => "main",
            Component::Env => "env",
            Component::PackageJson => "package.json",
            Component::Readme => "readme",
            Component::Datasource => "datasource",
            Component::Diagram => "diagram",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Component::Entities => "TypeORM entities",
            Component::Services => "CRUD services",
            Component::Interfaces => "DTO interfaces",
            Component::Controllers => "REST controllers",
            Component::Dtos => "validated DTO classes",
            Component::Modules => "per-table Nest modules",
            Component::AppModule => "root application module",
            Component::Main => "bootstrap entry point",
            Component::Env => ".env file",
            Component::PackageJson => "package.json",
            Component::Readme => "README with data dictionary",
            Component::Datasource => "TypeORM data source",
            Component::Diagram => "schema diagram (SVG and PNG)",
        }
    }

    /// Whether the component emits one file per table.
    pub fn is_per_table(&self) -> bool {
        matches!(
            self,
            Component::Entities
                | Component::Services
                | Component::Interfaces
                | Component::Controllers
                | Component::Dtos
                | Component::Modules
        )
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Component {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Component::ALL
            .into_iter()
            .find(|c| c.as_str() == name)
            .ok_or_else(|| format!("unknown component '{}'", s.trim()))
    }
}

/// Components parsed from user input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Recognized components, deduplicated, in the order given.
    pub known: Vec<Component>,
    /// Names that matched no component.
    pub unknown: Vec<String>,
}

impl Selection {
    /// Parse names; each entry may itself be a comma-separated list.
    ///
    /// `all` expands to [`Component::ALL`].
    pub fn parse<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut selection = Selection::default();
        for entry in names {
            for name in entry.as_ref().split(',').map(str::trim).filter(|n| !n.is_empty()) {
                if name.eq_ignore_ascii_case("all") {
                    selection.extend(Component::ALL);
                    continue;
                }
                match name.parse::<Component>() {
                    Ok(component) => selection.extend([component]),
                    Err(_) => selection.unknown.push(name.to_string()),
                }
            }
        }
        selection
    }

    pub fn all() -> Self {
        Selection {
            known: Component::ALL.to_vec(),
            unknown: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    fn extend(&mut self, components: impl IntoIterator<Item = Component>) {
        for component in components {
            if !self.known.contains(&component) {
                self.known.push(component);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_names() {
        for component in Component::ALL {
            assert_eq!(component.as_str().parse::<Component>(), Ok(component));
        }
        assert_eq!("Package.JSON".parse::<Component>(), Ok(Component::PackageJson));
    }

    #[test]
    fn test_selection_splits_and_dedups() {
        let selection = Selection::parse(["entities,dtos", "entities", " main "]);
        assert_eq!(
            selection.known,
            vec![Component::Entities, Component::Dtos, Component::Main]
        );
        assert!(selection.unknown.is_empty());
    }

    #[test]
    fn test_selection_collects_unknown() {
        let selection = Selection::parse(["entities,graphql", "migrations"]);
        assert_eq!(selection.known, vec![Component::Entities]);
        assert_eq!(selection.unknown, vec!["graphql", "migrations"]);
    }

    #[test]
    fn test_all_expands() {
        assert_eq!(Selection::parse(["all"]), Selection::all());
        assert!(Selection::parse(Vec::<String>::new()).is_empty());
    }
}
