//! Rule forbidding `#[IndexColumn]` next to an association mapping.
//!
//! Association columns already receive a foreign-key index, so an extra
//! index marker on the same property creates a duplicate index.
//!
//! Attribute names are matched by fully-qualified name, by `ORM\` alias and
//! by short name, so custom imports such as `use ... as Mapping` still match.
//!
//! # Configuration
//!
//! - `index_column_class`: Fully-qualified marker class
//!   (default: `Tourze\DoctrineIndexedBundle\Attribute\IndexColumn`)

use entity_lint_core::utils::names::{
    self, Concept, INDEX_COLUMN, ORM_MANY_TO_MANY, ORM_MANY_TO_ONE, ORM_ONE_TO_ONE,
};
use entity_lint_core::utils::best_line;
use entity_lint_core::{Attribute, ClassContext, Finding, Property, Rule, RuleConfig, Severity};

/// Rule code for index-column-mutually-exclusive.
pub const CODE: &str = "EL005";

/// Rule name for index-column-mutually-exclusive.
pub const NAME: &str = "index-column-mutually-exclusive";

/// Identifier for a marker/association conflict.
pub const IDENTIFIER: &str = "doctrine.indexColumn.mutuallyExclusive";

const ASSOCIATIONS: [Concept<'static>; 3] = [ORM_MANY_TO_ONE, ORM_ONE_TO_ONE, ORM_MANY_TO_MANY];

/// Attributes of one property relevant to this rule.
struct PropertyMarkers<'a> {
    has_index_column: bool,
    associations: Vec<&'a Attribute>,
}

impl<'a> PropertyMarkers<'a> {
    fn collect(property: &'a Property, marker: &Concept<'_>) -> Self {
        let mut markers = Self {
            has_index_column: false,
            associations: Vec::new(),
        };
        for attr in &property.attributes {
            if names::matches(&attr.name, marker) {
                markers.has_index_column = true;
            }
            if ASSOCIATIONS.iter().any(|a| names::matches(&attr.name, a)) {
                markers.associations.push(attr);
            }
        }
        markers
    }

    fn conflicts(&self) -> &[&'a Attribute] {
        if self.has_index_column {
            &self.associations
        } else {
            &[]
        }
    }
}

/// Flags properties carrying both the index marker and an association.
#[derive(Debug, Clone)]
pub struct IndexColumnMutuallyExclusive {
    /// Fully-qualified name of the index marker attribute.
    pub index_column_class: String,
    /// Custom severity.
    pub severity: Severity,
}

impl Default for IndexColumnMutuallyExclusive {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexColumnMutuallyExclusive {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            index_column_class: INDEX_COLUMN.fqn().to_string(),
            severity: Severity::Error,
        }
    }

    /// Sets the index marker class.
    #[must_use]
    pub fn index_column_class(mut self, class: impl Into<String>) -> Self {
        self.index_column_class = class.into();
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl Rule for IndexColumnMutuallyExclusive {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids #[IndexColumn] on association properties"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn configure(&mut self, config: &RuleConfig) {
        let class = config.get_str("index_column_class", &self.index_column_class);
        self.index_column_class = names::trim_leading(class).to_string();
    }

    fn check(&self, ctx: &ClassContext<'_>) -> Vec<Finding> {
        if !ctx.is_entity() {
            return Vec::new();
        }

        let marker = Concept::new(&self.index_column_class, None);
        let mut findings = Vec::new();

        for property in &ctx.declaration().properties {
            let markers = PropertyMarkers::collect(property, &marker);
            for association in markers.conflicts() {
                let line = best_line([
                    Some(property.line),
                    property.attributes.first().map(|a| a.line),
                ]);
                findings.push(
                    Finding::new(
                        CODE,
                        NAME,
                        IDENTIFIER,
                        self.severity,
                        ctx.location(line),
                        format!(
                            "Property \"{}\" of entity \"{}\" uses both #[{}] and #[{}]; these \
                             attributes are mutually exclusive.",
                            property.name,
                            ctx.class_name(),
                            marker.short_name(),
                            names::short_name(&association.name)
                        ),
                    )
                    .with_tip(format!(
                        "Associations already get a foreign-key index. Remove #[{}] from property \"{}\".",
                        marker.short_name(),
                        property.name
                    )),
                );
            }
        }

        findings
    }
}
