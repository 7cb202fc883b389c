//! Attribute name matching.
//!
//! Source files may refer to the same attribute class in three ways:
//! fully qualified (`Doctrine\ORM\Mapping\Column`), through a namespace
//! alias (`ORM\Column`), or by its imported short name (`Column`). Symbol
//! resolution is not always available at the syntax level, so matching is
//! done on the written name.

/// A canonical attribute class, identified by its fully-qualified name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concept<'a> {
    fqn: &'a str,
    alias: Option<&'a str>,
}

impl<'a> Concept<'a> {
    /// Creates a concept from its fully-qualified name and conventional alias.
    #[must_use]
    pub const fn new(fqn: &'a str, alias: Option<&'a str>) -> Self {
        Self { fqn, alias }
    }

    /// Fully-qualified name.
    #[must_use]
    pub fn fqn(&self) -> &'a str {
        self.fqn
    }

    /// Short display name (last namespace segment).
    #[must_use]
    pub fn short_name(&self) -> &'a str {
        short_name(self.fqn)
    }
}

/// `Doctrine\ORM\Mapping\Column`.
pub const ORM_COLUMN: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\Column", Some("ORM\\Column"));
/// `Doctrine\ORM\Mapping\Entity`.
pub const ORM_ENTITY: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\Entity", Some("ORM\\Entity"));
/// `Doctrine\ORM\Mapping\Table`.
pub const ORM_TABLE: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\Table", Some("ORM\\Table"));
/// `Doctrine\ORM\Mapping\Index`.
pub const ORM_INDEX: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\Index", Some("ORM\\Index"));
/// `Doctrine\ORM\Mapping\ManyToOne`.
pub const ORM_MANY_TO_ONE: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\ManyToOne", Some("ORM\\ManyToOne"));
/// `Doctrine\ORM\Mapping\OneToOne`.
pub const ORM_ONE_TO_ONE: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\OneToOne", Some("ORM\\OneToOne"));
/// `Doctrine\ORM\Mapping\ManyToMany`.
pub const ORM_MANY_TO_MANY: Concept<'static> =
    Concept::new("Doctrine\\ORM\\Mapping\\ManyToMany", Some("ORM\\ManyToMany"));
/// Standalone single-column index marker.
pub const INDEX_COLUMN: Concept<'static> =
    Concept::new("Tourze\\DoctrineIndexedBundle\\Attribute\\IndexColumn", None);
/// `Symfony\Component\Validator\Constraints\Range`.
pub const VALIDATOR_RANGE: Concept<'static> = Concept::new(
    "Symfony\\Component\\Validator\\Constraints\\Range",
    Some("Assert\\Range"),
);
/// `PHPUnit\Framework\Attributes\CoversClass`.
pub const COVERS_CLASS: Concept<'static> =
    Concept::new("PHPUnit\\Framework\\Attributes\\CoversClass", None);

/// Fully-qualified name of the DBAL column type constants class.
pub const DBAL_TYPES: &str = "Doctrine\\DBAL\\Types\\Types";

/// Conventional namespace aliases and the names they stand for.
const ALIASES: &[(&str, &str)] = &[
    ("ORM\\Column", "Doctrine\\ORM\\Mapping\\Column"),
    ("ORM\\Entity", "Doctrine\\ORM\\Mapping\\Entity"),
    ("ORM\\Table", "Doctrine\\ORM\\Mapping\\Table"),
    ("ORM\\Index", "Doctrine\\ORM\\Mapping\\Index"),
    ("ORM\\Id", "Doctrine\\ORM\\Mapping\\Id"),
    ("ORM\\ManyToOne", "Doctrine\\ORM\\Mapping\\ManyToOne"),
    ("ORM\\OneToOne", "Doctrine\\ORM\\Mapping\\OneToOne"),
    ("ORM\\OneToMany", "Doctrine\\ORM\\Mapping\\OneToMany"),
    ("ORM\\ManyToMany", "Doctrine\\ORM\\Mapping\\ManyToMany"),
    ("ORM\\JoinColumn", "Doctrine\\ORM\\Mapping\\JoinColumn"),
    ("ORM\\JoinTable", "Doctrine\\ORM\\Mapping\\JoinTable"),
    ("Assert\\Range", "Symfony\\Component\\Validator\\Constraints\\Range"),
];

/// Strips a leading namespace separator.
#[must_use]
pub fn trim_leading(name: &str) -> &str {
    name.strip_prefix('\\').unwrap_or(name)
}

/// Extracts the last namespace segment.
///
/// # Example
///
/// ```
/// use entity_lint_core::utils::names::short_name;
/// assert_eq!(short_name("Doctrine\\ORM\\Mapping\\Column"), "Column");
/// assert_eq!(short_name("Column"), "Column");
/// ```
#[must_use]
pub fn short_name(name: &str) -> &str {
    name.rsplit('\\').next().unwrap_or(name)
}

/// Expands a known alias to its fully-qualified name.
#[must_use]
pub fn normalize(name: &str) -> &str {
    let name = trim_leading(name);
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map_or(name, |(_, fqn)| fqn)
}

/// Decides whether a written attribute name denotes `concept`.
///
/// Precedence: exact fully-qualified match, alias table (including the
/// concept's own alias), then short-name fallback for arbitrary imports.
#[must_use]
pub fn matches(name: &str, concept: &Concept<'_>) -> bool {
    let name = trim_leading(name);
    if name == concept.fqn {
        return true;
    }
    if normalize(name) == concept.fqn || concept.alias == Some(name) {
        return true;
    }
    short_name(name) == concept.short_name()
}

/// Accepts only the three literal spellings of `concept`: fully qualified,
/// its alias, or the bare short name.
#[must_use]
pub fn is_spelling_of(name: &str, concept: &Concept<'_>) -> bool {
    let name = trim_leading(name);
    name == concept.fqn || concept.alias == Some(name) || name == concept.short_name()
}
