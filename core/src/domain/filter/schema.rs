/// Declared storage type of a filterable field. Drives how the compiler
/// coerces incoming text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// ISO-8601 date or datetime stored as text.
    Date,
    /// Text restricted to a fixed set of values.
    Enumerated(&'static [&'static str]),
    Integer,
    Float,
    Boolean,
}

impl FieldKind {
    pub fn is_numeric(&self) -> bool {
        matches!(self, FieldKind::Integer | FieldKind::Float)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }

    pub const fn text(name: &'static str) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub const fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub const fn enumerated(name: &'static str, variants: &'static [&'static str]) -> Self {
        Self::new(name, FieldKind::Enumerated(variants))
    }

    pub const fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub const fn float(name: &'static str) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub const fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }
}

/// The set of fields an entity exposes to filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub fields: &'static [FieldDef],
    /// Stored columns that must never be filtered, sorted or returned.
    pub protected: &'static [&'static str],
}

impl EntitySchema {
    pub const fn new(fields: &'static [FieldDef]) -> Self {
        Self {
            fields,
            protected: &[],
        }
    }

    pub const fn with_protected(mut self, protected: &'static [&'static str]) -> Self {
        self.protected = protected;
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.field(name).map(|field| field.kind)
    }

    pub fn is_protected(&self, name: &str) -> bool {
        self.protected.contains(&name)
    }
}
