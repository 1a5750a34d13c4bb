use crate::domain::{
    filter::schema::{EntitySchema, FieldDef},
    record::entities::EntityDescriptor,
};

const CREATED_AT: FieldDef = FieldDef::date("created_at");
const UPDATED_AT: FieldDef = FieldDef::date("updated_at");

pub const CITIZEN: EntityDescriptor = EntityDescriptor {
    name: "citizens",
    table: "Citizen",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::text("first_name"),
        FieldDef::text("last_name"),
        FieldDef::date("birth_date"),
        FieldDef::date("death_date"),
        FieldDef::text("gender"),
        FieldDef::text("address"),
        FieldDef::enumerated("status", &["alive", "deceased"]),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const USER: EntityDescriptor = EntityDescriptor {
    name: "users",
    table: "User",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::text("email"),
        FieldDef::text("password_hash"),
        FieldDef::integer("role_id"),
        FieldDef::integer("citizen_id"),
        CREATED_AT,
        UPDATED_AT,
    ])
    .with_protected(&["password_hash"]),
};

pub const ROLE: EntityDescriptor = EntityDescriptor {
    name: "roles",
    table: "Role",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::enumerated("name", &["citizen", "civilServant", "admin"]),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const EVENT: EntityDescriptor = EntityDescriptor {
    name: "events",
    table: "Event",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::integer("citizen_id"),
        FieldDef::enumerated("type", &["birth", "marriage", "death", "migration"]),
        FieldDef::date("date"),
        FieldDef::text("location"),
        FieldDef::integer("partner_id"),
        FieldDef::integer("parent_a_id"),
        FieldDef::integer("parent_b_id"),
        FieldDef::text("details"),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const RELATION: EntityDescriptor = EntityDescriptor {
    name: "relations",
    table: "Relation",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::enumerated("type", &["parent", "child", "spouse"]),
        FieldDef::integer("citizen_id"),
        FieldDef::integer("related_citizen_id"),
        FieldDef::enumerated("status", &["active", "divorced", "widowed", "inactive"]),
        FieldDef::date("start_date"),
        FieldDef::date("end_date"),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const GENETIC_RESULT: EntityDescriptor = EntityDescriptor {
    name: "genetics",
    table: "GeneticResult",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::integer("citizen_a_id"),
        FieldDef::integer("citizen_b_id"),
        FieldDef::float("coefficient"),
        FieldDef::float("threshold"),
        FieldDef::date("timestamp"),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const PLANET_DATA: EntityDescriptor = EntityDescriptor {
    name: "planet",
    table: "PlanetData",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::text("name"),
        FieldDef::integer("max_population"),
        FieldDef::float("resource_capacity"),
        FieldDef::float("sustainability_factor"),
        FieldDef::float("area_km2"),
        FieldDef::integer("current_population"),
        FieldDef::integer("migration_in"),
        FieldDef::integer("migration_out"),
        FieldDef::float("avg_resource_use"),
        FieldDef::float("growth_rate"),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const REPORT: EntityDescriptor = EntityDescriptor {
    name: "reports",
    table: "Report",
    primary_key: "id",
    schema: EntitySchema::new(&[
        FieldDef::integer("id"),
        FieldDef::enumerated("type", &["population", "genetics", "capacity", "other"]),
        FieldDef::text("data"),
        CREATED_AT,
        UPDATED_AT,
    ]),
};

pub const ENTITIES: &[EntityDescriptor] = &[
    CITIZEN,
    USER,
    ROLE,
    EVENT,
    RELATION,
    GENETIC_RESULT,
    PLANET_DATA,
    REPORT,
];

pub fn lookup(name: &str) -> Option<EntityDescriptor> {
    ENTITIES.iter().copied().find(|entity| entity.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::filter::schema::FieldKind;

    #[test]
    fn test_lookup_by_path_segment() {
        assert_eq!(lookup("citizens").map(|entity| entity.table), Some("Citizen"));
        assert_eq!(lookup("planet").map(|entity| entity.table), Some("PlanetData"));
        assert!(lookup("Citizen").is_none());
    }

    #[test]
    fn test_entity_names_are_unique() {
        for (index, entity) in ENTITIES.iter().enumerate() {
            assert!(
                ENTITIES[index + 1..]
                    .iter()
                    .all(|other| other.name != entity.name),
                "duplicate entity name {}",
                entity.name
            );
        }
    }

    #[test]
    fn test_every_entity_declares_its_primary_key() {
        for entity in ENTITIES {
            assert_eq!(
                entity.schema.kind_of(entity.primary_key),
                Some(FieldKind::Integer),
                "{} has no integer primary key",
                entity.name
            );
        }
    }

    #[test]
    fn test_password_hash_is_protected() {
        assert!(USER.schema.is_protected("password_hash"));
        assert!(!CITIZEN.schema.is_protected("first_name"));
    }
}
