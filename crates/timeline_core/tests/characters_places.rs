use chrono::NaiveDate;
use timeline_core::{
    CharacterFields, CharacterService, EntityKind, EventFields, EventService, NamePolicy,
    PlaceFields, PlaceService, Project, ServiceError, ValidationError,
};

fn project() -> Project {
    Project::empty("novel", "/tmp/novel/pictures")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn added_characters_are_listed_in_insertion_order() {
    let mut project = project();
    let mut service = CharacterService::new(&mut project, NamePolicy::default());

    let anna = service.add(CharacterFields::named("Anna")).unwrap();
    let boris = service
        .add(CharacterFields {
            name: "  Boris ".to_string(),
            description: "the smith".to_string(),
            colour: "#A7C7E7".to_string(),
            images: vec!["pictures/boris.png".to_string()],
        })
        .unwrap();

    let names: Vec<_> = service.list().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["Anna", "Boris"]);
    assert_eq!(service.get(boris.id).unwrap().colour, "#A7C7E7");
    assert_ne!(anna.id, boris.id);
}

#[test]
fn empty_character_name_is_rejected_and_nothing_is_added() {
    let mut project = project();
    let mut service = CharacterService::new(&mut project, NamePolicy::default());

    let err = service.add(CharacterFields::named("   ")).unwrap_err();
    assert_eq!(
        err,
        ServiceError::Validation(ValidationError::EmptyName(EntityKind::Character))
    );
    assert!(service.list().is_empty());
}

#[test]
fn invalid_colour_is_rejected() {
    let mut project = project();
    let mut service = CharacterService::new(&mut project, NamePolicy::default());

    let fields = CharacterFields {
        colour: "blue".to_string(),
        ..CharacterFields::named("Anna")
    };
    let err = service.add(fields).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(ValidationError::InvalidColour(_))
    ));
}

#[test]
fn duplicate_character_names_follow_name_policy() {
    let mut project = project();
    {
        let mut service = CharacterService::new(&mut project, NamePolicy::default());
        service.add(CharacterFields::named("Anna")).unwrap();
        let err = service.add(CharacterFields::named(" Anna")).unwrap_err();
        assert!(matches!(err, ServiceError::DuplicateName { .. }));
        service.add(CharacterFields::named("anna")).unwrap();
    }

    let relaxed = NamePolicy {
        trim: true,
        case_sensitive: false,
    };
    let mut service = CharacterService::new(&mut project, relaxed);
    let err = service.add(CharacterFields::named("ANNA")).unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName { .. }));
}

#[test]
fn edit_keeps_id_and_allows_same_name() {
    let mut project = project();
    let mut service = CharacterService::new(&mut project, NamePolicy::default());
    let anna = service.add(CharacterFields::named("Anna")).unwrap();

    let edited = service
        .edit(
            anna.id,
            CharacterFields {
                description: "older now".to_string(),
                ..CharacterFields::named("Anna")
            },
        )
        .unwrap();
    assert_eq!(edited.id, anna.id);
    assert_eq!(service.get(anna.id).unwrap().description, "older now");
}

#[test]
fn failed_edit_leaves_record_unchanged() {
    let mut project = project();
    let mut service = CharacterService::new(&mut project, NamePolicy::default());
    let anna = service.add(CharacterFields::named("Anna")).unwrap();
    service.add(CharacterFields::named("Boris")).unwrap();

    let err = service
        .edit(
            anna.id,
            CharacterFields {
                description: "renamed".to_string(),
                ..CharacterFields::named("Boris")
            },
        )
        .unwrap_err();
    assert!(matches!(err, ServiceError::DuplicateName { .. }));
    assert_eq!(service.get(anna.id).unwrap(), &anna);
}

#[test]
fn edit_and_delete_unknown_ids_return_not_found() {
    let mut project = project();
    let mut service = PlaceService::new(&mut project, NamePolicy::default());
    let ghost = uuid::Uuid::new_v4();

    assert_eq!(
        service.edit(ghost, PlaceFields::named("Nowhere")).unwrap_err(),
        ServiceError::NotFound(EntityKind::Place, ghost)
    );
    assert_eq!(
        service.delete(ghost).unwrap_err(),
        ServiceError::NotFound(EntityKind::Place, ghost)
    );
}

#[test]
fn added_places_are_listed() {
    let mut project = project();
    let mut service = PlaceService::new(&mut project, NamePolicy::default());
    let harbour = service
        .add(PlaceFields {
            description: "salt and tar".to_string(),
            ..PlaceFields::named("Harbour")
        })
        .unwrap();

    assert_eq!(service.list().len(), 1);
    assert_eq!(service.list()[0], harbour);
    assert!(service.add(PlaceFields::named("")).is_err());
    assert_eq!(service.list().len(), 1);
}

#[test]
fn deleting_referenced_place_clears_event_references() {
    let mut project = project();
    let harbour = PlaceService::new(&mut project, NamePolicy::default())
        .add(PlaceFields::named("Harbour"))
        .unwrap();
    let keep = PlaceService::new(&mut project, NamePolicy::default())
        .add(PlaceFields::named("Keep"))
        .unwrap();

    let mut fields = EventFields::new("Landing", date(1100, 5, 1));
    fields.places.insert(harbour.id);
    fields.places.insert(keep.id);
    let landing = EventService::new(&mut project, NamePolicy::default())
        .add(fields)
        .unwrap();
    EventService::new(&mut project, NamePolicy::default())
        .add(EventFields::new("Feast", date(1100, 5, 2)))
        .unwrap();

    let outcome = PlaceService::new(&mut project, NamePolicy::default())
        .delete(harbour.id)
        .unwrap();
    assert_eq!(outcome.cleared_references, 1);

    let landing = project.event(landing.id).unwrap();
    assert!(!landing.references_place(harbour.id));
    assert!(landing.references_place(keep.id));
    assert!(project.check_integrity().is_ok());
}

#[test]
fn deleting_referenced_character_clears_event_references() {
    let mut project = project();
    let anna = CharacterService::new(&mut project, NamePolicy::default())
        .add(CharacterFields::named("Anna"))
        .unwrap();
    let mut fields = EventFields::new("Wedding", date(1100, 6, 1));
    fields.characters.insert(anna.id);
    let wedding = EventService::new(&mut project, NamePolicy::default())
        .add(fields)
        .unwrap();

    let outcome = CharacterService::new(&mut project, NamePolicy::default())
        .delete(anna.id)
        .unwrap();
    assert_eq!(outcome.cleared_references, 1);
    assert!(project.event(wedding.id).unwrap().characters.is_empty());
    assert!(project.characters.is_empty());
}
