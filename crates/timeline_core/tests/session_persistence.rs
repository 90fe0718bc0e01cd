use chrono::NaiveDate;
use std::fs;
use timeline_core::{
    CharacterFields, EventFields, JsonProjectStore, NamePolicy, PlaceFields, ProjectRegistry,
    ProjectSession, ProjectStore, QuickEdit, SessionError, ServiceError, StorageError,
    TimelineFilter,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn every_mutation_is_saved_immediately() {
    let root = tempfile::tempdir().unwrap();
    let store = JsonProjectStore::new(root.path());
    let project = ProjectRegistry::new(&store).bootstrap().unwrap();
    let mut session = ProjectSession::new(&store, project, NamePolicy::default());

    let anna = session.add_character(CharacterFields::named("Anna")).unwrap();
    assert_eq!(store.load("default").unwrap().characters, [anna.clone()]);

    let hall = session.add_place(PlaceFields::named("Hall")).unwrap();
    let mut fields = EventFields::new("Battle of X", date(1200, 3, 14));
    fields.characters.insert(anna.id);
    fields.places.insert(hall.id);
    let battle = session.add_event(fields).unwrap();
    assert_eq!(store.load("default").unwrap().events, [battle.clone()]);

    session.delete_place(hall.id).unwrap();
    let on_disk = store.load("default").unwrap();
    assert!(on_disk.places.is_empty());
    assert!(on_disk.events[0].places.is_empty());
    assert_eq!(on_disk, *session.project());
}

#[test]
fn rejected_mutation_writes_nothing() {
    let root = tempfile::tempdir().unwrap();
    let store = JsonProjectStore::new(root.path());
    let project = ProjectRegistry::new(&store).bootstrap().unwrap();
    let mut session = ProjectSession::new(&store, project, NamePolicy::default());
    session
        .add_event(EventFields::new("Battle of X", date(1200, 3, 14)))
        .unwrap();
    let before = fs::read_to_string(store.data_file("default")).unwrap();

    let err = session
        .add_event(EventFields::new("Battle of X", date(1500, 1, 1)))
        .unwrap_err();
    assert!(matches!(
        err,
        SessionError::Service(ServiceError::DuplicateName { .. })
    ));
    assert_eq!(fs::read_to_string(store.data_file("default")).unwrap(), before);
    assert_eq!(session.events().len(), 1);
    assert_eq!(session.events()[0].start_date, date(1200, 3, 14));
}

#[test]
fn failed_save_rolls_back_memory() {
    let root = tempfile::tempdir().unwrap();
    let store = JsonProjectStore::new(root.path());
    let project = ProjectRegistry::new(&store).bootstrap().unwrap();
    let mut session = ProjectSession::new(&store, project, NamePolicy::default());

    // A directory where the temp file should go makes the write fail.
    fs::create_dir_all(root.path().join("default").join("data.json.tmp")).unwrap();

    let err = session
        .add_character(CharacterFields::named("Anna"))
        .unwrap_err();
    assert!(matches!(err, SessionError::Storage(StorageError::Io { .. })));
    assert!(session.characters().is_empty());
}

#[test]
fn quick_edit_through_session_is_persisted() {
    let root = tempfile::tempdir().unwrap();
    let store = JsonProjectStore::new(root.path());
    let project = ProjectRegistry::new(&store).bootstrap().unwrap();
    let mut session = ProjectSession::new(&store, project, NamePolicy::default());
    let anna = session.add_character(CharacterFields::named("Anna")).unwrap();
    let ride = session
        .add_event(EventFields::new("Ride", date(1200, 1, 1)))
        .unwrap();

    session
        .quick_edit_event(
            ride.id,
            QuickEdit {
                characters: Some([anna.id].into()),
                end_date: Some(Some(date(1200, 1, 4))),
                ..QuickEdit::default()
            },
        )
        .unwrap();

    session.reload().unwrap();
    let event = &session.events()[0];
    assert!(event.references_character(anna.id));
    assert_eq!(event.end_date, Some(date(1200, 1, 4)));
    let cards = session.timeline(&TimelineFilter::default());
    assert_eq!(cards[0].characters, ["Anna"]);
}

#[test]
fn image_failures_do_not_abort_the_rest_of_the_import() {
    let root = tempfile::tempdir().unwrap();
    let outside = tempfile::tempdir().unwrap();
    let store = JsonProjectStore::new(root.path());
    let project = ProjectRegistry::new(&store).bootstrap().unwrap();
    let mut session = ProjectSession::new(&store, project, NamePolicy::default());

    let good = outside.path().join("anna.png");
    fs::write(&good, b"png").unwrap();
    let missing = outside.path().join("missing.png");

    let report = session.import_images(&[missing.clone(), good]);
    assert!(!report.is_complete());
    assert_eq!(report.stored, ["pictures/anna.png"]);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].0, missing);

    let anna = session
        .add_character(CharacterFields {
            images: report.stored.clone(),
            ..CharacterFields::named("Anna")
        })
        .unwrap();
    assert_eq!(anna.images, ["pictures/anna.png"]);
    assert!(root
        .path()
        .join("default")
        .join("pictures")
        .join("anna.png")
        .is_file());
}
