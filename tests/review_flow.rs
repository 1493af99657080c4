//! End-to-end review flow against an on-disk SQLite database.

use chrono::{Days, NaiveDate};
use tungsten::export::json::{export_json_to_path, import_json};
use tungsten::{App, Error, FlashcardRepository, ReviewSession, SqliteRepository, select_due};

fn day(n: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap() + Days::new(n)
}

fn due_ids(app: &App<SqliteRepository>, today: NaiveDate) -> Vec<i64> {
    app.get_review_cards(today)
        .unwrap()
        .iter()
        .map(|c| c.id)
        .collect()
}

#[test]
fn test_schedule_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cards.db");

    let id = {
        let mut app = App::new(SqliteRepository::open(&db_path).unwrap());
        let card = app.save_flashcard("cześć", "hello", day(0)).unwrap();
        app.review_card(card.id, 5, day(0)).unwrap();
        app.review_card(card.id, 5, day(1)).unwrap();
        card.id
    };

    let app = App::new(SqliteRepository::open(&db_path).unwrap());
    let card = app.repository().get(id).unwrap();
    assert_eq!(card.repetitions, 2);
    assert!((card.easiness - 2.7).abs() < 1e-9);
    assert_eq!(card.interval, 6);
    assert_eq!(card.review_date, day(7));

    assert!(due_ids(&app, day(6)).is_empty());
    assert_eq!(due_ids(&app, day(7)), vec![id]);
}

#[test]
fn test_failure_brings_card_back_tomorrow() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(SqliteRepository::open(&dir.path().join("cards.db")).unwrap());

    let card = app.save_flashcard("dziękuję", "thank you", day(0)).unwrap();
    app.review_card(card.id, 5, day(0)).unwrap();
    app.review_card(card.id, 5, day(1)).unwrap();
    let failed = app.review_card(card.id, 2, day(7)).unwrap();

    assert_eq!(failed.repetitions, 0);
    assert_eq!(failed.interval, 1);
    assert_eq!(failed.review_date, day(8));
    assert_eq!(due_ids(&app, day(8)), vec![card.id]);
}

#[test]
fn test_due_order_across_overdue_cards() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(SqliteRepository::open(&dir.path().join("cards.db")).unwrap());

    let late = app.save_flashcard("late", "1", day(3)).unwrap();
    let early = app.save_flashcard("early", "2", day(0)).unwrap();
    let also_early = app.save_flashcard("also early", "3", day(0)).unwrap();
    app.save_flashcard("future", "4", day(9)).unwrap();

    assert_eq!(due_ids(&app, day(5)), vec![early.id, also_early.id, late.id]);
    assert_eq!(due_ids(&app, day(5)), due_ids(&app, day(5)));
}

#[test]
fn test_rejected_grade_leaves_database_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(SqliteRepository::open(&dir.path().join("cards.db")).unwrap());
    let card = app.save_flashcard("proszę", "please", day(0)).unwrap();

    assert!(matches!(app.review_card(card.id, 7, day(0)), Err(Error::InvalidGrade(7))));
    assert_eq!(app.repository().get(card.id).unwrap(), card);
}

#[test]
fn test_session_repeats_failed_cards() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = App::new(SqliteRepository::open(&dir.path().join("cards.db")).unwrap());
    let a = app.save_flashcard("a", "1", day(0)).unwrap();
    let b = app.save_flashcard("b", "2", day(0)).unwrap();

    let cards = app.repository().load_all().unwrap();
    let mut session = ReviewSession::new(&select_due(&cards, day(0)));

    session.grade_current(&mut app, 0, day(0)).unwrap();
    session.grade_current(&mut app, 4, day(0)).unwrap();
    assert_eq!(session.current(), Some(a.id));
    session.grade_current(&mut app, 4, day(0)).unwrap();

    assert!(session.is_completed());
    assert_eq!(session.reviewed_count(), 3);
    assert_eq!(app.repository().get(a.id).unwrap().repetitions, 1);
    assert_eq!(app.repository().get(b.id).unwrap().repetitions, 1);
}

#[test]
fn test_backup_into_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("backup.json");

    let mut source = App::new(SqliteRepository::open(&dir.path().join("source.db")).unwrap());
    let card = source.save_flashcard("do widzenia", "goodbye", day(0)).unwrap();
    source.review_card(card.id, 4, day(0)).unwrap();
    export_json_to_path(&source.get_all_flashcards().unwrap(), &backup).unwrap();

    let mut target = App::new(SqliteRepository::open(&dir.path().join("target.db")).unwrap());
    let imported = target.import_flashcards(import_json(&backup).unwrap()).unwrap();

    assert_eq!(imported.len(), 1);
    assert_eq!(imported[0].front, "do widzenia");
    assert_eq!(imported[0].repetitions, 1);
    assert_eq!(imported[0].review_date, day(1));
}

#[test]
fn test_import_rejects_file_with_broken_easiness() {
    let dir = tempfile::tempdir().unwrap();
    let backup = dir.path().join("broken.json");
    std::fs::write(
        &backup,
        r#"{
  "1": {"id": 1, "front": "a", "back": "1", "repetitions": 0, "easiness": 2.5,
        "interval": 0, "review_date": "2025-01-01T00:00:00Z"},
  "2": {"id": 2, "front": "b", "back": "2", "repetitions": 3, "easiness": -3.0,
        "interval": 15, "review_date": "2025-01-10T00:00:00Z"}
}"#,
    )
    .unwrap();

    let mut app = App::new(SqliteRepository::open(&dir.path().join("cards.db")).unwrap());
    let cards = import_json(&backup).unwrap();
    let result = app.import_flashcards(cards);

    assert!(matches!(result, Err(Error::InvalidRecord { id: 2, .. })));
    assert!(app.get_all_flashcards().unwrap().is_empty());
}
