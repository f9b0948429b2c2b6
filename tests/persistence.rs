use kbqa::{
    JsonFileStore, KbqaConfig, KnowledgeBase, KnowledgeEntry, Matcher, Session, SessionOptions,
    TeachOutcome, TurnOutcome, load_knowledge_base, save_knowledge_base,
};

fn sample_kb() -> KnowledgeBase {
    [
        KnowledgeEntry::new("What is your name?", "I am an assistant."),
        KnowledgeEntry::new("¿Cómo estás?", "Muy bien, gracias."),
        KnowledgeEntry::new("Quote \"this\"", "Line one\nline two\ttabbed"),
        KnowledgeEntry::new("What is your name?", "Shadowed duplicate."),
    ]
    .into_iter()
    .collect()
}

#[test]
fn load_after_save_returns_same_knowledge_base() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");

    let kb = sample_kb();
    save_knowledge_base(&path, &kb).unwrap();
    assert_eq!(load_knowledge_base(&path).unwrap(), kb);

    save_knowledge_base(&path, &KnowledgeBase::new()).unwrap();
    assert!(load_knowledge_base(&path).unwrap().is_empty());
}

#[test]
fn document_shape_matches_hand_written_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");
    std::fs::write(
        &path,
        r#"{
  "questions": [
    {
      "question": "How old are you?",
      "answer": "Timeless."
    }
  ]
}"#,
    )
    .unwrap();

    let kb = load_knowledge_base(&path).unwrap();
    save_knowledge_base(&path, &kb).unwrap();
    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "questions": [{ "question": "How old are you?", "answer": "Timeless." }]
        })
    );
}

#[test]
fn learned_entries_survive_a_new_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");
    let open = || {
        Session::open(
            Box::new(JsonFileStore::new(&path).create_if_missing(true)),
            Matcher::default(),
            SessionOptions::default(),
        )
        .unwrap()
    };

    {
        let mut session = open();
        assert!(session.knowledge_base().is_empty());
        session.ask("Who built you?");
        assert!(matches!(
            session.teach("A small team.").unwrap(),
            TeachOutcome::Learned(_)
        ));
    }

    let mut session = open();
    assert_eq!(session.knowledge_base().len(), 1);
    assert_eq!(
        session.ask("who built you"),
        TurnOutcome::Answered {
            matched: "who built you".into(),
            answer: "A small team.".into(),
        }
    );
}

#[test]
fn duplicate_questions_keep_first_answer_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("kb.json");
    save_knowledge_base(&path, &sample_kb()).unwrap();

    let mut session = Session::open(
        Box::new(JsonFileStore::new(&path)),
        Matcher::default(),
        SessionOptions::default(),
    )
    .unwrap();
    match session.ask("What is your name?") {
        TurnOutcome::Answered { answer, .. } => assert_eq!(answer, "I am an assistant."),
        other => panic!("expected answer, got {other:?}"),
    }
}

#[test]
fn session_from_config_creates_store_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = KbqaConfig::default();
    config.store.path = dir.path().join("fresh.json");

    let mut session = Session::from_config(&config).unwrap();
    assert!(config.store.path.exists());

    session.ask("What is your favorite color?");
    session.teach("Blue").unwrap();
    let on_disk = load_knowledge_base(&config.store.path).unwrap();
    assert_eq!(
        on_disk.entries(),
        &[KnowledgeEntry::new("What is your favorite color?", "Blue")]
    );
}
