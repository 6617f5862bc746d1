/// End-to-end tests for the study assistant: upload files, then ask questions
/// against the in-memory corpus or the cache artifact.
use anyhow::Result;
use prompt_chat::answerer::{CorpusIndex, NO_MATCH_ANSWER, answer};
use prompt_chat::extraction::{CorpusCache, Extractor};
use prompt_chat::session::UPLOAD_FIRST_MESSAGE;
use prompt_chat::{ConfigBuilder, StudySession};
use tempfile::tempdir;

#[test]
fn cat_scenario_from_uploaded_text_file() -> Result<()> {
    let dir = tempdir()?;
    let notes = dir.path().join("animals.txt");
    std::fs::write(&notes, "The cat sat on the mat. Dogs bark loudly at night.")?;

    let config = ConfigBuilder::new()
        .cache_path(dir.path().join("extracted_text.txt"))
        .build()?;
    let mut session = StudySession::new(config.extractor());
    session.upload(&[&notes])?;

    assert_eq!(session.ask("Where does the cat sit?")?, "The cat sat on the mat.");
    Ok(())
}

#[test]
fn moon_scenario_returns_fallback() {
    assert_eq!(answer("moon", "Hello world. Goodbye world."), NO_MATCH_ANSWER);
}

#[test]
fn any_question_against_empty_corpus_is_fallback() {
    for question in ["what?", "photosynthesis", "", "a b c"] {
        assert_eq!(answer(question, ""), NO_MATCH_ANSWER);
    }
}

#[test]
fn empty_question_against_any_corpus_is_fallback() {
    for corpus in ["One.", "Two sentences here. And here.", "no punctuation"] {
        assert_eq!(answer("", corpus), NO_MATCH_ANSWER);
    }
}

#[test]
fn repeated_questions_give_identical_answers() {
    let corpus = "Plants need light. Light is energy. Energy drives growth in plants.";
    let index = CorpusIndex::new(corpus);
    let answers: Vec<String> = (0..10).map(|_| index.answer("plants light")).collect();
    assert!(answers.windows(2).all(|pair| pair[0] == pair[1]));
}

#[test]
fn multiple_documents_are_searched_together() -> Result<()> {
    let dir = tempdir()?;
    let physics = dir.path().join("physics.txt");
    let chemistry = dir.path().join("chemistry.TXT");
    std::fs::write(&physics, "Force equals mass times acceleration.")?;
    std::fs::write(&chemistry, "Water is made of hydrogen and oxygen.")?;

    let cache = CorpusCache::new(dir.path().join("cache.txt"));
    let mut session = StudySession::new(Extractor::new(cache));
    let report = session.upload(&[&physics, &chemistry])?.expect("files were given");

    assert_eq!(
        report.corpus(),
        "Force equals mass times acceleration.\nWater is made of hydrogen and oxygen.\n"
    );
    assert_eq!(session.uploaded_files(), &["physics.txt", "chemistry.TXT"]);
    assert_eq!(
        session.ask("what is water made of")?,
        "Water is made of hydrogen and oxygen."
    );
    Ok(())
}

#[test]
fn cache_survives_into_a_new_session() -> Result<()> {
    let dir = tempdir()?;
    let cache_path = dir.path().join("extracted_text.txt");
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "The French Revolution began in 1789.")?;

    let mut first = StudySession::new(Extractor::new(CorpusCache::new(&cache_path)));
    first.upload(&[&notes])?;
    drop(first);
    std::fs::remove_file(&notes)?;

    let mut second = StudySession::new(Extractor::new(CorpusCache::new(&cache_path)));
    assert!(second.uploaded_files().is_empty());
    assert_eq!(
        second.ask("When did the revolution begin?")?,
        "The French Revolution began in 1789."
    );
    Ok(())
}

#[test]
fn missing_corpus_and_cache_gives_instruction() -> Result<()> {
    let dir = tempdir()?;
    let mut session = StudySession::new(Extractor::new(CorpusCache::new(
        dir.path().join("never_written.txt"),
    )));

    assert_eq!(session.ask("hello?")?, UPLOAD_FIRST_MESSAGE);
    Ok(())
}

#[test]
fn excluded_failures_never_become_answers() -> Result<()> {
    let dir = tempdir()?;
    let broken = dir.path().join("broken.pdf");
    let notes = dir.path().join("notes.txt");
    std::fs::write(&broken, "garbage")?;
    std::fs::write(&notes, "Reading PDFs is covered in chapter four.")?;

    let mut session = StudySession::new(Extractor::new(CorpusCache::new(
        dir.path().join("cache.txt"),
    )));
    let report = session.upload(&[&broken, &notes])?.expect("files were given");

    assert_eq!(report.failures().len(), 1);
    assert_eq!(
        session.ask("error reading")?,
        "Reading PDFs is covered in chapter four."
    );
    Ok(())
}
