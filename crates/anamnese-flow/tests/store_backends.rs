use std::cell::Cell;

use anamnese_core::models::assessment::AssessmentState;
use anamnese_core::models::phase::AssessmentPhase;
use anamnese_flow::{AssessmentFlowEngine, FlowError};
use anamnese_script::scripts::imre::Imre;
use anamnese_storage::error::StorageError;
use anamnese_storage::file::FileStore;
use anamnese_storage::store::{MemoryStore, SessionStore};

/// Memory store whose writes can be switched off.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    fail_writes: Cell<bool>,
}

impl SessionStore for FlakyStore {
    fn get(&self, user_id: &str) -> Result<Option<AssessmentState>, StorageError> {
        self.inner.get(user_id)
    }

    fn put(&mut self, state: AssessmentState) -> Result<(), StorageError> {
        if self.fail_writes.get() {
            return Err(StorageError::Io {
                path: "sessions".into(),
                source: std::io::Error::other("disk unavailable"),
            });
        }
        self.inner.put(state)
    }

    fn delete(&mut self, user_id: &str) -> Result<(), StorageError> {
        self.inner.delete(user_id)
    }

    fn user_ids(&self) -> Result<Vec<String>, StorageError> {
        self.inner.user_ids()
    }
}

#[test]
fn failed_write_keeps_previous_state_and_allows_retry() {
    let mut engine = AssessmentFlowEngine::new(FlakyStore::default(), Box::new(Imre));
    engine.start_assessment("u").unwrap();
    engine.process_response("u", "Maria").unwrap();

    engine.store().fail_writes.set(true);
    let err = engine.process_response("u", "dor de cabeça").unwrap_err();
    assert!(matches!(err, FlowError::Store(_)));
    assert_eq!(
        engine.current_phase("u").unwrap(),
        Some(AssessmentPhase::Identification)
    );
    let retry = engine.retry_prompt("u").unwrap().unwrap();
    assert!(retry.starts_with("Desculpe"));
    assert!(retry.ends_with("O que trouxe você à nossa avaliação hoje?"));

    engine.store().fail_writes.set(false);
    let r = engine.process_response("u", "dor de cabeça").unwrap();
    assert_eq!(r.phase, AssessmentPhase::ComplaintList);
    let data = engine.get_assessment_data("u").unwrap().unwrap();
    assert_eq!(data.complaint_list, vec!["dor de cabeça"]);
}

#[test]
fn file_store_resumes_across_engines() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = AssessmentFlowEngine::new(FileStore::new(dir.path()), Box::new(Imre));
    let started = first.start_assessment("ana").unwrap();
    first.process_response("ana", "Ana").unwrap();
    first.process_response("ana", "enxaqueca").unwrap();
    drop(first);

    let mut second = AssessmentFlowEngine::new(FileStore::new(dir.path()), Box::new(Imre));
    let r = second.process_response("ana", "não").unwrap();
    assert_eq!(r.phase, AssessmentPhase::MainComplaint);
    assert_eq!(
        r.next_prompt,
        "De todas essas questões (enxaqueca), qual mais o(a) incomoda?"
    );

    let record = second.build_record("ana").unwrap().unwrap();
    assert_eq!(record.session_id, started.session_id);

    second.reset_assessment("ana").unwrap();
    assert!(second.store().user_ids().unwrap().is_empty());
}
