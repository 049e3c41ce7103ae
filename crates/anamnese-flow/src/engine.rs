use tracing::{debug, info, warn};

use anamnese_core::models::assessment::{AssessmentData, AssessmentState, ListField, TextField};
use anamnese_core::models::phase::{AssessmentPhase, SubFlow};
use anamnese_core::models::record::AssessmentRecord;
use anamnese_core::models::response::FlowResponse;
use anamnese_core::models::transcript::{TranscriptEntry, TranscriptRole};
use anamnese_script::definition::{AnswerTarget, PhaseKind};
use anamnese_script::scripts::imre::Imre;
use anamnese_script::{Script, template};
use anamnese_storage::store::{MemoryStore, SessionStore};

use crate::audit::AuditEvent;
use crate::detect;
use crate::error::FlowError;
use crate::report::generate_consensus_report;

/// Conducts scripted interviews, one session per user.
///
/// The engine is the only writer of session state. Every turn loads the
/// session from the store, applies one transition, and writes it back; a
/// store failure leaves the previously stored state untouched.
pub struct AssessmentFlowEngine<S: SessionStore = MemoryStore> {
    store: S,
    script: Box<dyn Script>,
}

impl AssessmentFlowEngine<MemoryStore> {
    /// Engine with the built-in script and a process-local store.
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new(), Box::new(Imre))
    }
}

impl<S: SessionStore> AssessmentFlowEngine<S> {
    pub fn new(store: S, script: Box<dyn Script>) -> Self {
        Self { store, script }
    }

    pub fn script(&self) -> &dyn Script {
        self.script.as_ref()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The opening prompt, asking the patient to introduce themself.
    pub fn greeting(&self) -> String {
        self.script
            .entry_prompt(AssessmentPhase::InitialGreeting, &AssessmentData::default())
    }

    /// Begin a fresh interview for `user_id`, replacing any session it
    /// already has.
    pub fn start_assessment(&mut self, user_id: &str) -> Result<AssessmentState, FlowError> {
        if self.store.get(user_id)?.is_some() {
            debug!(user_id, "replacing active assessment");
        }

        let mut state = AssessmentState::new(user_id);
        let greeting = self.greeting();
        push_turn(&mut state, TranscriptRole::Assistant, &greeting);
        state.last_prompt = greeting;
        self.store.put(state.clone())?;

        AuditEvent::new("assessment.start", user_id, state.session_id)
            .with_details(serde_json::json!({ "script": self.script.id() }))
            .emit();
        Ok(state)
    }

    /// Feed the patient's answer to the current question and get the next
    /// prompt.
    pub fn process_response(
        &mut self,
        user_id: &str,
        text: &str,
    ) -> Result<FlowResponse, FlowError> {
        let mut state = self
            .store
            .get(user_id)?
            .ok_or_else(|| FlowError::NoActiveAssessment {
                user_id: user_id.to_string(),
            })?;

        let before = state.phase;
        let revisions_before = state.data.consensus_revisions;

        let response = if state.is_completed() {
            FlowResponse {
                next_prompt: String::new(),
                phase: AssessmentPhase::Completed,
                is_complete: false,
            }
        } else {
            push_turn(&mut state, TranscriptRole::Patient, text);
            let response = self.advance(&mut state, text);
            if !response.next_prompt.is_empty() {
                push_turn(&mut state, TranscriptRole::Assistant, &response.next_prompt);
                state.last_prompt = response.next_prompt.clone();
            }
            response
        };
        state.last_update = jiff::Timestamp::now();
        self.store.put(state.clone())?;

        debug!(
            user_id,
            from = %before,
            to = %response.phase,
            answer_len = text.len(),
            "processed response"
        );
        self.audit_transition(&state, before, revisions_before, &response);
        Ok(response)
    }

    /// Snapshot of the data captured so far, or `None` without a session.
    pub fn get_assessment_data(&self, user_id: &str) -> Result<Option<AssessmentData>, FlowError> {
        Ok(self.store.get(user_id)?.map(|state| state.data))
    }

    /// Force the session into `Completed` and return its data.
    ///
    /// Phases not yet visited stay empty; the report renders them as not
    /// reported.
    pub fn complete_assessment(
        &mut self,
        user_id: &str,
    ) -> Result<Option<AssessmentData>, FlowError> {
        let Some(mut state) = self.store.get(user_id)? else {
            return Ok(None);
        };

        let from = state.phase;
        state.phase = AssessmentPhase::Completed;
        state.awaiting_continuation = false;
        state.last_update = jiff::Timestamp::now();
        let data = state.data.clone();
        let session_id = state.session_id;
        self.store.put(state)?;

        AuditEvent::new("assessment.force_complete", user_id, session_id)
            .with_details(serde_json::json!({ "from_phase": from.as_str() }))
            .emit();
        Ok(Some(data))
    }

    /// Discard the session for `user_id`. No-op if there is none.
    pub fn reset_assessment(&mut self, user_id: &str) -> Result<(), FlowError> {
        if let Some(state) = self.store.get(user_id)? {
            AuditEvent::new("assessment.reset", user_id, state.session_id).emit();
        }
        self.store.delete(user_id)?;
        Ok(())
    }

    pub fn has_active(&self, user_id: &str) -> Result<bool, FlowError> {
        Ok(self.store.get(user_id)?.is_some())
    }

    pub fn current_phase(&self, user_id: &str) -> Result<Option<AssessmentPhase>, FlowError> {
        Ok(self.store.get(user_id)?.map(|state| state.phase))
    }

    /// The last prompt again, prefixed with an apology. Shown after a turn
    /// failed so the patient can answer again without losing progress.
    pub fn retry_prompt(&self, user_id: &str) -> Result<Option<String>, FlowError> {
        let Some(state) = self.store.get(user_id)? else {
            return Ok(None);
        };
        let apology = &self.script.phrases().apology;
        Ok(Some(format!("{apology} {}", state.last_prompt)))
    }

    /// The consensus report for the data captured so far.
    pub fn consensus_report(&self, user_id: &str) -> Result<Option<String>, FlowError> {
        Ok(self
            .store
            .get(user_id)?
            .map(|state| generate_consensus_report(&state.data, self.script.as_ref())))
    }

    /// Package the session for the persistence collaborator.
    pub fn build_record(&self, user_id: &str) -> Result<Option<AssessmentRecord>, FlowError> {
        let Some(state) = self.store.get(user_id)? else {
            return Ok(None);
        };
        let completed_at = if state.is_completed() {
            state.last_update
        } else {
            jiff::Timestamp::now()
        };

        Ok(Some(AssessmentRecord {
            session_id: state.session_id,
            user_id: state.user_id,
            script_id: self.script.id().to_string(),
            consensus_report: generate_consensus_report(&state.data, self.script.as_ref()),
            data: state.data,
            transcript: state.transcript,
            started_at: state.started_at,
            completed_at,
        }))
    }

    // ── Transitions ──────────────────────────────────────────────────────────

    fn advance(&self, state: &mut AssessmentState, raw: &str) -> FlowResponse {
        let answer = raw.trim();

        match state.phase {
            AssessmentPhase::InitialGreeting => {
                state.data.set_text(TextField::Presentation, answer);
                self.enter_next(state)
            }
            AssessmentPhase::Identification => {
                // The first complaint is taken as-is; no negation check.
                if !answer.is_empty() {
                    state.data.push(ListField::Complaints, answer);
                }
                state.phase = AssessmentPhase::ComplaintList;
                state.awaiting_continuation = true;
                self.follow_up(state)
            }
            AssessmentPhase::MainComplaint => {
                state.data.set_text(TextField::MainComplaint, answer);
                self.enter_next(state)
            }
            AssessmentPhase::ConsensusReport => {
                let phrases = self.script.phrases();
                if detect::is_agreement(answer, &phrases.agreements) {
                    state.data.consensus_agreed = true;
                    self.enter_next(state)
                } else {
                    state.data.consensus_revisions += 1;
                    state.phase = AssessmentPhase::ConsensusReview;
                    let prompt = phrases
                        .revision
                        .replace("{resposta}", answer.trim_end_matches('.'));
                    respond(state, prompt)
                }
            }
            AssessmentPhase::Completed => FlowResponse {
                next_prompt: String::new(),
                phase: AssessmentPhase::Completed,
                is_complete: false,
            },
            phase => match self.script.phase_spec(phase).map(|spec| spec.kind) {
                Some(PhaseKind::RepeatableList(field)) => self.advance_list(state, field, answer),
                Some(PhaseKind::SubFlow(flow)) => self.advance_sub_flow(state, flow, answer),
                _ => self.enter_next(state),
            },
        }
    }

    fn advance_list(
        &self,
        state: &mut AssessmentState,
        field: ListField,
        answer: &str,
    ) -> FlowResponse {
        if detect::closes_list(answer, &self.script.phrases().negations) {
            state.awaiting_continuation = false;
            return self.enter_next(state);
        }

        state.data.push(field, answer);
        state.awaiting_continuation = true;
        self.follow_up(state)
    }

    fn advance_sub_flow(
        &self,
        state: &mut AssessmentState,
        flow: SubFlow,
        answer: &str,
    ) -> FlowResponse {
        let questions = self.script.sub_questions(flow);
        let step = state.sub_flow_step(flow);

        let Some(question) = questions.get(step) else {
            warn!(
                user_id = %state.user_id,
                ?flow,
                step,
                "sub-flow cursor past the last question; leaving sub-flow"
            );
            return self.leave_sub_flow(state, flow);
        };

        match question.target {
            AnswerTarget::Text(field) => state.data.set_text(field, answer),
            AnswerTarget::List(field) => {
                if !detect::closes_list(answer, &self.script.phrases().negations) {
                    state.data.push(field, answer);
                    state.awaiting_continuation = true;
                    return self.follow_up(state);
                }
            }
        }

        let next = step + 1;
        *state.sub_flow_step_mut(flow) = next;

        match questions.get(next) {
            Some(question) => {
                state.awaiting_continuation = question.target.is_list();
                let prompt =
                    template::interpolate(&question.template, &state.data, self.script.phrases());
                respond(state, prompt)
            }
            None => self.leave_sub_flow(state, flow),
        }
    }

    fn leave_sub_flow(&self, state: &mut AssessmentState, flow: SubFlow) -> FlowResponse {
        *state.sub_flow_step_mut(flow) = 0;
        state.awaiting_continuation = false;
        state.phase = flow.phase();
        self.enter_next(state)
    }

    fn enter_next(&self, state: &mut AssessmentState) -> FlowResponse {
        match state.phase.next() {
            Some(next) => self.enter(state, next),
            None => self.enter(state, AssessmentPhase::Completed),
        }
    }

    fn enter(&self, state: &mut AssessmentState, phase: AssessmentPhase) -> FlowResponse {
        state.phase = phase;

        if phase == AssessmentPhase::Completed {
            state.awaiting_continuation = false;
            return FlowResponse {
                next_prompt: String::new(),
                phase,
                is_complete: true,
            };
        }

        // The sub-flow entry prompt already asks question 0, so the cursor
        // starts there and the next answer fills it.
        if let Some(flow) = phase.sub_flow() {
            *state.sub_flow_step_mut(flow) = 0;
            state.awaiting_continuation = self
                .script
                .sub_questions(flow)
                .first()
                .is_some_and(|q| q.target.is_list());
        } else {
            state.awaiting_continuation = self.script.list_field(phase).is_some();
        }

        let prompt = if phase == AssessmentPhase::ConsensusReport {
            generate_consensus_report(&state.data, self.script.as_ref())
        } else {
            self.script.entry_prompt(phase, &state.data)
        };
        respond(state, prompt)
    }

    fn follow_up(&self, state: &AssessmentState) -> FlowResponse {
        respond(state, self.script.phrases().follow_up.clone())
    }

    fn audit_transition(
        &self,
        state: &AssessmentState,
        before: AssessmentPhase,
        revisions_before: u32,
        response: &FlowResponse,
    ) {
        let user_id = state.user_id.as_str();
        if state.data.consensus_revisions > revisions_before {
            AuditEvent::new("assessment.consensus_revision", user_id, state.session_id)
                .with_details(serde_json::json!({ "revisions": state.data.consensus_revisions }))
                .emit();
        }
        if before == AssessmentPhase::ConsensusReport
            && response.phase == AssessmentPhase::FinalRecommendation
        {
            AuditEvent::new("assessment.consensus_agreed", user_id, state.session_id).emit();
        }
        if response.is_complete {
            info!(user_id, session_id = %state.session_id, "assessment completed");
            AuditEvent::new("assessment.complete", user_id, state.session_id)
                .with_details(serde_json::json!({
                    "complaints": state.data.complaint_list.len(),
                    "revisions": state.data.consensus_revisions,
                }))
                .emit();
        }
    }
}

fn respond(state: &AssessmentState, prompt: String) -> FlowResponse {
    FlowResponse {
        next_prompt: prompt,
        phase: state.phase,
        is_complete: false,
    }
}

fn push_turn(state: &mut AssessmentState, role: TranscriptRole, content: &str) {
    state.transcript.push(TranscriptEntry {
        role,
        content: content.to_string(),
        phase: state.phase,
        timestamp: jiff::Timestamp::now(),
    });
}
