use std::sync::LazyLock;

use anamnese_core::models::assessment::{ListField, TextField};
use anamnese_core::models::phase::{AssessmentPhase, SubFlow};

use crate::Script;
use crate::definition::{AnswerTarget, PhaseKind, PhaseSpec, ScriptPhrases, SubQuestion};

/// Initial clinical assessment following the IMRE interview method, in
/// Brazilian Portuguese.
pub struct Imre;

static PHASES: LazyLock<Vec<PhaseSpec>> = LazyLock::new(|| {
    use AssessmentPhase as P;

    let phases = [
        (
            P::InitialGreeting,
            PhaseKind::Single,
            "Olá! Vamos iniciar sua Avaliação Clínica Inicial. Por favor, apresente-se brevemente: como você se chama e o que gostaria de contar sobre você?",
        ),
        (
            P::Identification,
            PhaseKind::Single,
            "O que trouxe você à nossa avaliação hoje?",
        ),
        (
            P::ComplaintList,
            PhaseKind::RepeatableList(ListField::Complaints),
            "O que mais?",
        ),
        (
            P::MainComplaint,
            PhaseKind::Single,
            "De todas essas questões ({queixas}), qual mais o(a) incomoda?",
        ),
        (
            P::ComplaintDetails,
            PhaseKind::SubFlow(SubFlow::ComplaintDetails),
            "Vamos explorar suas questões mais detalhadamente.",
        ),
        (
            P::MedicalHistory,
            PhaseKind::RepeatableList(ListField::MedicalHistory),
            "E agora, sobre o restante sua vida até aqui, desde seu nascimento, quais as questões de saúde que você já viveu? Vamos ordenar do mais antigo para o mais recente, o que veio primeiro?",
        ),
        (
            P::FamilyHistoryMother,
            PhaseKind::RepeatableList(ListField::FamilyHistoryMother),
            "E na sua família? Começando pela parte de sua mãe, quais as questões de saúde dela e desse lado da família?",
        ),
        (
            P::FamilyHistoryFather,
            PhaseKind::RepeatableList(ListField::FamilyHistoryFather),
            "E por parte de seu pai?",
        ),
        (
            P::LifestyleHabits,
            PhaseKind::RepeatableList(ListField::LifestyleHabits),
            "Além dos hábitos de vida que já verificamos em nossa conversa, que outros hábitos você acha importante mencionar?",
        ),
        (
            P::ObjectiveQuestions,
            PhaseKind::SubFlow(SubFlow::ObjectiveQuestions),
            "",
        ),
        (
            P::ConsensusReview,
            PhaseKind::Single,
            "Vamos revisar a sua história para garantir que não perdemos nenhum detalhe importante.",
        ),
        (
            P::ConsensusReport,
            PhaseKind::Single,
            "**Você concorda com esse entendimento?**",
        ),
        (
            P::FinalRecommendation,
            PhaseKind::Single,
            "Essa é uma avaliação inicial de acordo com o método IMRE, com o objetivo de aperfeiçoar o seu atendimento. Ao final, recomendo a marcação de uma consulta com o seu médico pelo site.",
        ),
        (P::Completed, PhaseKind::Single, ""),
    ];

    phases
        .into_iter()
        .map(|(phase, kind, template)| PhaseSpec {
            phase,
            kind,
            template: template.to_string(),
        })
        .collect()
});

static COMPLAINT_DETAILS: LazyLock<Vec<SubQuestion>> = LazyLock::new(|| {
    let questions = [
        (AnswerTarget::Text(TextField::Location), "Onde você sente {queixa}?"),
        (AnswerTarget::Text(TextField::Onset), "Quando essa {queixa} começou?"),
        (AnswerTarget::Text(TextField::Description), "Como é a {queixa}?"),
        (
            AnswerTarget::List(ListField::AssociatedSymptoms),
            "O que mais você sente quando está com a {queixa}?",
        ),
        (
            AnswerTarget::List(ListField::Improvements),
            "O que parece melhorar a {queixa}?",
        ),
        (
            AnswerTarget::List(ListField::Worsening),
            "O que parece piorar a {queixa}?",
        ),
    ];
    to_questions(&questions)
});

static OBJECTIVE_QUESTIONS: LazyLock<Vec<SubQuestion>> = LazyLock::new(|| {
    let questions = [
        (
            AnswerTarget::Text(TextField::Allergies),
            "Você tem alguma alergia (mudança de tempo, medicação, poeira...)?",
        ),
        (
            AnswerTarget::Text(TextField::RegularMedications),
            "Quais as medicações que você utiliza regularmente?",
        ),
        (
            AnswerTarget::Text(TextField::SporadicMedications),
            "Quais as medicações você utiliza esporadicamente (de vez em quando) e porque utiliza?",
        ),
    ];
    to_questions(&questions)
});

static PHRASES: LazyLock<ScriptPhrases> = LazyLock::new(|| ScriptPhrases {
    follow_up: "O que mais?".to_string(),
    negations: ["não", "nao", "nada mais", "é só isso", "e só isso", "só isso"]
        .map(String::from)
        .to_vec(),
    agreements: ["sim", "concordo", "está correto", "correto"]
        .map(String::from)
        .to_vec(),
    complaint_placeholder: "queixa".to_string(),
    not_reported: "Não informado".to_string(),
    revision: "Entendi. Vamos revisar. {resposta}. Por favor, me diga o que precisa ser corrigido ou adicionado para que eu possa apresentar novamente meu entendimento.".to_string(),
    apology: "Desculpe, tive um problema ao processar sua resposta.".to_string(),
});

fn to_questions(questions: &[(AnswerTarget, &str)]) -> Vec<SubQuestion> {
    questions
        .iter()
        .map(|(target, template)| SubQuestion {
            target: *target,
            template: template.to_string(),
        })
        .collect()
}

impl Script for Imre {
    fn id(&self) -> &str {
        "imre"
    }

    fn name(&self) -> &str {
        "Avaliação Clínica Inicial (IMRE)"
    }

    fn phases(&self) -> &[PhaseSpec] {
        &PHASES
    }

    fn complaint_details(&self) -> &[SubQuestion] {
        &COMPLAINT_DETAILS
    }

    fn objective_questions(&self) -> &[SubQuestion] {
        &OBJECTIVE_QUESTIONS
    }

    fn phrases(&self) -> &ScriptPhrases {
        &PHRASES
    }
}
