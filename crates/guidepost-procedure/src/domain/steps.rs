//! Resolved, language-specific step model.
//!
//! These types are the output of procedure resolution. Their serialized form
//! is the payload a client walks offline:
//!
//! ```text
//! { "start": 1, "1": { "kind": "question", ... }, "5": { "kind": "advice", ... } }
//! ```

use std::collections::BTreeMap;

use guidepost_core::ids::StepId;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A single answer of a resolved question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAnswer {
    /// Answer text in the requested language, or canonical text.
    pub answer: String,
    /// Step to continue with, or `None` if the procedure ends here.
    pub link: Option<StepId>,
}

/// A question step with localized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedQuestion {
    /// Question text in the requested language, or canonical text.
    pub question: String,
    /// Answers in authoring order.
    pub answers: Vec<ResolvedAnswer>,
}

/// An advice step with localized end-user text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAdvice {
    /// End-user text. `None` means facilitator-only advice that must not be
    /// shown to the end user.
    pub for_user: Option<String>,
    /// Staff guidance, never localized.
    pub for_facilitator: String,
    /// Continuation step, if any.
    pub link: Option<StepId>,
}

/// A resolved step, tagged by `kind` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ResolvedStep {
    /// A multiple-choice question.
    Question(ResolvedQuestion),
    /// An advice node.
    Advice(ResolvedAdvice),
}

impl ResolvedStep {
    /// Returns the outgoing edges of this step, skipping terminal ones.
    #[must_use]
    pub fn links(&self) -> Vec<StepId> {
        match self {
            Self::Question(question) => question
                .answers
                .iter()
                .filter_map(|answer| answer.link)
                .collect(),
            Self::Advice(advice) => advice.link.into_iter().collect(),
        }
    }
}

/// The fully resolved step graph of one procedure in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProcedure {
    /// Entry step id.
    pub start: StepId,
    /// Every step reachable from `start`, keyed by id.
    pub steps: BTreeMap<StepId, ResolvedStep>,
}

impl Serialize for ResolvedProcedure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.steps.len() + 1))?;
        map.serialize_entry("start", &self.start)?;
        for (step_id, step) in &self.steps {
            map.serialize_entry(&step_id.to_string(), step)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_procedure_serializes_as_flat_map_keyed_by_step_id() {
        // Arrange
        let mut steps = BTreeMap::new();
        steps.insert(
            StepId(1),
            ResolvedStep::Question(ResolvedQuestion {
                question: "Do you have a job?".to_owned(),
                answers: vec![
                    ResolvedAnswer {
                        answer: "Yes".to_owned(),
                        link: Some(StepId(5)),
                    },
                    ResolvedAnswer {
                        answer: "No".to_owned(),
                        link: None,
                    },
                ],
            }),
        );
        steps.insert(
            StepId(5),
            ResolvedStep::Advice(ResolvedAdvice {
                for_user: None,
                for_facilitator: "end".to_owned(),
                link: None,
            }),
        );
        let procedure = ResolvedProcedure {
            start: StepId(1),
            steps,
        };

        // Act
        let value = serde_json::to_value(&procedure).unwrap();

        // Assert
        assert_eq!(
            value,
            json!({
                "start": 1,
                "1": {
                    "kind": "question",
                    "question": "Do you have a job?",
                    "answers": [
                        { "answer": "Yes", "link": 5 },
                        { "answer": "No", "link": null }
                    ]
                },
                "5": {
                    "kind": "advice",
                    "forUser": null,
                    "forFacilitator": "end",
                    "link": null
                }
            })
        );
    }

    #[test]
    fn test_links_skip_terminal_answers() {
        let step = ResolvedStep::Question(ResolvedQuestion {
            question: "q".to_owned(),
            answers: vec![
                ResolvedAnswer {
                    answer: "a".to_owned(),
                    link: Some(StepId(2)),
                },
                ResolvedAnswer {
                    answer: "b".to_owned(),
                    link: None,
                },
            ],
        });

        assert_eq!(step.links(), vec![StepId(2)]);
    }

    #[test]
    fn test_links_of_advice_is_its_continuation() {
        let step = ResolvedStep::Advice(ResolvedAdvice {
            for_user: Some("u".to_owned()),
            for_facilitator: "f".to_owned(),
            link: Some(StepId(4)),
        });

        assert_eq!(step.links(), vec![StepId(4)]);
    }
}
