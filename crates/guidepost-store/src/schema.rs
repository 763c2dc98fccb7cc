//! SQL statements used by the PostgreSQL repositories.
//!
//! Tables are created by the workspace migrations. Overlay tables reference
//! languages by surrogate id, so every overlay join resolves the requested
//! language through `languages.english_name`.

/// `step_kinds.name` of a question step.
pub const STEP_KIND_QUESTION: &str = "question";

/// `step_kinds.name` of an advice step.
pub const STEP_KIND_ADVICE: &str = "advice";

/// Every read of one procedure resolution runs inside this scope.
pub const BEGIN_READ_SNAPSHOT: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

/// `$1` = procedure id.
pub const SELECT_PROCEDURE_START: &str = "SELECT start FROM procedures WHERE id = $1";

/// `$1` = step id.
pub const SELECT_STEP_KIND: &str = r"
SELECT step_kinds.name AS kind_name
FROM steps
JOIN step_kinds ON steps.kind = step_kinds.id
WHERE steps.id = $1
";

/// `$1` = step id, `$2` = language identifier.
pub const SELECT_QUESTION: &str = r"
SELECT q.english_text, q.procedure, overlay.text AS overlay_text
FROM questions q
LEFT JOIN question_texts overlay
    ON overlay.question = q.id
   AND overlay.language = (SELECT id FROM languages WHERE english_name = $2)
WHERE q.id = $1
";

/// `$1` = question step id, `$2` = language identifier. Authoring order.
pub const SELECT_ANSWERS: &str = r"
SELECT ans.english_text, ans.next_step, overlay.text AS overlay_text
FROM answers ans
LEFT JOIN answer_texts overlay
    ON overlay.answer = ans.id
   AND overlay.language = (SELECT id FROM languages WHERE english_name = $2)
WHERE ans.answer_to = $1
ORDER BY ans.id
";

/// `$1` = step id, `$2` = language identifier.
pub const SELECT_ADVICE: &str = r"
SELECT adv.english_text,
       COALESCE(adv.facilitator_advice, '') AS facilitator_advice,
       adv.next_step,
       adv.procedure,
       overlay.text AS overlay_text
FROM advices adv
LEFT JOIN advice_texts overlay
    ON overlay.advice = adv.id
   AND overlay.language = (SELECT id FROM languages WHERE english_name = $2)
WHERE adv.id = $1
";

/// Every language, in storage order.
pub const SELECT_LANGUAGES: &str =
    "SELECT english_name, name, welcome, flags FROM languages ORDER BY id";
